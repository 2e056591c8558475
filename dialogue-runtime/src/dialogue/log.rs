//! # Log 模块
//!
//! 对话回看记录。
//!
//! 每句对话追加一条记录，携带回退所需的故事位置；回退到某条
//! 记录时，其后的记录被移除，并通过 [`StoryFlow::move_back_to`]
//! 让故事回到对应位置。书签加载前整体清空。
//!
//! 记录面板的 UI 与语音重放在 crate 之外，这里只保存数据。

use tracing::debug;

use super::events::{DialogueChangedData, StoryEvent, StoryFlow};

/// 一条对话记录
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// 对话文本
    pub text: String,
    /// 所在故事节点名
    pub node_name: String,
    /// 节点内的对话序号
    pub dialogue_index: usize,
    /// 本句关联的语音资源路径
    pub voices: Vec<String>,
}

/// 对话回看记录
#[derive(Debug, Clone, Default)]
pub struct DialogueLog {
    entries: Vec<LogEntry>,
}

impl DialogueLog {
    /// 创建空记录
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// 全部记录
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// 记录数量
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 处理故事事件
    ///
    /// 记录订阅 `DialogueChanged` 与 `BookmarkWillLoad`，
    /// 其余事件与记录无关。
    pub fn on_story_event(&mut self, event: &StoryEvent) {
        match event {
            StoryEvent::DialogueChanged(data) => self.push(data),
            StoryEvent::BookmarkWillLoad => self.clear(),
            _ => {}
        }
    }

    /// 追加一条记录
    fn push(&mut self, data: &DialogueChangedData) {
        self.entries.push(LogEntry {
            text: data.text.clone(),
            node_name: data.node_name.clone(),
            dialogue_index: data.dialogue_index,
            voices: data.voices_for_next_dialogue.clone(),
        });
    }

    /// 回退到指定记录
    ///
    /// 该记录之后（含该记录）的条目被移除，故事回到记录对应的
    /// 位置。越界索引是无操作。
    pub fn go_back_to(&mut self, entry_index: usize, story: &mut dyn StoryFlow) {
        let Some(entry) = self.entries.get(entry_index) else {
            return;
        };
        let node_name = entry.node_name.clone();
        let dialogue_index = entry.dialogue_index;

        self.entries.truncate(entry_index);
        story.move_back_to(&node_name, dialogue_index);
        debug!(remaining = self.entries.len(), "回退后剩余记录数");
    }

    /// 清空全部记录
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
