//! # Events 模块
//!
//! 故事侧协作者的契约：事件数据与推进接口。
//!
//! 故事图本身（节点、分支、存档）在本 crate 之外；这里只定义
//! 对话框核心消费它所需要的最小接口。

/// 对话变化事件数据
///
/// 每当故事推进到一句新对话时发出。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogueChangedData {
    /// 对话文本（可能带 "名字：内容" 前缀）
    pub text: String,
    /// 所在故事节点名
    pub node_name: String,
    /// 节点内的对话序号
    pub dialogue_index: usize,
    /// 本句关联的语音资源路径（可为空）
    pub voices_for_next_dialogue: Vec<String>,
}

impl DialogueChangedData {
    /// 创建无语音的对话数据
    pub fn new(
        text: impl Into<String>,
        node_name: impl Into<String>,
        dialogue_index: usize,
    ) -> Self {
        Self {
            text: text.into(),
            node_name: node_name.into(),
            dialogue_index,
            voices_for_next_dialogue: Vec::new(),
        }
    }
}

/// 故事事件
///
/// 故事侧在推进过程中发出的事件，由宿主转发给对话框核心。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoryEvent {
    /// 对话即将变化（变化前发出，用于停止旧的调度）
    DialogueWillChange,
    /// 对话已变化
    DialogueChanged(DialogueChangedData),
    /// 出现分支选择点
    BranchOccurs,
    /// 分支选择已完成
    BranchSelected,
    /// 当前路线结束
    CurrentRouteEnded,
    /// 书签（存档位置）即将加载
    BookmarkWillLoad,
}

/// 故事推进接口
///
/// 对话框核心只通过此接口驱动故事：
/// - [`step`](StoryFlow::step) 推进一句
/// - [`can_step_forward`](StoryFlow::can_step_forward) 查询当前能否推进
///   （分支点、路线末尾等处为 false）
/// - [`move_back_to`](StoryFlow::move_back_to) 回退到历史位置
pub trait StoryFlow {
    /// 当前能否向前推进
    fn can_step_forward(&self) -> bool;

    /// 向前推进一句
    fn step(&mut self);

    /// 回退到指定节点的指定对话
    fn move_back_to(&mut self, node_name: &str, dialogue_index: usize);
}
