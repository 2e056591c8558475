//! # Registry 模块
//!
//! 多对话框注册表。
//!
//! 同时可以存在多种对话框（底部对话框、全屏文字等），任意时刻
//! 只有一个处于激活状态。故事事件只分发给激活中的控制器；切换
//! 模式时旧控制器被停用（取消其计划推进）。
//!
//! 类型键在录入与查找两侧统一转为小写，避免大小写不一致导致
//! 同一对话框被注册两份或查找失败。

use std::collections::HashMap;

use tracing::warn;

use super::controller::DialogueProgressionController;
use super::events::StoryEvent;

/// 对话框注册表
///
/// 持有全部控制器并拥有它们的激活状态；激活与否在这里决定，
/// 控制器自身不做运行时探测。
#[derive(Debug, Default)]
pub struct DialogueBoxRegistry {
    /// 全部控制器（小写类型键 -> 控制器）
    controllers: HashMap<String, DialogueProgressionController>,
    /// 当前激活的类型键（小写）
    mode: Option<String>,
}

impl DialogueBoxRegistry {
    /// 创建空注册表
    pub fn new() -> Self {
        Self {
            controllers: HashMap::new(),
            mode: None,
        }
    }

    /// 注册控制器
    ///
    /// 类型键取自控制器配置的 `box_type`，统一转小写。
    /// 第一个注册的控制器成为激活模式。
    pub fn register(&mut self, controller: DialogueProgressionController) {
        let key = controller.box_type().to_lowercase();
        if self.mode.is_none() {
            self.mode = Some(key.clone());
        }
        self.controllers.insert(key, controller);
    }

    /// 当前激活的模式键
    pub fn mode(&self) -> Option<&str> {
        self.mode.as_deref()
    }

    /// 切换激活模式
    ///
    /// 大小写不敏感。未注册的模式只记录警告，不改变当前状态。
    pub fn set_mode(&mut self, mode: &str) {
        let key = mode.to_lowercase();
        if self.mode.as_deref() == Some(key.as_str()) {
            return;
        }
        if !self.controllers.contains_key(&key) {
            warn!(mode = %key, "未注册的对话框模式");
            return;
        }

        // 停用旧控制器
        if let Some(current) = &self.mode
            && let Some(controller) = self.controllers.get_mut(current)
        {
            controller.deactivate();
        }

        self.mode = Some(key);
    }

    /// 当前激活的控制器
    pub fn current(&self) -> Option<&DialogueProgressionController> {
        self.controllers.get(self.mode.as_deref()?)
    }

    /// 当前激活的控制器（可变）
    pub fn current_mut(&mut self) -> Option<&mut DialogueProgressionController> {
        let key = self.mode.clone()?;
        self.controllers.get_mut(&key)
    }

    /// 把故事事件分发给激活中的控制器
    pub fn dispatch(&mut self, event: &StoryEvent) {
        if let Some(controller) = self.current_mut() {
            controller.on_story_event(event);
        }
    }

    /// 清空激活对话框的当前页
    pub fn new_page(&mut self) {
        if let Some(controller) = self.current_mut() {
            controller.new_page();
        }
    }

    /// 已注册的控制器数量
    pub fn len(&self) -> usize {
        self.controllers.len()
    }

    /// 注册表是否为空
    pub fn is_empty(&self) -> bool {
        self.controllers.is_empty()
    }
}
