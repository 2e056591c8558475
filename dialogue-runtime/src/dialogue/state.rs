//! # State 模块
//!
//! 对话框推进状态的定义。

use serde::{Deserialize, Serialize};

/// 对话推进状态
///
/// # 状态语义
///
/// ```text
/// Normal -> 仅手动推进
/// Auto   -> 按「每字符延迟 × 当前句长度」自动推进
/// Skip   -> 按固定短延迟自动推进，逐字动画被抑制
/// ```
///
/// 状态只能通过控制器的转换契约修改（Auto/Skip 只能从 Normal
/// 进入），不允许外部直接写字段。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DialogueState {
    /// 普通模式：等待用户点击推进
    #[default]
    Normal,
    /// 自动模式：延迟与文本长度成正比
    Auto,
    /// 快进模式：固定延迟，无逐字动画
    Skip,
}

/// 模式切换事件
///
/// 控制器在状态转换时发出，供宿主更新按钮高亮等 UI 状态。
/// 事件在内部排队，由宿主统一取走。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeEvent {
    /// Auto 模式开始
    AutoModeStarts,
    /// Auto 模式结束
    AutoModeStops,
    /// Skip 模式开始
    SkipModeStarts,
    /// Skip 模式结束
    SkipModeStops,
}
