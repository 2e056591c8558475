//! # Dialogue 模块
//!
//! 对话推进的核心：状态机、调度与故事协作契约。
//!
//! ## 核心概念
//!
//! - [`DialogueState`]: Normal / Auto / Skip 三态
//! - [`DialogueProgressionController`]: 推进控制器（状态机 + 调度）
//! - [`StoryFlow`] / [`StoryEvent`]: 故事侧协作者契约
//! - [`DialogueBoxRegistry`]: 多对话框注册表（事件只达激活者）
//! - [`DialogueLog`]: 对话回看记录

mod controller;
mod events;
mod log;
mod registry;
mod schedule;
mod state;

pub use controller::DialogueProgressionController;
pub use events::{DialogueChangedData, StoryEvent, StoryFlow};
pub use log::{DialogueLog, LogEntry};
pub use registry::DialogueBoxRegistry;
pub use state::{DialogueState, ModeEvent};
