//! # Dialogue Runtime
//!
//! 视觉小说对话演出的核心运行时库。
//!
//! ## 架构概述
//!
//! `dialogue-runtime` 是纯逻辑核心，不依赖任何 IO 或渲染引擎。
//! 宿主每帧调用一次各组件的 tick，并在其间转发故事事件与用户
//! 输入：
//!
//! ```text
//! Host                               Runtime
//!   │                                   │
//!   │── StoryEvent / click ───────────►│
//!   │── tick(dt) ─────────────────────►│ 过渡 -> 逐字显示 -> 调度
//!   │◄─ displayed() / ModeEvent ───────│
//!   │                                   │
//! ```
//!
//! ## 帧内顺序
//!
//! 单线程协作式调度，无锁。一帧内的推进顺序固定：
//!
//! 1. [`TransitionEngine::tick`] —— 属性过渡
//! 2. [`DialogueProgressionController::tick`] —— 逐字显示，
//!    然后是计划推进的轮询
//!
//! 取消是协作式且非即时的：停止过渡只阻止其下一次推进，终值
//! 在下一帧落定。
//!
//! ## 核心类型
//!
//! - [`TransitionEngine`]：目标驱动的属性过渡引擎
//! - [`TextRevealBuffer`]：逐字显示缓冲
//! - [`DialogueProgressionController`]：Normal / Auto / Skip 状态机
//! - [`StoryFlow`] / [`StoryEvent`]：故事侧协作者契约
//!
//! ## 使用示例
//!
//! ```ignore
//! use dialogue_runtime::{
//!     DialogueConfig, DialogueProgressionController, DialogueState, TransitionEngine,
//! };
//!
//! let mut engine = TransitionEngine::new();
//! let mut dialogue = DialogueProgressionController::new(DialogueConfig::default())?;
//!
//! // 主循环
//! loop {
//!     for event in story.drain_events() {
//!         dialogue.on_story_event(&event);
//!     }
//!     if clicked {
//!         dialogue.on_click(&mut story);
//!     }
//!
//!     engine.tick(dt);
//!     dialogue.tick(dt, &mut story);
//!
//!     draw_text(dialogue.speaker_name(), dialogue.displayed());
//! }
//! ```
//!
//! ## 模块结构
//!
//! - [`animation`]：属性过渡引擎
//! - [`text`]：逐字显示缓冲
//! - [`dialogue`]：推进状态机、注册表与回看记录
//! - [`timeline`]：时间轴播放（过渡引擎的薄消费者）
//! - [`assets`]：资源提供者契约
//! - [`config`]：配置定义
//! - [`error`]：错误类型定义

pub mod animation;
pub mod assets;
pub mod config;
pub mod dialogue;
pub mod error;
pub mod text;
pub mod timeline;

// 重导出核心类型
pub use animation::{AnimationProperty, SharedProperty, TransitionEngine};
pub use assets::{AssetHandle, AssetKind, AssetProvider, MemoryAssets, TimelineAsset};
pub use config::{DialogueConfig, DialogueUpdateMode};
pub use dialogue::{
    DialogueBoxRegistry, DialogueChangedData, DialogueLog, DialogueProgressionController,
    DialogueState, LogEntry, ModeEvent, StoryEvent, StoryFlow,
};
pub use error::{ConfigError, ConfigResult};
pub use text::TextRevealBuffer;
pub use timeline::TimelinePlayer;
