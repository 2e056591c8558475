//! # Animation 模块
//!
//! 目标驱动的属性过渡系统。
//!
//! ## 核心设计理念
//!
//! 引擎只负责**时间轴管理**：
//! - 知道某个属性需要在 duration 内从当前值变化到目标值
//! - 每帧直接写入属性（通过 [`AnimationProperty`]）
//! - 不假设属性背后的对象类型，对象自己决定值的含义
//!
//! ## 核心概念
//!
//! - [`AnimationProperty`]: 带稳定 ID 的可读写 f32 槽位
//! - [`SharedProperty`]: 基于 `Rc<Cell<f32>>` 的通用属性实现
//! - [`TransitionEngine`]: 在途过渡注册表，每帧统一推进

mod engine;
mod property;

pub use engine::TransitionEngine;
pub use property::{AnimationProperty, SharedProperty};
