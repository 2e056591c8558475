//! # Property 模块
//!
//! 可动画属性的核心接口定义。
//!
//! 属性是一个带稳定标识的 f32 槽位（如透明度、坐标、播放时间），
//! 由外部对象拥有；过渡引擎只在单次过渡的生命周期内引用它。

use std::cell::Cell;
use std::rc::Rc;

/// 可动画属性接口
///
/// 实现者对外暴露一个可读写的 f32 值，以及在同时动画的属性中
/// 唯一的稳定 ID。引擎通过 ID 索引过渡条目，通过 value 读写属性。
///
/// ## 设计说明
///
/// setter 采用 `&self` 接收者，实现者通过内部可变性
/// （`Cell` / `RefCell`）写入底层值，这样引擎可以同时持有
/// 多个属性的共享引用而不产生借用冲突。
pub trait AnimationProperty {
    /// 属性的唯一 ID
    fn id(&self) -> &str;

    /// 获取当前值
    fn value(&self) -> f32;

    /// 设置新值
    ///
    /// 引擎每帧调用一次；过渡结束时会用目标值精确赋值。
    fn set_value(&self, value: f32);
}

/// 简单的共享属性实现
///
/// 用 `Rc<Cell<f32>>` 包装单个 f32 值，适用于大多数
/// UI 属性（alpha、位置分量等）。克隆出的句柄共享同一底层值。
#[derive(Debug, Clone)]
pub struct SharedProperty {
    id: String,
    value: Rc<Cell<f32>>,
}

impl SharedProperty {
    /// 创建新的共享属性
    ///
    /// # 参数
    /// - `id`: 属性 ID，需要在同时动画的属性中唯一
    /// - `initial_value`: 初始值
    pub fn new(id: impl Into<String>, initial_value: f32) -> Self {
        Self {
            id: id.into(),
            value: Rc::new(Cell::new(initial_value)),
        }
    }

    /// 获取底层值的共享引用（用于在持有者与引擎之间共享）
    pub fn value_ref(&self) -> Rc<Cell<f32>> {
        self.value.clone()
    }
}

impl AnimationProperty for SharedProperty {
    fn id(&self) -> &str {
        &self.id
    }

    fn value(&self) -> f32 {
        self.value.get()
    }

    fn set_value(&self, value: f32) {
        self.value.set(value);
    }
}
