//! # Engine 模块
//!
//! 目标驱动的属性过渡引擎。
//!
//! ## 核心语义
//!
//! 过渡是**目标导向**的：如果在上一个过渡结束前注册了新的过渡，
//! 属性的目标会立即切换到新值，起点取属性的**当前值**（可能在
//! 半途），并总是用指定的 duration 到达新目标。不排队，最新的
//! 注册总是获胜。
//!
//! 每个属性 ID 至多存在一个过渡条目；条目在完成时被移除，
//! 完成帧会用目标值**精确**赋值（位级相等），避免插值的浮点
//! 误差残留。

use std::collections::HashMap;
use std::rc::Rc;

use tracing::trace;

use super::property::AnimationProperty;

/// 线性插值
#[inline]
fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}

/// 单个过渡条目
///
/// 由引擎的注册表独占持有，存在于注册到完成（或显式停止）之间。
struct TransitionEntry {
    /// 被动画的属性（仅在本条目存活期间引用）
    property: Rc<dyn AnimationProperty>,
    /// 起始值
    start_value: f32,
    /// 目标值
    target_value: f32,
    /// 过渡时长（秒）
    duration: f32,
    /// 已经过的时间
    elapsed: f32,
}

impl TransitionEntry {
    fn new(property: Rc<dyn AnimationProperty>, from: f32, to: f32, duration: f32) -> Self {
        Self {
            property,
            start_value: from,
            target_value: to,
            duration,
            elapsed: 0.0,
        }
    }

    /// 在原条目上重定向过渡
    ///
    /// 起点取调用时刻的属性值，elapsed 归零。
    fn set_transition(&mut self, from: f32, to: f32, duration: f32) {
        self.start_value = from;
        self.target_value = to;
        self.duration = duration;
        self.elapsed = 0.0;
    }

    /// 标记条目在下一帧收尾
    ///
    /// 不同步赋值：把 elapsed 推过 duration，条目的下一次 tick
    /// 会把属性精确设置为目标值并移除条目。
    fn stop(&mut self) {
        self.elapsed = self.duration + 1.0;
    }

    /// 推进一帧
    ///
    /// # 返回
    /// - `true`: 过渡仍在进行
    /// - `false`: 本帧已收尾（属性已精确到达目标值），条目应被移除
    ///
    /// 先检查完成条件再插值，因此 `duration <= 0` 在第一帧即收尾，
    /// 不会发生除零。
    fn tick(&mut self, dt: f32) -> bool {
        if self.elapsed >= self.duration {
            self.property.set_value(self.target_value);
            return false;
        }

        let t = (self.elapsed / self.duration).clamp(0.0, 1.0);
        self.property
            .set_value(lerp(self.start_value, self.target_value, t));
        self.elapsed += dt;
        true
    }
}

/// 属性过渡引擎
///
/// 持有按属性 ID 索引的在途过渡注册表，由宿主每帧调用一次
/// [`tick`](TransitionEngine::tick) 统一推进。
///
/// # 使用示例
///
/// ```ignore
/// let mut engine = TransitionEngine::new();
/// let alpha = Rc::new(SharedProperty::new("dialogue_box.alpha", 0.0));
///
/// engine.register_transition(alpha.clone(), 1.0, 0.3);
///
/// // 主循环
/// engine.tick(dt);
/// ```
#[derive(Default)]
pub struct TransitionEngine {
    /// 在途过渡（属性 ID -> 条目）
    entries: HashMap<String, TransitionEntry>,
}

impl std::fmt::Debug for TransitionEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransitionEngine")
            .field("entries", &self.entries.len())
            .finish()
    }
}

impl TransitionEngine {
    /// 创建新的过渡引擎
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// 注册过渡
    ///
    /// 若该属性已有在途过渡，则在原条目上重定向：起点取属性的
    /// 当前值（可能在半途），目标与时长换成新值，elapsed 归零。
    /// 属性值从当前位置平滑地继续，不会跳回最初的起点。
    ///
    /// # 参数
    /// - `property`: 要动画的属性
    /// - `target`: 目标值
    /// - `duration`: 到达目标所需的时长（秒）；`<= 0` 表示下一帧直接到达
    pub fn register_transition(
        &mut self,
        property: Rc<dyn AnimationProperty>,
        target: f32,
        duration: f32,
    ) {
        let from = property.value();
        let id = property.id().to_string();
        match self.entries.get_mut(&id) {
            Some(entry) => {
                entry.set_transition(from, target, duration);
            }
            None => {
                self.entries
                    .insert(id, TransitionEntry::new(property, from, target, duration));
            }
        }
    }

    /// 按属性 ID 停止过渡
    ///
    /// 条目被标记为立即收尾：属性值在条目的**下一次** tick 被精确
    /// 设置为目标值，随后条目被移除。对未注册的 ID 调用是无操作。
    pub fn stop(&mut self, property_id: &str) {
        if let Some(entry) = self.entries.get_mut(property_id) {
            entry.stop();
        }
    }

    /// 停止指定属性的过渡
    pub fn stop_property(&mut self, property: &dyn AnimationProperty) {
        self.stop(property.id());
    }

    /// 停止所有在途过渡
    pub fn stop_all(&mut self) {
        for entry in self.entries.values_mut() {
            entry.stop();
        }
    }

    /// 推进所有在途过渡一帧
    ///
    /// 本帧收尾的条目会在赋值后被移除。
    pub fn tick(&mut self, dt: f32) {
        let mut finished: Vec<String> = Vec::new();

        for (id, entry) in &mut self.entries {
            if !entry.tick(dt) {
                finished.push(id.clone());
            }
        }

        for id in finished {
            self.entries.remove(&id);
            trace!(property = %id, "过渡结束");
        }
    }

    /// 指定属性是否有在途过渡
    pub fn is_animating(&self, property_id: &str) -> bool {
        self.entries.contains_key(property_id)
    }

    /// 在途过渡数量
    pub fn active_count(&self) -> usize {
        self.entries.len()
    }

    /// 是否存在任何在途过渡
    pub fn has_active_transitions(&self) -> bool {
        !self.entries.is_empty()
    }

    /// 丢弃所有条目（不赋终值）
    ///
    /// 用于属性持有者销毁时的同步清理，保证不会有条目在下一帧
    /// 写入已失效的属性。
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::SharedProperty;

    fn prop(id: &str, value: f32) -> Rc<SharedProperty> {
        Rc::new(SharedProperty::new(id, value))
    }

    #[test]
    fn test_transition_reaches_target_exactly() {
        let mut engine = TransitionEngine::new();
        let alpha = prop("alpha", 0.0);
        engine.register_transition(alpha.clone(), 1.0, 0.3);

        // 模拟足够多的帧
        for _ in 0..10 {
            engine.tick(0.1);
        }

        // 位级相等，而非近似
        assert_eq!(alpha.value(), 1.0);
        assert!(!engine.is_animating("alpha"));
    }

    #[test]
    fn test_transition_interpolates() {
        let mut engine = TransitionEngine::new();
        let x = prop("x", 0.0);
        engine.register_transition(x.clone(), 100.0, 1.0);

        // 第一帧：elapsed = 0 -> 写入起点
        engine.tick(0.25);
        assert_eq!(x.value(), 0.0);

        // 第二帧：elapsed = 0.25
        engine.tick(0.25);
        assert_eq!(x.value(), 25.0);

        engine.tick(0.25);
        assert_eq!(x.value(), 50.0);
    }

    #[test]
    fn test_retarget_continues_from_current_value() {
        let mut engine = TransitionEngine::new();
        let x = prop("x", 0.0);
        engine.register_transition(x.clone(), 100.0, 1.0);

        engine.tick(0.5);
        engine.tick(0.5);
        let mid = x.value();
        assert!(mid > 0.0 && mid < 100.0);

        // 半途重定向：起点取当前值，不会跳回 0
        engine.register_transition(x.clone(), 0.0, 1.0);
        engine.tick(0.1);
        assert_eq!(x.value(), mid);
        // 至多一个条目
        assert_eq!(engine.active_count(), 1);

        for _ in 0..15 {
            engine.tick(0.1);
        }
        assert_eq!(x.value(), 0.0);
    }

    #[test]
    fn test_zero_duration_snaps_next_tick() {
        let mut engine = TransitionEngine::new();
        let x = prop("x", 3.0);
        engine.register_transition(x.clone(), 7.0, 0.0);

        assert_eq!(x.value(), 3.0);
        engine.tick(0.016);
        assert_eq!(x.value(), 7.0);
        assert_eq!(engine.active_count(), 0);
    }

    #[test]
    fn test_negative_duration_snaps_next_tick() {
        let mut engine = TransitionEngine::new();
        let x = prop("x", 0.0);
        engine.register_transition(x.clone(), 1.0, -0.5);

        engine.tick(0.016);
        assert_eq!(x.value(), 1.0);
    }

    #[test]
    fn test_stop_finalizes_on_next_tick() {
        let mut engine = TransitionEngine::new();
        let x = prop("x", 0.0);
        engine.register_transition(x.clone(), 10.0, 1.0);

        engine.tick(0.1);
        engine.tick(0.1);
        let before = x.value();
        assert!(before < 10.0);

        engine.stop("x");
        // 停止本身不同步赋值
        assert_eq!(x.value(), before);
        assert!(engine.is_animating("x"));

        // 下一帧收尾
        engine.tick(0.1);
        assert_eq!(x.value(), 10.0);
        assert!(!engine.is_animating("x"));
    }

    #[test]
    fn test_stop_unknown_id_is_noop() {
        let mut engine = TransitionEngine::new();
        let x = prop("x", 0.0);
        engine.register_transition(x.clone(), 1.0, 1.0);

        engine.stop("unknown");
        assert_eq!(engine.active_count(), 1);

        engine.tick(0.1);
        engine.tick(0.1);
        // 正常过渡不受影响
        assert!(x.value() > 0.0 && x.value() < 1.0);
    }

    #[test]
    fn test_stop_all() {
        let mut engine = TransitionEngine::new();
        let a = prop("a", 0.0);
        let b = prop("b", 0.0);
        engine.register_transition(a.clone(), 1.0, 5.0);
        engine.register_transition(b.clone(), 2.0, 5.0);

        engine.stop_all();
        engine.tick(0.016);

        assert_eq!(a.value(), 1.0);
        assert_eq!(b.value(), 2.0);
        assert_eq!(engine.active_count(), 0);
    }

    #[test]
    fn test_stop_property_by_reference() {
        let mut engine = TransitionEngine::new();
        let x = prop("x", 0.0);
        engine.register_transition(x.clone(), 1.0, 5.0);

        engine.stop_property(x.as_ref());
        engine.tick(0.016);
        assert_eq!(x.value(), 1.0);
    }

    #[test]
    fn test_clear_discards_without_finalizing() {
        let mut engine = TransitionEngine::new();
        let x = prop("x", 0.0);
        engine.register_transition(x.clone(), 1.0, 5.0);

        engine.clear();
        engine.tick(0.016);
        // 不赋终值
        assert_eq!(x.value(), 0.0);
        assert!(!engine.has_active_transitions());
    }
}
