//! # Timeline 模块
//!
//! 时间轴播放：把播放时间作为一个可动画属性，通过过渡引擎匀速
//! 推到资产末尾。同一播放器同时只播一段，旧的过渡被直接丢弃。
//!
//! 停止播放时时间轴跳到最后一帧——这通常正是演出动画想要的
//! 收尾方式；收尾发生在引擎的下一帧（过渡引擎的惰性停止语义）。

use std::rc::Rc;

use tracing::warn;

use crate::animation::{AnimationProperty, SharedProperty, TransitionEngine};
use crate::assets::{AssetProvider, TimelineAsset};

/// 时间轴播放器
///
/// # 使用示例
///
/// ```ignore
/// let mut player = TimelinePlayer::new("intro_timeline");
/// player.play(&mut engine, &asset, 0.0);
///
/// // 主循环
/// engine.tick(dt);
/// seek_renderer_to(player.time());
/// ```
#[derive(Debug, Clone)]
pub struct TimelinePlayer {
    /// 播放时间属性（由过渡引擎驱动）
    time: Rc<SharedProperty>,
}

impl TimelinePlayer {
    /// 创建播放器
    ///
    /// # 参数
    /// - `property_id`: 播放时间属性的 ID，需在引擎内唯一
    pub fn new(property_id: impl Into<String>) -> Self {
        Self {
            time: Rc::new(SharedProperty::new(property_id, 0.0)),
        }
    }

    /// 当前播放时间（秒）
    pub fn time(&self) -> f32 {
        self.time.value()
    }

    /// 是否正在播放
    pub fn is_playing(&self, engine: &TransitionEngine) -> bool {
        engine.is_animating(self.time.id())
    }

    /// 从指定时间开始播放资产
    ///
    /// 先丢弃上一段的过渡，把时间属性设到 `start_time`，再注册
    /// 到 `asset.duration` 的匀速过渡（时长即剩余播放时间）。
    pub fn play(&mut self, engine: &mut TransitionEngine, asset: &TimelineAsset, start_time: f32) {
        engine.stop(self.time.id());
        self.time.set_value(start_time);

        let target = asset.duration;
        let duration = target - start_time;
        engine.register_transition(self.time.clone(), target, duration);
    }

    /// 按资源路径播放
    ///
    /// 资产未找到时记录警告并不播放（提供者已记录错误日志）。
    ///
    /// # 返回
    /// 是否成功开始播放
    pub fn play_named(
        &mut self,
        engine: &mut TransitionEngine,
        assets: &dyn AssetProvider,
        path: &str,
        start_time: f32,
    ) -> bool {
        let Some(asset) = assets.timeline(path) else {
            warn!(path = %path, "时间轴资产缺失，跳过播放");
            return false;
        };
        self.play(engine, &asset, start_time);
        true
    }

    /// 停止播放
    ///
    /// 时间轴在引擎的下一帧跳到末尾并停住。
    pub fn stop(&mut self, engine: &mut TransitionEngine) {
        engine.stop(self.time.id());
    }
}
