//! # Assets 模块
//!
//! 资源提供者契约。
//!
//! 真正的资源加载（文件、压缩包、解码）在 crate 之外；核心只
//! 依赖这里的查找接口。查找是可失败的：未命中返回 `None` 并由
//! 提供者记录错误日志，从不 panic。消费侧必须防御性地处理
//! `None`。

use std::collections::HashMap;

use tracing::error;

/// 资源类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    /// 立绘 / 背景图
    Sprite,
    /// 音频片段
    AudioClip,
    /// 时间轴资产
    Timeline,
}

impl std::fmt::Display for AssetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            AssetKind::Sprite => "sprite",
            AssetKind::AudioClip => "audio_clip",
            AssetKind::Timeline => "timeline",
        };
        write!(f, "{}", name)
    }
}

/// 时间轴资产
///
/// 播放端只需要知道总时长；轨道内容由宿主解释。
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineAsset {
    /// 资产名
    pub name: String,
    /// 总时长（秒）
    pub duration: f32,
}

/// 已解析的资源句柄
#[derive(Debug, Clone, PartialEq)]
pub enum AssetHandle {
    /// 立绘 / 背景图（以解析后的路径标识）
    Sprite { path: String },
    /// 音频片段
    AudioClip { path: String },
    /// 时间轴资产
    Timeline(TimelineAsset),
}

/// 资源提供者接口
pub trait AssetProvider {
    /// 按类别与路径查找资源
    ///
    /// # 返回
    /// 未命中时返回 `None`（提供者负责记录错误日志）。
    fn load(&self, kind: AssetKind, path: &str) -> Option<AssetHandle>;

    /// 查找时间轴资产的便捷方法
    fn timeline(&self, path: &str) -> Option<TimelineAsset> {
        match self.load(AssetKind::Timeline, path)? {
            AssetHandle::Timeline(asset) => Some(asset),
            _ => None,
        }
    }
}

/// 内存资源表
///
/// 把预先登记的资源按 (类别, 路径) 建表，主要用于测试与无 IO
/// 的宿主。未命中记录错误日志并返回 `None`。
#[derive(Debug, Clone, Default)]
pub struct MemoryAssets {
    entries: HashMap<(AssetKind, String), AssetHandle>,
}

impl MemoryAssets {
    /// 创建空资源表
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// 登记一个资源
    pub fn insert(&mut self, kind: AssetKind, path: impl Into<String>, handle: AssetHandle) {
        self.entries.insert((kind, path.into()), handle);
    }

    /// 登记一个时间轴资产
    pub fn insert_timeline(&mut self, path: impl Into<String>, asset: TimelineAsset) {
        self.insert(AssetKind::Timeline, path, AssetHandle::Timeline(asset));
    }
}

impl AssetProvider for MemoryAssets {
    fn load(&self, kind: AssetKind, path: &str) -> Option<AssetHandle> {
        let handle = self.entries.get(&(kind, path.to_string()));
        if handle.is_none() {
            error!(kind = %kind, path = %path, "资源未找到");
        }
        handle.cloned()
    }
}
