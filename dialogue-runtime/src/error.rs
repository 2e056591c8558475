//! # Error 模块
//!
//! 定义 dialogue-runtime 中使用的错误类型。
//!
//! 只有可恢复的失败走 `Result`；状态机契约被破坏属于编程错误，
//! 相关代码直接断言失败，不在这里建模。

use thiserror::Error;

/// 配置错误
#[derive(Error, Debug)]
pub enum ConfigError {
    /// 配置文件读取失败
    #[error("无法读取配置文件 {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// 配置文件解析失败
    #[error("配置文件 {path} 解析失败: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// 说话者名正则表达式无效
    #[error("说话者名匹配模式 '{pattern}' 无效: {source}")]
    InvalidNamePattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Result 类型别名
pub type ConfigResult<T> = Result<T, ConfigError>;
