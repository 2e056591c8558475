//! # Config 模块
//!
//! 对话框运行时配置，集中管理所有可调参数。
//!
//! 所有字段带默认值，可从 JSON 文件加载并只覆盖其中一部分。

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{ConfigError, ConfigResult};

/// 对话内容的更新方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DialogueUpdateMode {
    /// 覆盖：每句替换显示内容（可拆出说话者名）
    #[default]
    Overwrite,
    /// 追加：每句连同段落分隔追加到已有内容之后
    Append,
}

/// 对话框配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DialogueConfig {
    /// 对话框类型标识（供多对话框注册表选择）
    #[serde(default = "default_box_type")]
    pub box_type: String,

    /// 对话内容更新方式
    #[serde(default)]
    pub update_mode: DialogueUpdateMode,

    /// 提取说话者名的正则表达式
    ///
    /// 从对话文本开头匹配；未配置时不拆分说话者名。
    /// 例如 `"(.*?)：："` 搭配 `name_group = 1` 可把
    /// `"小明：：你好"` 拆成名字 `小明` 与内容 `你好`。
    #[serde(default)]
    pub name_pattern: Option<String>,

    /// 说话者名在匹配模式中的捕获组序号
    #[serde(default = "default_name_group")]
    pub name_group: usize,

    /// Auto 模式下每字符的等待时长（秒）
    ///
    /// 一句的自动推进延迟 = 该值 × 当前对话文本字符数。
    #[serde(default = "default_auto_wait_time_per_character")]
    pub auto_wait_time_per_character: f32,

    /// Skip 模式下每句的固定推进延迟（秒）
    #[serde(default = "default_skip_delay")]
    pub skip_delay: f32,

    /// 分支选择结束后是否恢复 Auto 模式
    #[serde(default)]
    pub continue_auto_after_branch: bool,

    /// 分支选择结束后是否恢复 Skip 模式
    #[serde(default)]
    pub continue_skip_after_branch: bool,

    /// 逐字显示的每字符间隔（秒）
    #[serde(default = "default_character_display_duration")]
    pub character_display_duration: f32,
}

fn default_box_type() -> String {
    "dialogue".to_string()
}

fn default_name_group() -> usize {
    1
}

fn default_auto_wait_time_per_character() -> f32 {
    0.1
}

fn default_skip_delay() -> f32 {
    0.05
}

fn default_character_display_duration() -> f32 {
    0.05
}

impl Default for DialogueConfig {
    fn default() -> Self {
        Self {
            box_type: default_box_type(),
            update_mode: DialogueUpdateMode::default(),
            name_pattern: None,
            name_group: default_name_group(),
            auto_wait_time_per_character: default_auto_wait_time_per_character(),
            skip_delay: default_skip_delay(),
            continue_auto_after_branch: false,
            continue_skip_after_branch: false,
            character_display_duration: default_character_display_duration(),
        }
    }
}

impl DialogueConfig {
    /// 从 JSON 文件加载配置
    ///
    /// 文件中缺失的字段使用默认值。
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = DialogueConfig::default();
        assert_eq!(config.box_type, "dialogue");
        assert_eq!(config.update_mode, DialogueUpdateMode::Overwrite);
        assert!(config.name_pattern.is_none());
        assert!(!config.continue_auto_after_branch);
    }

    #[test]
    fn test_load_partial_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "update_mode": "append", "skip_delay": 0.2 }}"#
        )
        .unwrap();

        let config = DialogueConfig::load(file.path()).unwrap();
        assert_eq!(config.update_mode, DialogueUpdateMode::Append);
        assert_eq!(config.skip_delay, 0.2);
        // 未配置的字段使用默认值
        assert_eq!(config.auto_wait_time_per_character, 0.1);
    }

    #[test]
    fn test_load_missing_file() {
        let result = DialogueConfig::load("no/such/config.json");
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_load_invalid_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let result = DialogueConfig::load(file.path());
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_config_round_trip() {
        let config = DialogueConfig {
            name_pattern: Some("(.*?)：：".to_string()),
            continue_auto_after_branch: true,
            ..Default::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: DialogueConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.name_pattern.as_deref(), Some("(.*?)：："));
        assert!(back.continue_auto_after_branch);
    }
}
