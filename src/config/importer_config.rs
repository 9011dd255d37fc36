// ==========================================
// 运输任务数据 - 导入配置
// ==========================================
// 来源: 默认值 / JSON 配置文件 / 环境变量
// 格式错误的环境变量值记录警告后忽略，不中断启动
// ==========================================

use crate::config::import_config_trait::ImportConfigReader;
use crate::i18n::SUPPORTED_LOCALES;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::warn;

/// 环境变量名
pub mod env_keys {
    pub const LOCALE: &str = "TRANSPORT_PLANNER_LOCALE";
    pub const VALIDATE_PLAN: &str = "TRANSPORT_PLANNER_VALIDATE_PLAN";
}

/// 配置加载错误
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败 ({path}): {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("配置文件格式错误 ({path}): {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("不支持的语言: {0}")]
    UnsupportedLocale(String),
}

// ==========================================
// ImporterConfig - 导入配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImporterConfig {
    pub locale: String,      // 界面语言（zh-CN / en / ru）
    pub validate_plan: bool, // 是否在生成视图后执行规划校验
}

impl Default for ImporterConfig {
    fn default() -> Self {
        Self {
            locale: "zh-CN".to_string(),
            validate_plan: false,
        }
    }
}

impl ImporterConfig {
    /// 默认值 + 环境变量覆写
    pub fn from_env() -> Self {
        Self::default().apply_env()
    }

    /// 从 JSON 文件加载（缺失字段取默认值）
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config: Self = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// 用环境变量覆写当前配置
    pub fn apply_env(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// 用任意键值来源覆写（便于测试，不依赖进程环境）
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(locale) = lookup(env_keys::LOCALE) {
            let locale = locale.trim().to_string();
            if is_supported_locale(&locale) {
                self.locale = locale;
            } else {
                warn!(env = env_keys::LOCALE, value = %locale, "不支持的语言，保持原配置");
            }
        }

        if let Some(raw) = lookup(env_keys::VALIDATE_PLAN) {
            match parse_flag(&raw) {
                Some(flag) => self.validate_plan = flag,
                None => {
                    warn!(env = env_keys::VALIDATE_PLAN, value = %raw, "开关取值无法识别，保持原配置");
                }
            }
        }

        self
    }

    /// 校验配置取值
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_supported_locale(&self.locale) {
            return Err(ConfigError::UnsupportedLocale(self.locale.clone()));
        }
        Ok(())
    }
}

impl ImportConfigReader for ImporterConfig {
    fn locale(&self) -> &str {
        &self.locale
    }

    fn validate_plan(&self) -> bool {
        self.validate_plan
    }
}

fn is_supported_locale(locale: &str) -> bool {
    SUPPORTED_LOCALES.contains(&locale)
}

/// 开关取值: 1/true/yes/y/on 为真，0/false/no/n/off 为假
fn parse_flag(v: &str) -> Option<bool> {
    match v.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "y" | "on" => Some(true),
        "0" | "false" | "no" | "n" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ImporterConfig::default();
        assert_eq!(config.locale(), "zh-CN");
        assert!(!config.validate_plan());
    }

    #[test]
    fn test_env_overrides() {
        let config = ImporterConfig::default().with_overrides(lookup(&[
            (env_keys::LOCALE, "ru"),
            (env_keys::VALIDATE_PLAN, " Yes "),
        ]));
        assert_eq!(config.locale, "ru");
        assert!(config.validate_plan);
    }

    #[test]
    fn test_invalid_env_values_ignored() {
        let config = ImporterConfig::default().with_overrides(lookup(&[
            (env_keys::LOCALE, "fr"),
            (env_keys::VALIDATE_PLAN, "maybe"),
        ]));
        assert_eq!(config, ImporterConfig::default());
    }

    #[test]
    fn test_from_json_file_partial() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"validate_plan": true}}"#).unwrap();

        let config = ImporterConfig::from_json_file(file.path()).unwrap();
        assert!(config.validate_plan);
        assert_eq!(config.locale, "zh-CN");
    }

    #[test]
    fn test_from_json_file_rejects_unknown_locale() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"locale": "de"}}"#).unwrap();

        let err = ImporterConfig::from_json_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedLocale(ref l) if l == "de"));
    }

    #[test]
    fn test_from_json_file_missing() {
        let err = ImporterConfig::from_json_file("/nonexistent/planner.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
