// ==========================================
// 运输任务数据 - 配置层
// ==========================================
// 职责: 导入配置加载，支持多级覆写
// 优先级: 命令行参数 > 环境变量 > JSON 配置文件 > 默认值
// ==========================================

pub mod import_config_trait;
pub mod importer_config;

pub use import_config_trait::ImportConfigReader;
pub use importer_config::{env_keys, ConfigError, ImporterConfig};
