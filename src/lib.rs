// ==========================================
// 运输规划系统 - 核心库
// ==========================================
// 职责: 从工作簿导入运输任务数据，生成规划视图
// 数据源: 五个固定名称的工作表（商品/仓库/库存/目的地/运输工具）
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "zh-CN");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与视图
pub mod domain;

// 导入层 - 工作簿解析与校验
pub mod importer;

// 规划校验层
pub mod plan;

// 配置层
pub mod config;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{Quantity, RecordKind, ResolvedName};

// 领域实体
pub use domain::{
    Destination, ImportOutcome, ImportSummary, InventoryItem, PlanningView, Product, Transport,
    TransportTaskData, Warehouse,
};

// 导入
pub use importer::{
    ImportError, ImportObserver, ImportResult, ImportSession, ImportStatus, TransportImporter,
    TransportImporterImpl,
};

// 配置
pub use config::{ImportConfigReader, ImporterConfig};

// 规划校验
pub use plan::{PlanValidationError, PlanValidator};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "运输规划系统";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
