// ==========================================
// 运输任务数据 - 领域模型层
// ==========================================
// 职责: 定义领域实体、值对象、输出视图
// 红线: 不含解析逻辑,不含校验逻辑
// ==========================================

pub mod import_outcome;
pub mod planning_view;
pub mod transport_task;
pub mod types;

// 重导出核心类型
pub use import_outcome::{ImportOutcome, ImportSummary};
pub use planning_view::{CargoEntry, CargoTypeView, PlanningView, SiteView, TruckTypeView};
pub use transport_task::{
    Destination, InventoryItem, Product, Transport, TransportTaskData, Warehouse,
};
pub use types::{Quantity, RecordKind, ResolvedName};
