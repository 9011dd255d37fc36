// ==========================================
// 运输任务数据 - 导入结果
// ==========================================
// 用途: 导入操作的显式返回值（替代全局共享实例）
// ==========================================

use crate::domain::planning_view::PlanningView;
use crate::domain::transport_task::TransportTaskData;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// 各类记录数量汇总
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ImportSummary {
    pub products: usize,
    pub warehouses: usize,
    pub inventory_items: usize,
    pub destinations: usize,
    pub transports: usize,
}

impl ImportSummary {
    pub fn of(data: &TransportTaskData) -> Self {
        Self {
            products: data.products().len(),
            warehouses: data.warehouses().len(),
            inventory_items: data.inventory().len(),
            destinations: data.destinations().len(),
            transports: data.transports().len(),
        }
    }
}

// ==========================================
// ImportOutcome - 一次成功导入的完整结果
// ==========================================
#[derive(Debug, Clone)]
pub struct ImportOutcome {
    pub import_id: String,          // 导入批次 ID（UUID v4）
    pub imported_at: DateTime<Utc>, // 完成时间
    pub data: TransportTaskData,    // 已校验的记录集
    pub view: PlanningView,         // 规划视图
    pub summary: ImportSummary,
    pub elapsed_ms: u64,
}
