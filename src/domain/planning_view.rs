// ==========================================
// 运输任务数据 - 规划视图（反规范化输出）
// ==========================================
// 用途: 供界面刷新与外部提交使用
// 结构: cargoTypes / truckTypes / warehouses / destinations
// ==========================================

use crate::domain::types::{Quantity, ResolvedName};
use serde::Serialize;

/// 货物类型（来自商品）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CargoTypeView {
    pub name: String,
    pub weight: f64,
    pub sku: String,
    pub features: String,
}

/// 车型（来自运输工具）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TruckTypeView {
    pub name: String,
    pub capacity: f64,
    pub fuel: f64,
}

/// 货物条目: (商品名称或原始编码, 数量)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CargoEntry {
    #[serde(rename = "type")]
    pub cargo_type: ResolvedName,
    pub quantity: Quantity,
}

/// 站点（仓库或目的地）及其货物清单
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteView {
    pub name: String,
    pub address: String,
    pub cargos: Vec<CargoEntry>,
}

// ==========================================
// PlanningView - 规划视图
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanningView {
    pub cargo_types: Vec<CargoTypeView>,
    pub truck_types: Vec<TruckTypeView>,
    pub warehouses: Vec<SiteView>,
    pub destinations: Vec<SiteView>,
}

impl PlanningView {
    /// 所有货物条目是否都解析到了商品名称
    pub fn all_cargo_resolved(&self) -> bool {
        self.warehouses
            .iter()
            .chain(self.destinations.iter())
            .flat_map(|site| site.cargos.iter())
            .all(|entry| entry.cargo_type.is_resolved())
    }
}
