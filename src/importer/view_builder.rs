// ==========================================
// 运输任务数据 - 规划视图生成
// ==========================================
// 职责: TransportTaskData → PlanningView（纯函数，无副作用）
// 名称解析: 商品编码 → 商品名称，无法解析时回退为原始编码
// ==========================================

use crate::domain::planning_view::{
    CargoEntry, CargoTypeView, PlanningView, SiteView, TruckTypeView,
};
use crate::domain::transport_task::TransportTaskData;
use crate::domain::types::{Quantity, ResolvedName};

pub struct ViewBuilder;

impl ViewBuilder {
    /// 生成规划视图
    ///
    /// - 仓库货物清单 = 该仓库的库存记录（源顺序，不合并）
    /// - 目的地货物清单 = 单条 (需求商品, 需求量)
    pub fn build(&self, data: &TransportTaskData) -> PlanningView {
        let cargo_types = data
            .products()
            .iter()
            .map(|p| CargoTypeView {
                name: p.name.clone(),
                weight: p.weight,
                sku: p.sku.clone(),
                features: p.features.clone(),
            })
            .collect();

        let truck_types = data
            .transports()
            .iter()
            .map(|t| TruckTypeView {
                name: t.name.clone(),
                capacity: t.max_load,
                fuel: t.fuel_consumption,
            })
            .collect();

        let stock = data.inventory_by_warehouse();
        let warehouses = data
            .warehouses()
            .iter()
            .map(|w| SiteView {
                name: w.name.clone(),
                address: w.address.clone(),
                cargos: stock
                    .get(w.id.as_str())
                    .map(|items| {
                        items
                            .iter()
                            .map(|item| CargoEntry {
                                cargo_type: resolve_name(data, &item.product_sku),
                                quantity: Quantity::Units(item.quantity),
                            })
                            .collect()
                    })
                    .unwrap_or_default(),
            })
            .collect();

        let destinations = data
            .destinations()
            .iter()
            .map(|d| SiteView {
                name: d.name.clone(),
                address: d.address.clone(),
                cargos: vec![CargoEntry {
                    cargo_type: resolve_name(data, &d.product_sku),
                    quantity: Quantity::Amount(d.required_quantity),
                }],
            })
            .collect();

        PlanningView {
            cargo_types,
            truck_types,
            warehouses,
            destinations,
        }
    }
}

fn resolve_name(data: &TransportTaskData, sku: &str) -> ResolvedName {
    match data.product_by_sku(sku) {
        Some(product) => ResolvedName::Product(product.name.clone()),
        None => ResolvedName::RawCode(sku.to_string()),
    }
}
