// ==========================================
// 运输任务数据 - 引用完整性校验器
// ==========================================
// 职责: 主键唯一性 + 外键引用（仓库 ID / 商品 SKU）
// 规则: 遇到第一条违规即中止整个导入，不做部分成功
// ==========================================

use crate::domain::transport_task::{Destination, InventoryItem, Product, Warehouse};
use crate::domain::types::RecordKind;
use crate::importer::error::{ImportError, ImportResult};
use std::collections::{HashMap, HashSet};

pub struct IntegrityValidator;

impl IntegrityValidator {
    /// 校验主键唯一: 商品 SKU、仓库 ID
    pub fn validate_unique_keys(
        &self,
        products: &[Product],
        warehouses: &[Warehouse],
    ) -> ImportResult<()> {
        check_unique(
            RecordKind::Product,
            products.iter().map(|p| (p.sku.as_str(), p.row_number)),
        )?;
        check_unique(
            RecordKind::Warehouse,
            warehouses.iter().map(|w| (w.id.as_str(), w.row_number)),
        )?;
        Ok(())
    }

    /// 校验引用完整性
    ///
    /// # 顺序
    /// 1. 库存记录: 先仓库，再商品
    /// 2. 目的地: 商品
    pub fn validate_references(
        &self,
        products: &[Product],
        warehouses: &[Warehouse],
        inventory: &[InventoryItem],
        destinations: &[Destination],
    ) -> ImportResult<()> {
        let known_products: HashMap<&str, &Product> =
            products.iter().map(|p| (p.sku.as_str(), p)).collect();
        let known_warehouses: HashMap<&str, &Warehouse> =
            warehouses.iter().map(|w| (w.id.as_str(), w)).collect();

        for item in inventory {
            if !known_warehouses.contains_key(item.warehouse_id.as_str()) {
                return Err(ImportError::UnknownWarehouse {
                    warehouse_id: item.warehouse_id.clone(),
                    referenced_by: RecordKind::InventoryItem,
                    row: item.row_number,
                });
            }
            if !known_products.contains_key(item.product_sku.as_str()) {
                return Err(ImportError::UnknownProduct {
                    sku: item.product_sku.clone(),
                    referenced_by: RecordKind::InventoryItem,
                    row: item.row_number,
                });
            }
        }

        for dest in destinations {
            if !known_products.contains_key(dest.product_sku.as_str()) {
                return Err(ImportError::UnknownProduct {
                    sku: dest.product_sku.clone(),
                    referenced_by: RecordKind::Destination,
                    row: dest.row_number,
                });
            }
        }

        Ok(())
    }
}

fn check_unique<'a>(
    kind: RecordKind,
    keys: impl Iterator<Item = (&'a str, usize)>,
) -> ImportResult<()> {
    let mut seen: HashSet<&str> = HashSet::new();
    for (key, row) in keys {
        if !seen.insert(key) {
            return Err(ImportError::DuplicateKey {
                sheet: kind.sheet_name().to_string(),
                row,
                key: key.to_string(),
            });
        }
    }
    Ok(())
}
