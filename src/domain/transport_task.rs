// ==========================================
// 运输任务数据 - 主数据实体
// ==========================================
// 职责: 商品/仓库/库存/目的地/运输工具 五类记录 + 只读查询
// 生命周期: 一次性从工作簿批量加载，加载后只读
// ==========================================

use serde::Serialize;
use std::collections::HashMap;

// ==========================================
// Product - 商品
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    pub sku: String,      // 商品编码（唯一键，统一为字符串）
    pub name: String,     // 显示名称
    pub weight: f64,      // 单位重量（kg，> 0）
    pub features: String, // 特性说明（缺省为空串）
    #[serde(skip)]
    pub row_number: usize, // 源工作表行号
}

// ==========================================
// Warehouse - 仓库
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Warehouse {
    pub id: String,
    pub name: String,
    pub address: String,            // 地址（后续由外部服务地理编码）
    pub metadata: serde_json::Value, // 附加信息（缺省为空对象）
    #[serde(skip)]
    pub row_number: usize,
}

// ==========================================
// InventoryItem - 库存记录
// ==========================================
// 以 (仓库, 商品) 为键，不去重不合并
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InventoryItem {
    pub warehouse_id: String,
    pub product_sku: String,
    pub quantity: u64,
    #[serde(skip)]
    pub row_number: usize,
}

// ==========================================
// Destination - 目的地（收货点）
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Destination {
    pub id: String,
    pub name: String,
    pub address: String,
    pub product_sku: String,
    pub required_quantity: f64, // 需求量（允许小数）
    #[serde(skip)]
    pub row_number: usize,
}

// ==========================================
// Transport - 运输工具
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transport {
    pub id: String,
    pub name: String,
    pub max_load: f64,
    pub fuel_consumption: f64, // 油耗（л/100км）
}

// ==========================================
// TransportTaskData - 一次导入的完整记录集
// ==========================================
// 集合私有，只通过切片与查询方法暴露
#[derive(Debug, Clone, PartialEq)]
pub struct TransportTaskData {
    products: Vec<Product>,
    warehouses: Vec<Warehouse>,
    inventory: Vec<InventoryItem>,
    destinations: Vec<Destination>,
    transports: Vec<Transport>,

    product_index: HashMap<String, usize>,
    warehouse_index: HashMap<String, usize>,
}

impl TransportTaskData {
    /// 由五类记录构造记录集（索引按首次出现建立）
    pub fn new(
        products: Vec<Product>,
        warehouses: Vec<Warehouse>,
        inventory: Vec<InventoryItem>,
        destinations: Vec<Destination>,
        transports: Vec<Transport>,
    ) -> Self {
        let mut product_index = HashMap::with_capacity(products.len());
        for (idx, p) in products.iter().enumerate() {
            product_index.entry(p.sku.clone()).or_insert(idx);
        }

        let mut warehouse_index = HashMap::with_capacity(warehouses.len());
        for (idx, w) in warehouses.iter().enumerate() {
            warehouse_index.entry(w.id.clone()).or_insert(idx);
        }

        Self {
            products,
            warehouses,
            inventory,
            destinations,
            transports,
            product_index,
            warehouse_index,
        }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn warehouses(&self) -> &[Warehouse] {
        &self.warehouses
    }

    pub fn inventory(&self) -> &[InventoryItem] {
        &self.inventory
    }

    pub fn destinations(&self) -> &[Destination] {
        &self.destinations
    }

    pub fn transports(&self) -> &[Transport] {
        &self.transports
    }

    /// 按 SKU 查找商品
    pub fn product_by_sku(&self, sku: &str) -> Option<&Product> {
        self.product_index.get(sku).map(|&idx| &self.products[idx])
    }

    /// 按 ID 查找仓库
    pub fn warehouse_by_id(&self, warehouse_id: &str) -> Option<&Warehouse> {
        self.warehouse_index
            .get(warehouse_id)
            .map(|&idx| &self.warehouses[idx])
    }

    /// 指定仓库的库存记录（保持源顺序）
    pub fn inventory_for_warehouse(&self, warehouse_id: &str) -> Vec<&InventoryItem> {
        self.inventory
            .iter()
            .filter(|item| item.warehouse_id == warehouse_id)
            .collect()
    }

    /// 需求指定商品的目的地（保持源顺序）
    pub fn destinations_for_product(&self, sku: &str) -> Vec<&Destination> {
        self.destinations
            .iter()
            .filter(|d| d.product_sku == sku)
            .collect()
    }

    /// 库存按仓库分组（派生视图，不单独持久化）
    pub fn inventory_by_warehouse(&self) -> HashMap<&str, Vec<&InventoryItem>> {
        let mut grouped: HashMap<&str, Vec<&InventoryItem>> = HashMap::new();
        for item in &self.inventory {
            grouped
                .entry(item.warehouse_id.as_str())
                .or_default()
                .push(item);
        }
        grouped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(sku: &str, name: &str) -> Product {
        Product {
            sku: sku.to_string(),
            name: name.to_string(),
            weight: 1.0,
            features: String::new(),
            row_number: 2,
        }
    }

    fn warehouse(id: &str) -> Warehouse {
        Warehouse {
            id: id.to_string(),
            name: format!("Склад {}", id),
            address: "Москва".to_string(),
            metadata: serde_json::json!({}),
            row_number: 2,
        }
    }

    fn stock(warehouse_id: &str, sku: &str, quantity: u64, row_number: usize) -> InventoryItem {
        InventoryItem {
            warehouse_id: warehouse_id.to_string(),
            product_sku: sku.to_string(),
            quantity,
            row_number,
        }
    }

    fn sample() -> TransportTaskData {
        TransportTaskData::new(
            vec![product("P1", "Box"), product("P2", "Crate")],
            vec![warehouse("W1"), warehouse("W2")],
            vec![
                stock("W1", "P1", 10, 2),
                stock("W2", "P2", 5, 3),
                stock("W1", "P1", 4, 4),
            ],
            vec![Destination {
                id: "D1".to_string(),
                name: "Dest".to_string(),
                address: "Y".to_string(),
                product_sku: "P2".to_string(),
                required_quantity: 1.5,
                row_number: 2,
            }],
            vec![],
        )
    }

    #[test]
    fn test_lookup_by_key() {
        let data = sample();
        assert_eq!(data.product_by_sku("P2").map(|p| p.name.as_str()), Some("Crate"));
        assert!(data.product_by_sku("P9").is_none());
        assert_eq!(data.warehouse_by_id("W1").map(|w| w.id.as_str()), Some("W1"));
        assert!(data.warehouse_by_id("w1").is_none());
    }

    #[test]
    fn test_inventory_for_warehouse_keeps_duplicates_in_order() {
        let data = sample();
        let items = data.inventory_for_warehouse("W1");
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].quantity, 10);
        assert_eq!(items[1].quantity, 4);
    }

    #[test]
    fn test_destinations_for_product() {
        let data = sample();
        assert_eq!(data.destinations_for_product("P2").len(), 1);
        assert!(data.destinations_for_product("P1").is_empty());
    }

    #[test]
    fn test_inventory_grouping() {
        let data = sample();
        let grouped = data.inventory_by_warehouse();
        assert_eq!(grouped.get("W1").map(Vec::len), Some(2));
        assert_eq!(grouped.get("W2").map(Vec::len), Some(1));
    }
}
