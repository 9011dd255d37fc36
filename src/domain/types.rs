// ==========================================
// 运输任务数据 - 领域类型定义
// ==========================================
// 职责: 记录类型标识、数量、名称解析结果等值对象
// ==========================================

use serde::{Serialize, Serializer};
use std::fmt;

// ==========================================
// 记录类型 (Record Kind)
// ==========================================
// 每种记录对应工作簿中的一个固定工作表
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecordKind {
    Product,       // 商品
    Warehouse,     // 仓库
    InventoryItem, // 库存记录
    Destination,   // 目的地（收货点）
    Transport,     // 运输工具
}

impl RecordKind {
    /// 全部记录类型（按工作表检查顺序）
    pub const ALL: [RecordKind; 5] = [
        RecordKind::Product,
        RecordKind::Warehouse,
        RecordKind::InventoryItem,
        RecordKind::Destination,
        RecordKind::Transport,
    ];

    /// 对应的工作表名称（固定业务标签，不可配置）
    pub fn sheet_name(&self) -> &'static str {
        match self {
            RecordKind::Product => "Товары",
            RecordKind::Warehouse => "Склады",
            RecordKind::InventoryItem => "Товары на складах",
            RecordKind::Destination => "ПП",
            RecordKind::Transport => "ТС",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKind::Product => write!(f, "商品"),
            RecordKind::Warehouse => write!(f, "仓库"),
            RecordKind::InventoryItem => write!(f, "库存记录"),
            RecordKind::Destination => write!(f, "目的地"),
            RecordKind::Transport => write!(f, "运输工具"),
        }
    }
}

// ==========================================
// 货物数量 (Quantity)
// ==========================================
// 库存数量为整数件数；需求数量允许小数
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Quantity {
    Units(u64),
    Amount(f64),
}

impl Quantity {
    pub fn as_f64(&self) -> f64 {
        match self {
            Quantity::Units(n) => *n as f64,
            Quantity::Amount(v) => *v,
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quantity::Units(n) => write!(f, "{}", n),
            Quantity::Amount(v) => write!(f, "{}", v),
        }
    }
}

// ==========================================
// 商品名称解析结果 (Resolved Name)
// ==========================================
// 尽力解析: 找到商品 → 显示名称；找不到 → 回退为原始 SKU
// 两个分支都不是错误
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedName {
    Product(String),
    RawCode(String),
}

impl ResolvedName {
    /// 展示用文本（两个分支统一为字符串）
    pub fn as_str(&self) -> &str {
        match self {
            ResolvedName::Product(name) => name,
            ResolvedName::RawCode(code) => code,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, ResolvedName::Product(_))
    }
}

impl fmt::Display for ResolvedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// 输出视图中只保留展示文本
impl Serialize for ResolvedName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
