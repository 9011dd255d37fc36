// ==========================================
// 运输任务数据 - 工作表结构定义
// ==========================================
// 职责: 每个工作表的显式列结构（列名/别名/类型/必填/缺省）
// 规则: 按表头文本精确匹配（去除首尾空白），不按列序号
// ==========================================

use crate::domain::types::RecordKind;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::workbook::Sheet;
use std::collections::HashMap;

/// 列值类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// 编码/引用（SKU、ID），统一转为字符串
    Code,
    /// 自由文本
    Text,
    /// 实数；`positive` 为 true 时要求 > 0，否则要求 >= 0
    Real { positive: bool },
    /// 非负整数（库存件数）
    Count,
    /// JSON 对象（附加信息）
    Json,
}

/// 列定义
#[derive(Debug, Clone, Copy)]
pub struct ColumnSpec {
    pub field: &'static str,
    pub label: &'static str,
    pub aliases: &'static [&'static str],
    pub kind: ValueKind,
    pub required: bool,
}

impl ColumnSpec {
    /// 在表头中定位本列: 先找主列名，找不到再找别名，各自取最左侧
    pub fn locate(&self, headers: &[String]) -> Option<usize> {
        headers
            .iter()
            .position(|h| h == self.label)
            .or_else(|| headers.iter().position(|h| self.aliases.contains(&h.as_str())))
    }
}

/// 工作表结构
#[derive(Debug, Clone, Copy)]
pub struct SheetSchema {
    pub record: RecordKind,
    pub columns: &'static [ColumnSpec],
}

const fn col(
    field: &'static str,
    label: &'static str,
    aliases: &'static [&'static str],
    kind: ValueKind,
    required: bool,
) -> ColumnSpec {
    ColumnSpec {
        field,
        label,
        aliases,
        kind,
        required,
    }
}

// ==========================================
// 五个固定工作表的结构
// ==========================================

static PRODUCT_SCHEMA: SheetSchema = SheetSchema {
    record: RecordKind::Product,
    columns: &[
        col("sku", "SKU", &[], ValueKind::Code, true),
        col("name", "Название", &[], ValueKind::Text, true),
        col("weight", "Вес (кг)", &["Вес"], ValueKind::Real { positive: true }, true),
        col("features", "Особенности", &[], ValueKind::Text, false),
    ],
};

static WAREHOUSE_SCHEMA: SheetSchema = SheetSchema {
    record: RecordKind::Warehouse,
    columns: &[
        col("id", "ID", &[], ValueKind::Code, true),
        col("name", "Название", &[], ValueKind::Text, true),
        col("address", "Адрес", &[], ValueKind::Text, true),
        col("metadata", "Доп. информация", &[], ValueKind::Json, false),
    ],
};

static INVENTORY_SCHEMA: SheetSchema = SheetSchema {
    record: RecordKind::InventoryItem,
    columns: &[
        col("warehouse_id", "Склад ID", &[], ValueKind::Code, true),
        col("product_sku", "SKU товара", &["SKU"], ValueKind::Code, true),
        col("quantity", "Количество", &[], ValueKind::Count, true),
    ],
};

static DESTINATION_SCHEMA: SheetSchema = SheetSchema {
    record: RecordKind::Destination,
    columns: &[
        col("id", "ID", &[], ValueKind::Code, true),
        col("name", "Название", &[], ValueKind::Text, true),
        col("address", "Адрес", &[], ValueKind::Text, true),
        col("product_sku", "SKU товара", &["SKU"], ValueKind::Code, true),
        col(
            "required_quantity",
            "Требуемое кол-во",
            &["Кол-во"],
            ValueKind::Real { positive: false },
            true,
        ),
    ],
};

static TRANSPORT_SCHEMA: SheetSchema = SheetSchema {
    record: RecordKind::Transport,
    columns: &[
        col("id", "ID", &[], ValueKind::Code, true),
        col("name", "Название", &[], ValueKind::Text, true),
        col(
            "max_load",
            "Грузоподъемность (кг)",
            &["Грузоподъемность (т)", "Грузоподъемность"],
            ValueKind::Real { positive: false },
            true,
        ),
        col(
            "fuel_consumption",
            "Расход топлива (л/100км)",
            &["Расход"],
            ValueKind::Real { positive: false },
            true,
        ),
    ],
};

/// 按记录类型取结构定义
pub fn schema_for(kind: RecordKind) -> &'static SheetSchema {
    match kind {
        RecordKind::Product => &PRODUCT_SCHEMA,
        RecordKind::Warehouse => &WAREHOUSE_SCHEMA,
        RecordKind::InventoryItem => &INVENTORY_SCHEMA,
        RecordKind::Destination => &DESTINATION_SCHEMA,
        RecordKind::Transport => &TRANSPORT_SCHEMA,
    }
}

// ==========================================
// ColumnLayout - 结构与实际表头的对应关系
// ==========================================
#[derive(Debug, Clone)]
pub struct ColumnLayout {
    pub schema: &'static SheetSchema,
    positions: HashMap<&'static str, usize>,
}

impl ColumnLayout {
    pub fn position(&self, field: &str) -> Option<usize> {
        self.positions.get(field).copied()
    }

    pub fn column(&self, field: &str) -> Option<&'static ColumnSpec> {
        self.schema.columns.iter().find(|c| c.field == field)
    }
}

impl SheetSchema {
    pub fn sheet_name(&self) -> &'static str {
        self.record.sheet_name()
    }

    /// 将结构对齐到工作表表头
    ///
    /// # 规则
    /// - 完全空白的工作表: 不检查表头（无数据行）
    /// - 必填列缺失: MissingColumn
    /// - 主列名优先于别名；同一列出现多次时取最左侧一列
    pub fn resolve(&'static self, sheet: &Sheet) -> ImportResult<ColumnLayout> {
        let mut positions = HashMap::new();

        if sheet.is_empty() {
            return Ok(ColumnLayout {
                schema: self,
                positions,
            });
        }

        let headers = sheet.headers();
        for column in self.columns {
            match column.locate(&headers) {
                Some(idx) => {
                    positions.insert(column.field, idx);
                }
                None if column.required => {
                    return Err(ImportError::MissingColumn {
                        sheet: self.sheet_name().to_string(),
                        column: column.label.to_string(),
                    });
                }
                None => {}
            }
        }

        Ok(ColumnLayout {
            schema: self,
            positions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::importer::workbook::CellValue;

    fn header_sheet(name: &str, headers: &[&str]) -> Sheet {
        Sheet::new(
            name,
            vec![headers.iter().map(|h| CellValue::from(*h)).collect()],
        )
    }

    #[test]
    fn test_resolve_by_label_not_index() {
        let sheet = header_sheet("Товары", &["Название", "Особенности", "SKU", "Вес (кг)"]);
        let layout = PRODUCT_SCHEMA.resolve(&sheet).unwrap();
        assert_eq!(layout.position("sku"), Some(2));
        assert_eq!(layout.position("weight"), Some(3));
        assert_eq!(layout.position("features"), Some(1));
    }

    #[test]
    fn test_resolve_accepts_alias() {
        let sheet = header_sheet("ТС", &["ID", "Название", "Грузоподъемность", "Расход"]);
        let layout = TRANSPORT_SCHEMA.resolve(&sheet).unwrap();
        assert_eq!(layout.position("max_load"), Some(2));
        assert_eq!(layout.position("fuel_consumption"), Some(3));
    }

    #[test]
    fn test_label_preferred_over_alias() {
        let sheet = header_sheet("ПП", &["ID", "Название", "Адрес", "SKU", "SKU товара", "Кол-во"]);
        let layout = DESTINATION_SCHEMA.resolve(&sheet).unwrap();
        assert_eq!(layout.position("product_sku"), Some(4));
        assert_eq!(layout.position("required_quantity"), Some(5));
    }

    #[test]
    fn test_resolve_missing_required_column() {
        let sheet = header_sheet("Склады", &["ID", "Название"]);
        let err = WAREHOUSE_SCHEMA.resolve(&sheet).unwrap_err();
        match err {
            ImportError::MissingColumn { sheet, column } => {
                assert_eq!(sheet, "Склады");
                assert_eq!(column, "Адрес");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_optional_column_may_be_absent() {
        let sheet = header_sheet("Товары", &["SKU", "Название", "Вес"]);
        let layout = PRODUCT_SCHEMA.resolve(&sheet).unwrap();
        assert_eq!(layout.position("features"), None);
    }

    #[test]
    fn test_empty_sheet_has_no_layout_requirements() {
        let sheet = Sheet::new("ТС", vec![]);
        assert!(TRANSPORT_SCHEMA.resolve(&sheet).is_ok());
    }

    #[test]
    fn test_schema_for_matches_record_kind() {
        for kind in RecordKind::ALL {
            assert_eq!(schema_for(kind).record, kind);
        }
    }
}
