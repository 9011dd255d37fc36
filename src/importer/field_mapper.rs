// ==========================================
// 运输任务数据 - 字段映射器实现
// ==========================================
// 职责: 工作表行 → 领域记录 + 类型转换
// 依据: sheet_schema 中的列结构定义
// ==========================================

use crate::domain::transport_task::{Destination, InventoryItem, Product, Transport, Warehouse};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::importer_trait::FieldMapper as FieldMapperTrait;
use crate::domain::types::RecordKind;
use crate::importer::sheet_schema::{schema_for, ColumnLayout, ColumnSpec, SheetSchema, ValueKind};
use crate::importer::workbook::{CellValue, Sheet};
use tracing::debug;

pub struct FieldMapper;

impl FieldMapperTrait for FieldMapper {
    fn map_products(&self, sheet: &Sheet) -> ImportResult<Vec<Product>> {
        map_rows(schema_for(RecordKind::Product), sheet, |row| {
            Ok(Product {
                sku: row.code("sku")?,
                name: row.text("name")?,
                weight: row.real("weight")?,
                features: row.text("features")?,
                row_number: row.row_number,
            })
        })
    }

    fn map_warehouses(&self, sheet: &Sheet) -> ImportResult<Vec<Warehouse>> {
        map_rows(schema_for(RecordKind::Warehouse), sheet, |row| {
            Ok(Warehouse {
                id: row.code("id")?,
                name: row.text("name")?,
                address: row.text("address")?,
                metadata: row.json("metadata")?,
                row_number: row.row_number,
            })
        })
    }

    fn map_inventory(&self, sheet: &Sheet) -> ImportResult<Vec<InventoryItem>> {
        map_rows(schema_for(RecordKind::InventoryItem), sheet, |row| {
            Ok(InventoryItem {
                warehouse_id: row.code("warehouse_id")?,
                product_sku: row.code("product_sku")?,
                quantity: row.count("quantity")?,
                row_number: row.row_number,
            })
        })
    }

    fn map_destinations(&self, sheet: &Sheet) -> ImportResult<Vec<Destination>> {
        map_rows(schema_for(RecordKind::Destination), sheet, |row| {
            Ok(Destination {
                id: row.code("id")?,
                name: row.text("name")?,
                address: row.text("address")?,
                product_sku: row.code("product_sku")?,
                required_quantity: row.real("required_quantity")?,
                row_number: row.row_number,
            })
        })
    }

    fn map_transports(&self, sheet: &Sheet) -> ImportResult<Vec<Transport>> {
        map_rows(schema_for(RecordKind::Transport), sheet, |row| {
            Ok(Transport {
                id: row.code("id")?,
                name: row.text("name")?,
                max_load: row.real("max_load")?,
                fuel_consumption: row.real("fuel_consumption")?,
            })
        })
    }
}

/// 对齐表头后逐行映射，遇到第一条错误即中止
fn map_rows<T, F>(schema: &'static SheetSchema, sheet: &Sheet, mut map: F) -> ImportResult<Vec<T>>
where
    F: FnMut(&RowReader<'_>) -> ImportResult<T>,
{
    let layout = schema.resolve(sheet)?;
    let mut records = Vec::new();

    for (row_number, cells) in sheet.data_rows() {
        let reader = RowReader {
            layout: &layout,
            cells,
            row_number,
        };
        records.push(map(&reader)?);
    }

    debug!(sheet = schema.sheet_name(), count = records.len(), "工作表映射完成");
    Ok(records)
}

// ==========================================
// RowReader - 单行读取器
// ==========================================
struct RowReader<'a> {
    layout: &'a ColumnLayout,
    cells: &'a [CellValue],
    row_number: usize,
}

impl<'a> RowReader<'a> {
    /// 取列定义与单元格（列缺失或越界时单元格为 None）
    fn cell(&self, field: &str) -> ImportResult<(&'static ColumnSpec, Option<&'a CellValue>)> {
        let spec = self.layout.column(field).ok_or_else(|| {
            ImportError::Other(anyhow::anyhow!(
                "字段 {} 未在工作表 {} 的结构中定义",
                field,
                self.layout.schema.sheet_name()
            ))
        })?;
        let cell = self
            .layout
            .position(field)
            .and_then(|idx| self.cells.get(idx))
            .filter(|c| !c.is_blank());
        Ok((spec, cell))
    }

    fn sheet_name(&self) -> String {
        self.layout.schema.sheet_name().to_string()
    }

    fn missing(&self, spec: &ColumnSpec) -> ImportError {
        ImportError::MissingValue {
            sheet: self.sheet_name(),
            row: self.row_number,
            column: spec.label.to_string(),
        }
    }

    fn conversion(&self, spec: &ColumnSpec, message: String) -> ImportError {
        ImportError::TypeConversion {
            sheet: self.sheet_name(),
            row: self.row_number,
            column: spec.label.to_string(),
            message,
        }
    }

    fn out_of_range(&self, spec: &ColumnSpec, value: f64) -> ImportError {
        ImportError::ValueOutOfRange {
            sheet: self.sheet_name(),
            row: self.row_number,
            column: spec.label.to_string(),
            value,
        }
    }

    /// 编码字段（数字单元格强制转为字符串）
    fn code(&self, field: &str) -> ImportResult<String> {
        self.text(field)
    }

    /// 文本字段（可选列缺省为空串）
    fn text(&self, field: &str) -> ImportResult<String> {
        let (spec, cell) = self.cell(field)?;
        match cell {
            None if spec.required => Err(self.missing(spec)),
            None => Ok(String::new()),
            Some(CellValue::Error(e)) => Err(self.conversion(spec, format!("单元格错误: {}", e))),
            Some(value) => Ok(value.to_code()),
        }
    }

    /// 实数字段
    fn real(&self, field: &str) -> ImportResult<f64> {
        let (spec, cell) = self.cell(field)?;
        let value = match cell {
            None => return Err(self.missing(spec)),
            Some(CellValue::Number(n)) => *n,
            Some(CellValue::Text(s)) => parse_decimal(s)
                .ok_or_else(|| self.conversion(spec, format!("无法解析为数值: {}", s.trim())))?,
            Some(other) => {
                return Err(self.conversion(spec, format!("无法解析为数值: {}", other)));
            }
        };

        if !value.is_finite() {
            return Err(self.conversion(spec, format!("数值无效: {}", value)));
        }

        let positive = matches!(spec.kind, ValueKind::Real { positive: true });
        if value < 0.0 || (positive && value == 0.0) {
            return Err(self.out_of_range(spec, value));
        }
        Ok(value)
    }

    /// 非负整数字段（小数不截断，直接拒绝）
    fn count(&self, field: &str) -> ImportResult<u64> {
        let (spec, cell) = self.cell(field)?;
        let value = match cell {
            None => return Err(self.missing(spec)),
            Some(CellValue::Number(n)) => *n,
            Some(CellValue::Text(s)) => parse_decimal(s)
                .ok_or_else(|| self.conversion(spec, format!("无法解析为整数: {}", s.trim())))?,
            Some(other) => {
                return Err(self.conversion(spec, format!("无法解析为整数: {}", other)));
            }
        };

        if !value.is_finite() || value.fract() != 0.0 {
            return Err(self.conversion(spec, format!("不是整数: {}", value)));
        }
        // u64::MAX as f64 即 2^64，本身已越界
        if value < 0.0 || value >= u64::MAX as f64 {
            return Err(self.out_of_range(spec, value));
        }
        Ok(value as u64)
    }

    /// JSON 对象字段（缺省为空对象）
    fn json(&self, field: &str) -> ImportResult<serde_json::Value> {
        let (spec, cell) = self.cell(field)?;
        let raw = match cell {
            None if spec.required => return Err(self.missing(spec)),
            None => return Ok(serde_json::Value::Object(serde_json::Map::new())),
            Some(CellValue::Text(s)) => s,
            Some(other) => {
                return Err(self.conversion(spec, format!("期望 JSON 对象，实际: {}", other)));
            }
        };

        let value: serde_json::Value = serde_json::from_str(raw.trim())
            .map_err(|e| self.conversion(spec, format!("JSON 解析失败: {}", e)))?;
        if !value.is_object() {
            return Err(self.conversion(spec, format!("期望 JSON 对象，实际: {}", raw.trim())));
        }
        Ok(value)
    }
}

/// 解析十进制数（兼容逗号小数点 "2,5"）
fn parse_decimal(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    trimmed
        .parse::<f64>()
        .ok()
        .or_else(|| trimmed.replace(',', ".").parse::<f64>().ok())
}
