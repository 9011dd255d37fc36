// ==========================================
// 运输任务数据 - 内存工作簿模型
// ==========================================
// 职责: 解析库输出与字段映射之间的中间表示
// 结构: 工作簿 → 具名工作表 → 行 → 单元格
// ==========================================

use calamine::Data;
use std::fmt;

// ==========================================
// CellValue - 单元格值
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    Error(String), // 单元格公式错误（#N/A 等）
}

impl CellValue {
    /// 空单元格或只含空白的文本
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// 编码/文本类强制转换（数字整值不带小数部分）
    pub fn to_code(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(s) => s.trim().to_string(),
            CellValue::Number(n) => format_number(*n),
            CellValue::Bool(b) => b.to_string(),
            CellValue::Error(e) => e.clone(),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_code())
    }
}

impl From<&Data> for CellValue {
    fn from(data: &Data) -> Self {
        match data {
            Data::Empty => CellValue::Empty,
            Data::String(s) => CellValue::Text(s.clone()),
            Data::Int(i) => CellValue::Number(*i as f64),
            Data::Float(f) => CellValue::Number(*f),
            Data::Bool(b) => CellValue::Bool(*b),
            Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
            Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
            Data::Error(e) => CellValue::Error(e.to_string()),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        if s.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(s.to_string())
        }
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Number(n as f64)
    }
}

/// 数字转文本: 整值按整数输出（101.0 → "101"）
fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

// ==========================================
// Sheet - 工作表
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub name: String,
    pub rows: Vec<Vec<CellValue>>, // 第一行为表头
    pub origin_row: usize,         // rows[0] 在电子表格中的行号（从 1 开始）
}

impl Sheet {
    pub fn new(name: impl Into<String>, rows: Vec<Vec<CellValue>>) -> Self {
        Self {
            name: name.into(),
            rows,
            origin_row: 1,
        }
    }

    pub fn with_origin_row(mut self, origin_row: usize) -> Self {
        self.origin_row = origin_row.max(1);
        self
    }

    /// 表头（首行，去除首尾空白）
    pub fn headers(&self) -> Vec<String> {
        self.rows
            .first()
            .map(|row| row.iter().map(|c| c.to_code()).collect())
            .unwrap_or_default()
    }

    /// 数据行 (电子表格行号, 单元格)，跳过完全空白的行
    pub fn data_rows(&self) -> impl Iterator<Item = (usize, &[CellValue])> {
        self.rows
            .iter()
            .enumerate()
            .skip(1)
            .filter(|(_, row)| !row.iter().all(CellValue::is_blank))
            .map(move |(idx, row)| (idx + self.origin_row, row.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.rows.iter().all(|row| row.iter().all(CellValue::is_blank))
    }
}

// ==========================================
// Workbook - 工作簿
// ==========================================
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Workbook {
    sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加工作表（同名时后者覆盖前者）
    pub fn with_sheet(mut self, sheet: Sheet) -> Self {
        self.insert_sheet(sheet);
        self
    }

    pub fn insert_sheet(&mut self, sheet: Sheet) {
        self.sheets.retain(|s| s.name != sheet.name);
        self.sheets.push(sheet);
    }

    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }
}
