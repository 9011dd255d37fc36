// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 构造示例工作簿（内存模型 + 磁盘 .xlsx 文件）
// ==========================================

#![allow(dead_code)]

use rust_xlsxwriter::Workbook as XlsxWorkbook;
use std::error::Error;
use tempfile::{Builder, NamedTempFile};
use transport_planner::importer::{CellValue, Sheet, Workbook};

pub type SheetData = (&'static str, Vec<Vec<CellValue>>);

/// 文本单元格行
pub fn text_row(cells: &[&str]) -> Vec<CellValue> {
    cells.iter().map(|c| CellValue::from(*c)).collect()
}

/// 示例数据: 1 个商品 / 1 个仓库 / 1 条库存 / 1 个目的地 / 1 辆车
pub fn example_sheets() -> Vec<SheetData> {
    vec![
        (
            "Товары",
            vec![
                text_row(&["SKU", "Название", "Вес"]),
                vec!["P1".into(), "Box".into(), CellValue::Number(2.5)],
            ],
        ),
        (
            "Склады",
            vec![text_row(&["ID", "Название", "Адрес"]), text_row(&["W1", "Main", "X"])],
        ),
        (
            "Товары на складах",
            vec![
                text_row(&["Склад ID", "SKU", "Количество"]),
                vec!["W1".into(), "P1".into(), CellValue::Number(10.0)],
            ],
        ),
        (
            "ПП",
            vec![
                text_row(&["ID", "Название", "Адрес", "SKU", "Кол-во"]),
                vec![
                    "D1".into(),
                    "Dest".into(),
                    "Y".into(),
                    "P1".into(),
                    CellValue::Number(3.0),
                ],
            ],
        ),
        (
            "ТС",
            vec![
                text_row(&["ID", "Название", "Грузоподъемность", "Расход"]),
                vec![
                    "T1".into(),
                    "Truck".into(),
                    CellValue::Number(1000.0),
                    CellValue::Number(30.0),
                ],
            ],
        ),
    ]
}

/// 去掉指定工作表
pub fn without_sheet(sheets: Vec<SheetData>, name: &str) -> Vec<SheetData> {
    sheets.into_iter().filter(|(n, _)| *n != name).collect()
}

/// 替换指定工作表的数据行（保留表头）
pub fn with_rows(
    sheets: Vec<SheetData>,
    name: &str,
    rows: Vec<Vec<CellValue>>,
) -> Vec<SheetData> {
    sheets
        .into_iter()
        .map(|(n, mut data)| {
            if n == name {
                data.truncate(1);
                data.extend(rows.clone());
            }
            (n, data)
        })
        .collect()
}

/// 构造内存工作簿
pub fn build_workbook(sheets: &[SheetData]) -> Workbook {
    let mut workbook = Workbook::new();
    for (name, rows) in sheets {
        workbook.insert_sheet(Sheet::new(*name, rows.clone()));
    }
    workbook
}

/// 写出 .xlsx 临时文件
///
/// # 返回
/// - NamedTempFile: 临时文件（需要保持存活）
pub fn write_xlsx(sheets: &[SheetData]) -> Result<NamedTempFile, Box<dyn Error>> {
    let mut xlsx = XlsxWorkbook::new();

    for (name, rows) in sheets {
        let worksheet = xlsx.add_worksheet();
        worksheet.set_name(*name)?;
        for (r, row) in rows.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                let (r, c) = (r as u32, c as u16);
                match cell {
                    CellValue::Text(s) => {
                        worksheet.write_string(r, c, s.as_str())?;
                    }
                    CellValue::Number(n) => {
                        worksheet.write_number(r, c, *n)?;
                    }
                    CellValue::Bool(b) => {
                        worksheet.write_boolean(r, c, *b)?;
                    }
                    CellValue::Empty | CellValue::Error(_) => {}
                }
            }
        }
    }

    let file = Builder::new().suffix(".xlsx").tempfile()?;
    xlsx.save(file.path())?;
    Ok(file)
}
