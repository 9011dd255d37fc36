// ==========================================
// 运输任务数据 - 文件解析器实现
// ==========================================
// 阶段 0: 文件读取与解析
// 支持: Excel (.xlsx/.xlsm/.xls) / OpenDocument (.ods)
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use crate::importer::importer_trait::WorkbookParser;
use crate::importer::workbook::{CellValue, Sheet, Workbook};
use calamine::{open_workbook_auto_from_rs, Reader};
use std::io::Cursor;
use std::path::Path;
use tracing::debug;

/// 支持的扩展名
const SUPPORTED_EXTENSIONS: [&str; 4] = ["xlsx", "xlsm", "xls", "ods"];

// ==========================================
// Excel Parser 实现
// ==========================================
pub struct ExcelParser;

impl WorkbookParser for ExcelParser {
    fn parse_workbook(&self, bytes: &[u8]) -> ImportResult<Workbook> {
        // 按内容自动识别格式（xlsx/xls/ods）
        let mut sheets = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))?;

        let mut workbook = Workbook::new();
        for sheet_name in sheets.sheet_names() {
            let range = sheets.worksheet_range(&sheet_name)?;

            let rows: Vec<Vec<CellValue>> = range
                .rows()
                .map(|row| row.iter().map(CellValue::from).collect())
                .collect();

            // 数据区不一定从 A1 开始，记录首行行号
            let origin_row = range.start().map(|(row, _)| row as usize + 1).unwrap_or(1);

            debug!(sheet = %sheet_name, rows = rows.len(), origin_row, "工作表读取完成");
            workbook.insert_sheet(Sheet::new(sheet_name, rows).with_origin_row(origin_row));
        }

        Ok(workbook)
    }
}

/// 检查文件存在与扩展名
pub fn check_workbook_path(path: &Path) -> ImportResult<()> {
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.display().to_string()));
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();
    if !SUPPORTED_EXTENSIONS.contains(&ext.as_str()) {
        return Err(ImportError::UnsupportedFormat(ext));
    }

    Ok(())
}

/// 异步读取工作簿文件内容
pub async fn read_workbook_file(path: &Path) -> ImportResult<Vec<u8>> {
    check_workbook_path(path)?;
    let bytes = tokio::fs::read(path).await?;
    debug!(path = %path.display(), size = bytes.len(), "文件读取完成");
    Ok(bytes)
}
