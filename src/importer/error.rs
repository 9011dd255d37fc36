// ==========================================
// 运输任务数据 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 分类: 缺表 / 表结构 / 引用完整性 / 外部协作方 / 会话
// ==========================================

use crate::domain::types::RecordKind;
use crate::plan::PlanValidationError;
use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件格式不支持: {0}（仅支持 .xlsx/.xlsm/.xls/.ods）")]
    UnsupportedFormat(String),

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    #[error("Excel 解析失败: {0}")]
    ExcelParseError(String),

    // ===== 工作表结构错误 =====
    #[error("缺少必需工作表: {sheet}")]
    MissingSheet { sheet: String },

    #[error("工作表 {sheet} 缺少必需列: {column}")]
    MissingColumn { sheet: String, column: String },

    #[error("必填值为空 (工作表 {sheet}, 行 {row}, 列 {column})")]
    MissingValue {
        sheet: String,
        row: usize,
        column: String,
    },

    #[error("类型转换失败 (工作表 {sheet}, 行 {row}, 列 {column}): {message}")]
    TypeConversion {
        sheet: String,
        row: usize,
        column: String,
        message: String,
    },

    #[error("数值超出范围 (工作表 {sheet}, 行 {row}, 列 {column}): {value}")]
    ValueOutOfRange {
        sheet: String,
        row: usize,
        column: String,
        value: f64,
    },

    #[error("主键重复 (工作表 {sheet}, 行 {row}): {key}")]
    DuplicateKey {
        sheet: String,
        row: usize,
        key: String,
    },

    // ===== 引用完整性错误 =====
    #[error("{referenced_by}引用的仓库不存在 (行 {row}): {warehouse_id}")]
    UnknownWarehouse {
        warehouse_id: String,
        referenced_by: RecordKind,
        row: usize,
    },

    #[error("{referenced_by}引用的商品不存在 (行 {row}): {sku}")]
    UnknownProduct {
        sku: String,
        referenced_by: RecordKind,
        row: usize,
    },

    // ===== 会话错误 =====
    #[error("导入已被更新的导入取代 (generation {generation}, 当前 {current})")]
    Superseded { generation: u64, current: u64 },

    // ===== 规划校验 =====
    #[error("规划数据校验未通过: {0}")]
    PlanRejected(#[from] PlanValidationError),

    // ===== 通用错误 =====
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ImportError {
    /// 是否属于引用完整性错误
    pub fn is_referential(&self) -> bool {
        matches!(
            self,
            ImportError::UnknownWarehouse { .. } | ImportError::UnknownProduct { .. }
        )
    }
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => ImportError::FileNotFound(err.to_string()),
            _ => ImportError::FileReadError(err.to_string()),
        }
    }
}

// 实现 From<calamine::Error>
impl From<calamine::Error> for ImportError {
    fn from(err: calamine::Error) -> Self {
        ImportError::ExcelParseError(err.to_string())
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_sheet_message_names_sheet() {
        let err = ImportError::MissingSheet {
            sheet: "ТС".to_string(),
        };
        assert!(err.to_string().contains("ТС"));
    }

    #[test]
    fn test_referential_message_names_key_and_record_kind() {
        let err = ImportError::UnknownProduct {
            sku: "P9".to_string(),
            referenced_by: RecordKind::Destination,
            row: 4,
        };
        let msg = err.to_string();
        assert!(msg.contains("P9"));
        assert!(msg.contains("目的地"));
        assert!(err.is_referential());
    }

    #[test]
    fn test_io_not_found_maps_to_file_not_found() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        assert!(matches!(ImportError::from(io), ImportError::FileNotFound(_)));
    }
}
