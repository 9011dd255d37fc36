// ==========================================
// 运输任务数据 - 导入层
// ==========================================
// 职责: 工作簿 → 已校验的记录集 + 规划视图
// 支持: Excel (.xlsx/.xlsm/.xls), OpenDocument (.ods)
// ==========================================

// 模块声明
pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod import_session;
pub mod importer_trait;
pub mod integrity;
pub mod sheet_schema;
pub mod status;
pub mod transport_importer;
pub mod view_builder;
pub mod workbook;

// 重导出核心类型
pub use error::{ImportError, ImportResult};
pub use field_mapper::FieldMapper as FieldMapperImpl;
pub use file_parser::{check_workbook_path, read_workbook_file, ExcelParser};
pub use import_session::{ImportSession, ImportTicket};
pub use integrity::IntegrityValidator;
pub use sheet_schema::{schema_for, ColumnSpec, SheetSchema, ValueKind};
pub use status::{summary_message, ImportStatus, StatusTone};
pub use transport_importer::TransportImporterImpl;
pub use view_builder::ViewBuilder;
pub use workbook::{CellValue, Sheet, Workbook};

// 重导出 Trait 接口
pub use importer_trait::{FieldMapper, ImportObserver, TransportImporter, WorkbookParser};
