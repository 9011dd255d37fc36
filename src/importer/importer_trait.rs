// ==========================================
// 运输任务数据 - 导入 Trait
// ==========================================
// 职责: 定义导入管道各环节接口（不包含实现）
// ==========================================

use crate::domain::import_outcome::ImportOutcome;
use crate::domain::planning_view::PlanningView;
use crate::domain::transport_task::{Destination, InventoryItem, Product, Transport, Warehouse};
use crate::importer::error::ImportResult;
use crate::importer::import_session::ImportSession;
use crate::importer::status::ImportStatus;
use crate::importer::workbook::{Sheet, Workbook};
use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;

// ==========================================
// TransportImporter Trait
// ==========================================
// 用途: 导入主接口
// 实现者: TransportImporterImpl
#[async_trait]
pub trait TransportImporter: Send + Sync {
    /// 从工作簿文件导入
    ///
    /// # 流程
    /// 1. 读取文件（唯一的挂起点）
    /// 2. 解析为内存工作簿
    /// 3. 检查五个必需工作表
    /// 4. 逐表映射为领域记录
    /// 5. 主键唯一性 + 引用完整性校验
    /// 6. 生成规划视图
    async fn import_from_excel<P: AsRef<Path> + Send>(
        &self,
        file_path: P,
    ) -> ImportResult<ImportOutcome>;

    /// 从已缓冲的工作簿二进制内容导入（同步）
    fn import_from_bytes(&self, bytes: &[u8]) -> ImportResult<ImportOutcome>;

    /// 从内存工作簿导入（同步）
    fn import_workbook(&self, workbook: &Workbook) -> ImportResult<ImportOutcome>;

    /// 在会话中导入: 被更新的导入取代时不覆盖结果
    ///
    /// # 返回
    /// - Ok(Arc<ImportOutcome>): 已提交为会话最新结果
    /// - Err(Superseded): 导入期间有新的导入开始
    async fn import_in_session<P: AsRef<Path> + Send>(
        &self,
        session: &ImportSession,
        file_path: P,
    ) -> ImportResult<Arc<ImportOutcome>>;
}

// ==========================================
// WorkbookParser Trait
// ==========================================
// 用途: 外部表格解析库的适配接口
// 实现者: ExcelParser
pub trait WorkbookParser: Send + Sync {
    /// 将工作簿二进制内容解析为内存工作簿
    fn parse_workbook(&self, bytes: &[u8]) -> ImportResult<Workbook>;
}

// ==========================================
// FieldMapper Trait
// ==========================================
// 用途: 工作表 → 领域记录
// 实现者: field_mapper::FieldMapper
pub trait FieldMapper: Send + Sync {
    fn map_products(&self, sheet: &Sheet) -> ImportResult<Vec<Product>>;

    fn map_warehouses(&self, sheet: &Sheet) -> ImportResult<Vec<Warehouse>>;

    fn map_inventory(&self, sheet: &Sheet) -> ImportResult<Vec<InventoryItem>>;

    fn map_destinations(&self, sheet: &Sheet) -> ImportResult<Vec<Destination>>;

    fn map_transports(&self, sheet: &Sheet) -> ImportResult<Vec<Transport>>;
}

// ==========================================
// ImportObserver Trait
// ==========================================
// 用途: 界面刷新回调（状态文本 + 加载结果）
pub trait ImportObserver: Send + Sync {
    /// 导入状态变化（message 已按配置语言本地化）
    fn on_status(&self, status: &ImportStatus, message: &str);

    /// 导入成功，交付规划视图
    fn on_loaded(&self, _view: &PlanningView) {}
}
