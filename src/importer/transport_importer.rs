// ==========================================
// 运输任务数据 - 导入器实现
// ==========================================
// 职责: 整合导入流程，从工作簿文件到规划视图
// 流程: 读取 → 解析 → 缺表检查 → 映射 → 完整性校验 → 视图 → (规划校验)
// 红线: 任一步失败即整体失败，不产生部分结果
// ==========================================

use crate::config::ImportConfigReader;
use crate::domain::import_outcome::{ImportOutcome, ImportSummary};
use crate::domain::transport_task::TransportTaskData;
use crate::domain::types::RecordKind;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::field_mapper::FieldMapper as DefaultFieldMapper;
use crate::importer::file_parser::{read_workbook_file, ExcelParser};
use crate::importer::import_session::{ImportSession, ImportTicket};
use crate::importer::importer_trait::{
    FieldMapper, ImportObserver, TransportImporter, WorkbookParser,
};
use crate::importer::integrity::IntegrityValidator;
use crate::importer::status::ImportStatus;
use crate::importer::view_builder::ViewBuilder;
use crate::importer::workbook::{Sheet, Workbook};
use crate::plan::PlanValidator;
use chrono::Utc;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

// ==========================================
// TransportImporterImpl - 导入器实现
// ==========================================
pub struct TransportImporterImpl<C>
where
    C: ImportConfigReader,
{
    // 配置读取器
    config: C,

    // 导入组件
    parser: Box<dyn WorkbookParser>,
    field_mapper: Box<dyn FieldMapper>,
    integrity: IntegrityValidator,
    view_builder: ViewBuilder,
    plan_validator: PlanValidator,

    // 界面回调
    observers: Vec<Box<dyn ImportObserver>>,
}

impl<C> TransportImporterImpl<C>
where
    C: ImportConfigReader,
{
    /// 创建新的导入器实例
    ///
    /// # 参数
    /// - config: 配置读取器
    /// - parser: 工作簿解析器
    /// - field_mapper: 字段映射器
    pub fn new(
        config: C,
        parser: Box<dyn WorkbookParser>,
        field_mapper: Box<dyn FieldMapper>,
    ) -> Self {
        Self {
            config,
            parser,
            field_mapper,
            integrity: IntegrityValidator,
            view_builder: ViewBuilder,
            plan_validator: PlanValidator,
            observers: Vec::new(),
        }
    }

    /// 使用默认解析器与映射器
    pub fn with_defaults(config: C) -> Self {
        Self::new(config, Box::new(ExcelParser), Box::new(DefaultFieldMapper))
    }

    /// 注册界面回调
    pub fn add_observer(&mut self, observer: Box<dyn ImportObserver>) {
        self.observers.push(observer);
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    // ===== 管道步骤 =====

    fn parse_and_build(&self, bytes: &[u8], started: Instant) -> ImportResult<ImportOutcome> {
        debug!("步骤 2: 解析工作簿");
        let workbook = self.parser.parse_workbook(bytes)?;
        self.build_outcome(&workbook, started)
    }

    fn build_outcome(&self, workbook: &Workbook, started: Instant) -> ImportResult<ImportOutcome> {
        debug!(sheets = ?workbook.sheet_names(), "步骤 3: 检查必需工作表");
        for kind in RecordKind::ALL {
            require_sheet(workbook, kind)?;
        }

        debug!("步骤 4: 字段映射");
        let products = self
            .field_mapper
            .map_products(require_sheet(workbook, RecordKind::Product)?)?;
        let warehouses = self
            .field_mapper
            .map_warehouses(require_sheet(workbook, RecordKind::Warehouse)?)?;
        let inventory = self
            .field_mapper
            .map_inventory(require_sheet(workbook, RecordKind::InventoryItem)?)?;
        let destinations = self
            .field_mapper
            .map_destinations(require_sheet(workbook, RecordKind::Destination)?)?;
        let transports = self
            .field_mapper
            .map_transports(require_sheet(workbook, RecordKind::Transport)?)?;

        debug!("步骤 5: 主键与引用完整性校验");
        self.integrity.validate_unique_keys(&products, &warehouses)?;
        self.integrity
            .validate_references(&products, &warehouses, &inventory, &destinations)?;

        let data = TransportTaskData::new(products, warehouses, inventory, destinations, transports);

        debug!("步骤 6: 生成规划视图");
        let view = self.view_builder.build(&data);
        if !view.all_cargo_resolved() {
            warn!("部分货物条目未解析到商品名称，已使用原始编码");
        }

        if self.config.validate_plan() {
            debug!("步骤 7: 规划校验");
            self.plan_validator.validate(&view)?;
        }

        let summary = ImportSummary::of(&data);
        let outcome = ImportOutcome {
            import_id: Uuid::new_v4().to_string(),
            imported_at: Utc::now(),
            data,
            view,
            summary,
            elapsed_ms: started.elapsed().as_millis() as u64,
        };

        info!(
            import_id = %outcome.import_id,
            products = summary.products,
            warehouses = summary.warehouses,
            inventory_items = summary.inventory_items,
            destinations = summary.destinations,
            transports = summary.transports,
            elapsed_ms = outcome.elapsed_ms,
            "导入完成"
        );
        Ok(outcome)
    }

    // ===== 状态通知 =====

    fn notify(&self, status: ImportStatus) {
        let message = status.message_in(self.config.locale());
        for observer in &self.observers {
            observer.on_status(&status, &message);
        }
    }

    fn report_success(&self, outcome: &ImportOutcome) {
        for observer in &self.observers {
            observer.on_loaded(&outcome.view);
        }
        self.notify(ImportStatus::Loaded {
            import_id: outcome.import_id.clone(),
        });
    }

    fn report_failure(&self, err: &ImportError) {
        // 被取代的导入不覆盖新导入的状态提示
        if let ImportError::Superseded { generation, current } = err {
            warn!(generation, current, "导入已被更新的导入取代");
            return;
        }
        error!(error = %err, "导入失败");
        self.notify(ImportStatus::Failed {
            reason: err.to_string(),
        });
    }

    /// 会话内导入失败: 凭据已过期时改报 Superseded，不发出失败状态
    fn fail_in_session(
        &self,
        session: &ImportSession,
        ticket: ImportTicket,
        err: ImportError,
    ) -> ImportError {
        let err = match session.ensure_current(ticket) {
            Ok(()) => err,
            Err(superseded) => superseded,
        };
        self.report_failure(&err);
        err
    }

    fn settle(&self, result: ImportResult<ImportOutcome>) -> ImportResult<ImportOutcome> {
        match &result {
            Ok(outcome) => self.report_success(outcome),
            Err(e) => self.report_failure(e),
        }
        result
    }
}

fn require_sheet(workbook: &Workbook, kind: RecordKind) -> ImportResult<&Sheet> {
    workbook
        .sheet(kind.sheet_name())
        .ok_or_else(|| ImportError::MissingSheet {
            sheet: kind.sheet_name().to_string(),
        })
}

#[async_trait::async_trait]
impl<C> TransportImporter for TransportImporterImpl<C>
where
    C: ImportConfigReader,
{
    /// 从工作簿文件导入
    ///
    /// # 参数
    /// - file_path: 工作簿路径（.xlsx/.xlsm/.xls/.ods）
    #[instrument(skip(self, file_path), fields(file_path = %file_path.as_ref().display()))]
    async fn import_from_excel<P: AsRef<Path> + Send>(
        &self,
        file_path: P,
    ) -> ImportResult<ImportOutcome> {
        let started = Instant::now();
        info!("开始导入运输任务数据");
        self.notify(ImportStatus::Loading);

        debug!("步骤 1: 读取文件");
        let result = match read_workbook_file(file_path.as_ref()).await {
            Ok(bytes) => self.parse_and_build(&bytes, started),
            Err(e) => Err(e),
        };
        self.settle(result)
    }

    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    fn import_from_bytes(&self, bytes: &[u8]) -> ImportResult<ImportOutcome> {
        let started = Instant::now();
        self.notify(ImportStatus::Loading);
        let result = self.parse_and_build(bytes, started);
        self.settle(result)
    }

    #[instrument(skip(self, workbook))]
    fn import_workbook(&self, workbook: &Workbook) -> ImportResult<ImportOutcome> {
        let started = Instant::now();
        self.notify(ImportStatus::Loading);
        let result = self.build_outcome(workbook, started);
        self.settle(result)
    }

    #[instrument(skip(self, session, file_path), fields(file_path = %file_path.as_ref().display()))]
    async fn import_in_session<P: AsRef<Path> + Send>(
        &self,
        session: &ImportSession,
        file_path: P,
    ) -> ImportResult<Arc<ImportOutcome>> {
        let started = Instant::now();
        let ticket = session.begin();
        info!(generation = ticket.generation(), "开始会话内导入");
        self.notify(ImportStatus::Loading);

        let bytes = match read_workbook_file(file_path.as_ref()).await {
            Ok(bytes) => bytes,
            Err(e) => return Err(self.fail_in_session(session, ticket, e)),
        };

        // 读取是唯一的挂起点，恢复后先确认未被取代
        if let Err(e) = session.ensure_current(ticket) {
            return Err(self.fail_in_session(session, ticket, e));
        }

        let outcome = match self.parse_and_build(&bytes, started) {
            Ok(outcome) => outcome,
            Err(e) => return Err(self.fail_in_session(session, ticket, e)),
        };

        match session.commit(ticket, outcome) {
            Ok(committed) => {
                self.report_success(&committed);
                Ok(committed)
            }
            Err(e) => Err(self.fail_in_session(session, ticket, e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ImporterConfig;
    use crate::importer::workbook::CellValue;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        statuses: Arc<Mutex<Vec<(ImportStatus, String)>>>,
        loaded: Arc<Mutex<usize>>,
    }

    impl ImportObserver for Recorder {
        fn on_status(&self, status: &ImportStatus, message: &str) {
            self.statuses
                .lock()
                .unwrap()
                .push((status.clone(), message.to_string()));
        }

        fn on_loaded(&self, _view: &crate::domain::planning_view::PlanningView) {
            *self.loaded.lock().unwrap() += 1;
        }
    }

    fn row(cells: &[&str]) -> Vec<CellValue> {
        cells.iter().map(|c| CellValue::from(*c)).collect()
    }

    fn workbook() -> Workbook {
        Workbook::new()
            .with_sheet(Sheet::new(
                "Товары",
                vec![
                    row(&["SKU", "Название", "Вес"]),
                    vec!["P1".into(), "Box".into(), CellValue::Number(2.5)],
                ],
            ))
            .with_sheet(Sheet::new(
                "Склады",
                vec![row(&["ID", "Название", "Адрес"]), row(&["W1", "Main", "X"])],
            ))
            .with_sheet(Sheet::new(
                "Товары на складах",
                vec![
                    row(&["Склад ID", "SKU", "Количество"]),
                    vec!["W1".into(), "P1".into(), CellValue::Number(10.0)],
                ],
            ))
            .with_sheet(Sheet::new(
                "ПП",
                vec![
                    row(&["ID", "Название", "Адрес", "SKU", "Кол-во"]),
                    vec![
                        "D1".into(),
                        "Dest".into(),
                        "Y".into(),
                        "P1".into(),
                        CellValue::Number(3.0),
                    ],
                ],
            ))
            .with_sheet(Sheet::new(
                "ТС",
                vec![
                    row(&["ID", "Название", "Грузоподъемность", "Расход"]),
                    vec![
                        "T1".into(),
                        "Truck".into(),
                        CellValue::Number(1000.0),
                        CellValue::Number(30.0),
                    ],
                ],
            ))
    }

    fn importer_with_recorder(
        config: ImporterConfig,
    ) -> (TransportImporterImpl<ImporterConfig>, Recorder) {
        let recorder = Recorder::default();
        let mut importer = TransportImporterImpl::with_defaults(config);
        importer.add_observer(Box::new(Recorder {
            statuses: Arc::clone(&recorder.statuses),
            loaded: Arc::clone(&recorder.loaded),
        }));
        (importer, recorder)
    }

    #[test]
    fn test_import_workbook_success_notifies_observers() {
        let (importer, recorder) = importer_with_recorder(ImporterConfig {
            locale: "ru".to_string(),
            validate_plan: true,
        });

        let outcome = importer.import_workbook(&workbook()).unwrap();
        assert_eq!(outcome.summary.products, 1);
        assert_eq!(outcome.view.warehouses[0].cargos[0].cargo_type.as_str(), "Box");

        let statuses = recorder.statuses.lock().unwrap();
        assert_eq!(statuses.len(), 2);
        assert_eq!(statuses[0].0, ImportStatus::Loading);
        assert_eq!(statuses[0].1, "Загрузка данных из Excel...");
        assert!(matches!(
            statuses[1].0,
            ImportStatus::Loaded { ref import_id } if *import_id == outcome.import_id
        ));
        assert_eq!(*recorder.loaded.lock().unwrap(), 1);
    }

    #[test]
    fn test_missing_sheet_checked_before_mapping() {
        let (importer, recorder) = importer_with_recorder(ImporterConfig::default());

        // ТС 缺失，同时商品表有错误行: 缺表先报
        let mut wb = Workbook::new();
        for name in ["Товары", "Склады", "Товары на складах", "ПП"] {
            let sheet = workbook().sheet(name).cloned().unwrap();
            wb.insert_sheet(sheet);
        }
        wb.insert_sheet(Sheet::new(
            "Товары",
            vec![row(&["SKU", "Название", "Вес"]), row(&["P1", "Box", "heavy"])],
        ));

        let err = importer.import_workbook(&wb).unwrap_err();
        assert!(matches!(err, ImportError::MissingSheet { ref sheet } if sheet == "ТС"));

        let statuses = recorder.statuses.lock().unwrap();
        assert!(matches!(statuses.last(), Some((ImportStatus::Failed { .. }, _))));
        assert_eq!(*recorder.loaded.lock().unwrap(), 0);
    }

    #[test]
    fn test_plan_validation_rejects_overdemand() {
        let (importer, _recorder) = importer_with_recorder(ImporterConfig {
            locale: "en".to_string(),
            validate_plan: true,
        });

        let mut wb = workbook();
        wb.insert_sheet(Sheet::new(
            "ПП",
            vec![
                row(&["ID", "Название", "Адрес", "SKU", "Кол-во"]),
                vec![
                    "D1".into(),
                    "Dest".into(),
                    "Y".into(),
                    "P1".into(),
                    CellValue::Number(11.0),
                ],
            ],
        ));

        let err = importer.import_workbook(&wb).unwrap_err();
        assert!(matches!(err, ImportError::PlanRejected(_)));

        // 关闭规划校验时同一工作簿可以导入
        let lenient = TransportImporterImpl::with_defaults(ImporterConfig::default());
        assert!(lenient.import_workbook(&wb).is_ok());
    }
}
