// ==========================================
// 运输任务数据 - 导入会话
// ==========================================
// 职责: 跟踪最新一次导入，防止旧导入覆盖新结果
// 机制: 单调递增的代次计数器 + 互斥保护的最新结果
// ==========================================

use crate::domain::import_outcome::ImportOutcome;
use crate::importer::error::{ImportError, ImportResult};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, warn};

/// 导入凭据（begin 时发放，commit 时校验）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportTicket {
    generation: u64,
}

impl ImportTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

// ==========================================
// ImportSession - 导入会话
// ==========================================
// 由调用方持有（可放入 Arc 跨任务共享），不存在进程级单例
#[derive(Debug, Default)]
pub struct ImportSession {
    generation: AtomicU64,
    latest: Mutex<Option<Arc<ImportOutcome>>>,
}

impl ImportSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// 开始一次导入: 之前发放的凭据全部失效
    pub fn begin(&self) -> ImportTicket {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(generation, "开始新的导入");
        ImportTicket { generation }
    }

    pub fn current_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// 校验凭据，过期时返回 Superseded
    pub fn ensure_current(&self, ticket: ImportTicket) -> ImportResult<()> {
        let current = self.current_generation();
        if ticket.generation == current {
            Ok(())
        } else {
            Err(ImportError::Superseded {
                generation: ticket.generation,
                current,
            })
        }
    }

    /// 提交导入结果（仅最新凭据可写入）
    ///
    /// # 返回
    /// - Ok(Arc<ImportOutcome>): 已成为会话最新结果
    /// - Err(Superseded): 凭据已过期，最新结果保持不变
    pub fn commit(
        &self,
        ticket: ImportTicket,
        outcome: ImportOutcome,
    ) -> ImportResult<Arc<ImportOutcome>> {
        // 持锁期间完成校验与写入
        let mut slot = self.slot()?;
        if let Err(e) = self.ensure_current(ticket) {
            warn!(generation = ticket.generation, "导入已被取代，丢弃结果");
            return Err(e);
        }

        let outcome = Arc::new(outcome);
        *slot = Some(Arc::clone(&outcome));
        debug!(generation = ticket.generation, import_id = %outcome.import_id, "导入结果已提交");
        Ok(outcome)
    }

    /// 最新提交的导入结果
    pub fn latest(&self) -> ImportResult<Option<Arc<ImportOutcome>>> {
        Ok(self.slot()?.clone())
    }

    fn slot(&self) -> ImportResult<MutexGuard<'_, Option<Arc<ImportOutcome>>>> {
        self.latest
            .lock()
            .map_err(|e| ImportError::Other(anyhow::anyhow!("锁获取失败: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::import_outcome::ImportSummary;
    use crate::domain::planning_view::PlanningView;
    use crate::domain::transport_task::TransportTaskData;
    use chrono::Utc;

    fn outcome(import_id: &str) -> ImportOutcome {
        ImportOutcome {
            import_id: import_id.to_string(),
            imported_at: Utc::now(),
            data: TransportTaskData::new(vec![], vec![], vec![], vec![], vec![]),
            view: PlanningView {
                cargo_types: vec![],
                truck_types: vec![],
                warehouses: vec![],
                destinations: vec![],
            },
            summary: ImportSummary::default(),
            elapsed_ms: 0,
        }
    }

    #[test]
    fn test_generations_increase() {
        let session = ImportSession::new();
        let first = session.begin();
        let second = session.begin();
        assert!(second.generation() > first.generation());
        assert!(matches!(
            session.ensure_current(first),
            Err(ImportError::Superseded { generation: 1, current: 2 })
        ));
        assert!(session.ensure_current(second).is_ok());
    }

    #[test]
    fn test_stale_ticket_cannot_overwrite_newer_result() {
        let session = ImportSession::new();
        let old = session.begin();
        let new = session.begin();

        session.commit(new, outcome("new")).unwrap();
        let err = session.commit(old, outcome("old")).unwrap_err();

        assert!(matches!(
            err,
            ImportError::Superseded { generation: 1, current: 2 }
        ));
        let latest = session.latest().unwrap().unwrap();
        assert_eq!(latest.import_id, "new");
    }

    #[test]
    fn test_empty_session_has_no_result() {
        let session = ImportSession::new();
        assert!(session.latest().unwrap().is_none());
        assert_eq!(session.current_generation(), 0);
    }
}
