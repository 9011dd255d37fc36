// ==========================================
// 运输任务数据 - 规划数据校验层
// ==========================================
// 职责: 提交路线计算前对规划视图做业务一致性检查
// ==========================================

pub mod validator;

pub use validator::{PlanValidationError, PlanValidator};
