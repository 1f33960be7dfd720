// ==========================================
// 列车入段排位系统 - 领域模型层
// ==========================================
// 职责: 定义列车、股道、快照、排位结果等实体
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod assignment;
pub mod slot;
pub mod snapshot;
pub mod train;
pub mod types;

// 重导出核心类型
pub use assignment::{
    Assignment, AssignmentDetail, InductionPlan, PlanSummary, REASON_DUMMY_SLOT,
    REASON_NO_FEASIBLE_SLOT,
};
pub use slot::SlotRecord;
pub use snapshot::{DataIssue, FleetSnapshot, MissingRecord, SourceTables};
pub use train::{CertificateRow, CleaningRow, JobCardRow, MileageRow, TrainRecord};
pub use types::{SlotRole, SourceTable};
