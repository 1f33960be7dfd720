// ==========================================
// 列车入段排位系统 - 引擎层错误类型
// ==========================================
// 工具: thiserror 派生宏
// 分类: 仅致命错误 (拒绝调用); 降级事件见 domain::DataIssue
// ==========================================

use thiserror::Error;

/// 引擎层错误类型 (调用被拒绝)
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlannerError {
    // ===== 输入结构错误 =====
    #[error("权重无效: {name}={value} (必须为非负有限数)")]
    InvalidWeight { name: &'static str, value: f64 },

    #[error("输入为空: {0}")]
    EmptyInput(String),

    // ===== 查询错误 =====
    #[error("列车不存在: {0}")]
    UnknownTrain(String),

    #[error("股道不存在: {0}")]
    UnknownSlot(String),
}

/// Result 类型别名
pub type PlannerResult<T> = Result<T, PlannerError>;
