// ==========================================
// 列车入段排位系统 - 引擎层
// ==========================================
// 数据流: 可行性 → 代价 → 代价矩阵 → 求解 → 解释
// 红线: 引擎无 I/O,所有结果必须带解释
// ==========================================

pub mod cost_matrix;
pub mod cost_model;
pub mod error;
pub mod explain;
pub mod feasibility;
pub mod hungarian;
pub mod planner;
pub mod solver;
pub mod summary;

// 重导出核心引擎
pub use cost_matrix::{CostMatrix, CostMatrixBuilder, CostMatrixView};
pub use cost_model::{is_effectively_infeasible, CostBreakdown, CostModel, INF, INFEASIBLE_THRESHOLD};
pub use error::{PlannerError, PlannerResult};
pub use explain::ExplanationEngine;
pub use feasibility::FeasibilityEvaluator;
pub use hungarian::min_cost_perfect_matching;
pub use planner::InductionPlanner;
pub use solver::{AssignmentSolver, SolveOutcome};
pub use summary::PlanSummarizer;
