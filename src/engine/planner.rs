// ==========================================
// 列车入段排位系统 - 排位编排器
// ==========================================
// 用途: 协调 代价矩阵 → 求解 → 明细解释 → 汇总 的执行顺序
// 红线: 每次调用从快照重新计算,不保留跨调用状态
// ==========================================

use crate::config::weights::WeightVector;
use crate::domain::assignment::InductionPlan;
use crate::domain::snapshot::{DataIssue, FleetSnapshot};
use crate::engine::error::{PlannerError, PlannerResult};
use crate::engine::explain::ExplanationEngine;
use crate::engine::solver::AssignmentSolver;
use crate::engine::summary::PlanSummarizer;
use tracing::{debug, info, instrument, warn};

// ==========================================
// InductionPlanner - 排位编排器
// ==========================================
pub struct InductionPlanner;

impl InductionPlanner {
    /// 执行完整排位流程
    ///
    /// # 参数
    /// - snapshot: 已索引的列车/股道快照
    /// - weights: 本次调用使用的权重
    ///
    /// # 返回
    /// 排位结果 + 明细 + 汇总 + 降级事件
    ///
    /// # 错误
    /// - 权重非法 → InvalidWeight
    /// - 无列车或无股道 → EmptyInput
    #[instrument(skip_all, fields(trains = snapshot.trains().len(), slots = snapshot.slots().len()))]
    pub fn plan(snapshot: &FleetSnapshot, weights: WeightVector) -> PlannerResult<InductionPlan> {
        info!(?weights, "开始执行入段排位");

        // ==========================================
        // 步骤1: 求解
        // ==========================================
        let solver = AssignmentSolver::new(weights)?;
        let outcome = solver.solve_detailed(snapshot.trains(), snapshot.slots())?;
        debug!(objective = outcome.objective, "步骤1完成: 指派求解");

        // ==========================================
        // 步骤2: 明细解释
        // ==========================================
        let engine = ExplanationEngine::new(*solver.model());
        let mut details = Vec::with_capacity(outcome.assignments.len());
        for assignment in &outcome.assignments {
            let train = snapshot
                .train(&assignment.train_id)
                .ok_or_else(|| PlannerError::UnknownTrain(assignment.train_id.clone()))?;
            details.push(engine.detail(assignment, train, snapshot.slots()));
        }
        debug!(details = details.len(), "步骤2完成: 明细解释");

        // ==========================================
        // 步骤3: 汇总
        // ==========================================
        let summary = PlanSummarizer::summarize(&outcome.assignments, &details);

        // ==========================================
        // 步骤4: 降级事件
        // ==========================================
        let mut issues: Vec<DataIssue> = snapshot.missing_records().iter().map(DataIssue::from).collect();
        issues.extend(
            outcome
                .matrix
                .overflow_cells()
                .into_iter()
                .map(|(train_id, slot_id)| DataIssue::NumericOverflow { train_id, slot_id }),
        );
        if !issues.is_empty() {
            warn!(issues = issues.len(), "存在数据降级事件");
        }

        info!(
            total = summary.total_trains,
            assigned = summary.assigned,
            unassigned = summary.unassigned,
            total_cost = summary.total_cost,
            "入段排位完成"
        );

        Ok(InductionPlan {
            assignments: outcome.assignments,
            details,
            summary,
            issues,
        })
    }
}
