// ==========================================
// 列车入段排位系统 - 指派求解器
// ==========================================
// 职责: 补齐方阵 → 最小代价完美匹配 → 解码为 列车→股道 结果
// 红线: 每列输入列车恰好一行结果,顺序与输入一致
// 红线: 可避免时绝不选择不可行对
// ==========================================

use crate::config::weights::WeightVector;
use crate::domain::assignment::{Assignment, REASON_DUMMY_SLOT, REASON_NO_FEASIBLE_SLOT};
use crate::domain::slot::SlotRecord;
use crate::domain::train::TrainRecord;
use crate::engine::cost_matrix::{dedup_trains, CostMatrix, CostMatrixBuilder};
use crate::engine::cost_model::{is_effectively_infeasible, CostModel, INF};
use crate::engine::error::PlannerResult;
use crate::engine::hungarian::{matching_cost, min_cost_perfect_matching};
use tracing::{debug, info, instrument};

// ==========================================
// SolveOutcome - 求解结果
// ==========================================
#[derive(Debug, Clone)]
pub struct SolveOutcome {
    pub assignments: Vec<Assignment>,
    pub matrix: CostMatrix,
    pub objective: f64, // 补齐方阵上的匹配总代价 (含哨兵)
}

// ==========================================
// AssignmentSolver - 指派求解器
// ==========================================
#[derive(Debug, Clone, Copy)]
pub struct AssignmentSolver {
    model: CostModel,
}

impl AssignmentSolver {
    /// 创建求解器 (校验权重)
    pub fn new(weights: WeightVector) -> PlannerResult<Self> {
        Ok(Self {
            model: CostModel::new(weights)?,
        })
    }

    pub fn model(&self) -> &CostModel {
        &self.model
    }

    /// 补齐为 N×N 方阵 (N = max(列车数, 股道数))
    ///
    /// 虚拟行/虚拟列全部填 INF,非有限值同样替换为 INF
    pub fn pad_to_square(matrix: &CostMatrix) -> Vec<Vec<f64>> {
        let n = matrix.rows().max(matrix.cols());
        let mut square = vec![vec![INF; n]; n];
        for (r, row) in matrix.costs().iter().enumerate() {
            for (c, &cost) in row.iter().enumerate() {
                square[r][c] = if cost.is_finite() { cost } else { INF };
            }
        }
        square
    }

    /// 求解并返回排位结果
    pub fn solve(&self, trains: &[TrainRecord], slots: &[SlotRecord]) -> PlannerResult<Vec<Assignment>> {
        Ok(self.solve_detailed(trains, slots)?.assignments)
    }

    /// 求解并返回结果、代价矩阵与目标值
    ///
    /// # 解码规则
    /// - 真实行 × 真实列: 代价 ≥ INF/10 → 未分配 (No feasible slot),否则分配
    /// - 真实行 × 虚拟列: 未分配 (Assigned to dummy)
    /// - 虚拟行: 丢弃
    ///
    /// # 错误
    /// - 列车或股道为空 → EmptyInput
    #[instrument(skip_all, fields(trains = trains.len(), slots = slots.len()))]
    pub fn solve_detailed(&self, trains: &[TrainRecord], slots: &[SlotRecord]) -> PlannerResult<SolveOutcome> {
        let matrix = CostMatrixBuilder::new(&self.model).build(trains, slots)?;
        let rows = dedup_trains(trains);

        let square = Self::pad_to_square(&matrix);
        let matching = min_cost_perfect_matching(&square);
        let objective = matching_cost(&square, &matching);
        debug!(n = square.len(), objective, "匹配完成");

        let n_slots = matrix.cols();
        let mut assignments = Vec::with_capacity(rows.len());

        // 行下标即输入顺序,虚拟行 (≥ 列车数) 不进入循环
        for (r, train) in rows.iter().enumerate() {
            let c = matching[r];
            if c >= n_slots {
                assignments.push(Assignment::unassigned(&train.train_id, REASON_DUMMY_SLOT));
                continue;
            }

            let cost = square[r][c];
            if is_effectively_infeasible(cost) {
                assignments.push(Assignment::unassigned(&train.train_id, REASON_NO_FEASIBLE_SLOT));
                continue;
            }

            let slot = &slots[c];
            assignments.push(Assignment::assigned(
                &train.train_id,
                &slot.slot_id,
                slot.role.clone(),
                cost,
                CostModel::explain_reason(train, slot),
            ));
        }

        let assigned = assignments.iter().filter(|a| a.is_assigned()).count();
        info!(
            assigned,
            unassigned = assignments.len() - assigned,
            "入段排位求解完成"
        );

        Ok(SolveOutcome {
            assignments,
            matrix,
            objective,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::error::PlannerError;

    fn solver() -> AssignmentSolver {
        AssignmentSolver::new(WeightVector::default()).unwrap()
    }

    fn healthy(id: &str, mileage_km: f64) -> TrainRecord {
        TrainRecord::complete(id, false, [true, true, true], true, mileage_km)
    }

    // ==========================================
    // 测试 1: 补齐方阵
    // ==========================================

    #[test]
    fn test_pad_more_trains_than_slots() {
        let m = CostModel::new(WeightVector::default()).unwrap();
        let trains = vec![healthy("T1", 0.0), healthy("T2", 0.0), healthy("T3", 0.0)];
        let slots = vec![SlotRecord::new("S1", "Service", Some(50.0))];
        let matrix = CostMatrixBuilder::new(&m).build(&trains, &slots).unwrap();

        let square = AssignmentSolver::pad_to_square(&matrix);
        assert_eq!(square.len(), 3);
        assert_eq!(square[0][0], 0.25);
        assert_eq!(square[0][1], INF);
        assert_eq!(square[2][2], INF);
    }

    // ==========================================
    // 测试 2: 解码
    // ==========================================

    #[test]
    fn test_single_feasible_pair() {
        let assignments = solver()
            .solve(&[healthy("T1", 150_000.0)], &[SlotRecord::new("S1", "Service", Some(50.0))])
            .unwrap();
        assert_eq!(assignments.len(), 1);
        assert_eq!(assignments[0].slot_id.as_deref(), Some("S1"));
        assert_eq!(assignments[0].cost, Some(0.25));
        assert_eq!(assignments[0].explanation, "good fit");
    }

    #[test]
    fn test_blocked_train_only_service_is_unassigned() {
        let blocked = TrainRecord::complete("T2", true, [true, true, true], true, 0.0);
        let assignments = solver()
            .solve(&[blocked], &[SlotRecord::new("S1", "Service", Some(50.0))])
            .unwrap();
        assert_eq!(assignments[0], Assignment::unassigned("T2", REASON_NO_FEASIBLE_SLOT));
    }

    #[test]
    fn test_cheaper_train_wins_single_slot() {
        let t3 = healthy("T3", 100_000.0);
        let t4 = healthy("T4", 260_000.0);
        let slots = vec![SlotRecord::new("S1", "Service", Some(50.0))];

        let assignments = solver().solve(&[t4, t3], &slots).unwrap();
        assert_eq!(assignments[0].train_id, "T4");
        assert_eq!(assignments[0].explanation, REASON_DUMMY_SLOT);
        assert!(!assignments[0].is_assigned());
        assert_eq!(assignments[1].train_id, "T3");
        assert_eq!(assignments[1].slot_id.as_deref(), Some("S1"));
    }

    #[test]
    fn test_extra_slots_leave_dummy_rows_silent() {
        let slots = vec![
            SlotRecord::new("S1", "Service", Some(300.0)),
            SlotRecord::new("S2", "Standby", Some(100.0)),
            SlotRecord::new("S3", "IBL", Some(50.0)),
        ];
        let assignments = solver().solve(&[healthy("T1", 0.0)], &slots).unwrap();
        assert_eq!(assignments.len(), 1);
        assert_eq!(assignments[0].slot_id.as_deref(), Some("S3"));
    }

    #[test]
    fn test_global_optimum_over_greedy() {
        // T1 在 S1/S2 都可行,T2 (扣车) 只能去 S2
        // 贪心让 T1 取更便宜的 S2 会迫使 T2 不可行
        let t1 = healthy("T1", 0.0);
        let t2 = TrainRecord::complete("T2", true, [true, true, true], true, 0.0);
        let slots = vec![
            SlotRecord::new("S1", "Service", Some(200.0)),
            SlotRecord::new("S2", "Standby", Some(10.0)),
        ];
        let assignments = solver().solve(&[t1, t2], &slots).unwrap();
        assert_eq!(assignments[0].slot_id.as_deref(), Some("S1"));
        assert_eq!(assignments[1].slot_id.as_deref(), Some("S2"));
    }

    #[test]
    fn test_overflow_cell_decodes_as_no_feasible_slot() {
        let slots = vec![SlotRecord::new("S1", "Standby", Some(f64::INFINITY))];
        let outcome = solver().solve_detailed(&[healthy("T1", 0.0)], &slots).unwrap();
        assert_eq!(outcome.matrix.overflow_cells().len(), 1);
        assert_eq!(outcome.assignments[0], Assignment::unassigned("T1", REASON_NO_FEASIBLE_SLOT));
    }

    #[test]
    fn test_duplicate_trains_yield_one_row() {
        let slots = vec![
            SlotRecord::new("S1", "Standby", Some(10.0)),
            SlotRecord::new("S2", "Standby", Some(20.0)),
        ];
        let assignments = solver()
            .solve(&[healthy("T1", 0.0), healthy("T1", 0.0)], &slots)
            .unwrap();
        assert_eq!(assignments.len(), 1);
    }

    // ==========================================
    // 测试 3: 错误
    // ==========================================

    #[test]
    fn test_empty_trains_rejected() {
        let err = solver()
            .solve(&[], &[SlotRecord::new("S1", "Service", None)])
            .unwrap_err();
        assert!(matches!(err, PlannerError::EmptyInput(_)));
    }

    #[test]
    fn test_invalid_weights_rejected() {
        assert!(AssignmentSolver::new(WeightVector::new(1.0, f64::NAN, 1.0)).is_err());
    }

    #[test]
    fn test_repeated_solves_identical() {
        let trains: Vec<TrainRecord> = (0..5).map(|i| healthy(&format!("T{}", i), 0.0)).collect();
        let slots: Vec<SlotRecord> = (0..5)
            .map(|i| SlotRecord::new(&format!("S{}", i), "Standby", Some(100.0)))
            .collect();
        let s = solver();
        let first = s.solve(&trains, &slots).unwrap();
        for _ in 0..5 {
            assert_eq!(s.solve(&trains, &slots).unwrap(), first);
        }
    }
}
