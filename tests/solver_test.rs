// ==========================================
// AssignmentSolver 集成测试
// ==========================================
// 测试目标: 验证可行性/代价性质与全局最优指派
// 覆盖范围: Service 准入、INF 一致性、幂等、输出顺序、穷举最优性
// ==========================================


use train_induction::config::WeightVector;
use train_induction::domain::{SlotRecord, TrainRecord, REASON_DUMMY_SLOT, REASON_NO_FEASIBLE_SLOT};
use train_induction::engine::{
    AssignmentSolver, CostMatrixBuilder, CostModel, ExplanationEngine, FeasibilityEvaluator, INF,
};
use test_helpers::{blocked_train, healthy_train, slot};

// ==========================================
// 测试辅助函数
// ==========================================

/// 确定性伪随机序列 (线性同余)
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0 >> 33
    }

    fn flag(&mut self, true_per_10: u64) -> bool {
        self.next() % 10 < true_per_10
    }
}

/// 随机生成列车 (包含缺失分表的情况)
fn random_train(rng: &mut Lcg, idx: usize) -> TrainRecord {
    let id = format!("T{}", idx);
    let mut train = TrainRecord::complete(
        &id,
        rng.flag(3),
        [rng.flag(8), rng.flag(8), rng.flag(8)],
        rng.flag(7),
        (rng.next() % 300_000) as f64,
    );
    if rng.flag(1) {
        train.cleaning = None;
    }
    if rng.flag(1) {
        train.mileage = None;
    }
    train
}

fn random_slot(rng: &mut Lcg, idx: usize) -> SlotRecord {
    let role = ["Service", "Standby", "IBL", "service"][(rng.next() % 4) as usize];
    let shunt = if rng.flag(8) {
        Some((rng.next() % 600) as f64)
    } else {
        None
    };
    SlotRecord::new(&format!("S{}", idx), role, shunt)
}

/// 穷举补齐方阵的最小总代价
fn brute_force_min(cost: &[Vec<f64>]) -> f64 {
    fn go(cost: &[Vec<f64>], row: usize, used: &mut [bool], acc: f64, best: &mut f64) {
        if row == cost.len() {
            *best = best.min(acc);
            return;
        }
        for col in 0..cost.len() {
            if !used[col] {
                used[col] = true;
                go(cost, row + 1, used, acc + cost[row][col], best);
                used[col] = false;
            }
        }
    }
    let mut best = f64::INFINITY;
    go(cost, 0, &mut vec![false; cost.len()], 0.0, &mut best);
    best
}

// ==========================================
// 测试 1: 可行性与代价性质
// ==========================================

#[test]
fn test_blocked_train_never_feasible_for_service() {
    let mut rng = Lcg(7);
    for i in 0..50 {
        let mut train = random_train(&mut rng, i);
        if let Some(job) = train.job_card.as_mut() {
            job.blocked = true;
        }
        for role in ["Service", "SERVICE", "service"] {
            assert!(!FeasibilityEvaluator::is_feasible_for_role(&train, role));
        }
    }
}

#[test]
fn test_inf_iff_infeasible() {
    let model = CostModel::new(WeightVector::default()).unwrap();
    let mut rng = Lcg(11);
    for i in 0..40 {
        let train = random_train(&mut rng, i);
        let s = random_slot(&mut rng, i);
        let feasible = FeasibilityEvaluator::is_pair_feasible(&train, &s);
        let cost = model.pair_cost(&train, &s);
        assert_eq!(cost == INF, !feasible, "train={:?} slot={:?}", train, s);
    }
}

#[test]
fn test_cost_matrix_idempotent() {
    let model = CostModel::new(WeightVector::new(3.0, 2.0, 1.0)).unwrap();
    let mut rng = Lcg(23);
    let trains: Vec<TrainRecord> = (0..6).map(|i| random_train(&mut rng, i)).collect();
    let slots: Vec<SlotRecord> = (0..4).map(|i| random_slot(&mut rng, i)).collect();

    let builder = CostMatrixBuilder::new(&model);
    let first = builder.build(&trains, &slots).unwrap();
    let second = builder.build(&trains, &slots).unwrap();
    assert_eq!(first, second);
}

// ==========================================
// 测试 2: 参考场景
// ==========================================

#[test]
fn test_reference_scenario_cost() {
    let model = CostModel::new(WeightVector::default()).unwrap();
    let train = healthy_train("T1", 150_000.0);
    let s1 = slot("S1", "Service", 50.0);

    assert!(FeasibilityEvaluator::is_pair_feasible(&train, &s1));
    assert_eq!(CostModel::readiness_risk(&train), 0);
    assert_eq!(CostModel::mileage_penalty(&train), 0.0);
    assert_eq!(CostModel::shunt_proxy(&s1), 0.5);
    assert_eq!(model.pair_cost(&train, &s1), 0.25);
}

#[test]
fn test_blocked_train_single_service_slot() {
    let solver = AssignmentSolver::new(WeightVector::default()).unwrap();
    let t2 = blocked_train("T2");
    let s1 = slot("S1", "Service", 50.0);

    let assignments = solver.solve(&[t2.clone()], &[s1.clone()]).unwrap();
    assert_eq!(assignments[0].explanation, REASON_NO_FEASIBLE_SLOT);
    assert!(ExplanationEngine::infeasibility_reasons(&t2, &s1)
        .contains(&"blocked train cannot go to Service".to_string()));
}

#[test]
fn test_two_trains_one_slot() {
    let solver = AssignmentSolver::new(WeightVector::default()).unwrap();
    let t3 = healthy_train("T3", 100_000.0);
    let t4 = healthy_train("T4", 230_000.0);

    let assignments = solver.solve(&[t3, t4], &[slot("S1", "Service", 50.0)]).unwrap();
    assert_eq!(assignments[0].slot_id.as_deref(), Some("S1"));
    assert_eq!(assignments[1].slot_id, None);
    assert_eq!(assignments[1].explanation, REASON_DUMMY_SLOT);
}

// ==========================================
// 测试 3: 输出顺序与全局最优
// ==========================================

#[test]
fn test_every_train_once_in_input_order() {
    let solver = AssignmentSolver::new(WeightVector::default()).unwrap();
    let mut rng = Lcg(99);
    for round in 0..10 {
        let trains: Vec<TrainRecord> = (0..(3 + round % 4)).map(|i| random_train(&mut rng, i)).collect();
        let slots: Vec<SlotRecord> = (0..(1 + round % 5)).map(|i| random_slot(&mut rng, i)).collect();

        let assignments = solver.solve(&trains, &slots).unwrap();
        let ids: Vec<&str> = assignments.iter().map(|a| a.train_id.as_str()).collect();
        let expected: Vec<&str> = trains.iter().map(|t| t.train_id.as_str()).collect();
        assert_eq!(ids, expected);

        // 已分配股道互不重复
        let mut used: Vec<&str> = assignments.iter().filter_map(|a| a.slot_id.as_deref()).collect();
        let before = used.len();
        used.sort();
        used.dedup();
        assert_eq!(used.len(), before);
    }
}

#[test]
fn test_solve_is_globally_optimal() {
    let solver = AssignmentSolver::new(WeightVector::default()).unwrap();
    let mut rng = Lcg(2024);

    for round in 0..30 {
        let n_trains = 1 + round % 6;
        let n_slots = 1 + (round / 6) % 6;
        let trains: Vec<TrainRecord> = (0..n_trains).map(|i| random_train(&mut rng, i)).collect();
        let slots: Vec<SlotRecord> = (0..n_slots).map(|i| random_slot(&mut rng, i)).collect();

        let outcome = solver.solve_detailed(&trains, &slots).unwrap();
        let square = AssignmentSolver::pad_to_square(&outcome.matrix);
        let best = brute_force_min(&square);

        assert!(
            (outcome.objective - best).abs() < 1e-6,
            "round {}: objective {} vs brute force {}",
            round,
            outcome.objective,
            best
        );
    }
}

#[test]
fn test_infeasible_pair_avoided_when_alternative_exists() {
    // T1 只能去 Standby (扣车),T2 两处均可;任何最优解都不能让 T1 落到 Service
    let solver = AssignmentSolver::new(WeightVector::default()).unwrap();
    let assignments = solver
        .solve(
            &[blocked_train("T1"), healthy_train("T2", 0.0)],
            &[slot("S1", "Standby", 500.0), slot("S2", "Service", 10.0)],
        )
        .unwrap();
    assert_eq!(assignments[0].slot_id.as_deref(), Some("S1"));
    assert_eq!(assignments[1].slot_id.as_deref(), Some("S2"));
}
