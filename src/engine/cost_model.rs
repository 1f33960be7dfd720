// ==========================================
// 列车入段排位系统 - 线性代价模型
// ==========================================
// 依据: 入段排位规则 - 代价 = w_r·就绪风险 + w_m·里程罚分 + w_s·调车代理
// 职责: 为 (列车, 股道) 打分,不可行对记为 INF
// 红线: 同一输入与权重必须逐位复现同一代价
// ==========================================

use crate::config::weights::WeightVector;
use crate::domain::slot::SlotRecord;
use crate::domain::train::TrainRecord;
use crate::engine::error::PlannerResult;
use crate::engine::feasibility::FeasibilityEvaluator;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// 不可行哨兵代价 (有限大数,兼容数值匹配算法)
pub const INF: f64 = 1_000_000.0;

/// 判定为"实际不可行"的阈值 (容忍浮点累加)
pub const INFEASIBLE_THRESHOLD: f64 = INF / 10.0;

/// 里程罚分起算阈值 (公里)
pub const MILEAGE_THRESHOLD_KM: f64 = 200_000.0;

/// 里程罚分刻度 (每多少公里记 1 分)
pub const MILEAGE_SCALE_KM: f64 = 10_000.0;

/// 里程表缺失时的固定罚分
pub const MISSING_MILEAGE_PENALTY: f64 = 2.0;

// ==========================================
// CostBreakdown - 代价分解
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub feasible: bool,
    pub readiness: u8,
    pub mileage: f64,
    pub shunt: f64,
    pub cost: f64,      // 不可行或溢出时为 INF
    pub overflow: bool, // 加权和非有限,已替换为 INF
}

// ==========================================
// CostModel - 代价模型
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostModel {
    weights: WeightVector,
}

impl CostModel {
    /// 创建代价模型 (校验权重)
    pub fn new(weights: WeightVector) -> PlannerResult<Self> {
        weights.validate()?;
        Ok(Self { weights })
    }

    pub fn weights(&self) -> &WeightVector {
        &self.weights
    }

    // ==========================================
    // 分项得分
    // ==========================================

    /// 就绪风险
    ///
    /// # 规则
    /// - 作业卡/证书/保洁任一缺失 → 5
    /// - 扣车 → 5
    /// - 任一证书无效 → 4
    /// - 保洁未完成 → 1
    /// - 否则 → 0
    ///
    /// 与股道角色无关
    pub fn readiness_risk(train: &TrainRecord) -> u8 {
        if !train.has_readiness_data() || train.is_blocked() {
            5
        } else if !train.certificates_valid() {
            4
        } else if !train.cleaning_done() {
            1
        } else {
            0
        }
    }

    /// 里程罚分 = max(0, (mileage_km - 200000) / 10000)
    ///
    /// 里程缺失 → 2.0
    pub fn mileage_penalty(train: &TrainRecord) -> f64 {
        match train.mileage_km() {
            Some(km) => ((km - MILEAGE_THRESHOLD_KM) / MILEAGE_SCALE_KM).max(0.0),
            None => MISSING_MILEAGE_PENALTY,
        }
    }

    /// 调车代理
    ///
    /// # 规则
    /// - 有调车距离 → shunt_distance / 100
    /// - 否则按角色查表: service 1.0, standby 0.5, ibl 1.5, 其他 1.0
    pub fn shunt_proxy(slot: &SlotRecord) -> f64 {
        if let Some(distance) = slot.shunt_distance {
            return distance / 100.0;
        }
        match slot.role.as_key() {
            "service" => 1.0,
            "standby" => 0.5,
            "ibl" => 1.5,
            _ => 1.0,
        }
    }

    // ==========================================
    // 组合代价
    // ==========================================

    /// 计算代价分解
    pub fn breakdown(&self, train: &TrainRecord, slot: &SlotRecord) -> CostBreakdown {
        let feasible = FeasibilityEvaluator::is_pair_feasible(train, slot);
        let readiness = Self::readiness_risk(train);
        let mileage = Self::mileage_penalty(train);
        let shunt = Self::shunt_proxy(slot);

        if !feasible {
            return CostBreakdown {
                feasible,
                readiness,
                mileage,
                shunt,
                cost: INF,
                overflow: false,
            };
        }

        let weighted = self.weighted_sum(readiness, mileage, shunt);
        let overflow = !weighted.is_finite();
        if overflow {
            warn!(
                train_id = %train.train_id,
                slot_id = %slot.slot_id,
                "加权代价非有限,按 INF 处理"
            );
        }

        CostBreakdown {
            feasible,
            readiness,
            mileage,
            shunt,
            cost: if overflow { INF } else { weighted },
            overflow,
        }
    }

    /// 计算 (列车, 股道) 代价,不可行返回 INF
    pub fn pair_cost(&self, train: &TrainRecord, slot: &SlotRecord) -> f64 {
        self.breakdown(train, slot).cost
    }

    /// 按权重组合分项得分 (不做可行性与有限性检查)
    pub fn weighted_sum(&self, readiness: u8, mileage: f64, shunt: f64) -> f64 {
        self.weights.w_readiness * f64::from(readiness)
            + self.weights.w_mileage * mileage
            + self.weights.w_shunt * shunt
    }

    // ==========================================
    // 解释
    // ==========================================

    /// 分配理由 (最多两条,严重度从高到低)
    ///
    /// # 阈值
    /// - 就绪: ≥5 blocked/high readiness risk, ≥4 certificate issue, ≥1 cleaning pending
    /// - 里程: ≥3 very high mileage, ≥1 high mileage
    /// - 调车: ≥4 long shunt movement
    /// - 均未触发 → good fit
    pub fn explain_reason(train: &TrainRecord, slot: &SlotRecord) -> String {
        let mut reasons = Vec::new();

        let readiness = Self::readiness_risk(train);
        if readiness >= 5 {
            reasons.push("blocked/high readiness risk");
        } else if readiness >= 4 {
            reasons.push("certificate issue");
        } else if readiness >= 1 {
            reasons.push("cleaning pending");
        }

        let mileage = Self::mileage_penalty(train);
        if mileage >= 3.0 {
            reasons.push("very high mileage");
        } else if mileage >= 1.0 {
            reasons.push("high mileage");
        }

        if Self::shunt_proxy(slot) >= 4.0 {
            reasons.push("long shunt movement");
        }

        if reasons.is_empty() {
            return "good fit".to_string();
        }

        reasons.truncate(2);
        reasons.join("; ")
    }
}

/// 代价是否视为不可行 (≥ INF/10)
pub fn is_effectively_infeasible(cost: f64) -> bool {
    cost >= INFEASIBLE_THRESHOLD
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> CostModel {
        CostModel::new(WeightVector::default()).unwrap()
    }

    fn healthy(id: &str, mileage_km: f64) -> TrainRecord {
        TrainRecord::complete(id, false, [true, true, true], true, mileage_km)
    }

    // ==========================================
    // 测试 1: 就绪风险
    // ==========================================

    #[test]
    fn test_readiness_risk_levels() {
        assert_eq!(CostModel::readiness_risk(&healthy("T1", 0.0)), 0);

        let dirty = TrainRecord::complete("T2", false, [true, true, true], false, 0.0);
        assert_eq!(CostModel::readiness_risk(&dirty), 1);

        let cert = TrainRecord::complete("T3", false, [true, false, true], false, 0.0);
        assert_eq!(CostModel::readiness_risk(&cert), 4);

        let blocked = TrainRecord::complete("T4", true, [false, false, false], false, 0.0);
        assert_eq!(CostModel::readiness_risk(&blocked), 5);
    }

    #[test]
    fn test_readiness_risk_missing_data_is_max() {
        let mut train = healthy("T5", 0.0);
        train.certificates = None;
        assert_eq!(CostModel::readiness_risk(&train), 5);
    }

    // ==========================================
    // 测试 2: 里程罚分
    // ==========================================

    #[test]
    fn test_mileage_penalty_below_threshold_is_zero() {
        assert_eq!(CostModel::mileage_penalty(&healthy("T1", 150_000.0)), 0.0);
        assert_eq!(CostModel::mileage_penalty(&healthy("T1", 200_000.0)), 0.0);
    }

    #[test]
    fn test_mileage_penalty_grows_linearly() {
        assert_eq!(CostModel::mileage_penalty(&healthy("T1", 215_000.0)), 1.5);
        assert_eq!(CostModel::mileage_penalty(&healthy("T1", 240_000.0)), 4.0);
    }

    #[test]
    fn test_mileage_penalty_missing_is_sentinel() {
        let mut train = healthy("T1", 0.0);
        train.mileage = None;
        assert_eq!(CostModel::mileage_penalty(&train), 2.0);
    }

    // ==========================================
    // 测试 3: 调车代理
    // ==========================================

    #[test]
    fn test_shunt_proxy_from_distance() {
        assert_eq!(CostModel::shunt_proxy(&SlotRecord::new("S1", "Service", Some(50.0))), 0.5);
        assert_eq!(CostModel::shunt_proxy(&SlotRecord::new("S1", "Service", Some(0.0))), 0.0);
    }

    #[test]
    fn test_shunt_proxy_role_fallback() {
        assert_eq!(CostModel::shunt_proxy(&SlotRecord::new("S1", "Service", None)), 1.0);
        assert_eq!(CostModel::shunt_proxy(&SlotRecord::new("S2", "STANDBY", None)), 0.5);
        assert_eq!(CostModel::shunt_proxy(&SlotRecord::new("S3", "ibl", None)), 1.5);
        assert_eq!(CostModel::shunt_proxy(&SlotRecord::new("S4", "wash", None)), 1.0);
    }

    // ==========================================
    // 测试 4: 组合代价
    // ==========================================

    #[test]
    fn test_pair_cost_reference_scenario() {
        let train = healthy("T1", 150_000.0);
        let slot = SlotRecord::new("S1", "Service", Some(50.0));

        let b = model().breakdown(&train, &slot);
        assert!(b.feasible);
        assert_eq!(b.readiness, 0);
        assert_eq!(b.mileage, 0.0);
        assert_eq!(b.shunt, 0.5);
        assert_eq!(b.cost, 0.25);
        assert!(!b.overflow);
    }

    #[test]
    fn test_infeasible_pair_costs_inf() {
        let blocked = TrainRecord::complete("T2", true, [true, true, true], true, 0.0);
        let slot = SlotRecord::new("S1", "Service", Some(50.0));
        assert_eq!(model().pair_cost(&blocked, &slot), INF);
    }

    #[test]
    fn test_blocked_train_on_standby_is_finite() {
        let blocked = TrainRecord::complete("T2", true, [true, true, true], true, 0.0);
        let slot = SlotRecord::new("S2", "Standby", Some(20.0));
        // 10*5 + 0 + 0.5*0.2
        assert!((model().pair_cost(&blocked, &slot) - 50.1).abs() < 1e-9);
    }

    #[test]
    fn test_non_finite_cost_recovers_to_inf() {
        let train = healthy("T1", 0.0);
        let slot = SlotRecord::new("S9", "Standby", Some(f64::INFINITY));
        let b = model().breakdown(&train, &slot);
        assert_eq!(b.cost, INF);
        assert!(b.overflow);
    }

    #[test]
    fn test_pair_cost_is_reproducible() {
        let train = healthy("T1", 234_567.0);
        let slot = SlotRecord::new("S1", "Standby", Some(123.0));
        let m = model();
        assert_eq!(m.pair_cost(&train, &slot).to_bits(), m.pair_cost(&train, &slot).to_bits());
    }

    #[test]
    fn test_invalid_weights_rejected() {
        assert!(CostModel::new(WeightVector::new(-1.0, 1.0, 1.0)).is_err());
    }

    // ==========================================
    // 测试 5: 解释
    // ==========================================

    #[test]
    fn test_explain_good_fit() {
        let slot = SlotRecord::new("S1", "Service", Some(50.0));
        assert_eq!(CostModel::explain_reason(&healthy("T1", 0.0), &slot), "good fit");
    }

    #[test]
    fn test_explain_keeps_two_most_severe() {
        let train = TrainRecord::complete("T1", true, [true, true, true], true, 260_000.0);
        let slot = SlotRecord::new("S1", "Standby", Some(500.0));
        assert_eq!(
            CostModel::explain_reason(&train, &slot),
            "blocked/high readiness risk; very high mileage"
        );
    }

    #[test]
    fn test_explain_thresholds() {
        let cert = TrainRecord::complete("T1", false, [false, true, true], true, 215_000.0);
        let slot = SlotRecord::new("S1", "IBL", None);
        assert_eq!(CostModel::explain_reason(&cert, &slot), "certificate issue; high mileage");

        let dirty = TrainRecord::complete("T2", false, [true, true, true], false, 0.0);
        let far = SlotRecord::new("S2", "Standby", Some(400.0));
        assert_eq!(CostModel::explain_reason(&dirty, &far), "cleaning pending; long shunt movement");
    }

    #[test]
    fn test_effectively_infeasible_threshold() {
        assert!(is_effectively_infeasible(INF));
        assert!(is_effectively_infeasible(INF / 10.0));
        assert!(!is_effectively_infeasible(99_999.0));
    }
}
