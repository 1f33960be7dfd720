// ==========================================
// 列车入段排位系统 - 解释引擎
// ==========================================
// 职责: 已分配 → 代价贡献排名; 未分配 → 跨股道不可行原因聚合
// 红线: 原因去重,计数排序稳定 (并列保持首次出现顺序)
// ==========================================

use crate::domain::assignment::{Assignment, AssignmentDetail};
use crate::domain::slot::SlotRecord;
use crate::domain::train::TrainRecord;
use crate::engine::cost_model::CostModel;
use crate::engine::feasibility::FeasibilityEvaluator;

/// 未找到任何不可行原因时的兜底描述
pub const REASON_NO_FEASIBLE_SLOT_SUMMARY: &str = "no feasible slot";

/// 明细原因最多条数
const MAX_DETAIL_REASONS: usize = 3;

// ==========================================
// ExplanationEngine - 解释引擎
// ==========================================
#[derive(Debug, Clone, Copy)]
pub struct ExplanationEngine {
    model: CostModel,
}

impl ExplanationEngine {
    pub fn new(model: CostModel) -> Self {
        Self { model }
    }

    // ==========================================
    // 单对诊断
    // ==========================================

    /// 列出 (列车, 股道) 的不可行原因
    ///
    /// # 顺序
    /// 1. missing job-card data / missing certificate data / missing cleaning data
    /// 2. certificate invalid (与角色无关)
    /// 3. blocked train cannot go to Service
    /// 4. cleaning pending for Service
    pub fn infeasibility_reasons(train: &TrainRecord, slot: &SlotRecord) -> Vec<String> {
        let mut reasons: Vec<&str> = Vec::new();

        if train.job_card.is_none() {
            reasons.push("missing job-card data");
        }
        if train.certificates.is_none() {
            reasons.push("missing certificate data");
        }
        if train.cleaning.is_none() {
            reasons.push("missing cleaning data");
        }

        if let Some(certs) = &train.certificates {
            if !certs.all_valid() {
                reasons.push("certificate invalid");
            }
        }

        let service = slot.role.is_service();
        if let Some(job) = &train.job_card {
            if job.blocked && service {
                reasons.push("blocked train cannot go to Service");
            }
        }
        if let Some(cleaning) = &train.cleaning {
            if !cleaning.cleaning_done && service {
                reasons.push("cleaning pending for Service");
            }
        }

        dedup_preserving_order(reasons)
    }

    /// 单对解释
    ///
    /// 可行 → 代价贡献 (同分配理由); 不可行 → 不可行原因 "; " 连接
    pub fn explain(train: &TrainRecord, slot: &SlotRecord) -> String {
        if FeasibilityEvaluator::is_pair_feasible(train, slot) {
            return CostModel::explain_reason(train, slot);
        }

        let reasons = Self::infeasibility_reasons(train, slot);
        if reasons.is_empty() {
            REASON_NO_FEASIBLE_SLOT_SUMMARY.to_string()
        } else {
            reasons.join("; ")
        }
    }

    // ==========================================
    // 未分配聚合
    // ==========================================

    /// 统计每条原因排除了多少个股道 (降序,并列按首次出现)
    pub fn rank_infeasibility(train: &TrainRecord, slots: &[SlotRecord]) -> Vec<(String, usize)> {
        let mut counts: Vec<(String, usize)> = Vec::new();

        for slot in slots {
            if FeasibilityEvaluator::is_pair_feasible(train, slot) {
                continue;
            }
            for reason in Self::infeasibility_reasons(train, slot) {
                match counts.iter_mut().find(|(r, _)| *r == reason) {
                    Some((_, n)) => *n += 1,
                    None => counts.push((reason, 1)),
                }
            }
        }

        // sort_by 为稳定排序
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts
    }

    /// 未分配列车的原因汇总: "<reason> (<count> slots)"
    ///
    /// 无任何原因 → ["no feasible slot"]
    pub fn summarize_unassigned(train: &TrainRecord, slots: &[SlotRecord]) -> Vec<String> {
        let ranked = Self::rank_infeasibility(train, slots);
        if ranked.is_empty() {
            return vec![REASON_NO_FEASIBLE_SLOT_SUMMARY.to_string()];
        }

        ranked
            .into_iter()
            .map(|(reason, count)| format!("{} ({} slots)", reason, count))
            .collect()
    }

    // ==========================================
    // 明细
    // ==========================================

    /// 按分项得分给出主要贡献因素 (最多 3 条)
    ///
    /// # 阈值
    /// - 就绪: ≥4 high readiness risk, ≥1 readiness concern
    /// - 里程: ≥3 very high mileage, ≥1 high mileage
    /// - 调车: ≥4 long shunt
    pub fn top_reasons_from_breakdown(readiness: u8, mileage: f64, shunt: f64) -> Vec<String> {
        let mut reasons = Vec::new();

        if readiness >= 4 {
            reasons.push("high readiness risk");
        } else if readiness >= 1 {
            reasons.push("readiness concern");
        }

        if mileage >= 3.0 {
            reasons.push("very high mileage");
        } else if mileage >= 1.0 {
            reasons.push("high mileage");
        }

        if shunt >= 4.0 {
            reasons.push("long shunt");
        }

        if reasons.is_empty() {
            reasons.push("good fit");
        }

        reasons.truncate(MAX_DETAIL_REASONS);
        reasons.into_iter().map(String::from).collect()
    }

    /// 为单条排位结果生成明细
    ///
    /// 未分配时调车得分为 0,并附带不可行原因汇总
    pub fn detail(
        &self,
        assignment: &Assignment,
        train: &TrainRecord,
        slots: &[SlotRecord],
    ) -> AssignmentDetail {
        let readiness = CostModel::readiness_risk(train);
        let mileage = CostModel::mileage_penalty(train);

        let assigned_slot = assignment
            .slot_id
            .as_deref()
            .and_then(|id| slots.iter().find(|s| s.slot_id == id));
        let shunt = assigned_slot.map(CostModel::shunt_proxy).unwrap_or(0.0);

        let infeasibility_reasons = if assignment.is_assigned() {
            Vec::new()
        } else {
            Self::summarize_unassigned(train, slots)
        };

        AssignmentDetail {
            train_id: assignment.train_id.clone(),
            slot_id: assignment.slot_id.clone(),
            role: assignment.role.clone(),
            readiness_score: readiness,
            mileage_score: mileage,
            shunt_score: shunt,
            total_cost_recomputed: self.model.weighted_sum(readiness, mileage, shunt),
            reasons: Self::top_reasons_from_breakdown(readiness, mileage, shunt),
            infeasibility_reasons,
        }
    }
}

/// 去重并保持首次出现顺序
fn dedup_preserving_order(reasons: Vec<&str>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(reasons.len());
    for reason in reasons {
        if !out.iter().any(|r| r == reason) {
            out.push(reason.to_string());
        }
    }
    out
}
