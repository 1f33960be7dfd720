// ==========================================
// 列车入段排位系统 - 排位结果领域模型
// ==========================================
// 红线: 每列输入列车恰好一行结果,顺序与输入一致
// 红线: 所有结果必须带解释 (可解释性)
// ==========================================

use crate::domain::snapshot::DataIssue;
use crate::domain::types::SlotRole;
use serde::{Deserialize, Serialize};

/// 无可行股道
pub const REASON_NO_FEASIBLE_SLOT: &str = "No feasible slot";

/// 被分配到虚拟列 (真实股道不足)
pub const REASON_DUMMY_SLOT: &str = "Assigned to dummy (no available real slot)";

// ==========================================
// Assignment - 单列车排位结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub train_id: String,
    pub slot_id: Option<String>, // 未分配时为 None
    pub role: Option<SlotRole>,  // 未分配时为 None
    pub cost: Option<f64>,       // 未分配时为 None
    pub explanation: String,     // 分配理由或未分配原因
}

impl Assignment {
    /// 构造已分配结果
    pub fn assigned(train_id: &str, slot_id: &str, role: SlotRole, cost: f64, explanation: String) -> Self {
        Self {
            train_id: train_id.to_string(),
            slot_id: Some(slot_id.to_string()),
            role: Some(role),
            cost: Some(cost),
            explanation,
        }
    }

    /// 构造未分配结果
    pub fn unassigned(train_id: &str, reason: &str) -> Self {
        Self {
            train_id: train_id.to_string(),
            slot_id: None,
            role: None,
            cost: None,
            explanation: reason.to_string(),
        }
    }

    pub fn is_assigned(&self) -> bool {
        self.slot_id.is_some()
    }
}

// ==========================================
// AssignmentDetail - 明细分解
// ==========================================
// 用途: 每列车的分项得分与原因,供看板与导出使用
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentDetail {
    pub train_id: String,
    pub slot_id: Option<String>,
    pub role: Option<SlotRole>,

    // ===== 分项得分 =====
    pub readiness_score: u8,  // 就绪风险 (0/1/4/5)
    pub mileage_score: f64,   // 里程罚分
    pub shunt_score: f64,     // 调车代理 (未分配时为 0)

    // ===== 汇总 =====
    pub total_cost_recomputed: f64, // 按权重重算的总代价

    // ===== 解释 =====
    pub reasons: Vec<String>,               // 主要贡献因素 (最多 3 条)
    pub infeasibility_reasons: Vec<String>, // 未分配时的不可行原因排名
}

// ==========================================
// PlanSummary - 方案汇总
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanSummary {
    pub total_trains: usize,
    pub assigned: usize,
    pub unassigned: usize,

    // ===== 代价统计 (仅已分配) =====
    pub total_cost: f64,
    pub avg_cost: Option<f64>,
    pub median_cost: Option<f64>,

    // ===== 使用统计 (降序,并列按首次出现) =====
    pub slot_usage: Vec<(String, usize)>,
    pub role_usage: Vec<(String, usize)>,
    pub infeasibility_reason_counts: Vec<(String, usize)>,

    // ===== 高代价列车 (最多 10 列) =====
    pub top_high_cost: Vec<String>,
}

// ==========================================
// InductionPlan - 完整入段方案
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InductionPlan {
    pub assignments: Vec<Assignment>,
    pub details: Vec<AssignmentDetail>,
    pub summary: PlanSummary,
    pub issues: Vec<DataIssue>, // 降级事件 (缺失记录 / 代价溢出)
}
