// ==========================================
// 列车入段排位系统 - 方案汇总
// ==========================================
// 职责: 从排位结果统计分配率、代价分布、股道/角色使用、未分配原因
// 红线: 只读结果,不修改
// ==========================================

use crate::domain::assignment::{Assignment, AssignmentDetail, PlanSummary};

/// 高代价列车列表上限
pub const TOP_HIGH_COST_LIMIT: usize = 10;

// ==========================================
// PlanSummarizer - 汇总器
// ==========================================
pub struct PlanSummarizer;

impl PlanSummarizer {
    /// 汇总排位结果
    ///
    /// details 与 assignments 按下标一一对应;
    /// 未分配原因取自明细中的不可行原因 (每条单独计数)
    pub fn summarize(assignments: &[Assignment], details: &[AssignmentDetail]) -> PlanSummary {
        let assigned: Vec<&Assignment> = assignments.iter().filter(|a| a.is_assigned()).collect();
        let costs: Vec<f64> = assigned.iter().filter_map(|a| a.cost).collect();

        let total_cost: f64 = costs.iter().sum();
        let avg_cost = if costs.is_empty() {
            None
        } else {
            Some(total_cost / costs.len() as f64)
        };

        let slot_usage = count_desc(assigned.iter().filter_map(|a| a.slot_id.clone()));
        let role_usage = count_desc(
            assigned
                .iter()
                .filter_map(|a| a.role.as_ref().map(|r| r.to_string())),
        );
        let infeasibility_reason_counts = count_desc(
            assignments
                .iter()
                .zip(details)
                .filter(|(a, _)| !a.is_assigned())
                .flat_map(|(_, d)| d.infeasibility_reasons.iter().cloned()),
        );

        // 稳定排序: 同代价保持输入顺序
        let mut by_cost: Vec<&Assignment> = assigned.clone();
        by_cost.sort_by(|a, b| {
            let ca = a.cost.unwrap_or(0.0);
            let cb = b.cost.unwrap_or(0.0);
            cb.total_cmp(&ca)
        });
        let top_high_cost = by_cost
            .iter()
            .take(TOP_HIGH_COST_LIMIT)
            .map(|a| a.train_id.clone())
            .collect();

        PlanSummary {
            total_trains: assignments.len(),
            assigned: assigned.len(),
            unassigned: assignments.len() - assigned.len(),
            total_cost,
            avg_cost,
            median_cost: median(&costs),
            slot_usage,
            role_usage,
            infeasibility_reason_counts,
            top_high_cost,
        }
    }
}

/// 中位数 (偶数个取中间两数均值)
fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// 计数,按次数降序 (并列保持首次出现顺序)
fn count_desc<I>(items: I) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = String>,
{
    let mut counts: Vec<(String, usize)> = Vec::new();
    for item in items {
        match counts.iter_mut().find(|(k, _)| *k == item) {
            Some((_, n)) => *n += 1,
            None => counts.push((item, 1)),
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}
