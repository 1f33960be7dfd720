// ==========================================
// 列车入段排位系统 - 代价矩阵构建器
// ==========================================
// 职责: 对 列车 × 股道 全组合调用代价模型,生成完整代价表
// 红线: 不可行对记为 INF 单元格,不得省略
// 红线: 行按输入列车顺序 (按 train_id 首次出现去重),列按股道表顺序
// ==========================================

use crate::domain::slot::SlotRecord;
use crate::domain::train::TrainRecord;
use crate::engine::cost_model::{is_effectively_infeasible, CostModel};
use crate::engine::error::{PlannerError, PlannerResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

// ==========================================
// CostMatrix - 代价矩阵
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct CostMatrix {
    train_ids: Vec<String>,
    slot_ids: Vec<String>,
    costs: Vec<Vec<f64>>,
    overflow: Vec<(usize, usize)>,
}

impl CostMatrix {
    pub fn train_ids(&self) -> &[String] {
        &self.train_ids
    }

    pub fn slot_ids(&self) -> &[String] {
        &self.slot_ids
    }

    /// 行数 (列车数)
    pub fn rows(&self) -> usize {
        self.train_ids.len()
    }

    /// 列数 (股道数)
    pub fn cols(&self) -> usize {
        self.slot_ids.len()
    }

    /// 原始代价行
    pub fn costs(&self) -> &[Vec<f64>] {
        &self.costs
    }

    pub fn cost(&self, row: usize, col: usize) -> f64 {
        self.costs[row][col]
    }

    /// 按 id 查询代价
    pub fn get(&self, train_id: &str, slot_id: &str) -> Option<f64> {
        let row = self.train_ids.iter().position(|t| t == train_id)?;
        let col = self.slot_ids.iter().position(|s| s == slot_id)?;
        Some(self.costs[row][col])
    }

    /// 单元格是否为不可行 (≥ INF/10)
    pub fn is_infeasible(&self, row: usize, col: usize) -> bool {
        is_effectively_infeasible(self.costs[row][col])
    }

    /// 加权和非有限而被替换为 INF 的单元格 (train_id, slot_id)
    pub fn overflow_cells(&self) -> Vec<(String, String)> {
        self.overflow
            .iter()
            .map(|&(r, c)| (self.train_ids[r].clone(), self.slot_ids[c].clone()))
            .collect()
    }

    /// 转换为展示视图 (INF 单元格为 None)
    pub fn to_view(&self) -> CostMatrixView {
        let costs = self
            .costs
            .iter()
            .map(|row| {
                row.iter()
                    .map(|&c| if is_effectively_infeasible(c) { None } else { Some(c) })
                    .collect()
            })
            .collect();

        CostMatrixView {
            trains: self.train_ids.clone(),
            slots: self.slot_ids.clone(),
            costs,
        }
    }
}

// ==========================================
// CostMatrixView - 展示视图
// ==========================================
// 序列化时不可行单元格为 null
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostMatrixView {
    pub trains: Vec<String>,
    pub slots: Vec<String>,
    pub costs: Vec<Vec<Option<f64>>>,
}

/// 按 train_id 首次出现去重,保持输入顺序
pub(crate) fn dedup_trains(trains: &[TrainRecord]) -> Vec<&TrainRecord> {
    let mut seen = HashSet::new();
    trains
        .iter()
        .filter(|t| seen.insert(t.train_id.as_str()))
        .collect()
}

// ==========================================
// CostMatrixBuilder - 代价矩阵构建器
// ==========================================
pub struct CostMatrixBuilder<'a> {
    model: &'a CostModel,
}

impl<'a> CostMatrixBuilder<'a> {
    pub fn new(model: &'a CostModel) -> Self {
        Self { model }
    }

    /// 构建完整代价矩阵
    ///
    /// # 错误
    /// - 列车或股道为空 → EmptyInput
    pub fn build(&self, trains: &[TrainRecord], slots: &[SlotRecord]) -> PlannerResult<CostMatrix> {
        let rows = dedup_trains(trains);
        if rows.is_empty() {
            return Err(PlannerError::EmptyInput("列车列表为空".to_string()));
        }
        if slots.is_empty() {
            return Err(PlannerError::EmptyInput("股道列表为空".to_string()));
        }

        let mut costs = Vec::with_capacity(rows.len());
        let mut overflow = Vec::new();

        for (r, train) in rows.iter().enumerate() {
            let mut row = Vec::with_capacity(slots.len());
            for (c, slot) in slots.iter().enumerate() {
                let breakdown = self.model.breakdown(train, slot);
                if breakdown.overflow {
                    overflow.push((r, c));
                }
                row.push(breakdown.cost);
            }
            costs.push(row);
        }

        debug!(rows = rows.len(), cols = slots.len(), "代价矩阵构建完成");

        Ok(CostMatrix {
            train_ids: rows.iter().map(|t| t.train_id.clone()).collect(),
            slot_ids: slots.iter().map(|s| s.slot_id.clone()).collect(),
            costs,
            overflow,
        })
    }
}
