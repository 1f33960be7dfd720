// ==========================================
// 列车入段排位系统 - 入段排位 API
// ==========================================
// 职责: 列车/股道查询、选定列车求解、代价矩阵、单对诊断
// 红线: 每次调用重新读取源表,不跨调用缓存
// ==========================================

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::api::error::{ApiError, ApiResult};
use crate::config::weights::WeightVector;
use crate::domain::assignment::InductionPlan;
use crate::domain::slot::SlotRecord;
use crate::domain::snapshot::{FleetSnapshot, SourceTables};
use crate::domain::train::TrainRecord;
use crate::engine::cost_matrix::{CostMatrixBuilder, CostMatrixView};
use crate::engine::cost_model::CostModel;
use crate::engine::error::PlannerError;
use crate::engine::explain::ExplanationEngine;
use crate::engine::planner::InductionPlanner;
use crate::importer::error::ImportResult;
use crate::importer::table_loader::TableLoader;

// ==========================================
// TableSource Trait
// ==========================================
// 用途: 源表供给 (目录文件 / 内存表)
pub trait TableSource: Send + Sync {
    fn load_tables(&self) -> ImportResult<SourceTables>;
}

impl TableSource for TableLoader {
    fn load_tables(&self) -> ImportResult<SourceTables> {
        self.load_all()
    }
}

impl TableSource for SourceTables {
    fn load_tables(&self) -> ImportResult<SourceTables> {
        Ok(self.clone())
    }
}

// ==========================================
// 请求 / 响应类型
// ==========================================

/// 求解请求
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SolveRequest {
    pub train_ids: Vec<String>,
    #[serde(default)]
    pub weights: Option<WeightVector>, // 缺省使用 API 默认权重
}

/// 代价矩阵请求
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CostMatrixRequest {
    pub train_ids: Vec<String>,
    #[serde(default)]
    pub weights: Option<WeightVector>,
}

/// 列车概览
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainOverview {
    pub train_id: String,
    pub blocked: bool,
    pub certificates_valid: bool,
    pub cleaning_done: bool,
    pub mileage_km: Option<f64>,
    pub readiness_score: u8,
    pub mileage_score: f64,
}

impl From<&TrainRecord> for TrainOverview {
    fn from(train: &TrainRecord) -> Self {
        Self {
            train_id: train.train_id.clone(),
            blocked: train.is_blocked(),
            certificates_valid: train.certificates_valid(),
            cleaning_done: train.cleaning_done(),
            mileage_km: train.mileage_km(),
            readiness_score: CostModel::readiness_risk(train),
            mileage_score: CostModel::mileage_penalty(train),
        }
    }
}

// ==========================================
// InductionApi - 入段排位 API
// ==========================================
pub struct InductionApi<S: TableSource> {
    source: Arc<S>,
    default_weights: WeightVector,
}

impl<S: TableSource> InductionApi<S> {
    /// 创建新的InductionApi实例
    pub fn new(source: Arc<S>, default_weights: WeightVector) -> Self {
        Self {
            source,
            default_weights,
        }
    }

    /// 每次调用重新读取源表并建立快照
    fn snapshot(&self) -> ApiResult<FleetSnapshot> {
        let tables = self.source.load_tables()?;
        Ok(FleetSnapshot::from_tables(&tables))
    }

    /// 按请求裁剪快照
    ///
    /// # 错误
    /// - train_ids 为空 → InvalidInput
    /// - 请求的列车均不存在 → NotFound
    fn selected_snapshot(&self, train_ids: &[String]) -> ApiResult<FleetSnapshot> {
        if train_ids.is_empty() {
            return Err(ApiError::InvalidInput("未选择任何列车".to_string()));
        }

        let selected = self.snapshot()?.select(train_ids);
        if selected.is_empty() {
            return Err(ApiError::NotFound(format!("未找到有效列车: {:?}", train_ids)));
        }
        debug!(requested = train_ids.len(), selected = selected.trains().len(), "列车选择完成");
        Ok(selected)
    }

    fn lookup<'a>(
        snapshot: &'a FleetSnapshot,
        train_id: &str,
        slot_id: &str,
    ) -> ApiResult<(&'a TrainRecord, &'a SlotRecord)> {
        let train = snapshot
            .train(train_id)
            .ok_or_else(|| PlannerError::UnknownTrain(train_id.to_string()))?;
        let slot = snapshot
            .slot(slot_id)
            .ok_or_else(|| PlannerError::UnknownSlot(slot_id.to_string()))?;
        Ok((train, slot))
    }

    // ==========================================
    // 查询
    // ==========================================

    /// 列车概览 (作业卡表顺序)
    pub fn list_trains(&self) -> ApiResult<Vec<TrainOverview>> {
        let snapshot = self.snapshot()?;
        Ok(snapshot.trains().iter().map(TrainOverview::from).collect())
    }

    /// 股道列表 (股道表顺序)
    pub fn list_slots(&self) -> ApiResult<Vec<SlotRecord>> {
        Ok(self.snapshot()?.slots().to_vec())
    }

    // ==========================================
    // 求解
    // ==========================================

    /// 对选定列车求解入段方案
    pub fn solve(&self, request: &SolveRequest) -> ApiResult<InductionPlan> {
        let snapshot = self.selected_snapshot(&request.train_ids)?;
        let weights = request.weights.unwrap_or(self.default_weights);

        let plan = InductionPlanner::plan(&snapshot, weights)?;
        info!(
            assigned = plan.summary.assigned,
            unassigned = plan.summary.unassigned,
            "API 求解完成"
        );
        Ok(plan)
    }

    /// 选定列车的代价矩阵 (不可行单元格为 null)
    pub fn cost_matrix(&self, request: &CostMatrixRequest) -> ApiResult<CostMatrixView> {
        let snapshot = self.selected_snapshot(&request.train_ids)?;
        let model = CostModel::new(request.weights.unwrap_or(self.default_weights))?;

        let matrix = CostMatrixBuilder::new(&model).build(snapshot.trains(), snapshot.slots())?;
        Ok(matrix.to_view())
    }

    // ==========================================
    // 单对诊断
    // ==========================================

    /// (列车, 股道) 不可行原因
    pub fn infeasibility_reasons(&self, train_id: &str, slot_id: &str) -> ApiResult<Vec<String>> {
        let snapshot = self.snapshot()?;
        let (train, slot) = Self::lookup(&snapshot, train_id, slot_id)?;
        Ok(ExplanationEngine::infeasibility_reasons(train, slot))
    }

    /// (列车, 股道) 解释
    pub fn explain(&self, train_id: &str, slot_id: &str) -> ApiResult<String> {
        let snapshot = self.snapshot()?;
        let (train, slot) = Self::lookup(&snapshot, train_id, slot_id)?;
        Ok(ExplanationEngine::explain(train, slot))
    }
}
