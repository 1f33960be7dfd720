// ==========================================
// 列车入段排位系统 - 核心库
// ==========================================
// 系统定位: 决策支持系统 (人工最终控制权)
// 数据流: 源表 → 快照 → 可行性 → 代价 → 代价矩阵 → 指派求解 → 解释
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 排位规则与求解
pub mod engine;

// 导入层 - 外部表格
pub mod importer;

// 配置层 - 权重与运行配置
pub mod config;

// 日志系统
pub mod logging;

// API 层 - 业务接口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{SlotRole, SourceTable};

// 领域实体
pub use domain::{
    Assignment, AssignmentDetail, DataIssue, FleetSnapshot, InductionPlan, PlanSummary,
    SlotRecord, SourceTables, TrainRecord,
};

// 配置
pub use config::{ConfigManager, PlannerConfig, WeightVector};

// 引擎
pub use engine::{
    AssignmentSolver, CostMatrixBuilder, CostModel, ExplanationEngine, FeasibilityEvaluator,
    InductionPlanner, PlannerError, INF,
};

// 导入
pub use importer::{ImportError, TableLoader};

// API
pub use api::{ApiError, InductionApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "列车入段排位系统";
