// ==========================================
// 列车入段排位系统 - API 层
// ==========================================
// 职责: 提供业务 API 接口,供服务端或命令行调用
// ==========================================

pub mod error;
pub mod induction_api;

// 重导出核心类型
pub use error::{ApiError, ApiResult};
pub use induction_api::{
    CostMatrixRequest, InductionApi, SolveRequest, TableSource, TrainOverview,
};
