// ==========================================
// 列车入段排位系统 - API层错误类型
// ==========================================
// 职责: 汇总引擎与导入层错误,转换为调用方可读的错误消息
// 红线: 所有错误信息必须包含显式原因
// ==========================================

use crate::engine::error::PlannerError;
use crate::importer::error::ImportError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 请求错误
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("资源未找到: {0}")]
    NotFound(String),

    // ==========================================
    // 下层错误
    // ==========================================
    #[error("排位计算失败: {0}")]
    Planner(#[from] PlannerError),

    #[error("源表导入失败: {0}")]
    Import(#[from] ImportError),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
