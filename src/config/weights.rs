// ==========================================
// 列车入段排位系统 - 代价权重
// ==========================================
// 红线: 权重随调用传入,不作为进程级全局状态
// ==========================================

use crate::engine::error::{PlannerError, PlannerResult};
use serde::{Deserialize, Serialize};

fn default_w_readiness() -> f64 {
    10.0
}

fn default_w_mileage() -> f64 {
    1.0
}

fn default_w_shunt() -> f64 {
    0.5
}

/// 线性代价权重 (就绪风险 / 里程罚分 / 调车代理)
///
/// 缺省字段按默认值 {10.0, 1.0, 0.5} 补齐
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightVector {
    #[serde(default = "default_w_readiness")]
    pub w_readiness: f64,

    #[serde(default = "default_w_mileage")]
    pub w_mileage: f64,

    #[serde(default = "default_w_shunt")]
    pub w_shunt: f64,
}

impl Default for WeightVector {
    fn default() -> Self {
        Self {
            w_readiness: default_w_readiness(),
            w_mileage: default_w_mileage(),
            w_shunt: default_w_shunt(),
        }
    }
}

impl WeightVector {
    pub fn new(w_readiness: f64, w_mileage: f64, w_shunt: f64) -> Self {
        Self {
            w_readiness,
            w_mileage,
            w_shunt,
        }
    }

    /// 校验权重: 必须为非负有限数
    pub fn validate(&self) -> PlannerResult<()> {
        let fields = [
            ("w_readiness", self.w_readiness),
            ("w_mileage", self.w_mileage),
            ("w_shunt", self.w_shunt),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(PlannerError::InvalidWeight { name, value });
            }
        }
        Ok(())
    }
}
