// ==========================================
// 列车入段排位系统 - 配置层
// ==========================================
// 职责: 权重与运行配置,支持文件 + 环境变量覆写
// 红线: 配置作为值传入每次调用,不使用全局默认权重
// ==========================================

pub mod config_manager;
pub mod planner_config;
pub mod weights;

// 重导出核心配置类型
pub use config_manager::{config_keys, ConfigError, ConfigManager};
pub use planner_config::PlannerConfig;
pub use weights::WeightVector;
