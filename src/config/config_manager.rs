// ==========================================
// 列车入段排位系统 - 配置管理器
// ==========================================
// 职责: 配置加载、环境变量覆写、权重校验
// 存储: JSON 配置文件 + TRAIN_INDUCTION_* 环境变量
// ==========================================

use crate::config::planner_config::PlannerConfig;
use crate::engine::error::PlannerError;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// 配置键 (环境变量)
pub mod config_keys {
    pub const DATA_DIR: &str = "TRAIN_INDUCTION_DATA_DIR";
    pub const W_READINESS: &str = "TRAIN_INDUCTION_W_READINESS";
    pub const W_MILEAGE: &str = "TRAIN_INDUCTION_W_MILEAGE";
    pub const W_SHUNT: &str = "TRAIN_INDUCTION_W_SHUNT";
}

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败 ({path}): {message}")]
    ReadError { path: String, message: String },

    #[error("配置文件格式错误 ({path}): {message}")]
    ParseError { path: String, message: String },

    #[error("配置值格式错误 (key: {key}, value: {value})")]
    ValueError { key: String, value: String },

    #[error(transparent)]
    Invalid(#[from] PlannerError),
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager;

impl ConfigManager {
    /// 加载配置
    ///
    /// # 顺序
    /// 1. 配置文件 (path 为 None 或文件不存在时使用默认值)
    /// 2. 环境变量覆写
    /// 3. 权重校验
    pub fn load(path: Option<&Path>) -> Result<PlannerConfig, ConfigError> {
        Self::load_with(path, |key| std::env::var(key).ok())
    }

    /// 加载配置,覆写值来自 lookup 而非进程环境
    pub fn load_with<F>(path: Option<&Path>, lookup: F) -> Result<PlannerConfig, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = match path {
            Some(p) if p.exists() => Self::read_file(p)?,
            Some(p) => {
                info!(path = %p.display(), "配置文件不存在,使用默认配置");
                PlannerConfig::default()
            }
            None => PlannerConfig::default(),
        };

        let config = Self::apply_overrides(config, lookup)?;
        config.weights.validate()?;

        debug!(?config, "配置加载完成");
        Ok(config)
    }

    /// 读取 JSON 配置文件
    pub fn read_file(path: &Path) -> Result<PlannerConfig, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        serde_json::from_str(&raw).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// 应用覆写
    ///
    /// # 参数
    /// - lookup: 键 → 值 (通常是环境变量)
    pub fn apply_overrides<F>(mut config: PlannerConfig, lookup: F) -> Result<PlannerConfig, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup(config_keys::DATA_DIR).filter(|v| !v.trim().is_empty()) {
            config.data_dir = PathBuf::from(dir.trim());
        }

        let weight_slots = [
            (config_keys::W_READINESS, &mut config.weights.w_readiness),
            (config_keys::W_MILEAGE, &mut config.weights.w_mileage),
            (config_keys::W_SHUNT, &mut config.weights.w_shunt),
        ];
        for (key, slot) in weight_slots {
            if let Some(raw) = lookup(key) {
                *slot = raw.trim().parse::<f64>().map_err(|_| ConfigError::ValueError {
                    key: key.to_string(),
                    value: raw.clone(),
                })?;
            }
        }

        Ok(config)
    }
}
