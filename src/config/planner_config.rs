use crate::config::weights::WeightVector;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

/// 入段排位运行配置（持久化对象）
///
/// 存储位置：JSON 配置文件（字段缺省时使用默认值）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// 五张数据表所在目录
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// 代价权重
    #[serde(default)]
    pub weights: WeightVector,

    /// 仅对这些列车求解（为空则全部列车）
    #[serde(default)]
    pub selected_trains: Vec<String>,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            weights: WeightVector::default(),
            selected_trains: Vec::new(),
        }
    }
}
