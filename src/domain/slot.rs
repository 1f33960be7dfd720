// ==========================================
// 列车入段排位系统 - 入段股道领域模型
// ==========================================
// 数据来源: induction_slots 表
// ==========================================

use crate::domain::types::SlotRole;
use serde::{Deserialize, Serialize};

// ==========================================
// SlotRecord - 入段股道
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotRecord {
    pub slot_id: String,             // 股道编号
    pub role: SlotRole,              // 股道角色
    pub shunt_distance: Option<f64>, // 调车距离 (缺失或非数值时为 None)
}

impl SlotRecord {
    pub fn new(slot_id: &str, role: &str, shunt_distance: Option<f64>) -> Self {
        Self {
            slot_id: slot_id.to_string(),
            role: SlotRole::parse(role),
            shunt_distance,
        }
    }
}
