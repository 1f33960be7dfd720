// ==========================================
// 列车入段排位系统 - 领域类型定义
// ==========================================
// 依据: 入段排位规则 - 股道角色 (Service / Standby / IBL)
// 红线: 角色比较一律大小写不敏感 (按小写键比较)
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

// ==========================================
// 股道角色 (Slot Role)
// ==========================================
// 序列化格式: 规范显示名 (Service / Standby / IBL),未知角色保留原值
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SlotRole {
    Service, // 正线运营
    Standby, // 备用
    Ibl,     // 检修库 (Inspection Bay Line)
    Other {
        raw: String, // 去空白后的原值 (用于展示)
        key: String, // 小写键 (用于比较)
    },
}

impl SlotRole {
    /// 解析角色字符串
    ///
    /// # 规则
    /// - 去除首尾空白后转小写再比较
    /// - service / standby / ibl 之外的值归入 Other
    pub fn parse(raw: &str) -> Self {
        let normalized = raw.trim().to_lowercase();
        match normalized.as_str() {
            "service" => SlotRole::Service,
            "standby" => SlotRole::Standby,
            "ibl" => SlotRole::Ibl,
            _ => SlotRole::Other {
                raw: raw.trim().to_string(),
                key: normalized,
            },
        }
    }

    /// 小写规范键 (用于比较与查表)
    pub fn as_key(&self) -> &str {
        match self {
            SlotRole::Service => "service",
            SlotRole::Standby => "standby",
            SlotRole::Ibl => "ibl",
            SlotRole::Other { key, .. } => key.as_str(),
        }
    }

    /// 是否为正线运营股道
    pub fn is_service(&self) -> bool {
        matches!(self, SlotRole::Service)
    }
}

impl fmt::Display for SlotRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotRole::Service => write!(f, "Service"),
            SlotRole::Standby => write!(f, "Standby"),
            SlotRole::Ibl => write!(f, "IBL"),
            SlotRole::Other { raw, .. } => write!(f, "{}", raw),
        }
    }
}

impl PartialEq for SlotRole {
    fn eq(&self, other: &Self) -> bool {
        self.as_key() == other.as_key()
    }
}

impl Eq for SlotRole {}

impl Hash for SlotRole {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_key().hash(state);
    }
}

impl From<String> for SlotRole {
    fn from(raw: String) -> Self {
        SlotRole::parse(&raw)
    }
}

impl From<&str> for SlotRole {
    fn from(raw: &str) -> Self {
        SlotRole::parse(raw)
    }
}

impl From<SlotRole> for String {
    fn from(role: SlotRole) -> Self {
        role.to_string()
    }
}

// ==========================================
// 数据源表 (Source Table)
// ==========================================
// 用于标识缺失记录所在的表
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceTable {
    JobCard,             // 作业卡 (扣车状态)
    CertificateValidity, // 证书有效性
    CleaningRoster,      // 保洁排班
    Mileage,             // 走行里程
    InductionSlots,      // 入段股道
}

impl SourceTable {
    /// 全部数据源表 (固定顺序)
    pub const ALL: [SourceTable; 5] = [
        SourceTable::JobCard,
        SourceTable::CertificateValidity,
        SourceTable::CleaningRoster,
        SourceTable::Mileage,
        SourceTable::InductionSlots,
    ];

    /// 表名 (与数据文件名一致)
    pub fn table_name(&self) -> &'static str {
        match self {
            SourceTable::JobCard => "job_card",
            SourceTable::CertificateValidity => "certificate_validity",
            SourceTable::CleaningRoster => "cleaning_roster",
            SourceTable::Mileage => "mileage",
            SourceTable::InductionSlots => "induction_slots",
        }
    }
}

impl fmt::Display for SourceTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.table_name())
    }
}
