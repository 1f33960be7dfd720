// ==========================================
// 列车入段排位系统 - 列车领域模型
// ==========================================
// 依据: 入段排位规则 - 列车就绪事实
// 数据来源: job_card / certificate_validity / cleaning_roster / mileage 四张表
// 红线: 任一表缺行时按最坏情况处理,不报错
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// 原始表行 (Source Rows)
// ==========================================

/// 作业卡行 (job_card)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobCardRow {
    pub train_id: String, // 列车编号
    pub blocked: bool,    // 是否扣车
}

/// 证书有效性行 (certificate_validity)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CertificateRow {
    pub train_id: String,
    pub brake_test_valid: bool, // 制动试验
    pub pto_valid: bool,        // PTO 证书
    pub atp_valid: bool,        // ATP 证书
}

impl CertificateRow {
    /// 三项证书是否全部有效
    pub fn all_valid(&self) -> bool {
        self.brake_test_valid && self.pto_valid && self.atp_valid
    }
}

/// 保洁排班行 (cleaning_roster)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleaningRow {
    pub train_id: String,
    pub cleaning_done: bool, // 是否已完成保洁
}

/// 走行里程行 (mileage)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MileageRow {
    pub train_id: String,
    pub mileage_km: f64, // 累计走行公里
}

// ==========================================
// TrainRecord - 列车就绪事实
// ==========================================
// 每个分表一个 Option: None 表示该表没有这列车的行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainRecord {
    pub train_id: String,

    // ===== 分表事实 =====
    pub job_card: Option<JobCardRow>,
    pub certificates: Option<CertificateRow>,
    pub cleaning: Option<CleaningRow>,
    pub mileage: Option<MileageRow>,
}

impl TrainRecord {
    /// 构造四表齐全的列车记录
    pub fn complete(
        train_id: &str,
        blocked: bool,
        certificates_valid: [bool; 3],
        cleaning_done: bool,
        mileage_km: f64,
    ) -> Self {
        let id = train_id.to_string();
        let [brake_test_valid, pto_valid, atp_valid] = certificates_valid;
        Self {
            train_id: id.clone(),
            job_card: Some(JobCardRow {
                train_id: id.clone(),
                blocked,
            }),
            certificates: Some(CertificateRow {
                train_id: id.clone(),
                brake_test_valid,
                pto_valid,
                atp_valid,
            }),
            cleaning: Some(CleaningRow {
                train_id: id.clone(),
                cleaning_done,
            }),
            mileage: Some(MileageRow {
                train_id: id,
                mileage_km,
            }),
        }
    }

    /// 构造完全缺失数据的列车记录
    pub fn missing(train_id: &str) -> Self {
        Self {
            train_id: train_id.to_string(),
            job_card: None,
            certificates: None,
            cleaning: None,
            mileage: None,
        }
    }

    /// 就绪判定所需的三张表是否齐全 (作业卡/证书/保洁)
    ///
    /// 里程缺失不影响可行性,只影响里程罚分
    pub fn has_readiness_data(&self) -> bool {
        self.job_card.is_some() && self.certificates.is_some() && self.cleaning.is_some()
    }

    /// 是否扣车 (作业卡缺失视为扣车)
    pub fn is_blocked(&self) -> bool {
        self.job_card.as_ref().map_or(true, |row| row.blocked)
    }

    /// 三项证书是否全部有效 (证书缺失视为无效)
    pub fn certificates_valid(&self) -> bool {
        self.certificates.as_ref().map_or(false, CertificateRow::all_valid)
    }

    /// 是否已完成保洁 (保洁缺失视为未完成)
    pub fn cleaning_done(&self) -> bool {
        self.cleaning.as_ref().map_or(false, |row| row.cleaning_done)
    }

    /// 累计走行公里 (缺失返回 None)
    pub fn mileage_km(&self) -> Option<f64> {
        self.mileage.as_ref().map(|row| row.mileage_km)
    }
}
