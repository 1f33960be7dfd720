// ==========================================
// 列车入段排位系统 - 数据快照
// ==========================================
// 依据: 入段排位规则 - 五表输入 (作业卡/证书/保洁/里程/股道)
// 职责: 将五张原始表整理为按 train_id / slot_id 索引的只读快照
// 红线: 每次求解独立构建,不跨调用缓存
// ==========================================

use crate::domain::slot::SlotRecord;
use crate::domain::train::{CertificateRow, CleaningRow, JobCardRow, MileageRow, TrainRecord};
use crate::domain::types::SourceTable;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use tracing::{debug, warn};

// ==========================================
// SourceTables - 原始五表
// ==========================================
// 由导入层产出,已完成必填列校验
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceTables {
    pub job_card: Vec<JobCardRow>,
    pub certificate_validity: Vec<CertificateRow>,
    pub cleaning_roster: Vec<CleaningRow>,
    pub mileage: Vec<MileageRow>,
    pub induction_slots: Vec<SlotRecord>,
}

// ==========================================
// MissingRecord - 缺失记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingRecord {
    pub train_id: String,
    pub table: SourceTable,
}

// ==========================================
// DataIssue - 降级事件
// ==========================================
// 不中断求解: 缺失记录按最坏情况处理,非有限代价替换为 INF
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DataIssue {
    MissingRecord { train_id: String, table: SourceTable },
    NumericOverflow { train_id: String, slot_id: String },
}

impl From<&MissingRecord> for DataIssue {
    fn from(record: &MissingRecord) -> Self {
        DataIssue::MissingRecord {
            train_id: record.train_id.clone(),
            table: record.table,
        }
    }
}

impl fmt::Display for DataIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataIssue::MissingRecord { train_id, table } => {
                write!(f, "缺失记录: train_id={}, table={}", train_id, table)
            }
            DataIssue::NumericOverflow { train_id, slot_id } => {
                write!(f, "代价溢出: train_id={}, slot_id={}", train_id, slot_id)
            }
        }
    }
}

// ==========================================
// FleetSnapshot - 索引化快照
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct FleetSnapshot {
    trains: Vec<TrainRecord>,
    slots: Vec<SlotRecord>,
    train_index: HashMap<String, usize>,
    slot_index: HashMap<String, usize>,
    missing: Vec<MissingRecord>,
}

/// 取每个 train_id 的首行
fn first_rows<'a, T, F>(rows: &'a [T], key: F) -> HashMap<&'a str, &'a T>
where
    F: Fn(&'a T) -> &'a str,
{
    let mut index = HashMap::new();
    for row in rows {
        index.entry(key(row)).or_insert(row);
    }
    index
}

impl FleetSnapshot {
    /// 从原始五表构建快照
    ///
    /// # 规则
    /// - 列车全集 = 作业卡表中的 train_id (按首次出现顺序去重)
    /// - 其余三表按 train_id 取首行,缺行记为 MissingRecord
    /// - 股道按表顺序排列,重复 slot_id 只保留首行
    pub fn from_tables(tables: &SourceTables) -> Self {
        let certs = first_rows(&tables.certificate_validity, |r| r.train_id.as_str());
        let cleaning = first_rows(&tables.cleaning_roster, |r| r.train_id.as_str());
        let mileage = first_rows(&tables.mileage, |r| r.train_id.as_str());

        let mut trains = Vec::new();
        let mut seen = HashSet::new();
        for job in &tables.job_card {
            if !seen.insert(job.train_id.as_str()) {
                continue;
            }
            let id = job.train_id.as_str();
            trains.push(TrainRecord {
                train_id: job.train_id.clone(),
                job_card: Some(job.clone()),
                certificates: certs.get(id).map(|r| (*r).clone()),
                cleaning: cleaning.get(id).map(|r| (*r).clone()),
                mileage: mileage.get(id).map(|r| (*r).clone()),
            });
        }

        let snapshot = Self::new(trains, tables.induction_slots.clone());
        debug!(
            trains = snapshot.trains.len(),
            slots = snapshot.slots.len(),
            missing = snapshot.missing.len(),
            "快照构建完成"
        );
        snapshot
    }

    /// 直接由已解析记录构建快照
    ///
    /// 列车按 train_id 去重保留首次出现,股道按 slot_id 去重保留首次出现
    pub fn new(trains: Vec<TrainRecord>, slots: Vec<SlotRecord>) -> Self {
        let mut snapshot = Self::default();

        for train in trains {
            if snapshot.train_index.contains_key(&train.train_id) {
                warn!(train_id = %train.train_id, "重复 train_id,忽略后续记录");
                continue;
            }
            snapshot.missing.extend(Self::missing_tables(&train));
            snapshot
                .train_index
                .insert(train.train_id.clone(), snapshot.trains.len());
            snapshot.trains.push(train);
        }

        for slot in slots {
            if snapshot.slot_index.contains_key(&slot.slot_id) {
                warn!(slot_id = %slot.slot_id, "重复 slot_id,忽略后续记录");
                continue;
            }
            snapshot
                .slot_index
                .insert(slot.slot_id.clone(), snapshot.slots.len());
            snapshot.slots.push(slot);
        }

        for record in &snapshot.missing {
            warn!(train_id = %record.train_id, table = %record.table, "列车缺少分表记录,按最坏情况处理");
        }

        snapshot
    }

    /// 列车缺失的分表
    fn missing_tables(train: &TrainRecord) -> Vec<MissingRecord> {
        let present = [
            (SourceTable::JobCard, train.job_card.is_some()),
            (SourceTable::CertificateValidity, train.certificates.is_some()),
            (SourceTable::CleaningRoster, train.cleaning.is_some()),
            (SourceTable::Mileage, train.mileage.is_some()),
        ];
        present
            .into_iter()
            .filter(|(_, ok)| !ok)
            .map(|(table, _)| MissingRecord {
                train_id: train.train_id.clone(),
                table,
            })
            .collect()
    }

    /// 按请求的 train_id 子集裁剪快照
    ///
    /// # 规则
    /// - 保持快照内的原有列车顺序 (不是请求顺序)
    /// - 请求中不存在的 train_id 被忽略
    /// - 股道不受影响
    pub fn select(&self, train_ids: &[String]) -> Self {
        let wanted: HashSet<&str> = train_ids.iter().map(String::as_str).collect();
        let trains = self
            .trains
            .iter()
            .filter(|t| wanted.contains(t.train_id.as_str()))
            .cloned()
            .collect();
        Self::new(trains, self.slots.clone())
    }

    // ==========================================
    // 查询
    // ==========================================

    pub fn trains(&self) -> &[TrainRecord] {
        &self.trains
    }

    pub fn slots(&self) -> &[SlotRecord] {
        &self.slots
    }

    pub fn train(&self, train_id: &str) -> Option<&TrainRecord> {
        self.train_index.get(train_id).map(|&i| &self.trains[i])
    }

    pub fn slot(&self, slot_id: &str) -> Option<&SlotRecord> {
        self.slot_index.get(slot_id).map(|&i| &self.slots[i])
    }

    /// 缺失分表记录清单
    pub fn missing_records(&self) -> &[MissingRecord] {
        &self.missing
    }

    pub fn is_empty(&self) -> bool {
        self.trains.is_empty()
    }
}
