// ==========================================
// 列车入段排位系统 - 五表加载器
// ==========================================
// 职责: 从数据目录读取五张源表 → 校验必填列 → 转换为类型化行
// 红线: 必填列缺失是导入错误,不进入引擎
// ==========================================

use crate::domain::slot::SlotRecord;
use crate::domain::snapshot::SourceTables;
use crate::domain::train::{CertificateRow, CleaningRow, JobCardRow, MileageRow};
use crate::domain::types::SourceTable;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::{RawRecord, RawTable, UniversalFileParser};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// 支持的扩展名 (按优先级)
const EXTENSIONS: [&str; 3] = ["csv", "xlsx", "xls"];

/// 各表必填列
pub fn required_columns(table: SourceTable) -> &'static [&'static str] {
    match table {
        SourceTable::JobCard => &["train_id", "blocked"],
        SourceTable::CertificateValidity => &["train_id", "brake_test_valid"],
        SourceTable::CleaningRoster => &["train_id", "cleaning_done"],
        SourceTable::Mileage => &["train_id", "mileage_km"],
        SourceTable::InductionSlots => &["slot_id", "role", "shunt_distance"],
    }
}

/// 校验必填列
pub fn validate_basic_schema(table: SourceTable, headers: &[String]) -> ImportResult<()> {
    let missing: Vec<String> = required_columns(table)
        .iter()
        .filter(|col| !headers.iter().any(|h| h == *col))
        .map(|col| col.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ImportError::MissingColumns {
            table: table.table_name().to_string(),
            columns: missing,
        })
    }
}

/// 解析布尔值: 1/0, true/false, yes/no, y/n (大小写不敏感)
///
/// Excel 数值单元格的 "1.0" / "0.0" 同样接受
pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        other => other.parse::<f64>().ok().and_then(|v| {
            if v == 1.0 {
                Some(true)
            } else if v == 0.0 {
                Some(false)
            } else {
                None
            }
        }),
    }
}

// ==========================================
// TableLoader - 五表加载器
// ==========================================
pub struct TableLoader {
    data_dir: PathBuf,
    parser: UniversalFileParser,
}

impl TableLoader {
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
            parser: UniversalFileParser,
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// 查找表文件 (csv 优先)
    pub fn locate(&self, table: SourceTable) -> ImportResult<PathBuf> {
        EXTENSIONS
            .iter()
            .map(|ext| self.data_dir.join(format!("{}.{}", table.table_name(), ext)))
            .find(|path| path.is_file())
            .ok_or_else(|| ImportError::TableNotFound {
                table: table.table_name().to_string(),
            })
    }

    /// 读取并校验单表
    fn read_table(&self, table: SourceTable) -> ImportResult<RawTable> {
        let path = self.locate(table)?;
        let raw = self.parser.parse(&path)?;
        validate_basic_schema(table, &raw.headers)?;
        info!(
            table = table.table_name(),
            rows = raw.records.len(),
            columns = raw.headers.len(),
            path = %path.display(),
            "源表加载完成"
        );
        Ok(raw)
    }

    /// 加载全部五表
    pub fn load_all(&self) -> ImportResult<SourceTables> {
        debug!(data_dir = %self.data_dir.display(), "开始加载源表");

        let job_card = convert_rows(SourceTable::JobCard, &self.read_table(SourceTable::JobCard)?, |r| {
            Ok(Some(JobCardRow {
                train_id: r.key("train_id")?,
                blocked: r.bool_or("blocked", false)?,
            }))
        })?;

        let certificate_validity = convert_rows(
            SourceTable::CertificateValidity,
            &self.read_table(SourceTable::CertificateValidity)?,
            |r| {
                Ok(Some(CertificateRow {
                    train_id: r.key("train_id")?,
                    brake_test_valid: r.bool_or("brake_test_valid", false)?,
                    pto_valid: r.bool_or("pto_valid", false)?,
                    atp_valid: r.bool_or("atp_valid", false)?,
                }))
            },
        )?;

        let cleaning_roster = convert_rows(
            SourceTable::CleaningRoster,
            &self.read_table(SourceTable::CleaningRoster)?,
            |r| {
                Ok(Some(CleaningRow {
                    train_id: r.key("train_id")?,
                    cleaning_done: r.bool_or("cleaning_done", false)?,
                }))
            },
        )?;

        let mileage = convert_rows(SourceTable::Mileage, &self.read_table(SourceTable::Mileage)?, |r| {
            let train_id = r.key("train_id")?;
            match r.number("mileage_km")? {
                Some(mileage_km) => Ok(Some(MileageRow { train_id, mileage_km })),
                None => {
                    warn!(train_id = %train_id, row = r.record.row, "里程为空,按缺失记录处理");
                    Ok(None)
                }
            }
        })?;

        let induction_slots = convert_rows(
            SourceTable::InductionSlots,
            &self.read_table(SourceTable::InductionSlots)?,
            |r| {
                let slot_id = r.key("slot_id")?;
                let role = r.record.get("role").unwrap_or("");
                // 调车距离非数值时回退为角色查表
                let shunt_distance = r.record.get("shunt_distance").and_then(|v| v.parse::<f64>().ok());
                Ok(Some(SlotRecord::new(&slot_id, role, shunt_distance)))
            },
        )?;

        Ok(SourceTables {
            job_card,
            certificate_validity,
            cleaning_roster,
            mileage,
            induction_slots,
        })
    }
}

// ==========================================
// 行转换辅助
// ==========================================
struct RowReader<'a> {
    table: SourceTable,
    record: &'a RawRecord,
}

impl<'a> RowReader<'a> {
    /// 主键 (空白 → PrimaryKeyMissing)
    fn key(&self, field: &str) -> ImportResult<String> {
        self.record
            .get(field)
            .map(str::to_string)
            .ok_or_else(|| ImportError::PrimaryKeyMissing {
                table: self.table.table_name().to_string(),
                row: self.record.row,
            })
    }

    /// 布尔字段 (缺列或空白取默认值)
    fn bool_or(&self, field: &str, default: bool) -> ImportResult<bool> {
        match self.record.get(field) {
            None => Ok(default),
            Some(raw) => parse_bool(raw).ok_or_else(|| self.conversion_error(field, raw)),
        }
    }

    /// 数值字段 (空白 → None)
    fn number(&self, field: &str) -> ImportResult<Option<f64>> {
        match self.record.get(field) {
            None => Ok(None),
            Some(raw) => raw
                .parse::<f64>()
                .map(Some)
                .map_err(|_| self.conversion_error(field, raw)),
        }
    }

    fn conversion_error(&self, field: &str, value: &str) -> ImportError {
        ImportError::TypeConversionError {
            table: self.table.table_name().to_string(),
            row: self.record.row,
            field: field.to_string(),
            value: value.to_string(),
        }
    }
}

fn convert_rows<T, F>(table: SourceTable, raw: &RawTable, convert: F) -> ImportResult<Vec<T>>
where
    F: Fn(&RowReader<'_>) -> ImportResult<Option<T>>,
{
    let mut rows = Vec::with_capacity(raw.records.len());
    for record in &raw.records {
        if let Some(row) = convert(&RowReader { table, record })? {
            rows.push(row);
        }
    }
    Ok(rows)
}
