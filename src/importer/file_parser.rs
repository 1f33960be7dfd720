// ==========================================
// 列车入段排位系统 - 文件解析器实现
// ==========================================
// 支持: Excel (.xlsx/.xls) / CSV (.csv)
// 输出: 表头 + 原始行记录 (列名 → 字符串值)
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use calamine::{open_workbook_auto, Reader};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

// ==========================================
// RawTable - 原始表
// ==========================================
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub records: Vec<RawRecord>,
}

/// 原始行记录
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    pub row: usize, // 文件内行号 (表头为第 1 行)
    pub fields: HashMap<String, String>,
}

impl RawRecord {
    /// 取字段值 (缺列或空白返回 None)
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields
            .get(field)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }
}

impl RawTable {
    fn from_rows<I>(headers: Vec<String>, rows: I) -> Self
    where
        I: IntoIterator<Item = Vec<String>>,
    {
        let mut records = Vec::new();
        for (idx, values) in rows.into_iter().enumerate() {
            let mut fields = HashMap::new();
            for (col_idx, value) in values.into_iter().enumerate() {
                if let Some(header) = headers.get(col_idx) {
                    fields.insert(header.clone(), value.trim().to_string());
                }
            }

            // 跳过完全空白的行
            if fields.values().all(|v| v.is_empty()) {
                continue;
            }

            records.push(RawRecord { row: idx + 2, fields });
        }
        Self { headers, records }
    }
}

// ==========================================
// FileParser Trait
// ==========================================
pub trait FileParser: Send + Sync {
    /// 解析文件为表头 + 原始行记录
    fn parse(&self, file_path: &Path) -> ImportResult<RawTable>;
}

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

impl FileParser for CsvParser {
    fn parse(&self, path: &Path) -> ImportResult<RawTable> {
        // 检查文件存在
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        // 检查扩展名
        if let Some(ext) = path.extension() {
            if !ext.eq_ignore_ascii_case("csv") {
                return Err(ImportError::UnsupportedFormat(ext.to_string_lossy().to_string()));
            }
        }

        let file = File::open(path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(file);

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().trim_start_matches('\u{feff}').to_string())
            .collect();

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        Ok(RawTable::from_rows(headers, rows))
    }
}

// ==========================================
// Excel Parser 实现
// ==========================================
pub struct ExcelParser;

impl FileParser for ExcelParser {
    fn parse(&self, path: &Path) -> ImportResult<RawTable> {
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();
        if ext != "xlsx" && ext != "xls" {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        let mut workbook = open_workbook_auto(path)?;

        // 读取第一个 sheet
        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| ImportError::ExcelParseError("Excel 文件无工作表".to_string()))?;
        let range = workbook.worksheet_range(&sheet_name)?;

        // 提取表头（第一行）
        let mut rows = range.rows();
        let header_row = rows
            .next()
            .ok_or_else(|| ImportError::ExcelParseError("Excel 文件无表头行".to_string()))?;
        let headers: Vec<String> = header_row
            .iter()
            .map(|cell| cell.to_string().trim().to_string())
            .collect();

        let data_rows = rows.map(|row| row.iter().map(|cell| cell.to_string()).collect());
        Ok(RawTable::from_rows(headers, data_rows))
    }
}

// ==========================================
// 通用文件解析器（根据扩展名自动选择）
// ==========================================
pub struct UniversalFileParser;

impl UniversalFileParser {
    pub fn parse<P: AsRef<Path>>(&self, file_path: P) -> ImportResult<RawTable> {
        let path = file_path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "csv" => CsvParser.parse(path),
            "xlsx" | "xls" => ExcelParser.parse(path),
            _ => Err(ImportError::UnsupportedFormat(ext)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_csv_parser_valid_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "train_id,blocked").unwrap();
        writeln!(temp_file, "T1,0").unwrap();
        writeln!(temp_file, " T2 , 1 ").unwrap();

        let table = CsvParser.parse(temp_file.path()).unwrap();

        assert_eq!(table.headers, vec!["train_id", "blocked"]);
        assert_eq!(table.records.len(), 2);
        assert_eq!(table.records[0].get("train_id"), Some("T1"));
        assert_eq!(table.records[1].get("blocked"), Some("1"));
        assert_eq!(table.records[1].row, 3);
    }

    #[test]
    fn test_csv_parser_file_not_found() {
        let result = CsvParser.parse(Path::new("non_existent.csv"));
        assert!(matches!(result, Err(ImportError::FileNotFound(_))));
    }

    #[test]
    fn test_csv_parser_skip_empty_rows() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "train_id,mileage_km").unwrap();
        writeln!(temp_file, "T1,1000").unwrap();
        writeln!(temp_file, ",").unwrap(); // 空行
        writeln!(temp_file, "T2,2000").unwrap();

        let table = CsvParser.parse(temp_file.path()).unwrap();

        // 应跳过空行,行号保持文件内位置
        assert_eq!(table.records.len(), 2);
        assert_eq!(table.records[1].row, 4);
    }

    #[test]
    fn test_header_only_file_keeps_headers() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "slot_id,role,shunt_distance").unwrap();

        let table = CsvParser.parse(temp_file.path()).unwrap();
        assert_eq!(table.headers.len(), 3);
        assert!(table.records.is_empty());
    }

    #[test]
    fn test_blank_value_reads_as_none() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "slot_id,role,shunt_distance").unwrap();
        writeln!(temp_file, "S1,Service,").unwrap();

        let table = CsvParser.parse(temp_file.path()).unwrap();
        assert_eq!(table.records[0].get("shunt_distance"), None);
    }

    #[test]
    fn test_universal_rejects_unknown_extension() {
        let result = UniversalFileParser.parse("tables/job_card.json");
        assert!(matches!(result, Err(ImportError::UnsupportedFormat(_))));
    }
}
