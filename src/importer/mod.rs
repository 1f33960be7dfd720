// ==========================================
// 列车入段排位系统 - 导入层
// ==========================================
// 职责: 外部表格导入,生成类型化源表
// 支持: Excel, CSV
// ==========================================

pub mod error;
pub mod file_parser;
pub mod table_loader;

// 重导出核心类型
pub use error::{ImportError, ImportResult};
pub use file_parser::{CsvParser, ExcelParser, FileParser, RawRecord, RawTable, UniversalFileParser};
pub use table_loader::{parse_bool, required_columns, validate_basic_schema, TableLoader};
