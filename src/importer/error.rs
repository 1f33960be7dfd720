// ==========================================
// 列车入段排位系统 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件格式不支持: {0}（仅支持 .xlsx/.xls/.csv）")]
    UnsupportedFormat(String),

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    #[error("Excel 解析失败: {0}")]
    ExcelParseError(String),

    #[error("CSV 解析失败: {0}")]
    CsvParseError(String),

    // ===== 表结构错误 =====
    #[error("数据目录中缺少表 {table}（期望 {table}.csv / .xlsx / .xls）")]
    TableNotFound { table: String },

    #[error("表 {table} 缺少必填列: {columns:?}")]
    MissingColumns { table: String, columns: Vec<String> },

    // ===== 数据转换错误 =====
    #[error("类型转换失败 (表 {table}, 行 {row}, 字段 {field}): 无法解析 {value}")]
    TypeConversionError {
        table: String,
        row: usize,
        field: String,
        value: String,
    },

    #[error("主键缺失 (表 {table}, 行 {row})")]
    PrimaryKeyMissing { table: String, row: usize },

    // ===== 通用错误 =====
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

// 实现 From<csv::Error>
impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

// 实现 From<calamine::Error>
impl From<calamine::Error> for ImportError {
    fn from(err: calamine::Error) -> Self {
        ImportError::ExcelParseError(err.to_string())
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
