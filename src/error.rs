#[derive(Debug, thiserror::Error)]
pub enum SummaryError {
    #[error("DuckDB error: {0}")]
    DuckDb(#[from] duckdb::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Schema mismatch in {dataset}: {message}")]
    Schema { dataset: String, message: String },

    #[error("Parse error in {dataset} line {line}, column {column}: expected {expected}, got {value:?}")]
    Parse {
        dataset: String,
        line: u64,
        column: String,
        value: String,
        expected: &'static str,
    },

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, SummaryError>;
