use std::env;
use std::path::PathBuf;

/// Table the derived summary is written to on every run.
pub const SUMMARY_TABLE: &str = "vendor_sales_summary";

pub const DEFAULT_DB_PATH: &str = "inventory.db";
pub const DEFAULT_DATA_DIR: &str = ".";
pub const DEFAULT_LOG_FILE: &str = "logs/get_vendor_summary.log";

pub const DB_PATH_ENV: &str = "VENDOR_SUMMARY_DB";
pub const DATA_DIR_ENV: &str = "VENDOR_SUMMARY_DATA_DIR";
pub const LOG_FILE_ENV: &str = "LOG_FILE_PATH";

/// Source datasets and the file each one is read from, relative to the
/// data directory.
pub fn source_files() -> [(&'static str, &'static str); 4] {
    [
        ("purchases", "purchases.csv"),
        ("purchase_prices", "purchase_prices.csv"),
        ("sales", "sales.csv"),
        ("vendor_invoice", "vendor_invoice.csv"),
    ]
}

/// Process-level settings for the `vendor-summary` binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// DuckDB database file holding the source tables and the summary.
    pub database: PathBuf,
    /// Directory the source CSV files are read from.
    pub data_dir: PathBuf,
    /// Append-only log file.
    pub log_file: PathBuf,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            database: PathBuf::from(DEFAULT_DB_PATH),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

impl PipelineConfig {
    /// Read settings from the environment, falling back to the defaults for
    /// anything unset or empty.
    ///
    /// Call `dotenvy::dotenv()` first if a `.env` file should be honoured.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let pick = |key: &str, fallback: PathBuf| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or(fallback)
        };
        Self {
            database: pick(DB_PATH_ENV, defaults.database),
            data_dir: pick(DATA_DIR_ENV, defaults.data_dir),
            log_file: pick(LOG_FILE_ENV, defaults.log_file),
        }
    }
}
