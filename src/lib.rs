//! Vendor sales summary.
//!
//! Loads purchase, reference price, sale and freight CSV files into a DuckDB
//! database, aggregates them into one row per vendor/brand purchase group,
//! derives profitability ratios and writes the result to
//! `vendor_sales_summary`.
//!
//! # Quick start
//!
//! ```no_run
//! use vendor_summary::VendorSummaryPipeline;
//!
//! let pipeline = VendorSummaryPipeline::builder()
//!     .database("inventory.db")
//!     .data_dir("data")
//!     .build()
//!     .unwrap();
//!
//! let report = pipeline.run().unwrap();
//! println!("{} summary rows", report.summary_rows);
//! pipeline.close().unwrap();
//! ```

pub mod config;
pub mod derive;
pub mod error;
pub mod loader;
pub mod models;
pub mod queries;
pub mod reader;
pub mod schema;
pub mod sql_builder;
pub mod store;
pub mod summary;

pub use derive::derive;
pub use error::{Result, SummaryError};
pub use loader::{load_sources, LoadOutcome};
pub use models::{RawVendorSummary, VendorSummary};
pub use sql_builder::SqlBuilder;
pub use store::Store;
pub use summary::build_summary;

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

// ---------------------------------------------------------------------------
// VendorSummaryPipelineBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`VendorSummaryPipeline`].
pub struct VendorSummaryPipelineBuilder {
    database: Option<PathBuf>,
    data_dir: PathBuf,
}

impl Default for VendorSummaryPipelineBuilder {
    fn default() -> Self {
        Self {
            database: Some(PathBuf::from(config::DEFAULT_DB_PATH)),
            data_dir: PathBuf::from(config::DEFAULT_DATA_DIR),
        }
    }
}

impl VendorSummaryPipelineBuilder {
    /// Use a database file. Created if it does not exist.
    pub fn database<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.database = Some(path.as_ref().to_path_buf());
        self
    }

    /// Use a throwaway in-memory database.
    pub fn in_memory(mut self) -> Self {
        self.database = None;
        self
    }

    /// Directory holding the source CSV files. Defaults to the working directory.
    pub fn data_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.data_dir = path.as_ref().to_path_buf();
        self
    }

    /// Apply a [`PipelineConfig`](config::PipelineConfig).
    pub fn config(self, config: &config::PipelineConfig) -> Self {
        self.database(&config.database).data_dir(&config.data_dir)
    }

    /// Open the store. Nothing is read or written until [`VendorSummaryPipeline::run`].
    pub fn build(self) -> Result<VendorSummaryPipeline> {
        let store = match &self.database {
            Some(path) => Store::open(path)?,
            None => Store::open_in_memory()?,
        };
        Ok(VendorSummaryPipeline {
            store,
            database: self.database,
            data_dir: self.data_dir,
        })
    }
}

// ---------------------------------------------------------------------------
// VendorSummaryPipeline
// ---------------------------------------------------------------------------

/// Result of one pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub loaded: Vec<LoadOutcome>,
    pub summary_rows: usize,
}

/// Owns the store for one batch run: load, summarize, derive, persist.
pub struct VendorSummaryPipeline {
    store: Store,
    database: Option<PathBuf>,
    data_dir: PathBuf,
}

impl VendorSummaryPipeline {
    pub fn builder() -> VendorSummaryPipelineBuilder {
        VendorSummaryPipelineBuilder::default()
    }

    /// Run every stage in order and stop at the first error.
    ///
    /// Stages already completed are not rolled back.
    pub fn run(&self) -> Result<RunReport> {
        info!(data_dir = %self.data_dir.display(), "Loading CSV data into database...");
        let loaded = load_sources(&self.store, &self.data_dir)?;

        info!("Creating Vendor Summary...");
        let raw = queries::SummaryQuery::new(&self.store).build()?;
        for row in raw.iter().take(5) {
            debug!(?row, "Raw summary row");
        }

        info!(rows = raw.len(), "Cleaning Data...");
        let summary = derive(raw)?;
        for row in summary.iter().take(5) {
            debug!(?row, "Derived summary row");
        }

        info!(table = config::SUMMARY_TABLE, "Ingesting Data into vendor_sales_summary table...");
        self.store
            .persist(config::SUMMARY_TABLE, &VendorSummary::to_table(&summary))?;
        info!(rows = summary.len(), "Ingestion complete.");

        Ok(RunReport {
            loaded,
            summary_rows: summary.len(),
        })
    }

    /// Read the persisted summary back, in stored order.
    pub fn summary(&self) -> Result<Vec<VendorSummary>> {
        let (sql, params) = SqlBuilder::new(config::SUMMARY_TABLE).build();
        self.store.execute_into(&sql, &params)
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Close the database connection.
    pub fn close(self) -> Result<()> {
        self.store.close()
    }
}

impl fmt::Display for VendorSummaryPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let database = self
            .database
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| ":memory:".to_string());
        write!(
            f,
            "VendorSummaryPipeline(database={}, data_dir={})",
            database,
            self.data_dir.display()
        )
    }
}
