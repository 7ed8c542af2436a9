//! Bulk loader for the source datasets.

use std::path::Path;
use std::time::Instant;

use tracing::{info, info_span};

use crate::config;
use crate::error::{Result, SummaryError};
use crate::reader;
use crate::schema;
use crate::store::Store;

/// What the loader did with one dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The file was read and written as a new table.
    Loaded { table: String, rows: usize },
    /// The table already existed and was left untouched.
    Skipped { table: String },
}

impl LoadOutcome {
    pub fn table(&self) -> &str {
        match self {
            LoadOutcome::Loaded { table, .. } | LoadOutcome::Skipped { table } => table,
        }
    }
}

/// Load every source dataset that is not already present in `store`.
///
/// Files are resolved relative to `data_dir`. Datasets are independent: the
/// first failure is returned and tables loaded before it stay in place.
pub fn load_sources(store: &Store, data_dir: &Path) -> Result<Vec<LoadOutcome>> {
    let start = Instant::now();
    let mut outcomes = Vec::new();

    for (table, file_name) in config::source_files() {
        let _span = info_span!("load", table).entered();
        outcomes.push(load_one(store, table, &data_dir.join(file_name))?);
    }

    info!(
        elapsed_secs = start.elapsed().as_secs_f64(),
        "Source ingestion complete"
    );
    Ok(outcomes)
}

/// Load a single dataset from `path` unless its table already exists.
pub fn load_one(store: &Store, table: &str, path: &Path) -> Result<LoadOutcome> {
    if store.table_exists(table)? {
        info!(table, "Table already exists in database");
        return Ok(LoadOutcome::Skipped {
            table: table.to_string(),
        });
    }

    let schema = schema::for_dataset(table)
        .ok_or_else(|| SummaryError::NotFound(format!("No schema declared for {}", table)))?;
    let data = reader::read_csv(path, &schema)?;
    store.persist(table, &data)?;

    info!(table, rows = data.len(), file = %path.display(), "Table loaded");
    Ok(LoadOutcome::Loaded {
        table: table.to_string(),
        rows: data.len(),
    })
}
