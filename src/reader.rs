//! Reads delimited source files against a declared [`DatasetSchema`].

use std::path::Path;

use tracing::debug;

use crate::error::{Result, SummaryError};
use crate::schema::{DatasetSchema, Table};

/// Read a CSV file with a header row into a [`Table`] shaped by `schema`.
///
/// Declared columns are located by header name (so their order in the file
/// does not matter) and undeclared columns are dropped. Rows with the wrong
/// field count surface as [`SummaryError::Csv`]; fields that do not match
/// their declared type surface as [`SummaryError::Parse`].
pub fn read_csv<P: AsRef<Path>>(path: P, schema: &DatasetSchema) -> Result<Table> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(SummaryError::NotFound(format!(
            "Source file for {} not found: {}",
            schema.name,
            path.display()
        )));
    }

    let reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)?;
    read_from(reader, schema)
}

/// Read CSV data from any reader. Used by [`read_csv`] and directly by callers
/// holding the data in memory.
pub fn read_csv_from<R: std::io::Read>(input: R, schema: &DatasetSchema) -> Result<Table> {
    let reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(input);
    read_from(reader, schema)
}

fn read_from<R: std::io::Read>(mut reader: csv::Reader<R>, schema: &DatasetSchema) -> Result<Table> {
    let headers = reader.headers()?.clone();

    let mut positions = Vec::with_capacity(schema.columns.len());
    for col in &schema.columns {
        let idx = headers
            .iter()
            .position(|h| h.trim() == col.name)
            .ok_or_else(|| SummaryError::Schema {
                dataset: schema.name.to_string(),
                message: format!("missing column {}", col.name),
            })?;
        positions.push(idx);
    }

    let mut table = Table::new(schema.columns.clone());
    for record in reader.records() {
        let record = record?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        let mut row = Vec::with_capacity(positions.len());
        for (col, &idx) in schema.columns.iter().zip(&positions) {
            let raw = record.get(idx).unwrap_or("");
            let parse_error = || SummaryError::Parse {
                dataset: schema.name.to_string(),
                line,
                column: col.name.clone(),
                value: raw.to_string(),
                expected: col.ty.describe(),
            };

            let value = col.ty.parse(raw).ok_or_else(parse_error)?;
            if !col.nullable && value == duckdb::types::Value::Null {
                return Err(parse_error());
            }
            row.push(value);
        }
        table.rows.push(row);
    }

    debug!(dataset = schema.name, rows = table.len(), "Read source rows");
    Ok(table)
}
