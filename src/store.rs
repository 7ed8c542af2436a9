//! DuckDB-backed tabular store.
//!
//! Owns the single database connection used by a run. Tables are written
//! whole with [`Store::persist`] and read back as JSON-shaped rows or
//! deserialized structs.

use crate::error::{Result, SummaryError};
use crate::schema::Table;
use crate::sql_builder::SqlBuilder;
use duckdb::{types::ValueRef, Connection as DuckDbConnection};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

/// Wraps a DuckDB connection and exposes whole-table writes plus queries.
pub struct Store {
    conn: DuckDbConnection,
}

impl Store {
    /// Open (or create) a database file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let conn = DuckDbConnection::open(path)?;
        debug!(path = %path.display(), "Opened database");
        Ok(Self { conn })
    }

    /// Open an in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        let conn = DuckDbConnection::open_in_memory()?;
        Ok(Self { conn })
    }

    /// Check whether a table with exactly this name exists.
    ///
    /// A missing table is `Ok(false)`, never an error.
    pub fn table_exists(&self, name: &str) -> Result<bool> {
        let (sql, params) = SqlBuilder::new("information_schema.tables")
            .select(&["COUNT(*)"])
            .where_eq("table_name", name)
            .build();
        let count = self
            .execute_scalar(&sql, &params)?
            .and_then(|v| v.as_i64())
            .unwrap_or(0);
        Ok(count > 0)
    }

    /// Write `table` as `table_name`, replacing any existing table of that name.
    ///
    /// Column order follows `table.columns` and no row-identity column is
    /// added. Drop, create and append happen in one transaction, so a failed
    /// write leaves the previous table in place.
    pub fn persist(&self, table_name: &str, table: &Table) -> Result<()> {
        if table_name.trim().is_empty() {
            return Err(SummaryError::InvalidArgument(
                "table name must not be empty".to_string(),
            ));
        }
        if table.columns.is_empty() {
            return Err(SummaryError::InvalidArgument(format!(
                "table {} has no columns",
                table_name
            )));
        }

        let quoted = quote_ident(table_name);
        let column_sql = table
            .columns
            .iter()
            .map(|c| format!("{} {}", quote_ident(&c.name), c.ty.sql_type()))
            .collect::<Vec<_>>()
            .join(", ");

        self.conn.execute_batch("BEGIN TRANSACTION")?;
        let result = (|| -> Result<()> {
            self.conn.execute_batch(&format!(
                "DROP TABLE IF EXISTS {}; CREATE TABLE {} ({})",
                quoted, quoted, column_sql
            ))?;

            {
                let mut appender = self.conn.appender(table_name)?;
                for (i, row) in table.rows.iter().enumerate() {
                    if row.len() != table.columns.len() {
                        return Err(SummaryError::InvalidArgument(format!(
                            "row {} of {} has {} values, expected {}",
                            i,
                            table_name,
                            row.len(),
                            table.columns.len()
                        )));
                    }
                    let values: Vec<&dyn duckdb::ToSql> =
                        row.iter().map(|v| v as &dyn duckdb::ToSql).collect();
                    appender.append_row(values.as_slice())?;
                }
                // Appender flushes on drop.
            }

            let written = self
                .execute_scalar(&format!("SELECT COUNT(*) FROM {}", quoted), &[])?
                .and_then(|v| v.as_i64())
                .unwrap_or(0);
            if written as usize != table.rows.len() {
                return Err(SummaryError::Storage(format!(
                    "{} holds {} rows after write, expected {}",
                    table_name,
                    written,
                    table.rows.len()
                )));
            }
            Ok(())
        })();

        match result {
            Ok(()) => {
                self.conn.execute_batch("COMMIT")?;
                debug!(table = table_name, rows = table.rows.len(), "Persisted table");
                Ok(())
            }
            Err(e) => {
                let _ = self.conn.execute_batch("ROLLBACK");
                Err(e)
            }
        }
    }

    /// Return the names of all tables in the main schema, sorted.
    pub fn tables(&self) -> Result<Vec<String>> {
        let (sql, params) = SqlBuilder::new("information_schema.tables")
            .select(&["table_name"])
            .where_eq("table_schema", "main")
            .order_by(&["table_name ASC"])
            .build();
        let rows = self.execute(&sql, &params)?;
        Ok(rows
            .into_iter()
            .filter_map(|mut r| match r.remove("table_name") {
                Some(serde_json::Value::String(s)) => Some(s),
                _ => None,
            })
            .collect())
    }

    /// Execute SQL and return results as a `Vec` of `HashMap`s.
    ///
    /// Each row is represented as a `HashMap<String, serde_json::Value>`.
    pub fn execute(
        &self,
        sql: &str,
        params: &[String],
    ) -> Result<Vec<HashMap<String, serde_json::Value>>> {
        let mut stmt = self.conn.prepare(sql)?;

        let param_values: Vec<&dyn duckdb::ToSql> = params
            .iter()
            .map(|p| p as &dyn duckdb::ToSql)
            .collect();

        let mut rows_result = stmt.query(param_values.as_slice())?;

        // Column metadata is only available once the query has run.
        let (column_names, column_count) = {
            let stmt_ref = rows_result.as_ref().ok_or_else(|| {
                SummaryError::InvalidArgument(format!("statement returned no result set: {}", sql))
            })?;
            let names: Vec<String> = stmt_ref
                .column_names()
                .into_iter()
                .map(|s| s.to_string())
                .collect();
            (names, stmt_ref.column_count())
        };

        let mut out: Vec<HashMap<String, serde_json::Value>> = Vec::new();

        while let Some(row) = rows_result.next()? {
            let mut map = HashMap::with_capacity(column_count);
            for (i, col_name) in column_names.iter().enumerate().take(column_count) {
                let value = convert_value_ref(row.get_ref(i)?);
                map.insert(col_name.clone(), value);
            }
            out.push(map);
        }

        Ok(out)
    }

    /// Execute SQL and deserialize each row into type `T`.
    pub fn execute_into<T: DeserializeOwned>(&self, sql: &str, params: &[String]) -> Result<Vec<T>> {
        let rows = self.execute(sql, params)?;
        let mut results = Vec::with_capacity(rows.len());
        for row in rows {
            let value = serde_json::Value::Object(
                row.into_iter().collect::<serde_json::Map<String, serde_json::Value>>(),
            );
            let item: T = serde_json::from_value(value)?;
            results.push(item);
        }
        Ok(results)
    }

    /// Execute SQL and return the first column of the first row.
    ///
    /// Returns `None` if the result set is empty.
    pub fn execute_scalar(&self, sql: &str, params: &[String]) -> Result<Option<serde_json::Value>> {
        let mut stmt = self.conn.prepare(sql)?;
        let param_values: Vec<&dyn duckdb::ToSql> = params
            .iter()
            .map(|p| p as &dyn duckdb::ToSql)
            .collect();

        let mut rows = stmt.query(param_values.as_slice())?;

        if let Some(row) = rows.next()? {
            Ok(Some(convert_value_ref(row.get_ref(0)?)))
        } else {
            Ok(None)
        }
    }

    /// Access the underlying DuckDB connection for advanced usage.
    pub fn raw(&self) -> &DuckDbConnection {
        &self.conn
    }

    /// Close the connection, reporting any error DuckDB raises while doing so.
    pub fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, e)| SummaryError::DuckDb(e))
    }
}

/// Quote an identifier for interpolation into SQL.
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Convert a DuckDB `ValueRef` to a `serde_json::Value`.
///
/// Non-finite doubles have no JSON form and come back as `Null`.
fn convert_value_ref(val: ValueRef<'_>) -> serde_json::Value {
    match val {
        ValueRef::Null => serde_json::Value::Null,
        ValueRef::Boolean(b) => serde_json::Value::Bool(b),
        ValueRef::TinyInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::SmallInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::Int(n) => serde_json::Value::Number(n.into()),
        ValueRef::BigInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::UTinyInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::USmallInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::UInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::UBigInt(n) => serde_json::Value::Number(n.into()),
        // SUM over BIGINT yields HUGEINT
        ValueRef::HugeInt(n) => {
            if let Ok(i) = i64::try_from(n) {
                serde_json::Value::Number(i.into())
            } else {
                serde_json::Value::String(n.to_string())
            }
        }
        ValueRef::Float(f) => serde_json::Number::from_f64(f as f64)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        ValueRef::Double(f) => serde_json::Number::from_f64(f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        ValueRef::Text(bytes) => serde_json::Value::String(String::from_utf8_lossy(bytes).to_string()),
        _ => serde_json::Value::Null,
    }
}
