//! Store integration tests: whole-table writes, existence checks, queries.

mod common;

use duckdb::types::Value;
use vendor_summary::schema::{ColumnDef, ColumnType, Table};
use vendor_summary::{Store, SummaryError};

fn two_column_table(rows: &[(i64, &str)]) -> Table {
    let mut table = Table::new(vec![
        ColumnDef::required("Id", ColumnType::Integer),
        ColumnDef::new("Name", ColumnType::Text),
    ]);
    table.rows = rows
        .iter()
        .map(|(id, name)| vec![Value::BigInt(*id), Value::Text(name.to_string())])
        .collect();
    table
}

// ---------------------------------------------------------------------------
// table_exists
// ---------------------------------------------------------------------------

#[test]
fn table_exists_is_false_for_unknown_table() {
    let store = Store::open_in_memory().unwrap();
    assert!(!store.table_exists("no_such_table").unwrap());
}

#[test]
fn table_exists_requires_exact_name() {
    let store = Store::open_in_memory().unwrap();
    store.persist("sales", &two_column_table(&[(1, "a")])).unwrap();

    assert!(store.table_exists("sales").unwrap());
    assert!(!store.table_exists("sale").unwrap());
    assert!(!store.table_exists("sales_2016").unwrap());
}

// ---------------------------------------------------------------------------
// persist
// ---------------------------------------------------------------------------

#[test]
fn persist_creates_queryable_table() {
    let store = Store::open_in_memory().unwrap();
    store
        .persist("vendors", &two_column_table(&[(1, "Alpha"), (2, "Beta")]))
        .unwrap();

    let rows = store.execute("SELECT * FROM vendors ORDER BY Id", &[]).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["Name"], "Alpha");
    assert_eq!(rows[1]["Name"], "Beta");
}

#[test]
fn persist_preserves_column_order_without_row_id() {
    let store = Store::open_in_memory().unwrap();
    let mut table = Table::new(vec![
        ColumnDef::new("Zeta", ColumnType::Float),
        ColumnDef::new("Alpha", ColumnType::Text),
        ColumnDef::new("Mid", ColumnType::Integer),
    ]);
    table.rows.push(vec![Value::Double(1.5), Value::Text("x".into()), Value::BigInt(3)]);
    store.persist("ordered", &table).unwrap();

    let cols = store
        .execute(
            "SELECT column_name, data_type FROM information_schema.columns \
             WHERE table_name = ? ORDER BY ordinal_position",
            &["ordered".to_string()],
        )
        .unwrap();
    let names: Vec<&str> = cols.iter().map(|r| r["column_name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["Zeta", "Alpha", "Mid"]);
    assert_eq!(cols[0]["data_type"], "DOUBLE");
    assert_eq!(cols[2]["data_type"], "BIGINT");
}

#[test]
fn persist_replaces_existing_table() {
    let store = Store::open_in_memory().unwrap();
    store
        .persist("vendors", &two_column_table(&[(1, "old"), (2, "older")]))
        .unwrap();

    let mut replacement = Table::new(vec![ColumnDef::new("Label", ColumnType::Text)]);
    replacement.rows.push(vec![Value::Text("new".into())]);
    store.persist("vendors", &replacement).unwrap();

    let rows = store.execute("SELECT * FROM vendors", &[]).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["Label"], "new");
    assert!(!rows[0].contains_key("Id"));
}

#[test]
fn persist_writes_nulls() {
    let store = Store::open_in_memory().unwrap();
    let mut table = two_column_table(&[]);
    table.rows.push(vec![Value::BigInt(7), Value::Null]);
    store.persist("nullable", &table).unwrap();

    let rows = store.execute("SELECT * FROM nullable", &[]).unwrap();
    assert!(rows[0]["Name"].is_null());
}

#[test]
fn persist_empty_table_creates_schema() {
    let store = Store::open_in_memory().unwrap();
    store.persist("empty", &two_column_table(&[])).unwrap();

    assert!(store.table_exists("empty").unwrap());
    let count = store.execute_scalar("SELECT COUNT(*) FROM empty", &[]).unwrap();
    assert_eq!(count.unwrap().as_i64().unwrap(), 0);
}

#[test]
fn persist_rejects_ragged_row_and_keeps_previous_table() {
    let store = Store::open_in_memory().unwrap();
    store.persist("vendors", &two_column_table(&[(1, "kept")])).unwrap();

    let mut bad = two_column_table(&[(2, "fine")]);
    bad.rows.push(vec![Value::BigInt(3)]);
    let err = store.persist("vendors", &bad).unwrap_err();
    assert!(matches!(err, SummaryError::InvalidArgument(_)));

    let rows = store.execute("SELECT * FROM vendors", &[]).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["Name"], "kept");
}

#[test]
fn persist_rejects_empty_name_and_no_columns() {
    let store = Store::open_in_memory().unwrap();
    let err = store.persist("", &two_column_table(&[])).unwrap_err();
    assert!(matches!(err, SummaryError::InvalidArgument(_)));

    let err = store.persist("t", &Table::new(Vec::new())).unwrap_err();
    assert!(matches!(err, SummaryError::InvalidArgument(_)));
}

#[test]
fn persist_surfaces_type_mismatch() {
    let store = Store::open_in_memory().unwrap();
    let mut table = two_column_table(&[]);
    table
        .rows
        .push(vec![Value::Text("not a number".into()), Value::Text("x".into())]);

    let err = store.persist("typed", &table).unwrap_err();
    assert!(matches!(err, SummaryError::DuckDb(_) | SummaryError::Storage(_)));
}

// ---------------------------------------------------------------------------
// queries
// ---------------------------------------------------------------------------

#[test]
fn execute_scalar_returns_none_for_empty_result() {
    let store = Store::open_in_memory().unwrap();
    store.persist("vendors", &two_column_table(&[(1, "a")])).unwrap();

    let result = store
        .execute_scalar("SELECT Id FROM vendors WHERE Name = ?", &["missing".to_string()])
        .unwrap();
    assert!(result.is_none());
}

#[test]
fn tables_lists_loaded_sources() {
    let (store, _tmp) = common::setup_loaded_store();
    assert_eq!(
        store.tables().unwrap(),
        vec!["purchase_prices", "purchases", "sales", "vendor_invoice"]
    );
}

#[test]
fn file_store_survives_reopen() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("nested").join("inventory.db");

    let store = Store::open(&path).unwrap();
    store.persist("vendors", &two_column_table(&[(1, "Alpha")])).unwrap();
    store.close().unwrap();

    let reopened = Store::open(&path).unwrap();
    assert!(reopened.table_exists("vendors").unwrap());
}

#[test]
fn raw_provides_access_to_underlying_duckdb_connection() {
    let store = Store::open_in_memory().unwrap();

    let raw = store.raw();
    raw.execute_batch("CREATE TABLE raw_test (id INTEGER, value TEXT)")
        .unwrap();
    raw.execute_batch("INSERT INTO raw_test VALUES (1, 'hello')")
        .unwrap();

    let rows = store.execute("SELECT * FROM raw_test", &[]).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["value"], "hello");
}

#[test]
fn execute_into_deserializes_rows() {
    let (store, _tmp) = common::setup_loaded_store();

    #[derive(serde::Deserialize, Debug)]
    #[serde(rename_all = "PascalCase")]
    struct Invoice {
        vendor_number: i64,
        freight: f64,
    }

    let invoices: Vec<Invoice> = store
        .execute_into(
            "SELECT VendorNumber, Freight FROM vendor_invoice ORDER BY Freight",
            &[],
        )
        .unwrap();
    assert_eq!(invoices.len(), 3);
    assert_eq!(invoices[0].vendor_number, 1);
    common::assert_close(invoices[0].freight, 1.5);
}

#[test]
fn integer_sums_convert_to_json_integers() {
    let (store, _tmp) = common::setup_loaded_store();

    // SUM over BIGINT comes back as HUGEINT
    let total = store
        .execute_scalar("SELECT SUM(Quantity) FROM purchases", &[])
        .unwrap()
        .unwrap();
    assert_eq!(total.as_i64(), Some(25));
}
