//! Declared column layouts for the source datasets.
//!
//! Each source file is validated against its schema at read time: the header
//! must name every declared column, and every field must parse as the
//! declared type. Columns not listed here are ignored.

use duckdb::types::Value;

/// Semantic type of a column, mapped onto a DuckDB storage type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Integer,
    Float,
    Text,
}

impl ColumnType {
    pub fn sql_type(&self) -> &'static str {
        match self {
            ColumnType::Integer => "BIGINT",
            ColumnType::Float => "DOUBLE",
            ColumnType::Text => "VARCHAR",
        }
    }

    /// Human-readable name used in parse errors.
    pub fn describe(&self) -> &'static str {
        match self {
            ColumnType::Integer => "an integer",
            ColumnType::Float => "a number",
            ColumnType::Text => "text",
        }
    }

    /// Parse one raw field. Empty fields become `NULL`; text is kept verbatim.
    ///
    /// Returns `None` if the field does not match the type.
    pub fn parse(&self, raw: &str) -> Option<Value> {
        if *self != ColumnType::Text && raw.trim().is_empty() {
            return Some(Value::Null);
        }
        match self {
            ColumnType::Integer => raw.trim().parse::<i64>().ok().map(Value::BigInt),
            ColumnType::Float => raw
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|f| f.is_finite())
                .map(Value::Double),
            ColumnType::Text => {
                if raw.is_empty() {
                    Some(Value::Null)
                } else {
                    Some(Value::Text(raw.to_string()))
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDef {
    pub name: String,
    pub ty: ColumnType,
    /// Whether an empty field is accepted (stored as `NULL`).
    pub nullable: bool,
}

impl ColumnDef {
    pub fn new(name: &str, ty: ColumnType) -> Self {
        Self {
            name: name.to_string(),
            ty,
            nullable: true,
        }
    }

    pub fn required(name: &str, ty: ColumnType) -> Self {
        Self {
            name: name.to_string(),
            ty,
            nullable: false,
        }
    }
}

/// Declared layout of one source dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetSchema {
    pub name: &'static str,
    pub columns: Vec<ColumnDef>,
}

impl DatasetSchema {
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }
}

pub fn purchases() -> DatasetSchema {
    use ColumnType::*;
    DatasetSchema {
        name: "purchases",
        columns: vec![
            ColumnDef::required("VendorNumber", Integer),
            ColumnDef::new("VendorName", Text),
            ColumnDef::required("Brand", Integer),
            ColumnDef::new("Description", Text),
            ColumnDef::new("PurchasePrice", Float),
            ColumnDef::new("Quantity", Integer),
            ColumnDef::new("Dollars", Float),
        ],
    }
}

pub fn purchase_prices() -> DatasetSchema {
    use ColumnType::*;
    DatasetSchema {
        name: "purchase_prices",
        columns: vec![
            ColumnDef::required("Brand", Integer),
            ColumnDef::new("Price", Float),
            // Free-form in the source files; coerced to a number during derivation.
            ColumnDef::new("Volume", Text),
        ],
    }
}

pub fn sales() -> DatasetSchema {
    use ColumnType::*;
    DatasetSchema {
        name: "sales",
        columns: vec![
            ColumnDef::required("VendorNo", Integer),
            ColumnDef::required("Brand", Integer),
            ColumnDef::new("SalesQuantity", Integer),
            ColumnDef::new("SalesDollars", Float),
            ColumnDef::new("SalesPrice", Float),
            ColumnDef::new("ExciseTax", Float),
        ],
    }
}

pub fn vendor_invoice() -> DatasetSchema {
    use ColumnType::*;
    DatasetSchema {
        name: "vendor_invoice",
        columns: vec![
            ColumnDef::required("VendorNumber", Integer),
            ColumnDef::new("Freight", Float),
        ],
    }
}

/// Look up the declared schema for a source dataset by table name.
pub fn for_dataset(name: &str) -> Option<DatasetSchema> {
    match name {
        "purchases" => Some(purchases()),
        "purchase_prices" => Some(purchase_prices()),
        "sales" => Some(sales()),
        "vendor_invoice" => Some(vendor_invoice()),
        _ => None,
    }
}

/// An in-memory record set: declared columns plus rows of typed values.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub columns: Vec<ColumnDef>,
    pub rows: Vec<Vec<Value>>,
}

impl Table {
    pub fn new(columns: Vec<ColumnDef>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
