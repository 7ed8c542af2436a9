use duckdb::types::Value;
use serde::{Deserialize, Serialize};

use crate::schema::{ColumnDef, ColumnType, Table};

// ---------------------------------------------------------------------------
// RawVendorSummary — Joined aggregates before derivation
// ---------------------------------------------------------------------------

/// One (vendor, brand, price, ...) group as produced by the summary builder.
///
/// Sale and freight fields are `None` when the left join found no match;
/// purchase totals are `None` only if every contributing value was null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawVendorSummary {
    pub vendor_number: i64,
    pub vendor_name: Option<String>,
    pub brand: i64,
    pub description: Option<String>,
    pub purchase_price: f64,
    pub actual_price: Option<f64>,
    pub volume: Option<String>,
    pub total_purchase_quantity: Option<i64>,
    pub total_purchase_dollars: Option<f64>,
    pub total_sales_quantity: Option<i64>,
    pub total_sales_dollars: Option<f64>,
    pub total_sales_price: Option<f64>,
    pub total_excise_tax: Option<f64>,
    pub freight_cost: Option<f64>,
}

// ---------------------------------------------------------------------------
// VendorSummary — Final, persisted summary row
// ---------------------------------------------------------------------------

/// A derived summary row, as stored in `vendor_sales_summary`.
///
/// Ratio fields are `None` where their denominator is zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VendorSummary {
    pub vendor_number: i64,
    pub vendor_name: String,
    pub brand: i64,
    pub description: String,
    pub purchase_price: f64,
    pub actual_price: f64,
    pub volume: f64,
    pub total_purchase_quantity: i64,
    pub total_purchase_dollars: f64,
    pub total_sales_quantity: i64,
    pub total_sales_dollars: f64,
    pub total_sales_price: f64,
    pub total_excise_tax: f64,
    pub freight_cost: f64,
    pub gross_profit: f64,
    pub profit_margin: Option<f64>,
    pub stock_turnover: Option<f64>,
    #[serde(rename = "SalestoPurchaseRatio")]
    pub sales_to_purchase_ratio: Option<f64>,
}

impl VendorSummary {
    /// Output columns, in persisted order.
    pub fn columns() -> Vec<ColumnDef> {
        use ColumnType::*;
        vec![
            ColumnDef::required("VendorNumber", Integer),
            ColumnDef::required("VendorName", Text),
            ColumnDef::required("Brand", Integer),
            ColumnDef::required("Description", Text),
            ColumnDef::required("PurchasePrice", Float),
            ColumnDef::required("ActualPrice", Float),
            ColumnDef::required("Volume", Float),
            ColumnDef::required("TotalPurchaseQuantity", Integer),
            ColumnDef::required("TotalPurchaseDollars", Float),
            ColumnDef::required("TotalSalesQuantity", Integer),
            ColumnDef::required("TotalSalesDollars", Float),
            ColumnDef::required("TotalSalesPrice", Float),
            ColumnDef::required("TotalExciseTax", Float),
            ColumnDef::required("FreightCost", Float),
            ColumnDef::required("GrossProfit", Float),
            ColumnDef::new("ProfitMargin", Float),
            ColumnDef::new("StockTurnover", Float),
            ColumnDef::new("SalestoPurchaseRatio", Float),
        ]
    }

    fn values(&self) -> Vec<Value> {
        let opt = |v: Option<f64>| v.map(Value::Double).unwrap_or(Value::Null);
        vec![
            Value::BigInt(self.vendor_number),
            Value::Text(self.vendor_name.clone()),
            Value::BigInt(self.brand),
            Value::Text(self.description.clone()),
            Value::Double(self.purchase_price),
            Value::Double(self.actual_price),
            Value::Double(self.volume),
            Value::BigInt(self.total_purchase_quantity),
            Value::Double(self.total_purchase_dollars),
            Value::BigInt(self.total_sales_quantity),
            Value::Double(self.total_sales_dollars),
            Value::Double(self.total_sales_price),
            Value::Double(self.total_excise_tax),
            Value::Double(self.freight_cost),
            Value::Double(self.gross_profit),
            opt(self.profit_margin),
            opt(self.stock_turnover),
            opt(self.sales_to_purchase_ratio),
        ]
    }

    /// Lay out summary rows as a [`Table`] ready for `Store::persist`.
    pub fn to_table(rows: &[VendorSummary]) -> Table {
        let mut table = Table::new(Self::columns());
        table.rows = rows.iter().map(Self::values).collect();
        table
    }
}
