use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Purchase — One purchase transaction line
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Purchase {
    pub vendor_number: i64,
    pub vendor_name: Option<String>,
    pub brand: i64,
    pub description: Option<String>,
    pub purchase_price: Option<f64>,
    pub quantity: Option<i64>,
    pub dollars: Option<f64>,
}

// ---------------------------------------------------------------------------
// PurchasePrice — Reference pricing for a brand
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PurchasePrice {
    pub brand: i64,
    pub price: Option<f64>,
    pub volume: Option<String>,
}

// ---------------------------------------------------------------------------
// Sale — One sale transaction line
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Sale {
    pub vendor_no: i64,
    pub brand: i64,
    pub sales_quantity: Option<i64>,
    pub sales_dollars: Option<f64>,
    pub sales_price: Option<f64>,
    pub excise_tax: Option<f64>,
}

// ---------------------------------------------------------------------------
// VendorInvoice — Freight charged on one invoice
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VendorInvoice {
    pub vendor_number: i64,
    pub freight: Option<f64>,
}
