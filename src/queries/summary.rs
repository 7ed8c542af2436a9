//! Store-side vendor summary: the same aggregation as
//! [`build_summary`](crate::summary::build_summary), executed as one CTE
//! query against the loaded source tables.

use crate::error::{Result, SummaryError};
use crate::models::RawVendorSummary;
use crate::sql_builder::SqlBuilder;
use crate::store::Store;

/// Tables the summary query reads.
pub const SOURCE_TABLES: [&str; 4] = ["purchases", "purchase_prices", "sales", "vendor_invoice"];

// ---------------------------------------------------------------------------
// SummaryQuery
// ---------------------------------------------------------------------------

/// Builds raw vendor summary rows inside DuckDB.
pub struct SummaryQuery<'a> {
    store: &'a Store,
}

impl<'a> SummaryQuery<'a> {
    pub fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// Run the summary aggregation.
    ///
    /// Ordered by total purchase dollars descending; ties are broken by vendor
    /// number and brand so repeated runs return rows in the same order.
    pub fn build(&self) -> Result<Vec<RawVendorSummary>> {
        for table in SOURCE_TABLES {
            if !self.store.table_exists(table)? {
                return Err(SummaryError::NotFound(format!(
                    "Source table {} has not been loaded",
                    table
                )));
            }
        }
        let (sql, params) = summary_sql().build();
        self.store.execute_into(&sql, &params)
    }
}

/// The full summary statement, exposed for inspection and logging.
pub fn summary_sql() -> SqlBuilder {
    let mut freight = SqlBuilder::new("vendor_invoice");
    freight
        .select(&["VendorNumber", "SUM(Freight) AS FreightCost"])
        .group_by(&["VendorNumber"]);

    let mut purchases = SqlBuilder::new("purchases p");
    purchases
        .select(&[
            "p.VendorNumber",
            "p.VendorName",
            "p.Brand",
            "p.Description",
            "p.PurchasePrice",
            "pp.Price AS ActualPrice",
            "pp.Volume",
            "SUM(p.Quantity) AS TotalPurchaseQuantity",
            "SUM(p.Dollars) AS TotalPurchaseDollars",
        ])
        .join("JOIN purchase_prices pp ON p.Brand = pp.Brand")
        .where_clause("p.PurchasePrice > 0", &[])
        .group_by(&[
            "p.VendorNumber",
            "p.VendorName",
            "p.Brand",
            "p.Description",
            "p.PurchasePrice",
            "pp.Price",
            "pp.Volume",
        ]);

    let mut sales = SqlBuilder::new("sales");
    sales
        .select(&[
            "VendorNo",
            "Brand",
            "SUM(SalesQuantity) AS TotalSalesQuantity",
            "SUM(SalesDollars) AS TotalSalesDollars",
            "SUM(SalesPrice) AS TotalSalesPrice",
            "SUM(ExciseTax) AS TotalExciseTax",
        ])
        .group_by(&["VendorNo", "Brand"]);

    let mut summary = SqlBuilder::new("PurchaseSummary ps");
    summary
        .with("FreightSummary", &freight)
        .with("PurchaseSummary", &purchases)
        .with("SalesSummary", &sales)
        .select(&[
            "ps.VendorNumber",
            "ps.VendorName",
            "ps.Brand",
            "ps.Description",
            "ps.PurchasePrice",
            "ps.ActualPrice",
            "ps.Volume",
            "ps.TotalPurchaseQuantity",
            "ps.TotalPurchaseDollars",
            "ss.TotalSalesQuantity",
            "ss.TotalSalesDollars",
            "ss.TotalSalesPrice",
            "ss.TotalExciseTax",
            "fs.FreightCost",
        ])
        .join("LEFT JOIN SalesSummary ss ON ps.VendorNumber = ss.VendorNo AND ps.Brand = ss.Brand")
        .join("LEFT JOIN FreightSummary fs ON ps.VendorNumber = fs.VendorNumber")
        .order_by(&[
            "ps.TotalPurchaseDollars DESC NULLS LAST",
            "ps.VendorNumber ASC",
            "ps.Brand ASC",
        ]);
    summary
}
