//! Typed reads of the loaded source tables.

use serde::de::DeserializeOwned;

use crate::error::{Result, SummaryError};
use crate::models::{Purchase, PurchasePrice, Sale, VendorInvoice};
use crate::schema::{self, DatasetSchema};
use crate::sql_builder::SqlBuilder;
use crate::store::Store;

// ---------------------------------------------------------------------------
// SourceQuery
// ---------------------------------------------------------------------------

/// Reads the four source tables back as typed records.
pub struct SourceQuery<'a> {
    store: &'a Store,
}

impl<'a> SourceQuery<'a> {
    pub fn new(store: &'a Store) -> Self {
        Self { store }
    }

    pub fn purchases(&self) -> Result<Vec<Purchase>> {
        self.read(&schema::purchases())
    }

    pub fn purchase_prices(&self) -> Result<Vec<PurchasePrice>> {
        self.read(&schema::purchase_prices())
    }

    pub fn sales(&self) -> Result<Vec<Sale>> {
        self.read(&schema::sales())
    }

    pub fn vendor_invoices(&self) -> Result<Vec<VendorInvoice>> {
        self.read(&schema::vendor_invoice())
    }

    /// Select the declared columns of a dataset in storage order.
    fn read<T: DeserializeOwned>(&self, schema: &DatasetSchema) -> Result<Vec<T>> {
        if !self.store.table_exists(schema.name)? {
            return Err(SummaryError::NotFound(format!(
                "Source table {} has not been loaded",
                schema.name
            )));
        }
        let (sql, params) = SqlBuilder::new(schema.name)
            .select(&schema.column_names())
            .build();
        self.store.execute_into(&sql, &params)
    }
}
