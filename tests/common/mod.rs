//! Shared test fixtures for the vendor summary integration tests.
//!
//! Provides `write_sample_sources()` which writes small source CSVs into a
//! temporary directory, and `setup_loaded_store()` which loads them into an
//! in-memory store.

#![allow(dead_code)]

use std::fs;
use std::path::Path;

use vendor_summary::{load_sources, Store};

pub const PURCHASES_CSV: &str = "\
InventoryId,VendorNumber,VendorName,Brand,Description,Size,PurchasePrice,Quantity,Dollars
1_HARDERSFIELD_58,1,Acme Spirits  ,58,  Gekkeikan Black & Gold Sake,750mL,10.00,5,50.00
1_HARDERSFIELD_58,1,Acme Spirits  ,58,  Gekkeikan Black & Gold Sake,750mL,10.00,2,20.00
2_ABERDEEN_60,2,Blue Ridge,60,Canadian Club 1858 VAP,750mL,8.50,10,85.00
3_ABERDEEN_61,2,Blue Ridge,61,Free Sample,750mL,0,4,0
4_ABERDEEN_62,2,Blue Ridge,62,Returned Case,750mL,-3.00,1,-3.00
5_ABERDEEN_99,3,Ghost Vendor,99,Unpriced Brand,750mL,5.00,3,15.00
";

pub const PURCHASE_PRICES_CSV: &str = "\
Brand,Description,Price,Size,Volume,Classification,PurchasePrice,VendorNumber,VendorName
58,Gekkeikan Black & Gold Sake,12.99,750mL,750,1,9.28,1,Acme Spirits
60,Canadian Club 1858 VAP,10.99,750mL,750,1,7.40,2,Blue Ridge
61,Free Sample,0.99,750mL,750,1,0.50,2,Blue Ridge
62,Returned Case,4.99,750mL,750,1,2.50,2,Blue Ridge
";

pub const SALES_CSV: &str = "\
InventoryId,Store,Brand,Description,Size,SalesQuantity,SalesDollars,SalesPrice,SalesDate,Volume,Classification,ExciseTax,VendorNo,VendorName
1_HARDERSFIELD_58,1,58,Gekkeikan Black & Gold Sake,750mL,2,25.98,12.99,1/1/2016,750,1,0.79,1,Acme Spirits
1_HARDERSFIELD_58,1,58,Gekkeikan Black & Gold Sake,750mL,1,12.99,12.99,1/2/2016,750,1,0.39,1,Acme Spirits
";

pub const VENDOR_INVOICE_CSV: &str = "\
VendorNumber,VendorName,InvoiceDate,PONumber,PODate,PayDate,Quantity,Dollars,Freight,Approval
1,Acme Spirits,1/4/2016,8124,12/21/2015,2/16/2016,7,70.00,1.50,None
1,Acme Spirits,1/7/2016,8137,12/22/2015,2/21/2016,5,50.00,2.00,None
2,Blue Ridge,1/9/2016,8169,12/24/2015,2/16/2016,10,85.00,4.25,None
";

/// Write the sample source files into `dir`.
pub fn write_sample_sources(dir: &Path) {
    write_sources(
        dir,
        PURCHASES_CSV,
        PURCHASE_PRICES_CSV,
        SALES_CSV,
        VENDOR_INVOICE_CSV,
    );
}

/// Write the four source files into `dir` with the given contents.
pub fn write_sources(dir: &Path, purchases: &str, prices: &str, sales: &str, invoices: &str) {
    fs::write(dir.join("purchases.csv"), purchases).unwrap();
    fs::write(dir.join("purchase_prices.csv"), prices).unwrap();
    fs::write(dir.join("sales.csv"), sales).unwrap();
    fs::write(dir.join("vendor_invoice.csv"), invoices).unwrap();
}

/// Create an in-memory store with the sample sources loaded.
///
/// Returns `(Store, tempfile::TempDir)`. The caller must keep the `TempDir`
/// alive if it wants to re-read the source files.
pub fn setup_loaded_store() -> (Store, tempfile::TempDir) {
    let tmp_dir = tempfile::tempdir().unwrap();
    write_sample_sources(tmp_dir.path());

    let store = Store::open_in_memory().unwrap();
    load_sources(&store, tmp_dir.path()).unwrap();
    (store, tmp_dir)
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {}, got {}",
        expected,
        actual
    );
}
