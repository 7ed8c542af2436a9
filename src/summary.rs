//! In-memory vendor summary builder.
//!
//! Freight and sales are aggregated on their own, purchases are aggregated
//! after an inner join to reference prices, and the two side aggregates are
//! left-joined on. Null handling follows SQL: `SUM` ignores nulls and is null
//! when every input is null, and a null purchase price never passes the
//! positive-price filter.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::models::{Purchase, PurchasePrice, RawVendorSummary, Sale, VendorInvoice};

/// Grouping key for purchase aggregation. Floats are keyed by bit pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct PurchaseKey {
    vendor_number: i64,
    vendor_name: Option<String>,
    brand: i64,
    description: Option<String>,
    purchase_price: u64,
    actual_price: Option<u64>,
    volume: Option<String>,
}

#[derive(Debug, Default, Clone, Copy)]
struct SalesTotals {
    quantity: Option<i64>,
    dollars: Option<f64>,
    price: Option<f64>,
    excise_tax: Option<f64>,
}

/// Build one summary row per purchase group.
///
/// Rows are ordered by total purchase dollars, descending; groups with equal
/// totals keep the order in which they first appeared in `purchases`.
pub fn build_summary(
    purchases: &[Purchase],
    purchase_prices: &[PurchasePrice],
    sales: &[Sale],
    vendor_invoices: &[VendorInvoice],
) -> Vec<RawVendorSummary> {
    let freight = freight_summary(vendor_invoices);
    let sales = sales_summary(sales);

    let mut rows: Vec<RawVendorSummary> = purchase_summary(purchases, purchase_prices)
        .into_iter()
        .map(|mut row| {
            if let Some(s) = sales.get(&(row.vendor_number, row.brand)) {
                row.total_sales_quantity = s.quantity;
                row.total_sales_dollars = s.dollars;
                row.total_sales_price = s.price;
                row.total_excise_tax = s.excise_tax;
            }
            row.freight_cost = freight.get(&row.vendor_number).copied().flatten();
            row
        })
        .collect();

    rows.sort_by(|a, b| cmp_desc_nulls_last(a.total_purchase_dollars, b.total_purchase_dollars));
    rows
}

fn freight_summary(invoices: &[VendorInvoice]) -> HashMap<i64, Option<f64>> {
    let mut out: HashMap<i64, Option<f64>> = HashMap::new();
    for inv in invoices {
        let acc = out.entry(inv.vendor_number).or_insert(None);
        *acc = sum(*acc, inv.freight);
    }
    out
}

fn sales_summary(sales: &[Sale]) -> HashMap<(i64, i64), SalesTotals> {
    let mut out: HashMap<(i64, i64), SalesTotals> = HashMap::new();
    for sale in sales {
        let acc = out.entry((sale.vendor_no, sale.brand)).or_default();
        acc.quantity = sum(acc.quantity, sale.sales_quantity);
        acc.dollars = sum(acc.dollars, sale.sales_dollars);
        acc.price = sum(acc.price, sale.sales_price);
        acc.excise_tax = sum(acc.excise_tax, sale.excise_tax);
    }
    out
}

/// Inner join purchases to prices on brand, keep positive purchase prices and
/// group. Groups are returned in first-appearance order.
fn purchase_summary(purchases: &[Purchase], prices: &[PurchasePrice]) -> Vec<RawVendorSummary> {
    let mut prices_by_brand: HashMap<i64, Vec<&PurchasePrice>> = HashMap::new();
    for pp in prices {
        prices_by_brand.entry(pp.brand).or_default().push(pp);
    }

    let mut index: HashMap<PurchaseKey, usize> = HashMap::new();
    let mut groups: Vec<RawVendorSummary> = Vec::new();

    for p in purchases {
        let purchase_price = match p.purchase_price {
            Some(price) if price > 0.0 => price,
            _ => continue,
        };
        let Some(matches) = prices_by_brand.get(&p.brand) else {
            continue;
        };

        for pp in matches {
            let key = PurchaseKey {
                vendor_number: p.vendor_number,
                vendor_name: p.vendor_name.clone(),
                brand: p.brand,
                description: p.description.clone(),
                purchase_price: purchase_price.to_bits(),
                actual_price: pp.price.map(f64::to_bits),
                volume: pp.volume.clone(),
            };
            let slot = *index.entry(key).or_insert_with(|| {
                groups.push(RawVendorSummary {
                    vendor_number: p.vendor_number,
                    vendor_name: p.vendor_name.clone(),
                    brand: p.brand,
                    description: p.description.clone(),
                    purchase_price,
                    actual_price: pp.price,
                    volume: pp.volume.clone(),
                    total_purchase_quantity: None,
                    total_purchase_dollars: None,
                    total_sales_quantity: None,
                    total_sales_dollars: None,
                    total_sales_price: None,
                    total_excise_tax: None,
                    freight_cost: None,
                });
                groups.len() - 1
            });

            let group = &mut groups[slot];
            group.total_purchase_quantity = sum(group.total_purchase_quantity, p.quantity);
            group.total_purchase_dollars = sum(group.total_purchase_dollars, p.dollars);
        }
    }

    groups
}

/// SQL `SUM` accumulation: nulls are skipped, all-null stays null.
fn sum<T: std::ops::Add<Output = T>>(acc: Option<T>, value: Option<T>) -> Option<T> {
    match (acc, value) {
        (Some(a), Some(v)) => Some(a + v),
        (None, v) => v,
        (a, None) => a,
    }
}

fn cmp_desc_nulls_last(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
