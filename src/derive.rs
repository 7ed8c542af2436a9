//! Derivation stage: zero-fill, text cleanup and profitability ratios.

use crate::error::{Result, SummaryError};
use crate::models::{RawVendorSummary, VendorSummary};

/// Turn raw summary rows into final [`VendorSummary`] rows.
///
/// Consumes the raw rows, so derived output can never be derived again.
/// Fails only if a volume is present but not numeric.
pub fn derive(rows: Vec<RawVendorSummary>) -> Result<Vec<VendorSummary>> {
    rows.into_iter().map(derive_row).collect()
}

pub fn derive_row(raw: RawVendorSummary) -> Result<VendorSummary> {
    let volume = parse_volume(raw.volume.as_deref(), raw.brand)?;

    let total_purchase_quantity = raw.total_purchase_quantity.unwrap_or(0);
    let total_purchase_dollars = raw.total_purchase_dollars.unwrap_or(0.0);
    let total_sales_quantity = raw.total_sales_quantity.unwrap_or(0);
    let total_sales_dollars = raw.total_sales_dollars.unwrap_or(0.0);

    let gross_profit = total_sales_dollars - total_purchase_dollars;

    Ok(VendorSummary {
        vendor_number: raw.vendor_number,
        vendor_name: trimmed(raw.vendor_name),
        brand: raw.brand,
        description: trimmed(raw.description),
        purchase_price: raw.purchase_price,
        actual_price: raw.actual_price.unwrap_or(0.0),
        volume,
        total_purchase_quantity,
        total_purchase_dollars,
        total_sales_quantity,
        total_sales_dollars,
        total_sales_price: raw.total_sales_price.unwrap_or(0.0),
        total_excise_tax: raw.total_excise_tax.unwrap_or(0.0),
        freight_cost: raw.freight_cost.unwrap_or(0.0),
        gross_profit,
        profit_margin: ratio(gross_profit, total_sales_dollars).map(|r| r * 100.0),
        stock_turnover: ratio(total_sales_quantity as f64, total_purchase_quantity as f64),
        sales_to_purchase_ratio: ratio(total_sales_dollars, total_purchase_dollars),
    })
}

/// `numerator / denominator`, or `None` when the denominator is zero.
pub fn ratio(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator == 0.0 {
        return None;
    }
    Some(numerator / denominator).filter(|r| r.is_finite())
}

fn trimmed(text: Option<String>) -> String {
    text.map(|s| s.trim().to_string()).unwrap_or_default()
}

fn parse_volume(volume: Option<&str>, brand: i64) -> Result<f64> {
    match volume.map(str::trim) {
        None | Some("") => Ok(0.0),
        Some(v) => v
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .ok_or_else(|| SummaryError::Parse {
                dataset: "purchase_prices".to_string(),
                line: 0,
                column: format!("Volume (brand {})", brand),
                value: v.to_string(),
                expected: "a number",
            }),
    }
}
