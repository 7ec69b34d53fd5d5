//! Tax-inclusive totals and money formatting
//!
//! Every place that shows or sums a total goes through [`line_total`] so the
//! form preview, table rows and dashboard agree to the last bit.

use crate::core::record::Record;
use crate::core::schema::TotalSpec;

/// `price + price * tax_percent / 100`
pub fn line_total(price: f64, tax_percent: f64) -> f64 {
    price + (price * tax_percent) / 100.0
}

/// Total of a stored record, treating a missing tax as zero
pub fn record_total(spec: &TotalSpec, record: &Record) -> Option<f64> {
    let price = record.get_f64(spec.price_field)?;
    let tax = record.get_f64(spec.tax_field).unwrap_or(0.0);
    Some(line_total(price, tax))
}

/// Lenient number parse used by live previews: anything unparsable is zero
pub fn parse_or_zero(text: &str) -> f64 {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// `$1234.50`
pub fn format_currency(amount: f64) -> String {
    format!("${:.2}", amount)
}
