//! Business document numbers
//!
//! A blank purchase-order or sales-invoice number is replaced by
//! `<PREFIX>-<last 8 digits of the epoch-millisecond timestamp>`. Two numbers
//! generated within the same millisecond collide; the store does not enforce
//! uniqueness on these columns.

use chrono::{DateTime, Utc};

/// Digits kept from the millisecond timestamp
pub const SUFFIX_DIGITS: usize = 8;

/// Number derived from an instant
pub fn document_number(prefix: &str, at: DateTime<Utc>) -> String {
    document_number_from_millis(prefix, at.timestamp_millis())
}

/// Number derived from raw epoch milliseconds.
///
/// Timestamps shorter than eight digits are zero-padded so the suffix is
/// always eight digits long.
pub fn document_number_from_millis(prefix: &str, millis: i64) -> String {
    let modulus = 10_i64.pow(SUFFIX_DIGITS as u32);
    let suffix = millis.rem_euclid(modulus);
    format!("{}-{:0width$}", prefix, suffix, width = SUFFIX_DIGITS)
}
