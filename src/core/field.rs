//! Field value types, semantic kinds and format checks

use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use std::cmp::Ordering;
use std::sync::OnceLock;
use uuid::Uuid;

use crate::core::status::StatusDomain;

/// Date format used for every date field, both stored and editable
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A polymorphic field value that can hold different types
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum FieldValue {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Uuid(Uuid),
    Date(NaiveDate),
    DateTime(DateTime<Utc>),
    Null,
}

impl FieldValue {
    /// Get the value as a string if possible
    pub fn as_string(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get the value as an integer if possible
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Get the value as a float, widening integers
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Float(f) => Some(*f),
            FieldValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Get the value as a boolean if possible
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Get the value as a UUID if possible
    pub fn as_uuid(&self) -> Option<Uuid> {
        match self {
            FieldValue::Uuid(u) => Some(*u),
            FieldValue::String(s) => Uuid::parse_str(s).ok(),
            _ => None,
        }
    }

    /// Get the value as a calendar date if possible
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            FieldValue::Date(d) => Some(*d),
            FieldValue::DateTime(dt) => Some(dt.date_naive()),
            FieldValue::String(s) => NaiveDate::parse_from_str(s, DATE_FORMAT).ok(),
            _ => None,
        }
    }

    /// Check if the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Convert into the JSON shape the hosted store speaks
    pub fn to_json(&self) -> Value {
        match self {
            FieldValue::String(s) => Value::String(s.clone()),
            FieldValue::Integer(i) => Value::from(*i),
            FieldValue::Float(f) => serde_json::Number::from_f64(*f)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            FieldValue::Boolean(b) => Value::Bool(*b),
            FieldValue::Uuid(u) => Value::String(u.to_string()),
            FieldValue::Date(d) => Value::String(d.format(DATE_FORMAT).to_string()),
            FieldValue::DateTime(dt) => Value::String(dt.to_rfc3339()),
            FieldValue::Null => Value::Null,
        }
    }

    /// Decode a JSON value without schema knowledge (filters, ad-hoc queries)
    pub fn from_untyped_json(value: &Value) -> Self {
        match value {
            Value::Null => FieldValue::Null,
            Value::Bool(b) => FieldValue::Boolean(*b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => FieldValue::Integer(i),
                None => n.as_f64().map(FieldValue::Float).unwrap_or(FieldValue::Null),
            },
            Value::String(s) => FieldValue::String(s.clone()),
            other => FieldValue::String(other.to_string()),
        }
    }

    /// Decode a JSON value into the storage type of the given kind.
    ///
    /// Returns `None` when the JSON shape does not fit the kind.
    pub fn from_json(kind: &FieldKind, value: &Value) -> Option<Self> {
        if value.is_null() {
            return Some(FieldValue::Null);
        }

        match kind {
            FieldKind::Text
            | FieldKind::FreeText
            | FieldKind::Choice(_)
            | FieldKind::Status(_)
            | FieldKind::Image
            | FieldKind::DocumentNumber { .. } => {
                value.as_str().map(|s| FieldValue::String(s.to_string()))
            }
            FieldKind::Currency | FieldKind::Percentage | FieldKind::Decimal => {
                value.as_f64().map(FieldValue::Float)
            }
            FieldKind::Integer => value.as_i64().map(FieldValue::Integer),
            FieldKind::Boolean => value.as_bool().map(FieldValue::Boolean),
            FieldKind::Date => value
                .as_str()
                .and_then(|s| NaiveDate::parse_from_str(s, DATE_FORMAT).ok())
                .map(FieldValue::Date),
            FieldKind::Reference(_) => value
                .as_str()
                .and_then(|s| Uuid::parse_str(s).ok())
                .map(FieldValue::Uuid),
        }
    }

    /// Render the value as an editable form string
    pub fn to_draft_text(&self) -> String {
        match self {
            FieldValue::String(s) => s.clone(),
            FieldValue::Integer(i) => i.to_string(),
            FieldValue::Float(f) => f.to_string(),
            FieldValue::Boolean(b) => b.to_string(),
            FieldValue::Uuid(u) => u.to_string(),
            FieldValue::Date(d) => d.format(DATE_FORMAT).to_string(),
            FieldValue::DateTime(dt) => dt.date_naive().format(DATE_FORMAT).to_string(),
            FieldValue::Null => String::new(),
        }
    }

    /// Compare two values for filtering and sorting.
    ///
    /// Integers and floats compare numerically; a string compared with a date
    /// is parsed as a date first. Mismatched kinds are incomparable.
    pub fn compare(&self, other: &FieldValue) -> Option<Ordering> {
        use FieldValue::*;
        match (self, other) {
            (Null, Null) => Some(Ordering::Equal),
            (Null, _) | (_, Null) => None,
            (String(a), String(b)) => Some(a.cmp(b)),
            (Boolean(a), Boolean(b)) => Some(a.cmp(b)),
            (Uuid(a), Uuid(b)) => Some(a.cmp(b)),
            (Uuid(a), String(b)) => Some(a.to_string().cmp(b)),
            (String(a), Uuid(b)) => Some(a.cmp(&b.to_string())),
            (DateTime(a), DateTime(b)) => Some(a.cmp(b)),
            (Date(_) | DateTime(_), _) | (_, Date(_) | DateTime(_)) => {
                Some(self.as_date()?.cmp(&other.as_date()?))
            }
            _ => self.as_f64()?.partial_cmp(&other.as_f64()?),
        }
    }
}

/// Where a reference field points and which column labels the target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceTarget {
    /// Collection holding the referenced records
    pub collection: &'static str,

    /// Field shown to the user in selectors and tables
    pub label_field: &'static str,
}

/// Semantic type of a field
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    /// Single-line text
    Text,
    /// Multi-line text
    FreeText,
    /// Money amount, stored as a float
    Currency,
    /// Percentage in `0..=100`, stored as a float
    Percentage,
    /// Whole number
    Integer,
    /// Non-monetary decimal (weights)
    Decimal,
    /// One of a fixed list of values
    Choice(&'static [&'static str]),
    /// One of a status domain's values, rendered as a coloured badge
    Status(StatusDomain),
    /// Calendar date
    Date,
    /// Checkbox
    Boolean,
    /// Identifier of a record in another collection
    Reference(ReferenceTarget),
    /// Image reference (data URL or http(s) URL)
    Image,
    /// Business document number, synthesised from `prefix` when left blank
    DocumentNumber { prefix: &'static str },
}

impl FieldKind {
    /// Whether draft text for this kind is parsed as a number
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            FieldKind::Currency | FieldKind::Percentage | FieldKind::Integer | FieldKind::Decimal
        )
    }

    /// Allowed values for enumerated kinds
    pub fn choices(&self) -> Option<&'static [&'static str]> {
        match self {
            FieldKind::Choice(values) => Some(values),
            FieldKind::Status(domain) => Some(domain.values()),
            _ => None,
        }
    }
}

/// Field format validators
#[derive(Debug, Clone)]
pub enum FieldFormat {
    Url,
    Custom(Regex),
}

impl FieldFormat {
    /// Validate a field value against this format
    pub fn validate(&self, value: &FieldValue) -> bool {
        let string_value = match value.as_string() {
            Some(s) => s,
            None => return false,
        };

        match self {
            FieldFormat::Url => Self::is_valid_url(string_value),
            FieldFormat::Custom(regex) => regex.is_match(string_value),
        }
    }

    fn is_valid_url(url: &str) -> bool {
        static URL_REGEX: OnceLock<Regex> = OnceLock::new();
        let regex = URL_REGEX.get_or_init(|| {
            Regex::new(r"^https?://[^\s/$.?#].[^\s]*$").expect("static URL pattern")
        });
        regex.is_match(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_field_value_accessors() {
        assert_eq!(FieldValue::String("x".into()).as_string(), Some("x"));
        assert_eq!(FieldValue::Integer(3).as_f64(), Some(3.0));
        assert_eq!(FieldValue::Float(3.5).as_integer(), None);
        assert_eq!(FieldValue::Boolean(true).as_bool(), Some(true));
        assert!(FieldValue::Null.is_null());
    }

    #[test]
    fn test_from_json_currency_keeps_float() {
        let value = FieldValue::from_json(&FieldKind::Currency, &json!(3.5));
        assert_eq!(value, Some(FieldValue::Float(3.5)));

        let whole = FieldValue::from_json(&FieldKind::Currency, &json!(4));
        assert_eq!(whole, Some(FieldValue::Float(4.0)));
    }

    #[test]
    fn test_from_json_rejects_mismatched_shape() {
        assert_eq!(FieldValue::from_json(&FieldKind::Integer, &json!("ten")), None);
        assert_eq!(FieldValue::from_json(&FieldKind::Date, &json!("10/01/2024")), None);
    }

    #[test]
    fn test_from_json_null_is_null_for_every_kind() {
        for kind in [FieldKind::Text, FieldKind::Currency, FieldKind::Date, FieldKind::Boolean] {
            assert_eq!(FieldValue::from_json(&kind, &json!(null)), Some(FieldValue::Null));
        }
    }

    #[test]
    fn test_draft_text_for_numbers() {
        assert_eq!(FieldValue::Float(3.5).to_draft_text(), "3.5");
        assert_eq!(FieldValue::Float(12.0).to_draft_text(), "12");
        assert_eq!(FieldValue::Integer(7).to_draft_text(), "7");
        assert_eq!(FieldValue::Null.to_draft_text(), "");
    }

    #[test]
    fn test_compare_mixed_numbers_and_dates() {
        assert_eq!(
            FieldValue::Integer(2).compare(&FieldValue::Float(2.5)),
            Some(Ordering::Less)
        );

        let date = FieldValue::Date(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(
            date.compare(&FieldValue::String("2024-02-28".into())),
            Some(Ordering::Greater)
        );
        assert_eq!(date.compare(&FieldValue::Boolean(true)), None);
    }

    #[test]
    fn test_url_format() {
        let format = FieldFormat::Url;
        assert!(format.validate(&FieldValue::String("https://cdn.example.com/mango.jpg".into())));
        assert!(!format.validate(&FieldValue::String("mango.jpg".into())));
        assert!(!format.validate(&FieldValue::Integer(1)));
    }

    #[test]
    fn test_custom_regex_validation() {
        let format = FieldFormat::Custom(Regex::new(r"^[A-Z]{3}\d{3}$").unwrap());

        assert!(format.validate(&FieldValue::String("ABC123".to_string())));
        assert!(!format.validate(&FieldValue::String("abc123".to_string())));
    }
}
