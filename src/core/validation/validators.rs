//! Reusable field validators
//!
//! Each validator receives the field label (for the message) and the parsed
//! value. Validators other than [`required`] let nulls through.

use crate::core::field::{FieldFormat, FieldValue};

/// Boxed validator as stored by [`super::EntityValidationConfig`]
pub type FieldValidator = Box<dyn Fn(&str, &FieldValue) -> Result<(), String> + Send + Sync>;

/// Validator: field is required (not null, not blank)
pub fn required() -> impl Fn(&str, &FieldValue) -> Result<(), String> + Send + Sync + Clone {
    |field: &str, value: &FieldValue| {
        let blank = match value {
            FieldValue::Null => true,
            FieldValue::String(s) => s.trim().is_empty(),
            _ => false,
        };
        if blank {
            Err(format!("{} is required", field))
        } else {
            Ok(())
        }
    }
}

/// Validator: number must be at least `min`
pub fn min_value(min: f64) -> impl Fn(&str, &FieldValue) -> Result<(), String> + Send + Sync + Clone {
    move |field: &str, value: &FieldValue| match value.as_f64() {
        Some(num) if num < min => Err(format!("{} must be at least {}", field, min)),
        _ => Ok(()),
    }
}

/// Validator: number must not exceed `max`
pub fn max_value(max: f64) -> impl Fn(&str, &FieldValue) -> Result<(), String> + Send + Sync + Clone {
    move |field: &str, value: &FieldValue| match value.as_f64() {
        Some(num) if num > max => Err(format!("{} must not exceed {}", field, max)),
        _ => Ok(()),
    }
}

/// Validator: string must not exceed `max` characters
pub fn max_length(max: usize) -> impl Fn(&str, &FieldValue) -> Result<(), String> + Send + Sync + Clone {
    move |field: &str, value: &FieldValue| {
        if let Some(s) = value.as_string() {
            let len = s.chars().count();
            if len > max {
                return Err(format!(
                    "{} must not exceed {} characters (currently: {})",
                    field, max, len
                ));
            }
        }
        Ok(())
    }
}

/// Validator: value must be in allowed list
pub fn in_list(
    allowed: &'static [&'static str],
) -> impl Fn(&str, &FieldValue) -> Result<(), String> + Send + Sync + Clone {
    move |field: &str, value: &FieldValue| match value.as_string() {
        Some(s) if !allowed.contains(&s) => Err(format!(
            "{} must be one of: {} (got: {})",
            field,
            allowed.join(", "),
            s
        )),
        _ => Ok(()),
    }
}

/// Validator: string must match a format
pub fn format(
    format: FieldFormat,
) -> impl Fn(&str, &FieldValue) -> Result<(), String> + Send + Sync + Clone {
    move |field: &str, value: &FieldValue| {
        if value.is_null() || format.validate(value) {
            Ok(())
        } else {
            Err(format!("{} has an invalid format", field))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> FieldValue {
        FieldValue::String(s.to_string())
    }

    // === required() ===

    #[test]
    fn test_required_null_value_returns_error() {
        let v = required();
        let result = v("Fruit Name", &FieldValue::Null);
        assert_eq!(result.unwrap_err(), "Fruit Name is required");
    }

    #[test]
    fn test_required_blank_string_returns_error() {
        let v = required();
        assert!(v("Fruit Name", &text("   ")).is_err());
    }

    #[test]
    fn test_required_zero_is_present() {
        let v = required();
        assert!(v("GST %", &FieldValue::Float(0.0)).is_ok());
        assert!(v("Active", &FieldValue::Boolean(false)).is_ok());
    }

    // === min_value() / max_value() ===

    #[test]
    fn test_min_value_boundaries() {
        let v = min_value(0.01);
        assert!(v("Price", &FieldValue::Float(0.01)).is_ok());
        let err = v("Price", &FieldValue::Float(0.0)).unwrap_err();
        assert!(err.contains("at least 0.01"));
    }

    #[test]
    fn test_min_value_integer_widens() {
        let v = min_value(1.0);
        assert!(v("Quantity", &FieldValue::Integer(0)).is_err());
        assert!(v("Quantity", &FieldValue::Integer(1)).is_ok());
    }

    #[test]
    fn test_max_value_equal_returns_ok() {
        let v = max_value(100.0);
        assert!(v("GST %", &FieldValue::Float(100.0)).is_ok());
        assert!(v("GST %", &FieldValue::Float(100.5)).is_err());
    }

    #[test]
    fn test_numeric_validators_pass_null() {
        assert!(min_value(1.0)("Amount", &FieldValue::Null).is_ok());
        assert!(max_value(1.0)("Amount", &FieldValue::Null).is_ok());
    }

    // === max_length() ===

    #[test]
    fn test_max_length_counts_chars() {
        let v = max_length(3);
        assert!(v("Remark", &text("été")).is_ok());
        let err = v("Remark", &text("abcd")).unwrap_err();
        assert!(err.contains("currently: 4"));
    }

    // === in_list() ===

    #[test]
    fn test_in_list() {
        let v = in_list(&["Success", "Failure", "Declined"]);
        assert!(v("Status", &text("Success")).is_ok());
        let err = v("Status", &text("Pending")).unwrap_err();
        assert!(err.contains("Success, Failure, Declined"));
        assert!(v("Status", &FieldValue::Null).is_ok());
    }

    // === format() ===

    #[test]
    fn test_format_validator() {
        let v = format(FieldFormat::Url);
        assert!(v("Image", &text("https://cdn.example.com/kiwi.png")).is_ok());
        assert!(v("Image", &text("kiwi.png")).is_err());
        assert!(v("Image", &FieldValue::Null).is_ok());
    }
}
