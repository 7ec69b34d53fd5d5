//! Per-schema validation configuration
//!
//! Turns a [`Draft`] of raw input strings into a typed [`FieldMap`],
//! applying each field's blank policy and running its validators.

use chrono::{DateTime, NaiveDate, Utc};
use std::collections::HashMap;
use uuid::Uuid;

use super::validators::{self, FieldValidator};
use crate::core::draft::Draft;
use crate::core::error::{FieldValidationError, ValidationError};
use crate::core::field::{DATE_FORMAT, FieldKind, FieldValue};
use crate::core::numbering::document_number;
use crate::core::record::FieldMap;
use crate::core::schema::{BlankPolicy, EntitySchema, FieldDef};

/// Validators for every field of one schema
pub struct EntityValidationConfig<'a> {
    schema: &'a EntitySchema,
    validators: HashMap<&'static str, Vec<FieldValidator>>,
}

impl<'a> EntityValidationConfig<'a> {
    /// Derive validators from the schema's field definitions
    pub fn for_schema(schema: &'a EntitySchema) -> Self {
        let mut config = Self {
            schema,
            validators: HashMap::new(),
        };

        for def in &schema.fields {
            if def.required {
                config.add_validator(def.name, validators::required());
            }
            if let Some(min) = def.min {
                config.add_validator(def.name, validators::min_value(min));
            }
            if let Some(max) = def.max {
                config.add_validator(def.name, validators::max_value(max));
            }
            if let Some(len) = def.max_len {
                config.add_validator(def.name, validators::max_length(len));
            }
            if let Some(values) = def.kind.choices() {
                config.add_validator(def.name, validators::in_list(values));
            }
        }

        config
    }

    /// Add a validator for a field
    pub fn add_validator<F>(&mut self, field: &'static str, validator: F)
    where
        F: Fn(&str, &FieldValue) -> Result<(), String> + Send + Sync + 'static,
    {
        self.validators
            .entry(field)
            .or_default()
            .push(Box::new(validator));
    }

    /// Parse and validate every schema field of the draft.
    ///
    /// Errors are collected for all fields (first message per field) so the
    /// form can show them together. `now` seeds generated document numbers.
    pub fn parse(&self, draft: &Draft, now: DateTime<Utc>) -> Result<FieldMap, ValidationError> {
        let mut fields = FieldMap::new();
        let mut errors = Vec::new();

        for def in &self.schema.fields {
            let checked = parse_field(def, draft, now)
                .and_then(|value| self.validate_value(def, &value).map(|_| value));
            match checked {
                Ok(value) => {
                    fields.insert(def.name.to_string(), value);
                }
                Err(message) => errors.push(FieldValidationError::new(def.name, message)),
            }
        }

        if errors.is_empty() {
            Ok(fields)
        } else {
            Err(ValidationError::FieldErrors(errors))
        }
    }

    /// Run the field's validators against an already typed value
    pub fn validate_value(&self, def: &FieldDef, value: &FieldValue) -> Result<(), String> {
        if let Some(validators) = self.validators.get(def.name) {
            for validator in validators {
                validator(def.label, value)?;
            }
        }
        Ok(())
    }
}

fn parse_field(def: &FieldDef, draft: &Draft, now: DateTime<Utc>) -> Result<FieldValue, String> {
    if def.kind == FieldKind::Boolean {
        return Ok(FieldValue::Boolean(draft.flag(def.name)));
    }

    let raw = draft.text(def.name);
    if raw.trim().is_empty() {
        // required() reports the null
        if def.required {
            return Ok(FieldValue::Null);
        }
        return Ok(match (&def.blank, def.kind) {
            (BlankPolicy::Value(value), _) => value.clone(),
            (BlankPolicy::Generate, FieldKind::DocumentNumber { prefix }) => {
                FieldValue::String(document_number(prefix, now))
            }
            _ => FieldValue::Null,
        });
    }

    let text = raw.trim();
    match def.kind {
        FieldKind::FreeText => Ok(FieldValue::String(raw.to_string())),
        FieldKind::Text
        | FieldKind::Choice(_)
        | FieldKind::Status(_)
        | FieldKind::Image
        | FieldKind::DocumentNumber { .. } => Ok(FieldValue::String(text.to_string())),
        FieldKind::Currency | FieldKind::Percentage | FieldKind::Decimal => text
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .map(FieldValue::Float)
            .ok_or_else(|| format!("{} must be a number", def.label)),
        FieldKind::Integer => text
            .parse::<i64>()
            .map(FieldValue::Integer)
            .map_err(|_| format!("{} must be a whole number", def.label)),
        FieldKind::Date => NaiveDate::parse_from_str(text, DATE_FORMAT)
            .map(FieldValue::Date)
            .map_err(|_| format!("{} must be a date (YYYY-MM-DD)", def.label)),
        FieldKind::Reference(_) => Uuid::parse_str(text)
            .map(FieldValue::Uuid)
            .map_err(|_| format!("{} must be selected from the list", def.label)),
        FieldKind::Boolean => Ok(FieldValue::Boolean(draft.flag(def.name))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::field::ReferenceTarget;
    use crate::core::status::StatusDomain;
    use chrono::TimeZone;

    fn schema() -> EntitySchema {
        EntitySchema::new("purchase_order", "purchase_orders", "Purchase Orders")
            .field(FieldDef::document_number("po_number", "PO Number", "PO"))
            .field(FieldDef::date("po_date", "PO Date").required())
            .field(
                FieldDef::reference(
                    "fruit_id",
                    "Fruit",
                    ReferenceTarget {
                        collection: "fruits",
                        label_field: "fruit_name",
                    },
                )
                .required(),
            )
            .field(FieldDef::currency("price", "Price").required().min(0.01))
            .field(FieldDef::percentage("gst_percent", "GST %").blank_as(FieldValue::Float(0.0)))
            .field(FieldDef::integer("quantity", "Quantity").min(1.0))
            .field(FieldDef::status("status", "Status", StatusDomain::Payment))
            .field(FieldDef::free_text("remark", "Remark").max_len(10))
            .field(FieldDef::boolean("active", "Active").default_flag(true))
    }

    fn now() -> DateTime<Utc> {
        Utc.timestamp_millis_opt(1_717_171_717_171).unwrap()
    }

    fn valid_draft() -> Draft {
        let mut draft = Draft::default();
        draft.set("po_date", "2024-05-31");
        draft.set("fruit_id", Uuid::nil().to_string());
        draft.set("price", "100");
        draft.set("active", true);
        draft
    }

    #[test]
    fn test_parse_valid_draft() {
        let schema = schema();
        let fields = EntityValidationConfig::for_schema(&schema)
            .parse(&valid_draft(), now())
            .unwrap();

        assert_eq!(fields["price"], FieldValue::Float(100.0));
        assert_eq!(fields["gst_percent"], FieldValue::Float(0.0));
        assert_eq!(fields["quantity"], FieldValue::Null);
        assert_eq!(fields["remark"], FieldValue::Null);
        assert_eq!(fields["active"], FieldValue::Boolean(true));
        assert_eq!(fields["po_number"], FieldValue::String("PO-71717171".into()));
    }

    #[test]
    fn test_supplied_document_number_is_kept() {
        let schema = schema();
        let mut draft = valid_draft();
        draft.set("po_number", " PO-00000042 ");
        let fields = EntityValidationConfig::for_schema(&schema)
            .parse(&draft, now())
            .unwrap();
        assert_eq!(fields["po_number"], FieldValue::String("PO-00000042".into()));
    }

    #[test]
    fn test_free_form_document_number_is_kept() {
        let schema = schema();
        let mut draft = valid_draft();
        draft.set("po_number", "PO-2024-001");
        let fields = EntityValidationConfig::for_schema(&schema)
            .parse(&draft, now())
            .unwrap();
        assert_eq!(fields["po_number"], FieldValue::String("PO-2024-001".into()));
    }

    #[test]
    fn test_errors_are_collected_per_field() {
        let schema = schema();
        let mut draft = Draft::default();
        draft.set("price", "0");
        draft.set("gst_percent", "abc");
        draft.set("quantity", "1.5");
        draft.set("status", "Pending");

        let err = EntityValidationConfig::for_schema(&schema)
            .parse(&draft, now())
            .unwrap_err();
        let ValidationError::FieldErrors(errors) = err else {
            panic!("expected field errors");
        };
        let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(
            fields,
            vec!["po_date", "fruit_id", "price", "gst_percent", "quantity", "status"]
        );
        assert_eq!(errors[0].message, "PO Date is required");
        assert_eq!(errors[2].message, "Price must be at least 0.01");
        assert_eq!(errors[3].message, "GST % must be a number");
    }

    #[test]
    fn test_percentage_bounds() {
        let schema = schema();
        let config = EntityValidationConfig::for_schema(&schema);

        let mut draft = valid_draft();
        draft.set("gst_percent", "100");
        assert!(config.parse(&draft, now()).is_ok());

        draft.set("gst_percent", "100.01");
        assert!(config.parse(&draft, now()).is_err());
    }

    #[test]
    fn test_free_text_length() {
        let schema = schema();
        let mut draft = valid_draft();
        draft.set("remark", "way more than ten");
        assert!(EntityValidationConfig::for_schema(&schema)
            .parse(&draft, now())
            .is_err());
    }

    #[test]
    fn test_custom_validator() {
        let schema = schema();
        let mut config = EntityValidationConfig::for_schema(&schema);
        config.add_validator("price", |label, value| match value.as_f64() {
            Some(v) if v > 50.0 => Err(format!("{} is over budget", label)),
            _ => Ok(()),
        });

        let err = config.parse(&valid_draft(), now()).unwrap_err();
        assert!(err.to_string().contains("Price is over budget"));
    }
}
