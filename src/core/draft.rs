//! Editable form state for one record

use std::collections::BTreeMap;

use crate::core::field::{DATE_FORMAT, FieldKind, FieldValue};
use crate::core::record::Record;
use crate::core::schema::{EntitySchema, FieldDefault};
use chrono::NaiveDate;

/// Value of one form input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftValue {
    /// Text inputs, selects, number and date pickers
    Text(String),
    /// Checkboxes
    Flag(bool),
}

impl From<&str> for DraftValue {
    fn from(value: &str) -> Self {
        DraftValue::Text(value.to_string())
    }
}

impl From<String> for DraftValue {
    fn from(value: String) -> Self {
        DraftValue::Text(value)
    }
}

impl From<bool> for DraftValue {
    fn from(value: bool) -> Self {
        DraftValue::Flag(value)
    }
}

/// Raw, unvalidated input values keyed by field name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    values: BTreeMap<String, DraftValue>,
}

impl Draft {
    /// Blank draft: empty strings, boolean defaults, `today` for date fields
    pub fn defaults(schema: &EntitySchema, today: NaiveDate) -> Self {
        let values = schema
            .fields
            .iter()
            .map(|def| {
                let value = match (&def.default, def.kind) {
                    (FieldDefault::Flag(flag), _) => DraftValue::Flag(*flag),
                    (_, FieldKind::Boolean) => DraftValue::Flag(false),
                    (FieldDefault::Today, _) => {
                        DraftValue::Text(today.format(DATE_FORMAT).to_string())
                    }
                    (FieldDefault::Empty, _) => DraftValue::Text(String::new()),
                };
                (def.name.to_string(), value)
            })
            .collect();

        Self { values }
    }

    /// Draft populated from a stored record, numbers and dates as strings
    pub fn from_record(schema: &EntitySchema, record: &Record) -> Self {
        let values = schema
            .fields
            .iter()
            .map(|def| {
                let stored = record.value(def.name);
                let value = match def.kind {
                    FieldKind::Boolean => DraftValue::Flag(stored.as_bool().unwrap_or(false)),
                    _ => DraftValue::Text(stored.to_draft_text()),
                };
                (def.name.to_string(), value)
            })
            .collect();

        Self { values }
    }

    pub fn get(&self, name: &str) -> Option<&DraftValue> {
        self.values.get(name)
    }

    /// Text of a field; empty for checkboxes and missing fields
    pub fn text(&self, name: &str) -> &str {
        match self.values.get(name) {
            Some(DraftValue::Text(text)) => text,
            _ => "",
        }
    }

    /// State of a checkbox; text inputs read `true` only for the literal "true"
    pub fn flag(&self, name: &str) -> bool {
        match self.values.get(name) {
            Some(DraftValue::Flag(flag)) => *flag,
            Some(DraftValue::Text(text)) => text.trim().eq_ignore_ascii_case("true"),
            None => false,
        }
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<DraftValue>) {
        self.values.insert(name.into(), value.into());
    }

    /// Whether every text input is blank
    pub fn is_blank(&self) -> bool {
        self.values.values().all(|v| match v {
            DraftValue::Text(text) => text.trim().is_empty(),
            DraftValue::Flag(_) => true,
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DraftValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Convert a stored value for display in a draft without a schema
impl From<&FieldValue> for DraftValue {
    fn from(value: &FieldValue) -> Self {
        match value {
            FieldValue::Boolean(flag) => DraftValue::Flag(*flag),
            other => DraftValue::Text(other.to_draft_text()),
        }
    }
}
