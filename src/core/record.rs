//! Schema-agnostic record representation exchanged with the persistence gateway

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::core::error::EntityError;
use crate::core::field::FieldValue;
use crate::core::schema::EntitySchema;

/// Field name to value, excluding the store-assigned `id` and `created_at`
pub type FieldMap = BTreeMap<String, FieldValue>;

/// A stored row: identity assigned by the store plus its scalar fields
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub fields: FieldMap,
}

impl Record {
    pub fn new(id: Uuid, created_at: DateTime<Utc>, fields: FieldMap) -> Self {
        Self {
            id,
            created_at,
            fields,
        }
    }

    /// Get a field by name
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Get any column, including the `id` and `created_at` pseudo-fields.
    ///
    /// Missing fields read as null.
    pub fn value(&self, name: &str) -> FieldValue {
        match name {
            "id" => FieldValue::Uuid(self.id),
            "created_at" => FieldValue::DateTime(self.created_at),
            _ => self.fields.get(name).cloned().unwrap_or(FieldValue::Null),
        }
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(FieldValue::as_string)
    }

    pub fn get_f64(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(FieldValue::as_f64)
    }

    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(FieldValue::as_bool)
    }

    /// Flat JSON object with `id`, `created_at` and every field
    pub fn to_json(&self) -> Value {
        let mut object = Map::new();
        object.insert("id".to_string(), Value::String(self.id.to_string()));
        object.insert(
            "created_at".to_string(),
            Value::String(self.created_at.to_rfc3339()),
        );
        for (name, value) in &self.fields {
            object.insert(name.clone(), value.to_json());
        }
        Value::Object(object)
    }

    /// Decode a row returned by the store, typing each column with the schema.
    ///
    /// Columns the schema does not declare are ignored; declared columns that
    /// are absent read as null.
    pub fn from_json(schema: &EntitySchema, value: &Value) -> Result<Self, EntityError> {
        let object = value.as_object().ok_or_else(|| EntityError::SerializationError {
            entity_type: schema.singular.to_string(),
            message: "expected a JSON object".to_string(),
        })?;

        let id = object
            .get("id")
            .and_then(Value::as_str)
            .and_then(|s| Uuid::parse_str(s).ok())
            .ok_or_else(|| EntityError::SerializationError {
                entity_type: schema.singular.to_string(),
                message: "missing or malformed 'id'".to_string(),
            })?;

        let created_at = object
            .get("created_at")
            .and_then(Value::as_str)
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc))
            .ok_or_else(|| EntityError::SerializationError {
                entity_type: schema.singular.to_string(),
                message: "missing or malformed 'created_at'".to_string(),
            })?;

        Ok(Self {
            id,
            created_at,
            fields: fields_from_json(schema, value)?,
        })
    }
}

/// Type the declared columns of a JSON object with the schema
pub fn fields_from_json(schema: &EntitySchema, value: &Value) -> Result<FieldMap, EntityError> {
    let mut fields = FieldMap::new();
    for def in &schema.fields {
        let raw = value.get(def.name).unwrap_or(&Value::Null);
        let typed = FieldValue::from_json(&def.kind, raw).ok_or_else(|| {
            EntityError::SerializationError {
                entity_type: schema.singular.to_string(),
                message: format!("column '{}' has unexpected value {}", def.name, raw),
            }
        })?;
        fields.insert(def.name.to_string(), typed);
    }
    Ok(fields)
}
