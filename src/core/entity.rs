//! Typed entity trait layered over schema-driven records

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::core::error::EntityError;
use crate::core::record::{FieldMap, Record, fields_from_json};
use crate::core::schema::EntitySchema;

/// Base trait for the typed back-office entities.
///
/// Every entity has:
/// - id: assigned by the store
/// - created_at: assigned by the store
/// - a static [`EntitySchema`] describing its editable fields
///
/// Conversions to and from [`Record`] go through JSON so the struct's serde
/// shape and the schema stay the single source of truth.
pub trait Entity: Clone + Send + Sync + Serialize + DeserializeOwned + 'static {
    /// Schema of this entity's collection
    fn schema() -> &'static EntitySchema;

    /// Collection name in the store (e.g. "fruits")
    fn collection() -> &'static str {
        Self::schema().collection
    }

    /// Get the unique identifier for this entity instance
    fn id(&self) -> Uuid;

    /// Get the creation timestamp
    fn created_at(&self) -> DateTime<Utc>;

    /// Build the typed entity from a stored record
    fn from_record(record: &Record) -> Result<Self, EntityError> {
        serde_json::from_value(record.to_json()).map_err(|e| EntityError::SerializationError {
            entity_type: Self::schema().singular.to_string(),
            message: e.to_string(),
        })
    }

    /// Editable fields of this entity, typed with the schema
    fn to_fields(&self) -> Result<FieldMap, EntityError> {
        let json = serde_json::to_value(self).map_err(|e| EntityError::SerializationError {
            entity_type: Self::schema().singular.to_string(),
            message: e.to_string(),
        })?;
        fields_from_json(Self::schema(), &json)
    }
}
