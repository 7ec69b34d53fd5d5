//! In-memory implementation of PersistenceGateway for testing and development

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

use crate::core::clock::{Clock, SystemClock};
use crate::core::error::GatewayError;
use crate::core::gateway::PersistenceGateway;
use crate::core::query::ListQuery;
use crate::core::record::{FieldMap, Record};
use crate::core::schema::EntitySchema;

/// Reference column checked on write: (field, target collection)
type ReferenceRule = (&'static str, &'static str);

#[derive(Default)]
struct Tables {
    rows: HashMap<String, HashMap<Uuid, Record>>,
    last_created: Option<DateTime<Utc>>,
}

/// In-memory gateway
///
/// Useful for testing and development. Uses RwLock for thread-safe access.
/// Assigns v4 ids and strictly increasing `created_at` timestamps so the
/// default newest-first order is stable.
#[derive(Clone)]
pub struct InMemoryGateway {
    tables: Arc<RwLock<Tables>>,
    references: Arc<HashMap<&'static str, Vec<ReferenceRule>>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryGateway {
    /// Create an empty gateway on the system clock
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            tables: Arc::new(RwLock::new(Tables::default())),
            references: Arc::new(HashMap::new()),
            clock,
        }
    }

    /// Reject writes whose reference fields point at missing records, the
    /// way a foreign key would
    pub fn with_schemas<'a>(mut self, schemas: impl IntoIterator<Item = &'a EntitySchema>) -> Self {
        let mut references: HashMap<&'static str, Vec<ReferenceRule>> = HashMap::new();
        for schema in schemas {
            let rules: Vec<_> = schema
                .references()
                .map(|(def, target)| (def.name, target.collection))
                .collect();
            if !rules.is_empty() {
                references.insert(schema.collection, rules);
            }
        }
        self.references = Arc::new(references);
        self
    }

    /// Number of records in a collection
    pub fn count(&self, collection: &str) -> Result<usize, GatewayError> {
        let tables = self.tables.read().map_err(lock_error)?;
        Ok(tables.rows.get(collection).map_or(0, HashMap::len))
    }

    /// Check reference columns of a write. Values equal to those in
    /// `stored` were checked when first written and are not checked again.
    fn check_references(
        &self,
        tables: &Tables,
        collection: &str,
        fields: &FieldMap,
        stored: Option<&FieldMap>,
    ) -> Result<(), GatewayError> {
        let Some(rules) = self.references.get(collection) else {
            return Ok(());
        };

        for (field, target) in rules {
            let Some(value) = fields.get(*field).filter(|v| !v.is_null()) else {
                continue;
            };
            if stored.and_then(|s| s.get(*field)) == Some(value) {
                continue;
            }
            let exists = value.as_uuid().is_some_and(|id| {
                tables
                    .rows
                    .get(*target)
                    .is_some_and(|rows| rows.contains_key(&id))
            });
            if !exists {
                return Err(GatewayError::IntegrityViolation {
                    collection: collection.to_string(),
                    field: field.to_string(),
                    target: target.to_string(),
                });
            }
        }
        Ok(())
    }
}

impl Default for InMemoryGateway {
    fn default() -> Self {
        Self::new()
    }
}

fn lock_error(e: impl std::fmt::Display) -> GatewayError {
    GatewayError::Unavailable(format!("Failed to acquire lock: {}", e))
}

#[async_trait]
impl PersistenceGateway for InMemoryGateway {
    async fn list(&self, collection: &str, query: &ListQuery) -> Result<Vec<Record>, GatewayError> {
        let tables = self.tables.read().map_err(lock_error)?;

        let rows = tables
            .rows
            .get(collection)
            .map(|rows| query.apply(rows.values().cloned()))
            .unwrap_or_default();
        tracing::debug!(collection = %collection, count = rows.len(), "list");
        Ok(rows)
    }

    async fn get(&self, collection: &str, id: &Uuid) -> Result<Option<Record>, GatewayError> {
        let tables = self.tables.read().map_err(lock_error)?;

        Ok(tables
            .rows
            .get(collection)
            .and_then(|rows| rows.get(id))
            .cloned())
    }

    async fn create(&self, collection: &str, fields: FieldMap) -> Result<Record, GatewayError> {
        let mut tables = self.tables.write().map_err(lock_error)?;
        self.check_references(&tables, collection, &fields, None)?;

        let mut created_at = self.clock.now();
        if let Some(last) = tables.last_created.filter(|last| created_at <= *last) {
            created_at = last + Duration::microseconds(1);
        }
        tables.last_created = Some(created_at);

        let record = Record::new(Uuid::new_v4(), created_at, fields);
        tables
            .rows
            .entry(collection.to_string())
            .or_default()
            .insert(record.id, record.clone());

        Ok(record)
    }

    async fn update(&self, collection: &str, id: &Uuid, fields: FieldMap) -> Result<(), GatewayError> {
        let mut tables = self.tables.write().map_err(lock_error)?;
        let not_found = || GatewayError::NotFound {
            collection: collection.to_string(),
            id: *id,
        };

        let stored = tables
            .rows
            .get(collection)
            .and_then(|rows| rows.get(id))
            .ok_or_else(not_found)?;
        self.check_references(&tables, collection, &fields, Some(&stored.fields))?;

        let record = tables
            .rows
            .get_mut(collection)
            .and_then(|rows| rows.get_mut(id))
            .ok_or_else(not_found)?;

        for (name, value) in fields {
            if name == "id" || name == "created_at" {
                continue;
            }
            record.fields.insert(name, value);
        }
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &Uuid) -> Result<(), GatewayError> {
        let mut tables = self.tables.write().map_err(lock_error)?;

        if let Some(rows) = tables.rows.get_mut(collection) {
            rows.remove(id);
        }
        Ok(())
    }
}
