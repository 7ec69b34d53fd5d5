//! Persistence gateway trait
//!
//! The editor is agnostic to where records live: every read and write goes
//! through a [`PersistenceGateway`] addressed by collection name.

use async_trait::async_trait;
use uuid::Uuid;

use crate::core::error::GatewayError;
use crate::core::query::ListQuery;
use crate::core::record::{FieldMap, Record};

/// Generic CRUD access to named collections
///
/// Implementations assign `id` and `created_at` on create. A failed call
/// must leave the store unchanged.
#[async_trait]
pub trait PersistenceGateway: Send + Sync {
    /// List records matching the query, in the query's order
    async fn list(&self, collection: &str, query: &ListQuery) -> Result<Vec<Record>, GatewayError>;

    /// Get one record by id
    async fn get(&self, collection: &str, id: &Uuid) -> Result<Option<Record>, GatewayError>;

    /// Insert a record and return it as stored
    async fn create(&self, collection: &str, fields: FieldMap) -> Result<Record, GatewayError>;

    /// Overwrite the given fields of an existing record
    async fn update(&self, collection: &str, id: &Uuid, fields: FieldMap)
    -> Result<(), GatewayError>;

    /// Delete a record
    async fn delete(&self, collection: &str, id: &Uuid) -> Result<(), GatewayError>;
}
