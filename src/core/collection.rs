//! Typed access to one collection

use std::marker::PhantomData;
use std::sync::Arc;
use uuid::Uuid;

use crate::core::entity::Entity;
use crate::core::error::OrchardError;
use crate::core::gateway::PersistenceGateway;
use crate::core::query::ListQuery;

/// A gateway bound to the collection of `T`
pub struct Collection<T: Entity> {
    gateway: Arc<dyn PersistenceGateway>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Entity> Clone for Collection<T> {
    fn clone(&self) -> Self {
        Self {
            gateway: self.gateway.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T: Entity> Collection<T> {
    pub fn new(gateway: Arc<dyn PersistenceGateway>) -> Self {
        Self {
            gateway,
            _marker: PhantomData,
        }
    }

    pub async fn list(&self, query: &ListQuery) -> Result<Vec<T>, OrchardError> {
        let records = self.gateway.list(T::collection(), query).await?;
        records
            .iter()
            .map(|r| T::from_record(r).map_err(OrchardError::from))
            .collect()
    }

    pub async fn get(&self, id: &Uuid) -> Result<Option<T>, OrchardError> {
        match self.gateway.get(T::collection(), id).await? {
            Some(record) => Ok(Some(T::from_record(&record)?)),
            None => Ok(None),
        }
    }

    /// Store the entity's fields; the returned copy carries the store's id
    pub async fn insert(&self, entity: &T) -> Result<T, OrchardError> {
        let record = self
            .gateway
            .create(T::collection(), entity.to_fields()?)
            .await?;
        Ok(T::from_record(&record)?)
    }
}
