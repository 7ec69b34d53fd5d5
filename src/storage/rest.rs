//! PersistenceGateway over a PostgREST-style HTTP API

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;
use uuid::Uuid;

use super::postgrest;
use crate::config::StoreConfig;
use crate::core::error::{GatewayError, OrchardError};
use crate::core::gateway::PersistenceGateway;
use crate::core::query::ListQuery;
use crate::core::record::{FieldMap, Record};
use crate::core::schema::EntitySchema;

/// Gateway talking to a hosted store
///
/// Rows of collections registered through `schemas` are typed with their
/// schema; other collections decode untyped.
#[derive(Clone)]
pub struct RestGateway {
    client: Client,
    base_url: String,
    api_key: String,
    schemas: HashMap<&'static str, &'static EntitySchema>,
}

impl RestGateway {
    pub fn new(
        config: &StoreConfig,
        api_key: impl Into<String>,
        schemas: impl IntoIterator<Item = &'static EntitySchema>,
    ) -> Result<Self, OrchardError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| OrchardError::Internal(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            api_key: api_key.into(),
            schemas: schemas.into_iter().map(|s| (s.collection, s)).collect(),
        })
    }

    /// Build from configuration, reading the key from the environment
    pub fn from_config(
        config: &StoreConfig,
        schemas: impl IntoIterator<Item = &'static EntitySchema>,
    ) -> Result<Self, OrchardError> {
        let api_key = config.api_key()?;
        Self::new(config, api_key, schemas)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    fn url(&self, collection: &str) -> String {
        postgrest::collection_url(&self.base_url, collection)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, GatewayError> {
        let response = self
            .authorized(request)
            .send()
            .await
            .map_err(|e| GatewayError::Unavailable(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<Value>(&body)
            .ok()
            .and_then(|v| v.get("message").and_then(Value::as_str).map(String::from))
            .unwrap_or(body);
        Err(GatewayError::Rejected {
            status: status.as_u16(),
            message,
        })
    }

    async fn rows(&self, collection: &str, response: Response) -> Result<Vec<Record>, GatewayError> {
        let json: Value = response
            .json()
            .await
            .map_err(|e| GatewayError::Decode(e.to_string()))?;
        postgrest::decode_rows(self.schemas.get(collection).copied(), &json)
    }
}

#[async_trait]
impl PersistenceGateway for RestGateway {
    async fn list(&self, collection: &str, query: &ListQuery) -> Result<Vec<Record>, GatewayError> {
        tracing::debug!(collection = %collection, "GET");
        let request = self
            .client
            .get(self.url(collection))
            .query(&postgrest::list_params(query));
        let response = self.send(request).await?;
        self.rows(collection, response).await
    }

    async fn get(&self, collection: &str, id: &Uuid) -> Result<Option<Record>, GatewayError> {
        let request = self
            .client
            .get(self.url(collection))
            .query(&[("select".to_string(), "*".to_string()), postgrest::id_param(id)]);
        let response = self.send(request).await?;
        Ok(self.rows(collection, response).await?.into_iter().next())
    }

    async fn create(&self, collection: &str, fields: FieldMap) -> Result<Record, GatewayError> {
        tracing::debug!(collection = %collection, "POST");
        let request = self
            .client
            .post(self.url(collection))
            .header("Prefer", "return=representation")
            .json(&postgrest::body(&fields));
        let response = self.send(request).await?;

        self.rows(collection, response)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| GatewayError::Decode("insert returned no row".to_string()))
    }

    async fn update(&self, collection: &str, id: &Uuid, fields: FieldMap) -> Result<(), GatewayError> {
        tracing::debug!(collection = %collection, id = %id, "PATCH");
        let request = self
            .client
            .patch(self.url(collection))
            .query(&[postgrest::id_param(id)])
            .json(&postgrest::body(&fields));
        self.send(request).await?;
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &Uuid) -> Result<(), GatewayError> {
        tracing::debug!(collection = %collection, id = %id, "DELETE");
        let request = self
            .client
            .delete(self.url(collection))
            .query(&[postgrest::id_param(id)]);
        self.send(request).await?;
        Ok(())
    }
}
