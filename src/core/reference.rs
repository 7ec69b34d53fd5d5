//! Reference fields: select options, display labels and submit-time checks

use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::core::error::{FieldValidationError, GatewayError, OrchardError, ValidationError};
use crate::core::field::{FieldValue, ReferenceTarget};
use crate::core::gateway::PersistenceGateway;
use crate::core::query::{ListQuery, OrderBy};
use crate::core::record::FieldMap;
use crate::core::schema::EntitySchema;

/// One entry of a reference selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: Uuid,
    pub label: String,
}

/// Resolves reference fields against their target collections
#[derive(Clone)]
pub struct ReferenceResolver {
    gateway: Arc<dyn PersistenceGateway>,
}

impl ReferenceResolver {
    pub fn new(gateway: Arc<dyn PersistenceGateway>) -> Self {
        Self { gateway }
    }

    /// Active target records as options, ordered by label
    pub async fn options(&self, target: ReferenceTarget) -> Result<Vec<SelectOption>, GatewayError> {
        let query = ListQuery::new()
            .filter_eq("active", FieldValue::Boolean(true))
            .order_by(OrderBy::asc(target.label_field));
        let records = self.gateway.list(target.collection, &query).await?;

        Ok(records
            .into_iter()
            .map(|r| SelectOption {
                value: r.id,
                label: r.get_str(target.label_field).unwrap_or_default().to_string(),
            })
            .collect())
    }

    /// Label of every target record, active or not, for table rows
    pub async fn labels(&self, target: ReferenceTarget) -> Result<HashMap<Uuid, String>, GatewayError> {
        let records = self
            .gateway
            .list(target.collection, &ListQuery::new())
            .await?;

        Ok(records
            .into_iter()
            .filter_map(|r| {
                let label = r.get_str(target.label_field)?.to_string();
                Some((r.id, label))
            })
            .collect())
    }

    /// Check that every reference in `fields` points at an existing, active
    /// record. Values equal to those in `unchanged` (the record being
    /// edited) are accepted without a lookup.
    pub async fn check_fields(
        &self,
        schema: &EntitySchema,
        fields: &FieldMap,
        unchanged: Option<&FieldMap>,
    ) -> Result<(), OrchardError> {
        let mut errors = Vec::new();

        for (def, target) in schema.references() {
            let Some(id) = fields.get(def.name).and_then(FieldValue::as_uuid) else {
                continue;
            };
            let previous = unchanged
                .and_then(|m| m.get(def.name))
                .and_then(FieldValue::as_uuid);
            if previous == Some(id) {
                continue;
            }

            match self.gateway.get(target.collection, &id).await? {
                None => errors.push(FieldValidationError::new(
                    def.name,
                    format!("{} must reference an existing record", def.label),
                )),
                Some(record) if record.get_bool("active") == Some(false) => {
                    errors.push(FieldValidationError::new(
                        def.name,
                        format!("{} refers to an inactive record", def.label),
                    ))
                }
                Some(_) => {}
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::FieldErrors(errors).into())
        }
    }
}
