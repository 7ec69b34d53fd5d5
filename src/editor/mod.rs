//! Generic record editor
//!
//! One [`RecordEditor`] drives one management page: it pairs a
//! [`FormController`] with a [`ListPresenter`] for a single entity schema and
//! keeps the list in sync after every successful mutation.
//!
//! ```rust,ignore
//! let mut page = RecordEditor::mount(Fruit::schema(), gateway, clock).await;
//! page.update_field("fruit_name", "Mango")?;
//! page.update_field("price", "3.5")?;
//! page.submit().await?;
//! for row in page.list().rows() { /* render */ }
//! ```

pub mod confirm;
pub mod form;
pub mod presenter;
pub mod scope;

pub use confirm::ConfirmPrompt;
pub use form::{EditMode, FormController, SubmitOutcome};
pub use presenter::{Cell, ListPresenter, ReferenceLabels, RowView};
pub use scope::PageScope;

use futures::future::try_join_all;
use futures::try_join;
use std::sync::Arc;
use uuid::Uuid;

use crate::core::clock::Clock;
use crate::core::draft::DraftValue;
use crate::core::entity::Entity;
use crate::core::error::{EntityError, GatewayError, OrchardError, ValidationError};
use crate::core::field::FieldKind;
use crate::core::gateway::PersistenceGateway;
use crate::core::query::ListQuery;
use crate::core::record::Record;
use crate::core::reference::{ReferenceResolver, SelectOption};
use crate::core::schema::EntitySchema;
use crate::core::upload::{ImageUpload, UploadLimits};

/// Result of a delete request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// The user declined the confirmation; nothing was sent
    Cancelled,
}

pub struct RecordEditor {
    schema: &'static EntitySchema,
    gateway: Arc<dyn PersistenceGateway>,
    references: ReferenceResolver,
    form: FormController,
    list: ListPresenter,
    scope: PageScope,
    upload_limits: UploadLimits,
}

impl RecordEditor {
    /// Editor with an empty list; call [`RecordEditor::refresh`] to load it
    pub fn new(
        schema: &'static EntitySchema,
        gateway: Arc<dyn PersistenceGateway>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            schema,
            references: ReferenceResolver::new(gateway.clone()),
            gateway,
            form: FormController::new(schema, clock),
            list: ListPresenter::new(schema),
            scope: PageScope::new(),
            upload_limits: UploadLimits::default(),
        }
    }

    /// Editor with its first fetch done. A failed fetch is recorded on the
    /// list rather than returned.
    pub async fn mount(
        schema: &'static EntitySchema,
        gateway: Arc<dyn PersistenceGateway>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let mut editor = Self::new(schema, gateway, clock);
        let _ = editor.refresh().await;
        editor
    }

    /// Mounted editor for an entity type
    pub async fn for_entity<T: Entity>(
        gateway: Arc<dyn PersistenceGateway>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self::mount(T::schema(), gateway, clock).await
    }

    pub fn with_upload_limits(mut self, limits: UploadLimits) -> Self {
        self.upload_limits = limits;
        self
    }

    pub fn schema(&self) -> &'static EntitySchema {
        self.schema
    }

    pub fn form(&self) -> &FormController {
        &self.form
    }

    pub fn list(&self) -> &ListPresenter {
        &self.list
    }

    /// Liveness handle shared with pending fetches
    pub fn scope(&self) -> PageScope {
        self.scope.clone()
    }

    /// Leave the page; fetches still in flight are discarded on arrival
    pub fn unmount(&self) {
        self.scope.unmount();
    }

    /// Fetch the collection (newest first) and the labels of its references.
    ///
    /// Failures are recorded on the list and returned.
    pub async fn refresh(&mut self) -> Result<(), OrchardError> {
        self.list.begin_load();
        let scope = self.scope.clone();
        let fetched = self.fetch().await;

        if !scope.is_mounted() {
            tracing::debug!(collection = %self.schema.collection, "page unmounted, discarding fetch");
            self.list.abandon_load();
            return Ok(());
        }

        match fetched {
            Ok((records, labels)) => {
                tracing::debug!(
                    collection = %self.schema.collection,
                    count = records.len(),
                    "list refreshed"
                );
                self.list.apply(records, labels);
                Ok(())
            }
            Err(err) => {
                tracing::warn!(collection = %self.schema.collection, error = %err, "list refresh failed");
                self.list.fail(err.to_string());
                Err(err)
            }
        }
    }

    async fn fetch(&self) -> Result<(Vec<Record>, ReferenceLabels), OrchardError> {
        let query = ListQuery::new();
        let label_reads = self.schema.references().map(|(def, target)| async move {
            let labels = self.references.labels(target).await?;
            Ok::<_, GatewayError>((def.name.to_string(), labels))
        });

        let (records, labels) = try_join!(
            self.gateway.list(self.schema.collection, &query),
            try_join_all(label_reads)
        )?;
        Ok((records, labels.into_iter().collect()))
    }

    /// Set one form input
    pub fn update_field(&mut self, name: &str, value: impl Into<DraftValue>) -> Result<(), ValidationError> {
        self.form.update_field(name, value)
    }

    /// Check an image against the page's limits and put it in the form
    pub fn upload_image(
        &mut self,
        field: &str,
        file_name: &str,
        mime: &str,
        bytes: &[u8],
    ) -> Result<ImageUpload, OrchardError> {
        let upload = ImageUpload::accept(file_name, mime, bytes, &self.upload_limits)?;
        self.form.attach_image(field, &upload)?;
        Ok(upload)
    }

    /// Submit the form, then refresh the list
    pub async fn submit(&mut self) -> Result<SubmitOutcome, OrchardError> {
        match self.form.submit(&self.gateway).await {
            Ok(outcome) => {
                let _ = self.refresh().await;
                Ok(outcome)
            }
            Err(err) => {
                if let OrchardError::Gateway(_) = err {
                    self.list.fail(err.to_string());
                }
                Err(err)
            }
        }
    }

    /// Load a listed record into the form
    pub fn edit(&mut self, id: &Uuid) -> Result<(), OrchardError> {
        let record = self
            .list
            .record(id)
            .ok_or_else(|| EntityError::NotFound {
                entity_type: self.schema.singular.to_string(),
                id: *id,
            })?;
        self.form.start_edit(record);
        Ok(())
    }

    /// Abandon an edit and return to an empty create form
    pub fn cancel_edit(&mut self) {
        self.form.start_create();
    }

    /// Delete a record once the user confirms, then refresh the list
    pub async fn delete(
        &mut self,
        id: &Uuid,
        prompt: &dyn ConfirmPrompt,
    ) -> Result<DeleteOutcome, OrchardError> {
        if !prompt.confirm(&self.schema.delete_prompt()) {
            return Ok(DeleteOutcome::Cancelled);
        }

        if let Err(err) = self.gateway.delete(self.schema.collection, id).await {
            tracing::warn!(collection = %self.schema.collection, id = %id, error = %err, "delete failed");
            self.list.fail(err.to_string());
            return Err(err.into());
        }
        tracing::info!(collection = %self.schema.collection, id = %id, "record deleted");

        if self.form.editing_id() == Some(*id) {
            self.form.start_create();
        }
        let _ = self.refresh().await;
        Ok(DeleteOutcome::Deleted)
    }

    /// Selectable options for a reference field
    pub async fn reference_options(&self, field: &str) -> Result<Vec<SelectOption>, OrchardError> {
        match self.schema.field_def(field).map(|def| def.kind) {
            Some(FieldKind::Reference(target)) => Ok(self.references.options(target).await?),
            Some(_) => Err(ValidationError::field(field, "is not a reference field").into()),
            None => Err(ValidationError::UnknownField {
                field: field.to_string(),
            }
            .into()),
        }
    }
}
