//! Form state controller
//!
//! Holds the draft of one record, tracks whether it creates a new record or
//! edits an existing one, and turns a valid draft into exactly one gateway
//! write.

use std::sync::Arc;
use uuid::Uuid;

use crate::core::clock::Clock;
use crate::core::draft::{Draft, DraftValue};
use crate::core::error::{FieldValidationError, OrchardError, ValidationError};
use crate::core::field::FieldKind;
use crate::core::gateway::PersistenceGateway;
use crate::core::pricing::{line_total, parse_or_zero};
use crate::core::record::{FieldMap, Record};
use crate::core::reference::ReferenceResolver;
use crate::core::schema::EntitySchema;
use crate::core::upload::ImageUpload;
use crate::core::validation::EntityValidationConfig;

/// Whether a submit inserts or updates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditMode {
    Creating,
    Editing(Uuid),
}

/// Result of a successful submit
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Created(Record),
    Updated(Uuid),
}

pub struct FormController {
    schema: &'static EntitySchema,
    clock: Arc<dyn Clock>,
    draft: Draft,
    mode: EditMode,
    /// Stored fields of the record being edited
    original: Option<FieldMap>,
    errors: Vec<FieldValidationError>,
}

impl FormController {
    /// Controller in create mode with a default draft
    pub fn new(schema: &'static EntitySchema, clock: Arc<dyn Clock>) -> Self {
        let draft = Draft::defaults(schema, clock.today());
        Self {
            schema,
            clock,
            draft,
            mode: EditMode::Creating,
            original: None,
            errors: Vec::new(),
        }
    }

    pub fn schema(&self) -> &'static EntitySchema {
        self.schema
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    pub fn editing_id(&self) -> Option<Uuid> {
        match self.mode {
            EditMode::Editing(id) => Some(id),
            EditMode::Creating => None,
        }
    }

    /// Messages from the last rejected submit
    pub fn field_errors(&self) -> &[FieldValidationError] {
        &self.errors
    }

    /// Message for one field from the last rejected submit
    pub fn error_for(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    /// Reset to an empty create-mode draft
    pub fn start_create(&mut self) {
        self.draft = Draft::defaults(self.schema, self.clock.today());
        self.mode = EditMode::Creating;
        self.original = None;
        self.errors.clear();
    }

    /// Load a stored record into the draft. Unsaved changes are discarded.
    pub fn start_edit(&mut self, record: &Record) {
        self.draft = Draft::from_record(self.schema, record);
        self.mode = EditMode::Editing(record.id);
        self.original = Some(record.fields.clone());
        self.errors.clear();
    }

    /// Set one input. Only the field name is checked here; values are
    /// validated on submit.
    pub fn update_field(
        &mut self,
        name: &str,
        value: impl Into<DraftValue>,
    ) -> Result<(), ValidationError> {
        let def = self
            .schema
            .field_def(name)
            .ok_or_else(|| ValidationError::UnknownField {
                field: name.to_string(),
            })?;
        self.draft.set(def.name, value);
        Ok(())
    }

    /// Store an accepted image in an image field
    pub fn attach_image(&mut self, name: &str, upload: &ImageUpload) -> Result<(), ValidationError> {
        match self.schema.field_def(name) {
            Some(def) if def.kind == FieldKind::Image => {
                self.draft.set(def.name, upload.data_url.clone());
                Ok(())
            }
            Some(def) => Err(ValidationError::field(
                def.name,
                format!("{} does not accept images", def.label),
            )),
            None => Err(ValidationError::UnknownField {
                field: name.to_string(),
            }),
        }
    }

    /// Tax-inclusive total of the current draft; unparsable inputs count as
    /// zero. `None` for schemas without a total.
    pub fn preview_total(&self) -> Option<f64> {
        let spec = self.schema.total?;
        let price = parse_or_zero(self.draft.text(spec.price_field));
        let tax = parse_or_zero(self.draft.text(spec.tax_field));
        Some(line_total(price, tax))
    }

    /// Parse and validate the draft without touching any state
    pub fn parse(&self) -> Result<FieldMap, ValidationError> {
        EntityValidationConfig::for_schema(self.schema).parse(&self.draft, self.clock.now())
    }

    /// Validate the draft and issue one create (create mode) or one update
    /// (edit mode).
    ///
    /// On success the form returns to an empty create-mode draft. On any
    /// failure the draft and mode are left as they were.
    pub async fn submit(
        &mut self,
        gateway: &Arc<dyn PersistenceGateway>,
    ) -> Result<SubmitOutcome, OrchardError> {
        let fields = match self.parse() {
            Ok(fields) => fields,
            Err(err) => return Err(self.reject(err.into())),
        };

        let references = ReferenceResolver::new(gateway.clone());
        if let Err(err) = references
            .check_fields(self.schema, &fields, self.original.as_ref())
            .await
        {
            return Err(self.reject(err));
        }

        let collection = self.schema.collection;
        let outcome = match self.mode {
            EditMode::Creating => {
                let record = gateway
                    .create(collection, fields)
                    .await
                    .map_err(|e| self.reject(e.into()))?;
                tracing::info!(collection = %collection, id = %record.id, "record created");
                SubmitOutcome::Created(record)
            }
            EditMode::Editing(id) => {
                gateway
                    .update(collection, &id, fields)
                    .await
                    .map_err(|e| self.reject(e.into()))?;
                tracing::info!(collection = %collection, id = %id, "record updated");
                SubmitOutcome::Updated(id)
            }
        };

        self.start_create();
        Ok(outcome)
    }

    fn reject(&mut self, err: OrchardError) -> OrchardError {
        self.errors = err.field_errors().map(|e| e.to_vec()).unwrap_or_default();
        tracing::warn!(collection = %self.schema.collection, error = %err, "submit rejected");
        err
    }
}
