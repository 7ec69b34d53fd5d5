//! Typed error handling for orchard
//!
//! # Error Categories
//!
//! - [`EntityError`]: record lookup and (de)serialization
//! - [`ValidationError`]: draft values rejected before any gateway call
//! - [`GatewayError`]: the persistence gateway reported a failure
//! - [`UploadError`]: an image was rejected before upload
//! - [`ConfigError`]: configuration values out of range
//!
//! Every error exposes a stable [`OrchardError::error_code`] so pages can show
//! a message and callers can still match on the category.
//!
//! ```rust,ignore
//! match editor.submit().await {
//!     Ok(outcome) => println!("saved {:?}", outcome),
//!     Err(OrchardError::Validation(errors)) => show_inline(errors),
//!     Err(e) => show_banner(e.to_string()),
//! }
//! ```

use serde::Serialize;
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// The main error type
#[derive(Debug)]
pub enum OrchardError {
    /// Record lookup or conversion errors
    Entity(EntityError),

    /// Draft validation errors
    Validation(ValidationError),

    /// Persistence gateway failures
    Gateway(GatewayError),

    /// Image upload rejections
    Upload(UploadError),

    /// Configuration errors
    Config(ConfigError),

    /// Should not happen in normal operation
    Internal(String),
}

impl fmt::Display for OrchardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrchardError::Entity(e) => write!(f, "{}", e),
            OrchardError::Validation(e) => write!(f, "{}", e),
            OrchardError::Gateway(e) => write!(f, "{}", e),
            OrchardError::Upload(e) => write!(f, "{}", e),
            OrchardError::Config(e) => write!(f, "{}", e),
            OrchardError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for OrchardError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            OrchardError::Entity(e) => Some(e),
            OrchardError::Validation(e) => Some(e),
            OrchardError::Gateway(e) => Some(e),
            OrchardError::Upload(e) => Some(e),
            OrchardError::Config(e) => Some(e),
            OrchardError::Internal(_) => None,
        }
    }
}

/// Error body handed to a page for display
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Per-field messages for validation failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<FieldValidationError>>,
}

impl OrchardError {
    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            OrchardError::Entity(e) => e.error_code(),
            OrchardError::Validation(_) => "VALIDATION_ERROR",
            OrchardError::Gateway(e) => e.error_code(),
            OrchardError::Upload(_) => "UPLOAD_REJECTED",
            OrchardError::Config(_) => "CONFIG_ERROR",
            OrchardError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Per-field messages if this is a validation failure
    pub fn field_errors(&self) -> Option<&[FieldValidationError]> {
        match self {
            OrchardError::Validation(ValidationError::FieldErrors(errors)) => Some(errors),
            _ => None,
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            fields: self.field_errors().map(<[FieldValidationError]>::to_vec),
        }
    }
}

// =============================================================================
// Entity Errors
// =============================================================================

/// Errors related to records and typed entities
#[derive(Debug)]
pub enum EntityError {
    /// Record was not found
    NotFound { entity_type: String, id: Uuid },

    /// Collection name is not part of the catalog
    UnknownType { entity_type: String },

    /// Failed to convert between a record and its typed form
    SerializationError {
        entity_type: String,
        message: String,
    },
}

impl fmt::Display for EntityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityError::NotFound { entity_type, id } => {
                write!(f, "{} with id '{}' not found", entity_type, id)
            }
            EntityError::UnknownType { entity_type } => {
                write!(f, "Unknown entity type: {}", entity_type)
            }
            EntityError::SerializationError {
                entity_type,
                message,
            } => {
                write!(
                    f,
                    "Failed to serialize/deserialize {}: {}",
                    entity_type, message
                )
            }
        }
    }
}

impl std::error::Error for EntityError {}

impl EntityError {
    pub fn error_code(&self) -> &'static str {
        match self {
            EntityError::NotFound { .. } => "ENTITY_NOT_FOUND",
            EntityError::UnknownType { .. } => "UNKNOWN_ENTITY_TYPE",
            EntityError::SerializationError { .. } => "ENTITY_SERIALIZATION_ERROR",
        }
    }
}

impl From<EntityError> for OrchardError {
    fn from(err: EntityError) -> Self {
        OrchardError::Entity(err)
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors related to draft validation
#[derive(Debug)]
pub enum ValidationError {
    /// One message per offending field, in schema order
    FieldErrors(Vec<FieldValidationError>),

    /// The draft names a field the schema does not declare
    UnknownField { field: String },
}

/// A single field validation error
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldValidationError {
    pub field: String,
    pub message: String,
}

impl FieldValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::FieldErrors(errors) => {
                let msgs: Vec<String> = errors
                    .iter()
                    .map(|e| format!("{}: {}", e.field, e.message))
                    .collect();
                write!(f, "Validation errors: {}", msgs.join(", "))
            }
            ValidationError::UnknownField { field } => {
                write!(f, "Unknown field: {}", field)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

impl ValidationError {
    /// Single-field shorthand
    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        ValidationError::FieldErrors(vec![FieldValidationError::new(field, message)])
    }
}

impl From<ValidationError> for OrchardError {
    fn from(err: ValidationError) -> Self {
        OrchardError::Validation(err)
    }
}

// =============================================================================
// Gateway Errors
// =============================================================================

/// Failure signal returned by a persistence gateway
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GatewayError {
    #[error("{collection} record '{id}' not found")]
    NotFound { collection: String, id: Uuid },

    #[error("{collection}.{field} must reference an existing {target} record")]
    IntegrityViolation {
        collection: String,
        field: String,
        target: String,
    },

    #[error("store rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("store returned an unreadable response: {0}")]
    Decode(String),

    #[error("store is unavailable: {0}")]
    Unavailable(String),
}

impl GatewayError {
    pub fn error_code(&self) -> &'static str {
        match self {
            GatewayError::NotFound { .. } => "RECORD_NOT_FOUND",
            GatewayError::IntegrityViolation { .. } => "INTEGRITY_VIOLATION",
            GatewayError::Rejected { .. } => "STORE_REJECTED",
            GatewayError::Decode(_) => "STORE_DECODE_ERROR",
            GatewayError::Unavailable(_) => "STORE_UNAVAILABLE",
        }
    }
}

impl From<GatewayError> for OrchardError {
    fn from(err: GatewayError) -> Self {
        OrchardError::Gateway(err)
    }
}

// =============================================================================
// Upload Errors
// =============================================================================

/// Reasons an image is rejected locally
#[derive(Debug, Clone, PartialEq, Error)]
pub enum UploadError {
    #[error("No file selected")]
    Empty,

    #[error("File size must be less than {limit_mb:.1}MB")]
    TooLarge { size: usize, limit_mb: f64 },

    #[error("Unsupported file type '{mime}', expected one of {accepted:?}")]
    UnsupportedType { mime: String, accepted: Vec<String> },
}

impl From<UploadError> for OrchardError {
    fn from(err: UploadError) -> Self {
        OrchardError::Upload(err)
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration values
#[derive(Debug)]
pub enum ConfigError {
    /// A value is outside its allowed range
    InvalidValue { field: String, message: String },

    /// A required value is missing
    Missing { field: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidValue { field, message } => {
                write!(f, "Invalid configuration value for '{}': {}", field, message)
            }
            ConfigError::Missing { field } => {
                write!(f, "Missing configuration value: {}", field)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<ConfigError> for OrchardError {
    fn from(err: ConfigError) -> Self {
        OrchardError::Config(err)
    }
}
