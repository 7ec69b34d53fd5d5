//! Core module containing the schema, record and gateway abstractions

pub mod clock;
pub mod collection;
pub mod draft;
pub mod entity;
pub mod error;
pub mod field;
pub mod gateway;
pub mod numbering;
pub mod pricing;
pub mod query;
pub mod record;
pub mod reference;
pub mod schema;
pub mod status;
pub mod upload;
pub mod validation;

pub use clock::{Clock, FixedClock, SystemClock};
pub use collection::Collection;
pub use draft::{Draft, DraftValue};
pub use entity::Entity;
pub use error::{FieldValidationError, GatewayError, OrchardError, UploadError, ValidationError};
pub use field::{FieldFormat, FieldKind, FieldValue, ReferenceTarget};
pub use gateway::PersistenceGateway;
pub use query::{ListQuery, Operator, OrderBy, SortDirection};
pub use record::{FieldMap, Record};
pub use reference::{ReferenceResolver, SelectOption};
pub use schema::{BlankPolicy, EntitySchema, FieldDef, FieldDefault, TotalSpec};
pub use status::{BadgeColor, DecorationType, DeliveryStatus, PaymentStatus, RefundStatus, StatusDomain};
pub use upload::{ImageUpload, UploadLimits};
