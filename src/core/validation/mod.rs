//! Draft validation
//!
//! Validators are plain closures attached per field by
//! [`EntityValidationConfig`], which derives them from an entity schema.

pub mod config;
pub mod validators;

pub use config::EntityValidationConfig;
pub use validators::FieldValidator;
