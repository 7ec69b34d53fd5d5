//! # Orchard
//!
//! Schema-driven record editor and reporting model for the back office of a
//! fruit-basket retailer.
//!
//! ## Features
//!
//! - **Entity Schemas**: one declarative schema per collection drives forms, validation and tables
//! - **Form State Controller**: typed drafts, per-field errors, create and edit modes
//! - **List Presenter**: newest-first tables with currency, status badge and reference formatting
//! - **Persistence Gateway**: in-memory store by default, PostgREST-style hosted store behind `rest`
//! - **Reports**: dashboard totals and filtered report tables
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use orchard::prelude::*;
//!
//! let gateway: Arc<dyn PersistenceGateway> =
//!     Arc::new(InMemoryGateway::new().with_schemas(catalog()));
//! let mut page = RecordEditor::for_entity::<Fruit>(gateway, Arc::new(SystemClock)).await;
//!
//! page.update_field("fruit_name", "Mango")?;
//! page.update_field("price", "3.5")?;
//! page.submit().await?;
//!
//! assert_eq!(page.list().rows().len(), 1);
//! ```

pub mod config;
pub mod core;
pub mod editor;
pub mod entities;
pub mod navigation;
pub mod report;
pub mod storage;
pub mod telemetry;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        clock::{Clock, FixedClock, SystemClock},
        collection::Collection,
        draft::{Draft, DraftValue},
        entity::Entity,
        error::{GatewayError, OrchardError, ValidationError},
        field::{FieldKind, FieldValue},
        gateway::PersistenceGateway,
        query::{ListQuery, Operator, OrderBy},
        record::{FieldMap, Record},
        schema::{EntitySchema, FieldDef},
        status::{DeliveryStatus, PaymentStatus, RefundStatus},
        upload::UploadLimits,
    };

    // === Macros ===
    pub use crate::impl_record_entity;

    // === Entities ===
    pub use crate::entities::{
        Basket, Decoration, Delivery, Fruit, Payment, PurchaseOrder, Refund, SalesInvoice,
        catalog, schema_for,
    };

    // === Editor ===
    pub use crate::editor::{
        ConfirmPrompt, DeleteOutcome, EditMode, FormController, ListPresenter, RecordEditor,
        SubmitOutcome,
    };

    // === Reports ===
    pub use crate::report::{
        ReportGenerator, ReportRequest, ReportTable, ReportType, StatusFilter, Summary,
        SummaryCalculator,
    };

    // === Navigation ===
    pub use crate::navigation::{Route, menu};

    // === Storage ===
    pub use crate::storage::InMemoryGateway;
    #[cfg(feature = "rest")]
    pub use crate::storage::RestGateway;

    // === Config ===
    pub use crate::config::{AppConfig, StoreConfig};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, NaiveDate, Utc};
    pub use serde::{Deserialize, Serialize};
    pub use std::sync::Arc;
    pub use uuid::Uuid;
}
