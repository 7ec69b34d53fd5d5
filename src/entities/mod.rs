//! The back-office entities and their schemas

pub mod basket;
pub mod decoration;
pub mod delivery;
pub mod fruit;
pub mod macros;
pub mod payment;
pub mod purchase_order;
pub mod refund;
pub mod sales_invoice;

pub use basket::Basket;
pub use decoration::Decoration;
pub use delivery::Delivery;
pub use fruit::Fruit;
pub use payment::Payment;
pub use purchase_order::PurchaseOrder;
pub use refund::Refund;
pub use sales_invoice::SalesInvoice;

use crate::core::entity::Entity;
use crate::core::error::EntityError;
use crate::core::schema::EntitySchema;

/// Schema of every managed collection, in menu order
pub fn catalog() -> [&'static EntitySchema; 8] {
    [
        Fruit::schema(),
        Basket::schema(),
        Decoration::schema(),
        PurchaseOrder::schema(),
        SalesInvoice::schema(),
        Payment::schema(),
        Refund::schema(),
        Delivery::schema(),
    ]
}

/// Look up a schema by collection name
pub fn schema_for(collection: &str) -> Result<&'static EntitySchema, EntityError> {
    catalog()
        .into_iter()
        .find(|s| s.collection == collection)
        .ok_or_else(|| EntityError::UnknownType {
            entity_type: collection.to_string(),
        })
}
