use crate::core::schema::{EntitySchema, FieldDef};
use crate::core::status::{DeliveryStatus, StatusDomain};
use crate::impl_record_entity;

fn schema() -> EntitySchema {
    EntitySchema::new("delivery", "deliveries", "Order Delivery Management")
        .noun("delivery record")
        .field(
            FieldDef::text("delivery_name", "Delivery Name / Order ID")
                .column("Delivery Name")
                .required(),
        )
        .field(
            FieldDef::status("status", "Delivery Status", StatusDomain::Delivery)
                .column("Status")
                .required(),
        )
        .field(FieldDef::free_text("delivery_address", "Delivery Address").column("Address"))
        .field(FieldDef::free_text("remark", "Remark"))
        .show_created()
        .empty_message("No deliveries found.")
}

impl_record_entity!(
    /// Shipment of an order to a customer
    Delivery,
    schema(),
    {
        delivery_name: String,
        status: String,
        delivery_address: Option<String>,
        remark: Option<String>,
    }
);

impl Delivery {
    pub fn delivery_status(&self) -> Option<DeliveryStatus> {
        self.status.parse().ok()
    }

    pub fn is_pending(&self) -> bool {
        self.delivery_status() == Some(DeliveryStatus::Pending)
    }
}
