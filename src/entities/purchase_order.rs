use chrono::NaiveDate;
use uuid::Uuid;

use super::fruit::FRUITS;
use crate::core::field::{FieldValue, ReferenceTarget};
use crate::core::pricing::line_total;
use crate::core::schema::{EntitySchema, FieldDef};
use crate::impl_record_entity;

fn schema() -> EntitySchema {
    EntitySchema::new("purchase_order", "purchase_orders", "Purchase Orders")
        .noun("purchase order")
        .field(FieldDef::document_number("po_number", "PO Number", "PO"))
        .field(FieldDef::date("po_date", "PO Date").column("Date").required())
        .field(
            FieldDef::reference(
                "fruit_id",
                "Fruit",
                ReferenceTarget {
                    collection: FRUITS,
                    label_field: "fruit_name",
                },
            )
            .required(),
        )
        .field(
            FieldDef::currency("price", "Price (USD)")
                .column("Price")
                .required()
                .min(0.01),
        )
        .field(
            FieldDef::percentage("gst_percent", "GST / Sales Tax (%)")
                .column("GST %")
                .blank_as(FieldValue::Float(0.0)),
        )
        .field(FieldDef::free_text("supplier_info", "Supplier Information").unlisted())
        .field(
            FieldDef::boolean("active", "Active")
                .default_flag(true)
                .unlisted(),
        )
        .total("price", "gst_percent")
        .empty_message("No purchase orders found.")
}

impl_record_entity!(
    /// A purchase of fruit from a supplier
    PurchaseOrder,
    schema(),
    {
        po_number: String,
        po_date: NaiveDate,
        fruit_id: Uuid,
        price: f64,
        gst_percent: Option<f64>,
        supplier_info: Option<String>,
        active: bool,
    }
);

impl PurchaseOrder {
    /// Price including GST
    pub fn total(&self) -> f64 {
        line_total(self.price, self.gst_percent.unwrap_or(0.0))
    }
}
