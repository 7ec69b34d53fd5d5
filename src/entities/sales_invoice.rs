use chrono::NaiveDate;
use uuid::Uuid;

use super::fruit::FRUITS;
use crate::core::field::{FieldValue, ReferenceTarget};
use crate::core::pricing::line_total;
use crate::core::schema::{EntitySchema, FieldDef};
use crate::impl_record_entity;

fn schema() -> EntitySchema {
    EntitySchema::new("sales_invoice", "sales_invoices", "Sales Invoices")
        .noun("invoice")
        .field(FieldDef::document_number("si_number", "SI Number", "SI"))
        .field(FieldDef::date("si_date", "Invoice Date").column("Date").required())
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
        .field(
            FieldDef::boolean("active", "Active")
                .default_flag(true)
                .unlisted(),
        )
        .total("price", "gst_percent")
        .empty_message("No invoices found.")
}

impl_record_entity!(
    /// A sale of fruit to a customer
    SalesInvoice,
    schema(),
    {
        si_number: String,
        si_date: NaiveDate,
        fruit_id: Uuid,
        price: f64,
        gst_percent: Option<f64>,
        active: bool,
    }
);

impl SalesInvoice {
    /// Price including GST
    pub fn total(&self) -> f64 {
        line_total(self.price, self.gst_percent.unwrap_or(0.0))
    }
}
