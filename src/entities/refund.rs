use crate::core::schema::{EntitySchema, FieldDef};
use crate::core::status::{RefundStatus, StatusDomain};
use crate::impl_record_entity;

fn schema() -> EntitySchema {
    EntitySchema::new("refund", "refunds", "Refund Management")
        .noun("refund record")
        .field(
            FieldDef::text("customer_name", "Customer Name")
                .column("Customer")
                .required(),
        )
        .field(
            FieldDef::currency("amount", "Refund Amount (USD)")
                .column("Amount")
                .min(0.01),
        )
        .field(
            FieldDef::status("refund_status", "Refund Status", StatusDomain::Refund)
                .column("Status")
                .required(),
        )
        .field(FieldDef::free_text("remark", "Remark"))
        .show_created()
        .empty_message("No refunds found.")
}

impl_record_entity!(
    /// Money returned to a customer
    Refund,
    schema(),
    {
        customer_name: String,
        amount: Option<f64>,
        refund_status: String,
        remark: Option<String>,
    }
);

impl Refund {
    pub fn status(&self) -> Option<RefundStatus> {
        self.refund_status.parse().ok()
    }
}
