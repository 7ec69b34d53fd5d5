use crate::core::schema::{EntitySchema, FieldDef};
use crate::core::status::{PaymentStatus, StatusDomain};
use crate::impl_record_entity;

fn schema() -> EntitySchema {
    EntitySchema::new("payment", "payments", "Payment Management")
        .noun("payment record")
        .field(
            FieldDef::text("customer_name", "Customer Name")
                .column("Customer")
                .required(),
        )
        .field(
            FieldDef::currency("amount", "Amount (USD)")
                .column("Amount")
                .min(0.01),
        )
        .field(
            FieldDef::status("status", "Payment Status", StatusDomain::Payment)
                .column("Status")
                .required(),
        )
        .field(FieldDef::free_text("remark", "Remark"))
        .show_created()
        .empty_message("No payments found.")
}

impl_record_entity!(
    /// A customer payment
    Payment,
    schema(),
    {
        customer_name: String,
        amount: Option<f64>,
        status: String,
        remark: Option<String>,
    }
);

impl Payment {
    pub fn payment_status(&self) -> Option<PaymentStatus> {
        self.status.parse().ok()
    }

    pub fn is_successful(&self) -> bool {
        self.payment_status() == Some(PaymentStatus::Success)
    }
}
