//! Dashboard summary metrics
//!
//! Folds raw records rather than typed entities so a row with an unexpected
//! null in a column the summary does not read still counts.

use serde::Serialize;
use std::sync::Arc;

use crate::core::entity::Entity;
use crate::core::error::{GatewayError, OrchardError};
use crate::core::gateway::PersistenceGateway;
use crate::core::pricing::{format_currency, record_total};
use crate::core::query::ListQuery;
use crate::core::record::Record;
use crate::core::status::{DeliveryStatus, PaymentStatus};
use crate::entities::{Delivery, Payment, SalesInvoice};

/// Scalar metrics shown on the reports page
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Summary {
    /// Sum of tax-inclusive invoice totals
    pub total_revenue: f64,
    /// Number of sales invoices
    pub total_orders: usize,
    /// Payments with status `Success`
    pub successful_payments: usize,
    /// Deliveries with status `Pending`
    pub pending_deliveries: usize,
}

impl Summary {
    pub fn revenue_text(&self) -> String {
        format_currency(self.total_revenue)
    }
}

fn count_status(records: &[Record], status: &str) -> usize {
    records
        .iter()
        .filter(|r| r.get_str("status") == Some(status))
        .count()
}

/// Fold the rows of the three collections into a [`Summary`].
///
/// An invoice without a price adds nothing to revenue but still counts as
/// an order.
pub fn summarize(invoices: &[Record], payments: &[Record], deliveries: &[Record]) -> Summary {
    let total_revenue = match &SalesInvoice::schema().total {
        Some(spec) => invoices
            .iter()
            .filter_map(|r| record_total(spec, r))
            .fold(0.0, |acc, total| acc + total),
        None => 0.0,
    };

    Summary {
        total_revenue,
        total_orders: invoices.len(),
        successful_payments: count_status(payments, PaymentStatus::Success.as_str()),
        pending_deliveries: count_status(deliveries, DeliveryStatus::Pending.as_str()),
    }
}

/// A summary plus the reads that failed while computing it.
///
/// A failed read contributes nothing to its metrics; the others are still
/// computed.
#[derive(Debug, Default)]
pub struct SummaryReport {
    pub summary: Summary,
    pub failures: Vec<(&'static str, OrchardError)>,
}

impl SummaryReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

pub struct SummaryCalculator {
    gateway: Arc<dyn PersistenceGateway>,
}

impl SummaryCalculator {
    pub fn new(gateway: Arc<dyn PersistenceGateway>) -> Self {
        Self { gateway }
    }

    /// Read the three collections concurrently and fold them once all
    /// reads have finished. Nothing is cached.
    pub async fn load(&self) -> SummaryReport {
        let query = ListQuery::new();
        let (invoices, payments, deliveries) = tokio::join!(
            self.gateway.list(SalesInvoice::collection(), &query),
            self.gateway.list(Payment::collection(), &query),
            self.gateway.list(Delivery::collection(), &query)
        );

        let mut failures = Vec::new();
        let invoices = settle(SalesInvoice::collection(), invoices, &mut failures);
        let payments = settle(Payment::collection(), payments, &mut failures);
        let deliveries = settle(Delivery::collection(), deliveries, &mut failures);

        SummaryReport {
            summary: summarize(&invoices, &payments, &deliveries),
            failures,
        }
    }
}

fn settle(
    collection: &'static str,
    result: Result<Vec<Record>, GatewayError>,
    failures: &mut Vec<(&'static str, OrchardError)>,
) -> Vec<Record> {
    match result {
        Ok(rows) => rows,
        Err(err) => {
            tracing::warn!(collection = %collection, error = %err, "summary read failed");
            failures.push((collection, err.into()));
            Vec::new()
        }
    }
}
