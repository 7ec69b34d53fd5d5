//! Tabular reports over one collection

use chrono::{Days, NaiveDate};
use futures::future::try_join_all;
use futures::try_join;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use uuid::Uuid;

use crate::core::entity::Entity;
use crate::core::error::{GatewayError, OrchardError, ValidationError};
use crate::core::field::{FieldKind, FieldValue};
use crate::core::gateway::PersistenceGateway;
use crate::core::query::{ListQuery, Operator, OrderBy};
use crate::core::record::Record;
use crate::core::reference::ReferenceResolver;
use crate::core::schema::EntitySchema;
use crate::core::status::StatusDomain;
use crate::entities::{Delivery, Fruit, Payment, PurchaseOrder, SalesInvoice};

/// Shown before a report has been generated, or when it has no rows
pub const NO_REPORT_MESSAGE: &str = "Select a report type and click \"Generate Report\" to view data";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportType {
    Sales,
    Purchases,
    Payments,
    Deliveries,
    Inventory,
}

/// Column a report's status filter applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusColumn {
    /// The boolean `active` column
    ActiveFlag,
    /// The `status` column, restricted to a domain
    Status(StatusDomain),
}

impl ReportType {
    pub const ALL: [ReportType; 5] = [
        ReportType::Sales,
        ReportType::Purchases,
        ReportType::Payments,
        ReportType::Deliveries,
        ReportType::Inventory,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReportType::Sales => "sales",
            ReportType::Purchases => "purchases",
            ReportType::Payments => "payments",
            ReportType::Deliveries => "deliveries",
            ReportType::Inventory => "inventory",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ReportType::Sales => "Sales Invoices",
            ReportType::Purchases => "Purchase Orders",
            ReportType::Payments => "Payments",
            ReportType::Deliveries => "Deliveries",
            ReportType::Inventory => "Inventory (Fruits)",
        }
    }

    pub fn schema(&self) -> &'static EntitySchema {
        match self {
            ReportType::Sales => SalesInvoice::schema(),
            ReportType::Purchases => PurchaseOrder::schema(),
            ReportType::Payments => Payment::schema(),
            ReportType::Deliveries => Delivery::schema(),
            ReportType::Inventory => Fruit::schema(),
        }
    }

    /// Column the date range and ordering apply to
    pub fn date_column(&self) -> &'static str {
        match self {
            ReportType::Sales => "si_date",
            ReportType::Purchases => "po_date",
            _ => "created_at",
        }
    }

    pub fn status_column(&self) -> StatusColumn {
        match self {
            ReportType::Payments => StatusColumn::Status(StatusDomain::Payment),
            ReportType::Deliveries => StatusColumn::Status(StatusDomain::Delivery),
            _ => StatusColumn::ActiveFlag,
        }
    }
}

impl fmt::Display for ReportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ReportType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ValidationError::field("report_type", format!("Unknown report type '{}'", s)))
    }
}

/// Restriction on the status of reported rows
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Inactive,
    /// Exact value of a `status` column
    Status(String),
}

impl StatusFilter {
    /// `""` is all, `active` and `inactive` select on the flag, anything else
    /// is an exact status
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "" => StatusFilter::All,
            "active" => StatusFilter::Active,
            "inactive" => StatusFilter::Inactive,
            other => StatusFilter::Status(other.to_string()),
        }
    }

    fn apply(&self, report_type: ReportType, query: ListQuery) -> Result<ListQuery, ValidationError> {
        match (self, report_type.status_column()) {
            (StatusFilter::All, _) => Ok(query),
            (StatusFilter::Active, StatusColumn::ActiveFlag) => {
                Ok(query.filter_eq("active", FieldValue::Boolean(true)))
            }
            (StatusFilter::Inactive, StatusColumn::ActiveFlag) => {
                Ok(query.filter_eq("active", FieldValue::Boolean(false)))
            }
            (StatusFilter::Status(status), StatusColumn::Status(domain)) => {
                if !domain.values().contains(&status.as_str()) {
                    return Err(ValidationError::field(
                        "status_filter",
                        format!(
                            "Status filter must be one of: {} (got: {})",
                            domain.values().join(", "),
                            status
                        ),
                    ));
                }
                Ok(query.filter_eq("status", FieldValue::String(status.clone())))
            }
            _ => Err(ValidationError::field(
                "status_filter",
                format!("Status filter does not apply to {} reports", report_type.label()),
            )),
        }
    }
}

/// Parameters of one report run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRequest {
    pub report_type: ReportType,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub status_filter: StatusFilter,
}

impl ReportRequest {
    pub fn new(report_type: ReportType) -> Self {
        Self {
            report_type,
            start_date: None,
            end_date: None,
            status_filter: StatusFilter::All,
        }
    }

    /// Restrict to an inclusive date range; either end may be open
    pub fn between(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.start_date = start;
        self.end_date = end;
        self
    }

    pub fn status(mut self, filter: StatusFilter) -> Self {
        self.status_filter = filter;
        self
    }

    /// Store query for this request
    pub fn to_query(&self) -> Result<ListQuery, ValidationError> {
        if let (Some(start), Some(end)) = (self.start_date, self.end_date)
            && start > end
        {
            return Err(ValidationError::field(
                "start_date",
                "Start date must not be after end date",
            ));
        }

        let column = self.report_type.date_column();
        let mut query = ListQuery::new().order_by(OrderBy::desc(column));

        if let Some(start) = self.start_date {
            query = query.filter(column, Operator::Gte, FieldValue::Date(start));
        }
        if let Some(end) = self.end_date {
            // Timestamps on the end date itself are still in range
            query = match (column, end.checked_add_days(Days::new(1))) {
                ("created_at", Some(next)) => query.filter(column, Operator::Lt, FieldValue::Date(next)),
                _ => query.filter(column, Operator::Lte, FieldValue::Date(end)),
            };
        }

        self.status_filter.apply(self.report_type, query)
    }
}

/// Rendered report: every cell is display text
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReportTable {
    pub title: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ReportTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// "Report Results (3 records)"
    pub fn heading(&self) -> String {
        if self.rows.is_empty() {
            "Report Results".to_string()
        } else {
            format!("Report Results ({} records)", self.rows.len())
        }
    }
}

/// `si_number` becomes `Si Number`
pub fn humanize(column: &str) -> String {
    column
        .split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

fn is_hidden(column: &str) -> bool {
    column.contains("id") || column.contains("created_at") || column.contains("updated_at")
}

/// Report cell text: Yes/No for flags, `-` for null or empty
pub fn report_cell(value: &FieldValue) -> String {
    match value {
        FieldValue::Boolean(true) => "Yes".to_string(),
        FieldValue::Boolean(false) => "No".to_string(),
        FieldValue::Null => "-".to_string(),
        other => {
            let text = other.to_draft_text();
            if text.is_empty() { "-".to_string() } else { text }
        }
    }
}

enum Column<'a> {
    Field(&'a str),
    /// Label of the record a reference field points at
    Label(&'a str),
}

fn columns(schema: &EntitySchema) -> Vec<(String, Column<'_>)> {
    schema
        .fields
        .iter()
        .filter_map(|def| match def.kind {
            FieldKind::Reference(_) => Some((def.label.to_string(), Column::Label(def.name))),
            _ if is_hidden(def.name) => None,
            _ => Some((humanize(def.name), Column::Field(def.name))),
        })
        .collect()
}

/// Build the display table of a report from its records
pub fn render(
    report_type: ReportType,
    records: &[Record],
    labels: &HashMap<String, HashMap<Uuid, String>>,
) -> ReportTable {
    let columns = columns(report_type.schema());

    let rows = records
        .iter()
        .map(|record| {
            columns
                .iter()
                .map(|(_, column)| match column {
                    Column::Field(name) => report_cell(&record.value(name)),
                    Column::Label(name) => record
                        .get(name)
                        .and_then(FieldValue::as_uuid)
                        .and_then(|id| labels.get(*name)?.get(&id).cloned())
                        .unwrap_or_else(|| "-".to_string()),
                })
                .collect()
        })
        .collect();

    ReportTable {
        title: report_type.label().to_string(),
        headers: columns.into_iter().map(|(header, _)| header).collect(),
        rows,
    }
}

pub struct ReportGenerator {
    gateway: Arc<dyn PersistenceGateway>,
    references: ReferenceResolver,
}

impl ReportGenerator {
    pub fn new(gateway: Arc<dyn PersistenceGateway>) -> Self {
        Self {
            references: ReferenceResolver::new(gateway.clone()),
            gateway,
        }
    }

    /// Read the report's collection with the request's filters and render it
    pub async fn generate(&self, request: &ReportRequest) -> Result<ReportTable, OrchardError> {
        let query = request.to_query()?;
        let schema = request.report_type.schema();

        let label_reads = schema.references().map(|(def, target)| async move {
            let labels = self.references.labels(target).await?;
            Ok::<_, GatewayError>((def.name.to_string(), labels))
        });
        let (records, labels) = try_join!(
            self.gateway.list(schema.collection, &query),
            try_join_all(label_reads)
        )?;
        let labels: HashMap<_, _> = labels.into_iter().collect();

        tracing::info!(
            report = %request.report_type,
            rows = records.len(),
            "report generated"
        );
        Ok(render(request.report_type, &records, &labels))
    }
}
