//! List/table presenter
//!
//! Keeps the last fetched rows of one collection and formats them for
//! display with the collection's schema.

use std::collections::HashMap;
use uuid::Uuid;

use crate::core::field::{DATE_FORMAT, FieldKind, FieldValue};
use crate::core::pricing::{format_currency, record_total};
use crate::core::record::Record;
use crate::core::schema::{EntitySchema, FieldDef};
use crate::core::status::{BadgeColor, active_badge};

/// Reference labels keyed by field name, then by target id
pub type ReferenceLabels = HashMap<String, HashMap<Uuid, String>>;

/// One formatted table cell
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub text: String,
    pub badge: Option<BadgeColor>,
    /// Image source for image columns
    pub image: Option<String>,
}

impl Cell {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            badge: None,
            image: None,
        }
    }

    pub fn badge(text: impl Into<String>, color: BadgeColor) -> Self {
        Self {
            text: text.into(),
            badge: Some(color),
            image: None,
        }
    }
}

/// One formatted table row
#[derive(Debug, Clone, PartialEq)]
pub struct RowView {
    pub id: Uuid,
    pub cells: Vec<Cell>,
}

pub struct ListPresenter {
    schema: &'static EntitySchema,
    records: Vec<Record>,
    labels: ReferenceLabels,
    loading: bool,
    last_error: Option<String>,
}

impl ListPresenter {
    pub fn new(schema: &'static EntitySchema) -> Self {
        Self {
            schema,
            records: Vec::new(),
            labels: ReferenceLabels::new(),
            loading: false,
            last_error: None,
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn record(&self, id: &Uuid) -> Option<&Record> {
        self.records.iter().find(|r| r.id == *id)
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn empty_message(&self) -> &'static str {
        self.schema.empty_message
    }

    /// Message of the last failed load or mutation
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub(crate) fn begin_load(&mut self) {
        self.loading = true;
    }

    /// Drop a pending load without touching the rows
    pub(crate) fn abandon_load(&mut self) {
        self.loading = false;
    }

    /// Replace the rows with a fresh fetch
    pub(crate) fn apply(&mut self, records: Vec<Record>, labels: ReferenceLabels) {
        self.records = records;
        self.labels = labels;
        self.loading = false;
        self.last_error = None;
    }

    /// Record a failure; the previous rows stay on screen
    pub(crate) fn fail(&mut self, message: impl Into<String>) {
        self.loading = false;
        self.last_error = Some(message.into());
    }

    /// Column headers, in display order
    pub fn headers(&self) -> Vec<&'static str> {
        let mut headers: Vec<_> = self
            .schema
            .fields
            .iter()
            .filter(|f| f.listed)
            .map(FieldDef::header)
            .collect();
        if self.schema.total.is_some() {
            headers.push("Total");
        }
        if self.schema.show_created {
            headers.push("Date");
        }
        headers
    }

    pub fn rows(&self) -> Vec<RowView> {
        self.records.iter().map(|r| self.row(r)).collect()
    }

    fn row(&self, record: &Record) -> RowView {
        let mut cells: Vec<Cell> = self
            .schema
            .fields
            .iter()
            .filter(|f| f.listed)
            .map(|def| format_cell(def, &record.value(def.name), self.labels.get(def.name)))
            .collect();

        if let Some(spec) = &self.schema.total {
            let text = record_total(spec, record)
                .map(format_currency)
                .unwrap_or_else(|| "N/A".to_string());
            cells.push(Cell::text(text));
        }
        if self.schema.show_created {
            cells.push(Cell::text(record.created_at.format(DATE_FORMAT).to_string()));
        }

        RowView {
            id: record.id,
            cells,
        }
    }
}

/// Format one stored value for its column
pub fn format_cell(
    def: &FieldDef,
    value: &FieldValue,
    labels: Option<&HashMap<Uuid, String>>,
) -> Cell {
    match def.kind {
        FieldKind::Currency => match value.as_f64() {
            Some(amount) => Cell::text(format_currency(amount)),
            None => Cell::text("N/A"),
        },
        FieldKind::Percentage => match value.as_f64() {
            Some(percent) => Cell::text(format!("{}%", percent)),
            None => Cell::text("-"),
        },
        FieldKind::Status(domain) => match value.as_string() {
            Some(status) => Cell::badge(status, domain.badge(status)),
            None => Cell::text("-"),
        },
        FieldKind::Boolean => match value.as_bool() {
            Some(flag) => {
                let (text, color) = active_badge(flag);
                Cell::badge(text, color)
            }
            None => Cell::text("-"),
        },
        FieldKind::Reference(_) => {
            let label = value
                .as_uuid()
                .and_then(|id| labels.and_then(|l| l.get(&id)));
            Cell::text(label.map(String::as_str).unwrap_or("N/A"))
        }
        FieldKind::Image => match value.as_string().filter(|s| !s.is_empty()) {
            Some(src) => Cell {
                text: "Image".to_string(),
                badge: None,
                image: Some(src.to_string()),
            },
            None => Cell::text("No Image"),
        },
        _ if value.is_null() => Cell::text("-"),
        _ => Cell::text(value.to_draft_text()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entity::Entity;
    use crate::core::record::FieldMap;
    use crate::entities::{Delivery, Fruit, SalesInvoice};
    use chrono::{NaiveDate, TimeZone, Utc};

    fn invoice(fruit: Uuid, price: f64, gst: FieldValue) -> Record {
        let mut fields = FieldMap::new();
        fields.insert("si_number".into(), FieldValue::String("SI-00000007".into()));
        fields.insert(
            "si_date".into(),
            FieldValue::Date(NaiveDate::from_ymd_opt(2024, 4, 1).unwrap()),
        );
        fields.insert("fruit_id".into(), FieldValue::Uuid(fruit));
        fields.insert("price".into(), FieldValue::Float(price));
        fields.insert("gst_percent".into(), gst);
        fields.insert("active".into(), FieldValue::Boolean(true));
        Record::new(Uuid::new_v4(), Utc::now(), fields)
    }

    #[test]
    fn test_invoice_headers_and_row() {
        let fruit = Uuid::new_v4();
        let mut presenter = ListPresenter::new(SalesInvoice::schema());
        let mut labels = ReferenceLabels::new();
        labels.insert(
            "fruit_id".to_string(),
            HashMap::from([(fruit, "Mango".to_string())]),
        );
        presenter.apply(vec![invoice(fruit, 100.0, FieldValue::Float(18.0))], labels);

        assert_eq!(
            presenter.headers(),
            vec!["SI Number", "Date", "Fruit", "Price", "GST %", "Total"]
        );
        let texts: Vec<_> = presenter.rows()[0]
            .cells
            .iter()
            .map(|c| c.text.clone())
            .collect();
        assert_eq!(
            texts,
            vec!["SI-00000007", "2024-04-01", "Mango", "$100.00", "18%", "$118.00"]
        );
    }

    #[test]
    fn test_unresolved_reference_reads_na() {
        let mut presenter = ListPresenter::new(SalesInvoice::schema());
        presenter.apply(
            vec![invoice(Uuid::new_v4(), 10.0, FieldValue::Null)],
            ReferenceLabels::new(),
        );
        let row = &presenter.rows()[0];
        assert_eq!(row.cells[2].text, "N/A");
        assert_eq!(row.cells[4].text, "-");
        assert_eq!(row.cells[5].text, "$10.00");
    }

    #[test]
    fn test_delivery_badges_and_created_date() {
        let mut fields = FieldMap::new();
        fields.insert("delivery_name".into(), FieldValue::String("ORD-9".into()));
        fields.insert("status".into(), FieldValue::String("Dispatched".into()));
        fields.insert("delivery_address".into(), FieldValue::Null);
        fields.insert("remark".into(), FieldValue::Null);
        let created = Utc.with_ymd_and_hms(2024, 7, 4, 12, 0, 0).unwrap();
        let record = Record::new(Uuid::new_v4(), created, fields);

        let mut presenter = ListPresenter::new(Delivery::schema());
        presenter.apply(vec![record], ReferenceLabels::new());

        assert_eq!(
            presenter.headers(),
            vec!["Delivery Name", "Status", "Address", "Remark", "Date"]
        );
        let row = &presenter.rows()[0];
        assert_eq!(row.cells[1], Cell::badge("Dispatched", BadgeColor::Blue));
        assert_eq!(row.cells[2].text, "-");
        assert_eq!(row.cells[4].text, "2024-07-04");
    }

    #[test]
    fn test_fruit_cells() {
        let schema = Fruit::schema();
        let image = schema.field_def("image_url").unwrap();
        assert_eq!(format_cell(image, &FieldValue::Null, None).text, "No Image");

        let active = schema.field_def("active").unwrap();
        assert_eq!(
            format_cell(active, &FieldValue::Boolean(false), None),
            Cell::badge("Inactive", BadgeColor::Neutral)
        );
        assert_eq!(
            ListPresenter::new(schema).headers(),
            vec!["Fruit Name", "Image", "Price", "Status"]
        );
    }

    #[test]
    fn test_unknown_status_is_neutral() {
        let status = Delivery::schema().field_def("status").unwrap();
        let cell = format_cell(status, &FieldValue::String("Lost".into()), None);
        assert_eq!(cell.badge, Some(BadgeColor::Neutral));
    }

    #[test]
    fn test_fail_keeps_rows() {
        let mut presenter = ListPresenter::new(SalesInvoice::schema());
        presenter.apply(
            vec![invoice(Uuid::new_v4(), 1.0, FieldValue::Float(0.0))],
            ReferenceLabels::new(),
        );
        presenter.begin_load();
        presenter.fail("store is unavailable: offline");

        assert!(!presenter.is_loading());
        assert_eq!(presenter.records().len(), 1);
        assert_eq!(presenter.last_error(), Some("store is unavailable: offline"));
    }
}
