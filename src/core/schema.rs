//! Declarative entity schemas
//!
//! An [`EntitySchema`] lists the fields of one collection together with their
//! semantic kind and validation rule. It is the single parameter the generic
//! record editor needs: the form controller parses and validates drafts with
//! it and the presenter formats table cells with it.

use crate::core::field::{FieldKind, FieldValue, ReferenceTarget};
use crate::core::status::StatusDomain;

/// What to store when an optional field is left blank
#[derive(Debug, Clone, PartialEq)]
pub enum BlankPolicy {
    /// Store null
    Null,
    /// Store a fixed value (e.g. a tax rate of zero)
    Value(FieldValue),
    /// Synthesise a document number from the field's prefix
    Generate,
}

/// Initial draft value when a create form is opened
#[derive(Debug, Clone, PartialEq)]
pub enum FieldDefault {
    Empty,
    Flag(bool),
    Today,
}

/// Definition of one field in an entity schema
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDef {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub max_len: Option<usize>,
    pub blank: BlankPolicy,
    pub default: FieldDefault,
    /// Whether the list table shows a column for this field
    pub listed: bool,
    /// Table header when it differs from the form label
    pub column: Option<&'static str>,
}

impl FieldDef {
    fn new(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        let default = match kind {
            FieldKind::Boolean => FieldDefault::Flag(false),
            _ => FieldDefault::Empty,
        };
        let blank = match kind {
            FieldKind::DocumentNumber { .. } => BlankPolicy::Generate,
            _ => BlankPolicy::Null,
        };

        Self {
            name,
            label,
            kind,
            required: false,
            min: None,
            max: None,
            max_len: None,
            blank,
            default,
            listed: true,
            column: None,
        }
    }

    pub fn text(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Text)
    }

    pub fn free_text(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::FreeText)
    }

    /// Money amount; non-negative
    pub fn currency(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Currency).min(0.0)
    }

    /// Percentage bounded to `0..=100`
    pub fn percentage(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Percentage).min(0.0).max(100.0)
    }

    pub fn integer(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Integer)
    }

    /// Non-monetary decimal; non-negative
    pub fn decimal(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Decimal).min(0.0)
    }

    pub fn choice(
        name: &'static str,
        label: &'static str,
        values: &'static [&'static str],
    ) -> Self {
        Self::new(name, label, FieldKind::Choice(values))
    }

    pub fn status(name: &'static str, label: &'static str, domain: StatusDomain) -> Self {
        Self::new(name, label, FieldKind::Status(domain))
    }

    /// Date field; create forms start on today's date
    pub fn date(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Date).default_today()
    }

    pub fn boolean(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Boolean)
    }

    pub fn reference(name: &'static str, label: &'static str, target: ReferenceTarget) -> Self {
        Self::new(name, label, FieldKind::Reference(target))
    }

    pub fn image(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Image)
    }

    /// Document number generated as `<prefix>-<8 digits>` when blank
    pub fn document_number(
        name: &'static str,
        label: &'static str,
        prefix: &'static str,
    ) -> Self {
        Self::new(name, label, FieldKind::DocumentNumber { prefix })
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    pub fn max_len(mut self, len: usize) -> Self {
        self.max_len = Some(len);
        self
    }

    pub fn blank_as(mut self, value: FieldValue) -> Self {
        self.blank = BlankPolicy::Value(value);
        self
    }

    pub fn default_flag(mut self, value: bool) -> Self {
        self.default = FieldDefault::Flag(value);
        self
    }

    pub fn default_today(mut self) -> Self {
        self.default = FieldDefault::Today;
        self
    }

    /// Keep the field in the form but out of the list table
    pub fn unlisted(mut self) -> Self {
        self.listed = false;
        self
    }

    pub fn column(mut self, header: &'static str) -> Self {
        self.column = Some(header);
        self
    }

    /// Header of this field's table column
    pub fn header(&self) -> &'static str {
        self.column.unwrap_or(self.label)
    }
}

/// Fields whose combination yields a tax-inclusive total
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TotalSpec {
    pub price_field: &'static str,
    pub tax_field: &'static str,
}

/// Schema of one entity collection
#[derive(Debug, Clone, PartialEq)]
pub struct EntitySchema {
    /// Singular name (e.g. "fruit")
    pub singular: &'static str,

    /// Collection name in the store (e.g. "fruits")
    pub collection: &'static str,

    /// Page heading (e.g. "Fruit Master")
    pub title: &'static str,

    /// Noun used in confirmation prompts (e.g. "payment record")
    pub noun: &'static str,

    pub fields: Vec<FieldDef>,

    pub total: Option<TotalSpec>,

    /// Whether the list table shows the record's creation date
    pub show_created: bool,

    /// Message shown when the list is empty
    pub empty_message: &'static str,
}

impl EntitySchema {
    pub fn new(singular: &'static str, collection: &'static str, title: &'static str) -> Self {
        Self {
            singular,
            collection,
            title,
            noun: singular,
            fields: Vec::new(),
            total: None,
            show_created: false,
            empty_message: "No records found.",
        }
    }

    pub fn field(mut self, field: FieldDef) -> Self {
        self.fields.push(field);
        self
    }

    pub fn noun(mut self, noun: &'static str) -> Self {
        self.noun = noun;
        self
    }

    pub fn total(mut self, price_field: &'static str, tax_field: &'static str) -> Self {
        self.total = Some(TotalSpec {
            price_field,
            tax_field,
        });
        self
    }

    pub fn show_created(mut self) -> Self {
        self.show_created = true;
        self
    }

    pub fn empty_message(mut self, message: &'static str) -> Self {
        self.empty_message = message;
        self
    }

    /// Look up a field definition by name
    pub fn field_def(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Fields pointing at other collections
    pub fn references(&self) -> impl Iterator<Item = (&FieldDef, ReferenceTarget)> {
        self.fields.iter().filter_map(|f| match f.kind {
            FieldKind::Reference(target) => Some((f, target)),
            _ => None,
        })
    }

    /// Confirmation prompt shown before a delete
    pub fn delete_prompt(&self) -> String {
        format!("Are you sure you want to delete this {}?", self.noun)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> EntitySchema {
        EntitySchema::new("order", "orders", "Orders")
            .noun("purchase order")
            .field(FieldDef::document_number("number", "Number", "PO"))
            .field(FieldDef::date("date", "Date").required())
            .field(FieldDef::currency("price", "Price").required().min(0.01))
            .field(FieldDef::percentage("tax", "Tax").blank_as(FieldValue::Float(0.0)))
            .field(FieldDef::boolean("active", "Active").default_flag(true))
            .total("price", "tax")
    }

    #[test]
    fn test_builder_defaults() {
        let schema = sample();

        let number = schema.field_def("number").unwrap();
        assert_eq!(number.blank, BlankPolicy::Generate);
        assert!(!number.required);

        let date = schema.field_def("date").unwrap();
        assert_eq!(date.default, FieldDefault::Today);

        let active = schema.field_def("active").unwrap();
        assert_eq!(active.default, FieldDefault::Flag(true));
    }

    #[test]
    fn test_numeric_bounds_chain() {
        let schema = sample();

        let price = schema.field_def("price").unwrap();
        assert_eq!(price.min, Some(0.01));

        let tax = schema.field_def("tax").unwrap();
        assert_eq!(tax.min, Some(0.0));
        assert_eq!(tax.max, Some(100.0));
        assert_eq!(tax.blank, BlankPolicy::Value(FieldValue::Float(0.0)));
    }

    #[test]
    fn test_delete_prompt_uses_noun() {
        assert_eq!(
            sample().delete_prompt(),
            "Are you sure you want to delete this purchase order?"
        );
    }

    #[test]
    fn test_unknown_field_lookup() {
        assert!(sample().field_def("missing").is_none());
        assert_eq!(sample().references().count(), 0);
    }
}
