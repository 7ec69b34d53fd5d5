//! List ordering and filtering

use serde_json::Value;
use std::cmp::Ordering;

use crate::core::field::FieldValue;
use crate::core::record::Record;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Sort field and direction
///
/// # Format
/// - `field:asc` or `field` (ascending)
/// - `field:desc` (descending)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    pub field: String,
    pub direction: SortDirection,
}

impl OrderBy {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Desc,
        }
    }

    /// Parse `field[:asc|:desc]`
    pub fn parse(expr: &str) -> Self {
        match expr.split_once(':') {
            Some((field, dir)) if dir.eq_ignore_ascii_case("desc") => Self::desc(field),
            Some((field, _)) => Self::asc(field),
            None => Self::asc(expr),
        }
    }

    /// Compare two records; nulls sort last in either direction
    pub fn compare(&self, a: &Record, b: &Record) -> Ordering {
        let left = a.value(&self.field);
        let right = b.value(&self.field);

        match (left.is_null(), right.is_null()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => {
                let ordering = left.compare(&right).unwrap_or(Ordering::Equal);
                match self.direction {
                    SortDirection::Asc => ordering,
                    SortDirection::Desc => ordering.reverse(),
                }
            }
        }
    }
}

impl Default for OrderBy {
    /// Newest first
    fn default() -> Self {
        Self::desc("created_at")
    }
}

/// Comparison operator of a filter condition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Eq,
    Gt,
    Gte,
    Lt,
    Lte,
}

impl Operator {
    fn holds(&self, ordering: Ordering) -> bool {
        match self {
            Operator::Eq => ordering == Ordering::Equal,
            Operator::Gt => ordering == Ordering::Greater,
            Operator::Gte => ordering != Ordering::Less,
            Operator::Lt => ordering == Ordering::Less,
            Operator::Lte => ordering != Ordering::Greater,
        }
    }
}

/// One filter condition on a column
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub field: String,
    pub op: Operator,
    pub value: FieldValue,
}

impl Condition {
    /// Whether the record satisfies this condition.
    ///
    /// Equality against null matches null columns; ordered comparisons never
    /// match nulls.
    pub fn matches(&self, record: &Record) -> bool {
        let actual = record.value(&self.field);
        if self.value.is_null() || actual.is_null() {
            return self.op == Operator::Eq && self.value.is_null() && actual.is_null();
        }
        actual
            .compare(&self.value)
            .is_some_and(|ordering| self.op.holds(ordering))
    }
}

/// Ordering plus conjunctive filter applied to a collection read
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListQuery {
    pub order: OrderBy,
    pub conditions: Vec<Condition>,
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn order_by(mut self, order: OrderBy) -> Self {
        self.order = order;
        self
    }

    pub fn filter(mut self, field: impl Into<String>, op: Operator, value: FieldValue) -> Self {
        self.conditions.push(Condition {
            field: field.into(),
            op,
            value,
        });
        self
    }

    pub fn filter_eq(self, field: impl Into<String>, value: FieldValue) -> Self {
        self.filter(field, Operator::Eq, value)
    }

    /// Build conditions from a JSON filter object.
    ///
    /// # Format
    /// - Exact match: `{"field": "value"}`
    /// - Comparison: `{"field>": v, "field<": v, "field>=": v, "field<=": v}`
    pub fn with_filter_json(mut self, filter: &Value) -> Self {
        let Some(object) = filter.as_object() else {
            return self;
        };

        for (key, value) in object {
            let (field, op) = if let Some(f) = key.strip_suffix(">=") {
                (f, Operator::Gte)
            } else if let Some(f) = key.strip_suffix("<=") {
                (f, Operator::Lte)
            } else if let Some(f) = key.strip_suffix('>') {
                (f, Operator::Gt)
            } else if let Some(f) = key.strip_suffix('<') {
                (f, Operator::Lt)
            } else {
                (key.as_str(), Operator::Eq)
            };
            self.conditions.push(Condition {
                field: field.to_string(),
                op,
                value: FieldValue::from_untyped_json(value),
            });
        }
        self
    }

    /// Whether a record passes every condition
    pub fn matches(&self, record: &Record) -> bool {
        self.conditions.iter().all(|c| c.matches(record))
    }

    /// Filter and sort records in memory
    pub fn apply(&self, records: impl IntoIterator<Item = Record>) -> Vec<Record> {
        let mut rows: Vec<Record> = records.into_iter().filter(|r| self.matches(r)).collect();
        rows.sort_by(|a, b| self.order.compare(a, b));
        rows
    }
}
