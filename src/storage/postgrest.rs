//! Request and row encoding for PostgREST-style hosted stores
//!
//! Kept free of any HTTP client so the encoding can be tested without a
//! network; [`super::rest::RestGateway`] sends what these functions build.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::core::error::GatewayError;
use crate::core::field::FieldValue;
use crate::core::query::{Condition, ListQuery, Operator, OrderBy, SortDirection};
use crate::core::record::{FieldMap, Record};
use crate::core::schema::EntitySchema;

/// `<base>/rest/v1/<collection>`
pub fn collection_url(base_url: &str, collection: &str) -> String {
    format!("{}/rest/v1/{}", base_url.trim_end_matches('/'), collection)
}

/// Filter value as PostgREST expects it in a query string
pub fn encode_value(value: &FieldValue) -> String {
    match value {
        FieldValue::String(s) => s.clone(),
        FieldValue::Null => "null".to_string(),
        other => other.to_draft_text(),
    }
}

/// `created_at.desc.nullslast`
pub fn order_param(order: &OrderBy) -> String {
    let direction = match order.direction {
        SortDirection::Asc => "asc",
        SortDirection::Desc => "desc",
    };
    format!("{}.{}.nullslast", order.field, direction)
}

/// `("status", "eq.Success")`; equality with null becomes `is.null`
pub fn filter_param(condition: &Condition) -> (String, String) {
    let op = match condition.op {
        Operator::Eq if condition.value.is_null() => "is",
        Operator::Eq => "eq",
        Operator::Gt => "gt",
        Operator::Gte => "gte",
        Operator::Lt => "lt",
        Operator::Lte => "lte",
    };
    (
        condition.field.clone(),
        format!("{}.{}", op, encode_value(&condition.value)),
    )
}

/// Query parameters of a list request
pub fn list_params(query: &ListQuery) -> Vec<(String, String)> {
    let mut params = vec![
        ("select".to_string(), "*".to_string()),
        ("order".to_string(), order_param(&query.order)),
    ];
    params.extend(query.conditions.iter().map(filter_param));
    params
}

/// `("id", "eq.<id>")`
pub fn id_param(id: &Uuid) -> (String, String) {
    ("id".to_string(), format!("eq.{}", id))
}

/// JSON body of an insert or update
pub fn body(fields: &FieldMap) -> Value {
    let object: Map<String, Value> = fields
        .iter()
        .map(|(name, value)| (name.clone(), value.to_json()))
        .collect();
    Value::Object(object)
}

/// Decode one returned row; columns are typed with the schema when known
pub fn decode_row(schema: Option<&EntitySchema>, row: &Value) -> Result<Record, GatewayError> {
    if let Some(schema) = schema {
        return Record::from_json(schema, row).map_err(|e| GatewayError::Decode(e.to_string()));
    }

    let object = row
        .as_object()
        .ok_or_else(|| GatewayError::Decode("expected a JSON object".to_string()))?;
    let id = object
        .get("id")
        .and_then(Value::as_str)
        .and_then(|s| Uuid::parse_str(s).ok())
        .ok_or_else(|| GatewayError::Decode("missing or malformed 'id'".to_string()))?;
    let created_at = object
        .get("created_at")
        .and_then(Value::as_str)
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| GatewayError::Decode("missing or malformed 'created_at'".to_string()))?;

    let fields = object
        .iter()
        .filter(|(name, _)| name.as_str() != "id" && name.as_str() != "created_at")
        .map(|(name, value)| (name.clone(), FieldValue::from_untyped_json(value)))
        .collect();
    Ok(Record::new(id, created_at, fields))
}

/// Decode a JSON array of rows
pub fn decode_rows(schema: Option<&EntitySchema>, rows: &Value) -> Result<Vec<Record>, GatewayError> {
    rows.as_array()
        .ok_or_else(|| GatewayError::Decode("expected a JSON array".to_string()))?
        .iter()
        .map(|row| decode_row(schema, row))
        .collect()
}
