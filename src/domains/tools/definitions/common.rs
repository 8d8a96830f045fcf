//! Common utilities shared across expense tools.
//!
//! This module provides the success/error envelope builders and the
//! row-to-record conversion used by the query tools.
//!
//! The wire contract is asymmetric on purpose: `add_expense` always returns
//! a `{status, ...}` envelope, while `list_expenses` and `summarize` return
//! a bare JSON array on success and the two-field error envelope on failure.
//! Callers distinguish the query results by shape (array vs object).

use rmcp::model::{CallToolResult, Content};
use serde_json::{Map, Value, json};
use sqlx::Row;
use sqlx::postgres::PgRow;

use super::super::error::ToolError;

/// Build the success envelope for a write: `{"status":"success","id":N}`.
pub fn success_envelope(id: i64) -> Value {
    json!({
        "status": "success",
        "id": id
    })
}

/// Build the error envelope: `{"status":"error","message":...}`.
pub fn error_envelope(message: impl Into<String>) -> Value {
    json!({
        "status": "error",
        "message": message.into()
    })
}

/// Wrap a JSON payload as the tool's result.
///
/// Both payload kinds (data and error envelope) are returned as a normal
/// tool result: a storage failure is a valid answer here, not a protocol
/// fault, so `CallToolResult::error` is never used for it.
pub fn payload_result(payload: &Value) -> CallToolResult {
    CallToolResult::success(vec![Content::text(payload.to_string())])
}

/// Convert an `expenses` row into a field-name-keyed record.
///
/// Key order follows the column order of the SELECT list. Nullable text
/// columns and the amount come through as JSON null when the stored value
/// is NULL.
pub fn expense_record(row: &PgRow) -> Result<Value, ToolError> {
    let mut record = Map::new();
    record.insert("id".to_string(), json!(row.try_get::<i64, _>("id")?));
    record.insert("date".to_string(), json!(row.try_get::<String, _>("date")?));
    record.insert(
        "amount".to_string(),
        json!(row.try_get::<Option<f64>, _>("amount")?),
    );
    record.insert(
        "category".to_string(),
        json!(row.try_get::<Option<String>, _>("category")?),
    );
    record.insert(
        "subcategory".to_string(),
        json!(row.try_get::<Option<String>, _>("subcategory")?),
    );
    record.insert(
        "note".to_string(),
        json!(row.try_get::<Option<String>, _>("note")?),
    );
    Ok(Value::Object(record))
}

/// Convert a `summarize` aggregate row into a `{category, total, count}` record.
pub fn summary_record(row: &PgRow) -> Result<Value, ToolError> {
    let mut record = Map::new();
    record.insert(
        "category".to_string(),
        json!(row.try_get::<Option<String>, _>("category")?),
    );
    record.insert(
        "total".to_string(),
        json!(row.try_get::<Option<f64>, _>("total")?),
    );
    record.insert("count".to_string(), json!(row.try_get::<i64, _>("count")?));
    Ok(Value::Object(record))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope_shape() {
        let envelope = success_envelope(42);
        assert_eq!(envelope["status"], "success");
        assert_eq!(envelope["id"], 42);
        assert_eq!(envelope.as_object().unwrap().len(), 2);
    }

    #[test]
    fn test_error_envelope_shape() {
        let envelope = error_envelope("connection refused");
        assert_eq!(envelope["status"], "error");
        assert_eq!(envelope["message"], "connection refused");
        assert_eq!(envelope.as_object().unwrap().len(), 2);
    }

    #[test]
    fn test_error_envelope_message_non_empty() {
        let envelope = error_envelope(sqlx::Error::RowNotFound.to_string());
        let message = envelope["message"].as_str().unwrap();
        assert!(!message.is_empty());
    }

    #[test]
    fn test_payload_result_is_not_protocol_error() {
        let result = payload_result(&error_envelope("boom"));
        assert!(result.is_error.is_none() || !result.is_error.unwrap());

        let text = match &result.content[0].raw {
            rmcp::model::RawContent::Text(text) => &text.text,
            _ => panic!("Expected text content"),
        };
        let parsed: Value = serde_json::from_str(text).unwrap();
        assert_eq!(parsed["status"], "error");
    }

    #[test]
    fn test_payload_result_array_stays_bare() {
        let payload = json!([{"category": "Food", "total": 12.5, "count": 2}]);
        let result = payload_result(&payload);

        let text = match &result.content[0].raw {
            rmcp::model::RawContent::Text(text) => &text.text,
            _ => panic!("Expected text content"),
        };
        let parsed: Value = serde_json::from_str(text).unwrap();
        assert!(parsed.is_array());
    }
}
