//! Add expense tool definition.
//!
//! Inserts one expense row and reports the storage-assigned id.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use sqlx::Row;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use super::common::{error_envelope, payload_result, success_envelope};
use crate::core::config::Config;
use crate::core::db;
use crate::domains::tools::ToolError;

/// One row, five caller-supplied fields; the database assigns the id.
/// Casting `$1::date` delegates date validation to PostgreSQL - a malformed
/// date comes back as a storage error and lands in the error envelope.
const INSERT_SQL: &str = "INSERT INTO expenses (date, amount, category, subcategory, note) \
     VALUES ($1::date, $2, $3, $4, $5) \
     RETURNING id::int8 AS id";

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the add expense tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct AddExpenseParams {
    /// Expense date (ISO-8601, e.g. "2025-03-14"). Not validated locally.
    pub date: String,

    /// Monetary amount. No currency or sign validation is performed.
    pub amount: f64,

    /// Free-text category label. Independent of the categories resource.
    pub category: String,

    /// Optional subcategory, stored as empty string when omitted.
    #[serde(default)]
    pub subcategory: String,

    /// Optional free-text note, stored as empty string when omitted.
    #[serde(default)]
    pub note: String,
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Add expense tool - inserts a single expense row.
pub struct AddExpenseTool;

impl AddExpenseTool {
    /// Tool name as registered in MCP. Part of the wire contract.
    pub const NAME: &'static str = "add_expense";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Add a new expense. Records date, amount, category and optional subcategory/note, returning the assigned id.";

    /// Execute the tool logic.
    ///
    /// Any failure - connectivity, constraint violation, malformed date -
    /// is converted into the `{status:"error"}` envelope; the tool itself
    /// always returns normally.
    #[instrument(skip_all, fields(date = %params.date, category = %params.category))]
    pub async fn execute(params: &AddExpenseParams, config: &Config) -> CallToolResult {
        info!("Add expense tool called");

        let payload = match Self::insert(params, config).await {
            Ok(id) => {
                info!("Inserted expense id {}", id);
                success_envelope(id)
            }
            Err(e) => {
                warn!("Add expense failed: {}", e);
                error_envelope(e.to_string())
            }
        };

        payload_result(&payload)
    }

    /// Run the INSERT over a fresh connection.
    ///
    /// The connection is dropped (closed) on every exit path when this
    /// scope ends; the statement auto-commits.
    async fn insert(params: &AddExpenseParams, config: &Config) -> Result<i64, ToolError> {
        let mut conn = db::connect(config).await?;

        let row = sqlx::query(INSERT_SQL)
            .bind(&params.date)
            .bind(params.amount)
            .bind(&params.category)
            .bind(&params.subcategory)
            .bind(&params.note)
            .fetch_one(&mut conn)
            .await?;

        Ok(row.try_get::<i64, _>("id")?)
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: serde_json::Value,
        config: Arc<Config>,
    ) -> Result<serde_json::Value, String> {
        let params: AddExpenseParams =
            serde_json::from_value(arguments).map_err(|e| e.to_string())?;

        info!("Add expense tool (HTTP) called");

        let result = Self::execute(&params, &config).await;

        Ok(serde_json::json!({
            "content": result.content,
            "isError": result.is_error.unwrap_or(false)
        }))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<AddExpenseParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Create a ToolRoute for the rmcp transports.
    pub fn create_route<S>(config: Arc<Config>) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), move |ctx: ToolCallContext<'_, S>| {
            let args = ctx.arguments.clone().unwrap_or_default();
            let config = config.clone();
            async move {
                let params: AddExpenseParams =
                    serde_json::from_value(serde_json::Value::Object(args))
                        .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                Ok(Self::execute(&params, &config).await)
            }
            .boxed()
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn unreachable_config() -> Config {
        let mut config = Config::default();
        config.database.url = "postgres://127.0.0.1:1/expenses".to_string();
        config
    }

    fn result_payload(result: &CallToolResult) -> Value {
        let text = match &result.content[0].raw {
            rmcp::model::RawContent::Text(text) => &text.text,
            _ => panic!("Expected text content"),
        };
        serde_json::from_str(text).unwrap()
    }

    #[test]
    fn test_params_defaults() {
        let params: AddExpenseParams = serde_json::from_value(serde_json::json!({
            "date": "2025-03-14",
            "amount": 12.5,
            "category": "Food"
        }))
        .unwrap();

        assert_eq!(params.subcategory, "");
        assert_eq!(params.note, "");
    }

    #[test]
    fn test_params_missing_required_field() {
        let result: Result<AddExpenseParams, _> = serde_json::from_value(serde_json::json!({
            "amount": 12.5,
            "category": "Food"
        }));
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_unreachable_database_yields_error_envelope() {
        let params = AddExpenseParams {
            date: "2025-03-14".to_string(),
            amount: 9.99,
            category: "Food".to_string(),
            subcategory: String::new(),
            note: String::new(),
        };

        let result = AddExpenseTool::execute(&params, &unreachable_config()).await;
        // A storage failure is a normal tool answer, never a protocol fault.
        assert!(result.is_error.is_none() || !result.is_error.unwrap());

        let payload = result_payload(&result);
        assert_eq!(payload["status"], "error");
        assert!(!payload["message"].as_str().unwrap().is_empty());
    }

    #[test]
    fn test_tool_metadata() {
        let tool = AddExpenseTool::to_tool();
        assert_eq!(tool.name.as_ref(), "add_expense");
        assert!(tool.description.is_some());
    }

    #[cfg(feature = "http")]
    #[tokio::test]
    async fn test_http_handler_missing_param() {
        let args = serde_json::json!({ "amount": 1.0 });
        let config = Arc::new(unreachable_config());
        let result = AddExpenseTool::http_handler(args, config).await;
        assert!(result.is_err());
    }
}
