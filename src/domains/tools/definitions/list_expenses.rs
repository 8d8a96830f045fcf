//! List expenses tool definition.
//!
//! Retrieves expenses in an inclusive date range, most recent first.

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use super::common::{error_envelope, expense_record, payload_result};
use crate::core::config::Config;
use crate::core::db;
use crate::domains::tools::ToolError;

/// Date comparison and ordering happen in PostgreSQL; output columns are
/// cast so rows marshal into plain JSON scalars. Equal dates tie-break on
/// id descending, i.e. most recently inserted first.
const LIST_SQL: &str = "SELECT id::int8 AS id, date::text AS date, amount::float8 AS amount, \
            category, subcategory, note \
     FROM expenses \
     WHERE date BETWEEN $1::date AND $2::date \
     ORDER BY date DESC, id DESC";

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the list expenses tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ListExpensesParams {
    /// Inclusive lower bound of the date range (ISO-8601).
    pub start_date: String,

    /// Inclusive upper bound of the date range (ISO-8601).
    pub end_date: String,
}

// ============================================================================
// Tool Definition
// ============================================================================

/// List expenses tool - returns every expense in the date range.
pub struct ListExpensesTool;

impl ListExpensesTool {
    /// Tool name as registered in MCP. Part of the wire contract.
    pub const NAME: &'static str = "list_expenses";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "List all expenses in a date range (inclusive), ordered by date descending then id descending.";

    /// Execute the tool logic.
    ///
    /// Success is a bare JSON array of records (empty when nothing matches);
    /// any failure is the `{status:"error"}` envelope. Callers distinguish
    /// the two by shape.
    #[instrument(skip_all, fields(start = %params.start_date, end = %params.end_date))]
    pub async fn execute(params: &ListExpensesParams, config: &Config) -> CallToolResult {
        info!("List expenses tool called");

        let payload = match Self::query(params, config).await {
            Ok(records) => {
                info!("Listed {} expenses", records.len());
                Value::Array(records)
            }
            Err(e) => {
                warn!("List expenses failed: {}", e);
                error_envelope(e.to_string())
            }
        };

        payload_result(&payload)
    }

    /// Run the SELECT over a fresh connection and marshal the rows.
    async fn query(params: &ListExpensesParams, config: &Config) -> Result<Vec<Value>, ToolError> {
        let mut conn = db::connect(config).await?;

        let rows = sqlx::query(LIST_SQL)
            .bind(&params.start_date)
            .bind(&params.end_date)
            .fetch_all(&mut conn)
            .await?;

        rows.iter().map(expense_record).collect()
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: serde_json::Value,
        config: Arc<Config>,
    ) -> Result<serde_json::Value, String> {
        let params: ListExpensesParams =
            serde_json::from_value(arguments).map_err(|e| e.to_string())?;

        info!("List expenses tool (HTTP) called");

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
            input_schema: cached_schema_for_type::<ListExpensesParams>(),
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
                let params: ListExpensesParams =
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
    fn test_params_require_both_bounds() {
        let result: Result<ListExpensesParams, _> =
            serde_json::from_value(serde_json::json!({ "start_date": "2025-01-01" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_list_sql_ordering() {
        // The ordering clause is part of the observable contract.
        assert!(LIST_SQL.contains("ORDER BY date DESC, id DESC"));
        assert!(LIST_SQL.contains("BETWEEN"));
    }

    #[tokio::test]
    async fn test_unreachable_database_yields_error_envelope() {
        let params = ListExpensesParams {
            start_date: "2025-01-01".to_string(),
            end_date: "2025-12-31".to_string(),
        };

        let result = ListExpensesTool::execute(&params, &unreachable_config()).await;
        assert!(result.is_error.is_none() || !result.is_error.unwrap());

        let payload = result_payload(&result);
        assert_eq!(payload["status"], "error");
        assert!(!payload["message"].as_str().unwrap().is_empty());
    }

    #[test]
    fn test_tool_metadata() {
        let tool = ListExpensesTool::to_tool();
        assert_eq!(tool.name.as_ref(), "list_expenses");
        assert!(tool.description.is_some());
    }
}
