//! Summarize tool definition.
//!
//! Per-category amount sum and row count over a date range, with an
//! optional single-category filter.

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

use super::common::{error_envelope, payload_result, summary_record};
use crate::core::config::Config;
use crate::core::db;
use crate::domains::tools::ToolError;

/// Groups are ordered lexicographically by category. The storage engine
/// imposes no grouping order of its own, so the ORDER BY pins one down.
const SUMMARIZE_SQL: &str =
    "SELECT category, SUM(amount)::float8 AS total, COUNT(*)::int8 AS count \
     FROM expenses \
     WHERE date BETWEEN $1::date AND $2::date \
     GROUP BY category \
     ORDER BY category";

/// Same aggregate restricted to a single category; at most one group.
const SUMMARIZE_FILTERED_SQL: &str =
    "SELECT category, SUM(amount)::float8 AS total, COUNT(*)::int8 AS count \
     FROM expenses \
     WHERE date BETWEEN $1::date AND $2::date \
       AND category = $3 \
     GROUP BY category \
     ORDER BY category";

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the summarize tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SummarizeParams {
    /// Inclusive lower bound of the date range (ISO-8601).
    pub start_date: String,

    /// Inclusive upper bound of the date range (ISO-8601).
    pub end_date: String,

    /// Optional category filter. When omitted (or empty), one group is
    /// returned per distinct category in the range.
    #[serde(default)]
    pub category: Option<String>,
}

impl SummarizeParams {
    /// The effective filter: an empty string counts as no filter.
    fn filter(&self) -> Option<&str> {
        self.category.as_deref().filter(|c| !c.is_empty())
    }
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Summarize tool - per-category totals and counts.
pub struct SummarizeTool;

impl SummarizeTool {
    /// Tool name as registered in MCP. Part of the wire contract.
    pub const NAME: &'static str = "summarize";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Summarize expenses by category over a date range: sum of amount and row count per category, optionally filtered to one category.";

    /// Execute the tool logic.
    ///
    /// Success is a bare JSON array of `{category, total, count}` records;
    /// categories with no rows in the range are simply absent. Failure is
    /// the `{status:"error"}` envelope.
    #[instrument(skip_all, fields(start = %params.start_date, end = %params.end_date))]
    pub async fn execute(params: &SummarizeParams, config: &Config) -> CallToolResult {
        info!("Summarize tool called");

        let payload = match Self::query(params, config).await {
            Ok(records) => {
                info!("Summarized {} categories", records.len());
                Value::Array(records)
            }
            Err(e) => {
                warn!("Summarize failed: {}", e);
                error_envelope(e.to_string())
            }
        };

        payload_result(&payload)
    }

    /// Run the aggregate over a fresh connection and marshal the groups.
    async fn query(params: &SummarizeParams, config: &Config) -> Result<Vec<Value>, ToolError> {
        let mut conn = db::connect(config).await?;

        let query = match params.filter() {
            Some(category) => sqlx::query(SUMMARIZE_FILTERED_SQL)
                .bind(&params.start_date)
                .bind(&params.end_date)
                .bind(category),
            None => sqlx::query(SUMMARIZE_SQL)
                .bind(&params.start_date)
                .bind(&params.end_date),
        };

        let rows = query.fetch_all(&mut conn).await?;

        rows.iter().map(summary_record).collect()
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: serde_json::Value,
        config: Arc<Config>,
    ) -> Result<serde_json::Value, String> {
        let params: SummarizeParams =
            serde_json::from_value(arguments).map_err(|e| e.to_string())?;

        info!("Summarize tool (HTTP) called");

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
            input_schema: cached_schema_for_type::<SummarizeParams>(),
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
                let params: SummarizeParams =
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
    fn test_category_defaults_to_none() {
        let params: SummarizeParams = serde_json::from_value(serde_json::json!({
            "start_date": "2025-01-01",
            "end_date": "2025-01-31"
        }))
        .unwrap();
        assert!(params.category.is_none());
        assert!(params.filter().is_none());
    }

    #[test]
    fn test_empty_category_means_no_filter() {
        let params: SummarizeParams = serde_json::from_value(serde_json::json!({
            "start_date": "2025-01-01",
            "end_date": "2025-01-31",
            "category": ""
        }))
        .unwrap();
        assert!(params.filter().is_none());
    }

    #[test]
    fn test_category_filter_applies() {
        let params: SummarizeParams = serde_json::from_value(serde_json::json!({
            "start_date": "2025-01-01",
            "end_date": "2025-01-31",
            "category": "Food"
        }))
        .unwrap();
        assert_eq!(params.filter(), Some("Food"));
    }

    #[test]
    fn test_summarize_sql_stable_order() {
        assert!(SUMMARIZE_SQL.contains("ORDER BY category"));
        assert!(SUMMARIZE_FILTERED_SQL.contains("AND category = $3"));
    }

    #[tokio::test]
    async fn test_unreachable_database_yields_error_envelope() {
        let params = SummarizeParams {
            start_date: "2025-01-01".to_string(),
            end_date: "2025-12-31".to_string(),
            category: None,
        };

        let result = SummarizeTool::execute(&params, &unreachable_config()).await;
        assert!(result.is_error.is_none() || !result.is_error.unwrap());

        let payload = result_payload(&result);
        assert_eq!(payload["status"], "error");
        assert!(!payload["message"].as_str().unwrap().is_empty());
    }

    #[test]
    fn test_tool_metadata() {
        let tool = SummarizeTool::to_tool();
        assert_eq!(tool.name.as_ref(), "summarize");
        assert!(tool.description.is_some());
    }
}
