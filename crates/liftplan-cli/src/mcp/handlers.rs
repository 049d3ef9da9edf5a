//! MCP tool handlers implementation

use std::{fmt::Display, sync::Arc};

use liftplan_core::{params as core, BuildOutcome, Engine, ValidationReport};
use log::debug;
use rmcp::{
    handler::server::tool::Parameters,
    model::{CallToolResult, Content},
    ErrorData,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::errors::to_mcp_error;

// Core parameter types derive JsonSchema behind the `schema` feature; this
// transparent wrapper adds the Deserialize bound rmcp needs without the core
// types knowing about MCP.

/// Generic MCP wrapper for core parameter types with serde integration
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct McpParams<T>(T)
where
    T: JsonSchema;

impl<T> JsonSchema for McpParams<T>
where
    T: JsonSchema,
{
    fn schema_name() -> std::borrow::Cow<'static, str> {
        T::schema_name()
    }

    fn json_schema(g: &mut schemars::SchemaGenerator) -> schemars::Schema {
        T::json_schema(g)
    }
}

impl<T> AsRef<T> for McpParams<T>
where
    T: JsonSchema,
{
    fn as_ref(&self) -> &T {
        &self.0
    }
}

pub type BuildSession = McpParams<core::BuildSession>;
pub type BuildMultiSession = McpParams<core::BuildMultiSession>;
pub type BuildWeek = McpParams<core::BuildWeek>;
pub type ValidateInput = McpParams<core::ValidateInput>;
pub type InspectPools = McpParams<core::InspectPools>;

pub type McpResult = Result<CallToolResult, ErrorData>;

/// Handler implementations for the MCP server
pub struct McpHandlers {
    engine: Arc<Engine>,
}

impl McpHandlers {
    pub fn new(engine: Arc<Engine>) -> Self {
        Self { engine }
    }

    pub fn build_session(&self, Parameters(params): Parameters<BuildSession>) -> McpResult {
        debug!("build_session: {:?}", params);
        let outcome = self
            .engine
            .build_session(params.as_ref())
            .map_err(|e| to_mcp_error("Failed to build session", &e))?;
        built_result(outcome)
    }

    pub fn build_multi_session(
        &self,
        Parameters(params): Parameters<BuildMultiSession>,
    ) -> McpResult {
        debug!("build_multi_session: {:?}", params);
        let outcome = self
            .engine
            .build_multi_session(params.as_ref())
            .map_err(|e| to_mcp_error("Failed to build session", &e))?;
        built_result(outcome)
    }

    pub fn build_week(&self, Parameters(params): Parameters<BuildWeek>) -> McpResult {
        debug!("build_week: {:?}", params);
        let outcome = self
            .engine
            .build_week(params.as_ref())
            .map_err(|e| to_mcp_error("Failed to build weekly plan", &e))?;
        built_result(outcome)
    }

    pub fn validate_input(&self, Parameters(params): Parameters<ValidateInput>) -> McpResult {
        debug!("validate_input: {:?}", params);
        let report = self
            .engine
            .validate(params.as_ref())
            .map_err(|e| to_mcp_error("Failed to validate input", &e))?;
        Ok(CallToolResult::success(vec![Content::text(
            report.to_string(),
        )]))
    }

    pub fn inspect_pools(&self, Parameters(params): Parameters<InspectPools>) -> McpResult {
        debug!("inspect_pools: {:?}", params);
        let listing = self
            .engine
            .pools(params.as_ref())
            .map_err(|e| to_mcp_error("Failed to inspect pools", &e))?;
        Ok(CallToolResult::success(vec![Content::text(
            listing.to_string(),
        )]))
    }
}

/// Markdown for reading plus JSON for programmatic use; validation failures
/// come back as a tool error carrying the report.
fn built_result<T: Serialize + Display>(outcome: BuildOutcome<T>) -> McpResult {
    match outcome {
        BuildOutcome::Built(value) => Ok(CallToolResult::success(vec![
            Content::text(value.to_string()),
            Content::json(&value)?,
        ])),
        BuildOutcome::Invalid(problems) => Ok(CallToolResult::error(vec![Content::text(
            ValidationReport(problems).to_string(),
        )])),
    }
}

#[cfg(test)]
mod tests {
    use liftplan_core::EngineBuilder;
    use rmcp::model::RawContent;
    use serde_json::json;

    use super::*;

    fn handlers() -> McpHandlers {
        McpHandlers::new(Arc::new(EngineBuilder::new().build().unwrap()))
    }

    fn params<T: JsonSchema + serde::de::DeserializeOwned>(value: serde_json::Value) -> Parameters<McpParams<T>> {
        Parameters(serde_json::from_value(value).unwrap())
    }

    fn first_text(result: &CallToolResult) -> String {
        match &result.content[0].raw {
            RawContent::Text(text) => text.text.clone(),
            other => panic!("Expected text content, got {other:?}"),
        }
    }

    #[test]
    fn test_build_session_returns_markdown_and_json() {
        let result = handlers()
            .build_session(params(json!({
                "input": { "intent": { "goal": "strength" }, "time": { "minutes_per_session": 30 } },
                "focus": "legs",
                "seed": 2
            })))
            .unwrap();
        assert_ne!(result.is_error, Some(true));
        assert_eq!(result.content.len(), 2);
        assert!(first_text(&result).starts_with("# Legs session"));
    }

    #[test]
    fn test_invalid_request_is_a_tool_error() {
        let result = handlers()
            .build_week(params(json!({ "input": { "schedule": { "days_available": [] } } })))
            .unwrap();
        assert_eq!(result.is_error, Some(true));
        assert!(first_text(&result).contains("Validation failed"));
    }

    #[test]
    fn test_unknown_focus_is_invalid_params() {
        let error = handlers()
            .inspect_pools(params(json!({ "input": {}, "focus": "wings" })))
            .unwrap_err();
        assert!(error.message.contains("wings"));
    }
}
