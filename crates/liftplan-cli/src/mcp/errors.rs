//! Error handling utilities for MCP server

use liftplan_core::EngineError;
use rmcp::ErrorData;

/// Converts engine errors to MCP errors; malformed requests become
/// invalid-params errors.
pub fn to_mcp_error(message: &str, error: &EngineError) -> ErrorData {
    match error {
        EngineError::InvalidInput { .. } | EngineError::Serialization { .. } => {
            ErrorData::invalid_params(format!("{message}: {error}"), None)
        }
        _ => ErrorData::internal_error(format!("{message}: {error}"), None),
    }
}
