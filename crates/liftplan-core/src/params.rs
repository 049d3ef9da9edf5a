//! Request parameter structures shared by the CLI and the MCP server.
//!
//! Every request carries its training input as a *partial* JSON object. The
//! engine deep-merges it over the documented defaults, so callers only send
//! the fields they care about:
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   CLI flags     │    │   MCP request   │    │  Core params    │
//! │  (clap derives) │───▶│ (serde/schema)  │───▶│ (partial input) │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! Focus names stay strings at this layer and are parsed by the accessors
//! below, so a bad focus becomes an `InvalidInput` error naming the field.
//!
//! ```rust
//! use liftplan_core::params::BuildSession;
//! use serde_json::json;
//!
//! let params: BuildSession = serde_json::from_value(json!({
//!     "input": { "time": { "minutes_per_session": 30 } },
//!     "focus": "chest",
//!     "seed": 7
//! }))?;
//! assert!(params.focus()?.is_some());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::str::FromStr;

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{EngineError, Result};
use crate::models::{Focus, SessionHistory};

fn parse_focus(field: &str, name: &str) -> Result<Focus> {
    Focus::from_str(name).map_err(|e| EngineError::invalid_input(field).with_reason(e))
}

/// Parameters for building one session for a single focus.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct BuildSession {
    /// Partial training input; omitted fields take their defaults
    #[serde(default)]
    pub input: Value,
    /// Focus area (e.g. 'chest', 'legs', 'full_body'); overrides the input's
    /// focuses
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focus: Option<String>,
    /// Seed for reproducible tie-breaking
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u32>,
    /// Recently performed exercises, patterns and muscles
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history: Option<SessionHistory>,
}

impl BuildSession {
    /// The requested focus, parsed.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InvalidInput` for an unknown focus name.
    pub fn focus(&self) -> Result<Option<Focus>> {
        self.focus
            .as_deref()
            .map(|name| parse_focus("focus", name))
            .transpose()
    }
}

/// Parameters for building one session spanning several focuses.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct BuildMultiSession {
    /// Partial training input; omitted fields take their defaults
    #[serde(default)]
    pub input: Value,
    /// Focus areas to combine; overrides the input's focuses when non-empty
    #[serde(default)]
    pub focuses: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history: Option<SessionHistory>,
}

impl BuildMultiSession {
    /// The requested focuses, parsed.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InvalidInput` for an unknown focus name.
    pub fn focuses(&self) -> Result<Vec<Focus>> {
        self.focuses
            .iter()
            .map(|name| parse_focus("focuses", name))
            .collect()
    }
}

/// Parameters for building a weekly plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct BuildWeek {
    /// Partial training input including the weekly schedule
    #[serde(default)]
    pub input: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u32>,
    /// History preceding the week
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history: Option<SessionHistory>,
}

/// Parameters for validating an input without building.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ValidateInput {
    /// Partial training input
    #[serde(default)]
    pub input: Value,
    /// Also apply the weekly-plan checks
    #[serde(default)]
    pub weekly: bool,
}

/// Parameters for inspecting the selection pools of a focus.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct InspectPools {
    #[serde(default)]
    pub input: Value,
    pub focus: String,
}

impl InspectPools {
    /// The focus to inspect, parsed.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InvalidInput` for an unknown focus name.
    pub fn focus(&self) -> Result<Focus> {
        parse_focus("focus", &self.focus)
    }
}
