//! Tunable engine constants.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// Tunable constants of the session builder, scorer and merger.
///
/// Every field has a default, so a config file only needs the values it
/// changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Minimum share of total sets that must land on a focus's primary
    /// muscles
    pub focus_ratio_threshold: f64,

    /// Safety cap for every set-count repair loop
    pub max_repair_iterations: u32,

    /// Allowed overshoot of the time budget when admitting an exercise
    /// beyond the minimum count
    pub overshoot_tolerance_minutes: f64,

    /// Deficit above which the increase pass adds sets
    pub increase_threshold_minutes: f64,

    /// Overshoot above which the decrease pass removes sets
    pub decrease_slack_minutes: f64,

    /// Deficit beyond which a finished session carries a shortfall warning
    pub shortfall_tolerance_minutes: f64,

    /// Share of the total duration given to each focus of a merged session
    pub multi_focus_budget_share: f64,

    /// Scale of the random tie-break added to scores
    pub tie_break_jitter: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            focus_ratio_threshold: 0.75,
            max_repair_iterations: 200,
            overshoot_tolerance_minutes: 5.0,
            increase_threshold_minutes: 6.0,
            decrease_slack_minutes: 2.0,
            shortfall_tolerance_minutes: 8.0,
            multi_focus_budget_share: 0.8,
            tie_break_jitter: 0.2,
        }
    }
}

impl EngineConfig {
    /// Reads a JSON config file.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::FileSystem` if the file cannot be read,
    /// `EngineError::Serialization` if it is not valid JSON, and
    /// `EngineError::Configuration` if a value is out of range.
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| EngineError::FileSystem {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: EngineConfig = serde_json::from_str(&text)?;
        config.check()?;
        Ok(config)
    }

    /// Rejects values that would make the builder loops meaningless.
    pub fn check(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.focus_ratio_threshold) {
            return Err(EngineError::Configuration {
                message: format!(
                    "focus_ratio_threshold must be within [0, 1], got {}",
                    self.focus_ratio_threshold
                ),
            });
        }
        if !(0.0..=1.0).contains(&self.multi_focus_budget_share)
            || self.multi_focus_budget_share == 0.0
        {
            return Err(EngineError::Configuration {
                message: format!(
                    "multi_focus_budget_share must be within (0, 1], got {}",
                    self.multi_focus_budget_share
                ),
            });
        }
        if self.overshoot_tolerance_minutes < 0.0
            || self.increase_threshold_minutes < 0.0
            || self.decrease_slack_minutes < 0.0
            || self.shortfall_tolerance_minutes < 0.0
            || self.tie_break_jitter < 0.0
        {
            return Err(EngineError::Configuration {
                message: "minute tolerances and tie_break_jitter must not be negative".into(),
            });
        }
        Ok(())
    }
}
