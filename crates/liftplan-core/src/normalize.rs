//! Input normalization and validation.
//!
//! A partial JSON request is deep-merged over the serialized default
//! [`PlanInput`], so nested objects (the barbell and machine sections of the
//! inventory in particular) merge field by field instead of being replaced
//! wholesale. Arrays and scalars replace; `null` keeps the default.

use std::fmt;

use log::debug;
use serde_json::Value;

use crate::error::{EngineError, Result};
use crate::models::{PlanInput, RestPreference};

const MIN_SESSION_MINUTES: u32 = 20;
const MAX_SESSION_MINUTES: u32 = 120;
const MAX_REST_DAYS: u8 = 2;

/// Merges `overlay` into `base` in place.
pub fn deep_merge(base: &mut Value, overlay: &Value) {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            for (key, value) in overlay_map {
                match base_map.get_mut(key) {
                    Some(existing) => deep_merge(existing, value),
                    None => {
                        base_map.insert(key.clone(), value.clone());
                    }
                }
            }
        }
        (_, Value::Null) => {}
        (base, overlay) => *base = overlay.clone(),
    }
}

/// Fills defaults into a partial request and applies the rest-preference
/// override.
///
/// # Errors
///
/// Returns `EngineError::InvalidInput` if the request is not a JSON object
/// and `EngineError::Serialization` if a field has the wrong shape.
pub fn normalize(partial: &Value) -> Result<PlanInput> {
    if !partial.is_object() && !partial.is_null() {
        return Err(EngineError::invalid_input("input").with_reason("expected a JSON object"));
    }
    let mut merged = serde_json::to_value(PlanInput::default())?;
    deep_merge(&mut merged, partial);
    let mut input: PlanInput = serde_json::from_value(merged)?;
    apply_rest_preference(&mut input);
    debug!(
        "Normalized input: goal={:?} focuses={:?} minutes={}",
        input.intent.goal, input.intent.focuses, input.time.minutes_per_session
    );
    Ok(input)
}

/// Deterministically overrides the minimum rest days for recovery-oriented
/// preferences.
pub fn apply_rest_preference(input: &mut PlanInput) {
    match input.preferences.rest_preference {
        RestPreference::HighRecovery => {
            input.schedule.min_rest_days = input.schedule.min_rest_days.max(1);
        }
        RestPreference::MinimalRest => input.schedule.min_rest_days = 0,
        RestPreference::Balanced => {}
    }
}

/// A hard-constraint violation found in a normalized input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    MinutesOutOfRange(u32),
    NoEquipment,
    MissingIntent,
    RestDaysOutOfRange(u8),
    NoAvailableDays,
}

impl Violation {
    /// Whether the builder can proceed anyway. An empty inventory is replaced
    /// by a bodyweight-only one.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Violation::NoEquipment)
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::MinutesOutOfRange(minutes) => write!(
                f,
                "Minutes per session must be between {MIN_SESSION_MINUTES} and {MAX_SESSION_MINUTES} (got {minutes})"
            ),
            Violation::NoEquipment => write!(f, "No equipment is available"),
            Violation::MissingIntent => {
                write!(f, "Select a training goal or at least one focus area")
            }
            Violation::RestDaysOutOfRange(days) => write!(
                f,
                "Minimum rest days must be between 0 and {MAX_REST_DAYS} (got {days})"
            ),
            Violation::NoAvailableDays => write!(f, "Select at least one available training day"),
        }
    }
}

/// Hard-constraint violations of a single-session request.
pub fn violations(input: &PlanInput) -> Vec<Violation> {
    let mut found = Vec::new();
    let minutes = input.time.minutes_per_session;
    if !(MIN_SESSION_MINUTES..=MAX_SESSION_MINUTES).contains(&minutes) {
        found.push(Violation::MinutesOutOfRange(minutes));
    }
    if !input.equipment.has_any() {
        found.push(Violation::NoEquipment);
    }
    if input.intent.goal.is_none() && input.intent.focuses.is_empty() {
        found.push(Violation::MissingIntent);
    }
    if input.schedule.min_rest_days > MAX_REST_DAYS {
        found.push(Violation::RestDaysOutOfRange(input.schedule.min_rest_days));
    }
    found
}

/// Hard-constraint violations of a weekly request.
pub fn week_violations(input: &PlanInput) -> Vec<Violation> {
    let mut found = violations(input);
    if input.schedule.days_available.is_empty() {
        found.push(Violation::NoAvailableDays);
    }
    found
}

/// Human-readable violations. Never fails; callers decide whether to abort.
pub fn validate(input: &PlanInput) -> Vec<String> {
    violations(input).iter().map(ToString::to_string).collect()
}

/// Messages of the violations that prevent building.
pub fn blocking(violations: &[Violation]) -> Vec<String> {
    violations
        .iter()
        .filter(|v| !v.is_recoverable())
        .map(ToString::to_string)
        .collect()
}
