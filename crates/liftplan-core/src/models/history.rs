//! Caller-supplied recency data used to penalize repetition.

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::exercise::normalize_name;
use super::session::GeneratedSession;

/// Recent exercise names, movement patterns and primary muscles from prior
/// sessions. Absence is valid and only degrades the variety bonus.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(default)]
pub struct SessionHistory {
    pub recent_names: Vec<String>,
    pub recent_patterns: Vec<String>,
    pub recent_muscles: Vec<String>,
}

impl SessionHistory {
    pub fn is_empty(&self) -> bool {
        self.recent_names.is_empty()
            && self.recent_patterns.is_empty()
            && self.recent_muscles.is_empty()
    }

    pub fn contains_name(&self, name: &str) -> bool {
        let wanted = normalize_name(name);
        self.recent_names.iter().any(|n| normalize_name(n) == wanted)
    }

    pub fn contains_pattern(&self, pattern: &str) -> bool {
        self.recent_patterns
            .iter()
            .any(|p| p.eq_ignore_ascii_case(pattern))
    }

    pub fn contains_muscle(&self, muscle: &str) -> bool {
        self.recent_muscles
            .iter()
            .any(|m| m.eq_ignore_ascii_case(muscle))
    }

    /// Returns a new history with the session's exercises prepended, most
    /// recent first.
    pub fn prepend_session(&self, session: &GeneratedSession) -> SessionHistory {
        let mut next = SessionHistory::default();
        for exercise in &session.exercises {
            next.recent_names.push(exercise.name.clone());
            next.recent_patterns.push(exercise.movement_pattern.clone());
            next.recent_muscles.push(exercise.primary_muscle.clone());
        }
        next.recent_names.extend(self.recent_names.iter().cloned());
        next.recent_patterns.extend(self.recent_patterns.iter().cloned());
        next.recent_muscles.extend(self.recent_muscles.iter().cloned());
        next
    }
}
