//! Weekly plan output types.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use super::input::Weekday;
use super::session::{GeneratedSession, ImpactScore};

/// A session placed on a training day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledSession {
    pub day: Weekday,

    /// Calendar date, when the schedule names a week start
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<Date>,

    pub session: GeneratedSession,
}

/// A full weekly template. Ownership transfers entirely to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedPlan {
    pub sessions: Vec<ScheduledSession>,
    pub rationale: String,
    pub impact: ImpactScore,
}

impl GeneratedPlan {
    pub fn total_minutes(&self) -> f64 {
        self.sessions.iter().map(|s| s.session.total_minutes).sum()
    }
}
