//! Human-readable explanations attached to generated sessions and plans.

use crate::models::{
    Focus, GeneratedPlan, GeneratedSession, Intensity, PoolSource, SessionError, SessionWarning,
};

fn focus_list(focuses: &[Focus]) -> String {
    if focuses.is_empty() {
        return "general".to_string();
    }
    focuses
        .iter()
        .map(|f| f.as_str().replace('_', " "))
        .collect::<Vec<_>>()
        .join(" + ")
}

/// Explains how a session was put together.
pub fn for_session(session: &GeneratedSession, intensity: Intensity) -> String {
    if let Some(SessionError::FocusConstraintsUnmet) = session.error {
        return format!(
            "No usable exercise targets {} with the available equipment and preferences, so no session was built.",
            focus_list(&session.focus)
        );
    }

    let mut parts = vec![format!(
        "{} session for a {} goal at {} intensity: {} exercises, an estimated {:.0} of {} minutes.",
        capitalize(&focus_list(&session.focus)),
        session.goal.as_str().replace('_', " "),
        intensity.as_str(),
        session.exercises.len(),
        session.total_minutes,
        session.target_minutes,
    )];

    let primary_sets: u32 = session
        .exercises
        .iter()
        .filter(|e| e.source == PoolSource::Primary)
        .map(|e| u32::from(e.sets))
        .sum();
    parts.push(format!(
        "{primary_sets} of {} sets come from the primary pool.",
        session.total_sets
    ));
    if let Some(ratio) = session.primary_set_ratio {
        parts.push(format!(
            "Target muscles receive {:.0}% of all sets.",
            ratio * 100.0
        ));
    }

    for warning in &session.warnings {
        parts.push(
            match warning {
                SessionWarning::FocusConstraintsRelaxed => {
                    "The target-muscle share could not be fully reached, so the session is a best effort."
                }
                SessionWarning::EmptyEquipmentInventory => {
                    "No equipment was listed, so a bodyweight-only session was built."
                }
                SessionWarning::TimeBudgetShortfall => {
                    "The matching exercises run short of the available time even at their highest set counts."
                }
            }
            .to_string(),
        );
    }
    if session.repeats_allowed {
        parts.push("Few exercises match the focus, so some appear more than once.".to_string());
    }

    parts.join(" ")
}

/// Explains a weekly plan.
pub fn for_plan(plan: &GeneratedPlan) -> String {
    if plan.sessions.is_empty() {
        return "No training days could be scheduled.".to_string();
    }
    let days = plan
        .sessions
        .iter()
        .map(|s| format!("{} ({})", capitalize(s.day.as_str()), focus_list(&s.session.focus)))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "{} sessions this week, about {:.0} minutes in total: {days}.",
        plan.sessions.len(),
        plan.total_minutes()
    )
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
