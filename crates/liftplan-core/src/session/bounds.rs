//! Duration-derived session bounds.

use crate::models::Goal;

/// Exercise-count, set-count and diversity caps for one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionBounds {
    pub min_exercises: usize,
    pub max_exercises: usize,
    pub min_sets: u8,
    pub max_sets: u8,
    /// Maximum exercises per movement family while other families remain
    pub family_cap: usize,
    /// Maximum exercises per movement pattern
    pub pattern_cap: usize,
}

impl SessionBounds {
    pub fn for_session(minutes: u32, goal: Goal, constrained: bool) -> Self {
        let (min_exercises, max_exercises) = exercise_count(minutes, goal);
        let (min_sets, max_sets) = set_range(minutes);
        Self {
            min_exercises,
            max_exercises,
            min_sets,
            max_sets,
            family_cap: family_cap(minutes),
            pattern_cap: if constrained { 4 } else { 2 },
        }
    }
}

/// Base exercise-count band for a duration, before goal adjustment.
pub fn base_exercise_count(minutes: u32) -> (usize, usize) {
    match minutes {
        0..=20 => (2, 3),
        21..=30 => (3, 4),
        31..=45 => (4, 5),
        46..=60 => (5, 6),
        61..=75 => (5, 7),
        76..=90 => (6, 8),
        _ => (7, 9),
    }
}

/// Exercise-count band adjusted for the goal's typical rest length.
pub fn exercise_count(minutes: u32, goal: Goal) -> (usize, usize) {
    let (min, max) = base_exercise_count(minutes);
    match goal {
        Goal::Strength => (min.saturating_sub(1).max(2), max.saturating_sub(1).max(2)),
        Goal::Endurance | Goal::Cardio | Goal::Mobility => {
            let min = if minutes >= 30 { min + 1 } else { min };
            (min, max + 1)
        }
        Goal::Hypertrophy | Goal::WeightLoss | Goal::General => (min, max),
    }
}

fn set_range(minutes: u32) -> (u8, u8) {
    match minutes {
        0..=30 => (2, 3),
        31..=60 => (2, 4),
        61..=90 => (3, 5),
        _ => (3, 6),
    }
}

fn family_cap(minutes: u32) -> usize {
    match minutes {
        0..=30 => 1,
        31..=60 => 2,
        _ => 3,
    }
}
