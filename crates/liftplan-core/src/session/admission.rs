//! Admission checks for candidate exercises.

use std::collections::BTreeSet;

use log::debug;

use crate::models::{normalize_name, MovementFamily, PoolSource};
use crate::tables::FocusConstraint;

use super::bounds::SessionBounds;
use super::planned::{total_minutes, PlannedExercise};

/// Why a candidate was turned away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    AtCapacity,
    AlreadyUsed,
    AdjacentRepeat,
    PatternCap,
    FamilyCap,
    OverBudget,
}

/// Selection state the admission check reads.
#[derive(Debug, Clone, Copy)]
pub struct AdmissionState<'s, 'c> {
    pub picks: &'s [PlannedExercise<'c>],
    pub bounds: &'s SessionBounds,
    pub constraint: Option<&'s FocusConstraint>,
    pub repeats_allowed: bool,
    pub target_minutes: f64,
    pub tolerance_minutes: f64,
    /// Families with unused candidates still under their cap in the pool
    /// being drawn from
    pub open_families: &'s BTreeSet<MovementFamily>,
    /// Whether caps and adjacency are ignored to reach the minimum count
    pub relaxed: bool,
}

impl AdmissionState<'_, '_> {
    pub fn is_used(&self, name: &str) -> bool {
        let key = normalize_name(name);
        self.picks
            .iter()
            .any(|p| p.exercise.normalized_name() == key)
    }

    pub fn family_count(&self, family: MovementFamily) -> usize {
        self.picks.iter().filter(|p| p.family == family).count()
    }

    fn pattern_count(&self, pattern: &str) -> usize {
        self.picks
            .iter()
            .filter(|p| p.exercise.movement_pattern.eq_ignore_ascii_case(pattern))
            .count()
    }
}

/// Decides whether a planned candidate may join the session.
pub fn can_add(candidate: &PlannedExercise<'_>, state: &AdmissionState<'_, '_>) -> Result<(), Rejection> {
    let count = state.picks.len();
    if count >= state.bounds.max_exercises {
        return Err(Rejection::AtCapacity);
    }

    if state.is_used(candidate.name()) {
        let repeatable = state.repeats_allowed
            && candidate.source == PoolSource::Primary
            && state
                .constraint
                .is_some_and(|c| c.is_primary(&candidate.exercise.primary_muscle));
        if !repeatable {
            return Err(Rejection::AlreadyUsed);
        }
    }

    let minimum_met = count >= state.bounds.min_exercises;

    if !state.relaxed {
        if minimum_met {
            if let Some(last) = state.picks.last() {
                let same_pattern = last
                    .exercise
                    .movement_pattern
                    .eq_ignore_ascii_case(&candidate.exercise.movement_pattern);
                let same_muscle = last
                    .exercise
                    .primary_muscle
                    .eq_ignore_ascii_case(&candidate.exercise.primary_muscle);
                if same_pattern || same_muscle {
                    return Err(Rejection::AdjacentRepeat);
                }
            }
        }

        if state.pattern_count(&candidate.exercise.movement_pattern) >= state.bounds.pattern_cap {
            return Err(Rejection::PatternCap);
        }

        let family_full = state.family_count(candidate.family) >= state.bounds.family_cap;
        let alternatives = state
            .open_families
            .iter()
            .any(|family| *family != candidate.family);
        if family_full && alternatives {
            return Err(Rejection::FamilyCap);
        }
    }

    if minimum_met
        && total_minutes(state.picks) + candidate.minutes()
            > state.target_minutes + state.tolerance_minutes
    {
        return Err(Rejection::OverBudget);
    }

    Ok(())
}

/// Families of a pool's unused candidates that are still under the cap.
pub fn open_families(
    pool: &[PlannedExercise<'_>],
    picks: &[PlannedExercise<'_>],
    family_cap: usize,
) -> BTreeSet<MovementFamily> {
    let used: BTreeSet<String> = picks.iter().map(|p| p.exercise.normalized_name()).collect();
    pool.iter()
        .filter(|candidate| !used.contains(&candidate.exercise.normalized_name()))
        .map(|candidate| candidate.family)
        .filter(|family| picks.iter().filter(|p| p.family == *family).count() < family_cap)
        .collect()
}

pub(crate) fn log_rejection(name: &str, rejection: Rejection) {
    debug!("Rejected {name}: {rejection:?}");
}
