//! Focus-ratio enforcement.
//!
//! Every iteration either adds a set to a primary-muscle exercise or removes
//! one from another exercise, so the primary share of total sets strictly
//! increases. The loop therefore reaches the threshold, runs out of
//! adjustable sets, or hits the iteration cap; the last two report the
//! constraint as relaxed.

use crate::tables::FocusConstraint;

use super::planned::PlannedExercise;

/// Result of a ratio pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatioOutcome {
    pub ratio: f64,
    pub met: bool,
}

fn is_primary(pick: &PlannedExercise<'_>, constraints: &[FocusConstraint]) -> bool {
    constraints
        .iter()
        .any(|c| c.is_primary(&pick.exercise.primary_muscle))
}

/// Share of total sets landing on the constraints' primary muscles.
pub fn primary_ratio(picks: &[PlannedExercise<'_>], constraints: &[FocusConstraint]) -> f64 {
    let (primary, total) = picks.iter().fold((0u32, 0u32), |(primary, total), pick| {
        let sets = u32::from(pick.sets());
        if is_primary(pick, constraints) {
            (primary + sets, total + sets)
        } else {
            (primary, total + sets)
        }
    });
    if total == 0 {
        0.0
    } else {
        f64::from(primary) / f64::from(total)
    }
}

/// Shifts sets toward primary-muscle exercises until their share reaches the
/// threshold.
pub fn enforce(
    picks: &mut [PlannedExercise<'_>],
    constraints: &[FocusConstraint],
    threshold: f64,
    max_iterations: u32,
) -> RatioOutcome {
    for _ in 0..max_iterations {
        let ratio = primary_ratio(picks, constraints);
        if ratio >= threshold && !picks.is_empty() {
            return RatioOutcome { ratio, met: true };
        }

        let grow = picks
            .iter()
            .enumerate()
            .filter(|(_, p)| is_primary(p, constraints) && p.can_add_set())
            .min_by_key(|(index, p)| (p.sets(), *index))
            .map(|(index, _)| index);
        if let Some(index) = grow {
            let sets = picks[index].sets() + 1;
            picks[index].set_sets(sets);
            continue;
        }

        let shrink = picks
            .iter()
            .enumerate()
            .filter(|(_, p)| !is_primary(p, constraints) && p.can_remove_set())
            .max_by_key(|(index, p)| (p.sets(), *index))
            .map(|(index, _)| index);
        match shrink {
            Some(index) => {
                let sets = picks[index].sets() - 1;
                picks[index].set_sets(sets);
            }
            None => break,
        }
    }

    let ratio = primary_ratio(picks, constraints);
    RatioOutcome {
        ratio,
        met: ratio >= threshold && !picks.is_empty(),
    }
}
