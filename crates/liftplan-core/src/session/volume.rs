//! Set-count rebalancing against the time budget.
//!
//! Each pass changes one set per iteration and recomputes only the affected
//! exercise's estimate, so the loops are bounded by the total number of
//! removable or addable sets, and additionally by the configured iteration
//! cap.

use log::debug;

use crate::models::PoolSource;

use super::planned::{total_minutes, PlannedExercise};

/// Tuning for the volume passes.
#[derive(Debug, Clone, Copy)]
pub struct VolumeLimits {
    pub target_minutes: f64,
    /// Overshoot tolerated before sets are removed, and the ceiling when
    /// adding sets
    pub slack_minutes: f64,
    /// Deficit above which sets are added
    pub increase_threshold_minutes: f64,
    pub max_iterations: u32,
}

fn removal_rank(source: PoolSource) -> u8 {
    match source {
        PoolSource::Accessory | PoolSource::Fallback => 0,
        PoolSource::Secondary => 1,
        PoolSource::Primary => 2,
    }
}

fn addition_rank(source: PoolSource) -> u8 {
    match source {
        PoolSource::Primary => 0,
        PoolSource::Secondary => 1,
        PoolSource::Accessory | PoolSource::Fallback => 2,
    }
}

/// Removes sets, accessory and secondary work first, while the session runs
/// over budget. Returns the number of sets removed.
pub fn decrease(picks: &mut [PlannedExercise<'_>], limits: &VolumeLimits) -> u32 {
    let mut removed = 0;
    for _ in 0..limits.max_iterations {
        if total_minutes(picks) <= limits.target_minutes + limits.slack_minutes {
            break;
        }
        let victim = picks
            .iter()
            .enumerate()
            .filter(|(_, p)| p.can_remove_set())
            .min_by_key(|(index, p)| {
                (
                    removal_rank(p.source),
                    std::cmp::Reverse(p.sets()),
                    std::cmp::Reverse(*index),
                )
            })
            .map(|(index, _)| index);
        let Some(index) = victim else {
            break;
        };
        let sets = picks[index].sets() - 1;
        picks[index].set_sets(sets);
        removed += 1;
    }
    if removed > 0 {
        debug!(
            "Removed {removed} sets; session now {:.1} min",
            total_minutes(picks)
        );
    }
    removed
}

/// Adds sets, primary work first, while the session falls short of the
/// budget by more than the increase threshold. A set is only added when the
/// session stays within the slack and the exercise is under its duration-band
/// maximum. Returns the number of sets added.
pub fn increase(picks: &mut [PlannedExercise<'_>], limits: &VolumeLimits) -> u32 {
    grow(picks, limits, |p| p.can_add_set())
}

/// Like [`increase`], but lets each exercise go past its duration-band
/// maximum up to the absolute set ceiling. Used once the exercise count is
/// exhausted and the session is still short.
pub fn extend(picks: &mut [PlannedExercise<'_>], limits: &VolumeLimits) -> u32 {
    grow(picks, limits, |p| p.can_extend_set())
}

/// Minutes by which the session misses the budget, if more than `allowed`.
pub fn shortfall(picks: &[PlannedExercise<'_>], target_minutes: f64, allowed: f64) -> Option<f64> {
    let missing = target_minutes - total_minutes(picks);
    (missing > allowed).then_some(missing)
}

fn grow(
    picks: &mut [PlannedExercise<'_>],
    limits: &VolumeLimits,
    open: impl Fn(&PlannedExercise<'_>) -> bool,
) -> u32 {
    let mut added = 0;
    for _ in 0..limits.max_iterations {
        let total = total_minutes(picks);
        if limits.target_minutes - total <= limits.increase_threshold_minutes {
            break;
        }
        let ceiling = limits.target_minutes + limits.slack_minutes;
        let mut order: Vec<usize> = (0..picks.len()).filter(|&i| open(&picks[i])).collect();
        order.sort_by_key(|&i| (addition_rank(picks[i].source), picks[i].sets(), i));
        let chosen = order.into_iter().find(|&i| {
            let pick = &picks[i];
            total - pick.minutes() + pick.minutes_with_sets(pick.sets() + 1) <= ceiling
        });
        let Some(index) = chosen else {
            break;
        };
        let sets = picks[index].sets() + 1;
        picks[index].set_sets(sets);
        added += 1;
    }
    if added > 0 {
        debug!(
            "Added {added} sets; session now {:.1} min",
            total_minutes(picks)
        );
    }
    added
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        Category, Equipment, EquipmentOption, Exercise, Goal, MovementFamily, Prescription,
    };
    use crate::timing;

    fn push_up(name: &str) -> Exercise {
        Exercise {
            name: name.to_string(),
            category: Category::Strength,
            primary_muscle: "chest".to_string(),
            secondary_muscles: vec![],
            movement_pattern: "horizontal_push".to_string(),
            equipment: vec![EquipmentOption::new(Equipment::Bodyweight)],
            sets: 3,
            reps: "8-12".to_string(),
            rpe: 7,
            rest_seconds: 60,
            load_target: None,
            duration_minutes: None,
            high_impact: false,
        }
    }

    // 1 min setup plus 95 s per set
    fn pick(exercise: &Exercise) -> PlannedExercise<'_> {
        let prescription = Prescription {
            sets: 3,
            reps: "8-12".to_string(),
            rpe: 7,
            rest_seconds: 60,
        };
        let option = EquipmentOption::new(Equipment::Bodyweight);
        let estimate = timing::estimate(exercise, &prescription, Some(&option), Goal::General);
        PlannedExercise {
            exercise,
            option,
            source: PoolSource::Primary,
            family: MovementFamily::Press,
            goal: Goal::General,
            prescription,
            load: None,
            estimate,
            min_sets: 2,
            max_sets: 3,
        }
    }

    fn limits(target_minutes: f64) -> VolumeLimits {
        VolumeLimits {
            target_minutes,
            slack_minutes: 2.0,
            increase_threshold_minutes: 6.0,
            max_iterations: 200,
        }
    }

    #[test]
    fn test_increase_stops_at_band_maximum() {
        let (a, b) = (push_up("Push-Up"), push_up("Diamond Push-Up"));
        let mut picks = vec![pick(&a), pick(&b)];

        assert_eq!(increase(&mut picks, &limits(30.0)), 0);
        assert!(picks.iter().all(|p| p.sets() == 3));
    }

    #[test]
    fn test_extend_grows_past_band_until_close_enough() {
        let (a, b) = (push_up("Push-Up"), push_up("Diamond Push-Up"));
        let mut picks = vec![pick(&a), pick(&b)];

        // 11.5 -> 14.7 min, within 6 of the 20 min target
        assert_eq!(extend(&mut picks, &limits(20.0)), 2);
        assert_eq!((picks[0].sets(), picks[1].sets()), (4, 4));
        assert!(shortfall(&picks, 20.0, 8.0).is_none());
    }

    #[test]
    fn test_extend_stops_at_absolute_ceiling_and_reports_shortfall() {
        let (a, b) = (push_up("Push-Up"), push_up("Diamond Push-Up"));
        let mut picks = vec![pick(&a), pick(&b)];

        extend(&mut picks, &limits(30.0));
        assert!(picks.iter().all(|p| p.sets() == 6));
        let missing = shortfall(&picks, 30.0, 8.0).unwrap();
        assert!((missing - 9.0).abs() < 1e-9);
    }

    #[test]
    fn test_decrease_removes_accessory_sets_first() {
        let (a, b) = (push_up("Push-Up"), push_up("Bench Dip"));
        let mut picks = vec![pick(&a), pick(&b)];
        picks[1].source = PoolSource::Accessory;

        // 11.5 min against 8 + 2 slack: one accessory set goes
        assert_eq!(decrease(&mut picks, &limits(8.0)), 1);
        assert_eq!((picks[0].sets(), picks[1].sets()), (3, 2));
    }
}
