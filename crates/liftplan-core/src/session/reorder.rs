//! Final variety ordering.

use super::planned::PlannedExercise;

fn same_pattern(a: &PlannedExercise<'_>, b: &PlannedExercise<'_>) -> bool {
    a.exercise
        .movement_pattern
        .eq_ignore_ascii_case(&b.exercise.movement_pattern)
}

fn same_muscle(a: &PlannedExercise<'_>, b: &PlannedExercise<'_>) -> bool {
    a.exercise
        .primary_muscle
        .eq_ignore_ascii_case(&b.exercise.primary_muscle)
}

fn same_signature(a: &PlannedExercise<'_>, b: &PlannedExercise<'_>) -> bool {
    same_pattern(a, b) && same_muscle(a, b) && a.family == b.family
}

/// Whether the picks left after taking `chosen` can still be ordered with no
/// two identical signatures side by side, the first of them differing from
/// `chosen`.
fn leaves_arrangeable(remaining: &[PlannedExercise<'_>], chosen: usize) -> bool {
    let rest: Vec<&PlannedExercise<'_>> = remaining
        .iter()
        .enumerate()
        .filter(|&(i, _)| i != chosen)
        .map(|(_, p)| p)
        .collect();
    let n = rest.len();
    rest.iter().all(|p| {
        let count = rest.iter().filter(|other| same_signature(other, p)).count();
        if same_signature(p, &remaining[chosen]) {
            count <= n - count
        } else {
            count <= n - count + 1
        }
    })
}

/// Greedily rebuilds the order so neighbours differ in movement pattern,
/// primary muscle and family where possible, falling back to a different
/// primary muscle, then to any different signature, and only then to an
/// identical neighbour.
///
/// Candidates whose removal would strand a cluster of identical signatures
/// are avoided while a safe one exists. Within a tier the exercise whose
/// signature is most common among the remaining ones goes first.
pub fn reorder(picks: Vec<PlannedExercise<'_>>) -> Vec<PlannedExercise<'_>> {
    let mut remaining = picks;
    if remaining.len() < 3 {
        return remaining;
    }
    let mut ordered = Vec::with_capacity(remaining.len());
    let opening = (0..remaining.len())
        .find(|&i| leaves_arrangeable(&remaining, i))
        .unwrap_or(0);
    ordered.push(remaining.remove(opening));

    while !remaining.is_empty() {
        let Some(previous) = ordered.last() else {
            break;
        };

        let mut candidates: Vec<usize> = (0..remaining.len())
            .filter(|&i| !same_signature(&remaining[i], previous))
            .collect();
        if candidates.is_empty() {
            candidates = (0..remaining.len()).collect();
        }
        let safe: Vec<usize> = candidates
            .iter()
            .copied()
            .filter(|&i| leaves_arrangeable(&remaining, i))
            .collect();
        if !safe.is_empty() {
            candidates = safe;
        }

        let fully_distinct = |p: &PlannedExercise<'_>| {
            !same_pattern(p, previous) && !same_muscle(p, previous) && p.family != previous.family
        };
        let other_muscle = |p: &PlannedExercise<'_>| !same_muscle(p, previous);

        let mut tier: Vec<usize> = candidates
            .iter()
            .copied()
            .filter(|&i| fully_distinct(&remaining[i]))
            .collect();
        if tier.is_empty() {
            tier = candidates
                .iter()
                .copied()
                .filter(|&i| other_muscle(&remaining[i]))
                .collect();
        }
        if tier.is_empty() {
            tier = candidates;
        }

        let group_size = |i: usize| {
            remaining
                .iter()
                .filter(|other| same_signature(other, &remaining[i]))
                .count()
        };
        let chosen = tier
            .iter()
            .copied()
            .max_by_key(|&i| (group_size(i), std::cmp::Reverse(i)))
            .unwrap_or(0);
        ordered.push(remaining.remove(chosen));
    }
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        Category, Equipment, EquipmentInventory, EquipmentOption, Exercise, Experience, Goal,
        Intensity, PoolSource,
    };
    use crate::prescription::PrescriptionOptions;
    use crate::session::bounds::SessionBounds;
    use crate::session::planned::PlanningContext;
    use crate::tables::EngineTables;

    fn exercise(name: &str, muscle: &str, pattern: &str) -> Exercise {
        Exercise {
            name: name.to_string(),
            category: Category::Strength,
            primary_muscle: muscle.to_string(),
            secondary_muscles: vec![],
            movement_pattern: pattern.to_string(),
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

    fn plan<'c>(catalog: &'c [Exercise]) -> Vec<PlannedExercise<'c>> {
        let tables = EngineTables::standard();
        let inventory = EquipmentInventory::bodyweight_only();
        let ctx = PlanningContext {
            tables: &tables,
            inventory: &inventory,
            goal: Goal::Hypertrophy,
            intensity: Intensity::Moderate,
            experience: Experience::Intermediate,
            options: PrescriptionOptions::default(),
            bounds: SessionBounds::for_session(45, Goal::Hypertrophy, true),
        };
        catalog
            .iter()
            .filter_map(|e| PlannedExercise::new(e, PoolSource::Primary, &ctx))
            .collect()
    }

    fn adjacent_identical(order: &[PlannedExercise<'_>]) -> Vec<(String, String)> {
        order
            .windows(2)
            .filter(|pair| same_signature(&pair[0], &pair[1]))
            .map(|pair| (pair[0].name().to_string(), pair[1].name().to_string()))
            .collect()
    }

    #[test]
    fn test_clustered_presses_are_split_by_fly() {
        let catalog = vec![
            exercise("Dumbbell Bench Press", "chest", "horizontal_push"),
            exercise("Barbell Bench Press", "chest", "horizontal_push"),
            exercise("Seated Chest Press", "chest", "horizontal_push"),
            exercise("Cable Fly", "chest", "chest_fly"),
            exercise("Push-Up", "chest", "horizontal_push"),
        ];
        let ordered = reorder(plan(&catalog));

        assert_eq!(ordered.len(), 5);
        // four presses and one fly cannot avoid every repeat; the fly must
        // still break up the cluster
        let repeats = adjacent_identical(&ordered);
        assert!(repeats.len() <= 2, "{repeats:?}");
        let fly = ordered.iter().position(|p| p.name() == "Cable Fly").unwrap();
        assert!(fly > 0 && fly < ordered.len() - 1, "fly at the edge: {fly}");
    }

    #[test]
    fn test_arrangeable_cluster_has_no_identical_neighbours() {
        let catalog = vec![
            exercise("Dumbbell Bench Press", "chest", "horizontal_push"),
            exercise("Barbell Bench Press", "chest", "horizontal_push"),
            exercise("Seated Chest Press", "chest", "horizontal_push"),
            exercise("Cable Fly", "chest", "chest_fly"),
            exercise("Dumbbell Fly", "chest", "chest_fly"),
            exercise("Triceps Pushdown", "triceps", "elbow_extension"),
        ];
        let ordered = reorder(plan(&catalog));

        assert_eq!(ordered.len(), 6);
        assert!(adjacent_identical(&ordered).is_empty());
    }

    #[test]
    fn test_short_lists_keep_their_order() {
        let catalog = vec![
            exercise("Barbell Bench Press", "chest", "horizontal_push"),
            exercise("Seated Chest Press", "chest", "horizontal_push"),
        ];
        let ordered = reorder(plan(&catalog));
        assert_eq!(ordered[0].name(), "Barbell Bench Press");
    }
}
