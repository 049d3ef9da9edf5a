//! Per-exercise duration estimation.

use crate::models::{
    parse_duration_seconds, Category, EquipmentKind, EquipmentOption, Exercise, Goal, Prescription,
};

/// Estimated time cost of one exercise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeEstimate {
    pub setup_minutes: f64,
    pub total_minutes: f64,
}

/// Setup overhead for the resolved equipment.
pub fn setup_minutes(resolved: Option<&EquipmentOption>) -> f64 {
    match resolved.map(|option| option.item.kind()) {
        None | Some(EquipmentKind::Bodyweight) => 1.0,
        Some(EquipmentKind::FreeWeight | EquipmentKind::Band) => 2.0,
        Some(EquipmentKind::Barbell | EquipmentKind::Machine) => 3.0,
    }
}

/// Working seconds of one set.
pub fn work_seconds(exercise: &Exercise, reps: &str, goal: Goal) -> f64 {
    if let Some(seconds) = parse_duration_seconds(reps) {
        return seconds;
    }
    if exercise.category == Category::Cardio {
        return 60.0;
    }
    match goal {
        Goal::Strength | Goal::Mobility => 30.0,
        Goal::Hypertrophy | Goal::WeightLoss => 40.0,
        Goal::Endurance | Goal::Cardio => 45.0,
        Goal::General => 35.0,
    }
}

/// Estimates setup plus working and resting time. A catalog-declared total
/// duration, scaled to the prescribed sets, is used instead when larger.
pub fn estimate(
    exercise: &Exercise,
    prescription: &Prescription,
    resolved: Option<&EquipmentOption>,
    goal: Goal,
) -> TimeEstimate {
    let setup = setup_minutes(resolved);
    let sets = f64::from(prescription.sets);
    let per_set = work_seconds(exercise, &prescription.reps, goal)
        + f64::from(prescription.rest_seconds);
    let computed = setup + sets * per_set / 60.0;

    let fallback = exercise
        .duration_minutes
        .filter(|_| exercise.sets > 0)
        .map(|minutes| minutes / f64::from(exercise.sets) * sets)
        .unwrap_or(0.0);

    TimeEstimate {
        setup_minutes: setup,
        total_minutes: computed.max(fallback),
    }
}
