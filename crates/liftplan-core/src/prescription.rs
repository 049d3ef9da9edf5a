//! Sets, reps, RPE and rest adaptation to goal, intensity and experience.

use crate::models::{Category, Exercise, Experience, Goal, Intensity, Prescription};

const MIN_SETS: u8 = 2;
const MAX_SETS: u8 = 6;
const MIN_RPE: u8 = 5;
const MAX_RPE: u8 = 9;
const MAX_REST_SECONDS: f64 = 180.0;
const MIN_REST_CARDIO: f64 = 30.0;
const MIN_REST_OTHER: f64 = 45.0;

/// Caller-side modifiers applied on top of the goal and intensity rules.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrescriptionOptions {
    /// Multiplier from the user's rest preference
    pub rest_modifier: f64,
}

impl Default for PrescriptionOptions {
    fn default() -> Self {
        Self { rest_modifier: 1.0 }
    }
}

/// Rep range for a strength-style movement, or `None` when the catalog reps
/// are kept.
pub fn rep_range(goal: Goal, intensity: Intensity) -> Option<&'static str> {
    use Intensity::*;
    let reps = match (goal, intensity) {
        (Goal::Strength, Low) => "5-8",
        (Goal::Strength, Moderate) => "4-6",
        (Goal::Strength, High) => "3-6",
        (Goal::Hypertrophy, Low) => "10-15",
        (Goal::Hypertrophy, Moderate) => "8-12",
        (Goal::Hypertrophy, High) => "6-10",
        (Goal::Endurance | Goal::Cardio, Low) => "12-15",
        (Goal::Endurance | Goal::Cardio, Moderate) => "15-18",
        (Goal::Endurance | Goal::Cardio, High) => "15-20",
        (Goal::WeightLoss, Low) => "12-15",
        (Goal::WeightLoss, Moderate) => "10-15",
        (Goal::WeightLoss, High) => "8-12",
        (Goal::General, Low) => "10-12",
        (Goal::General, Moderate) => "8-12",
        (Goal::General, High) => "6-10",
        (Goal::Mobility, _) => return None,
    };
    Some(reps)
}

fn intensity_rest_modifier(intensity: Intensity) -> f64 {
    match intensity {
        Intensity::Low => 0.85,
        Intensity::Moderate => 1.0,
        Intensity::High => 1.15,
    }
}

fn goal_rest_modifier(goal: Goal) -> f64 {
    match goal {
        Goal::Strength => 1.2,
        Goal::Endurance | Goal::Cardio => 0.7,
        Goal::Mobility => 0.5,
        Goal::Hypertrophy | Goal::WeightLoss | Goal::General => 1.0,
    }
}

/// Strength-category exercises counted in reps, not time.
pub fn is_strength_style(exercise: &Exercise) -> bool {
    exercise.category == Category::Strength && !exercise.has_duration_reps()
}

/// Derives the prescription for an exercise.
///
/// Sets are never reduced for high intensity; the rep range already drops.
pub fn adapt(
    exercise: &Exercise,
    goal: Goal,
    intensity: Intensity,
    experience: Experience,
    opts: PrescriptionOptions,
) -> Prescription {
    let shift: i16 = match experience {
        Experience::Beginner => -1,
        Experience::Intermediate => 0,
        Experience::Advanced => 1,
    };
    let sets = (i16::from(exercise.sets) + shift).clamp(i16::from(MIN_SETS), i16::from(MAX_SETS));

    let reps = if is_strength_style(exercise) {
        rep_range(goal, intensity)
            .map(str::to_string)
            .unwrap_or_else(|| exercise.reps.clone())
    } else {
        exercise.reps.clone()
    };

    let rpe_shift: i16 = match intensity {
        Intensity::Low => -1,
        Intensity::Moderate => 0,
        Intensity::High => 1,
    };
    let rpe = (i16::from(exercise.rpe) + rpe_shift).clamp(i16::from(MIN_RPE), i16::from(MAX_RPE));

    let floor = if exercise.category == Category::Cardio {
        MIN_REST_CARDIO
    } else {
        MIN_REST_OTHER
    };
    let rest = f64::from(exercise.rest_seconds)
        * opts.rest_modifier
        * intensity_rest_modifier(intensity)
        * goal_rest_modifier(goal);
    let rest = (rest.clamp(floor, MAX_REST_SECONDS) / 5.0).round() * 5.0;

    Prescription {
        sets: sets as u8,
        reps,
        rpe: rpe as u8,
        rest_seconds: rest as u32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Equipment, EquipmentOption};

    fn exercise(category: Category, sets: u8, reps: &str, rpe: u8, rest: u32) -> Exercise {
        Exercise {
            name: "Test".to_string(),
            category,
            primary_muscle: "quads".to_string(),
            secondary_muscles: vec![],
            movement_pattern: "squat".to_string(),
            equipment: vec![EquipmentOption::new(Equipment::Bodyweight)],
            sets,
            reps: reps.to_string(),
            rpe,
            rest_seconds: rest,
            load_target: None,
            duration_minutes: None,
            high_impact: false,
        }
    }

    #[test]
    fn test_strength_high_intensity() {
        let squat = exercise(Category::Strength, 4, "8-12", 8, 120);
        let rx = adapt(
            &squat,
            Goal::Strength,
            Intensity::High,
            Experience::Advanced,
            PrescriptionOptions::default(),
        );
        assert_eq!(rx.reps, "3-6");
        assert_eq!(rx.sets, 5);
        assert_eq!(rx.rpe, 9);
        // 120 * 1.15 * 1.2 = 165.6, rounded to 165
        assert_eq!(rx.rest_seconds, 165);
    }

    #[test]
    fn test_sets_clamped_and_duration_reps_kept() {
        let plank = exercise(Category::Strength, 2, "30s", 5, 30);
        let rx = adapt(
            &plank,
            Goal::Endurance,
            Intensity::Low,
            Experience::Beginner,
            PrescriptionOptions::default(),
        );
        assert_eq!(rx.sets, 2);
        assert_eq!(rx.reps, "30s");
        assert_eq!(rx.rpe, 5);
        assert_eq!(rx.rest_seconds, 45);
    }

    #[test]
    fn test_cardio_rest_floor() {
        let bike = exercise(Category::Cardio, 1, "10 min", 6, 30);
        let rx = adapt(
            &bike,
            Goal::Cardio,
            Intensity::Moderate,
            Experience::Intermediate,
            PrescriptionOptions { rest_modifier: 0.85 },
        );
        assert_eq!(rx.sets, 2);
        assert_eq!(rx.rest_seconds, 30);
        assert_eq!(rx.reps, "10 min");
    }

    #[test]
    fn test_mobility_goal_keeps_catalog_reps() {
        let squat = exercise(Category::Strength, 3, "8-12", 7, 60);
        let rx = adapt(
            &squat,
            Goal::Mobility,
            Intensity::Moderate,
            Experience::Intermediate,
            PrescriptionOptions::default(),
        );
        assert_eq!(rx.reps, "8-12");
    }
}
