//! Post-hoc impact metric over a finished session or week.

use std::fmt;

use crate::models::{
    average_reps, parse_duration_seconds, ExerciseLoad, ImpactBreakdown, ImpactScore,
    SessionExercise,
};

/// Load proxy for exercises without a resolved external load.
const BODYWEIGHT_PROXY: f64 = 40.0;
/// Seconds counted as one rep for timed exercises.
const SECONDS_PER_REP: f64 = 3.0;
/// Divisor turning raw workload into normalized volume.
const VOLUME_SCALE: f64 = 100.0;

/// Computes the workload of one prescribed exercise.
pub trait WorkloadModel: fmt::Debug + Send + Sync {
    fn workload(&self, exercise: &SessionExercise) -> f64;
}

/// Sets × average reps × load × RPE/10.
#[derive(Debug, Default, Clone, Copy)]
pub struct TonnageWorkload;

fn load_amount(load: Option<&ExerciseLoad>) -> f64 {
    match load {
        Some(ExerciseLoad::Dumbbells { total, .. }) => *total,
        Some(ExerciseLoad::Kettlebell { weight }) => *weight,
        Some(ExerciseLoad::Band { tier }) => tier.resistance(),
        Some(ExerciseLoad::Barbell { total, .. }) => *total,
        Some(ExerciseLoad::Machine { stack }) => *stack,
        None => BODYWEIGHT_PROXY,
    }
}

impl WorkloadModel for TonnageWorkload {
    fn workload(&self, exercise: &SessionExercise) -> f64 {
        let reps = average_reps(&exercise.reps)
            .or_else(|| parse_duration_seconds(&exercise.reps).map(|s| s / SECONDS_PER_REP))
            .unwrap_or(1.0);
        f64::from(exercise.sets)
            * reps
            * load_amount(exercise.load.as_ref())
            * f64::from(exercise.rpe)
            / 10.0
    }
}

fn round(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Aggregates workload, average RPE and density into one score.
pub fn score<'a>(
    exercises: impl IntoIterator<Item = &'a SessionExercise>,
    total_minutes: f64,
    model: &dyn WorkloadModel,
) -> ImpactScore {
    let mut workload = 0.0;
    let mut rpe_sum = 0.0;
    let mut count = 0u32;
    for exercise in exercises {
        workload += model.workload(exercise);
        rpe_sum += f64::from(exercise.rpe);
        count += 1;
    }
    if count == 0 {
        return ImpactScore::default();
    }

    let volume = workload / VOLUME_SCALE;
    let intensity = rpe_sum / f64::from(count);
    let density = if total_minutes > 0.0 {
        volume / total_minutes
    } else {
        0.0
    };
    let score = (1.0 + workload).ln() * 5.0 + intensity * 3.0 + density * 2.0;

    ImpactScore {
        score: round(score, 1),
        breakdown: ImpactBreakdown {
            volume: round(volume, 2),
            intensity: round(intensity, 2),
            density: round(density, 2),
        },
    }
}
