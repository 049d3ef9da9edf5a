//! Variety scoring of candidate exercises.

use std::collections::BTreeSet;

use rand::Rng;

use crate::models::{
    CategoryFit, EquipmentInventory, EquipmentKind, Exercise, Experience, Goal, Intensity,
    MovementFamily, PoolSource, SessionHistory,
};
use crate::tables::EngineTables;

/// Everything the scorer reads besides the candidate itself.
#[derive(Debug, Clone)]
pub struct ScoringContext<'a> {
    pub tables: &'a EngineTables,
    pub inventory: &'a EquipmentInventory,
    pub history: &'a SessionHistory,
    pub goal: Goal,
    pub intensity: Intensity,
    pub experience: Experience,
    pub jitter: f64,
    recent_families: BTreeSet<MovementFamily>,
}

impl<'a> ScoringContext<'a> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        tables: &'a EngineTables,
        inventory: &'a EquipmentInventory,
        history: &'a SessionHistory,
        goal: Goal,
        intensity: Intensity,
        experience: Experience,
        jitter: f64,
    ) -> Self {
        let recent_families = history
            .recent_names
            .iter()
            .map(|name| tables.family_of_name(name))
            .filter(|family| *family != MovementFamily::Other)
            .collect();
        Self {
            tables,
            inventory,
            history,
            goal,
            intensity,
            experience,
            jitter,
            recent_families,
        }
    }
}

/// A candidate with its score and the pool it was drawn from.
#[derive(Debug, Clone, Copy)]
pub struct Scored<'c> {
    pub exercise: &'c Exercise,
    pub source: PoolSource,
    pub score: f64,
}

/// Deterministic part of the score: history, goal, intensity, experience and
/// pool-source terms.
pub fn base_score(exercise: &Exercise, source: PoolSource, ctx: &ScoringContext<'_>) -> f64 {
    let mut score = 0.0;

    score += if ctx.history.contains_name(&exercise.name) {
        -3.0
    } else {
        2.0
    };

    if ctx.history.contains_pattern(&exercise.movement_pattern)
        || ctx.history.contains_muscle(&exercise.primary_muscle)
    {
        score -= 1.0;
    }

    let family = ctx.tables.family(exercise);
    score += if ctx.recent_families.contains(&family) {
        -1.0
    } else {
        0.5
    };

    if ctx.goal.category_fit(exercise.category) == CategoryFit::Native {
        score += 1.0;
    }

    let compound = ctx.tables.is_compound(exercise);
    score += match (ctx.intensity, compound) {
        (Intensity::High, true) => 2.0,
        (Intensity::Low, true) => -0.5,
        _ => 0.0,
    };

    let barbell = ctx
        .inventory
        .first_satisfied(&exercise.equipment)
        .is_some_and(|option| option.item.kind() == EquipmentKind::Barbell);
    score += match (ctx.experience, barbell) {
        (Experience::Advanced, true) => 0.5,
        (Experience::Beginner, true) => -0.5,
        _ => 0.0,
    };

    if source == PoolSource::Primary {
        score += 1.0;
    }

    score
}

/// Additive desirability score with a seeded tie-break.
pub fn score<R: Rng>(
    exercise: &Exercise,
    source: PoolSource,
    ctx: &ScoringContext<'_>,
    rng: &mut R,
) -> f64 {
    base_score(exercise, source, ctx) + rng.gen::<f64>() * ctx.jitter
}

/// Scores every candidate and sorts by descending score, then by name.
pub fn rank<'c, R, F>(
    pool: &[&'c Exercise],
    source_of: F,
    ctx: &ScoringContext<'_>,
    rng: &mut R,
) -> Vec<Scored<'c>>
where
    R: Rng,
    F: Fn(&Exercise) -> PoolSource,
{
    let mut scored: Vec<Scored<'c>> = pool
        .iter()
        .map(|&exercise| {
            let source = source_of(exercise);
            Scored {
                exercise,
                source,
                score: score(exercise, source, ctx, rng),
            }
        })
        .collect();
    scored.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| a.exercise.name.cmp(&b.exercise.name))
    });
    scored
}
