//! Multi-focus sessions: one build per focus, interleaved into a single
//! list.

use std::collections::BTreeSet;

use log::{debug, info, warn};

use crate::models::{
    Focus, GeneratedSession, Goal, PlanInput, SessionError, SessionHistory, SessionWarning,
};
use crate::rng::derive_seed;
use crate::session::{
    self, decrease, exercise_count, shortfall, BuildEnv, PlannedExercise, PlannedSession,
    SessionSpec, VolumeLimits,
};

/// A session request spanning one or more focuses.
#[derive(Debug, Clone)]
pub struct MergeSpec<'a> {
    pub focuses: &'a [Focus],
    pub goal: Goal,
    pub target_minutes: u32,
    pub input: &'a PlanInput,
    pub history: &'a SessionHistory,
    pub seed: u32,
}

/// Maximum exercises of a merged session.
pub fn merged_cap(minutes: u32, goal: Goal, focus_count: usize) -> usize {
    let (_, max) = exercise_count(minutes, goal);
    max + focus_count.saturating_sub(1)
}

/// Minutes given to each focus build: a generous share of the full duration
/// rather than an even split.
pub fn focus_budget(minutes: u32, share: f64) -> u32 {
    ((f64::from(minutes) * share).round() as u32).max(1)
}

fn spec_for<'a>(spec: &MergeSpec<'a>, focus: Focus, minutes: u32, excluded: Vec<String>) -> SessionSpec<'a> {
    SessionSpec {
        focus,
        goal: spec.goal,
        target_minutes: minutes,
        input: spec.input,
        history: spec.history,
        seed: derive_seed(spec.seed, focus.as_str()),
        excluded_accessories: excluded,
    }
}

/// Plans the session for every focus and merges the results. A single focus
/// is planned directly with the full duration.
pub fn plan_merged<'c>(env: &BuildEnv<'c>, spec: &MergeSpec<'_>) -> PlannedSession<'c> {
    let focuses: Vec<Focus> = spec
        .focuses
        .iter()
        .copied()
        .fold(Vec::new(), |mut unique, focus| {
            if !unique.contains(&focus) {
                unique.push(focus);
            }
            unique
        });

    if let [focus] = focuses.as_slice() {
        return session::plan_session(env, &spec_for(spec, *focus, spec.target_minutes, Vec::new()));
    }

    let budget = focus_budget(spec.target_minutes, env.config.multi_focus_budget_share);
    let parts: Vec<PlannedSession<'c>> = focuses
        .iter()
        .map(|&focus| {
            let excluded = focuses
                .iter()
                .filter(|&&sibling| sibling != focus)
                .flat_map(|&sibling| env.tables.focus_muscles(sibling).iter().cloned())
                .collect();
            debug!("Planning {} with {budget} of {} min", focus.as_str(), spec.target_minutes);
            session::plan_session(env, &spec_for(spec, focus, budget, excluded))
        })
        .collect();

    merge(env, spec, focuses, parts)
}

/// Round-robin interleaves the per-focus picks, skipping names already
/// taken, up to the merged cap; then trims sets against the full duration.
fn merge<'c>(
    env: &BuildEnv<'c>,
    spec: &MergeSpec<'_>,
    focuses: Vec<Focus>,
    parts: Vec<PlannedSession<'c>>,
) -> PlannedSession<'c> {
    let cap = merged_cap(spec.target_minutes, spec.goal, focuses.len());
    let longest = parts.iter().map(|p| p.picks.len()).max().unwrap_or(0);

    let mut seen = BTreeSet::new();
    let mut picks: Vec<PlannedExercise<'c>> = Vec::new();
    'rounds: for round in 0..longest {
        for part in &parts {
            if picks.len() >= cap {
                break 'rounds;
            }
            let Some(pick) = part.picks.get(round) else {
                continue;
            };
            if seen.insert(pick.exercise.normalized_name()) {
                picks.push(pick.clone());
            }
        }
    }

    let limits = VolumeLimits {
        target_minutes: f64::from(spec.target_minutes),
        slack_minutes: env.config.decrease_slack_minutes,
        increase_threshold_minutes: env.config.increase_threshold_minutes,
        max_iterations: env.config.max_repair_iterations,
    };
    decrease(&mut picks, &limits);

    let mut warnings = Vec::new();
    let mut constraints = Vec::new();
    for part in &parts {
        // per-focus budgets differ from the merged one
        for warning in &part.warnings {
            if *warning != SessionWarning::TimeBudgetShortfall && !warnings.contains(warning) {
                warnings.push(*warning);
            }
        }
        for constraint in &part.constraints {
            if !constraints.contains(constraint) {
                constraints.push(constraint.clone());
            }
        }
    }
    if !picks.is_empty() {
        if let Some(missing) = shortfall(
            &picks,
            limits.target_minutes,
            env.config.shortfall_tolerance_minutes,
        ) {
            warn!("Merged session is {missing:.1} min short of {} min", spec.target_minutes);
            warnings.push(SessionWarning::TimeBudgetShortfall);
        }
    }
    let error = picks.is_empty().then_some(SessionError::FocusConstraintsUnmet);
    info!(
        "Merged {} focuses into {} exercises (cap {cap})",
        focuses.len(),
        picks.len()
    );

    PlannedSession {
        focuses,
        goal: spec.goal,
        target_minutes: spec.target_minutes,
        repeats_allowed: parts.iter().any(|p| p.repeats_allowed),
        picks,
        constraints,
        warnings,
        error,
    }
}

/// Builds one session spanning every requested focus.
pub fn build_merged(env: &BuildEnv<'_>, spec: &MergeSpec<'_>) -> GeneratedSession {
    let planned = plan_merged(env, spec);
    session::finalize(planned, env, spec.input.intensity)
}
