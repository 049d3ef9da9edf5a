//! The session builder: greedy selection under a time budget with
//! muscle-ratio and movement-diversity constraints.
//!
//! A build runs these stages over a growing list of [`PlannedExercise`]s:
//!
//! 1. **Seed** with the best admissible exercise of the primary pool (the
//!    secondary pool when the primary one is empty).
//! 2. **Fill** to the minimum count from the secondary, accessory and, when
//!    no focus constraint applies, fallback pools. If the caps leave the
//!    session short, a relaxed pass ignores caps and adjacency.
//! 3. **Balance volume**: remove sets while over budget, add sets while
//!    clearly under.
//! 4. **Enforce the focus ratio** when a constraint applies.
//! 5. **Top up** from the accessory, secondary and fallback pools while
//!    capacity and time allow, then balance again. Sets may then grow past
//!    the duration band when the session is still short, before the ratio
//!    is enforced once more. A remaining shortfall is reported as a warning.
//! 6. **Reorder** for variety.
//!
//! Every build owns its picks, RNG and score lists; nothing is shared across
//! calls.

mod admission;
mod bounds;
mod planned;
mod ratio;
mod reorder;
mod volume;

#[cfg(test)]
mod tests;

use std::borrow::Cow;
use std::collections::BTreeSet;

use log::{debug, info, warn};

pub use admission::{can_add, AdmissionState, Rejection};
pub use bounds::{base_exercise_count, exercise_count, SessionBounds};
pub use planned::{PlannedExercise, PlanningContext};
pub use ratio::{primary_ratio, RatioOutcome};
pub use volume::VolumeLimits;

pub(crate) use planned::{round1, total_minutes, total_sets};
pub(crate) use volume::{decrease, shortfall};

use crate::config::EngineConfig;
use crate::filter::{build_pools, FilterContext};
use crate::impact::{self, WorkloadModel};
use crate::models::{
    EquipmentInventory, Exercise, Focus, GeneratedSession, Goal, Intensity, PlanInput,
    PoolSource, SessionError, SessionHistory, SessionWarning,
};
use crate::prescription::PrescriptionOptions;
use crate::rationale;
use crate::rng::Mulberry32;
use crate::scoring::{rank, Scored, ScoringContext};
use crate::tables::{EngineTables, FocusConstraint};

/// Read-only collaborators shared by every build call.
#[derive(Debug, Clone, Copy)]
pub struct BuildEnv<'e> {
    pub catalog: &'e [Exercise],
    pub tables: &'e EngineTables,
    pub config: &'e EngineConfig,
    pub workload: &'e dyn WorkloadModel,
}

/// One single-focus build request.
#[derive(Debug, Clone)]
pub struct SessionSpec<'a> {
    pub focus: Focus,
    pub goal: Goal,
    pub target_minutes: u32,
    pub input: &'a PlanInput,
    pub history: &'a SessionHistory,
    pub seed: u32,
    /// Accessory muscles owned by sibling focuses of a merged request
    pub excluded_accessories: Vec<String>,
}

/// A built session before conversion into its output form.
#[derive(Debug, Clone)]
pub struct PlannedSession<'c> {
    pub focuses: Vec<Focus>,
    pub goal: Goal,
    pub target_minutes: u32,
    pub picks: Vec<PlannedExercise<'c>>,
    pub constraints: Vec<FocusConstraint>,
    pub repeats_allowed: bool,
    pub warnings: Vec<SessionWarning>,
    pub error: Option<SessionError>,
}

impl PlannedSession<'_> {
    fn empty(spec: &SessionSpec<'_>, warnings: Vec<SessionWarning>) -> Self {
        Self {
            focuses: vec![spec.focus],
            goal: spec.goal,
            target_minutes: spec.target_minutes,
            picks: Vec::new(),
            constraints: Vec::new(),
            repeats_allowed: false,
            warnings,
            error: Some(SessionError::FocusConstraintsUnmet),
        }
    }
}

/// Mutable state of one build call.
struct SessionBuilder<'c, 'b> {
    config: &'b EngineConfig,
    bounds: SessionBounds,
    constraint: Option<FocusConstraint>,
    target_minutes: f64,
    repeats_allowed: bool,
    picks: Vec<PlannedExercise<'c>>,
}

impl<'c> SessionBuilder<'c, '_> {
    fn limits(&self) -> VolumeLimits {
        VolumeLimits {
            target_minutes: self.target_minutes,
            slack_minutes: self.config.decrease_slack_minutes,
            increase_threshold_minutes: self.config.increase_threshold_minutes,
            max_iterations: self.config.max_repair_iterations,
        }
    }

    fn occurrences(&self, candidate: &PlannedExercise<'_>) -> usize {
        let key = candidate.exercise.normalized_name();
        self.picks
            .iter()
            .filter(|p| p.exercise.normalized_name() == key)
            .count()
    }

    /// Admits candidates in order until `until` picks exist. Returns how many
    /// were admitted.
    fn fill(&mut self, candidates: &[PlannedExercise<'c>], until: usize, relaxed: bool) -> usize {
        let mut admitted = 0;
        for candidate in candidates {
            if self.picks.len() >= until.min(self.bounds.max_exercises) {
                break;
            }
            // a repeat is allowed once at most
            if self.occurrences(candidate) >= 2 {
                continue;
            }
            let open = admission::open_families(candidates, &self.picks, self.bounds.family_cap);
            let state = AdmissionState {
                picks: &self.picks,
                bounds: &self.bounds,
                constraint: self.constraint.as_ref(),
                repeats_allowed: self.repeats_allowed,
                target_minutes: self.target_minutes,
                tolerance_minutes: self.config.overshoot_tolerance_minutes,
                open_families: &open,
                relaxed,
            };
            match can_add(candidate, &state) {
                Ok(()) => {
                    debug!(
                        "Admitted {} from {} pool ({:.1} min)",
                        candidate.name(),
                        candidate.source.as_str(),
                        candidate.minutes()
                    );
                    self.picks.push(candidate.clone());
                    admitted += 1;
                }
                Err(rejection) => admission::log_rejection(candidate.name(), rejection),
            }
        }
        admitted
    }

    fn balance_volume(&mut self) {
        let limits = self.limits();
        decrease(&mut self.picks, &limits);
        volume::increase(&mut self.picks, &limits);
    }

    /// Grows sets past the duration band once no more exercises fit.
    fn extend_volume(&mut self) {
        let limits = self.limits();
        volume::extend(&mut self.picks, &limits);
    }

    fn enforce_ratio(&mut self) -> Option<RatioOutcome> {
        let constraint = self.constraint.clone()?;
        Some(ratio::enforce(
            &mut self.picks,
            std::slice::from_ref(&constraint),
            self.config.focus_ratio_threshold,
            self.config.max_repair_iterations,
        ))
    }
}

/// Runs the selection stages for one focus and returns the planned session.
pub fn plan_session<'c>(env: &BuildEnv<'c>, spec: &SessionSpec<'_>) -> PlannedSession<'c> {
    let input = spec.input;
    let mut warnings = Vec::new();

    let inventory: Cow<'_, EquipmentInventory> = if input.equipment.has_any() {
        Cow::Borrowed(&input.equipment)
    } else {
        warn!("Equipment inventory is empty; bodyweight fallback engaged");
        warnings.push(SessionWarning::EmptyEquipmentInventory);
        Cow::Owned(EquipmentInventory::bodyweight_only())
    };

    let constraint = env.tables.constraint(spec.focus).map(|c| {
        c.without_accessories(spec.excluded_accessories.iter().map(String::as_str))
    });
    let bounds = SessionBounds::for_session(spec.target_minutes, spec.goal, constraint.is_some());

    let filter_ctx = FilterContext {
        inventory: &inventory,
        preferences: &input.preferences,
    };
    let pools = build_pools(
        env.catalog,
        spec.focus,
        spec.goal,
        env.tables,
        &filter_ctx,
        constraint.as_ref(),
    );

    if pools.secondary.is_empty() {
        warn!(
            "Focus constraints unmet: no usable exercise for {}",
            spec.focus.as_str()
        );
        return PlannedSession::empty(spec, warnings);
    }

    let scoring = ScoringContext::new(
        env.tables,
        &inventory,
        spec.history,
        spec.goal,
        input.intensity,
        input.experience,
        env.config.tie_break_jitter,
    );
    let planning = PlanningContext {
        tables: env.tables,
        inventory: &inventory,
        goal: spec.goal,
        intensity: input.intensity,
        experience: input.experience,
        options: PrescriptionOptions {
            rest_modifier: input.preferences.rest_preference.rest_modifier(),
        },
        bounds,
    };

    let primary_names: BTreeSet<String> = pools
        .primary
        .iter()
        .map(|e| e.normalized_name())
        .collect();
    let secondary_source = |e: &Exercise| {
        if primary_names.contains(&e.normalized_name()) {
            PoolSource::Primary
        } else {
            PoolSource::Secondary
        }
    };

    let mut rng = Mulberry32::new(spec.seed);
    let plan_all = |ranked: Vec<Scored<'c>>| -> Vec<PlannedExercise<'c>> {
        ranked
            .into_iter()
            .filter_map(|s| PlannedExercise::new(s.exercise, s.source, &planning))
            .collect()
    };

    let seed_candidates = if pools.primary.is_empty() {
        plan_all(rank(&pools.secondary, |_| PoolSource::Secondary, &scoring, &mut rng))
    } else {
        plan_all(rank(&pools.primary, |_| PoolSource::Primary, &scoring, &mut rng))
    };
    let secondary = plan_all(rank(&pools.secondary, secondary_source, &scoring, &mut rng));
    let accessory = plan_all(rank(&pools.accessory, |_| PoolSource::Accessory, &scoring, &mut rng));
    let fallback = if constraint.is_none() {
        plan_all(rank(&pools.fallback, |_| PoolSource::Fallback, &scoring, &mut rng))
    } else {
        Vec::new()
    };

    let mut builder = SessionBuilder {
        config: env.config,
        bounds,
        repeats_allowed: constraint.is_some() && pools.primary.len() < bounds.min_exercises,
        constraint,
        target_minutes: f64::from(spec.target_minutes),
        picks: Vec::new(),
    };

    builder.fill(&seed_candidates, 1, false);
    let min = bounds.min_exercises;
    for pool in [&secondary, &accessory, &fallback] {
        builder.fill(pool, min, false);
    }
    if builder.picks.len() < min {
        debug!(
            "Only {} of {min} exercises admitted; relaxing caps",
            builder.picks.len()
        );
        for pool in [&secondary, &accessory, &fallback] {
            builder.fill(pool, min, true);
        }
    }

    builder.balance_volume();
    builder.enforce_ratio();

    let max = bounds.max_exercises;
    for pool in [&accessory, &secondary, &fallback] {
        builder.fill(pool, max, false);
    }
    builder.balance_volume();
    builder.extend_volume();
    let outcome = builder.enforce_ratio();

    if let Some(RatioOutcome { ratio, met: false }) = outcome {
        warn!(
            "Focus constraints relaxed for {}: primary share {:.2}",
            spec.focus.as_str(),
            ratio
        );
        warnings.push(SessionWarning::FocusConstraintsRelaxed);
    }
    if let Some(missing) = shortfall(
        &builder.picks,
        builder.target_minutes,
        env.config.shortfall_tolerance_minutes,
    ) {
        warn!(
            "{} session is {missing:.1} min short of {} min",
            spec.focus.as_str(),
            spec.target_minutes
        );
        warnings.push(SessionWarning::TimeBudgetShortfall);
    }

    let picks = reorder::reorder(builder.picks);
    info!(
        "Built {} session: {} exercises, {:.1} of {} min",
        spec.focus.as_str(),
        picks.len(),
        total_minutes(&picks),
        spec.target_minutes
    );

    PlannedSession {
        focuses: vec![spec.focus],
        goal: spec.goal,
        target_minutes: spec.target_minutes,
        picks,
        constraints: builder.constraint.into_iter().collect(),
        repeats_allowed: builder.repeats_allowed,
        warnings,
        error: None,
    }
}

/// Converts a planned session into its immutable output form.
pub fn finalize(
    planned: PlannedSession<'_>,
    env: &BuildEnv<'_>,
    intensity: Intensity,
) -> GeneratedSession {
    let total = round1(total_minutes(&planned.picks));
    let total_sets = total_sets(&planned.picks);
    let primary_set_ratio = if planned.constraints.is_empty() || planned.picks.is_empty() {
        None
    } else {
        Some(primary_ratio(&planned.picks, &planned.constraints))
    };
    let exercises: Vec<_> = planned
        .picks
        .into_iter()
        .map(PlannedExercise::into_session_exercise)
        .collect();
    let impact = impact::score(&exercises, total, env.workload);

    let mut session = GeneratedSession {
        focus: planned.focuses,
        goal: planned.goal,
        target_minutes: planned.target_minutes,
        total_minutes: total,
        total_sets,
        exercises,
        primary_set_ratio,
        repeats_allowed: planned.repeats_allowed,
        warnings: planned.warnings,
        error: planned.error,
        impact,
        rationale: String::new(),
    };
    session.rationale = rationale::for_session(&session, intensity);
    session
}

/// Builds one single-focus session.
pub fn build_session(env: &BuildEnv<'_>, spec: &SessionSpec<'_>) -> GeneratedSession {
    let planned = plan_session(env, spec);
    finalize(planned, env, spec.input.intensity)
}
