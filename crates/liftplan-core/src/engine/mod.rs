//! High-level engine API: the three build entry points plus validation and
//! pool inspection.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Request params │    │   Normalize +   │    │ Session builder │
//! │ (partial JSON)  │───▶│    validate     │───▶│ merger / weekly │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! Expected validation failures never surface as errors: every build call
//! returns [`BuildOutcome::Invalid`] with the violation messages instead.
//! `Err` is reserved for malformed requests (wrong JSON shapes, unknown
//! focus names).
//!
//! # Usage
//!
//! ```rust
//! use liftplan_core::{params::BuildSession, BuildOutcome, EngineBuilder};
//! use serde_json::json;
//!
//! let engine = EngineBuilder::new().build()?;
//! let params = BuildSession {
//!     input: json!({
//!         "intent": { "goal": "hypertrophy" },
//!         "equipment": { "dumbbells": [5.0, 10.0, 15.0], "bench": true },
//!         "time": { "minutes_per_session": 45 }
//!     }),
//!     focus: Some("chest".to_string()),
//!     seed: Some(42),
//!     history: None,
//! };
//!
//! match engine.build_session(&params)? {
//!     BuildOutcome::Built(session) => println!("{session}"),
//!     BuildOutcome::Invalid(problems) => eprintln!("{problems:?}"),
//! }
//! # Ok::<(), liftplan_core::EngineError>(())
//! ```

use std::borrow::Cow;

use log::warn;

pub mod builder;

use crate::catalog::Catalog;
use crate::config::EngineConfig;
use crate::display::{PoolListing, ValidationReport};
use crate::error::Result;
use crate::filter::{build_pools, FilterContext};
use crate::impact::WorkloadModel;
use crate::merge::{self, MergeSpec};
use crate::models::{
    EquipmentInventory, Focus, GeneratedPlan, GeneratedSession, Goal, PlanInput, SessionHistory,
};
use crate::normalize::{self, blocking, violations, week_violations};
use crate::params::{BuildMultiSession, BuildSession, BuildWeek, InspectPools, ValidateInput};
use crate::rng::{derive_seed, seed_from_key};
use crate::session::{self, BuildEnv, SessionSpec};
use crate::tables::EngineTables;
use crate::weekly;

pub use builder::EngineBuilder;

/// Result of a build call that passed request parsing.
#[derive(Debug, Clone, PartialEq)]
pub enum BuildOutcome<T> {
    Built(T),
    /// The request failed validation; holds the human-readable violations
    Invalid(Vec<String>),
}

impl<T> BuildOutcome<T> {
    pub fn is_built(&self) -> bool {
        matches!(self, BuildOutcome::Built(_))
    }

    pub fn built(self) -> Option<T> {
        match self {
            BuildOutcome::Built(value) => Some(value),
            BuildOutcome::Invalid(_) => None,
        }
    }
}

/// The session synthesis engine. Read-only once built; every call owns its
/// working state, so one engine can serve concurrent requests.
#[derive(Debug)]
pub struct Engine {
    catalog: Catalog,
    tables: EngineTables,
    config: EngineConfig,
    workload: Box<dyn WorkloadModel>,
}

/// Focus used when a request names a goal but no focus.
fn default_focus(goal: Goal) -> Focus {
    match goal {
        Goal::Cardio => Focus::Cardio,
        Goal::Mobility => Focus::Mobility,
        _ => Focus::FullBody,
    }
}

fn resolve_seed(requested: Option<u32>, input: &PlanInput) -> u32 {
    requested
        .or(input.seed)
        .unwrap_or_else(|| seed_from_key(input.goal().as_str(), input.time.minutes_per_session))
}

impl Engine {
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn tables(&self) -> &EngineTables {
        &self.tables
    }

    fn env(&self) -> BuildEnv<'_> {
        BuildEnv {
            catalog: self.catalog.exercises(),
            tables: &self.tables,
            config: &self.config,
            workload: self.workload.as_ref(),
        }
    }

    fn reject<T>(problems: Vec<String>) -> Result<BuildOutcome<T>> {
        warn!("Request failed validation: {}", problems.join("; "));
        Ok(BuildOutcome::Invalid(problems))
    }

    /// Builds one session for a single focus.
    ///
    /// The focus comes from the parameters, else the input's first focus,
    /// else the goal (cardio and mobility goals map onto their own focus,
    /// everything else onto full body).
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InvalidInput` or `EngineError::Serialization`
    /// for malformed requests.
    pub fn build_session(&self, params: &BuildSession) -> Result<BuildOutcome<GeneratedSession>> {
        let mut input = normalize::normalize(&params.input)?;
        if let Some(focus) = params.focus()? {
            input.intent.focuses = vec![focus];
        }
        let problems = blocking(&violations(&input));
        if !problems.is_empty() {
            return Self::reject(problems);
        }

        let goal = input.goal();
        let focus = input
            .intent
            .focuses
            .first()
            .copied()
            .unwrap_or_else(|| default_focus(goal));
        let history = params.history.clone().unwrap_or_default();
        let seed = resolve_seed(params.seed, &input);

        let spec = SessionSpec {
            focus,
            goal,
            target_minutes: input.time.minutes_per_session,
            input: &input,
            history: &history,
            seed: derive_seed(seed, focus.as_str()),
            excluded_accessories: Vec::new(),
        };
        Ok(BuildOutcome::Built(session::build_session(&self.env(), &spec)))
    }

    /// Builds one session spanning several focuses.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InvalidInput` or `EngineError::Serialization`
    /// for malformed requests.
    pub fn build_multi_session(
        &self,
        params: &BuildMultiSession,
    ) -> Result<BuildOutcome<GeneratedSession>> {
        let mut input = normalize::normalize(&params.input)?;
        let requested = params.focuses()?;
        if !requested.is_empty() {
            input.intent.focuses = requested;
        }
        let problems = blocking(&violations(&input));
        if !problems.is_empty() {
            return Self::reject(problems);
        }

        let goal = input.goal();
        let focuses = if input.intent.focuses.is_empty() {
            vec![default_focus(goal)]
        } else {
            input.intent.focuses.clone()
        };
        let history = params.history.clone().unwrap_or_default();
        let spec = MergeSpec {
            focuses: &focuses,
            goal,
            target_minutes: input.time.minutes_per_session,
            input: &input,
            history: &history,
            seed: resolve_seed(params.seed, &input),
        };
        Ok(BuildOutcome::Built(merge::build_merged(&self.env(), &spec)))
    }

    /// Builds a weekly plan from the input's schedule.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InvalidInput` or `EngineError::Serialization`
    /// for malformed requests and `EngineError::Date` if a session date falls
    /// outside the supported calendar range.
    pub fn build_week(&self, params: &BuildWeek) -> Result<BuildOutcome<GeneratedPlan>> {
        let input = normalize::normalize(&params.input)?;
        let problems = blocking(&week_violations(&input));
        if !problems.is_empty() {
            return Self::reject(problems);
        }
        let history = params.history.clone().unwrap_or_default();
        let seed = resolve_seed(params.seed, &input);
        let plan = weekly::build_week(&self.env(), &input, &history, seed)?;
        Ok(BuildOutcome::Built(plan))
    }

    /// Lists every violation of a request, recoverable ones included.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InvalidInput` or `EngineError::Serialization`
    /// for malformed requests.
    pub fn validate(&self, params: &ValidateInput) -> Result<ValidationReport> {
        let input = normalize::normalize(&params.input)?;
        let found = if params.weekly {
            week_violations(&input)
        } else {
            violations(&input)
        };
        Ok(ValidationReport(
            found.iter().map(ToString::to_string).collect(),
        ))
    }

    /// Shows the selection pools a build for the focus would draw from.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InvalidInput` or `EngineError::Serialization`
    /// for malformed requests.
    pub fn pools(&self, params: &InspectPools) -> Result<PoolListing> {
        let input = normalize::normalize(&params.input)?;
        let focus = params.focus()?;
        let goal = input.goal();
        let inventory = if input.equipment.has_any() {
            Cow::Borrowed(&input.equipment)
        } else {
            Cow::Owned(EquipmentInventory::bodyweight_only())
        };
        let ctx = FilterContext {
            inventory: &inventory,
            preferences: &input.preferences,
        };
        let constraint = self.tables.constraint(focus);
        let pools = build_pools(
            self.catalog.exercises(),
            focus,
            goal,
            &self.tables,
            &ctx,
            constraint.as_ref(),
        );
        Ok(PoolListing::new(focus, goal, &pools))
    }

    /// Builds a session directly from a normalized input, skipping
    /// validation.
    pub fn build_session_for(
        &self,
        input: &PlanInput,
        focus: Focus,
        history: &SessionHistory,
        seed: u32,
    ) -> GeneratedSession {
        let spec = SessionSpec {
            focus,
            goal: input.goal(),
            target_minutes: input.time.minutes_per_session,
            input,
            history,
            seed: derive_seed(seed, focus.as_str()),
            excluded_accessories: Vec::new(),
        };
        session::build_session(&self.env(), &spec)
    }
}
