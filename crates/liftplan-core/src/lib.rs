//! Core library for the Liftplan workout session synthesis engine.
//!
//! The engine turns a training request (goal or focus areas, experience,
//! intensity, equipment, time budget, schedule and preferences) into a
//! concrete session or a weekly plan: exercises selected from a catalog,
//! each with sets, reps, RPE, rest, a resolved load and a time estimate.
//!
//! # Pipeline
//!
//! - [`normalize`]: partial requests are merged over defaults and validated
//! - [`filter`]: the catalog is narrowed into primary, secondary, accessory
//!   and fallback pools
//! - [`scoring`]: pool candidates are ranked with a seeded tie-break
//! - [`session`]: the greedy builder fills a time budget under focus-ratio
//!   and movement-diversity constraints
//! - [`prescription`], [`load`], [`timing`]: per-exercise sets/reps/RPE/rest,
//!   loads and minutes
//! - [`merge`], [`weekly`]: multi-focus sessions and weekly templates
//! - [`impact`]: a post-hoc volume/intensity/density score
//!
//! Builds are deterministic: the same catalog, input, history and seed always
//! produce the same output.
//!
//! # Quick Start
//!
//! ```rust
//! use liftplan_core::{params::BuildWeek, EngineBuilder};
//! use serde_json::json;
//!
//! let engine = EngineBuilder::new().build()?;
//! let params = BuildWeek {
//!     input: json!({
//!         "intent": { "goal": "strength" },
//!         "schedule": { "days_available": ["monday", "wednesday", "friday"] }
//!     }),
//!     seed: Some(1),
//!     history: None,
//! };
//!
//! if let Some(plan) = engine.build_week(&params)?.built() {
//!     assert_eq!(plan.sessions.len(), 3);
//!     println!("{plan}");
//! }
//! # Ok::<(), liftplan_core::EngineError>(())
//! ```

pub mod catalog;
pub mod config;
pub mod display;
pub mod engine;
pub mod error;
pub mod filter;
pub mod impact;
pub mod load;
pub mod merge;
pub mod models;
pub mod normalize;
pub mod params;
pub mod prescription;
pub mod rationale;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod tables;
pub mod timing;
pub mod weekly;

// Re-export commonly used types
pub use catalog::Catalog;
pub use config::EngineConfig;
pub use display::{PoolListing, ValidationReport};
pub use engine::{BuildOutcome, Engine, EngineBuilder};
pub use error::{EngineError, Result};
pub use impact::{TonnageWorkload, WorkloadModel};
pub use models::{
    EquipmentInventory, Exercise, Focus, GeneratedPlan, GeneratedSession, Goal, PlanInput,
    SessionExercise, SessionHistory,
};
pub use params::{BuildMultiSession, BuildSession, BuildWeek, InspectPools, ValidateInput};
pub use tables::EngineTables;
