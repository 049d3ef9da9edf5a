//! Data models for catalog entries, requests and generated sessions.
//!
//! This module contains the domain types consumed and produced by the
//! synthesis engine. Display implementations for these models live in
//! [`crate::display`] to keep data structures separate from presentation.
//!
//! - **Inputs**: [`Exercise`] catalog records, the normalized [`PlanInput`],
//!   the read-only [`EquipmentInventory`] and an optional [`SessionHistory`].
//! - **Outputs**: [`GeneratedSession`] for one session and [`GeneratedPlan`]
//!   for a weekly template. Both serialize to snake_case JSON.
//!
//! # Examples
//!
//! ```rust
//! use liftplan_core::models::{Focus, PlanInput};
//!
//! let input: PlanInput = serde_json::from_str(
//!     r#"{"intent":{"focuses":["chest"]},"time":{"minutes_per_session":30}}"#,
//! )
//! .unwrap();
//! assert_eq!(input.intent.focuses, vec![Focus::Chest]);
//! assert!(input.equipment.bodyweight);
//! ```

pub mod exercise;
pub mod history;
pub mod input;
pub mod inventory;
pub mod plan;
pub mod session;

#[cfg(test)]
mod tests;

pub use exercise::{
    average_reps, normalize_name, parse_duration_seconds, Category, Equipment, EquipmentKind,
    EquipmentOption, Exercise, MovementFamily,
};
pub use history::SessionHistory;
pub use input::{
    Accessibility, CategoryFit, Experience, Focus, Goal, Intensity, PlanInput, Preferences,
    RestPreference, Schedule, SessionLayout, TimeSpec, TrainingIntent, Weekday,
};
pub use inventory::{BandTier, BarbellInventory, EquipmentInventory, MachineInventory};
pub use plan::{GeneratedPlan, ScheduledSession};
pub use session::{
    ExerciseLoad, GeneratedSession, ImpactBreakdown, ImpactScore, PoolSource, Prescription,
    SessionError, SessionExercise, SessionWarning,
};
