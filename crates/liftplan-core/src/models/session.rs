//! Generated session output types.

use serde::{Deserialize, Serialize};

use super::exercise::{Category, Equipment, MovementFamily};
use super::input::{Focus, Goal};
use super::inventory::BandTier;

/// Pool an exercise was drawn from, in selection priority order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum PoolSource {
    Primary,
    Secondary,
    Accessory,
    Fallback,
}

impl PoolSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            PoolSource::Primary => "primary",
            PoolSource::Secondary => "secondary",
            PoolSource::Accessory => "accessory",
            PoolSource::Fallback => "fallback",
        }
    }
}

/// A concrete, equipment-specific load.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExerciseLoad {
    /// A pair of dumbbells
    Dumbbells { per_hand: f64, total: f64 },
    Kettlebell { weight: f64 },
    Band { tier: BandTier },
    /// Bar plus plates; `plates_per_side` lists one plate of each loaded pair
    Barbell {
        total: f64,
        bar_weight: f64,
        plates_per_side: Vec<f64>,
    },
    /// Approximate selection on a weight stack
    Machine { stack: f64 },
}

/// The resolved prescription for one exercise in one session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prescription {
    pub sets: u8,
    pub reps: String,
    pub rpe: u8,
    pub rest_seconds: u32,
}

/// An exercise in a finished session: catalog fields merged with the
/// resolved prescription.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionExercise {
    pub name: String,
    pub category: Category,
    pub primary_muscle: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub secondary_muscles: Vec<String>,
    pub movement_pattern: String,
    pub family: MovementFamily,
    /// Equipment of the alternative that was resolved against the inventory
    pub equipment: Vec<Equipment>,
    pub source: PoolSource,
    pub sets: u8,
    pub reps: String,
    pub rpe: u8,
    pub rest_seconds: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub load: Option<ExerciseLoad>,
    pub estimated_minutes: f64,
    pub setup_minutes: f64,
}

/// Soft conditions reported alongside a best-effort session.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SessionWarning {
    /// The primary-muscle set ratio could not be reached
    FocusConstraintsRelaxed,
    /// The inventory was empty and bodyweight was substituted
    EmptyEquipmentInventory,
    /// The picks could not fill the time budget to within the allowed
    /// shortfall
    TimeBudgetShortfall,
}

impl SessionWarning {
    pub fn code(&self) -> &'static str {
        match self {
            SessionWarning::FocusConstraintsRelaxed => "focus_constraints_relaxed",
            SessionWarning::EmptyEquipmentInventory => "empty_equipment_inventory",
            SessionWarning::TimeBudgetShortfall => "time_budget_shortfall",
        }
    }
}

/// Hard infeasibility reported on an (empty) session.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SessionError {
    /// No usable exercise exists for the focus's primary muscles
    FocusConstraintsUnmet,
}

impl SessionError {
    pub fn code(&self) -> &'static str {
        match self {
            SessionError::FocusConstraintsUnmet => "focus_constraints_unmet",
        }
    }
}

/// Breakdown of an impact score.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImpactBreakdown {
    /// Total normalized workload
    pub volume: f64,
    /// Average RPE
    pub intensity: f64,
    /// Volume per estimated minute
    pub density: f64,
}

/// Aggregate volume/intensity/density metric over a session or week.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImpactScore {
    pub score: f64,
    pub breakdown: ImpactBreakdown,
}

/// A finished session. Immutable once returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedSession {
    /// Focus areas the session was built for
    pub focus: Vec<Focus>,
    pub goal: Goal,
    pub target_minutes: u32,
    pub total_minutes: f64,
    pub total_sets: u32,
    pub exercises: Vec<SessionExercise>,
    /// Share of sets on the focus's primary muscles, when a constraint applied
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_set_ratio: Option<f64>,
    /// Whether a too-small primary pool forced repeated exercises
    #[serde(default)]
    pub repeats_allowed: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<SessionWarning>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<SessionError>,
    pub impact: ImpactScore,
    pub rationale: String,
}

impl GeneratedSession {
    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }

    pub fn has_warning(&self, warning: SessionWarning) -> bool {
        self.warnings.contains(&warning)
    }
}
