//! Catalog exercise records and the equipment vocabulary they reference.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Broad classification of a catalog exercise.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Strength,
    Cardio,
    Mobility,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Strength => "strength",
            Category::Cardio => "cardio",
            Category::Mobility => "mobility",
        }
    }
}

/// Coarse heuristic grouping of exercises used to diversify a session.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum MovementFamily {
    Press,
    Pull,
    Squat,
    Hinge,
    Lunge,
    Carry,
    Curl,
    Extension,
    Raise,
    Core,
    Cardio,
    Mobility,
    Other,
}

impl MovementFamily {
    /// Multi-joint families that count as compound work for strength
    /// exercises.
    pub fn is_compound(&self) -> bool {
        matches!(
            self,
            MovementFamily::Press
                | MovementFamily::Pull
                | MovementFamily::Squat
                | MovementFamily::Hinge
                | MovementFamily::Lunge
                | MovementFamily::Carry
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MovementFamily::Press => "press",
            MovementFamily::Pull => "pull",
            MovementFamily::Squat => "squat",
            MovementFamily::Hinge => "hinge",
            MovementFamily::Lunge => "lunge",
            MovementFamily::Carry => "carry",
            MovementFamily::Curl => "curl",
            MovementFamily::Extension => "extension",
            MovementFamily::Raise => "raise",
            MovementFamily::Core => "core",
            MovementFamily::Cardio => "cardio",
            MovementFamily::Mobility => "mobility",
            MovementFamily::Other => "other",
        }
    }
}

/// A concrete piece of equipment (or station) an exercise can be performed
/// with.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Equipment {
    Bodyweight,
    Dumbbell,
    Kettlebell,
    Band,
    Barbell,
    Bench,
    SquatRack,
    BenchPress,
    PullupBar,
    Cable,
    LegPress,
    LatPulldown,
    SmithMachine,
    LegExtension,
    LegCurl,
    ChestPress,
    Treadmill,
    Bike,
    Rower,
}

/// Coarse equipment grouping used for setup-time estimation and load
/// resolution.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentKind {
    Bodyweight,
    FreeWeight,
    Band,
    Barbell,
    Machine,
}

impl Equipment {
    pub fn kind(&self) -> EquipmentKind {
        match self {
            Equipment::Bodyweight | Equipment::Bench | Equipment::PullupBar => {
                EquipmentKind::Bodyweight
            }
            Equipment::Dumbbell | Equipment::Kettlebell => EquipmentKind::FreeWeight,
            Equipment::Band => EquipmentKind::Band,
            Equipment::Barbell
            | Equipment::SquatRack
            | Equipment::BenchPress
            | Equipment::SmithMachine => EquipmentKind::Barbell,
            Equipment::Cable
            | Equipment::LegPress
            | Equipment::LatPulldown
            | Equipment::LegExtension
            | Equipment::LegCurl
            | Equipment::ChestPress
            | Equipment::Treadmill
            | Equipment::Bike
            | Equipment::Rower => EquipmentKind::Machine,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Equipment::Bodyweight => "bodyweight",
            Equipment::Dumbbell => "dumbbell",
            Equipment::Kettlebell => "kettlebell",
            Equipment::Band => "band",
            Equipment::Barbell => "barbell",
            Equipment::Bench => "bench",
            Equipment::SquatRack => "squat_rack",
            Equipment::BenchPress => "bench_press",
            Equipment::PullupBar => "pullup_bar",
            Equipment::Cable => "cable",
            Equipment::LegPress => "leg_press",
            Equipment::LatPulldown => "lat_pulldown",
            Equipment::SmithMachine => "smith_machine",
            Equipment::LegExtension => "leg_extension",
            Equipment::LegCurl => "leg_curl",
            Equipment::ChestPress => "chest_press",
            Equipment::Treadmill => "treadmill",
            Equipment::Bike => "bike",
            Equipment::Rower => "rower",
        }
    }
}

/// One way of equipping an exercise. The option is usable when its item is
/// available and every nested requirement is itself usable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EquipmentOption {
    pub item: Equipment,

    /// Additional equipment that must be present alongside `item`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub requires: Vec<EquipmentOption>,
}

impl EquipmentOption {
    pub fn new(item: Equipment) -> Self {
        Self {
            item,
            requires: Vec::new(),
        }
    }

    pub fn requiring(mut self, item: Equipment) -> Self {
        self.requires.push(EquipmentOption::new(item));
        self
    }
}

/// Immutable catalog entry describing one exercise.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Exercise {
    pub name: String,

    pub category: Category,

    pub primary_muscle: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub secondary_muscles: Vec<String>,

    pub movement_pattern: String,

    /// Alternative ways to equip the exercise, in preference order
    pub equipment: Vec<EquipmentOption>,

    /// Baseline number of working sets
    pub sets: u8,

    /// Baseline reps, either a count/range ("8-12") or a duration ("30s")
    pub reps: String,

    /// Baseline rate of perceived exertion
    pub rpe: u8,

    /// Baseline rest between sets
    pub rest_seconds: u32,

    /// Abstract load target used for weight resolution
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub load_target: Option<f64>,

    /// Catalog-declared total duration for long-format exercises
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<f64>,

    #[serde(default)]
    pub high_impact: bool,
}

impl Exercise {
    /// Lower-cased, trimmed name used for history and de-duplication lookups.
    pub fn normalized_name(&self) -> String {
        normalize_name(&self.name)
    }

    /// Whether the baseline reps describe a duration rather than a count.
    pub fn has_duration_reps(&self) -> bool {
        parse_duration_seconds(&self.reps).is_some()
    }
}

/// Lower-case and trim an exercise name.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Parse a duration-style reps string ("30s", "45 sec", "2 min", "20 min")
/// into seconds. Returns `None` for rep counts and ranges.
pub fn parse_duration_seconds(reps: &str) -> Option<f64> {
    let text = reps.trim().to_lowercase();
    let split = text
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(text.len());
    let (number, unit) = text.split_at(split);
    let value = f64::from_str(number).ok()?;
    match unit.trim() {
        "s" | "sec" | "secs" | "second" | "seconds" => Some(value),
        "m" | "min" | "mins" | "minute" | "minutes" => Some(value * 60.0),
        _ => None,
    }
}

/// Average rep count of a count/range reps string ("8-12" → 10, "15" → 15).
pub fn average_reps(reps: &str) -> Option<f64> {
    let mut parts = reps.split('-').map(|p| p.trim().parse::<f64>());
    match (parts.next(), parts.next()) {
        (Some(Ok(low)), Some(Ok(high))) => Some((low + high) / 2.0),
        (Some(Ok(single)), None) => Some(single),
        _ => None,
    }
}
