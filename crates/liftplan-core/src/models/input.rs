//! The normalized plan request and its enumerations.

use std::str::FromStr;

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use super::exercise::Category;
use super::inventory::EquipmentInventory;

/// Training goal of a session or plan.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    Strength,
    Hypertrophy,
    Endurance,
    Cardio,
    Mobility,
    WeightLoss,
    #[default]
    General,
}

/// How well an exercise category serves a goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryFit {
    /// The category is what the goal is built from
    Native,
    /// Usable filler for the goal
    Compatible,
    /// Never serves the goal
    Incompatible,
}

impl Goal {
    pub fn category_fit(&self, category: Category) -> CategoryFit {
        use Category::*;
        use CategoryFit::*;
        match (self, category) {
            (Goal::General, _) => Native,
            (Goal::Strength | Goal::Hypertrophy, Strength) => Native,
            (Goal::Strength | Goal::Hypertrophy, Mobility) => Compatible,
            (Goal::Strength | Goal::Hypertrophy, Cardio) => Incompatible,
            (Goal::Endurance | Goal::WeightLoss, Strength | Cardio) => Native,
            (Goal::Endurance | Goal::WeightLoss, Mobility) => Compatible,
            (Goal::Cardio, Cardio) => Native,
            (Goal::Cardio, Mobility) => Compatible,
            (Goal::Cardio, Strength) => Incompatible,
            (Goal::Mobility, Mobility) => Native,
            (Goal::Mobility, Strength | Cardio) => Compatible,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Goal::Strength => "strength",
            Goal::Hypertrophy => "hypertrophy",
            Goal::Endurance => "endurance",
            Goal::Cardio => "cardio",
            Goal::Mobility => "mobility",
            Goal::WeightLoss => "weight_loss",
            Goal::General => "general",
        }
    }
}

impl FromStr for Goal {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "strength" => Ok(Goal::Strength),
            "hypertrophy" => Ok(Goal::Hypertrophy),
            "endurance" => Ok(Goal::Endurance),
            "cardio" => Ok(Goal::Cardio),
            "mobility" => Ok(Goal::Mobility),
            "weight_loss" | "fat_loss" => Ok(Goal::WeightLoss),
            "general" | "general_fitness" => Ok(Goal::General),
            _ => Err(format!("Invalid goal: {s}")),
        }
    }
}

/// Training experience of the user.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Experience {
    Beginner,
    #[default]
    Intermediate,
    Advanced,
}

impl Experience {
    pub fn as_str(&self) -> &'static str {
        match self {
            Experience::Beginner => "beginner",
            Experience::Intermediate => "intermediate",
            Experience::Advanced => "advanced",
        }
    }
}

impl FromStr for Experience {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "beginner" => Ok(Experience::Beginner),
            "intermediate" => Ok(Experience::Intermediate),
            "advanced" => Ok(Experience::Advanced),
            _ => Err(format!("Invalid experience level: {s}")),
        }
    }
}

/// Intensity tier of a session.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Intensity {
    Low,
    #[default]
    Moderate,
    High,
}

impl Intensity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intensity::Low => "low",
            Intensity::Moderate => "moderate",
            Intensity::High => "high",
        }
    }
}

impl FromStr for Intensity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Intensity::Low),
            "moderate" | "medium" => Ok(Intensity::Moderate),
            "high" => Ok(Intensity::High),
            _ => Err(format!("Invalid intensity: {s}")),
        }
    }
}

/// A requested body-part or training-mode target.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Focus {
    Chest,
    Back,
    Shoulders,
    Arms,
    Legs,
    Glutes,
    Core,
    UpperBody,
    LowerBody,
    FullBody,
    Cardio,
    Mobility,
}

impl Focus {
    pub const ALL: [Focus; 12] = [
        Focus::Chest,
        Focus::Back,
        Focus::Shoulders,
        Focus::Arms,
        Focus::Legs,
        Focus::Glutes,
        Focus::Core,
        Focus::UpperBody,
        Focus::LowerBody,
        Focus::FullBody,
        Focus::Cardio,
        Focus::Mobility,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Focus::Chest => "chest",
            Focus::Back => "back",
            Focus::Shoulders => "shoulders",
            Focus::Arms => "arms",
            Focus::Legs => "legs",
            Focus::Glutes => "glutes",
            Focus::Core => "core",
            Focus::UpperBody => "upper_body",
            Focus::LowerBody => "lower_body",
            Focus::FullBody => "full_body",
            Focus::Cardio => "cardio",
            Focus::Mobility => "mobility",
        }
    }
}

impl FromStr for Focus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase().replace(['-', ' '], "_");
        Focus::ALL
            .into_iter()
            .find(|focus| focus.as_str() == key)
            .ok_or_else(|| format!("Invalid focus: {s}"))
    }
}

/// What the caller wants to train: an explicit goal, body-part focuses, or
/// both.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TrainingIntent {
    pub goal: Option<Goal>,
    pub focuses: Vec<Focus>,
}

/// Time available for training.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TimeSpec {
    pub minutes_per_session: u32,
    pub weekly_minutes: Option<u32>,
}

impl Default for TimeSpec {
    fn default() -> Self {
        Self {
            minutes_per_session: 45,
            weekly_minutes: None,
        }
    }
}

/// Day of the week, Monday first.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// Days since Monday.
    pub fn index(&self) -> u8 {
        *self as u8
    }

    pub fn from_index(index: u8) -> Weekday {
        Weekday::ALL[usize::from(index % 7)]
    }

    pub fn from_jiff(day: jiff::civil::Weekday) -> Weekday {
        Weekday::from_index(day.to_monday_zero_offset() as u8)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Weekday::Monday => "monday",
            Weekday::Tuesday => "tuesday",
            Weekday::Wednesday => "wednesday",
            Weekday::Thursday => "thursday",
            Weekday::Friday => "friday",
            Weekday::Saturday => "saturday",
            Weekday::Sunday => "sunday",
        }
    }
}

/// One slot of an explicit weekly layout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionLayout {
    pub focuses: Vec<Focus>,

    #[serde(default)]
    pub goal: Option<Goal>,
}

/// Weekly schedule constraints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Schedule {
    pub days_available: Vec<Weekday>,
    pub min_rest_days: u8,
    pub sessions_per_week: Option<u8>,
    pub layout: Option<Vec<SessionLayout>>,
    pub week_start: Option<Date>,
}

impl Default for Schedule {
    fn default() -> Self {
        Self {
            days_available: vec![Weekday::Monday, Weekday::Wednesday, Weekday::Friday],
            min_rest_days: 1,
            sessions_per_week: None,
            layout: None,
            week_start: None,
        }
    }
}

/// How much rest between sessions and sets the user prefers.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum RestPreference {
    #[default]
    Balanced,
    HighRecovery,
    MinimalRest,
}

impl RestPreference {
    /// Multiplier applied to prescribed rest seconds.
    pub fn rest_modifier(&self) -> f64 {
        match self {
            RestPreference::Balanced => 1.0,
            RestPreference::HighRecovery => 1.15,
            RestPreference::MinimalRest => 0.85,
        }
    }
}

/// Accessibility constraints honored by the catalog filter.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Accessibility {
    LowImpact,
    #[serde(other)]
    Other,
}

/// User preferences.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Preferences {
    /// Disliked activities, matched as case-insensitive substrings of names
    pub disliked: Vec<String>,
    pub accessibility: Vec<Accessibility>,
    pub rest_preference: RestPreference,
    /// When set, cardio exercises must match one of these activities
    pub cardio_activities: Option<Vec<String>>,
}

impl Preferences {
    pub fn low_impact(&self) -> bool {
        self.accessibility.contains(&Accessibility::LowImpact)
    }
}

/// The caller's complete, normalized request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlanInput {
    pub intent: TrainingIntent,
    pub experience: Experience,
    pub intensity: Intensity,
    pub equipment: EquipmentInventory,
    pub time: TimeSpec,
    pub schedule: Schedule,
    pub preferences: Preferences,
    pub seed: Option<u32>,
}

impl PlanInput {
    /// Goal in effect, defaulting to general fitness.
    pub fn goal(&self) -> Goal {
        self.intent.goal.unwrap_or_default()
    }
}
