//! Command-line argument definitions using clap's derive API.
//!
//! Flags describe a request in CLI terms; [`RequestArgs::overlay`] turns them
//! into a partial JSON request that is merged over the `--input` file, so the
//! core parameter types stay free of clap attributes:
//!
//! ```text
//! --input file ─┐
//!               ├─ deep merge ─→ core params ─→ Engine
//! flags ────────┘
//! ```

use std::{fmt, path::PathBuf};

use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use serde_json::{json, Map, Value};

/// Generate workout sessions and weekly plans from an exercise catalog
///
/// Liftplan selects exercises that fit the requested goal or focus areas, the
/// available equipment and the time budget, and prescribes sets, reps, RPE,
/// rest and loads for each. It runs as a one-shot CLI or as an MCP (Model
/// Context Protocol) server for AI assistants.
#[derive(Parser)]
#[command(version, about, name = "liftplan")]
pub struct Args {
    /// Path to an exercise catalog JSON file. Defaults to
    /// $XDG_DATA_HOME/liftplan/catalog.json, else the bundled catalog
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    /// Path to an engine configuration JSON file. Defaults to
    /// $XDG_CONFIG_HOME/liftplan/config.json
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build a single-focus session
    #[command(alias = "s")]
    Session(SessionArgs),
    /// Build one session spanning several focus areas
    #[command(alias = "m")]
    Multi(MultiArgs),
    /// Build a weekly plan
    #[command(alias = "w")]
    Week(WeekArgs),
    /// Check a request and list every problem found
    #[command(alias = "v")]
    Validate(ValidateArgs),
    /// Show the exercise pools a focus would draw from
    Pools(PoolsArgs),
    /// Start the MCP server
    Serve,
}

/// Request flags shared by every building command.
#[derive(ClapArgs, Debug, Default)]
pub struct RequestArgs {
    /// JSON file with a (partial) request; flags override its fields
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    #[arg(short, long, help = "Training goal")]
    pub goal: Option<GoalArg>,

    #[arg(short, long, help = "Training experience")]
    pub experience: Option<ExperienceArg>,

    #[arg(long, help = "Session intensity")]
    pub intensity: Option<IntensityArg>,

    #[arg(short, long, help = "Minutes per session (20-120)")]
    pub minutes: Option<u32>,

    #[arg(
        long,
        value_delimiter = ',',
        help = "Available equipment as a comma-separated list (bodyweight, dumbbells, kettlebells, bands, barbell, bench, pullup_bar, cable, ...)"
    )]
    pub equipment: Option<Vec<String>>,

    #[arg(long, help = "Seed for reproducible builds")]
    pub seed: Option<u32>,

    /// JSON file with recently performed exercises, most recent first
    #[arg(long)]
    pub history: Option<PathBuf>,

    #[arg(long, help = "Print JSON instead of markdown")]
    pub json: bool,
}

impl RequestArgs {
    /// Partial request built from the flags that were given.
    pub fn overlay(&self) -> Value {
        let mut request = Map::new();
        if let Some(goal) = self.goal {
            request.insert("intent".into(), json!({ "goal": goal.to_string() }));
        }
        if let Some(experience) = self.experience {
            request.insert("experience".into(), json!(experience.to_string()));
        }
        if let Some(intensity) = self.intensity {
            request.insert("intensity".into(), json!(intensity.to_string()));
        }
        if let Some(minutes) = self.minutes {
            request.insert("time".into(), json!({ "minutes_per_session": minutes }));
        }
        if let Some(items) = &self.equipment {
            request.insert("equipment".into(), equipment_overlay(items));
        }
        Value::Object(request)
    }
}

/// Inventory from a list of item names; unnamed items are switched off.
fn equipment_overlay(items: &[String]) -> Value {
    let has = |name: &str| items.iter().any(|i| i.trim().eq_ignore_ascii_case(name));
    let machine = |name: &str| has(name) || has("machines");
    json!({
        "bodyweight": has("bodyweight"),
        "dumbbells": if has("dumbbells") { json!([5.0, 7.5, 10.0, 12.5, 15.0, 20.0, 25.0]) } else { json!([]) },
        "kettlebells": if has("kettlebells") { json!([8.0, 12.0, 16.0, 20.0, 24.0]) } else { json!([]) },
        "bands": if has("bands") { json!(["light", "medium", "heavy"]) } else { json!([]) },
        "barbell": {
            "available": has("barbell"),
            "plates": if has("barbell") { json!([20.0, 10.0, 5.0, 2.5, 1.25]) } else { json!([]) },
            "squat_rack": has("barbell") || has("squat_rack"),
            "bench_press": has("barbell") && has("bench"),
        },
        "machines": {
            "cable": machine("cable"),
            "leg_press": machine("leg_press"),
            "lat_pulldown": machine("lat_pulldown"),
            "smith_machine": machine("smith_machine"),
            "leg_extension": machine("leg_extension"),
            "leg_curl": machine("leg_curl"),
            "chest_press": machine("chest_press"),
            "treadmill": machine("treadmill"),
            "bike": machine("bike"),
            "rower": machine("rower"),
        },
        "bench": has("bench"),
        "pullup_bar": has("pullup_bar"),
    })
}

/// Build a single-focus session
#[derive(ClapArgs)]
pub struct SessionArgs {
    #[arg(short, long, help = "Focus area (chest, back, legs, full_body, ...)")]
    pub focus: Option<String>,

    #[command(flatten)]
    pub request: RequestArgs,
}

/// Build one session spanning several focus areas
#[derive(ClapArgs)]
pub struct MultiArgs {
    #[arg(
        short,
        long,
        value_delimiter = ',',
        required = true,
        help = "Focus areas as a comma-separated list"
    )]
    pub focus: Vec<String>,

    #[command(flatten)]
    pub request: RequestArgs,
}

/// Build a weekly plan
#[derive(ClapArgs)]
pub struct WeekArgs {
    #[arg(
        short,
        long,
        value_delimiter = ',',
        help = "Available training days as a comma-separated list"
    )]
    pub days: Option<Vec<String>>,

    #[arg(long, help = "Minimum rest days between sessions (0-2)")]
    pub rest_days: Option<u8>,

    #[arg(long, help = "First day of the week to schedule (YYYY-MM-DD)")]
    pub week_start: Option<String>,

    #[command(flatten)]
    pub request: RequestArgs,
}

impl WeekArgs {
    /// Partial request with the schedule flags merged over the shared ones.
    pub fn overlay(&self) -> Value {
        let mut request = self.request.overlay();
        let mut schedule = Map::new();
        if let Some(days) = &self.days {
            let days: Vec<String> = days.iter().map(|d| d.trim().to_lowercase()).collect();
            schedule.insert("days_available".into(), json!(days));
        }
        if let Some(rest) = self.rest_days {
            schedule.insert("min_rest_days".into(), json!(rest));
        }
        if let Some(start) = &self.week_start {
            schedule.insert("week_start".into(), json!(start));
        }
        if let (Value::Object(map), false) = (&mut request, schedule.is_empty()) {
            map.insert("schedule".into(), Value::Object(schedule));
        }
        request
    }
}

/// Check a request and list every problem found
#[derive(ClapArgs)]
pub struct ValidateArgs {
    #[arg(long, help = "Also check the weekly schedule")]
    pub weekly: bool,

    #[command(flatten)]
    pub request: RequestArgs,
}

/// Show the exercise pools a focus would draw from
#[derive(ClapArgs)]
pub struct PoolsArgs {
    #[arg(short, long, help = "Focus area to inspect")]
    pub focus: String,

    #[command(flatten)]
    pub request: RequestArgs,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum GoalArg {
    Strength,
    Hypertrophy,
    Endurance,
    Cardio,
    Mobility,
    WeightLoss,
    General,
}

impl fmt::Display for GoalArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GoalArg::Strength => "strength",
            GoalArg::Hypertrophy => "hypertrophy",
            GoalArg::Endurance => "endurance",
            GoalArg::Cardio => "cardio",
            GoalArg::Mobility => "mobility",
            GoalArg::WeightLoss => "weight_loss",
            GoalArg::General => "general",
        };
        f.write_str(name)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExperienceArg {
    Beginner,
    Intermediate,
    Advanced,
}

impl fmt::Display for ExperienceArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExperienceArg::Beginner => write!(f, "beginner"),
            ExperienceArg::Intermediate => write!(f, "intermediate"),
            ExperienceArg::Advanced => write!(f, "advanced"),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum IntensityArg {
    Low,
    Moderate,
    High,
}

impl fmt::Display for IntensityArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntensityArg::Low => write!(f, "low"),
            IntensityArg::Moderate => write!(f, "moderate"),
            IntensityArg::High => write!(f, "high"),
        }
    }
}
