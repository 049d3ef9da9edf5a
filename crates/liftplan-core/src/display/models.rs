//! Display implementations for domain models.
//!
//! Kept apart from the model definitions. Sessions and plans render as
//! markdown for the terminal renderer and the MCP server.

use std::fmt;

use crate::models::{
    Category, Equipment, Experience, ExerciseLoad, Focus, GeneratedPlan, GeneratedSession, Goal,
    Intensity, MovementFamily, PoolSource, ScheduledSession, SessionError, SessionExercise,
    SessionWarning, Weekday,
};

macro_rules! display_as_str {
    ($($ty:ty),* $(,)?) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write!(f, "{}", self.as_str())
                }
            }
        )*
    };
}

display_as_str!(
    Category,
    Equipment,
    Experience,
    Focus,
    Goal,
    Intensity,
    MovementFamily,
    PoolSource,
    Weekday,
);

impl fmt::Display for SessionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl fmt::Display for ExerciseLoad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExerciseLoad::Dumbbells { per_hand, .. } => write!(f, "2 × {per_hand} kg dumbbells"),
            ExerciseLoad::Kettlebell { weight } => write!(f, "{weight} kg kettlebell"),
            ExerciseLoad::Band { tier } => write!(f, "{} band", tier.as_str().replace('_', " ")),
            ExerciseLoad::Barbell {
                total,
                bar_weight,
                plates_per_side,
            } => {
                write!(f, "{total} kg barbell ({bar_weight} kg bar")?;
                if plates_per_side.is_empty() {
                    write!(f, ", no plates)")
                } else {
                    let plates: Vec<String> =
                        plates_per_side.iter().map(ToString::to_string).collect();
                    write!(f, " + {} per side)", plates.join(" + "))
                }
            }
            ExerciseLoad::Machine { stack } => write!(f, "approximately {stack} on the stack"),
        }
    }
}

fn focus_title(focuses: &[Focus]) -> String {
    let names: Vec<String> = focuses
        .iter()
        .map(|f| f.as_str().replace('_', " "))
        .collect();
    let joined = names.join(" + ");
    let mut chars = joined.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => "General".to_string(),
    }
}

impl SessionExercise {
    fn fmt_line(&self, index: usize, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let equipment: Vec<&str> = self.equipment.iter().map(Equipment::as_str).collect();
        writeln!(
            f,
            "{index}. **{}** ({}, {}): {} × {} @ RPE {}, rest {}s, ~{} min",
            self.name,
            self.primary_muscle.replace('_', " "),
            equipment.join(" + "),
            self.sets,
            self.reps,
            self.rpe,
            self.rest_seconds,
            self.estimated_minutes
        )?;
        if let Some(load) = &self.load {
            writeln!(f, "   - Load: {load}")?;
        }
        Ok(())
    }
}

impl fmt::Display for SessionExercise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_line(1, f)
    }
}

impl GeneratedSession {
    /// Metadata bullets, notices and the numbered exercise list.
    fn fmt_body(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "- Goal: {}", self.goal.as_str().replace('_', " "))?;
        writeln!(
            f,
            "- Duration: {} of {} min",
            self.total_minutes, self.target_minutes
        )?;
        writeln!(f, "- Sets: {}", self.total_sets)?;
        if let Some(ratio) = self.primary_set_ratio {
            writeln!(f, "- Primary-muscle share: {:.0}%", ratio * 100.0)?;
        }
        let impact = &self.impact;
        writeln!(
            f,
            "- Impact: {} (volume {}, intensity {}, density {})",
            impact.score, impact.breakdown.volume, impact.breakdown.intensity, impact.breakdown.density
        )?;

        if let Some(error) = self.error {
            writeln!(f)?;
            writeln!(f, "> Error: {error}")?;
        }
        for warning in &self.warnings {
            writeln!(f)?;
            writeln!(f, "> Warning: {warning}")?;
        }

        if self.exercises.is_empty() {
            writeln!(f, "\nNo exercises in this session.")?;
        } else {
            writeln!(f)?;
            for (index, exercise) in self.exercises.iter().enumerate() {
                exercise.fmt_line(index + 1, f)?;
            }
        }

        if !self.rationale.is_empty() {
            writeln!(f)?;
            writeln!(f, "{}", self.rationale)?;
        }
        Ok(())
    }
}

impl fmt::Display for GeneratedSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {} session", focus_title(&self.focus))?;
        writeln!(f)?;
        self.fmt_body(f)
    }
}

impl fmt::Display for ScheduledSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let day = self.day.as_str();
        let mut chars = day.chars();
        let day: String = match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        };
        match self.date {
            Some(date) => writeln!(
                f,
                "## {day} {date}: {}",
                focus_title(&self.session.focus)
            )?,
            None => writeln!(f, "## {day}: {}", focus_title(&self.session.focus))?,
        }
        writeln!(f)?;
        self.session.fmt_body(f)
    }
}

impl fmt::Display for GeneratedPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Weekly plan")?;
        writeln!(f)?;
        writeln!(f, "- Sessions: {}", self.sessions.len())?;
        writeln!(f, "- Total: {:.0} min", self.total_minutes())?;
        writeln!(f, "- Impact: {}", self.impact.score)?;
        writeln!(f)?;
        writeln!(f, "{}", self.rationale)?;

        for session in &self.sessions {
            writeln!(f)?;
            write!(f, "{session}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BandTier, ImpactScore};

    fn session() -> GeneratedSession {
        GeneratedSession {
            focus: vec![Focus::UpperBody],
            goal: Goal::WeightLoss,
            target_minutes: 30,
            total_minutes: 28.5,
            total_sets: 6,
            exercises: vec![SessionExercise {
                name: "Goblet Squat".to_string(),
                category: Category::Strength,
                primary_muscle: "quads".to_string(),
                secondary_muscles: vec![],
                movement_pattern: "squat".to_string(),
                family: MovementFamily::Squat,
                equipment: vec![Equipment::Kettlebell],
                source: PoolSource::Primary,
                sets: 3,
                reps: "10-15".to_string(),
                rpe: 7,
                rest_seconds: 60,
                load: Some(ExerciseLoad::Kettlebell { weight: 16.0 }),
                estimated_minutes: 6.5,
                setup_minutes: 0.5,
            }],
            primary_set_ratio: Some(0.8),
            repeats_allowed: false,
            warnings: vec![SessionWarning::FocusConstraintsRelaxed],
            error: None,
            impact: ImpactScore::default(),
            rationale: "Because.".to_string(),
        }
    }

    #[test]
    fn test_session_markdown() {
        let output = session().to_string();
        assert!(output.starts_with("# Upper body session"));
        assert!(output.contains("- Goal: weight loss"));
        assert!(output.contains("- Primary-muscle share: 80%"));
        assert!(output.contains("> Warning: focus_constraints_relaxed"));
        assert!(output.contains("1. **Goblet Squat** (quads, kettlebell): 3 × 10-15 @ RPE 7"));
        assert!(output.contains("   - Load: 16 kg kettlebell"));
    }

    #[test]
    fn test_load_display() {
        let barbell = ExerciseLoad::Barbell {
            total: 60.0,
            bar_weight: 20.0,
            plates_per_side: vec![15.0, 5.0],
        };
        assert_eq!(barbell.to_string(), "60 kg barbell (20 kg bar + 15 + 5 per side)");
        let band = ExerciseLoad::Band {
            tier: BandTier::ExtraHeavy,
        };
        assert_eq!(band.to_string(), "extra heavy band");
    }
}
