//! Command handlers for the one-shot CLI.

use std::{fmt::Display, fs, path::Path};

use anyhow::{bail, Context, Result};
use liftplan_core::{
    normalize::deep_merge, params::*, BuildOutcome, Engine, SessionHistory, ValidationReport,
};
use log::debug;
use serde::Serialize;
use serde_json::{json, Value};

use crate::{
    args::{Commands, MultiArgs, PoolsArgs, RequestArgs, SessionArgs, ValidateArgs, WeekArgs},
    renderer::TerminalRenderer,
};

pub struct Cli {
    engine: Engine,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(engine: Engine, renderer: TerminalRenderer) -> Self {
        Self { engine, renderer }
    }

    pub fn handle_command(&self, command: Commands) -> Result<()> {
        match command {
            Commands::Session(args) => self.build_session(args),
            Commands::Multi(args) => self.build_multi_session(args),
            Commands::Week(args) => self.build_week(args),
            Commands::Validate(args) => self.validate(args),
            Commands::Pools(args) => self.show_pools(args),
            Commands::Serve => bail!("serve is handled by the MCP server"),
        }
    }

    fn build_session(&self, args: SessionArgs) -> Result<()> {
        let params = BuildSession {
            input: request_input(&args.request, args.request.overlay())?,
            focus: args.focus,
            seed: args.request.seed,
            history: read_history(args.request.history.as_deref())?,
        };
        let outcome = self
            .engine
            .build_session(&params)
            .context("Failed to build session")?;
        self.emit(outcome, args.request.json)
    }

    fn build_multi_session(&self, args: MultiArgs) -> Result<()> {
        let params = BuildMultiSession {
            input: request_input(&args.request, args.request.overlay())?,
            focuses: args.focus,
            seed: args.request.seed,
            history: read_history(args.request.history.as_deref())?,
        };
        let outcome = self
            .engine
            .build_multi_session(&params)
            .context("Failed to build session")?;
        self.emit(outcome, args.request.json)
    }

    fn build_week(&self, args: WeekArgs) -> Result<()> {
        let params = BuildWeek {
            input: request_input(&args.request, args.overlay())?,
            seed: args.request.seed,
            history: read_history(args.request.history.as_deref())?,
        };
        let outcome = self
            .engine
            .build_week(&params)
            .context("Failed to build weekly plan")?;
        self.emit(outcome, args.request.json)
    }

    fn validate(&self, args: ValidateArgs) -> Result<()> {
        let params = ValidateInput {
            input: request_input(&args.request, args.request.overlay())?,
            weekly: args.weekly,
        };
        let report = self
            .engine
            .validate(&params)
            .context("Failed to validate input")?;

        if args.request.json {
            self.renderer.print_json(&json!({
                "valid": report.is_valid(),
                "errors": report.0,
            }))?;
        } else {
            self.renderer.render(&report.to_string())?;
        }
        if !report.is_valid() {
            bail!("Input has {} problem(s)", report.len());
        }
        Ok(())
    }

    fn show_pools(&self, args: PoolsArgs) -> Result<()> {
        let params = InspectPools {
            input: request_input(&args.request, args.request.overlay())?,
            focus: args.focus,
        };
        let listing = self
            .engine
            .pools(&params)
            .context("Failed to inspect pools")?;
        if args.request.json {
            self.renderer.print_json(&listing)
        } else {
            self.renderer.render(&listing.to_string())
        }
    }

    fn emit<T: Serialize + Display>(&self, outcome: BuildOutcome<T>, as_json: bool) -> Result<()> {
        match outcome {
            BuildOutcome::Built(value) if as_json => self.renderer.print_json(&value),
            BuildOutcome::Built(value) => self.renderer.render(&value.to_string()),
            BuildOutcome::Invalid(problems) => {
                let report = ValidationReport(problems);
                self.renderer.render(&report.to_string())?;
                bail!("Input has {} problem(s)", report.len())
            }
        }
    }
}

/// Request JSON: the `--input` file (or an empty object) with `overlay`
/// merged over it.
fn request_input(args: &RequestArgs, overlay: Value) -> Result<Value> {
    let mut input = match &args.input {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read input file {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("Failed to parse input file {}", path.display()))?
        }
        None => json!({}),
    };
    deep_merge(&mut input, &overlay);
    debug!("Request: {input}");
    Ok(input)
}

fn read_history(path: Option<&Path>) -> Result<Option<SessionHistory>> {
    let Some(path) = path else {
        return Ok(None);
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read history file {}", path.display()))?;
    let history = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse history file {}", path.display()))?;
    Ok(Some(history))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;
    use crate::args::GoalArg;

    #[test]
    fn test_flags_override_input_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"intent": {{"goal": "cardio", "focuses": ["legs"]}}, "time": {{"minutes_per_session": 30}}}}"#
        )
        .unwrap();

        let args = RequestArgs {
            input: Some(file.path().to_path_buf()),
            goal: Some(GoalArg::Strength),
            ..Default::default()
        };
        let input = request_input(&args, args.overlay()).unwrap();
        assert_eq!(input["intent"]["goal"], json!("strength"));
        assert_eq!(input["intent"]["focuses"], json!(["legs"]));
        assert_eq!(input["time"]["minutes_per_session"], json!(30));
    }

    #[test]
    fn test_missing_history_file_is_an_error() {
        assert!(read_history(None).unwrap().is_none());
        assert!(read_history(Some(Path::new("/nonexistent/history.json"))).is_err());
    }
}
