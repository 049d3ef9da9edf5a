//! Exercise catalog snapshot.
//!
//! The engine only ever reads the catalog. A starter catalog is bundled into
//! the crate and used when no catalog file is configured.

use std::path::Path;

use log::debug;

use crate::error::{EngineError, Result};
use crate::models::{normalize_name, Exercise};

const BUILTIN_CATALOG: &str = include_str!("../data/catalog.json");

/// An immutable, validated list of catalog exercises.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    exercises: Vec<Exercise>,
}

impl Catalog {
    /// Wraps exercise records after checking their shape.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Catalog` for duplicate or blank names, records
    /// without equipment options or with zero baseline sets.
    pub fn new(exercises: Vec<Exercise>) -> Result<Self> {
        let mut seen = std::collections::BTreeSet::new();
        for exercise in &exercises {
            let key = normalize_name(&exercise.name);
            if key.is_empty() {
                return Err(EngineError::catalog("exercise with a blank name"));
            }
            if !seen.insert(key) {
                return Err(EngineError::catalog(format!(
                    "duplicate exercise '{}'",
                    exercise.name
                )));
            }
            if exercise.equipment.is_empty() {
                return Err(EngineError::catalog(format!(
                    "exercise '{}' lists no equipment options",
                    exercise.name
                )));
            }
            if exercise.sets == 0 {
                return Err(EngineError::catalog(format!(
                    "exercise '{}' has zero baseline sets",
                    exercise.name
                )));
            }
        }
        Ok(Self { exercises })
    }

    /// The catalog bundled with the crate.
    ///
    /// # Errors
    ///
    /// Only fails if the bundled data is malformed.
    pub fn builtin() -> Result<Self> {
        Self::from_json_str(BUILTIN_CATALOG)
    }

    /// Parses a JSON array of exercise records.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let exercises: Vec<Exercise> = serde_json::from_str(json)
            .map_err(|e| EngineError::catalog(format!("malformed catalog: {e}")))?;
        Self::new(exercises)
    }

    /// Reads a JSON catalog file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| EngineError::FileSystem {
            path: path.to_path_buf(),
            source: e,
        })?;
        let catalog = Self::from_json_str(&text)?;
        debug!(
            "Loaded {} exercises from {}",
            catalog.len(),
            path.display()
        );
        Ok(catalog)
    }

    pub fn exercises(&self) -> &[Exercise] {
        &self.exercises
    }

    pub fn len(&self) -> usize {
        self.exercises.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }

    /// Looks an exercise up by case-insensitive name.
    pub fn find(&self, name: &str) -> Option<&Exercise> {
        let wanted = normalize_name(name);
        self.exercises
            .iter()
            .find(|exercise| exercise.normalized_name() == wanted)
    }
}
