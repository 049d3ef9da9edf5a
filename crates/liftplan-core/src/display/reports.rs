//! Wrapper types for validation results and pool inspection.

use std::fmt;

use serde::Serialize;

use crate::filter::Pools;
use crate::models::{Exercise, Focus, Goal};

/// Newtype wrapper for displaying validation violations.
///
/// # Examples
///
/// ```rust
/// use liftplan_core::display::ValidationReport;
///
/// let report = ValidationReport(vec!["No equipment is available".to_string()]);
/// assert!(!report.is_valid());
/// assert!(report.to_string().contains("- No equipment is available"));
/// assert!(ValidationReport(vec![]).to_string().contains("valid"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ValidationReport(pub Vec<String>);

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }
}

impl IntoIterator for ValidationReport {
    type Item = String;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "Input is valid.");
        }
        writeln!(f, "# Validation failed")?;
        writeln!(f)?;
        for problem in &self.0 {
            writeln!(f, "- {problem}")?;
        }
        Ok(())
    }
}

/// Owned snapshot of the four selection pools of a focus, by exercise name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PoolListing {
    pub focus: Focus,
    pub goal: Goal,
    pub primary: Vec<String>,
    pub secondary: Vec<String>,
    pub accessory: Vec<String>,
    pub fallback: Vec<String>,
}

fn names(pool: &[&Exercise]) -> Vec<String> {
    pool.iter().map(|e| e.name.clone()).collect()
}

impl PoolListing {
    pub fn new(focus: Focus, goal: Goal, pools: &Pools<'_>) -> Self {
        Self {
            focus,
            goal,
            primary: names(&pools.primary),
            secondary: names(&pools.secondary),
            accessory: names(&pools.accessory),
            fallback: names(&pools.fallback),
        }
    }
}

impl fmt::Display for PoolListing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Pools for {} ({} goal)", self.focus, self.goal)?;
        for (title, pool) in [
            ("Primary", &self.primary),
            ("Secondary", &self.secondary),
            ("Accessory", &self.accessory),
            ("Fallback", &self.fallback),
        ] {
            writeln!(f)?;
            writeln!(f, "## {title} ({})", pool.len())?;
            writeln!(f)?;
            if pool.is_empty() {
                writeln!(f, "No exercises.")?;
            }
            for name in pool {
                writeln!(f, "- {name}")?;
            }
        }
        Ok(())
    }
}
