//! Builder for creating and configuring Engine instances.

use std::path::{Path, PathBuf};

use log::{debug, info};

use super::Engine;
use crate::catalog::Catalog;
use crate::config::EngineConfig;
use crate::error::Result;
use crate::impact::{TonnageWorkload, WorkloadModel};
use crate::tables::EngineTables;

const APP_PREFIX: &str = "liftplan";
const CATALOG_FILE: &str = "catalog.json";
const CONFIG_FILE: &str = "config.json";

/// Builder for creating and configuring Engine instances.
#[derive(Debug, Default)]
pub struct EngineBuilder {
    catalog: Option<Catalog>,
    catalog_path: Option<PathBuf>,
    config: Option<EngineConfig>,
    config_path: Option<PathBuf>,
    workload: Option<Box<dyn WorkloadModel>>,
}

impl EngineBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a catalog file to load.
    ///
    /// If not specified, uses `$XDG_DATA_HOME/liftplan/catalog.json` when it
    /// exists, and the bundled starter catalog otherwise.
    pub fn with_catalog_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.catalog_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Uses an already loaded catalog. Takes precedence over any path.
    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Sets a configuration file to load.
    ///
    /// If not specified, uses `$XDG_CONFIG_HOME/liftplan/config.json` when it
    /// exists, and the defaults otherwise.
    pub fn with_config_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.config_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Replaces the workload model behind the impact score.
    pub fn with_workload(mut self, model: impl WorkloadModel + 'static) -> Self {
        self.workload = Some(Box::new(model));
        self
    }

    /// Builds the configured engine.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::FileSystem` if a configured file cannot be read,
    /// `EngineError::Catalog` if the catalog is malformed and
    /// `EngineError::Configuration` if a tunable is out of range.
    pub fn build(self) -> Result<Engine> {
        let dirs = xdg::BaseDirectories::with_prefix(APP_PREFIX);

        let catalog = match (self.catalog, self.catalog_path) {
            (Some(catalog), _) => catalog,
            (None, Some(path)) => Catalog::from_path(&path)?,
            (None, None) => match dirs.find_data_file(CATALOG_FILE) {
                Some(path) => {
                    debug!("Using catalog from {}", path.display());
                    Catalog::from_path(&path)?
                }
                None => Catalog::builtin()?,
            },
        };

        let config = match (self.config, self.config_path) {
            (Some(config), _) => config,
            (None, Some(path)) => EngineConfig::from_path(&path)?,
            (None, None) => match dirs.find_config_file(CONFIG_FILE) {
                Some(path) => {
                    debug!("Using configuration from {}", path.display());
                    EngineConfig::from_path(&path)?
                }
                None => EngineConfig::default(),
            },
        };
        config.check()?;

        info!("Engine ready with {} catalog exercises", catalog.len());
        Ok(Engine {
            catalog,
            tables: EngineTables::standard(),
            config,
            workload: self
                .workload
                .unwrap_or_else(|| Box::new(TonnageWorkload)),
        })
    }
}
