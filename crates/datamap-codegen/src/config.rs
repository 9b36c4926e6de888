//! Generator configuration

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Config file name, looked up in the project root
pub const CONFIG_FILE_NAME: &str = "tw-config.json";

/// Package the generated mappers import `Mapper` from
pub const DEFAULT_RUNTIME_PACKAGE: &str = "@tamnt-work/data-mapper";

/// Options for code generation
///
/// Stored as camelCase JSON. Keys missing from the file keep their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneratorConfig {
    /// Output directory, relative to the project root (default: `/app`)
    pub module_path: String,
    /// File suffix for model interfaces (default: `.model`)
    pub model_suffix: String,
    /// File suffix for mapper modules (default: `.mapper`)
    pub mapper_suffix: String,
    /// File suffix for entity interfaces (default: `.entity`)
    pub entity_suffix: String,
    /// Replace existing output files (default: false)
    pub overwrite: bool,
    /// Remove the whole output directory before generating (default: false)
    pub clean_module: bool,
    /// Import source for `Mapper` in generated mappers
    pub runtime_package: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            module_path: "/app".to_string(),
            model_suffix: ".model".to_string(),
            mapper_suffix: ".mapper".to_string(),
            entity_suffix: ".entity".to_string(),
            overwrite: false,
            clean_module: false,
            runtime_package: DEFAULT_RUNTIME_PACKAGE.to_string(),
        }
    }
}

impl GeneratorConfig {
    /// Create a configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the project config, falling back to defaults when there is none
    ///
    /// # Errors
    ///
    /// Returns an error when the file exists but cannot be read or parsed.
    pub fn load(root: &Path) -> Result<Self> {
        let path = root.join(CONFIG_FILE_NAME);
        if !path.exists() {
            debug!("No {} in {}, using defaults", CONFIG_FILE_NAME, root.display());
            return Ok(Self::default());
        }
        Self::load_file(&path)
    }

    /// Load a config file at an explicit path
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read or parsed.
    pub fn load_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config = serde_json::from_str(&content).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Write the default config into the project root
    ///
    /// # Errors
    ///
    /// Returns `ConfigExists` when a config file is already present, or an
    /// I/O error.
    pub fn init(root: &Path) -> Result<PathBuf> {
        let path = root.join(CONFIG_FILE_NAME);
        if path.exists() {
            return Err(Error::ConfigExists(path));
        }

        let content = serde_json::to_string_pretty(&Self::default()).map_err(|source| {
            Error::Config {
                path: path.clone(),
                source,
            }
        })?;
        fs::write(&path, content)?;
        info!("Created config file {}", path.display());
        Ok(path)
    }

    /// Output directory under `root`
    ///
    /// A leading `/` on `module_path` is ignored; the path is always joined
    /// under the project root.
    pub fn module_dir(&self, root: &Path) -> PathBuf {
        root.join(self.module_path.trim_start_matches(['/', '\\']))
    }

    /// Set the output directory
    #[must_use]
    pub fn module_path(mut self, module_path: impl Into<String>) -> Self {
        self.module_path = module_path.into();
        self
    }

    /// Set the model suffix
    #[must_use]
    pub fn model_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.model_suffix = suffix.into();
        self
    }

    /// Set the entity suffix
    #[must_use]
    pub fn entity_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.entity_suffix = suffix.into();
        self
    }

    /// Set the mapper suffix
    #[must_use]
    pub fn mapper_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.mapper_suffix = suffix.into();
        self
    }

    /// Allow replacing existing files
    #[must_use]
    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Remove the output directory before generating
    #[must_use]
    pub fn clean_module(mut self, clean_module: bool) -> Self {
        self.clean_module = clean_module;
        self
    }

    /// Set the runtime import for generated mappers
    #[must_use]
    pub fn runtime_package(mut self, package: impl Into<String>) -> Self {
        self.runtime_package = package.into();
        self
    }
}
