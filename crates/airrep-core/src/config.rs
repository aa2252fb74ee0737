//! Pipeline configuration.
//!
//! Resolution order, last wins:
//! 1. built-in defaults (`data/`, `processed/`, persistence on)
//! 2. `airrep.toml` (or an explicit config file)
//! 3. `AIRREP_DATA_DIR` / `AIRREP_OUTPUT_DIR` environment variables
//! 4. command-line flags, applied by the caller

use std::path::{Path, PathBuf};

use airrep_model::ReportKind;
use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, Result};

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "airrep.toml";

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV_VAR: &str = "AIRREP_DATA_DIR";

/// Environment variable overriding the output directory.
pub const OUTPUT_DIR_ENV_VAR: &str = "AIRREP_OUTPUT_DIR";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// Directory report files are resolved against.
    pub data_dir: PathBuf,
    /// Directory receiving `<stem>_processed.csv` copies.
    pub output_dir: PathBuf,
    /// Master switch for processed copies; kinds still opt in individually.
    pub persist_processed: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            output_dir: PathBuf::from("processed"),
            persist_processed: true,
        }
    }
}

impl PipelineConfig {
    /// Parses TOML text; missing keys keep their defaults.
    pub fn from_toml_str(text: &str, origin: &Path) -> Result<Self> {
        toml::from_str(text).map_err(|source| PipelineError::Config {
            path: origin.to_path_buf(),
            source: Box::new(source),
        })
    }

    /// Reads a config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| PipelineError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text, path)
    }

    /// Loads `explicit` if given, else `airrep.toml` in the working directory
    /// when present, else the defaults. Environment overrides are applied.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        let config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_path = Path::new(CONFIG_FILE_NAME);
                if default_path.is_file() {
                    Self::from_file(default_path)?
                } else {
                    Self::default()
                }
            }
        };
        Ok(config.with_env_overrides(|key| std::env::var(key).ok()))
    }

    /// Applies directory overrides from an environment lookup.
    #[must_use]
    pub fn with_env_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(dir) = lookup(DATA_DIR_ENV_VAR).filter(|dir| !dir.is_empty()) {
            self.data_dir = PathBuf::from(dir);
        }
        if let Some(dir) = lookup(OUTPUT_DIR_ENV_VAR).filter(|dir| !dir.is_empty()) {
            self.output_dir = PathBuf::from(dir);
        }
        self
    }

    /// Path of the file to load: `file` relative to the data directory, or
    /// the kind's default file name when none is given. Absolute paths are
    /// used as-is.
    pub fn resolve_input(&self, kind: ReportKind, file: Option<&Path>) -> PathBuf {
        match file {
            Some(file) if file.is_absolute() => file.to_path_buf(),
            Some(file) => self.data_dir.join(file),
            None => self.data_dir.join(kind.default_file_name()),
        }
    }
}
