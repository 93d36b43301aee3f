//! Planner configuration.
//!
//! Loaded from a TOML file; every field falls back to its default when
//! omitted.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use craftplan_common::{ParseVersionError, SchemaVersion};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

/// Configuration file name.
pub const CONFIG_FILE: &str = "craftplan.toml";

/// Log filter used when neither the config nor `RUST_LOG` set one.
pub const DEFAULT_LOG_FILTER: &str = "craftplan=info";

/// Errors reading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the file.
    #[error("Failed to read config file: {0}")]
    Io(#[from] io::Error),

    /// Failed to parse TOML.
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// The version string is malformed.
    #[error(transparent)]
    InvalidVersion(#[from] ParseVersionError),

    /// Written for a config format this build cannot read.
    #[error("Incompatible config version {found} (supported: {supported})")]
    IncompatibleVersion {
        /// Version declared by the file
        found: SchemaVersion,
        /// Version this build reads
        supported: SchemaVersion,
    },
}

/// Planner configuration parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Config format version
    pub version: String,
    /// Simulation tick rate used to convert craft times
    pub ticks_per_second: u32,
    /// Recipe file or directory (None = built-in catalog)
    pub recipe_path: Option<PathBuf>,
    /// Tracing filter directive, overridden by `RUST_LOG`
    pub log_filter: String,
    /// Emit logs as JSON lines
    pub log_json: bool,
    /// Leave raw resources out of resolved chains
    pub skip_raw_resources: bool,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            version: SchemaVersion::PLANNER_CONFIG.to_string(),
            ticks_per_second: 60,
            recipe_path: None,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            log_json: false,
            skip_raw_resources: false,
        }
    }
}

impl PlannerConfig {
    /// Reads a config file without logging.
    ///
    /// `Ok(None)` when the file does not exist.
    pub fn try_load_from<P: AsRef<Path>>(path: P) -> Result<Option<Self>, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;

        let found: SchemaVersion = config.version.parse()?;
        if !SchemaVersion::PLANNER_CONFIG.can_read(&found) {
            return Err(ConfigError::IncompatibleVersion {
                found,
                supported: SchemaVersion::PLANNER_CONFIG,
            });
        }

        Ok(Some(config))
    }

    /// Load configuration from a specific path.
    /// Returns default config if file doesn't exist or is invalid.
    #[cfg(test)]
    pub fn load_from<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        Self::from_loaded(Self::try_load_from(path), path)
    }

    /// Logs the outcome of [`try_load_from`](Self::try_load_from) and
    /// settles on a validated config.
    pub fn from_loaded(loaded: Result<Option<Self>, ConfigError>, path: &Path) -> Self {
        let mut config = match loaded {
            Ok(Some(config)) => {
                info!("Loaded config from {}", path.display());
                config
            },
            Ok(None) => {
                info!("Config file not found, using defaults");
                Self::default()
            },
            Err(e) => {
                warn!("{e}, using defaults");
                Self::default()
            },
        };
        config.validate();
        config
    }

    /// Save configuration to a specific path.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(path, contents)?;

        info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Clamp values to sensible ranges.
    pub fn validate(&mut self) {
        self.ticks_per_second = self.ticks_per_second.clamp(1, 1000);

        if self.log_filter.trim().is_empty() {
            self.log_filter = DEFAULT_LOG_FILTER.to_string();
        }
    }
}
