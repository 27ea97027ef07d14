//! Machine configuration.
//!
//! Configuration is read from JSON. Every field has a default, so an empty
//! object `{}` is a complete configuration. Loading always validates, and
//! validation reports all violations at once rather than the first one.
//!
//! # Example
//!
//! ```rust
//! use operator_fsm::config::{MachineConfig, ReportFormat};
//!
//! let config = MachineConfig::from_json_str(r#"{ "delay_ms": 250, "report_format": "json" }"#)
//!     .unwrap();
//!
//! assert_eq!(config.delay_ms, 250);
//! assert_eq!(config.report_format, ReportFormat::Json);
//! assert_eq!(config.poll_interval_ms, 10);
//! ```

pub mod error;
pub mod validation;

pub use error::{ConfigError, ConfigViolation};
pub use validation::{MAX_DELAY_MS, MAX_POLL_INTERVAL_MS, MIN_POLL_INTERVAL_MS};

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// How reports are rendered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Console layout
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

/// Settings for one machine run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MachineConfig {
    /// Delay the machine starts with, before `Init` installs its own
    pub delay_ms: u64,

    /// Longest single sleep of the wall clock while waiting for a heartbeat
    pub poll_interval_ms: u64,

    /// Stop `run` after this many steps
    pub max_steps: Option<u64>,

    pub report_format: ReportFormat,
}

/// Values given on the command line. Each one that is set replaces the
/// matching field of the loaded config.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub delay_ms: Option<u64>,
    pub poll_interval_ms: Option<u64>,
    pub max_steps: Option<u64>,
    pub report_format: Option<ReportFormat>,
}

impl ReportFormat {
    /// Whether the operator menu may be written to the same stream as the
    /// reports. JSON output must stay one record per line.
    pub fn allows_inline_prompt(self) -> bool {
        matches!(self, ReportFormat::Text)
    }
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            delay_ms: 1_000,
            poll_interval_ms: 10,
            max_steps: None,
            report_format: ReportFormat::Text,
        }
    }
}

impl MachineConfig {
    /// Read and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::read(path.as_ref())?.into_validated()
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Parse and validate a JSON document.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.into_validated()
    }

    /// Check every rule, accumulating ALL violations.
    pub fn validate(&self) -> Validation<(), NonEmptyVec<ConfigViolation>> {
        validation::validate(self)
    }

    /// Return the config unchanged if it is valid.
    pub fn into_validated(self) -> Result<Self, ConfigError> {
        match self.validate() {
            Validation::Success(_) => Ok(self),
            Validation::Failure(errors) => {
                Err(ConfigError::Invalid(errors.iter().cloned().collect()))
            }
        }
    }

    /// Read `path` (or start from the defaults), apply `overrides` on top and
    /// validate the merged result.
    pub fn resolve(
        path: Option<&Path>,
        overrides: &ConfigOverrides,
    ) -> Result<Self, ConfigError> {
        let base = match path {
            Some(path) => Self::read(path)?,
            None => Self::default(),
        };
        base.with_overrides(overrides).into_validated()
    }

    /// Replace every field that `overrides` sets. Does not validate.
    pub fn with_overrides(mut self, overrides: &ConfigOverrides) -> Self {
        if let Some(delay_ms) = overrides.delay_ms {
            self.delay_ms = delay_ms;
        }
        if let Some(poll_interval_ms) = overrides.poll_interval_ms {
            self.poll_interval_ms = poll_interval_ms;
        }
        if overrides.max_steps.is_some() {
            self.max_steps = overrides.max_steps;
        }
        if let Some(format) = overrides.report_format {
            self.report_format = format;
        }
        self
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}
