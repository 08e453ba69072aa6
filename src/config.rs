//! Configuration loading via `ortho-config`.

use std::time::Duration;

use camino::Utf8PathBuf;
use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;

use crate::runner::{DEFAULT_ARTIFACT_DIR, RunSettings};

/// Harness settings derived from defaults, configuration files, and
/// environment variables.
#[derive(Clone, Debug, Deserialize, OrthoConfig, PartialEq, Eq)]
#[ortho_config(
    prefix = "SCENARIO_HARNESS",
    discovery(
        app_name = "scenario-harness",
        env_var = "SCENARIO_CONFIG_PATH",
        config_file_name = "scenario-harness.toml",
        dotfile_name = ".scenario-harness.toml",
        project_file_name = "scenario-harness.toml"
    )
)]
pub struct HarnessConfig {
    /// Directory holding the published scenario artifacts.
    #[ortho_config(default = DEFAULT_ARTIFACT_DIR.to_owned())]
    pub artifact_dir: String,
    /// Number of launches per scenario run.
    #[ortho_config(default = 1)]
    pub iterations: u32,
    /// Seconds a console artifact may run before it is killed.
    #[ortho_config(default = 60)]
    pub timeout_secs: u64,
    /// Milliseconds a GUI artifact must stay alive to count as started.
    #[ortho_config(default = 5000)]
    pub gui_settle_ms: u64,
    /// Directory that receives JSON run reports. Reports are skipped when
    /// unset.
    pub report_dir: Option<String>,
}

/// Metadata for a configuration field, used to generate actionable error messages.
struct FieldMetadata {
    description: &'static str,
    env_var: &'static str,
    toml_key: &'static str,
}

impl FieldMetadata {
    const fn new(description: &'static str, env_var: &'static str, toml_key: &'static str) -> Self {
        Self {
            description,
            env_var,
            toml_key,
        }
    }

    fn guidance(&self) -> String {
        format!(
            "set {} or add {} to scenario-harness.toml",
            self.env_var, self.toml_key
        )
    }
}

const ARTIFACT_DIR: FieldMetadata = FieldMetadata::new(
    "artifact directory",
    "SCENARIO_HARNESS_ARTIFACT_DIR",
    "artifact_dir",
);
const ITERATIONS: FieldMetadata = FieldMetadata::new(
    "iteration count",
    "SCENARIO_HARNESS_ITERATIONS",
    "iterations",
);
const TIMEOUT: FieldMetadata = FieldMetadata::new(
    "console timeout",
    "SCENARIO_HARNESS_TIMEOUT_SECS",
    "timeout_secs",
);
const GUI_SETTLE: FieldMetadata = FieldMetadata::new(
    "GUI settle period",
    "SCENARIO_HARNESS_GUI_SETTLE_MS",
    "gui_settle_ms",
);
const REPORT_DIR: FieldMetadata = FieldMetadata::new(
    "report directory",
    "SCENARIO_HARNESS_REPORT_DIR",
    "report_dir",
);

impl HarnessConfig {
    /// Loads configuration without attempting to parse CLI arguments. Values
    /// merge defaults, configuration files, and environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when the merge fails.
    pub fn load_without_cli_args() -> Result<Self, ConfigError> {
        Self::load_from_iter([std::ffi::OsString::from("scenario-harness")])
            .map_err(|err| ConfigError::Parse(err.to_string()))
    }

    /// Performs semantic validation. Error messages name the environment
    /// variable and TOML key that supply the offending value.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingField`] for blank strings and
    /// [`ConfigError::OutOfRange`] for zero counts or durations.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_text(&self.artifact_dir, &ARTIFACT_DIR)?;
        require_positive(u64::from(self.iterations), &ITERATIONS)?;
        require_positive(self.timeout_secs, &TIMEOUT)?;
        require_positive(self.gui_settle_ms, &GUI_SETTLE)?;
        if let Some(ref report_dir) = self.report_dir {
            require_text(report_dir, &REPORT_DIR)?;
        }
        Ok(())
    }

    /// Builds [`RunSettings`] after validating the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when validation fails.
    pub fn as_settings(&self) -> Result<RunSettings, ConfigError> {
        self.validate()?;
        Ok(RunSettings {
            artifact_dir: Utf8PathBuf::from(self.artifact_dir.trim()),
            iterations: self.iterations,
            timeout: Duration::from_secs(self.timeout_secs),
            gui_settle: Duration::from_millis(self.gui_settle_ms),
            report_dir: self
                .report_dir
                .as_deref()
                .map(|dir| Utf8PathBuf::from(dir.trim())),
        })
    }
}

fn require_text(value: &str, metadata: &FieldMetadata) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::MissingField(format!(
            "missing {}: {}",
            metadata.description,
            metadata.guidance()
        )));
    }
    Ok(())
}

fn require_positive(value: u64, metadata: &FieldMetadata) -> Result<(), ConfigError> {
    if value == 0 {
        return Err(ConfigError::OutOfRange(format!(
            "{} must be greater than zero: {}",
            metadata.description,
            metadata.guidance()
        )));
    }
    Ok(())
}

/// Errors raised during configuration loading and validation.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum ConfigError {
    /// Indicates a required configuration field is empty or missing.
    #[error("missing configuration field: {0}")]
    MissingField(String),
    /// Indicates a numeric field is outside its accepted range.
    #[error("configuration value out of range: {0}")]
    OutOfRange(String),
    /// Surfaces errors from the `ortho-config` loader.
    #[error("configuration parsing failed: {0}")]
    Parse(String),
}

impl From<ortho_config::OrthoError> for ConfigError {
    fn from(value: ortho_config::OrthoError) -> Self {
        Self::Parse(value.to_string())
    }
}
