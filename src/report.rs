//! Run reports and their JSON persistence.

use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8::Dir};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::traits::{GuiApp, TestTraits};

/// How an iteration reached its successful end.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IterationOutcome {
    /// The process exited cleanly on its own.
    Exited,
    /// The GUI process stayed alive through the settle period.
    Settled,
}

/// Measurement for one launch.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct IterationResult {
    /// One-based iteration index.
    pub iteration: u32,
    /// Wall-clock milliseconds from spawn to exit or settle.
    pub elapsed_ms: u64,
    /// Exit code when the process exited.
    pub exit_code: Option<i32>,
    /// Successful end state.
    pub outcome: IterationOutcome,
}

impl IterationResult {
    /// Builds a result, saturating the elapsed time to `u64` milliseconds.
    #[must_use]
    pub fn new(
        iteration: u32,
        elapsed: Duration,
        exit_code: Option<i32>,
        outcome: IterationOutcome,
    ) -> Self {
        Self {
            iteration,
            elapsed_ms: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
            exit_code,
            outcome,
        }
    }
}

/// Aggregate timings across iterations.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct Summary {
    /// Fastest iteration in milliseconds.
    pub min_ms: u64,
    /// Slowest iteration in milliseconds.
    pub max_ms: u64,
    /// Integer mean in milliseconds.
    pub mean_ms: u64,
}

impl Summary {
    /// Summarises `results`, returning `None` when there are none.
    #[must_use]
    pub fn from_results(results: &[IterationResult]) -> Option<Self> {
        let min_ms = results.iter().map(|result| result.elapsed_ms).min()?;
        let max_ms = results.iter().map(|result| result.elapsed_ms).max()?;
        let total = results
            .iter()
            .fold(0_u64, |acc, result| acc.saturating_add(result.elapsed_ms));
        let count = u64::try_from(results.len()).ok()?;
        let mean_ms = total.checked_div(count)?;
        Some(Self {
            min_ms,
            max_ms,
            mean_ms,
        })
    }
}

/// Report produced by a completed run.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct RunReport {
    /// Unique identifier for this run.
    pub run_id: Uuid,
    /// Artifact identifier that was launched.
    pub exename: String,
    /// Launch semantics used.
    pub guiapp: GuiApp,
    /// Per-iteration measurements in launch order.
    pub iterations: Vec<IterationResult>,
    /// Aggregate timings; absent only when no iteration ran.
    pub summary: Option<Summary>,
}

impl RunReport {
    /// Builds a report and computes its summary.
    #[must_use]
    pub fn new(run_id: Uuid, traits: &TestTraits, iterations: Vec<IterationResult>) -> Self {
        let summary = Summary::from_results(&iterations);
        Self {
            run_id,
            exename: traits.exename().to_owned(),
            guiapp: traits.guiapp(),
            iterations,
            summary,
        }
    }

    /// File name used when the report is persisted.
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("{}-{}.json", self.exename, self.run_id)
    }

    /// Writes the report as pretty JSON into `dir`, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Serialize`] when rendering fails and
    /// [`ReportError::Io`] when the directory or file cannot be written.
    pub fn write_json(&self, dir: &Utf8Path) -> Result<Utf8PathBuf, ReportError> {
        let rendered = serde_json::to_string_pretty(self)
            .map_err(|err| ReportError::Serialize(err.to_string()))?;

        Dir::create_ambient_dir_all(dir, ambient_authority()).map_err(|err| ReportError::Io {
            path: dir.to_path_buf(),
            message: err.to_string(),
        })?;
        let handle = Dir::open_ambient_dir(dir, ambient_authority()).map_err(|err| {
            ReportError::Io {
                path: dir.to_path_buf(),
                message: err.to_string(),
            }
        })?;

        let file_name = self.file_name();
        let path = dir.join(&file_name);
        handle
            .write(&file_name, rendered)
            .map_err(|err| ReportError::Io {
                path: path.clone(),
                message: err.to_string(),
            })?;
        Ok(path)
    }
}

/// Errors raised while persisting a report.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum ReportError {
    /// Raised when the report cannot be rendered.
    #[error("failed to serialise run report: {0}")]
    Serialize(String),
    /// Raised when file system operations fail.
    #[error("failed to write {path}: {message}")]
    Io {
        /// Path that could not be written.
        path: Utf8PathBuf,
        /// Human-readable error message.
        message: String,
    },
}
