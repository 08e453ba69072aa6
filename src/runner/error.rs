//! Errors surfaced by [`super::Runner::run`].

use std::time::Duration;

use camino::Utf8PathBuf;
use thiserror::Error;

use crate::launch::LaunchError;
use crate::report::ReportError;

/// Errors surfaced while running a scenario artifact.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum RunError {
    /// Raised when the published artifact does not exist.
    #[error("artifact not found at {path}")]
    MissingArtifact {
        /// Path that was expected to hold the artifact.
        path: Utf8PathBuf,
    },
    /// Raised when the artifact location cannot be inspected.
    #[error("failed to inspect {path}: {message}")]
    Inspect {
        /// Path being inspected.
        path: Utf8PathBuf,
        /// Operating system error string.
        message: String,
    },
    /// Raised when the launcher fails to start or supervise the artifact.
    #[error("launch failed: {0}")]
    Launch(#[from] LaunchError),
    /// Raised when the artifact exits with a non-zero status.
    #[error("{program} exited with status {code} on iteration {iteration}")]
    NonZeroExit {
        /// Artifact that failed.
        program: Utf8PathBuf,
        /// Exit status reported by the OS.
        code: i32,
        /// One-based iteration index.
        iteration: u32,
    },
    /// Raised when the artifact terminates without an exit status.
    #[error("{program} terminated without an exit status on iteration {iteration}")]
    MissingExitCode {
        /// Artifact that failed.
        program: Utf8PathBuf,
        /// One-based iteration index.
        iteration: u32,
    },
    /// Raised when a console artifact outlives its timeout.
    #[error("{program} did not exit within {timeout:?} on iteration {iteration}")]
    Timeout {
        /// Artifact that failed.
        program: Utf8PathBuf,
        /// Timeout that elapsed.
        timeout: Duration,
        /// One-based iteration index.
        iteration: u32,
    },
    /// Raised when the run report cannot be written.
    #[error("failed to write run report: {0}")]
    Report(#[from] ReportError),
}
