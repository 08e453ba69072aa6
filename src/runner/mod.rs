//! Runs a scenario artifact described by [`TestTraits`].
//!
//! The runner resolves the published artifact, launches it once per
//! iteration through a [`Launcher`], judges each launch against the GUI flag,
//! and returns a [`RunReport`]. Any failure stops the run immediately.

mod error;
mod settings;

use std::io;

use camino::Utf8PathBuf;
use cap_std::{ambient_authority, fs_utf8::Dir};
use tracing::{debug, info};
use uuid::Uuid;

use crate::launch::{LaunchOutput, LaunchRequest, LaunchStatus, Launcher, ProcessLauncher};
use crate::report::{IterationOutcome, IterationResult, RunReport};
use crate::traits::{GuiApp, TestTraits};

pub use error::RunError;
pub use settings::{
    DEFAULT_ARTIFACT_DIR, DEFAULT_GUI_SETTLE, DEFAULT_ITERATIONS, DEFAULT_TIMEOUT, RunSettings,
    artifact_file_name, artifact_path,
};

/// Dispatcher wrapping a single [`TestTraits`] value.
#[derive(Debug)]
pub struct Runner<L = ProcessLauncher> {
    traits: TestTraits,
    settings: RunSettings,
    launcher: L,
}

impl Runner<ProcessLauncher> {
    /// Creates a runner with default settings and the real process launcher.
    #[must_use]
    pub fn new(traits: TestTraits) -> Self {
        Self {
            traits,
            settings: RunSettings::default(),
            launcher: ProcessLauncher,
        }
    }
}

impl<L: Launcher> Runner<L> {
    /// Replaces the run settings.
    #[must_use]
    pub fn with_settings(mut self, settings: RunSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Replaces the launcher.
    #[must_use]
    pub fn with_launcher<M: Launcher>(self, launcher: M) -> Runner<M> {
        Runner {
            traits: self.traits,
            settings: self.settings,
            launcher,
        }
    }

    /// Traits this runner was built from.
    #[must_use]
    pub const fn traits(&self) -> &TestTraits {
        &self.traits
    }

    /// Settings applied to the run.
    #[must_use]
    pub const fn settings(&self) -> &RunSettings {
        &self.settings
    }

    /// Launches the artifact for every configured iteration.
    ///
    /// The runner is consumed, so each one runs exactly once. The report is
    /// written to the configured report directory before it is returned.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::MissingArtifact`] when the artifact is absent,
    /// [`RunError::Launch`] when the launcher fails, one of
    /// [`RunError::NonZeroExit`], [`RunError::MissingExitCode`] or
    /// [`RunError::Timeout`] when an iteration fails, and
    /// [`RunError::Report`] when the report cannot be written.
    pub async fn run(self) -> Result<RunReport, RunError> {
        let program = locate_artifact(&self.settings, self.traits.exename())?;
        let request = LaunchRequest::new(
            program,
            self.settings.launch_mode(self.traits.guiapp()),
        );
        let run_id = Uuid::new_v4();
        info!(
            %run_id,
            exename = self.traits.exename(),
            guiapp = %self.traits.guiapp(),
            iterations = self.settings.iterations,
            "starting run"
        );

        let mut results = Vec::new();
        for iteration in 1..=self.settings.iterations.max(1) {
            debug!(command = %request.command_line(), iteration, "launching artifact");
            let output = self.launcher.launch(&request).await?;
            let result = self.judge(&request, iteration, &output)?;
            info!(
                iteration,
                elapsed_ms = result.elapsed_ms,
                outcome = ?result.outcome,
                "iteration complete"
            );
            results.push(result);
        }

        let report = RunReport::new(run_id, &self.traits, results);
        if let Some(summary) = report.summary {
            info!(
                %run_id,
                min_ms = summary.min_ms,
                max_ms = summary.max_ms,
                mean_ms = summary.mean_ms,
                "run complete"
            );
        }
        if let Some(ref dir) = self.settings.report_dir {
            let path = report.write_json(dir)?;
            info!(%path, "run report written");
        }
        Ok(report)
    }

    fn judge(
        &self,
        request: &LaunchRequest,
        iteration: u32,
        output: &LaunchOutput,
    ) -> Result<IterationResult, RunError> {
        let outcome = match (output.status, output.code, self.traits.guiapp()) {
            (LaunchStatus::Exited, Some(0), _) => IterationOutcome::Exited,
            (LaunchStatus::Exited, Some(code), _) => {
                return Err(RunError::NonZeroExit {
                    program: request.program.clone(),
                    code,
                    iteration,
                });
            }
            (LaunchStatus::Exited, None, _) => {
                return Err(RunError::MissingExitCode {
                    program: request.program.clone(),
                    iteration,
                });
            }
            (LaunchStatus::Alive, _, GuiApp::Gui) => IterationOutcome::Settled,
            (LaunchStatus::Alive, _, GuiApp::Console) => {
                return Err(RunError::Timeout {
                    program: request.program.clone(),
                    timeout: self.settings.timeout,
                    iteration,
                });
            }
        };
        Ok(IterationResult::new(
            iteration,
            output.elapsed,
            output.code,
            outcome,
        ))
    }
}

/// Returns the path of the published artifact for `exename`.
///
/// # Errors
///
/// Returns [`RunError::MissingArtifact`] when no regular file exists at the
/// expected location and [`RunError::Inspect`] when the location cannot be
/// read.
pub fn locate_artifact(settings: &RunSettings, exename: &str) -> Result<Utf8PathBuf, RunError> {
    let file_name = artifact_file_name(exename);
    let path = settings.artifact_dir.join(&file_name);
    let dir = match Dir::open_ambient_dir(&settings.artifact_dir, ambient_authority()) {
        Ok(dir) => dir,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Err(RunError::MissingArtifact { path });
        }
        Err(err) => {
            return Err(RunError::Inspect {
                path: settings.artifact_dir.clone(),
                message: err.to_string(),
            });
        }
    };

    match dir.metadata(&file_name) {
        Ok(metadata) if metadata.is_file() => Ok(path),
        Ok(_) => Err(RunError::MissingArtifact { path }),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            Err(RunError::MissingArtifact { path })
        }
        Err(err) => Err(RunError::Inspect {
            path,
            message: err.to_string(),
        }),
    }
}
