//! Shared fixtures and helpers for runner BDD scenarios.

use std::sync::Arc;

use camino::Utf8PathBuf;
use rstest::fixture;
use scenario_harness::test_support::ScriptedLauncher;
use scenario_harness::{RunReport, RunSettings, Scenario, ScenarioError};
use tempfile::TempDir;

#[derive(Clone, Debug)]
pub enum RunOutcome {
    Success(RunReport),
    Failure(String),
}

#[derive(Clone, Debug)]
pub struct RunnerContext {
    pub scenario: Option<&'static Scenario>,
    pub launcher: ScriptedLauncher,
    pub artifact_dir: Utf8PathBuf,
    pub outcome: Option<RunOutcome>,
    _tmp: Arc<TempDir>,
}

impl RunnerContext {
    pub fn settings(&self, iterations: u32) -> RunSettings {
        RunSettings {
            artifact_dir: self.artifact_dir.clone(),
            iterations,
            ..RunSettings::default()
        }
    }
}

#[fixture]
pub fn runner_context() -> RunnerContext {
    let tmp = TempDir::new().unwrap_or_else(|err| panic!("temp dir: {err}"));
    let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf())
        .unwrap_or_else(|path| panic!("temp dir should be utf8: {}", path.display()));
    RunnerContext {
        scenario: None,
        launcher: ScriptedLauncher::new(),
        artifact_dir: root.join("pub"),
        outcome: None,
        _tmp: Arc::new(tmp),
    }
}

pub fn outcome_from(result: Result<RunReport, ScenarioError>) -> RunOutcome {
    match result {
        Ok(report) => RunOutcome::Success(report),
        Err(err) => RunOutcome::Failure(err.to_string()),
    }
}
