//! Declarative scenario registry.
//!
//! Each scenario is a data record: a display name, the identifier of its
//! published artifact, and the `guiapp` literal. Every record runs through
//! [`run_scenario`]; there is no per-scenario control flow.

use thiserror::Error;
use tracing::warn;

use crate::launch::Launcher;
use crate::report::RunReport;
use crate::runner::{RunError, RunSettings, Runner};
use crate::traits::{GuiApp, TestTraits, TraitsError};

/// Name fragments that indicate a windowed template.
const GUI_NAME_HINTS: &[&str] = &["windows forms", "winforms", "wpf"];

/// One named test unit backed by a published artifact.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Scenario {
    /// Human-readable scenario name.
    pub name: &'static str,
    /// Identifier of the published artifact.
    pub exename: &'static str,
    /// `"true"` for windowed applications, `"false"` otherwise.
    pub guiapp: &'static str,
}

/// Every scenario known to the harness, in execution order.
pub const SCENARIOS: &[Scenario] = &[
    Scenario {
        name: ".NET Core 2.0 Library Template",
        exename: "NetCoreApp(Library)",
        guiapp: "false",
    },
    Scenario {
        name: "Windows Forms Template",
        exename: "windowsforms",
        guiapp: "false",
    },
];

impl Scenario {
    /// Builds the launch traits for this scenario.
    ///
    /// # Errors
    ///
    /// Returns [`TraitsError`] when the record carries a blank identifier or
    /// an unrecognised `guiapp` literal.
    pub fn traits(&self) -> Result<TestTraits, TraitsError> {
        TestTraits::new(self.exename, self.guiapp)
    }

    /// Returns `true` when the name suggests a windowed template but the
    /// record declares a console application.
    #[must_use]
    pub fn gui_flag_suspect(&self) -> bool {
        let lowered = self.name.to_lowercase();
        let named_gui = GUI_NAME_HINTS.iter().any(|hint| lowered.contains(hint));
        named_gui && self.guiapp.parse::<GuiApp>().ok() == Some(GuiApp::Console)
    }
}

/// Looks up a scenario by exact name or artifact identifier.
#[must_use]
pub fn find(key: &str) -> Option<&'static Scenario> {
    let trimmed = key.trim();
    SCENARIOS
        .iter()
        .find(|scenario| scenario.name == trimmed || scenario.exename == trimmed)
}

/// Failure raised inside a scenario run.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum ScenarioFailure {
    /// The record could not be turned into launch traits.
    #[error(transparent)]
    Traits(#[from] TraitsError),
    /// The runner failed.
    #[error(transparent)]
    Run(#[from] RunError),
}

/// Scenario failure annotated with the scenario that produced it.
#[derive(Debug, Error, Eq, PartialEq)]
#[error("scenario '{name}' ({exename}) failed: {source}")]
pub struct ScenarioError {
    /// Scenario display name.
    pub name: String,
    /// Artifact identifier.
    pub exename: String,
    /// Underlying failure.
    #[source]
    pub source: ScenarioFailure,
}

impl ScenarioError {
    fn new(scenario: &Scenario, source: impl Into<ScenarioFailure>) -> Self {
        Self {
            name: scenario.name.to_owned(),
            exename: scenario.exename.to_owned(),
            source: source.into(),
        }
    }
}

/// Builds the scenario's traits, constructs a runner, and runs it once.
///
/// # Errors
///
/// Returns [`ScenarioError`] wrapping the traits or run failure together
/// with the scenario name and artifact identifier.
pub async fn run_scenario<L: Launcher>(
    scenario: &Scenario,
    settings: RunSettings,
    launcher: L,
) -> Result<RunReport, ScenarioError> {
    if scenario.gui_flag_suspect() {
        warn!(
            scenario = scenario.name,
            exename = scenario.exename,
            "scenario name suggests a GUI template but guiapp is false"
        );
    }

    let traits = scenario
        .traits()
        .map_err(|err| ScenarioError::new(scenario, err))?;
    Runner::new(traits)
        .with_settings(settings)
        .with_launcher(launcher)
        .run()
        .await
        .map_err(|err| ScenarioError::new(scenario, err))
}
