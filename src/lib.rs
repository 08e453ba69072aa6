//! Core library for the scenario harness.
//!
//! Scenarios are declared as data in [`scenario::SCENARIOS`]. Each one is
//! turned into [`TestTraits`] and handed to a [`Runner`], which launches the
//! published artifact through a [`Launcher`] and reports how long it took to
//! exit (console apps) or to settle (GUI apps).

pub mod config;
pub mod launch;
pub mod report;
pub mod runner;
pub mod scenario;
pub mod telemetry;
pub mod test_support;
pub mod traits;

pub use config::{ConfigError, HarnessConfig};
pub use launch::{
    LaunchError, LaunchMode, LaunchOutput, LaunchRequest, LaunchStatus, Launcher, ProcessLauncher,
};
pub use report::{IterationOutcome, IterationResult, ReportError, RunReport, Summary};
pub use runner::{RunError, RunSettings, Runner};
pub use scenario::{SCENARIOS, Scenario, ScenarioError, ScenarioFailure, run_scenario};
pub use traits::{GuiApp, TestTraits, TraitsError};
