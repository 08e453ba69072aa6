//! BDD scenarios for the scenario runner.

use rstest_bdd_macros::scenario;

use super::test_helpers::{RunnerContext, runner_context};

#[scenario(
    path = "tests/features/runner.feature",
    name = "Run every iteration of a published console scenario"
)]
fn scenario_run_every_iteration(runner_context: RunnerContext) {
    let _ = runner_context;
}

#[scenario(
    path = "tests/features/runner.feature",
    name = "Fail loudly when the artifact was never published"
)]
fn scenario_fail_loudly_without_artifact(runner_context: RunnerContext) {
    let _ = runner_context;
}
