//! BDD step definitions for runner behaviour.

use rstest_bdd_macros::{given, then, when};
use scenario_harness::test_support::write_artifact;
use scenario_harness::{IterationOutcome, run_scenario, scenario};

use super::test_helpers::{RunOutcome, RunnerContext, outcome_from};

#[derive(Debug, thiserror::Error)]
pub enum StepError {
    #[error("assertion failed: {0}")]
    Assertion(String),
}

#[given("the registered scenario \"{exename}\" with a published artifact")]
fn published_scenario(mut runner_context: RunnerContext, exename: String) -> RunnerContext {
    let Some(entry) = scenario::find(&exename) else {
        panic!("{exename} should be registered");
    };
    write_artifact(&runner_context.artifact_dir, entry.exename, "exit 0")
        .unwrap_or_else(|err| panic!("write artifact: {err}"));
    runner_context.scenario = Some(entry);
    runner_context
}

#[given("the registered scenario \"{exename}\" without a published artifact")]
fn unpublished_scenario(mut runner_context: RunnerContext, exename: String) -> RunnerContext {
    let Some(entry) = scenario::find(&exename) else {
        panic!("{exename} should be registered");
    };
    runner_context.scenario = Some(entry);
    runner_context
}

#[given("the launcher reports {count:u32} clean exits")]
fn launcher_reports_clean_exits(runner_context: RunnerContext, count: u32) -> RunnerContext {
    for _ in 0..count {
        runner_context.launcher.push_success();
    }
    runner_context
}

#[when("I run the scenario for {iterations:u32} iterations")]
fn run_the_scenario(mut runner_context: RunnerContext, iterations: u32) -> RunnerContext {
    let Some(entry) = runner_context.scenario else {
        panic!("test setup requires a registered scenario");
    };
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap_or_else(|err| panic!("build runtime: {err}"));
    let result = runtime.block_on(run_scenario(
        entry,
        runner_context.settings(iterations),
        runner_context.launcher.clone(),
    ));
    runner_context.outcome = Some(outcome_from(result));
    runner_context
}

#[then("the run report lists {count:u32} exited iterations")]
fn report_lists_iterations(runner_context: &RunnerContext, count: u32) -> Result<(), StepError> {
    let Some(RunOutcome::Success(report)) = runner_context.outcome.as_ref() else {
        return Err(StepError::Assertion(format!(
            "expected success, got: {:?}",
            runner_context.outcome
        )));
    };
    let exited = report
        .iterations
        .iter()
        .filter(|result| result.outcome == IterationOutcome::Exited)
        .count();
    if exited == count as usize && report.iterations.len() == count as usize {
        Ok(())
    } else {
        Err(StepError::Assertion(format!(
            "expected {count} exited iterations, got {:?}",
            report.iterations
        )))
    }
}

#[then("the run fails naming \"{name}\"")]
fn run_fails_naming(runner_context: &RunnerContext, name: String) -> Result<(), StepError> {
    let Some(RunOutcome::Failure(message)) = runner_context.outcome.as_ref() else {
        return Err(StepError::Assertion(String::from(
            "expected the run to fail, got success",
        )));
    };
    if message.contains(name.as_str()) && message.contains("artifact not found") {
        Ok(())
    } else {
        Err(StepError::Assertion(format!(
            "expected failure naming {name}, got: {message}"
        )))
    }
}

#[then("the launcher was never invoked")]
fn launcher_never_invoked(runner_context: &RunnerContext) -> Result<(), StepError> {
    let invocations = runner_context.launcher.invocations();
    if invocations.is_empty() {
        Ok(())
    } else {
        Err(StepError::Assertion(format!(
            "expected no launches, got {invocations:?}"
        )))
    }
}
