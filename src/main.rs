//! Binary entry point for the scenario harness CLI.

use std::io::{self, Write};
use std::process;

use clap::Parser;
use thiserror::Error;

use scenario_harness::runner::{RunError, locate_artifact};
use scenario_harness::scenario::{self, SCENARIOS, Scenario, ScenarioError, run_scenario};
use scenario_harness::{
    ConfigError, HarnessConfig, ProcessLauncher, RunReport, RunSettings, telemetry,
};

mod cli;

use cli::{CheckCommand, Cli, RunCommand};

#[derive(Debug, Error)]
enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("unknown scenario {0:?}; run `scenario-harness list` to see registered scenarios")]
    UnknownScenario(String),
    #[error(transparent)]
    Scenario(#[from] ScenarioError),
    #[error("artifact inspection failed: {0}")]
    Inspect(#[from] RunError),
    #[error("invalid partition: {reason}")]
    InvalidPartition { reason: &'static str },
    #[error("scenario check failed: {missing} missing artifact(s), {invalid} invalid record(s)")]
    CheckFailed { missing: usize, invalid: usize },
    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    telemetry::init();
    let cli = Cli::parse();
    let exit_code = match dispatch(cli, &mut io::stdout()).await {
        Ok(()) => 0,
        Err(err) => {
            report_error(&err);
            1
        }
    };

    process::exit(exit_code);
}

async fn dispatch(cli: Cli, out: &mut impl Write) -> Result<(), CliError> {
    match cli {
        Cli::List => list_scenarios(out),
        Cli::Run(command) => run_command(&command, out).await,
        Cli::Check(command) => check_command(&command, out),
    }
}

fn list_scenarios(out: &mut impl Write) -> Result<(), CliError> {
    for entry in SCENARIOS {
        writeln!(out, "{}\t{}\t{}", entry.exename, entry.guiapp, entry.name)?;
    }
    Ok(())
}

async fn run_command(command: &RunCommand, out: &mut impl Write) -> Result<(), CliError> {
    let selected = select_scenarios(command)?;
    let config = apply_run_overrides(HarnessConfig::load_without_cli_args()?, command);
    let settings = config.as_settings()?;

    for entry in selected {
        let report = run_scenario(entry, settings.clone(), ProcessLauncher).await?;
        write_summary(out, entry, &report)?;
    }
    Ok(())
}

fn select_scenarios(command: &RunCommand) -> Result<Vec<&'static Scenario>, CliError> {
    let partition = Partition::from_command(command)?;
    if command.all {
        return Ok(SCENARIOS
            .iter()
            .enumerate()
            .filter(|(position, _)| partition.is_none_or(|part| part.contains(*position)))
            .map(|(_, entry)| entry)
            .collect());
    }

    let key = command.scenario.as_deref().unwrap_or_default();
    scenario::find(key)
        .map(|entry| vec![entry])
        .ok_or_else(|| CliError::UnknownScenario(key.to_owned()))
}

/// Slice of the registry assigned to one CI machine.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct Partition {
    count: u32,
    index: u32,
}

impl Partition {
    fn from_command(command: &RunCommand) -> Result<Option<Self>, CliError> {
        match (command.partition_count, command.partition_index) {
            (None, None) => Ok(None),
            (Some(_), None) | (None, Some(_)) => Err(CliError::InvalidPartition {
                reason: "--partition-count and --partition-index must be given together",
            }),
            (Some(count), Some(_)) if count < 2 => Err(CliError::InvalidPartition {
                reason: "--partition-count must be at least 2",
            }),
            (Some(count), Some(index)) if index >= count => Err(CliError::InvalidPartition {
                reason: "--partition-index must be less than --partition-count",
            }),
            (Some(count), Some(index)) => Ok(Some(Self { count, index })),
        }
    }

    fn contains(self, position: usize) -> bool {
        u32::try_from(position)
            .ok()
            .and_then(|pos| pos.checked_rem(self.count))
            .is_some_and(|slot| slot == self.index)
    }
}

fn apply_run_overrides(mut config: HarnessConfig, command: &RunCommand) -> HarnessConfig {
    if let Some(ref dir) = command.artifact_dir {
        config.artifact_dir.clone_from(dir);
    }
    if let Some(iterations) = command.iterations {
        config.iterations = iterations;
    }
    if let Some(ref dir) = command.report_dir {
        config.report_dir = Some(dir.clone());
    }
    config
}

fn write_summary(out: &mut impl Write, entry: &Scenario, report: &RunReport) -> io::Result<()> {
    match report.summary {
        Some(summary) => writeln!(
            out,
            "{}: {} iteration(s), min {} ms, max {} ms, mean {} ms",
            entry.name,
            report.iterations.len(),
            summary.min_ms,
            summary.max_ms,
            summary.mean_ms
        ),
        None => writeln!(out, "{}: no iterations recorded", entry.name),
    }
}

fn check_command(command: &CheckCommand, out: &mut impl Write) -> Result<(), CliError> {
    let mut config = HarnessConfig::load_without_cli_args()?;
    if let Some(ref dir) = command.artifact_dir {
        config.artifact_dir.clone_from(dir);
    }
    check_scenarios(SCENARIOS, &config.as_settings()?, out)
}

fn check_scenarios(
    entries: &[Scenario],
    settings: &RunSettings,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let mut missing = 0_usize;
    let mut invalid = 0_usize;

    for entry in entries {
        if let Err(err) = entry.traits() {
            writeln!(out, "invalid\t{}\t{err}", entry.name)?;
            invalid = invalid.saturating_add(1);
            continue;
        }

        match locate_artifact(settings, entry.exename) {
            Ok(path) => writeln!(out, "ok\t{}\t{path}", entry.name)?,
            Err(RunError::MissingArtifact { path }) => {
                writeln!(out, "missing\t{}\t{path}", entry.name)?;
                missing = missing.saturating_add(1);
            }
            Err(err) => return Err(err.into()),
        }

        if entry.gui_flag_suspect() {
            writeln!(
                out,
                "warning\t{}\tname suggests a GUI template but guiapp is {}",
                entry.name, entry.guiapp
            )?;
        }
    }

    if missing == 0 && invalid == 0 {
        Ok(())
    } else {
        Err(CliError::CheckFailed { missing, invalid })
    }
}

fn report_error(err: &CliError) {
    write_error(io::stderr(), err);
}

fn write_error(mut target: impl Write, err: &CliError) {
    writeln!(target, "{err}").ok();
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
