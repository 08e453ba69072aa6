//! Command-line interface definitions for the `scenario-harness` binary.
//!
//! This module centralises the clap parser structures so both the main binary
//! and the build script can reuse them when generating the manual page.

use clap::Parser;

/// Top-level CLI for the `scenario-harness` binary.
#[derive(Debug, Parser)]
#[command(
    name = "scenario-harness",
    about = "Launch and time published template scenarios",
    arg_required_else_help = true
)]
pub(crate) enum Cli {
    /// List registered scenarios.
    #[command(name = "list", about = "List registered scenarios")]
    List,
    /// Run one scenario, or every registered scenario.
    #[command(name = "run", about = "Launch and time a scenario artifact")]
    Run(RunCommand),
    /// Check that every scenario is consistent with its published artifact.
    #[command(
        name = "check",
        about = "Check scenario records against the published artifacts"
    )]
    Check(CheckCommand),
}

/// Arguments for the `scenario-harness run` subcommand.
#[derive(Debug, Parser)]
pub(crate) struct RunCommand {
    /// Scenario name or artifact identifier (see `scenario-harness list`).
    #[arg(
        value_name = "SCENARIO",
        required_unless_present = "all",
        conflicts_with = "all"
    )]
    pub(crate) scenario: Option<String>,
    /// Run every registered scenario in order, stopping at the first failure.
    #[arg(long)]
    pub(crate) all: bool,
    /// Override the directory holding published artifacts.
    #[arg(long, value_name = "DIR")]
    pub(crate) artifact_dir: Option<String>,
    /// Override the number of launches per scenario.
    #[arg(long, value_name = "COUNT")]
    pub(crate) iterations: Option<u32>,
    /// Write a JSON report for each run into this directory.
    #[arg(long, value_name = "DIR")]
    pub(crate) report_dir: Option<String>,
    /// Split `--all` across this many CI machines (at least 2).
    #[arg(long, value_name = "COUNT", requires = "all")]
    pub(crate) partition_count: Option<u32>,
    /// Zero-based partition this machine runs; requires `--partition-count`.
    #[arg(long, value_name = "INDEX", requires = "all")]
    pub(crate) partition_index: Option<u32>,
}

/// Arguments for the `scenario-harness check` subcommand.
#[derive(Debug, Parser)]
pub(crate) struct CheckCommand {
    /// Override the directory holding published artifacts.
    #[arg(long, value_name = "DIR")]
    pub(crate) artifact_dir: Option<String>,
}
