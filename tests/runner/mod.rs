//! BDD coverage for the scenario runner.

mod bdd_steps;
mod scenarios;
mod test_helpers;
