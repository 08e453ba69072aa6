//! Process launching for scenario artifacts.
//!
//! The [`Launcher`] trait is the seam between the runner and the operating
//! system. [`ProcessLauncher`] starts real processes; tests substitute the
//! scripted launcher from [`crate::test_support`].

mod process;
mod types;

pub use process::ProcessLauncher;
pub use types::{
    LaunchError, LaunchFuture, LaunchMode, LaunchOutput, LaunchRequest, LaunchStatus, Launcher,
};
