//! Launch request and outcome types plus the launcher abstraction.

use std::ffi::OsString;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use camino::Utf8PathBuf;
use shell_escape::unix::escape;
use thiserror::Error;

/// How long the launcher observes the child and what the window means.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LaunchMode {
    /// Wait for the process to exit; the window is a hard timeout.
    Console {
        /// Upper bound on the wait before the child is killed.
        timeout: Duration,
    },
    /// Expect the process to stay up; the window is the settle period.
    Gui {
        /// How long the child must stay alive to count as started.
        settle: Duration,
    },
}

impl LaunchMode {
    /// Observation window applied by the launcher.
    #[must_use]
    pub const fn window(self) -> Duration {
        match self {
            Self::Console { timeout } => timeout,
            Self::Gui { settle } => settle,
        }
    }
}

/// Process launch parameters.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LaunchRequest {
    /// Executable to start.
    pub program: Utf8PathBuf,
    /// Arguments passed to the executable.
    pub args: Vec<OsString>,
    /// Observation semantics.
    pub mode: LaunchMode,
}

impl LaunchRequest {
    /// Creates a request without arguments.
    #[must_use]
    pub const fn new(program: Utf8PathBuf, mode: LaunchMode) -> Self {
        Self {
            program,
            args: Vec::new(),
            mode,
        }
    }

    /// Appends arguments to the request.
    #[must_use]
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Renders a shell-escaped command line for diagnostics.
    #[must_use]
    pub fn command_line(&self) -> String {
        let mut parts = Vec::with_capacity(self.args.len() + 1);
        parts.push(escape(self.program.as_str().into()).into_owned());
        parts.extend(
            self.args
                .iter()
                .map(|arg| escape(arg.to_string_lossy()).into_owned()),
        );
        parts.join(" ")
    }
}

/// State of the child when the launcher stopped observing it.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LaunchStatus {
    /// The process exited inside the observation window.
    Exited,
    /// The process outlived the window and was terminated.
    Alive,
}

/// Result of a single launch.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LaunchOutput {
    /// Exit code reported by the process, if available.
    pub code: Option<i32>,
    /// Wall-clock time from spawn until exit or the end of the window.
    pub elapsed: Duration,
    /// Whether the process exited or had to be terminated.
    pub status: LaunchStatus,
}

impl LaunchOutput {
    /// Output for a process that exited with `code`.
    #[must_use]
    pub const fn exited(code: Option<i32>, elapsed: Duration) -> Self {
        Self {
            code,
            elapsed,
            status: LaunchStatus::Exited,
        }
    }

    /// Output for a process that outlived the observation window.
    #[must_use]
    pub const fn alive(elapsed: Duration) -> Self {
        Self {
            code: None,
            elapsed,
            status: LaunchStatus::Alive,
        }
    }
}

/// Errors raised while launching or supervising a process.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum LaunchError {
    /// Raised when the process cannot be started.
    #[error("failed to spawn {program}: {message}")]
    Spawn {
        /// Program that failed to start.
        program: String,
        /// Operating system error string.
        message: String,
    },
    /// Raised when waiting on the child fails.
    #[error("failed to wait for {program}: {message}")]
    Wait {
        /// Program being supervised.
        program: String,
        /// Operating system error string.
        message: String,
    },
    /// Raised when the child cannot be terminated after the window.
    #[error("failed to terminate {program}: {message}")]
    Terminate {
        /// Program being terminated.
        program: String,
        /// Operating system error string.
        message: String,
    },
}

/// Future returned by launcher implementations.
pub type LaunchFuture<'a> = Pin<Box<dyn Future<Output = Result<LaunchOutput, LaunchError>> + 'a>>;

/// Abstraction over process launching to support fakes in tests.
pub trait Launcher {
    /// Starts the requested program and observes it for the mode's window.
    fn launch<'a>(&'a self, request: &'a LaunchRequest) -> LaunchFuture<'a>;
}
