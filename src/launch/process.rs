//! Launcher backed by `tokio::process`.

use std::process::Stdio;
use std::time::{Duration, Instant};

use tokio::process::{Child, Command};
use tokio::time::timeout;
use tracing::debug;

use super::types::{LaunchError, LaunchFuture, LaunchOutput, LaunchRequest, Launcher};

/// Real launcher that spawns processes on the host operating system.
///
/// The child inherits stdout and stderr so scenario output stays visible.
/// Children are killed on drop, so an abandoned launch never leaks a process.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProcessLauncher;

impl Launcher for ProcessLauncher {
    fn launch<'a>(&'a self, request: &'a LaunchRequest) -> LaunchFuture<'a> {
        Box::pin(async move {
            let program = request.program.to_string();
            let started = Instant::now();
            let mut child = Command::new(request.program.as_std_path())
                .args(&request.args)
                .stdin(Stdio::null())
                .kill_on_drop(true)
                .spawn()
                .map_err(|err| LaunchError::Spawn {
                    program: program.clone(),
                    message: err.to_string(),
                })?;

            observe(&mut child, &program, request.mode.window(), started).await
        })
    }
}

async fn observe(
    child: &mut Child,
    program: &str,
    window: Duration,
    started: Instant,
) -> Result<LaunchOutput, LaunchError> {
    match timeout(window, child.wait()).await {
        Ok(Ok(status)) => Ok(LaunchOutput::exited(status.code(), started.elapsed())),
        Ok(Err(err)) => Err(LaunchError::Wait {
            program: program.to_owned(),
            message: err.to_string(),
        }),
        Err(_) => {
            let elapsed = started.elapsed();
            debug!(program, ?window, "process outlived observation window; terminating");
            child.kill().await.map_err(|err| LaunchError::Terminate {
                program: program.to_owned(),
                message: err.to_string(),
            })?;
            Ok(LaunchOutput::alive(elapsed))
        }
    }
}
