//! Test support utilities shared across unit and integration tests.

use std::cell::RefCell;
use std::collections::{BTreeSet, VecDeque};
use std::env;
use std::ffi::OsString;
use std::io;
use std::rc::Rc;
use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8::Dir};
use tokio::sync::{Mutex, MutexGuard};

use crate::launch::{LaunchError, LaunchFuture, LaunchOutput, LaunchRequest, Launcher};
use crate::runner::artifact_file_name;

/// Elapsed time reported by scripted launches unless overridden.
pub const SCRIPTED_ELAPSED: Duration = Duration::from_millis(25);

/// Queued reply for a single scripted launch.
#[derive(Clone, Debug)]
enum ScriptedResponse {
    Output(LaunchOutput),
    Failure(LaunchError),
}

impl From<ScriptedResponse> for Result<LaunchOutput, LaunchError> {
    fn from(response: ScriptedResponse) -> Self {
        match response {
            ScriptedResponse::Output(output) => Ok(output),
            ScriptedResponse::Failure(error) => Err(error),
        }
    }
}

/// Scripted launcher that returns pre-seeded outputs in FIFO order.
///
/// Used to drive deterministic launch outcomes without spawning processes.
#[derive(Clone, Debug, Default)]
pub struct ScriptedLauncher {
    responses: Rc<RefCell<VecDeque<ScriptedResponse>>>,
    invocations: Rc<RefCell<Vec<LaunchRequest>>>,
}

impl ScriptedLauncher {
    /// Creates a launcher with no queued responses.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of all requests received so far.
    #[must_use]
    pub fn invocations(&self) -> Vec<LaunchRequest> {
        self.invocations.borrow().clone()
    }

    /// Pushes a clean exit.
    pub fn push_success(&self) {
        self.push_exit_after(0, SCRIPTED_ELAPSED);
    }

    /// Pushes a specific exit code.
    pub fn push_exit_code(&self, code: i32) {
        self.push_exit_after(code, SCRIPTED_ELAPSED);
    }

    /// Pushes an exit code reached after `elapsed`.
    pub fn push_exit_after(&self, code: i32, elapsed: Duration) {
        self.push_output(LaunchOutput::exited(Some(code), elapsed));
    }

    /// Pushes an exit without a status to simulate signal termination.
    pub fn push_missing_exit_code(&self) {
        self.push_output(LaunchOutput::exited(None, SCRIPTED_ELAPSED));
    }

    /// Pushes a process that outlived the observation window.
    pub fn push_alive(&self) {
        self.push_output(LaunchOutput::alive(SCRIPTED_ELAPSED));
    }

    /// Pushes an explicit launch output.
    pub fn push_output(&self, output: LaunchOutput) {
        self.responses
            .borrow_mut()
            .push_back(ScriptedResponse::Output(output));
    }

    /// Pushes a launcher failure.
    pub fn push_error(&self, error: LaunchError) {
        self.responses
            .borrow_mut()
            .push_back(ScriptedResponse::Failure(error));
    }
}

impl Launcher for ScriptedLauncher {
    fn launch<'a>(&'a self, request: &'a LaunchRequest) -> LaunchFuture<'a> {
        self.invocations.borrow_mut().push(request.clone());
        let response = self.responses.borrow_mut().pop_front().unwrap_or_else(|| {
            ScriptedResponse::Failure(LaunchError::Spawn {
                program: request.program.to_string(),
                message: String::from("no scripted response available"),
            })
        });
        let result: Result<LaunchOutput, LaunchError> = response.into();
        Box::pin(async move { result })
    }
}

/// Writes a fake published artifact for `exename` into `dir`.
///
/// On Unix the file is a shell script with the executable bit set, so it
/// can be launched by the real process launcher.
///
/// # Errors
///
/// Returns any I/O error raised while creating the directory or file.
pub fn write_artifact(dir: &Utf8Path, exename: &str, script: &str) -> io::Result<Utf8PathBuf> {
    Dir::create_ambient_dir_all(dir, ambient_authority())?;
    let handle = Dir::open_ambient_dir(dir, ambient_authority())?;
    let file_name = artifact_file_name(exename);
    handle.write(&file_name, format!("#!/bin/sh\n{script}\n"))?;
    let path = dir.join(&file_name);

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))?;
    }

    Ok(path)
}

/// Global mutex used to serialise environment mutation in tests.
pub static ENV_LOCK: Mutex<()> = Mutex::const_new(());

/// Guard that holds the env mutex and restores variables on drop.
pub struct EnvGuard {
    previous: Vec<(String, Option<OsString>)>,
    _guard: MutexGuard<'static, ()>,
}

impl EnvGuard {
    /// Sets multiple environment variables while holding a global mutex.
    pub async fn set_vars(pairs: &[(&str, &str)]) -> Self {
        debug_assert!(
            {
                let mut seen = BTreeSet::new();
                pairs.iter().all(|(key, _)| seen.insert(*key))
            },
            "duplicate environment variable keys passed to EnvGuard::set_vars"
        );

        let guard = ENV_LOCK.lock().await;
        let mut previous = Vec::with_capacity(pairs.len());
        for (key, value) in pairs {
            let old = env::var_os(key);
            // SAFETY: Environment mutation is serialised by `ENV_LOCK`, preventing races.
            unsafe { env::set_var(key, value) };
            previous.push(((*key).to_owned(), old));
        }

        Self {
            previous,
            _guard: guard,
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (key, old) in &self.previous {
            // SAFETY: Environment mutation is serialised by holding `_guard`.
            unsafe {
                match old {
                    Some(val) => env::set_var(key, val),
                    None => env::remove_var(key),
                }
            }
        }
    }
}
