//! Run settings consumed by the [`super::Runner`].

use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};

use crate::launch::LaunchMode;
use crate::traits::GuiApp;

/// Default directory holding published scenario artifacts.
pub const DEFAULT_ARTIFACT_DIR: &str = "pub";

/// Default number of launches per run.
pub const DEFAULT_ITERATIONS: u32 = 1;

/// Default upper bound for a console launch.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Default time a GUI application must stay alive to count as started.
pub const DEFAULT_GUI_SETTLE: Duration = Duration::from_secs(5);

/// Resolved settings for a single run.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RunSettings {
    /// Directory containing the published artifacts.
    pub artifact_dir: Utf8PathBuf,
    /// Number of launches; always at least one.
    pub iterations: u32,
    /// Upper bound for console launches.
    pub timeout: Duration,
    /// Settle period for GUI launches.
    pub gui_settle: Duration,
    /// Directory that receives JSON run reports, when enabled.
    pub report_dir: Option<Utf8PathBuf>,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            artifact_dir: Utf8PathBuf::from(DEFAULT_ARTIFACT_DIR),
            iterations: DEFAULT_ITERATIONS,
            timeout: DEFAULT_TIMEOUT,
            gui_settle: DEFAULT_GUI_SETTLE,
            report_dir: None,
        }
    }
}

impl RunSettings {
    /// Path of the artifact for `exename` inside the artifact directory.
    ///
    /// The platform executable suffix is appended, so `windowsforms`
    /// resolves to `windowsforms.exe` on Windows.
    #[must_use]
    pub fn artifact_path(&self, exename: &str) -> Utf8PathBuf {
        artifact_path(&self.artifact_dir, exename)
    }

    /// Launch mode derived from the GUI flag.
    #[must_use]
    pub const fn launch_mode(&self, guiapp: GuiApp) -> LaunchMode {
        match guiapp {
            GuiApp::Gui => LaunchMode::Gui {
                settle: self.gui_settle,
            },
            GuiApp::Console => LaunchMode::Console {
                timeout: self.timeout,
            },
        }
    }
}

/// File name of the artifact for `exename`, including the platform
/// executable suffix.
#[must_use]
pub fn artifact_file_name(exename: &str) -> String {
    format!("{exename}{}", std::env::consts::EXE_SUFFIX)
}

/// Joins the artifact file name for `exename` onto `dir`.
#[must_use]
pub fn artifact_path(dir: &Utf8Path, exename: &str) -> Utf8PathBuf {
    dir.join(artifact_file_name(exename))
}
