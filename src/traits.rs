//! Launch traits describing how a scenario artifact should be started.
//!
//! A [`TestTraits`] value is built once per scenario invocation and handed to
//! the [`crate::runner::Runner`] by value. It is never mutated afterwards.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

/// Literal accepted for GUI applications.
pub const GUIAPP_TRUE: &str = "true";

/// Literal accepted for console applications.
pub const GUIAPP_FALSE: &str = "false";

/// Whether the artifact is a windowed application or a console process.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(into = "&'static str")]
pub enum GuiApp {
    /// Windowed application; it stays alive until it is closed.
    Gui,
    /// Console or headless process; it exits on its own.
    Console,
}

impl GuiApp {
    /// Returns the literal used in scenario declarations.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Gui => GUIAPP_TRUE,
            Self::Console => GUIAPP_FALSE,
        }
    }

    /// Returns `true` for windowed applications.
    #[must_use]
    pub const fn is_gui(self) -> bool {
        matches!(self, Self::Gui)
    }
}

impl From<GuiApp> for &'static str {
    fn from(value: GuiApp) -> Self {
        value.as_str()
    }
}

impl fmt::Display for GuiApp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GuiApp {
    type Err = TraitsError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            GUIAPP_TRUE => Ok(Self::Gui),
            GUIAPP_FALSE => Ok(Self::Console),
            other => Err(TraitsError::InvalidGuiApp {
                value: other.to_owned(),
            }),
        }
    }
}

/// Errors raised while building [`TestTraits`].
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum TraitsError {
    /// Raised when the executable identifier is blank.
    #[error("exename must not be empty")]
    EmptyExename,
    /// Raised when `guiapp` is not one of the recognised literals.
    #[error("guiapp must be \"true\" or \"false\", got {value:?}")]
    InvalidGuiApp {
        /// Value supplied by the caller.
        value: String,
    },
}

/// Configuration record describing how a scenario artifact is launched.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TestTraits {
    exename: String,
    guiapp: GuiApp,
}

impl TestTraits {
    /// Builds traits from the executable identifier and the `guiapp` literal.
    ///
    /// The identifier is trimmed; `guiapp` must be exactly `"true"` or
    /// `"false"`.
    ///
    /// # Errors
    ///
    /// Returns [`TraitsError::EmptyExename`] when `exename` is blank and
    /// [`TraitsError::InvalidGuiApp`] for any other `guiapp` literal.
    pub fn new(exename: impl Into<String>, guiapp: &str) -> Result<Self, TraitsError> {
        let parsed = guiapp.parse::<GuiApp>()?;
        Self::from_parts(exename, parsed)
    }

    /// Builds traits from an already parsed [`GuiApp`] flag.
    ///
    /// # Errors
    ///
    /// Returns [`TraitsError::EmptyExename`] when `exename` is blank.
    pub fn from_parts(exename: impl Into<String>, guiapp: GuiApp) -> Result<Self, TraitsError> {
        let trimmed = exename.into().trim().to_owned();
        if trimmed.is_empty() {
            return Err(TraitsError::EmptyExename);
        }
        Ok(Self {
            exename: trimmed,
            guiapp,
        })
    }

    /// Identifier of the built artifact.
    #[must_use]
    pub fn exename(&self) -> &str {
        &self.exename
    }

    /// Launch semantics for the artifact.
    #[must_use]
    pub const fn guiapp(&self) -> GuiApp {
        self.guiapp
    }
}
