//! Shared constants for integration tests.
//!
//! Integration tests are compiled as separate crates (one per top-level file in
//! `tests/`). Placing shared constants under `tests/common/` avoids creating an
//! additional integration test binary while still allowing reuse via:
//!
//! ```rust
//! #[path = "common/test_constants.rs"]
//! mod test_constants;
//! ```

/// Artifact identifier of the library template scenario.
pub const LIBRARY_EXENAME: &str = "NetCoreApp(Library)";

/// Display name of the library template scenario.
pub const LIBRARY_SCENARIO: &str = ".NET Core 2.0 Library Template";

/// Artifact identifier of the Windows Forms template scenario.
pub const FORMS_EXENAME: &str = "windowsforms";
