use clap::Parser;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::error::{Result, TopUpError};

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Apply organization token top-ups and write the notification report
#[derive(Parser, Debug, Clone)]
#[command(
    name = "token-topup",
    about = "Apply organization token top-ups and write the notification report",
    version
)]
pub struct Settings {
    /// Organizations JSON file
    #[arg(long, default_value = "companies.json")]
    pub organizations: PathBuf,

    /// Members JSON file
    #[arg(long, default_value = "users.json")]
    pub members: PathBuf,

    /// Report destination (overwritten on every run)
    #[arg(long, default_value = "output.txt")]
    pub output: PathBuf,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR"])]
    pub log_level: String,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self::parse_from(["token-topup"])
    }
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Parse the process arguments and resolve derived values.
    pub fn load() -> Self {
        Self::load_from_args(std::env::args_os().collect())
    }

    /// Same as [`Settings::load`] but accepts an explicit argument list,
    /// enabling unit-testing without spawning subprocesses.
    pub fn load_from_args(args: Vec<OsString>) -> Self {
        let mut settings = Settings::parse_from(args);

        // --debug overrides log level.
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }

        settings
    }

    /// Reject configurations that would clobber an input file.
    ///
    /// Paths are compared after normalisation, so `./users.json` and
    /// `users.json` name the same file.
    pub fn validate(&self) -> Result<()> {
        for input in [&self.organizations, &self.members] {
            if same_location(input, &self.output) {
                return Err(TopUpError::Config(format!(
                    "output path {} is also an input file",
                    self.output.display()
                )));
            }
        }
        Ok(())
    }
}

// ── Helper: path identity ──────────────────────────────────────────────────────

/// Returns `true` when `a` and `b` resolve to the same file system location.
///
/// Existing paths are canonicalised (following symlinks); otherwise both are
/// made absolute against the working directory with `.` components removed.
fn same_location(a: &Path, b: &Path) -> bool {
    if let (Ok(a), Ok(b)) = (std::fs::canonicalize(a), std::fs::canonicalize(b)) {
        return a == b;
    }
    match (std::path::absolute(a), std::path::absolute(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
