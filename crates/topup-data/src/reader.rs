//! JSON record loading and report writing.
//!
//! Reads the organization and member collections into typed records and
//! writes the rendered report back to disk.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use topup_core::error::{Result, TopUpError};
use topup_core::models::{Member, Organization};
use tracing::{debug, warn};

// ── Public API ────────────────────────────────────────────────────────────────

/// Load organizations from a JSON array, sorted by id (stable).
pub fn load_organizations(path: &Path) -> Result<Vec<Organization>> {
    let mut organizations: Vec<Organization> = read_records(path)?;
    organizations.sort_by_key(|o| o.id);
    Ok(organizations)
}

/// Load members from a JSON array, sorted by last name (stable).
///
/// The sort fixes the order in which members appear inside each
/// organization's block of the report.
pub fn load_members(path: &Path) -> Result<Vec<Member>> {
    let mut members: Vec<Member> = read_records(path)?;
    members.sort_by(|a, b| a.last_name.cmp(&b.last_name));
    Ok(members)
}

/// Overwrite `path` with `report`.
///
/// The text is written to a sibling temp file first and then renamed into
/// place, so a failed run never leaves a truncated report behind.
pub fn write_report(path: &Path, report: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| TopUpError::write(path, e))?;
    }

    let tmp = temp_path_for(path);
    if let Err(e) = std::fs::write(&tmp, report) {
        discard_temp(&tmp);
        return Err(TopUpError::write(path, e));
    }
    if let Err(e) = std::fs::rename(&tmp, path) {
        discard_temp(&tmp);
        return Err(TopUpError::write(path, e));
    }

    debug!("Wrote {} bytes to {}", report.len(), path.display());
    Ok(())
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Read `path` fully and parse it as a JSON array of `T`.
fn read_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let content = std::fs::read_to_string(path).map_err(|e| TopUpError::read(path, e))?;
    let records: Vec<T> =
        serde_json::from_str(&content).map_err(|e| TopUpError::read(path, e))?;

    debug!("Loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

/// `output.txt` → `output.txt.tmp`, in the same directory.
fn temp_path_for(path: &Path) -> PathBuf {
    let mut name: OsString = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

fn discard_temp(tmp: &Path) {
    if tmp.exists() {
        if let Err(e) = std::fs::remove_file(tmp) {
            warn!("Failed to remove temp file {}: {}", tmp.display(), e);
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
