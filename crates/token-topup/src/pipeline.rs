//! End-to-end run: load → aggregate → render → write.

use std::path::PathBuf;

use topup_core::error::Result;
use topup_core::settings::Settings;
use topup_data::aggregator::{TopUpAggregator, TopUpTotals};
use topup_data::reader::{load_members, load_organizations, write_report};
use topup_report::render;

/// Outcome of a successful run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Totals across every organization in the report.
    pub totals: TopUpTotals,
    /// Where the report was written.
    pub output: PathBuf,
}

/// Run the full top-up pipeline described by `settings`.
///
/// Both inputs are read before anything is written, so a read failure never
/// touches the output file.
pub fn run(settings: &Settings) -> Result<RunSummary> {
    settings.validate()?;

    let organizations = load_organizations(&settings.organizations)?;
    let members = load_members(&settings.members)?;
    tracing::debug!(
        "Loaded {} organizations and {} members",
        organizations.len(),
        members.len()
    );

    let aggregated = TopUpAggregator::aggregate(&organizations, &members);
    let totals = TopUpAggregator::calculate_totals(&aggregated);

    let report = render(&aggregated);
    write_report(&settings.output, &report)?;

    Ok(RunSummary {
        totals,
        output: settings.output.clone(),
    })
}

// ── Tests ──────────────────────────────────────────────────────────────────────
