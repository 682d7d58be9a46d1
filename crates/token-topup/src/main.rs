mod bootstrap;
mod pipeline;

use anyhow::Result;
use topup_core::settings::Settings;

fn main() -> Result<()> {
    let settings = Settings::load();

    bootstrap::setup_logging(&settings.log_level)?;

    tracing::info!("Token top-up v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Organizations: {}, Members: {}, Output: {}",
        settings.organizations.display(),
        settings.members.display(),
        settings.output.display()
    );

    let summary = pipeline::run(&settings)?;

    tracing::info!(
        "Topped up {} members across {} organizations ({} emailed, {} not emailed), {} tokens; report written to {}",
        summary.totals.members,
        summary.totals.organizations,
        summary.totals.notified,
        summary.totals.not_notified,
        summary.totals.tokens,
        summary.output.display()
    );

    Ok(())
}
