use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::app::App;
use crate::error::CliError;

use super::display::log_done;

/// Wipe and repopulate the backend with demo data.
pub(crate) fn run_seed(app: &App, yes: bool) -> Result<(), CliError> {
    if !yes {
        log::warn!(
            "Seeding deletes every game, user, review and purchase on {}",
            app.client.base_url()
        );
        return Err(CliError::usage("Re-run with --yes to seed the database"));
    }

    let report = app.run("Seeding database...", app.client.seed_database())?;
    log_done(&report.message);
    for (collection, count) in &report.counts {
        log::info!(
            "  {:<12} {}",
            collection,
            count.if_supports_color(Stdout, |t| t.cyan())
        );
    }
    Ok(())
}
