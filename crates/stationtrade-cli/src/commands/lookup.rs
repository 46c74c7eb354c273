use stationtrade_core::{AppConfig, MarketTracker, PriceLookup, TableView};

use crate::cli::LookupArgs;
use crate::error::CliError;

use super::{tracked_notice, CommandResult};

pub async fn run(args: &LookupArgs, config: &AppConfig) -> Result<CommandResult, CliError> {
    let mut tracker = MarketTracker::from_config(config)?;
    track_and_render(&mut tracker, &args.joined_name(), &TableView::new()).await
}

/// Track `name`, then render the whole store through `view`.
pub async fn track_and_render<L: PriceLookup>(
    tracker: &mut MarketTracker<L>,
    name: &str,
    view: &TableView,
) -> Result<CommandResult, CliError> {
    let tracked = tracker.track(name).await?;
    let rows = view.render(tracker.store().rows());
    Ok(CommandResult::table(rows, view.sort_state()).with_notice(tracked_notice(&tracked)))
}
