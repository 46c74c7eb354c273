use stationtrade_core::{AppConfig, RecordStore, TableView};

use crate::cli::TableArgs;
use crate::error::CliError;

use super::CommandResult;

pub fn run(args: &TableArgs, config: &AppConfig) -> Result<CommandResult, CliError> {
    let store = RecordStore::open(config.ledger_path.clone())?;
    let view = view_for(args);
    Ok(CommandResult::table(
        view.render(store.rows()),
        view.sort_state(),
    ))
}

fn view_for(args: &TableArgs) -> TableView {
    let mut view = TableView::new();
    if let Some(text) = &args.filter {
        view.set_name_filter(text.trim());
    }
    view.set_min_margin(args.min_margin);
    for &column in &args.sort {
        view.press_column(column);
    }
    view
}
