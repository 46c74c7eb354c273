use stationtrade_core::{AppConfig, ItemCatalog};

use crate::cli::SuggestArgs;
use crate::error::CliError;

use super::CommandResult;

pub fn run(args: &SuggestArgs, config: &AppConfig) -> Result<CommandResult, CliError> {
    let catalog = ItemCatalog::load(&config.catalog_path)?;
    let names = catalog
        .suggest(&args.text, args.limit)
        .into_iter()
        .map(String::from)
        .collect();
    Ok(CommandResult::suggestions(names))
}
