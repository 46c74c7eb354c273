mod lookup;
mod shell;
mod suggest;
mod table;

use stationtrade_core::{ItemRecord, SortState, TrackedItem, UpsertOutcome};

use crate::cli::{Cli, Command};
use crate::error::CliError;

pub enum CommandData {
    Table { rows: Vec<ItemRecord>, sort: SortState },
    Suggestions(Vec<String>),
    Empty,
}

pub struct CommandResult {
    pub data: CommandData,
    pub notices: Vec<String>,
}

impl CommandResult {
    pub fn table(rows: Vec<ItemRecord>, sort: SortState) -> Self {
        Self {
            data: CommandData::Table { rows, sort },
            notices: Vec::new(),
        }
    }

    pub fn suggestions(names: Vec<String>) -> Self {
        Self {
            data: CommandData::Suggestions(names),
            notices: Vec::new(),
        }
    }

    pub fn empty() -> Self {
        Self {
            data: CommandData::Empty,
            notices: Vec::new(),
        }
    }

    pub fn with_notice(mut self, notice: impl Into<String>) -> Self {
        self.notices.push(notice.into());
        self
    }
}

pub async fn run(cli: &Cli) -> Result<CommandResult, CliError> {
    let config = cli.config();

    match &cli.command {
        Command::Lookup(args) => lookup::run(args, &config).await,
        Command::Table(args) => table::run(args, &config),
        Command::Suggest(args) => suggest::run(args, &config),
        Command::Shell => shell::run(&config, cli.format, cli.pretty).await,
    }
}

fn tracked_notice(tracked: &TrackedItem) -> String {
    let action = match tracked.outcome {
        UpsertOutcome::Inserted => "added",
        UpsertOutcome::Replaced => "updated",
    };
    format!(
        "{} ({}) {action} at {}",
        tracked.record.name, tracked.record.item_id, tracked.record.observed_at
    )
}
