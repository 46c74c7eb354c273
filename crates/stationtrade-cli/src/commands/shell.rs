use std::io::{self, BufRead, Write};

use stationtrade_core::{
    AppConfig, Column, MarketTracker, PriceLookup, TableView, DEFAULT_SUGGESTION_LIMIT,
};
use tracing::debug;

use crate::cli::{parse_column, parse_percentage, OutputFormat};
use crate::error::CliError;
use crate::output;

use super::lookup::track_and_render;
use super::CommandResult;

const HELP: &str = "\
commands:
  lookup <name>        fetch Jita prices for an item and record them
  sort <column>        press a column header (asc, desc, unsorted)
  filter [text]        show rows whose name contains text; no text shows all
  min-margin <pct|off> hide rows below a station margin percentage
  clear                drop the name filter and the margin floor
  show                 print the table
  suggest <text>       suggest catalog item names
  help                 show this help
  quit                 leave the shell
columns: name, id, min-sell, max-buy, profit, margin, buy-volume, sell-volume, time
";

/// One parsed shell line.
#[derive(Debug, Clone, PartialEq)]
pub enum ShellCommand {
    Lookup(String),
    Sort(Column),
    Filter(String),
    MinMargin(Option<f64>),
    Clear,
    Show,
    Suggest(String),
    Help,
    Quit,
    Nothing,
}

pub fn parse_line(line: &str) -> Result<ShellCommand, String> {
    let line = line.trim();
    let (verb, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(verb, rest)| (verb, rest.trim()));

    match verb.to_ascii_lowercase().as_str() {
        "" => Ok(ShellCommand::Nothing),
        "lookup" | "search" if rest.is_empty() => Err(String::from("usage: lookup <name>")),
        "lookup" | "search" => Ok(ShellCommand::Lookup(rest.to_owned())),
        "sort" if rest.is_empty() => Err(String::from("usage: sort <column>")),
        "sort" => parse_column(rest).map(ShellCommand::Sort),
        "filter" => Ok(ShellCommand::Filter(rest.to_owned())),
        "min-margin" => match rest.to_ascii_lowercase().as_str() {
            "" => Err(String::from("usage: min-margin <percent|off>")),
            "off" | "none" => Ok(ShellCommand::MinMargin(None)),
            _ => parse_percentage(rest).map(|fraction| ShellCommand::MinMargin(Some(fraction))),
        },
        "clear" => Ok(ShellCommand::Clear),
        "show" | "table" => Ok(ShellCommand::Show),
        "suggest" => Ok(ShellCommand::Suggest(rest.to_owned())),
        "help" | "?" => Ok(ShellCommand::Help),
        "quit" | "exit" | "q" => Ok(ShellCommand::Quit),
        other => Err(format!("unknown command '{other}', type 'help'")),
    }
}

pub async fn run(
    config: &AppConfig,
    format: OutputFormat,
    pretty: bool,
) -> Result<CommandResult, CliError> {
    let mut tracker = MarketTracker::from_config(config)?;
    let stdin = io::stdin();
    let stdout = io::stdout();
    run_session(&mut tracker, stdin.lock(), &mut stdout.lock(), format, pretty).await?;
    Ok(CommandResult::empty())
}

/// Read commands until `quit` or end of input. Command failures are reported
/// and the session continues; only output errors end it.
pub async fn run_session<L, R, W>(
    tracker: &mut MarketTracker<L>,
    mut reader: R,
    writer: &mut W,
    format: OutputFormat,
    pretty: bool,
) -> Result<(), CliError>
where
    L: PriceLookup,
    R: BufRead,
    W: Write,
{
    let mut view = TableView::new();
    let interactive = format == OutputFormat::Table;
    let mut line = String::new();

    loop {
        if interactive {
            write!(writer, "> ")?;
            writer.flush()?;
        }

        line.clear();
        if reader.read_line(&mut line)? == 0 {
            break;
        }

        let command = match parse_line(&line) {
            Ok(command) => command,
            Err(message) => {
                writeln!(writer, "error: {message}")?;
                continue;
            }
        };
        debug!(?command, "shell command");

        let result = match command {
            ShellCommand::Nothing => continue,
            ShellCommand::Quit => break,
            ShellCommand::Help => {
                write!(writer, "{HELP}")?;
                continue;
            }
            ShellCommand::Lookup(name) => {
                match track_and_render(tracker, &name, &view).await {
                    Ok(result) => result,
                    Err(error) => {
                        writeln!(writer, "error: {error}")?;
                        continue;
                    }
                }
            }
            ShellCommand::Sort(column) => {
                view.press_column(column);
                current_table(tracker, &view)
            }
            ShellCommand::Filter(text) => {
                view.set_name_filter(text);
                current_table(tracker, &view)
            }
            ShellCommand::MinMargin(min_margin) => {
                view.set_min_margin(min_margin);
                current_table(tracker, &view)
            }
            ShellCommand::Clear => {
                view.set_name_filter("");
                view.clear_min_margin();
                current_table(tracker, &view)
            }
            ShellCommand::Show => current_table(tracker, &view),
            ShellCommand::Suggest(text) => CommandResult::suggestions(
                tracker
                    .catalog()
                    .suggest(&text, DEFAULT_SUGGESTION_LIMIT)
                    .into_iter()
                    .map(String::from)
                    .collect(),
            ),
        };

        output::write_result(writer, &result, format, pretty)?;
    }

    Ok(())
}

fn current_table<L: PriceLookup>(tracker: &MarketTracker<L>, view: &TableView) -> CommandResult {
    CommandResult::table(view.render(tracker.store().rows()), view.sort_state())
}
