//! CLI argument definitions for stationtrade.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `lookup` | Fetch Jita prices for an item and record them |
//! | `table` | Print the recorded table, filtered and sorted |
//! | `suggest` | Suggest catalog item names |
//! | `shell` | Interactive session with a persistent view and price cache |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--format` | `table` | Output format (table, json) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--verbose` | `false` | Debug logging on stderr |
//! | `--catalog` | `item_ids.csv` | Item catalog file |
//! | `--ledger` | `saved_market_data.csv` | Recorded market data file |
//! | `--timeout-ms` | `10000` | ESI request timeout in ms |
//!
//! Market Data Time values are recorded and printed in UTC.
//!
//! # Examples
//!
//! ```bash
//! stationtrade lookup Tritanium
//! stationtrade table --filter veld --min-margin 5 --sort margin --sort margin
//! stationtrade suggest veld --limit 5
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use stationtrade_core::{AppConfig, Column, DEFAULT_SUGGESTION_LIMIT};

/// Jita station trading helper.
///
/// Looks up The Forge order books on ESI, keeps a local table of items with
/// their station margin and lets you filter and sort it.
#[derive(Debug, Parser)]
#[command(
    name = "stationtrade",
    author,
    version,
    about = "EVE Online station trading helper",
    after_help = "Market Data Time values are recorded and printed in UTC (YYYY-MM-DD HH:MM)."
)]
pub struct Cli {
    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Log debug events to stderr.
    #[arg(long, short, global = true, default_value_t = false)]
    pub verbose: bool,

    /// Item catalog CSV (name, id). Overrides STATIONTRADE_CATALOG.
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    /// Recorded market data CSV. Overrides STATIONTRADE_LEDGER.
    #[arg(long, global = true)]
    pub ledger: Option<PathBuf>,

    /// ESI request timeout in milliseconds. Overrides STATIONTRADE_TIMEOUT_MS.
    #[arg(long, global = true, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_ms: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Environment configuration with command-line overrides applied.
    pub fn config(&self) -> AppConfig {
        let mut config = AppConfig::from_env();
        if let Some(path) = &self.catalog {
            config = config.with_catalog_path(path);
        }
        if let Some(path) = &self.ledger {
            config = config.with_ledger_path(path);
        }
        if let Some(timeout_ms) = self.timeout_ms {
            config = config.with_timeout_ms(timeout_ms);
        }
        config
    }
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned text table for terminal display.
    Table,
    /// Single JSON object output.
    Json,
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch an item's Jita prices and record them.
    ///
    ///   stationtrade lookup Tritanium
    ///   stationtrade lookup compressed veldspar
    Lookup(LookupArgs),

    /// Print the recorded table.
    ///
    /// Each --sort is one press of that column's header: ascending, then
    /// descending, then back to unsorted.
    ///
    ///   stationtrade table --sort margin
    ///   stationtrade table --filter ore --min-margin 2.5
    Table(TableArgs),

    /// Suggest catalog item names containing the given text.
    Suggest(SuggestArgs),

    /// Interactive session; type `help` for commands.
    Shell,
}

#[derive(Debug, Args)]
pub struct LookupArgs {
    /// Item name; multiple words are joined with spaces.
    #[arg(required = true, num_args = 1..)]
    pub name: Vec<String>,
}

impl LookupArgs {
    pub fn joined_name(&self) -> String {
        self.name.join(" ")
    }
}

#[derive(Debug, Args)]
pub struct TableArgs {
    /// Keep rows whose name contains this text (case-insensitive).
    #[arg(long)]
    pub filter: Option<String>,

    /// Keep rows with a station margin of at least this percentage (0-100).
    #[arg(long, value_parser = parse_percentage)]
    pub min_margin: Option<f64>,

    /// Column header to press; repeat to cycle.
    #[arg(long, value_parser = parse_column)]
    pub sort: Vec<Column>,
}

#[derive(Debug, Args)]
pub struct SuggestArgs {
    /// Partial item name.
    pub text: String,

    /// Maximum number of suggestions.
    #[arg(long, default_value_t = DEFAULT_SUGGESTION_LIMIT)]
    pub limit: usize,
}

pub fn parse_column(raw: &str) -> Result<Column, String> {
    Column::parse(raw).ok_or_else(|| {
        let keys = Column::ALL
            .iter()
            .map(|column| column.key())
            .collect::<Vec<_>>()
            .join(", ");
        format!("unknown column '{raw}', expected one of: {keys}")
    })
}

/// Percentage in `[0, 100]`, returned as a fraction.
pub fn parse_percentage(raw: &str) -> Result<f64, String> {
    let value = raw
        .trim()
        .trim_end_matches('%')
        .parse::<f64>()
        .map_err(|_| format!("'{raw}' is not a number"))?;
    if !(0.0..=100.0).contains(&value) {
        return Err(format!("'{raw}' must be between 0 and 100"));
    }
    Ok(value / 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn help_states_that_times_are_utc() {
        let help = Cli::command().render_help().to_string();
        assert!(help.contains("in UTC"), "{help}");
    }

    #[test]
    fn percentage_is_converted_to_a_fraction() {
        assert_eq!(parse_percentage("5"), Ok(0.05));
        assert_eq!(parse_percentage("12.5%"), Ok(0.125));
        assert!(parse_percentage("101").is_err());
        assert!(parse_percentage("-1").is_err());
        assert!(parse_percentage("lots").is_err());
    }

    #[test]
    fn sort_flags_repeat() {
        let cli = Cli::try_parse_from([
            "stationtrade",
            "table",
            "--sort",
            "margin",
            "--sort",
            "margin",
        ])
        .expect("arguments should parse");
        match cli.command {
            Command::Table(args) => assert_eq!(args.sort, vec![Column::StationMargin; 2]),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn lookup_joins_words() {
        let cli = Cli::try_parse_from(["stationtrade", "lookup", "Compressed", "Veldspar"])
            .expect("arguments should parse");
        match cli.command {
            Command::Lookup(args) => assert_eq!(args.joined_name(), "Compressed Veldspar"),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn unknown_sort_column_is_rejected() {
        assert!(Cli::try_parse_from(["stationtrade", "table", "--sort", "colour"]).is_err());
    }
}
