use std::io::{self, Write};

use serde_json::{json, Value};
use stationtrade_core::{Column, ItemRecord, SortState};

use crate::cli::OutputFormat;
use crate::commands::{CommandData, CommandResult};
use crate::error::CliError;

pub fn render(result: &CommandResult, format: OutputFormat, pretty: bool) -> Result<(), CliError> {
    if matches!(result.data, CommandData::Empty) && result.notices.is_empty() {
        return Ok(());
    }
    let stdout = io::stdout();
    write_result(&mut stdout.lock(), result, format, pretty)
}

pub fn write_result<W: Write>(
    writer: &mut W,
    result: &CommandResult,
    format: OutputFormat,
    pretty: bool,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => {
            let value = to_json(result)?;
            let payload = if pretty {
                serde_json::to_string_pretty(&value)?
            } else {
                serde_json::to_string(&value)?
            };
            writeln!(writer, "{payload}")?;
        }
        OutputFormat::Table => write!(writer, "{}", render_text(result))?,
    }

    writer.flush()?;
    Ok(())
}

pub fn to_json(result: &CommandResult) -> Result<Value, CliError> {
    let mut value = match &result.data {
        CommandData::Table { rows, sort } => json!({
            "rows": serde_json::to_value(rows)?,
            "sort": sort
                .active()
                .map(|(column, order)| json!({ "column": column, "order": order })),
        }),
        CommandData::Suggestions(names) => json!({ "suggestions": names }),
        CommandData::Empty => json!({}),
    };
    value["notices"] = json!(result.notices);
    Ok(value)
}

pub fn render_text(result: &CommandResult) -> String {
    let mut out = String::new();
    for notice in &result.notices {
        out.push_str(notice);
        out.push('\n');
    }
    match &result.data {
        CommandData::Table { rows, sort } => out.push_str(&render_table(rows, *sort)),
        CommandData::Suggestions(names) if names.is_empty() => out.push_str("no suggestions\n"),
        CommandData::Suggestions(names) => {
            for name in names {
                out.push_str(name);
                out.push('\n');
            }
        }
        CommandData::Empty => {}
    }
    out
}

/// Aligned text table with a sort arrow on the active column header.
pub fn render_table(rows: &[ItemRecord], sort: SortState) -> String {
    let headers: Vec<String> = Column::ALL
        .iter()
        .map(|&column| format!("{}{}", column.header(), sort.order_of(column).arrow()))
        .collect();
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| Column::ALL.iter().map(|&column| cell(row, column)).collect())
        .collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for line in &cells {
        for (width, value) in widths.iter_mut().zip(line) {
            *width = (*width).max(value.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, &headers, &widths);
    let rule: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
    push_line(&mut out, &rule, &widths);
    for line in &cells {
        push_line(&mut out, line, &widths);
    }
    if rows.is_empty() {
        out.push_str("(no rows)\n");
    }
    out
}

fn push_line(out: &mut String, values: &[String], widths: &[usize]) {
    let line = Column::ALL
        .iter()
        .zip(values.iter().zip(widths))
        .map(|(&column, (value, &width))| {
            let pad = width.saturating_sub(value.chars().count());
            if column == Column::ItemName {
                format!("{value}{}", " ".repeat(pad))
            } else {
                format!("{}{value}", " ".repeat(pad))
            }
        })
        .collect::<Vec<_>>()
        .join("  ");
    out.push_str(line.trim_end());
    out.push('\n');
}

fn cell(row: &ItemRecord, column: Column) -> String {
    match column {
        Column::ItemName => row.name.clone(),
        Column::ItemId => row.item_id.to_string(),
        Column::MinSell => format_isk(row.min_sell),
        Column::MaxBuy => format_isk(row.max_buy),
        Column::ProfitPotential => format_isk(row.profit_potential),
        Column::StationMargin => format_margin(row.station_margin),
        Column::BuyVolume => group_thousands(&row.buy_volume.to_string()),
        Column::SellVolume => group_thousands(&row.sell_volume.to_string()),
        Column::ObservedAt => row.observed_at.to_string(),
    }
}

/// `1234.5` -> `1,234.50 ISK`.
pub fn format_isk(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{sign}{}.{fraction} ISK", group_thousands(whole))
}

/// Fraction as a percentage with two decimals; `n/a` when undefined.
pub fn format_margin(margin: Option<f64>) -> String {
    match margin {
        Some(value) => format!("{:.2}%", value * 100.0),
        None => String::from("n/a"),
    }
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use stationtrade_core::{ItemId, ObservedAt};

    fn tritanium() -> ItemRecord {
        ItemRecord::new(
            "Tritanium",
            ItemId::new(34),
            5.20,
            5.00,
            1_000_000,
            500_000,
            ObservedAt::parse("2024-01-15 09:30").expect("valid timestamp"),
        )
        .expect("valid record")
    }

    #[test]
    fn isk_amounts_are_grouped_with_two_decimals() {
        assert_eq!(format_isk(1234.5), "1,234.50 ISK");
        assert_eq!(format_isk(0.2), "0.20 ISK");
        assert_eq!(format_isk(1_000_000.0), "1,000,000.00 ISK");
        assert_eq!(format_isk(-1500.0), "-1,500.00 ISK");
        assert_eq!(format_isk(-0.001), "0.00 ISK");
    }

    #[test]
    fn margin_is_a_percentage_or_na() {
        assert_eq!(format_margin(Some(0.04)), "4.00%");
        assert_eq!(format_margin(Some(0.125)), "12.50%");
        assert_eq!(format_margin(None), "n/a");
    }

    #[test]
    fn volumes_are_grouped() {
        assert_eq!(group_thousands("1000000"), "1,000,000");
        assert_eq!(group_thousands("999"), "999");
        assert_eq!(group_thousands("1000"), "1,000");
    }

    #[test]
    fn table_marks_the_sorted_column() {
        let sort = SortState::unsorted().advance(Column::StationMargin);
        let table = render_table(&[tritanium()], sort);
        let mut lines = table.lines();

        let header = lines.next().expect("header line");
        assert!(header.contains("Station Margin \u{25B2}"));
        assert!(!header.contains('\u{25BC}'));

        let row = lines.nth(1).expect("data row");
        assert!(row.starts_with("Tritanium"));
        assert!(row.contains("5.20 ISK"));
        assert!(row.contains("4.00%"));
        assert!(row.contains("1,000,000"));
        assert!(row.contains("2024-01-15 09:30"));
    }

    #[test]
    fn json_payload_carries_rows_sort_and_notices() {
        let result = CommandResult::table(vec![tritanium()], SortState::unsorted())
            .with_notice("Tritanium recorded");
        let value = to_json(&result).expect("serializable");

        assert_eq!(value["rows"][0]["name"], "Tritanium");
        assert_eq!(value["rows"][0]["item_id"], 34);
        assert!(value["sort"].is_null());
        assert_eq!(value["notices"][0], "Tritanium recorded");
    }
}
