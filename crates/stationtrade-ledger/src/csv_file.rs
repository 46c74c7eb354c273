//! Flat CSV persistence.
//!
//! The file is human-readable and rewritten in full on every change. Columns
//! follow [`Column::ALL`]. Derived columns are written for readability but
//! ignored on read; they are recomputed from the prices.

use std::fs;
use std::path::Path;

use csv::{ReaderBuilder, Trim, WriterBuilder};
use serde::{Deserialize, Serialize};

use crate::sort::Column;
use crate::{ItemId, ItemRecord, LedgerError, ObservedAt, ValidationError};

#[derive(Debug, Deserialize)]
struct StoredRow {
    #[serde(rename = "Item Name")]
    name: String,
    // Numeric columns may come back as integral floats ("34.0").
    #[serde(rename = "Item ID")]
    item_id: f64,
    #[serde(rename = "Minimum Sell Order")]
    min_sell: f64,
    #[serde(rename = "Maximum Buy Order")]
    max_buy: f64,
    #[serde(rename = "Total Buy Volume")]
    buy_volume: f64,
    #[serde(rename = "Total Sell Volume")]
    sell_volume: f64,
    #[serde(rename = "Market Data Time")]
    observed_at: String,
}

impl StoredRow {
    fn into_record(self) -> Result<ItemRecord, ValidationError> {
        ItemRecord::new(
            self.name,
            ItemId::new(whole_number("item_id", self.item_id)?),
            self.min_sell,
            self.max_buy,
            whole_number("buy_volume", self.buy_volume)?,
            whole_number("sell_volume", self.sell_volume)?,
            ObservedAt::parse(&self.observed_at)?,
        )
    }
}

#[derive(Debug, Serialize)]
struct RowOut<'a> {
    name: &'a str,
    item_id: u64,
    min_sell: f64,
    max_buy: f64,
    profit_potential: f64,
    station_margin: Option<f64>,
    buy_volume: u64,
    sell_volume: u64,
    observed_at: String,
}

impl<'a> From<&'a ItemRecord> for RowOut<'a> {
    fn from(record: &'a ItemRecord) -> Self {
        Self {
            name: &record.name,
            item_id: record.item_id.get(),
            min_sell: record.min_sell,
            max_buy: record.max_buy,
            profit_potential: record.profit_potential,
            station_margin: record.station_margin,
            buy_volume: record.buy_volume,
            sell_volume: record.sell_volume,
            observed_at: record.observed_at.to_string(),
        }
    }
}

/// Read every record from `path`, in file order.
pub fn read_records(path: &Path) -> Result<Vec<ItemRecord>, LedgerError> {
    let mut reader = ReaderBuilder::new().trim(Trim::All).from_path(path)?;
    let mut records = Vec::new();

    for (index, result) in reader.deserialize::<StoredRow>().enumerate() {
        let stored = result?;
        let record = stored
            .into_record()
            .map_err(|source| LedgerError::MalformedRow {
                path: path.to_path_buf(),
                row: index as u64 + 1,
                source,
            })?;
        records.push(record);
    }

    Ok(records)
}

/// Rewrite `path` with the header and `rows`. Not atomic.
pub fn write_records(path: &Path, rows: &[ItemRecord]) -> Result<(), LedgerError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut writer = WriterBuilder::new().has_headers(false).from_path(path)?;
    writer.write_record(Column::ALL.iter().map(|column| column.header()))?;
    for row in rows {
        writer.serialize(RowOut::from(row))?;
    }
    writer.flush()?;
    Ok(())
}

fn whole_number(field: &'static str, value: f64) -> Result<u64, ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteValue { field });
    }
    if value < 0.0 {
        return Err(ValidationError::NegativeValue { field });
    }
    if value.fract() != 0.0 {
        return Err(ValidationError::FractionalValue { field });
    }
    // u64::MAX rounds up to 2^64 as f64, so the bound is exclusive.
    if value >= u64::MAX as f64 {
        return Err(ValidationError::OutOfRange { field });
    }
    Ok(value as u64)
}
