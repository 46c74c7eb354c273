use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::derive::{profit_potential, station_margin};
use crate::{ObservedAt, ValidationError};

/// Stable item type identifier assigned by the item catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(u64);

impl ItemId {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl Display for ItemId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ItemId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// One row of the ledger: an item and its last observed market snapshot.
///
/// `profit_potential` and `station_margin` are caches of values derived from
/// `min_sell`/`max_buy`; call [`ItemRecord::refresh_derived`] (or
/// [`crate::recompute_derived`]) before relying on them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub name: String,
    pub item_id: ItemId,
    pub min_sell: f64,
    pub max_buy: f64,
    pub profit_potential: f64,
    /// `None` when the margin is undefined (no buy price to divide by).
    pub station_margin: Option<f64>,
    pub buy_volume: u64,
    pub sell_volume: u64,
    pub observed_at: ObservedAt,
}

impl ItemRecord {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: impl Into<String>,
        item_id: ItemId,
        min_sell: f64,
        max_buy: f64,
        buy_volume: u64,
        sell_volume: u64,
        observed_at: ObservedAt,
    ) -> Result<Self, ValidationError> {
        let name = name.into().trim().to_owned();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        validate_price("min_sell", min_sell)?;
        validate_price("max_buy", max_buy)?;

        let mut record = Self {
            name,
            item_id,
            min_sell,
            max_buy,
            profit_potential: 0.0,
            station_margin: None,
            buy_volume,
            sell_volume,
            observed_at,
        };
        record.refresh_derived();
        Ok(record)
    }

    pub fn refresh_derived(&mut self) {
        self.profit_potential = profit_potential(self.min_sell, self.max_buy);
        self.station_margin = station_margin(self.min_sell, self.max_buy);
    }
}

fn validate_price(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteValue { field });
    }
    if value < 0.0 {
        return Err(ValidationError::NegativeValue { field });
    }
    Ok(())
}
