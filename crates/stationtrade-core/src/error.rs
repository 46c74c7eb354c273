use std::fmt::{Display, Formatter};

use stationtrade_ledger::{ItemId, LedgerError};
use thiserror::Error;

use crate::market::{LookupError, MissingSide};

/// Errors raised while loading the item catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error("catalog is missing the '{column}' column")]
    MissingColumn { column: &'static str },

    #[error("catalog data row {row} is malformed: {reason}")]
    MalformedRow { row: u64, reason: String },
}

/// Why market data for an item could not be used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarketDataReason {
    /// The lookup succeeded but one or both sides of the book were empty.
    NoStandingOrders(MissingSide),
    /// The lookup itself failed.
    Upstream(LookupError),
}

impl Display for MarketDataReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoStandingOrders(side) => write!(f, "{side}"),
            Self::Upstream(error) => write!(f, "{error}"),
        }
    }
}

/// Errors from the "look up an item and record it" use case.
#[derive(Debug, Error)]
pub enum TrackError {
    #[error("item name cannot be empty")]
    EmptyQuery,

    #[error("item not found: '{name}'")]
    UnknownItem { name: String },

    #[error("market data not found for '{name}' ({item_id}): {reason}")]
    MarketDataNotFound {
        name: String,
        item_id: ItemId,
        reason: MarketDataReason,
    },

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

/// Start-up errors when assembling the tracker from configuration.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("failed to load item catalog: {0}")]
    Catalog(#[from] CatalogError),

    #[error("failed to load ledger: {0}")]
    Ledger(#[from] LedgerError),
}
