//! Market price lookup.

mod esi;

use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;

use serde::Serialize;
use stationtrade_ledger::ItemId;

pub use esi::EsiMarketSource;

/// Best prices and total remaining volume at the tracked station.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MarketSnapshot {
    pub highest_buy: Option<f64>,
    pub lowest_sell: Option<f64>,
    pub buy_volume: u64,
    pub sell_volume: u64,
}

impl MarketSnapshot {
    pub const fn empty() -> Self {
        Self {
            highest_buy: None,
            lowest_sell: None,
            buy_volume: 0,
            sell_volume: 0,
        }
    }

    /// Which side of the book had no standing order, if any.
    pub const fn missing_side(&self) -> Option<MissingSide> {
        match (self.highest_buy, self.lowest_sell) {
            (Some(_), Some(_)) => None,
            (None, Some(_)) => Some(MissingSide::Buy),
            (Some(_), None) => Some(MissingSide::Sell),
            (None, None) => Some(MissingSide::Both),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingSide {
    Buy,
    Sell,
    Both,
}

impl Display for MissingSide {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Buy => "no standing buy orders",
            Self::Sell => "no standing sell orders",
            Self::Both => "no standing orders",
        })
    }
}

/// Lookup failure classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupErrorKind {
    /// Transport failure or non-success status.
    Upstream,
    /// The upstream answered with a body we could not understand.
    Decode,
}

/// Structured price lookup error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupError {
    kind: LookupErrorKind,
    message: String,
}

impl LookupError {
    pub fn upstream(message: impl Into<String>) -> Self {
        Self {
            kind: LookupErrorKind::Upstream,
            message: message.into(),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self {
            kind: LookupErrorKind::Decode,
            message: message.into(),
        }
    }

    pub const fn kind(&self) -> LookupErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            LookupErrorKind::Upstream => "lookup.upstream",
            LookupErrorKind::Decode => "lookup.decode",
        }
    }
}

impl Display for LookupError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for LookupError {}

/// Source of market snapshots keyed by item id.
pub trait PriceLookup: Send + Sync {
    fn snapshot<'a>(
        &'a self,
        item_id: ItemId,
    ) -> Pin<Box<dyn Future<Output = Result<MarketSnapshot, LookupError>> + Send + 'a>>;
}
