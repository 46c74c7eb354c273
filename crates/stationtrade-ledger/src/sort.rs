//! Per-column three-state sort cycle.
//!
//! Pressing a column cycles it `Unsorted -> Ascending -> Descending ->
//! Unsorted`. Only one column is sorted at a time; pressing a different
//! column starts that column at `Ascending` and resets the rest.

use std::cmp::Ordering;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::derive::{profit_potential, station_margin};
use crate::ItemRecord;

/// Ledger columns, in persisted/display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    ItemName,
    ItemId,
    MinSell,
    MaxBuy,
    ProfitPotential,
    StationMargin,
    BuyVolume,
    SellVolume,
    ObservedAt,
}

impl Column {
    pub const ALL: [Column; 9] = [
        Self::ItemName,
        Self::ItemId,
        Self::MinSell,
        Self::MaxBuy,
        Self::ProfitPotential,
        Self::StationMargin,
        Self::BuyVolume,
        Self::SellVolume,
        Self::ObservedAt,
    ];

    /// Header used both in the CSV file and in rendered tables.
    pub const fn header(self) -> &'static str {
        match self {
            Self::ItemName => "Item Name",
            Self::ItemId => "Item ID",
            Self::MinSell => "Minimum Sell Order",
            Self::MaxBuy => "Maximum Buy Order",
            Self::ProfitPotential => "Profit Potential",
            Self::StationMargin => "Station Margin",
            Self::BuyVolume => "Total Buy Volume",
            Self::SellVolume => "Total Sell Volume",
            Self::ObservedAt => "Market Data Time",
        }
    }

    /// Short key accepted on the command line.
    pub const fn key(self) -> &'static str {
        match self {
            Self::ItemName => "name",
            Self::ItemId => "id",
            Self::MinSell => "min-sell",
            Self::MaxBuy => "max-buy",
            Self::ProfitPotential => "profit",
            Self::StationMargin => "margin",
            Self::BuyVolume => "buy-volume",
            Self::SellVolume => "sell-volume",
            Self::ObservedAt => "time",
        }
    }

    /// Match a short key or a full header, case-insensitively.
    pub fn parse(input: &str) -> Option<Self> {
        let needle = input.trim();
        Self::ALL.into_iter().find(|column| {
            column.key().eq_ignore_ascii_case(needle) || column.header().eq_ignore_ascii_case(needle)
        })
    }
}

impl Display for Column {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.header())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Unsorted,
    Ascending,
    Descending,
}

impl SortOrder {
    pub const fn next(self) -> Self {
        match self {
            Self::Unsorted => Self::Ascending,
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Unsorted,
        }
    }

    /// Header decoration for the order.
    pub const fn arrow(self) -> &'static str {
        match self {
            Self::Unsorted => "",
            Self::Ascending => " \u{25B2}",
            Self::Descending => " \u{25BC}",
        }
    }
}

/// Sort state of the whole table: at most one active column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortState {
    active: Option<(Column, SortOrder)>,
}

impl SortState {
    pub const fn unsorted() -> Self {
        Self { active: None }
    }

    pub fn active(&self) -> Option<(Column, SortOrder)> {
        self.active
    }

    pub fn order_of(&self, column: Column) -> SortOrder {
        match self.active {
            Some((active, order)) if active == column => order,
            _ => SortOrder::Unsorted,
        }
    }

    /// State after pressing `column` once.
    pub fn advance(self, column: Column) -> Self {
        match self.order_of(column).next() {
            SortOrder::Unsorted => Self::unsorted(),
            order => Self {
                active: Some((column, order)),
            },
        }
    }

    /// Order `rows` according to this state.
    ///
    /// `rows` must be in store order; `Unsorted` returns them unchanged.
    pub fn apply(&self, rows: &[ItemRecord]) -> Vec<ItemRecord> {
        let mut ordered = rows.to_vec();
        match self.active {
            Some((column, SortOrder::Ascending)) => {
                ordered.sort_by(|a, b| compare(column, a, b, false));
            }
            Some((column, SortOrder::Descending)) => {
                ordered.sort_by(|a, b| compare(column, a, b, true));
            }
            Some((_, SortOrder::Unsorted)) | None => {}
        }
        ordered
    }
}

/// Press `column` on a table in `state` and return the reordered rows.
pub fn sort(rows: &[ItemRecord], column: Column, state: SortState) -> (Vec<ItemRecord>, SortState) {
    let next = state.advance(column);
    (next.apply(rows), next)
}

// `sort_by` is stable, so reversing the comparator (rather than the output)
// keeps ties in input order for descending sorts too.
fn compare(column: Column, a: &ItemRecord, b: &ItemRecord, descending: bool) -> Ordering {
    let directed = |ordering: Ordering| {
        if descending {
            ordering.reverse()
        } else {
            ordering
        }
    };

    match column {
        Column::ItemName => directed(a.name.to_lowercase().cmp(&b.name.to_lowercase())),
        Column::ItemId => directed(a.item_id.cmp(&b.item_id)),
        Column::MinSell => directed(a.min_sell.total_cmp(&b.min_sell)),
        Column::MaxBuy => directed(a.max_buy.total_cmp(&b.max_buy)),
        Column::ProfitPotential => directed(
            profit_potential(a.min_sell, a.max_buy)
                .total_cmp(&profit_potential(b.min_sell, b.max_buy)),
        ),
        // Undefined margins go last in both directions.
        Column::StationMargin => match (
            station_margin(a.min_sell, a.max_buy),
            station_margin(b.min_sell, b.max_buy),
        ) {
            (Some(left), Some(right)) => directed(left.total_cmp(&right)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
        Column::BuyVolume => directed(a.buy_volume.cmp(&b.buy_volume)),
        Column::SellVolume => directed(a.sell_volume.cmp(&b.sell_volume)),
        Column::ObservedAt => directed(a.observed_at.cmp(&b.observed_at)),
    }
}
