//! Derived columns.
//!
//! Both values are pure functions of `min_sell` and `max_buy` and are never
//! treated as stored truth.

use crate::ItemRecord;

/// Spread captured by buying at the best bid and selling at the best ask.
pub fn profit_potential(min_sell: f64, max_buy: f64) -> f64 {
    min_sell - max_buy
}

/// Profit potential as a fraction of the buy price.
///
/// Returns `None` when the margin is undefined: a zero buy price, or any
/// non-finite result.
pub fn station_margin(min_sell: f64, max_buy: f64) -> Option<f64> {
    if max_buy == 0.0 {
        return None;
    }
    let margin = profit_potential(min_sell, max_buy) / max_buy;
    margin.is_finite().then_some(margin)
}

/// Recompute both derived columns for every row.
pub fn recompute_derived(rows: &[ItemRecord]) -> Vec<ItemRecord> {
    rows.iter()
        .cloned()
        .map(|mut row| {
            row.refresh_derived();
            row
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ItemId, ObservedAt};

    fn row(name: &str, id: u64, min_sell: f64, max_buy: f64) -> ItemRecord {
        let observed = ObservedAt::parse("2023-05-01 12:00").expect("valid timestamp");
        ItemRecord::new(name, ItemId::new(id), min_sell, max_buy, 1, 1, observed)
            .expect("valid record")
    }

    #[test]
    fn zero_buy_price_yields_undefined_margin() {
        assert_eq!(station_margin(10.0, 0.0), None);
        assert_eq!(station_margin(0.0, 0.0), None);
        assert_eq!(profit_potential(10.0, 0.0), 10.0);
    }

    #[test]
    fn negative_spread_yields_negative_margin() {
        let margin = station_margin(90.0, 100.0).expect("defined");
        assert!((margin + 0.1).abs() < 1e-12);
    }

    #[test]
    fn recompute_overwrites_stale_values() {
        let mut stale = row("Mexallon", 36, 50.0, 40.0);
        stale.profit_potential = 999.0;
        stale.station_margin = None;

        let fresh = recompute_derived(&[stale]);
        assert_eq!(fresh[0].profit_potential, 10.0);
        assert_eq!(fresh[0].station_margin, Some(0.25));
    }

    #[test]
    fn recompute_is_idempotent() {
        let rows = vec![
            row("Tritanium", 34, 5.2, 5.0),
            row("Pyerite", 35, 12.0, 0.0),
            row("Isogen", 37, 80.0, 95.5),
        ];

        let once = recompute_derived(&rows);
        let twice = recompute_derived(&once);
        assert_eq!(once, twice);
        for row in &once {
            assert_eq!(row.profit_potential, row.min_sell - row.max_buy);
        }
    }
}
