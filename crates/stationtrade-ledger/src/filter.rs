use crate::derive::{recompute_derived, station_margin};
use crate::ItemRecord;

/// Row predicate: case-insensitive name substring plus optional margin floor.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowFilter {
    pub name_contains: String,
    /// Minimum station margin as a fraction (`0.05` is 5%).
    pub min_margin: Option<f64>,
}

impl RowFilter {
    pub fn new(name_contains: impl Into<String>, min_margin: Option<f64>) -> Self {
        Self {
            name_contains: name_contains.into(),
            min_margin,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name_contains.is_empty() && self.min_margin.is_none()
    }

    pub fn matches(&self, row: &ItemRecord) -> bool {
        let needle = self.name_contains.to_lowercase();
        matches_name(row, &needle) && matches_margin(row, self.min_margin)
    }
}

/// Keep rows matching `name_substring` (and `min_margin`, when set).
///
/// Input order is preserved and the output always carries freshly derived
/// columns. Rows with an undefined margin never pass a margin floor.
pub fn filter(rows: &[ItemRecord], name_substring: &str, min_margin: Option<f64>) -> Vec<ItemRecord> {
    let needle = name_substring.to_lowercase();
    let kept = rows
        .iter()
        .filter(|row| matches_name(row, &needle) && matches_margin(row, min_margin))
        .cloned()
        .collect::<Vec<_>>();
    recompute_derived(&kept)
}

fn matches_name(row: &ItemRecord, lowercase_needle: &str) -> bool {
    lowercase_needle.is_empty() || row.name.to_lowercase().contains(lowercase_needle)
}

fn matches_margin(row: &ItemRecord, min_margin: Option<f64>) -> bool {
    match min_margin {
        None => true,
        Some(floor) => station_margin(row.min_sell, row.max_buy).is_some_and(|margin| margin >= floor),
    }
}
