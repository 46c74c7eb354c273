use crate::derive::recompute_derived;
use crate::filter::{filter, RowFilter};
use crate::sort::{Column, SortOrder, SortState};
use crate::ItemRecord;

/// Presentation state for the ledger table.
///
/// The view never mutates the store; [`TableView::render`] derives the visible
/// rows from the store's rows each time.
#[derive(Debug, Clone, Default)]
pub struct TableView {
    filter: RowFilter,
    sort: SortState,
}

impl TableView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn row_filter(&self) -> &RowFilter {
        &self.filter
    }

    pub fn sort_state(&self) -> SortState {
        self.sort
    }

    pub fn set_name_filter(&mut self, text: impl Into<String>) {
        self.filter.name_contains = text.into();
    }

    /// Minimum margin as a fraction; `None` shows every row.
    pub fn set_min_margin(&mut self, min_margin: Option<f64>) {
        self.filter.min_margin = min_margin;
    }

    /// Drop the margin floor. The name filter is kept.
    pub fn clear_min_margin(&mut self) {
        self.filter.min_margin = None;
    }

    /// Press a column header; returns that column's new order.
    pub fn press_column(&mut self, column: Column) -> SortOrder {
        self.sort = self.sort.advance(column);
        self.sort.order_of(column)
    }

    /// Visible rows for `store_rows` (given in store order).
    pub fn render(&self, store_rows: &[ItemRecord]) -> Vec<ItemRecord> {
        let ordered = self.sort.apply(&recompute_derived(store_rows));
        filter(
            &ordered,
            &self.filter.name_contains,
            self.filter.min_margin,
        )
    }
}
