//! Behaviour tests for the record store and table view.
//!
//! These tests describe what a user sees in the table across restarts,
//! re-lookups, filters and header presses.

use stationtrade_ledger::{
    filter, recompute_derived, sort, Column, ItemId, ItemRecord, ObservedAt, RecordStore,
    SortOrder, SortState, TableView, UpsertOutcome,
};
use std::fs;
use tempfile::tempdir;

fn observed(at: &str) -> ObservedAt {
    ObservedAt::parse(at).expect("valid timestamp")
}

fn record(name: &str, id: u64, min_sell: f64, max_buy: f64) -> ItemRecord {
    ItemRecord::new(
        name,
        ItemId::new(id),
        min_sell,
        max_buy,
        10,
        20,
        observed("2024-03-01 18:05"),
    )
    .expect("valid record")
}

fn names(rows: &[ItemRecord]) -> Vec<&str> {
    rows.iter().map(|row| row.name.as_str()).collect()
}

// =============================================================================
// Record Store: upsert and persistence
// =============================================================================

#[test]
fn when_user_looks_up_an_item_twice_the_table_keeps_one_row_with_the_latest_prices() {
    let mut store = RecordStore::in_memory();

    assert_eq!(
        store.upsert(record("Tritanium", 34, 5.20, 5.00)).expect("upsert"),
        UpsertOutcome::Inserted
    );
    store.upsert(record("Pyerite", 35, 11.0, 10.0)).expect("upsert");
    assert_eq!(
        store.upsert(record("Tritanium", 34, 6.00, 5.50)).expect("upsert"),
        UpsertOutcome::Replaced
    );

    assert_eq!(names(store.rows()), vec!["Tritanium", "Pyerite"]);
    let tritanium = store.get(ItemId::new(34)).expect("row present");
    assert_eq!(tritanium.min_sell, 6.00);
    assert_eq!(tritanium.max_buy, 5.50);
    assert!((tritanium.profit_potential - 0.50).abs() < 1e-9);
}

#[test]
fn when_user_restarts_the_tool_the_saved_table_comes_back_in_order() {
    let temp = tempdir().expect("tempdir");
    let path = temp.path().join("saved_market_data.csv");

    {
        let mut store = RecordStore::open(&path).expect("open empty store");
        assert!(store.is_empty());
        store.upsert(record("Tritanium", 34, 5.20, 5.00)).expect("upsert");
        store.upsert(record("Mexallon", 36, 50.0, 0.0)).expect("upsert");
    }

    let reopened = RecordStore::open(&path).expect("reopen store");
    assert_eq!(names(reopened.rows()), vec!["Tritanium", "Mexallon"]);
    let mexallon = reopened.get(ItemId::new(36)).expect("row present");
    assert_eq!(mexallon.station_margin, None);
    assert_eq!(mexallon.observed_at.to_string(), "2024-03-01 18:05");
}

#[test]
fn when_the_store_is_written_the_file_has_the_fixed_column_order() {
    let temp = tempdir().expect("tempdir");
    let path = temp.path().join("nested").join("saved_market_data.csv");

    let mut store = RecordStore::open(&path).expect("open");
    store.upsert(record("Mexallon", 36, 50.0, 0.0)).expect("upsert");

    let contents = fs::read_to_string(&path).expect("file written through");
    let mut lines = contents.lines();
    assert_eq!(
        lines.next(),
        Some("Item Name,Item ID,Minimum Sell Order,Maximum Buy Order,Profit Potential,Station Margin,Total Buy Volume,Total Sell Volume,Market Data Time")
    );
    // Undefined margin is an empty cell.
    assert_eq!(lines.next(), Some("Mexallon,36,50.0,0.0,50.0,,10,20,2024-03-01 18:05"));
}

#[test]
fn when_the_saved_file_has_float_volumes_and_stale_derived_columns_they_are_repaired() {
    let temp = tempdir().expect("tempdir");
    let path = temp.path().join("saved_market_data.csv");
    fs::write(
        &path,
        "Item Name,Item ID,Minimum Sell Order,Maximum Buy Order,Profit Potential,Station Margin,Total Buy Volume,Total Sell Volume,Market Data Time\n\
         Tritanium,34.0,5.2,5.0,999,999,1000000.0,500000.0,2024-03-01 18:05\n",
    )
    .expect("fixture written");

    let store = RecordStore::open(&path).expect("open");
    let row = &store.rows()[0];
    assert_eq!(row.item_id, ItemId::new(34));
    assert_eq!(row.buy_volume, 1_000_000);
    assert!((row.profit_potential - 0.2).abs() < 1e-9);
    assert!((row.station_margin.expect("defined margin") - 0.04).abs() < 1e-9);
}

#[test]
fn when_the_saved_file_is_corrupt_opening_reports_the_row() {
    let temp = tempdir().expect("tempdir");
    let path = temp.path().join("saved_market_data.csv");
    fs::write(
        &path,
        "Item Name,Item ID,Minimum Sell Order,Maximum Buy Order,Profit Potential,Station Margin,Total Buy Volume,Total Sell Volume,Market Data Time\n\
         Tritanium,34,5.2,5.0,0.2,0.04,10,20,yesterday\n",
    )
    .expect("fixture written");

    let err = RecordStore::open(&path).expect_err("must fail");
    assert!(err.to_string().contains("data row 1"), "{err}");
}

#[test]
fn when_saving_fails_the_table_stays_as_it_was_on_disk() {
    let temp = tempdir().expect("tempdir");
    let path = temp.path().join("saved_market_data.csv");
    let mut store = RecordStore::open(&path).expect("open");
    store.upsert(record("Tritanium", 34, 5.20, 5.00)).expect("upsert");

    fs::remove_file(&path).expect("ledger removed");
    fs::create_dir(&path).expect("directory in its place");

    assert!(store.upsert(record("Pyerite", 35, 11.0, 10.0)).is_err());
    assert!(store.upsert(record("Tritanium", 34, 7.00, 6.00)).is_err());

    assert_eq!(names(store.rows()), vec!["Tritanium"]);
    assert_eq!(store.get(ItemId::new(34)).expect("row present").min_sell, 5.20);
}

// =============================================================================
// Derived columns
// =============================================================================

#[test]
fn derived_columns_are_recomputed_idempotently_and_zero_buy_is_undefined() {
    let mut stale = record("Tritanium", 34, 5.20, 5.00);
    stale.profit_potential = 123.0;
    stale.station_margin = Some(9.9);
    let rows = vec![stale, record("Mexallon", 36, 50.0, 0.0)];

    let once = recompute_derived(&rows);
    let twice = recompute_derived(&once);

    assert_eq!(once, twice);
    assert!((once[0].profit_potential - 0.20).abs() < 1e-9);
    assert_eq!(once[1].station_margin, None);
}

// =============================================================================
// Filtering
// =============================================================================

#[test]
fn when_user_filters_by_name_only_matching_rows_remain_in_order() {
    let rows = vec![
        record("Tritanium", 34, 5.20, 5.00),
        record("Pyerite", 35, 11.0, 10.0),
    ];

    assert_eq!(names(&filter(&rows, "tritanium", None)), vec!["Tritanium"]);
    assert_eq!(names(&filter(&rows, "", None)), vec!["Tritanium", "Pyerite"]);
}

#[test]
fn when_user_sets_a_margin_floor_equal_margins_are_kept() {
    let rows = vec![
        record("Exactly five", 1, 105.0, 100.0),
        record("Just under", 2, 104.9, 100.0),
        record("No buyers", 3, 10.0, 0.0),
    ];

    assert_eq!(names(&filter(&rows, "", Some(0.05))), vec!["Exactly five"]);
}

// =============================================================================
// Sorting
// =============================================================================

#[test]
fn when_user_presses_a_header_three_times_the_original_order_returns() {
    let rows = vec![
        record("Pyerite", 35, 11.0, 10.0),
        record("Tritanium", 34, 5.20, 5.00),
        record("Mexallon", 36, 60.0, 50.0),
    ];

    let (ascending, state) = sort(&rows, Column::ItemName, SortState::unsorted());
    assert_eq!(names(&ascending), vec!["Mexallon", "Pyerite", "Tritanium"]);
    assert_eq!(state.order_of(Column::ItemName), SortOrder::Ascending);

    let (descending, state) = sort(&rows, Column::ItemName, state);
    assert_eq!(names(&descending), vec!["Tritanium", "Pyerite", "Mexallon"]);

    let (unsorted, state) = sort(&rows, Column::ItemName, state);
    assert_eq!(names(&unsorted), names(&rows));
    assert_eq!(state, SortState::unsorted());
}

#[test]
fn equal_margins_keep_their_relative_order_in_both_directions() {
    // A and B both at 10%, C at 20%.
    let rows = vec![
        record("A", 1, 110.0, 100.0),
        record("B", 2, 55.0, 50.0),
        record("C", 3, 120.0, 100.0),
    ];

    let (ascending, state) = sort(&rows, Column::StationMargin, SortState::unsorted());
    assert_eq!(names(&ascending), vec!["A", "B", "C"]);

    let (descending, _) = sort(&rows, Column::StationMargin, state);
    assert_eq!(names(&descending), vec!["C", "A", "B"]);
}

#[test]
fn pressing_another_header_starts_it_ascending() {
    let mut view = TableView::new();
    view.press_column(Column::ItemName);
    view.press_column(Column::ItemName);

    assert_eq!(view.press_column(Column::ProfitPotential), SortOrder::Ascending);
    assert_eq!(view.sort_state().order_of(Column::ItemName), SortOrder::Unsorted);
}

#[test]
fn the_view_sorts_then_filters_the_store_rows() {
    let mut store = RecordStore::in_memory();
    store.upsert(record("Tritanium", 34, 5.20, 5.00)).expect("upsert");
    store.upsert(record("Pyerite", 35, 12.0, 10.0)).expect("upsert");
    store.upsert(record("Isogen", 37, 65.0, 50.0)).expect("upsert");
    store.upsert(record("Mexallon", 36, 60.0, 0.0)).expect("upsert");

    let mut view = TableView::new();
    view.press_column(Column::StationMargin);
    view.press_column(Column::StationMargin);
    view.set_min_margin(Some(0.1));

    // Isogen 30%, Pyerite 20%; Tritanium is under the floor and Mexallon undefined.
    assert_eq!(names(&view.render(store.rows())), vec!["Isogen", "Pyerite"]);

    view.clear_min_margin();
    assert_eq!(
        names(&view.render(store.rows())),
        vec!["Isogen", "Pyerite", "Tritanium", "Mexallon"]
    );
}
