use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::csv_file;
use crate::{ItemId, ItemRecord, LedgerError};

/// Result of an [`RecordStore::upsert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UpsertOutcome {
    Inserted,
    Replaced,
}

/// Ordered set of item records keyed by [`ItemId`].
///
/// Row order is insertion order; replacing a row keeps its position. A
/// file-backed store rewrites its CSV file after every upsert.
#[derive(Debug, Default)]
pub struct RecordStore {
    rows: Vec<ItemRecord>,
    positions: HashMap<ItemId, usize>,
    backing_file: Option<PathBuf>,
}

impl RecordStore {
    /// A store with no backing file.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Load the store from `path`. A missing file yields an empty store that
    /// will be created on the first upsert.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, LedgerError> {
        let path = path.into();
        let rows = if path.is_file() {
            csv_file::read_records(&path)?
        } else {
            debug!(path = %path.display(), "ledger file not found, starting empty");
            Vec::new()
        };

        let mut store = Self::default();
        for row in rows {
            store.merge(row);
        }

        info!(path = %path.display(), rows = store.rows.len(), "ledger loaded");
        store.backing_file = Some(path);
        Ok(store)
    }

    /// Insert `record`, or replace the row with the same item id in place,
    /// then write the whole store through to its backing file.
    ///
    /// If the write fails the in-memory rows are left as they were.
    pub fn upsert(&mut self, record: ItemRecord) -> Result<UpsertOutcome, LedgerError> {
        let item_id = record.item_id;
        let previous = self.get(item_id).cloned();
        let outcome = self.merge(record);

        if let Err(error) = self.save() {
            warn!(%item_id, %error, "ledger write failed, upsert rolled back");
            self.rollback(item_id, previous);
            return Err(error);
        }

        debug!(%item_id, ?outcome, "ledger row upserted");
        Ok(outcome)
    }

    /// Rewrite the backing file. No-op for in-memory stores.
    pub fn save(&self) -> Result<(), LedgerError> {
        if let Some(path) = &self.backing_file {
            csv_file::write_records(path, &self.rows)?;
            debug!(path = %path.display(), rows = self.rows.len(), "ledger saved");
        }
        Ok(())
    }

    /// Rows in store order.
    pub fn rows(&self) -> &[ItemRecord] {
        &self.rows
    }

    pub fn get(&self, item_id: ItemId) -> Option<&ItemRecord> {
        self.positions.get(&item_id).map(|&index| &self.rows[index])
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn backing_file(&self) -> Option<&Path> {
        self.backing_file.as_deref()
    }

    fn rollback(&mut self, item_id: ItemId, previous: Option<ItemRecord>) {
        match (previous, self.positions.get(&item_id).copied()) {
            (Some(record), Some(index)) => self.rows[index] = record,
            // Inserted rows are always appended last.
            (None, Some(_)) => {
                self.rows.pop();
                self.positions.remove(&item_id);
            }
            (_, None) => {}
        }
    }

    fn merge(&mut self, mut record: ItemRecord) -> UpsertOutcome {
        record.refresh_derived();
        match self.positions.get(&record.item_id) {
            Some(&index) => {
                self.rows[index] = record;
                UpsertOutcome::Replaced
            }
            None => {
                self.positions.insert(record.item_id, self.rows.len());
                self.rows.push(record);
                UpsertOutcome::Inserted
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ObservedAt;
    use tempfile::tempdir;

    fn record(name: &str, id: u64, min_sell: f64, max_buy: f64) -> ItemRecord {
        let observed = ObservedAt::parse("2023-05-01 12:00").expect("valid timestamp");
        ItemRecord::new(name, ItemId::new(id), min_sell, max_buy, 10, 20, observed)
            .expect("valid record")
    }

    #[test]
    fn upsert_replaces_in_place_and_keeps_order() {
        let mut store = RecordStore::in_memory();
        assert_eq!(store.upsert(record("Tritanium", 34, 5.2, 5.0)).expect("upsert"), UpsertOutcome::Inserted);
        store.upsert(record("Pyerite", 35, 12.0, 10.0)).expect("upsert");
        store.upsert(record("Mexallon", 36, 50.0, 40.0)).expect("upsert");

        let outcome = store.upsert(record("Pyerite", 35, 13.0, 11.0)).expect("upsert");
        assert_eq!(outcome, UpsertOutcome::Replaced);
        assert_eq!(store.len(), 3);

        let names = store.rows().iter().map(|r| r.name.as_str()).collect::<Vec<_>>();
        assert_eq!(names, ["Tritanium", "Pyerite", "Mexallon"]);
        let pyerite = store.get(ItemId::new(35)).expect("present");
        assert_eq!(pyerite.min_sell, 13.0);
        assert_eq!(pyerite.max_buy, 11.0);
        assert_eq!(pyerite.profit_potential, 2.0);
    }

    #[test]
    fn missing_file_opens_empty_and_is_created_on_upsert() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join("saved_market_data.csv");

        let mut store = RecordStore::open(&path).expect("open");
        assert!(store.is_empty());
        assert!(!path.exists());

        store.upsert(record("Tritanium", 34, 5.2, 5.0)).expect("upsert");
        assert!(path.exists());

        let reopened = RecordStore::open(&path).expect("reopen");
        assert_eq!(reopened.rows(), store.rows());
    }

    #[test]
    fn failed_write_leaves_the_store_unchanged() {
        let temp = tempdir().expect("tempdir");
        let not_a_dir = temp.path().join("blocker");
        std::fs::write(&not_a_dir, "").expect("plain file written");

        let mut store = RecordStore::open(not_a_dir.join("ledger.csv")).expect("open");
        store
            .upsert(record("Tritanium", 34, 5.2, 5.0))
            .expect_err("write under a plain file must fail");

        assert!(store.is_empty());
        assert!(store.get(ItemId::new(34)).is_none());
    }

    #[test]
    fn failed_write_keeps_the_previous_values_of_a_replaced_row() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join("saved_market_data.csv");
        let mut store = RecordStore::open(&path).expect("open");
        store.upsert(record("Tritanium", 34, 5.2, 5.0)).expect("upsert");
        store.upsert(record("Pyerite", 35, 12.0, 10.0)).expect("upsert");

        // A directory at the ledger path makes the next write fail.
        std::fs::remove_file(&path).expect("ledger removed");
        std::fs::create_dir(&path).expect("directory in its place");

        store
            .upsert(record("Tritanium", 34, 9.0, 8.0))
            .expect_err("write over a directory must fail");
        store
            .upsert(record("Mexallon", 36, 50.0, 40.0))
            .expect_err("write over a directory must fail");

        assert_eq!(store.len(), 2);
        let tritanium = store.get(ItemId::new(34)).expect("present");
        assert_eq!(tritanium.min_sell, 5.2);
        assert!((tritanium.profit_potential - 0.2).abs() < 1e-9);
        assert!(store.get(ItemId::new(36)).is_none());
    }

    #[test]
    fn duplicate_ids_in_file_collapse_to_last_values() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join("saved_market_data.csv");
        csv_file::write_records(
            &path,
            &[
                record("Tritanium", 34, 5.2, 5.0),
                record("Pyerite", 35, 12.0, 10.0),
                record("Tritanium", 34, 6.0, 5.0),
            ],
        )
        .expect("seed");

        let store = RecordStore::open(&path).expect("open");
        assert_eq!(store.len(), 2);
        assert_eq!(store.rows()[0].min_sell, 6.0);
    }
}
