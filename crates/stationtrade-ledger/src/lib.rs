//! # Stationtrade Ledger
//!
//! Table-state engine for the stationtrade market tool.
//!
//! ## Overview
//!
//! The ledger owns the set of tracked items and their last-known market
//! snapshot. Every mutation goes through [`RecordStore::upsert`]; views are
//! derived on demand with [`TableView::render`], which recomputes the derived
//! columns, applies the active sort and then the filter.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`csv_file`] | Flat CSV persistence of the record set |
//! | [`derive`] | Profit potential and station margin computation |
//! | [`error`] | Ledger and validation errors |
//! | [`filter`] | Name/margin filtering |
//! | [`record`] | [`ItemRecord`] and [`ItemId`] |
//! | [`sort`] | Three-state per-column sort cycle |
//! | [`store`] | The upserting [`RecordStore`] |
//! | [`timestamp`] | Minute-precision [`ObservedAt`] |
//! | [`view`] | Presentation state combining sort and filter |
//!
//! ## Quick Start
//!
//! ```rust
//! use stationtrade_ledger::{Column, ItemId, ItemRecord, ObservedAt, RecordStore, TableView};
//!
//! let mut store = RecordStore::in_memory();
//! let record = ItemRecord::new(
//!     "Tritanium",
//!     ItemId::new(34),
//!     5.20,
//!     5.00,
//!     1_000_000,
//!     500_000,
//!     ObservedAt::now(),
//! )?;
//! store.upsert(record)?;
//!
//! let mut view = TableView::new();
//! view.press_column(Column::StationMargin);
//! let rows = view.render(store.rows());
//! assert_eq!(rows.len(), 1);
//! # Ok::<(), stationtrade_ledger::LedgerError>(())
//! ```

pub mod csv_file;
pub mod derive;
pub mod error;
pub mod filter;
pub mod record;
pub mod sort;
pub mod store;
pub mod timestamp;
pub mod view;

pub use derive::{profit_potential, recompute_derived, station_margin};
pub use error::{LedgerError, ValidationError};
pub use filter::{filter, RowFilter};
pub use record::{ItemId, ItemRecord};
pub use sort::{sort, Column, SortOrder, SortState};
pub use store::{RecordStore, UpsertOutcome};
pub use timestamp::ObservedAt;
pub use view::TableView;
