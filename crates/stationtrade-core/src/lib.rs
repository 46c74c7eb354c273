//! # Stationtrade Core
//!
//! Catalog, market-data and tracking contracts for the stationtrade tool.
//!
//! ## Overview
//!
//! - **Item catalog** resolving case-insensitive names to item ids
//! - **Price lookup** trait with an ESI (EVE Swagger Interface) adapter
//! - **LRU cache** memoizing price lookups for the process lifetime
//! - **Tracker** gluing catalog, lookup and the ledger's record store
//! - **Configuration** for file paths and upstream settings
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`cache`] | Bounded LRU price cache |
//! | [`catalog`] | Item name/id catalog |
//! | [`config`] | Application configuration |
//! | [`error`] | Core error types |
//! | [`http_client`] | HTTP client abstraction |
//! | [`market`] | Price lookup trait and ESI adapter |
//! | [`tracker`] | The "look up an item and record it" use case |
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │  CLI / Shell    │
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │ MarketTracker   │────▶│ ItemCatalog      │
//! └────────┬────────┘     └──────────────────┘
//!          │
//!          ├──────────────▶┌──────────────────┐     ┌─────────────┐
//!          │               │ CachedPriceLookup│────▶│ HTTP Client │
//!          │               └──────────────────┘     └─────────────┘
//!          ▼
//! ┌─────────────────┐
//! │ RecordStore     │──▶ saved_market_data.csv
//! └─────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use stationtrade_core::{AppConfig, MarketTracker};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::from_env();
//!     let mut tracker = MarketTracker::from_config(&config)?;
//!
//!     let tracked = tracker.track("Tritanium").await?;
//!     println!("margin: {:?}", tracked.record.station_margin);
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod catalog;
pub mod config;
pub mod error;
pub mod http_client;
pub mod market;
pub mod tracker;

pub use cache::{CachedPriceLookup, PriceCache};
pub use catalog::{CatalogEntry, ItemCatalog, DEFAULT_SUGGESTION_LIMIT};
pub use config::AppConfig;
pub use error::{CatalogError, CoreError, MarketDataReason, TrackError};
pub use http_client::{HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient};
pub use market::{
    EsiMarketSource, LookupError, LookupErrorKind, MarketSnapshot, MissingSide, PriceLookup,
};
pub use tracker::{MarketTracker, TrackedItem};

// Ledger (re-exported from stationtrade-ledger)
pub use stationtrade_ledger::{
    filter, recompute_derived, sort, Column, ItemId, ItemRecord, LedgerError, ObservedAt,
    RecordStore, RowFilter, SortOrder, SortState, TableView, UpsertOutcome, ValidationError,
};
