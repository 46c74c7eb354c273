use serde::Serialize;
use stationtrade_ledger::{ItemRecord, LedgerError, ObservedAt, RecordStore, UpsertOutcome};
use tracing::{info, warn};

use crate::cache::{CachedPriceLookup, PriceCache};
use crate::catalog::{CatalogEntry, ItemCatalog};
use crate::config::AppConfig;
use crate::error::{CoreError, MarketDataReason, TrackError};
use crate::market::{EsiMarketSource, MissingSide, PriceLookup};

/// Result of a successful [`MarketTracker::track`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackedItem {
    pub record: ItemRecord,
    pub outcome: UpsertOutcome,
}

/// Resolves item names, fetches their station prices and records them.
pub struct MarketTracker<L> {
    catalog: ItemCatalog,
    prices: L,
    store: RecordStore,
}

impl MarketTracker<CachedPriceLookup<EsiMarketSource>> {
    /// Load the catalog and ledger named by `config` and wire the ESI source
    /// behind an LRU cache.
    pub fn from_config(config: &AppConfig) -> Result<Self, CoreError> {
        let catalog = ItemCatalog::load(&config.catalog_path)?;
        let store = RecordStore::open(config.ledger_path.clone())?;
        let prices = CachedPriceLookup::new(
            EsiMarketSource::from_config(config),
            PriceCache::new(config.cache_capacity),
        );
        Ok(Self::new(catalog, prices, store))
    }
}

impl<L: PriceLookup> MarketTracker<L> {
    pub fn new(catalog: ItemCatalog, prices: L, store: RecordStore) -> Self {
        Self {
            catalog,
            prices,
            store,
        }
    }

    pub fn catalog(&self) -> &ItemCatalog {
        &self.catalog
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn prices(&self) -> &L {
        &self.prices
    }

    pub fn lookup_by_name(&self, name: &str) -> Option<&CatalogEntry> {
        self.catalog.lookup_by_name(name)
    }

    /// Track `name` as observed now.
    pub async fn track(&mut self, name: &str) -> Result<TrackedItem, TrackError> {
        self.track_at(name, ObservedAt::now()).await
    }

    /// Resolve `name`, fetch its book and upsert the result into the store.
    ///
    /// Nothing is written unless both sides of the book have a price.
    pub async fn track_at(
        &mut self,
        name: &str,
        observed_at: ObservedAt,
    ) -> Result<TrackedItem, TrackError> {
        let query = name.trim();
        if query.is_empty() {
            return Err(TrackError::EmptyQuery);
        }

        let CatalogEntry { name, item_id } = self
            .catalog
            .lookup_by_name(query)
            .cloned()
            .ok_or_else(|| TrackError::UnknownItem {
                name: query.to_owned(),
            })?;

        let not_found = |reason: MarketDataReason| {
            warn!(%item_id, %reason, "market data not found");
            TrackError::MarketDataNotFound {
                name: name.clone(),
                item_id,
                reason,
            }
        };

        let snapshot = self
            .prices
            .snapshot(item_id)
            .await
            .map_err(|e| not_found(MarketDataReason::Upstream(e)))?;

        let (Some(max_buy), Some(min_sell)) = (snapshot.highest_buy, snapshot.lowest_sell) else {
            let side = snapshot.missing_side().unwrap_or(MissingSide::Both);
            return Err(not_found(MarketDataReason::NoStandingOrders(side)));
        };

        let record = ItemRecord::new(
            name.clone(),
            item_id,
            min_sell,
            max_buy,
            snapshot.buy_volume,
            snapshot.sell_volume,
            observed_at,
        )
        .map_err(LedgerError::from)?;

        let outcome = self.store.upsert(record.clone())?;
        info!(%item_id, name = %record.name, ?outcome, "item tracked");

        Ok(TrackedItem { record, outcome })
    }
}
