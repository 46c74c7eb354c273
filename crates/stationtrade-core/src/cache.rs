//! Bounded LRU memoization for price lookups.

use std::collections::{BTreeMap, HashMap};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use stationtrade_ledger::ItemId;
use tracing::debug;

use crate::config::DEFAULT_CACHE_CAPACITY;
use crate::market::{LookupError, MarketSnapshot, PriceLookup};

#[derive(Debug, Clone, Copy)]
struct CacheEntry {
    snapshot: MarketSnapshot,
    stamp: u64,
}

/// Recency is a monotonically increasing stamp; `by_stamp` orders entries
/// from least to most recently used.
#[derive(Debug)]
struct CacheInner {
    map: HashMap<ItemId, CacheEntry>,
    by_stamp: BTreeMap<u64, ItemId>,
    next_stamp: u64,
    capacity: usize,
}

impl CacheInner {
    fn new(capacity: usize) -> Self {
        Self {
            map: HashMap::new(),
            by_stamp: BTreeMap::new(),
            next_stamp: 0,
            capacity,
        }
    }

    fn bump(&mut self) -> u64 {
        let stamp = self.next_stamp;
        self.next_stamp += 1;
        stamp
    }

    fn get(&mut self, item_id: ItemId) -> Option<MarketSnapshot> {
        let stamp = self.bump();
        let entry = self.map.get_mut(&item_id)?;
        self.by_stamp.remove(&entry.stamp);
        entry.stamp = stamp;
        self.by_stamp.insert(stamp, item_id);
        Some(entry.snapshot)
    }

    fn put(&mut self, item_id: ItemId, snapshot: MarketSnapshot) {
        let stamp = self.bump();
        if let Some(previous) = self.map.insert(item_id, CacheEntry { snapshot, stamp }) {
            self.by_stamp.remove(&previous.stamp);
        }
        self.by_stamp.insert(stamp, item_id);

        while self.map.len() > self.capacity {
            let Some((_, evicted)) = self.by_stamp.pop_first() else {
                break;
            };
            self.map.remove(&evicted);
            debug!(item_id = %evicted, "price cache evicted least recently used entry");
        }
    }

    fn clear(&mut self) {
        self.map.clear();
        self.by_stamp.clear();
    }

    fn len(&self) -> usize {
        self.map.len()
    }
}

/// Thread-safe bounded LRU cache of market snapshots keyed by item id.
#[derive(Debug, Clone)]
pub struct PriceCache {
    inner: Arc<tokio::sync::Mutex<CacheInner>>,
}

impl PriceCache {
    /// Create a cache holding at most `capacity` snapshots.
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Arc::new(tokio::sync::Mutex::new(CacheInner::new(capacity))),
        }
    }

    /// Create a cache holding the 1024 most recently used snapshots.
    pub fn with_default_capacity() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }

    /// Create a cache that never stores anything.
    pub fn disabled() -> Self {
        Self::new(0)
    }

    /// Look up a snapshot and mark it most recently used.
    pub async fn get(&self, item_id: ItemId) -> Option<MarketSnapshot> {
        let mut store = self.inner.lock().await;
        store.get(item_id)
    }

    /// Store a snapshot, evicting the least recently used entry when full.
    pub async fn put(&self, item_id: ItemId, snapshot: MarketSnapshot) {
        let mut store = self.inner.lock().await;
        if store.capacity == 0 {
            return;
        }
        store.put(item_id, snapshot);
    }

    pub async fn clear(&self) {
        let mut store = self.inner.lock().await;
        store.clear();
    }

    pub async fn len(&self) -> usize {
        let store = self.inner.lock().await;
        store.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    pub async fn capacity(&self) -> usize {
        let store = self.inner.lock().await;
        store.capacity
    }
}

impl Default for PriceCache {
    fn default() -> Self {
        Self::with_default_capacity()
    }
}

/// [`PriceLookup`] decorator that memoizes successful snapshots.
///
/// Failures are returned as-is and never cached, so the next call retries.
pub struct CachedPriceLookup<L> {
    inner: L,
    cache: PriceCache,
}

impl<L: PriceLookup> CachedPriceLookup<L> {
    pub fn new(inner: L, cache: PriceCache) -> Self {
        Self { inner, cache }
    }

    pub fn cache(&self) -> &PriceCache {
        &self.cache
    }

    pub fn inner(&self) -> &L {
        &self.inner
    }

    async fn cached_snapshot(&self, item_id: ItemId) -> Result<MarketSnapshot, LookupError> {
        if let Some(snapshot) = self.cache.get(item_id).await {
            debug!(%item_id, "price cache hit");
            return Ok(snapshot);
        }

        debug!(%item_id, "price cache miss");
        let snapshot = self.inner.snapshot(item_id).await?;
        self.cache.put(item_id, snapshot).await;
        Ok(snapshot)
    }
}

impl<L: PriceLookup> PriceLookup for CachedPriceLookup<L> {
    fn snapshot<'a>(
        &'a self,
        item_id: ItemId,
    ) -> Pin<Box<dyn Future<Output = Result<MarketSnapshot, LookupError>> + Send + 'a>> {
        Box::pin(self.cached_snapshot(item_id))
    }
}
