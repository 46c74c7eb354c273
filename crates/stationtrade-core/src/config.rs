use std::path::PathBuf;

use tracing::warn;

pub const DEFAULT_CATALOG_FILE: &str = "item_ids.csv";
pub const DEFAULT_LEDGER_FILE: &str = "saved_market_data.csv";
/// The Forge.
pub const THE_FORGE_REGION_ID: u64 = 10000002;
/// Jita IV - Moon 4 - Caldari Navy Assembly Plant.
pub const JITA_STATION_ID: u64 = 60003760;
pub const DEFAULT_CACHE_CAPACITY: usize = 1024;
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

pub const CATALOG_ENV: &str = "STATIONTRADE_CATALOG";
pub const LEDGER_ENV: &str = "STATIONTRADE_LEDGER";
pub const TIMEOUT_ENV: &str = "STATIONTRADE_TIMEOUT_MS";

/// Runtime settings shared by the tracker and the CLI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub catalog_path: PathBuf,
    pub ledger_path: PathBuf,
    pub region_id: u64,
    pub station_id: u64,
    pub cache_capacity: usize,
    pub timeout_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            catalog_path: PathBuf::from(DEFAULT_CATALOG_FILE),
            ledger_path: PathBuf::from(DEFAULT_LEDGER_FILE),
            region_id: THE_FORGE_REGION_ID,
            station_id: JITA_STATION_ID,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl AppConfig {
    /// Defaults overridden by the `STATIONTRADE_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`AppConfig::from_env`] with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = non_blank(lookup(CATALOG_ENV)) {
            config.catalog_path = PathBuf::from(path);
        }
        if let Some(path) = non_blank(lookup(LEDGER_ENV)) {
            config.ledger_path = PathBuf::from(path);
        }
        if let Some(raw) = non_blank(lookup(TIMEOUT_ENV)) {
            match raw.parse::<u64>() {
                Ok(timeout_ms) if timeout_ms > 0 => config.timeout_ms = timeout_ms,
                _ => warn!(value = %raw, "ignoring invalid {TIMEOUT_ENV}"),
            }
        }

        config
    }

    pub fn with_catalog_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.catalog_path = path.into();
        self
    }

    pub fn with_ledger_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.ledger_path = path.into();
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}
