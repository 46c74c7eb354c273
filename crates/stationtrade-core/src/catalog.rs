use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Serialize;
use stationtrade_ledger::ItemId;
use tracing::{debug, info};

use crate::error::CatalogError;

/// Maximum number of suggestions returned when the caller does not say.
pub const DEFAULT_SUGGESTION_LIMIT: usize = 10;

/// One catalog row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    pub name: String,
    pub item_id: ItemId,
}

/// Item name to id mapping loaded from a two-column CSV file.
///
/// The first column holds names and the second ids, whatever the header says.
/// Lookup is case-insensitive; when names differ only by case the first row
/// wins.
#[derive(Debug, Clone, Default)]
pub struct ItemCatalog {
    entries: Vec<CatalogEntry>,
    by_lowercase: HashMap<String, usize>,
}

impl ItemCatalog {
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let file = File::open(path)?;
        let catalog = Self::from_reader(file)?;
        info!(path = %path.display(), items = catalog.len(), "item catalog loaded");
        Ok(catalog)
    }

    /// Parse catalog CSV. Fields are decoded as UTF-8 when valid, otherwise as
    /// ISO-8859-1.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers = csv_reader.byte_headers()?;
        if headers.len() < 2 {
            return Err(CatalogError::MissingColumn {
                column: if headers.is_empty() { "item name" } else { "item id" },
            });
        }
        debug!(
            name_column = %decode_field(&headers[0]).trim(),
            id_column = %decode_field(&headers[1]).trim(),
            "catalog header read"
        );

        let mut entries = Vec::new();
        for (index, record) in csv_reader.byte_records().enumerate() {
            let record = record?;
            let row = index as u64 + 1;

            let name = record.get(0).map(decode_field).unwrap_or_default();
            let name = name.trim();
            let raw_id = record.get(1).map(decode_field).unwrap_or_default();

            if name.is_empty() && raw_id.trim().is_empty() {
                continue;
            }
            if name.is_empty() {
                return Err(CatalogError::MalformedRow {
                    row,
                    reason: String::from("item name is empty"),
                });
            }

            let item_id = parse_item_id(&raw_id).ok_or_else(|| CatalogError::MalformedRow {
                row,
                reason: format!("invalid item id '{}'", raw_id.trim()),
            })?;

            entries.push(CatalogEntry {
                name: name.to_owned(),
                item_id,
            });
        }

        Ok(Self::from_entries(entries))
    }

    pub fn from_entries(entries: impl IntoIterator<Item = CatalogEntry>) -> Self {
        let mut catalog = Self::default();
        for entry in entries {
            let key = entry.name.to_lowercase();
            if catalog.by_lowercase.contains_key(&key) {
                debug!(name = %entry.name, "duplicate catalog name ignored");
                continue;
            }
            catalog.by_lowercase.insert(key, catalog.entries.len());
            catalog.entries.push(entry);
        }
        catalog
    }

    /// Case-insensitive exact match on the trimmed query.
    pub fn lookup_by_name(&self, query: &str) -> Option<&CatalogEntry> {
        let key = query.trim().to_lowercase();
        if key.is_empty() {
            return None;
        }
        self.by_lowercase
            .get(&key)
            .map(|&index| &self.entries[index])
    }

    /// Names containing `input` case-insensitively, in catalog order.
    pub fn suggest(&self, input: &str, limit: usize) -> Vec<&str> {
        let needle = input.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.entries
            .iter()
            .filter(|entry| entry.name.to_lowercase().contains(&needle))
            .map(|entry| entry.name.as_str())
            .take(limit)
            .collect()
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn decode_field(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_owned(),
        // ISO-8859-1 maps every byte to the code point of the same value.
        Err(_) => bytes.iter().map(|&b| char::from(b)).collect(),
    }
}

/// Ids may be written as integers or as integral floats such as `34.0`.
fn parse_item_id(raw: &str) -> Option<ItemId> {
    let raw = raw.trim();
    if let Ok(id) = raw.parse::<u64>() {
        return Some(ItemId::new(id));
    }
    let value = raw.parse::<f64>().ok()?;
    if value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value < u64::MAX as f64 {
        Some(ItemId::new(value as u64))
    } else {
        None
    }
}
