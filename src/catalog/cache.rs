//! In-memory catalog cache
//!
//! One large upfront fetch of every lightweight record replaces per-page
//! network calls. Startup pays for it once; pagination and prefix search
//! then run against memory, and search needs the full name index resident
//! anyway.

use log::{info, warn};

use super::client::CatalogFetcher;
use super::types::EntrySummary;

/// Listing limit used when the probe request cannot establish a count
const FALLBACK_BULK_LIMIT: u32 = 100_000;

/// Ordered sequence of lightweight records, insertion order = remote
/// listing order. Either fully loaded (`entries.len() == count`) or empty
/// with `count == 0` after a failed load.
#[derive(Debug, Clone, Default)]
pub struct CatalogCache {
    entries: Vec<EntrySummary>,
    count: u32,
}

impl CatalogCache {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: Vec<EntrySummary>) -> Self {
        Self {
            count: entries.len() as u32,
            entries,
        }
    }

    /// Bulk-load the whole catalog: one probe request for the true count,
    /// then one request for everything. Any failure degrades to an empty
    /// cache; there is no retry and no partial-success handling.
    pub async fn load(fetcher: &dyn CatalogFetcher) -> Self {
        let limit = match fetcher.fetch_listing(0, 1).await {
            Ok(probe) if probe.count > 0 => probe.count,
            Ok(_) => FALLBACK_BULK_LIMIT,
            Err(e) => {
                warn!("Catalog probe request failed: {}", e);
                return Self::empty();
            }
        };

        match fetcher.fetch_listing(0, limit).await {
            Ok(page) => {
                let cache = Self::from_entries(page.results);
                info!("Catalog cache loaded with {} entries", cache.count);
                cache
            }
            Err(e) => {
                warn!("Catalog bulk fetch failed, starting degraded: {}", e);
                Self::empty()
            }
        }
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The records for a 1-based page. A page beyond the data yields an
    /// empty slice, not an error.
    pub fn page_slice(&self, page: u32, page_size: u32) -> &[EntrySummary] {
        let offset = (page.saturating_sub(1) as usize).saturating_mul(page_size as usize);
        if offset >= self.entries.len() {
            return &[];
        }
        let end = (offset + page_size as usize).min(self.entries.len());
        &self.entries[offset..end]
    }

    /// Records whose name starts with the (already normalized) term,
    /// case-insensitive, in original listing order.
    pub fn prefix_matches(&self, term: &str) -> Vec<EntrySummary> {
        self.entries
            .iter()
            .filter(|e| e.name.to_lowercase().starts_with(term))
            .cloned()
            .collect()
    }
}
