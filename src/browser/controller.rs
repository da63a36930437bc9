//! Catalog browser controller
//!
//! Owns the cache, pagination and search state behind one lock, resolves
//! detail records for whatever view is requested, and republishes derived
//! UI state through the render sink after every change. A view generation
//! counter keeps batches from superseded views off the grid: detail
//! resolution runs without the lock, so a slow page can finish after a
//! newer page or search already rendered.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use futures_util::future::join_all;
use log::{debug, info, warn};
use tokio::sync::RwLock;

use crate::browser::pagination::{PaginationState, PaginationUi};
use crate::cards::CardView;
use crate::catalog::cache::CatalogCache;
use crate::catalog::client::CatalogFetcher;
use crate::catalog::types::EntrySummary;
use crate::globals;
use crate::render::{RenderBatch, RenderSink};

/// Records shown per page
pub const PAGE_LIMIT: u32 = 18;

/// Browser configuration
#[derive(Debug, Clone)]
pub struct BrowserConfig {
    pub page_size: u32,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            page_size: PAGE_LIMIT,
        }
    }
}

/// Mutable view state, guarded as one unit
struct ViewState {
    cache: CatalogCache,
    pagination: PaginationState,
    search_term: String,
}

pub struct CatalogBrowser {
    fetcher: Arc<dyn CatalogFetcher>,
    sink: Arc<dyn RenderSink>,
    view: RwLock<ViewState>,
    /// Bumped at the start of every view request; a resolved batch is only
    /// applied while its stamp is still current
    generation: AtomicU64,
}

impl CatalogBrowser {
    pub fn new(
        fetcher: Arc<dyn CatalogFetcher>,
        sink: Arc<dyn RenderSink>,
        config: BrowserConfig,
    ) -> Self {
        Self {
            fetcher,
            sink,
            view: RwLock::new(ViewState {
                cache: CatalogCache::empty(),
                pagination: PaginationState::new(config.page_size),
                search_term: String::new(),
            }),
            generation: AtomicU64::new(0),
        }
    }

    /// Bulk-load the whole catalog and show the first page. On failure the
    /// browser stays up with an empty cache; every later view renders an
    /// empty grid until a reload succeeds.
    pub async fn load_catalog(&self) {
        globals::set_busy(true);
        self.sink.set_loading(true).await;

        let cache = CatalogCache::load(self.fetcher.as_ref()).await;

        {
            let mut view = self.view.write().await;
            view.pagination.total_count = cache.count();
            view.pagination.current_page = 1;
            view.search_term.clear();
            view.cache = cache;
        }

        self.sink.set_loading(false).await;
        globals::set_busy(false);

        self.show_page(1).await;
    }

    /// Resolve and render one 1-based page. A page beyond the data renders
    /// an empty grid, not an error.
    pub async fn show_page(&self, page: u32) {
        let page = page.max(1);
        let my_generation = self.next_generation();

        let (slice, pagination) = {
            let mut view = self.view.write().await;
            view.pagination.current_page = page;
            view.search_term.clear();
            let slice = view
                .cache
                .page_slice(page, view.pagination.page_size)
                .to_vec();
            (slice, view.pagination)
        };

        let batch = self.resolve_details(&slice).await;

        if !self.is_current(my_generation) {
            debug!("Discarding stale batch for page {}", page);
            return;
        }

        self.sink.render(batch).await;
        self.sink.publish_pagination(pagination.ui(true)).await;
    }

    pub async fn next_page(&self) {
        let target = {
            let view = self.view.read().await;
            view.pagination.clamp(view.pagination.current_page + 1)
        };
        self.show_page(target).await;
    }

    pub async fn prev_page(&self) {
        let target = {
            let view = self.view.read().await;
            view.pagination
                .clamp(view.pagination.current_page.saturating_sub(1))
        };
        self.show_page(target).await;
    }

    /// Apply a search term. An empty (after trim) term deactivates search
    /// and restores the page that was active before it began; a non-empty
    /// term renders every prefix match with pagination suppressed.
    pub async fn apply_search(&self, raw_term: &str) {
        let term = normalize_term(raw_term);

        if term.is_empty() {
            let restore = {
                let mut view = self.view.write().await;
                if view.search_term.is_empty() {
                    None
                } else {
                    view.search_term.clear();
                    Some(view.pagination.current_page)
                }
            };
            if let Some(page) = restore {
                self.show_page(page).await;
            }
            return;
        }

        let my_generation = self.next_generation();

        let (matches, pagination) = {
            let mut view = self.view.write().await;
            view.search_term = term.clone();
            (view.cache.prefix_matches(&term), view.pagination)
        };

        info!("Search '{}' matched {} records", term, matches.len());
        let batch = self.resolve_details(&matches).await;

        if !self.is_current(my_generation) {
            debug!("Discarding stale batch for search '{}'", term);
            return;
        }

        self.sink.render(batch).await;
        self.sink.publish_pagination(pagination.ui(false)).await;
    }

    /// Exact-name lookup against the remote search endpoint. Renders the
    /// single match as a one-card grid; 404 and transport failures both
    /// render an empty grid.
    pub async fn lookup_by_name(&self, raw_term: &str) {
        let term = normalize_term(raw_term);

        if term.is_empty() {
            self.apply_search("").await;
            return;
        }

        let my_generation = self.next_generation();

        let pagination = {
            let mut view = self.view.write().await;
            view.search_term = term.clone();
            view.pagination
        };

        let cards = match self.fetcher.fetch_by_name(&term).await {
            Ok(Some(detail)) => vec![CardView::from_detail(&detail)],
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("Name lookup '{}' failed: {}", term, e);
                Vec::new()
            }
        };

        if !self.is_current(my_generation) {
            debug!("Discarding stale batch for lookup '{}'", term);
            return;
        }

        self.sink.render(RenderBatch::new(cards, 0)).await;
        self.sink.publish_pagination(pagination.ui(false)).await;
    }

    /// Current strip payload (suppressed while a search term is active)
    pub async fn pagination_ui(&self) -> PaginationUi {
        let view = self.view.read().await;
        view.pagination.ui(view.search_term.is_empty())
    }

    pub async fn total_count(&self) -> u32 {
        self.view.read().await.cache.count()
    }

    pub async fn search_active(&self) -> bool {
        !self.view.read().await.search_term.is_empty()
    }

    /// Fan out one detail fetch per entry, wait for all of them, and keep
    /// whatever succeeded in entry order. Failures are dropped from the
    /// batch and counted; there is no retry.
    async fn resolve_details(&self, entries: &[EntrySummary]) -> RenderBatch {
        let fetches = entries.iter().map(|entry| {
            let fetcher = self.fetcher.clone();
            let url = entry.url.clone();
            async move { fetcher.fetch_detail(&url).await }
        });

        let results = join_all(fetches).await;

        let mut cards = Vec::with_capacity(entries.len());
        let mut dropped = 0;
        for (entry, result) in entries.iter().zip(results) {
            match result {
                Ok(detail) => cards.push(CardView::from_detail(&detail)),
                Err(e) => {
                    dropped += 1;
                    warn!("Detail fetch for '{}' failed: {}", entry.name, e);
                }
            }
        }

        RenderBatch::new(cards, dropped)
    }

    fn next_generation(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }
}

/// Trim and lowercase a raw search term
pub fn normalize_term(raw: &str) -> String {
    raw.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::error::CatalogError;
    use crate::catalog::types::{ListingPage, PokemonDetail, Sprites, TypeName, TypeSlot};
    use crate::render::MemorySink;
    use async_trait::async_trait;
    use std::collections::HashSet;
    use std::time::Duration;

    struct FakeFetcher {
        entries: Vec<EntrySummary>,
        fail_names: HashSet<String>,
        listing_fails: bool,
        detail_delay: Duration,
    }

    impl FakeFetcher {
        fn new(names: &[&str]) -> Self {
            Self {
                entries: names
                    .iter()
                    .map(|name| EntrySummary {
                        name: name.to_string(),
                        url: format!("https://catalog.test/pokemon/{}/", name),
                    })
                    .collect(),
                fail_names: HashSet::new(),
                listing_fails: false,
                detail_delay: Duration::ZERO,
            }
        }

        fn numbered(count: usize) -> Self {
            let names: Vec<String> = (1..=count).map(|i| format!("mon-{:04}", i)).collect();
            Self::new(&names.iter().map(String::as_str).collect::<Vec<_>>())
        }

        fn detail_for(&self, index: usize) -> PokemonDetail {
            PokemonDetail {
                id: index as u32 + 1,
                name: self.entries[index].name.clone(),
                sprites: Sprites {
                    front_default: Some(format!("https://img.test/{}.png", index + 1)),
                    other: None,
                },
                types: vec![TypeSlot {
                    kind: TypeName {
                        name: "normal".to_string(),
                    },
                }],
            }
        }
    }

    #[async_trait]
    impl CatalogFetcher for FakeFetcher {
        async fn fetch_listing(
            &self,
            offset: u32,
            limit: u32,
        ) -> Result<ListingPage, CatalogError> {
            if self.listing_fails {
                return Err(CatalogError::RequestFailed("connection refused".into()));
            }
            let start = (offset as usize).min(self.entries.len());
            let end = (start + limit as usize).min(self.entries.len());
            Ok(ListingPage {
                count: self.entries.len() as u32,
                next: None,
                previous: None,
                results: self.entries[start..end].to_vec(),
            })
        }

        async fn fetch_detail(&self, url: &str) -> Result<PokemonDetail, CatalogError> {
            if !self.detail_delay.is_zero() {
                tokio::time::sleep(self.detail_delay).await;
            }
            let index = self
                .entries
                .iter()
                .position(|e| e.url == url)
                .ok_or_else(|| CatalogError::BadStatus(404, url.to_string()))?;
            if self.fail_names.contains(&self.entries[index].name) {
                return Err(CatalogError::RequestFailed("reset by peer".into()));
            }
            Ok(self.detail_for(index))
        }

        async fn fetch_by_name(&self, name: &str) -> Result<Option<PokemonDetail>, CatalogError> {
            Ok(self
                .entries
                .iter()
                .position(|e| e.name == name)
                .map(|index| self.detail_for(index)))
        }
    }

    fn browser_with(fetcher: FakeFetcher) -> (Arc<CatalogBrowser>, Arc<MemorySink>) {
        let sink = Arc::new(MemorySink::default());
        let browser = Arc::new(CatalogBrowser::new(
            Arc::new(fetcher),
            sink.clone(),
            BrowserConfig::default(),
        ));
        (browser, sink)
    }

    #[tokio::test]
    async fn test_end_to_end_pagination() {
        let (browser, sink) = browser_with(FakeFetcher::numbered(1302));

        browser.load_catalog().await;
        assert_eq!(*sink.loading.lock().await, vec![true, false]);

        let first = sink.last_batch().await.unwrap();
        assert_eq!(first.cards.len(), 18);
        assert_eq!(first.cards[0].dex_number, "001");
        assert_eq!(first.cards[17].dex_number, "018");
        assert_eq!(first.dropped, 0);

        let ui = sink.last_pagination().await.unwrap();
        assert_eq!(ui.max_page, 73);
        assert_eq!(ui.pages, vec![1, 2, 3]);
        assert_eq!(ui.trailing, Some(73));
        assert!(!ui.prev_enabled);
        assert!(ui.next_enabled);

        // last page holds only the remainder
        browser.show_page(73).await;
        assert_eq!(sink.last_batch().await.unwrap().cards.len(), 6);
        assert!(!sink.last_pagination().await.unwrap().next_enabled);

        // a page beyond the data is an empty render, not an error
        browser.show_page(74).await;
        assert!(sink.last_batch().await.unwrap().cards.is_empty());
    }

    #[tokio::test]
    async fn test_nav_clamps_at_bounds() {
        let (browser, sink) = browser_with(FakeFetcher::numbered(40));
        browser.load_catalog().await;

        browser.prev_page().await;
        assert_eq!(sink.last_pagination().await.unwrap().current_page, 1);

        browser.next_page().await;
        browser.next_page().await;
        browser.next_page().await;
        assert_eq!(sink.last_pagination().await.unwrap().current_page, 3);
    }

    #[tokio::test]
    async fn test_failed_details_are_dropped_from_batch() {
        let mut fetcher = FakeFetcher::numbered(20);
        fetcher.fail_names.insert("mon-0003".to_string());
        let (browser, sink) = browser_with(fetcher);

        browser.load_catalog().await;

        let batch = sink.last_batch().await.unwrap();
        assert_eq!(batch.cards.len(), 17);
        assert_eq!(batch.dropped, 1);
        assert!(!batch.cards.iter().any(|c| c.name == "Mon-0003"));
    }

    #[tokio::test]
    async fn test_search_prefix_match_and_restore() {
        let (browser, sink) = browser_with(FakeFetcher::new(&["pikachu", "pidgey", "charmander"]));
        browser.load_catalog().await;

        browser.apply_search("  PI ").await;
        let batch = sink.last_batch().await.unwrap();
        let names: Vec<&str> = batch.cards.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Pikachu", "Pidgey"]);
        assert!(!sink.last_pagination().await.unwrap().enabled);
        assert!(browser.search_active().await);

        browser.apply_search("").await;
        assert_eq!(sink.last_batch().await.unwrap().cards.len(), 3);
        assert!(sink.last_pagination().await.unwrap().enabled);
        assert!(!browser.search_active().await);
    }

    #[tokio::test]
    async fn test_search_restores_page_active_before_it_began() {
        let (browser, sink) = browser_with(FakeFetcher::numbered(1302));
        browser.load_catalog().await;

        browser.show_page(5).await;
        browser.apply_search("mon-001").await;
        browser.apply_search("").await;

        let ui = sink.last_pagination().await.unwrap();
        assert_eq!(ui.current_page, 5);
        let batch = sink.last_batch().await.unwrap();
        assert_eq!(batch.cards.len(), 18);
        assert_eq!(batch.cards[0].dex_number, "073");
    }

    #[tokio::test]
    async fn test_search_with_zero_matches_renders_empty_grid() {
        let (browser, sink) = browser_with(FakeFetcher::new(&["pikachu", "pidgey"]));
        browser.load_catalog().await;

        browser.apply_search("zzz").await;
        assert!(sink.last_batch().await.unwrap().cards.is_empty());
        assert!(!sink.last_pagination().await.unwrap().enabled);
    }

    #[tokio::test]
    async fn test_lookup_by_name() {
        let (browser, sink) = browser_with(FakeFetcher::new(&["pikachu", "pidgey"]));
        browser.load_catalog().await;

        browser.lookup_by_name(" Pikachu ").await;
        let batch = sink.last_batch().await.unwrap();
        assert_eq!(batch.cards.len(), 1);
        assert_eq!(batch.cards[0].name, "Pikachu");

        // no exact match renders an empty grid, not an error
        browser.lookup_by_name("missingno").await;
        assert!(sink.last_batch().await.unwrap().cards.is_empty());
    }

    #[tokio::test]
    async fn test_degraded_load_keeps_browser_usable() {
        let mut fetcher = FakeFetcher::numbered(5);
        fetcher.listing_fails = true;
        let (browser, sink) = browser_with(fetcher);

        browser.load_catalog().await;

        assert_eq!(browser.total_count().await, 0);
        assert!(sink.last_batch().await.unwrap().cards.is_empty());
        let ui = sink.last_pagination().await.unwrap();
        assert_eq!(ui.max_page, 0);
        assert!(!ui.prev_enabled);
        assert!(!ui.next_enabled);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_batch_is_discarded() {
        let mut fetcher = FakeFetcher::numbered(40);
        fetcher.detail_delay = Duration::from_millis(100);
        let (browser, sink) = browser_with(fetcher);

        // seed the cache without going through slow detail fetches
        {
            let slow = browser.clone();
            tokio::spawn(async move { slow.load_catalog().await });
            tokio::time::sleep(Duration::from_millis(500)).await;
        }
        let rendered_before = sink.batches.lock().await.len();

        // start a slow page view, then supersede it with a lookup
        let slow = browser.clone();
        let handle = tokio::spawn(async move { slow.show_page(2).await });
        tokio::time::sleep(Duration::from_millis(10)).await;

        browser.lookup_by_name("mon-0001").await;
        handle.await.unwrap();

        let batches = sink.batches.lock().await;
        assert_eq!(batches.len(), rendered_before + 1);
        assert_eq!(batches.last().unwrap().cards[0].name, "Mon-0001");
    }

    #[test]
    fn test_normalize_term() {
        assert_eq!(normalize_term("  PIkachu "), "pikachu");
        assert_eq!(normalize_term("   "), "");
    }
}
