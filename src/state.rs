// State management for Pokedex-Local

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, MutexGuard, RwLock};

use crate::browser::controller::CatalogBrowser;
use crate::browser::debounce::{Debouncer, SEARCH_DEBOUNCE_MS};

pub struct AppState {
    /// Catalog browser, created in setup once the webview sink exists
    browser: Arc<RwLock<Option<Arc<CatalogBrowser>>>>,
    /// Debounce timer for search input
    search_debounce: Mutex<Debouncer>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            browser: Arc::new(RwLock::new(None)),
            search_debounce: Mutex::new(Debouncer::new(Duration::from_millis(
                SEARCH_DEBOUNCE_MS,
            ))),
        }
    }

    /// Store the browser and hand back the Arc for background tasks
    pub async fn init_browser(&self, browser: CatalogBrowser) -> Arc<CatalogBrowser> {
        let browser = Arc::new(browser);
        let mut guard = self.browser.write().await;
        *guard = Some(browser.clone());
        browser
    }

    /// Get the browser Arc for cloning, None before setup finished
    pub async fn browser(&self) -> Option<Arc<CatalogBrowser>> {
        self.browser.read().await.clone()
    }

    /// Get the search debouncer
    pub async fn debounce(&self) -> MutexGuard<'_, Debouncer> {
        self.search_debounce.lock().await
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
