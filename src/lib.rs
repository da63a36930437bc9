// Pokedex-Local - Desktop catalog browser for the PokeAPI
//
// The Rust side owns everything except markup:
// - Bulk catalog cache (one large upfront listing fetch)
// - Page resolution with concurrent detail fetches
// - Debounced name-prefix search plus exact-name lookup
// - Card view-model derivation for the webview grid

use std::sync::Arc;

// Global state
pub mod globals;

// Core modules
pub mod browser;
pub mod cards;
pub mod catalog;
pub mod render;
pub mod state;

use browser::controller::{BrowserConfig, CatalogBrowser};
use browser::pagination::PaginationUi;
use catalog::client::CatalogClient;
use log::{debug as log_debug, info as log_info};
use render::EventSink;
use tauri::Manager;

// ============== Catalog Commands ==============

/// Throw away the cache and bulk-load the catalog again
#[tauri::command]
async fn catalog_reload(state: tauri::State<'_, state::AppState>) -> Result<(), String> {
    if globals::is_busy() {
        log_debug!("Ignoring reload while a load is in flight");
        return Ok(());
    }
    let browser = state
        .browser()
        .await
        .ok_or("Catalog browser not initialized")?;
    browser.load_catalog().await;
    Ok(())
}

#[tauri::command]
async fn catalog_show_page(
    page: u32,
    state: tauri::State<'_, state::AppState>,
) -> Result<(), String> {
    if globals::is_busy() {
        log_debug!("Ignoring page change while a load is in flight");
        return Ok(());
    }
    let browser = state
        .browser()
        .await
        .ok_or("Catalog browser not initialized")?;
    browser.show_page(page).await;
    Ok(())
}

#[tauri::command]
async fn catalog_next_page(state: tauri::State<'_, state::AppState>) -> Result<(), String> {
    if globals::is_busy() {
        return Ok(());
    }
    let browser = state
        .browser()
        .await
        .ok_or("Catalog browser not initialized")?;
    browser.next_page().await;
    Ok(())
}

#[tauri::command]
async fn catalog_prev_page(state: tauri::State<'_, state::AppState>) -> Result<(), String> {
    if globals::is_busy() {
        return Ok(());
    }
    let browser = state
        .browser()
        .await
        .ok_or("Catalog browser not initialized")?;
    browser.prev_page().await;
    Ok(())
}

// ============== Search Commands ==============

/// Keystroke handler: re-arms the debounce timer; the prefix filter runs
/// once the input has been quiet for the debounce interval
#[tauri::command]
async fn catalog_search_input(
    term: String,
    state: tauri::State<'_, state::AppState>,
) -> Result<(), String> {
    let browser = state
        .browser()
        .await
        .ok_or("Catalog browser not initialized")?;

    state.debounce().await.arm(async move {
        browser.apply_search(&term).await;
    });
    Ok(())
}

/// Submit handler (Enter): skips the debounce and asks the remote search
/// endpoint for an exact-name match
#[tauri::command]
async fn catalog_search_submit(
    term: String,
    state: tauri::State<'_, state::AppState>,
) -> Result<(), String> {
    let browser = state
        .browser()
        .await
        .ok_or("Catalog browser not initialized")?;

    state.debounce().await.cancel();
    browser.lookup_by_name(&term).await;
    Ok(())
}

// ============== Status Commands ==============

#[tauri::command]
async fn catalog_pagination(
    state: tauri::State<'_, state::AppState>,
) -> Result<PaginationUi, String> {
    let browser = state
        .browser()
        .await
        .ok_or("Catalog browser not initialized")?;
    Ok(browser.pagination_ui().await)
}

#[tauri::command]
async fn catalog_count(state: tauri::State<'_, state::AppState>) -> Result<u32, String> {
    let browser = state
        .browser()
        .await
        .ok_or("Catalog browser not initialized")?;
    Ok(browser.total_count().await)
}

#[tauri::command]
async fn catalog_is_searching(state: tauri::State<'_, state::AppState>) -> Result<bool, String> {
    let browser = state
        .browser()
        .await
        .ok_or("Catalog browser not initialized")?;
    Ok(browser.search_active().await)
}

#[tauri::command]
fn catalog_is_busy() -> bool {
    globals::is_busy()
}

// ============== Main App Entry ==============

pub fn run() {
    // Initialize env_logger to output to stderr (reads RUST_LOG env var)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    tauri::Builder::default()
        .manage(state::AppState::new())
        .setup(|app| {
            log_info!("Pokedex-Local application setup starting...");

            let sink = EventSink::new(app.handle().clone());
            let client = CatalogClient::with_default_config();
            let browser = CatalogBrowser::new(
                Arc::new(client),
                Arc::new(sink),
                BrowserConfig::default(),
            );

            let app_state: tauri::State<state::AppState> = app.state();
            let browser =
                tauri::async_runtime::block_on(async { app_state.init_browser(browser).await });

            // Bulk-load the catalog in the background so the window shows
            // immediately; the loading indicator covers the wait
            tauri::async_runtime::spawn(async move {
                browser.load_catalog().await;
            });

            log_info!("Pokedex-Local application setup complete");
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            // Catalog commands
            catalog_reload,
            catalog_show_page,
            catalog_next_page,
            catalog_prev_page,
            // Search commands
            catalog_search_input,
            catalog_search_submit,
            // Status commands
            catalog_pagination,
            catalog_count,
            catalog_is_searching,
            catalog_is_busy,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
