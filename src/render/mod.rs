//! Render surface seam
//!
//! The webview owns markup and styling; the backend hands it complete view
//! batches. Every batch replaces the previous grid contents, so "clear
//! before drawing" holds by construction.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tauri::Emitter;

use crate::browser::pagination::PaginationUi;
use crate::cards::CardView;

/// One rendered grid state: the cards, plus how many records were dropped
/// from the batch because their detail fetch failed
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RenderBatch {
    pub cards: Vec<CardView>,
    pub dropped: usize,
}

impl RenderBatch {
    pub fn new(cards: Vec<CardView>, dropped: usize) -> Self {
        Self { cards, dropped }
    }
}

/// Where view state gets published. The app wires this to Tauri events;
/// tests capture batches in memory.
#[async_trait]
pub trait RenderSink: Send + Sync {
    /// Replace the grid with this batch
    async fn render(&self, batch: RenderBatch);

    /// Toggle the loading indicator
    async fn set_loading(&self, loading: bool);

    /// Republish nav-button and page-strip state
    async fn publish_pagination(&self, ui: PaginationUi);
}

/// Render sink that forwards every batch to the webview as Tauri events
pub struct EventSink<R: tauri::Runtime> {
    app: tauri::AppHandle<R>,
}

impl<R: tauri::Runtime> EventSink<R> {
    pub fn new(app: tauri::AppHandle<R>) -> Self {
        Self { app }
    }
}

#[async_trait]
impl<R: tauri::Runtime> RenderSink for EventSink<R> {
    async fn render(&self, batch: RenderBatch) {
        let _ = self.app.emit("catalog-cards", &batch);
    }

    async fn set_loading(&self, loading: bool) {
        let _ = self.app.emit("catalog-loading", loading);
    }

    async fn publish_pagination(&self, ui: PaginationUi) {
        let _ = self.app.emit("catalog-pagination", &ui);
    }
}

/// In-memory sink for tests: records everything published to it
#[cfg(test)]
#[derive(Default)]
pub struct MemorySink {
    pub batches: tokio::sync::Mutex<Vec<RenderBatch>>,
    pub loading: tokio::sync::Mutex<Vec<bool>>,
    pub pagination: tokio::sync::Mutex<Vec<PaginationUi>>,
}

#[cfg(test)]
impl MemorySink {
    pub async fn last_batch(&self) -> Option<RenderBatch> {
        self.batches.lock().await.last().cloned()
    }

    pub async fn last_pagination(&self) -> Option<PaginationUi> {
        self.pagination.lock().await.last().cloned()
    }
}

#[cfg(test)]
#[async_trait]
impl RenderSink for MemorySink {
    async fn render(&self, batch: RenderBatch) {
        self.batches.lock().await.push(batch);
    }

    async fn set_loading(&self, loading: bool) {
        self.loading.lock().await.push(loading);
    }

    async fn publish_pagination(&self, ui: PaginationUi) {
        self.pagination.lock().await.push(ui);
    }
}
