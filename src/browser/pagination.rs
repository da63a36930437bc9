//! Pagination state and the visible page-number window

use serde::{Deserialize, Serialize};

/// How many consecutive page numbers the strip shows
const MAX_VISIBLE_PAGES: u32 = 3;

/// Current page, fixed page size and the total record count
#[derive(Debug, Clone, Copy)]
pub struct PaginationState {
    pub current_page: u32,
    pub page_size: u32,
    pub total_count: u32,
}

/// The visible part of the page strip: a short run of consecutive pages,
/// plus the last page shown after an ellipsis when the run stops short
#[derive(Debug, Clone, PartialEq)]
pub struct PageWindow {
    pub pages: Vec<u32>,
    pub trailing: Option<u32>,
}

/// Pagination payload published to the frontend after every render
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaginationUi {
    pub current_page: u32,
    pub max_page: u32,
    /// Consecutive page numbers to show
    pub pages: Vec<u32>,
    /// Last page, preceded by an ellipsis, when the window stops short of it
    pub trailing: Option<u32>,
    pub prev_enabled: bool,
    pub next_enabled: bool,
    /// False while a search term is active; the strip is hidden entirely
    pub enabled: bool,
}

impl PaginationState {
    pub fn new(page_size: u32) -> Self {
        Self {
            current_page: 1,
            page_size,
            total_count: 0,
        }
    }

    pub fn max_page(&self) -> u32 {
        if self.page_size == 0 {
            return 0;
        }
        self.total_count.div_ceil(self.page_size)
    }

    /// Clamp a navigation target into [1, max_page] (or 1 when empty)
    pub fn clamp(&self, page: u32) -> u32 {
        page.max(1).min(self.max_page().max(1))
    }

    /// At most three consecutive page numbers around the current one. The
    /// window anchors one page left of current, shifts left when it hits
    /// the end of the strip, and is followed by the last page (rendered
    /// behind an ellipsis) whenever it stops short of it.
    pub fn window(&self) -> PageWindow {
        let max_page = self.max_page();
        if max_page == 0 {
            return PageWindow {
                pages: Vec::new(),
                trailing: None,
            };
        }

        let mut start = self.current_page.saturating_sub(1).max(1);
        let end = (start + MAX_VISIBLE_PAGES - 1).min(max_page);
        if end - start + 1 < MAX_VISIBLE_PAGES {
            start = end.saturating_sub(MAX_VISIBLE_PAGES - 1).max(1);
        }

        PageWindow {
            pages: (start..=end).collect(),
            trailing: (end < max_page).then_some(max_page),
        }
    }

    /// The full strip payload. With `enabled` false the strip is emptied
    /// and both nav buttons disabled, which is how search suppresses
    /// pagination without losing the underlying page.
    pub fn ui(&self, enabled: bool) -> PaginationUi {
        if !enabled {
            return PaginationUi {
                current_page: self.current_page,
                max_page: self.max_page(),
                pages: Vec::new(),
                trailing: None,
                prev_enabled: false,
                next_enabled: false,
                enabled: false,
            };
        }

        let window = self.window();
        PaginationUi {
            current_page: self.current_page,
            max_page: self.max_page(),
            pages: window.pages,
            trailing: window.trailing,
            prev_enabled: self.current_page > 1,
            next_enabled: self.current_page < self.max_page(),
            enabled: true,
        }
    }
}
