//! Catalog browsing: pagination state, debounced search input, and the
//! controller that ties cache, fetches and the render sink together.

pub mod controller;
pub mod debounce;
pub mod pagination;

pub use controller::{BrowserConfig, CatalogBrowser};
pub use debounce::Debouncer;
pub use pagination::{PaginationState, PaginationUi};
