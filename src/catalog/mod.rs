//! Remote catalog access
//!
//! Wire types for the PokeAPI-compatible endpoints, the HTTP client behind
//! the fetcher trait, and the in-memory cache of lightweight records.

pub mod cache;
pub mod client;
pub mod error;
pub mod types;

pub use cache::CatalogCache;
pub use client::{CatalogClient, CatalogFetcher, ClientConfig};
pub use error::CatalogError;
pub use types::{EntrySummary, ListingPage, PokemonDetail};
