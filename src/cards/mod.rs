//! Card view-models for the grid
//!
//! Everything the webview needs to draw one card, derived from the raw
//! detail record: zero-padded dex number, capitalized display name, type
//! tags (the first one drives the color scheme) and an image URL picked
//! through a fallback chain.

use serde::{Deserialize, Serialize};

use crate::catalog::types::PokemonDetail;

/// Bundled asset shown when a record carries no usable sprite URL at all
pub const PLACEHOLDER_IMAGE: &str = "assets/placeholder.png";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CardView {
    pub id: u32,
    /// Zero-padded 3-digit identifier, e.g. "025"
    pub dex_number: String,
    /// Capitalized display name, e.g. "Pikachu"
    pub name: String,
    /// First type tag, lowercased as the API ships it; styles the card
    pub primary_type: String,
    /// All type tags, capitalized for display
    pub type_labels: Vec<String>,
    pub image_url: String,
}

impl CardView {
    pub fn from_detail(detail: &PokemonDetail) -> Self {
        Self {
            id: detail.id,
            dex_number: format!("{:03}", detail.id),
            name: capitalize(&detail.name),
            primary_type: detail
                .types
                .first()
                .map(|slot| slot.kind.name.clone())
                .unwrap_or_default(),
            type_labels: detail
                .types
                .iter()
                .map(|slot| capitalize(&slot.kind.name))
                .collect(),
            image_url: image_for(detail),
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Image fallback chain: official artwork, then the dream_world rendition,
/// then the plain default sprite, then the bundled placeholder.
fn image_for(detail: &PokemonDetail) -> String {
    if let Some(other) = &detail.sprites.other {
        if let Some(url) = other
            .official_artwork
            .as_ref()
            .and_then(|art| art.front_default.clone())
        {
            return url;
        }
        if let Some(url) = other
            .dream_world
            .as_ref()
            .and_then(|art| art.front_default.clone())
        {
            return url;
        }
    }

    detail
        .sprites
        .front_default
        .clone()
        .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string())
}
