//! Wire types for the remote catalog API

use serde::Deserialize;

/// One lightweight entry from the listing endpoint: name plus the opaque
/// detail URL. These live for the lifetime of the cache and are never
/// mutated after the bulk load.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct EntrySummary {
    pub name: String,
    pub url: String,
}

/// One page of the listing endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct ListingPage {
    #[serde(default)]
    pub count: u32,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    #[serde(default)]
    pub results: Vec<EntrySummary>,
}

/// Full detail record for one catalog entry. Fetched per view and never
/// cached; only the fields the card derivation needs are decoded.
#[derive(Debug, Clone, Deserialize)]
pub struct PokemonDetail {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub sprites: Sprites,
    #[serde(default)]
    pub types: Vec<TypeSlot>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Sprites {
    #[serde(default)]
    pub front_default: Option<String>,
    #[serde(default)]
    pub other: Option<OtherSprites>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OtherSprites {
    #[serde(rename = "official-artwork", default)]
    pub official_artwork: Option<ArtworkSprite>,
    #[serde(default)]
    pub dream_world: Option<ArtworkSprite>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArtworkSprite {
    #[serde(default)]
    pub front_default: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TypeSlot {
    #[serde(rename = "type")]
    pub kind: TypeName,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TypeName {
    pub name: String,
}
