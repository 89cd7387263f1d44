//! Art record model mirrored from the gallery's metadata service.

use serde::{
    Deserialize,
    Serialize,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Art {
    pub metadata: ArtMetadata,
    #[serde(default)]
    pub attributes: Vec<ArtAttribute>,
    #[serde(default)]
    pub rarity: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtMetadata {
    /// The on-chain account the art record lives in. Opaque: only ever
    /// compared for equality against the route identifier.
    #[serde(rename = "artAccountPubkey")]
    pub art_account_pubkey: String,
    pub minted_token_pubkey: String,
    pub art_hash: String,
    #[serde(default)]
    pub title: Option<String>,
    /// Off-chain metadata document holding the display image, if any.
    #[serde(default)]
    pub uri: Option<String>,
    /// Direct image url; takes precedence over the metadata document.
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtAttribute {
    pub trait_type: String,
    pub value: String,
}
