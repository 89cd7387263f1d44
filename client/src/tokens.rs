//! Known-token metadata carried in the connection config.
//!
//! The list itself is supplied by the embedder; this module only models the
//! entries and derives the by-address lookup map.

use std::collections::HashMap;

use serde::{
    Deserialize,
    Serialize,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenInfo {
    /// The token's mint address.
    pub address: String,
    pub symbol: String,
    pub name: String,
    pub decimals: u8,
    #[serde(default, rename = "logoURI")]
    pub logo_uri: Option<String>,
}

/// Maps each token's mint address to its metadata. A later entry with the same
/// address wins.
pub fn token_map_by_address(tokens: &[TokenInfo]) -> HashMap<String, TokenInfo> {
    tokens
        .iter()
        .map(|token| (token.address.clone(), token.clone()))
        .collect()
}
