//! Durable connection settings, rehydrated across sessions.
//!
//! Two settings survive restarts: the cluster endpoint and the swap slippage.
//! Persisted field names match the stored keys the gallery has always used.

use std::{
    fs,
    path::Path,
};

use anyhow::Context;
use serde::{
    Deserialize,
    Serialize,
};

pub const DEFAULT_SLIPPAGE: f64 = 0.25;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum_macros::Display,
    strum_macros::EnumString,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum Endpoint {
    MainnetBeta,
    Testnet,
    Devnet,
    Localnet,
}

impl Endpoint {
    pub fn url(&self) -> &'static str {
        match self {
            Self::MainnetBeta => "https://api.mainnet-beta.solana.com",
            Self::Testnet => "https://api.testnet.solana.com",
            Self::Devnet => "https://api.devnet.solana.com",
            Self::Localnet => "http://127.0.0.1:8899",
        }
    }

    /// The websocket url derived from the http url (http -> ws, https -> wss).
    pub fn ws_url(&self) -> String {
        let url = self.url();
        match url.strip_prefix("https") {
            Some(rest) => format!("wss{rest}"),
            None => match url.strip_prefix("http") {
                Some(rest) => format!("ws{rest}"),
                None => url.to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(rename = "connectionEndpts")]
    pub endpoint: Endpoint,
    pub slippage: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint: Endpoint::MainnetBeta,
            slippage: DEFAULT_SLIPPAGE,
        }
    }
}

impl Settings {
    /// Rehydrates persisted settings, falling back to defaults when the file
    /// is missing or unreadable.
    pub fn load(path: impl AsRef<Path>) -> Self {
        fs::read_to_string(path)
            .ok()
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default()
    }

    pub fn save(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let raw = serde_json::to_string_pretty(self)?;
        fs::write(path, raw).context("Couldn't persist settings")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let settings = Settings::load("/nonexistent/gallery-settings.json");
        assert_eq!(settings.endpoint, Endpoint::MainnetBeta);
        assert_eq!(settings.slippage, DEFAULT_SLIPPAGE);
    }

    #[test]
    fn save_then_load_round_trips() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("settings.json");

        let settings = Settings {
            endpoint: Endpoint::Devnet,
            slippage: 0.5,
        };
        settings.save(&path)?;

        assert_eq!(Settings::load(&path), settings);
        Ok(())
    }

    #[test]
    fn persisted_keys_match_the_stored_setting_names() -> anyhow::Result<()> {
        let raw = serde_json::to_string(&Settings::default())?;
        assert!(raw.contains("connectionEndpts"));
        assert!(raw.contains("slippage"));
        Ok(())
    }

    #[test]
    fn websocket_url_swaps_the_scheme() {
        assert_eq!(Endpoint::Devnet.ws_url(), "wss://api.devnet.solana.com");
        assert_eq!(Endpoint::Localnet.ws_url(), "ws://127.0.0.1:8899");
    }
}
