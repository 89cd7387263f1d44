//! The external data context supplying art records and ownership.

use std::{
    str::FromStr,
    sync::{
        Arc,
        RwLock,
    },
};

use anyhow::Context;
use async_trait::async_trait;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::pubkey::Pubkey;

use crate::art::{
    Art,
    ArtMetadata,
};

#[async_trait]
pub trait ArtDirectory: Send + Sync {
    /// Snapshot of the in-memory collection.
    fn arts(&self) -> Vec<Art>;

    /// Refetches the full collection.
    async fn refresh(&self) -> anyhow::Result<()>;

    /// Resolves the current holder of the minted token.
    async fn art_owner(&self, minted_token: &Pubkey) -> anyhow::Result<Pubkey>;

    /// Looks up art metadata by the minted token's key.
    fn art_meta_by_mint_key(&self, minted_token: &str) -> Option<ArtMetadata>;
}

/// Directory backed by the gallery's list endpoint for records and the RPC
/// node for ownership.
pub struct RpcArtDirectory {
    rpc: Arc<RpcClient>,
    http: reqwest::Client,
    /// Gallery endpoint serving the full art list as JSON.
    list_url: String,
    arts: RwLock<Vec<Art>>,
}

impl RpcArtDirectory {
    pub fn new(rpc: Arc<RpcClient>, http: reqwest::Client, list_url: impl Into<String>) -> Self {
        Self {
            rpc,
            http,
            list_url: list_url.into(),
            arts: RwLock::new(vec![]),
        }
    }
}

#[async_trait]
impl ArtDirectory for RpcArtDirectory {
    fn arts(&self) -> Vec<Art> {
        self.arts
            .read()
            .expect("Art collection lock shouldn't be poisoned")
            .clone()
    }

    async fn refresh(&self) -> anyhow::Result<()> {
        let response = self.http.get(&self.list_url).send().await?;
        let text = response.text().await?;
        let fetched: Vec<Art> =
            serde_json::from_str(&text).context("Couldn't parse the art list")?;

        *self
            .arts
            .write()
            .expect("Art collection lock shouldn't be poisoned") = fetched;
        Ok(())
    }

    async fn art_owner(&self, minted_token: &Pubkey) -> anyhow::Result<Pubkey> {
        let largest = self.rpc.get_token_largest_accounts(minted_token).await?;
        let holder = largest
            .first()
            .context("Minted token has no holding accounts")?;
        let holder_address = Pubkey::from_str(&holder.address)
            .context("Holding account address should be a valid pubkey")?;

        let token_account = self
            .rpc
            .get_token_account(&holder_address)
            .await?
            .context("Holding token account should exist")?;

        Pubkey::from_str(&token_account.owner).context("Owner should be a valid pubkey")
    }

    fn art_meta_by_mint_key(&self, minted_token: &str) -> Option<ArtMetadata> {
        self.arts
            .read()
            .expect("Art collection lock shouldn't be poisoned")
            .iter()
            .find(|art| art.metadata.minted_token_pubkey == minted_token)
            .map(|art| art.metadata.clone())
    }
}
