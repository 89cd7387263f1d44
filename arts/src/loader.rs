//! Detail-view load path: find the record, then resolve owner and display
//! image without blocking on either.

use std::str::FromStr;

use client::logs::log_warning;
use futures::join;
use solana_sdk::pubkey::Pubkey;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

use crate::{
    art::Art,
    directory::ArtDirectory,
};

#[derive(Debug, Error)]
pub enum LoadError {
    /// The detail view went away mid-flight.
    #[error("art detail load was cancelled")]
    Cancelled,

    #[error(transparent)]
    Directory(#[from] anyhow::Error),
}

/// What the detail view renders. Every field is optional: a record that never
/// turns up, or an owner/image resolution that fails, leaves its slot empty
/// rather than failing the whole load.
#[derive(Debug, Clone, Default)]
pub struct ArtDetail {
    pub art: Option<Art>,
    pub owner: Option<Pubkey>,
    pub image: Option<String>,
}

/// Loads the detail view's data for the art record at `art_account`.
///
/// Looks the identifier up in the in-memory collection; if absent, refetches
/// the collection exactly once and retries. The retry's result is final — a
/// record that is still missing renders as an empty detail with no error
/// state. Owner and image resolve as two independent concurrent steps.
pub async fn load_art_detail(
    directory: &dyn ArtDirectory,
    http: &reqwest::Client,
    art_account: &str,
    cancel: &CancellationToken,
) -> Result<ArtDetail, LoadError> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(LoadError::Cancelled),
        detail = load_detail(directory, http, art_account) => detail,
    }
}

async fn load_detail(
    directory: &dyn ArtDirectory,
    http: &reqwest::Client,
    art_account: &str,
) -> Result<ArtDetail, LoadError> {
    let mut art = find_art(directory, art_account);
    if art.is_none() {
        directory.refresh().await?;
        art = find_art(directory, art_account);
    }

    let Some(art) = art else {
        // Known gap: an absent record renders as an empty detail rather than
        // an error.
        log_warning("Art not found", art_account);
        return Ok(ArtDetail::default());
    };

    let minted_token = Pubkey::from_str(&art.metadata.minted_token_pubkey).ok();
    let owner_resolution = async {
        match &minted_token {
            Some(mint) => directory.art_owner(mint).await.ok(),
            None => None,
        }
    };
    let image_resolution = resolve_image(http, &art);

    let (owner, image) = join!(owner_resolution, image_resolution);

    Ok(ArtDetail {
        art: Some(art),
        owner,
        image,
    })
}

fn find_art(directory: &dyn ArtDirectory, art_account: &str) -> Option<Art> {
    directory
        .arts()
        .into_iter()
        .find(|art| art.metadata.art_account_pubkey == art_account)
}

/// Resolves the display image: a direct image url wins; otherwise the
/// off-chain metadata document is fetched and its `image` field used.
pub async fn resolve_image(http: &reqwest::Client, art: &Art) -> Option<String> {
    if let Some(image) = &art.metadata.image {
        return Some(image.clone());
    }

    let uri = art.metadata.uri.as_ref()?;
    let text = http.get(uri).send().await.ok()?.text().await.ok()?;
    let document: serde_json::Value = serde_json::from_str(&text).ok()?;
    document.get("image")?.as_str().map(str::to_string)
}
