//! Wallet seam for transaction signing.
//!
//! A wallet may be backed by a local keypair or by an external signer that
//! holds its key elsewhere; the adapter only promises an optional public
//! identity and a signature over a fully built transaction. The submission
//! path always requests the wallet's signature after every additional signer
//! has been applied.

use async_trait::async_trait;
use solana_sdk::{
    pubkey::Pubkey,
    signature::{
        Keypair,
        Signer,
    },
    transaction::Transaction,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WalletError {
    #[error("wallet is not connected")]
    NotConnected,
    #[error("wallet failed to sign: {0}")]
    SigningFailed(String),
}

#[async_trait]
pub trait WalletAdapter: Send + Sync {
    /// The wallet's active public identity, or `None` while disconnected.
    fn public_key(&self) -> Option<Pubkey>;

    /// Signs the transaction in place as the fee payer.
    async fn sign_transaction(&self, transaction: &mut Transaction) -> Result<(), WalletError>;
}

/// In-process wallet backed by a local [`Keypair`].
pub struct KeypairWallet {
    keypair: Keypair,
}

impl KeypairWallet {
    pub fn new(keypair: Keypair) -> Self {
        Self { keypair }
    }
}

#[async_trait]
impl WalletAdapter for KeypairWallet {
    fn public_key(&self) -> Option<Pubkey> {
        Some(self.keypair.pubkey())
    }

    async fn sign_transaction(&self, transaction: &mut Transaction) -> Result<(), WalletError> {
        let recent_blockhash = transaction.message.recent_blockhash;
        transaction
            .try_partial_sign(&[&self.keypair], recent_blockhash)
            .map_err(|error| WalletError::SigningFailed(error.to_string()))
    }
}
