//! Failure taxonomy for the submission path.

use solana_client::client_error::ClientError;
use solana_sdk::signature::Signature;
use solana_transaction_error::TransactionError;
use thiserror::Error;

use crate::wallet::WalletError;

#[derive(Debug, Error)]
pub enum SendTransactionError {
    /// Precondition failure, raised before any network call.
    #[error("wallet is not connected")]
    WalletNotConnected,

    #[error("failed to sign transaction: {0}")]
    Signing(String),

    #[error(transparent)]
    Rpc(#[from] ClientError),

    #[error("transaction {signature} was not confirmed within the poll budget")]
    ConfirmationTimeout { signature: Signature },

    /// The network reported an error status. Carries the raw status and
    /// whatever human-readable lines the log scrape recovered.
    #[error("transaction {signature} failed: {status:?}")]
    TransactionFailed {
        signature: Signature,
        status: TransactionError,
        program_errors: Vec<String>,
    },
}

impl From<WalletError> for SendTransactionError {
    fn from(error: WalletError) -> Self {
        match error {
            WalletError::NotConnected => Self::WalletNotConnected,
            WalletError::SigningFailed(msg) => Self::Signing(msg),
        }
    }
}
