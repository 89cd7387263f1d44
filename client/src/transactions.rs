//! Builds, signs, broadcasts, and confirms transactions against the
//! configured cluster.
//!
//! One flow, no retries: assemble the instruction sequence, attach the latest
//! blockhash, sign (wallet last), broadcast with preflight disabled, then
//! optionally poll for a terminal status. A reported error status triggers a
//! single secondary round-trip to scrape the on-chain logs for human-readable
//! messages.

use std::time::Duration;

use solana_client::{
    nonblocking::rpc_client::RpcClient,
    rpc_config::{
        RpcSendTransactionConfig,
        RpcTransactionConfig,
    },
};
use solana_commitment_config::{
    CommitmentConfig,
    CommitmentLevel,
};
use solana_sdk::{
    hash::Hash,
    message::{
        Instruction,
        Message,
    },
    pubkey::Pubkey,
    signature::{
        Keypair,
        Signature,
    },
    transaction::Transaction,
};
use solana_transaction_error::TransactionError;
use solana_transaction_status::{
    EncodedConfirmedTransactionWithStatusMeta,
    TransactionStatus,
    UiTransactionEncoding,
};
use tokio::time::sleep;

use crate::{
    error::SendTransactionError,
    notify::{
        Notification,
        NotificationSink,
    },
    program_errors::extract_program_errors,
    wallet::WalletAdapter,
};

/// How long a confirmation poll waits between status requests.
const CONFIRMATION_POLL_INTERVAL: Duration = Duration::from_millis(400);
/// Poll attempts before a confirmation is considered timed out (~30s).
const CONFIRMATION_POLL_ATTEMPTS: usize = 75;

type SendResult<T> = Result<T, SendTransactionError>;

/// Builds an unsigned transaction from `instructions`, in order, with the fee
/// payer as the first required signer.
pub fn build_unsigned_transaction(fee_payer: &Pubkey, instructions: &[Instruction]) -> Transaction {
    let message = Message::new(instructions, Some(fee_payer));
    Transaction::new_unsigned(message)
}

/// Applies the additional `signers` first, then requests the wallet's own
/// signature, so the wallet always signs last.
pub async fn sign_transaction(
    transaction: &mut Transaction,
    wallet: &dyn WalletAdapter,
    signers: &[&Keypair],
    recent_blockhash: Hash,
) -> SendResult<()> {
    transaction.message.recent_blockhash = recent_blockhash;

    if !signers.is_empty() {
        transaction
            .try_partial_sign(signers, recent_blockhash)
            .map_err(|error| SendTransactionError::Signing(error.to_string()))?;
    }

    wallet.sign_transaction(transaction).await?;
    Ok(())
}

/// Submits a transaction built from `instructions` and returns its signature.
///
/// Fails with [`SendTransactionError::WalletNotConnected`] before any network
/// call when the wallet has no active identity. When `await_confirmation` is
/// false the signature is returned as soon as the broadcast is accepted, with
/// no status poll.
pub async fn send_transaction(
    rpc: &RpcClient,
    wallet: &dyn WalletAdapter,
    instructions: &[Instruction],
    signers: &[&Keypair],
    await_confirmation: bool,
    notifier: &dyn NotificationSink,
) -> SendResult<Signature> {
    let fee_payer = wallet
        .public_key()
        .ok_or(SendTransactionError::WalletNotConnected)?;

    let recent_blockhash = rpc.get_latest_blockhash().await?;
    let mut transaction = build_unsigned_transaction(&fee_payer, instructions);
    sign_transaction(&mut transaction, wallet, signers, recent_blockhash).await?;

    // Preflight is skipped; failures surface through the confirmation status
    // and the on-chain logs instead.
    let signature = rpc
        .send_transaction_with_config(
            &transaction,
            RpcSendTransactionConfig {
                skip_preflight: true,
                preflight_commitment: Some(CommitmentLevel::Processed),
                ..RpcSendTransactionConfig::default()
            },
        )
        .await?;

    if !await_confirmation {
        return Ok(signature);
    }

    let status =
        await_signature_confirmation(rpc, &signature, CommitmentConfig::processed()).await?;
    if let Some(status_error) = status.err {
        return Err(report_failed_transaction(rpc, signature, status_error, notifier).await);
    }

    Ok(signature)
}

/// Polls the signature status until it satisfies `commitment` or the poll
/// budget runs out. A terminal status is binary: an error is present or
/// absent, with no partial-success state.
pub async fn await_signature_confirmation(
    rpc: &RpcClient,
    signature: &Signature,
    commitment: CommitmentConfig,
) -> SendResult<TransactionStatus> {
    for _ in 0..CONFIRMATION_POLL_ATTEMPTS {
        let response = rpc.get_signature_statuses(&[*signature]).await?;
        if let Some(Some(status)) = response.value.into_iter().next() {
            if status.satisfies_commitment(commitment) {
                return Ok(status);
            }
        }

        sleep(CONFIRMATION_POLL_INTERVAL).await;
    }

    Err(SendTransactionError::ConfirmationTimeout {
        signature: *signature,
    })
}

/// Fetches the confirmed transaction record with JSON encoding.
pub async fn get_parsed_transaction(
    rpc: &RpcClient,
    signature: &Signature,
    commitment: CommitmentConfig,
) -> SendResult<EncodedConfirmedTransactionWithStatusMeta> {
    Ok(rpc
        .get_transaction_with_config(
            signature,
            RpcTransactionConfig {
                encoding: Some(UiTransactionEncoding::Json),
                commitment: Some(commitment),
                max_supported_transaction_version: Some(0),
            },
        )
        .await?)
}

/// The notification raised for a failed transaction: every scraped
/// `Error: <message>` line, in log order.
pub fn failure_notification(program_errors: &[String]) -> Notification {
    Notification::error("Transaction failed", program_errors.join("\n"))
}

/// The secondary round-trip for a failed transaction: wait for the stronger
/// commitment, fetch the parsed record, and scrape its logs.
async fn report_failed_transaction(
    rpc: &RpcClient,
    signature: Signature,
    status: TransactionError,
    notifier: &dyn NotificationSink,
) -> SendTransactionError {
    // The scrape is best effort; the raw status still gets surfaced when the
    // record can't be fetched.
    let program_errors = fetch_program_errors(rpc, &signature)
        .await
        .unwrap_or_default();

    notifier.notify(failure_notification(&program_errors));

    SendTransactionError::TransactionFailed {
        signature,
        status,
        program_errors,
    }
}

async fn fetch_program_errors(rpc: &RpcClient, signature: &Signature) -> SendResult<Vec<String>> {
    await_signature_confirmation(rpc, signature, CommitmentConfig::confirmed()).await?;
    let encoded = get_parsed_transaction(rpc, signature, CommitmentConfig::confirmed()).await?;

    let log_messages = match encoded.transaction.meta {
        Some(meta) => meta.log_messages.unwrap_or(vec![]),
        None => vec![],
    };

    Ok(extract_program_errors(&log_messages))
}
