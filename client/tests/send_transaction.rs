use std::sync::Mutex;

use async_trait::async_trait;
use client::{
    error::SendTransactionError,
    notify::{
        Notification,
        NotificationSink,
    },
    transactions::{
        build_unsigned_transaction,
        failure_notification,
        send_transaction,
        sign_transaction,
    },
    wallet::{
        KeypairWallet,
        WalletAdapter,
        WalletError,
    },
};
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{
    hash::Hash,
    pubkey::Pubkey,
    signature::{
        Keypair,
        Signature,
        Signer,
    },
    transaction::Transaction,
};
use solana_system_interface::instruction::{
    create_account,
    transfer,
};

struct SilentNotifier;

impl NotificationSink for SilentNotifier {
    fn notify(&self, _notification: Notification) {}
}

struct DisconnectedWallet;

#[async_trait]
impl WalletAdapter for DisconnectedWallet {
    fn public_key(&self) -> Option<Pubkey> {
        None
    }

    async fn sign_transaction(&self, _transaction: &mut Transaction) -> Result<(), WalletError> {
        Err(WalletError::NotConnected)
    }
}

/// Records how many signatures were already applied when the wallet was asked
/// to sign, to verify the wallet always signs last.
struct RecordingWallet {
    keypair: Keypair,
    signatures_seen_before_signing: Mutex<Option<usize>>,
}

impl RecordingWallet {
    fn new(keypair: Keypair) -> Self {
        Self {
            keypair,
            signatures_seen_before_signing: Mutex::new(None),
        }
    }
}

#[async_trait]
impl WalletAdapter for RecordingWallet {
    fn public_key(&self) -> Option<Pubkey> {
        Some(self.keypair.pubkey())
    }

    async fn sign_transaction(&self, transaction: &mut Transaction) -> Result<(), WalletError> {
        let applied = transaction
            .signatures
            .iter()
            .filter(|signature| **signature != Signature::default())
            .count();
        *self
            .signatures_seen_before_signing
            .lock()
            .expect("Lock shouldn't be poisoned") = Some(applied);

        let recent_blockhash = transaction.message.recent_blockhash;
        transaction
            .try_partial_sign(&[&self.keypair], recent_blockhash)
            .map_err(|error| WalletError::SigningFailed(error.to_string()))
    }
}

#[tokio::test]
async fn fails_before_any_network_call_without_a_wallet_identity() {
    // An unroutable url: touching the network at all would fail differently.
    let rpc = RpcClient::new("http://invalid.localhost:0".to_string());

    let result = send_transaction(&rpc, &DisconnectedWallet, &[], &[], true, &SilentNotifier).await;

    assert!(matches!(
        result,
        Err(SendTransactionError::WalletNotConnected)
    ));
}

#[tokio::test]
async fn wallet_signs_last_after_additional_signers() -> anyhow::Result<()> {
    let wallet = RecordingWallet::new(Keypair::new());
    let new_account = Keypair::new();
    let payer = wallet.keypair.pubkey();

    // create_account requires both the funder's and the new account's
    // signatures.
    let instruction = create_account(
        &payer,
        &new_account.pubkey(),
        1_000_000,
        0,
        &Pubkey::new_unique(),
    );

    let mut transaction = build_unsigned_transaction(&payer, &[instruction]);
    sign_transaction(&mut transaction, &wallet, &[&new_account], Hash::new_unique()).await?;

    // Fee payer first, then the additional signer.
    let required = transaction.message.header.num_required_signatures as usize;
    assert_eq!(required, 2);
    assert_eq!(transaction.message.account_keys[0], payer);
    assert_eq!(transaction.message.account_keys[1], new_account.pubkey());

    // The additional signature was already in place when the wallet signed.
    let seen = *wallet
        .signatures_seen_before_signing
        .lock()
        .expect("Lock shouldn't be poisoned");
    assert_eq!(seen, Some(1));
    assert!(transaction.is_signed());

    Ok(())
}

#[tokio::test]
async fn sole_signer_transaction_only_requires_the_fee_payer() -> anyhow::Result<()> {
    let wallet = RecordingWallet::new(Keypair::new());
    let payer = wallet.keypair.pubkey();
    let instruction = transfer(&payer, &Pubkey::new_unique(), 1);

    let mut transaction = build_unsigned_transaction(&payer, &[instruction]);
    sign_transaction(&mut transaction, &wallet, &[], Hash::new_unique()).await?;

    assert_eq!(transaction.message.header.num_required_signatures, 1);
    assert_eq!(transaction.message.account_keys[0], payer);

    let seen = *wallet
        .signatures_seen_before_signing
        .lock()
        .expect("Lock shouldn't be poisoned");
    assert_eq!(seen, Some(0));
    assert!(transaction.is_signed());

    Ok(())
}

#[tokio::test]
async fn returns_the_signature_without_polling_when_confirmation_is_not_awaited(
) -> anyhow::Result<()> {
    let rpc = RpcClient::new_mock("succeeds".to_string());
    let payer = Keypair::new();
    let instruction = transfer(&payer.pubkey(), &Pubkey::new_unique(), 1);
    let wallet = KeypairWallet::new(payer);

    let signature = send_transaction(
        &rpc,
        &wallet,
        &[instruction],
        &[],
        false,
        &SilentNotifier,
    )
    .await?;

    assert_ne!(signature, Signature::default());
    Ok(())
}

#[test]
fn failure_notification_lists_scraped_errors_in_order() {
    let program_errors = vec![
        "insufficient funds for rent".to_string(),
        "transfer hook rejected".to_string(),
    ];

    let notification = failure_notification(&program_errors);

    assert_eq!(notification.message, "Transaction failed");
    assert_eq!(
        notification.description,
        "insufficient funds for rent\ntransfer hook rejected"
    );
}
