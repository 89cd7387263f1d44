//! Sends a small self-transfer through the connection layer against a local
//! validator.

use client::{
    logs::log_success,
    settings::{
        Endpoint,
        Settings,
    },
    wallet::KeypairWallet,
    ConnectionContext,
};
use solana_sdk::signature::{
    Keypair,
    Signer,
};
use solana_system_interface::instruction::transfer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings {
        endpoint: Endpoint::Localnet,
        ..Settings::default()
    };
    let connection = ConnectionContext::new(&settings);

    let payer = Keypair::new();
    let payer_pubkey = payer.pubkey();

    let airdrop = connection
        .rpc()
        .request_airdrop(&payer_pubkey, 1_000_000_000)
        .await?;
    while !connection.rpc().confirm_transaction(&airdrop).await? {
        tokio::time::sleep(std::time::Duration::from_millis(500)).await;
    }

    let wallet = KeypairWallet::new(payer);
    let instruction = transfer(&payer_pubkey, &payer_pubkey, 1_000_000);

    let signature = connection
        .send_transaction(&wallet, &[instruction], &[], true)
        .await?;
    log_success("Signature", signature);

    Ok(())
}
