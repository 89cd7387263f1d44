//! Process-wide connection state with an explicit lifecycle: created at
//! startup, replaced wholesale when the endpoint setting changes, disposed on
//! replacement.

use std::{
    collections::HashMap,
    sync::Arc,
};

use solana_client::nonblocking::{
    pubsub_client::PubsubClient,
    rpc_client::RpcClient,
};
use solana_commitment_config::CommitmentConfig;
use solana_sdk::{
    message::Instruction,
    signature::{
        Keypair,
        Signature,
    },
};
use tokio::task::JoinHandle;
use tokio_stream::StreamExt;

use crate::{
    error::SendTransactionError,
    notify::{
        LogNotifier,
        NotificationSink,
    },
    settings::{
        Endpoint,
        Settings,
    },
    tokens::{
        token_map_by_address,
        TokenInfo,
    },
    transactions,
    wallet::WalletAdapter,
};

/// Long-lived connection resources plus the user-facing config they were
/// created from. Must be constructed inside a tokio runtime: each client gets
/// a keep-alive subscription task.
pub struct ConnectionContext {
    endpoint: Endpoint,
    /// Read-side client: account and transaction queries.
    rpc: Arc<RpcClient>,
    /// Send-side client: transaction broadcasting.
    send_rpc: Arc<RpcClient>,
    keepalive: Vec<JoinHandle<()>>,
    slippage: f64,
    tokens: Vec<TokenInfo>,
    token_map: HashMap<String, TokenInfo>,
    notifier: Arc<dyn NotificationSink>,
}

impl ConnectionContext {
    pub fn new(settings: &Settings) -> Self {
        Self::with_notifier(settings, Arc::new(LogNotifier))
    }

    pub fn with_notifier(settings: &Settings, notifier: Arc<dyn NotificationSink>) -> Self {
        let (rpc, send_rpc, keepalive) = connect(settings.endpoint);

        Self {
            endpoint: settings.endpoint,
            rpc,
            send_rpc,
            keepalive,
            slippage: settings.slippage,
            tokens: vec![],
            token_map: HashMap::new(),
            notifier,
        }
    }

    pub fn endpoint(&self) -> Endpoint {
        self.endpoint
    }

    pub fn rpc(&self) -> &Arc<RpcClient> {
        &self.rpc
    }

    pub fn send_rpc(&self) -> &Arc<RpcClient> {
        &self.send_rpc
    }

    pub fn slippage(&self) -> f64 {
        self.slippage
    }

    pub fn tokens(&self) -> &[TokenInfo] {
        &self.tokens
    }

    pub fn token_map(&self) -> &HashMap<String, TokenInfo> {
        &self.token_map
    }

    /// Replaces both clients and their keep-alive tasks wholesale. A no-op
    /// when the endpoint is unchanged.
    pub fn set_endpoint(&mut self, endpoint: Endpoint) {
        if endpoint == self.endpoint {
            return;
        }

        self.dispose();
        let (rpc, send_rpc, keepalive) = connect(endpoint);
        self.endpoint = endpoint;
        self.rpc = rpc;
        self.send_rpc = send_rpc;
        self.keepalive = keepalive;
    }

    pub fn set_slippage(&mut self, slippage: f64) {
        self.slippage = slippage;
    }

    pub fn set_token_list(&mut self, tokens: Vec<TokenInfo>) {
        self.token_map = token_map_by_address(&tokens);
        self.tokens = tokens;
    }

    /// Submits through the send-side client, reporting failures through the
    /// context's notification sink.
    pub async fn send_transaction(
        &self,
        wallet: &dyn WalletAdapter,
        instructions: &[Instruction],
        signers: &[&Keypair],
        await_confirmation: bool,
    ) -> Result<Signature, SendTransactionError> {
        transactions::send_transaction(
            &self.send_rpc,
            wallet,
            instructions,
            signers,
            await_confirmation,
            self.notifier.as_ref(),
        )
        .await
    }

    fn dispose(&mut self) {
        for task in self.keepalive.drain(..) {
            task.abort();
        }
    }
}

impl Drop for ConnectionContext {
    fn drop(&mut self) {
        self.dispose();
    }
}

fn connect(endpoint: Endpoint) -> (Arc<RpcClient>, Arc<RpcClient>, Vec<JoinHandle<()>>) {
    let rpc = Arc::new(RpcClient::new_with_commitment(
        endpoint.url().to_string(),
        CommitmentConfig::confirmed(),
    ));
    let send_rpc = Arc::new(RpcClient::new_with_commitment(
        endpoint.url().to_string(),
        CommitmentConfig::confirmed(),
    ));

    // One permanent no-op subscription per client. The underlying transport
    // drops its socket once the subscription set becomes empty, so each
    // connection keeps a listener that drains slot notifications forever.
    let keepalive = vec![
        spawn_keepalive(endpoint.ws_url()),
        spawn_keepalive(endpoint.ws_url()),
    ];

    (rpc, send_rpc, keepalive)
}

fn spawn_keepalive(ws_url: String) -> JoinHandle<()> {
    tokio::spawn(async move {
        let Ok(pubsub) = PubsubClient::new(&ws_url).await else {
            return;
        };
        let Ok((mut notifications, _unsubscribe)) = pubsub.slot_subscribe().await else {
            return;
        };

        while notifications.next().await.is_some() {}
    })
}
