use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use ethers_core::types::{Address, BlockNumber, Transaction};
use ethers_providers::{Http, JsonRpcClient, Middleware, Provider};
use serde_json::Value;

use crate::error::{NodeError, PendingError};
use crate::registry::EndpointRegistry;
use crate::units;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NonceLevel {
    Pending,
    Latest,
}

impl NonceLevel {
    fn block(self) -> BlockNumber {
        match self {
            NonceLevel::Pending => BlockNumber::Pending,
            NonceLevel::Latest => BlockNumber::Latest,
        }
    }
}

/// Remote calls the resolver needs from a chain's node.
#[async_trait]
pub trait NodeClient: Send + Sync {
    async fn nonce_count(&self, address: Address, level: NonceLevel) -> Result<u64, NodeError>;

    /// Issues a non-standard method verbatim. Never retried; any failure is
    /// reported as `IntrospectionUnavailable`.
    async fn raw_call(&self, method: &str, params: Value) -> Result<Value, NodeError>;

    /// Transactions of the node's synthesized `pending` block, all senders.
    async fn pending_block(&self) -> Result<Vec<Transaction>, NodeError>;
}

/// Opens a client for one chain. Called once per resolution.
pub trait Connector: Send + Sync + 'static {
    type Client: NodeClient;

    fn connect(&self, chain_id: u64) -> Result<Self::Client, PendingError>;

    fn registry(&self) -> &EndpointRegistry;
}

#[derive(Clone)]
pub struct EthClient<P = Http> {
    provider: Provider<P>,
}

impl EthClient<Http> {
    pub fn new(http: reqwest::Client, rpc_url: url::Url) -> Self {
        let transport = Http::new_with_client(rpc_url, http);
        Self::from_provider(Provider::new(transport))
    }
}

impl<P: JsonRpcClient> EthClient<P> {
    pub fn from_provider(provider: Provider<P>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl<P> NodeClient for EthClient<P>
where
    P: JsonRpcClient + 'static,
{
    async fn nonce_count(&self, address: Address, level: NonceLevel) -> Result<u64, NodeError> {
        let count = self
            .provider
            .get_transaction_count(address, Some(level.block().into()))
            .await
            .map_err(|e| NodeError::transport("eth_getTransactionCount", e))?;
        units::to_u64("nonce", count).map_err(|e| NodeError::transport("eth_getTransactionCount", e))
    }

    async fn raw_call(&self, method: &str, params: Value) -> Result<Value, NodeError> {
        self.provider
            .request::<Value, Value>(method, params)
            .await
            .map_err(|e| NodeError::unavailable(method, e))
    }

    async fn pending_block(&self) -> Result<Vec<Transaction>, NodeError> {
        let block = self
            .provider
            .get_block_with_txs(BlockNumber::Pending)
            .await
            .map_err(|e| NodeError::unavailable("eth_getBlockByNumber", e))?;
        block
            .map(|b| b.transactions)
            .ok_or_else(|| NodeError::unavailable("eth_getBlockByNumber", "node returned no pending block"))
    }
}

/// Connects over HTTP to the endpoint registered for each chain.
///
/// The inner `reqwest::Client` is shared so concurrent queries reuse
/// connections; no other state crosses queries.
#[derive(Clone)]
pub struct HttpConnector {
    registry: Arc<EndpointRegistry>,
    http: reqwest::Client,
}

impl HttpConnector {
    pub fn new(registry: Arc<EndpointRegistry>, timeout: Option<Duration>) -> anyhow::Result<Self> {
        let mut builder = reqwest::Client::builder().no_proxy();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("failed to build reqwest client")?;
        Ok(Self { registry, http })
    }
}

impl Connector for HttpConnector {
    type Client = EthClient<Http>;

    fn connect(&self, chain_id: u64) -> Result<Self::Client, PendingError> {
        let url = self.registry.resolve(chain_id)?;
        Ok(EthClient::new(self.http.clone(), url.clone()))
    }

    fn registry(&self) -> &EndpointRegistry {
        &self.registry
    }
}
