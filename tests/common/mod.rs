#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use eth_pending_resolver::{
    Connector, EndpointRegistry, NodeClient, NodeError, NonceLevel, PendingError,
};
use ethers_core::types::{Address, Transaction};
use serde_json::Value;
use tokio::sync::Barrier;

pub const ACCOUNT: &str = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed";
pub const ACCOUNT_LOWER: &str = "0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed";

/// In-memory node answering from a fixed script and logging every call.
#[derive(Clone, Default)]
pub struct ScriptedNode {
    pub pending_nonce: u64,
    pub latest_nonce: u64,
    pub nonce_fault: bool,
    /// Returned for every `txpool_content` call; `None` means unsupported.
    pub txpool: Option<Value>,
    /// `None` means the node refuses to build a pending block.
    pub pending_block: Option<Vec<Transaction>>,
    /// When set, every nonce call parks here until its sibling arrives.
    pub nonce_barrier: Option<Arc<Barrier>>,
    pub calls: Arc<Mutex<Vec<String>>>,
}

impl ScriptedNode {
    pub fn with_nonces(latest_nonce: u64, pending_nonce: u64) -> Self {
        Self {
            pending_nonce,
            latest_nonce,
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, method: &str) -> usize {
        self.calls().iter().filter(|m| *m == method).count()
    }

    fn log(&self, method: &str) {
        self.calls.lock().unwrap().push(method.to_string());
    }
}

#[async_trait]
impl NodeClient for ScriptedNode {
    async fn nonce_count(&self, _address: Address, level: NonceLevel) -> Result<u64, NodeError> {
        self.log("eth_getTransactionCount");
        if let Some(barrier) = &self.nonce_barrier {
            barrier.wait().await;
        }
        if self.nonce_fault {
            return Err(NodeError::transport("eth_getTransactionCount", "connection refused"));
        }
        Ok(match level {
            NonceLevel::Pending => self.pending_nonce,
            NonceLevel::Latest => self.latest_nonce,
        })
    }

    async fn raw_call(&self, method: &str, _params: Value) -> Result<Value, NodeError> {
        self.log(method);
        self.txpool
            .clone()
            .ok_or_else(|| NodeError::unavailable(method, "the method does not exist"))
    }

    async fn pending_block(&self) -> Result<Vec<Transaction>, NodeError> {
        self.log("eth_getBlockByNumber");
        self.pending_block
            .clone()
            .ok_or_else(|| NodeError::unavailable("eth_getBlockByNumber", "pending block unsupported"))
    }
}

/// Hands out the same scripted node for every registered chain.
pub struct ScriptedConnector {
    pub registry: EndpointRegistry,
    pub node: ScriptedNode,
}

impl ScriptedConnector {
    pub fn new(node: ScriptedNode) -> Self {
        Self {
            registry: EndpointRegistry::with_defaults(),
            node,
        }
    }
}

impl Connector for ScriptedConnector {
    type Client = ScriptedNode;

    fn connect(&self, chain_id: u64) -> Result<ScriptedNode, PendingError> {
        self.registry.resolve(chain_id)?;
        Ok(self.node.clone())
    }

    fn registry(&self) -> &EndpointRegistry {
        &self.registry
    }
}

pub fn txpool_entry(nonce_hex: &str) -> Value {
    serde_json::json!({
        "hash": format!("0x{:0>64}", nonce_hex.trim_start_matches("0x")),
        "nonce": nonce_hex,
        "from": ACCOUNT_LOWER,
        "to": "0x00000000000000000000000000000000000000bb",
        "value": "0xde0b6b3a7640000",
        "gas": "0x5208",
        "gasPrice": "0x3b9aca00"
    })
}

pub fn block_tx(from: Address, nonce: u64) -> Transaction {
    let mut tx = Transaction::default();
    tx.from = from;
    tx.nonce = nonce.into();
    tx.gas = 21_000u64.into();
    tx.max_fee_per_gas = Some(2_000_000_000u64.into());
    tx.max_priority_fee_per_gas = Some(1_000_000_000u64.into());
    tx
}
