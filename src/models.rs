use serde::Serialize;

pub const STATUS_PENDING: &str = "pending";
pub const STATUS_PREDICTED: &str = "pending (predicted)";

/// Canonical shape of one unmined transaction, whichever source produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingTx {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
    pub nonce: u64,
    pub from: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gas_limit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_fee_per_gas: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_priority_fee_per_gas: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gas_price: Option<String>,
    pub timestamp: i64,
    pub status: String,
}

/// Which stage of the cascade produced `pending_transactions`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ResolutionSource {
    /// Nonce gap was zero; no source was consulted.
    None,
    TxpoolPending,
    PendingBlock,
    TxpoolBaseFee,
    Predicted,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Resolution {
    pub address: String,
    pub chain_id: u64,
    pub pending_count: usize,
    pub latest_nonce: u64,
    pub pending_nonce: u64,
    pub source: ResolutionSource,
    pub pending_transactions: Vec<PendingTx>,
}

impl Resolution {
    /// Sorts by nonce and derives `pending_count` from the list.
    pub fn new(
        address: String,
        chain_id: u64,
        latest_nonce: u64,
        pending_nonce: u64,
        source: ResolutionSource,
        mut pending_transactions: Vec<PendingTx>,
    ) -> Self {
        pending_transactions.sort_by_key(|tx| tx.nonce);
        Self {
            address,
            chain_id,
            pending_count: pending_transactions.len(),
            latest_nonce,
            pending_nonce,
            source,
            pending_transactions,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainInfo {
    pub chain_id: u64,
    pub name: Option<&'static str>,
}
