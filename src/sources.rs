//! Mempool sources consulted for an account's unmined transactions.
//!
//! Nodes expose different slices of their mempool: some answer
//! `txpool_content`, some only synthesize a `pending` block, some bucket the
//! pool by fee. Each source is tried once, in [`CASCADE`] order, and an absent
//! or failing method is a miss rather than an error.

use ethers_core::types::Address;
use serde_json::Value;
use tracing::{debug, warn};

use crate::address::{checksum, lower_hex};
use crate::models::ResolutionSource;
use crate::node::NodeClient;
use crate::normalize::{sent_by, RawRecord, TxpoolTx};

pub const TXPOOL_CONTENT: &str = "txpool_content";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingSource {
    /// `txpool_content`, `pending` bucket, lowercase address key.
    TxpoolPending,
    /// Synthesized `pending` block filtered by sender.
    PendingBlock,
    /// `txpool_content`, `baseFee` bucket, checksum address key.
    TxpoolBaseFee,
}

pub const CASCADE: [PendingSource; 3] = [
    PendingSource::TxpoolPending,
    PendingSource::PendingBlock,
    PendingSource::TxpoolBaseFee,
];

impl PendingSource {
    pub fn name(self) -> &'static str {
        match self {
            PendingSource::TxpoolPending => "txpool.pending",
            PendingSource::PendingBlock => "pending-block",
            PendingSource::TxpoolBaseFee => "txpool.baseFee",
        }
    }

    pub fn resolution_source(self) -> ResolutionSource {
        match self {
            PendingSource::TxpoolPending => ResolutionSource::TxpoolPending,
            PendingSource::PendingBlock => ResolutionSource::PendingBlock,
            PendingSource::TxpoolBaseFee => ResolutionSource::TxpoolBaseFee,
        }
    }

    /// Returns the account's raw records, or `None` on a miss.
    ///
    /// Both txpool variants issue their own `txpool_content` call; the two
    /// buckets are keyed differently and the responses are not shared.
    pub async fn fetch<C>(self, client: &C, address: &Address) -> Option<Vec<RawRecord>>
    where
        C: NodeClient + ?Sized,
    {
        let records = match self {
            PendingSource::TxpoolPending => {
                txpool_bucket(client, "pending", &lower_hex(address)).await
            }
            PendingSource::TxpoolBaseFee => {
                txpool_bucket(client, "baseFee", &checksum(address)).await
            }
            PendingSource::PendingBlock => match client.pending_block().await {
                Ok(txs) => txs
                    .into_iter()
                    .filter(|tx| sent_by(tx, address))
                    .map(RawRecord::Block)
                    .collect(),
                Err(err) => {
                    warn!(source = self.name(), error = %err, "failed to fetch pending block");
                    Vec::new()
                }
            },
        };

        if records.is_empty() {
            debug!(source = self.name(), "no pending transactions from source");
            None
        } else {
            Some(records)
        }
    }
}

async fn txpool_bucket<C>(client: &C, bucket: &str, key: &str) -> Vec<RawRecord>
where
    C: NodeClient + ?Sized,
{
    let content = match client.raw_call(TXPOOL_CONTENT, Value::Array(Vec::new())).await {
        Ok(content) => content,
        Err(err) => {
            warn!(bucket, error = %err, "txpool_content not available");
            return Vec::new();
        }
    };

    let Some(entries) = content.get(bucket).and_then(|b| b.get(key)) else {
        return Vec::new();
    };

    // Entries are keyed by decimal nonce: {"4": {...}, "5": {...}}.
    let Some(by_nonce) = entries.as_object() else {
        warn!(bucket, "malformed txpool_content bucket");
        return Vec::new();
    };

    by_nonce
        .iter()
        .filter_map(|(nonce, entry)| {
            match serde_json::from_value::<TxpoolTx>(entry.clone()) {
                Ok(tx) => Some(RawRecord::Txpool(tx)),
                Err(err) => {
                    warn!(bucket, nonce = %nonce, error = %err, "skipping malformed txpool entry");
                    None
                }
            }
        })
        .collect()
}
