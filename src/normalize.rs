use std::time::{SystemTime, UNIX_EPOCH};

use ethers_core::types::{Address, Transaction, U256};
use serde::Deserialize;

use crate::address::lower_hex;
use crate::error::NormalizeError;
use crate::models::{PendingTx, STATUS_PENDING, STATUS_PREDICTED};
use crate::units;

/// One entry of a `txpool_content` bucket. Quantities are hex strings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TxpoolTx {
    pub hash: Option<String>,
    pub nonce: String,
    pub from: Option<String>,
    pub to: Option<String>,
    pub value: Option<String>,
    pub gas: Option<String>,
    pub gas_price: Option<String>,
    pub max_fee_per_gas: Option<String>,
    pub max_priority_fee_per_gas: Option<String>,
}

/// A transaction as handed over by one of the mempool sources.
#[derive(Debug, Clone)]
pub enum RawRecord {
    Txpool(TxpoolTx),
    Block(Transaction),
}

pub fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or_default()
}

/// Converts a raw record into the canonical shape.
///
/// `from_fallback` is used when a txpool record omits its sender, which some
/// nodes do since the bucket is already keyed by address.
pub fn normalize(
    record: RawRecord,
    from_fallback: &str,
    observed_at: i64,
) -> Result<PendingTx, NormalizeError> {
    match record {
        RawRecord::Txpool(tx) => normalize_txpool(tx, from_fallback, observed_at),
        RawRecord::Block(tx) => normalize_block(tx, observed_at),
    }
}

fn normalize_txpool(
    tx: TxpoolTx,
    from_fallback: &str,
    observed_at: i64,
) -> Result<PendingTx, NormalizeError> {
    let hex = |field: &'static str, raw: Option<&String>| -> Result<Option<U256>, NormalizeError> {
        raw.map(|raw| units::parse_hex_quantity(field, raw)).transpose()
    };

    let nonce = units::to_u64("nonce", units::parse_hex_quantity("nonce", &tx.nonce)?)?;
    let fees = Fees {
        max_fee_per_gas: hex("maxFeePerGas", tx.max_fee_per_gas.as_ref())?,
        max_priority_fee_per_gas: hex("maxPriorityFeePerGas", tx.max_priority_fee_per_gas.as_ref())?,
        gas_price: hex("gasPrice", tx.gas_price.as_ref())?,
    }
    .render()?;

    Ok(PendingTx {
        hash: tx.hash,
        nonce,
        from: tx.from.unwrap_or_else(|| from_fallback.to_string()),
        to: tx.to,
        value: hex("value", tx.value.as_ref())?
            .map(|v| units::ether("value", v))
            .transpose()?,
        gas_limit: hex("gas", tx.gas.as_ref())?.map(|g| g.to_string()),
        max_fee_per_gas: fees.max_fee_per_gas,
        max_priority_fee_per_gas: fees.max_priority_fee_per_gas,
        gas_price: fees.gas_price,
        timestamp: observed_at,
        status: STATUS_PENDING.to_string(),
    })
}

fn normalize_block(tx: Transaction, observed_at: i64) -> Result<PendingTx, NormalizeError> {
    let fees = Fees {
        max_fee_per_gas: tx.max_fee_per_gas,
        max_priority_fee_per_gas: tx.max_priority_fee_per_gas,
        gas_price: tx.gas_price,
    }
    .render()?;

    Ok(PendingTx {
        hash: Some(format!("0x{:x}", tx.hash)),
        nonce: units::to_u64("nonce", tx.nonce)?,
        from: lower_hex(&tx.from),
        to: tx.to.as_ref().map(lower_hex),
        value: Some(units::ether("value", tx.value)?),
        gas_limit: Some(tx.gas.to_string()),
        max_fee_per_gas: fees.max_fee_per_gas,
        max_priority_fee_per_gas: fees.max_priority_fee_per_gas,
        gas_price: fees.gas_price,
        timestamp: observed_at,
        status: STATUS_PENDING.to_string(),
    })
}

struct Fees<T> {
    max_fee_per_gas: Option<T>,
    max_priority_fee_per_gas: Option<T>,
    gas_price: Option<T>,
}

impl Fees<U256> {
    /// Fee-market records keep only the max-fee pair; nodes echo an effective
    /// `gasPrice` for them which is not what the sender signed.
    fn render(self) -> Result<Fees<String>, NormalizeError> {
        let gwei = |field: &'static str, v: Option<U256>| v.map(|v| units::gwei(field, v)).transpose();
        if self.max_fee_per_gas.is_some() {
            Ok(Fees {
                max_fee_per_gas: gwei("maxFeePerGas", self.max_fee_per_gas)?,
                max_priority_fee_per_gas: gwei("maxPriorityFeePerGas", self.max_priority_fee_per_gas)?,
                gas_price: None,
            })
        } else {
            Ok(Fees {
                max_fee_per_gas: None,
                max_priority_fee_per_gas: None,
                gas_price: gwei("gasPrice", self.gas_price)?,
            })
        }
    }
}

/// Placeholder entries for every nonce in `[latest, pending)`.
pub fn predicted(latest: u64, pending: u64, from: &str, observed_at: i64) -> Vec<PendingTx> {
    (latest..pending)
        .map(|nonce| PendingTx {
            hash: None,
            nonce,
            from: from.to_string(),
            to: None,
            value: None,
            gas_limit: None,
            max_fee_per_gas: None,
            max_priority_fee_per_gas: None,
            gas_price: None,
            timestamp: observed_at,
            status: STATUS_PREDICTED.to_string(),
        })
        .collect()
}

/// Sender check for pending block transactions.
pub fn sent_by(tx: &Transaction, address: &Address) -> bool {
    tx.from == *address
}
