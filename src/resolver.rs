use std::sync::Arc;

use ethers_core::types::Address;
use tracing::{debug, info, warn};

use crate::address::{lower_hex, parse_address};
use crate::error::PendingError;
use crate::models::{PendingTx, Resolution, ResolutionSource};
use crate::node::{Connector, NodeClient};
use crate::nonce::fetch_nonces;
use crate::normalize::{normalize, predicted, unix_now};
use crate::resolve_stats::ResolveStats;
use crate::sources::CASCADE;

/// Answers "which transactions has this account sent that are not mined yet".
pub struct PendingResolver<C> {
    connector: C,
    stats: Arc<ResolveStats>,
}

impl<C: Connector> PendingResolver<C> {
    pub fn new(connector: C) -> Self {
        Self {
            connector,
            stats: Arc::new(ResolveStats::new()),
        }
    }

    pub fn connector(&self) -> &C {
        &self.connector
    }

    pub fn stats(&self) -> &ResolveStats {
        &self.stats
    }

    pub async fn resolve(&self, chain_id: u64, address: &str) -> Result<Resolution, PendingError> {
        self.stats.inc_queries();
        let outcome = self.try_resolve(chain_id, address).await;
        match &outcome {
            Ok(resolution) => self.stats.record(resolution.source),
            Err(err) => {
                self.stats.inc_failures();
                warn!(chain_id, address, error = %err, "pending resolution failed");
            }
        }
        outcome
    }

    async fn try_resolve(&self, chain_id: u64, address: &str) -> Result<Resolution, PendingError> {
        let parsed = parse_address(address)?;
        let client = self.connector.connect(chain_id)?;
        resolve_with(&client, chain_id, address, parsed).await
    }
}

/// Runs the resolution against an already connected client.
///
/// `input` is echoed back in the result and used as the sender of predicted
/// entries; `address` is its parsed form.
pub async fn resolve_with<N>(
    client: &N,
    chain_id: u64,
    input: &str,
    address: Address,
) -> Result<Resolution, PendingError>
where
    N: NodeClient + ?Sized,
{
    let nonces = fetch_nonces(client, address).await?;
    let finish = |source, txs| {
        Resolution::new(
            input.to_string(),
            chain_id,
            nonces.latest_nonce,
            nonces.pending_nonce,
            source,
            txs,
        )
    };

    if !nonces.has_gap() {
        debug!(chain_id, address = input, "no nonce gap");
        return Ok(finish(ResolutionSource::None, Vec::new()));
    }

    let observed_at = unix_now();
    let sender = lower_hex(&address);

    for source in CASCADE {
        let Some(records) = source.fetch(client, &address).await else {
            continue;
        };

        let txs: Vec<PendingTx> = records
            .into_iter()
            .filter_map(|record| match normalize(record, &sender, observed_at) {
                Ok(tx) => Some(tx),
                Err(err) => {
                    warn!(source = source.name(), error = %err, "skipping malformed pending tx");
                    None
                }
            })
            .collect();

        if !txs.is_empty() {
            info!(
                chain_id,
                address = input,
                source = source.name(),
                count = txs.len(),
                gap = nonces.gap(),
                "resolved pending transactions"
            );
            return Ok(finish(source.resolution_source(), txs));
        }
    }

    info!(
        chain_id,
        address = input,
        gap = nonces.gap(),
        "no mempool source answered, predicting from nonce gap"
    );
    let txs = predicted(nonces.latest_nonce, nonces.pending_nonce, input, observed_at);
    Ok(finish(ResolutionSource::Predicted, txs))
}
