use ethers_core::types::Address;
use futures_util::future::try_join;

use crate::error::NodeError;
use crate::node::{NodeClient, NonceLevel};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoncePair {
    pub pending_nonce: u64,
    pub latest_nonce: u64,
}

impl NoncePair {
    /// Number of sent-but-unmined transactions. A pending nonce below the
    /// latest one counts as no gap.
    pub fn gap(&self) -> u64 {
        self.pending_nonce.saturating_sub(self.latest_nonce)
    }

    pub fn has_gap(&self) -> bool {
        self.gap() > 0
    }
}

/// Fetches both nonce levels concurrently.
pub async fn fetch_nonces<C>(client: &C, address: Address) -> Result<NoncePair, NodeError>
where
    C: NodeClient + ?Sized,
{
    let (pending_nonce, latest_nonce) = try_join(
        client.nonce_count(address, NonceLevel::Pending),
        client.nonce_count(address, NonceLevel::Latest),
    )
    .await?;

    Ok(NoncePair {
        pending_nonce,
        latest_nonce,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gap_is_difference() {
        let pair = NoncePair {
            pending_nonce: 5,
            latest_nonce: 3,
        };
        assert_eq!(pair.gap(), 2);
        assert!(pair.has_gap());
    }

    #[test]
    fn equal_nonces_have_no_gap() {
        let pair = NoncePair {
            pending_nonce: 3,
            latest_nonce: 3,
        };
        assert_eq!(pair.gap(), 0);
        assert!(!pair.has_gap());
    }

    #[test]
    fn inverted_nonces_have_no_gap() {
        let pair = NoncePair {
            pending_nonce: 2,
            latest_nonce: 9,
        };
        assert_eq!(pair.gap(), 0);
    }
}
