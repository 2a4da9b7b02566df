use std::collections::BTreeMap;

use url::Url;

use crate::error::PendingError;
use crate::models::ChainInfo;

/// Chains served out of the box: (chain id, name, public RPC endpoint).
pub const DEFAULT_ENDPOINTS: &[(u64, &str, &str)] = &[
    (1, "ethereum", "https://mainnet.infura.io/v3/YOUR_INFURA_KEY"),
    (56, "bsc", "https://bsc-dataseed.binance.org"),
    (97, "bsc-testnet", "https://data-seed-prebsc-1-s1.binance.org:8545"),
    (137, "polygon", "https://polygon-rpc.com"),
    (369, "pulsechain", "https://rpc.pulsechain.com"),
    (8453, "base", "https://mainnet.base.org"),
    (42161, "arbitrum", "https://arb1.arbitrum.io/rpc"),
    (80001, "polygon-mumbai", "https://rpc-mumbai.maticvigil.com"),
];

/// Immutable chain id -> node endpoint table, built once at startup.
#[derive(Debug, Clone, Default)]
pub struct EndpointRegistry {
    endpoints: BTreeMap<u64, Url>,
}

impl EndpointRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for (chain_id, _, url) in DEFAULT_ENDPOINTS {
            if let Ok(url) = Url::parse(url) {
                registry.endpoints.insert(*chain_id, url);
            }
        }
        registry
    }

    /// Adds or replaces the endpoint for `chain_id`.
    pub fn with_endpoint(mut self, chain_id: u64, url: Url) -> Self {
        self.endpoints.insert(chain_id, url);
        self
    }

    pub fn resolve(&self, chain_id: u64) -> Result<&Url, PendingError> {
        self.endpoints
            .get(&chain_id)
            .ok_or(PendingError::UnknownChain(chain_id))
    }

    pub fn chains(&self) -> Vec<ChainInfo> {
        self.endpoints
            .keys()
            .map(|&chain_id| ChainInfo {
                chain_id,
                name: chain_name(chain_id),
            })
            .collect()
    }
}

pub fn chain_name(chain_id: u64) -> Option<&'static str> {
    DEFAULT_ENDPOINTS
        .iter()
        .find(|(id, _, _)| *id == chain_id)
        .map(|(_, name, _)| *name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_builtin_chains() {
        let registry = EndpointRegistry::with_defaults();
        assert_eq!(registry.chains().len(), DEFAULT_ENDPOINTS.len());
        assert_eq!(
            registry.resolve(56).unwrap().as_str(),
            "https://bsc-dataseed.binance.org/"
        );
        let ids: Vec<u64> = registry.chains().iter().map(|c| c.chain_id).collect();
        assert_eq!(ids, vec![1, 56, 97, 137, 369, 8453, 42161, 80001]);
    }

    #[test]
    fn unknown_chain_is_an_error() {
        let registry = EndpointRegistry::with_defaults();
        assert!(matches!(
            registry.resolve(999_999),
            Err(PendingError::UnknownChain(999_999))
        ));
    }

    #[test]
    fn override_replaces_and_extends() {
        let registry = EndpointRegistry::with_defaults()
            .with_endpoint(56, Url::parse("http://localhost:8545").unwrap())
            .with_endpoint(31337, Url::parse("http://localhost:9545").unwrap());
        assert_eq!(
            registry.resolve(56).unwrap().as_str(),
            "http://localhost:8545/"
        );
        assert!(registry.resolve(31337).is_ok());
        assert_eq!(chain_name(31337), None);
        assert_eq!(chain_name(8453), Some("base"));
    }
}
