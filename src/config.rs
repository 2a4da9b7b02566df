use std::env;
use std::time::Duration;

use url::Url;

use crate::registry::EndpointRegistry;

#[derive(Debug, Clone)]
pub struct Config {
    pub http_bind_addr: String,
    pub registry: EndpointRegistry,
    pub rpc_timeout: Option<Duration>,
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("RPC_URLS entry {0:?} is not of the form <chainId>=<url>")]
    MalformedOverride(String),
    #[error("RPC_URLS entry for chain {chain_id} has an invalid url: {reason}")]
    InvalidUrl { chain_id: u64, reason: String },
    #[error("RPC_TIMEOUT_SECS must be a positive integer, got {0:?}")]
    InvalidTimeout(String),
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let http_bind_addr = env::var("HTTP_BIND").unwrap_or_else(|_| "127.0.0.1:3000".to_string());

        let mut registry = EndpointRegistry::with_defaults();
        if let Ok(raw) = env::var("RPC_URLS") {
            for (chain_id, url) in parse_rpc_overrides(&raw)? {
                registry = registry.with_endpoint(chain_id, url);
            }
        }

        let rpc_timeout = env::var("RPC_TIMEOUT_SECS")
            .ok()
            .map(|raw| parse_timeout(&raw))
            .transpose()?;

        Ok(Self {
            http_bind_addr,
            registry,
            rpc_timeout,
        })
    }
}

/// Parses `"1=https://a,56=https://b"`.
fn parse_rpc_overrides(raw: &str) -> Result<Vec<(u64, Url)>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|entry| {
            let (id, url) = entry
                .split_once('=')
                .ok_or_else(|| ConfigError::MalformedOverride(entry.to_string()))?;
            let chain_id: u64 = id
                .trim()
                .parse()
                .map_err(|_| ConfigError::MalformedOverride(entry.to_string()))?;
            let url = Url::parse(url.trim()).map_err(|e| ConfigError::InvalidUrl {
                chain_id,
                reason: e.to_string(),
            })?;
            Ok((chain_id, url))
        })
        .collect()
}

fn parse_timeout(raw: &str) -> Result<Duration, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidTimeout(raw.to_string())),
    }
}
