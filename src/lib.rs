//! Resolves the unmined transactions of an EVM account.
//!
//! The resolver reads the account's `pending` and `latest` nonces, then asks
//! the node's mempool for the transactions filling that gap. Nodes differ in
//! what they expose, so several sources are tried in order and, when none
//! answers, the gap itself is reported as predicted entries.

pub mod address;
pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod node;
pub mod nonce;
pub mod normalize;
pub mod registry;
pub mod resolve_stats;
pub mod resolver;
pub mod sources;
pub mod units;

pub use error::{NodeError, PendingError};
pub use models::{PendingTx, Resolution, ResolutionSource};
pub use node::{Connector, EthClient, HttpConnector, NodeClient, NonceLevel};
pub use registry::EndpointRegistry;
pub use resolver::{resolve_with, PendingResolver};
