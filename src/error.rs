/// Errors that abort a resolution and are surfaced to the caller.
#[derive(thiserror::Error, Debug)]
pub enum PendingError {
    #[error("RPC not found for chainId {0}")]
    UnknownChain(u64),
    #[error("Invalid Ethereum address: {0:?}")]
    InvalidAddress(String),
    #[error("transport fault: {0}")]
    Transport(#[from] NodeError),
}

/// Errors raised by a node client.
///
/// `IntrospectionUnavailable` is the expected outcome when a node does not
/// implement a non-standard method; resolvers recover from it locally.
#[derive(thiserror::Error, Debug)]
pub enum NodeError {
    #[error("{method} unavailable: {reason}")]
    IntrospectionUnavailable { method: String, reason: String },
    #[error("{method} failed: {reason}")]
    Transport { method: String, reason: String },
}

impl NodeError {
    pub fn unavailable(method: &str, reason: impl ToString) -> Self {
        Self::IntrospectionUnavailable {
            method: method.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn transport(method: &str, reason: impl ToString) -> Self {
        Self::Transport {
            method: method.to_string(),
            reason: reason.to_string(),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum NormalizeError {
    #[error("field {field} is not a hex quantity: {raw:?}")]
    BadQuantity { field: &'static str, raw: String },
    #[error("field {field} does not fit in 64 bits")]
    Overflow { field: &'static str },
    #[error("field {field} could not be formatted: {reason}")]
    Units { field: &'static str, reason: String },
}
