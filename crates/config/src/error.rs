use crate::NetworkName;
use thiserror::Error;

/// Errors raised while resolving a FlowController configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The network is known but has no configuration record
    #[error("no FlowController configuration for network {0}")]
    MissingNetwork(NetworkName),

    /// The chain id has no network entry and fallback is disabled
    #[error("chain id {0} does not map to a known network")]
    UnknownChain(u64),

    /// An address field holds an empty placeholder
    #[error("{field} address is an unfilled placeholder")]
    Placeholder { field: &'static str },

    /// An address field is not a valid hex address
    #[error("invalid {field} address: {value:?}")]
    InvalidAddress { field: &'static str, value: String },

    /// A network name string did not match any network
    #[error("unknown network name: {0}")]
    UnknownNetworkName(String),
}
