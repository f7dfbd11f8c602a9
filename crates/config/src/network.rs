//! Chain identifiers and the networks the FlowController is deployed to.
//!
//! Resolution is two-staged: a chain id first resolves to a [`NetworkName`],
//! which is then used as the key into a [`crate::ConfigTable`].

use crate::ConfigError;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Chain ids with a dedicated network entry.
const KNOWN_CHAINS: [(u64, NetworkName); 6] = [
    (1, NetworkName::Mainnet),
    (4, NetworkName::Rinkeby),
    (100, NetworkName::Xdai),
    (137, NetworkName::Polygon),
    (80001, NetworkName::Mumbai),
    (31137, NetworkName::Hardhat),
];

/// Named network a deployment targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkName {
    Mainnet,
    Mumbai,
    Polygon,
    Rinkeby,
    Xdai,
    Hardhat,
    Localhost,
}

impl NetworkName {
    /// Every network, in declaration order.
    pub const ALL: [Self; 7] = [
        Self::Mainnet,
        Self::Mumbai,
        Self::Polygon,
        Self::Rinkeby,
        Self::Xdai,
        Self::Hardhat,
        Self::Localhost,
    ];

    /// Network used when a chain id has no entry of its own.
    pub const DEFAULT: Self = Self::Hardhat;

    /// Resolve a chain id, falling back to [`Self::DEFAULT`] for unknown ids.
    pub const fn from_chain_id(chain_id: u64) -> Self {
        ResolvedNetwork::from_chain_id(chain_id).or_default()
    }

    /// Chain id registered for this network, if any.
    ///
    /// `Localhost` has none: it is only reachable through an explicit name.
    pub fn chain_id(&self) -> Option<u64> {
        KNOWN_CHAINS
            .iter()
            .find(|(_, name)| name == self)
            .map(|(id, _)| *id)
    }

    /// Local development node (hardhat, ganache, anvil).
    pub const fn is_development(&self) -> bool {
        matches!(self, Self::Hardhat | Self::Localhost)
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Mainnet => "mainnet",
            Self::Mumbai => "mumbai",
            Self::Polygon => "polygon",
            Self::Rinkeby => "rinkeby",
            Self::Xdai => "xdai",
            Self::Hardhat => "hardhat",
            Self::Localhost => "localhost",
        }
    }
}

impl fmt::Display for NetworkName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for NetworkName {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|name| name.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ConfigError::UnknownNetworkName(s.to_string()))
    }
}

/// Outcome of looking up a chain id in the known-chain table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedNetwork {
    /// The chain id has a dedicated entry.
    Known(NetworkName),
    /// No entry; the caller decides between fallback and abort.
    Unknown(u64),
}

impl ResolvedNetwork {
    pub const fn from_chain_id(chain_id: u64) -> Self {
        let mut i = 0;
        while i < KNOWN_CHAINS.len() {
            if KNOWN_CHAINS[i].0 == chain_id {
                return Self::Known(KNOWN_CHAINS[i].1);
            }
            i += 1;
        }
        Self::Unknown(chain_id)
    }

    /// Collapse to a network, mapping unknown chains to [`NetworkName::DEFAULT`].
    pub const fn or_default(self) -> NetworkName {
        match self {
            Self::Known(name) => name,
            Self::Unknown(_) => NetworkName::DEFAULT,
        }
    }

    pub const fn is_known(&self) -> bool {
        matches!(self, Self::Known(_))
    }
}

/// What to do when the connected chain has no dedicated entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownChainPolicy {
    /// Use the local development configuration.
    #[default]
    Fallback,
    /// Refuse to resolve.
    Reject,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_chain_ids() {
        assert_eq!(NetworkName::from_chain_id(1), NetworkName::Mainnet);
        assert_eq!(NetworkName::from_chain_id(4), NetworkName::Rinkeby);
        assert_eq!(NetworkName::from_chain_id(100), NetworkName::Xdai);
        assert_eq!(NetworkName::from_chain_id(137), NetworkName::Polygon);
        assert_eq!(NetworkName::from_chain_id(80001), NetworkName::Mumbai);
        assert_eq!(NetworkName::from_chain_id(31137), NetworkName::Hardhat);
    }

    #[test]
    fn test_unknown_chain_ids_fall_back_to_hardhat() {
        for chain_id in [0, 2, 5, 31337, 999999, u64::MAX] {
            assert_eq!(NetworkName::from_chain_id(chain_id), NetworkName::Hardhat);
            assert_eq!(
                ResolvedNetwork::from_chain_id(chain_id),
                ResolvedNetwork::Unknown(chain_id)
            );
        }
    }

    #[test]
    fn test_chain_id_round_trip() {
        for (id, name) in KNOWN_CHAINS {
            assert_eq!(name.chain_id(), Some(id));
            assert_eq!(ResolvedNetwork::from_chain_id(id), ResolvedNetwork::Known(name));
        }
        assert_eq!(NetworkName::Localhost.chain_id(), None);
    }

    #[test]
    fn test_parse_network_name() {
        assert_eq!("polygon".parse::<NetworkName>().unwrap(), NetworkName::Polygon);
        assert_eq!("XDAI".parse::<NetworkName>().unwrap(), NetworkName::Xdai);

        let err = "goerli".parse::<NetworkName>().unwrap_err();
        assert!(matches!(err, ConfigError::UnknownNetworkName(name) if name == "goerli"));
    }

    #[test]
    fn test_display_round_trips_through_from_str() {
        for name in NetworkName::ALL {
            assert_eq!(name.to_string().parse::<NetworkName>().unwrap(), name);
        }
    }

    #[test]
    fn test_development_networks() {
        assert!(NetworkName::Hardhat.is_development());
        assert!(NetworkName::Localhost.is_development());
        assert!(!NetworkName::Rinkeby.is_development());
        assert!(!NetworkName::Mainnet.is_development());
    }
}
