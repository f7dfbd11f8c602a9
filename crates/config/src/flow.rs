//! FlowController constructor addresses per network.

use crate::{ConfigError, NetworkName, ResolvedNetwork, UnknownChainPolicy};
use alloy_primitives::Address;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// https://rinkeby.etherscan.io/address/0x06b35a5e6799ab2ffdc383e81490cd72c983d5a5
const RINKEBY_CONVICTION: &str = "0x06b35a5e6799ab2ffdc383e81490cd72c983d5a5";
// Superfluid host
const RINKEBY_SUPERFLUID: &str = "0xfd0c006c16395de18d38efbcbd85b53d68366235";
// fDAIx
const RINKEBY_SUPER_TOKEN: &str = "0xe166aa0a466d7d012940c872aa0e0cd74c7bc7e9";

/// Addresses handed to the FlowController constructor, as configured.
///
/// Fields are kept as raw strings so that unfilled entries remain visible;
/// use [`FlowControllerConfig::addresses`] before deploying.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowControllerConfig {
    /// Conviction voting contract
    pub conviction: String,
    /// Superfluid host contract
    pub superfluid: String,
    /// SuperToken streamed by the controller
    pub super_token: String,
}

/// Parsed, non-empty constructor addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlowAddresses {
    pub conviction: Address,
    pub superfluid: Address,
    pub super_token: Address,
}

impl FlowControllerConfig {
    pub fn new(
        conviction: impl Into<String>,
        superfluid: impl Into<String>,
        super_token: impl Into<String>,
    ) -> Self {
        Self {
            conviction: conviction.into(),
            superfluid: superfluid.into(),
            super_token: super_token.into(),
        }
    }

    /// Record with every field left empty.
    pub fn placeholder() -> Self {
        Self::default()
    }

    /// Rinkeby deployment of the conviction voting stack.
    pub fn rinkeby() -> Self {
        Self::new(RINKEBY_CONVICTION, RINKEBY_SUPERFLUID, RINKEBY_SUPER_TOKEN)
    }

    /// True when any address has not been filled in.
    pub fn is_placeholder(&self) -> bool {
        self.fields().iter().any(|(_, value)| value.trim().is_empty())
    }

    /// Parse all three fields into addresses.
    pub fn addresses(&self) -> Result<FlowAddresses, ConfigError> {
        Ok(FlowAddresses {
            conviction: parse_address("conviction", &self.conviction)?,
            superfluid: parse_address("superfluid", &self.superfluid)?,
            super_token: parse_address("superToken", &self.super_token)?,
        })
    }

    fn fields(&self) -> [(&'static str, &str); 3] {
        [
            ("conviction", self.conviction.as_str()),
            ("superfluid", self.superfluid.as_str()),
            ("superToken", self.super_token.as_str()),
        ]
    }
}

fn parse_address(field: &'static str, value: &str) -> Result<Address, ConfigError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ConfigError::Placeholder { field });
    }

    value.parse().map_err(|_| ConfigError::InvalidAddress {
        field,
        value: value.to_string(),
    })
}

/// Read-only mapping from network to FlowController configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigTable {
    records: BTreeMap<NetworkName, FlowControllerConfig>,
}

impl ConfigTable {
    /// Records shipped with the deployer.
    ///
    /// `mainnet`, `mumbai` and `polygon` have no entry and `xdai` is a
    /// placeholder; both have to be supplied through overrides before
    /// deploying there.
    pub fn builtin() -> Self {
        Self::default()
            .with(NetworkName::Xdai, FlowControllerConfig::placeholder())
            .with(NetworkName::Rinkeby, FlowControllerConfig::rinkeby())
            .with(NetworkName::Localhost, FlowControllerConfig::rinkeby())
            .with(NetworkName::Hardhat, FlowControllerConfig::rinkeby())
    }

    /// Add or replace the record for a network.
    pub fn with(mut self, network: NetworkName, record: FlowControllerConfig) -> Self {
        self.records.insert(network, record);
        self
    }

    /// Apply records keyed by network name, replacing existing entries.
    pub fn with_overrides<'a>(
        self,
        overrides: impl IntoIterator<Item = (&'a String, &'a FlowControllerConfig)>,
    ) -> Result<Self, ConfigError> {
        overrides.into_iter().try_fold(self, |table, (name, record)| {
            Ok(table.with(name.parse()?, record.clone()))
        })
    }

    pub fn get(&self, network: NetworkName) -> Option<&FlowControllerConfig> {
        self.records.get(&network)
    }

    /// Networks with a record, in declaration order.
    pub fn networks(&self) -> impl Iterator<Item = (NetworkName, &FlowControllerConfig)> {
        self.records.iter().map(|(name, record)| (*name, record))
    }

    /// Look up the record for a chain id.
    ///
    /// Unknown chain ids resolve to the `hardhat` record. Known networks
    /// without a record yield [`ConfigError::MissingNetwork`].
    pub fn resolve(&self, chain_id: u64) -> Result<&FlowControllerConfig, ConfigError> {
        self.resolve_with(chain_id, UnknownChainPolicy::Fallback)
            .map(|(_, record)| record)
    }

    /// Look up the record for a chain id under an explicit unknown-chain policy.
    pub fn resolve_with(
        &self,
        chain_id: u64,
        policy: UnknownChainPolicy,
    ) -> Result<(NetworkName, &FlowControllerConfig), ConfigError> {
        let network = match (ResolvedNetwork::from_chain_id(chain_id), policy) {
            (ResolvedNetwork::Known(name), _) => name,
            (ResolvedNetwork::Unknown(_), UnknownChainPolicy::Fallback) => NetworkName::DEFAULT,
            (ResolvedNetwork::Unknown(id), UnknownChainPolicy::Reject) => {
                return Err(ConfigError::UnknownChain(id))
            }
        };

        self.get(network)
            .map(|record| (network, record))
            .ok_or(ConfigError::MissingNetwork(network))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    #[test]
    fn test_resolve_rinkeby() {
        let table = ConfigTable::builtin();
        let record = table.resolve(4).unwrap();

        assert_eq!(record.conviction, "0x06b35a5e6799ab2ffdc383e81490cd72c983d5a5");
        assert_eq!(record.superfluid, "0xfd0c006c16395de18d38efbcbd85b53d68366235");
        assert_eq!(record.super_token, "0xe166aa0a466d7d012940c872aa0e0cd74c7bc7e9");
    }

    #[test]
    fn test_resolve_hardhat_and_unknown_chain() {
        let table = ConfigTable::builtin();
        let hardhat = table.get(NetworkName::Hardhat).unwrap();

        assert_eq!(table.resolve(31137).unwrap(), hardhat);
        assert_eq!(table.resolve(999999).unwrap(), hardhat);
        assert_eq!(table.resolve(0).unwrap(), hardhat);
        assert_eq!(table.resolve(u64::MAX).unwrap(), hardhat);
    }

    #[test]
    fn test_dev_records_match_rinkeby() {
        let table = ConfigTable::builtin();
        let rinkeby = table.get(NetworkName::Rinkeby).unwrap();

        assert_eq!(table.get(NetworkName::Hardhat).unwrap(), rinkeby);
        assert_eq!(table.get(NetworkName::Localhost).unwrap(), rinkeby);
    }

    #[test]
    fn test_resolve_networks_without_record() {
        let table = ConfigTable::builtin();

        assert_eq!(
            table.resolve(1),
            Err(ConfigError::MissingNetwork(NetworkName::Mainnet))
        );
        assert_eq!(
            table.resolve(137),
            Err(ConfigError::MissingNetwork(NetworkName::Polygon))
        );
        assert_eq!(
            table.resolve(80001),
            Err(ConfigError::MissingNetwork(NetworkName::Mumbai))
        );
    }

    #[test]
    fn test_xdai_is_placeholder() {
        let table = ConfigTable::builtin();
        let xdai = table.resolve(100).unwrap();

        assert_eq!(xdai, &FlowControllerConfig::new("", "", ""));
        assert!(xdai.is_placeholder());
        assert_eq!(
            xdai.addresses(),
            Err(ConfigError::Placeholder {
                field: "conviction"
            })
        );
    }

    #[test]
    fn test_resolve_is_deterministic() {
        let table = ConfigTable::builtin();
        for chain_id in [1, 4, 100, 137, 80001, 31137, 42] {
            assert_eq!(table.resolve(chain_id), table.resolve(chain_id));
        }
    }

    #[test]
    fn test_reject_policy() {
        let table = ConfigTable::builtin();

        assert_eq!(
            table.resolve_with(999999, UnknownChainPolicy::Reject),
            Err(ConfigError::UnknownChain(999999))
        );

        let (network, _) = table.resolve_with(4, UnknownChainPolicy::Reject).unwrap();
        assert_eq!(network, NetworkName::Rinkeby);

        let (network, _) = table
            .resolve_with(999999, UnknownChainPolicy::Fallback)
            .unwrap();
        assert_eq!(network, NetworkName::Hardhat);
    }

    #[test]
    fn test_addresses() {
        let addresses = FlowControllerConfig::rinkeby().addresses().unwrap();

        assert_eq!(
            addresses.conviction,
            address!("06b35a5e6799ab2ffdc383e81490cd72c983d5a5")
        );
        assert_eq!(
            addresses.superfluid,
            address!("fd0c006c16395de18d38efbcbd85b53d68366235")
        );
        assert_eq!(
            addresses.super_token,
            address!("e166aa0a466d7d012940c872aa0e0cd74c7bc7e9")
        );
    }

    #[test]
    fn test_invalid_address() {
        let record = FlowControllerConfig::new(RINKEBY_CONVICTION, "0x1234", RINKEBY_SUPER_TOKEN);

        assert!(!record.is_placeholder());
        assert_eq!(
            record.addresses(),
            Err(ConfigError::InvalidAddress {
                field: "superfluid",
                value: "0x1234".to_string()
            })
        );
    }

    #[test]
    fn test_overrides() {
        let overrides: BTreeMap<String, FlowControllerConfig> = toml::from_str(
            r#"
            [polygon]
            conviction = "0x1111111111111111111111111111111111111111"
            superfluid = "0x2222222222222222222222222222222222222222"
            superToken = "0x3333333333333333333333333333333333333333"
            "#,
        )
        .unwrap();

        let table = ConfigTable::builtin().with_overrides(&overrides).unwrap();
        let polygon = table.resolve(137).unwrap();
        assert_eq!(
            polygon.addresses().unwrap().super_token,
            Address::repeat_byte(0x33)
        );

        // Builtin entries survive.
        assert_eq!(table.resolve(4).unwrap(), &FlowControllerConfig::rinkeby());
    }

    #[test]
    fn test_overrides_unknown_network() {
        let mut overrides = BTreeMap::new();
        overrides.insert("goerli".to_string(), FlowControllerConfig::rinkeby());

        let err = ConfigTable::builtin().with_overrides(&overrides).unwrap_err();
        assert_eq!(err, ConfigError::UnknownNetworkName("goerli".to_string()));
    }

    #[test]
    fn test_networks_iteration_order() {
        let names: Vec<_> = ConfigTable::builtin().networks().map(|(n, _)| n).collect();
        assert_eq!(
            names,
            vec![
                NetworkName::Rinkeby,
                NetworkName::Xdai,
                NetworkName::Hardhat,
                NetworkName::Localhost
            ]
        );
    }
}
