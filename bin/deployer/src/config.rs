use action::{deploy::DeployVariant, verify::VerifySettings};
use client::TENDERLY_API_URL;
use config::{ConfigError, ConfigTable, FlowControllerConfig, UnknownChainPolicy};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, path::Path, path::PathBuf};

/// Top-level deployer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// RPC endpoint url
    #[serde(default)]
    pub rpc_url: Option<String>,

    /// Hardhat artifact of the contract to deploy
    pub artifact: PathBuf,

    /// Directory holding deployment records
    #[serde(default = "default_deployments_dir")]
    pub deployments_dir: PathBuf,

    /// Constructor variant
    #[serde(default)]
    pub variant: DeployVariant,

    /// Behavior for chain ids without a network entry
    #[serde(default)]
    pub unknown_chain: UnknownChainPolicy,

    /// Mine a block after broadcasting on development networks
    #[serde(default = "default_auto_mine")]
    pub auto_mine: bool,

    /// Per-network address overrides, keyed by network name
    #[serde(default)]
    pub networks: BTreeMap<String, FlowControllerConfig>,

    /// Tenderly project receiving verifications
    #[serde(default)]
    pub tenderly: Option<TenderlyConfig>,

    /// Compiler settings for verification
    #[serde(default)]
    pub verify: Option<VerifySettings>,
}

/// Tenderly project coordinates. The access key is read from the environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenderlyConfig {
    pub username: String,
    pub project: String,
    #[serde(default = "default_api_url")]
    pub api_url: String,
}

fn default_deployments_dir() -> PathBuf {
    PathBuf::from("deployments")
}

const fn default_auto_mine() -> bool {
    true
}

fn default_api_url() -> String {
    TENDERLY_API_URL.to_string()
}

impl Config {
    pub fn from_file(path: impl AsRef<Path>) -> eyre::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> eyre::Result<Self> {
        let config: Self = toml::from_str(contents)?;
        Ok(config)
    }

    /// Builtin network records with this file's overrides applied.
    pub fn config_table(&self) -> Result<ConfigTable, ConfigError> {
        ConfigTable::builtin().with_overrides(&self.networks)
    }
}
