pub mod config;

use crate::config::Config;
use ::config::{
    ConfigTable, FlowAddresses, FlowParams, NetworkName, ResolvedNetwork, UnknownChainPolicy,
};
use action::{
    deploy::{ConstructorArgs, DeployAction, DeployOptions},
    verify::verify_deployment,
    Action,
};
use alloy_primitives::Address;
use alloy_provider::Provider;
use binding::Artifact;
use client::TenderlyClient;
use deployments::{DeploymentRecord, DeploymentStore};
use eyre::{Context, OptionExt};
use tracing::{info, warn};

/// Outcome of [`deploy_flow_controller`].
#[derive(Debug, Clone)]
pub struct Deployment {
    /// Record of the live deployment
    pub record: DeploymentRecord,
    /// True if an earlier deployment was reused instead of sending a transaction
    pub reused: bool,
}

/// Resolve the network and constructor addresses for `chain_id`.
///
/// Fails when the policy rejects the chain, the network has no record, or the
/// record holds placeholder or malformed addresses.
pub fn resolve_network(
    table: &ConfigTable,
    chain_id: u64,
    policy: UnknownChainPolicy,
) -> eyre::Result<(NetworkName, FlowAddresses)> {
    if let ResolvedNetwork::Unknown(_) = ResolvedNetwork::from_chain_id(chain_id) {
        if policy == UnknownChainPolicy::Fallback {
            warn!(
                chain_id,
                "Unknown chain id, using {} configuration",
                NetworkName::DEFAULT
            );
        }
    }

    let (network, record) = table.resolve_with(chain_id, policy)?;
    if record.is_placeholder() {
        warn!(%network, "Network configuration is an unfilled placeholder");
    }

    let addresses = record
        .addresses()
        .wrap_err_with(|| format!("configuration for {network} cannot be deployed"))?;

    Ok((network, addresses))
}

/// Whether to call `evm_mine` after broadcasting to `chain_id`.
///
/// Only registered development chains qualify. Unknown chains never do, even
/// when they fall back to the hardhat record.
fn auto_mine(config: &Config, chain_id: u64) -> bool {
    config.auto_mine
        && matches!(
            ResolvedNetwork::from_chain_id(chain_id),
            ResolvedNetwork::Known(network) if network.is_development()
        )
}

/// Deploy the FlowController to the chain `provider` is connected to.
///
/// An earlier deployment recorded in the deployments directory is reused when
/// its init code is unchanged and code still exists at its address.
pub async fn deploy_flow_controller<P>(
    provider: P,
    deployer: Address,
    artifact: Artifact,
    config: &Config,
) -> eyre::Result<Deployment>
where
    P: Provider + Clone,
{
    let chain_id = client::chain_id(&provider).await?;
    let table = config.config_table()?;
    let (network, addresses) = resolve_network(&table, chain_id, config.unknown_chain)?;

    info!(chain_id, %network, "Resolved network");
    info!("  Conviction: {}", addresses.conviction);
    info!("  Superfluid: {}", addresses.superfluid);
    info!("  SuperToken: {}", addresses.super_token);

    let args = ConstructorArgs::new(config.variant, addresses, FlowParams::default());
    let store = DeploymentStore::new(&config.deployments_dir);
    let previous = store.load(network, &artifact.contract_name)?;

    let options = DeployOptions {
        from: deployer,
        log: true,
        auto_mine: auto_mine(config, chain_id),
    };
    let mut action = DeployAction::new(provider, artifact, args, options).with_previous(previous);

    if action.is_completed().await? {
        if let Some(record) = action.previous() {
            info!(
                address = %record.address,
                "Reusing {}",
                record.contract_name
            );
            return Ok(Deployment {
                record: record.clone(),
                reused: true,
            });
        }
    }

    info!("{}", action.description());
    let result = action.execute().await?;
    let address = result
        .contract_address
        .ok_or_eyre("deployment returned no contract address")?;

    let record = DeploymentRecord {
        contract_name: action.artifact().contract_name.clone(),
        network,
        chain_id,
        address,
        deployer,
        transaction_hash: result.tx_hash,
        block_number: result.block_number,
        gas_used: result.gas_used.map(|gas| gas.saturating_to()),
        args: action.args().to_strings(),
        init_code_hash: action.init_code_hash(),
        abi: action.artifact().abi.clone(),
    };

    let path = store.save(&record)?;
    info!(path = %path.display(), "Saved deployment");

    Ok(Deployment {
        record,
        reused: false,
    })
}

/// Verify a deployment on Tenderly.
///
/// Deployments on development networks are skipped.
pub async fn verify_flow_controller(
    config: &Config,
    artifact: &Artifact,
    record: &DeploymentRecord,
    access_key: Option<&str>,
) -> eyre::Result<()> {
    if record.network.is_development() {
        info!(network = %record.network, "Skipping verification on development network");
        return Ok(());
    }

    let tenderly = config
        .tenderly
        .as_ref()
        .ok_or_eyre("no [tenderly] section in config")?;
    let settings = config
        .verify
        .as_ref()
        .ok_or_eyre("no [verify] section in config")?;
    let access_key = access_key.ok_or_eyre("TENDERLY_ACCESS_KEY is not set")?;

    let client = TenderlyClient::new(&tenderly.username, &tenderly.project, access_key)
        .with_api_url(&tenderly.api_url);

    verify_deployment(&client, artifact, record, settings).await
}

/// Load the recorded deployment of `contract` on `network`.
pub fn load_deployment(
    config: &Config,
    network: NetworkName,
    contract: &str,
) -> eyre::Result<DeploymentRecord> {
    DeploymentStore::new(&config.deployments_dir)
        .load(network, contract)?
        .ok_or_else(|| eyre::eyre!("no {contract} deployment recorded for {network}"))
}
