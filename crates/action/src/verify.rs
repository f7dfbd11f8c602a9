//! Source verification of deployed contracts on Tenderly.

use binding::Artifact;
use client::{
    Compiler, CompilerConfig, ContractNetwork, TenderlyClient, VerifiedContract, VerifyRequest,
};
use deployments::DeploymentRecord;
use eyre::{Context, OptionExt};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, path::PathBuf};
use tracing::info;

/// Compiler settings and source location needed to verify a contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifySettings {
    /// Directory the artifact's `sourceName` is relative to
    #[serde(default = "default_source_root")]
    pub source_root: PathBuf,
    /// solc version, e.g. `0.8.4`
    pub compiler_version: String,
    /// Optimizer runs; `None` when the optimizer was disabled
    #[serde(default)]
    pub optimizer_runs: Option<u32>,
    #[serde(default = "default_evm_version")]
    pub evm_version: String,
}

fn default_source_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_evm_version() -> String {
    "default".to_string()
}

/// Build the Tenderly request for a recorded deployment.
pub fn verify_request(
    artifact: &Artifact,
    record: &DeploymentRecord,
    settings: &VerifySettings,
) -> eyre::Result<VerifyRequest> {
    let source_path = artifact
        .source_name
        .clone()
        .ok_or_eyre("artifact has no sourceName")?;

    let full_path = settings.source_root.join(&source_path);
    let source = std::fs::read_to_string(&full_path)
        .wrap_err_with(|| format!("failed to read source {}", full_path.display()))?;

    let mut networks = BTreeMap::new();
    networks.insert(
        record.chain_id.to_string(),
        ContractNetwork {
            address: record.address,
        },
    );

    Ok(VerifyRequest {
        config: CompilerConfig {
            compiler_version: settings.compiler_version.clone(),
            optimizations_used: settings.optimizer_runs.is_some(),
            optimizations_count: settings.optimizer_runs,
            evm_version: settings.evm_version.clone(),
        },
        contracts: vec![VerifiedContract {
            contract_name: artifact.contract_name.clone(),
            source,
            source_path,
            networks,
            compiler: Compiler::solc(&settings.compiler_version),
        }],
    })
}

/// Verify a recorded deployment in the client's Tenderly project.
pub async fn verify_deployment(
    client: &TenderlyClient,
    artifact: &Artifact,
    record: &DeploymentRecord,
    settings: &VerifySettings,
) -> eyre::Result<()> {
    let request = verify_request(artifact, record, settings)?;

    info!(
        contract = %record.contract_name,
        address = %record.address,
        chain_id = record.chain_id,
        "Verifying on Tenderly"
    );
    client.verify(&request).await?;
    info!(contract = %record.contract_name, "Verified");

    Ok(())
}
