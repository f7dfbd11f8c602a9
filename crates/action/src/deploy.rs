use alloy_network::TransactionBuilder;
use alloy_primitives::{Address, TxHash, B256, U256};
use alloy_provider::Provider;
use alloy_rpc_types::{TransactionReceipt, TransactionRequest};
use alloy_sol_types::SolConstructor;
use binding::{flow_controller, Artifact};
use config::{FlowAddresses, FlowParams};
use deployments::DeploymentRecord;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Which FlowController constructor to call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeployVariant {
    /// `(conviction, superfluid, superToken)`
    Basic,
    /// `(conviction, superfluid, superToken, decay, maxRatio, weight)`
    #[default]
    WithParams,
}

impl DeployVariant {
    /// Number of constructor arguments.
    pub const fn arity(&self) -> usize {
        match self {
            Self::Basic => 3,
            Self::WithParams => 6,
        }
    }
}

/// FlowController constructor arguments, in call order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstructorArgs {
    Basic(FlowAddresses),
    WithParams(FlowAddresses, FlowParams),
}

impl ConstructorArgs {
    pub const fn new(variant: DeployVariant, addresses: FlowAddresses, params: FlowParams) -> Self {
        match variant {
            DeployVariant::Basic => Self::Basic(addresses),
            DeployVariant::WithParams => Self::WithParams(addresses, params),
        }
    }

    pub const fn variant(&self) -> DeployVariant {
        match self {
            Self::Basic(_) => DeployVariant::Basic,
            Self::WithParams(..) => DeployVariant::WithParams,
        }
    }

    /// ABI-encoded arguments, to be appended to the creation bytecode.
    pub fn abi_encode(&self) -> Vec<u8> {
        match self {
            Self::Basic(a) => flow_controller::basic::FlowController::constructorCall {
                conviction: a.conviction,
                superfluid: a.superfluid,
                superToken: a.super_token,
            }
            .abi_encode(),
            Self::WithParams(a, p) => flow_controller::FlowController::constructorCall {
                conviction: a.conviction,
                superfluid: a.superfluid,
                superToken: a.super_token,
                decay: p.decay,
                maxRatio: p.max_ratio,
                weight: p.weight,
            }
            .abi_encode(),
        }
    }

    /// Arguments rendered for records and logs.
    pub fn to_strings(&self) -> Vec<String> {
        let addresses = |a: &FlowAddresses| {
            vec![
                a.conviction.to_string(),
                a.superfluid.to_string(),
                a.super_token.to_string(),
            ]
        };

        match self {
            Self::Basic(a) => addresses(a),
            Self::WithParams(a, p) => {
                let mut args = addresses(a);
                args.extend([p.decay, p.max_ratio, p.weight].map(|v| v.to_string()));
                args
            }
        }
    }
}

/// Options for a deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeployOptions {
    /// Account sending the deployment
    pub from: Address,
    /// Log progress at info level
    pub log: bool,
    /// Mine a block right after broadcasting (development nodes only)
    pub auto_mine: bool,
}

/// Deploy action creating a contract from a compiled artifact.
pub struct DeployAction<P> {
    provider: P,
    artifact: Artifact,
    args: ConstructorArgs,
    options: DeployOptions,
    previous: Option<DeploymentRecord>,
}

impl<P> DeployAction<P>
where
    P: Provider + Clone,
{
    pub const fn new(
        provider: P,
        artifact: Artifact,
        args: ConstructorArgs,
        options: DeployOptions,
    ) -> Self {
        Self {
            provider,
            artifact,
            args,
            options,
            previous: None,
        }
    }

    /// Attach the record of an earlier deployment of the same contract.
    pub fn with_previous(mut self, previous: Option<DeploymentRecord>) -> Self {
        self.previous = previous;
        self
    }

    pub const fn args(&self) -> &ConstructorArgs {
        &self.args
    }

    pub const fn artifact(&self) -> &Artifact {
        &self.artifact
    }

    /// Record of the previous deployment, if one was attached.
    pub const fn previous(&self) -> Option<&DeploymentRecord> {
        self.previous.as_ref()
    }

    pub fn init_code_hash(&self) -> B256 {
        self.artifact.init_code_hash(&self.args.abi_encode())
    }

    fn validate(&self) -> eyre::Result<()> {
        if self.artifact.bytecode.is_empty() {
            eyre::bail!(
                "Artifact {} has no bytecode (abstract contract or interface?)",
                self.artifact.contract_name
            );
        }

        if self.options.from == Address::ZERO {
            eyre::bail!("Deployer must not be zero");
        }

        let expected = self.args.variant().arity();
        if let Some(arity) = self.artifact.constructor_arity() {
            if arity != expected {
                eyre::bail!(
                    "Constructor of {} takes {} arguments, {:?} variant passes {}",
                    self.artifact.contract_name,
                    arity,
                    self.args.variant(),
                    expected
                );
            }
        }

        Ok(())
    }

    /// Ask the node to mine a block. Returns false if the node refused.
    ///
    /// Failures are logged and swallowed: the transaction is already
    /// broadcast at this point and the receipt must still be awaited.
    async fn mine(&self) -> bool {
        debug!("Mining block");
        match self
            .provider
            .raw_request::<_, serde_json::Value>("evm_mine".into(), ())
            .await
        {
            Ok(_) => true,
            Err(err) => {
                warn!(%err, "evm_mine failed, waiting for the transaction to be mined");
                false
            }
        }
    }
}

/// Address of the contract created by a deployment, given its receipt.
fn deployed_address(tx_hash: TxHash, receipt: &TransactionReceipt) -> eyre::Result<Address> {
    if !receipt.status() {
        eyre::bail!("Deployment transaction {} reverted", tx_hash);
    }

    receipt
        .contract_address
        .ok_or_else(|| eyre::eyre!("Receipt for {} has no contract address", tx_hash))
}

impl<P> crate::Action for DeployAction<P>
where
    P: Provider + Clone,
{
    async fn is_ready(&self) -> eyre::Result<bool> {
        Ok(self.validate().is_ok())
    }

    async fn is_completed(&self) -> eyre::Result<bool> {
        let Some(previous) = &self.previous else {
            return Ok(false);
        };

        if !previous.matches(self.init_code_hash()) {
            debug!(address = %previous.address, "Init code changed since last deployment");
            return Ok(false);
        }

        let chain_id = self.provider.get_chain_id().await?;
        if chain_id != previous.chain_id {
            debug!(
                chain_id,
                recorded = previous.chain_id,
                "Recorded deployment belongs to another chain"
            );
            return Ok(false);
        }

        let code = self.provider.get_code_at(previous.address).await?;
        if code.is_empty() {
            debug!(address = %previous.address, "No code at recorded address");
            return Ok(false);
        }

        Ok(true)
    }

    async fn execute(&mut self) -> eyre::Result<crate::Result> {
        self.validate()?;

        let init_code = self.artifact.init_code(&self.args.abi_encode());
        let tx = TransactionRequest::default()
            .with_from(self.options.from)
            .with_deploy_code(init_code);

        let pending_tx = self.provider.send_transaction(tx).await?;
        let tx_hash = *pending_tx.tx_hash();

        if self.options.log {
            info!(%tx_hash, "Deploying {}", self.artifact.contract_name);
        }

        if self.options.auto_mine {
            self.mine().await;
        }

        // Wait for confirmation
        let receipt = pending_tx.get_receipt().await?;
        let contract_address = deployed_address(tx_hash, &receipt)?;

        if self.options.log {
            info!(
                address = %contract_address,
                gas_used = receipt.gas_used,
                "Deployed {}",
                self.artifact.contract_name
            );
        }

        Ok(crate::Result {
            tx_hash,
            block_number: receipt.block_number,
            gas_used: Some(U256::from(receipt.gas_used)),
            contract_address: Some(contract_address),
        })
    }

    fn description(&self) -> String {
        format!(
            "Deploy {} from {} with args [{}]",
            self.artifact.contract_name,
            self.options.from,
            self.args.to_strings().join(", ")
        )
    }
}
