use alloy_json_abi::JsonAbi;
use alloy_primitives::{Address, TxHash, B256};
use config::NetworkName;
use serde::{Deserialize, Serialize};

/// A contract deployed on one network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentRecord {
    /// Contract name
    pub contract_name: String,
    /// Network the contract was deployed to
    pub network: NetworkName,
    /// Chain id reported by the node at deployment time
    pub chain_id: u64,
    /// Deployed contract address
    pub address: Address,
    /// Account that sent the deployment
    pub deployer: Address,
    /// Deployment transaction hash
    pub transaction_hash: TxHash,
    /// Block number where the deployment was included
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_number: Option<u64>,
    /// Gas used by the deployment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas_used: Option<u64>,
    /// Constructor arguments in call order
    pub args: Vec<String>,
    /// keccak256 of creation bytecode plus encoded arguments
    pub init_code_hash: B256,
    /// Contract ABI
    pub abi: JsonAbi,
}

impl DeploymentRecord {
    /// True if this record was produced from the same init code.
    pub fn matches(&self, init_code_hash: B256) -> bool {
        self.init_code_hash == init_code_hash
    }
}
