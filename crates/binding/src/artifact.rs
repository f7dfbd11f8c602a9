//! Compiled contract artifacts.
//!
//! Reads the JSON emitted by Hardhat under
//! `artifacts/<sourceName>/<contractName>.json`.

use alloy_json_abi::JsonAbi;
use alloy_primitives::{keccak256, Bytes, B256};
use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A compiled contract: ABI plus creation bytecode.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    /// Contract name, e.g. `FlowController`
    pub contract_name: String,
    /// Path of the Solidity source relative to the project root
    #[serde(default)]
    pub source_name: Option<String>,
    /// Contract ABI
    pub abi: JsonAbi,
    /// Creation bytecode, without constructor arguments
    pub bytecode: Bytes,
}

impl Artifact {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read artifact {}", path.display()))?;

        Self::from_json(&contents)
            .wrap_err_with(|| format!("failed to parse artifact {}", path.display()))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Number of constructor inputs, if the ABI declares a constructor.
    pub fn constructor_arity(&self) -> Option<usize> {
        self.abi.constructor.as_ref().map(|c| c.inputs.len())
    }

    /// Creation bytecode followed by ABI-encoded constructor arguments.
    pub fn init_code(&self, encoded_args: &[u8]) -> Bytes {
        let mut code = Vec::with_capacity(self.bytecode.len() + encoded_args.len());
        code.extend_from_slice(&self.bytecode);
        code.extend_from_slice(encoded_args);
        code.into()
    }

    /// Hash identifying a deployment of this artifact with the given arguments.
    pub fn init_code_hash(&self, encoded_args: &[u8]) -> B256 {
        keccak256(self.init_code(encoded_args))
    }
}
