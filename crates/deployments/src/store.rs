use crate::DeploymentRecord;
use config::NetworkName;
use eyre::{Context, Result};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::debug;

const CHAIN_ID_FILE: &str = ".chainId";

/// Directory of deployment records, one subdirectory per network.
#[derive(Debug, Clone)]
pub struct DeploymentStore {
    root: PathBuf,
}

impl DeploymentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the record for `contract` on `network`.
    pub fn record_path(&self, network: NetworkName, contract: &str) -> PathBuf {
        self.network_dir(network).join(format!("{contract}.json"))
    }

    fn network_dir(&self, network: NetworkName) -> PathBuf {
        self.root.join(network.as_str())
    }

    /// Load the record for `contract` on `network`, if one was saved.
    pub fn load(&self, network: NetworkName, contract: &str) -> Result<Option<DeploymentRecord>> {
        let path = self.record_path(network, contract);
        if !path.exists() {
            debug!(path = %path.display(), "No deployment record");
            return Ok(None);
        }

        let contents = fs::read_to_string(&path)
            .wrap_err_with(|| format!("failed to read {}", path.display()))?;
        let record = serde_json::from_str(&contents)
            .wrap_err_with(|| format!("failed to parse {}", path.display()))?;

        Ok(Some(record))
    }

    /// Write `record` to disk, replacing any previous record.
    pub fn save(&self, record: &DeploymentRecord) -> Result<PathBuf> {
        let dir = self.network_dir(record.network);
        fs::create_dir_all(&dir).wrap_err_with(|| format!("failed to create {}", dir.display()))?;

        fs::write(dir.join(CHAIN_ID_FILE), record.chain_id.to_string())?;

        let path = self.record_path(record.network, &record.contract_name);
        let contents = serde_json::to_string_pretty(record)?;
        fs::write(&path, contents).wrap_err_with(|| format!("failed to write {}", path.display()))?;

        debug!(path = %path.display(), address = %record.address, "Saved deployment record");
        Ok(path)
    }
}
