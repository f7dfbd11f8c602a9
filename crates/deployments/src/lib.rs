//! Deployment records.
//!
//! Every successful deployment is written to
//! `<root>/<network>/<ContractName>.json`, next to a `.chainId` file holding
//! the chain the directory belongs to. Records are read back to detect that a
//! contract with identical init code is already deployed.

pub mod record;
pub mod store;

pub use record::DeploymentRecord;
pub use store::DeploymentStore;
