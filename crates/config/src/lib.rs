//! Configuration types for the FlowController deployer.
//!
//! This crate provides:
//! - Chain id to network resolution
//! - Constructor addresses for each network
//! - Fixed-point protocol parameters

mod error;
pub mod flow;
pub mod network;
pub mod params;

pub use error::ConfigError;
pub use flow::{ConfigTable, FlowAddresses, FlowControllerConfig};
pub use network::{NetworkName, ResolvedNetwork, UnknownChainPolicy};
pub use params::FlowParams;
