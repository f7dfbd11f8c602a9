//! Contract bindings for the FlowController deployment.
//!
//! This crate consolidates:
//! - FlowController constructor interfaces (generated with alloy's `sol!` macro)
//! - Compiled Hardhat artifacts (ABI and creation bytecode)

pub mod artifact;
pub mod flow_controller;

pub use artifact::Artifact;
