//! Deployment against a local development node (anvil or hardhat).
//!
//! Run with:
//! ```bash
//! anvil &
//! PRIVATE_KEY=0x... cargo test --package deployer --test deploy -- --ignored
//! ```

use alloy_provider::Provider;
use binding::Artifact;
use config::NetworkName;
use deployer::{deploy_flow_controller, load_deployment};
use setup::{load_test_config, rpc_url, setup_wallet_provider};

#[tokio::test]
#[ignore] // requires a local node and a funded key
async fn test_deploy_then_reuse() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = load_test_config();
    config.deployments_dir = dir.path().to_path_buf();

    let url = rpc_url(&config);
    let (provider, deployer) = setup_wallet_provider(&url);
    let artifact = Artifact::from_file(&config.artifact).unwrap();

    let first = deploy_flow_controller(provider.clone(), deployer, artifact.clone(), &config)
        .await
        .unwrap();
    assert!(!first.reused);
    assert_eq!(first.record.network, NetworkName::Hardhat);
    assert_eq!(first.record.deployer, deployer);
    assert_eq!(first.record.args.len(), 6);

    let code = provider.get_code_at(first.record.address).await.unwrap();
    assert!(!code.is_empty());

    let saved = load_deployment(&config, NetworkName::Hardhat, "FlowController").unwrap();
    assert_eq!(saved.address, first.record.address);

    let second = deploy_flow_controller(provider, deployer, artifact, &config)
        .await
        .unwrap();
    assert!(second.reused);
    assert_eq!(second.record.address, first.record.address);
}
