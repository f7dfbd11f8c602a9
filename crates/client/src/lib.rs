mod tenderly;

use alloy_network::EthereumWallet;
use alloy_primitives::Address;
use alloy_provider::{Provider, ProviderBuilder};
use alloy_signer_local::PrivateKeySigner;
pub use tenderly::{
    Compiler, CompilerConfig, ContractNetwork, TenderlyClient, VerifiedContract, VerifyRequest,
    TENDERLY_API_URL,
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    /// Error parsing or validating URLs
    #[error("Invalid RPC URL: {0}")]
    InvalidUrl(String),

    /// Error connecting to the RPC endpoint
    #[error("Connection error: {0}")]
    Connection(String),

    /// Error with private key
    #[error("Invalid private key: {0}")]
    InvalidPrivateKey(String),
}

/// Create a provider with wallet signing capability from a private key.
///
/// Transactions sent through the provider are filled (nonce, gas, fees,
/// chain id) and signed locally.
pub fn create_wallet_provider(
    rpc_url: &str,
    private_key: &str,
) -> Result<impl Provider + Clone, ClientError> {
    let url = rpc_url
        .parse()
        .map_err(|e| ClientError::InvalidUrl(format!("{}", e)))?;

    let signer = parse_signer(private_key)?;
    let wallet = EthereumWallet::from(signer);

    let provider = ProviderBuilder::new().wallet(wallet).connect_http(url);

    Ok(provider)
}

/// Address of the account controlled by `private_key`.
///
/// This is the `deployer` account: every deployment is sent from it.
pub fn deployer_address(private_key: &str) -> Result<Address, ClientError> {
    Ok(parse_signer(private_key)?.address())
}

/// Chain id reported by the node.
pub async fn chain_id<P>(provider: &P) -> Result<u64, ClientError>
where
    P: Provider,
{
    provider
        .get_chain_id()
        .await
        .map_err(|e| ClientError::Connection(format!("{}", e)))
}

fn parse_signer(private_key: &str) -> Result<PrivateKeySigner, ClientError> {
    private_key
        .trim()
        .parse()
        .map_err(|e| ClientError::InvalidPrivateKey(format!("{}", e)))
}
