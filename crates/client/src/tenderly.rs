//! Tenderly contract verification client.
//!
//! Uploads the source of a deployed contract to a Tenderly project so that
//! transactions against it can be debugged with source mappings.

use alloy_primitives::Address;
use eyre::{bail, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Default Tenderly API endpoint.
pub const TENDERLY_API_URL: &str = "https://api.tenderly.co";

/// Client for the Tenderly project API.
///
/// # Example
///
/// ```ignore
/// let client = TenderlyClient::new("my-user", "my-project", access_key);
/// client.verify(&request).await?;
/// ```
#[derive(Debug, Clone)]
pub struct TenderlyClient {
    client: reqwest::Client,
    api_url: String,
    username: String,
    project: String,
    access_key: String,
}

impl TenderlyClient {
    /// Creates a new client against the public Tenderly API.
    pub fn new(
        username: impl Into<String>,
        project: impl Into<String>,
        access_key: impl Into<String>,
    ) -> Self {
        Self::with_client(
            reqwest::Client::new(),
            TENDERLY_API_URL,
            username,
            project,
            access_key,
        )
    }

    /// Creates a new client with a custom HTTP client and API url.
    pub fn with_client(
        client: reqwest::Client,
        api_url: impl Into<String>,
        username: impl Into<String>,
        project: impl Into<String>,
        access_key: impl Into<String>,
    ) -> Self {
        Self {
            client,
            api_url: api_url.into(),
            username: username.into(),
            project: project.into(),
            access_key: access_key.into(),
        }
    }

    /// Point the client at a different API host.
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    /// Project endpoint receiving contract verifications.
    pub fn verify_url(&self) -> String {
        format!(
            "{}/api/v1/account/{}/project/{}/contracts",
            self.api_url.trim_end_matches('/'),
            self.username,
            self.project
        )
    }

    /// Verifies contracts in the configured project.
    pub async fn verify(&self, request: &VerifyRequest) -> Result<()> {
        let response = self
            .client
            .post(self.verify_url())
            .header("X-Access-Key", &self.access_key)
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown".to_string());
            bail!("tenderly returned {status}: {body}");
        }

        Ok(())
    }
}

/// Body of a Tenderly verification request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyRequest {
    pub config: CompilerConfig,
    pub contracts: Vec<VerifiedContract>,
}

/// Compiler settings used to build the verified contracts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompilerConfig {
    pub compiler_version: String,
    pub optimizations_used: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub optimizations_count: Option<u32>,
    pub evm_version: String,
}

/// A contract source together with the networks it is deployed on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifiedContract {
    pub contract_name: String,
    pub source: String,
    pub source_path: String,
    /// Keyed by chain id
    pub networks: BTreeMap<String, ContractNetwork>,
    pub compiler: Compiler,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractNetwork {
    pub address: Address,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Compiler {
    pub name: String,
    pub version: String,
}

impl Compiler {
    pub fn solc(version: impl Into<String>) -> Self {
        Self {
            name: "solc".to_string(),
            version: version.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    #[test]
    fn test_verify_url() {
        let client = TenderlyClient::with_client(
            reqwest::Client::new(),
            "http://localhost:8080/",
            "alice",
            "flows",
            "key",
        );

        assert_eq!(
            client.verify_url(),
            "http://localhost:8080/api/v1/account/alice/project/flows/contracts"
        );
    }

    #[test]
    fn test_default_api_url() {
        let client = TenderlyClient::new("alice", "flows", "key");
        assert!(client.verify_url().starts_with("https://api.tenderly.co/api/v1/"));

        let client = client.with_api_url("http://127.0.0.1:9000");
        assert!(client.verify_url().starts_with("http://127.0.0.1:9000/api/v1/"));
    }

    fn sample_request() -> VerifyRequest {
        let mut networks = BTreeMap::new();
        networks.insert(
            "4".to_string(),
            ContractNetwork {
                address: Address::repeat_byte(0xab),
            },
        );

        VerifyRequest {
            config: CompilerConfig {
                compiler_version: "0.8.4".to_string(),
                optimizations_used: true,
                optimizations_count: Some(200),
                evm_version: "default".to_string(),
            },
            contracts: vec![VerifiedContract {
                contract_name: "FlowController".to_string(),
                source: "contract FlowController {}".to_string(),
                source_path: "contracts/FlowController.sol".to_string(),
                networks,
                compiler: Compiler::solc("0.8.4"),
            }],
        }
    }

    #[test]
    fn test_request_body_shape() {
        let json = serde_json::to_value(sample_request()).unwrap();
        assert_eq!(json["config"]["optimizations_count"], 200);
        assert_eq!(json["contracts"][0]["contractName"], "FlowController");
        assert_eq!(json["contracts"][0]["sourcePath"], "contracts/FlowController.sol");
        assert_eq!(json["contracts"][0]["compiler"]["name"], "solc");
        assert_eq!(
            json["contracts"][0]["networks"]["4"]["address"]
                .as_str()
                .unwrap()
                .to_lowercase(),
            "0xabababababababababababababababababababab"
        );
    }

    #[tokio::test]
    async fn test_verify_sends_access_key() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/api/v1/account/alice/project/flows/contracts")
            .match_header("X-Access-Key", "secret")
            .match_header("content-type", "application/json")
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let client =
            TenderlyClient::with_client(reqwest::Client::new(), server.url(), "alice", "flows", "secret");
        client.verify(&sample_request()).await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_verify_rejected() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/v1/account/alice/project/flows/contracts")
            .with_status(403)
            .with_body("invalid access key")
            .create_async()
            .await;

        let client =
            TenderlyClient::with_client(reqwest::Client::new(), server.url(), "alice", "flows", "wrong");
        let err = client.verify(&sample_request()).await.unwrap_err();

        let message = err.to_string();
        assert!(message.contains("403"), "{message}");
        assert!(message.contains("invalid access key"), "{message}");
    }
}
