//! FlowController deployment CLI.
//!
//! Subcommands:
//! - `deploy`: deploy to the connected network, then verify on Tenderly
//! - `verify`: verify an already recorded deployment
//! - `resolve`: show the configuration a chain id resolves to
//! - `networks`: list networks and the state of their configuration

use binding::Artifact;
use clap::{Parser, Subcommand};
use config::{NetworkName, ResolvedNetwork};
use deployer::{
    config::Config, deploy_flow_controller, load_deployment, resolve_network,
    verify_flow_controller,
};
use tracing::info;

#[derive(Parser)]
#[command(name = "deployer")]
#[command(about = "Deploy the FlowController contract")]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "deployer.toml")]
    config: String,

    /// RPC endpoint, overrides `rpc_url` from the configuration file
    #[arg(long, env = "RPC_URL")]
    rpc_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Deploy FlowController to the connected network and verify it
    Deploy {
        /// Private key of the deployer account (hex string, with or without 0x prefix)
        #[arg(short = 'k', long, env = "PRIVATE_KEY", hide_env_values = true)]
        private_key: String,

        /// Tenderly access key
        #[arg(long, env = "TENDERLY_ACCESS_KEY", hide_env_values = true)]
        tenderly_access_key: Option<String>,

        /// Do not verify the deployment
        #[arg(long)]
        skip_verify: bool,
    },

    /// Verify a recorded deployment on Tenderly
    Verify {
        /// Network the deployment was recorded for
        #[arg(short, long)]
        network: NetworkName,

        /// Tenderly access key
        #[arg(long, env = "TENDERLY_ACCESS_KEY", hide_env_values = true)]
        tenderly_access_key: Option<String>,
    },

    /// Show the configuration a chain id resolves to
    Resolve {
        /// Chain id to resolve
        chain_id: u64,
    },

    /// List networks and their configuration
    Networks,
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let mut config = Config::from_file(&cli.config)?;

    // Override rpc url from CLI flag
    if cli.rpc_url.is_some() {
        config.rpc_url = cli.rpc_url;
    }

    match cli.command {
        Command::Deploy {
            private_key,
            tenderly_access_key,
            skip_verify,
        } => {
            let rpc_url = config
                .rpc_url
                .as_deref()
                .ok_or_else(|| eyre::eyre!("no rpc_url configured"))?;
            let artifact = Artifact::from_file(&config.artifact)?;
            let deployer = client::deployer_address(&private_key)?;

            info!("Loaded config:");
            info!("  RPC URL: {}", rpc_url);
            info!("  Artifact: {}", config.artifact.display());
            info!("  Variant: {:?}", config.variant);
            info!("  Deployer: {}", deployer);

            let provider = client::create_wallet_provider(rpc_url, &private_key)?;
            let deployment =
                deploy_flow_controller(provider, deployer, artifact.clone(), &config).await?;

            info!(
                address = %deployment.record.address,
                reused = deployment.reused,
                "FlowController ready"
            );

            if skip_verify {
                info!("Skipping verification");
            } else {
                verify_flow_controller(
                    &config,
                    &artifact,
                    &deployment.record,
                    tenderly_access_key.as_deref(),
                )
                .await?;
            }
        }
        Command::Verify {
            network,
            tenderly_access_key,
        } => {
            let artifact = Artifact::from_file(&config.artifact)?;
            let record = load_deployment(&config, network, &artifact.contract_name)?;

            verify_flow_controller(&config, &artifact, &record, tenderly_access_key.as_deref())
                .await?;
        }
        Command::Resolve { chain_id } => {
            let table = config.config_table()?;
            let resolved = ResolvedNetwork::from_chain_id(chain_id);
            let network = resolved.or_default();

            info!(chain_id, %network, known = resolved.is_known(), "Resolved chain id");
            match table.get(network) {
                Some(record) => println!("{}", serde_json::to_string_pretty(record)?),
                None => println!("null"),
            }

            // Fails on rejected chains, missing records and placeholders.
            resolve_network(&table, chain_id, config.unknown_chain)?;
            info!("Configuration is deployable");
        }
        Command::Networks => {
            let table = config.config_table()?;

            for network in NetworkName::ALL {
                let chain_id = network
                    .chain_id()
                    .map_or_else(|| "-".to_string(), |id| id.to_string());
                let status = match table.get(network) {
                    None => "missing",
                    Some(record) if record.is_placeholder() => "placeholder",
                    Some(record) if record.addresses().is_err() => "invalid",
                    Some(_) => "configured",
                };
                println!("{network:<10} {chain_id:>6}  {status}");
            }
        }
    }

    Ok(())
}
