/// Ballot Relay Server
///
/// Relays HTTP requests to the MyToken and TokenizedBallot contracts,
/// signing writes with the configured relay key.

use anyhow::{Context, Result};
use std::sync::Arc;

use ballot_api::{run_server, RelayConfig};
use tokenized_ballot::{EthersChain, RelayService};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .init();

    log::info!("Starting ballot relay server...");

    // Load configuration
    let config = RelayConfig::from_env()
        .context("Failed to load configuration")?;

    log::info!("RPC URL: {}", config.rpc_url);
    log::info!("Chain id: {}", config.chain_id);
    log::info!("MyToken: {:?}", config.contracts.my_token);
    log::info!("TokenizedBallot: {:?}", config.contracts.tokenized_ballot);

    // Bind both contracts to the provider and relay signer
    let chain = EthersChain::connect(
        &config.rpc_url,
        &config.signer_private_key,
        config.chain_id,
        config.contracts.my_token,
        config.contracts.tokenized_ballot,
    )
    .context("Failed to create chain client")?;

    let service = Arc::new(RelayService::new(
        Arc::new(chain),
        config.contracts,
        config.explorer_url.clone(),
    ));

    run_server(service, &config.bind_address(), &config.allowed_origins)
        .await
        .context("Server error")?;

    Ok(())
}
