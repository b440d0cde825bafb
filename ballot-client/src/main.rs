//! Ballot Client CLI
//!
//! Usage:
//!   ballot-client addresses                      # Contract addresses from the relay
//!   ballot-client request-tokens 0xabc.. 5000    # Mint tokens through the relay
//!   ballot-client vote 1 250                     # Vote through the relay
//!   ballot-client wallet --private-key ..        # Balances of your own account

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::process::ExitCode;

use ballot_client::{render_outcome, RelayClient, WalletSession};
use tokenized_ballot::units::parse_address;
use tokenized_ballot::TxOutcome;

/// Tokenized ballot client
#[derive(Parser)]
#[command(name = "ballot-client")]
#[command(about = "Client for the tokenized ballot relay", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Relay API base URL
    #[arg(long, env = "BALLOT_API_URL", default_value = "http://localhost:3000")]
    api_url: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show both contract addresses
    Addresses,
    /// Show the token total supply
    TotalSupply,
    /// Show the allowance granted by `from` to `to`
    Allowance { from: String, to: String },
    /// Show whether a transaction has been mined
    TxStatus { hash: String },
    /// Show a transaction object
    TxReceipt { hash: String },
    /// Mint tokens to an address
    RequestTokens { address: String, amount: f64 },
    /// Delegate the relay signer's votes
    Delegate { delegatee: String },
    /// Vote on a proposal with the relay signer's voting power
    Vote { proposal_id: String, amount: f64 },
    /// Show the currently winning proposal
    WinningProposal,
    /// Connect your own account and show its balances
    Wallet {
        /// JSON-RPC endpoint
        #[arg(long, env = "RPC_URL")]
        rpc_url: String,
        /// Account private key (hex)
        #[arg(long, env = "WALLET_PRIVATE_KEY")]
        private_key: String,
        #[arg(long, env = "CHAIN_ID", default_value_t = 5)]
        chain_id: u64,
    },
}

fn print_outcome(outcome: &TxOutcome) -> ExitCode {
    println!("{}", render_outcome(outcome));
    if outcome.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let relay = RelayClient::new(&cli.api_url).context("Failed to create relay client")?;

    match cli.command {
        Commands::Addresses => {
            let token = relay.my_token_contract_address().await?;
            let ballot = relay.tokenized_ballot_contract_address().await?;
            println!("MyToken:         {}", token);
            println!("TokenizedBallot: {}", ballot);
        }
        Commands::TotalSupply => {
            println!("{} MTK", relay.total_supply().await?);
        }
        Commands::Allowance { from, to } => {
            println!("{} MTK", relay.allowance(&from, &to).await?);
        }
        Commands::TxStatus { hash } => {
            println!("{}", relay.transaction_status(&hash).await?);
        }
        Commands::TxReceipt { hash } => {
            let tx = relay.transaction_receipt(&hash).await?;
            println!("{}", serde_json::to_string_pretty(&tx)?);
        }
        Commands::RequestTokens { address, amount } => {
            return Ok(print_outcome(&relay.request_tokens(&address, amount).await?));
        }
        Commands::Delegate { delegatee } => {
            return Ok(print_outcome(&relay.delegate(&delegatee).await?));
        }
        Commands::Vote {
            proposal_id,
            amount,
        } => {
            return Ok(print_outcome(&relay.vote(&proposal_id, amount).await?));
        }
        Commands::WinningProposal => {
            return Ok(print_outcome(&relay.winning_proposal().await?));
        }
        Commands::Wallet {
            rpc_url,
            private_key,
            chain_id,
        } => {
            let session = WalletSession::connect(&rpc_url, &private_key, chain_id)?;
            let token_address = relay
                .my_token_contract_address()
                .await
                .context("Failed to load token address from relay")?;
            let token = parse_address(&token_address)?;

            let info = session.info(token).await?;
            let supply = session.token_total_supply(token).await?;

            println!("Address:       {:?}", info.address);
            println!("ETH balance:   {}", info.eth_balance);
            println!("Token balance: {} MTK", info.token_balance);
            println!("Voting power:  {}", info.voting_power);
            println!("Total supply:  {} MTK", supply);
        }
    }

    Ok(ExitCode::SUCCESS)
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
