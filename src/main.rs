use anyhow::Context;
use clap::Parser;
use ethers_core::types::H256;

use eth_block_probe::cli::{Cli, Commands};
use eth_block_probe::config::Config;
use eth_block_probe::eth::EthClient;
use eth_block_probe::{aggregate, inspect};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    // Missing credentials are fatal before any network call is attempted.
    let config = Config::from_env().context("failed to load configuration")?;
    let client = EthClient::new(&config.eth_rpc_url, config.request_timeout)?;

    match cli.command {
        Commands::InspectTx {
            tx_hash,
            transfer_to,
            transfer_amount,
            token_decimals,
        } => {
            let hash: H256 = tx_hash
                .parse()
                .with_context(|| format!("invalid transaction hash {tx_hash}"))?;
            let report = inspect::inspect(&client, hash).await?;

            println!("Transaction Details:");
            println!(
                "To address: {}",
                report.to.as_deref().unwrap_or("(contract creation)")
            );
            println!("Gas price (in wei): {}", report.gas_price_wei);
            println!("Input call data: {}", report.input);

            let payload =
                inspect::build_transfer_payload(token_decimals, transfer_amount, &transfer_to)?;
            println!();
            println!("ERC-20 Transfer Input Call Data:");
            println!("{payload}");
        }
        Commands::BlockStats { block } => {
            let stats = aggregate::aggregate(&client, block).await?;

            println!("Block Number: {block}");
            match &stats.top_sender {
                Some(entry) => println!(
                    "1) Sender with most transactions: {} ({} txs)",
                    entry.address, entry.count
                ),
                None => println!("1) Sender with most transactions: none"),
            }
            match &stats.top_receiver {
                Some(entry) => println!(
                    "2) Receiver with most transactions: {} ({} txs)",
                    entry.address, entry.count
                ),
                None => println!("2) Receiver with most transactions: none"),
            }
            match &stats.max_gas_price_tx {
                Some(tx) => {
                    println!("3) Transaction with the highest gas price:");
                    println!("   TX Hash: {}", tx.hash);
                    println!("   Gas Price (wei): {}", tx.gas_price_wei);
                }
                None => println!("3) Transaction with the highest gas price: none"),
            }
        }
    }

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();
}
