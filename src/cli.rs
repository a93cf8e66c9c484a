use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "eth-block-probe", version, about = "Ethereum transaction and block probe")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch one transaction, print its key fields, then print an ERC-20
    /// transfer payload built from the flags below
    InspectTx {
        #[arg(long)]
        tx_hash: String,
        /// Recipient of the example transfer payload (default: Binance 10)
        #[arg(long, default_value = "0x85b931A32a0725Be14285B66f1a22178c672d69B")]
        transfer_to: String,
        /// Whole-token amount to encode
        #[arg(long, default_value_t = 100)]
        transfer_amount: u64,
        /// Token decimals used to scale the amount (default: USDC)
        #[arg(long, default_value_t = 6)]
        token_decimals: u32,
    },
    /// Aggregate one block: busiest sender, busiest receiver, highest gas price
    BlockStats {
        #[arg(long)]
        block: u64,
    },
}
