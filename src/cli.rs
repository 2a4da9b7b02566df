use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "eth-pending-resolver",
    version,
    about = "Lists the unmined transactions of an EVM account"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve pending transactions for one account and print them as JSON
    Pending {
        #[arg(long)]
        chain_id: u64,
        #[arg(long)]
        address: String,
        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// List chain ids with a configured RPC endpoint
    Chains,
    /// Run the HTTP API server
    Serve {
        /// Override bind address, e.g. 0.0.0.0:3000
        #[arg(long)]
        addr: Option<String>,
    },
}
