use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use eth_pending_resolver::api::{self, AppState};
use eth_pending_resolver::cli::{Cli, Commands};
use eth_pending_resolver::config::Config;
use eth_pending_resolver::{HttpConnector, PendingResolver};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    let config = Config::from_env().context("failed to load configuration")?;
    let registry = Arc::new(config.registry);
    let connector = HttpConnector::new(registry.clone(), config.rpc_timeout)?;
    let resolver = Arc::new(PendingResolver::new(connector));

    match cli.command {
        Commands::Serve { addr } => {
            let bind = addr.unwrap_or_else(|| config.http_bind_addr.clone());
            api::run_http_server(&bind, AppState { resolver }).await?;
        }
        Commands::Pending {
            chain_id,
            address,
            pretty,
        } => {
            let resolution = resolver.resolve(chain_id, &address).await?;
            let json = if pretty {
                serde_json::to_string_pretty(&resolution)?
            } else {
                serde_json::to_string(&resolution)?
            };
            println!("{json}");
        }
        Commands::Chains => {
            for chain in registry.chains() {
                println!("{}\t{}", chain.chain_id, chain.name.unwrap_or("custom"));
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
        .with_writer(std::io::stderr)
        .init();
}
