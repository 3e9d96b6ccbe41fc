mod cli;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use eth_block_report::api::{self, AppState};
use eth_block_report::config::Config;
use eth_block_report::etherscan::EtherscanClient;
use eth_block_report::job;

use crate::cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    let config = Config::from_env().context("failed to load configuration")?;

    let client = EtherscanClient::new(
        config.etherscan_api_url.clone(),
        config.etherscan_api_key.clone(),
        config.etherscan_timeout,
    )
    .context("failed to build etherscan client")?;

    match cli.command {
        Commands::Report { compact } => {
            let report = job::generate_report(&client)
                .await
                .context("failed to generate block report")?;
            let json = if compact {
                serde_json::to_string(&report)
            } else {
                serde_json::to_string_pretty(&report)
            }
            .context("failed to serialize report")?;
            println!("{}", json);
        }
        Commands::Serve { addr } => {
            let bind = addr.unwrap_or_else(|| config.http_bind_addr.clone());
            let state = AppState {
                source: Arc::new(client),
            };
            api::run_http_server(&bind, state).await?;
        }
    }

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();
}
