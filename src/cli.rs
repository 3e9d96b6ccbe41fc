use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "eth-block-report",
    version,
    about = "Value report for the latest Ethereum block"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch the latest block once and print its value report as JSON
    Report {
        /// Print single-line JSON instead of indented
        #[arg(long)]
        compact: bool,
    },
    /// Run the HTTP API server (GET /report, GET /health)
    Serve {
        /// Override bind address, e.g. 0.0.0.0:8080
        #[arg(long)]
        addr: Option<String>,
    },
}
