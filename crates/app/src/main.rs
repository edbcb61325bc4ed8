//! Carta storefront CLI

use std::process;

use clap::Parser;
use tracing::error;

use crate::cli::Cli;

mod cli;

#[tokio::main]
pub async fn main() {
    let _env = dotenvy::dotenv();

    let cli = Cli::parse();

    if let Err(error) = carta_app::observability::init(&cli.logging) {
        eprintln!("{error}");
        process::exit(1);
    }

    if let Err(message) = cli.run().await {
        error!(%message, "command failed");
        eprintln!("{message}");
        process::exit(1);
    }
}
