use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;
use tx_client::{ClientConfig, TxService};
use tx_core::models::parse::ParseOptions;
use tx_core::Document;

#[derive(Parser)]
#[command(name = "txcli")]
#[command(about = "Call the Tx API using credentials from TX_* environment variables")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show account details and remaining credits
    Account,
    /// Parse a resume file
    ParseResume { file: PathBuf },
    /// Parse a job order file
    ParseJob { file: PathBuf },
    /// List the account's indexes
    Indexes,
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = ClientConfig::from_env().context("reading TX_* configuration")?;
    tracing::debug!(?config, "loaded configuration");
    let service = TxService::new(&config)?;

    match cli.command {
        Command::Account => print_json(&service.account().await?),
        Command::ParseResume { file } => {
            let document = Document::from_path(&file).with_context(|| format!("loading {}", file.display()))?;
            let parsed = service
                .parse_resume(&document.into_parse_request(ParseOptions::default()))
                .await?;
            print_json(&parsed)
        }
        Command::ParseJob { file } => {
            let document = Document::from_path(&file).with_context(|| format!("loading {}", file.display()))?;
            let parsed = service
                .parse_job(&document.into_parse_request(ParseOptions::default()))
                .await?;
            print_json(&parsed)
        }
        Command::Indexes => print_json(&service.get_all_indexes().await?),
    }
}
