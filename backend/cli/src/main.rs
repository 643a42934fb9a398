mod describe_cmd;
mod status_cmd;
mod wiring;

use std::path::Path;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;

use pokelens_config::{ensure_valid, PokelensConfig};
use pokelens_logging::init_logger;

#[derive(Parser)]
#[command(name = "pokelens")]
#[command(about = "PokeLens: pokemon identification relay")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP relay
    Serve {
        /// Port to bind the HTTP server to
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Identify pokemon from a description and print the five names
    Describe {
        /// Free-text description, e.g. "yellow electric mouse"
        text: String,
    },
    /// Show the status of a running relay
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = PokelensConfig::from_env()?;

    init_logger(&config.log_level, config.log_dir.as_deref().map(Path::new));

    match cli.command {
        Commands::Serve { port } => {
            if let Some(port) = port {
                config.port = port;
            }
            run_server(config).await?;
        }
        Commands::Describe { text } => {
            ensure_valid(&config)?;
            describe_cmd::run(&config, &text).await?;
        }
        Commands::Status => status_cmd::run(config.port).await?,
    }

    Ok(())
}

async fn run_server(config: PokelensConfig) -> Result<()> {
    ensure_valid(&config)?;
    info!(
        config = %config.redacted_summary(),
        "Starting PokeLens relay"
    );

    let state = wiring::build_state(&config)?;
    pokelens_gateway::start_server(&config.listen_addr(), state).await
}
