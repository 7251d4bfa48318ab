//! whosthat CLI — the terminal front end for the trivia game.

use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "whosthat", version, about = "Who's That Pokémon? in your terminal")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every command that loads a catalog.
#[derive(Args, Debug, Clone, Default)]
pub struct CatalogArgs {
    /// Config file path
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of Pokémon fetched at startup (ids 1..=N)
    #[arg(long)]
    batch_size: Option<u32>,

    /// Read records from a local JSON array instead of PokéAPI
    #[arg(long)]
    source_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a game
    Play {
        #[command(flatten)]
        catalog: CatalogArgs,

        /// Fixed RNG seed for a reproducible game
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Load the catalog and print it
    Catalog {
        #[command(flatten)]
        catalog: CatalogArgs,
    },

    /// Create a starter whosthat.toml
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("whosthat=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play { catalog, seed } => commands::play::execute(catalog, seed).await,
        Commands::Catalog { catalog } => commands::catalog::execute(catalog).await,
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
