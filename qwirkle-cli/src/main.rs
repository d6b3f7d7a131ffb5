//! Qwirkle CLI - Command-line interface
//!
//! Commands:
//! - play: Run computer matches locally
//! - serve: Host networked games over the line protocol

mod play_cmd;

use clap::{Parser, Subcommand};

use qwirkle_server::{run_server, ServerConfig};

#[derive(Parser)]
#[command(name = "qwirkle")]
#[command(about = "Qwirkle rule engine, computer players and game server")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play computer matches locally
    Play(play_cmd::PlayArgs),
    /// Host networked games
    Serve {
        #[arg(long, default_value = "8189")]
        port: u16,
        /// Players per game (2-4)
        #[arg(long, default_value = "4")]
        players: usize,
        /// Advertised think time in milliseconds
        #[arg(long, default_value = "5000")]
        think_time_ms: u64,
        /// Fixed bag seed for reproducible games
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play(args) => play_cmd::run(args),
        Commands::Serve {
            port,
            players,
            think_time_ms,
            seed,
        } => {
            let config = ServerConfig {
                port,
                players_per_game: players,
                think_time_ms,
                seed,
            };
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(run_server(config))
        }
    }
}
