//! Example to run the Qwirkle server standalone
//!
//! Run with: cargo run -p qwirkle-server --example run_server

use qwirkle_server::{run_server, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let config = ServerConfig::default();

    println!("Starting Qwirkle server on port {}", config.port);
    println!(
        "Games start at {} players, think time {}ms",
        config.players_per_game, config.think_time_ms
    );

    run_server(config).await
}
