//! Play command - local matches between computer players
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: play_series(), report_results()
//! - Level 3: play_single_game()
//! - Level 4: formatting utilities

use std::time::Duration;

use anyhow::{bail, Result};
use clap::Args;
use serde::Serialize;

use qwirkle_core::game::{MAX_PLAYERS, MIN_PLAYERS};
use qwirkle_core::{Game, SearchMode, SearchStrategy};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct PlayArgs {
    /// Number of computer players (2-4)
    #[arg(long, default_value = "2")]
    pub players: usize,

    /// Pick the first legal move instead of the best-scoring one
    #[arg(long)]
    pub first_fit: bool,

    /// Search budget per move in milliseconds
    #[arg(long, default_value = "500")]
    pub think_time_ms: u64,

    /// Number of games to play
    #[arg(long, default_value = "1")]
    pub games: usize,

    /// Bag seed for the first game; later games use seed+1, seed+2, ...
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Result of a single game
#[derive(Clone, Debug, Serialize)]
struct GameRecord {
    game_number: usize,
    winner: String,
    scores: Vec<(String, u32)>,
    moves: u32,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run play command
pub fn run(args: PlayArgs) -> Result<()> {
    if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&args.players) {
        bail!("--players must be between {MIN_PLAYERS} and {MAX_PLAYERS}");
    }
    let mode = if args.first_fit {
        SearchMode::FirstFit
    } else {
        SearchMode::BestScore
    };
    let strategy = SearchStrategy::new(mode, Duration::from_millis(args.think_time_ms));

    tracing::info!(
        "Starting series: {} games, {} players, think time {}ms",
        args.games,
        args.players,
        args.think_time_ms
    );

    let records = play_series(&args, strategy)?;
    report_results(&records, &args)?;
    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn play_series(args: &PlayArgs, strategy: SearchStrategy) -> Result<Vec<GameRecord>> {
    let mut records = Vec::with_capacity(args.games);
    for game_number in 0..args.games {
        let seed = args.seed.map(|s| s + game_number as u64);
        let record = play_single_game(game_number, args.players, strategy, seed)?;
        tracing::info!(
            "game {}: {} won after {} moves",
            record.game_number,
            record.winner,
            record.moves
        );
        records.push(record);
    }
    Ok(records)
}

fn report_results(records: &[GameRecord], args: &PlayArgs) -> Result<()> {
    if args.json {
        println!("{}", serde_json::to_string_pretty(records)?);
        return Ok(());
    }
    for record in records {
        println!("Game {} ({} moves)", record.game_number, record.moves);
        for (name, score) in &record.scores {
            let marker = if *name == record.winner { " *" } else { "" };
            println!("  {name:<12} {score:>4}{marker}");
        }
    }
    Ok(())
}

// ============================================================================
// LEVEL 3 - SINGLE GAME
// ============================================================================

fn play_single_game(
    game_number: usize,
    players: usize,
    strategy: SearchStrategy,
    seed: Option<u64>,
) -> Result<GameRecord> {
    let names = player_names(players);
    let mut game = match seed {
        Some(seed) => Game::with_seed(names, seed)?,
        None => Game::new(names)?,
    };

    while !game.is_over() {
        let current = game.current_player();
        let batch = strategy.choose(game.board(), &current.hand, game.bag_len());
        match game.submit(batch) {
            Ok(outcome) if outcome.points > 0 => {
                tracing::debug!("player {} scored {}", outcome.player, outcome.points);
            }
            Ok(_) => {}
            // The search only proposes batches it has validated, so a
            // rejection here means the local variant's silent skip.
            Err(e) => {
                tracing::warn!("move rejected ({e}), skipping turn");
                game.skip_turn();
            }
        }
    }

    let winner_id = game.winner();
    let scores: Vec<(String, u32)> = game
        .players()
        .iter()
        .map(|p| (p.name.clone(), p.score))
        .collect();
    let winner = winner_id
        .and_then(|id| game.player(id))
        .map(|p| p.name.clone())
        .unwrap_or_default();
    Ok(GameRecord {
        game_number,
        winner,
        scores,
        moves: game.move_counter(),
    })
}

// ============================================================================
// LEVEL 4 - FORMATTING
// ============================================================================

fn player_names(count: usize) -> Vec<String> {
    ["Ada", "Brook", "Casey", "Devon"][..count]
        .iter()
        .map(|s| s.to_string())
        .collect()
}
