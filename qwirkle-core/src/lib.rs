//! Qwirkle Core - Rule engine and AI
//!
//! This crate provides the core game logic for Qwirkle:
//! - Tiles, the shuffled bag, and the sparse board grid
//! - Move batches and the ordered validation pipeline
//! - Line scoring with the full-run bonus
//! - The turn engine (deal, submit, kick, end detection)
//! - Bounded-time move search for computer players
//! - The line-oriented wire protocol spoken to remote players

pub mod bag;
pub mod board;
pub mod game;
pub mod moves;
pub mod protocol;
pub mod rules;
pub mod score;
pub mod search;
pub mod tile;

// Re-exports for convenient access
pub use bag::TileBag;
pub use board::{Axis, Board, Cell, CENTER, DIM};
pub use game::{Game, GameError, KickReport, Phase, PlayerId, PlayerState, TurnOutcome, HAND_SIZE};
pub use moves::{Move, MoveBatch, Placement, Rejection};
pub use protocol::{Message, ProtocolError};
pub use rules::validate;
pub use score::score;
pub use search::{SearchMode, SearchStrategy};
pub use tile::{Color, Shape, Tile, FULL_SET};
