//! Moves, move batches and the rejection taxonomy

use crate::board::Cell;
use crate::tile::Tile;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One tile aimed at one cell
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub tile: Tile,
    pub cell: Cell,
}

impl Placement {
    pub const fn new(tile: Tile, cell: Cell) -> Self {
        Self { tile, cell }
    }
}

/// A single move as a player states it
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Move {
    Place(Placement),
    Trade(Tile),
}

/// The homogeneous batch a player submits in one turn.
///
/// `Trade(vec![])` is the explicit "TRADE empty" sentinel: a forced pass,
/// always accepted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveBatch {
    Place(Vec<Placement>),
    Trade(Vec<Tile>),
}

impl MoveBatch {
    /// The forced-pass sentinel
    pub fn pass() -> Self {
        MoveBatch::Trade(Vec::new())
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, MoveBatch::Trade(tiles) if tiles.is_empty())
    }

    /// Classify a raw move list into a homogeneous batch.
    ///
    /// An empty list and a list mixing placements with trades are both
    /// structural violations, reported before any board inspection.
    pub fn from_moves(moves: &[Move]) -> Result<Self, Rejection> {
        let first = moves.first().ok_or(Rejection::EmptyBatch)?;
        match first {
            Move::Place(_) => {
                let mut places = Vec::with_capacity(moves.len());
                for mv in moves {
                    match mv {
                        Move::Place(place) => places.push(*place),
                        Move::Trade(_) => return Err(Rejection::MixedMoveTypes),
                    }
                }
                Ok(MoveBatch::Place(places))
            }
            Move::Trade(_) => {
                let mut tiles = Vec::with_capacity(moves.len());
                for mv in moves {
                    match mv {
                        Move::Trade(tile) => tiles.push(*tile),
                        Move::Place(_) => return Err(Rejection::MixedMoveTypes),
                    }
                }
                Ok(MoveBatch::Trade(tiles))
            }
        }
    }

    /// Tiles the batch takes out of the acting hand
    pub fn tiles(&self) -> Vec<Tile> {
        match self {
            MoveBatch::Place(places) => places.iter().map(|p| p.tile).collect(),
            MoveBatch::Trade(tiles) => tiles.clone(),
        }
    }
}

/// Why a submitted batch was refused.
///
/// Every variant is recoverable: a rejected batch never mutates game state.
/// What happens next is the driver's call (re-prompt locally, kick over the
/// wire).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("tile is not in your hand")]
    NotOwned,
    #[error("cell is outside the board")]
    OutOfBounds,
    #[error("cell is already occupied")]
    CellOccupied,
    #[error("placement is not connected to any tile on the board")]
    NotConnected,
    #[error("placements do not share a single row or column")]
    MultiAxisViolation,
    #[error("placements leave a gap in the line")]
    GapInLine,
    #[error("tile does not fit the line's fixed color or shape")]
    AttributeConflict,
    #[error("placements and trades cannot be mixed in one turn")]
    MixedMoveTypes,
    #[error("no moves given")]
    EmptyBatch,
}
