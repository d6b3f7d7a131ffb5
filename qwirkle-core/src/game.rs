//! Turn engine
//!
//! Owns the board, the bag and the roster, and drives the game through
//! validated move submission. All mutation goes through [`Game::submit`],
//! [`Game::skip_turn`] and [`Game::kick`], so callers can treat a `&Game`
//! as a consistent snapshot at any point.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::bag::TileBag;
use crate::board::Board;
use crate::moves::{MoveBatch, Rejection};
use crate::rules::validate;
use crate::score::score;
use crate::tile::Tile;

pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 4;

/// Hands are refilled toward this size after every move
pub const HAND_SIZE: usize = 6;

/// Awarded once to the player who empties their hand with the bag empty
pub const END_BONUS: u32 = 6;

/// Full table rounds without a scoring move before the game stalls out
pub const STALL_ROUNDS: u32 = 2;

/// Stable identifier for a player, unchanged by kicks
pub type PlayerId = usize;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("a game needs {MIN_PLAYERS} to {MAX_PLAYERS} players, got {0}")]
    PlayerCount(usize),
    #[error("the game is not in progress")]
    NotPlaying,
    #[error(transparent)]
    Rejected(#[from] Rejection),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Playing,
    Ended,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerState {
    pub id: PlayerId,
    pub name: String,
    pub score: u32,
    pub hand: Vec<Tile>,
}

/// What a successfully applied move did
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    pub player: PlayerId,
    pub points: u32,
    /// Replacement tiles drawn for the mover, in draw order
    pub drawn: Vec<Tile>,
    pub game_over: bool,
}

/// Result of removing a player from the roster
#[derive(Debug, Clone)]
pub struct KickReport {
    pub player: PlayerId,
    pub name: String,
    pub remaining: usize,
    pub game_over: bool,
}

pub struct Game {
    board: Board,
    bag: TileBag,
    players: Vec<PlayerState>,
    current: usize,
    move_counter: u32,
    last_scoring_move: u32,
    phase: Phase,
    bonus_awarded: bool,
}

impl Game {
    /// Start a game with a freshly seeded bag
    pub fn new(names: Vec<String>) -> Result<Self, GameError> {
        Self::build(names, TileBag::new())
    }

    /// Start a game with a deterministic bag, for replays and tests
    pub fn with_seed(names: Vec<String>, seed: u64) -> Result<Self, GameError> {
        Self::build(names, TileBag::with_seed(seed))
    }

    fn build(names: Vec<String>, mut bag: TileBag) -> Result<Self, GameError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&names.len()) {
            return Err(GameError::PlayerCount(names.len()));
        }
        let mut players: Vec<PlayerState> = names
            .into_iter()
            .enumerate()
            .map(|(id, name)| PlayerState {
                id,
                name,
                score: 0,
                hand: Vec::with_capacity(HAND_SIZE),
            })
            .collect();
        for player in &mut players {
            for _ in 0..HAND_SIZE {
                player.hand.push(bag.draw());
            }
        }
        let current = first_player(&players);
        Ok(Game {
            board: Board::new(),
            bag,
            players,
            current,
            move_counter: 0,
            last_scoring_move: 0,
            phase: Phase::Playing,
            bonus_awarded: false,
        })
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn bag_len(&self) -> usize {
        self.bag.len()
    }

    pub fn players(&self) -> &[PlayerState] {
        &self.players
    }

    pub fn player(&self, id: PlayerId) -> Option<&PlayerState> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn current_player(&self) -> &PlayerState {
        &self.players[self.current]
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_over(&self) -> bool {
        self.phase == Phase::Ended
    }

    pub fn move_counter(&self) -> u32 {
        self.move_counter
    }

    /// Winner by highest score; the earliest-seated player wins ties
    pub fn winner(&self) -> Option<PlayerId> {
        let mut best: Option<&PlayerState> = None;
        for player in &self.players {
            match best {
                Some(b) if player.score <= b.score => {}
                _ => best = Some(player),
            }
        }
        best.map(|p| p.id)
    }

    // ========================================================================
    // Turn commands
    // ========================================================================

    /// Validate and apply the current player's move, score it, refill the
    /// hand and advance the turn
    pub fn submit(&mut self, batch: MoveBatch) -> Result<TurnOutcome, GameError> {
        if self.phase != Phase::Playing {
            return Err(GameError::NotPlaying);
        }
        validate(&self.board, &batch, &self.players[self.current].hand)?;

        self.move_counter += 1;
        let mut drawn = Vec::new();
        let mut points = 0;
        match batch {
            MoveBatch::Place(places) => {
                for place in &places {
                    remove_tile(&mut self.players[self.current].hand, place.tile);
                    self.board.set(place.cell, place.tile);
                    if !self.bag.is_empty() {
                        drawn.push(self.bag.draw());
                    }
                }
                self.players[self.current].hand.extend(&drawn);
                points = score(&self.board, &places);
                self.players[self.current].score += points;
                self.last_scoring_move = self.move_counter;
            }
            MoveBatch::Trade(tiles) => {
                // Replacements are drawn before the traded tiles go back,
                // so a trade can never hand the same tiles straight back.
                for &tile in &tiles {
                    remove_tile(&mut self.players[self.current].hand, tile);
                    if !self.bag.is_empty() {
                        drawn.push(self.bag.draw());
                    }
                }
                self.players[self.current].hand.extend(&drawn);
                self.bag.return_and_reshuffle(tiles);
            }
        }

        let player = self.players[self.current].id;
        let game_over = self.check_end();
        if game_over {
            self.phase = Phase::Ended;
        } else {
            self.current = (self.current + 1) % self.players.len();
        }
        Ok(TurnOutcome {
            player,
            points,
            drawn,
            game_over,
        })
    }

    /// Advance past the current player without counting a move. Used when a
    /// local strategy produced an unplayable batch.
    pub fn skip_turn(&mut self) {
        if self.phase == Phase::Playing {
            self.current = (self.current + 1) % self.players.len();
        }
    }

    /// Remove a player, returning their hand to the bag. The turn does not
    /// advance; whoever slid into the vacated seat index moves next.
    pub fn kick(&mut self, id: PlayerId) -> Option<KickReport> {
        let idx = self.players.iter().position(|p| p.id == id)?;
        let removed = self.players.remove(idx);
        self.bag.return_and_reshuffle(removed.hand);
        if idx < self.current {
            self.current -= 1;
        }
        let remaining = self.players.len();
        let game_over = remaining < MIN_PLAYERS;
        if game_over {
            self.phase = Phase::Ended;
        } else {
            self.current %= remaining;
        }
        Some(KickReport {
            player: removed.id,
            name: removed.name,
            remaining,
            game_over,
        })
    }

    pub fn kick_current(&mut self) -> KickReport {
        let id = self.players[self.current].id;
        // The current player always exists in the roster.
        self.kick(id).unwrap_or_else(|| unreachable!())
    }

    /// The game ends when the bag and a hand are both empty (that player
    /// collects the closing bonus once), or when two full table rounds pass
    /// without a scoring move
    fn check_end(&mut self) -> bool {
        if self.bag.is_empty() {
            if let Some(done) = self.players.iter().position(|p| p.hand.is_empty()) {
                if !self.bonus_awarded {
                    self.players[done].score += END_BONUS;
                    self.bonus_awarded = true;
                }
                return true;
            }
        }
        let window = STALL_ROUNDS * self.players.len() as u32;
        self.last_scoring_move + window < self.move_counter
    }
}

/// Most tiles a hand could open with: for each tile, count the others that
/// share its color with a different shape, or its shape with a different
/// color, and take the best
pub fn hand_potential(hand: &[Tile]) -> u32 {
    let mut max = 0;
    for (i, &tile) in hand.iter().enumerate() {
        let mut color = 1;
        let mut shape = 1;
        for (j, &other) in hand.iter().enumerate() {
            if i == j {
                continue;
            }
            if other.color == tile.color && other.shape != tile.shape {
                color += 1;
            } else if other.color != tile.color && other.shape == tile.shape {
                shape += 1;
            }
        }
        max = max.max(color).max(shape);
    }
    max
}

/// The player with the highest opening potential starts; earliest seat
/// wins ties
fn first_player(players: &[PlayerState]) -> usize {
    let mut best = 0;
    let mut best_score = 0;
    for (i, player) in players.iter().enumerate() {
        let potential = hand_potential(&player.hand);
        if potential > best_score {
            best_score = potential;
            best = i;
        }
    }
    best
}

fn remove_tile(hand: &mut Vec<Tile>, tile: Tile) {
    if let Some(i) = hand.iter().position(|&t| t == tile) {
        hand.swap_remove(i);
    }
}
