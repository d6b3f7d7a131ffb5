//! Move search
//!
//! Scans the board viewport for legal single-tile placements under a time
//! budget. `FirstFit` takes the first legal placement it sees, `BestScore`
//! keeps scanning until the budget runs out and keeps the best-scoring one.
//! When no placement is found the strategy falls back to trading, and to a
//! pass once the bag runs dry.

use std::time::{Duration, Instant};

use crate::board::{Board, Cell, CENTER};
use crate::moves::{MoveBatch, Placement};
use crate::rules::validate;
use crate::score::score;
use crate::tile::Tile;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    FirstFit,
    BestScore,
}

#[derive(Debug, Clone, Copy)]
pub struct SearchStrategy {
    mode: SearchMode,
    budget: Duration,
}

impl SearchStrategy {
    pub fn new(mode: SearchMode, budget: Duration) -> Self {
        SearchStrategy { mode, budget }
    }

    /// Pick a batch for the given position. Always returns something
    /// submittable: an opening run, a placement, a trade or a pass.
    pub fn choose(&self, board: &Board, hand: &[Tile], bag_len: usize) -> MoveBatch {
        if board.is_blank() {
            return MoveBatch::Place(opening_batch(hand));
        }
        match self.find_placement(board, hand) {
            Some(place) => MoveBatch::Place(vec![place]),
            None => fallback_trade(hand, bag_len),
        }
    }

    /// Scan hand x viewport for a legal single placement within the budget
    pub fn find_placement(&self, board: &Board, hand: &[Tile]) -> Option<Placement> {
        let deadline = Instant::now();
        let mut best: Option<(u32, Placement)> = None;
        for &tile in hand {
            for row in board.min_row()..=board.max_row() {
                for col in board.min_col()..=board.max_col() {
                    if deadline.elapsed() >= self.budget {
                        return best.map(|(_, p)| p);
                    }
                    let place = Placement::new(tile, Cell::new(row, col));
                    let batch = MoveBatch::Place(vec![place]);
                    if validate(board, &batch, hand).is_err() {
                        continue;
                    }
                    if self.mode == SearchMode::FirstFit {
                        return Some(place);
                    }
                    let mut trial = board.snapshot();
                    trial.set(place.cell, place.tile);
                    let points = score(&trial, &[place]);
                    if best.map_or(true, |(b, _)| points > b) {
                        best = Some((points, place));
                    }
                }
            }
        }
        best.map(|(_, p)| p)
    }
}

impl Default for SearchStrategy {
    fn default() -> Self {
        SearchStrategy::new(SearchMode::BestScore, Duration::from_millis(500))
    }
}

/// Longest single-attribute run the hand can open with, laid out rightward
/// from the center cell. Greedy per anchor tile: grow the largest
/// same-color and same-shape groups it supports, keep the best overall.
pub fn opening_batch(hand: &[Tile]) -> Vec<Placement> {
    let mut best: Vec<Tile> = Vec::new();
    for (i, &anchor) in hand.iter().enumerate() {
        let mut colors = vec![anchor];
        let mut shapes = vec![anchor];
        for (j, &other) in hand.iter().enumerate() {
            if i == j {
                continue;
            }
            if other.color == anchor.color && colors.iter().all(|t| t.shape != other.shape) {
                colors.push(other);
            } else if other.shape == anchor.shape
                && shapes.iter().all(|t| t.color != other.color)
            {
                shapes.push(other);
            }
        }
        for group in [colors, shapes] {
            if group.len() > best.len() {
                best = group;
            }
        }
    }
    best.into_iter()
        .enumerate()
        .map(|(i, tile)| Placement::new(tile, Cell::new(CENTER.row, CENTER.col + i as i16)))
        .collect()
}

/// Trade as much of the hand as the bag can cover, or pass outright
pub fn fallback_trade(hand: &[Tile], bag_len: usize) -> MoveBatch {
    let count = hand.len().min(bag_len);
    MoveBatch::Trade(hand[..count].to_vec())
}
