//! The shuffled draw pile

use crate::tile::{Tile, COLORS, COPIES_PER_TILE, SHAPES};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// The bag of undrawn tiles.
///
/// Filled once with three copies of each of the 36 combinations and shuffled.
/// Returned tiles (trades, kicked hands) always trigger a full reshuffle so
/// subsequent draws stay unbiased.
#[derive(Clone, Debug)]
pub struct TileBag {
    tiles: Vec<Tile>,
    rng: ChaCha8Rng,
}

impl TileBag {
    pub fn new() -> Self {
        Self::from_rng(ChaCha8Rng::from_entropy())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(ChaCha8Rng::seed_from_u64(seed))
    }

    fn from_rng(rng: ChaCha8Rng) -> Self {
        let mut bag = Self {
            tiles: Vec::new(),
            rng,
        };
        bag.fill();
        bag
    }

    /// Populate with the full 108-tile set and shuffle
    fn fill(&mut self) {
        for &color in &COLORS {
            for &shape in &SHAPES {
                for _ in 0..COPIES_PER_TILE {
                    self.tiles.push(Tile::new(color, shape));
                }
            }
        }
        self.tiles.shuffle(&mut self.rng);
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Remove and return the next tile.
    ///
    /// Panics when the bag is empty: callers must check `is_empty` first,
    /// drawing from a drained bag is a caller bug rather than a game state.
    pub fn draw(&mut self) -> Tile {
        self.tiles.pop().expect("draw from empty bag")
    }

    /// Return tiles to the bag and reshuffle the whole pile
    pub fn return_and_reshuffle(&mut self, tiles: impl IntoIterator<Item = Tile>) {
        self.tiles.extend(tiles);
        self.tiles.shuffle(&mut self.rng);
    }
}

impl Default for TileBag {
    fn default() -> Self {
        Self::new()
    }
}
