//! The placement surface: a sparse square grid with a tracked viewport

use crate::tile::Tile;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Edge length of the (conceptually unbounded) square board
pub const DIM: i16 = 183;

/// Conventional first-placement cell
pub const CENTER: Cell = Cell::new(91, 91);

/// How far past a new edge tile the viewport is pushed, so rendering keeps
/// room for neighboring placements
const VIEW_MARGIN: i16 = 5;

/// A board coordinate
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub row: i16,
    pub col: i16,
}

impl Cell {
    pub const fn new(row: i16, col: i16) -> Self {
        Self { row, col }
    }

    /// Check if this cell is on the board
    pub fn in_bounds(&self) -> bool {
        0 <= self.row && self.row < DIM && 0 <= self.col && self.col < DIM
    }

    /// The four orthogonal neighbors
    pub fn neighbors(&self) -> [Cell; 4] {
        [
            Cell::new(self.row - 1, self.col),
            Cell::new(self.row + 1, self.col),
            Cell::new(self.row, self.col - 1),
            Cell::new(self.row, self.col + 1),
        ]
    }

    /// Step along an axis: `Axis::Row` varies the column, `Axis::Column`
    /// varies the row
    pub fn step(&self, axis: Axis, delta: i16) -> Cell {
        match axis {
            Axis::Row => Cell::new(self.row, self.col + delta),
            Axis::Column => Cell::new(self.row + delta, self.col),
        }
    }

    /// The coordinate that varies when walking along `axis`
    pub fn along(&self, axis: Axis) -> i16 {
        match axis {
            Axis::Row => self.col,
            Axis::Column => self.row,
        }
    }
}

/// Line orientation. `Row` is the horizontal line through a cell,
/// `Column` the vertical one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    Row,
    Column,
}

impl Axis {
    pub fn perpendicular(self) -> Axis {
        match self {
            Axis::Row => Axis::Column,
            Axis::Column => Axis::Row,
        }
    }
}

/// Board state (clone to mutate speculatively)
#[derive(Clone, Debug)]
pub struct Board {
    /// cell -> tile (sparse representation)
    cells: FxHashMap<Cell, Tile>,

    /// Tracked viewport, padded for rendering. Not correctness-relevant.
    min_row: i16,
    max_row: i16,
    min_col: i16,
    max_col: i16,
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: FxHashMap::default(),
            min_row: 86,
            max_row: 97,
            min_col: 85,
            max_col: 97,
        }
    }

    /// Get the tile at a cell, if any
    pub fn tile_at(&self, cell: Cell) -> Option<Tile> {
        self.cells.get(&cell).copied()
    }

    /// True when the cell holds no tile (out-of-bounds cells count as empty)
    pub fn is_empty(&self, cell: Cell) -> bool {
        !self.cells.contains_key(&cell)
    }

    /// Number of tiles placed so far
    pub fn tile_count(&self) -> usize {
        self.cells.len()
    }

    /// True while no tile has been placed at all
    pub fn is_blank(&self) -> bool {
        self.cells.is_empty()
    }

    /// Place a tile in an empty, in-bounds cell and widen the viewport.
    ///
    /// Occupancy and bounds are the validator's job; violating them here is
    /// a caller bug.
    pub fn set(&mut self, cell: Cell, tile: Tile) {
        debug_assert!(cell.in_bounds(), "placement off the board: {cell:?}");
        let previous = self.cells.insert(cell, tile);
        debug_assert!(previous.is_none(), "cell already occupied: {cell:?}");

        if cell.row <= self.min_row {
            self.min_row = (cell.row - VIEW_MARGIN).max(1);
        } else if cell.row >= self.max_row {
            self.max_row = cell.row + VIEW_MARGIN;
        }
        if cell.col <= self.min_col {
            self.min_col = (cell.col - VIEW_MARGIN).max(1);
        } else if cell.col >= self.max_col {
            self.max_col = cell.col + VIEW_MARGIN;
        }
    }

    /// Length of the contiguous occupied run through `cell` along `axis`,
    /// inclusive of `cell` itself when occupied
    pub fn run_length(&self, cell: Cell, axis: Axis) -> u32 {
        let mut length = 0;
        let mut probe = cell;
        while !self.is_empty(probe) {
            length += 1;
            probe = probe.step(axis, -1);
        }
        probe = cell.step(axis, 1);
        while !self.is_empty(probe) {
            length += 1;
            probe = probe.step(axis, 1);
        }
        length
    }

    /// Deep copy for trial placement, so validation and speculative scoring
    /// never touch the authoritative board
    pub fn snapshot(&self) -> Board {
        self.clone()
    }

    /// Iterate placed tiles
    pub fn tiles(&self) -> impl Iterator<Item = (Cell, Tile)> + '_ {
        self.cells.iter().map(|(&cell, &tile)| (cell, tile))
    }

    pub fn min_row(&self) -> i16 {
        self.min_row
    }

    pub fn max_row(&self) -> i16 {
        self.max_row
    }

    pub fn min_col(&self) -> i16 {
        self.min_col
    }

    pub fn max_col(&self) -> i16 {
        self.max_col
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
