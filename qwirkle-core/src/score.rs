//! Move scoring
//!
//! Runs against the board with the batch already applied, so every run
//! length already includes the new tiles. A completed run of six scores
//! double.

use crate::board::{Axis, Board};
use crate::moves::Placement;

/// Run length at which the doubling bonus kicks in
pub const FULL_RUN: u32 = 6;

/// Score a placement batch against the post-move board
pub fn score(board: &Board, places: &[Placement]) -> u32 {
    match places {
        [] => 0,
        [single] => score_single(board, single),
        [first, second, ..] => {
            let axis = if first.cell.row == second.cell.row {
                Axis::Row
            } else {
                Axis::Column
            };
            score_along(board, places, axis)
        }
    }
}

fn score_single(board: &Board, place: &Placement) -> u32 {
    let row = board.run_length(place.cell, Axis::Row);
    let col = board.run_length(place.cell, Axis::Column);
    if row == 1 && col == 1 {
        return 1;
    }
    let mut total = 0;
    if row > 1 {
        total += scored(row);
    }
    if col > 1 {
        total += scored(col);
    }
    total
}

fn score_along(board: &Board, places: &[Placement], axis: Axis) -> u32 {
    let perp = axis.perpendicular();
    let mut total = scored(board.run_length(places[0].cell, axis));
    for place in places {
        let cross = board.run_length(place.cell, perp);
        if cross > 1 {
            total += scored(cross);
        }
    }
    total
}

fn scored(len: u32) -> u32 {
    if len == FULL_RUN {
        len * 2
    } else {
        len
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Cell;
    use crate::tile::{Color, Shape, Tile, SHAPES};

    fn tile(color: Color, shape: Shape) -> Tile {
        Tile::new(color, shape)
    }

    fn place(t: Tile, row: i16, col: i16) -> Placement {
        Placement::new(t, Cell::new(row, col))
    }

    fn apply(board: &mut Board, places: &[Placement]) {
        for p in places {
            board.set(p.cell, p.tile);
        }
    }

    #[test]
    fn test_opening_single_tile_scores_one() {
        let mut board = Board::new();
        let batch = vec![place(tile(Color::Red, Shape::Diamond), 91, 91)];
        apply(&mut board, &batch);
        assert_eq!(score(&board, &batch), 1);
    }

    #[test]
    fn test_extension_scores_run_length() {
        let mut board = Board::new();
        board.set(Cell::new(91, 91), tile(Color::Red, Shape::Diamond));
        board.set(Cell::new(91, 92), tile(Color::Red, Shape::Square));
        let batch = vec![place(tile(Color::Red, Shape::Heart), 91, 93)];
        apply(&mut board, &batch);
        assert_eq!(score(&board, &batch), 3);
    }

    #[test]
    fn test_crossing_lines_both_count() {
        let mut board = Board::new();
        board.set(Cell::new(91, 91), tile(Color::Red, Shape::Diamond));
        board.set(Cell::new(91, 92), tile(Color::Red, Shape::Square));
        board.set(Cell::new(92, 93), tile(Color::Blue, Shape::Heart));
        // Red heart joins a 3-run row and a 2-run column at once
        let batch = vec![place(tile(Color::Red, Shape::Heart), 91, 93)];
        apply(&mut board, &batch);
        assert_eq!(score(&board, &batch), 5);
    }

    #[test]
    fn test_completed_run_of_six_doubles() {
        let mut board = Board::new();
        for (i, &shape) in SHAPES.iter().take(5).enumerate() {
            board.set(Cell::new(91, 91 + i as i16), tile(Color::Red, shape));
        }
        let batch = vec![place(tile(Color::Red, SHAPES[5]), 91, 96)];
        apply(&mut board, &batch);
        assert_eq!(score(&board, &batch), 12);
    }

    #[test]
    fn test_row_batch_with_perpendicular_runs() {
        let mut board = Board::new();
        // Existing red diamond; batch adds square and heart in its row.
        // A blue square below (92, 92) gives the square a 2-run column.
        board.set(Cell::new(91, 91), tile(Color::Red, Shape::Diamond));
        board.set(Cell::new(92, 92), tile(Color::Blue, Shape::Square));
        let batch = vec![
            place(tile(Color::Red, Shape::Square), 91, 92),
            place(tile(Color::Red, Shape::Heart), 91, 93),
        ];
        apply(&mut board, &batch);
        // Row of 3 plus the square's column of 2
        assert_eq!(score(&board, &batch), 5);
    }

    #[test]
    fn test_column_batch() {
        let mut board = Board::new();
        board.set(Cell::new(91, 91), tile(Color::Red, Shape::Circle));
        let batch = vec![
            place(tile(Color::Blue, Shape::Circle), 92, 91),
            place(tile(Color::Green, Shape::Circle), 93, 91),
        ];
        apply(&mut board, &batch);
        assert_eq!(score(&board, &batch), 3);
    }

    #[test]
    fn test_double_qwirkle() {
        let mut board = Board::new();
        // Five red shapes in the row, five circles in the column, the red
        // circle at the corner completes both runs at once.
        for (i, &shape) in SHAPES.iter().take(5).enumerate() {
            board.set(Cell::new(91, 91 + i as i16), tile(Color::Red, shape));
        }
        let colors = [Color::Orange, Color::Yellow, Color::Green, Color::Blue, Color::Purple];
        for (i, &color) in colors.iter().enumerate() {
            board.set(Cell::new(92 + i as i16, 96), tile(color, Shape::Circle));
        }
        let batch = vec![place(tile(Color::Red, Shape::Circle), 91, 96)];
        apply(&mut board, &batch);
        assert_eq!(score(&board, &batch), 24);
    }
}
