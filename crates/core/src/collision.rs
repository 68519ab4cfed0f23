//! Collision checker
//!
//! A single pure predicate shared by every engine mutation.

use crate::board::Board;
use crate::pieces::Shape;

/// Check whether `shape` placed with its origin at `(x, y)` collides
///
/// A filled cell collides when it lands below the last row, left of column 0,
/// right of the last column, or on an occupied board cell. Cells above row 0
/// never collide, and the board is not consulted for them.
pub fn collides(board: &Board, shape: &Shape, x: i32, y: i32) -> bool {
    let rows = board.rows() as i32;
    let cols = board.cols() as i32;

    shape.filled().any(|(dx, dy)| {
        let cx = x + dx;
        let cy = y + dy;
        if cx < 0 || cx >= cols || cy >= rows {
            return true;
        }
        cy >= 0 && board.is_occupied(cy as usize, cx as usize)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::template;
    use crate::types::{Color, PieceKind};

    #[test]
    fn test_empty_board_in_bounds() {
        let board = Board::default();
        assert!(!collides(&board, &template(PieceKind::O), 0, 0));
        assert!(!collides(&board, &template(PieceKind::O), 8, 18));
    }

    #[test]
    fn test_walls_and_floor() {
        let board = Board::default();
        let o = template(PieceKind::O);
        assert!(collides(&board, &o, -1, 0));
        assert!(collides(&board, &o, 9, 0));
        assert!(collides(&board, &o, 0, 19));
    }

    #[test]
    fn test_above_top_is_free() {
        let board = Board::default();
        let i = template(PieceKind::I).rotated_cw();
        assert!(!collides(&board, &i, 0, -3));
        assert!(!collides(&board, &i, 0, -40));
    }

    #[test]
    fn test_holes_in_shape_do_not_collide() {
        // T footprint leaves (0,1) and (2,1) empty
        let mut board = Board::default();
        board.fill(1, 0, Color::RED);
        board.fill(1, 2, Color::RED);
        assert!(!collides(&board, &template(PieceKind::T), 0, 0));
        board.fill(1, 1, Color::RED);
        assert!(collides(&board, &template(PieceKind::T), 0, 0));
    }
}
