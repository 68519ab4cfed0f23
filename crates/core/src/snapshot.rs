//! Read-only view of a game for renderers

use crate::board::Board;
use crate::pieces::ActivePiece;
use crate::types::{Cell, GameStatus};

/// Borrowed projection of [`crate::GameState`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSnapshot<'a> {
    pub board: &'a Board,
    pub active: &'a ActivePiece,
    pub score: u32,
    pub lines: u32,
    pub pieces_locked: u32,
    pub status: GameStatus,
}

impl GameSnapshot<'_> {
    /// Cell as it should be drawn: the active piece on top of the board
    ///
    /// Active-piece cells above row 0 have no board position and are skipped.
    pub fn visible_cell(&self, row: usize, col: usize) -> Cell {
        let covered = self
            .active
            .cells()
            .any(|(x, y)| x == col as i32 && y == row as i32);
        if covered {
            Some(self.active.color)
        } else {
            self.board.get(row, col)
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::rng::ScriptedPieces;
    use crate::types::{Color, PieceKind};
    use crate::{Board, GameState};

    #[test]
    fn test_visible_cell_overlays_active_piece() {
        let mut board = Board::default();
        board.fill(19, 0, Color::RED);
        let state = GameState::with_source(board, ScriptedPieces::repeat(PieceKind::O));
        let snap = state.snapshot();

        assert_eq!(snap.visible_cell(0, 3), Some(Color::BLUE));
        assert_eq!(snap.visible_cell(1, 4), Some(Color::BLUE));
        assert_eq!(snap.visible_cell(19, 0), Some(Color::RED));
        assert_eq!(snap.visible_cell(5, 5), None);
    }
}
