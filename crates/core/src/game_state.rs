//! Game state module - the engine
//!
//! Owns the board, the active piece, the piece source and the score, and
//! implements move/rotate/drop/lock/clear/pause/restart on top of the
//! collision checker. Every operation is total: a blocked move or rotation is
//! a normal `false` result, not an error.

use crate::board::Board;
use crate::collision::collides;
use crate::pieces::{spawn_column, ActivePiece};
use crate::rng::{PieceSource, RandomPieces};
use crate::snapshot::GameSnapshot;
use crate::types::{GameAction, GameStatus, LINE_CLEAR_POINTS, SPAWN_Y};

/// Result of a single [`GameState::drop`] step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// The game is paused or over
    Ignored,
    /// The piece moved down one row
    Moved,
    /// The piece locked and a new one spawned
    Locked { lines_cleared: u32 },
    /// The piece locked and the replacement could not spawn
    GameOver { final_score: u32, lines_cleared: u32 },
}

impl DropOutcome {
    pub fn is_game_over(&self) -> bool {
        matches!(self, DropOutcome::GameOver { .. })
    }

    pub fn lines_cleared(&self) -> u32 {
        match *self {
            DropOutcome::Locked { lines_cleared } | DropOutcome::GameOver { lines_cleared, .. } => {
                lines_cleared
            }
            DropOutcome::Ignored | DropOutcome::Moved => 0,
        }
    }
}

/// Result of [`GameState::apply_action`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Rejected: not running, or blocked by a collision
    Ignored,
    Moved,
    Rotated,
    Dropped(DropOutcome),
    Paused,
    Resumed,
    Restarted,
}

impl ActionOutcome {
    /// Final score when this action ended the game
    pub fn final_score(&self) -> Option<u32> {
        match *self {
            ActionOutcome::Dropped(DropOutcome::GameOver { final_score, .. }) => Some(final_score),
            _ => None,
        }
    }

    /// Whether anything observable changed
    pub fn changed(&self) -> bool {
        !matches!(
            self,
            ActionOutcome::Ignored | ActionOutcome::Dropped(DropOutcome::Ignored)
        )
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState<S = RandomPieces> {
    board: Board,
    active: ActivePiece,
    source: S,
    status: GameStatus,
    score: u32,
    lines: u32,
    pieces_locked: u32,
}

impl GameState<RandomPieces> {
    /// Create a running game on the default board with a seeded piece source
    pub fn new(seed: u64) -> Self {
        Self::with_source(Board::default(), RandomPieces::seeded(seed))
    }
}

impl<S: PieceSource> GameState<S> {
    /// Create a running game on `board`, drawing pieces from `source`
    ///
    /// The first piece spawns immediately; if it collides the game starts Over.
    pub fn with_source(board: Board, mut source: S) -> Self {
        let active = Self::spawn_from(&mut source, board.cols());
        let status = if collides(&board, &active.shape, active.x, active.y) {
            GameStatus::Over
        } else {
            GameStatus::Running
        };
        Self {
            board,
            active,
            source,
            status,
            score: 0,
            lines: 0,
            pieces_locked: 0,
        }
    }

    fn spawn_from(source: &mut S, cols: usize) -> ActivePiece {
        ActivePiece::at(source.next_kind(), spawn_column(cols), SPAWN_Y)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> &ActivePiece {
        &self.active
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_over(&self) -> bool {
        self.status == GameStatus::Over
    }

    pub fn is_paused(&self) -> bool {
        self.status == GameStatus::Paused
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Total rows cleared this game
    pub fn lines(&self) -> u32 {
        self.lines
    }

    /// Pieces locked this game
    pub fn pieces_locked(&self) -> u32 {
        self.pieces_locked
    }

    pub fn snapshot(&self) -> GameSnapshot<'_> {
        GameSnapshot {
            board: &self.board,
            active: &self.active,
            score: self.score,
            lines: self.lines,
            pieces_locked: self.pieces_locked,
            status: self.status,
        }
    }

    /// Nudge the active piece by `(dx, dy)`
    ///
    /// Returns false (and leaves the piece untouched) when not running or when
    /// the target position collides.
    pub fn move_piece(&mut self, dx: i32, dy: i32) -> bool {
        if !self.status.is_running() {
            return false;
        }
        self.try_shift(dx, dy)
    }

    fn try_shift(&mut self, dx: i32, dy: i32) -> bool {
        let (x, y) = (self.active.x + dx, self.active.y + dy);
        if collides(&self.board, &self.active.shape, x, y) {
            return false;
        }
        self.active.x = x;
        self.active.y = y;
        true
    }

    /// Rotate the active piece 90° clockwise in place
    ///
    /// No kicks: if the rotated footprint collides at the current origin the
    /// original shape is kept.
    pub fn rotate(&mut self) -> bool {
        if !self.status.is_running() {
            return false;
        }
        let rotated = self.active.shape.rotated_cw();
        if collides(&self.board, &rotated, self.active.x, self.active.y) {
            return false;
        }
        self.active.shape = rotated;
        true
    }

    /// Drop the active piece one row, locking it when blocked
    pub fn drop(&mut self) -> DropOutcome {
        if !self.status.is_running() {
            return DropOutcome::Ignored;
        }
        if self.try_shift(0, 1) {
            return DropOutcome::Moved;
        }

        let lines_cleared = self.lock_active();
        if self.spawn_piece() {
            DropOutcome::Locked { lines_cleared }
        } else {
            DropOutcome::GameOver {
                final_score: self.score,
                lines_cleared,
            }
        }
    }

    /// Write the active piece into the board and clear full rows
    ///
    /// Cells above row 0 have nowhere to go and are dropped.
    fn lock_active(&mut self) -> u32 {
        let color = self.active.color;
        for (x, y) in self.active.cells() {
            if y >= 0 {
                self.board.fill(y as usize, x as usize, color);
            }
        }
        self.pieces_locked = self.pieces_locked.saturating_add(1);
        self.clear_lines()
    }

    /// Replace the active piece with a fresh draw at the spawn position
    ///
    /// Returns false and ends the game if the new piece collides immediately.
    fn spawn_piece(&mut self) -> bool {
        self.active = Self::spawn_from(&mut self.source, self.board.cols());
        if collides(&self.board, &self.active.shape, self.active.x, self.active.y) {
            self.status = GameStatus::Over;
            return false;
        }
        true
    }

    /// Clear every full row, awarding [`LINE_CLEAR_POINTS`] per row
    ///
    /// Scans bottom to top. After a clear the row above has shifted into the
    /// current index, so the same index is examined again.
    pub fn clear_lines(&mut self) -> u32 {
        if self.board.cols() == 0 {
            return 0;
        }

        let mut cleared = 0u32;
        let mut row = self.board.rows();
        while row > 0 {
            if self.board.is_row_full(row - 1) {
                self.board.clear_row(row - 1);
                cleared += 1;
            } else {
                row -= 1;
            }
        }

        self.score = self
            .score
            .saturating_add(cleared.saturating_mul(LINE_CLEAR_POINTS));
        self.lines = self.lines.saturating_add(cleared);
        cleared
    }

    /// Flip Running and Paused; Over is unaffected
    pub fn toggle_pause(&mut self) -> GameStatus {
        self.status = match self.status {
            GameStatus::Running => GameStatus::Paused,
            GameStatus::Paused => GameStatus::Running,
            GameStatus::Over => GameStatus::Over,
        };
        self.status
    }

    /// Reset board, score and piece, and resume from any state
    ///
    /// The piece source keeps its position, so a restarted game continues the
    /// same random stream instead of replaying it.
    pub fn restart(&mut self) {
        self.board.clear();
        self.score = 0;
        self.lines = 0;
        self.pieces_locked = 0;
        self.status = GameStatus::Running;
        self.spawn_piece();
    }

    /// Apply a game action
    pub fn apply_action(&mut self, action: GameAction) -> ActionOutcome {
        match action {
            GameAction::MoveLeft => Self::moved(self.move_piece(-1, 0)),
            GameAction::MoveRight => Self::moved(self.move_piece(1, 0)),
            GameAction::SoftDrop => ActionOutcome::Dropped(self.drop()),
            GameAction::Rotate => {
                if self.rotate() {
                    ActionOutcome::Rotated
                } else {
                    ActionOutcome::Ignored
                }
            }
            GameAction::Pause => match self.toggle_pause() {
                GameStatus::Paused => ActionOutcome::Paused,
                GameStatus::Running => ActionOutcome::Resumed,
                GameStatus::Over => ActionOutcome::Ignored,
            },
            GameAction::Restart => {
                self.restart();
                ActionOutcome::Restarted
            }
        }
    }

    fn moved(ok: bool) -> ActionOutcome {
        if ok {
            ActionOutcome::Moved
        } else {
            ActionOutcome::Ignored
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}
