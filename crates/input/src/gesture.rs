//! Swipe and tap gestures.
//!
//! A gesture is the displacement between a pointer press and its release.
//! [`classify_gesture`] works in pointer units (pixels); [`GestureTracker`]
//! turns terminal mouse events (cell coordinates) into such displacements.

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::types::{GameAction, TAP_THRESHOLD_PX};

/// Classify a press-to-release displacement
///
/// - Both axes below `threshold`: a tap, which rotates
/// - Horizontal dominant: move left or right
/// - Vertical dominant, downward: drop one row
/// - Vertical dominant, upward: nothing
///
/// A tap never also moves. Ties between the axes count as vertical.
pub fn classify_gesture(dx: f32, dy: f32, threshold: f32) -> Option<GameAction> {
    if dx.abs() < threshold && dy.abs() < threshold {
        return Some(GameAction::Rotate);
    }

    if dx.abs() > dy.abs() {
        if dx > 0.0 {
            Some(GameAction::MoveRight)
        } else {
            Some(GameAction::MoveLeft)
        }
    } else if dy > 0.0 {
        Some(GameAction::SoftDrop)
    } else {
        None
    }
}

/// Turns terminal mouse press/release pairs into gestures
///
/// Terminal mice report cell positions, so each cell is scaled to an
/// approximate pixel size before classification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureTracker {
    cell_width_px: f32,
    cell_height_px: f32,
    threshold: f32,
    start: Option<(u16, u16)>,
}

impl GestureTracker {
    pub fn new(cell_width_px: f32, cell_height_px: f32, threshold: f32) -> Self {
        Self {
            cell_width_px,
            cell_height_px,
            threshold,
            start: None,
        }
    }

    /// Is a press waiting for its release
    pub fn is_pressed(&self) -> bool {
        self.start.is_some()
    }

    /// Feed a mouse event; returns an action when a gesture completes
    pub fn handle_mouse_event(&mut self, event: MouseEvent) -> Option<GameAction> {
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.start = Some((event.column, event.row));
                None
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let (col, row) = self.start.take()?;
                let dx = (event.column as f32 - col as f32) * self.cell_width_px;
                let dy = (event.row as f32 - row as f32) * self.cell_height_px;
                classify_gesture(dx, dy, self.threshold)
            }
            _ => None,
        }
    }
}

impl Default for GestureTracker {
    /// 8x16 px cells and the default tap threshold
    fn default() -> Self {
        Self::new(8.0, 16.0, TAP_THRESHOLD_PX)
    }
}
