//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key and mouse events into [`crate::types::GameAction`].
//! Keys map one-to-one; mouse press/release pairs are classified as swipe or
//! tap gestures, the same way a touch surface would be.

pub mod gesture;
pub mod map;

pub use blockfall_types as types;

pub use gesture::{classify_gesture, GestureTracker};
pub use map::{handle_key_event, should_quit};
