//! Key mapping from terminal events to game actions.

use crate::types::GameAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map keyboard input to game actions.
pub fn handle_key_event(key: KeyEvent) -> Option<GameAction> {
    let KeyCode::Char(ch) = key.code else {
        return match key.code {
            KeyCode::Left => Some(GameAction::MoveLeft),
            KeyCode::Right => Some(GameAction::MoveRight),
            KeyCode::Down => Some(GameAction::SoftDrop),
            KeyCode::Up => Some(GameAction::Rotate),
            _ => None,
        };
    };

    match ch.to_ascii_lowercase() {
        'h' | 'a' => Some(GameAction::MoveLeft),
        'l' | 'd' => Some(GameAction::MoveRight),
        'j' | 's' | ' ' => Some(GameAction::SoftDrop),
        'k' | 'w' => Some(GameAction::Rotate),
        'p' => Some(GameAction::Pause),
        'r' => Some(GameAction::Restart),
        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
        || matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> Option<GameAction> {
        handle_key_event(KeyEvent::from(code))
    }

    #[test]
    fn test_movement_keys() {
        assert_eq!(key(KeyCode::Left), Some(GameAction::MoveLeft));
        assert_eq!(key(KeyCode::Right), Some(GameAction::MoveRight));
        assert_eq!(key(KeyCode::Down), Some(GameAction::SoftDrop));

        assert_eq!(key(KeyCode::Char('H')), Some(GameAction::MoveLeft));
        assert_eq!(key(KeyCode::Char('d')), Some(GameAction::MoveRight));
        assert_eq!(key(KeyCode::Char('J')), Some(GameAction::SoftDrop));
        assert_eq!(key(KeyCode::Char(' ')), Some(GameAction::SoftDrop));
    }

    #[test]
    fn test_rotation_keys() {
        assert_eq!(key(KeyCode::Up), Some(GameAction::Rotate));
        assert_eq!(key(KeyCode::Char('k')), Some(GameAction::Rotate));
        assert_eq!(key(KeyCode::Char('W')), Some(GameAction::Rotate));
    }

    #[test]
    fn test_action_keys() {
        assert_eq!(key(KeyCode::Char('p')), Some(GameAction::Pause));
        assert_eq!(key(KeyCode::Char('R')), Some(GameAction::Restart));
        assert_eq!(key(KeyCode::Char('x')), None);
        assert_eq!(key(KeyCode::Enter), None);
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('c'))));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('x'))));
    }
}
