//! Input events.
//!
//! The rest of the workspace never sees crossterm types; key presses are
//! mapped here into a small backend-neutral vocabulary. Character keys carry
//! their text, so the same event stream serves gameplay and name entry.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Keys the demos care about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Enter,
    Escape,
    Backspace,
    Delete,
    Char(char),
}

/// A key press with the modifier state the demos care about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    pub key: Key,
    pub shift: bool,
}

/// An input event from the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// The user asked the whole program to stop (Ctrl-C).
    Quit,
    Key(KeyPress),
}

/// Map a terminal key event; repeats and releases are dropped.
pub fn map_key_event(event: KeyEvent) -> Option<InputEvent> {
    if event.kind != KeyEventKind::Press {
        return None;
    }

    if event.modifiers.contains(KeyModifiers::CONTROL) && event.code == KeyCode::Char('c') {
        return Some(InputEvent::Quit);
    }

    let key = match event.code {
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Enter => Key::Enter,
        KeyCode::Esc => Key::Escape,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Delete => Key::Delete,
        KeyCode::Char(c) => Key::Char(c),
        _ => return None,
    };

    Some(InputEvent::Key(KeyPress {
        key,
        shift: event.modifiers.contains(KeyModifiers::SHIFT),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrows_and_editing_keys() {
        for (code, want) in [
            (KeyCode::Left, Key::Left),
            (KeyCode::Right, Key::Right),
            (KeyCode::Up, Key::Up),
            (KeyCode::Down, Key::Down),
            (KeyCode::Enter, Key::Enter),
            (KeyCode::Esc, Key::Escape),
            (KeyCode::Backspace, Key::Backspace),
            (KeyCode::Delete, Key::Delete),
        ] {
            assert_eq!(
                map_key_event(KeyEvent::from(code)),
                Some(InputEvent::Key(KeyPress {
                    key: want,
                    shift: false
                }))
            );
        }
    }

    #[test]
    fn test_characters_carry_text() {
        assert_eq!(
            map_key_event(KeyEvent::from(KeyCode::Char('q'))),
            Some(InputEvent::Key(KeyPress {
                key: Key::Char('q'),
                shift: false
            }))
        );
        assert_eq!(
            map_key_event(KeyEvent::from(KeyCode::Char(' '))),
            Some(InputEvent::Key(KeyPress {
                key: Key::Char(' '),
                shift: false
            }))
        );
    }

    #[test]
    fn test_shift_modifier_is_reported() {
        let event = KeyEvent::new(KeyCode::Left, KeyModifiers::SHIFT);
        assert_eq!(
            map_key_event(event),
            Some(InputEvent::Key(KeyPress {
                key: Key::Left,
                shift: true
            }))
        );
    }

    #[test]
    fn test_ctrl_c_quits() {
        let event = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key_event(event), Some(InputEvent::Quit));
    }

    #[test]
    fn test_releases_are_dropped() {
        let mut event = KeyEvent::from(KeyCode::Left);
        event.kind = KeyEventKind::Release;
        assert_eq!(map_key_event(event), None);
    }

    #[test]
    fn test_unmapped_keys_are_dropped() {
        assert_eq!(map_key_event(KeyEvent::from(KeyCode::F(1))), None);
        assert_eq!(map_key_event(KeyEvent::from(KeyCode::Tab)), None);
    }
}
