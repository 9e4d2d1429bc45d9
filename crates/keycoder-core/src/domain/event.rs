//! A single synthesized keyboard event.

use serde::{Deserialize, Serialize};

use super::keycode::KeyCode;

/// A key code plus its up/down state.
///
/// No validation is performed: any code is forwarded to the OS as-is, even
/// one that does not correspond to a physical key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyEvent {
    pub key_code: KeyCode,
    pub key_down: bool,
}

impl KeyEvent {
    pub fn new(key_code: KeyCode, key_down: bool) -> Self {
        Self { key_code, key_down }
    }

    /// A key-down (press) event.
    pub fn down(key_code: KeyCode) -> Self {
        Self::new(key_code, true)
    }

    /// A key-up (release) event.
    pub fn up(key_code: KeyCode) -> Self {
        Self::new(key_code, false)
    }

    /// Press followed by release of the same key.
    pub fn stroke(key_code: KeyCode) -> [Self; 2] {
        [Self::down(key_code), Self::up(key_code)]
    }
}

impl From<(KeyCode, bool)> for KeyEvent {
    fn from((key_code, key_down): (KeyCode, bool)) -> Self {
        Self::new(key_code, key_down)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_down_and_up_set_state() {
        assert!(KeyEvent::down(0).key_down);
        assert!(!KeyEvent::up(0).key_down);
    }

    #[test]
    fn test_stroke_is_press_then_release() {
        let [press, release] = KeyEvent::stroke(0x24);
        assert_eq!(press, KeyEvent { key_code: 0x24, key_down: true });
        assert_eq!(release, KeyEvent { key_code: 0x24, key_down: false });
    }

    #[test]
    fn test_from_tuple_keeps_unvalidated_code() {
        // Codes outside any real keyboard are still representable.
        let event = KeyEvent::from((u16::MAX, true));
        assert_eq!(event.key_code, u16::MAX);
        assert!(event.key_down);
    }
}
