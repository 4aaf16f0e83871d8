//! System input backend
//!
//! Implements [`InputBackend`] over enigo, which handles the per-platform
//! injection APIs (X11/Wayland, quartz, winuser).

use std::collections::HashMap;

use enigo::{Coordinate, Direction, Enigo, Key, Keyboard, Mouse, Settings};
use once_cell::sync::Lazy;

use super::{InputBackend, InputError};
use crate::{Point, ScreenBounds};

/// Named aliases accepted as key identifiers, lowercase.
static KEY_ALIASES: Lazy<HashMap<&'static str, Key>> = Lazy::new(|| {
    HashMap::from([
        ("shift", Key::Shift),
        ("ctrl", Key::Control),
        ("control", Key::Control),
        ("alt", Key::Alt),
        ("meta", Key::Meta),
        ("cmd", Key::Meta),
        ("command", Key::Meta),
        ("space", Key::Space),
        ("tab", Key::Tab),
        ("esc", Key::Escape),
        ("escape", Key::Escape),
        ("enter", Key::Return),
        ("return", Key::Return),
    ])
});

/// Resolve a key identifier to an enigo key.
///
/// Accepts the aliases above, `f1`-`f20`, and any single character.
/// Returns `None` for everything else; an unknown identifier fails the
/// individual press, it is not a configuration error.
pub fn lookup_key(name: &str) -> Option<Key> {
    let lower = name.to_ascii_lowercase();
    if let Some(key) = KEY_ALIASES.get(lower.as_str()) {
        return Some(*key);
    }
    if let Some(n) = lower.strip_prefix('f').and_then(|digits| digits.parse::<u8>().ok()) {
        if (1..=20).contains(&n) {
            return Some(function_key(n));
        }
    }
    let mut chars = name.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Some(Key::Unicode(c));
    }
    None
}

fn function_key(n: u8) -> Key {
    match n {
        1 => Key::F1,
        2 => Key::F2,
        3 => Key::F3,
        4 => Key::F4,
        5 => Key::F5,
        6 => Key::F6,
        7 => Key::F7,
        8 => Key::F8,
        9 => Key::F9,
        10 => Key::F10,
        11 => Key::F11,
        12 => Key::F12,
        13 => Key::F13,
        14 => Key::F14,
        15 => Key::F15,
        16 => Key::F16,
        17 => Key::F17,
        18 => Key::F18,
        19 => Key::F19,
        _ => Key::F20,
    }
}

/// Production backend over a live enigo connection.
pub struct SystemInput {
    enigo: Enigo,
}

impl SystemInput {
    /// Connect to the platform input facilities.
    pub fn new() -> Result<Self, InputError> {
        let enigo =
            Enigo::new(&Settings::default()).map_err(|e| InputError::Init(e.to_string()))?;
        Ok(Self { enigo })
    }
}

impl InputBackend for SystemInput {
    fn screen_size(&mut self) -> Result<ScreenBounds, InputError> {
        let (width, height) = self
            .enigo
            .main_display()
            .map_err(|e| InputError::Screen(e.to_string()))?;
        Ok(ScreenBounds { width, height })
    }

    fn pointer_position(&mut self) -> Result<Point, InputError> {
        let (x, y) = self
            .enigo
            .location()
            .map_err(|e| InputError::Pointer(e.to_string()))?;
        Ok(Point { x, y })
    }

    fn move_pointer(&mut self, target: Point) -> Result<(), InputError> {
        self.enigo
            .move_mouse(target.x, target.y, Coordinate::Abs)
            .map_err(|e| InputError::Move {
                x: target.x,
                y: target.y,
                reason: e.to_string(),
            })
    }

    fn press_key(&mut self, key: &str) -> Result<(), InputError> {
        let resolved = lookup_key(key).ok_or_else(|| InputError::Key {
            key: key.to_string(),
            reason: "unrecognized key identifier".to_string(),
        })?;
        self.enigo
            .key(resolved, Direction::Click)
            .map_err(|e| InputError::Key {
                key: key.to_string(),
                reason: e.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_aliases_resolve() {
        assert_eq!(lookup_key("shift"), Some(Key::Shift));
        assert_eq!(lookup_key("SHIFT"), Some(Key::Shift));
        assert_eq!(lookup_key("ctrl"), Some(Key::Control));
        assert_eq!(lookup_key("command"), Some(Key::Meta));
        assert_eq!(lookup_key("escape"), Some(Key::Escape));
    }

    #[test]
    fn test_function_keys_resolve() {
        assert_eq!(lookup_key("f1"), Some(Key::F1));
        assert_eq!(lookup_key("F15"), Some(Key::F15));
        assert_eq!(lookup_key("f20"), Some(Key::F20));
        assert_eq!(lookup_key("f21"), None);
        assert_eq!(lookup_key("f0"), None);
    }

    #[test]
    fn test_single_characters_resolve() {
        assert_eq!(lookup_key("a"), Some(Key::Unicode('a')));
        assert_eq!(lookup_key("f"), Some(Key::Unicode('f')));
        assert_eq!(lookup_key("7"), Some(Key::Unicode('7')));
    }

    #[test]
    fn test_garbage_does_not_resolve() {
        assert_eq!(lookup_key(""), None);
        assert_eq!(lookup_key("not-a-key"), None);
        assert_eq!(lookup_key("shiftt"), None);
    }
}
