//! Key codes and key events.
//!
//! A [`Key`] names a physical key, not a character. A [`KeyEvent`] packs a key
//! code and the press/release flag into 16 bits: the lower 8 bits carry the key
//! code, the upper bit is set for a release.
use bitfield_struct::bitfield;
use serde::{Deserialize, Serialize};

/// Key code of a single physical key.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Key {
    #[default]
    NoKey = 0,

    // Special keys
    Escape = 1,

    // Navigation keys
    Left = 2,
    Right = 3,
    Up = 4,
    Down = 5,

    // Character keys
    Enter = 6,
    Space = 7,
    A = 8,
    B = 9,
    L = 10,
    R = 11,

    // Special keys, used on some boards
    Select = 12,
    Start = 13,
}

impl Key {
    pub const fn into_bits(self) -> u8 {
        self as u8
    }

    /// Unknown codes decode as [`Key::NoKey`].
    pub const fn from_bits(value: u8) -> Self {
        match value {
            1 => Key::Escape,
            2 => Key::Left,
            3 => Key::Right,
            4 => Key::Up,
            5 => Key::Down,
            6 => Key::Enter,
            7 => Key::Space,
            8 => Key::A,
            9 => Key::B,
            10 => Key::L,
            11 => Key::R,
            12 => Key::Select,
            13 => Key::Start,
            _ => Key::NoKey,
        }
    }
}

/// A single key press or release.
#[bitfield(u16, defmt = cfg(feature = "defmt"))]
#[derive(Eq, PartialEq, Serialize, Deserialize)]
pub struct KeyEvent {
    #[bits(8)]
    pub key: Key,
    #[bits(7)]
    _reserved: u8,
    /// Set when the key went from pressed to released
    #[bits(1)]
    pub released: bool,
}

impl KeyEvent {
    pub const fn press(key: Key) -> Self {
        Self::new().with_key(key)
    }

    pub const fn release(key: Key) -> Self {
        Self::new().with_key(key).with_released(true)
    }

    /// True for a press, false for a release.
    pub const fn pressed(&self) -> bool {
        !self.released()
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn test_key_code_roundtrip() {
        for key in Key::iter() {
            assert_eq!(Key::from_bits(key.into_bits()), key);
        }
        assert_eq!(Key::from_bits(0xEE), Key::NoKey);
    }

    #[test]
    fn test_key_event_layout() {
        let press = KeyEvent::press(Key::A);
        assert_eq!(press.into_bits(), 8);
        assert!(press.pressed());

        let release = KeyEvent::release(Key::A);
        assert_eq!(release.into_bits(), 0x8000 | 8);
        assert!(!release.pressed());
        assert_eq!(release.key(), Key::A);
    }

    #[test]
    fn test_key_names() {
        use core::str::FromStr;
        assert_eq!(Key::from_str("Select"), Ok(Key::Select));
        assert!(Key::from_str("Tab").is_err());
        let name: &'static str = Key::Start.into();
        assert_eq!(name, "Start");
    }
}
