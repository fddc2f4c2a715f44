//! Edge detection on a sampled button bitmask.
use board_input_types::{Key, KeyEvent};

use crate::config::KeyConfig;

/// Source of the raw button bitmask, one bit per key.
///
/// A set bit means the key is currently pressed. Bit `n` corresponds to entry
/// `n` of the [`KeyConfig`] key table.
pub trait ButtonInput {
    fn read_input(&mut self) -> u32;
}

impl<F: FnMut() -> u32> ButtonInput for F {
    fn read_input(&mut self) -> u32 {
        self()
    }
}

/// Turns successive button bitmask samples into press and release events.
///
/// Only one event is reported per [`next_event`](Self::next_event) call. Changes that are
/// not reported yet stay pending and are drained lowest bit first. If a new
/// sample is stored before all pending events are drained, changes are
/// detected against the partially updated previous state.
pub struct KeyEventTracker {
    config: KeyConfig,
    current: u32,
    previous: u32,
}

impl KeyEventTracker {
    pub fn new(config: KeyConfig) -> Self {
        Self {
            config,
            current: 0,
            previous: 0,
        }
    }

    /// Store a fresh button sample.
    ///
    /// Bits beyond the key table are ignored.
    pub fn update(&mut self, state: u32) {
        self.current = state & self.config.mask();
    }

    /// Read a fresh sample from `input` and store it.
    pub fn poll<I: ButtonInput>(&mut self, input: &mut I) {
        let state = input.read_input();
        self.update(state);
    }

    /// Mask of keys whose change is not reported yet.
    pub fn pending(&self) -> u32 {
        self.current ^ self.previous
    }

    /// Currently pressed keys, as stored by the last sample.
    pub fn state(&self) -> u32 {
        self.current
    }

    /// Report the next key change, `None` if every change has been reported.
    pub fn next_event(&mut self) -> Option<KeyEvent> {
        let changed = self.pending();
        if changed == 0 {
            return None;
        }

        let index = changed.trailing_zeros();
        let bit = 1u32 << index;
        let key = self.config.key(index as usize).unwrap_or(Key::NoKey);
        self.previous ^= bit;

        let event = if self.current & bit != 0 {
            KeyEvent::press(key)
        } else {
            KeyEvent::release(key)
        };
        trace!("Key event: {:?}, pressed: {}", key, event.pressed());
        Some(event)
    }

    /// Iterate over all pending events.
    pub fn drain(&mut self) -> Drain<'_> {
        Drain { tracker: self }
    }
}

/// Iterator returned by [`KeyEventTracker::drain`].
pub struct Drain<'a> {
    tracker: &'a mut KeyEventTracker,
}

impl Iterator for Drain<'_> {
    type Item = KeyEvent;

    fn next(&mut self) -> Option<Self::Item> {
        self.tracker.next_event()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker() -> KeyEventTracker {
        let config = KeyConfig::new(&[Key::Left, Key::Up, Key::Down, Key::Right, Key::Select, Key::Start, Key::A, Key::B])
            .unwrap();
        KeyEventTracker::new(config)
    }

    #[test]
    fn test_no_change_no_event() {
        let mut tracker = tracker();
        tracker.update(0);
        assert_eq!(tracker.next_event(), None);
    }

    #[test]
    fn test_press_then_release() {
        let mut tracker = tracker();
        tracker.update(0b100_0000);
        assert_eq!(tracker.next_event(), Some(KeyEvent::press(Key::A)));
        assert_eq!(tracker.next_event(), None);

        tracker.update(0);
        assert_eq!(tracker.next_event(), Some(KeyEvent::release(Key::A)));
        assert_eq!(tracker.next_event(), None);
    }

    #[test]
    fn test_lowest_bit_first() {
        let mut tracker = tracker();
        tracker.update(0b1001_0010);
        assert_eq!(tracker.pending(), 0b1001_0010);
        assert_eq!(tracker.next_event(), Some(KeyEvent::press(Key::Up)));
        assert_eq!(tracker.next_event(), Some(KeyEvent::press(Key::Select)));
        assert_eq!(tracker.next_event(), Some(KeyEvent::press(Key::B)));
        assert_eq!(tracker.next_event(), None);
    }

    #[test]
    fn test_bits_above_table_are_ignored() {
        let mut tracker = tracker();
        tracker.update(0xFFFF_FF00);
        assert_eq!(tracker.state(), 0);
        assert_eq!(tracker.next_event(), None);
    }

    #[test]
    fn test_poll_closure() {
        let mut tracker = tracker();
        let mut input = || 0b1000u32;
        tracker.poll(&mut input);
        assert_eq!(tracker.drain().collect::<heapless::Vec<_, 4>>().as_slice(), &[KeyEvent::press(Key::Right)]);
    }
}
