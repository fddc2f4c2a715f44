//! Handoff of input produced on another thread, for example by the window of a
//! desktop simulator.
//!
//! None of these block: "no data yet" is reported as `None`.
use core::cell::{Cell, RefCell};

use board_input_types::{KeyEvent, TouchPoint};
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::channel::{Channel, TrySendError};

use crate::RawMutex;

/// Holds the most recent sample, older samples are overwritten.
pub struct LatestSample<T: Copy> {
    inner: Mutex<RawMutex, Cell<Option<T>>>,
}

impl<T: Copy> Default for LatestSample<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Copy> LatestSample<T> {
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(Cell::new(None)),
        }
    }

    pub fn publish(&self, sample: T) {
        self.inner.lock(|cell| cell.set(Some(sample)));
    }

    /// The most recent sample, which stays available.
    pub fn latest(&self) -> Option<T> {
        self.inner.lock(|cell| cell.get())
    }

    /// The most recent sample, which is consumed.
    pub fn take(&self) -> Option<T> {
        self.inner.lock(|cell| cell.take())
    }
}

/// Bounded queue of key events.
pub struct KeyEventQueue<const N: usize> {
    channel: Channel<RawMutex, KeyEvent, N>,
}

impl<const N: usize> Default for KeyEventQueue<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> KeyEventQueue<N> {
    pub const fn new() -> Self {
        Self { channel: Channel::new() }
    }

    /// Queue an event. If the queue is full the event is handed back.
    pub fn push(&self, event: KeyEvent) -> Result<(), KeyEvent> {
        match self.channel.try_send(event) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(event)) => {
                warn!("Key event queue is full, dropping {:?}", event);
                Err(event)
            }
        }
    }

    pub fn pop(&self) -> Option<KeyEvent> {
        self.channel.try_receive().ok()
    }

    pub fn len(&self) -> usize {
        self.channel.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channel.is_empty()
    }

    pub fn clear(&self) {
        self.channel.clear();
    }
}

#[derive(Default)]
struct TouchState {
    current: Option<TouchPoint>,
    last_id: u32,
}

/// Touch input driven by pointer events, such as mouse down, move and up.
///
/// Every press starts a new contact with a new id.
pub struct SimulatedTouch {
    state: Mutex<RawMutex, RefCell<TouchState>>,
}

impl Default for SimulatedTouch {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedTouch {
    pub const fn new() -> Self {
        Self {
            state: Mutex::new(RefCell::new(TouchState {
                current: None,
                last_id: 0,
            })),
        }
    }

    /// Start a contact at the given display position and return its id.
    pub fn press(&self, x: u16, y: u16) -> u32 {
        self.state.lock(|state| {
            let mut state = state.borrow_mut();
            state.last_id = state.last_id.wrapping_add(1).max(1);
            let id = state.last_id;
            state.current = Some(TouchPoint { id, x, y });
            id
        })
    }

    /// Move the ongoing contact. Ignored when nothing is pressed.
    pub fn move_to(&self, x: u16, y: u16) {
        self.state.lock(|state| {
            if let Some(point) = state.borrow_mut().current.as_mut() {
                point.x = x;
                point.y = y;
            }
        });
    }

    pub fn release(&self) {
        self.state.lock(|state| state.borrow_mut().current = None);
    }

    /// The ongoing contact, `None` when nothing is pressed.
    pub fn current(&self) -> Option<TouchPoint> {
        self.state.lock(|state| state.borrow().current)
    }
}
