pub mod common;

use std::sync::Arc;
use std::thread;

use board_input::handoff::{KeyEventQueue, LatestSample, SimulatedTouch};
use board_input::types::{Key, KeyEvent, TouchPoint, TouchSample};

static KEY_EVENTS: KeyEventQueue<64> = KeyEventQueue::new();

#[test]
fn test_key_events_from_another_thread_keep_order() {
    KEY_EVENTS.clear();
    let keys = [Key::Up, Key::Down, Key::Left, Key::Right, Key::A, Key::B];

    let producer = thread::spawn(move || {
        for key in keys {
            while KEY_EVENTS.push(KeyEvent::press(key)).is_err() {
                thread::yield_now();
            }
            while KEY_EVENTS.push(KeyEvent::release(key)).is_err() {
                thread::yield_now();
            }
        }
    });

    let mut received = Vec::new();
    while received.len() < keys.len() * 2 {
        match KEY_EVENTS.pop() {
            Some(event) => received.push(event),
            None => thread::yield_now(),
        }
    }
    producer.join().unwrap();

    let expected: Vec<KeyEvent> = keys
        .iter()
        .flat_map(|&key| [KeyEvent::press(key), KeyEvent::release(key)])
        .collect();
    assert_eq!(received, expected);
    assert_eq!(KEY_EVENTS.pop(), None);
}

#[test]
fn test_full_queue_hands_event_back() {
    let queue: KeyEventQueue<2> = KeyEventQueue::new();
    assert!(queue.push(KeyEvent::press(Key::A)).is_ok());
    assert!(queue.push(KeyEvent::press(Key::B)).is_ok());
    assert_eq!(queue.push(KeyEvent::press(Key::L)), Err(KeyEvent::press(Key::L)));
    assert_eq!(queue.len(), 2);
    assert_eq!(queue.pop(), Some(KeyEvent::press(Key::A)));
}

#[test]
fn test_latest_sample_wins() {
    let latest = Arc::new(LatestSample::<TouchSample>::new());
    assert_eq!(latest.latest(), None);

    let producer = {
        let latest = latest.clone();
        thread::spawn(move || {
            for x in 0..100 {
                latest.publish(TouchSample::new(x, 0, 1000));
            }
        })
    };
    producer.join().unwrap();

    assert_eq!(latest.latest(), Some(TouchSample::new(99, 0, 1000)));
    assert_eq!(latest.take(), Some(TouchSample::new(99, 0, 1000)));
    assert_eq!(latest.take(), None);
}

#[test]
fn test_simulated_touch() {
    let touch = Arc::new(SimulatedTouch::new());
    assert_eq!(touch.current(), None);

    // Move without press is ignored
    touch.move_to(5, 5);
    assert_eq!(touch.current(), None);

    let window = {
        let touch = touch.clone();
        thread::spawn(move || {
            let id = touch.press(10, 20);
            touch.move_to(11, 22);
            id
        })
    };
    let id = window.join().unwrap();
    assert_eq!(id, 1);
    assert_eq!(touch.current(), Some(TouchPoint { id: 1, x: 11, y: 22 }));

    touch.release();
    assert_eq!(touch.current(), None);
    assert_eq!(touch.press(0, 0), 2);
}
