use crossterm::event::KeyCode;
use std::{
    collections::VecDeque,
    sync::Mutex,
    time::{Duration, Instant},
};

/// A thread-safe buffer for storing keys and timestamps.
/// For use with a producer and a consumer of keys.
/// Wrap it in an `std::sync::Arc` and you are good to go.
pub struct KeyBuffer {
    timeout: Duration,
    buffer: Mutex<VecDeque<(KeyCode, Instant)>>,
}

impl KeyBuffer {

    /// Create a new `KeyBuffer`, but don't return keypresses that are older than `timeout`.
    pub fn new(timeout: Duration) -> KeyBuffer {
        KeyBuffer {
            timeout,
            buffer: Mutex::new(VecDeque::new()),
        }
    }

    /// Push a new keypress to the buffer.
    pub fn push(&self, key_code: KeyCode) {
        if let Ok(mut guard) = self.buffer.lock() {
            guard.push_back((key_code, Instant::now()));
        }
    }

    /// Pop the oldest keypress that is still fresh, discarding stale ones on the way.
    pub fn pop(&self) -> Option<KeyCode> {
        let mut guard = self.buffer.lock().ok()?;
        while let Some((key_code, timestamp)) = guard.pop_front() {
            if timestamp.elapsed() < self.timeout {
                return Some(key_code);
            }
        }
        None
    }
}
