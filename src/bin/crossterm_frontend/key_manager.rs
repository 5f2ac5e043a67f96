use super::key_buffer::KeyBuffer;
use crossterm::event::{poll, read, Event, KeyCode};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// How long the listener waits for an event before checking whether to stop.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// A struct for managing keypresses that will automatically
/// start a thread that grabs keypresses.
pub struct KeyManager {
    stop: Arc<Mutex<bool>>,
    key_buffer: Arc<KeyBuffer>,
    event_listener: Option<JoinHandle<()>>,
}

impl KeyManager {
    // Start event listener thread
    pub fn new() -> KeyManager {
        let stop = Arc::new(Mutex::new(false));
        let key_buffer = Arc::new(KeyBuffer::new(Duration::from_millis(250)));
        let event_listener = event_listener(stop.clone(), key_buffer.clone());
        KeyManager {
            stop,
            key_buffer,
            event_listener: Some(event_listener),
        }
    }

    /// Get the next key pressed, if there is a fresh one
    pub fn get_key(&self) -> Option<KeyCode> {
        self.key_buffer.pop()
    }
}

impl Drop for KeyManager {
    fn drop(&mut self) {
        // Tell the event listener to stop, and wait for it
        if let Ok(mut stop) = self.stop.lock() {
            *stop = true;
        }
        if let Some(handle) = self.event_listener.take() {
            if handle.join().is_err() {
                log::error!("Key listener panicked");
            }
        }
    }
}

/// Starts a thread that listens for key events and pushes them to the key buffer.
fn event_listener(stop: Arc<Mutex<bool>>, key_buffer: Arc<KeyBuffer>) -> JoinHandle<()> {
    thread::spawn(move || {
        loop {
            // Check the shared data, and possibly stop
            if stop.lock().map(|stop| *stop).unwrap_or(true) {
                break;
            }

            match poll(POLL_INTERVAL) {
                Ok(true) => {}
                Ok(false) => continue,
                Err(e) => {
                    log::error!("Could not poll for events: {}", e);
                    break;
                }
            }

            match read() {
                Ok(Event::Key(key_event)) => {
                    log::debug!("Got key {:?}", key_event);
                    key_buffer.push(key_event.code);
                }
                Ok(_) => {}
                Err(e) => {
                    log::error!("Could not read event: {}", e);
                    break;
                }
            }
        }
    })
}
