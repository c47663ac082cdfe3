use super::key_buffer::KeyBuffer;
use crossterm::event::{poll, read, Event, KeyCode};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// A struct for managing keypresses that will automatically
/// start a thread that grabs keypresses.
pub struct KeyManager {
    stop: Arc<AtomicBool>,
    key_buffer: Arc<KeyBuffer>,
    event_listener: Option<JoinHandle<()>>,
}

impl KeyManager {
    // Start event listener thread
    pub fn new() -> KeyManager {
        let stop = Arc::new(AtomicBool::new(false));
        let key_buffer = Arc::new(KeyBuffer::new());
        let event_listener = event_listener(stop.clone(), key_buffer.clone());
        KeyManager {
            stop,
            key_buffer,
            event_listener: Some(event_listener),
        }
    }

    /// Every key pressed since the last call
    pub fn pressed_keys(&self) -> Vec<KeyCode> {
        self.key_buffer.drain()
    }
}

impl Drop for KeyManager {
    fn drop(&mut self) {
        // Tell the event listener to stop, and wait for it
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.event_listener.take() {
            if handle.join().is_err() {
                log::error!("Key listener panicked");
            }
        }
    }
}

/// Starts a thread that listens for key events and pushes them to the key buffer.
fn event_listener(stop: Arc<AtomicBool>, key_buffer: Arc<KeyBuffer>) -> JoinHandle<()> {
    thread::spawn(move || {
        while !stop.load(Ordering::Relaxed) {
            match poll(POLL_INTERVAL) {
                Ok(true) => {}
                Ok(false) => continue,
                Err(error) => {
                    log::error!("Could not poll for events: {}", error);
                    break;
                }
            }

            match read() {
                Ok(Event::Key(key_event)) => {
                    log::trace!("Got key {:?}", key_event);
                    key_buffer.push(key_event.code);
                }
                Ok(_) => {}
                Err(error) => {
                    log::error!("Could not read event: {}", error);
                    break;
                }
            }
        }
    })
}
