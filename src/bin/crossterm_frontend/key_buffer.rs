use crossterm::event::KeyCode;
use std::{collections::VecDeque, sync::Mutex};

/// A thread-safe queue of key presses, filled by the listener thread
/// and drained by the thread that steps the machine.
/// Wrap it in an `std::sync::Arc` and you are good to go.
pub struct KeyBuffer {
    buffer: Mutex<VecDeque<KeyCode>>,
}

impl KeyBuffer {
    pub fn new() -> KeyBuffer {
        KeyBuffer {
            buffer: Mutex::new(VecDeque::new()),
        }
    }

    /// Push a new keypress to the buffer.
    pub fn push(&self, key_code: KeyCode) {
        match self.buffer.lock() {
            Ok(mut buffer) => buffer.push_back(key_code),
            Err(_) => log::error!("Key buffer is poisoned, dropping {:?}", key_code),
        }
    }

    /// Take every buffered keypress, oldest first.
    pub fn drain(&self) -> Vec<KeyCode> {
        match self.buffer.lock() {
            Ok(mut buffer) => buffer.drain(..).collect(),
            Err(_) => Vec::new(),
        }
    }
}
