use crate::machine::error::MachineError;

pub const NUM_KEYS: usize = 16;

/// The 16-key hex keypad, along with the register that `FX0A`
/// is waiting to fill, if any.
#[derive(Debug, Clone, Default)]
pub struct Keypad {
    pressed: [bool; NUM_KEYS],
    waiting_for: Option<u8>,
}

impl Keypad {
    pub fn new() -> Keypad {
        Keypad::default()
    }

    pub fn is_down(&self, key: u8) -> bool {
        self.pressed.get(key as usize).copied().unwrap_or(false)
    }

    pub fn is_waiting(&self) -> bool {
        self.waiting_for.is_some()
    }

    /// Block stepping until the next key press, which will be stored in `register`.
    pub fn wait_for_key(&mut self, register: u8) {
        self.waiting_for = Some(register);
    }

    /// Mark `key` as pressed. If a key was awaited, returns the
    /// register that should receive it and stops waiting.
    pub fn press(&mut self, key: u8) -> Result<Option<u8>, MachineError> {
        let slot = self
            .pressed
            .get_mut(key as usize)
            .ok_or(MachineError::InvalidKey(key))?;
        *slot = true;
        Ok(self.waiting_for.take())
    }

    pub fn release(&mut self, key: u8) -> Result<(), MachineError> {
        let slot = self
            .pressed
            .get_mut(key as usize)
            .ok_or(MachineError::InvalidKey(key))?;
        *slot = false;
        Ok(())
    }
}
