use thiserror::Error;

/// Everything that can stop the machine.
///
/// Errors raised by `Machine::step` leave the machine exactly as it was
/// before the call, so the state can still be inspected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MachineError {
    #[error("unknown opcode {opcode:#06x} at {pc:#05x}")]
    UnknownOpcode { opcode: u16, pc: u16 },

    #[error("stack overflow: call at {pc:#05x} nests deeper than the stack allows")]
    StackOverflow { pc: u16 },

    #[error("stack underflow: return at {pc:#05x} with an empty call stack")]
    StackUnderflow { pc: u16 },

    #[error("ROM is too large ({size} bytes), max size is {max_size} bytes")]
    RomTooLarge { size: usize, max_size: usize },

    #[error("speed must be at least one step per timer tick")]
    InvalidSpeed,

    #[error("key {0:#x} is outside the 16-key keypad")]
    InvalidKey(u8),
}
