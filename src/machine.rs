//! The CHIP-8 machine and the pieces it is built from.

pub mod config;
pub mod display;
pub mod error;
pub mod instruction;
pub mod keypad;
pub mod machine;
pub mod opcode;
pub mod sound;

pub use self::config::{Config, JumpOffset};
pub use self::display::Framebuffer;
pub use self::error::MachineError;
pub use self::machine::Machine;
pub use self::sound::{ChannelSound, Mute, SoundSink};
