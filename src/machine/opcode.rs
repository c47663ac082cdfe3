/// A raw two-byte instruction word, split into the fields
/// that the different instruction formats use.
///
/// ```text
/// | high nibble | x | y | nibble |
///               |  addr (12 bits) |
///                   | byte (8 bits)|
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Opcode(pub u16);

impl Opcode {

    /// Combine two bytes read from memory, big-endian.
    pub fn from_bytes(left: u8, right: u8) -> Opcode {
        Opcode(((left as u16) << 8) | right as u16)
    }

    pub fn high_nibble(&self) -> u8 {
        (self.0 >> 12) as u8
    }

    /// Register identifier in bits 8-11.
    pub fn x(&self) -> u8 {
        ((self.0 >> 8) & 0xF) as u8
    }

    /// Register identifier in bits 4-7.
    pub fn y(&self) -> u8 {
        ((self.0 >> 4) & 0xF) as u8
    }

    pub fn nibble(&self) -> u8 {
        (self.0 & 0xF) as u8
    }

    pub fn byte(&self) -> u8 {
        (self.0 & 0xFF) as u8
    }

    pub fn addr(&self) -> u16 {
        self.0 & 0x0FFF
    }
}
