/// How `BNNN` computes its jump target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpOffset {
    /// PC = NNN + V0, a full 12-bit address.
    Full,
    /// Legacy compatibility: only the low 8 bits of NNN + V0 are kept.
    Truncated,
}

impl Default for JumpOffset {
    fn default() -> Self {
        JumpOffset::Full
    }
}

/// Machine settings, fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Sprites wrap around the screen edges instead of being clipped.
    pub wrap_around: bool,
    /// Number of steps per timer tick. Must be at least 1.
    pub speed: u32,
    pub jump_offset: JumpOffset,
    /// Seed for the `CXNN` generator. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            wrap_around: false,
            speed: 8,
            jump_offset: JumpOffset::Full,
            seed: None,
        }
    }
}
