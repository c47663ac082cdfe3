use std::fmt;

pub const SCREEN_WIDTH: usize = 64;
pub const SCREEN_HEIGHT: usize = 32;
pub const SCREEN_SIZE: usize = SCREEN_WIDTH * SCREEN_HEIGHT;

/// The monochrome screen, stored row-major.
/// A renderer only ever reads it, the machine is the only writer.
#[derive(Clone, PartialEq, Eq)]
pub struct Framebuffer {
    cells: [bool; SCREEN_SIZE],
}

impl Framebuffer {
    pub fn new() -> Framebuffer {
        Framebuffer {
            cells: [false; SCREEN_SIZE],
        }
    }

    pub fn clear(&mut self) {
        self.cells = [false; SCREEN_SIZE];
    }

    /// Whether the pixel at column `x`, row `y` is lit.
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.cells[y * SCREEN_WIDTH + x]
    }

    /// XOR the pixel at (`x`, `y`) with a set sprite bit.
    /// Returns true if a lit pixel was switched off.
    pub fn toggle(&mut self, x: usize, y: usize) -> bool {
        let cell = &mut self.cells[y * SCREEN_WIDTH + x];
        let was_lit = *cell;
        *cell = !was_lit;
        was_lit
    }

    /// All 2048 cells, 64 per row.
    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        self.cells.chunks(SCREEN_WIDTH)
    }
}

impl Default for Framebuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Framebuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lit = self.cells.iter().filter(|c| **c).count();
        write!(f, "Framebuffer {{ lit: {} }}", lit)
    }
}

impl fmt::Display for Framebuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for c in row.iter() {
                write!(f, "{}", if *c { "#" } else { " " })?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}
