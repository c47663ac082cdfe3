use chip_8_machine::machine::display::{Framebuffer, SCREEN_HEIGHT, SCREEN_WIDTH};

use crossterm::event::KeyCode;
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue};
use std::io::{stdout, Write};
use std::time::{Duration, Instant};

/// Draws the framebuffer inside a box, two columns per pixel.
pub struct CrosstermScreen {
    drawn: Framebuffer,
}

impl CrosstermScreen {
    pub fn new() -> crossterm::Result<CrosstermScreen> {
        execute!(stdout(), EnterAlternateScreen, cursor::Hide, Clear(ClearType::All))?;
        terminal::enable_raw_mode()?;

        let bottom = SCREEN_HEIGHT as u16 + 1;
        let right = 2 * SCREEN_WIDTH as u16 + 1;
        let mut out = stdout();
        for y in 0..=bottom {
            for x in 0..=right {
                let c = match (x, y) {
                    (0, 0) => '┏',
                    (x, 0) if x == right => '┓',
                    (0, y) if y == bottom => '┗',
                    (x, y) if x == right && y == bottom => '┛',
                    (_, y) if y == 0 || y == bottom => '━',
                    (x, _) if x == 0 || x == right => '┃',
                    _ => continue,
                };
                queue!(out, cursor::MoveTo(x, y))?;
                write!(out, "{}", c)?;
            }
        }
        out.flush()?;

        Ok(CrosstermScreen {
            drawn: Framebuffer::new(),
        })
    }

    /// Redraw the pixels that changed since the last call.
    pub fn refresh(&mut self, framebuffer: &Framebuffer) -> crossterm::Result<()> {
        if &self.drawn == framebuffer {
            return Ok(());
        }

        let mut out = stdout();
        for y in 0..SCREEN_HEIGHT {
            for x in 0..SCREEN_WIDTH {
                let lit = framebuffer.get(x, y);
                if lit != self.drawn.get(x, y) {
                    queue!(out, cursor::MoveTo(2 * x as u16 + 1, y as u16 + 1))?;
                    write!(out, "{}", if lit { "██" } else { "  " })?;
                }
            }
        }
        out.flush()?;

        self.drawn = framebuffer.clone();
        Ok(())
    }

    pub fn bell(&mut self) -> crossterm::Result<()> {
        let mut out = stdout();
        write!(out, "\x07")?;
        out.flush()?;
        Ok(())
    }
}

impl Drop for CrosstermScreen {
    fn drop(&mut self) {
        let restored = terminal::disable_raw_mode()
            .and_then(|_| execute!(stdout(), LeaveAlternateScreen, cursor::Show));
        if let Err(error) = restored {
            log::error!("Could not restore the terminal: {}", error);
        }
    }
}

/// The terminal only reports key presses, so a key counts as held
/// until it has not been pressed for `timeout`.
pub struct HeldKeys {
    timeout: Duration,
    pressed_at: [Option<Instant>; 16],
}

impl HeldKeys {
    pub fn new(timeout: Duration) -> HeldKeys {
        HeldKeys {
            timeout,
            pressed_at: [None; 16],
        }
    }

    /// Record a press of `key`. Returns true if it was not already held.
    pub fn press(&mut self, key: u8, now: Instant) -> bool {
        match self.pressed_at.get_mut(key as usize) {
            Some(slot) => slot.replace(now).is_none(),
            None => false,
        }
    }

    /// Forget every key whose last press is older than the timeout, returning them.
    pub fn expire(&mut self, now: Instant) -> Vec<u8> {
        let timeout = self.timeout;
        let mut released = Vec::new();
        for (key, slot) in self.pressed_at.iter_mut().enumerate() {
            if let Some(pressed_at) = *slot {
                if now.duration_since(pressed_at) >= timeout {
                    *slot = None;
                    released.push(key as u8);
                }
            }
        }
        released
    }
}

/// Keys 0-9 and a-f map onto the hex keypad.
pub fn key_to_u8(key: KeyCode) -> Option<u8> {
    match key {
        KeyCode::Char(c) => c.to_digit(16).map(|c| c as u8),
        _ => None,
    }
}
