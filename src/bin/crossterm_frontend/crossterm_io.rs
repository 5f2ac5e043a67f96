use chip8_vm::emulator::framebuffer::{Framebuffer, SCREEN_HEIGHT, SCREEN_WIDTH};
use chip8_vm::emulator::input::{EmulatorInput, InputEvent};
use chip8_vm::emulator::keypad::{keymap, NUM_KEYS};
use chip8_vm::emulator::output::EmulatorOutput;

use super::key_manager::KeyManager;

use crossterm::event::KeyCode;
use crossterm::style::Print;
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, queue, execute, ErrorKind};
use std::io::{self, stdout, Stdout, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Terminals don't report key releases, so a key counts as held this long after its last press.
/// Must outlast the terminal's auto-repeat delay, or held keys flicker.
pub const DEFAULT_KEY_HOLD: Duration = Duration::from_millis(600);

fn to_io(e: ErrorKind) -> io::Error {
    io::Error::new(io::ErrorKind::Other, e)
}

pub struct CrosstermInput<'a> {
    key_manager: &'a KeyManager,
    program: PathBuf,
    key_hold: Duration,
    held: [Option<Instant>; NUM_KEYS],
}

impl CrosstermInput<'_> {
    /// `program` is reloaded when F5 is pressed.
    /// A key is released `key_hold` after its last press.
    pub fn new(key_manager: &KeyManager, program: PathBuf, key_hold: Duration) -> CrosstermInput {
        CrosstermInput {
            key_manager,
            program,
            key_hold,
            held: [None; NUM_KEYS],
        }
    }
}

impl EmulatorInput for CrosstermInput<'_> {
    fn poll(&mut self) -> Option<InputEvent> {
        if let Some(key) = release_expired(&mut self.held, self.key_hold, Instant::now()) {
            return Some(InputEvent::KeyUp(key));
        }

        while let Some(key_code) = self.key_manager.get_key() {
            match key_code {
                KeyCode::Esc => return Some(InputEvent::Quit),
                KeyCode::F(5) => return Some(InputEvent::Load(self.program.clone())),
                KeyCode::Char(c) => {
                    if let Some(key) = keymap(c) {
                        self.held[key as usize] = Some(Instant::now());
                        return Some(InputEvent::KeyDown(key));
                    }
                }
                _ => {}
            }
        }

        None
    }
}

/// Release the first key that hasn't been repeated within `key_hold` of `now`.
fn release_expired(held: &mut [Option<Instant>; NUM_KEYS], key_hold: Duration, now: Instant) -> Option<u8> {
    for (key, since) in held.iter_mut().enumerate() {
        if since.map_or(false, |since| now.duration_since(since) >= key_hold) {
            *since = None;
            return Some(key as u8);
        }
    }
    None
}

pub struct CrosstermOutput {
    stdout: Stdout,
    scale: usize,
    tone_on: bool,
}

impl CrosstermOutput {
    /// Take over the terminal. Each pixel becomes `scale` rows of `2 * scale` columns.
    pub fn new(scale: usize) -> io::Result<CrosstermOutput> {
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide, Clear(ClearType::All)).map_err(to_io)?;
        terminal::enable_raw_mode().map_err(to_io)?;

        let mut output = CrosstermOutput {
            stdout,
            scale: scale.max(1),
            tone_on: false,
        };
        output.draw_border()?;
        Ok(output)
    }

    fn draw_border(&mut self) -> io::Result<()> {
        let right = (SCREEN_WIDTH * 2 * self.scale + 1) as u16;
        let bottom = (SCREEN_HEIGHT * self.scale + 1) as u16;
        for y in 0..=bottom {
            for x in 0..=right {
                let c = if y == 0 && x == 0 {
                    '┏'
                } else if y == 0 && x == right {
                    '┓'
                } else if y == bottom && x == 0 {
                    '┗'
                } else if y == bottom && x == right {
                    '┛'
                } else if y == 0 || y == bottom {
                    '━'
                } else if x == 0 || x == right {
                    '┃'
                } else {
                    continue;
                };
                queue!(self.stdout, cursor::MoveTo(x, y), Print(c)).map_err(to_io)?;
            }
        }
        self.stdout.flush()
    }
}

impl Drop for CrosstermOutput {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
        let _ = execute!(self.stdout, LeaveAlternateScreen, cursor::Show);
    }
}

impl EmulatorOutput for CrosstermOutput {
    fn render(&mut self, framebuffer: &Framebuffer) -> io::Result<()> {
        for (y, row) in framebuffer.rows().enumerate() {
            let line: String = row
                .iter()
                .map(|&pixel| (if pixel == 1 { "██" } else { "  " }).repeat(self.scale))
                .collect();
            for dy in 0..self.scale {
                let term_y = (y * self.scale + dy + 1) as u16;
                queue!(self.stdout, cursor::MoveTo(1, term_y), Print(&line)).map_err(to_io)?;
            }
        }
        self.stdout.flush()
    }

    // No synthesizer, so ring the terminal bell when the tone starts
    fn tone(&mut self, on: bool) -> io::Result<()> {
        if on && !self.tone_on {
            write!(self.stdout, "\x07")?;
            self.stdout.flush()?;
        }
        self.tone_on = on;
        Ok(())
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn held_key_survives_the_repeat_delay() {
        // Terminals usually wait around 500ms before auto-repeating
        let pressed = Instant::now();
        let mut held = [None; NUM_KEYS];
        held[0x5] = Some(pressed);

        let before_repeat = pressed + Duration::from_millis(500);
        assert_eq!(release_expired(&mut held, DEFAULT_KEY_HOLD, before_repeat), None);
        assert_eq!(held[0x5], Some(pressed));
    }

    #[test]
    fn key_is_released_once_after_hold() {
        let pressed = Instant::now();
        let mut held = [None; NUM_KEYS];
        held[0xA] = Some(pressed);

        let later = pressed + DEFAULT_KEY_HOLD;
        assert_eq!(release_expired(&mut held, DEFAULT_KEY_HOLD, later), Some(0xA));
        assert_eq!(release_expired(&mut held, DEFAULT_KEY_HOLD, later), None);
    }
}
