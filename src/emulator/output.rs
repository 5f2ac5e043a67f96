use std::io;

use crate::emulator::framebuffer::Framebuffer;

/// Represents an output device: a screen and a tone generator.
pub trait EmulatorOutput {
    /// Draw the whole framebuffer. Only called when the emulator requested a redraw.
    fn render(&mut self, framebuffer: &Framebuffer) -> io::Result<()>;

    /// Turn the tone on or off. Called every cycle.
    fn tone(&mut self, _on: bool) -> io::Result<()> {
        Ok(())
    }
}

/// A simple output device that remembers what it was asked to show.
#[derive(Debug, Default)]
pub struct DummyOutput {
    pub frames: usize,
    pub last_frame: Option<Framebuffer>,
    pub tone_on: bool,
    pub tone_cycles: usize,
}

impl DummyOutput {
    pub fn new() -> DummyOutput {
        DummyOutput::default()
    }
}

impl EmulatorOutput for DummyOutput {
    fn render(&mut self, framebuffer: &Framebuffer) -> io::Result<()> {
        self.frames += 1;
        self.last_frame = Some(framebuffer.clone());
        Ok(())
    }

    fn tone(&mut self, on: bool) -> io::Result<()> {
        self.tone_on = on;
        if on {
            self.tone_cycles += 1;
        }
        Ok(())
    }
}
