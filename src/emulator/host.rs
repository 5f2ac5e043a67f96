//! The driver loop connecting an emulator to a frontend.

use std::io;
use std::path::Path;
use std::thread;
use std::time::Duration;

use crate::emulator::emulator::Emulator;
use crate::emulator::error::LoadError;
use crate::emulator::input::{EmulatorInput, InputEvent};
use crate::emulator::output::EmulatorOutput;

/// Runs an emulator, feeding it input and showing its output.
pub struct Host<I: EmulatorInput, O: EmulatorOutput> {
    emulator: Emulator,
    input: I,
    output: O,
}

impl<I: EmulatorInput, O: EmulatorOutput> Host<I, O> {

    pub fn new(emulator: Emulator, input: I, output: O) -> Host<I, O> {
        Host {
            emulator,
            input,
            output,
        }
    }

    /// Run one cycle, then handle pending input and output.
    /// Returns false once the input asked to quit.
    pub fn tick(&mut self) -> io::Result<bool> {
        self.emulator.step();

        while let Some(event) = self.input.poll() {
            log::trace!("Got event {:?}", event);
            match event {
                InputEvent::KeyDown(key) => self.emulator.keypad_mut().press(key),
                InputEvent::KeyUp(key) => self.emulator.keypad_mut().release(key),
                InputEvent::Load(path) => self.reload(&path)?,
                InputEvent::Quit => return Ok(false),
            }
        }

        if self.emulator.draw_requested() {
            self.output.render(self.emulator.framebuffer())?;
            self.emulator.clear_draw_request();
        }

        self.output.tone(self.emulator.sound_requested())?;

        Ok(true)
    }

    /// Tick until the input asks to quit, sleeping `cycle` between ticks.
    pub fn run(&mut self, cycle: Duration) -> io::Result<()> {
        while self.tick()? {
            thread::sleep(cycle);
        }
        Ok(())
    }

    /// Swap in a new program. The machine is reset even if the program cannot be read.
    fn reload(&mut self, path: &Path) -> io::Result<()> {
        self.emulator.initialize();
        match self.emulator.load_file(path) {
            Ok(len) => log::info!("Loaded {} bytes from {:?}", len, path),
            Err(LoadError::Unreadable { path, source }) => log::error!("Cannot read {:?}: {}", path, source),
        }
        self.output.render(self.emulator.framebuffer())
    }

    pub fn emulator(&self) -> &Emulator {
        &self.emulator
    }

    pub fn emulator_mut(&mut self) -> &mut Emulator {
        &mut self.emulator
    }

    pub fn output(&self) -> &O {
        &self.output
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::emulator::config::Config;
    use crate::emulator::input::{DummyInput, ScriptedInput};
    use crate::emulator::output::DummyOutput;
    use std::path::PathBuf;

    fn host_with<I: EmulatorInput>(program: &[u8], input: I) -> Host<I, DummyOutput> {
        let mut emulator = Emulator::with_config(Config { seed: Some(1), ..Config::default() });
        emulator.load(program);
        Host::new(emulator, input, DummyOutput::new())
    }

    #[test]
    fn renders_only_when_requested() {
        let program = [
            0x00, 0xE0, // clear screen
            0x60, 0x01, // V0 = 1
            0xD0, 0x15, // draw '0' at (V0, V1)
        ];
        let mut host = host_with(&program, DummyInput);

        host.tick().unwrap();
        assert_eq!(host.output().frames, 1);
        host.tick().unwrap();
        assert_eq!(host.output().frames, 1);
        host.tick().unwrap();
        assert_eq!(host.output().frames, 2);
        assert!(!host.emulator().draw_requested());

        let frame = host.output().last_frame.as_ref().unwrap();
        assert_eq!(frame.get(1, 0), 1);
        assert_eq!(frame.get(0, 0), 0);
    }

    #[test]
    fn key_events_update_keypad() {
        let input = ScriptedInput::new(vec![
            Some(InputEvent::KeyDown(0x4)),
            Some(InputEvent::KeyDown(0x7)),
            None,
            Some(InputEvent::KeyUp(0x4)),
        ]);
        let mut host = host_with(&[], input);

        host.tick().unwrap();
        assert!(host.emulator().keypad().is_pressed(0x4));
        assert!(host.emulator().keypad().is_pressed(0x7));

        host.tick().unwrap();
        assert!(!host.emulator().keypad().is_pressed(0x4));
        assert!(host.emulator().keypad().is_pressed(0x7));
    }

    #[test]
    fn pressed_key_is_seen_by_program() {
        // Wait for a key into V1, then skip the jump if it is still pressed
        let program = [
            0xF1, 0x0A, // 0x200: V1 = key
            0xE1, 0x9E, // 0x202: skip if key V1 is pressed
            0x12, 0x00, // 0x204: goto 0x200
            0x12, 0x06, // 0x206: loop forever
        ];
        let input = ScriptedInput::new(vec![Some(InputEvent::KeyDown(0xB))]);
        let mut host = host_with(&program, input);

        for _ in 0..6 {
            host.tick().unwrap();
        }
        assert_eq!(host.emulator().program_counter(), 0x206);
        assert_eq!(host.emulator().registers()[1], 0xB);
    }

    #[test]
    fn tone_follows_sound_timer() {
        let program = [
            0x60, 0x02, // V0 = 2
            0xF0, 0x18, // sound timer = V0
        ];
        let mut host = host_with(&program, DummyInput);

        host.tick().unwrap();
        assert!(!host.output().tone_on);
        host.tick().unwrap();
        assert!(host.output().tone_on);
        host.tick().unwrap();
        assert!(host.output().tone_on);
        host.tick().unwrap();
        assert!(!host.output().tone_on);
        assert_eq!(host.output().tone_cycles, 2);
    }

    #[test]
    fn quit_stops_the_loop() {
        let input = ScriptedInput::new(vec![None, Some(InputEvent::Quit), Some(InputEvent::Quit)]);
        let mut host = host_with(&[], input);
        assert!(host.tick().unwrap());
        assert!(!host.tick().unwrap());
        host.run(Duration::from_millis(0)).unwrap();
    }

    #[test]
    fn loading_an_unreadable_program_still_resets() {
        let path = PathBuf::from("/this/path/does/not/exist.ch8");
        let input = ScriptedInput::new(vec![None, Some(InputEvent::Load(path))]);
        let mut host = host_with(&[0x6A, 0x42], input);

        host.tick().unwrap();
        assert_eq!(host.emulator().registers()[0xA], 0x42);

        host.tick().unwrap();
        assert_eq!(host.emulator().registers()[0xA], 0);
        assert_eq!(host.emulator().program_counter(), 0x200);
        assert_eq!(host.output().frames, 1);
        assert!(host.output().last_frame.as_ref().unwrap().is_blank());
    }

    #[test]
    fn loading_a_program_replaces_the_old_one() {
        let path = std::env::temp_dir().join(format!("chip8-vm-host-{}.ch8", std::process::id()));
        std::fs::write(&path, &[0x6Au8, 0x17]).unwrap();

        let input = ScriptedInput::new(vec![None, Some(InputEvent::Load(path.clone()))]);
        let mut host = host_with(&[0x6B, 0x42], input);
        host.tick().unwrap();
        host.tick().unwrap();
        host.tick().unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(host.emulator().registers()[0xA], 0x17);
        assert_eq!(host.emulator().registers()[0xB], 0);
        assert_eq!(&host.emulator().memory()[0x200..0x202], &[0x6A, 0x17]);
    }
}
