/*!

A CHIP-8 interpreter as specified at https://en.wikipedia.org/wiki/CHIP-8.

# Crossterm Frontend

If you want to try the emulator on some programs, there is a ready-to-use implementation
you can run by using `cargo run --release --bin crossterm_frontend -- <program>`.
The keypad is mapped onto the left side of the keyboard (`1234`, `qwer`, `asdf`, `zxcv`),
and `Esc` quits.

# Library

The emulator owns all of the machine state: memory, registers, timers, stack,
the 64x32 framebuffer and the keypad. Load a program as bytes and step it.

```rust
use chip8_vm::emulator::Emulator;

let mut emulator = Emulator::new();

// Load a program at address 0x200.
let clear_display = [0x00, 0xE0];
emulator.load(&clear_display);
emulator.step(); // Will now clear the display

assert!(emulator.draw_requested());
emulator.clear_draw_request();
```

Alternatively, you can experiment by executing instructions manually.

```rust
use chip8_vm::emulator::Emulator;
use chip8_vm::emulator::instruction::{Instruction, Reg, Const, Addr};

let mut emulator = Emulator::new();

// Execute instructions manually
emulator.execute_single(Instruction::ClearScreen);

// Or many sequentially
emulator.execute_many(&[
    Instruction::Goto(Addr(0x250)),
    Instruction::SetRegToConst(Reg(0xA), Const(35)),
    Instruction::SetRegToReg(Reg(0xB), Reg(0xA))
]);

assert_eq!(emulator.program_counter(), 0x250);
assert_eq!(emulator.registers()[0xB], 35);
```

## Configuration

Two behaviors differ between interpreters and can be chosen with `Config`:
whether `FX0A` blocks until a key is pressed, and whether sprites wrap around
or get clipped at the screen edges.

```rust
use chip8_vm::emulator::Emulator;
use chip8_vm::emulator::config::{Config, KeyWait, SpriteEdges};

let emulator = Emulator::with_config(Config {
    key_wait: KeyWait::Blocking,
    sprite_edges: SpriteEdges::Clip,
    seed: Some(42),
});
```

## Custom input and output

To run a program interactively, implement `EmulatorInput` and `EmulatorOutput`,
which represent somewhere to get key presses from and a screen with a speaker respectively.
Take a look at `src/emulator/input.rs` and `src/emulator/output.rs` to see how to implement this, then do the following.

```ignore
use chip8_vm::emulator::{Emulator, host::Host};

let mut host = Host::new(Emulator::new(), MyInput::new(), MyOutput::new());
host.run(std::time::Duration::from_millis(2))?;
```

You can then implement the emulator using your own custom frontend, as done with crossterm in crossterm_frontend.
*/

pub mod emulator;
pub mod util;
