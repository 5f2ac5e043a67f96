//! The CHIP-8 virtual machine as described at https://en.wikipedia.org/wiki/CHIP-8#Virtual_machine_description.

use std::path::Path;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::emulator::config::{Config, KeyWait, SpriteEdges};
use crate::emulator::error::LoadError;
use crate::emulator::framebuffer::{Framebuffer, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::emulator::instruction::*;
use crate::emulator::keypad::Keypad;

pub const MEM_SIZE: usize = 4096;
pub const NUM_REGISTERS: usize = 16;
pub const STACK_SIZE: usize = 32;
pub const PC_START: u16 = 0x200;
/// The largest program that fits in memory.
pub const MAX_PROGRAM_SIZE: usize = MEM_SIZE - PC_START as usize;
const FLAG: usize = 0xF;
const FONT: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];
/// Each font glyph is five bytes tall.
const GLYPH_SIZE: u16 = 5;

pub struct Emulator {
    // Standard fields
    memory: [u8; MEM_SIZE],
    registers: [u8; NUM_REGISTERS],
    delay_timer: u8,
    sound_timer: u8,
    i: u16,
    program_counter: u16,
    stack_pointer: usize,
    stack: [u16; STACK_SIZE],

    framebuffer: Framebuffer,
    keypad: Keypad,
    draw_requested: bool,
    sound_requested: bool,

    config: Config,
    rng: StdRng,
}

impl Emulator {

    /// Create a new emulator with the default configuration
    pub fn new() -> Emulator {
        Emulator::with_config(Config::default())
    }

    /// Create a new, initialized emulator
    pub fn with_config(config: Config) -> Emulator {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut emulator = Emulator {
            memory: [0; MEM_SIZE],
            registers: [0; NUM_REGISTERS],
            delay_timer: 0,
            sound_timer: 0,
            i: 0,
            program_counter: PC_START,
            stack_pointer: 0,
            stack: [0; STACK_SIZE],

            framebuffer: Framebuffer::new(),
            keypad: Keypad::new(),
            draw_requested: false,
            sound_requested: false,

            config,
            rng,
        };
        emulator.initialize();
        emulator
    }

    /// Reset the machine: zero memory, registers, timers and stack,
    /// clear the screen, load the font and point the program counter at 0x200.
    /// Key states are left alone since they mirror the physical keyboard.
    pub fn initialize(&mut self) {
        self.memory = [0; MEM_SIZE];
        self.registers = [0; NUM_REGISTERS];
        self.delay_timer = 0;
        self.sound_timer = 0;
        self.i = 0;
        self.program_counter = PC_START;
        self.stack_pointer = 0;
        self.stack = [0; STACK_SIZE];
        self.framebuffer.clear();
        self.draw_requested = false;
        self.sound_requested = false;

        self.memory[..FONT.len()].copy_from_slice(&FONT);

        log::debug!("Initialized emulator");
    }

    /// Copy a program into memory at 0x200, truncating it if it does not fit.
    /// Returns the number of bytes loaded.
    pub fn load(&mut self, program: &[u8]) -> usize {
        let len = std::cmp::min(program.len(), MAX_PROGRAM_SIZE);
        if len < program.len() {
            log::warn!("Program is {} bytes, truncating to {}", program.len(), len);
        }

        let start = PC_START as usize;
        self.memory[start..start + len].copy_from_slice(&program[..len]);

        log::debug!("Loaded {} bytes", len);
        len
    }

    /// Read a program from a file and copy it into memory at 0x200.
    pub fn load_file<P: AsRef<Path>>(&mut self, path: P) -> Result<usize, LoadError> {
        let path = path.as_ref();
        let program = std::fs::read(path).map_err(|source| LoadError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(self.load(&program))
    }

    /// Perform a single cycle: fetch an instruction, execute it, then update timers.
    pub fn step(&mut self) {
        self.sound_requested = false;

        // Each opcode is two bytes
        let left = self.read(self.program_counter);
        let right = self.read(self.program_counter.wrapping_add(1));
        self.program_counter = self.program_counter.wrapping_add(2);

        match Instruction::from_two_u8(left, right) {
            Some(instruction) => {
                log::trace!("{:#05x}: {:?}", self.program_counter.wrapping_sub(2), instruction);
                self.execute_single(instruction);
            }
            None => {
                log::warn!(
                    "Unknown instruction {:#06x} at {:#05x}",
                    (left as u16) << 8 | right as u16,
                    self.program_counter.wrapping_sub(2)
                );
            }
        }

        // Update timers
        if self.delay_timer > 0 {
            self.delay_timer -= 1;
        }

        if self.sound_timer > 0 {
            self.sound_timer -= 1;
            self.sound_requested = true;
        }
    }

    /// Execute many instructions in order, without touching the timers
    pub fn execute_many(&mut self, instructions: &[Instruction]) {
        for instruction in instructions {
            self.execute_single(*instruction);
        }
    }

    /// Execute a single instruction, without touching the timers
    pub fn execute_single(&mut self, instruction: Instruction) {
        match instruction {

            Instruction::Nop => {}

            // Clear the screen
            Instruction::ClearScreen => {
                self.framebuffer.clear();
                self.draw_requested = true;
            }

            // Return to the previous call site via the stack. An empty stack is ignored.
            Instruction::Return => {
                if self.stack_pointer > 0 {
                    self.stack_pointer -= 1;
                    self.program_counter = self.stack[self.stack_pointer];
                }
            }

            // Go to a specific memory address
            Instruction::Goto(Addr(addr)) => {
                self.program_counter = addr;
            }

            // Store the current address on the stack, then jump to the specified address.
            // A full stack drops the return address.
            Instruction::Call(Addr(addr)) => {
                if self.stack_pointer < STACK_SIZE {
                    self.stack[self.stack_pointer] = self.program_counter;
                    self.stack_pointer += 1;
                }
                self.program_counter = addr;
            }

            // If the register equals the constant, skip the next instruction
            Instruction::IfRegEqConst(Reg(x), Const(n)) => {
                self.skip_if(self.reg(x) == n);
            }

            Instruction::IfRegNeqConst(Reg(x), Const(n)) => {
                self.skip_if(self.reg(x) != n);
            }

            Instruction::IfRegEqReg(Reg(x), Reg(y)) => {
                self.skip_if(self.reg(x) == self.reg(y));
            }

            Instruction::SetRegToConst(Reg(x), Const(n)) => {
                self.set_reg(x, n);
            }

            // Wraps around, VF is untouched
            Instruction::IncRegByConst(Reg(x), Const(n)) => {
                self.set_reg(x, self.reg(x).wrapping_add(n));
            }

            Instruction::SetRegToReg(Reg(x), Reg(y)) => {
                self.set_reg(x, self.reg(y));
            }

            Instruction::BitwiseOr(Reg(x), Reg(y)) => {
                self.set_reg(x, self.reg(x) | self.reg(y));
            }

            Instruction::BitwiseAnd(Reg(x), Reg(y)) => {
                self.set_reg(x, self.reg(x) & self.reg(y));
            }

            Instruction::BitwiseXor(Reg(x), Reg(y)) => {
                self.set_reg(x, self.reg(x) ^ self.reg(y));
            }

            // VF is set to 1 on carry, 0 otherwise
            Instruction::IncRegByReg(Reg(x), Reg(y)) => {
                let (sum, carry) = self.reg(x).overflowing_add(self.reg(y));
                self.registers[FLAG] = carry as u8;
                self.set_reg(x, sum);
            }

            // VF is set to 1 if Vx > Vy, 0 otherwise
            Instruction::DecRegByReg(Reg(x), Reg(y)) => {
                let (vx, vy) = (self.reg(x), self.reg(y));
                self.registers[FLAG] = (vx > vy) as u8;
                self.set_reg(x, vx.wrapping_sub(vy));
            }

            Instruction::BitshiftRight(Reg(x)) => {
                let vx = self.reg(x);
                self.registers[FLAG] = vx & 1;
                self.set_reg(x, vx >> 1);
            }

            // VF is set to 1 if Vy > Vx, 0 otherwise
            Instruction::SetVxVyMinusVx(Reg(x), Reg(y)) => {
                let (vx, vy) = (self.reg(x), self.reg(y));
                self.registers[FLAG] = (vy > vx) as u8;
                self.set_reg(x, vy.wrapping_sub(vx));
            }

            Instruction::BitshiftLeft(Reg(x)) => {
                let vx = self.reg(x);
                self.registers[FLAG] = vx >> 7;
                self.set_reg(x, vx << 1);
            }

            Instruction::IfRegNeqReg(Reg(x), Reg(y)) => {
                self.skip_if(self.reg(x) != self.reg(y));
            }

            Instruction::SetI(Addr(addr)) => {
                self.i = addr;
            }

            Instruction::SetPcToV0PlusAddr(Addr(addr)) => {
                self.program_counter = addr + self.registers[0] as u16;
            }

            Instruction::SetVxRand(Reg(x), Const(n)) => {
                let random: u8 = self.rng.gen();
                self.set_reg(x, random & n);
            }

            Instruction::Draw(Reg(x), Reg(y), Const(sprite_height)) => {
                self.draw(self.reg(x) as usize, self.reg(y) as usize, sprite_height);
            }

            // Skip if the key in Vx is pressed
            Instruction::IfKeyEqVx(Reg(x)) => {
                self.skip_if(self.keypad.is_pressed(self.reg(x)));
            }

            // Skip if the key in Vx isn't pressed
            Instruction::IfKeyNeqVx(Reg(x)) => {
                self.skip_if(!self.keypad.is_pressed(self.reg(x)));
            }

            Instruction::SetRegToDelayTimer(Reg(x)) => {
                self.set_reg(x, self.delay_timer);
            }

            // Get a key press
            Instruction::SetRegToGetKey(Reg(x)) => {
                match (self.keypad.last_pressed(), self.config.key_wait) {
                    (Some(key), _) => self.set_reg(x, key),
                    (None, KeyWait::LastPressed) => {}
                    (None, KeyWait::Blocking) => {
                        self.program_counter = self.program_counter.wrapping_sub(2);
                    }
                }
            }

            Instruction::SetDelayTimerToReg(Reg(x)) => {
                self.delay_timer = self.reg(x);
            }

            Instruction::SetSoundTimerToReg(Reg(x)) => {
                self.sound_timer = self.reg(x);
            }

            Instruction::AddRegToI(Reg(x)) => {
                self.i = self.i.wrapping_add(self.reg(x) as u16);
            }

            // Set i to character address. Each font element is 5 bytes tall.
            Instruction::SetIToSpriteAddrVx(Reg(x)) => {
                self.i = GLYPH_SIZE * self.reg(x) as u16;
            }

            Instruction::SetIToBcdOfReg(Reg(x)) => {
                let value = self.reg(x);
                self.write(self.i, value / 100);
                self.write(self.i.wrapping_add(1), (value / 10) % 10);
                self.write(self.i.wrapping_add(2), value % 10);
            }

            // Dump register values up to Vx
            Instruction::RegDump(Reg(x)) => {
                for reg_no in 0..=x {
                    self.write(self.i.wrapping_add(reg_no as u16), self.reg(reg_no));
                }
            }

            // Load register values up to Vx
            Instruction::RegLoad(Reg(x)) => {
                for reg_no in 0..=x {
                    let value = self.read(self.i.wrapping_add(reg_no as u16));
                    self.set_reg(reg_no, value);
                }
            }
        };
    }

    /// XOR an `n` byte sprite from memory at I onto the screen at (x, y).
    /// VF is set to 1 if any set pixel gets unset.
    fn draw(&mut self, x_coord: usize, y_coord: usize, sprite_height: u8) {
        self.registers[FLAG] = 0;
        self.draw_requested = true;

        for row in 0..sprite_height as usize {
            let sprite_row = self.read(self.i.wrapping_add(row as u16));
            for col in 0..8 {
                if sprite_row & (0x80 >> col) == 0 {
                    continue;
                }

                let target = match self.config.sprite_edges {
                    SpriteEdges::Wrap => Some(((x_coord + col) % SCREEN_WIDTH, (y_coord + row) % SCREEN_HEIGHT)),
                    SpriteEdges::Clip => {
                        let (x, y) = (x_coord + col, y_coord + row);
                        if x < SCREEN_WIDTH && y < SCREEN_HEIGHT {
                            Some((x, y))
                        } else {
                            None
                        }
                    }
                };

                if let Some((x, y)) = target {
                    if self.framebuffer.xor(x, y) {
                        self.registers[FLAG] = 1;
                    }
                }
            }
        }
    }

    /// Log the machine state: non-zero memory, stack, registers and pointers.
    pub fn dump(&self) {
        for (addr, byte) in self.memory.iter().enumerate().filter(|(_, byte)| **byte != 0) {
            log::debug!("{:#05x} {:#04x}", addr, byte);
        }
        log::debug!("Stack {:x?}", &self.stack[..self.stack_pointer]);
        for (reg_no, value) in self.registers.iter().enumerate() {
            log::debug!("V{:X} {:#04x}", reg_no, value);
        }
        log::debug!("DT {} ST {}", self.delay_timer, self.sound_timer);
        log::debug!("PC {:#05x} SP {} I {:#05x}", self.program_counter, self.stack_pointer, self.i);
        log::debug!("{}", self.framebuffer);
    }

    fn skip_if(&mut self, condition: bool) {
        if condition {
            self.program_counter = self.program_counter.wrapping_add(2);
        }
    }

    fn reg(&self, reg_no: u8) -> u8 {
        self.registers[reg_no as usize]
    }

    fn set_reg(&mut self, reg_no: u8, value: u8) {
        self.registers[reg_no as usize] = value;
    }

    // Addresses wrap around the 4K address space.
    fn read(&self, addr: u16) -> u8 {
        self.memory[addr as usize % MEM_SIZE]
    }

    fn write(&mut self, addr: u16, value: u8) {
        self.memory[addr as usize % MEM_SIZE] = value;
    }

    pub fn memory(&self) -> &[u8] {
        &self.memory
    }

    pub fn registers(&self) -> &[u8; NUM_REGISTERS] {
        &self.registers
    }

    pub fn index(&self) -> u16 {
        self.i
    }

    pub fn program_counter(&self) -> u16 {
        self.program_counter
    }

    pub fn stack_pointer(&self) -> usize {
        self.stack_pointer
    }

    pub fn delay_timer(&self) -> u8 {
        self.delay_timer
    }

    pub fn sound_timer(&self) -> u8 {
        self.sound_timer
    }

    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    pub fn keypad(&self) -> &Keypad {
        &self.keypad
    }

    pub fn keypad_mut(&mut self) -> &mut Keypad {
        &mut self.keypad
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Whether the screen changed since the renderer last cleared the request.
    pub fn draw_requested(&self) -> bool {
        self.draw_requested
    }

    pub fn clear_draw_request(&mut self) {
        self.draw_requested = false;
    }

    /// Whether the sound timer was running during the last cycle.
    pub fn sound_requested(&self) -> bool {
        self.sound_requested
    }
}

impl Default for Emulator {
    fn default() -> Self {
        Self::new()
    }
}
