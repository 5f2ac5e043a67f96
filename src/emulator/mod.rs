pub mod config;
pub mod emulator;
pub mod error;
pub mod framebuffer;
pub mod host;
pub mod input;
pub mod instruction;
pub mod keypad;
pub mod output;

pub use self::emulator::Emulator;
