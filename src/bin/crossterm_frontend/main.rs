use std::error::Error;
use std::path::PathBuf;
use std::time::Duration;

use structopt::StructOpt;

use chip8_vm::emulator::config::{Config, KeyWait, SpriteEdges};
use chip8_vm::emulator::host::Host;
use chip8_vm::emulator::Emulator;

mod crossterm_io;
mod key_buffer;
mod key_manager;
use crossterm_io::{CrosstermInput, CrosstermOutput, DEFAULT_KEY_HOLD};
use key_manager::KeyManager;

/// The program options.
#[derive(StructOpt)]
struct Opt {
    /// The program to execute
    #[structopt(parse(from_os_str))]
    input: PathBuf,

    /// Cycles per second
    #[structopt(long, default_value = "500")]
    hz: u32,

    /// Size of each pixel in terminal rows
    #[structopt(long, default_value = "1")]
    scale: usize,

    /// Make FX0A wait until a key is pressed
    #[structopt(long)]
    blocking_key_wait: bool,

    /// Drop sprite pixels outside the screen instead of wrapping them
    #[structopt(long)]
    clip_sprites: bool,

    /// Milliseconds a key stays pressed after its last key event.
    /// Should be longer than the terminal's key repeat delay
    #[structopt(long)]
    key_hold_ms: Option<u64>,

    /// Seed for the random number generator
    #[structopt(long)]
    seed: Option<u64>,
}

fn main() -> Result<(), Box<dyn Error>> {

    env_logger::init();

    // Get configuration and read input file
    let opt = Opt::from_args();
    log::info!("Executing {:?}", &opt.input);

    let config = Config {
        key_wait: if opt.blocking_key_wait { KeyWait::Blocking } else { KeyWait::LastPressed },
        sprite_edges: if opt.clip_sprites { SpriteEdges::Clip } else { SpriteEdges::Wrap },
        seed: opt.seed,
    };
    let mut emulator = Emulator::with_config(config);
    emulator.load_file(&opt.input)?;

    let key_hold = opt.key_hold_ms.map_or(DEFAULT_KEY_HOLD, Duration::from_millis);
    let key_manager = KeyManager::new();
    let mut host = Host::new(
        emulator,
        CrosstermInput::new(&key_manager, opt.input.clone(), key_hold),
        CrosstermOutput::new(opt.scale)?,
    );

    // Start execution
    host.run(Duration::from_secs(1) / opt.hz.max(1))?;

    Ok(())
}
