use std::error::Error;
use std::path::PathBuf;
use std::time::Duration;

use structopt::StructOpt;

use chip8_vm::emulator::config::{Config, KeyWait, SpriteEdges};
use chip8_vm::emulator::Emulator;

/// Run a program without a screen or keyboard, then print what it drew.
#[derive(StructOpt)]
struct Opt {
    /// The program to execute
    #[structopt(parse(from_os_str))]
    input: PathBuf,

    /// Number of cycles to run
    #[structopt(long, default_value = "1000")]
    cycles: u64,

    /// Cycles per second, or 0 to run as fast as possible
    #[structopt(long, default_value = "0")]
    hz: u32,

    /// Make FX0A wait until a key is pressed
    #[structopt(long)]
    blocking_key_wait: bool,

    /// Drop sprite pixels outside the screen instead of wrapping them
    #[structopt(long)]
    clip_sprites: bool,

    /// Seed for the random number generator
    #[structopt(long)]
    seed: Option<u64>,
}

fn main() -> Result<(), Box<dyn Error>> {
    pretty_env_logger::init();

    // Get configuration and read input file
    let opt = Opt::from_args();
    log::info!("Executing {:?} for {} cycles", &opt.input, opt.cycles);

    let mut emulator = Emulator::with_config(Config {
        key_wait: if opt.blocking_key_wait { KeyWait::Blocking } else { KeyWait::LastPressed },
        sprite_edges: if opt.clip_sprites { SpriteEdges::Clip } else { SpriteEdges::Wrap },
        seed: opt.seed,
    });
    emulator.load_file(&opt.input)?;

    // Start execution
    for _ in 0..opt.cycles {
        emulator.step();
        if opt.hz > 0 {
            std::thread::sleep(Duration::from_secs(1) / opt.hz);
        }
    }

    emulator.dump();
    print!("{}", emulator.framebuffer());

    Ok(())
}
