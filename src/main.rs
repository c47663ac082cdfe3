use std::path::PathBuf;

use structopt::StructOpt;

use chip_8_machine::machine::{Config, JumpOffset, Machine};

/// Run a CHIP-8 program without a screen or keyboard, then print the screen.
#[derive(StructOpt, Debug)]
#[structopt(name = "chip-8-machine")]
struct Opt {
    /// Wrap sprites around the screen edges instead of clipping them
    #[structopt(short, long)]
    wrap_around: bool,

    /// Number of instructions per timer tick
    #[structopt(short, long, default_value = "8")]
    speed: u32,

    /// Number of instructions to execute
    #[structopt(short = "n", long, default_value = "1000")]
    steps: u64,

    /// Seed for the random number generator
    #[structopt(long)]
    seed: Option<u64>,

    /// Keep only the low byte of BNNN jump targets, like some old interpreters
    #[structopt(long)]
    truncated_jump: bool,

    /// The program to execute
    #[structopt(parse(from_os_str))]
    input: PathBuf,
}

impl Opt {
    fn config(&self) -> Config {
        Config {
            wrap_around: self.wrap_around,
            speed: self.speed,
            jump_offset: if self.truncated_jump { JumpOffset::Truncated } else { JumpOffset::Full },
            seed: self.seed,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Get configuration and read input file
    let opt = Opt::from_args();
    log::info!("Executing {:?}", &opt.input);
    let program = std::fs::read(&opt.input)?;

    let mut machine = Machine::silent(&program, opt.config())?;

    for _ in 0..opt.steps {
        if machine.is_waiting_for_key() {
            log::info!("Program is waiting for a key, stopping after {} steps", machine.steps());
            break;
        }
        machine.step()?;
    }

    print!("{}", machine.framebuffer());
    Ok(())
}
