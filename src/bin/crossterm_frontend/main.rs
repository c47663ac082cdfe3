use std::path::PathBuf;
use std::sync::mpsc::channel;
use std::time::{Duration, Instant};

use structopt::StructOpt;

use chip_8_machine::machine::{ChannelSound, Config, JumpOffset, Machine};

mod crossterm_io;
mod key_buffer;
mod key_manager;
use crossterm::event::KeyCode;
use crossterm_io::{key_to_u8, CrosstermScreen, HeldKeys};
use key_manager::KeyManager;

const KEY_HOLD: Duration = Duration::from_millis(250);

/// The program options.
#[derive(StructOpt)]
struct Opt {
    /// Wrap sprites around the screen edges instead of clipping them
    #[structopt(short, long)]
    wrap_around: bool,

    /// Number of instructions per timer tick
    #[structopt(short, long, default_value = "8")]
    speed: u32,

    /// Instructions per second
    #[structopt(long, default_value = "480")]
    hz: u64,

    /// Keep only the low byte of BNNN jump targets, like some old interpreters
    #[structopt(long)]
    truncated_jump: bool,

    /// The program to execute
    #[structopt(parse(from_os_str))]
    input: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {

    env_logger::init();

    // Get configuration and read input file
    let opt = Opt::from_args();
    log::info!("Executing {:?}", &opt.input);
    let program = std::fs::read(&opt.input)?;

    let config = Config {
        wrap_around: opt.wrap_around,
        speed: opt.speed,
        jump_offset: if opt.truncated_jump { JumpOffset::Truncated } else { JumpOffset::Full },
        seed: None,
    };
    let (sound_sender, sound_receiver) = channel();
    let mut machine = Machine::new(&program, config, ChannelSound::new(sound_sender))?;

    let mut screen = CrosstermScreen::new()?;
    let key_manager = KeyManager::new();
    let mut held = HeldKeys::new(KEY_HOLD);
    let cycle = Duration::from_micros(1_000_000 / opt.hz.max(1));

    // Start execution
    'running: loop {
        let now = Instant::now();
        for key_code in key_manager.pressed_keys() {
            if key_code == KeyCode::Char('q') {
                break 'running;
            }
            if let Some(key) = key_to_u8(key_code) {
                if held.press(key, now) {
                    machine.key_down(key)?;
                }
            }
        }
        for key in held.expire(now) {
            machine.key_up(key)?;
        }

        machine.step()?;
        screen.refresh(machine.framebuffer())?;
        if sound_receiver.try_iter().count() > 0 {
            screen.bell()?;
        }

        std::thread::sleep(cycle);
    }

    Ok(())
}
