use anyhow::{Context, Result};
use chip8_vm::{host, terminal_io::TerminalIo, Chip8, Chip8Io, Config};
use clap::Parser;
use log::{info, warn};
use std::{fs, path::PathBuf};

/// Run a CHIP-8 ROM.
///
/// Keypad:   1 2 3 4 / Q W E R / A S D F / Z X C V.
/// Esc or Enter quits.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Path to the ROM file to run.
    rom: PathBuf,

    /// Draw the display in the terminal instead of a window.
    #[arg(short, long = "terminal-mode")]
    terminal: bool,

    /// Custom font file (exactly 80 bytes).
    #[arg(short, long, value_name = "PATH")]
    font: Option<PathBuf>,

    /// Instructions executed per second.
    #[arg(
        short,
        long,
        value_name = "HZ",
        default_value_t = Config::DEFAULT_CLOCK_SPEED,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    clock_speed: u32,

    /// Display refreshes per second.
    #[arg(
        short,
        long,
        value_name = "HZ",
        default_value_t = Config::DEFAULT_REFRESH_RATE,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    refresh_rate: u32,

    /// Seed for the random number generator, for reproducible runs.
    #[arg(long)]
    seed: Option<u64>,

    /// Print the full machine state after exiting.
    #[arg(long)]
    dump: bool,
}

fn main() -> Result<()> {
    simple_logger::SimpleLogger::new()
        .with_level(log::LevelFilter::Warn)
        .env()
        .init()?;

    let args = Args::parse();

    let rom = fs::read(&args.rom).with_context(|| format!("failed to read ROM {:?}", args.rom))?;
    let font = args.font.as_ref().and_then(|path| match fs::read(path) {
        Ok(font) => Some(font),
        Err(e) => {
            warn!("failed to read font {path:?}: {e}; continuing with default font");
            None
        }
    });

    let mut io = open_frontend(args.terminal)?;

    let config = Config {
        clock_speed: args.clock_speed,
        refresh_rate: args.refresh_rate,
        auto_release_keys: !io.reports_key_releases(),
        ..Config::default()
    };
    let mut chip8 = match args.seed {
        Some(seed) => Chip8::with_seed(config, seed)?,
        None => Chip8::new(config)?,
    };

    if let Some(font) = font {
        if let Err(e) = chip8.load_font(&font) {
            warn!("font was not loaded ({e}); continuing with default font");
        }
    }
    chip8.load_rom(&rom).context("failed to load ROM")?;
    info!("loaded {} byte ROM from {:?}", rom.len(), args.rom);

    let result = host::run(&mut chip8, io.as_mut());

    // Restore the terminal before printing anything else.
    drop(io);
    let summary = result?;
    info!("executed {} instructions", summary.steps);
    if summary.faults > 0 {
        warn!("{} calls or returns were ignored after stack faults", summary.faults);
    }

    if args.dump {
        println!("{}", chip8.dump());
    }

    Ok(())
}

#[cfg(feature = "window")]
fn open_frontend(terminal: bool) -> Result<Box<dyn Chip8Io>> {
    if terminal {
        return Ok(Box::new(TerminalIo::setup()?));
    }
    Ok(Box::new(chip8_vm::window_io::WindowIo::setup()?))
}

#[cfg(not(feature = "window"))]
fn open_frontend(terminal: bool) -> Result<Box<dyn Chip8Io>> {
    if !terminal {
        warn!("built without the `window` feature; using the terminal");
    }
    Ok(Box::new(TerminalIo::setup()?))
}
