pub mod config;
pub mod cpu;
pub mod debug;
pub mod error;
pub mod host;
pub mod io;
pub mod machine;
pub mod terminal_io;
#[cfg(feature = "window")]
pub mod window_io;

pub use config::Config;
pub use cpu::{Cpu, Step};
pub use error::{Error, StackError};
pub use io::{Chip8Io, InputEvent};
pub use machine::{screen::Screen, Machine};

use debug::Dump;
use rand::{rngs::StdRng, SeedableRng};

/// A complete CHIP-8: machine state plus the CPU that runs it.
///
/// Nothing happens on its own. The host calls `step`, `tick_timers` and reads
/// `screen` at whatever rates it likes (see `host::run`).
#[derive(Debug, Clone)]
pub struct Chip8 {
    config: Config,
    machine: Machine,
    cpu: Cpu,
}

impl Chip8 {
    /// Random numbers for `CXNN` come from an entropy-seeded generator.
    pub fn new(config: Config) -> Result<Self, Error> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Like `new`, but `CXNN` produces the same sequence on every run.
    pub fn with_seed(config: Config, seed: u64) -> Result<Self, Error> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: Config, rng: StdRng) -> Result<Self, Error> {
        Ok(Self {
            machine: Machine::new(&config)?,
            cpu: Cpu::new(&config, rng),
            config,
        })
    }

    pub fn load_font(&mut self, font: &[u8]) -> Result<(), Error> {
        self.machine.load_font(font)
    }

    pub fn load_rom(&mut self, rom: &[u8]) -> Result<(), Error> {
        self.machine.load_rom(rom)
    }

    /// Execute one instruction.
    pub fn step(&mut self) -> Step {
        self.cpu.step(&mut self.machine)
    }

    /// Call at 60 Hz.
    pub fn tick_timers(&mut self) {
        self.cpu.tick_timers();
    }

    pub fn press_key(&mut self, k: u8) {
        self.cpu.press_key(k);
    }

    pub fn release_key(&mut self, k: u8) {
        self.cpu.release_key(k);
    }

    pub fn screen(&self) -> &Screen {
        self.machine.screen()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    pub fn machine(&self) -> &Machine {
        &self.machine
    }

    pub fn dump(&self) -> Dump<'_> {
        Dump(self)
    }
}
