use crate::machine::mem::Mem;

/// Machine configuration. Fixed once a `Chip8` has been built from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Instructions executed per second.
    pub clock_speed: u32,

    /// Display refreshes per second.
    pub refresh_rate: u32,

    pub rom_start: u16,
    pub font_start: u16,

    /// Treat every key press as if it were immediately followed by a release
    /// once the program has observed it.
    ///
    /// Needed for input devices that never report key releases (most
    /// terminals). Changes the behaviour of `EX9E`, `EXA1` and `FX0A`.
    pub auto_release_keys: bool,
}

impl Config {
    pub const DEFAULT_CLOCK_SPEED: u32 = 900;
    pub const DEFAULT_REFRESH_RATE: u32 = 60;

    /// Largest ROM that fits between `rom_start` and the reserved area.
    pub fn max_rom_len(&self) -> usize {
        (Mem::LEN as usize - Mem::RESERVED_BYTES as usize).saturating_sub(self.rom_start as usize)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            clock_speed: Self::DEFAULT_CLOCK_SPEED,
            refresh_rate: Self::DEFAULT_REFRESH_RATE,
            rom_start: Mem::ROM_START,
            font_start: Mem::FONT_START,
            auto_release_keys: false,
        }
    }
}
