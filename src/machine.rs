pub mod mem;
pub mod screen;

use self::mem::{Mem, DEFAULT_FONT};
use self::screen::Screen;
use crate::{config::Config, error::Error};

/// Everything the CPU reads and writes that isn't a register: memory and
/// the display bitmap, laid out according to a `Config`.
#[derive(Debug, Clone)]
pub struct Machine {
    pub(crate) mem: Mem,
    pub(crate) screen: Screen,
    rom_start: u16,
    font_start: u16,
    max_rom_len: usize,
    rom_len: usize,
}

impl Machine {
    /// Zeroed memory with the built-in font copied in.
    pub fn new(config: &Config) -> Result<Self, Error> {
        let font_end = config.font_start as usize + Mem::FONT_LEN;
        if font_end > Mem::LEN as usize {
            return Err(Error::FontOutOfRange {
                offset: config.font_start,
            });
        }
        if config.rom_start >= Mem::LEN - Mem::RESERVED_BYTES {
            return Err(Error::RomStartOutOfRange {
                offset: config.rom_start,
            });
        }

        let mut machine = Self {
            mem: Mem::new(),
            screen: Screen::new(),
            rom_start: config.rom_start,
            font_start: config.font_start,
            max_rom_len: config.max_rom_len(),
            rom_len: 0,
        };
        let font: Vec<u8> = DEFAULT_FONT.into_iter().flatten().collect();
        machine.mem.copy_in(machine.font_start, &font);

        Ok(machine)
    }

    /// Replace the hex digit sprites. Must be exactly 80 bytes.
    pub fn load_font(&mut self, font: &[u8]) -> Result<(), Error> {
        if font.len() != Mem::FONT_LEN {
            return Err(Error::FontSize {
                len: font.len(),
                expected: Mem::FONT_LEN,
            });
        }
        self.mem.copy_in(self.font_start, font);
        Ok(())
    }

    /// Copy a program into memory at the configured ROM offset.
    pub fn load_rom(&mut self, rom: &[u8]) -> Result<(), Error> {
        if rom.len() > self.max_rom_len {
            return Err(Error::RomTooLarge {
                len: rom.len(),
                max: self.max_rom_len,
            });
        }
        self.mem.copy_in(self.rom_start, rom);
        self.rom_len = rom.len();
        Ok(())
    }

    pub fn mem(&self) -> &Mem {
        &self.mem
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn rom_start(&self) -> u16 {
        self.rom_start
    }

    pub fn rom_len(&self) -> usize {
        self.rom_len
    }

    pub fn font_start(&self) -> u16 {
        self.font_start
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn machine() -> Machine {
        Machine::new(&Config::default()).unwrap()
    }

    #[test]
    fn default_font_is_installed() {
        let m = machine();
        assert_eq!(m.mem.get(0x50..0x55), &[0xF0, 0x90, 0x90, 0x90, 0xF0]);
        assert_eq!(m.mem.get(0x9b..0xa0), &[0xF0, 0x80, 0xF0, 0x80, 0x80]);
        assert_eq!(m.mem[0xa0], 0);
    }

    #[test]
    fn load_font_replaces_font_region_only() {
        let mut m = machine();
        m.mem[0x200] = 0x12;
        let font: Vec<u8> = (0..80).collect();

        m.load_font(&font).unwrap();

        assert_eq!(m.mem.get(0x50..0xa0), &font[..]);
        assert_eq!(m.mem[0x4f], 0);
        assert_eq!(m.mem[0x200], 0x12);
    }

    #[test]
    fn load_font_rejects_wrong_length() {
        let mut m = machine();
        let before = m.mem.clone();

        for len in [0, 79, 81, 160] {
            let err = m.load_font(&vec![0xaa; len]).unwrap_err();
            assert_eq!(err, Error::FontSize { len, expected: 80 });
        }
        assert_eq!(m.mem.as_slice(), before.as_slice());
    }

    #[test]
    fn load_rom_copies_at_rom_start() {
        let mut m = machine();
        m.load_rom(&[0x00, 0xe0, 0x12, 0x00]).unwrap();

        assert_eq!(m.mem.get(0x200..0x204), &[0x00, 0xe0, 0x12, 0x00]);
        assert_eq!(m.rom_len(), 4);
    }

    #[test]
    fn load_rom_accepts_exactly_max_size() {
        let mut m = machine();
        let rom = vec![0x77; 3232];
        m.load_rom(&rom).unwrap();

        assert_eq!(m.mem.get(0x200..0xea0), &rom[..]);
        assert_eq!(m.mem[0xea0], 0);
    }

    #[test]
    fn load_rom_rejects_oversized() {
        let mut m = machine();
        let before = m.mem.clone();

        let err = m.load_rom(&vec![0x77; 3233]).unwrap_err();

        assert_eq!(err, Error::RomTooLarge { len: 3233, max: 3232 });
        assert_eq!(m.mem.as_slice(), before.as_slice());
        assert_eq!(m.rom_len(), 0);
    }

    #[test]
    fn custom_offsets_are_honoured() {
        let config = Config {
            rom_start: 0x300,
            font_start: 0x000,
            ..Config::default()
        };
        let mut m = Machine::new(&config).unwrap();
        m.load_rom(&[0xab]).unwrap();

        assert_eq!(m.mem[0x000], 0xF0);
        assert_eq!(m.mem[0x300], 0xab);
        assert_eq!(m.mem[0x200], 0);
    }

    #[test]
    fn bad_layout_is_rejected() {
        let font = Config {
            font_start: 0x0fc0,
            ..Config::default()
        };
        assert_eq!(
            Machine::new(&font).unwrap_err(),
            Error::FontOutOfRange { offset: 0x0fc0 }
        );

        let rom = Config {
            rom_start: 0x0ea0,
            ..Config::default()
        };
        assert_eq!(
            Machine::new(&rom).unwrap_err(),
            Error::RomStartOutOfRange { offset: 0x0ea0 }
        );
    }
}
