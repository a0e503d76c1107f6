//! Helpers for Debug impls, and the full-machine diagnostic dump.

use crate::{
    cpu::STACK_CAPACITY,
    machine::{mem::Mem, screen::WIDTH},
    Chip8,
};
use crossterm::style::{Color, Stylize};
use std::{
    fmt::{self, Debug, Display},
    ops::Range,
};

pub(crate) struct DebugHexByte(pub u8);

impl Debug for DebugHexByte {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02x}", self.0)
    }
}

/// Write a row of hex-formatted bytes, with a wider gap after the 8th.
pub(crate) fn write_row(f: &mut fmt::Formatter<'_>, line: &[u8]) -> fmt::Result {
    for (i, byte) in line.iter().enumerate() {
        match i {
            0 => {}
            8 => write!(f, "  ")?,
            _ => write!(f, " ")?,
        }
        write!(f, "{byte:02x}")?;
    }
    Ok(())
}

/// Human-readable rendering of the whole machine: configuration, registers,
/// stack, keys, display and memory.
///
/// Memory regions are colour-coded for a terminal. Format with `{:#}` to get
/// plain text instead.
pub struct Dump<'a>(pub(crate) &'a Chip8);

impl Display for Dump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let colour = !f.alternate();
        let chip8 = self.0;
        let config = chip8.config();
        let cpu = chip8.cpu();
        let machine = chip8.machine();

        writeln!(f, "CONFIG:")?;
        writeln!(f, "    clock speed:  {} Hz", config.clock_speed)?;
        writeln!(f, "    refresh rate: {} Hz", config.refresh_rate)?;
        writeln!(f, "    font start:   0x{:04x}", config.font_start)?;
        writeln!(
            f,
            "    ROM start:    0x{:04x} ({} bytes loaded)",
            config.rom_start,
            machine.rom_len()
        )?;
        writeln!(f, "    auto-release: {}", config.auto_release_keys)?;

        writeln!(f, "CPU:")?;
        writeln!(f, "    pc: 0x{:04x}  I: 0x{:04x}", cpu.pc(), cpu.i())?;
        writeln!(f, "    DT: {:02x}  ST: {:02x}", cpu.delay_timer(), cpu.sound_timer())?;
        write!(f, "    ")?;
        for r in 0..16 {
            write!(f, "V{r:X} ")?;
        }
        writeln!(f)?;
        write!(f, "    ")?;
        for value in cpu.v().as_array() {
            write!(f, "{value:02x} ")?;
        }
        writeln!(f)?;

        let stack = cpu.stack();
        write!(f, "    stack ({}/{STACK_CAPACITY}):", stack.len())?;
        for addr in stack.as_slice() {
            write!(f, " {addr:04x}")?;
        }
        writeln!(f)?;

        write!(f, "    keys down:")?;
        for (k, _) in cpu.keypad().pressed().iter().enumerate().filter(|&(_, &p)| p) {
            write!(f, " {k:X}")?;
        }
        writeln!(f)?;

        writeln!(f, "SCREEN:")?;
        writeln!(f, "┌{}┐", "──".repeat(WIDTH))?;
        for row in machine.screen().rows() {
            write!(f, "│")?;
            for &lit in row {
                write!(f, "{}", if lit { "██" } else { "  " })?;
            }
            writeln!(f, "│")?;
        }
        writeln!(f, "└{}┘", "──".repeat(WIDTH))?;

        writeln!(f, "RAM:")?;
        let regions = Regions {
            font: machine.font_start()..machine.font_start() + Mem::FONT_LEN as u16,
            rom: machine.rom_start()..machine.rom_start() + machine.rom_len() as u16,
            reserved: Mem::LEN - Mem::RESERVED_BYTES,
            pc: cpu.pc(),
        };
        for (i, line) in machine.mem().as_slice().chunks_exact(16).enumerate() {
            write!(f, "{:04x}:", i * 16)?;
            for (j, &byte) in line.iter().enumerate() {
                let addr = (i * 16 + j) as u16;
                let sep = if j == 8 { "  " } else { " " };
                let text = format!("{byte:02x}");
                match regions.colour(addr).filter(|_| colour) {
                    Some(c) => write!(f, "{sep}{}", text.with(c))?,
                    None => write!(f, "{sep}{text}")?,
                }
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

/// Helper for `Dump`: which colour, if any, an address is shown in.
struct Regions {
    font: Range<u16>,
    rom: Range<u16>,
    reserved: u16,
    pc: u16,
}

impl Regions {
    fn colour(&self, addr: u16) -> Option<Color> {
        if addr == self.pc || addr == self.pc.wrapping_add(1) {
            Some(Color::Yellow)
        } else if self.font.contains(&addr) {
            Some(Color::Magenta)
        } else if self.rom.contains(&addr) {
            Some(Color::Cyan)
        } else if addr < self.rom.start {
            Some(Color::Red)
        } else if addr >= self.reserved {
            Some(Color::Green)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Config;

    struct Row<'a>(&'a [u8]);

    impl Debug for Row<'_> {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write_row(f, self.0)
        }
    }

    #[test]
    fn row_has_gap_after_eight_bytes() {
        let line: Vec<u8> = (0..16).collect();
        assert_eq!(
            format!("{:?}", Row(&line)),
            "00 01 02 03 04 05 06 07  08 09 0a 0b 0c 0d 0e 0f"
        );
    }

    #[test]
    fn plain_dump_lists_state() {
        let mut chip8 = Chip8::with_seed(Config::default(), 1).unwrap();
        chip8.load_rom(&[0x6a, 0x42, 0x22, 0x00]).unwrap();
        chip8.step();
        chip8.step();

        let dump = format!("{:#}", chip8.dump());

        assert!(dump.contains("pc: 0x0200  I: 0x0000"));
        assert!(dump.contains("(4 bytes loaded)"));
        assert!(dump.contains("stack (1/16): 0204"));
        assert!(dump.contains("0200: 6a 42 22 00"));
        assert!(!dump.contains('\u{1b}'), "plain dump must not contain escapes");
        // Left and right border on each of the 32 rows.
        assert_eq!(dump.matches('│').count(), 64);
    }
}
