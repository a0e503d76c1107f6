use std::{
    fmt::{self, Debug},
    ops::{Index, IndexMut, Range},
};

use crate::debug::DebugHexByte;

/// The 4 KiB CHIP-8 address space.
///
/// Indexing wraps at `LEN`, so address arithmetic done by a running program
/// can never reach outside the buffer.
#[derive(Clone)]
pub struct Mem {
    bytes: Box<[u8; Self::LEN as usize]>,
}

impl Mem {
    pub const LEN: u16 = 4 * 1024;
    pub const ROM_START: u16 = 0x0200;
    pub const FONT_START: u16 = 0x0050;

    /// Bytes at the top of memory that early interpreters kept for
    /// their own variables and the display refresh.
    pub const RESERVED_BYTES: u16 = 352;

    pub const FONT_LEN: usize = 16 * GLYPH_LEN;

    /// All zeros.
    pub fn new() -> Self {
        Self {
            bytes: Box::new([0u8; Self::LEN as usize]),
        }
    }

    /// Copy `src` into memory starting at `start`.
    ///
    /// Callers check bounds beforehand.
    pub(crate) fn copy_in(&mut self, start: u16, src: &[u8]) {
        let start = start as usize;
        self.bytes[start..][..src.len()].copy_from_slice(src);
    }

    /// The bytes in `range`, cut short at the end of memory.
    pub fn get(&self, range: Range<u16>) -> &[u8] {
        let end = range.end.min(Self::LEN) as usize;
        let start = (range.start as usize).min(end);
        &self.bytes[start..end]
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes[..]
    }
}

/// Height in bytes of one built-in hex digit sprite.
pub const GLYPH_LEN: usize = 5;

/// Bitmaps for the built-in hex digit sprites.
pub const DEFAULT_FONT: [[u8; GLYPH_LEN]; 16] = [
    [0xF0, 0x90, 0x90, 0x90, 0xF0],
    [0x20, 0x60, 0x20, 0x20, 0x70],
    [0xF0, 0x10, 0xF0, 0x80, 0xF0],
    [0xF0, 0x10, 0xF0, 0x10, 0xF0],
    [0x90, 0x90, 0xF0, 0x10, 0x10],
    [0xF0, 0x80, 0xF0, 0x10, 0xF0],
    [0xF0, 0x80, 0xF0, 0x90, 0xF0],
    [0xF0, 0x10, 0x20, 0x40, 0x40],
    [0xF0, 0x90, 0xF0, 0x90, 0xF0],
    [0xF0, 0x90, 0xF0, 0x10, 0xF0],
    [0xF0, 0x90, 0xF0, 0x90, 0x90],
    [0xE0, 0x90, 0xE0, 0x90, 0xE0],
    [0xF0, 0x80, 0x80, 0x80, 0xF0],
    [0xE0, 0x90, 0x90, 0x90, 0xE0],
    [0xF0, 0x80, 0xF0, 0x80, 0xF0],
    [0xF0, 0x80, 0xF0, 0x80, 0x80],
];

impl Default for Mem {
    fn default() -> Self {
        Self::new()
    }
}

impl Index<u16> for Mem {
    type Output = u8;

    fn index(&self, index: u16) -> &Self::Output {
        &self.bytes[(index % Self::LEN) as usize]
    }
}

impl IndexMut<u16> for Mem {
    fn index_mut(&mut self, index: u16) -> &mut Self::Output {
        &mut self.bytes[(index % Self::LEN) as usize]
    }
}

/// Lists bytes up to and including the last non-zero one.
impl Debug for Mem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let end = self.bytes.iter().rposition(|&x| x != 0).map_or(0, |i| i + 1);
        let entries = self.bytes[..end].iter().copied().map(DebugHexByte);

        f.debug_list().entries(entries).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_is_zeroed() {
        let mem = Mem::new();
        assert!(mem.as_slice().iter().all(|&b| b == 0));
        assert_eq!(mem.as_slice().len(), 4096);
    }

    #[test]
    fn index_wraps_at_end_of_memory() {
        let mut mem = Mem::new();
        mem[0x1000] = 0xab;
        assert_eq!(mem[0x0000], 0xab);
        mem[0xffff] = 0xcd;
        assert_eq!(mem[0x0fff], 0xcd);
    }

    #[test]
    fn copy_in_places_bytes() {
        let mut mem = Mem::new();
        mem.copy_in(0x200, &[1, 2, 3]);
        assert_eq!(mem.get(0x1ff..0x204), &[0, 1, 2, 3, 0]);
    }

    #[test]
    fn compact_debug_skips_trailing_zeros() {
        let mut mem = Mem::new();
        mem[1] = 0x0f;
        assert_eq!(format!("{mem:?}"), "[00, 0f]");
    }

    #[test]
    fn alternate_debug_is_one_byte_per_line() {
        let mut mem = Mem::new();
        mem[1] = 0x0f;
        assert_eq!(format!("{mem:#?}"), "[\n    00,\n    0f,\n]");
    }

    #[test]
    fn get_stops_at_end_of_memory() {
        let mut mem = Mem::new();
        mem[0xfff] = 0x12;

        assert_eq!(mem.get(0xffe..0x1005), &[0x00, 0x12]);
        assert!(mem.get(0x2000..0x2004).is_empty());
        assert!(mem.get(0x300..0x200).is_empty());
    }
}
