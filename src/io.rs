use crate::machine::screen::Screen;
use anyhow::Result;

/// Nanosecond duration between delay timer and sound timer "ticks".
///
/// Frequency: 60 Hz.
pub const TIME_BETWEEN_TICKS_NS: u64 = 10_u64.pow(9) / 60;

/// Something the host loop hears from the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Press(u8),
    Release(u8),
    Quit,
}

/// A frontend: where the display goes and where key presses come from.
pub trait Chip8Io {
    /// Can this frontend tell us when a key goes up?
    ///
    /// If not, the machine must run with `Config::auto_release_keys`.
    fn reports_key_releases(&self) -> bool;

    /// Drain whatever input arrived since the last call. Never blocks.
    fn poll_events(&mut self) -> Result<Vec<InputEvent>>;

    fn render(&mut self, screen: &Screen) -> Result<()>;
}

/// The usual layout: the 4x4 block of keys from `1` to `V` on a QWERTY
/// keyboard stands in for the hex keypad.
///
/// ```text
/// 1 2 3 C      1 2 3 4
/// 4 5 6 D  <-  Q W E R
/// 7 8 9 E      A S D F
/// A 0 B F      Z X C V
/// ```
pub fn keycode_to_chip8(c: char) -> Option<u8> {
    let key = match c.to_ascii_lowercase() {
        '1' => 0x1,
        '2' => 0x2,
        '3' => 0x3,
        '4' => 0xc,

        'q' => 0x4,
        'w' => 0x5,
        'e' => 0x6,
        'r' => 0xd,

        'a' => 0x7,
        's' => 0x8,
        'd' => 0x9,
        'f' => 0xe,

        'z' => 0xa,
        'x' => 0x0,
        'c' => 0xb,
        'v' => 0xf,

        _ => return None,
    };
    Some(key)
}
