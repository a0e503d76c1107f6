mod keyboard;
mod screen;

use self::keyboard::Keyboard;
use self::screen::DisplayScreen;
use crate::{
    io::{Chip8Io, InputEvent},
    machine::screen::Screen,
};
use anyhow::{Context, Result};
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    style::Print,
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand, QueueableCommand,
};
use log::{info, warn, LevelFilter};
use std::io::{self, Write};

/// A `crossterm`-based implementation of `Chip8Io`.
///
/// Each CHIP-8 pixel takes two character cells, so the terminal needs to be
/// at least 128x32.
///
/// Logging is switched off while this is alive.
#[derive(Debug)]
pub struct TerminalIo {
    keyboard: Keyboard,
    enhanced_keyboard: bool,
    last_frame: Option<Screen>,
    _quiet: LogPause,
}

impl TerminalIo {
    /// Switch the terminal into raw mode on the alternate screen.
    /// Everything is put back when this is dropped.
    pub fn setup() -> Result<Self> {
        // Without the keyboard enhancement protocol, terminals only ever
        // report key presses.
        let enhanced_keyboard = terminal::supports_keyboard_enhancement().unwrap_or(false);
        if !enhanced_keyboard {
            warn!("terminal does not report key releases, keys will auto-release");
        }
        let (cols, rows) = terminal::size()?;
        info!("terminal is {cols}x{rows}");

        terminal::enable_raw_mode().context("failed to enable raw mode")?;

        // From here on, an early return drops `this`, which restores the
        // terminal.
        let mut this = Self {
            keyboard: Keyboard::default(),
            enhanced_keyboard: false,
            last_frame: None,
            _quiet: LogPause::new(),
        };

        if enhanced_keyboard {
            io::stdout().execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))?;
            this.enhanced_keyboard = true;
        }

        io::stdout()
            .execute(EnterAlternateScreen)?
            .execute(Hide)?
            .execute(Clear(ClearType::All))?;

        Ok(this)
    }
}

/// Turns logging off until dropped, then puts the previous level back.
#[derive(Debug)]
struct LogPause {
    previous: LevelFilter,
}

impl LogPause {
    fn new() -> Self {
        let previous = log::max_level();
        log::set_max_level(LevelFilter::Off);
        Self { previous }
    }
}

impl Drop for LogPause {
    fn drop(&mut self) {
        log::set_max_level(self.previous);
    }
}

/// Undo what `setup` did to the screen and keyboard.
fn write_restore(out: &mut impl Write, enhanced_keyboard: bool) -> io::Result<()> {
    out.queue(Show)?.queue(LeaveAlternateScreen)?;
    if enhanced_keyboard {
        out.queue(PopKeyboardEnhancementFlags)?;
    }
    out.flush()
}

impl Chip8Io for TerminalIo {
    fn reports_key_releases(&self) -> bool {
        self.enhanced_keyboard
    }

    fn poll_events(&mut self) -> Result<Vec<InputEvent>> {
        self.keyboard.poll()
    }

    fn render(&mut self, screen: &Screen) -> Result<()> {
        // Skip identical frames; redrawing the whole terminal is slow.
        if self.last_frame.as_ref() == Some(screen) {
            return Ok(());
        }

        io::stdout()
            .execute(MoveTo(0, 0))?
            .execute(Print(DisplayScreen(screen)))?;
        self.last_frame = Some(screen.clone());
        Ok(())
    }
}

impl Drop for TerminalIo {
    fn drop(&mut self) {
        fn try_drop(this: &mut TerminalIo) -> Result<()> {
            // Reset the terminal mode. Otherwise it gets all wonky, and you
            // have to close it and open a new one.
            write_restore(&mut io::stdout(), this.enhanced_keyboard)?;
            terminal::disable_raw_mode()?;

            // After leaving the Alternate Screen in the terminal, the text goes away,
            // so we print it again here. This lets us see the last state the screen was
            // in when the emulator exited.
            if let Some(screen) = &this.last_frame {
                print!("{screen:?}");
            }
            Ok(())
        }

        // Ignore errors.
        try_drop(self).ok();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn restore_shows_cursor_and_leaves_alternate_screen() {
        let mut out = Vec::new();
        write_restore(&mut out, false).unwrap();
        let out = String::from_utf8(out).unwrap();

        assert!(out.contains("\x1b[?25h"));
        assert!(out.contains("\x1b[?1049l"));
        assert!(!out.contains("\x1b[<1u"));
    }

    #[test]
    fn restore_pops_keyboard_flags_only_when_pushed() {
        let mut out = Vec::new();
        write_restore(&mut out, true).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("\x1b[<1u"));
    }

    #[test]
    fn logging_is_paused_while_terminal_is_in_use() {
        log::set_max_level(LevelFilter::Debug);

        let pause = LogPause::new();
        assert_eq!(log::max_level(), LevelFilter::Off);

        drop(pause);
        assert_eq!(log::max_level(), LevelFilter::Debug);
    }
}
