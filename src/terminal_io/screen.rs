use crate::machine::screen::Screen;
use std::fmt::{self, Display};

/// Helper for `TerminalIo::render`: two cells per pixel, one line per row.
pub struct DisplayScreen<'a>(pub &'a Screen);

impl<'a> Display for DisplayScreen<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.0.rows() {
            for &lit in row {
                f.write_str(if lit { "██" } else { "  " })?;
            }
            // \r\n to work correctly with raw-mode terminal.
            f.write_str("\r\n")?;
        }
        Ok(())
    }
}
