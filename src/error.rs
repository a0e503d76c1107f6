use thiserror::Error;

/// Rejected setup of a machine: bad layout or a font/ROM image of the wrong size.
///
/// Whenever one of these is returned, memory is left exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("font must be exactly {expected} bytes, got {len}")]
    FontSize { len: usize, expected: usize },

    #[error("ROM is too large for memory ({len} bytes), must be at most {max} bytes")]
    RomTooLarge { len: usize, max: usize },

    #[error("font offset 0x{offset:04x} does not leave room for the font in memory")]
    FontOutOfRange { offset: u16 },

    #[error("ROM offset 0x{offset:04x} lies inside the reserved area")]
    RomStartOutOfRange { offset: u16 },
}

/// Call stack misuse by the running program. Never fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StackError {
    #[error("stack overflow")]
    Overflow,

    #[error("stack underflow")]
    Underflow,
}
