use std::{
    fmt::{self, Debug},
    ops::{Index, IndexMut},
};

use crate::debug;

/// General purpose registers V0 through VF.
#[derive(Clone, PartialEq, Eq)]
pub struct Regs {
    regs: [u8; 16],
}

impl Regs {
    pub const FLAG: u8 = 0xf;

    pub fn new() -> Self {
        Self { regs: [0; 16] }
    }

    pub fn as_array(&self) -> &[u8; 16] {
        &self.regs
    }
}

impl Default for Regs {
    fn default() -> Self {
        Self::new()
    }
}

impl Index<u8> for Regs {
    type Output = u8;

    fn index(&self, index: u8) -> &Self::Output {
        &self.regs[index as usize]
    }
}

impl IndexMut<u8> for Regs {
    fn index_mut(&mut self, index: u8) -> &mut Self::Output {
        &mut self.regs[index as usize]
    }
}

impl Debug for Regs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[ ")?;
        debug::write_row(f, &self.regs)?;
        write!(f, " ]")?;
        Ok(())
    }
}
