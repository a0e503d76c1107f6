mod keypad;
mod regs;
mod stack;

pub use self::keypad::Keypad;
pub use self::regs::Regs;
pub use self::stack::{Stack, CAPACITY as STACK_CAPACITY};

use crate::{
    config::Config,
    error::StackError,
    machine::{mem::GLYPH_LEN, screen::Point, Machine},
};
use log::{error, trace};
use rand::{rngs::StdRng, Rng};

/// Outcome of a single `Cpu::step`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Executed,

    /// `FX0A` is still waiting for a key. The same instruction will be
    /// fetched again by the next step.
    Blocked,

    /// A call or return misused the stack. The instruction did nothing.
    Fault(StackError),
}

/// The CHIP-8 interpreter proper. Holds every register; memory and the
/// display live in the `Machine` passed to each call.
#[derive(Debug, Clone)]
pub struct Cpu {
    pc: u16,
    i: u16,
    stack: Stack,
    v: Regs,
    dt: u8,
    st: u8,
    keypad: Keypad,
    font_start: u16,
    rng: StdRng,
}

impl Cpu {
    pub fn new(config: &Config, rng: StdRng) -> Self {
        Self {
            pc: config.rom_start,
            i: 0,
            stack: Stack::new(),
            v: Regs::new(),
            dt: 0,
            st: 0,
            keypad: Keypad::new(config.auto_release_keys),
            font_start: config.font_start,
            rng,
        }
    }

    /// Fetch, decode and execute one instruction.
    pub fn step(&mut self, m: &mut Machine) -> Step {
        let j = m.mem[self.pc];
        let k = m.mem[self.pc.wrapping_add(1)];
        let instr = u16::from_be_bytes([j, k]);
        let old_pc = self.pc;
        trace!("{old_pc:04x}: {instr:04x}");
        self.pc = self.pc.wrapping_add(2);

        let [op, x, y, n] = nibbles_from_u16(instr);
        let addr = instr & 0x0fff;

        match op {
            0x0 => match instr {
                0x00e0 => m.screen.clear(),
                0x00ee => match self.stack.pop() {
                    Ok(ret) => self.pc = ret,
                    Err(e) => return fault(e, old_pc),
                },
                // 0NNN (machine code routine) is not supported.
                _ => (),
            },
            0x1 => self.pc = addr,
            0x2 => {
                if let Err(e) = self.stack.push(self.pc) {
                    return fault(e, old_pc);
                }
                self.pc = addr;
            }
            0x3 => {
                if self.v[x] == k {
                    self.skip();
                }
            }
            0x4 => {
                if self.v[x] != k {
                    self.skip();
                }
            }
            0x5 => {
                if self.v[x] == self.v[y] {
                    self.skip();
                }
            }
            0x6 => self.v[x] = k,
            0x7 => self.v[x] = self.v[x].wrapping_add(k),
            0x8 => self.alu(x, y, n),
            0x9 => {
                if self.v[x] != self.v[y] {
                    self.skip();
                }
            }
            0xa => self.i = addr,
            0xb => self.pc = addr + self.v[0] as u16,
            0xc => self.v[x] = self.rng.gen::<u8>() & k,
            0xd => self.draw_sprite(m, x, y, n),
            0xe => self.skip_on_key(x, k),
            0xf => match k {
                0x07 => self.v[x] = self.dt,
                0x0a => match self.keypad.take_key_event() {
                    Some(key) => self.v[x] = key,
                    None => {
                        // Run this instruction again until a key shows up.
                        self.pc = old_pc;
                        return Step::Blocked;
                    }
                },
                0x15 => self.dt = self.v[x],
                0x18 => self.st = self.v[x],
                0x1e => self.i = self.i.wrapping_add(self.v[x] as u16),
                0x29 => {
                    let glyph = self.v[x] as u16 * GLYPH_LEN as u16;
                    self.i = self.font_start.wrapping_add(glyph);
                }
                0x33 => {
                    let bcd = bcd_from_u8(self.v[x]);
                    for (offset, digit) in (0..).zip(bcd) {
                        m.mem[self.i.wrapping_add(offset)] = digit;
                    }
                }
                0x55 => {
                    // Write registers to memory.
                    for reg in 0..=x {
                        m.mem[self.i.wrapping_add(reg as u16)] = self.v[reg];
                    }
                }
                0x65 => {
                    // Read memory into registers.
                    for reg in 0..=x {
                        self.v[reg] = m.mem[self.i.wrapping_add(reg as u16)];
                    }
                }
                _ => (),
            },
            0x10.. => unreachable!(),
        }

        Step::Executed
    }

    /// `8XYN`: register-to-register arithmetic and logic.
    ///
    /// The flag is written before the result, so `VF` as a destination ends
    /// up holding the result.
    fn alu(&mut self, x: u8, y: u8, n: u8) {
        let vx = self.v[x];
        let vy = self.v[y];

        match n {
            0x0 => self.v[x] = vy,
            0x1 => self.v[x] = vx | vy,
            0x2 => self.v[x] = vx & vy,
            0x3 => self.v[x] = vx ^ vy,
            0x4 => {
                let (sum, carry) = vx.overflowing_add(vy);
                self.v[Regs::FLAG] = carry as u8;
                self.v[x] = sum;
            }
            0x5 => {
                self.v[Regs::FLAG] = (vx > vy) as u8;
                self.v[x] = vx.wrapping_sub(vy);
            }
            0x6 => {
                // Legacy shift: the source is VY.
                self.v[Regs::FLAG] = vy & 1;
                self.v[x] = vy >> 1;
            }
            0x7 => {
                // y - x
                self.v[Regs::FLAG] = (vy > vx) as u8;
                self.v[x] = vy.wrapping_sub(vx);
            }
            0xe => {
                self.v[Regs::FLAG] = vy >> 7;
                self.v[x] = vy << 1;
            }
            _ => (),
        }
    }

    fn draw_sprite(&mut self, m: &mut Machine, x: u8, y: u8, n: u8) {
        debug_assert!(n <= 0xf);

        let xy = Point::from((self.v[x], self.v[y])).wrap();

        let mut sprite = [0u8; 0xf];
        for (row, addr) in sprite[..n as usize].iter_mut().zip(0..) {
            *row = m.mem[self.i.wrapping_add(addr)];
        }

        self.v[Regs::FLAG] = m.screen.draw_sprite(xy, &sprite[..n as usize]) as u8;
    }

    /// `EX9E` / `EXA1`.
    fn skip_on_key(&mut self, x: u8, k: u8) {
        let key = self.v[x];
        if key > 0xf {
            return;
        }
        let pressed = self.keypad.is_pressed(key);

        match k {
            0x9e if pressed => {
                self.skip();
                if self.keypad.auto_release() {
                    self.keypad.release(key);
                }
            }
            0xa1 if !pressed => self.skip(),
            0xa1 if self.keypad.auto_release() => self.keypad.release(key),
            _ => (),
        }
    }

    fn skip(&mut self) {
        self.pc = self.pc.wrapping_add(2);
    }

    /// Count both timers down by one. Call at 60 Hz.
    pub fn tick_timers(&mut self) {
        self.dt = self.dt.saturating_sub(1);
        self.st = self.st.saturating_sub(1);
    }

    pub fn press_key(&mut self, k: u8) {
        self.keypad.press(k);
    }

    pub fn release_key(&mut self, k: u8) {
        self.keypad.release(k);
    }

    pub fn pc(&self) -> u16 {
        self.pc
    }

    pub fn i(&self) -> u16 {
        self.i
    }

    pub fn v(&self) -> &Regs {
        &self.v
    }

    pub fn delay_timer(&self) -> u8 {
        self.dt
    }

    pub fn sound_timer(&self) -> u8 {
        self.st
    }

    pub fn stack(&self) -> &Stack {
        &self.stack
    }

    pub fn keypad(&self) -> &Keypad {
        &self.keypad
    }
}

fn fault(e: StackError, pc: u16) -> Step {
    error!("{e} at pc=0x{pc:04x}, instruction ignored");
    Step::Fault(e)
}

/// Convert x to "big endian" binary coded decimal:
/// [hundreds, tens, ones]
fn bcd_from_u8(x: u8) -> [u8; 3] {
    [x / 100, x / 10 % 10, x % 10]
}

/// Big endian byte (and bit) order.
fn nibbles_from_u16(x: u16) -> [u8; 4] {
    let a = (x & 0xf000) >> 12;
    let b = (x & 0x0f00) >> 8;
    let c = (x & 0x00f0) >> 4;
    let d = x & 0x000f;
    [a, b, c, d].map(|n| n as u8)
}
