/// State of the 16-key hex keypad, as seen by the running program.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Keypad {
    pressed: [bool; 16],

    /// Most recent press not yet consumed by `FX0A`.
    ///
    /// Only tracked in auto-release mode.
    last_pressed: Option<u8>,

    /// Most recent release not yet consumed by `FX0A`.
    last_released: Option<u8>,

    auto_release: bool,
}

impl Keypad {
    pub fn new(auto_release: bool) -> Self {
        Self {
            auto_release,
            ..Self::default()
        }
    }

    /// Keycodes are `0x0..=0xf`; anything else is ignored.
    pub fn press(&mut self, k: u8) {
        if k > 0xf {
            return;
        }
        self.pressed[k as usize] = true;
        if self.auto_release {
            self.last_pressed = Some(k);
        }
    }

    /// Keycodes are `0x0..=0xf`; anything else is ignored.
    pub fn release(&mut self, k: u8) {
        if k > 0xf {
            return;
        }
        self.pressed[k as usize] = false;
        self.last_released = Some(k);
    }

    /// Out-of-range keycodes are never pressed.
    pub fn is_pressed(&self, k: u8) -> bool {
        k <= 0xf && self.pressed[k as usize]
    }

    /// Take the key event `FX0A` is waiting for, if one has happened.
    ///
    /// Without auto-release this is the last release. With auto-release it is
    /// the last press, which also gets released on the spot.
    pub fn take_key_event(&mut self) -> Option<u8> {
        if !self.auto_release {
            return self.last_released.take();
        }

        let k = self.last_pressed.take()?;
        self.release(k);
        Some(k)
    }

    pub fn auto_release(&self) -> bool {
        self.auto_release
    }

    pub fn pressed(&self) -> &[bool; 16] {
        &self.pressed
    }
}
