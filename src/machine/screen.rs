use std::{
    fmt::{self, Debug},
    ops::Add,
};

pub const DIMS: Point = Point { x: 64, y: 32 };
pub const WIDTH: usize = DIMS.x as usize;
pub const HEIGHT: usize = DIMS.y as usize;

/// Monochrome 64x32 bitmap, stored flat in row-major order.
#[derive(Clone, PartialEq, Eq)]
pub struct Screen {
    pixels: [bool; WIDTH * HEIGHT],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub x: u8,
    pub y: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawSprite {
    NoCollision,
    Collision,
}

impl Screen {
    pub fn new() -> Self {
        Self {
            pixels: [false; WIDTH * HEIGHT],
        }
    }

    pub fn clear(&mut self) {
        self.pixels = [false; WIDTH * HEIGHT];
    }

    /// XOR-plot `sprite` with its top-left corner at `top_left`.
    ///
    /// Each byte is one row of 8 pixels, most significant bit leftmost.
    /// An off-screen `top_left` wraps around; the sprite body is clipped at
    /// the right and bottom edges, never wrapped.
    pub fn draw_sprite(&mut self, top_left: Point, sprite: &[u8]) -> DrawSprite {
        let top_left = top_left.wrap();
        let mut collision = false;

        for (dy, &row) in sprite.iter().enumerate() {
            for dx in 0..8 {
                let pos = top_left + (dx, dy as u8).into();

                // Quirk: ignore pixels that would wrap.
                // This causes sprites drawn at the borders to be "clipped".
                if !pos.in_bounds() {
                    continue;
                }

                let bit = 1 << (7 - dx);
                if row & bit != 0 && self.flip(pos) {
                    collision = true;
                }
            }
        }

        if collision {
            DrawSprite::Collision
        } else {
            DrawSprite::NoCollision
        }
    }

    /// Return true if the pixel was lit before the flip.
    fn flip(&mut self, p: Point) -> bool {
        let pixel = &mut self.pixels[p.offset()];
        let was_high = *pixel;
        *pixel ^= true;

        was_high
    }

    pub fn get(&self, p: Point) -> bool {
        p.in_bounds() && self.pixels[p.offset()]
    }

    /// The whole bitmap, row-major.
    pub fn pixels(&self) -> &[bool] {
        &self.pixels
    }

    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        self.pixels.chunks_exact(WIDTH)
    }
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        for row in self.rows() {
            for &lit in row {
                let c = if lit { '#' } else { '.' };
                write!(f, "{c}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl From<(u8, u8)> for Point {
    fn from((x, y): (u8, u8)) -> Self {
        Self { x, y }
    }
}

impl Point {
    /// Bring an arbitrary register-supplied coordinate onto the screen.
    #[must_use]
    pub fn wrap(self) -> Self {
        Self {
            x: self.x % DIMS.x,
            y: self.y % DIMS.y,
        }
    }

    pub fn in_bounds(self) -> bool {
        self.x < DIMS.x && self.y < DIMS.y
    }

    fn offset(self) -> usize {
        self.y as usize * WIDTH + self.x as usize
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            x: self.x.saturating_add(other.x),
            y: self.y.saturating_add(other.y),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(screen: &Screen) -> usize {
        screen.pixels().iter().filter(|&&p| p).count()
    }

    #[test]
    fn wrap_reduces_origin_modulo_dims() {
        assert_eq!(Point::from((64, 32)).wrap(), Point::from((0, 0)));
        assert_eq!(Point::from((200, 100)).wrap(), Point::from((8, 4)));
    }

    #[test]
    fn off_screen_origin_wraps() {
        let mut screen = Screen::new();
        screen.draw_sprite((67, 33).into(), &[0x80]);

        assert!(screen.get((3, 1).into()));
        assert_eq!(lit(&screen), 1);
    }

    #[test]
    fn draw_twice_erases_and_collides() {
        let mut screen = Screen::new();
        let sprite = [0xf0, 0x90, 0xf0];

        assert_eq!(screen.draw_sprite((3, 4).into(), &sprite), DrawSprite::NoCollision);
        assert_eq!(lit(&screen), 10);

        assert_eq!(screen.draw_sprite((3, 4).into(), &sprite), DrawSprite::Collision);
        assert_eq!(lit(&screen), 0);
    }

    #[test]
    fn sprite_is_clipped_at_right_edge() {
        let mut screen = Screen::new();
        screen.draw_sprite((60, 0).into(), &[0xff]);

        for x in 60..64 {
            assert!(screen.get((x, 0).into()));
        }
        for x in 0..4 {
            assert!(!screen.get((x, 0).into()), "pixel wrapped to x={x}");
        }
        assert_eq!(lit(&screen), 4);
    }

    #[test]
    fn sprite_is_clipped_at_bottom_edge() {
        let mut screen = Screen::new();
        screen.draw_sprite((0, 30).into(), &[0x80; 5]);

        assert!(screen.get((0, 30).into()));
        assert!(screen.get((0, 31).into()));
        assert!(!screen.get((0, 0).into()));
        assert_eq!(lit(&screen), 2);
    }

    #[test]
    fn collision_is_reported_for_partial_overlap() {
        let mut screen = Screen::new();
        screen.draw_sprite((0, 0).into(), &[0x80]);
        let result = screen.draw_sprite((0, 0).into(), &[0xc0, 0xff]);

        assert_eq!(result, DrawSprite::Collision);
        assert!(!screen.get((0, 0).into()));
        assert!(screen.get((1, 0).into()));
    }

    #[test]
    fn pixels_are_row_major() {
        let mut screen = Screen::new();
        screen.draw_sprite((2, 1).into(), &[0x80]);
        assert!(screen.pixels()[WIDTH + 2]);
    }

    #[test]
    fn clear_turns_everything_off() {
        let mut screen = Screen::new();
        screen.draw_sprite((10, 10).into(), &[0xff; 8]);
        screen.clear();
        assert_eq!(screen, Screen::new());
    }
}
