use crate::{
    io::{keycode_to_chip8, Chip8Io, InputEvent},
    machine::screen::{Screen, HEIGHT, WIDTH},
};
use anyhow::{anyhow, Result};
use sdl2::{
    event::Event,
    keyboard::Scancode,
    pixels::Color,
    rect::Point,
    render::WindowCanvas,
    EventPump,
};

const SCALE: u32 = 12;

/// An SDL2 window, one square of `SCALE` x `SCALE` screen pixels per CHIP-8
/// pixel.
pub struct WindowIo {
    canvas: WindowCanvas,
    events: EventPump,
}

impl WindowIo {
    pub fn setup() -> Result<Self> {
        let sdl = sdl2::init().map_err(|e| anyhow!("failed to initialise SDL: {e}"))?;
        let video = sdl.video().map_err(|e| anyhow!(e))?;
        let window = video
            .window("chip8-vm", WIDTH as u32 * SCALE, HEIGHT as u32 * SCALE)
            .position_centered()
            .build()?;

        let mut canvas = window.into_canvas().build()?;
        canvas
            .set_scale(SCALE as f32, SCALE as f32)
            .map_err(|e| anyhow!(e))?;
        let events = sdl.event_pump().map_err(|e| anyhow!(e))?;

        Ok(Self { canvas, events })
    }
}

impl Chip8Io for WindowIo {
    fn reports_key_releases(&self) -> bool {
        true
    }

    fn poll_events(&mut self) -> Result<Vec<InputEvent>> {
        let events = self
            .events
            .poll_iter()
            .filter_map(|event| match event {
                Event::Quit { .. } => Some(InputEvent::Quit),
                Event::KeyDown {
                    scancode: Some(Scancode::Escape | Scancode::Return),
                    ..
                } => Some(InputEvent::Quit),
                Event::KeyDown {
                    scancode: Some(s),
                    repeat: false,
                    ..
                } => scancode_to_chip8(s).map(InputEvent::Press),
                Event::KeyUp {
                    scancode: Some(s), ..
                } => scancode_to_chip8(s).map(InputEvent::Release),
                _ => None,
            })
            .collect();
        Ok(events)
    }

    fn render(&mut self, screen: &Screen) -> Result<()> {
        self.canvas.set_draw_color(Color::BLACK);
        self.canvas.clear();

        self.canvas.set_draw_color(Color::WHITE);
        let lit: Vec<Point> = screen
            .rows()
            .enumerate()
            .flat_map(|(y, row)| {
                row.iter()
                    .enumerate()
                    .filter(|&(_, &lit)| lit)
                    .map(move |(x, _)| Point::new(x as i32, y as i32))
            })
            .collect();
        self.canvas.draw_points(&lit[..]).map_err(|e| anyhow!(e))?;

        self.canvas.present();
        Ok(())
    }
}

/// Keys are matched by position, so the layout works on any keyboard.
fn scancode_to_chip8(s: Scancode) -> Option<u8> {
    let c = match s {
        Scancode::Num1 => '1',
        Scancode::Num2 => '2',
        Scancode::Num3 => '3',
        Scancode::Num4 => '4',
        Scancode::Q => 'q',
        Scancode::W => 'w',
        Scancode::E => 'e',
        Scancode::R => 'r',
        Scancode::A => 'a',
        Scancode::S => 's',
        Scancode::D => 'd',
        Scancode::F => 'f',
        Scancode::Z => 'z',
        Scancode::X => 'x',
        Scancode::C => 'c',
        Scancode::V => 'v',
        _ => return None,
    };
    keycode_to_chip8(c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scancodes_follow_the_keypad_layout() {
        assert_eq!(scancode_to_chip8(Scancode::Num4), Some(0xc));
        assert_eq!(scancode_to_chip8(Scancode::X), Some(0x0));
        assert_eq!(scancode_to_chip8(Scancode::V), Some(0xf));
        assert_eq!(scancode_to_chip8(Scancode::P), None);
    }
}
