use crate::io::{keycode_to_chip8, InputEvent};
use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

#[derive(Debug, Default)]
pub struct Keyboard;

impl Keyboard {
    /// Consume pending input events without blocking.
    pub fn poll(&mut self) -> Result<Vec<InputEvent>> {
        let mut events = vec![];
        while event::poll(Duration::from_secs(0))? {
            if let Event::Key(e) = event::read()? {
                events.extend(filter_event(&e));
            }
        }
        Ok(events)
    }
}

/// Translate a terminal key event, dropping keys that mean nothing to us.
fn filter_event(e: &KeyEvent) -> Option<InputEvent> {
    let pressed = match e.kind {
        KeyEventKind::Press | KeyEventKind::Repeat => true,
        KeyEventKind::Release => false,
    };

    match e.code {
        KeyCode::Esc | KeyCode::Enter if pressed => Some(InputEvent::Quit),
        KeyCode::Char('c' | 'C') if pressed && e.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(InputEvent::Quit)
        }
        KeyCode::Char(c) => {
            let k = keycode_to_chip8(c)?;
            if pressed {
                Some(InputEvent::Press(k))
            } else {
                Some(InputEvent::Release(k))
            }
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode, modifiers: KeyModifiers, kind: KeyEventKind) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn press_and_release_are_mapped() {
        let press = key(KeyCode::Char('w'), KeyModifiers::NONE, KeyEventKind::Press);
        let release = key(KeyCode::Char('w'), KeyModifiers::NONE, KeyEventKind::Release);

        assert_eq!(filter_event(&press), Some(InputEvent::Press(0x5)));
        assert_eq!(filter_event(&release), Some(InputEvent::Release(0x5)));
    }

    #[test]
    fn quit_keys() {
        for e in [
            key(KeyCode::Esc, KeyModifiers::NONE, KeyEventKind::Press),
            key(KeyCode::Enter, KeyModifiers::NONE, KeyEventKind::Press),
            key(KeyCode::Char('c'), KeyModifiers::CONTROL, KeyEventKind::Press),
        ] {
            assert_eq!(filter_event(&e), Some(InputEvent::Quit));
        }
    }

    #[test]
    fn unmapped_keys_are_dropped() {
        let e = key(KeyCode::Char('p'), KeyModifiers::NONE, KeyEventKind::Press);
        assert_eq!(filter_event(&e), None);
        let e = key(KeyCode::Esc, KeyModifiers::NONE, KeyEventKind::Release);
        assert_eq!(filter_event(&e), None);
    }
}
