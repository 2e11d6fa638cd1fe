use std::io;
use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};

use crate::gesture::{GesturePoint, SwipeTracker};
use crate::input::{Direction, GameInput};

/// Everything the terminal can hand to the engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HostEvent {
    Input(GameInput),
    Swipe { start: GesturePoint, end: GesturePoint },
    Resize,
}

/// Translates crossterm events into [`HostEvent`]s.
#[derive(Debug, Clone)]
pub struct InputHandler {
    swipe: SwipeTracker,
    enable_mouse: bool,
    cell_size_px: f32,
}

impl InputHandler {
    /// `cell_size_px` is the pixel edge of one grid cell, which spans two terminal columns.
    #[must_use]
    pub fn new(enable_mouse: bool, cell_size_px: u16) -> Self {
        Self {
            swipe: SwipeTracker::default(),
            enable_mouse,
            cell_size_px: f32::from(cell_size_px),
        }
    }

    /// Waits up to `timeout` for one event worth forwarding.
    pub fn poll_input(&mut self, timeout: Duration) -> io::Result<Option<HostEvent>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }

        Ok(match event::read()? {
            Event::Key(key) => map_key(key).map(HostEvent::Input),
            Event::Mouse(mouse) if self.enable_mouse => self.map_mouse(mouse),
            Event::Resize(_, _) => Some(HostEvent::Resize),
            Event::FocusLost => {
                self.swipe.cancel();
                None
            }
            _ => None,
        })
    }

    fn map_mouse(&mut self, mouse: MouseEvent) -> Option<HostEvent> {
        let point = GesturePoint::new(
            f32::from(mouse.column) * self.cell_size_px / 2.0,
            f32::from(mouse.row) * self.cell_size_px,
        );

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.swipe.begin(point);
                None
            }
            MouseEventKind::Up(MouseButton::Left) => self
                .swipe
                .end(point)
                .map(|(start, end)| HostEvent::Swipe { start, end }),
            _ => None,
        }
    }
}

/// Maps one key press. Unbound keys and key releases map to `None`.
#[must_use]
pub fn map_key(key: KeyEvent) -> Option<GameInput> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(GameInput::Quit);
    }

    match key.code {
        KeyCode::Up => Some(GameInput::Direction(Direction::Up)),
        KeyCode::Down => Some(GameInput::Direction(Direction::Down)),
        KeyCode::Left => Some(GameInput::Direction(Direction::Left)),
        KeyCode::Right => Some(GameInput::Direction(Direction::Right)),
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'p' | ' ' => Some(GameInput::Pause),
            'r' => Some(GameInput::Reset),
            'q' => Some(GameInput::Quit),
            other => Direction::from_key_name(other.encode_utf8(&mut [0; 4]))
                .map(GameInput::Direction),
        },
        KeyCode::Enter => Some(GameInput::Reset),
        KeyCode::Esc => Some(GameInput::Quit),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{
        KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    };

    use super::{map_key, HostEvent, InputHandler};
    use crate::gesture::GesturePoint;
    use crate::input::{Direction, GameInput};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn arrows_and_wasd_map_to_directions() {
        assert_eq!(
            map_key(press(KeyCode::Up)),
            Some(GameInput::Direction(Direction::Up))
        );
        assert_eq!(
            map_key(press(KeyCode::Char('a'))),
            Some(GameInput::Direction(Direction::Left))
        );
        assert_eq!(
            map_key(press(KeyCode::Char('D'))),
            Some(GameInput::Direction(Direction::Right))
        );
    }

    #[test]
    fn control_keys_map_to_commands() {
        assert_eq!(map_key(press(KeyCode::Char(' '))), Some(GameInput::Pause));
        assert_eq!(map_key(press(KeyCode::Enter)), Some(GameInput::Reset));
        assert_eq!(map_key(press(KeyCode::Esc)), Some(GameInput::Quit));
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(GameInput::Quit)
        );
    }

    #[test]
    fn unbound_keys_and_releases_are_ignored() {
        assert_eq!(map_key(press(KeyCode::Char('x'))), None);
        assert_eq!(map_key(press(KeyCode::Tab)), None);

        let mut release = press(KeyCode::Up);
        release.kind = KeyEventKind::Release;
        assert_eq!(map_key(release), None);
    }

    #[test]
    fn mouse_drag_becomes_a_swipe_in_pixels() {
        let mut handler = InputHandler::new(true, 16);

        assert_eq!(
            handler.map_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 10, 5)),
            None
        );
        let swipe = handler.map_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 14, 5));

        assert_eq!(
            swipe,
            Some(HostEvent::Swipe {
                start: GesturePoint::new(80.0, 80.0),
                end: GesturePoint::new(112.0, 80.0),
            })
        );
    }
}
