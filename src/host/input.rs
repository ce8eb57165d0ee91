// Input mapping from the host terminal to device events
//
// Mouse clicks stand in for touches: the clicked row is scaled into device
// pixels. Keys stand in for the hardware buttons.

use crate::terminal::event::{BUTTON_DOWN, BUTTON_PANIC, BUTTON_UP};
use crate::terminal::InputEvent;
use crossterm::event::KeyCode;
use ratatui::layout::Rect;

/// Map a key to a button press
///
/// Digits map to their own button code so unassigned buttons can be
/// exercised too.
pub fn key_to_event(code: KeyCode) -> Option<InputEvent> {
    match code {
        KeyCode::Enter => Some(InputEvent::button(BUTTON_PANIC)),
        KeyCode::Up | KeyCode::Char('k') => Some(InputEvent::button(BUTTON_UP)),
        KeyCode::Down | KeyCode::Char('j') => Some(InputEvent::button(BUTTON_DOWN)),
        KeyCode::Char(c) => c.to_digit(10).map(|d| InputEvent::button(d as i32)),
        _ => None,
    }
}

/// Map a clicked terminal row inside `body` to a touch in device pixels
///
/// Uses the centre of the row so the thirds of the body line up with the
/// thirds of the device screen.
pub fn touch_from_row(row: u16, body: Rect, display_height: u32) -> Option<InputEvent> {
    if body.height == 0 || row < body.y || row >= body.y + body.height {
        return None;
    }

    let offset = u64::from(row - body.y);
    let rows = u64::from(body.height);
    let y = (offset * 2 + 1) * u64::from(display_height) / (rows * 2);
    Some(InputEvent::touch(y as i32))
}
