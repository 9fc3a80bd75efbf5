use std::time::Duration;

use anyhow::Result;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};

use crate::app::{App, Hit};

/// Poll for events with a timeout
pub fn poll_event(timeout: Duration) -> Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Handle a key event
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    // Windows reports releases too
    if key.kind == KeyEventKind::Release {
        return;
    }

    match key.code {
        // Close
        KeyCode::Char('q') | KeyCode::Esc => app.quit(),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit(),

        // Minimize / restore
        KeyCode::Char('m') => app.toggle_minimized(),

        // Move the overlay
        KeyCode::Up | KeyCode::Char('k') => app.nudge(0, -1),
        KeyCode::Down | KeyCode::Char('j') => app.nudge(0, 1),
        KeyCode::Left | KeyCode::Char('h') => app.nudge(-1, 0),
        KeyCode::Right | KeyCode::Char('l') => app.nudge(1, 0),

        _ => {}
    }
}

/// Handle mouse events
pub fn handle_mouse_event(app: &mut App, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => match app.hit_test(mouse.column, mouse.row) {
            Hit::Close => app.quit(),
            Hit::Minimize => app.toggle_minimized(),
            // A click on the chip restores it
            Hit::Body if app.minimized => app.toggle_minimized(),
            Hit::Body => app.begin_drag(mouse.column, mouse.row),
            Hit::Outside => {}
        },

        MouseEventKind::Drag(MouseButton::Left) => app.drag_to(mouse.column, mouse.row),

        MouseEventKind::Up(MouseButton::Left) => app.end_drag(),

        _ => {}
    }
}
