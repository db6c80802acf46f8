//! Input dispatch — keys toggle help or quit, the mouse drives the sliders.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};

use crate::app::AppState;

/// Handle a key event.
pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    // The help overlay consumes input first.
    if app.show_help {
        match key.code {
            KeyCode::Char('q') => app.running = false,
            KeyCode::Esc | KeyCode::Char('?') => app.show_help = false,
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.running = false,
        KeyCode::Char('?') => app.show_help = true,
        _ => {}
    }
}

/// Handle a mouse event. Pointer-down is hit-tested against the handles;
/// moves and releases go to every mounted slider through the hub.
pub fn handle_mouse(app: &mut AppState, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if let Some(index) = app.pointer_down(mouse.column, mouse.row) {
                tracing::trace!(index, "drag started from mouse");
            }
        }
        MouseEventKind::Drag(MouseButton::Left) | MouseEventKind::Moved => {
            app.pointer_move(mouse.column);
        }
        MouseEventKind::Up(MouseButton::Left) => {
            app.pointer_up();
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use crossterm::event::{KeyModifiers, KeyEventState};
    use ratatui::layout::Rect;
    use slidekit_core::SliderSet;

    fn app() -> AppState {
        let mut app = AppState::new(SliderSet::default(), PathBuf::from("."));
        app.relayout(Rect::new(0, 0, 80, 24));
        app
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
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
    fn help_toggles_and_quit_works_everywhere() {
        let mut app = app();
        handle_key(&mut app, press(KeyCode::Char('?')));
        assert!(app.show_help);
        handle_key(&mut app, press(KeyCode::Esc));
        assert!(!app.show_help);
        assert!(app.running);

        handle_key(&mut app, press(KeyCode::Char('?')));
        handle_key(&mut app, press(KeyCode::Char('q')));
        assert!(!app.running);
    }

    #[test]
    fn esc_quits_without_overlay() {
        let mut app = app();
        handle_key(&mut app, press(KeyCode::Esc));
        assert!(!app.running);
    }

    #[test]
    fn key_release_is_ignored() {
        let mut app = app();
        let mut release = press(KeyCode::Char('q'));
        release.kind = KeyEventKind::Release;
        handle_key(&mut app, release);
        assert!(app.running);
    }

    #[test]
    fn mouse_drag_moves_second_slider() {
        let mut app = app();
        let track = app.layouts()[1].unwrap().track;
        let grab = app.handle_lefts()[1] as u16;

        handle_mouse(&mut app, mouse(MouseEventKind::Down(MouseButton::Left), grab, track.y));
        assert_eq!(app.dragging(), Some(1));

        // Drag left past the track start, release off the track.
        handle_mouse(&mut app, mouse(MouseEventKind::Drag(MouseButton::Left), 0, track.y));
        handle_mouse(&mut app, mouse(MouseEventKind::Up(MouseButton::Left), 0, 0));

        assert_eq!(app.specs[1].value, 0.0);
        assert_eq!(app.specs[0].value, 67.0);
        assert_eq!(app.dragging(), None);
    }

    #[test]
    fn moves_without_a_drag_change_nothing() {
        let mut app = app();
        handle_mouse(&mut app, mouse(MouseEventKind::Moved, 70, 2));
        app.tick();
        handle_mouse(&mut app, mouse(MouseEventKind::Up(MouseButton::Left), 70, 2));
        assert_eq!(app.specs[0].value, 67.0);
        assert!(app.status_message.is_none());
    }
}
