//! Top-level UI layout — slider panel with status bar and help overlay.

pub mod help_panel;
pub mod slider_panel;
pub mod status_bar;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::Frame;

use crate::app::AppState;
use crate::layout;
use crate::theme;

/// Draw the entire UI.
pub fn draw(f: &mut Frame, app: &AppState) {
    let screen = layout::screen(f.area());
    let dragging = app.dragging().is_some();

    let block = layout::panel_block()
        .border_style(theme::panel_border(dragging))
        .title(format!(" Sliders [{}] ", app.specs.len()))
        .title_style(theme::panel_title(dragging));
    f.render_widget(block, screen.panel);

    slider_panel::render(f, app);
    status_bar::render(f, screen.status, app);

    if app.show_help {
        help_panel::render(f, screen.panel);
    }
}

/// Compute a centered rect for overlays.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
