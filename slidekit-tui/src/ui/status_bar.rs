//! Bottom status bar — key hints, drag state, last value change or warning.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::{AppState, StatusLevel};
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let mut spans: Vec<Span> = Vec::new();

    spans.push(Span::styled(" q:Quit ?:Help", theme::muted()));
    spans.push(Span::raw(" | "));

    if let Some(index) = app.dragging() {
        let label = app.specs.get(index).map_or("", |s| s.label.as_str());
        spans.push(Span::styled(format!("dragging {label}"), theme::accent_bold()));
        spans.push(Span::raw(" | "));
    }

    if let Some(msg) = &app.status_message {
        let style = match msg.level {
            StatusLevel::Info => theme::accent(),
            StatusLevel::Warning => theme::warning(),
        };
        spans.push(Span::styled(
            format!("{} ", msg.timestamp.format("%H:%M:%S")),
            theme::neutral(),
        ));
        spans.push(Span::styled(msg.text.as_str(), style));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
