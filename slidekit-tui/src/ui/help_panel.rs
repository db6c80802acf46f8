//! Help overlay — mouse and keyboard reference.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::theme;
use crate::ui::centered_rect;

pub fn render(f: &mut Frame, area: Rect) {
    let popup = centered_rect(60, 60, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(" Help [?/Esc]close ")
        .title_style(theme::accent_bold());

    let mut lines: Vec<Line> = Vec::new();

    section(&mut lines, "Mouse");
    key(&mut lines, "Drag handle", "Change the value");
    key(&mut lines, "Release", "Anywhere; the last position is kept");
    lines.push(Line::from(""));

    section(&mut lines, "Keys");
    key(&mut lines, "?", "Toggle this help");
    key(&mut lines, "q / Esc", "Quit (values are saved)");
    lines.push(Line::from(""));

    section(&mut lines, "Values");
    key(&mut lines, "Step", "Values snap to min + n × step");
    key(&mut lines, "Range", "Out-of-range values are pulled to min/max");

    let para = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
    f.render_widget(para, popup);
}

fn section<'a>(lines: &mut Vec<Line<'a>>, title: &str) {
    lines.push(Line::from(Span::styled(title.to_string(), theme::accent_bold())));
}

fn key<'a>(lines: &mut Vec<Line<'a>>, keys: &str, desc: &str) {
    lines.push(Line::from(vec![
        Span::styled(format!("  {:>12}  ", keys), theme::accent()),
        Span::styled(desc.to_string(), theme::muted()),
    ]));
}
