//! Slider panel — one label line and one track line per slider.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use slidekit_core::{AriaRange, SliderView};

use crate::app::AppState;
use crate::layout::SliderLayout;
use crate::theme;

const TRACK_GLYPH: &str = "─";

pub fn render(f: &mut Frame, app: &AppState) {
    let views = app.views();
    let lefts = app.handle_lefts();

    for ((view, slot), &left) in views.iter().zip(app.layouts()).zip(&lefts) {
        let Some(layout) = slot else {
            continue;
        };
        render_label(f, layout.label, view);
        render_track(f, layout, left, view);
    }
}

fn render_label(f: &mut Frame, area: Rect, view: &SliderView) {
    let line = Line::from(vec![
        Span::styled(view.label.clone(), theme::label()),
        Span::raw("  "),
        Span::styled(aria_summary(&view.aria), theme::muted()),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

fn render_track(f: &mut Frame, layout: &SliderLayout, handle_left: f64, view: &SliderView) {
    let handle = layout.handle_rect(handle_left);
    let line = track_line(
        layout.track.width,
        handle.x - layout.track.x,
        handle.width,
        &view.text,
        view.active,
    );
    f.render_widget(Paragraph::new(line), layout.track);
}

/// `role=slider  0 ‥ 67 ‥ 100`
fn aria_summary(aria: &AriaRange) -> String {
    format!(
        "role={}  {} ‥ {} ‥ {}",
        AriaRange::ROLE,
        aria.value_min,
        aria.value_now,
        aria.value_max
    )
}

/// Track glyphs with the handle spliced in at `handle_x` (relative to the
/// track start). The value text is centered in the handle and cut to fit.
pub fn track_line(
    track_width: u16,
    handle_x: u16,
    handle_width: u16,
    text: &str,
    active: bool,
) -> Line<'static> {
    let handle_width = handle_width.min(track_width);
    let handle_x = handle_x.min(track_width - handle_width);
    let after = track_width - handle_x - handle_width;

    let label: String = text.chars().take(usize::from(handle_width)).collect();
    let handle_text = format!("{label:^width$}", width = usize::from(handle_width));

    Line::from(vec![
        Span::styled(TRACK_GLYPH.repeat(usize::from(handle_x)), theme::track()),
        Span::styled(handle_text, theme::handle(active)),
        Span::styled(TRACK_GLYPH.repeat(usize::from(after)), theme::track()),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn handle_is_spliced_into_track() {
        let line = track_line(12, 3, 6, "67%", false);
        assert_eq!(plain(&line), "─── 67%  ───");
        assert_eq!(line.spans[1].style, theme::handle(false));
    }

    #[test]
    fn handle_at_track_end() {
        let line = track_line(10, 4, 6, "100%", true);
        assert_eq!(plain(&line), "──── 100% ");
        assert_eq!(line.spans[2].content, "");
        assert_eq!(line.spans[1].style, theme::handle(true));
    }

    #[test]
    fn oversized_handle_and_text_are_cut() {
        let line = track_line(4, 9, 6, "123456", false);
        assert_eq!(plain(&line), "1234");
    }

    #[test]
    fn aria_summary_shows_range() {
        let aria = AriaRange::new(0.0, 0.333, 1.0);
        assert_eq!(aria_summary(&aria), "role=slider  0 ‥ 0.33 ‥ 1");
    }
}
