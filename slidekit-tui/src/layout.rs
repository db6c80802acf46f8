//! Screen layout — pure functions over the frame area.
//!
//! The renderer and the mouse hit test both call these, so a click lands on
//! exactly the cells the handle was drawn in. One terminal cell is one
//! "pixel" of slider geometry.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::widgets::{Block, Borders};

use slidekit_core::view::max_formatted_chars;
use slidekit_core::{FixedGeometry, SliderSpec};

/// Label line, track line, spacer.
pub const ROWS_PER_SLIDER: u16 = 3;
/// Cells left blank on each side of a track.
pub const TRACK_MARGIN: u16 = 2;
/// Extra handle cells around the value text.
pub const HANDLE_PADDING: u16 = 2;

/// The three regions of the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Screen {
    /// Bordered panel holding the sliders.
    pub panel: Rect,
    /// Inside of the panel border.
    pub sliders: Rect,
    /// One-line status bar.
    pub status: Rect,
}

pub fn panel_block() -> Block<'static> {
    Block::default().borders(Borders::ALL)
}

pub fn screen(area: Rect) -> Screen {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(area);

    Screen {
        panel: chunks[0],
        sliders: panel_block().inner(chunks[0]),
        status: chunks[1],
    }
}

/// Where one slider is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliderLayout {
    pub label: Rect,
    pub track: Rect,
    pub handle_width: u16,
}

impl SliderLayout {
    /// Geometry the slider measures against.
    pub fn geometry(&self) -> FixedGeometry {
        FixedGeometry::new(
            f64::from(self.track.x),
            f64::from(self.track.width),
            f64::from(self.handle_width),
        )
    }

    /// Cells covered by the handle when its left edge is at `handle_left`.
    pub fn handle_rect(&self, handle_left: f64) -> Rect {
        let width = self.handle_width.min(self.track.width);
        let max_x = self.track.right().saturating_sub(width);
        let x = if handle_left.is_finite() {
            handle_left.round().clamp(f64::from(self.track.x), f64::from(max_x)) as u16
        } else {
            self.track.x
        };
        Rect::new(x, self.track.y, width, 1)
    }

    pub fn handle_contains(&self, handle_left: f64, column: u16, row: u16) -> bool {
        let rect = self.handle_rect(handle_left);
        row == rect.y && column >= rect.x && column < rect.right()
    }
}

/// Handle width in cells: room for the widest formatted bound plus padding.
pub fn handle_width(spec: &SliderSpec) -> u16 {
    let chars = max_formatted_chars(spec.min, spec.max, spec.unit.as_deref());
    u16::try_from(chars)
        .unwrap_or(u16::MAX)
        .saturating_add(HANDLE_PADDING)
}

/// Lay sliders out top to bottom inside `area`. A slider that does not fit
/// gets `None` and is treated as not attached.
pub fn slider_layouts(area: Rect, specs: &[SliderSpec]) -> Vec<Option<SliderLayout>> {
    let width = area.width.saturating_sub(TRACK_MARGIN * 2);
    let x = area.x.saturating_add(TRACK_MARGIN);

    specs
        .iter()
        .enumerate()
        .map(|(i, spec)| {
            let top = u32::from(area.y) + i as u32 * u32::from(ROWS_PER_SLIDER);
            // Label and track rows must both be inside the area.
            if width == 0 || top + 2 > u32::from(area.bottom()) {
                return None;
            }
            let top = top as u16;
            Some(SliderLayout {
                label: Rect::new(x, top, width, 1),
                track: Rect::new(x, top + 1, width, 1),
                handle_width: handle_width(spec),
            })
        })
        .collect()
}
