//! Application state — single-owner, main-thread only.
//!
//! The app is the owner every slider reports to. It holds the specs (and so
//! the authoritative values), receives changes over a channel, applies them,
//! and re-renders the sliders until they stop correcting.

use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver};

use chrono::NaiveDateTime;
use ratatui::layout::Rect;

use slidekit_core::view::format_value;
use slidekit_core::{
    EventHub, FixedGeometry, HostEvent, MountedSlider, SharedGeometry, SliderSet, SliderSpec,
    SliderView,
};

use crate::layout::{self, SliderLayout};

/// Settle passes before giving up on a slider set that keeps correcting.
const MAX_SETTLE_PASSES: usize = 8;

/// A value reported by one slider's change callback.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderChange {
    pub index: usize,
    pub value: f64,
}

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
}

#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub timestamp: NaiveDateTime,
    pub level: StatusLevel,
    pub text: String,
}

/// Top-level application state.
pub struct AppState {
    pub running: bool,
    pub show_help: bool,

    /// Owner-side props; `specs[i].value` is slider `i`'s value.
    pub specs: Vec<SliderSpec>,
    sliders: Vec<MountedSlider<SharedGeometry>>,
    geometries: Vec<SharedGeometry>,
    layouts: Vec<Option<SliderLayout>>,
    last_area: Option<Rect>,

    hub: EventHub,
    change_rx: Receiver<SliderChange>,

    pub status_message: Option<StatusMessage>,
    pub state_path: PathBuf,
}

impl AppState {
    /// Mount one slider per spec. Sliders start detached; the first
    /// [`AppState::relayout`] attaches them.
    pub fn new(set: SliderSet, state_path: PathBuf) -> Self {
        let hub = EventHub::new();
        let (change_tx, change_rx) = mpsc::channel();

        let mut geometries = Vec::with_capacity(set.len());
        let mut sliders = Vec::with_capacity(set.len());
        for (index, spec) in set.sliders.iter().enumerate() {
            let geometry = SharedGeometry::default();
            let tx = change_tx.clone();
            let slider = MountedSlider::mount(&hub, geometry.clone(), spec.clone(), move |value| {
                // The receiver lives in the app; a failed send means it is gone.
                let _ = tx.send(SliderChange { index, value });
            });
            geometries.push(geometry);
            sliders.push(slider);
        }

        let mut app = Self {
            running: true,
            show_help: false,
            specs: set.sliders,
            layouts: vec![None; sliders.len()],
            sliders,
            geometries,
            last_area: None,
            hub,
            change_rx,
            status_message: None,
            state_path,
        };
        app.apply_changes();
        app
    }

    /// Drain reported values into the specs, then re-render every slider.
    /// Repeats while re-rendering produces corrections. Returns how many
    /// changes were applied.
    pub fn apply_changes(&mut self) -> usize {
        let mut applied = 0;
        for _ in 0..MAX_SETTLE_PASSES {
            let changes: Vec<SliderChange> = self.change_rx.try_iter().collect();
            if changes.is_empty() {
                return applied;
            }
            for change in changes {
                let Some(spec) = self.specs.get_mut(change.index) else {
                    tracing::warn!(index = change.index, "change for unknown slider");
                    continue;
                };
                spec.value = change.value;
                let text = format!(
                    "{}: {}",
                    spec.label,
                    format_value(change.value, spec.unit.as_deref())
                );
                tracing::debug!(label = %spec.label, value = change.value, "value changed");
                self.set_status(text);
                applied += 1;
            }
            for (slider, spec) in self.sliders.iter().zip(&self.specs) {
                slider.render(spec.clone());
            }
        }
        tracing::warn!(passes = MAX_SETTLE_PASSES, "slider values did not settle");
        self.set_warning("slider values did not settle");
        applied
    }

    /// Re-run layout for a new frame area. Updates every slider's geometry
    /// and dispatches a resize. No-op if the area is unchanged.
    pub fn relayout(&mut self, area: Rect) -> bool {
        if self.last_area == Some(area) {
            return false;
        }
        self.last_area = Some(area);

        let screen = layout::screen(area);
        self.layouts = layout::slider_layouts(screen.sliders, &self.specs);
        for (geometry, slot) in self.geometries.iter().zip(&self.layouts) {
            geometry.set(slot.map_or_else(FixedGeometry::detached, |l| l.geometry()));
        }
        let hidden = self.layouts.iter().filter(|l| l.is_none()).count();
        if hidden > 0 {
            self.set_warning(format!("{hidden} slider(s) do not fit the terminal"));
        }
        tracing::debug!(width = area.width, height = area.height, hidden, "layout changed");

        self.hub.dispatch(&HostEvent::Resize);
        true
    }

    /// Left button pressed. Starts a drag on the slider whose handle is under
    /// the pointer. Returns the slider's index if one was grabbed.
    pub fn pointer_down(&mut self, column: u16, row: u16) -> Option<usize> {
        let index = self.hit_test(column, row)?;
        if self.sliders[index].pointer_down(f64::from(column)) {
            tracing::debug!(index, column, "handle grabbed");
            Some(index)
        } else {
            None
        }
    }

    pub fn pointer_move(&mut self, column: u16) {
        self.hub.dispatch(&HostEvent::PointerMove {
            x: f64::from(column),
        });
    }

    pub fn pointer_up(&mut self) {
        self.hub.dispatch(&HostEvent::PointerUp);
        self.apply_changes();
    }

    /// One loop tick: apply the pending pointer update, if any.
    pub fn tick(&mut self) {
        self.hub.dispatch(&HostEvent::Frame);
        self.apply_changes();
    }

    /// Index of the slider whose handle covers the cell.
    pub fn hit_test(&self, column: u16, row: u16) -> Option<usize> {
        self.layouts
            .iter()
            .zip(&self.sliders)
            .position(|(slot, slider)| {
                slot.is_some_and(|l| l.handle_contains(slider.handle_left(), column, row))
            })
    }

    pub fn layouts(&self) -> &[Option<SliderLayout>] {
        &self.layouts
    }

    pub fn views(&self) -> Vec<SliderView> {
        self.sliders.iter().map(MountedSlider::view).collect()
    }

    pub fn handle_lefts(&self) -> Vec<f64> {
        self.sliders.iter().map(MountedSlider::handle_left).collect()
    }

    pub fn dragging(&self) -> Option<usize> {
        self.sliders.iter().position(MountedSlider::is_dragging)
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some(StatusMessage::new(StatusLevel::Info, msg));
    }

    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.status_message = Some(StatusMessage::new(StatusLevel::Warning, msg));
    }
}

impl StatusMessage {
    fn new(level: StatusLevel, text: impl Into<String>) -> Self {
        Self {
            timestamp: chrono::Local::now().naive_local(),
            level,
            text: text.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> AppState {
        let mut app = AppState::new(SliderSet::default(), PathBuf::from("."));
        app.relayout(Rect::new(0, 0, 80, 24));
        app
    }

    #[test]
    fn default_sliders_mount_without_corrections() {
        let app = app();
        assert_eq!(app.specs[0].value, 67.0);
        assert_eq!(app.specs[1].value, 0.33);
        assert!(app.status_message.is_none());
        assert!(app.layouts().iter().all(Option::is_some));
    }

    #[test]
    fn illegal_initial_value_is_corrected_on_startup() {
        let set = SliderSet {
            sliders: vec![SliderSpec::new("x", 0.0, 10.0, 42.0)],
        };
        let app = AppState::new(set, PathBuf::from("."));
        assert_eq!(app.specs[0].value, 10.0);
        let status = app.status_message.unwrap();
        assert_eq!(status.text, "x: 10.00");
        assert_eq!(status.level, StatusLevel::Info);
    }

    #[test]
    fn relayout_is_skipped_for_same_area() {
        let mut app = app();
        assert!(!app.relayout(Rect::new(0, 0, 80, 24)));
        assert!(app.relayout(Rect::new(0, 0, 100, 30)));
    }

    #[test]
    fn drag_updates_owner_value() {
        let mut app = app();
        // Track: x 3..77 (74 cells), handle 6 → draggable range 68.
        let handle_left = app.handle_lefts()[0];
        let column = handle_left as u16 + 1;
        let row = app.layouts()[0].unwrap().track.y;

        assert_eq!(app.pointer_down(column, row), Some(0));
        assert_eq!(app.dragging(), Some(0));

        app.pointer_move(3 + 1);
        app.tick();
        assert_eq!(app.specs[0].value, 0.0);

        app.pointer_move(200);
        app.pointer_up();
        assert_eq!(app.specs[0].value, 100.0);
        assert_eq!(app.dragging(), None);
        assert_eq!(app.handle_lefts()[0], 3.0 + 68.0);
    }

    #[test]
    fn click_off_handle_starts_nothing() {
        let mut app = app();
        let row = app.layouts()[0].unwrap().label.y;
        assert_eq!(app.pointer_down(10, row), None);
        assert_eq!(app.dragging(), None);
    }

    #[test]
    fn status_levels() {
        let mut app = app();
        app.set_warning("careful");
        assert_eq!(app.status_message.as_ref().map(|m| m.level), Some(StatusLevel::Warning));
        app.set_status("fine");
        assert_eq!(app.status_message.as_ref().map(|m| m.level), Some(StatusLevel::Info));
    }
}
