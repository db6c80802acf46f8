//! Slider control — the drag state machine and prop reconciliation.
//!
//! The control is controlled: it never stores the authoritative value. Each
//! operation takes the owner's current [`SliderSpec`] and, when the value
//! should change, returns the sanitized replacement for the owner to apply.
//! What it does own is derived state only: measured geometry, the drag
//! session, the last rendered offset, and one pending pointer update.
//!
//! ```text
//!            pointer_down (on handle)
//!   Idle ─────────────────────────────▶ Dragging
//!    ▲                                   │  pointer_move → schedule (coalesced)
//!    │                                   │  frame        → emit value
//!    └──────── pointer_up / unmount ─────┘  (pointer_up flushes first)
//! ```

use crate::coalesce::Coalesced;
use crate::drag::{DragSession, DragState};
use crate::geometry::{measure, GeometryCache, GeometryProvider};
use crate::mapper;
use crate::props::{RangeKey, SliderSpec};
use crate::view::SliderView;

/// Last handle offset written to layout. Equal offsets are not rewritten.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RenderOffset {
    last: Option<f64>,
}

impl RenderOffset {
    /// Record `offset`. Returns true if it differs from the last one, i.e.
    /// the host has a layout write to do.
    pub fn update(&mut self, offset: f64) -> bool {
        if self.last == Some(offset) {
            return false;
        }
        self.last = Some(offset);
        true
    }

    pub fn get(&self) -> f64 {
        self.last.unwrap_or(0.0)
    }
}

/// The props last seen by [`SliderControl::render`], for change detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Seen {
    range: RangeKey,
    value_bits: u64,
}

impl Seen {
    fn of(props: &SliderSpec) -> Self {
        Self {
            range: props.range_key(),
            value_bits: props.value.to_bits(),
        }
    }
}

/// Outcome of a render/reconcile pass.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Reconciled {
    /// The handle moved; the host must re-layout it.
    pub offset_changed: bool,
    /// The owner's value was not allowable; this is the value to adopt.
    pub correction: Option<f64>,
}

#[derive(Debug, Default)]
pub struct SliderControl {
    geometry: GeometryCache,
    drag: DragState,
    offset: RenderOffset,
    pending_move: Coalesced<f64>,
    seen: Option<Seen>,
}

impl SliderControl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Initial measure and positioning.
    pub fn mount<P: GeometryProvider + ?Sized>(
        &mut self,
        props: &SliderSpec,
        provider: &P,
    ) -> Reconciled {
        self.geometry = measure(provider);
        tracing::debug!(
            label = %props.label,
            draggable_range = self.geometry.draggable_range,
            "slider mounted"
        );
        self.render(props, provider)
    }

    /// Window/layout changed: re-measure and reposition the handle.
    pub fn resize<P: GeometryProvider + ?Sized>(
        &mut self,
        props: &SliderSpec,
        provider: &P,
    ) -> bool {
        self.geometry = measure(provider);
        self.refresh_offset(props)
    }

    /// Reconcile with the owner's current props. Call once per render cycle.
    ///
    /// A changed min/max/step forces a re-measure. The handle is positioned
    /// from the sanitized value. When the props changed since the last pass
    /// and the owner's value is not allowable, one correction is returned;
    /// unchanged props never produce a second one, so an owner that ignores
    /// the correction cannot make this loop.
    pub fn render<P: GeometryProvider + ?Sized>(
        &mut self,
        props: &SliderSpec,
        provider: &P,
    ) -> Reconciled {
        debug_assert!(
            !(props.min > props.max),
            "slider '{}' has min > max ({} > {})",
            props.label,
            props.min,
            props.max
        );

        let seen = Seen::of(props);
        let range_changed = self.seen.is_some_and(|prev| prev.range != seen.range);
        let props_changed = self.seen != Some(seen);

        if range_changed {
            tracing::debug!(
                label = %props.label,
                min = props.min,
                max = props.max,
                step = props.step,
                "range changed, re-measuring"
            );
            self.geometry = measure(provider);
        }

        let offset_changed = self.refresh_offset(props);
        self.seen = Some(seen);

        let allowable = props.allowable(props.value);
        let correction = if props_changed && allowable.to_bits() != props.value.to_bits() {
            tracing::debug!(
                label = %props.label,
                supplied = props.value,
                corrected = allowable,
                "value outside domain or off step, correcting"
            );
            Some(allowable)
        } else {
            None
        };

        Reconciled {
            offset_changed,
            correction,
        }
    }

    /// Pointer pressed on the handle. Arms a drag anchored at the grab point.
    /// Returns true if a drag started; the host should suppress the event's
    /// default action (text selection, native drag).
    pub fn pointer_down(&mut self, pointer_x: f64) -> bool {
        if !self.geometry.is_measured() {
            tracing::warn!("drag started before the track was measured");
        }
        let started = self.drag.begin(pointer_x, self.handle_left());
        if started {
            tracing::debug!(pointer_x, handle_left = self.handle_left(), "drag started");
        }
        started
    }

    /// Pointer moved anywhere. While dragging, schedules an update for the
    /// next frame (replacing any not yet applied) and returns true so the
    /// host suppresses the default action. Ignored when idle.
    pub fn pointer_move(&mut self, pointer_x: f64) -> bool {
        if !self.drag.is_active() {
            return false;
        }
        self.pending_move.schedule(pointer_x);
        true
    }

    /// Display refresh: apply the pending pointer update, if any.
    pub fn frame(&mut self, props: &SliderSpec) -> Option<f64> {
        let pointer_x = self.pending_move.take()?;
        let session = *self.drag.session()?;
        let value = self.value_for_pointer(&session, pointer_x, props);
        tracing::trace!(
            pointer_x,
            value,
            superseded = self.pending_move.superseded(),
            "pointer update applied"
        );
        Some(value)
    }

    /// Pointer released anywhere. Flushes the pending update so the final
    /// position is never coalesced away, then disarms.
    pub fn pointer_up(&mut self, props: &SliderSpec) -> Option<f64> {
        if !self.drag.is_active() {
            return None;
        }
        let flushed = self.frame(props);
        self.drag.end();
        tracing::debug!(final_value = ?flushed, "drag ended");
        flushed
    }

    /// Teardown: drop the drag and cancel the pending update unapplied.
    pub fn unmount(&mut self) {
        let cancelled = self.pending_move.cancel();
        let was_dragging = self.drag.end().is_some();
        tracing::debug!(was_dragging, cancelled, "slider unmounted");
    }

    /// Handle position in viewport coordinates.
    pub fn handle_left(&self) -> f64 {
        self.geometry.track_origin + self.offset.get()
    }

    pub fn offset(&self) -> f64 {
        self.offset.get()
    }

    pub fn geometry(&self) -> GeometryCache {
        self.geometry
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_active()
    }

    pub fn has_pending_update(&self) -> bool {
        self.pending_move.is_pending()
    }

    pub fn view(&self, props: &SliderSpec) -> SliderView {
        SliderView::derive(props, self.offset(), self.is_dragging())
    }

    /// Pointer position → offset → raw ratio → domain value → allowable.
    fn value_for_pointer(&self, session: &DragSession, pointer_x: f64, props: &SliderSpec) -> f64 {
        let offset = session.offset_for(pointer_x, self.geometry.track_origin);
        let ratio = mapper::ratio_from_offset(offset, self.geometry.draggable_range);
        let raw = mapper::denormalize(ratio, props.min, props.max);
        props.allowable(raw)
    }

    fn refresh_offset(&mut self, props: &SliderSpec) -> bool {
        let offset = mapper::offset_from_ratio(props.ratio(), self.geometry.draggable_range);
        self.offset.update(offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::FixedGeometry;

    fn track() -> FixedGeometry {
        // origin 0, width 240, handle 40 → draggable range 200
        FixedGeometry::new(0.0, 240.0, 40.0)
    }

    #[test]
    fn mount_positions_handle_from_value() {
        let props = SliderSpec::new("x", 0.0, 100.0, 50.0);
        let mut control = SliderControl::new();
        let outcome = control.mount(&props, &track());
        assert!(outcome.offset_changed);
        assert_eq!(outcome.correction, None);
        assert_eq!(control.offset(), 100.0);
        assert_eq!(control.handle_left(), 100.0);
    }

    #[test]
    fn unchanged_offset_is_not_rewritten() {
        let props = SliderSpec::new("x", 0.0, 100.0, 50.0);
        let mut control = SliderControl::new();
        control.mount(&props, &track());
        // 50.1 still rounds to offset 100.
        let next = SliderSpec { value: 50.1, ..props };
        assert!(!control.render(&next, &track()).offset_changed);
    }

    #[test]
    fn drag_emits_value_on_frame() {
        let props = SliderSpec::new("x", 0.0, 100.0, 50.0);
        let mut control = SliderControl::new();
        control.mount(&props, &track());

        assert!(control.pointer_down(100.0));
        assert!(control.pointer_move(150.0));
        assert_eq!(control.frame(&props), Some(75.0));
        assert_eq!(control.frame(&props), None, "nothing pending after apply");
    }

    #[test]
    fn moves_between_frames_coalesce_to_newest() {
        let props = SliderSpec::new("x", 0.0, 100.0, 50.0);
        let mut control = SliderControl::new();
        control.mount(&props, &track());
        control.pointer_down(100.0);

        control.pointer_move(110.0);
        control.pointer_move(120.0);
        control.pointer_move(160.0);
        assert_eq!(control.frame(&props), Some(80.0));
    }

    #[test]
    fn pointer_up_flushes_pending_move() {
        let props = SliderSpec::new("x", 0.0, 100.0, 50.0);
        let mut control = SliderControl::new();
        control.mount(&props, &track());
        control.pointer_down(100.0);
        control.pointer_move(180.0);

        assert_eq!(control.pointer_up(&props), Some(90.0));
        assert!(!control.is_dragging());
        assert!(!control.has_pending_update());
        assert_eq!(control.pointer_up(&props), None);
    }

    #[test]
    fn idle_moves_are_ignored() {
        let props = SliderSpec::new("x", 0.0, 100.0, 50.0);
        let mut control = SliderControl::new();
        control.mount(&props, &track());
        assert!(!control.pointer_move(150.0));
        assert_eq!(control.frame(&props), None);
    }

    #[test]
    fn drag_past_track_end_clamps_to_bounds() {
        let props = SliderSpec::new("x", 0.0, 100.0, 50.0);
        let mut control = SliderControl::new();
        control.mount(&props, &track());
        control.pointer_down(100.0);

        control.pointer_move(-500.0);
        assert_eq!(control.frame(&props), Some(0.0));
        control.pointer_move(900.0);
        assert_eq!(control.frame(&props), Some(100.0));
    }

    #[test]
    fn stepped_drag_snaps() {
        let props = SliderSpec::new("x", 0.0, 1.0, 0.0).with_step(0.2);
        let mut control = SliderControl::new();
        control.mount(&props, &track());
        control.pointer_down(0.0);
        // offset 66 → ratio 0.33 → 0.4
        control.pointer_move(66.0);
        let value = control.frame(&props).unwrap();
        assert!((value - 0.4).abs() < 1e-9);
    }

    #[test]
    fn range_change_corrects_once() {
        let props = SliderSpec::new("x", 0.0, 100.0, 75.0);
        let mut control = SliderControl::new();
        control.mount(&props, &track());

        let shrunk = SliderSpec { max: 50.0, ..props };
        assert_eq!(control.render(&shrunk, &track()).correction, Some(50.0));
        // Owner ignores the correction and renders the same props again.
        assert_eq!(control.render(&shrunk, &track()).correction, None);
        // Owner adopts it.
        let adopted = SliderSpec { value: 50.0, ..shrunk };
        assert_eq!(control.render(&adopted, &track()).correction, None);
    }

    #[test]
    fn on_step_decimal_value_is_not_corrected() {
        let props = SliderSpec::new("x", 0.0, 1.0, 0.3).with_step(0.1);
        let mut control = SliderControl::new();
        assert_eq!(control.mount(&props, &track()).correction, None);

        let moved = SliderSpec { value: 0.7, ..props };
        assert_eq!(control.render(&moved, &track()).correction, None);
    }

    #[test]
    fn range_change_remeasures() {
        let props = SliderSpec::new("x", 0.0, 100.0, 50.0);
        let mut control = SliderControl::new();
        control.mount(&props, &FixedGeometry::detached());
        assert_eq!(control.geometry().draggable_range, 0.0);

        let wider = SliderSpec { max: 200.0, ..props };
        control.render(&wider, &track());
        assert_eq!(control.geometry().draggable_range, 200.0);
        assert_eq!(control.offset(), 50.0);
    }

    #[test]
    fn unmeasured_track_pins_everything_to_zero() {
        let props = SliderSpec::new("x", 0.0, 100.0, 50.0);
        let mut control = SliderControl::new();
        control.mount(&props, &FixedGeometry::detached());
        assert_eq!(control.offset(), 0.0);

        control.pointer_down(30.0);
        control.pointer_move(90.0);
        assert_eq!(control.frame(&props), Some(0.0));
    }

    #[test]
    fn empty_domain_renders_at_origin() {
        let props = SliderSpec::new("x", 5.0, 5.0, 5.0);
        let mut control = SliderControl::new();
        control.mount(&props, &track());
        assert_eq!(control.offset(), 0.0);
    }

    #[test]
    fn nan_value_is_corrected_to_min_once() {
        let props = SliderSpec::new("x", 0.0, 10.0, f64::NAN);
        let mut control = SliderControl::new();
        assert_eq!(control.mount(&props, &track()).correction, Some(0.0));
        assert_eq!(control.render(&props, &track()).correction, None);
    }

    #[test]
    fn unmount_cancels_pending_update() {
        let props = SliderSpec::new("x", 0.0, 100.0, 50.0);
        let mut control = SliderControl::new();
        control.mount(&props, &track());
        control.pointer_down(100.0);
        control.pointer_move(150.0);

        control.unmount();
        assert!(!control.is_dragging());
        assert_eq!(control.frame(&props), None);
    }
}
