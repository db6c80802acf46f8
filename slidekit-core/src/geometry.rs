//! Geometry provider — measured track origin and draggable range.
//!
//! The control never asks the host how layout works. It asks a
//! [`GeometryProvider`] for the track's bounds and the handle's width, and
//! caches the two numbers all offset math needs.

use std::cell::Cell;
use std::rc::Rc;

/// Horizontal bounds of the track in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackBounds {
    pub left: f64,
    pub width: f64,
}

/// Host-side layout access for one slider.
///
/// `track` returns `None` while the slider is not attached to a laid-out
/// surface (before first paint, or after the host dropped it).
pub trait GeometryProvider {
    fn track(&self) -> Option<TrackBounds>;
    fn handle_width(&self) -> f64;
}

impl<P: GeometryProvider + ?Sized> GeometryProvider for &P {
    fn track(&self) -> Option<TrackBounds> {
        (**self).track()
    }

    fn handle_width(&self) -> f64 {
        (**self).handle_width()
    }
}

/// Derived geometry. `draggable_range` is never negative.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GeometryCache {
    pub track_origin: f64,
    pub draggable_range: f64,
}

impl GeometryCache {
    /// Geometry before anything was measured: origin 0, nothing to drag.
    pub fn unmeasured() -> Self {
        Self::default()
    }

    /// True once a measurement produced a usable draggable range.
    pub fn is_measured(&self) -> bool {
        self.draggable_range > 0.0
    }
}

/// Read the provider into a fresh cache.
///
/// Missing or degenerate layout (no track, zero width, handle wider than the
/// track, non-finite numbers) measures as a zero draggable range, so every
/// offset collapses to 0 instead of failing.
pub fn measure<P: GeometryProvider + ?Sized>(provider: &P) -> GeometryCache {
    let Some(track) = provider.track() else {
        tracing::debug!("track not attached, geometry unmeasured");
        return GeometryCache::unmeasured();
    };

    let origin = if track.left.is_finite() { track.left } else { 0.0 };
    let range = track.width - provider.handle_width();
    let draggable_range = if range.is_finite() { range.max(0.0) } else { 0.0 };

    if draggable_range == 0.0 {
        tracing::debug!(
            track_width = track.width,
            handle_width = provider.handle_width(),
            "track leaves no room to drag"
        );
    }

    GeometryCache {
        track_origin: origin,
        draggable_range,
    }
}

/// A provider with fixed numbers, for headless hosts and tests.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FixedGeometry {
    pub track: Option<TrackBounds>,
    pub handle_width: f64,
}

impl FixedGeometry {
    pub fn new(track_left: f64, track_width: f64, handle_width: f64) -> Self {
        Self {
            track: Some(TrackBounds {
                left: track_left,
                width: track_width,
            }),
            handle_width,
        }
    }

    /// A provider for a slider that is not laid out yet.
    pub fn detached() -> Self {
        Self::default()
    }
}

impl GeometryProvider for FixedGeometry {
    fn track(&self) -> Option<TrackBounds> {
        self.track
    }

    fn handle_width(&self) -> f64 {
        self.handle_width
    }
}

/// A [`FixedGeometry`] the host rewrites in place after each layout pass.
///
/// Clones share the same cell: the host keeps one clone and hands another to
/// the mounted slider, then updates it before dispatching a resize.
#[derive(Debug, Clone, Default)]
pub struct SharedGeometry {
    cell: Rc<Cell<FixedGeometry>>,
}

impl SharedGeometry {
    pub fn new(initial: FixedGeometry) -> Self {
        Self {
            cell: Rc::new(Cell::new(initial)),
        }
    }

    pub fn set(&self, geometry: FixedGeometry) {
        self.cell.set(geometry);
    }

    pub fn get(&self) -> FixedGeometry {
        self.cell.get()
    }
}

impl GeometryProvider for SharedGeometry {
    fn track(&self) -> Option<TrackBounds> {
        self.cell.get().track
    }

    fn handle_width(&self) -> f64 {
        self.cell.get().handle_width
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn measure_subtracts_handle_width() {
        let geometry = measure(&FixedGeometry::new(12.0, 240.0, 40.0));
        assert_eq!(geometry.track_origin, 12.0);
        assert_eq!(geometry.draggable_range, 200.0);
        assert!(geometry.is_measured());
    }

    #[test]
    fn detached_track_is_unmeasured() {
        let geometry = measure(&FixedGeometry::detached());
        assert_eq!(geometry, GeometryCache::unmeasured());
        assert!(!geometry.is_measured());
    }

    #[test]
    fn handle_wider_than_track_clamps_to_zero() {
        let geometry = measure(&FixedGeometry::new(0.0, 30.0, 40.0));
        assert_eq!(geometry.draggable_range, 0.0);
    }

    #[test]
    fn shared_geometry_sees_host_updates() {
        let host_side = SharedGeometry::default();
        let slider_side = host_side.clone();
        assert_eq!(measure(&slider_side), GeometryCache::unmeasured());

        host_side.set(FixedGeometry::new(4.0, 104.0, 4.0));
        let geometry = measure(&slider_side);
        assert_eq!(geometry.track_origin, 4.0);
        assert_eq!(geometry.draggable_range, 100.0);
    }

    #[test]
    fn non_finite_layout_degrades_to_zero() {
        let geometry = measure(&FixedGeometry::new(f64::NAN, f64::INFINITY, 10.0));
        assert_eq!(geometry.track_origin, 0.0);
        assert_eq!(geometry.draggable_range, 0.0);
    }
}
