//! slidekit core — a renderer-agnostic range slider.
//!
//! This crate contains everything with real invariants:
//! - Value/offset mapping and step quantization (`mapper`)
//! - Measured track geometry behind a provider trait (`geometry`)
//! - The drag state machine and prop reconciliation (`control`, `drag`)
//! - Depth-1 coalescing of per-frame pointer updates (`coalesce`)
//! - A host event hub with RAII listener scopes, and mounted sliders (`host`)
//! - Per-render view derivation: formatted text, handle width, range semantics (`view`)
//! - Slider specs and TOML slider sets (`props`, `config`)
//!
//! The slider is a controlled control: the owner holds the value and feeds it
//! back in every render; the core only ever reports sanitized replacements.

pub mod coalesce;
pub mod config;
pub mod control;
pub mod drag;
pub mod error;
pub mod geometry;
pub mod host;
pub mod mapper;
pub mod props;
pub mod view;

pub use config::SliderSet;
pub use control::{Reconciled, SliderControl};
pub use error::SliderError;
pub use geometry::{FixedGeometry, GeometryCache, GeometryProvider, SharedGeometry, TrackBounds};
pub use host::{EventHub, EventKind, HostEvent, MountedSlider, Subscription};
pub use props::SliderSpec;
pub use view::{AriaRange, SliderView};
