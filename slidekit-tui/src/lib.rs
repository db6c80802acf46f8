//! slidekit TUI — a terminal host for mouse-draggable sliders.
//!
//! The app owns every slider's value. Sliders are mounted on one event hub;
//! the main loop feeds it mouse moves, releases, resizes and a frame tick,
//! and applies whatever values the sliders report back.

pub mod app;
pub mod input;
pub mod layout;
pub mod persistence;
pub mod theme;
pub mod ui;

pub use app::AppState;
pub use theme::Theme;
