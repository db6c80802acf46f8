//! Parrot/neon theme tokens for the slider host.
//!
//! # Color Palette
//! - **Background**: Near-black / deep charcoal (base layer)
//! - **Accent**: Electric cyan (focus, idle handles)
//! - **Active**: Neon green (the handle being dragged)
//! - **Warning**: Neon orange (corrections, config fallbacks)
//! - **Neutral**: Cool purple (secondary info)
//! - **Muted**: Steel blue (track, hints)

use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    /// Near-black background (primary surface)
    pub background: Color,
    /// Electric cyan accent (idle handle, highlights)
    pub accent: Color,
    /// Neon green (handle while dragging)
    pub active: Color,
    /// Neon orange (warnings, corrections)
    pub warning: Color,
    /// Cool purple (neutral info)
    pub neutral: Color,
    /// Steel blue (track, muted text)
    pub muted: Color,
    /// White (primary text)
    pub text_primary: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::parrot_neon()
    }
}

impl Theme {
    pub const fn parrot_neon() -> Self {
        Self {
            background: Color::Rgb(18, 18, 20),
            accent: Color::Rgb(0, 255, 255),
            active: Color::Rgb(0, 255, 128),
            warning: Color::Rgb(255, 140, 0),
            neutral: Color::Rgb(147, 112, 219),
            muted: Color::Rgb(100, 149, 237),
            text_primary: Color::White,
        }
    }

    /// Handle color: neon green while dragging, cyan otherwise.
    pub fn handle_color(&self, active: bool) -> Color {
        if active {
            self.active
        } else {
            self.accent
        }
    }
}

const THEME: Theme = Theme::parrot_neon();

// ── Style helpers used by the ui module ──────────────────────────────

pub fn accent() -> Style {
    Style::default().fg(THEME.accent)
}

pub fn accent_bold() -> Style {
    accent().add_modifier(Modifier::BOLD)
}

pub fn muted() -> Style {
    Style::default().fg(THEME.muted)
}

pub fn neutral() -> Style {
    Style::default().fg(THEME.neutral)
}

pub fn warning() -> Style {
    Style::default().fg(THEME.warning)
}

pub fn label() -> Style {
    Style::default().fg(THEME.text_primary)
}

pub fn track() -> Style {
    muted()
}

/// The handle block: inverted colors so the value text sits on the handle.
pub fn handle(active: bool) -> Style {
    let style = Style::default()
        .fg(THEME.background)
        .bg(THEME.handle_color(active));
    if active {
        style.add_modifier(Modifier::BOLD)
    } else {
        style
    }
}

pub fn panel_border(active: bool) -> Style {
    if active {
        accent()
    } else {
        muted()
    }
}

pub fn panel_title(active: bool) -> Style {
    if active {
        accent_bold()
    } else {
        muted()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_creation() {
        let theme = Theme::default();
        assert_eq!(theme.background, Color::Rgb(18, 18, 20));
        assert_eq!(theme.accent, Color::Rgb(0, 255, 255));
    }

    #[test]
    fn test_handle_color() {
        let theme = Theme::default();
        assert_eq!(theme.handle_color(true), theme.active);
        assert_eq!(theme.handle_color(false), theme.accent);
        assert_eq!(handle(true).bg, Some(theme.active));
        assert_eq!(handle(false).bg, Some(theme.accent));
    }
}
