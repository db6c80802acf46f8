//! Per-render derivation: formatted value text, minimum handle width, and the
//! `role="slider"` range triple.

use crate::props::SliderSpec;

/// Format a value for display: no decimals plus the unit when a unit is set,
/// two decimals otherwise.
pub fn format_value(value: f64, unit: Option<&str>) -> String {
    match unit {
        Some(unit) => format!("{value:.0}{unit}"),
        None => format!("{value:.2}"),
    }
}

/// Character count of the longer of the formatted min and max.
///
/// Sizing the handle to this keeps it from changing width as the value's
/// text gets longer or shorter during a drag.
pub fn max_formatted_chars(min: f64, max: f64, unit: Option<&str>) -> usize {
    let min_len = format_value(min, unit).chars().count();
    let max_len = format_value(max, unit).chars().count();
    min_len.max(max_len)
}

/// Assistive range semantics: `aria-valuemin/now/max`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AriaRange {
    pub value_min: f64,
    /// Rounded to two decimals.
    pub value_now: f64,
    pub value_max: f64,
}

impl AriaRange {
    pub const ROLE: &'static str = "slider";

    pub fn new(min: f64, value: f64, max: f64) -> Self {
        Self {
            value_min: min,
            value_now: (value * 100.0).round() / 100.0,
            value_max: max,
        }
    }
}

/// Everything a renderer needs to draw one slider this cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct SliderView {
    pub label: String,
    /// Formatted sanitized value, e.g. `67%` or `0.33`.
    pub text: String,
    /// Minimum handle width in characters.
    pub min_handle_chars: usize,
    /// Handle offset from the track origin in whole pixels.
    pub offset: f64,
    /// True while a drag is in progress (styling only).
    pub active: bool,
    pub aria: AriaRange,
}

impl SliderView {
    pub fn derive(props: &SliderSpec, offset: f64, active: bool) -> Self {
        let value = props.allowable(props.value);
        let unit = props.unit.as_deref();
        Self {
            label: props.label.clone(),
            text: format_value(value, unit),
            min_handle_chars: max_formatted_chars(props.min, props.max, unit),
            offset,
            active,
            aria: AriaRange::new(props.min, value, props.max),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_with_and_without_unit() {
        assert_eq!(format_value(67.0, Some("%")), "67%");
        assert_eq!(format_value(66.6, Some("%")), "67%");
        assert_eq!(format_value(0.33, None), "0.33");
        assert_eq!(format_value(1.0, None), "1.00");
    }

    #[test]
    fn handle_width_fits_longest_bound() {
        assert_eq!(max_formatted_chars(0.0, 100.0, Some("%")), 4); // "100%"
        assert_eq!(max_formatted_chars(0.0, 1.0, None), 4); // "0.00" / "1.00"
        assert_eq!(max_formatted_chars(-1000.0, 1.0, None), 8); // "-1000.00"
    }

    #[test]
    fn aria_rounds_value_now() {
        let aria = AriaRange::new(0.0, 0.33333, 1.0);
        assert_eq!(aria.value_now, 0.33);
        assert_eq!(aria.value_min, 0.0);
        assert_eq!(aria.value_max, 1.0);
        assert_eq!(AriaRange::ROLE, "slider");
    }

    #[test]
    fn derive_formats_the_sanitized_value() {
        let props = SliderSpec::new("Volume", 0.0, 100.0, 140.0).with_unit("%");
        let view = SliderView::derive(&props, 200.0, true);
        assert_eq!(view.label, "Volume");
        assert_eq!(view.text, "100%");
        assert_eq!(view.aria.value_now, 100.0);
        assert!(view.active);
    }
}
