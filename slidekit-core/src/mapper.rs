//! Value/offset mapping — pure conversions between domain values, ratios and
//! pixel offsets, plus step quantization.
//!
//! Every function here is stateless and deterministic. The chain used by the
//! drag path is:
//!
//! ```text
//! pointer offset ──ratio_from_offset──▶ ratio ──denormalize──▶ raw value ──allowable_value──▶ value
//! ```
//!
//! and the render path runs the other way:
//!
//! ```text
//! value ──allowable_value──▶ value ──normalize──▶ ratio ──offset_from_ratio──▶ offset (whole px)
//! ```
//!
//! Only the rendered offset is rounded. Domain values always derive from the
//! raw pointer ratio, never from a rounded offset fed back through
//! [`ratio_from_offset`].

use crate::error::SliderError;

/// Map a domain value onto `[0, 1]` relative to `[min, max]`.
///
/// Fails with [`SliderError::Domain`] when `min == max`, since the ratio is
/// undefined there.
pub fn normalize(value: f64, min: f64, max: f64) -> Result<f64, SliderError> {
    let span = max - min;
    if span == 0.0 {
        return Err(SliderError::Domain { min, max });
    }
    Ok((value - min) / span)
}

/// [`normalize`], degrading an empty domain to ratio 0 instead of failing.
///
/// This is what the control uses: an empty domain pins the handle at the
/// track origin rather than letting NaN reach layout.
pub fn normalize_or_zero(value: f64, min: f64, max: f64) -> f64 {
    match normalize(value, min, max) {
        Ok(ratio) => ratio,
        Err(err) => {
            tracing::warn!(%err, "normalizing against an empty domain, pinning ratio to 0");
            0.0
        }
    }
}

/// Inverse of [`normalize`].
pub fn denormalize(ratio: f64, min: f64, max: f64) -> f64 {
    ratio * (max - min) + min
}

/// Clamp a ratio to `[0, 1]`. NaN maps to 0.
pub fn clamp_ratio(ratio: f64) -> f64 {
    if ratio.is_nan() {
        return 0.0;
    }
    ratio.clamp(0.0, 1.0)
}

/// Pixel offset of the handle for a ratio, rounded to whole pixels.
pub fn offset_from_ratio(ratio: f64, draggable_range: f64) -> f64 {
    (ratio * draggable_range).round()
}

/// Ratio for a pixel offset. An unmeasured track (range 0) yields 0.
pub fn ratio_from_offset(offset: f64, draggable_range: f64) -> f64 {
    if draggable_range > 0.0 {
        offset / draggable_range
    } else {
        0.0
    }
}

/// True when `step` enables snapping. Zero, negative and non-finite steps
/// mean continuous mode.
pub fn is_stepped(step: f64) -> bool {
    step.is_finite() && step > 0.0
}

/// How far, in steps, a value may sit from a grid point and still count as
/// on it. Absorbs the error of `(value - min) / step` for decimal steps.
const ON_STEP_TOLERANCE: f64 = 1e-9;

/// Snap `value` to the nearest multiple of `step` counted from `min`, then
/// clamp back into the domain. Continuous mode returns `value` untouched, and
/// so does a value already on the grid (`0.3` stays `0.3` with step `0.1`,
/// rather than becoming `3.0 * 0.1`).
pub fn quantize(value: f64, min: f64, max: f64, step: f64) -> f64 {
    if !is_stepped(step) {
        return value;
    }
    let steps = (value - min) / step;
    let nearest = steps.round();
    if (steps - nearest).abs() <= ON_STEP_TOLERANCE * nearest.abs().max(1.0) {
        return clamp_to_domain(value, min, max);
    }
    clamp_to_domain(nearest * step + min, min, max)
}

/// Clamp a value into `[min, max]`. NaN maps to `min`.
pub fn clamp_to_domain(value: f64, min: f64, max: f64) -> f64 {
    if value.is_nan() {
        return min;
    }
    // Not `f64::clamp`: that panics on an inverted range, which is a
    // programmer error but must not take down a render.
    min.max(value.min(max))
}

/// The single sanitizer for every externally observable value: clamp into
/// the domain, then quantize. Idempotent and non-decreasing in `raw`.
pub fn allowable_value(raw: f64, min: f64, max: f64, step: f64) -> f64 {
    quantize(clamp_to_domain(raw, min, max), min, max, step)
}
