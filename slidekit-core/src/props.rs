//! SliderSpec — the owner-supplied props for one slider.

use serde::{Deserialize, Serialize};

use crate::error::SliderError;
use crate::mapper;

/// Props for a single slider, supplied fresh by the owner every render.
///
/// The owner is the single source of truth for `value`. The control only
/// reads it, derives layout from it, and reports sanitized replacements back
/// through the change callback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SliderSpec {
    pub label: String,
    pub min: f64,
    pub max: f64,
    /// Quantization granularity in domain units. 0 means continuous.
    #[serde(default)]
    pub step: f64,
    pub value: f64,
    /// Display suffix only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

impl SliderSpec {
    pub fn new(label: impl Into<String>, min: f64, max: f64, value: f64) -> Self {
        Self {
            label: label.into(),
            min,
            max,
            step: 0.0,
            value,
            unit: None,
        }
    }

    pub fn with_step(mut self, step: f64) -> Self {
        self.step = step;
        self
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    /// Check the programmer-facing invariants: finite bounds, `min < max`,
    /// and a non-negative finite step.
    ///
    /// `value` is deliberately not checked. Out-of-range values are a normal
    /// input and get sanitized, not rejected.
    pub fn validate(&self) -> Result<(), SliderError> {
        if !self.min.is_finite() {
            return Err(SliderError::NonFinite { field: "min" });
        }
        if !self.max.is_finite() {
            return Err(SliderError::NonFinite { field: "max" });
        }
        if self.min == self.max {
            return Err(SliderError::Domain {
                min: self.min,
                max: self.max,
            });
        }
        if self.min > self.max {
            return Err(SliderError::InvertedRange {
                min: self.min,
                max: self.max,
            });
        }
        if !self.step.is_finite() || self.step < 0.0 {
            return Err(SliderError::InvalidStep(self.step));
        }
        Ok(())
    }

    /// The owner's value run through [`mapper::allowable_value`].
    pub fn allowable(&self, raw: f64) -> f64 {
        mapper::allowable_value(raw, self.min, self.max, self.step)
    }

    /// Normalized position of the sanitized current value, in `[0, 1]`.
    pub fn ratio(&self) -> f64 {
        let value = self.allowable(self.value);
        mapper::clamp_ratio(mapper::normalize_or_zero(value, self.min, self.max))
    }

    pub(crate) fn range_key(&self) -> RangeKey {
        RangeKey {
            min: self.min.to_bits(),
            max: self.max.to_bits(),
            step: self.step.to_bits(),
        }
    }
}

/// The props that force a re-measure and re-quantization when they change.
/// Compared bitwise so a NaN prop does not read as "changed" every render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RangeKey {
    min: u64,
    max: u64,
    step: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_accepts_well_formed_spec() {
        let spec = SliderSpec::new("Gain", 0.0, 1.0, 0.5).with_step(0.1);
        assert!(spec.validate().is_ok());
    }

    #[test]
    fn validate_rejects_programmer_errors() {
        let empty = SliderSpec::new("x", 1.0, 1.0, 1.0);
        assert!(matches!(empty.validate(), Err(SliderError::Domain { .. })));

        let inverted = SliderSpec::new("x", 2.0, 1.0, 1.0);
        assert!(matches!(
            inverted.validate(),
            Err(SliderError::InvertedRange { .. })
        ));

        let infinite = SliderSpec::new("x", 0.0, f64::INFINITY, 1.0);
        assert!(matches!(
            infinite.validate(),
            Err(SliderError::NonFinite { field: "max" })
        ));

        let negative_step = SliderSpec::new("x", 0.0, 1.0, 0.5).with_step(-0.1);
        assert!(matches!(
            negative_step.validate(),
            Err(SliderError::InvalidStep(_))
        ));
    }

    #[test]
    fn validate_ignores_out_of_range_value() {
        let spec = SliderSpec::new("x", 0.0, 1.0, 7.0);
        assert!(spec.validate().is_ok());
    }

    #[test]
    fn ratio_uses_sanitized_value() {
        let spec = SliderSpec::new("x", 0.0, 100.0, 150.0);
        assert_eq!(spec.ratio(), 1.0);

        let spec = SliderSpec::new("x", 0.0, 1.0, 0.33).with_step(0.2);
        assert!((spec.ratio() - 0.4).abs() < 1e-9);
    }

    #[test]
    fn ratio_of_empty_domain_is_zero() {
        let spec = SliderSpec::new("x", 5.0, 5.0, 5.0);
        assert_eq!(spec.ratio(), 0.0);
    }
}
