//! Slider set configuration — a list of slider specs loaded from TOML.
//!
//! ```toml
//! [[slider]]
//! label = "Volume"
//! min = 0
//! max = 100
//! value = 67
//! unit = "%"
//!
//! [[slider]]
//! label = "Balance"
//! min = -1
//! max = 1
//! step = 0.25
//! value = 0
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SliderError;
use crate::props::SliderSpec;

/// An ordered list of independent sliders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SliderSet {
    #[serde(rename = "slider", default)]
    pub sliders: Vec<SliderSpec>,
}

impl Default for SliderSet {
    /// Two demo sliders: a percentage and a unitless fraction.
    fn default() -> Self {
        Self {
            sliders: vec![
                SliderSpec::new("Label", 0.0, 100.0, 67.0).with_unit("%"),
                SliderSpec::new("Label 2", 0.0, 1.0, 0.33),
            ],
        }
    }
}

impl SliderSet {
    /// Parse and validate a TOML slider set.
    pub fn from_toml_str(s: &str) -> Result<Self, SliderError> {
        let set: SliderSet = toml::from_str(s)?;
        set.validate()?;
        Ok(set)
    }

    /// Read, parse and validate a TOML slider set from disk.
    pub fn load(path: &Path) -> Result<Self, SliderError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate every spec; the error names the offending slider.
    pub fn validate(&self) -> Result<(), SliderError> {
        if self.sliders.is_empty() {
            return Err(SliderError::Config("no [[slider]] entries".into()));
        }
        for (i, spec) in self.sliders.iter().enumerate() {
            spec.validate().map_err(|err| {
                SliderError::Config(format!("slider {} ('{}'): {err}", i + 1, spec.label))
            })?;
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.sliders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sliders.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_set_is_valid() {
        let set = SliderSet::default();
        assert_eq!(set.len(), 2);
        assert!(set.validate().is_ok());
        assert_eq!(set.sliders[0].unit.as_deref(), Some("%"));
        assert_eq!(set.sliders[1].unit, None);
    }

    #[test]
    fn parses_toml_with_defaults() {
        let set = SliderSet::from_toml_str(
            r#"
            [[slider]]
            label = "Volume"
            min = 0.0
            max = 100.0
            value = 67.0
            unit = "%"

            [[slider]]
            label = "Balance"
            min = -1.0
            max = 1.0
            step = 0.25
            value = 0.0
            "#,
        )
        .unwrap();

        assert_eq!(set.len(), 2);
        assert_eq!(set.sliders[0].step, 0.0);
        assert_eq!(set.sliders[1].step, 0.25);
        assert_eq!(set.sliders[1].unit, None);
    }

    #[test]
    fn rejects_invalid_slider_with_its_name() {
        let err = SliderSet::from_toml_str(
            r#"
            [[slider]]
            label = "Broken"
            min = 5.0
            max = 1.0
            value = 2.0
            "#,
        )
        .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("slider 1"), "{msg}");
        assert!(msg.contains("Broken"), "{msg}");
    }

    #[test]
    fn rejects_empty_and_malformed() {
        assert!(matches!(
            SliderSet::from_toml_str(""),
            Err(SliderError::Config(_))
        ));
        assert!(matches!(
            SliderSet::from_toml_str("[[slider]]\nlabel = 3"),
            Err(SliderError::Config(_))
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = SliderSet::load(Path::new("/nonexistent/sliders.toml")).unwrap_err();
        assert!(matches!(err, SliderError::Io(_)));
    }
}
