//! Error types for slider specs and configuration.

use thiserror::Error;

/// Errors from validating a slider spec or loading a slider set.
///
/// None of these cross the drag/reconcile paths at runtime: those degrade to
/// ratio 0 or draggable range 0 instead. They surface where a caller asks for
/// validation explicitly (config loading, the CLI, the pure mapper).
#[derive(Debug, Error)]
pub enum SliderError {
    #[error("empty domain: min ({min}) equals max ({max})")]
    Domain { min: f64, max: f64 },

    #[error("inverted domain: min ({min}) is greater than max ({max})")]
    InvertedRange { min: f64, max: f64 },

    #[error("{field} must be finite")]
    NonFinite { field: &'static str },

    #[error("step must be zero or a positive finite number, got {0}")]
    InvalidStep(f64),

    #[error("invalid slider config: {0}")]
    Config(String),

    #[error("failed to read slider config: {0}")]
    Io(#[from] std::io::Error),
}

impl From<toml::de::Error> for SliderError {
    fn from(err: toml::de::Error) -> Self {
        SliderError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_values() {
        let err = SliderError::Domain { min: 1.0, max: 1.0 };
        assert_eq!(err.to_string(), "empty domain: min (1) equals max (1)");

        let err = SliderError::NonFinite { field: "max" };
        assert_eq!(err.to_string(), "max must be finite");
    }
}
