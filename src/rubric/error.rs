use thiserror::Error;

/// Errors raised while validating or scoring an assessment snapshot.
///
/// Every variant is returned to the direct caller; nothing is retried and no
/// default is ever substituted for a missing or out-of-range value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoringError {
    /// A required dimension or criterion key is absent from the snapshot.
    #[error("missing field '{key}'")]
    MissingField { key: String },

    /// A detailed-mode point value falls outside `[min, max]`.
    #[error("field '{key}' must be between {min} and {max}, got {value}")]
    RangeViolation {
        key: String,
        min: u32,
        max: u32,
        value: i64,
    },

    /// `score_band` was called with a non-positive maximum.
    #[error("band maximum must be greater than zero, got {max}")]
    InvalidMax { max: f64 },

    /// `score_band` was called with a NaN or infinite score.
    #[error("score must be a finite number, got {score}")]
    InvalidScore { score: f64 },

    /// A key that belongs to neither rubric.
    #[error("unknown field '{key}'")]
    UnknownField { key: String },

    /// A value of the wrong shape, e.g. a fractional point value.
    #[error("invalid value for '{key}': {reason}")]
    InvalidValue { key: String, reason: String },

    /// The snapshot's keys match neither rubric, or both.
    #[error("cannot tell whether snapshot is a holistic or detailed assessment")]
    AmbiguousMode,
}

impl ScoringError {
    pub(crate) fn missing(key: &str) -> Self {
        ScoringError::MissingField {
            key: key.to_string(),
        }
    }

    /// The offending key, when the error is tied to one.
    pub fn key(&self) -> Option<&str> {
        match self {
            ScoringError::MissingField { key }
            | ScoringError::RangeViolation { key, .. }
            | ScoringError::UnknownField { key }
            | ScoringError::InvalidValue { key, .. } => Some(key),
            ScoringError::InvalidMax { .. }
            | ScoringError::InvalidScore { .. }
            | ScoringError::AmbiguousMode => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_violation_message_names_bounds() {
        let err = ScoringError::RangeViolation {
            key: "swotAnalysis".to_string(),
            min: 0,
            max: 10,
            value: 11,
        };
        assert_eq!(
            err.to_string(),
            "field 'swotAnalysis' must be between 0 and 10, got 11"
        );
        assert_eq!(err.key(), Some("swotAnalysis"));
    }

    #[test]
    fn test_invalid_max_has_no_key() {
        let err = ScoringError::InvalidMax { max: 0.0 };
        assert!(err.key().is_none());
        assert!(err.to_string().contains("greater than zero"));
    }
}
