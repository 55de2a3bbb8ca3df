use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::ScoringError;

/// Display tier for a score, chosen from its share of the maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreBand {
    Low,
    Mid,
    High,
    Top,
}

impl ScoreBand {
    pub fn label(self) -> &'static str {
        match self {
            ScoreBand::Low => "low",
            ScoreBand::Mid => "mid",
            ScoreBand::High => "high",
            ScoreBand::Top => "top",
        }
    }
}

impl fmt::Display for ScoreBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify `score / max`: up to 0.3 is Low, up to 0.6 Mid, up to 0.8 High,
/// anything above is Top. Each upper bound is inclusive.
pub fn score_band(score: f64, max: f64) -> Result<ScoreBand, ScoringError> {
    if !max.is_finite() || max <= 0.0 {
        return Err(ScoringError::InvalidMax { max });
    }
    // NaN fails every comparison below and would land in Top
    if !score.is_finite() {
        return Err(ScoringError::InvalidScore { score });
    }

    let ratio = score / max;
    let band = if ratio <= 0.3 {
        ScoreBand::Low
    } else if ratio <= 0.6 {
        ScoreBand::Mid
    } else if ratio <= 0.8 {
        ScoreBand::High
    } else {
        ScoreBand::Top
    };
    Ok(band)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_boundaries() {
        assert_eq!(score_band(30.0, 100.0).unwrap(), ScoreBand::Low);
        assert_eq!(score_band(30.01, 100.0).unwrap(), ScoreBand::Mid);
        assert_eq!(score_band(60.0, 100.0).unwrap(), ScoreBand::Mid);
        assert_eq!(score_band(80.0, 100.0).unwrap(), ScoreBand::High);
        assert_eq!(score_band(81.0, 100.0).unwrap(), ScoreBand::Top);
    }

    #[test]
    fn test_band_extremes() {
        assert_eq!(score_band(0.0, 100.0).unwrap(), ScoreBand::Low);
        assert_eq!(score_band(100.0, 100.0).unwrap(), ScoreBand::Top);
    }

    #[test]
    fn test_band_uses_ratio_not_absolute_score() {
        // Group badge: 8 of 12 points is 0.67
        assert_eq!(score_band(8.0, 12.0).unwrap(), ScoreBand::High);
        assert_eq!(score_band(3.0, 10.0).unwrap(), ScoreBand::Low);
    }

    #[test]
    fn test_band_invalid_max() {
        assert!(matches!(score_band(10.0, 0.0), Err(ScoringError::InvalidMax { .. })));
        assert!(matches!(score_band(10.0, -5.0), Err(ScoringError::InvalidMax { .. })));
        assert!(score_band(10.0, f64::NAN).is_err());
        assert!(score_band(10.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_band_rejects_non_finite_score() {
        assert!(matches!(score_band(f64::NAN, 100.0), Err(ScoringError::InvalidScore { .. })));
        assert!(matches!(
            score_band(f64::INFINITY, 100.0),
            Err(ScoringError::InvalidScore { .. })
        ));
        assert!(matches!(
            score_band(f64::NEG_INFINITY, 100.0),
            Err(ScoringError::InvalidScore { .. })
        ));
    }
}
