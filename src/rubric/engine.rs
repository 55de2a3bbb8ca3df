use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use super::criteria::{Criterion, DisplayGroup, DISPLAY_GROUPS};
use super::error::ScoringError;
use super::rating::{HolisticDimension, RatingLevel};

/// Which rubric an assessment was scored against.
///
/// The two rubrics are distinct: holistic scores are a mean of ratings,
/// detailed scores a sum of points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssessmentMode {
    Holistic,
    Detailed,
}

impl fmt::Display for AssessmentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssessmentMode::Holistic => write!(f, "holistic"),
            AssessmentMode::Detailed => write!(f, "detailed"),
        }
    }
}

/// Points awarded for a single dimension or criterion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contribution {
    pub key: &'static str,
    pub label: &'static str,
    pub points: u32,
    pub max: u32,
}

/// A computed score together with the per-field points it was built from.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreBreakdown {
    pub mode: AssessmentMode,
    pub score: f64,
    pub max: f64,
    pub contributions: Vec<Contribution>,
}

impl ScoreBreakdown {
    fn points_for(&self, key: &str) -> u32 {
        self.contributions
            .iter()
            .find(|c| c.key == key)
            .map(|c| c.points)
            .unwrap_or(0)
    }

    /// Subtotals per display group, in display order. Empty for holistic
    /// breakdowns, whose ratings are not points.
    pub fn group_subtotals(&self) -> Vec<(DisplayGroup, u32)> {
        if self.mode != AssessmentMode::Detailed {
            return Vec::new();
        }
        DISPLAY_GROUPS
            .iter()
            .map(|group| {
                let points = group.members.iter().map(|c| self.points_for(c.key())).sum();
                (*group, points)
            })
            .collect()
    }
}

/// Mean of the eight holistic ratings on the 0-100 scale.
///
/// Every dimension must be present; keys outside the holistic rubric are
/// rejected. The result keeps full precision.
pub fn compute_holistic_score(
    ratings: &HashMap<String, RatingLevel>,
) -> Result<f64, ScoringError> {
    holistic_breakdown(ratings).map(|b| b.score)
}

/// Sum of the seventeen detailed criteria, each bounded by its maximum.
pub fn compute_detailed_score(fields: &HashMap<String, i64>) -> Result<u32, ScoringError> {
    let breakdown = detailed_breakdown(fields)?;
    Ok(breakdown.contributions.iter().map(|c| c.points).sum())
}

pub fn holistic_breakdown(
    ratings: &HashMap<String, RatingLevel>,
) -> Result<ScoreBreakdown, ScoringError> {
    let mut contributions = Vec::with_capacity(HolisticDimension::ALL.len());
    for dim in HolisticDimension::ALL {
        let level = ratings
            .get(dim.key())
            .ok_or_else(|| ScoringError::missing(dim.key()))?;
        contributions.push(Contribution {
            key: dim.key(),
            label: dim.label(),
            points: level.score(),
            max: RatingLevel::VeryGood.score(),
        });
    }
    reject_unknown(ratings.keys(), |k| HolisticDimension::from_key(k).is_some())?;

    let total: u32 = contributions.iter().map(|c| c.points).sum();
    let score = f64::from(total) / HolisticDimension::ALL.len() as f64;

    Ok(ScoreBreakdown {
        mode: AssessmentMode::Holistic,
        score,
        max: f64::from(RatingLevel::VeryGood.score()),
        contributions,
    })
}

pub fn detailed_breakdown(fields: &HashMap<String, i64>) -> Result<ScoreBreakdown, ScoringError> {
    let mut contributions = Vec::with_capacity(Criterion::ALL.len());
    for criterion in Criterion::ALL {
        let value = *fields
            .get(criterion.key())
            .ok_or_else(|| ScoringError::missing(criterion.key()))?;
        let max = criterion.max_points();
        if value < 0 || value > i64::from(max) {
            return Err(ScoringError::RangeViolation {
                key: criterion.key().to_string(),
                min: 0,
                max,
                value,
            });
        }
        contributions.push(Contribution {
            key: criterion.key(),
            label: criterion.label(),
            points: value as u32,
            max,
        });
    }
    reject_unknown(fields.keys(), |k| Criterion::from_key(k).is_some())?;

    let total: u32 = contributions.iter().map(|c| c.points).sum();
    let max: u32 = contributions.iter().map(|c| c.max).sum();

    Ok(ScoreBreakdown {
        mode: AssessmentMode::Detailed,
        score: f64::from(total),
        max: f64::from(max),
        contributions,
    })
}

/// Report the alphabetically first key the rubric does not know.
fn reject_unknown<'a>(
    keys: impl Iterator<Item = &'a String>,
    known: impl Fn(&str) -> bool,
) -> Result<(), ScoringError> {
    let unknown = keys.filter(|k| !known(k.as_str())).min();
    match unknown {
        Some(key) => Err(ScoringError::UnknownField { key: key.clone() }),
        None => Ok(()),
    }
}

/// Round a score for display. The stored value keeps full precision.
pub fn round_for_display(score: f64, decimals: u8) -> f64 {
    let factor = 10f64.powi(i32::from(decimals));
    (score * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    fn holistic_all(level: RatingLevel) -> HashMap<String, RatingLevel> {
        HolisticDimension::ALL
            .iter()
            .map(|d| (d.key().to_string(), level))
            .collect()
    }

    fn detailed_with(f: impl Fn(Criterion) -> i64) -> HashMap<String, i64> {
        Criterion::ALL
            .iter()
            .map(|c| (c.key().to_string(), f(*c)))
            .collect()
    }

    #[test]
    fn test_holistic_extremes() {
        assert_eq!(compute_holistic_score(&holistic_all(RatingLevel::VeryGood)).unwrap(), 100.0);
        assert_eq!(compute_holistic_score(&holistic_all(RatingLevel::VeryBad)).unwrap(), 0.0);
        assert_eq!(compute_holistic_score(&holistic_all(RatingLevel::Average)).unwrap(), 50.0);
    }

    #[test]
    fn test_holistic_fractional_mean() {
        let mut ratings = holistic_all(RatingLevel::Good);
        ratings.insert("originality".to_string(), RatingLevel::Bad);
        // (7 * 75 + 25) / 8 = 68.75
        assert_eq!(compute_holistic_score(&ratings).unwrap(), 68.75);

        ratings.insert("innovation".to_string(), RatingLevel::VeryBad);
        ratings.insert("sustainability".to_string(), RatingLevel::Bad);
        // (5 * 75 + 25 + 0 + 25) / 8 = 53.125
        assert_eq!(compute_holistic_score(&ratings).unwrap(), 53.125);
    }

    #[test]
    fn test_holistic_missing_dimension() {
        let mut ratings = holistic_all(RatingLevel::Good);
        ratings.remove("sustainability");
        let err = compute_holistic_score(&ratings).unwrap_err();
        assert_eq!(
            err,
            ScoringError::MissingField {
                key: "sustainability".to_string()
            }
        );
    }

    #[test]
    fn test_holistic_unknown_dimension() {
        let mut ratings = holistic_all(RatingLevel::Good);
        ratings.insert("charisma".to_string(), RatingLevel::Good);
        let err = compute_holistic_score(&ratings).unwrap_err();
        assert_eq!(err.key(), Some("charisma"));
        assert!(matches!(err, ScoringError::UnknownField { .. }));
    }

    #[test]
    fn test_detailed_extremes() {
        assert_eq!(compute_detailed_score(&detailed_with(|c| i64::from(c.max_points()))).unwrap(), 100);
        assert_eq!(compute_detailed_score(&detailed_with(|_| 0)).unwrap(), 0);
    }

    #[test]
    fn test_detailed_range_violation() {
        let mut fields = detailed_with(|_| 1);
        fields.insert("swotAnalysis".to_string(), 11);
        let err = compute_detailed_score(&fields).unwrap_err();
        assert_eq!(
            err,
            ScoringError::RangeViolation {
                key: "swotAnalysis".to_string(),
                min: 0,
                max: 10,
                value: 11,
            }
        );
    }

    #[test]
    fn test_detailed_negative_value() {
        let mut fields = detailed_with(|_| 1);
        fields.insert("references".to_string(), -1);
        let err = compute_detailed_score(&fields).unwrap_err();
        assert!(matches!(err, ScoringError::RangeViolation { max: 4, value: -1, .. }));
    }

    #[test]
    fn test_detailed_missing_field() {
        let mut fields = detailed_with(|_| 2);
        fields.remove("reportFormat");
        let err = compute_detailed_score(&fields).unwrap_err();
        assert_eq!(err, ScoringError::MissingField { key: "reportFormat".to_string() });
    }

    #[test]
    fn test_detailed_breakdown_group_subtotals() {
        let breakdown = detailed_breakdown(&detailed_with(|c| i64::from(c.max_points()))).unwrap();
        assert_eq!(breakdown.max, 100.0);
        assert_eq!(breakdown.contributions.len(), 17);

        let subtotals = breakdown.group_subtotals();
        let summary = subtotals.iter().find(|(g, _)| g.title == "Project Summary").unwrap();
        assert_eq!(summary.1, 8);
        let grouped_total: u32 = subtotals.iter().map(|(_, p)| *p).sum();
        assert_eq!(f64::from(grouped_total), breakdown.score);
    }

    #[test]
    fn test_holistic_breakdown_has_no_group_subtotals() {
        // applicability is a holistic dimension too, but its rating is not points
        let breakdown = holistic_breakdown(&holistic_all(RatingLevel::Good)).unwrap();
        assert_eq!(breakdown.mode, AssessmentMode::Holistic);
        assert!(breakdown.group_subtotals().is_empty());
    }

    #[test]
    fn test_round_for_display() {
        assert_eq!(round_for_display(53.125, 2), 53.13);
        assert_eq!(round_for_display(68.75, 0), 69.0);
        assert_eq!(round_for_display(100.0, 2), 100.0);
    }
}
