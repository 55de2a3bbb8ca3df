use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::rubric::{AssessmentMode, Criterion, HolisticDimension, RatingLevel, ScoringError};

/// Key holding the referee's free-text comment.
pub const DESCRIPTION_KEY: &str = "description";
/// Key holding a previously computed score.
pub const SCORE_KEY: &str = "score";

/// A single untyped value as read from a snapshot file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SnapshotValue {
    /// `~`/`null`: the field has not been filled in.
    Empty,
    Bool(bool),
    Integer(i64),
    Number(f64),
    Text(String),
}

/// Flat key/value view of an assessment, as the form layer hands it over.
///
/// Holds raw values; nothing is validated until the snapshot is converted
/// into the typed map one of the rubrics consumes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot {
    fields: BTreeMap<String, SnapshotValue>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: SnapshotValue) {
        self.fields.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&SnapshotValue> {
        self.fields.get(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Rubric keys only: `description` and `score` are skipped.
    fn rubric_entries(&self) -> impl Iterator<Item = (&String, &SnapshotValue)> {
        self.fields
            .iter()
            .filter(|(k, _)| k.as_str() != DESCRIPTION_KEY && k.as_str() != SCORE_KEY)
    }

    /// Decide which rubric the snapshot belongs to from the keys that only one
    /// rubric uses. `applicability` appears in both and is ignored here.
    pub fn mode(&self) -> Result<AssessmentMode, ScoringError> {
        let mut holistic = false;
        let mut detailed = false;
        for (key, _) in self.rubric_entries() {
            let in_holistic = HolisticDimension::from_key(key).is_some();
            let in_detailed = Criterion::from_key(key).is_some();
            match (in_holistic, in_detailed) {
                (true, false) => holistic = true,
                (false, true) => detailed = true,
                _ => {}
            }
        }

        match (holistic, detailed) {
            (true, false) => Ok(AssessmentMode::Holistic),
            (false, true) => Ok(AssessmentMode::Detailed),
            _ => Err(ScoringError::AmbiguousMode),
        }
    }

    pub fn description(&self) -> Result<String, ScoringError> {
        match self.fields.get(DESCRIPTION_KEY) {
            None | Some(SnapshotValue::Empty) => Ok(String::new()),
            Some(SnapshotValue::Text(text)) => Ok(text.clone()),
            Some(SnapshotValue::Bool(b)) => Ok(b.to_string()),
            Some(SnapshotValue::Integer(n)) => Ok(n.to_string()),
            Some(SnapshotValue::Number(n)) => Ok(n.to_string()),
        }
    }

    /// Score stored alongside the fields, if any.
    pub fn stored_score(&self) -> Option<f64> {
        match self.fields.get(SCORE_KEY) {
            Some(SnapshotValue::Integer(n)) => Some(*n as f64),
            Some(SnapshotValue::Number(n)) => Some(*n),
            Some(SnapshotValue::Text(text)) => text.trim().parse().ok(),
            _ => None,
        }
    }

    /// Typed holistic ratings. Empty values are left out so that the engine
    /// reports them as missing.
    pub fn holistic_ratings(&self) -> Result<HashMap<String, RatingLevel>, ScoringError> {
        let mut ratings = HashMap::new();
        for (key, value) in self.rubric_entries() {
            let level = match value {
                SnapshotValue::Empty => continue,
                SnapshotValue::Text(text) => {
                    text.parse::<RatingLevel>()
                        .map_err(|reason| ScoringError::InvalidValue {
                            key: key.clone(),
                            reason,
                        })?
                }
                SnapshotValue::Integer(_) | SnapshotValue::Number(_) => {
                    return Err(ScoringError::InvalidValue {
                        key: key.clone(),
                        reason: "expected a rating such as GOOD, got a number".to_string(),
                    })
                }
                SnapshotValue::Bool(b) => {
                    return Err(ScoringError::InvalidValue {
                        key: key.clone(),
                        reason: format!("expected a rating such as GOOD, got {}", b),
                    })
                }
            };
            ratings.insert(key.clone(), level);
        }
        Ok(ratings)
    }

    /// Typed detailed point values. Range checks are left to the engine.
    pub fn detailed_fields(&self) -> Result<HashMap<String, i64>, ScoringError> {
        let mut fields = HashMap::new();
        for (key, value) in self.rubric_entries() {
            let points = match value {
                SnapshotValue::Empty => continue,
                SnapshotValue::Integer(n) => *n,
                SnapshotValue::Bool(b) => {
                    return Err(ScoringError::InvalidValue {
                        key: key.clone(),
                        reason: format!("expected whole points, got {}", b),
                    })
                }
                SnapshotValue::Number(n) if n.fract() == 0.0 && n.is_finite() => *n as i64,
                SnapshotValue::Number(n) => {
                    return Err(ScoringError::InvalidValue {
                        key: key.clone(),
                        reason: format!("expected whole points, got {}", n),
                    })
                }
                SnapshotValue::Text(text) => {
                    text.trim()
                        .parse::<i64>()
                        .map_err(|_| ScoringError::InvalidValue {
                            key: key.clone(),
                            reason: format!("expected whole points, got '{}'", text),
                        })?
                }
            };
            fields.insert(key.clone(), points);
        }
        Ok(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(yaml: &str) -> Snapshot {
        serde_saphyr::from_str(yaml).unwrap()
    }

    #[test]
    fn test_parse_holistic_snapshot() {
        let snapshot = parse(
            r#"
originality: GOOD
innovation: VERY_GOOD
description: "Solid prototype"
"#,
        );
        assert_eq!(snapshot.len(), 3);
        assert_eq!(snapshot.mode().unwrap(), AssessmentMode::Holistic);
        assert_eq!(snapshot.description().unwrap(), "Solid prototype");

        let ratings = snapshot.holistic_ratings().unwrap();
        assert_eq!(ratings.get("innovation"), Some(&RatingLevel::VeryGood));
        assert!(!ratings.contains_key("description"));
    }

    #[test]
    fn test_parse_detailed_snapshot() {
        let snapshot = parse(
            r#"
solution: 10
swotAnalysis: 7
references: ~
score: 17
"#,
        );
        assert_eq!(snapshot.mode().unwrap(), AssessmentMode::Detailed);
        assert_eq!(snapshot.stored_score(), Some(17.0));

        let fields = snapshot.detailed_fields().unwrap();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields.get("solution"), Some(&10));
        assert!(!fields.contains_key("references"));
    }

    #[test]
    fn test_shared_key_alone_is_ambiguous() {
        let snapshot = parse("applicability: 4\n");
        assert_eq!(snapshot.mode().unwrap_err(), ScoringError::AmbiguousMode);
    }

    #[test]
    fn test_mixed_keys_are_ambiguous() {
        let snapshot = parse("originality: GOOD\nsolution: 3\n");
        assert_eq!(snapshot.mode().unwrap_err(), ScoringError::AmbiguousMode);
    }

    #[test]
    fn test_fractional_points_rejected() {
        let snapshot = parse("solution: 2.5\n");
        let err = snapshot.detailed_fields().unwrap_err();
        assert!(matches!(err, ScoringError::InvalidValue { ref key, .. } if key == "solution"));
    }

    #[test]
    fn test_whole_float_points_accepted() {
        let snapshot = parse("solution: 3.0\n");
        assert_eq!(snapshot.detailed_fields().unwrap().get("solution"), Some(&3));
    }

    #[test]
    fn test_numeric_rating_rejected() {
        let snapshot = parse("originality: 75\n");
        let err = snapshot.holistic_ratings().unwrap_err();
        assert_eq!(err.key(), Some("originality"));
    }

    #[test]
    fn test_boolean_rating_is_invalid_value() {
        let snapshot = parse("originality: true\ninnovation: GOOD\n");
        let err = snapshot.holistic_ratings().unwrap_err();
        assert!(matches!(err, ScoringError::InvalidValue { ref key, .. } if key == "originality"));
    }

    #[test]
    fn test_boolean_points_is_invalid_value() {
        let snapshot: Snapshot = serde_json::from_str(r#"{"solution": false}"#).unwrap();
        let err = snapshot.detailed_fields().unwrap_err();
        assert!(matches!(err, ScoringError::InvalidValue { ref key, .. } if key == "solution"));
    }

    #[test]
    fn test_json_snapshot() {
        let snapshot: Snapshot =
            serde_json::from_str(r#"{"originality": "BAD", "score": 62.5}"#).unwrap();
        assert_eq!(snapshot.stored_score(), Some(62.5));
        assert_eq!(snapshot.description().unwrap(), "");
    }
}
