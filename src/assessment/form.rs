use std::collections::{BTreeSet, HashMap};
use tracing::debug;

use super::record::{DetailedAssessment, HolisticAssessment};
use super::snapshot::SnapshotValue;
use crate::rubric::{
    compute_detailed_score, compute_holistic_score, Criterion, HolisticDimension, RatingLevel,
    ScoringError,
};

/// Rating a holistic form starts from when pre-populated.
pub const DEFAULT_RATING: RatingLevel = RatingLevel::Average;

/// Points a detailed form starts from when pre-populated: half the maximum,
/// rounded down.
pub fn default_points(criterion: Criterion) -> u32 {
    criterion.max_points() / 2
}

/// An in-progress holistic assessment.
///
/// Every mutation recomputes the score. Pre-populated values are tracked
/// separately from values the referee actually chose.
#[derive(Debug, Clone)]
pub struct HolisticForm {
    ratings: HashMap<String, RatingLevel>,
    touched: BTreeSet<HolisticDimension>,
    description: String,
    score: Result<f64, ScoringError>,
}

impl Default for HolisticForm {
    fn default() -> Self {
        Self::new()
    }
}

impl HolisticForm {
    /// Empty form: no score until every dimension is rated.
    pub fn new() -> Self {
        let ratings = HashMap::new();
        let score = compute_holistic_score(&ratings);
        Self {
            ratings,
            touched: BTreeSet::new(),
            description: String::new(),
            score,
        }
    }

    /// Form with every dimension set to [`DEFAULT_RATING`].
    pub fn prefilled() -> Self {
        let ratings: HashMap<String, RatingLevel> = HolisticDimension::ALL
            .iter()
            .map(|dim| (dim.key().to_string(), DEFAULT_RATING))
            .collect();
        let score = compute_holistic_score(&ratings);
        Self {
            ratings,
            touched: BTreeSet::new(),
            description: String::new(),
            score,
        }
    }

    /// Record the referee's rating for one dimension and return the new score.
    pub fn set(&mut self, dim: HolisticDimension, level: RatingLevel) -> Result<f64, ScoringError> {
        self.ratings.insert(dim.key().to_string(), level);
        self.touched.insert(dim);
        self.recompute()
    }

    /// Withdraw a rating.
    pub fn clear(&mut self, dim: HolisticDimension) -> Result<f64, ScoringError> {
        self.ratings.remove(dim.key());
        self.touched.remove(&dim);
        self.recompute()
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn rating(&self, dim: HolisticDimension) -> Option<RatingLevel> {
        self.ratings.get(dim.key()).copied()
    }

    pub fn score(&self) -> Result<f64, ScoringError> {
        self.score.clone()
    }

    /// Dimensions the referee has not explicitly rated, in rubric order.
    pub fn untouched(&self) -> Vec<HolisticDimension> {
        HolisticDimension::ALL
            .into_iter()
            .filter(|dim| !self.touched.contains(dim))
            .collect()
    }

    /// Ordered key/value view, used to render templates.
    pub fn entries(&self) -> Vec<(&'static str, SnapshotValue)> {
        HolisticDimension::ALL
            .iter()
            .map(|dim| {
                let value = match self.rating(*dim) {
                    Some(level) => SnapshotValue::Text(level.key().to_string()),
                    None => SnapshotValue::Empty,
                };
                (dim.key(), value)
            })
            .collect()
    }

    /// Freeze the form into a record. Pre-populated values count as input.
    pub fn finalize(self) -> Result<HolisticAssessment, ScoringError> {
        HolisticAssessment::from_ratings(&self.ratings, self.description)
    }

    /// Freeze the form, refusing any dimension the referee never touched.
    pub fn finalize_strict(self) -> Result<HolisticAssessment, ScoringError> {
        if let Some(dim) = self.untouched().first() {
            debug!(key = dim.key(), "refusing to finalize untouched dimension");
            return Err(ScoringError::missing(dim.key()));
        }
        self.finalize()
    }

    fn recompute(&mut self) -> Result<f64, ScoringError> {
        self.score = compute_holistic_score(&self.ratings);
        self.score.clone()
    }
}

/// An in-progress detailed assessment.
#[derive(Debug, Clone)]
pub struct DetailedForm {
    fields: HashMap<String, i64>,
    touched: BTreeSet<Criterion>,
    description: String,
    score: Result<u32, ScoringError>,
}

impl Default for DetailedForm {
    fn default() -> Self {
        Self::new()
    }
}

impl DetailedForm {
    pub fn new() -> Self {
        let fields = HashMap::new();
        let score = compute_detailed_score(&fields);
        Self {
            fields,
            touched: BTreeSet::new(),
            description: String::new(),
            score,
        }
    }

    /// Form with every criterion set to [`default_points`].
    pub fn prefilled() -> Self {
        let fields: HashMap<String, i64> = Criterion::ALL
            .iter()
            .map(|c| (c.key().to_string(), i64::from(default_points(*c))))
            .collect();
        let score = compute_detailed_score(&fields);
        Self {
            fields,
            touched: BTreeSet::new(),
            description: String::new(),
            score,
        }
    }

    /// Record points for one criterion and return the new total.
    ///
    /// Out-of-range values are stored as given and surface as a
    /// `RangeViolation` until corrected.
    pub fn set(&mut self, criterion: Criterion, points: i64) -> Result<u32, ScoringError> {
        self.fields.insert(criterion.key().to_string(), points);
        self.touched.insert(criterion);
        self.recompute()
    }

    /// Like [`DetailedForm::set`], but clamps into `[0, max]` first.
    pub fn set_clamped(&mut self, criterion: Criterion, points: i64) -> Result<u32, ScoringError> {
        let clamped = points.clamp(0, i64::from(criterion.max_points()));
        if clamped != points {
            debug!(key = criterion.key(), points, clamped, "clamped out-of-range points");
        }
        self.set(criterion, clamped)
    }

    pub fn clear(&mut self, criterion: Criterion) -> Result<u32, ScoringError> {
        self.fields.remove(criterion.key());
        self.touched.remove(&criterion);
        self.recompute()
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn points(&self, criterion: Criterion) -> Option<i64> {
        self.fields.get(criterion.key()).copied()
    }

    pub fn score(&self) -> Result<u32, ScoringError> {
        self.score.clone()
    }

    pub fn untouched(&self) -> Vec<Criterion> {
        Criterion::ALL
            .into_iter()
            .filter(|c| !self.touched.contains(c))
            .collect()
    }

    pub fn entries(&self) -> Vec<(&'static str, SnapshotValue)> {
        Criterion::ALL
            .iter()
            .map(|c| {
                let value = match self.points(*c) {
                    Some(points) => SnapshotValue::Integer(points),
                    None => SnapshotValue::Empty,
                };
                (c.key(), value)
            })
            .collect()
    }

    pub fn finalize(self) -> Result<DetailedAssessment, ScoringError> {
        DetailedAssessment::from_fields(&self.fields, self.description)
    }

    pub fn finalize_strict(self) -> Result<DetailedAssessment, ScoringError> {
        if let Some(criterion) = self.untouched().first() {
            debug!(key = criterion.key(), "refusing to finalize untouched criterion");
            return Err(ScoringError::missing(criterion.key()));
        }
        self.finalize()
    }

    fn recompute(&mut self) -> Result<u32, ScoringError> {
        self.score = compute_detailed_score(&self.fields);
        self.score.clone()
    }
}
