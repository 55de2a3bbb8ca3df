pub mod band;
pub mod criteria;
pub mod engine;
pub mod error;
pub mod rating;

pub use band::{score_band, ScoreBand};
pub use criteria::{detailed_max, Criterion, DisplayGroup, DISPLAY_GROUPS};
pub use engine::{
    compute_detailed_score, compute_holistic_score, detailed_breakdown, holistic_breakdown,
    round_for_display, AssessmentMode, Contribution, ScoreBreakdown,
};
pub use error::ScoringError;
pub use rating::{HolisticDimension, RatingLevel};
