pub mod form;
pub mod record;
pub mod snapshot;

pub use form::{default_points, DetailedForm, HolisticForm, DEFAULT_RATING};
pub use crate::rubric::AssessmentMode;
pub use record::{AssessmentRecord, DetailedAssessment, HolisticAssessment};
pub use snapshot::{Snapshot, SnapshotValue, DESCRIPTION_KEY, SCORE_KEY};
