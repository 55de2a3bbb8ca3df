pub mod formatter;

pub use formatter::{
    format_band, format_breakdown, format_rubric, format_score, format_scored_table,
    format_template, should_use_colors, ScoredAssessment,
};
