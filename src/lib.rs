//! Referee rubric scoring for project competitions.
//!
//! The [`rubric`] module holds the pure scoring engine: the rating scale, the
//! criterion table, the two aggregators and the display bands. Everything
//! else (snapshots, forms, storage, terminal output) is built on top of it.

pub mod assessment;
pub mod config;
pub mod output;
pub mod rubric;
pub mod storage;
pub mod telemetry;
