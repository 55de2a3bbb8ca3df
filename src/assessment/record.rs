use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use tracing::warn;

use super::snapshot::Snapshot;
use crate::rubric::{
    compute_detailed_score, compute_holistic_score, detailed_breakdown, holistic_breakdown,
    score_band, AssessmentMode, Criterion, HolisticDimension, RatingLevel, ScoreBand, ScoreBreakdown,
    ScoringError,
};

/// Finalized holistic assessment, in the layout the persistence service expects.
///
/// Deserializing goes through [`AssessmentRecord::from_snapshot`], so a loaded
/// record always satisfies the rubric and carries a recomputed score.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HolisticAssessment {
    pub originality: RatingLevel,
    pub innovation: RatingLevel,
    pub technical_proficiency: RatingLevel,
    pub applicability: RatingLevel,
    pub design_functionality: RatingLevel,
    pub impact_potential: RatingLevel,
    pub presentation_communication: RatingLevel,
    pub sustainability: RatingLevel,
    #[serde(default)]
    pub description: String,
    pub score: f64,
}

impl HolisticAssessment {
    /// Validate a complete ratings map and compute its score.
    pub fn from_ratings(
        ratings: &HashMap<String, RatingLevel>,
        description: impl Into<String>,
    ) -> Result<Self, ScoringError> {
        let score = compute_holistic_score(ratings)?;
        // Presence of every key was checked by the engine.
        let get = |dim: HolisticDimension| ratings[dim.key()];
        Ok(Self {
            originality: get(HolisticDimension::Originality),
            innovation: get(HolisticDimension::Innovation),
            technical_proficiency: get(HolisticDimension::TechnicalProficiency),
            applicability: get(HolisticDimension::Applicability),
            design_functionality: get(HolisticDimension::DesignFunctionality),
            impact_potential: get(HolisticDimension::ImpactPotential),
            presentation_communication: get(HolisticDimension::PresentationCommunication),
            sustainability: get(HolisticDimension::Sustainability),
            description: description.into(),
            score,
        })
    }

    pub fn rating(&self, dim: HolisticDimension) -> RatingLevel {
        match dim {
            HolisticDimension::Originality => self.originality,
            HolisticDimension::Innovation => self.innovation,
            HolisticDimension::TechnicalProficiency => self.technical_proficiency,
            HolisticDimension::Applicability => self.applicability,
            HolisticDimension::DesignFunctionality => self.design_functionality,
            HolisticDimension::ImpactPotential => self.impact_potential,
            HolisticDimension::PresentationCommunication => self.presentation_communication,
            HolisticDimension::Sustainability => self.sustainability,
        }
    }

    pub fn ratings(&self) -> HashMap<String, RatingLevel> {
        HolisticDimension::ALL
            .iter()
            .map(|dim| (dim.key().to_string(), self.rating(*dim)))
            .collect()
    }

    pub fn breakdown(&self) -> Result<ScoreBreakdown, ScoringError> {
        holistic_breakdown(&self.ratings())
    }
}

/// Finalized detailed assessment, in the layout the persistence service expects.
///
/// Deserialized like [`HolisticAssessment`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedAssessment {
    pub project_summary_intro: u32,
    pub project_summary_scope: u32,
    pub team_introduction: u32,
    pub literature_review: u32,
    pub problem_analysis_part: u32,
    pub problem_solution: u32,
    pub solution: u32,
    pub methodology_part: u32,
    pub applicability: u32,
    pub innovation_value: u32,
    pub commercialization: u32,
    pub cost_estimation: u32,
    pub time_scheduling: u32,
    pub target_audience: u32,
    pub swot_analysis: u32,
    pub references: u32,
    pub report_format: u32,
    #[serde(default)]
    pub description: String,
    pub score: u32,
}

impl DetailedAssessment {
    /// Validate a complete, in-range field map and compute its total.
    pub fn from_fields(
        fields: &HashMap<String, i64>,
        description: impl Into<String>,
    ) -> Result<Self, ScoringError> {
        let score = compute_detailed_score(fields)?;
        // Presence and range of every key were checked by the engine.
        let get = |c: Criterion| fields[c.key()] as u32;
        Ok(Self {
            project_summary_intro: get(Criterion::ProjectSummaryIntro),
            project_summary_scope: get(Criterion::ProjectSummaryScope),
            team_introduction: get(Criterion::TeamIntroduction),
            literature_review: get(Criterion::LiteratureReview),
            problem_analysis_part: get(Criterion::ProblemAnalysisPart),
            problem_solution: get(Criterion::ProblemSolution),
            solution: get(Criterion::Solution),
            methodology_part: get(Criterion::MethodologyPart),
            applicability: get(Criterion::Applicability),
            innovation_value: get(Criterion::InnovationValue),
            commercialization: get(Criterion::Commercialization),
            cost_estimation: get(Criterion::CostEstimation),
            time_scheduling: get(Criterion::TimeScheduling),
            target_audience: get(Criterion::TargetAudience),
            swot_analysis: get(Criterion::SwotAnalysis),
            references: get(Criterion::References),
            report_format: get(Criterion::ReportFormat),
            description: description.into(),
            score,
        })
    }

    pub fn points(&self, criterion: Criterion) -> u32 {
        match criterion {
            Criterion::ProjectSummaryIntro => self.project_summary_intro,
            Criterion::ProjectSummaryScope => self.project_summary_scope,
            Criterion::TeamIntroduction => self.team_introduction,
            Criterion::LiteratureReview => self.literature_review,
            Criterion::ProblemAnalysisPart => self.problem_analysis_part,
            Criterion::ProblemSolution => self.problem_solution,
            Criterion::Solution => self.solution,
            Criterion::MethodologyPart => self.methodology_part,
            Criterion::Applicability => self.applicability,
            Criterion::InnovationValue => self.innovation_value,
            Criterion::Commercialization => self.commercialization,
            Criterion::CostEstimation => self.cost_estimation,
            Criterion::TimeScheduling => self.time_scheduling,
            Criterion::TargetAudience => self.target_audience,
            Criterion::SwotAnalysis => self.swot_analysis,
            Criterion::References => self.references,
            Criterion::ReportFormat => self.report_format,
        }
    }

    pub fn fields(&self) -> HashMap<String, i64> {
        Criterion::ALL
            .iter()
            .map(|c| (c.key().to_string(), i64::from(self.points(*c))))
            .collect()
    }

    pub fn breakdown(&self) -> Result<ScoreBreakdown, ScoringError> {
        detailed_breakdown(&self.fields())
    }
}

/// An assessment of either rubric.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AssessmentRecord {
    Holistic(HolisticAssessment),
    Detailed(DetailedAssessment),
}

impl AssessmentRecord {
    /// Validate a snapshot and score it.
    ///
    /// Used for live edits and for redisplaying saved records alike. A stored
    /// score that disagrees with the recomputed one is replaced.
    pub fn from_snapshot(snapshot: &Snapshot) -> Result<Self, ScoringError> {
        let description = snapshot.description()?;
        let record = match snapshot.mode()? {
            AssessmentMode::Holistic => AssessmentRecord::Holistic(
                HolisticAssessment::from_ratings(&snapshot.holistic_ratings()?, description)?,
            ),
            AssessmentMode::Detailed => AssessmentRecord::Detailed(
                DetailedAssessment::from_fields(&snapshot.detailed_fields()?, description)?,
            ),
        };

        if let Some(stored) = snapshot.stored_score() {
            if (stored - record.score()).abs() > f64::EPSILON {
                warn!(
                    stored,
                    computed = record.score(),
                    "stored score does not match the rubric, using recomputed value"
                );
            }
        }

        Ok(record)
    }

    pub fn mode(&self) -> AssessmentMode {
        match self {
            AssessmentRecord::Holistic(_) => AssessmentMode::Holistic,
            AssessmentRecord::Detailed(_) => AssessmentMode::Detailed,
        }
    }

    pub fn score(&self) -> f64 {
        match self {
            AssessmentRecord::Holistic(a) => a.score,
            AssessmentRecord::Detailed(a) => f64::from(a.score),
        }
    }

    /// Highest score the record's rubric can produce.
    pub fn max_score(&self) -> f64 {
        100.0
    }

    pub fn description(&self) -> &str {
        match self {
            AssessmentRecord::Holistic(a) => &a.description,
            AssessmentRecord::Detailed(a) => &a.description,
        }
    }

    pub fn band(&self) -> ScoreBand {
        // max_score() is a positive constant
        score_band(self.score(), self.max_score()).unwrap_or(ScoreBand::Low)
    }

    pub fn breakdown(&self) -> Result<ScoreBreakdown, ScoringError> {
        match self {
            AssessmentRecord::Holistic(a) => a.breakdown(),
            AssessmentRecord::Detailed(a) => a.breakdown(),
        }
    }
}

impl<'de> Deserialize<'de> for AssessmentRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let snapshot = Snapshot::deserialize(deserializer)?;
        AssessmentRecord::from_snapshot(&snapshot).map_err(D::Error::custom)
    }
}

impl<'de> Deserialize<'de> for HolisticAssessment {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match AssessmentRecord::deserialize(deserializer)? {
            AssessmentRecord::Holistic(a) => Ok(a),
            AssessmentRecord::Detailed(_) => Err(D::Error::custom(
                "expected a holistic assessment, found a detailed one",
            )),
        }
    }
}

impl<'de> Deserialize<'de> for DetailedAssessment {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match AssessmentRecord::deserialize(deserializer)? {
            AssessmentRecord::Detailed(a) => Ok(a),
            AssessmentRecord::Holistic(_) => Err(D::Error::custom(
                "expected a detailed assessment, found a holistic one",
            )),
        }
    }
}
