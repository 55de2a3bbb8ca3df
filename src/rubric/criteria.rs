/// One criterion of the detailed rubric.
///
/// The maximums of all seventeen criteria add up to exactly 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Criterion {
    ProjectSummaryIntro,
    ProjectSummaryScope,
    TeamIntroduction,
    LiteratureReview,
    ProblemAnalysisPart,
    ProblemSolution,
    Solution,
    MethodologyPart,
    Applicability,
    InnovationValue,
    Commercialization,
    CostEstimation,
    TimeScheduling,
    TargetAudience,
    SwotAnalysis,
    References,
    ReportFormat,
}

impl Criterion {
    pub const ALL: [Criterion; 17] = [
        Criterion::ProjectSummaryIntro,
        Criterion::ProjectSummaryScope,
        Criterion::TeamIntroduction,
        Criterion::LiteratureReview,
        Criterion::ProblemAnalysisPart,
        Criterion::ProblemSolution,
        Criterion::Solution,
        Criterion::MethodologyPart,
        Criterion::Applicability,
        Criterion::InnovationValue,
        Criterion::Commercialization,
        Criterion::CostEstimation,
        Criterion::TimeScheduling,
        Criterion::TargetAudience,
        Criterion::SwotAnalysis,
        Criterion::References,
        Criterion::ReportFormat,
    ];

    /// Record key shared with the persistence service.
    pub fn key(self) -> &'static str {
        match self {
            Criterion::ProjectSummaryIntro => "projectSummaryIntro",
            Criterion::ProjectSummaryScope => "projectSummaryScope",
            Criterion::TeamIntroduction => "teamIntroduction",
            Criterion::LiteratureReview => "literatureReview",
            Criterion::ProblemAnalysisPart => "problemAnalysisPart",
            Criterion::ProblemSolution => "problemSolution",
            Criterion::Solution => "solution",
            Criterion::MethodologyPart => "methodologyPart",
            Criterion::Applicability => "applicability",
            Criterion::InnovationValue => "innovationValue",
            Criterion::Commercialization => "commercialization",
            Criterion::CostEstimation => "costEstimation",
            Criterion::TimeScheduling => "timeScheduling",
            Criterion::TargetAudience => "targetAudience",
            Criterion::SwotAnalysis => "swotAnalysis",
            Criterion::References => "references",
            Criterion::ReportFormat => "reportFormat",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Criterion::ProjectSummaryIntro => "Introduction",
            Criterion::ProjectSummaryScope => "Scope",
            Criterion::TeamIntroduction => "Team introduction",
            Criterion::LiteratureReview => "Literature review",
            Criterion::ProblemAnalysisPart => "Problem analysis",
            Criterion::ProblemSolution => "Proposed solution",
            Criterion::Solution => "Solution",
            Criterion::MethodologyPart => "Methodology",
            Criterion::Applicability => "Applicability",
            Criterion::InnovationValue => "Innovation value",
            Criterion::Commercialization => "Commercialization",
            Criterion::CostEstimation => "Cost estimation",
            Criterion::TimeScheduling => "Time scheduling",
            Criterion::TargetAudience => "Target audience",
            Criterion::SwotAnalysis => "SWOT analysis",
            Criterion::References => "References",
            Criterion::ReportFormat => "Report format",
        }
    }

    /// Maximum points this criterion can award.
    pub fn max_points(self) -> u32 {
        match self {
            Criterion::Solution => 12,
            Criterion::SwotAnalysis => 10,
            Criterion::ProjectSummaryIntro
            | Criterion::ProjectSummaryScope
            | Criterion::TeamIntroduction
            | Criterion::InnovationValue
            | Criterion::TargetAudience
            | Criterion::References => 4,
            Criterion::LiteratureReview
            | Criterion::ProblemAnalysisPart
            | Criterion::ProblemSolution
            | Criterion::MethodologyPart
            | Criterion::Applicability
            | Criterion::Commercialization
            | Criterion::CostEstimation
            | Criterion::TimeScheduling
            | Criterion::ReportFormat => 6,
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Criterion::ALL.into_iter().find(|c| c.key() == key)
    }
}

/// Heading under which one or two criteria are shown together.
///
/// Purely presentational: groups never change how the total is summed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayGroup {
    pub title: &'static str,
    pub members: &'static [Criterion],
}

impl DisplayGroup {
    /// Combined maximum of the group's members.
    pub fn max_points(&self) -> u32 {
        self.members.iter().map(|c| c.max_points()).sum()
    }

    /// A group of two sub-criteria shown under one heading.
    pub fn is_composite(&self) -> bool {
        self.members.len() > 1
    }
}

/// Display order of the detailed rubric. Covers every criterion exactly once.
pub const DISPLAY_GROUPS: [DisplayGroup; 12] = [
    DisplayGroup {
        title: "Project Summary",
        members: &[Criterion::ProjectSummaryIntro, Criterion::ProjectSummaryScope],
    },
    DisplayGroup {
        title: "Team Introduction",
        members: &[Criterion::TeamIntroduction],
    },
    DisplayGroup {
        title: "Literature Review",
        members: &[Criterion::LiteratureReview],
    },
    DisplayGroup {
        title: "Problem",
        members: &[Criterion::ProblemAnalysisPart, Criterion::ProblemSolution],
    },
    DisplayGroup {
        title: "Solution",
        members: &[Criterion::Solution],
    },
    DisplayGroup {
        title: "Methodology",
        members: &[Criterion::MethodologyPart, Criterion::Applicability],
    },
    DisplayGroup {
        title: "Innovation",
        members: &[Criterion::InnovationValue, Criterion::Commercialization],
    },
    DisplayGroup {
        title: "Cost & Time",
        members: &[Criterion::CostEstimation, Criterion::TimeScheduling],
    },
    DisplayGroup {
        title: "Target Audience",
        members: &[Criterion::TargetAudience],
    },
    DisplayGroup {
        title: "SWOT Analysis",
        members: &[Criterion::SwotAnalysis],
    },
    DisplayGroup {
        title: "References",
        members: &[Criterion::References],
    },
    DisplayGroup {
        title: "Report Format",
        members: &[Criterion::ReportFormat],
    },
];

/// Sum of every criterion's maximum.
pub fn detailed_max() -> u32 {
    Criterion::ALL.iter().map(|c| c.max_points()).sum()
}
