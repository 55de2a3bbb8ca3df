use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Qualitative rating used by holistic assessments.
///
/// Ordered from worst to best; each level maps to exactly one score on the
/// 0-100 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RatingLevel {
    VeryBad,
    Bad,
    Average,
    Good,
    VeryGood,
}

impl RatingLevel {
    pub const ALL: [RatingLevel; 5] = [
        RatingLevel::VeryBad,
        RatingLevel::Bad,
        RatingLevel::Average,
        RatingLevel::Good,
        RatingLevel::VeryGood,
    ];

    /// Numeric equivalent of this level.
    pub fn score(self) -> u32 {
        match self {
            RatingLevel::VeryBad => 0,
            RatingLevel::Bad => 25,
            RatingLevel::Average => 50,
            RatingLevel::Good => 75,
            RatingLevel::VeryGood => 100,
        }
    }

    /// Wire name, as written in persisted records.
    pub fn key(self) -> &'static str {
        match self {
            RatingLevel::VeryBad => "VERY_BAD",
            RatingLevel::Bad => "BAD",
            RatingLevel::Average => "AVERAGE",
            RatingLevel::Good => "GOOD",
            RatingLevel::VeryGood => "VERY_GOOD",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RatingLevel::VeryBad => "Very bad",
            RatingLevel::Bad => "Bad",
            RatingLevel::Average => "Average",
            RatingLevel::Good => "Good",
            RatingLevel::VeryGood => "Very good",
        }
    }
}

impl fmt::Display for RatingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for RatingLevel {
    type Err = String;

    /// Accepts the wire name in any case, with `_`, `-` or a space between words.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace(['-', ' '], "_");
        RatingLevel::ALL
            .into_iter()
            .find(|level| level.key() == normalized)
            .ok_or_else(|| {
                format!(
                    "unknown rating '{}', expected one of VERY_BAD, BAD, AVERAGE, GOOD, VERY_GOOD",
                    s.trim()
                )
            })
    }
}

/// The eight holistic dimensions a referee rates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HolisticDimension {
    Originality,
    Innovation,
    TechnicalProficiency,
    Applicability,
    DesignFunctionality,
    ImpactPotential,
    PresentationCommunication,
    Sustainability,
}

impl HolisticDimension {
    pub const ALL: [HolisticDimension; 8] = [
        HolisticDimension::Originality,
        HolisticDimension::Innovation,
        HolisticDimension::TechnicalProficiency,
        HolisticDimension::Applicability,
        HolisticDimension::DesignFunctionality,
        HolisticDimension::ImpactPotential,
        HolisticDimension::PresentationCommunication,
        HolisticDimension::Sustainability,
    ];

    /// Record key shared with the persistence service.
    pub fn key(self) -> &'static str {
        match self {
            HolisticDimension::Originality => "originality",
            HolisticDimension::Innovation => "innovation",
            HolisticDimension::TechnicalProficiency => "technicalProficiency",
            HolisticDimension::Applicability => "applicability",
            HolisticDimension::DesignFunctionality => "designFunctionality",
            HolisticDimension::ImpactPotential => "impactPotential",
            HolisticDimension::PresentationCommunication => "presentationCommunication",
            HolisticDimension::Sustainability => "sustainability",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            HolisticDimension::Originality => "Originality",
            HolisticDimension::Innovation => "Innovation",
            HolisticDimension::TechnicalProficiency => "Technical proficiency",
            HolisticDimension::Applicability => "Applicability",
            HolisticDimension::DesignFunctionality => "Design & functionality",
            HolisticDimension::ImpactPotential => "Impact potential",
            HolisticDimension::PresentationCommunication => "Presentation & communication",
            HolisticDimension::Sustainability => "Sustainability",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        HolisticDimension::ALL.into_iter().find(|d| d.key() == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scores_increase_with_level() {
        let scores: Vec<u32> = RatingLevel::ALL.iter().map(|l| l.score()).collect();
        assert_eq!(scores, vec![0, 25, 50, 75, 100]);
        assert!(RatingLevel::VeryBad < RatingLevel::VeryGood);
    }

    #[test]
    fn test_parse_rating_variants() {
        assert_eq!("VERY_GOOD".parse::<RatingLevel>().unwrap(), RatingLevel::VeryGood);
        assert_eq!("very good".parse::<RatingLevel>().unwrap(), RatingLevel::VeryGood);
        assert_eq!("very-bad".parse::<RatingLevel>().unwrap(), RatingLevel::VeryBad);
        assert_eq!(" average ".parse::<RatingLevel>().unwrap(), RatingLevel::Average);
    }

    #[test]
    fn test_parse_rating_unknown() {
        let err = "excellent".parse::<RatingLevel>().unwrap_err();
        assert!(err.contains("excellent"));
    }

    #[test]
    fn test_rating_serializes_as_wire_name() {
        let json = serde_json::to_string(&RatingLevel::VeryGood).unwrap();
        assert_eq!(json, "\"VERY_GOOD\"");
    }

    #[test]
    fn test_dimension_keys_roundtrip() {
        for dim in HolisticDimension::ALL {
            assert_eq!(HolisticDimension::from_key(dim.key()), Some(dim));
        }
        assert!(HolisticDimension::from_key("Sustainability").is_none());
    }
}
