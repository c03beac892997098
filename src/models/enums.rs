use serde::{Deserialize, Serialize};

/// Closed set of lifestyle signals recognized by the extractor.
///
/// Each label carries an ordered set of keyword phrases; a label matches a
/// message when any phrase occurs as a case-insensitive substring of the
/// normalized text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifestyleLabel {
    #[serde(rename = "smoker")]
    Smoker,
    #[serde(rename = "alcohol")]
    Alcohol,
    #[serde(rename = "poor sleep")]
    PoorSleep,
    #[serde(rename = "high stress")]
    HighStress,
    #[serde(rename = "sedentary")]
    Sedentary,
    #[serde(rename = "balanced diet")]
    BalancedDiet,
}

impl LifestyleLabel {
    /// Match order is fixed: output preserves this order, not text order.
    pub const ALL: [LifestyleLabel; 6] = [
        Self::Smoker,
        Self::Alcohol,
        Self::PoorSleep,
        Self::HighStress,
        Self::Sedentary,
        Self::BalancedDiet,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Smoker => "smoker",
            Self::Alcohol => "alcohol",
            Self::PoorSleep => "poor sleep",
            Self::HighStress => "high stress",
            Self::Sedentary => "sedentary",
            Self::BalancedDiet => "balanced diet",
        }
    }

    /// Keyword phrases, lowercase, in match precedence order.
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            Self::Smoker => &["smoker", "smoking", "cigarette"],
            Self::Alcohol => &["alcohol", "drinking", "drink"],
            Self::PoorSleep => &["poor sleep", "insomnia", "cant sleep", "can't sleep", "late night"],
            Self::HighStress => &["stress", "stressed", "anxiety", "overworked"],
            Self::Sedentary => &["sedentary", "no exercise", "inactive", "sitting all day"],
            Self::BalancedDiet => &["balanced diet", "healthy diet", "clean eating"],
        }
    }
}

impl std::fmt::Display for LifestyleLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
