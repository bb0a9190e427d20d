//! Onboarding inputs: calibration answers and diagnostic blueprints

use super::ScaffoldingStyle;
use serde::{Deserialize, Serialize};

/// Preferred pace chosen during onboarding
///
/// Parsing is total: any unrecognised label becomes `Balanced`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Pace {
    /// Take it slow
    Slow,
    /// Neither rushed nor slow
    #[default]
    Balanced,
    /// Move quickly
    Fast,
}

impl Pace {
    /// Parse a label such as `"slow"` or `"fast"`
    pub fn parse(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "slow" => Pace::Slow,
            "fast" => Pace::Fast,
            _ => Pace::Balanced,
        }
    }

    /// Canonical label
    pub fn as_str(&self) -> &'static str {
        match self {
            Pace::Slow => "slow",
            Pace::Balanced => "balanced",
            Pace::Fast => "fast",
        }
    }
}

impl From<String> for Pace {
    fn from(label: String) -> Self {
        Self::parse(&label)
    }
}

impl From<Pace> for String {
    fn from(pace: Pace) -> Self {
        pace.as_str().to_string()
    }
}

impl std::fmt::Display for Pace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of the onboarding questionnaire
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CalibrationAnswers {
    /// How the learner likes material sequenced
    pub learning_style: ScaffoldingStyle,

    /// How fast the learner wants to go
    pub pace: Pace,

    /// What keeps the learner going, e.g. "gamified" or "data"
    pub motivation: String,

    /// Preferred difficulty, e.g. "easy" or "hard"
    pub challenge_preference: String,
}

impl Default for CalibrationAnswers {
    fn default() -> Self {
        Self {
            learning_style: ScaffoldingStyle::Balanced,
            pace: Pace::Balanced,
            motivation: "encouragement".to_string(),
            challenge_preference: "moderate".to_string(),
        }
    }
}

impl CalibrationAnswers {
    /// Answers with a learning style and pace, other fields default
    pub fn new(learning_style: ScaffoldingStyle, pace: Pace) -> Self {
        Self {
            learning_style,
            pace,
            ..Self::default()
        }
    }

    /// Set the motivation label
    pub fn with_motivation(mut self, motivation: impl Into<String>) -> Self {
        self.motivation = motivation.into();
        self
    }

    /// Set the challenge preference label
    pub fn with_challenge_preference(mut self, preference: impl Into<String>) -> Self {
        self.challenge_preference = preference.into();
        self
    }
}

/// The parts of a diagnostic learning plan the calibration mapper reads
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearningBlueprint {
    /// Free-text learning goals
    pub learning_goals: String,

    /// Free-text preferred learning style
    pub preferred_style: String,

    /// Target timeline in days, if the learner gave one
    pub timeline_days: Option<u32>,
}

impl LearningBlueprint {
    /// Create a blueprint from its three inputs
    pub fn new(
        learning_goals: impl Into<String>,
        preferred_style: impl Into<String>,
        timeline_days: Option<u32>,
    ) -> Self {
        Self {
            learning_goals: learning_goals.into(),
            preferred_style: preferred_style.into(),
            timeline_days,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pace_parse() {
        assert_eq!(Pace::parse("FAST"), Pace::Fast);
        assert_eq!(Pace::parse(" slow "), Pace::Slow);
        assert_eq!(Pace::parse("moderate"), Pace::Balanced);
        assert_eq!(Pace::parse("ludicrous"), Pace::Balanced);
    }

    #[test]
    fn test_unknown_labels_deserialize_to_balanced() {
        let json = r#"{
            "learning_style": "osmosis",
            "pace": "warp",
            "motivation": "gamified",
            "challenge_preference": "hard"
        }"#;
        let answers: CalibrationAnswers = serde_json::from_str(json).unwrap();
        assert_eq!(answers.learning_style, ScaffoldingStyle::Balanced);
        assert_eq!(answers.pace, Pace::Balanced);
        assert_eq!(answers.motivation, "gamified");
    }

    #[test]
    fn test_default_answers() {
        let answers = CalibrationAnswers::default();
        assert_eq!(answers.pace, Pace::Balanced);
        assert_eq!(answers.motivation, "encouragement");
        assert_eq!(answers.challenge_preference, "moderate");
    }
}
