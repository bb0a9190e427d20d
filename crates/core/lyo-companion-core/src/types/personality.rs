//! Personality Catalog
//!
//! The static table of base companion personalities. Each variant carries a
//! system prompt for the generation service, a one-line tagline, a sample
//! greeting, and the defaults an avatar inherits when it is created with that
//! personality.

use super::CompanionMood;
use serde::{Deserialize, Serialize};

/// Base personality variant of a companion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Personality {
    /// Lyo: warm, asks questions first
    #[default]
    FriendlyCurious,
    /// Max: high energy, celebrates wins
    EnergeticCoach,
    /// Luna: slow pace, room for reflection
    CalmReflective,
    /// Sage: Socratic, patient
    WisePatient,
}

impl Personality {
    /// All variants in catalog order
    pub const ALL: [Personality; 4] = [
        Personality::FriendlyCurious,
        Personality::EnergeticCoach,
        Personality::CalmReflective,
        Personality::WisePatient,
    ];

    /// Companion name that goes with this personality
    pub fn display_name(&self) -> &'static str {
        match self {
            Personality::FriendlyCurious => "Lyo",
            Personality::EnergeticCoach => "Max",
            Personality::CalmReflective => "Luna",
            Personality::WisePatient => "Sage",
        }
    }

    /// Prompt template handed to the generation service
    pub fn system_prompt(&self) -> &'static str {
        match self {
            Personality::FriendlyCurious => {
                "You are Lyo, a warm and curious learning companion. Your approach:\n\
                 - Ask questions first to understand the learner's perspective\n\
                 - Explain concepts simply with relatable examples\n\
                 - Show genuine excitement about discoveries\n\
                 - Use encouraging language: \"Great question!\", \"Let's explore that together\"\n\
                 - Keep responses conversational and under 120 words unless detail is requested"
            }
            Personality::EnergeticCoach => {
                "You are Max, a high-energy motivational coach. Your approach:\n\
                 - Set clear goals and celebrate every win\n\
                 - Push learners gently beyond their comfort zone\n\
                 - Use action-oriented language: \"Let's tackle this!\", \"You've got this!\"\n\
                 - Track progress explicitly and highlight improvements\n\
                 - Keep energy high but stay sensitive to frustration"
            }
            Personality::CalmReflective => {
                "You are Luna, a calm and reflective guide. Your approach:\n\
                 - Slow the pace and create space for deep thinking\n\
                 - Use reflection prompts: \"What do you notice?\", \"How does that feel?\"\n\
                 - Embrace silence and processing time\n\
                 - Connect concepts to bigger themes mindfully\n\
                 - Speak in a gentle, reassuring tone"
            }
            Personality::WisePatient => {
                "You are Sage, a patient Socratic tutor. Your approach:\n\
                 - Guide with questions rather than direct answers\n\
                 - Break complex problems into small, manageable steps\n\
                 - Connect new concepts to existing knowledge\n\
                 - Never rush; let understanding develop naturally\n\
                 - Use analogies to illuminate concepts"
            }
        }
    }

    /// One-line description shown during avatar selection
    pub fn tagline(&self) -> &'static str {
        match self {
            Personality::FriendlyCurious => "Warm, curious mentor who asks questions first",
            Personality::EnergeticCoach => "High-energy coach who celebrates your wins",
            Personality::CalmReflective => "Calm guide who creates space for reflection",
            Personality::WisePatient => "Patient tutor who connects concepts deeply",
        }
    }

    /// Greeting used as a preview of the personality's voice
    pub fn sample_greeting(&self) -> &'static str {
        match self {
            Personality::FriendlyCurious => "Hi! I'm Lyo. Let's explore and learn together!",
            Personality::EnergeticCoach => "Hey! I'm Max. Ready to crush some goals today?",
            Personality::CalmReflective => "Hello. I'm Luna. Let's take this journey mindfully.",
            Personality::WisePatient => {
                "Greetings. I'm Sage. Wisdom comes through patient exploration."
            }
        }
    }

    /// Visual style an avatar gets when nothing else is chosen
    pub fn default_style(&self) -> AvatarStyle {
        match self {
            Personality::FriendlyCurious | Personality::CalmReflective => AvatarStyle::FriendlyBot,
            Personality::EnergeticCoach => AvatarStyle::EnergeticCoach,
            Personality::WisePatient => AvatarStyle::WiseMentor,
        }
    }

    /// Mood the companion settles into when nothing notable is happening
    pub fn resting_mood(&self) -> CompanionMood {
        match self {
            Personality::FriendlyCurious => CompanionMood::Curious,
            Personality::EnergeticCoach => CompanionMood::Excited,
            Personality::CalmReflective => CompanionMood::Neutral,
            Personality::WisePatient => CompanionMood::Thoughtful,
        }
    }
}

/// Pedagogical sequencing preference
///
/// Parsing is total: any unrecognised label becomes `Balanced`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ScaffoldingStyle {
    /// Show examples first, then explain
    ExamplesFirst,
    /// Teach theory, then practice
    TheoryFirst,
    /// Learn through quick challenges
    ChallengeBased,
    /// Mix theory and practice
    #[default]
    Balanced,
}

impl ScaffoldingStyle {
    /// Parse a label such as `"examples-first"`, `"theory"` or `"challenges"`
    pub fn parse(label: &str) -> Self {
        match label.trim().to_lowercase().replace('_', "-").as_str() {
            "examples-first" | "examples" | "example" => ScaffoldingStyle::ExamplesFirst,
            "theory-first" | "theory" => ScaffoldingStyle::TheoryFirst,
            "challenge-based" | "challenges" | "challenge" => ScaffoldingStyle::ChallengeBased,
            _ => ScaffoldingStyle::Balanced,
        }
    }

    /// Canonical label
    pub fn as_str(&self) -> &'static str {
        match self {
            ScaffoldingStyle::ExamplesFirst => "examples-first",
            ScaffoldingStyle::TheoryFirst => "theory-first",
            ScaffoldingStyle::ChallengeBased => "challenge-based",
            ScaffoldingStyle::Balanced => "balanced",
        }
    }

    /// Human-readable description used in prompts
    pub fn description(&self) -> &'static str {
        match self {
            ScaffoldingStyle::ExamplesFirst => "Show examples first, then explain",
            ScaffoldingStyle::TheoryFirst => "Teach theory, then practice",
            ScaffoldingStyle::ChallengeBased => "Learn through quick challenges",
            ScaffoldingStyle::Balanced => "Mix theory and practice",
        }
    }
}

impl From<String> for ScaffoldingStyle {
    fn from(label: String) -> Self {
        Self::parse(&label)
    }
}

impl From<ScaffoldingStyle> for String {
    fn from(style: ScaffoldingStyle) -> Self {
        style.as_str().to_string()
    }
}

impl std::fmt::Display for ScaffoldingStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Visual style the presentation layer renders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AvatarStyle {
    /// Curious and approachable
    #[default]
    FriendlyBot,
    /// Patient and thoughtful
    WiseMentor,
    /// Motivating and dynamic
    EnergeticCoach,
}

impl AvatarStyle {
    /// Short description shown next to the style
    pub fn description(&self) -> &'static str {
        match self {
            AvatarStyle::FriendlyBot => "Curious & approachable",
            AvatarStyle::WiseMentor => "Patient & thoughtful",
            AvatarStyle::EnergeticCoach => "Motivating & dynamic",
        }
    }
}
