//! Avatar identity record

use super::{AvatarStyle, CalibrationAnswers, Personality, PersonalityProfile};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A learner's companion: identity, look, calibration and profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Avatar {
    /// Unique identifier, also the persistence key
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Visual style for the presentation layer
    pub style: AvatarStyle,

    /// Tunable personality parameters
    pub profile: PersonalityProfile,

    /// Onboarding answers the profile was seeded from
    pub calibration: CalibrationAnswers,

    /// Voice chosen for speech output, if any
    pub voice_identifier: Option<String>,

    /// When the avatar was created
    pub created_at: DateTime<Utc>,
}

impl Default for Avatar {
    fn default() -> Self {
        Self::new(Personality::default())
    }
}

impl Avatar {
    /// Create an avatar with the defaults of a personality
    pub fn new(personality: Personality) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: personality.display_name().to_string(),
            style: personality.default_style(),
            profile: PersonalityProfile::new(personality),
            calibration: CalibrationAnswers::default(),
            voice_identifier: None,
            created_at: Utc::now(),
        }
    }

    /// Set the display name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the visual style
    pub fn with_style(mut self, style: AvatarStyle) -> Self {
        self.style = style;
        self
    }

    /// Set the voice identifier
    pub fn with_voice(mut self, voice_identifier: impl Into<String>) -> Self {
        self.voice_identifier = Some(voice_identifier.into());
        self
    }

    /// Base personality
    pub fn personality(&self) -> Personality {
        self.profile.base_personality
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_avatar_defaults_follow_personality() {
        let avatar = Avatar::new(Personality::WisePatient);
        assert_eq!(avatar.name, "Sage");
        assert_eq!(avatar.style, AvatarStyle::WiseMentor);
        assert_eq!(avatar.personality(), Personality::WisePatient);
        assert!(avatar.voice_identifier.is_none());
    }

    #[test]
    fn test_avatar_builders() {
        let avatar = Avatar::default()
            .with_name("Pixel")
            .with_style(AvatarStyle::EnergeticCoach)
            .with_voice("com.apple.voice.compact.en-US.Samantha");
        assert_eq!(avatar.name, "Pixel");
        assert_eq!(avatar.style, AvatarStyle::EnergeticCoach);
        assert_eq!(avatar.personality(), Personality::FriendlyCurious);
        assert!(avatar.voice_identifier.is_some());
    }
}
