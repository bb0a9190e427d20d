//! Calibration mapper
//!
//! Turns onboarding answers, or a diagnostic learning plan, into an initial
//! [`PersonalityProfile`]. Every function here is pure and total: labels the
//! engine does not recognise fall through to the balanced defaults.

use crate::classifier;
use crate::types::{
    Avatar, CalibrationAnswers, LearningBlueprint, Pace, Personality, PersonalityProfile,
    ScaffoldingStyle,
};
use serde::{Deserialize, Serialize};

/// Celebration intensity for learners who want to move fast
pub const FAST_CELEBRATION_INTENSITY: f32 = 0.9;

/// Celebration intensity for everyone else
pub const DEFAULT_CELEBRATION_INTENSITY: f32 = 0.6;

/// Hint frequency for a scaffolding style
pub fn hint_frequency_for(style: ScaffoldingStyle) -> f32 {
    match style {
        ScaffoldingStyle::ExamplesFirst => 0.8,
        ScaffoldingStyle::TheoryFirst => 0.4,
        ScaffoldingStyle::ChallengeBased => 0.3,
        ScaffoldingStyle::Balanced => 0.5,
    }
}

/// Pace preference for a pace label
pub fn pace_preference_for(pace: Pace) -> f32 {
    match pace {
        Pace::Slow => 0.3,
        Pace::Balanced => 0.5,
        Pace::Fast => 0.8,
    }
}

/// Build the initial profile from onboarding answers
pub fn calibrate(answers: &CalibrationAnswers, base: Personality) -> PersonalityProfile {
    let celebration = if answers.pace == Pace::Fast {
        FAST_CELEBRATION_INTENSITY
    } else {
        DEFAULT_CELEBRATION_INTENSITY
    };

    let profile = PersonalityProfile::new(base)
        .with_hint_frequency(hint_frequency_for(answers.learning_style))
        .with_celebration_intensity(celebration)
        .with_pace_preference(pace_preference_for(answers.pace))
        .with_scaffolding_style(answers.learning_style);

    tracing::debug!(
        personality = ?base,
        style = %answers.learning_style,
        pace = %answers.pace,
        hint_frequency = profile.hint_frequency(),
        celebration_intensity = profile.celebration_intensity(),
        "Calibrated personality profile"
    );

    profile
}

/// Result of mapping a diagnostic onto a calibration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnosis {
    /// Base personality picked from the learning goals
    pub personality: Personality,

    /// Calibration answers inferred from the diagnostic
    pub answers: CalibrationAnswers,

    /// `answers` passed through [`calibrate`]
    pub profile: PersonalityProfile,
}

/// Infer personality and calibration from free-text diagnostic answers
///
/// Goals that match no keyword keep `base`. A style that matches nothing is
/// balanced. Timelines between the fast and slow bands, or no timeline at
/// all, leave the pace balanced.
pub fn diagnostic_to_calibration(
    goals: &str,
    preferred_style: &str,
    timeline_days: Option<u32>,
    base: Personality,
) -> Diagnosis {
    let personality = classifier::classify_goals(goals).unwrap_or(base);
    let learning_style = classifier::classify_style(preferred_style).unwrap_or_default();
    let pace = timeline_days
        .and_then(classifier::classify_timeline)
        .unwrap_or_default();

    let answers = CalibrationAnswers::new(learning_style, pace);
    let profile = calibrate(&answers, personality);

    Diagnosis {
        personality,
        answers,
        profile,
    }
}

impl Avatar {
    /// Build an avatar tuned to a diagnostic learning plan
    pub fn from_diagnostic(blueprint: &LearningBlueprint) -> Self {
        let diagnosis = diagnostic_to_calibration(
            &blueprint.learning_goals,
            &blueprint.preferred_style,
            blueprint.timeline_days,
            Personality::default(),
        );

        tracing::info!(
            personality = ?diagnosis.personality,
            style = %diagnosis.answers.learning_style,
            pace = %diagnosis.answers.pace,
            "Created avatar from diagnostic"
        );

        let mut avatar = Avatar::new(diagnosis.personality);
        avatar.profile = diagnosis.profile;
        avatar.calibration = diagnosis.answers;
        avatar
    }
}
