//! Spoken delivery: speech modulation and short reactions to learner actions

use crate::types::{CompanionMood, Personality, PersonalityProfile, UserAction};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Slowest speaking rate handed to the speech engine
pub const MIN_SPEECH_RATE: f32 = 0.3;

/// Fastest speaking rate handed to the speech engine
pub const MAX_SPEECH_RATE: f32 = 0.7;

/// Rate shift applied by upbeat or subdued moods
pub const MOOD_RATE_SHIFT: f32 = 0.05;

/// Output volume
pub const SPEECH_VOLUME: f32 = 0.8;

/// Celebration intensity above which correct answers get a spoken reaction
pub const CELEBRATION_REACTION_THRESHOLD: f32 = 0.7;

const CORRECT_REACTIONS: &[&str] = &[
    "Perfect! You've got this.",
    "Excellent work!",
    "That's exactly right!",
    "You're doing great!",
];

const INCORRECT_REACTIONS: &[&str] = &[
    "Not quite, but you're on the right track.",
    "Let's think about this differently.",
    "That's okay, mistakes help us learn!",
];

const LESSON_COMPLETE_REACTIONS: &[&str] =
    &["Amazing! You completed this lesson. I'm proud of you!"];

/// Said when a learning session ends
pub const FAREWELL: &str = "Great session today! See you next time.";

/// Parameters for the speech synthesiser
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VoiceProfile {
    /// Speaking rate, clamped to `[MIN_SPEECH_RATE, MAX_SPEECH_RATE]`
    pub rate: f32,
    /// Pitch multiplier, 1.0 is neutral
    pub pitch: f32,
    /// Output volume
    pub volume: f32,
}

impl VoiceProfile {
    /// Modulation for a personality in a given mood
    pub fn for_mood(personality: Personality, mood: CompanionMood) -> Self {
        Self {
            rate: speech_rate(personality, mood),
            pitch: speech_pitch(mood),
            volume: SPEECH_VOLUME,
        }
    }
}

/// Speaking rate: a per-personality base shifted by mood
pub fn speech_rate(personality: Personality, mood: CompanionMood) -> f32 {
    let base = match personality {
        Personality::EnergeticCoach => 0.55,
        Personality::CalmReflective => 0.45,
        Personality::FriendlyCurious => 0.52,
        Personality::WisePatient => 0.48,
    };

    let shift = match mood {
        CompanionMood::Excited | CompanionMood::Celebrating => MOOD_RATE_SHIFT,
        CompanionMood::Tired | CompanionMood::Thoughtful => -MOOD_RATE_SHIFT,
        _ => 0.0,
    };

    (base + shift).clamp(MIN_SPEECH_RATE, MAX_SPEECH_RATE)
}

/// Pitch multiplier for a mood
pub fn speech_pitch(mood: CompanionMood) -> f32 {
    match mood {
        CompanionMood::Excited | CompanionMood::Celebrating => 1.1,
        CompanionMood::Tired => 0.9,
        CompanionMood::Encouraging => 1.05,
        _ => 1.0,
    }
}

/// Candidate reactions to an action; empty when the companion stays quiet
pub fn reaction_lines(action: UserAction, profile: &PersonalityProfile) -> &'static [&'static str] {
    match action {
        UserAction::AnsweredCorrect
            if profile.celebration_intensity() > CELEBRATION_REACTION_THRESHOLD =>
        {
            CORRECT_REACTIONS
        }
        UserAction::AnsweredIncorrect => INCORRECT_REACTIONS,
        UserAction::CompletedLesson => LESSON_COMPLETE_REACTIONS,
        _ => &[],
    }
}

/// Pick one reaction at random
pub fn choose_reaction<R: Rng + ?Sized>(
    action: UserAction,
    profile: &PersonalityProfile,
    rng: &mut R,
) -> Option<&'static str> {
    reaction_lines(action, profile).choose(rng).copied()
}
