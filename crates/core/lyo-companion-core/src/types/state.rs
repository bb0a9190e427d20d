//! Companion State Machine
//!
//! A discrete mood plus a continuous energy level, driven by a fixed table
//! of learner actions:
//!
//! | action              | mood                     | energy          |
//! |---------------------|--------------------------|-----------------|
//! | `AnsweredCorrect`   | celebrating              | +0.1, capped 1  |
//! | `AnsweredIncorrect` | encouraging              | unchanged       |
//! | `Struggled`         | encouraging              | unchanged       |
//! | `AskedQuestion`     | thoughtful               | unchanged       |
//! | `CompletedLesson`   | celebrating              | set to 1.0      |
//! | `StartedSession`    | tired late, else curious | unchanged       |

use chrono::{DateTime, Local, Timelike, Utc};
use serde::{Deserialize, Serialize};

/// Energy gained from a correct answer
pub const CORRECT_ANSWER_ENERGY_BOOST: f32 = 0.1;

/// Discrete emotional label driving response tone and idle animation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompanionMood {
    /// Resting, nothing notable happening
    #[default]
    Neutral,
    /// Upbeat and eager
    Excited,
    /// Supporting a learner who is having a hard time
    Encouraging,
    /// Considering a question
    Thoughtful,
    /// Marking a win
    Celebrating,
    /// Late-night low energy
    Tired,
    /// Ready to explore
    Curious,
}

impl CompanionMood {
    /// Emoji shown next to the companion
    pub fn emoji(&self) -> &'static str {
        match self {
            CompanionMood::Neutral => "😊",
            CompanionMood::Excited => "🤩",
            CompanionMood::Encouraging => "💪",
            CompanionMood::Thoughtful => "🤔",
            CompanionMood::Celebrating => "🎉",
            CompanionMood::Tired => "😌",
            CompanionMood::Curious => "🧐",
        }
    }
}

/// Learner action that drives a state transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserAction {
    /// Gave a correct answer
    AnsweredCorrect,
    /// Gave a wrong answer
    AnsweredIncorrect,
    /// Got stuck on the current activity
    Struggled,
    /// Asked the companion something
    AskedQuestion,
    /// Finished a lesson
    CompletedLesson,
    /// Opened a learning session
    StartedSession,
}

/// Whether a local hour falls in the late-night window `[22, 24) ∪ [0, 5]`
pub fn is_late_hour(hour: u32) -> bool {
    hour >= 22 || hour <= 5
}

/// Real-time companion state read by the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanionState {
    /// Current mood
    pub mood: CompanionMood,

    /// Energy level (0.0 to 1.0), drives animation speed
    #[serde(deserialize_with = "crate::utils::deserialize_unit")]
    energy: f32,

    /// When the learner last did something
    pub last_interaction: DateTime<Utc>,

    /// Label of what the learner is doing, e.g. "Reviewing Fractions"
    pub current_activity: Option<String>,

    /// Set while a generation call is pending
    pub is_speaking: bool,
}

impl Default for CompanionState {
    fn default() -> Self {
        Self {
            mood: CompanionMood::Neutral,
            energy: 1.0,
            last_interaction: Utc::now(),
            current_activity: None,
            is_speaking: false,
        }
    }
}

impl CompanionState {
    /// Create a fresh state
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with a specific energy level
    pub fn with_energy(mut self, energy: f32) -> Self {
        self.energy = energy.clamp(0.0, 1.0);
        self
    }

    /// Current energy
    pub fn energy(&self) -> f32 {
        self.energy
    }

    /// Stamp the interaction time without changing mood
    pub fn record_interaction(&mut self) {
        self.last_interaction = Utc::now();
    }

    /// Apply a learner action using the local wall clock
    pub fn update_mood(&mut self, action: UserAction) {
        self.update_mood_at(action, Local::now());
    }

    /// Apply a learner action as if it happened at `now`
    pub fn update_mood_at(&mut self, action: UserAction, now: DateTime<Local>) {
        let previous = self.mood;

        match action {
            UserAction::AnsweredCorrect => {
                self.mood = CompanionMood::Celebrating;
                self.energy = (self.energy + CORRECT_ANSWER_ENERGY_BOOST).min(1.0);
            }
            UserAction::AnsweredIncorrect | UserAction::Struggled => {
                self.mood = CompanionMood::Encouraging;
            }
            UserAction::AskedQuestion => {
                self.mood = CompanionMood::Thoughtful;
            }
            UserAction::CompletedLesson => {
                self.mood = CompanionMood::Celebrating;
                self.energy = 1.0;
            }
            UserAction::StartedSession => {
                self.mood = Self::start_mood(now.hour());
            }
        }

        self.last_interaction = now.with_timezone(&Utc);

        tracing::debug!(
            action = ?action,
            from = ?previous,
            to = ?self.mood,
            energy = self.energy,
            "Companion mood transition"
        );
    }

    fn start_mood(hour: u32) -> CompanionMood {
        if is_late_hour(hour) {
            CompanionMood::Tired
        } else {
            CompanionMood::Curious
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at_hour(hour: u32) -> DateTime<Local> {
        Local
            .with_ymd_and_hms(2025, 10, 6, hour, 15, 0)
            .earliest()
            .expect("valid local time")
    }

    #[test]
    fn test_completed_lesson_always_celebrates_at_full_energy() {
        for action in [
            UserAction::AnsweredIncorrect,
            UserAction::Struggled,
            UserAction::StartedSession,
        ] {
            let mut state = CompanionState::new().with_energy(0.2);
            state.update_mood_at(action, at_hour(23));
            state.update_mood_at(UserAction::CompletedLesson, at_hour(23));

            assert_eq!(state.mood, CompanionMood::Celebrating);
            assert_eq!(state.energy(), 1.0);
        }
    }

    #[test]
    fn test_correct_answer_boosts_energy_with_cap() {
        let mut state = CompanionState::new().with_energy(0.5);
        state.update_mood_at(UserAction::AnsweredCorrect, at_hour(10));
        assert_eq!(state.mood, CompanionMood::Celebrating);
        assert!((state.energy() - 0.6).abs() < 1e-6);

        let mut full = CompanionState::new().with_energy(0.95);
        full.update_mood_at(UserAction::AnsweredCorrect, at_hour(10));
        assert_eq!(full.energy(), 1.0);
    }

    #[test]
    fn test_neutral_transitions_keep_energy() {
        let mut state = CompanionState::new().with_energy(0.4);

        state.update_mood_at(UserAction::AnsweredIncorrect, at_hour(12));
        assert_eq!(state.mood, CompanionMood::Encouraging);

        state.update_mood_at(UserAction::AskedQuestion, at_hour(12));
        assert_eq!(state.mood, CompanionMood::Thoughtful);

        state.update_mood_at(UserAction::Struggled, at_hour(12));
        assert_eq!(state.mood, CompanionMood::Encouraging);

        assert!((state.energy() - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_started_session_time_of_day() {
        let cases = [
            (23, CompanionMood::Tired),
            (22, CompanionMood::Tired),
            (0, CompanionMood::Tired),
            (5, CompanionMood::Tired),
            (6, CompanionMood::Curious),
            (14, CompanionMood::Curious),
            (21, CompanionMood::Curious),
        ];

        for (hour, expected) in cases {
            let mut state = CompanionState::new();
            state.update_mood_at(UserAction::StartedSession, at_hour(hour));
            assert_eq!(state.mood, expected, "hour {}", hour);
        }
    }

    #[test]
    fn test_late_session_then_correct_answer() {
        let mut state = CompanionState::new().with_energy(0.7);
        state.update_mood_at(UserAction::StartedSession, at_hour(23));
        assert_eq!(state.mood, CompanionMood::Tired);

        state.update_mood_at(UserAction::AnsweredCorrect, at_hour(23));
        assert_eq!(state.mood, CompanionMood::Celebrating);
        assert!((state.energy() - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_transition_stamps_interaction_time() {
        let mut state = CompanionState::new();
        let when = at_hour(9);
        state.update_mood_at(UserAction::AskedQuestion, when);
        assert_eq!(state.last_interaction, when.with_timezone(&Utc));
    }
}
