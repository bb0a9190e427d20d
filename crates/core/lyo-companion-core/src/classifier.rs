//! Fixed-keyword classifiers
//!
//! All text classification in the engine is case-insensitive substring
//! containment against the tables below. There is no tokenisation, so short
//! keywords such as `"ai"` also match inside longer words ("explain").

use crate::types::{Pace, Personality, ScaffoldingStyle};

/// A row of keywords mapped to a label
pub type KeywordRow<T> = (&'static [&'static str], T);

/// Topic vocabulary tracked by the conversation context
pub const TOPIC_VOCABULARY: &[&str] = &[
    "swift",
    "ios",
    "programming",
    "design",
    "ai",
    "machine learning",
    "web development",
    "course",
    "learning",
    "tutorial",
];

/// Learning goals → base personality, checked top to bottom
pub const GOAL_PERSONALITY_TABLE: &[KeywordRow<Personality>] = &[
    (&["career", "professional"], Personality::EnergeticCoach),
    (&["personal", "hobby"], Personality::FriendlyCurious),
    (&["mastery", "deep"], Personality::WisePatient),
];

/// Preferred style → scaffolding style, checked top to bottom
pub const STYLE_TABLE: &[KeywordRow<ScaffoldingStyle>] = &[
    (&["example"], ScaffoldingStyle::ExamplesFirst),
    (&["theory"], ScaffoldingStyle::TheoryFirst),
    (&["practice", "challenge"], ScaffoldingStyle::ChallengeBased),
];

/// Timelines at or under this many days call for a fast pace
pub const FAST_TIMELINE_DAYS: u32 = 30;

/// Timelines at or over this many days call for a slow pace
pub const SLOW_TIMELINE_DAYS: u32 = 180;

/// Label of the first row with a keyword contained in `text`
pub fn classify_first<T: Copy>(text: &str, table: &[KeywordRow<T>]) -> Option<T> {
    let text = text.to_lowercase();
    table
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| text.contains(k)))
        .map(|(_, label)| *label)
}

/// Every vocabulary entry contained in `text`, in vocabulary order
pub fn matching_keywords(text: &str, vocabulary: &[&'static str]) -> Vec<&'static str> {
    let text = text.to_lowercase();
    vocabulary
        .iter()
        .copied()
        .filter(|k| text.contains(k))
        .collect()
}

/// Topics from [`TOPIC_VOCABULARY`] mentioned in `text`
pub fn extract_topics(text: &str) -> Vec<&'static str> {
    matching_keywords(text, TOPIC_VOCABULARY)
}

/// Base personality suggested by free-text learning goals
pub fn classify_goals(goals: &str) -> Option<Personality> {
    classify_first(goals, GOAL_PERSONALITY_TABLE)
}

/// Scaffolding style suggested by a free-text style preference
pub fn classify_style(preferred_style: &str) -> Option<ScaffoldingStyle> {
    classify_first(preferred_style, STYLE_TABLE)
}

/// Pace implied by a timeline; `None` for the middle band
pub fn classify_timeline(days: u32) -> Option<Pace> {
    if days <= FAST_TIMELINE_DAYS {
        Some(Pace::Fast)
    } else if days >= SLOW_TIMELINE_DAYS {
        Some(Pace::Slow)
    } else {
        None
    }
}
