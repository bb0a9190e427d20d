//! Avatar Memory - long-term record of the learner's history
//!
//! Append and increment only. Nothing here is ever removed; the record
//! lives as long as the avatar does.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Persistent memory of topics, struggles, achievements and study time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvatarMemory {
    /// When the learner last finished a conversation
    pub last_seen_date: DateTime<Utc>,

    /// Topics in the order they were first discussed, without duplicates
    topics_discussed: Vec<String>,

    /// Number of struggles noted per topic
    struggles_noted: BTreeMap<String, u32>,

    /// Timestamped achievement log, `"<rfc3339>: <text>"`
    achievements: Vec<String>,

    /// Completed conversations
    pub conversation_count: u32,

    /// Cumulative study time
    pub total_study_minutes: u32,
}

impl Default for AvatarMemory {
    fn default() -> Self {
        Self {
            last_seen_date: Utc::now(),
            topics_discussed: Vec::new(),
            struggles_noted: BTreeMap::new(),
            achievements: Vec::new(),
            conversation_count: 0,
            total_study_minutes: 0,
        }
    }
}

impl AvatarMemory {
    /// Create an empty memory
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember a topic; repeated topics are ignored
    pub fn record_topic(&mut self, topic: impl Into<String>) {
        let topic = topic.into();
        if !self.topics_discussed.contains(&topic) {
            tracing::debug!(topic = %topic, "New topic recorded");
            self.topics_discussed.push(topic);
        }
    }

    /// Count one more struggle with a topic
    pub fn record_struggle(&mut self, topic: impl Into<String>) {
        let count = self.struggles_noted.entry(topic.into()).or_insert(0);
        *count = count.saturating_add(1);
    }

    /// Log an achievement stamped with the current time
    pub fn record_achievement(&mut self, description: &str) {
        self.record_achievement_at(description, Utc::now());
    }

    /// Log an achievement stamped with `at`
    pub fn record_achievement_at(&mut self, description: &str, at: DateTime<Utc>) {
        self.achievements.push(format!(
            "{}: {}",
            at.to_rfc3339_opts(SecondsFormat::Secs, true),
            description
        ));
    }

    /// Count a finished conversation and its duration
    pub fn record_conversation(&mut self, duration_minutes: u32) {
        self.conversation_count = self.conversation_count.saturating_add(1);
        self.total_study_minutes = self.total_study_minutes.saturating_add(duration_minutes);
        self.last_seen_date = Utc::now();
    }

    /// Topic with the most struggles
    ///
    /// Ties go to the lexicographically smallest topic, so the answer does not
    /// depend on insertion order.
    pub fn most_challenging_topic(&self) -> Option<&str> {
        self.struggles_noted
            .iter()
            .fold(None, |best: Option<(&String, u32)>, (topic, &count)| match best {
                Some((_, best_count)) if best_count >= count => best,
                _ => Some((topic, count)),
            })
            .map(|(topic, _)| topic.as_str())
    }

    /// Topics in first-discussed order
    pub fn topics_discussed(&self) -> &[String] {
        &self.topics_discussed
    }

    /// Struggle count for a topic (0 when never noted)
    pub fn struggle_count(&self, topic: &str) -> u32 {
        self.struggles_noted.get(topic).copied().unwrap_or(0)
    }

    /// All struggle counts
    pub fn struggles_noted(&self) -> &BTreeMap<String, u32> {
        &self.struggles_noted
    }

    /// Full achievement log
    pub fn achievements(&self) -> &[String] {
        &self.achievements
    }

    /// The last `n` topics, oldest first
    pub fn recent_topics(&self, n: usize) -> &[String] {
        let start = self.topics_discussed.len().saturating_sub(n);
        &self.topics_discussed[start..]
    }

    /// The last `n` achievements, oldest first
    pub fn recent_achievements(&self, n: usize) -> &[String] {
        let start = self.achievements.len().saturating_sub(n);
        &self.achievements[start..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_record_topic_is_idempotent() {
        let mut memory = AvatarMemory::new();
        memory.record_topic("fractions");
        memory.record_topic("fractions");
        assert_eq!(memory.topics_discussed(), &["fractions".to_string()]);
    }

    #[test]
    fn test_topics_keep_first_seen_order() {
        let mut memory = AvatarMemory::new();
        for topic in ["algebra", "fractions", "algebra", "geometry"] {
            memory.record_topic(topic);
        }
        assert_eq!(memory.topics_discussed(), &["algebra", "fractions", "geometry"]);
        assert_eq!(memory.recent_topics(2), &["fractions", "geometry"]);
        assert_eq!(memory.recent_topics(10).len(), 3);
    }

    #[test]
    fn test_record_struggle_accumulates() {
        let mut memory = AvatarMemory::new();
        for _ in 0..3 {
            memory.record_struggle("fractions");
        }
        memory.record_struggle("decimals");

        assert_eq!(memory.struggle_count("fractions"), 3);
        assert_eq!(memory.struggle_count("percentages"), 0);
        assert_eq!(memory.most_challenging_topic(), Some("fractions"));
    }

    #[test]
    fn test_most_challenging_topic_empty() {
        assert_eq!(AvatarMemory::new().most_challenging_topic(), None);
    }

    #[test]
    fn test_most_challenging_topic_tie_prefers_smallest_name() {
        let mut memory = AvatarMemory::new();
        memory.record_struggle("geometry");
        memory.record_struggle("geometry");
        memory.record_struggle("algebra");
        memory.record_struggle("algebra");
        memory.record_struggle("calculus");

        assert_eq!(memory.most_challenging_topic(), Some("algebra"));
    }

    #[test]
    fn test_record_achievement_format() {
        let mut memory = AvatarMemory::new();
        let at = Utc.with_ymd_and_hms(2025, 10, 6, 18, 30, 0).unwrap();
        memory.record_achievement_at("Completed a lesson", at);

        assert_eq!(memory.achievements(), &["2025-10-06T18:30:00Z: Completed a lesson"]);
    }

    #[test]
    fn test_record_conversation() {
        let mut memory = AvatarMemory::new();
        memory.last_seen_date = Utc::now() - chrono::Duration::days(3);
        let before = memory.last_seen_date;

        memory.record_conversation(15);
        memory.record_conversation(0);

        assert_eq!(memory.conversation_count, 2);
        assert_eq!(memory.total_study_minutes, 15);
        assert!(memory.last_seen_date > before);
    }

    #[test]
    fn test_recent_achievements() {
        let mut memory = AvatarMemory::new();
        memory.record_achievement("first");
        memory.record_achievement("second");
        memory.record_achievement("third");

        let recent = memory.recent_achievements(2);
        assert_eq!(recent.len(), 2);
        assert!(recent[0].ends_with(": second"));
        assert!(recent[1].ends_with(": third"));
    }
}
