//! Conversation Context - bounded log of recent exchanges
//!
//! Keeps the last interactions of a session along with derived signals used
//! to steer generation: topic frequency, recent activity and a rough
//! complexity score.
//!
//! The interaction log is capped at [`INTERACTION_CAPACITY`]. Once it grows
//! past the cap the oldest [`EVICTION_BATCH`] entries are dropped in one go,
//! so after 101 inserts the log holds 51 entries.

use crate::classifier;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Maximum interactions kept before eviction
pub const INTERACTION_CAPACITY: usize = 100;

/// Oldest interactions dropped when the cap is exceeded
pub const EVICTION_BATCH: usize = 50;

/// Window for [`ConversationContext::recent_interaction_count`]
pub const RECENT_WINDOW_SECS: i64 = 300;

/// Interactions averaged by [`ConversationContext::complexity_score`]
pub const COMPLEXITY_WINDOW: usize = 10;

/// Maximum characters of a preference key
pub const PREFERENCE_KEY_CHARS: usize = 50;

/// Topics returned by [`ConversationContext::extract_recent_topics`]
pub const TOP_TOPICS: usize = 5;

/// A single message in the log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    /// Message text
    pub text: String,
    /// Whether the learner wrote it
    pub is_from_user: bool,
    /// When it was recorded
    pub timestamp: DateTime<Utc>,
}

/// Sliding-window conversational context for one session
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversationContext {
    interactions: Vec<Interaction>,

    topic_frequency: HashMap<String, u32>,

    /// Topics in the order they were first seen; breaks frequency ties
    topic_order: Vec<String>,

    user_preferences: HashMap<String, f64>,
}

impl ConversationContext {
    /// Create an empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message stamped with the current time
    pub fn add_interaction(&mut self, text: impl Into<String>, is_from_user: bool) {
        self.add_interaction_at(text, is_from_user, Utc::now());
    }

    /// Record a message stamped with `timestamp`
    pub fn add_interaction_at(
        &mut self,
        text: impl Into<String>,
        is_from_user: bool,
        timestamp: DateTime<Utc>,
    ) {
        let text = text.into();

        for topic in classifier::extract_topics(&text) {
            if !self.topic_frequency.contains_key(topic) {
                self.topic_order.push(topic.to_string());
            }
            *self.topic_frequency.entry(topic.to_string()).or_insert(0) += 1;
        }

        self.interactions.push(Interaction {
            text,
            is_from_user,
            timestamp,
        });

        if self.interactions.len() > INTERACTION_CAPACITY {
            self.interactions.drain(..EVICTION_BATCH);
            tracing::debug!(
                remaining = self.interactions.len(),
                "Evicted oldest interactions from conversation context"
            );
        }
    }

    /// Accumulate weight on a preference derived from `text`
    pub fn add_preference(&mut self, text: &str, weight: f64) {
        let key = Self::preference_key(text);
        *self.user_preferences.entry(key).or_insert(0.0) += weight;
    }

    /// Normalised preference key: lowercase, first 50 characters, trimmed
    pub fn preference_key(text: &str) -> String {
        let truncated: String = text.to_lowercase().chars().take(PREFERENCE_KEY_CHARS).collect();
        truncated.trim().to_string()
    }

    /// Accumulated weight for a preference
    pub fn preference_weight(&self, text: &str) -> f64 {
        self.user_preferences
            .get(&Self::preference_key(text))
            .copied()
            .unwrap_or(0.0)
    }

    /// All preference weights
    pub fn user_preferences(&self) -> &HashMap<String, f64> {
        &self.user_preferences
    }

    /// Interactions in the last five minutes
    pub fn recent_interaction_count(&self) -> usize {
        self.recent_interaction_count_at(Utc::now())
    }

    /// Interactions in the five minutes before `now`
    pub fn recent_interaction_count_at(&self, now: DateTime<Utc>) -> usize {
        let cutoff = now - Duration::seconds(RECENT_WINDOW_SECS);
        self.interactions
            .iter()
            .filter(|i| i.timestamp > cutoff)
            .count()
    }

    /// Mean length of the last ten messages over 100, clamped to `[0, 1]`
    pub fn complexity_score(&self) -> f64 {
        let start = self.interactions.len().saturating_sub(COMPLEXITY_WINDOW);
        let recent = &self.interactions[start..];
        if recent.is_empty() {
            return 0.0;
        }

        let total: usize = recent.iter().map(|i| i.text.chars().count()).sum();
        let average = total as f64 / recent.len() as f64;
        (average / 100.0).clamp(0.0, 1.0)
    }

    /// Top five topics by count; equal counts keep first-seen order
    pub fn extract_recent_topics(&self) -> Vec<String> {
        let mut ranked: Vec<(&String, u32)> = self
            .topic_order
            .iter()
            .map(|topic| (topic, self.topic_frequency.get(topic).copied().unwrap_or(0)))
            .collect();

        // sort_by is stable
        ranked.sort_by(|a, b| b.1.cmp(&a.1));

        ranked
            .into_iter()
            .take(TOP_TOPICS)
            .map(|(topic, _)| topic.clone())
            .collect()
    }

    /// How often a topic has come up
    pub fn topic_count(&self, topic: &str) -> u32 {
        self.topic_frequency.get(topic).copied().unwrap_or(0)
    }

    /// The interaction log, oldest first
    pub fn interactions(&self) -> &[Interaction] {
        &self.interactions
    }

    /// Number of interactions held
    pub fn len(&self) -> usize {
        self.interactions.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.interactions.is_empty()
    }
}
