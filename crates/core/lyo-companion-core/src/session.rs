//! Companion Session
//!
//! One learner, one avatar, one session object. The session owns the avatar
//! record, its live [`CompanionState`], its long-term [`AvatarMemory`] and the
//! short-lived [`ConversationContext`], and routes learner actions and chat
//! messages through them.
//!
//! # Generation and staleness
//!
//! A reply is produced in two halves. [`CompanionSession::begin_generation`]
//! records the learner's message and issues a [`GenerationTicket`] carrying a
//! sequence number. [`CompanionSession::complete_generation`] applies the
//! service result only if that ticket is still the latest one issued; a reply
//! that arrives after a newer request was started is dropped as
//! [`GenerationOutcome::Stale`].
//!
//! [`CompanionSession::respond_shared`] drives both halves against a session
//! behind `Arc<tokio::sync::Mutex<_>>` and releases the lock while the service
//! call is pending, so newer messages can supersede older ones.
//! Dropping a `respond` or `respond_shared` future before it resolves cancels
//! its request and clears `is_speaking` if no newer request has been issued.

use crate::calibration;
use crate::classifier;
use crate::config::CompanionConfig;
use crate::generation::{GenerationRequest, GenerationService};
use crate::storage::AvatarRepository;
use crate::types::{
    state::is_late_hour, Avatar, AvatarMemory, AvatarStyle, BehaviorSignals, CalibrationAnswers,
    CompanionMood, CompanionState, ConversationContext, Personality, UserAction,
};
use crate::voice::{self, VoiceProfile};
use crate::{CompanionError, Result};
use chrono::{DateTime, Local, Timelike, Utc};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use uuid::Uuid;

/// Achievement recorded when a lesson is completed
pub const LESSON_ACHIEVEMENT: &str = "Completed a lesson";

/// Struggle count above which the ambient mood turns encouraging
pub const STRUGGLE_MOOD_THRESHOLD: u32 = 3;

/// Achievements scanned by [`CompanionSession::ambient_mood`]
pub const AMBIENT_ACHIEVEMENT_WINDOW: usize = 5;

/// Memory topics quoted in the system prompt
pub const PROMPT_TOPIC_COUNT: usize = 3;

/// Achievements quoted in the system prompt
pub const PROMPT_ACHIEVEMENT_COUNT: usize = 2;

/// Preference weight added when the learner likes a message
pub const LIKE_WEIGHT: f64 = 0.1;

/// Recent interactions above which the conversation counts as lively
pub const LIVELY_INTERACTION_COUNT: usize = 5;

/// Complexity score above which the companion turns thoughtful
pub const THOUGHTFUL_COMPLEXITY: f64 = 0.8;

/// Issued by [`CompanionSession::begin_generation`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationTicket {
    /// Sequence number of this request
    pub sequence: u64,
    /// Prompt to hand to the generation service
    pub prompt: String,
    /// The learner message that started the request
    pub message: String,
}

impl GenerationTicket {
    /// The request to send to the generation service
    pub fn request(&self) -> GenerationRequest {
        GenerationRequest::new(self.sequence, self.prompt.clone())
    }
}

/// What happened to a generation result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    /// The reply was recorded and should be shown
    Applied(String),
    /// Generation failed; show this text instead, nothing was recorded
    Fallback(String),
    /// A newer request superseded this one; nothing was recorded
    Stale {
        /// Sequence of the dropped request
        sequence: u64,
        /// Latest sequence issued by the session
        latest: u64,
    },
}

impl GenerationOutcome {
    /// Text to present, if any
    pub fn text(&self) -> Option<&str> {
        match self {
            GenerationOutcome::Applied(text) | GenerationOutcome::Fallback(text) => Some(text),
            GenerationOutcome::Stale { .. } => None,
        }
    }

    /// Whether the result was dropped
    pub fn is_stale(&self) -> bool {
        matches!(self, GenerationOutcome::Stale { .. })
    }
}

/// Per-avatar companion session
pub struct CompanionSession {
    avatar: Avatar,
    state: CompanionState,
    memory: AvatarMemory,
    context: ConversationContext,
    service: Arc<dyn GenerationService>,
    config: CompanionConfig,
    latest_sequence: u64,
}

impl std::fmt::Debug for CompanionSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompanionSession")
            .field("avatar", &self.avatar.id)
            .field("mood", &self.state.mood)
            .field("interactions", &self.context.len())
            .field("latest_sequence", &self.latest_sequence)
            .finish()
    }
}

impl CompanionSession {
    /// Start a fresh session for an avatar
    pub fn new(
        avatar: Avatar,
        service: Arc<dyn GenerationService>,
        config: CompanionConfig,
    ) -> Self {
        Self {
            avatar,
            state: CompanionState::new(),
            memory: AvatarMemory::new(),
            context: ConversationContext::new(),
            service,
            config,
            latest_sequence: 0,
        }
    }

    /// Replace the companion state
    pub fn with_state(mut self, state: CompanionState) -> Self {
        self.state = state;
        self
    }

    /// Replace the long-term memory
    pub fn with_memory(mut self, memory: AvatarMemory) -> Self {
        self.memory = memory;
        self
    }

    /// Wrap in `Arc<Mutex<_>>` for [`CompanionSession::respond_shared`]
    pub fn into_shared(self) -> Arc<Mutex<Self>> {
        Arc::new(Mutex::new(self))
    }

    /// The avatar record
    pub fn avatar(&self) -> &Avatar {
        &self.avatar
    }

    /// Live companion state
    pub fn state(&self) -> &CompanionState {
        &self.state
    }

    /// Long-term memory
    pub fn memory(&self) -> &AvatarMemory {
        &self.memory
    }

    /// Conversation context of this session
    pub fn context(&self) -> &ConversationContext {
        &self.context
    }

    /// Session configuration
    pub fn config(&self) -> &CompanionConfig {
        &self.config
    }

    /// Current mood
    pub fn mood(&self) -> CompanionMood {
        self.state.mood
    }

    /// Current energy
    pub fn energy(&self) -> f32 {
        self.state.energy()
    }

    /// Visual style of the avatar
    pub fn style(&self) -> AvatarStyle {
        self.avatar.style
    }

    /// Whether a generation call is pending
    pub fn is_speaking(&self) -> bool {
        self.state.is_speaking
    }

    /// Base personality of the avatar
    pub fn personality(&self) -> Personality {
        self.avatar.personality()
    }

    /// Speech modulation for the current mood
    pub fn voice_profile(&self) -> VoiceProfile {
        VoiceProfile::for_mood(self.personality(), self.state.mood)
    }

    /// Apply a learner action
    pub fn record_user_action(&mut self, action: UserAction) {
        self.record_user_action_at(action, Local::now());
    }

    /// Apply a learner action as if it happened at `now`
    pub fn record_user_action_at(&mut self, action: UserAction, now: DateTime<Local>) {
        self.state.update_mood_at(action, now);

        match action {
            UserAction::CompletedLesson => {
                self.memory.record_achievement(LESSON_ACHIEVEMENT);
            }
            UserAction::Struggled => {
                if let Some(activity) = self.state.current_activity.clone() {
                    self.memory.record_struggle(activity);
                }
            }
            _ => {}
        }
    }

    /// Apply a learner action and pick a spoken reaction, if the companion has one
    pub fn react(&mut self, action: UserAction) -> Option<String> {
        self.record_user_action(action);
        voice::choose_reaction(action, &self.avatar.profile, &mut rand::thread_rng())
            .map(str::to_string)
    }

    /// Begin studying `topic`; returns the greeting to show
    pub fn start_session(&mut self, topic: impl Into<String>) -> String {
        self.start_session_at(topic, Local::now())
    }

    /// Begin studying `topic` at `now`; returns the greeting to show
    pub fn start_session_at(&mut self, topic: impl Into<String>, now: DateTime<Local>) -> String {
        let topic = topic.into();
        let greeting = self.greeting_at(now.hour());

        self.state.current_activity = Some(topic.clone());
        self.state.update_mood_at(UserAction::StartedSession, now);
        self.memory.record_topic(topic.clone());
        self.memory.record_conversation(0);

        tracing::info!(
            avatar_id = %self.avatar.id,
            topic = %topic,
            mood = ?self.state.mood,
            conversations = self.memory.conversation_count,
            "Learning session started"
        );

        greeting
    }

    /// Finish the current session; returns the farewell line
    pub fn end_session(&mut self, duration_minutes: u32) -> &'static str {
        self.memory.record_conversation(duration_minutes);
        let activity = self.state.current_activity.take();

        tracing::info!(
            avatar_id = %self.avatar.id,
            activity = ?activity,
            minutes = duration_minutes,
            total_minutes = self.memory.total_study_minutes,
            "Learning session ended"
        );

        voice::FAREWELL
    }

    /// Greeting for the current local time
    pub fn greeting(&self) -> String {
        self.greeting_at(Local::now().hour())
    }

    /// Greeting for a given hour of day
    pub fn greeting_at(&self, hour: u32) -> String {
        let time_greeting = if hour < 12 {
            "Good morning"
        } else if hour < 18 {
            "Good afternoon"
        } else {
            "Good evening"
        };
        let name = &self.avatar.name;

        if let Some(last_topic) = self.memory.topics_discussed().last() {
            return format!("{time_greeting}, {name}! Ready to continue with {last_topic}?");
        }

        if self.memory.conversation_count == 0 {
            return format!(
                "{time_greeting}! I'm {name}, your learning companion. What would you like to learn today?"
            );
        }

        format!("{time_greeting}, {name}! What would you like to explore today?")
    }

    /// Mood suggested by time of day and memory, independent of recent actions
    pub fn ambient_mood(&self) -> CompanionMood {
        self.ambient_mood_at(Local::now().hour())
    }

    /// Ambient mood for a given hour of day
    pub fn ambient_mood_at(&self, hour: u32) -> CompanionMood {
        if is_late_hour(hour) {
            return CompanionMood::Tired;
        }

        let celebrated = self
            .memory
            .recent_achievements(AMBIENT_ACHIEVEMENT_WINDOW)
            .iter()
            .any(|a| a.to_lowercase().contains("completed"));
        if celebrated {
            return CompanionMood::Celebrating;
        }

        if let Some(topic) = self.memory.most_challenging_topic() {
            if self.memory.struggle_count(topic) > STRUGGLE_MOOD_THRESHOLD {
                return CompanionMood::Encouraging;
            }
        }

        self.personality().resting_mood()
    }

    /// System prompt for the generation service
    ///
    /// Combines the personality prompt, calibration answers, memory and
    /// behaviour directives derived from the profile. `extra_context` is
    /// appended when non-empty.
    pub fn build_system_prompt(&self, extra_context: &str) -> String {
        let calibration = &self.avatar.calibration;
        let profile = &self.avatar.profile;

        let mut prompt = self.personality().system_prompt().to_string();

        prompt.push_str(&format!(
            "\n\nLearning Style: {}",
            calibration.learning_style.description()
        ));
        prompt.push_str(&format!("\nPace Preference: {}", calibration.pace));
        prompt.push_str(&format!("\nMotivation Style: {}", calibration.motivation));

        let topics = self.memory.recent_topics(PROMPT_TOPIC_COUNT);
        if !topics.is_empty() {
            prompt.push_str(&format!("\n\nRecent Topics: {}", topics.join(", ")));
        }

        if let Some(topic) = self.memory.most_challenging_topic() {
            prompt.push_str(&format!(
                "\nStudent struggles with: {topic} (be extra patient and scaffold carefully)"
            ));
        }

        let achievements = self.memory.recent_achievements(PROMPT_ACHIEVEMENT_COUNT);
        if !achievements.is_empty() {
            prompt.push_str(&format!("\nRecent achievements: {}", achievements.join("; ")));
        }

        let hints = profile.hint_frequency();
        if hints > 0.7 {
            prompt.push_str("\n\nProvide frequent hints and guidance.");
        } else if hints < 0.3 {
            prompt.push_str(
                "\n\nLet the student figure things out independently; only hint when stuck.",
            );
        }

        let celebration = profile.celebration_intensity();
        if celebration > 0.7 {
            prompt.push_str("\nCelebrate wins enthusiastically with emojis and encouragement!");
        } else if celebration < 0.4 {
            prompt.push_str("\nAcknowledge progress quietly and professionally.");
        }

        if !extra_context.is_empty() {
            prompt.push_str(&format!("\n\nCurrent Context: {extra_context}"));
        }

        prompt
    }

    /// Full prompt for a learner message
    pub fn assemble_prompt(&self, message: &str) -> String {
        let mut prompt = self.build_system_prompt("");

        let topics = self.context.extract_recent_topics();
        if !topics.is_empty() {
            prompt.push_str(&format!("\n\nConversation topics: {}", topics.join(", ")));
        }

        prompt.push_str(&format!("\n\nUser: {message}"));
        prompt
    }

    /// Nudge the avatar's profile from observed behaviour
    pub fn adapt_profile(&mut self, signals: BehaviorSignals) {
        if !signals.any() {
            return;
        }
        self.avatar.profile.adapt(signals);

        tracing::debug!(
            avatar_id = %self.avatar.id,
            hint_frequency = self.avatar.profile.hint_frequency(),
            celebration_intensity = self.avatar.profile.celebration_intensity(),
            pace_preference = self.avatar.profile.pace_preference(),
            "Adapted personality profile"
        );
    }

    /// Re-run calibration with new onboarding answers
    pub fn recalibrate(&mut self, answers: CalibrationAnswers) {
        self.avatar.profile = calibration::calibrate(&answers, self.personality());
        self.avatar.calibration = answers;
    }

    /// The learner liked a message
    pub fn like_message(&mut self, text: &str) {
        self.context.add_preference(text, LIKE_WEIGHT);
        tracing::debug!(
            avatar_id = %self.avatar.id,
            weight = self.context.preference_weight(text),
            "Learner liked a message"
        );
    }

    /// Let the conversation's pace and depth steer the mood
    pub fn evolve_mood(&mut self) -> CompanionMood {
        self.evolve_mood_at(Utc::now())
    }

    /// [`Self::evolve_mood`] with an explicit clock
    ///
    /// More than five interactions in the last five minutes make the
    /// companion excited; otherwise long messages make it thoughtful.
    /// Anything else leaves the mood alone.
    pub fn evolve_mood_at(&mut self, now: DateTime<Utc>) -> CompanionMood {
        if self.context.recent_interaction_count_at(now) > LIVELY_INTERACTION_COUNT {
            self.state.mood = CompanionMood::Excited;
        } else if self.context.complexity_score() > THOUGHTFUL_COMPLEXITY {
            self.state.mood = CompanionMood::Thoughtful;
        }
        self.state.mood
    }

    /// Record a learner message and issue a ticket for its reply
    pub fn begin_generation(&mut self, message: impl Into<String>) -> GenerationTicket {
        let message = message.into();

        self.context.add_interaction(message.clone(), true);
        self.latest_sequence += 1;
        self.state.is_speaking = true;

        let ticket = GenerationTicket {
            sequence: self.latest_sequence,
            prompt: self.assemble_prompt(&message),
            message,
        };

        tracing::debug!(
            avatar_id = %self.avatar.id,
            sequence = ticket.sequence,
            prompt_len = ticket.prompt.len(),
            "Generation started"
        );

        ticket
    }

    /// Apply the service result for a ticket
    pub fn complete_generation(
        &mut self,
        ticket: GenerationTicket,
        result: Result<String>,
    ) -> GenerationOutcome {
        if ticket.sequence != self.latest_sequence {
            tracing::warn!(
                avatar_id = %self.avatar.id,
                sequence = ticket.sequence,
                latest = self.latest_sequence,
                "Dropping stale generation result"
            );
            return GenerationOutcome::Stale {
                sequence: ticket.sequence,
                latest: self.latest_sequence,
            };
        }

        self.state.is_speaking = false;

        match result {
            Ok(reply) => {
                self.context.add_interaction(reply.clone(), false);
                for topic in classifier::extract_topics(&ticket.message) {
                    self.memory.record_topic(topic);
                }
                self.state.record_interaction();

                tracing::debug!(
                    avatar_id = %self.avatar.id,
                    sequence = ticket.sequence,
                    reply_len = reply.len(),
                    "Generation applied"
                );
                GenerationOutcome::Applied(reply)
            }
            Err(e) => {
                tracing::warn!(
                    avatar_id = %self.avatar.id,
                    sequence = ticket.sequence,
                    error = %e,
                    "Generation failed, using fallback response"
                );
                GenerationOutcome::Fallback(self.config.fallback_response.clone())
            }
        }
    }

    /// Abandon a pending request
    ///
    /// Clears `is_speaking` when `sequence` is the latest request issued.
    /// Returns whether anything changed.
    pub fn cancel_generation(&mut self, sequence: u64) -> bool {
        if sequence != self.latest_sequence || !self.state.is_speaking {
            return false;
        }
        self.state.is_speaking = false;

        tracing::debug!(
            avatar_id = %self.avatar.id,
            sequence,
            "Generation abandoned before completion"
        );
        true
    }

    /// Generate a reply to `message` with exclusive access to the session
    ///
    /// Dropping the returned future before it resolves cancels the request.
    pub async fn respond(&mut self, message: impl Into<String>) -> GenerationOutcome {
        let ticket = self.begin_generation(message);
        let service = self.service.clone();
        let deadline = self.config.generation_timeout();

        let mut pending = ExclusiveGeneration {
            session: self,
            sequence: ticket.sequence,
            finished: false,
        };
        let result = run_generation(service, ticket.request(), deadline).await;

        pending.finished = true;
        pending.session.complete_generation(ticket, result)
    }

    /// Generate a reply on a shared session without holding the lock across the call
    pub async fn respond_shared(
        session: &Arc<Mutex<CompanionSession>>,
        message: impl Into<String>,
    ) -> GenerationOutcome {
        let (ticket, service, deadline) = {
            let mut guard = session.lock().await;
            let ticket = guard.begin_generation(message);
            (ticket, guard.service.clone(), guard.config.generation_timeout())
        };

        let mut pending = SharedGeneration {
            session: session.clone(),
            sequence: ticket.sequence,
            finished: false,
        };
        let result = run_generation(service, ticket.request(), deadline).await;

        let outcome = session.lock().await.complete_generation(ticket, result);
        pending.finished = true;
        outcome
    }

    /// Persist avatar, state and memory
    pub async fn save(&self, repo: &dyn AvatarRepository) -> Result<()> {
        repo.save_avatar(&self.avatar).await?;
        repo.save_state(self.avatar.id, &self.state).await?;
        repo.save_memory(self.avatar.id, &self.memory).await?;

        tracing::debug!(avatar_id = %self.avatar.id, "Saved companion session");
        Ok(())
    }

    /// Rebuild a session from stored records
    ///
    /// The avatar must exist; missing state or memory start fresh. The
    /// conversation context always starts empty.
    pub async fn restore(
        repo: &dyn AvatarRepository,
        id: Uuid,
        service: Arc<dyn GenerationService>,
        config: CompanionConfig,
    ) -> Result<Self> {
        let avatar = repo
            .load_avatar(id)
            .await?
            .ok_or_else(|| CompanionError::not_found(format!("avatar {id}")))?;

        let mut state = repo.load_state(id).await?.unwrap_or_default();
        state.is_speaking = false;
        let memory = repo.load_memory(id).await?.unwrap_or_default();

        tracing::info!(
            avatar_id = %id,
            name = %avatar.name,
            conversations = memory.conversation_count,
            "Restored companion session"
        );

        Ok(Self::new(avatar, service, config)
            .with_state(state)
            .with_memory(memory))
    }
}

/// Cancels an unfinished [`CompanionSession::respond`] on drop
struct ExclusiveGeneration<'a> {
    session: &'a mut CompanionSession,
    sequence: u64,
    finished: bool,
}

impl Drop for ExclusiveGeneration<'_> {
    fn drop(&mut self) {
        if !self.finished {
            self.session.cancel_generation(self.sequence);
        }
    }
}

/// Cancels an unfinished [`CompanionSession::respond_shared`] on drop
struct SharedGeneration {
    session: Arc<Mutex<CompanionSession>>,
    sequence: u64,
    finished: bool,
}

impl Drop for SharedGeneration {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        let sequence = self.sequence;

        match self.session.try_lock() {
            Ok(mut session) => {
                session.cancel_generation(sequence);
            }
            Err(_) => {
                // lock is busy; finish the cancellation on the runtime
                if let Ok(handle) = tokio::runtime::Handle::try_current() {
                    let session = self.session.clone();
                    handle.spawn(async move {
                        session.lock().await.cancel_generation(sequence);
                    });
                }
            }
        }
    }
}

async fn run_generation(
    service: Arc<dyn GenerationService>,
    request: GenerationRequest,
    deadline: Duration,
) -> Result<String> {
    match tokio::time::timeout(deadline, service.generate(request)).await {
        Ok(result) => result,
        Err(_) => Err(CompanionError::timeout(format!(
            "generation did not finish within {}s",
            deadline.as_secs()
        ))),
    }
}
