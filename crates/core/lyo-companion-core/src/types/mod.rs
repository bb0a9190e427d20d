//! Core types for the companion engine
//!
//! - Personality: static catalog of base personalities
//! - PersonalityProfile: tunable parameters plus clamped adaptation
//! - CompanionState: mood and energy state machine
//! - AvatarMemory: long-term, append-only learner history
//! - ConversationContext: bounded log of recent exchanges
//! - CalibrationAnswers: onboarding snapshot
//! - Avatar: identity record tying the above together

mod avatar;
mod calibration;
pub mod context;
mod memory;
mod personality;
pub mod profile;
pub mod state;

pub use avatar::*;
pub use calibration::*;
pub use context::{ConversationContext, Interaction};
pub use memory::*;
pub use personality::*;
pub use profile::{BehaviorSignals, PersonalityProfile};
pub use state::{CompanionMood, CompanionState, UserAction};
