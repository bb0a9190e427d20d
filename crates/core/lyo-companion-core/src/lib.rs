//! Lyo Companion Core
//!
//! Personality and state engine for the Lyo learning companion. It includes:
//!
//! - Personality catalog and calibration from onboarding or diagnostics
//! - Mood and energy state machine driven by learner actions
//! - Long-term avatar memory of topics, struggles and achievements
//! - Bounded conversation context with topic and complexity signals
//! - Gradual profile adaptation from observed behaviour
//! - A per-avatar session that assembles prompts and guards against stale replies
//!
//! Text generation and persistence are seams: plug in a [`GenerationService`]
//! and an [`AvatarRepository`].
//!
//! # Example
//!
//! ```no_run
//! use lyo_companion_core::*;
//! use std::sync::Arc;
//!
//! struct Echo;
//!
//! #[async_trait::async_trait]
//! impl GenerationService for Echo {
//!     async fn generate(&self, request: GenerationRequest) -> Result<String> {
//!         Ok(format!("echo #{}", request.sequence))
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     init_logging();
//!     let config = CompanionConfig::from_env()?;
//!
//!     let blueprint = LearningBlueprint::new("advance my career", "examples", Some(21));
//!     let mut session = CompanionSession::new(Avatar::from_diagnostic(&blueprint), Arc::new(Echo), config);
//!
//!     session.start_session("Swift");
//!     let outcome = session.respond("How do closures work in swift?").await;
//!     println!("{:?}", outcome.text());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub use uuid::Uuid;

pub mod calibration;
pub mod classifier;
pub mod config;
pub mod error;
pub mod generation;
pub mod session;
pub mod storage;
pub mod types;
pub mod utils;
pub mod voice;

pub use calibration::{calibrate, diagnostic_to_calibration, Diagnosis};
pub use config::{load_env, CompanionConfig};
pub use error::{CompanionError, Result};
pub use generation::{GenerationRequest, GenerationService};
pub use session::{CompanionSession, GenerationOutcome, GenerationTicket};
pub use storage::{AvatarRepository, InMemoryAvatarRepository};
pub use types::*;
pub use utils::init_logging;
pub use voice::VoiceProfile;
