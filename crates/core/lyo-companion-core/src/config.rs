//! Configuration management and environment variable loading

use crate::{CompanionError, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Text returned to the learner when generation fails or times out
pub const DEFAULT_FALLBACK_RESPONSE: &str =
    "I'm having trouble thinking that through right now. Could you say it another way, or shall we try again in a moment?";

/// Load environment variables from a .env file
///
/// A missing file is not an error; the process environment is used as is.
pub fn load_env() -> Result<()> {
    match dotenvy::dotenv() {
        Ok(path) => {
            tracing::info!("Loaded environment from: {}", path.display());
            Ok(())
        }
        Err(dotenvy::Error::LineParse(line, pos)) => Err(CompanionError::config(format!(
            "Failed to parse .env file at line {}, position {}",
            line, pos
        ))),
        Err(dotenvy::Error::Io(_)) => {
            tracing::debug!("No .env file found - using system environment variables only");
            Ok(())
        }
        Err(e) => Err(CompanionError::config(format!(
            "Failed to load .env file: {}",
            e
        ))),
    }
}

/// Get optional environment variable with default
pub fn get_env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Get environment variable as integer
pub fn get_env_int<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr,
{
    env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

/// Runtime configuration for a companion session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanionConfig {
    /// Deadline for a single generation call, in seconds
    pub generation_timeout_secs: u64,

    /// Reply used when generation fails
    pub fallback_response: String,

    /// Root directory for file-backed persistence
    pub storage_dir: PathBuf,
}

impl Default for CompanionConfig {
    fn default() -> Self {
        Self {
            generation_timeout_secs: 30,
            fallback_response: DEFAULT_FALLBACK_RESPONSE.to_string(),
            storage_dir: PathBuf::from(".lyo"),
        }
    }
}

impl CompanionConfig {
    /// Build from `LYO_*` environment variables, falling back to defaults
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        let config = Self {
            generation_timeout_secs: get_env_int(
                "LYO_GENERATION_TIMEOUT_SECS",
                defaults.generation_timeout_secs,
            ),
            fallback_response: get_env_or("LYO_FALLBACK_RESPONSE", &defaults.fallback_response),
            storage_dir: PathBuf::from(get_env_or(
                "LYO_STORAGE_DIR",
                &defaults.storage_dir.to_string_lossy(),
            )),
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would make the session unusable
    pub fn validate(&self) -> Result<()> {
        if self.generation_timeout_secs == 0 {
            return Err(CompanionError::config(
                "LYO_GENERATION_TIMEOUT_SECS must be greater than zero",
            ));
        }
        if self.fallback_response.trim().is_empty() {
            return Err(CompanionError::config("LYO_FALLBACK_RESPONSE must not be empty"));
        }
        Ok(())
    }

    /// Set the generation timeout
    pub fn with_generation_timeout(mut self, secs: u64) -> Self {
        self.generation_timeout_secs = secs;
        self
    }

    /// Set the fallback response
    pub fn with_fallback_response(mut self, text: impl Into<String>) -> Self {
        self.fallback_response = text.into();
        self
    }

    /// Set the storage directory
    pub fn with_storage_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.storage_dir = dir.into();
        self
    }

    /// Generation timeout as a `Duration`
    pub fn generation_timeout(&self) -> Duration {
        Duration::from_secs(self.generation_timeout_secs)
    }
}
