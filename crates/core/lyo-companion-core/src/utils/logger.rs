//! Logging utilities

use once_cell::sync::OnceCell;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

static INIT: OnceCell<()> = OnceCell::new();

/// Initialize the global logging system
///
/// Reads `RUST_LOG` first, then `LYO_LOG_LEVEL`, defaulting to `info`.
/// Subsequent calls are no-ops, as is a call made after another subscriber
/// was installed by the host application.
pub fn init_logging() {
    INIT.get_or_init(|| {
        let level = std::env::var("LYO_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        let env_filter =
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| level.into());

        let _ = tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging_is_idempotent() {
        init_logging();
        init_logging();
        tracing::info!(target: "lyo_companion_core::tests", "logging initialized");
    }
}
