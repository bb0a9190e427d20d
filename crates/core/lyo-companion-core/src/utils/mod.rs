//! Utility functions

pub mod logger;

pub use logger::init_logging;

use serde::{Deserialize, Deserializer};

/// Clamp a value into the unit interval
pub fn clamp_unit(value: f32) -> f32 {
    value.clamp(0.0, 1.0)
}

/// Deserialize an `f32` and clamp it into `[0, 1]`
pub fn deserialize_unit<'de, D>(deserializer: D) -> std::result::Result<f32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = f32::deserialize(deserializer)?;
    Ok(clamp_unit(value))
}
