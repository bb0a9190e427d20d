//! Personality Profile and incremental adaptation
//!
//! A profile is created once by the calibration mapper and afterwards only
//! changes through [`PersonalityProfile::adapt`], which applies small clamped
//! nudges in response to observed learner behavior.

use super::{Personality, ScaffoldingStyle};
use crate::utils::{clamp_unit, deserialize_unit};
use serde::{Deserialize, Serialize};

/// Size of a single adaptation nudge
pub const ADAPTATION_STEP: f32 = 0.1;

/// Tunable personality parameters of a companion
///
/// The three numeric fields are always within `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalityProfile {
    /// Base personality variant
    pub base_personality: Personality,

    /// How often hints are offered
    #[serde(deserialize_with = "deserialize_unit")]
    hint_frequency: f32,

    /// How loudly wins are celebrated
    #[serde(deserialize_with = "deserialize_unit")]
    celebration_intensity: f32,

    /// Preferred lesson pace (higher is faster)
    #[serde(deserialize_with = "deserialize_unit")]
    pace_preference: f32,

    /// Pedagogical sequencing preference
    pub scaffolding_style: ScaffoldingStyle,
}

impl Default for PersonalityProfile {
    fn default() -> Self {
        Self::new(Personality::default())
    }
}

impl PersonalityProfile {
    /// Create a profile with default parameters for a base personality
    pub fn new(base_personality: Personality) -> Self {
        Self {
            base_personality,
            hint_frequency: 0.5,
            celebration_intensity: 0.7,
            pace_preference: 0.5,
            scaffolding_style: ScaffoldingStyle::Balanced,
        }
    }

    /// Set hint frequency (clamped)
    pub fn with_hint_frequency(mut self, value: f32) -> Self {
        self.hint_frequency = clamp_unit(value);
        self
    }

    /// Set celebration intensity (clamped)
    pub fn with_celebration_intensity(mut self, value: f32) -> Self {
        self.celebration_intensity = clamp_unit(value);
        self
    }

    /// Set pace preference (clamped)
    pub fn with_pace_preference(mut self, value: f32) -> Self {
        self.pace_preference = clamp_unit(value);
        self
    }

    /// Set scaffolding style
    pub fn with_scaffolding_style(mut self, style: ScaffoldingStyle) -> Self {
        self.scaffolding_style = style;
        self
    }

    /// How often hints are offered
    pub fn hint_frequency(&self) -> f32 {
        self.hint_frequency
    }

    /// How loudly wins are celebrated
    pub fn celebration_intensity(&self) -> f32 {
        self.celebration_intensity
    }

    /// Preferred lesson pace
    pub fn pace_preference(&self) -> f32 {
        self.pace_preference
    }

    /// Apply every nudge whose signal is set
    pub fn adapt(&mut self, signals: BehaviorSignals) {
        self.adapt_skip_hints(signals.skip_hints);
        self.adapt_responds_well_to_celebration(signals.responds_well_to_celebration);
        self.adapt_rushes_through(signals.rushes_through);
    }

    /// Learner keeps skipping hints: offer fewer
    pub fn adapt_skip_hints(&mut self, skip_hints: bool) {
        if skip_hints {
            self.hint_frequency = (self.hint_frequency - ADAPTATION_STEP).max(0.0);
        }
    }

    /// Learner engages more after celebrations: celebrate louder
    pub fn adapt_responds_well_to_celebration(&mut self, responds_well: bool) {
        if responds_well {
            self.celebration_intensity = (self.celebration_intensity + ADAPTATION_STEP).min(1.0);
        }
    }

    /// Learner races through material: speed up
    pub fn adapt_rushes_through(&mut self, rushes_through: bool) {
        if rushes_through {
            self.pace_preference = (self.pace_preference + ADAPTATION_STEP).min(1.0);
        }
    }
}

/// Behavior flags reported by the external observer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BehaviorSignals {
    /// Hints were dismissed without being read
    pub skip_hints: bool,
    /// Engagement went up after a celebration
    pub responds_well_to_celebration: bool,
    /// Lessons were finished well under the expected time
    pub rushes_through: bool,
}

impl BehaviorSignals {
    /// Whether any flag is set
    pub fn any(&self) -> bool {
        self.skip_hints || self.responds_well_to_celebration || self.rushes_through
    }
}
