//! Configuration for a story engine.

use serde::{Deserialize, Serialize};
use um_core::{ATTRIBUTE_MAX, ATTRIBUTE_MIN};

/// Stress at or below which the overwhelm interlude is entered.
pub const DEFAULT_OVERWHELM_THRESHOLD: i32 = 50;

/// Configuration for a story engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Overwhelm threshold for characters that do not set their own.
    pub overwhelm_threshold: i32,
    /// Whether runs keep a [`History`](crate::History).
    pub record_history: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            overwhelm_threshold: DEFAULT_OVERWHELM_THRESHOLD,
            record_history: true,
        }
    }
}

impl EngineConfig {
    /// Set the overwhelm threshold (clamped to 0-100).
    pub fn with_threshold(mut self, threshold: i32) -> Self {
        self.overwhelm_threshold = threshold.clamp(ATTRIBUTE_MIN, ATTRIBUTE_MAX);
        self
    }

    /// Enable or disable history recording.
    pub fn with_history(mut self, record: bool) -> Self {
        self.record_history = record;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let cfg = EngineConfig::default();
        assert_eq!(cfg.overwhelm_threshold, 50);
        assert!(cfg.record_history);
    }

    #[test]
    fn builder_methods() {
        let cfg = EngineConfig::default().with_threshold(40).with_history(false);
        assert_eq!(cfg.overwhelm_threshold, 40);
        assert!(!cfg.record_history);
    }

    #[test]
    fn threshold_clamped() {
        assert_eq!(EngineConfig::default().with_threshold(-5).overwhelm_threshold, 0);
        assert_eq!(EngineConfig::default().with_threshold(250).overwhelm_threshold, 100);
    }
}
