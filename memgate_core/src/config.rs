use serde::{Deserialize, Serialize};

use crate::expansion::ExpansionConfig;

/// Configuration for the retrieval gate.
///
/// Every field has a default, so an empty JSON object yields the built-in
/// behaviour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateConfig {
    /// When disabled, no query is ever skipped or expanded.
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Queries shorter than this are skipped unless they force retrieval.
    #[serde(default = "default_min_length")]
    pub min_length: usize,

    /// Short-statement threshold for text containing CJK characters.
    #[serde(default = "default_min_length_cjk")]
    pub min_length_cjk: usize,

    /// Short-statement threshold for all other text.
    #[serde(default = "default_min_length_other")]
    pub min_length_other: usize,

    /// Additional skip patterns, appended after the built-ins.
    #[serde(default)]
    pub extra_skip_patterns: Vec<String>,

    /// Additional force-retrieve patterns, appended after the built-ins.
    #[serde(default)]
    pub extra_force_patterns: Vec<String>,

    /// Additional risk patterns, appended after the built-ins.
    #[serde(default)]
    pub extra_risk_patterns: Vec<String>,

    #[serde(default)]
    pub expansion: ExpansionConfig,
}

const fn default_enabled() -> bool {
    true
}
const fn default_min_length() -> usize {
    5
}
const fn default_min_length_cjk() -> usize {
    6
}
const fn default_min_length_other() -> usize {
    15
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            min_length: default_min_length(),
            min_length_cjk: default_min_length_cjk(),
            min_length_other: default_min_length_other(),
            extra_skip_patterns: Vec::new(),
            extra_force_patterns: Vec::new(),
            extra_risk_patterns: Vec::new(),
            expansion: ExpansionConfig::default(),
        }
    }
}

impl GateConfig {
    /// Whether any user pattern is configured.
    #[must_use]
    pub fn has_extra_patterns(&self) -> bool {
        !(self.extra_skip_patterns.is_empty()
            && self.extra_force_patterns.is_empty()
            && self.extra_risk_patterns.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn test_empty_object_is_default() {
        let config: GateConfig = serde_json::from_str("{}").expect("valid JSON should deserialize");
        assert_eq!(config, GateConfig::default());
        assert!(!config.has_extra_patterns());
    }

    #[test]
    fn test_default_matches_serde_defaults() {
        let config = GateConfig::default();
        assert_eq!(config.enabled, default_enabled());
        assert_eq!(config.min_length, default_min_length());
        assert_eq!(config.min_length_cjk, default_min_length_cjk());
        assert_eq!(config.min_length_other, default_min_length_other());
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn test_config_serialization() {
        let config = GateConfig {
            min_length_other: 20,
            extra_risk_patterns: vec![r"\bdrop\s+table\b".to_string()],
            ..Default::default()
        };

        let json = serde_json::to_string(&config).expect("config should serialize");
        let deserialized: GateConfig =
            serde_json::from_str(&json).expect("valid JSON should deserialize");

        assert_eq!(deserialized, config);
        assert!(deserialized.has_extra_patterns());
    }
}
