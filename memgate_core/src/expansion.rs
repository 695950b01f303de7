//! Policy-anchor expansion for risk-sensitive queries.
//!
//! Hybrid retrieval (lexical + semantic) matches stored safety rules far more
//! reliably when the query itself mentions them. Risk-flagged queries get a
//! fixed block of anchor phrases appended after a blank line.

use serde::{Deserialize, Serialize};

/// Tag introducing the anchor block.
pub const DEFAULT_MARKER: &str = "[policy-hints]";

/// Anchor phrases, in the order they are appended.
pub const DEFAULT_ANCHORS: &[&str] = &[
    "安全守则",
    "文件操作规范",
    "风险控制",
    "security policy",
    "safe file operation",
];

/// Configuration for the appended anchor block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpansionConfig {
    /// Tag written before the anchors.
    #[serde(default = "default_marker")]
    pub marker: String,

    /// Anchor phrases joined by single spaces.
    #[serde(default = "default_anchors")]
    pub anchors: Vec<String>,
}

fn default_marker() -> String {
    DEFAULT_MARKER.to_string()
}

fn default_anchors() -> Vec<String> {
    DEFAULT_ANCHORS.iter().map(ToString::to_string).collect()
}

impl Default for ExpansionConfig {
    fn default() -> Self {
        Self {
            marker: default_marker(),
            anchors: default_anchors(),
        }
    }
}

impl ExpansionConfig {
    /// The block appended to a risky query, without the leading separator.
    #[must_use]
    pub fn anchor_block(&self) -> String {
        format!("{} {}", self.marker, self.anchors.join(" "))
    }

    /// Append the anchor block to an already-trimmed query.
    ///
    /// No check is made for an existing block, so applying this twice
    /// leaves two blocks.
    #[must_use]
    pub fn apply(&self, trimmed: &str) -> String {
        format!("{trimmed}\n\n{}", self.anchor_block())
    }
}

/// Outcome of risk detection and expansion for a single query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskExpansion {
    /// Whether the query matched the risk table.
    pub risky: bool,

    /// The query to hand to retrieval.
    pub query: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchor_block_order() {
        let config = ExpansionConfig::default();
        assert_eq!(
            config.anchor_block(),
            "[policy-hints] 安全守则 文件操作规范 风险控制 security policy safe file operation"
        );
    }

    #[test]
    fn test_apply_separates_with_blank_line() {
        let config = ExpansionConfig {
            marker: "[hints]".to_string(),
            anchors: vec!["a".to_string(), "b".to_string()],
        };
        assert_eq!(config.apply("drop table"), "drop table\n\n[hints] a b");
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn test_partial_config_uses_defaults() {
        let config: ExpansionConfig = serde_json::from_str(r#"{"marker": "[safety]"}"#)
            .expect("valid JSON should deserialize");

        assert_eq!(config.marker, "[safety]");
        assert_eq!(config.anchors.len(), DEFAULT_ANCHORS.len());
    }
}
