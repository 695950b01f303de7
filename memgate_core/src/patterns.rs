//! Built-in rule tables for the retrieval gate.
//!
//! Each table is an ordered list of case-insensitive regular expressions.
//! Built-in patterns are compiled once; user-supplied patterns from
//! [`GateConfig`](crate::GateConfig) are appended after them.
//!
//! English keywords use ASCII word boundaries (`(?-u:\b)`) so that a keyword
//! directly adjacent to CJK text (e.g. `请delete文件`) still counts as a whole
//! word. CJK keywords have no boundaries at all and match anywhere.

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{GateError, Result};

/// Patterns marking a message as not worth a memory lookup.
pub const SKIP_PATTERNS: &[&str] = &[
    // Greetings
    r"(?i)^(hi|hello|hey|good\s*(morning|afternoon|evening|night)|greetings|yo|sup|howdy|what'?s up)(?-u:\b)",
    // Slash commands
    r"^/",
    // Shell and dev-tool verbs
    r"(?i)^(run|build|test|ls|cd|git|npm|pip|docker|curl|cat|grep|find|make|sudo)(?-u:\b)",
    // Acknowledgments
    r"(?i)^(yes|no|yep|nope|ok|okay|sure|fine|thanks|thank you|thx|ty|got it|understood|cool|nice|great|good|perfect|awesome|👍|👎|✅|❌)\s*[.!]?$",
    // Continuation prompts
    r"(?i)^(go ahead|continue|proceed|do it|start|begin|next|实施|开始|继续|好的|可以|行)\s*[.!]?$",
    // Emoji only, including ZWJ, variation selectors and skin tones
    r"^[\p{Emoji}\p{Emoji_Component}\s]+$",
    // System messages
    r"(?i)^HEARTBEAT",
    r"(?i)^\[System",
];

/// Patterns that demand a lookup regardless of length or skip rules.
pub const FORCE_PATTERNS: &[&str] = &[
    r"(?i)(?-u:\b)(remember|recall|forgot|memory|memories)(?-u:\b)",
    r"(?i)(?-u:\b)(last time|before|previously|earlier|yesterday|ago)(?-u:\b)",
    r"(?i)(?-u:\b)(my (name|email|phone|address|birthday|preference))(?-u:\b)",
    r"(?i)(?-u:\b)(what did (i|we)|did i (tell|say|mention))(?-u:\b)",
    r"(你记得|之前|上次|以前|还记得|提到过|说过)",
];

/// Patterns for destructive, system-level or security-sensitive requests.
pub const RISK_PATTERNS: &[&str] = &[
    r"(?i)(?-u:\b)(rm\s+-rf|delete|remove|wipe|chmod|chown|sudo|shell|bash|script|exec|command|deploy|migrate|migration)(?-u:\b)",
    r"(?i)(?-u:\b)(file|filesystem|directory|folder|path)(?-u:\b)",
    r"(权限|文件|目录|删除|覆盖|执行|命令|脚本|部署)",
    r"(?i)(?-u:\b)(secret|token|api\s*key|credential|password|ssh)(?-u:\b)",
    r"(安全|风险|规范|守则)",
];

/// The three rule tables consulted by the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternSet {
    /// Filler, commands, acknowledgments and system messages.
    Skip,
    /// Explicit references to memory, past turns or personal facts.
    Force,
    /// Destructive or security-sensitive operations.
    Risk,
}

impl PatternSet {
    /// Returns the string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Skip => "skip",
            Self::Force => "force",
            Self::Risk => "risk",
        }
    }

    /// Built-in pattern sources for this set, in evaluation order.
    #[must_use]
    pub const fn builtin_sources(&self) -> &'static [&'static str] {
        match self {
            Self::Skip => SKIP_PATTERNS,
            Self::Force => FORCE_PATTERNS,
            Self::Risk => RISK_PATTERNS,
        }
    }
}

impl std::fmt::Display for PatternSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An ordered, compiled pattern table.
#[derive(Debug, Clone)]
pub struct PatternTable {
    set: PatternSet,
    patterns: Vec<Regex>,
}

impl PatternTable {
    /// Compile the built-in patterns for `set`.
    ///
    /// A built-in that fails to compile is logged and left out rather than
    /// aborting, so the gate degrades to fewer rules instead of panicking.
    #[must_use]
    pub fn builtin(set: PatternSet) -> Self {
        let patterns = set
            .builtin_sources()
            .iter()
            .filter_map(|source| match Regex::new(source) {
                Ok(re) => Some(re),
                Err(e) => {
                    warn!("Dropping built-in {set} pattern {source:?}: {e}");
                    None
                }
            })
            .collect();

        Self { set, patterns }
    }

    /// Compile the built-ins for `set` followed by `extra` user patterns.
    ///
    /// User patterns are always matched case-insensitively.
    pub fn with_extra(set: PatternSet, extra: &[String]) -> Result<Self> {
        let mut table = Self::builtin(set);
        for source in extra {
            table.push(source)?;
        }
        Ok(table)
    }

    /// Append a user pattern to the end of the table.
    pub fn push(&mut self, source: &str) -> Result<()> {
        let re = RegexBuilder::new(source)
            .case_insensitive(true)
            .build()
            .map_err(|e| GateError::invalid_pattern(self.set, source, e))?;
        self.patterns.push(re);
        Ok(())
    }

    /// Whether any pattern matches `text`.
    #[must_use]
    pub fn is_match(&self, text: &str) -> bool {
        self.patterns.iter().any(|re| re.is_match(text))
    }

    /// Source of the first pattern matching `text`, if any.
    #[must_use]
    pub fn first_match(&self, text: &str) -> Option<&str> {
        self.patterns
            .iter()
            .find(|re| re.is_match(text))
            .map(Regex::as_str)
    }

    #[must_use]
    pub const fn set(&self) -> PatternSet {
        self.set
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtins_all_compile() {
        for set in [PatternSet::Skip, PatternSet::Force, PatternSet::Risk] {
            let table = PatternTable::builtin(set);
            assert_eq!(
                table.len(),
                set.builtin_sources().len(),
                "every built-in {set} pattern should compile"
            );
        }
    }

    #[test]
    fn test_pattern_set_as_str() {
        assert_eq!(PatternSet::Skip.as_str(), "skip");
        assert_eq!(PatternSet::Force.to_string(), "force");
        assert_eq!(PatternSet::Risk.as_str(), "risk");
    }

    #[test]
    fn test_english_keywords_are_whole_words() {
        let risk = PatternTable::builtin(PatternSet::Risk);
        assert!(risk.is_match("please delete it"));
        assert!(!risk.is_match("undeleted"));
        assert!(!risk.is_match("profiles"));
    }

    #[test]
    fn test_english_keyword_next_to_cjk() {
        let risk = PatternTable::builtin(PatternSet::Risk);
        assert!(risk.is_match("帮我delete一下"));

        let force = PatternTable::builtin(PatternSet::Force);
        assert!(force.is_match("你还remember吗"));
    }

    #[test]
    fn test_cjk_keywords_match_inside_text() {
        let risk = PatternTable::builtin(PatternSet::Risk);
        assert!(risk.is_match("帮我删除这个文件"));
        assert!(risk.is_match("这样做有风险吗"));

        let force = PatternTable::builtin(PatternSet::Force);
        assert!(force.is_match("我们上次聊到哪了"));
    }

    #[test]
    fn test_acknowledgment_allows_one_terminal_mark() {
        let skip = PatternTable::builtin(PatternSet::Skip);
        assert!(skip.is_match("thanks!"));
        assert!(skip.is_match("Okay."));
        assert!(skip.is_match("👍"));
        assert!(!skip.is_match("thanks for the detailed answer"));
    }

    #[test]
    fn test_emoji_only() {
        let skip = PatternTable::builtin(PatternSet::Skip);
        assert!(skip.is_match("🎉🎉 🚀"));
        assert!(skip.is_match("👨‍👩‍👧"));
        assert!(skip.is_match(&"❤\u{FE0F}".repeat(8)));
        assert!(!skip.is_match("🎉 party time"));
    }

    #[test]
    fn test_system_prefixes() {
        let skip = PatternTable::builtin(PatternSet::Skip);
        assert!(skip.is_match("HEARTBEAT ping"));
        assert!(skip.is_match("heartbeat"));
        assert!(skip.is_match("[System] session resumed"));
        assert!(!skip.is_match("the [System] tag"));
    }

    #[test]
    fn test_push_is_case_insensitive() {
        let mut table = PatternTable::builtin(PatternSet::Force);
        let before = table.len();
        assert!(!table.is_match("what's on my calendar"));

        assert!(table.push(r"\bCALENDAR\b").is_ok());

        assert_eq!(table.len(), before + 1);
        assert!(table.is_match("what's on my calendar"));
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn test_push_rejects_invalid_pattern() {
        let mut table = PatternTable::builtin(PatternSet::Risk);
        let err = table
            .push("(unclosed")
            .expect_err("unbalanced group should not compile");

        assert!(matches!(
            err,
            GateError::InvalidPattern {
                set: PatternSet::Risk,
                ..
            }
        ));
        assert!(err.to_string().contains("(unclosed"));
    }

    #[test]
    fn test_first_match_reports_source() {
        let skip = PatternTable::builtin(PatternSet::Skip);
        assert_eq!(skip.first_match("/help"), Some(r"^/"));
        assert_eq!(skip.first_match("a perfectly ordinary sentence"), None);
    }
}
