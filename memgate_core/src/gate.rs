//! The retrieval gate.
//!
//! [`QueryGate::evaluate`] runs a fixed cascade of guard clauses; the first
//! one that fires decides:
//!
//! 1. force-retrieve pattern → retrieve
//! 2. shorter than `min_length` → skip
//! 3. skip pattern → skip
//! 4. short statement (below the CJK/other threshold, no question mark) → skip
//! 5. otherwise → retrieve
//!
//! The force check runs before the length shortcut so that short CJK recall
//! questions such as `你记得吗` still reach memory.
//!
//! # Example
//!
//! ```
//! use memgate_core::{expand_query_for_risk, should_skip_retrieval};
//!
//! assert!(should_skip_retrieval("ok"));
//! assert!(!should_skip_retrieval("remember my name"));
//! assert!(expand_query_for_risk("rm -rf /tmp").contains("[policy-hints]"));
//! ```

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::GateConfig;
use crate::error::Result;
use crate::expansion::{ExpansionConfig, RiskExpansion};
use crate::patterns::{PatternSet, PatternTable};
use crate::script::{contains_cjk, has_question_mark, trim_query, utf16_len};

static DEFAULT_GATE: Lazy<QueryGate> = Lazy::new(QueryGate::with_defaults);

/// The rule that decided a skip evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The gate is disabled; every query is retrieved.
    Disabled,
    /// A force-retrieve pattern matched.
    ForceRetrieve,
    /// Shorter than the absolute minimum length.
    TooShort,
    /// A skip pattern matched.
    SkipPattern,
    /// Short statement without a question mark.
    ShortStatement,
    /// No rule fired.
    Default,
}

impl SkipReason {
    /// Returns the string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Disabled => "disabled",
            Self::ForceRetrieve => "force_retrieve",
            Self::TooShort => "too_short",
            Self::SkipPattern => "skip_pattern",
            Self::ShortStatement => "short_statement",
            Self::Default => "default",
        }
    }
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A skip decision together with the rule that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkipDecision {
    /// `true` means the caller should bypass retrieval.
    pub skip: bool,
    pub reason: SkipReason,
}

impl SkipDecision {
    const fn skip(reason: SkipReason) -> Self {
        Self { skip: true, reason }
    }

    const fn retrieve(reason: SkipReason) -> Self {
        Self {
            skip: false,
            reason,
        }
    }
}

/// Everything the gate says about one query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateReport {
    /// The trimmed query.
    pub query: String,
    pub skip: bool,
    pub reason: SkipReason,
    pub risky: bool,
    /// What to pass to retrieval (anchors appended when risky).
    pub expanded: String,
}

/// Compiled rule tables plus the length heuristics.
///
/// Immutable once built; share it freely across threads.
#[derive(Debug, Clone)]
pub struct QueryGate {
    skip: PatternTable,
    force: PatternTable,
    risk: PatternTable,
    enabled: bool,
    min_length: usize,
    min_length_cjk: usize,
    min_length_other: usize,
    expansion: ExpansionConfig,
}

impl QueryGate {
    /// Build a gate from configuration, compiling any user patterns.
    pub fn new(config: &GateConfig) -> Result<Self> {
        Ok(Self {
            skip: PatternTable::with_extra(PatternSet::Skip, &config.extra_skip_patterns)?,
            force: PatternTable::with_extra(PatternSet::Force, &config.extra_force_patterns)?,
            risk: PatternTable::with_extra(PatternSet::Risk, &config.extra_risk_patterns)?,
            enabled: config.enabled,
            min_length: config.min_length,
            min_length_cjk: config.min_length_cjk,
            min_length_other: config.min_length_other,
            expansion: config.expansion.clone(),
        })
    }

    /// Gate with only the built-in tables and thresholds.
    #[must_use]
    pub fn with_defaults() -> Self {
        let config = GateConfig::default();
        Self {
            skip: PatternTable::builtin(PatternSet::Skip),
            force: PatternTable::builtin(PatternSet::Force),
            risk: PatternTable::builtin(PatternSet::Risk),
            enabled: config.enabled,
            min_length: config.min_length,
            min_length_cjk: config.min_length_cjk,
            min_length_other: config.min_length_other,
            expansion: config.expansion,
        }
    }

    /// Decide whether to skip retrieval, reporting the deciding rule.
    #[must_use]
    pub fn evaluate(&self, query: &str) -> SkipDecision {
        let trimmed = trim_query(query);
        let decision = self.evaluate_trimmed(trimmed);
        debug!(
            "Retrieval gate: skip={} reason={} len={}",
            decision.skip,
            decision.reason,
            utf16_len(trimmed)
        );
        decision
    }

    fn evaluate_trimmed(&self, trimmed: &str) -> SkipDecision {
        if !self.enabled {
            return SkipDecision::retrieve(SkipReason::Disabled);
        }

        if self.force.is_match(trimmed) {
            return SkipDecision::retrieve(SkipReason::ForceRetrieve);
        }

        let len = utf16_len(trimmed);
        if len < self.min_length {
            return SkipDecision::skip(SkipReason::TooShort);
        }

        if self.skip.is_match(trimmed) {
            return SkipDecision::skip(SkipReason::SkipPattern);
        }

        let min_meaningful = if contains_cjk(trimmed) {
            self.min_length_cjk
        } else {
            self.min_length_other
        };
        if len < min_meaningful && !has_question_mark(trimmed) {
            return SkipDecision::skip(SkipReason::ShortStatement);
        }

        SkipDecision::retrieve(SkipReason::Default)
    }

    /// `true` if the caller should bypass memory retrieval for `query`.
    #[must_use]
    pub fn should_skip_retrieval(&self, query: &str) -> bool {
        self.evaluate(query).skip
    }

    /// Whether `query` mentions destructive or security-sensitive operations.
    ///
    /// Independent of the skip decision and of `enabled`.
    #[must_use]
    pub fn is_risk_related_query(&self, query: &str) -> bool {
        self.risk.is_match(trim_query(query))
    }

    /// Append policy anchors to risk-related queries.
    ///
    /// Returns the trimmed query unchanged when it is empty or not risky.
    /// Not idempotent: an expanded risky query is still risky, so expanding it
    /// again appends a second anchor block.
    #[must_use]
    pub fn expand_query_for_risk(&self, query: &str) -> String {
        self.risk_report(query).query
    }

    /// Risk detection and expansion in one pass.
    #[must_use]
    pub fn risk_report(&self, query: &str) -> RiskExpansion {
        let trimmed = trim_query(query);
        if trimmed.is_empty() {
            return RiskExpansion {
                risky: false,
                query: String::new(),
            };
        }

        let risky = self.risk.is_match(trimmed);
        if !risky || !self.enabled {
            return RiskExpansion {
                risky,
                query: trimmed.to_string(),
            };
        }

        if let Some(pattern) = self.risk.first_match(trimmed) {
            debug!("Risk query expanded, matched {pattern:?}");
        }

        RiskExpansion {
            risky,
            query: self.expansion.apply(trimmed),
        }
    }

    /// Full report for a query: skip decision, risk flag and expanded text.
    #[must_use]
    pub fn report(&self, query: &str) -> GateReport {
        let decision = self.evaluate(query);
        let risk = self.risk_report(query);
        GateReport {
            query: trim_query(query).to_string(),
            skip: decision.skip,
            reason: decision.reason,
            risky: risk.risky,
            expanded: risk.query,
        }
    }

    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// The compiled table for `set`.
    #[must_use]
    pub const fn table(&self, set: PatternSet) -> &PatternTable {
        match set {
            PatternSet::Skip => &self.skip,
            PatternSet::Force => &self.force,
            PatternSet::Risk => &self.risk,
        }
    }

    #[must_use]
    pub const fn expansion(&self) -> &ExpansionConfig {
        &self.expansion
    }
}

impl Default for QueryGate {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// The process-wide gate built from the built-in tables.
#[must_use]
pub fn default_gate() -> &'static QueryGate {
    &DEFAULT_GATE
}

/// `true` if retrieval should be bypassed for `query` (built-in rules).
#[must_use]
pub fn should_skip_retrieval(query: &str) -> bool {
    DEFAULT_GATE.should_skip_retrieval(query)
}

/// Whether `query` is risk-related (built-in rules).
#[must_use]
pub fn is_risk_related_query(query: &str) -> bool {
    DEFAULT_GATE.is_risk_related_query(query)
}

/// Append policy anchors to a risk-related `query` (built-in rules).
#[must_use]
pub fn expand_query_for_risk(query: &str) -> String {
    DEFAULT_GATE.expand_query_for_risk(query)
}
