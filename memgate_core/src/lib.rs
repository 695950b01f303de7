#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

//! Retrieval gate for memory-augmented conversations.
//!
//! Decides whether an incoming message is worth a memory lookup at all, and
//! rewrites risk-sensitive queries so hybrid retrieval surfaces safety
//! constraints alongside ordinary context.

pub mod config;
pub mod error;
pub mod expansion;
pub mod gate;
pub mod patterns;
pub mod script;

pub use config::GateConfig;
pub use error::{GateError, Result};
pub use expansion::{ExpansionConfig, RiskExpansion};
pub use gate::{
    GateReport, QueryGate, SkipDecision, SkipReason, default_gate, expand_query_for_risk,
    is_risk_related_query, should_skip_retrieval,
};
pub use patterns::{PatternSet, PatternTable};
