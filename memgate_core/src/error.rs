use thiserror::Error;

use crate::patterns::PatternSet;

pub type Result<T> = std::result::Result<T, GateError>;

#[derive(Debug, Error)]
pub enum GateError {
    #[error("invalid {set} pattern `{pattern}`: {source}")]
    InvalidPattern {
        set: PatternSet,
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

impl GateError {
    pub(crate) fn invalid_pattern(set: PatternSet, pattern: &str, source: regex::Error) -> Self {
        Self::InvalidPattern {
            set,
            pattern: pattern.to_string(),
            source,
        }
    }
}
