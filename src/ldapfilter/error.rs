use thiserror::Error;

use crate::attribute::NameViolation;
use crate::filter::LogicalOp;

#[derive(Error, Debug)]
pub enum FilterError {
    #[error("Invalid attribute name '{name}': {reason}")]
    InvalidAttributeName { name: String, reason: NameViolation },

    #[error("{op} filter takes {expected}, got {count}")]
    ArityViolation {
        op: LogicalOp,
        expected: &'static str,
        count: usize,
    },

    #[error("Substring filter on '{attribute}' has no fragments")]
    EmptySubstringPattern { attribute: String },

    #[error("Invalid matching rule: '{0}'")]
    InvalidMatchingRule(String),

    #[error("Malformed value at byte {position}: {reason}")]
    MalformedValue {
        position: usize,
        reason: &'static str,
    },

    #[error("Config error: {0}")]
    Config(#[from] confique::Error),
}

pub type Result<T> = std::result::Result<T, FilterError>;
