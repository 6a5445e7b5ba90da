use thiserror::Error;

use crate::core::encoder::CategoryField;

/// Errors produced by the matching pipeline
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MatchError {
    /// Requested value was never observed in the pool for this field.
    /// The matcher absorbs this into an empty result.
    #[error("Unknown {field} value '{value}' (not present in donor pool)")]
    UnknownCategory { field: CategoryField, value: String },

    /// Caller supplied a profile with a missing or non-coercible field
    #[error("Malformed profile: {field} {reason}")]
    MalformedProfile { field: &'static str, reason: String },
}

impl MatchError {
    pub fn malformed(field: &'static str, reason: impl Into<String>) -> Self {
        MatchError::MalformedProfile {
            field,
            reason: reason.into(),
        }
    }
}
