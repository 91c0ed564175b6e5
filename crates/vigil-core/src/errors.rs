//! Configuration error taxonomy.
//!
//! Validation errors are reported before any suspension point and never
//! mutate existing state; callers keep their previous valid configuration.

use serde::{Deserialize, Serialize};

/// Errors produced by switch configuration validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum ConfigError {
    /// Timeout outside the accepted 1..=365 day range
    #[error("timeout of {days} days is outside the accepted range (1-365)")]
    TimeoutOutOfRange {
        /// The rejected day count
        days: i64,
    },

    /// Recipient does not look like an external address
    #[error("recipient {recipient:?} is not a valid address (must start with {prefix:?})")]
    InvalidRecipient {
        /// The rejected recipient string
        recipient: String,
        /// The required address prefix
        prefix: String,
    },
}
