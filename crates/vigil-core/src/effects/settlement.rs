//! Settlement backend effect interface.
//!
//! The backend that actually holds funds and performs the fallback transfer
//! is an external collaborator. The core only asks it to acknowledge two
//! operations, treats each call as at-most-once, and leaves retry policy to
//! the backend.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::SwitchConfig;

/// Error type for settlement acknowledgements.
///
/// Surfaced to the caller verbatim so the display layer can inform the user
/// and offer a retry; never swallowed by the controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum SettlementError {
    /// The backend processed the request and refused it
    #[error("settlement backend rejected the request: {reason}")]
    Rejected {
        /// Backend-supplied rejection reason
        reason: String,
    },

    /// The backend could not be reached
    #[error("settlement backend unavailable")]
    Unavailable,
}

/// Async acknowledgement operations exposed by the settlement backend
#[async_trait]
pub trait SettlementEffects: Send + Sync {
    /// Acknowledge a check-in before the deadline resets
    async fn acknowledge_confirmation(&self) -> Result<(), SettlementError>;

    /// Acknowledge a configuration change before it is applied
    async fn acknowledge_reconfigure(&self, config: &SwitchConfig) -> Result<(), SettlementError>;
}

/// Blanket implementation for Arc<T> where T: SettlementEffects
#[async_trait]
impl<T: SettlementEffects + ?Sized> SettlementEffects for std::sync::Arc<T> {
    async fn acknowledge_confirmation(&self) -> Result<(), SettlementError> {
        (**self).acknowledge_confirmation().await
    }

    async fn acknowledge_reconfigure(&self, config: &SwitchConfig) -> Result<(), SettlementError> {
        (**self).acknowledge_reconfigure(config).await
    }
}
