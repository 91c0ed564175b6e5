//! Controller error taxonomy.
//!
//! Every variant is recoverable at the command boundary: the controller
//! returns to `Idle` and keeps its prior valid state, so the display layer
//! can report the error and offer a retry.

use thiserror::Error;
use vigil_core::effects::SettlementError;
use vigil_core::ConfigError;

use crate::controller::Phase;

/// Result type for controller operations
pub type Result<T> = std::result::Result<T, SwitchError>;

/// Errors surfaced by controller commands
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SwitchError {
    /// Candidate configuration failed validation; nothing was mutated
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A command of the same kind is still in flight
    #[error("controller busy: {phase} in progress")]
    Busy {
        /// The transient phase occupying the controller
        phase: Phase,
    },

    /// The settlement backend failed or refused the acknowledgement;
    /// no state was mutated
    #[error("acknowledgement failed: {0}")]
    Acknowledgement(#[from] SettlementError),
}
