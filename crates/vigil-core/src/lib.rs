//! Vigil Core - Check-in / Deadline Foundation
//!
//! This crate provides the pure domain model for a dead-man's switch: a
//! single user periodically confirms they are alive, and the time remaining
//! until the rolling deadline is derived and classified on demand.
//!
//! # Architecture
//!
//! - `deadline` - pure deadline arithmetic and risk classification
//! - `log` - bounded, newest-first check-in history with display labels
//! - `config` - validated switch configuration (timeout, fallback recipient)
//! - `state` - derived switch state and countdown decomposition
//! - `effects` - pure effect interfaces (no implementations)
//! - `errors` - configuration error taxonomy
//!
//! Everything here is synchronous and side-effect free; clocks and the
//! settlement backend are consumed through the effect traits in `effects`
//! and implemented elsewhere (`vigil-effects`, `vigil-switch`).

#![forbid(unsafe_code)]

/// Validated switch configuration and timeout presets
pub mod config;

/// Pure deadline arithmetic and risk classification
pub mod deadline;

/// Pure effect interfaces (no implementations)
pub mod effects;

/// Configuration error taxonomy
pub mod errors;

/// Bounded check-in history
pub mod log;

/// Derived switch state and countdown decomposition
pub mod state;

pub use config::{RecipientId, SwitchConfig, TimeoutPreset, ADDRESS_PREFIX};
pub use deadline::{classify, Classification, DeadlineStatus};
pub use errors::ConfigError;
pub use log::{ConfirmationEvent, ConfirmationLog, DEFAULT_LOG_CAPACITY};
pub use state::{RemainingTime, SwitchState};
