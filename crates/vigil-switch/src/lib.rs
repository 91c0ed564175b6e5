//! Vigil Switch - Controller Runtime
//!
//! The controller is the single owner of mutable switch state: the live
//! configuration, the last confirmation instant, and the bounded check-in
//! log. Commands (`confirm`, `reconfigure`) pass through an explicit
//! `Idle` / `Confirming` / `Reconfiguring` phase slot that serializes all
//! mutation and rejects a command while one of the same kind is still
//! waiting on the settlement backend.
//!
//! State queries are pure recomputation over `vigil_core::deadline` and may
//! run at any rate; the `refresh` module wraps that in a cancelable
//! periodic task for display layers.

#![forbid(unsafe_code)]

/// Controller state machine
pub mod controller;

/// Controller error taxonomy
pub mod errors;

/// Cancelable periodic state refresh
pub mod refresh;

pub use controller::{Phase, SwitchController};
pub use errors::{Result, SwitchError};
pub use refresh::StateRefresher;
