//! Vigil Effects - Effect Handler Implementations
//!
//! Concrete implementations of the effect interfaces declared in
//! `vigil_core::effects`:
//!
//! - `clock::SystemClock` - wall-clock time for production use
//! - `clock::SimulatedClock` - settable, advanceable time for tests
//! - `settlement::MockSettlement` - in-memory settlement backend with
//!   scriptable failures and an optional hold gate for concurrency tests
//!
//! Handlers are stateless or internally synchronized; all are cheap to
//! clone and safe to share across tasks.

#![forbid(unsafe_code)]

/// Clock effect handlers (system and simulated)
pub mod clock;

/// Settlement backend handlers (mock)
pub mod settlement;

pub use clock::{SimulatedClock, SystemClock};
pub use settlement::MockSettlement;
