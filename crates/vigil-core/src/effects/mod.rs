//! Pure effect interfaces.
//!
//! Trait signatures only; implementations live in `vigil-effects` (system
//! clock, simulated clock, mock settlement) and in whatever real settlement
//! integration a deployment wires in.

mod clock;
mod settlement;

pub use clock::ClockEffects;
pub use settlement::{SettlementEffects, SettlementError};
