//! Clock effect handlers.

mod simulated;
mod system;

pub use simulated::SimulatedClock;
pub use system::SystemClock;
