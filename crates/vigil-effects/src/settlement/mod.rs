//! Settlement backend handlers.

mod mock;

pub use mock::MockSettlement;
