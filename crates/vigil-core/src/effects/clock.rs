//! Clock effect interface.
//!
//! Deadline evaluation is pure; the only time the system ever reads is
//! whatever an implementor of this trait supplies. Tests inject a settable
//! simulated clock, production uses the system clock.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Supplies the current instant
#[async_trait]
pub trait ClockEffects: Send + Sync {
    /// The current instant, at least second resolution
    async fn now(&self) -> DateTime<Utc>;
}

/// Blanket implementation for Arc<T> where T: ClockEffects
#[async_trait]
impl<T: ClockEffects + ?Sized> ClockEffects for std::sync::Arc<T> {
    async fn now(&self) -> DateTime<Utc> {
        (**self).now().await
    }
}
