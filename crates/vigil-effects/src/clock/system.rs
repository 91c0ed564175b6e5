//! Real clock handler for production use.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use vigil_core::effects::ClockEffects;

/// Wall-clock time handler
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl SystemClock {
    /// Create a new system clock handler
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ClockEffects for SystemClock {
    async fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
