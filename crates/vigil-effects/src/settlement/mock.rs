//! In-memory settlement backend for tests and demos.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::Semaphore;
use vigil_core::effects::{SettlementEffects, SettlementError};
use vigil_core::SwitchConfig;

#[derive(Debug, Default)]
struct MockState {
    fail_next: Option<SettlementError>,
    confirmations: u64,
    reconfigures: Vec<SwitchConfig>,
    gate: Option<Arc<Semaphore>>,
}

/// Scriptable settlement backend.
///
/// Acknowledges everything by default. A test can queue a one-shot failure
/// with [`fail_next`](MockSettlement::fail_next), or install a hold gate
/// with [`hold`](MockSettlement::hold) so an acknowledgement stays in
/// flight until [`release_one`](MockSettlement::release_one) - the latter
/// is how the controller's busy guard gets exercised deterministically.
///
/// Clones share state, so the test keeps one handle and the controller the
/// other.
#[derive(Debug, Clone, Default)]
pub struct MockSettlement {
    state: Arc<Mutex<MockState>>,
}

impl MockSettlement {
    /// Create a backend that acknowledges everything immediately
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the next acknowledgement (of either kind) with `error`
    pub fn fail_next(&self, error: SettlementError) {
        self.state.lock().fail_next = Some(error);
    }

    /// Hold every acknowledgement until a matching `release_one` call
    pub fn hold(&self) {
        self.state.lock().gate = Some(Arc::new(Semaphore::new(0)));
    }

    /// Let one held acknowledgement proceed
    pub fn release_one(&self) {
        if let Some(gate) = &self.state.lock().gate {
            gate.add_permits(1);
        }
    }

    /// Stop holding acknowledgements
    pub fn clear_hold(&self) {
        let gate = self.state.lock().gate.take();
        if let Some(gate) = gate {
            // wake anything still parked on the old gate
            gate.add_permits(Semaphore::MAX_PERMITS / 2);
        }
    }

    /// Number of confirmations acknowledged so far
    pub fn confirmations(&self) -> u64 {
        self.state.lock().confirmations
    }

    /// Configurations acknowledged so far, oldest first
    pub fn reconfigures(&self) -> Vec<SwitchConfig> {
        self.state.lock().reconfigures.clone()
    }

    async fn pass_gate(&self) {
        let gate = self.state.lock().gate.clone();
        if let Some(gate) = gate {
            if let Ok(permit) = gate.acquire().await {
                permit.forget();
            }
        }
    }

    fn take_failure(&self) -> Option<SettlementError> {
        self.state.lock().fail_next.take()
    }
}

#[async_trait]
impl SettlementEffects for MockSettlement {
    async fn acknowledge_confirmation(&self) -> Result<(), SettlementError> {
        self.pass_gate().await;
        if let Some(error) = self.take_failure() {
            tracing::debug!(%error, "mock settlement failing confirmation");
            return Err(error);
        }
        self.state.lock().confirmations += 1;
        Ok(())
    }

    async fn acknowledge_reconfigure(&self, config: &SwitchConfig) -> Result<(), SettlementError> {
        self.pass_gate().await;
        if let Some(error) = self.take_failure() {
            tracing::debug!(%error, "mock settlement failing reconfigure");
            return Err(error);
        }
        self.state.lock().reconfigures.push(config.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[tokio::test]
    async fn acknowledges_by_default() {
        let settlement = MockSettlement::new();
        assert!(settlement.acknowledge_confirmation().await.is_ok());
        assert_eq!(settlement.confirmations(), 1);
    }

    #[tokio::test]
    async fn queued_failure_fires_once() {
        let settlement = MockSettlement::new();
        settlement.fail_next(SettlementError::Unavailable);

        assert_matches!(
            settlement.acknowledge_confirmation().await,
            Err(SettlementError::Unavailable)
        );
        // failure consumed; next call succeeds
        assert!(settlement.acknowledge_confirmation().await.is_ok());
        assert_eq!(settlement.confirmations(), 1);
    }

    #[tokio::test]
    async fn reconfigure_records_the_config() {
        let settlement = MockSettlement::new();
        let config = SwitchConfig::validate(30, "0xabc").unwrap();
        settlement.acknowledge_reconfigure(&config).await.unwrap();
        assert_eq!(settlement.reconfigures(), vec![config]);
    }

    #[tokio::test]
    async fn hold_parks_acknowledgements_until_released() {
        let settlement = MockSettlement::new();
        settlement.hold();

        let in_flight = tokio::spawn({
            let settlement = settlement.clone();
            async move { settlement.acknowledge_confirmation().await }
        });

        tokio::task::yield_now().await;
        assert_eq!(settlement.confirmations(), 0);

        settlement.release_one();
        in_flight.await.unwrap().unwrap();
        assert_eq!(settlement.confirmations(), 1);
    }
}
