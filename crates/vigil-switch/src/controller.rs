//! Switch controller state machine.
//!
//! # Blocking Lock Usage
//!
//! Uses `parking_lot::Mutex` for the state slot because every critical
//! section is a handful of field reads or writes and the lock is never held
//! across an `.await` point; the two settlement acknowledgements happen
//! strictly outside it.

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::sync::Arc;
use vigil_core::effects::{ClockEffects, SettlementEffects};
use vigil_core::{ConfirmationEvent, ConfirmationLog, SwitchConfig, SwitchState};

use crate::errors::{Result, SwitchError};

/// Command-processing phase of the controller.
///
/// The transient phases exist only to reflect an in-flight settlement
/// acknowledgement; the controller is back in `Idle` the moment the
/// acknowledgement resolves, success or not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No command in flight
    Idle,
    /// A check-in is waiting on the settlement backend
    Confirming,
    /// A configuration change is waiting on the settlement backend
    Reconfiguring,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Phase::Idle => "idle",
            Phase::Confirming => "confirmation",
            Phase::Reconfiguring => "reconfiguration",
        };
        f.write_str(label)
    }
}

#[derive(Debug)]
struct ControllerState {
    config: SwitchConfig,
    last_confirmation: DateTime<Utc>,
    log: ConfirmationLog,
    phase: Phase,
}

/// Single logical actor owning all mutable switch state.
///
/// One instance per switch; construct explicitly, share behind an `Arc`,
/// and drop to tear down. Commands on the same instance are processed in
/// submission order and no caller ever observes a half-applied update.
pub struct SwitchController {
    clock: Arc<dyn ClockEffects>,
    settlement: Arc<dyn SettlementEffects>,
    state: Mutex<ControllerState>,
}

impl SwitchController {
    /// Create a controller with the default 90-day configuration, treating
    /// construction time as the first confirmation
    pub async fn new(
        clock: Arc<dyn ClockEffects>,
        settlement: Arc<dyn SettlementEffects>,
    ) -> Self {
        let config = SwitchConfig::default();
        Self::with_config(clock, settlement, config).await
    }

    /// Create a controller with an explicit starting configuration
    pub async fn with_config(
        clock: Arc<dyn ClockEffects>,
        settlement: Arc<dyn SettlementEffects>,
        config: SwitchConfig,
    ) -> Self {
        let now = clock.now().await;
        Self {
            clock,
            settlement,
            state: Mutex::new(ControllerState {
                config,
                last_confirmation: now,
                log: ConfirmationLog::new(),
                phase: Phase::Idle,
            }),
        }
    }

    /// Record an "I am alive" confirmation.
    ///
    /// Enters `Confirming`, asks the settlement backend to acknowledge,
    /// and only then resets the last confirmation and appends to the log;
    /// a failed acknowledgement leaves both untouched. Returns the state
    /// as of the confirmation instant.
    pub async fn confirm(&self) -> Result<SwitchState> {
        let now = self.clock.now().await;
        self.enter(Phase::Confirming)?;

        let ack = self.settlement.acknowledge_confirmation().await;

        let mut state = self.state.lock();
        state.phase = Phase::Idle;
        match ack {
            Ok(()) => {
                state.last_confirmation = now;
                state.log = state.log.record(ConfirmationEvent { at: now });
                tracing::info!(at = %now, "check-in confirmed, deadline reset");
                Ok(SwitchState::derive(now, state.config.timeout(), now))
            }
            Err(error) => {
                tracing::warn!(%error, "check-in acknowledgement failed");
                Err(SwitchError::Acknowledgement(error))
            }
        }
    }

    /// Replace the configuration wholesale.
    ///
    /// Validation runs before anything else; an invalid candidate is
    /// reported immediately with no phase change and no suspension. A
    /// valid candidate is applied only after the settlement backend
    /// acknowledges it, otherwise it is discarded.
    pub async fn reconfigure(&self, timeout_days: i64, recipient: &str) -> Result<SwitchConfig> {
        let candidate = SwitchConfig::validate(timeout_days, recipient)?;
        self.enter(Phase::Reconfiguring)?;

        let ack = self.settlement.acknowledge_reconfigure(&candidate).await;

        let mut state = self.state.lock();
        state.phase = Phase::Idle;
        match ack {
            Ok(()) => {
                tracing::info!(
                    timeout_days = candidate.timeout_days,
                    recipient = %candidate.recipient,
                    "configuration replaced"
                );
                state.config = candidate.clone();
                Ok(candidate)
            }
            Err(error) => {
                tracing::warn!(%error, "reconfigure acknowledgement failed, candidate discarded");
                Err(SwitchError::Acknowledgement(error))
            }
        }
    }

    /// Derive the current switch state from the live clock.
    ///
    /// Read-only and idempotent; safe to call at any rate.
    pub async fn current_state(&self) -> SwitchState {
        let now = self.clock.now().await;
        self.state_at(now)
    }

    /// Derive the switch state as observed at an explicit instant
    pub fn state_at(&self, now: DateTime<Utc>) -> SwitchState {
        let state = self.state.lock();
        SwitchState::derive(state.last_confirmation, state.config.timeout(), now)
    }

    /// The live configuration
    pub fn config(&self) -> SwitchConfig {
        self.state.lock().config.clone()
    }

    /// The bounded check-in history, newest first
    pub fn history(&self) -> ConfirmationLog {
        self.state.lock().log.clone()
    }

    /// Instant of the most recent successful check-in
    pub fn last_confirmation(&self) -> DateTime<Utc> {
        self.state.lock().last_confirmation
    }

    /// Claim the state slot for a transient phase, or report who holds it.
    ///
    /// The single slot serializes all mutation: any in-flight command
    /// rejects a new one with `Busy` rather than queuing it silently.
    fn enter(&self, phase: Phase) -> Result<()> {
        let mut state = self.state.lock();
        if state.phase != Phase::Idle {
            tracing::debug!(in_flight = %state.phase, requested = %phase, "command rejected, controller busy");
            return Err(SwitchError::Busy { phase: state.phase });
        }
        state.phase = phase;
        Ok(())
    }
}

impl std::fmt::Debug for SwitchController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("SwitchController")
            .field("config", &state.config)
            .field("last_confirmation", &state.last_confirmation)
            .field("phase", &state.phase)
            .finish_non_exhaustive()
    }
}
