//! Validated switch configuration.
//!
//! A `SwitchConfig` pairs the check-in timeout with the fallback recipient
//! that the settlement backend pays out to once the deadline passes. Configs
//! are created through [`SwitchConfig::validate`] (or one of the presets,
//! which route through the same constructor) and replaced wholesale; there
//! is no partial mutation.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Required prefix for external recipient addresses
pub const ADDRESS_PREFIX: &str = "0x";

/// Minimum accepted timeout, in days
pub const MIN_TIMEOUT_DAYS: i64 = 1;

/// Maximum accepted timeout, in days
pub const MAX_TIMEOUT_DAYS: i64 = 365;

/// Timeout that a freshly constructed switch starts with, in days
pub const DEFAULT_TIMEOUT_DAYS: i64 = 90;

/// An external address designated to receive the fallback outcome.
///
/// Only the address shape is checked here (non-empty, `0x`-prefixed);
/// whether the address exists on chain is the settlement backend's concern.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecipientId(String);

impl RecipientId {
    /// Parse a recipient address, rejecting anything without the chain prefix
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        if raw.starts_with(ADDRESS_PREFIX) {
            Ok(Self(raw.to_string()))
        } else {
            Err(ConfigError::InvalidRecipient {
                recipient: raw.to_string(),
                prefix: ADDRESS_PREFIX.to_string(),
            })
        }
    }

    /// Placeholder recipient shown before the user has configured one
    pub fn placeholder() -> Self {
        Self(format!("{ADDRESS_PREFIX}..."))
    }

    /// The address as entered
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RecipientId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Named timeout shortcuts offered by the configuration surface.
///
/// Presets carry no special-cased logic; they feed the same validated
/// constructor as a hand-entered day count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeoutPreset {
    /// 30 days
    OneMonth,
    /// 60 days
    TwoMonths,
    /// 90 days
    ThreeMonths,
    /// 180 days
    SixMonths,
}

impl TimeoutPreset {
    /// All presets, in the order the configuration surface offers them
    pub const ALL: [TimeoutPreset; 4] = [
        TimeoutPreset::OneMonth,
        TimeoutPreset::TwoMonths,
        TimeoutPreset::ThreeMonths,
        TimeoutPreset::SixMonths,
    ];

    /// The day count this preset stands for
    pub fn days(self) -> i64 {
        match self {
            TimeoutPreset::OneMonth => 30,
            TimeoutPreset::TwoMonths => 60,
            TimeoutPreset::ThreeMonths => 90,
            TimeoutPreset::SixMonths => 180,
        }
    }

    /// Human label, e.g. `"30 days"`
    pub fn label(self) -> String {
        format!("{} days", self.days())
    }
}

/// The validated (timeout, recipient) pair the controller operates on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwitchConfig {
    /// Check-in timeout, in whole days
    pub timeout_days: i64,
    /// Fallback recipient once the deadline passes
    pub recipient: RecipientId,
}

impl SwitchConfig {
    /// Validate a candidate configuration.
    ///
    /// Rejects day counts outside `1..=365` and recipients without the
    /// `0x` address prefix. On success the timeout is exactly
    /// `timeout_days * 86_400` seconds.
    pub fn validate(timeout_days: i64, recipient: &str) -> Result<Self, ConfigError> {
        if !(MIN_TIMEOUT_DAYS..=MAX_TIMEOUT_DAYS).contains(&timeout_days) {
            return Err(ConfigError::TimeoutOutOfRange { days: timeout_days });
        }
        let recipient = RecipientId::parse(recipient)?;
        Ok(Self {
            timeout_days,
            recipient,
        })
    }

    /// Build a configuration from a named preset
    pub fn preset(preset: TimeoutPreset, recipient: &str) -> Result<Self, ConfigError> {
        Self::validate(preset.days(), recipient)
    }

    /// The timeout as a duration
    pub fn timeout(&self) -> Duration {
        Duration::days(self.timeout_days)
    }
}

impl Default for SwitchConfig {
    /// The configuration a switch boots with: 90 days, placeholder recipient
    fn default() -> Self {
        Self {
            timeout_days: DEFAULT_TIMEOUT_DAYS,
            recipient: RecipientId::placeholder(),
        }
    }
}
