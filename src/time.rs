//! Time abstraction for testability.
//!
//! Webhook freshness depends on the current time. This module provides a
//! [`Clock`] trait so tests can pin "now" instead of racing the system clock.

use std::time::{SystemTime, UNIX_EPOCH};

/// Abstraction over system time for testability.
///
/// # Example
///
/// ```
/// use urlbox::time::{Clock, SystemClock};
///
/// let clock = SystemClock;
/// assert!(clock.unix_seconds() > 1_600_000_000);
/// ```
pub trait Clock: Send + Sync {
    /// Returns the current time.
    fn now(&self) -> SystemTime;

    /// Returns the current time as whole seconds since the Unix epoch.
    ///
    /// Times before the epoch read as `0`.
    fn unix_seconds(&self) -> i64 {
        self.now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| i64::try_from(d.as_secs()).unwrap_or(i64::MAX))
    }
}

/// Production clock using actual system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> SystemTime {
        SystemTime::now()
    }
}

/// Clock frozen at a fixed number of seconds after the Unix epoch.
///
/// Handy for verifying recorded webhooks long after they were sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    unix_seconds: u64,
}

impl FixedClock {
    /// Creates a clock that always reports `unix_seconds`.
    #[must_use]
    pub const fn at(unix_seconds: u64) -> Self {
        Self { unix_seconds }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> SystemTime {
        UNIX_EPOCH + std::time::Duration::from_secs(self.unix_seconds)
    }
}
