//! Time provider abstraction
//!
//! This module provides a [`Clock`] trait that abstracts over time sources.
//! The tree model only needs the current time in one place: reading a date from
//! a tag whose text does not parse falls back to "now". Production code uses
//! real system time while tests can pin that fallback to a known instant.
//!
//! # Example
//!
//! ```
//! use tagdown::{Clock, SystemClock};
//!
//! let clock = SystemClock;
//! let now = clock.now();
//! assert!(clock.now_millis() >= now.timestamp_millis());
//! ```

use std::fmt::Debug;

use chrono::{DateTime, FixedOffset, Local};

#[cfg(any(test, feature = "testing"))]
use {
    chrono::Utc,
    std::sync::{Mutex, PoisonError},
};

/// A time provider for the current instant.
pub trait Clock: Send + Sync + Debug {
    /// Returns the current time in the local offset of this clock.
    fn now(&self) -> DateTime<FixedOffset>;

    /// Returns the current time as milliseconds since Unix epoch.
    fn now_millis(&self) -> i64 {
        self.now().timestamp_millis()
    }
}

/// Production clock using real system time.
///
/// Dates are reported in the local time zone of the host, the same zone used
/// when reading date text that carries no offset.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}

/// Test clock pinned to a single instant.
///
/// The instant only moves when [`FixedClock::advance`] or [`FixedClock::set`]
/// is called, so date fallbacks become deterministic.
///
/// # Example
///
/// ```ignore
/// use tagdown::{Clock, FixedClock};
///
/// let clock = FixedClock::new(1000);
/// assert_eq!(clock.now_millis(), 1000);
/// clock.advance(500);
/// assert_eq!(clock.now_millis(), 1500);
/// ```
#[cfg(any(test, feature = "testing"))]
pub struct FixedClock {
    instant: Mutex<DateTime<FixedOffset>>,
}

#[cfg(any(test, feature = "testing"))]
impl FixedClock {
    /// Create a new fixed clock at the given time in milliseconds (UTC offset).
    pub fn new(millis: i64) -> Self {
        let instant = DateTime::<Utc>::from_timestamp_millis(millis)
            .unwrap_or_default()
            .fixed_offset();
        Self {
            instant: Mutex::new(instant),
        }
    }

    /// Create a fixed clock at an explicit instant, keeping its offset.
    pub fn at(instant: DateTime<FixedOffset>) -> Self {
        Self {
            instant: Mutex::new(instant),
        }
    }

    /// Advance the clock by the given number of milliseconds.
    pub fn advance(&self, ms: i64) {
        let mut instant = self.instant.lock().unwrap_or_else(PoisonError::into_inner);
        *instant += chrono::TimeDelta::milliseconds(ms);
    }

    /// Set the clock to a specific time in milliseconds, keeping the offset.
    pub fn set(&self, ms: i64) {
        let mut instant = self.instant.lock().unwrap_or_else(PoisonError::into_inner);
        let offset = *instant.offset();
        *instant = DateTime::<Utc>::from_timestamp_millis(ms)
            .unwrap_or_default()
            .with_timezone(&offset);
    }
}

#[cfg(any(test, feature = "testing"))]
impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        *self.instant.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(any(test, feature = "testing"))]
impl Default for FixedClock {
    fn default() -> Self {
        // 2024-01-01 00:00:00 UTC
        Self::new(1704067200000)
    }
}

#[cfg(any(test, feature = "testing"))]
impl Clone for FixedClock {
    fn clone(&self) -> Self {
        Self::at(self.now())
    }
}

#[cfg(any(test, feature = "testing"))]
impl Debug for FixedClock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FixedClock")
            .field("instant", &self.now().to_rfc3339())
            .finish()
    }
}
