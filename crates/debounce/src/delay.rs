//! Validated debounce delay

use crate::error::{DebounceError, Result};
use std::fmt;
use std::time::Duration;

/// Quiet period a debounced wrapper waits for before firing
///
/// Negative millisecond values are rejected with `InvalidArgument`, never
/// clamped to zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Delay(Duration);

impl Delay {
    /// Fire at the next scheduling opportunity
    pub const ZERO: Delay = Delay(Duration::ZERO);

    /// Build a delay from signed milliseconds
    pub fn from_millis(delay_ms: i64) -> Result<Self> {
        if delay_ms < 0 {
            return Err(DebounceError::InvalidArgument { delay_ms });
        }
        Ok(Self(Duration::from_millis(delay_ms as u64)))
    }

    pub const fn from_duration(duration: Duration) -> Self {
        Self(duration)
    }

    pub const fn as_duration(self) -> Duration {
        self.0
    }

    pub fn as_millis(self) -> u128 {
        self.0.as_millis()
    }
}

impl From<Duration> for Delay {
    fn from(duration: Duration) -> Self {
        Self(duration)
    }
}

impl TryFrom<i64> for Delay {
    type Error = DebounceError;

    fn try_from(delay_ms: i64) -> Result<Self> {
        Self::from_millis(delay_ms)
    }
}

impl fmt::Display for Delay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.as_millis())
    }
}
