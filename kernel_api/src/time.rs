//! Time abstractions

use serde::{Deserialize, Serialize};

const NANOS_PER_MILLI: u64 = 1_000_000;

/// A point in time since kernel start
///
/// The epoch is the tick the kernel clock read while the kernel was
/// being constructed. With a simulated timer it is virtual time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Instant {
    /// Nanoseconds since kernel start
    nanos: u64,
}

impl Instant {
    /// Kernel start
    pub const EPOCH: Instant = Instant { nanos: 0 };

    /// Creates an instant from nanoseconds
    pub const fn from_nanos(nanos: u64) -> Self {
        Self { nanos }
    }

    /// Returns nanoseconds since kernel start
    pub const fn as_nanos(&self) -> u64 {
        self.nanos
    }

    /// Returns whole milliseconds since kernel start
    pub const fn as_millis(&self) -> u64 {
        self.nanos / NANOS_PER_MILLI
    }

    /// Nanoseconds from `earlier` to `self`, 0 if `earlier` is later
    pub const fn nanos_since(&self, earlier: Instant) -> u64 {
        self.nanos.saturating_sub(earlier.nanos)
    }
}
