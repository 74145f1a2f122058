//! # Timer Device
//!
//! Hardware abstraction for monotonic time measurement.
//!
//! ## Philosophy
//!
//! **Time is a service, not a global variable.**
//!
//! This trait provides access to a monotonic tick counter. It does NOT:
//! - Provide wall-clock time (no UTC, no timezones)
//! - Block or sleep (polling only)
//! - Convert ticks to seconds (that's for the kernel clock)
//!
//! ## Design Principles
//!
//! 1. **Monotonic**: Ticks never go backwards
//! 2. **Non-blocking**: Always returns immediately
//! 3. **Cumulative**: Returns total ticks since the device was started
//! 4. **Shared**: Polling takes `&self`, so any context may read it

use thiserror::Error;

/// Errors reported while starting a timer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimerError {
    /// The device cannot be driven at the requested input frequency
    #[error("Unsupported timer frequency: {0} Hz")]
    UnsupportedFrequency(u64),

    /// The device was already started
    #[error("Timer already started")]
    AlreadyStarted,
}

/// Hardware timer device trait
///
/// # Implementation Notes
///
/// - Must be monotonic (never return a smaller value)
/// - Must not block
/// - Must be safe to poll from interrupt handlers and tasks at once
/// - Overflow behavior is implementation-defined (but must remain monotonic)
///
/// # Examples
///
/// ```
/// use hal::TimerDevice;
///
/// fn elapsed<T: TimerDevice>(timer: &T, start: u64) -> u64 {
///     timer.poll_ticks() - start
/// }
/// ```
pub trait TimerDevice: Send + Sync {
    /// Programs the device to count at `frequency_hz`
    ///
    /// Called once by the kernel during construction.
    fn start(&mut self, frequency_hz: u64) -> Result<(), TimerError>;

    /// Returns the current tick count
    ///
    /// This value is:
    /// - Monotonic (never decreases)
    /// - Cumulative (total ticks since start)
    /// - Non-blocking (returns immediately)
    fn poll_ticks(&self) -> u64;

    /// Returns the tick frequency the device is counting at
    fn frequency_hz(&self) -> u64;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};

    /// Simple test implementation for demonstration
    struct TestTimer {
        ticks: AtomicU64,
        hz: u64,
    }

    impl TestTimer {
        fn new() -> Self {
            Self {
                ticks: AtomicU64::new(0),
                hz: 0,
            }
        }

        fn advance(&self, delta: u64) {
            self.ticks.fetch_add(delta, Ordering::SeqCst);
        }
    }

    impl TimerDevice for TestTimer {
        fn start(&mut self, frequency_hz: u64) -> Result<(), TimerError> {
            if frequency_hz == 0 {
                return Err(TimerError::UnsupportedFrequency(0));
            }
            self.hz = frequency_hz;
            Ok(())
        }

        fn poll_ticks(&self) -> u64 {
            self.ticks.load(Ordering::SeqCst)
        }

        fn frequency_hz(&self) -> u64 {
            self.hz
        }
    }

    #[test]
    fn test_timer_monotonic() {
        let timer = TestTimer::new();
        let t1 = timer.poll_ticks();
        timer.advance(100);
        let t2 = timer.poll_ticks();
        timer.advance(50);
        let t3 = timer.poll_ticks();

        assert!(t2 >= t1);
        assert!(t3 >= t2);
        assert_eq!(t2 - t1, 100);
        assert_eq!(t3 - t2, 50);
    }

    #[test]
    fn test_timer_start() {
        let mut timer = TestTimer::new();
        assert_eq!(timer.start(0), Err(TimerError::UnsupportedFrequency(0)));
        timer.start(1_000).unwrap();
        assert_eq!(timer.frequency_hz(), 1_000);
    }
}
