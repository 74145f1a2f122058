//! # Simulated Timer Device
//!
//! Deterministic timer implementation for testing.
//!
//! ## Philosophy
//!
//! **Determinism enables thorough testing.**
//!
//! This timer only advances when explicitly told to do so. Clones share
//! the same counter, so a test keeps one clone after handing the other to
//! the kernel and steers kernel time from outside.

use hal::{TimerDevice, TimerError};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Simulated timer device with controllable time progression
///
/// # Examples
///
/// ```
/// use sim_hal::SimTimerDevice;
/// use hal::TimerDevice;
///
/// let timer = SimTimerDevice::new();
/// let handle = timer.clone();
/// assert_eq!(timer.poll_ticks(), 0);
///
/// handle.advance_ticks(100);
/// assert_eq!(timer.poll_ticks(), 100);
/// ```
#[derive(Debug, Clone)]
pub struct SimTimerDevice {
    /// Shared tick count
    ticks: Arc<AtomicU64>,
    /// Frequency set by `start`, 0 until then
    frequency_hz: Arc<AtomicU64>,
}

impl SimTimerDevice {
    /// Creates a new simulated timer starting at tick 0
    pub fn new() -> Self {
        Self::with_initial_ticks(0)
    }

    /// Creates a new simulated timer starting at a specific tick count
    ///
    /// Useful to check that kernel time is measured from kernel start,
    /// not from the device's own zero.
    pub fn with_initial_ticks(ticks: u64) -> Self {
        Self {
            ticks: Arc::new(AtomicU64::new(ticks)),
            frequency_hz: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Advances the timer by the specified number of ticks
    ///
    /// # Panics
    ///
    /// Panics if advancing would overflow u64.
    pub fn advance_ticks(&self, delta: u64) {
        let previous = self.ticks.fetch_add(delta, Ordering::SeqCst);
        assert!(previous.checked_add(delta).is_some(), "Timer tick overflow");
    }

    /// Advances the timer by whole nanoseconds at the started frequency
    pub fn advance_nanos(&self, nanos: u64) {
        let hz = self.frequency_hz.load(Ordering::SeqCst);
        let ticks = (nanos as u128 * hz as u128) / 1_000_000_000;
        self.advance_ticks(u64::try_from(ticks).unwrap_or(u64::MAX));
    }

    /// Returns the current tick count without advancing time
    pub fn current_ticks(&self) -> u64 {
        self.ticks.load(Ordering::SeqCst)
    }

    /// Returns true once `start` succeeded
    pub fn is_started(&self) -> bool {
        self.frequency_hz.load(Ordering::SeqCst) != 0
    }
}

impl Default for SimTimerDevice {
    fn default() -> Self {
        Self::new()
    }
}

impl TimerDevice for SimTimerDevice {
    fn start(&mut self, frequency_hz: u64) -> Result<(), TimerError> {
        if frequency_hz == 0 {
            return Err(TimerError::UnsupportedFrequency(frequency_hz));
        }
        self.frequency_hz
            .compare_exchange(0, frequency_hz, Ordering::SeqCst, Ordering::SeqCst)
            .map(|_| ())
            .map_err(|_| TimerError::AlreadyStarted)
    }

    fn poll_ticks(&self) -> u64 {
        self.ticks.load(Ordering::SeqCst)
    }

    fn frequency_hz(&self) -> u64 {
        self.frequency_hz.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_timer_starts_at_zero() {
        let timer = SimTimerDevice::new();
        assert_eq!(timer.poll_ticks(), 0);
        assert!(!timer.is_started());
    }

    #[test]
    fn test_clones_share_ticks() {
        let timer = SimTimerDevice::with_initial_ticks(1000);
        let handle = timer.clone();
        handle.advance_ticks(24);
        assert_eq!(timer.poll_ticks(), 1024);
    }

    #[test]
    fn test_start_sets_frequency_once() {
        let mut timer = SimTimerDevice::new();
        assert_eq!(timer.start(0), Err(TimerError::UnsupportedFrequency(0)));
        timer.start(1_000_000).unwrap();
        assert!(timer.is_started());
        assert_eq!(timer.frequency_hz(), 1_000_000);
        assert_eq!(timer.start(2_000_000), Err(TimerError::AlreadyStarted));
        assert_eq!(timer.frequency_hz(), 1_000_000);
    }

    #[test]
    fn test_advance_nanos_uses_frequency() {
        let mut timer = SimTimerDevice::new();
        timer.start(1_000_000).unwrap();
        timer.advance_nanos(5_000_000);
        assert_eq!(timer.poll_ticks(), 5_000);
    }

    #[test]
    #[should_panic(expected = "Timer tick overflow")]
    fn test_overflow_panics() {
        let timer = SimTimerDevice::with_initial_ticks(u64::MAX);
        timer.advance_ticks(1);
    }
}
