//! Timer backed by the host's monotonic clock

use hal::{TimerDevice, TimerError};
use std::time::Instant;

/// Real-time timer for running the system on a development host
///
/// Ticks are host nanoseconds scaled to the frequency passed to `start`.
#[derive(Debug)]
pub struct HostTimerDevice {
    origin: Instant,
    frequency_hz: u64,
}

impl HostTimerDevice {
    /// Creates a stopped timer
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            frequency_hz: 0,
        }
    }
}

impl Default for HostTimerDevice {
    fn default() -> Self {
        Self::new()
    }
}

impl TimerDevice for HostTimerDevice {
    fn start(&mut self, frequency_hz: u64) -> Result<(), TimerError> {
        if frequency_hz == 0 {
            return Err(TimerError::UnsupportedFrequency(frequency_hz));
        }
        if self.frequency_hz != 0 {
            return Err(TimerError::AlreadyStarted);
        }
        self.origin = Instant::now();
        self.frequency_hz = frequency_hz;
        Ok(())
    }

    fn poll_ticks(&self) -> u64 {
        let nanos = self.origin.elapsed().as_nanos();
        let ticks = nanos * self.frequency_hz as u128 / 1_000_000_000;
        u64::try_from(ticks).unwrap_or(u64::MAX)
    }

    fn frequency_hz(&self) -> u64 {
        self.frequency_hz
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stopped_timer_reads_zero() {
        let timer = HostTimerDevice::new();
        assert_eq!(timer.poll_ticks(), 0);
    }

    #[test]
    fn test_host_ticks_never_decrease() {
        let mut timer = HostTimerDevice::new();
        timer.start(1_000_000_000).unwrap();
        let mut last = timer.poll_ticks();
        for _ in 0..1000 {
            let now = timer.poll_ticks();
            assert!(now >= last);
            last = now;
        }
    }

    #[test]
    fn test_double_start_rejected() {
        let mut timer = HostTimerDevice::new();
        timer.start(1_000).unwrap();
        assert_eq!(timer.start(1_000), Err(TimerError::AlreadyStarted));
    }
}
