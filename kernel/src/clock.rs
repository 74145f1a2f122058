//! Time since kernel start

use core::sync::atomic::{AtomicU64, Ordering};
use hal::TimerDevice;

const NANOS_PER_SEC: u128 = 1_000_000_000;
const NANOS_PER_MILLI: u64 = 1_000_000;

/// Converts a tick count at `frequency_hz` to nanoseconds
///
/// Saturates at `u64::MAX`; returns 0 for a 0 Hz device.
pub fn ticks_to_nanos(ticks: u64, frequency_hz: u64) -> u64 {
    if frequency_hz == 0 {
        return 0;
    }
    let nanos = ticks as u128 * NANOS_PER_SEC / frequency_hz as u128;
    u64::try_from(nanos).unwrap_or(u64::MAX)
}

/// The kernel clock
///
/// Wraps a started timer. The tick read at construction is the epoch.
/// Readings pass through a high-water mark, so concurrent readers never
/// see time go backwards even if the device glitches.
pub struct Clock {
    timer: &'static dyn TimerDevice,
    frequency_hz: u64,
    epoch_ticks: u64,
    watermark_ns: AtomicU64,
}

impl Clock {
    /// Takes ownership of a started timer and fixes the epoch
    pub fn start(timer: &'static dyn TimerDevice) -> Self {
        let frequency_hz = timer.frequency_hz();
        let epoch_ticks = timer.poll_ticks();
        Self {
            timer,
            frequency_hz,
            epoch_ticks,
            watermark_ns: AtomicU64::new(0),
        }
    }

    /// Tick frequency
    pub fn frequency_hz(&self) -> u64 {
        self.frequency_hz
    }

    /// Duration of one tick, rounded up to whole nanoseconds
    pub fn resolution_ns(&self) -> u64 {
        NANOS_PER_SEC.div_ceil(self.frequency_hz.max(1) as u128) as u64
    }

    /// Ticks since the epoch
    pub fn ticks(&self) -> u64 {
        self.timer.poll_ticks().saturating_sub(self.epoch_ticks)
    }

    /// Nanoseconds since the epoch, never decreasing
    pub fn time_ns(&self) -> u64 {
        let sample = ticks_to_nanos(self.ticks(), self.frequency_hz);
        let previous = self.watermark_ns.fetch_max(sample, Ordering::AcqRel);
        previous.max(sample)
    }

    /// Whole milliseconds since the epoch
    ///
    /// Derived from [`Clock::time_ns`], so a single sample satisfies
    /// `ms == ns / 1_000_000` exactly.
    pub fn time_ms(&self) -> u64 {
        self.time_ns() / NANOS_PER_MILLI
    }
}

impl core::fmt::Debug for Clock {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Clock")
            .field("frequency_hz", &self.frequency_hz)
            .field("epoch_ticks", &self.epoch_ticks)
            .field("watermark_ns", &self.watermark_ns.load(Ordering::Relaxed))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hal::TimerError;
    use sim_hal::SimTimerDevice;
    use std::sync::Arc;

    fn started(hz: u64, initial: u64) -> (Clock, SimTimerDevice) {
        let mut timer = SimTimerDevice::with_initial_ticks(initial);
        timer.start(hz).unwrap();
        (Clock::start(Box::leak(Box::new(timer.clone()))), timer)
    }

    #[test]
    fn test_ticks_to_nanos() {
        assert_eq!(ticks_to_nanos(1, 1_000_000_000), 1);
        assert_eq!(ticks_to_nanos(3, 1_000_000), 3_000);
        assert_eq!(ticks_to_nanos(1, 3), 333_333_333);
        assert_eq!(ticks_to_nanos(u64::MAX, 1), u64::MAX);
        assert_eq!(ticks_to_nanos(42, 0), 0);
    }

    #[test]
    fn test_epoch_is_kernel_start() {
        let (clock, timer) = started(1_000, 5_000);
        assert_eq!(clock.time_ns(), 0);
        timer.advance_ticks(1);
        assert_eq!(clock.ticks(), 1);
        assert_eq!(clock.time_ns(), 1_000_000);
        assert_eq!(clock.time_ms(), 1);
    }

    #[test]
    fn test_ms_matches_ns_for_one_sample() {
        let (clock, timer) = started(32_768, 0);
        for _ in 0..100 {
            timer.advance_ticks(97);
            let ns = clock.time_ns();
            let ms = clock.time_ms();
            assert_eq!(ms, ns / 1_000_000);
        }
    }

    #[test]
    fn test_resolution() {
        assert_eq!(started(1_000_000, 0).0.resolution_ns(), 1_000);
        assert_eq!(started(32_768, 0).0.resolution_ns(), 30_518);
        assert_eq!(started(1_000_000_000, 0).0.resolution_ns(), 1);
    }

    /// A device whose counter jumps backwards once
    struct GlitchyTimer {
        reads: std::sync::atomic::AtomicU64,
    }

    impl TimerDevice for GlitchyTimer {
        fn start(&mut self, _frequency_hz: u64) -> Result<(), TimerError> {
            Ok(())
        }

        fn poll_ticks(&self) -> u64 {
            match self.reads.fetch_add(1, Ordering::SeqCst) {
                0 => 0,
                1 => 100,
                _ => 50,
            }
        }

        fn frequency_hz(&self) -> u64 {
            1_000_000_000
        }
    }

    #[test]
    fn test_never_decreases_on_glitch() {
        let clock = Clock::start(Box::leak(Box::new(GlitchyTimer {
            reads: AtomicU64::new(0),
        })));
        assert_eq!(clock.time_ns(), 100);
        assert_eq!(clock.time_ns(), 100);
    }

    #[test]
    fn test_concurrent_readers_monotonic() {
        let (clock, timer) = started(1_000_000, 0);
        let clock = Arc::new(clock);

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let clock = Arc::clone(&clock);
                std::thread::spawn(move || {
                    let mut last = 0;
                    for _ in 0..10_000 {
                        let now = clock.time_ns();
                        assert!(now >= last);
                        last = now;
                    }
                })
            })
            .collect();
        for _ in 0..1_000 {
            timer.advance_ticks(3);
        }
        for reader in readers {
            reader.join().unwrap();
        }
        assert_eq!(clock.time_ns(), 3_000_000);
    }
}
