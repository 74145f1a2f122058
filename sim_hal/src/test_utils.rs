//! Platform builders for tests and host runs

use crate::{HostTimerDevice, SimCpu, SimTimerDevice};
use hal::Platform;
use std::panic::{catch_unwind, AssertUnwindSafe};

/// A simulated platform plus the handles a test keeps after handing the
/// platform over
pub struct SimPlatform {
    /// The bundle to pass to the kernel
    pub platform: Platform,
    /// Clone of the timer inside `platform`
    pub timer: SimTimerDevice,
    /// The CPU inside `platform`
    pub cpu: &'static SimCpu,
}

/// Leaks a zeroed host allocation for use as a heap region
pub fn leak_region(bytes: usize) -> &'static mut [u8] {
    Box::leak(vec![0u8; bytes].into_boxed_slice())
}

/// Builds a deterministic platform with `region_bytes` of heap memory
pub fn sim_platform(region_bytes: usize) -> SimPlatform {
    let timer = SimTimerDevice::new();
    let cpu: &'static SimCpu = Box::leak(Box::new(SimCpu::new()));
    SimPlatform {
        platform: Platform::new(
            leak_region(region_bytes),
            Box::leak(Box::new(timer.clone())),
            cpu,
        ),
        timer,
        cpu,
    }
}

/// Builds a platform that runs on host time
pub fn host_platform(region_bytes: usize, cpu: &'static SimCpu) -> Platform {
    Platform::new(
        leak_region(region_bytes),
        Box::leak(Box::new(HostTimerDevice::new())),
        cpu,
    )
}

/// Runs `f`, which must halt, and returns the halt payload
///
/// Returns `None` if `f` returned or unwound with something else.
pub fn expect_halt<F, R>(f: F) -> Option<crate::Halted>
where
    F: FnOnce() -> R,
{
    match catch_unwind(AssertUnwindSafe(f)) {
        Ok(_) => None,
        Err(payload) => payload.downcast_ref::<crate::Halted>().copied(),
    }
}
