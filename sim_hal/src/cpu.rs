//! Simulated CPU with an observable halt

use hal::CpuHal;
use kernel_api::TerminationCode;
use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};

/// No halt recorded yet
const NO_HALT: u32 = u32::MAX;

/// Unwind payload raised by [`SimCpu::halt`]
///
/// Tests catch it with `std::panic::catch_unwind` and downcast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Halted {
    /// Raw code handed to the CPU
    pub raw: u32,
    /// Decoded code, if it is one of the known termination codes
    pub code: Option<TerminationCode>,
    /// CPU that halted
    pub cpu_id: u32,
}

/// Simulated CPU
///
/// `const`-constructible so tests can declare it as a `static`.
#[derive(Debug)]
pub struct SimCpu {
    id: u32,
    halts: AtomicUsize,
    last_code: AtomicU32,
}

impl SimCpu {
    /// Creates CPU 0
    pub const fn new() -> Self {
        Self::with_id(0)
    }

    /// Creates a CPU with a given id
    pub const fn with_id(id: u32) -> Self {
        Self {
            id,
            halts: AtomicUsize::new(0),
            last_code: AtomicU32::new(NO_HALT),
        }
    }

    /// Number of times this CPU was halted
    pub fn halt_count(&self) -> usize {
        self.halts.load(Ordering::SeqCst)
    }

    /// Code passed to the most recent halt
    pub fn last_halt(&self) -> Option<TerminationCode> {
        match self.last_code.load(Ordering::SeqCst) {
            NO_HALT => None,
            raw => TerminationCode::try_from(raw).ok(),
        }
    }
}

impl Default for SimCpu {
    fn default() -> Self {
        Self::new()
    }
}

impl CpuHal for SimCpu {
    fn halt(&self, code: u32) -> ! {
        self.last_code.store(code, Ordering::SeqCst);
        self.halts.fetch_add(1, Ordering::SeqCst);
        std::panic::panic_any(Halted {
            raw: code,
            code: TerminationCode::try_from(code).ok(),
            cpu_id: self.id,
        })
    }

    fn cpu_id(&self) -> u32 {
        self.id
    }
}
