//! # Kernel
//!
//! Owner of the hardware-facing resources of the running image.
//!
//! ## Responsibilities
//!
//! - **Heap**: carved from the platform memory region, sized by the
//!   configuration ([`KernelHeap`])
//! - **Clock**: the platform timer, started at the configured input
//!   frequency and read as time since kernel start ([`Clock`])
//! - **Termination**: the platform halt primitive, the one place where
//!   control flow of the image ends
//!
//! A [`Kernel`] either comes out of [`Kernel::new`] fully working or not
//! at all. There is no half-initialized kernel to guard against.

pub mod clock;
pub mod heap;

pub use clock::Clock;
pub use heap::KernelHeap;

use configuration::Configuration;
use hal::{CpuHal, MemoryError, MemoryRegion, Platform, TimerError};
use kernel_api::{KernelError, TerminationCode};

/// The kernel of the running image
pub struct Kernel {
    heap: KernelHeap,
    clock: Clock,
    prescale: u64,
    cpu: &'static dyn CpuHal,
}

impl Kernel {
    /// Brings the kernel up on `platform`
    ///
    /// Fails if the memory region cannot hold the configured heap or the
    /// timer cannot run at the configured source clock. Nothing from the
    /// platform is usable after a failure; the caller must treat it as
    /// fatal.
    pub fn new(config: &Configuration, platform: Platform) -> Result<Self, KernelError> {
        let Platform { memory, timer, cpu } = platform;

        let requested = config.heap_size();
        MemoryRegion::of(memory)
            .reserve(requested)
            .map_err(|e| match e {
                MemoryError::RegionTooSmall {
                    requested,
                    available,
                } => KernelError::RegionTooSmall {
                    requested,
                    available,
                },
                MemoryError::Empty => KernelError::RegionTooSmall {
                    requested,
                    available: 0,
                },
            })?;

        timer.start(config.source_clock_hz())?;
        if timer.frequency_hz() == 0 {
            return Err(KernelError::ClockStart(TimerError::UnsupportedFrequency(0)));
        }
        let clock = Clock::start(timer);
        let prescale = config.timer_prescale();

        let heap = KernelHeap::new(memory, requested);
        log::info!(
            target: "kernel",
            "kernel up: heap {:#x}..{:#x} ({} bytes), clock {} Hz (cpu {} Hz / {}), cpu {}",
            heap.region().start,
            heap.region().end(),
            requested,
            clock.frequency_hz(),
            config.cpu_clock_hz(),
            prescale,
            cpu.cpu_id()
        );

        Ok(Self {
            heap,
            clock,
            prescale,
            cpu,
        })
    }

    /// Returns the kernel heap
    pub fn heap(&self) -> &KernelHeap {
        &self.heap
    }

    /// Returns the kernel clock
    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    /// Milliseconds since kernel start
    pub fn time_ms(&self) -> u64 {
        self.clock.time_ms()
    }

    /// Nanoseconds since kernel start
    pub fn time_ns(&self) -> u64 {
        self.clock.time_ns()
    }

    /// CPU cycles per timer input cycle
    pub fn timer_prescale(&self) -> u64 {
        self.prescale
    }

    /// Returns the id of the CPU the kernel halts
    pub fn cpu_id(&self) -> u32 {
        self.cpu.cpu_id()
    }

    /// Stops the image with `code`
    pub fn terminate(&self, code: TerminationCode) -> ! {
        self.cpu.halt(code.as_u32())
    }
}

impl core::fmt::Debug for Kernel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Kernel")
            .field("heap", &self.heap)
            .field("clock", &self.clock)
            .field("prescale", &self.prescale)
            .field("cpu_id", &self.cpu.cpu_id())
            .finish()
    }
}
