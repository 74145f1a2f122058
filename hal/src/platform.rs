//! Platform bundle handed to the kernel

use crate::{CpuHal, MemoryRegion, TimerDevice};

/// Everything the kernel needs from the machine
///
/// Every device is borrowed for `'static`, so bringing the kernel up never
/// touches a global allocator. On hardware the memory comes from
/// linker-provided heap bounds and the timer and CPU are `static`s. In
/// tests all three are leaked host allocations.
pub struct Platform {
    /// Memory the kernel heap is carved from
    pub memory: &'static mut [u8],
    /// Monotonic tick source
    pub timer: &'static mut dyn TimerDevice,
    /// Halt/reset primitive
    pub cpu: &'static dyn CpuHal,
}

impl Platform {
    /// Creates a platform bundle
    pub fn new(
        memory: &'static mut [u8],
        timer: &'static mut dyn TimerDevice,
        cpu: &'static dyn CpuHal,
    ) -> Self {
        Self { memory, timer, cpu }
    }

    /// Describes the memory region without giving it up
    pub fn memory_region(&self) -> MemoryRegion {
        MemoryRegion::of(self.memory)
    }
}

impl core::fmt::Debug for Platform {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Platform")
            .field("memory", &self.memory_region())
            .field("cpu_id", &self.cpu.cpu_id())
            .finish_non_exhaustive()
    }
}
