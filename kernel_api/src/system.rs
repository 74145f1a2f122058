//! The syscall interface

use crate::{Heap, Instant};

/// Capability set exposed to all code in the image
///
/// Obtained from the system's static accessor. Implementations are
/// shared across interrupt handlers and tasks, hence `Sync`.
pub trait SystemApi: Sync {
    /// Returns true if the system finished construction
    ///
    /// Always true for an interface obtained from the accessor.
    fn is_constructed(&self) -> bool;

    /// Returns the OS heap
    fn heap(&self) -> &dyn Heap;

    /// Running time since kernel start in milliseconds
    fn time_ms(&self) -> u64;

    /// Running time since kernel start in nanoseconds
    fn time_ns(&self) -> u64;

    /// Stops the image gracefully
    fn terminate(&self) -> !;

    /// Current time as an [`Instant`]
    fn now(&self) -> Instant {
        Instant::from_nanos(self.time_ns())
    }

    /// Nanoseconds elapsed since `since`
    fn elapsed_ns(&self, since: Instant) -> u64 {
        self.now().nanos_since(since)
    }
}
