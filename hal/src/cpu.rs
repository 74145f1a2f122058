//! CPU abstraction

/// CPU-specific operations
///
/// The only operation the system layer depends on is [`CpuHal::halt`]:
/// the single place where control flow of the running image ends.
pub trait CpuHal: Sync {
    /// Stops all further execution on this CPU
    ///
    /// `code` is the numeric termination reason, surfaced to whatever the
    /// platform offers for post-mortem diagnostics (a debug register, a
    /// reset reason, a semihosting exit status). Implementations must not
    /// return: halt in a loop, reset the core, or unwind out of the image.
    fn halt(&self, code: u32) -> !;

    /// Returns the CPU ID (for multi-core systems)
    fn cpu_id(&self) -> u32;
}
