//! Resilience Test Utilities
//!
//! Shared helpers for the system lifecycle integration tests.
//!
//! ## Test Philosophy
//!
//! - **One process, one system**: the syscall registry is process-wide and
//!   never reset, so each test binary owns exactly one boot scenario
//! - **Halts are observable**: the simulated CPU unwinds with a `Halted`
//!   payload, so "never returns" is checked with a sentinel
//! - **Halts are audited**: every halt leaves a log entry carrying its code

use configuration::Parameters;
use kernel_api::TerminationCode;
use kernel_log::MemoryLogger;
use log::LevelFilter;
use sim_hal::{sim_platform, SimPlatform};
use spin::Once;

/// Heap size used by the test parameter set
pub const TEST_HEAP_SIZE: usize = 16 * 1024;

/// Memory the test platform offers
pub const TEST_REGION_SIZE: usize = 32 * 1024;

static LOGGER: MemoryLogger = MemoryLogger::new(LevelFilter::Trace);
static LOGGER_INSTALLED: Once<()> = Once::new();

/// Installs the in-memory logger for this test binary and returns it
pub fn test_logger() -> &'static MemoryLogger {
    LOGGER_INSTALLED.call_once(|| {
        // Only fails if another logger is installed, which these tests never do.
        let _ = LOGGER.install();
    });
    &LOGGER
}

/// A valid parameter set
pub fn test_params() -> Parameters {
    Parameters::default().with_heap_size(TEST_HEAP_SIZE)
}

/// A parameter set describing a zero-sized heap
pub fn invalid_params() -> Parameters {
    Parameters::default().with_heap_size(0)
}

/// A simulated platform with room for the test heap
pub fn test_platform() -> SimPlatform {
    sim_platform(TEST_REGION_SIZE)
}

/// Runs `f`, which must halt, and returns the decoded code
pub fn halt_code<F, R>(f: F) -> Option<TerminationCode>
where
    F: FnOnce() -> R,
{
    sim_hal::expect_halt(f).and_then(|halted| halted.code)
}

/// Returns true if the logger recorded a halt with `code`
pub fn halt_logged(logger: &MemoryLogger, code: TerminationCode) -> bool {
    let needle = format!("(code {})", code.as_u32());
    logger.contains(|entry| entry.target == "system" && entry.message.contains(&needle))
}
