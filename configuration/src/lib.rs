//! # Configuration
//!
//! Build-time parameters the kernel is brought up with.
//!
//! ## Philosophy
//!
//! - **Immutable**: A [`Configuration`] has no setters; it is frozen the
//!   moment it exists
//! - **Validated once**: Invalid parameters never produce a value, so
//!   nothing downstream re-checks them
//! - **Baked in**: Defaults are compiled-in constants; a JSON descriptor
//!   may override them before construction, never after
//!
//! ## Example
//!
//! ```
//! use configuration::{Configuration, Parameters};
//!
//! let config = Configuration::new(Parameters::default()).unwrap();
//! assert_eq!(config.heap_size(), configuration::DEFAULT_HEAP_SIZE);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Smallest heap the kernel will manage
pub const MIN_HEAP_SIZE: usize = 1024;

/// Default heap size in bytes
pub const DEFAULT_HEAP_SIZE: usize = 64 * 1024;

/// Default CPU core clock
pub const DEFAULT_CPU_CLOCK_HZ: u64 = 100_000_000;

/// Default timer input clock
pub const DEFAULT_SOURCE_CLOCK_HZ: u64 = 1_000_000;

/// Fastest timer input clock; one tick must not be shorter than 1 ns
pub const MAX_SOURCE_CLOCK_HZ: u64 = 1_000_000_000;

/// Errors that reject a parameter set
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The heap is below [`MIN_HEAP_SIZE`]
    #[error("Heap too small: {size} bytes, minimum is {min}")]
    HeapTooSmall { size: usize, min: usize },

    /// The timer input clock is zero or above [`MAX_SOURCE_CLOCK_HZ`]
    #[error("Invalid source clock: {0} Hz")]
    InvalidSourceClock(u64),

    /// The CPU clock is zero or slower than the timer input clock
    #[error("Invalid CPU clock: {cpu_hz} Hz with a {source_hz} Hz source clock")]
    InvalidCpuClock { cpu_hz: u64, source_hz: u64 },

    /// The descriptor could not be parsed
    #[error("Malformed descriptor: {0}")]
    Malformed(String),
}

/// How strictly the image follows its safety-compliance rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Compliance {
    /// Convenience functions (such as global allocation) are allowed
    #[default]
    Relaxed,
    /// Functions outside the compliance subset halt the image
    Strict,
}

/// Raw, unvalidated startup parameters
///
/// This is what a board support package or descriptor file supplies.
/// Only [`Configuration::new`] turns it into something the kernel accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Parameters {
    /// Heap size in bytes
    pub heap_size: usize,
    /// CPU core clock in Hz
    pub cpu_clock_hz: u64,
    /// Timer input clock in Hz
    pub source_clock_hz: u64,
    /// Compliance mode
    pub compliance: Compliance,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            heap_size: DEFAULT_HEAP_SIZE,
            cpu_clock_hz: DEFAULT_CPU_CLOCK_HZ,
            source_clock_hz: DEFAULT_SOURCE_CLOCK_HZ,
            compliance: Compliance::Relaxed,
        }
    }
}

impl Parameters {
    /// Parses a JSON descriptor; missing fields keep their defaults
    pub fn from_json(descriptor: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(descriptor).map_err(|e| ConfigError::Malformed(e.to_string()))
    }

    /// Sets the heap size
    pub fn with_heap_size(mut self, heap_size: usize) -> Self {
        self.heap_size = heap_size;
        self
    }

    /// Sets the CPU clock
    pub fn with_cpu_clock_hz(mut self, hz: u64) -> Self {
        self.cpu_clock_hz = hz;
        self
    }

    /// Sets the timer input clock
    pub fn with_source_clock_hz(mut self, hz: u64) -> Self {
        self.source_clock_hz = hz;
        self
    }

    /// Sets the compliance mode
    pub fn with_compliance(mut self, compliance: Compliance) -> Self {
        self.compliance = compliance;
        self
    }
}

/// Validated, read-only startup configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    params: Parameters,
}

impl Configuration {
    /// Validates `params` and freezes them
    pub fn new(params: Parameters) -> Result<Self, ConfigError> {
        if params.heap_size < MIN_HEAP_SIZE {
            return Err(ConfigError::HeapTooSmall {
                size: params.heap_size,
                min: MIN_HEAP_SIZE,
            });
        }
        if params.source_clock_hz == 0 || params.source_clock_hz > MAX_SOURCE_CLOCK_HZ {
            return Err(ConfigError::InvalidSourceClock(params.source_clock_hz));
        }
        if params.cpu_clock_hz < params.source_clock_hz {
            return Err(ConfigError::InvalidCpuClock {
                cpu_hz: params.cpu_clock_hz,
                source_hz: params.source_clock_hz,
            });
        }
        Ok(Self { params })
    }

    /// Heap size in bytes
    pub fn heap_size(&self) -> usize {
        self.params.heap_size
    }

    /// CPU core clock in Hz
    pub fn cpu_clock_hz(&self) -> u64 {
        self.params.cpu_clock_hz
    }

    /// Timer input clock in Hz
    pub fn source_clock_hz(&self) -> u64 {
        self.params.source_clock_hz
    }

    /// Whole CPU cycles per timer input cycle
    ///
    /// Never 0: validation keeps the CPU clock at or above the source clock.
    pub fn timer_prescale(&self) -> u64 {
        self.params.cpu_clock_hz / self.params.source_clock_hz
    }

    /// Compliance mode
    pub fn compliance(&self) -> Compliance {
        self.params.compliance
    }

    /// Returns true under [`Compliance::Strict`]
    pub fn is_strict(&self) -> bool {
        self.params.compliance == Compliance::Strict
    }

    /// The parameters this configuration was built from
    pub fn parameters(&self) -> &Parameters {
        &self.params
    }
}
