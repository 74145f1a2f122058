//! Kernel error and termination types

use core::fmt;
use hal::TimerError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while the kernel is being constructed
///
/// Once a kernel exists none of these can happen any more.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum KernelError {
    /// The platform memory region cannot hold the configured heap
    #[error("Heap region too small: requested {requested} bytes, {available} available")]
    RegionTooSmall { requested: usize, available: usize },

    /// The timer refused to start
    #[error("Failed to start clock: {0}")]
    ClockStart(#[from] TimerError),
}

/// Reason the image stopped executing
///
/// The numeric values are stable: they are what the platform halt
/// primitive receives and what post-mortem tooling decodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u32)]
pub enum TerminationCode {
    /// Graceful shutdown
    Ok = 0,
    /// The user program asked to stop with a failure status
    UserTermination = 1,
    /// The syscall interface was used before the system was constructed
    SyscallCalled = 2,
    /// A function forbidden under strict compliance mode was called
    NonCompliantFunctionCalled = 3,
}

impl TerminationCode {
    /// All codes, in numeric order
    pub const ALL: [TerminationCode; 4] = [
        TerminationCode::Ok,
        TerminationCode::UserTermination,
        TerminationCode::SyscallCalled,
        TerminationCode::NonCompliantFunctionCalled,
    ];

    /// Returns the numeric code handed to the platform
    pub const fn as_u32(self) -> u32 {
        self as u32
    }

    /// Returns true for the graceful shutdown code
    pub const fn is_ok(self) -> bool {
        matches!(self, TerminationCode::Ok)
    }
}

/// A numeric code that does not name a [`TerminationCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Unknown termination code: {0}")]
pub struct UnknownTerminationCode(pub u32);

impl TryFrom<u32> for TerminationCode {
    type Error = UnknownTerminationCode;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        TerminationCode::ALL
            .into_iter()
            .find(|code| code.as_u32() == value)
            .ok_or(UnknownTerminationCode(value))
    }
}

impl fmt::Display for TerminationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TerminationCode::Ok => write!(f, "ok"),
            TerminationCode::UserTermination => write!(f, "user termination"),
            TerminationCode::SyscallCalled => write!(f, "syscall called before construction"),
            TerminationCode::NonCompliantFunctionCalled => {
                write!(f, "non-compliant function called")
            }
        }
    }
}
