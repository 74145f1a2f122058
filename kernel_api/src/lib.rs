//! # Kernel API
//!
//! This crate defines the syscall interface: the capability set every
//! piece of code in the image obtains from the system accessor.
//!
//! ## Philosophy
//!
//! The system provides **mechanisms**, not policies:
//! - Heap access (allocation algorithm belongs to the kernel)
//! - Time since kernel start (monotonic, no wall clock)
//! - Termination (never returns, always carries a code)
//!
//! ## Design Goals
//!
//! 1. **Testability**: The entire API can be implemented by a simulated platform
//! 2. **No exceptions**: Recoverable failures are `Result`s, unrecoverable
//!    ones end in a [`TerminationCode`]
//! 3. **Simplicity**: Minimal surface area
//!
//! ## Non-Goals
//!
//! This is NOT:
//! - POSIX (no fork, exec, signals, files)
//! - A scheduler interface
//! - Reconfigurable after construction

pub mod error;
pub mod heap;
pub mod system;
pub mod time;

pub use error::{KernelError, TerminationCode, UnknownTerminationCode};
pub use heap::{Heap, HeapError, HeapStats};
pub use system::SystemApi;
pub use time::Instant;
