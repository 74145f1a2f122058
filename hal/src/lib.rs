//! # Hardware Abstraction Layer (HAL)
//!
//! This crate defines the hardware traits the kernel is brought up on.
//!
//! ## Philosophy
//!
//! **Architecture must be fully abstracted and swappable.**
//!
//! The kernel never touches a register directly. Everything it needs from
//! the machine arrives through a [`Platform`] bundle:
//!
//! - a memory region for the heap
//! - a monotonic [`TimerDevice`]
//! - a [`CpuHal`] that can halt the image with a termination code
//!
//! ## Design Principles
//!
//! 1. **No x86-specific assumptions**: Core logic must work on any architecture
//! 2. **Trait-based**: All hardware operations go through traits
//! 3. **Shared access**: Devices are read through `&self` so interrupt
//!    handlers and tasks can use them concurrently
//! 4. **Testable**: HAL can be simulated for testing (see `sim_hal`)

pub mod cpu;
pub mod memory;
pub mod platform;
pub mod timer;

pub use cpu::CpuHal;
pub use memory::{MemoryError, MemoryRegion};
pub use platform::Platform;
pub use timer::{TimerDevice, TimerError};
