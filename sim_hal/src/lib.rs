//! # Simulated Platform
//!
//! Host implementations of the HAL traits.
//!
//! ## Purpose
//!
//! The simulated platform lets the whole system come up under `cargo test`:
//! - Deterministic time ([`SimTimerDevice`]) or real host time ([`HostTimerDevice`])
//! - A CPU whose halt is observable ([`SimCpu`])
//! - Heap memory leaked from the host allocator
//!
//! ## Philosophy
//!
//! **Testability is a first-class design constraint.**
//!
//! A halt on hardware is the absence of any further instruction. On the
//! host that is modelled as an unwind carrying a [`Halted`] payload: the
//! code after a halt never runs, and the test can still inspect the code.

pub mod cpu;
pub mod host_timer;
pub mod test_utils;
pub mod timer;

pub use cpu::{Halted, SimCpu};
pub use host_timer::HostTimerDevice;
pub use test_utils::{expect_halt, host_platform, leak_region, sim_platform, SimPlatform};
pub use timer::SimTimerDevice;
