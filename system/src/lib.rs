//! # System
//!
//! The single process-wide facade over the kernel.
//!
//! ## Philosophy
//!
//! **Constructed once, or not at all.**
//!
//! - A [`System`] builds its [`Configuration`] first and its [`Kernel`]
//!   from it. If either step fails, no instance exists at all: boot
//!   returns the [`ConstructError`] and nothing is registered.
//! - Construction happens inside the process-wide [`Registry`], which is
//!   claimed before the platform is touched. Being constructed and being
//!   the syscall target are the same event, and it happens once.
//! - [`System::call`] is the one entry point the rest of the image uses.
//!   Reaching it before construction is a fatal halt with
//!   [`TerminationCode::SyscallCalled`], never undefined behavior.
//! - Every halt goes through one non-returning path that logs the code
//!   and hands it to the platform.
//!
//! ## Lifecycle
//!
//! ```text
//! Uninitialized -> Constructing -> Constructed   (stored: syscall target)
//!                               \-> Failed       (boot returns the error)
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use configuration::Parameters;
//! use system::System;
//!
//! # fn platform() -> hal::Platform { unimplemented!() }
//! let system = System::boot(Parameters::default(), platform()).unwrap();
//! let started = System::call().time_ms();
//! # let _ = (system, started);
//! ```

pub mod global_alloc;
pub mod registry;
pub mod runner;
pub mod terminate;

pub use global_alloc::SystemAllocator;
pub use registry::Registry;
pub use runner::execute;
pub use terminate::install_platform_cpu;

use configuration::{ConfigError, Configuration, Parameters};
use core::fmt;
use hal::Platform;
use kernel::Kernel;
use kernel_api::{Heap, KernelError, SystemApi, TerminationCode};
use thiserror::Error;

/// Why a system instance did not reach the constructed state
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstructError {
    /// Startup parameters were rejected
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// The kernel could not be brought up
    #[error("Kernel construction failed: {0}")]
    Kernel(#[from] KernelError),

    /// Another instance already owns the syscall interface
    #[error("A system instance is already constructed")]
    AlreadyConstructed,
}

/// Lifecycle of the process-wide system
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    /// Nothing built yet
    Uninitialized,
    /// Configuration and kernel are being built
    Constructing,
    /// Every construction step succeeded
    Constructed,
    /// A construction step failed
    Failed,
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LifecycleState::Uninitialized => write!(f, "uninitialized"),
            LifecycleState::Constructing => write!(f, "constructing"),
            LifecycleState::Constructed => write!(f, "constructed"),
            LifecycleState::Failed => write!(f, "failed"),
        }
    }
}

/// The operating system
///
/// A value of this type only exists fully constructed, and only inside a
/// [`Registry`]. The configuration comes first: the kernel is built
/// from it.
pub struct System {
    config: Configuration,
    kernel: Kernel,
}

impl System {
    pub(crate) fn construct(params: Parameters, platform: Platform) -> Result<Self, ConstructError> {
        let config = Configuration::new(params)?;
        log::debug!(target: "system", "configuration accepted: {:?}", config);
        let kernel = Kernel::new(&config, platform)?;
        Ok(Self { config, kernel })
    }

    /// Constructs the process-wide instance on `platform`
    ///
    /// This is the only way to obtain a system: on success every later
    /// [`System::call`] returns the instance handed back here. While one
    /// is constructed, further boots are refused with
    /// [`ConstructError::AlreadyConstructed`] without touching their
    /// platform. Booting makes no global allocation.
    pub fn boot(params: Parameters, platform: Platform) -> Result<&'static System, ConstructError> {
        let system = registry::SYSCALL.boot(params, platform)?;
        log::info!(target: "system", "syscall interface registered");
        Ok(system)
    }

    /// Returns the syscall interface
    ///
    /// Halts the image with [`TerminationCode::SyscallCalled`] if no
    /// system has been constructed.
    pub fn call() -> &'static dyn SystemApi {
        match Self::instance() {
            Some(system) => system,
            None => terminate::fatal(TerminationCode::SyscallCalled),
        }
    }

    /// Returns the syscall interface if one is constructed
    pub fn try_call() -> Option<&'static dyn SystemApi> {
        Self::instance().map(|system| system as &'static dyn SystemApi)
    }

    /// Returns the process-wide instance
    pub fn instance() -> Option<&'static System> {
        registry::SYSCALL.get()
    }

    /// Where the process-wide boot got to
    pub fn state() -> LifecycleState {
        registry::SYSCALL.state()
    }

    /// Returns true if configuration and kernel were both built
    pub fn is_constructed(&self) -> bool {
        true
    }

    /// The configuration the kernel was built from
    pub fn configuration(&self) -> &Configuration {
        &self.config
    }

    /// Returns the kernel
    pub fn kernel(&self) -> &Kernel {
        &self.kernel
    }

    /// Returns the operating system heap
    pub fn get_heap(&self) -> &dyn Heap {
        self.kernel.heap()
    }

    /// Running time since kernel start in milliseconds
    pub fn get_time_ms(&self) -> u64 {
        self.kernel.time_ms()
    }

    /// Running time since kernel start in nanoseconds
    pub fn get_time_ns(&self) -> u64 {
        self.kernel.time_ns()
    }

    /// Stops the image gracefully
    pub fn terminate(&self) -> ! {
        terminate::halt(Some(&self.kernel), TerminationCode::Ok)
    }

    /// Stops the image with a program exit status
    ///
    /// Status 0 is a graceful shutdown; anything else is
    /// [`TerminationCode::UserTermination`].
    pub fn exit(&self, status: i32) -> ! {
        if status == 0 {
            self.terminate()
        }
        log::warn!(target: "system", "program exited with status {}", status);
        terminate::halt(Some(&self.kernel), TerminationCode::UserTermination)
    }
}

impl SystemApi for System {
    fn is_constructed(&self) -> bool {
        System::is_constructed(self)
    }

    fn heap(&self) -> &dyn Heap {
        self.get_heap()
    }

    fn time_ms(&self) -> u64 {
        self.get_time_ms()
    }

    fn time_ns(&self) -> u64 {
        self.get_time_ns()
    }

    fn terminate(&self) -> ! {
        System::terminate(self)
    }
}

impl fmt::Debug for System {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("System")
            .field("config", &self.config)
            .field("kernel", &self.kernel)
            .finish()
    }
}
