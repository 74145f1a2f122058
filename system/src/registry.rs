//! Write-once registry behind the syscall accessor
//!
//! Claiming the registry, constructing the system and storing it happen
//! in one step, so a constructed system is always the registered one.

use crate::{terminate, ConstructError, LifecycleState, System};
use configuration::Parameters;
use core::sync::atomic::{AtomicU8, Ordering};
use hal::Platform;
use spin::Once;

/// The process-wide syscall target
///
/// Written only by [`System::boot`].
pub(crate) static SYSCALL: Registry = Registry::new();

const UNINITIALIZED: u8 = 0;
const CONSTRUCTING: u8 = 1;
const CONSTRUCTED: u8 = 2;
const FAILED: u8 = 3;

/// A slot that owns one constructed system, filled at most once
///
/// The system is stored by value: booting never allocates. Reads are
/// lock-free once filled and may happen from any context.
pub struct Registry {
    state: AtomicU8,
    slot: Once<System>,
}

impl Registry {
    /// Creates an empty registry
    pub const fn new() -> Self {
        Self {
            state: AtomicU8::new(UNINITIALIZED),
            slot: Once::new(),
        }
    }

    /// Constructs a system on `platform` and stores it
    ///
    /// The registry is claimed before `platform` is touched. While a
    /// system is being constructed or is stored, any further boot is
    /// refused with [`ConstructError::AlreadyConstructed`] and leaves its
    /// platform alone. A failed construction releases the claim.
    pub fn boot(&self, params: Parameters, platform: Platform) -> Result<&System, ConstructError> {
        if self.claim().is_err() {
            log::error!(target: "system", "refusing to construct a second system instance");
            return Err(ConstructError::AlreadyConstructed);
        }

        terminate::install_platform_cpu(platform.cpu);
        log::debug!(
            target: "system",
            "lifecycle: {} -> {}",
            LifecycleState::Uninitialized,
            LifecycleState::Constructing
        );

        match System::construct(params, platform) {
            Ok(system) => {
                let system = self.slot.call_once(move || system);
                self.state.store(CONSTRUCTED, Ordering::Release);
                log::info!(
                    target: "system",
                    "lifecycle: {} -> {}",
                    LifecycleState::Constructing,
                    LifecycleState::Constructed
                );
                Ok(system)
            }
            Err(err) => {
                self.state.store(FAILED, Ordering::Release);
                log::error!(
                    target: "system",
                    "lifecycle: {} -> {}: {}",
                    LifecycleState::Constructing,
                    LifecycleState::Failed,
                    err
                );
                Err(err)
            }
        }
    }

    fn claim(&self) -> Result<u8, u8> {
        self.state
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |state| {
                matches!(state, UNINITIALIZED | FAILED).then_some(CONSTRUCTING)
            })
    }

    /// The stored system, if any
    pub fn get(&self) -> Option<&System> {
        self.slot.get()
    }

    /// Returns true once a system is stored
    pub fn is_registered(&self) -> bool {
        self.slot.is_completed()
    }

    /// Where the last boot got to
    pub fn state(&self) -> LifecycleState {
        match self.state.load(Ordering::Acquire) {
            CONSTRUCTING => LifecycleState::Constructing,
            CONSTRUCTED => LifecycleState::Constructed,
            FAILED => LifecycleState::Failed,
            _ => LifecycleState::Uninitialized,
        }
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for Registry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Registry")
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}
