//! Image entry

use crate::terminate;
use crate::System;
use configuration::Parameters;
use hal::Platform;
use kernel_api::{SystemApi, TerminationCode};

/// Boots the system, runs `program` and stops the image
///
/// - boot failure halts with [`TerminationCode::SyscallCalled`]
/// - a program status of 0 is a graceful shutdown
/// - any other status halts with [`TerminationCode::UserTermination`]
pub fn execute<F>(params: Parameters, platform: Platform, program: F) -> !
where
    F: FnOnce(&dyn SystemApi) -> i32,
{
    let system = match System::boot(params, platform) {
        Ok(system) => system,
        Err(err) => {
            log::error!(target: "system", "boot failed: {}", err);
            terminate::fatal(TerminationCode::SyscallCalled)
        }
    };
    let status = program(System::call());
    system.exit(status)
}
