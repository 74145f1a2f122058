//! The irrecoverable halt path
//!
//! Every way the image can stop ends here: graceful shutdown, a failing
//! user program, a syscall before construction and a call forbidden by
//! strict compliance. The code is logged first so the halt can be
//! audited, then handed to the platform. Nothing in this module returns.

use crate::registry::SYSCALL;
use crate::System;
use hal::CpuHal;
use kernel::Kernel;
use kernel_api::TerminationCode;
use spin::Once;

/// Halt primitive usable before any kernel exists
static PLATFORM_CPU: Once<&'static dyn CpuHal> = Once::new();

/// Installs the CPU used to halt when no kernel is available
///
/// [`System::boot`] does this with its platform CPU;
/// a board can do it earlier. The first install wins. Returns true if
/// this call installed `cpu`.
pub fn install_platform_cpu(cpu: &'static dyn CpuHal) -> bool {
    let mut installed_now = false;
    PLATFORM_CPU.call_once(|| {
        installed_now = true;
        cpu
    });
    installed_now
}

/// Halts through the registered system, if there is one
pub(crate) fn fatal(code: TerminationCode) -> ! {
    let kernel = SYSCALL.get().map(System::kernel);
    halt(kernel, code)
}

/// Halts through `kernel`, else the installed platform CPU
pub(crate) fn halt(kernel: Option<&Kernel>, code: TerminationCode) -> ! {
    audit(code);
    if let Some(kernel) = kernel {
        kernel.terminate(code)
    }
    if let Some(cpu) = PLATFORM_CPU.get() {
        cpu.halt(code.as_u32())
    }
    // No halt primitive at all: panicking is the last stop, and an image
    // built with `panic = "abort"` goes no further.
    panic!(
        "system halted before a platform was installed: {} ({})",
        code,
        code.as_u32()
    )
}

fn audit(code: TerminationCode) {
    if code.is_ok() {
        log::info!(target: "system", "halting: {} (code {})", code, code.as_u32());
    } else {
        log::error!(target: "system", "halting: {} (code {})", code, code.as_u32());
    }
}
