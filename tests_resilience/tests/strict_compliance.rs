//! Strict Compliance Integration Tests
//!
//! Under strict compliance implicit global allocation is forbidden.

use configuration::Compliance;
use kernel_api::{Heap, TerminationCode};
use std::alloc::{GlobalAlloc, Layout};
use system::{System, SystemAllocator};
use tests_resilience::{halt_code, halt_logged, test_logger, test_params, test_platform};

#[test]
fn test_global_allocation_is_non_compliant() {
    let logger = test_logger();
    let sim = test_platform();
    let system = System::boot(
        test_params().with_compliance(Compliance::Strict),
        sim.platform,
    )
    .unwrap();
    assert!(system.configuration().is_strict());

    let layout = Layout::from_size_align(32, 8).unwrap();
    let code = halt_code(|| unsafe { SystemAllocator.alloc(layout) });
    assert_eq!(code, Some(TerminationCode::NonCompliantFunctionCalled));
    assert_eq!(
        sim.cpu.last_halt(),
        Some(TerminationCode::NonCompliantFunctionCalled)
    );
    assert!(halt_logged(logger, TerminationCode::NonCompliantFunctionCalled));

    // The explicit heap interface stays available.
    let ptr = system.get_heap().allocate(layout).unwrap();
    unsafe { system.get_heap().deallocate(ptr, layout) };
}
