//! Relaxed Compliance Integration Tests
//!
//! Global allocation is served from the system heap.

use kernel_api::Heap;
use sim_hal::SimCpu;
use spin::Once;
use std::alloc::{GlobalAlloc, Layout};
use system::{System, SystemAllocator};
use tests_resilience::{test_params, test_platform};

fn booted() -> &'static (&'static System, &'static SimCpu) {
    static BOOTED: Once<(&'static System, &'static SimCpu)> = Once::new();
    BOOTED.call_once(|| {
        let sim = test_platform();
        let system = System::boot(test_params(), sim.platform).unwrap();
        (system, sim.cpu)
    })
}

#[test]
fn test_global_allocation_uses_system_heap() {
    let &(system, cpu) = booted();
    let layout = Layout::from_size_align(100, 4).unwrap();

    let ptr = unsafe { SystemAllocator.alloc(layout) };
    assert!(!ptr.is_null());
    assert!(system.get_heap().stats().used >= 100);

    unsafe { SystemAllocator.dealloc(ptr, layout) };
    assert_eq!(system.get_heap().stats().used, 0);
    assert_eq!(cpu.halt_count(), 0);
}

#[test]
fn test_exhaustion_returns_null() {
    booted();
    let layout = Layout::from_size_align(1024 * 1024, 8).unwrap();
    let ptr = unsafe { SystemAllocator.alloc(layout) };
    assert!(ptr.is_null());
}
