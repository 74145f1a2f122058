//! Allocation-Free Boot Integration Tests
//!
//! An image installs `SystemAllocator` as its global allocator before the
//! system exists, so booting must not allocate. This binary counts global
//! allocations made by the booting thread.

use kernel_api::Heap;
use std::alloc::{GlobalAlloc, Layout, System as HostAllocator};
use std::cell::Cell;
use system::{LifecycleState, System};
use tests_resilience::{test_params, test_platform, TEST_HEAP_SIZE};

thread_local! {
    static WATCHING: Cell<bool> = const { Cell::new(false) };
    static SEEN: Cell<usize> = const { Cell::new(0) };
}

struct CountingAllocator;

impl CountingAllocator {
    fn note() {
        let _ = WATCHING.try_with(|watching| {
            if watching.get() {
                let _ = SEEN.try_with(|seen| seen.set(seen.get() + 1));
            }
        });
    }
}

unsafe impl GlobalAlloc for CountingAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        Self::note();
        HostAllocator.alloc(layout)
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        HostAllocator.dealloc(ptr, layout)
    }
}

#[global_allocator]
static ALLOCATOR: CountingAllocator = CountingAllocator;

/// Runs `f` and returns its result with the allocations it made
fn counting<F, R>(f: F) -> (R, usize)
where
    F: FnOnce() -> R,
{
    SEEN.with(|seen| seen.set(0));
    WATCHING.with(|watching| watching.set(true));
    let result = f();
    WATCHING.with(|watching| watching.set(false));
    (result, SEEN.with(Cell::get))
}

#[test]
fn test_boot_makes_no_global_allocation() {
    let sim = test_platform();
    let params = test_params();

    let (booted, allocations) = counting(move || System::boot(params, sim.platform));

    let system = booted.unwrap();
    assert_eq!(allocations, 0);
    assert_eq!(System::state(), LifecycleState::Constructed);
    assert_eq!(system.get_heap().stats().size, TEST_HEAP_SIZE);
    assert!(sim.timer.is_started());
}
