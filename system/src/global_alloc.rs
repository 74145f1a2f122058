//! Global allocation routed to the system heap

use crate::terminate;
use crate::System;
use core::alloc::{GlobalAlloc, Layout};
use core::ptr::{self, NonNull};
use kernel_api::{Heap, TerminationCode};

/// `GlobalAlloc` adapter over the registered system's heap
///
/// An image opts in with:
///
/// ```ignore
/// #[global_allocator]
/// static ALLOCATOR: system::SystemAllocator = system::SystemAllocator;
/// ```
///
/// [`System::boot`] makes no global allocation, so the system can come
/// up with this allocator already installed.
///
/// Implicit allocation is outside the strict compliance subset: under
/// `Compliance::Strict` any call halts with
/// [`TerminationCode::NonCompliantFunctionCalled`]. Before a system is
/// constructed any call halts with [`TerminationCode::SyscallCalled`].
///
/// The halt path logs. An image using this allocator must install a
/// logger that does not allocate, or no logger at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemAllocator;

impl SystemAllocator {
    fn admit() -> &'static System {
        let Some(system) = System::instance() else {
            terminate::fatal(TerminationCode::SyscallCalled)
        };
        if system.configuration().is_strict() {
            terminate::fatal(TerminationCode::NonCompliantFunctionCalled)
        }
        system
    }
}

unsafe impl GlobalAlloc for SystemAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        Self::admit()
            .get_heap()
            .allocate(layout)
            .map_or(ptr::null_mut(), NonNull::as_ptr)
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        let heap = Self::admit().get_heap();
        if let Some(ptr) = NonNull::new(ptr) {
            heap.deallocate(ptr, layout);
        }
    }
}
