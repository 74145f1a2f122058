//! Kernel heap
//!
//! A first-fit linked-list allocator over the configured region, behind a
//! spin lock. Tasks and interrupt handlers may allocate concurrently.

use core::alloc::Layout;
use core::ptr::NonNull;
use hal::MemoryRegion;
use kernel_api::{Heap, HeapError, HeapStats};
use linked_list_allocator::LockedHeap;

/// The heap owned by the kernel
pub struct KernelHeap {
    inner: LockedHeap,
    region: MemoryRegion,
}

impl KernelHeap {
    /// Takes the first `size` bytes of `memory` as the heap
    ///
    /// The caller has already checked that `size <= memory.len()`.
    pub(crate) fn new(memory: &'static mut [u8], size: usize) -> Self {
        let size = size.min(memory.len());
        let bottom = memory.as_mut_ptr();
        // SAFETY: `memory` is 'static and moved in here, so no other
        // reference to these bytes exists; from now on only the allocator
        // touches them.
        let inner = unsafe { LockedHeap::new(bottom, size) };
        Self {
            inner,
            region: MemoryRegion::new(bottom as usize, size),
        }
    }

    /// Bounds of the heap region
    pub fn region(&self) -> MemoryRegion {
        self.region
    }

    /// Returns true if `ptr` points into the heap region
    pub fn owns(&self, ptr: NonNull<u8>) -> bool {
        self.region.contains(ptr.as_ptr() as usize)
    }
}

impl Heap for KernelHeap {
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, HeapError> {
        if layout.size() == 0 {
            return Err(HeapError::ZeroSized);
        }
        self.inner
            .lock()
            .allocate_first_fit(layout)
            .map_err(|()| HeapError::OutOfMemory {
                size: layout.size(),
                align: layout.align(),
            })
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        debug_assert!(self.owns(ptr));
        self.inner.lock().deallocate(ptr, layout);
    }

    fn stats(&self) -> HeapStats {
        let heap = self.inner.lock();
        HeapStats {
            size: heap.size(),
            used: heap.used(),
            free: heap.free(),
        }
    }
}

impl core::fmt::Debug for KernelHeap {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("KernelHeap")
            .field("region", &self.region)
            .field("stats", &self.stats())
            .finish()
    }
}
