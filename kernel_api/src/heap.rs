//! Heap resource contract

use core::alloc::Layout;
use core::ptr::NonNull;
use thiserror::Error;

/// Errors returned by heap allocation
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum HeapError {
    /// Zero-sized requests are not served
    #[error("Zero-sized allocation")]
    ZeroSized,

    /// No free block can satisfy the layout
    #[error("Out of memory: {size} bytes aligned to {align}")]
    OutOfMemory { size: usize, align: usize },
}

/// Occupancy snapshot of a heap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeapStats {
    /// Total bytes managed
    pub size: usize,
    /// Bytes currently handed out
    pub used: usize,
    /// Bytes still available
    pub free: usize,
}

/// The OS heap
///
/// The allocation algorithm is the kernel's business. Implementations
/// must be safe to call from any execution context at once.
pub trait Heap: Sync {
    /// Allocates a block matching `layout`
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, HeapError>;

    /// Returns a block to the heap
    ///
    /// # Safety
    ///
    /// `ptr` must come from [`Heap::allocate`] on this heap with the same
    /// `layout`, and must not be used afterwards.
    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout);

    /// Returns the current occupancy
    fn stats(&self) -> HeapStats;
}
