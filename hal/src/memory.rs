//! Memory region abstraction

use thiserror::Error;

/// Errors that can occur when carving memory out of a region
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MemoryError {
    /// The region cannot hold the requested number of bytes
    #[error("Region too small: requested {requested} bytes, {available} available")]
    RegionTooSmall { requested: usize, available: usize },

    /// The region has no backing memory
    #[error("Empty memory region")]
    Empty,
}

/// Bounds of a contiguous memory region
///
/// This is descriptive only: it never owns the bytes. The kernel uses it
/// to report where its heap lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryRegion {
    /// First byte address
    pub start: usize,
    /// Length in bytes
    pub size: usize,
}

impl MemoryRegion {
    /// Creates a region descriptor
    pub const fn new(start: usize, size: usize) -> Self {
        Self { start, size }
    }

    /// Describes an existing byte slice
    pub fn of(bytes: &[u8]) -> Self {
        Self::new(bytes.as_ptr() as usize, bytes.len())
    }

    /// One past the last byte address
    pub const fn end(&self) -> usize {
        self.start + self.size
    }

    /// Returns true if `address` lies inside the region
    pub const fn contains(&self, address: usize) -> bool {
        address >= self.start && address < self.end()
    }

    /// Checks that `requested` bytes fit in this region
    pub fn reserve(&self, requested: usize) -> Result<MemoryRegion, MemoryError> {
        if self.size == 0 {
            return Err(MemoryError::Empty);
        }
        if requested > self.size {
            return Err(MemoryError::RegionTooSmall {
                requested,
                available: self.size,
            });
        }
        Ok(MemoryRegion::new(self.start, requested))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_bounds() {
        let region = MemoryRegion::new(0x1000, 0x100);
        assert_eq!(region.end(), 0x1100);
        assert!(region.contains(0x1000));
        assert!(region.contains(0x10ff));
        assert!(!region.contains(0x1100));
    }

    #[test]
    fn test_reserve_fits() {
        let region = MemoryRegion::new(0x1000, 0x100);
        assert_eq!(region.reserve(0x80), Ok(MemoryRegion::new(0x1000, 0x80)));
        assert_eq!(region.reserve(0x100), Ok(region));
    }

    #[test]
    fn test_reserve_too_large() {
        let region = MemoryRegion::new(0x1000, 0x100);
        assert_eq!(
            region.reserve(0x101),
            Err(MemoryError::RegionTooSmall {
                requested: 0x101,
                available: 0x100
            })
        );
    }

    #[test]
    fn test_reserve_from_empty_region() {
        let region = MemoryRegion::of(&[]);
        assert_eq!(region.reserve(0), Err(MemoryError::Empty));
    }
}
