//! Allocation strategies for buffer storage.

/// Strategy for obtaining and resizing buffer storage.
///
/// A strategy is injected when a buffer is created and stays with the
/// buffer for its whole life, so storage is always released back to the
/// family that produced it (release happens when the returned block is
/// dropped).
pub trait Allocator {
    /// Allocates a zero-initialized block of `size` bytes.
    ///
    /// Returns `None` if the strategy cannot provide the block.
    fn allocate(&self, size: usize) -> Option<Box<[u8]>>;

    /// Resizes `block` to `new_size` bytes, preserving the common prefix.
    ///
    /// Bytes past the preserved prefix must be zero.
    ///
    /// # Errors
    ///
    /// Returns the original block unchanged if the new block cannot be
    /// obtained.
    fn reallocate(&self, block: Box<[u8]>, new_size: usize) -> Result<Box<[u8]>, Box<[u8]>> {
        let Some(mut fresh) = self.allocate(new_size) else {
            return Err(block);
        };
        let n = block.len().min(new_size);
        fresh[..n].copy_from_slice(&block[..n]);
        Ok(fresh)
    }
}

/// Allocation through the global allocator.
///
/// `allocate` does not report failure: like the standard containers,
/// running out of memory aborts the process instead of returning
/// `None`. Substitute a custom strategy to exercise failure paths or to
/// meter usage.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultAllocator;

impl Allocator for DefaultAllocator {
    fn allocate(&self, size: usize) -> Option<Box<[u8]>> {
        Some(vec![0u8; size].into_boxed_slice())
    }
}
