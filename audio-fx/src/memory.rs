//! Bump allocator over a fixed sample pool.
//!
//! Filters carve private delay buffers out of one statically sized array at
//! initialization time. Regions are handed out sequentially and never freed
//! individually; [`reset()`](MemoryPool::reset) rewinds the whole pool before
//! a full re-initialization. When a request does not fit, callers receive the
//! shared [`Region::Scratch`] buffer instead of an error, so the audio path
//! keeps running in a degraded state.

/// Length of the shared fallback buffer, in samples.
pub const SCRATCH_LEN: usize = 2;

/// A span of samples owned by one filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    /// `len` samples starting at `start` inside the pool.
    Pool { start: usize, len: usize },
    /// The shared 2-sample fallback buffer.
    Scratch,
}

impl Region {
    /// Number of samples in the region.
    pub const fn len(&self) -> usize {
        match *self {
            Region::Pool { len, .. } => len,
            Region::Scratch => SCRATCH_LEN,
        }
    }

    /// Whether the region is the shared fallback.
    pub const fn is_scratch(&self) -> bool {
        matches!(self, Region::Scratch)
    }
}

/// Fixed pool of `N` samples with a bump index.
pub struct MemoryPool<const N: usize> {
    memory: [i16; N],
    scratch: [i16; SCRATCH_LEN],
    /// Samples handed out since the last reset.
    allocated: usize,
}

impl<const N: usize> MemoryPool<N> {
    /// Create an empty, zeroed pool.
    pub const fn new() -> Self {
        MemoryPool {
            memory: [0; N],
            scratch: [0; SCRATCH_LEN],
            allocated: 0,
        }
    }

    /// Allocate `len` zeroed samples. Returns `None` if the pool is exhausted.
    pub fn alloc(&mut self, len: usize) -> Option<Region> {
        let end = self.allocated.checked_add(len)?;
        if end > N {
            return None;
        }
        let region = Region::Pool {
            start: self.allocated,
            len,
        };
        self.memory[self.allocated..end].fill(0);
        self.allocated = end;
        Some(region)
    }

    /// Allocate `len` samples, or hand out the shared scratch buffer if the
    /// pool cannot satisfy the request.
    pub fn alloc_or_scratch(&mut self, len: usize) -> Region {
        match self.alloc(len) {
            Some(region) => region,
            None => {
                log::warn!(
                    "memory pool exhausted: {} samples requested, {} of {} remaining; using {}-sample fallback",
                    len,
                    self.remaining(),
                    N,
                    SCRATCH_LEN
                );
                self.scratch.fill(0);
                Region::Scratch
            }
        }
    }

    /// Borrow a region's samples.
    #[inline(always)]
    pub fn slice(&self, region: Region) -> &[i16] {
        match region {
            Region::Pool { start, len } => &self.memory[start..start + len],
            Region::Scratch => &self.scratch,
        }
    }

    /// Mutably borrow a region's samples.
    #[inline(always)]
    pub fn slice_mut(&mut self, region: Region) -> &mut [i16] {
        match region {
            Region::Pool { start, len } => &mut self.memory[start..start + len],
            Region::Scratch => &mut self.scratch,
        }
    }

    /// Zero every allocated sample (and the scratch buffer) without
    /// releasing anything.
    pub fn zero_allocated(&mut self) {
        self.memory[..self.allocated].fill(0);
        self.scratch.fill(0);
    }

    /// Whether every allocated sample and the scratch buffer are zero.
    pub fn is_zeroed(&self) -> bool {
        self.memory[..self.allocated].iter().all(|&s| s == 0)
            && self.scratch.iter().all(|&s| s == 0)
    }

    /// Rewind the bump index. Previously returned regions become invalid.
    pub fn reset(&mut self) {
        self.allocated = 0;
    }

    /// Samples handed out since the last reset.
    pub fn allocated(&self) -> usize {
        self.allocated
    }

    /// Samples still available.
    pub fn remaining(&self) -> usize {
        N - self.allocated
    }

    /// Total pool size in samples.
    pub const fn capacity(&self) -> usize {
        N
    }
}

impl<const N: usize> Default for MemoryPool<N> {
    fn default() -> Self {
        Self::new()
    }
}
