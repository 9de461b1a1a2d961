//! Fixed-capacity circular sample buffer.
//!
//! The capacity `N` is a compile-time power of two so that every index is
//! reduced with a mask instead of a division. Reads never validate their
//! offset: it is simply taken modulo `N`, so a stale or oversized offset
//! reads old data but never leaves the buffer. Callers clamp delays.

/// Circular delay line of `N` samples.
///
/// `write_index` always points at the slot the *next* [`write`](Self::write)
/// will fill, so `read_at(1)` is the most recent sample and `read_at(k + 1)`
/// is the sample written `k` steps before it.
pub struct DelayLine<const N: usize> {
    buffer: [i16; N],
    write_index: usize,
}

impl<const N: usize> DelayLine<N> {
    const MASK: usize = {
        assert!(N.is_power_of_two(), "delay line capacity must be a power of two");
        N - 1
    };

    /// Create a zeroed delay line.
    pub const fn new() -> Self {
        let _ = Self::MASK;
        DelayLine {
            buffer: [0; N],
            write_index: 0,
        }
    }

    /// Total number of samples the line can hold.
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Index of the slot the next write will fill.
    pub fn write_index(&self) -> usize {
        self.write_index
    }

    /// Store `sample` and advance the write position.
    #[inline(always)]
    pub fn write(&mut self, sample: i16) {
        self.buffer[self.write_index] = sample;
        self.write_index = (self.write_index + 1) & Self::MASK;
    }

    /// Read `buffer[(write_index - offset) mod N]`.
    #[inline(always)]
    pub fn read_at(&self, offset: usize) -> i16 {
        self.buffer[self.write_index.wrapping_sub(offset) & Self::MASK]
    }

    /// Linear interpolation between `read_at(offset)` and `read_at(offset + 1)`.
    ///
    /// `frac` is a Q15 weight (`0..=32767`) towards the older tap.
    #[inline(always)]
    pub fn read_interpolated(&self, offset: usize, frac: i16) -> i16 {
        let v0 = self.read_at(offset) as i32;
        let v1 = self.read_at(offset + 1) as i32;
        (v0 + (((v1 - v0) * frac as i32) >> 15)) as i16
    }

    /// Zero the contents and rewind the write position.
    pub fn clear(&mut self) {
        self.buffer.fill(0);
        self.write_index = 0;
    }

    /// Whether every stored sample is zero.
    pub fn is_silent(&self) -> bool {
        self.buffer.iter().all(|&s| s == 0)
    }
}

impl<const N: usize> Default for DelayLine<N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_is_silent() {
        let line = DelayLine::<16>::new();
        assert!(line.is_silent());
        assert_eq!(line.capacity(), 16);
        assert_eq!(line.write_index(), 0);
    }

    #[test]
    fn write_wraps_index() {
        let mut line = DelayLine::<4>::new();
        for i in 0..4 {
            line.write(i);
        }
        assert_eq!(line.write_index(), 0);
        line.write(99);
        assert_eq!(line.write_index(), 1);
    }

    #[test]
    fn round_trip_every_offset() {
        const N: usize = 64;
        let mut line = DelayLine::<N>::new();
        // Write more than a full capacity so the buffer has wrapped
        let total = 3 * N as i16 + 5;
        for v in 0..total {
            line.write(v);
        }
        let newest = total - 1;
        for k in 0..N {
            assert_eq!(
                line.read_at(k + 1),
                newest - k as i16,
                "offset {} should be {} steps before the newest write",
                k + 1,
                k
            );
        }
    }

    #[test]
    fn offsets_wrap_modulo_capacity() {
        let mut line = DelayLine::<8>::new();
        for v in 1..=8 {
            line.write(v * 10);
        }
        assert_eq!(line.read_at(3), line.read_at(3 + 8));
        assert_eq!(line.read_at(0), line.read_at(8));
        // read_at(0) is the oldest sample (the next one to be overwritten)
        assert_eq!(line.read_at(0), 10);
    }

    #[test]
    fn interpolation_between_taps() {
        let mut line = DelayLine::<8>::new();
        line.write(1000); // older
        line.write(2000); // newest
        // offset 1 = 2000, offset 2 = 1000
        assert_eq!(line.read_interpolated(1, 0), 2000);
        assert_eq!(line.read_interpolated(1, 16384), 1500);
        assert_eq!(line.read_interpolated(1, 32767), 1000);
    }

    #[test]
    fn clear_zeroes_everything() {
        let mut line = DelayLine::<8>::new();
        for v in 0..5 {
            line.write(v + 1);
        }
        line.clear();
        assert!(line.is_silent());
        assert_eq!(line.write_index(), 0);
    }
}
