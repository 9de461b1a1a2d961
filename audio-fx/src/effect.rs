/// Core trait for every block-processing effect.
///
/// Each effect owns its delay lines and oscillators. `process()` runs in the
/// audio interrupt and must be bounded and allocation-free; `init()` and
/// `clear()` run from the foreground between blocks.
pub trait Effect {
    /// One-time setup: build tables, derive fixed-point parameters, zero state.
    fn init(&mut self);

    /// Process one block. `input` and `output` have the same length.
    ///
    /// Samples are handled in stream order; stereo-aware effects treat the
    /// block as interleaved `L, R` pairs.
    fn process(&mut self, input: &[i16], output: &mut [i16]);

    /// Zero buffers and rewind pointers so the next block starts from silence.
    fn clear(&mut self);
}
