/// Audio sample rate in Hz (codec configured for 48 kHz).
pub const AUDIO_SAMPLE_RATE: u32 = 48_000;

/// Sample rate as `f32`, for init-time conversions only.
pub const AUDIO_SAMPLE_RATE_F32: f32 = AUDIO_SAMPLE_RATE as f32;

/// Number of 16-bit words in the full ping-pong DMA buffer.
pub const AUDIO_BUFFER_SIZE: usize = 1024;

/// Number of samples processed per invocation (one half of the DMA buffer).
pub const AUDIO_BLOCK_SIZE: usize = AUDIO_BUFFER_SIZE / 2;

/// Q15 representation of (almost) 1.0.
pub const Q15_ONE: i32 = 32767;

/// Size of the reverb memory pool in samples.
pub const REVERB_MEM_SIZE: usize = 32_000;

/// Extra delay (in samples) added to every right-channel reverb filter.
pub const REVERB_SPREAD: u16 = 23;

/// Largest comb filter delay in samples (62.5 ms at 48 kHz).
pub const REVERB_COMB_CHUNK: u16 = 3000;

/// Largest allpass filter delay in samples (10 ms at 48 kHz).
pub const REVERB_AP_CHUNK: u16 = 480;

/// Shortest delay any reverb filter is allowed to use.
pub const REVERB_MIN_DELAY: u16 = 2;
