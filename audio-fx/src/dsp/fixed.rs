//! Q15/Q31 fixed-point arithmetic.
//!
//! Audio-path helpers saturate into the 16-bit sample range before storage;
//! nothing here ever wraps. The float conversions are meant for
//! initialization and configuration code only.

use super::intrinsics::{mul_32x32_rshift32, qadd, qdouble, saturate16};

/// Saturating multiply of two Q15 values.
///
/// Computes `(a * b) >> 15`, saturated to `i16` range.
#[inline(always)]
pub fn saturating_multiply_q15(a: i16, b: i16) -> i16 {
    saturate16((a as i32 * b as i32) >> 15)
}

/// Saturating addition of two Q15 (`i16`) values.
#[inline(always)]
pub fn saturating_add_q15(a: i16, b: i16) -> i16 {
    saturate16(a as i32 + b as i32)
}

/// Saturating addition of two Q31 values.
#[inline(always)]
pub fn saturating_add_q31(a: i32, b: i32) -> i32 {
    qadd(a, b)
}

/// Saturating multiply of two Q31 values: `(a * b) >> 31`.
///
/// The only overflowing case, `-1.0 * -1.0`, clamps to `i32::MAX`.
#[inline(always)]
pub fn saturating_multiply_q31(a: i32, b: i32) -> i32 {
    qdouble(mul_32x32_rshift32(a, b))
}

/// Scale a sample by a Q15 gain held in an `i32`: `(sample * gain) >> 15`, saturated.
#[inline(always)]
pub fn apply_gain_q15(sample: i16, gain: i32) -> i16 {
    saturate16((sample as i32 * gain) >> 15)
}

/// Convert a float in `[-1.0, 1.0)` to Q15, clamping at the ends.
///
/// `1.0` and above map to `32767`, `-1.0` and below to `-32768`.
pub fn float_to_q15(x: f32) -> i16 {
    if x >= 1.0 {
        32767
    } else if x <= -1.0 {
        -32768
    } else {
        (x * 32768.0) as i16
    }
}

/// Convert a Q15 value back to float.
pub fn q15_to_float(x: i16) -> f32 {
    x as f32 / 32768.0
}

/// Multiply every sample in `block` by `gain` (Q15 fixed-point, in an `i32`).
///
/// Each sample is computed as `saturate16((sample * gain) >> 15)`.
pub fn block_multiply(block: &mut [i16], gain: i32) {
    for sample in block.iter_mut() {
        *sample = apply_gain_q15(*sample, gain);
    }
}
