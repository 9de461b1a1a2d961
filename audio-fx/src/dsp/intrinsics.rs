//! Saturating primitives behind the fixed-point helpers.
//!
//! Cortex-M4/M7 and other cores with the DSP extension get the single-cycle
//! `SSAT`/`QADD`/`SMMUL` instructions through inline assembly. Everywhere
//! else, host tests included, a plain Rust fallback gives bit-identical
//! results.

/// Arithmetic right shift by `RSHIFT`, then clamp to a signed `BITS`-bit range.
///
/// One `SSAT` on DSP targets. Both parameters are immediates in the
/// instruction encoding, hence const generics. `RSHIFT` must be at least 1.
#[inline(always)]
pub fn signed_saturate_rshift<const BITS: u32, const RSHIFT: u32>(val: i32) -> i32 {
    #[cfg(all(target_arch = "arm", target_feature = "dsp"))]
    {
        let out: i32;
        unsafe {
            core::arch::asm!(
                "ssat {out}, #{bits}, {val}, asr #{rshift}",
                out = out(reg) out,
                val = in(reg) val,
                bits = const BITS,
                rshift = const RSHIFT,
            );
        }
        out
    }
    #[cfg(not(all(target_arch = "arm", target_feature = "dsp")))]
    {
        let limit = 1i32 << (BITS - 1);
        (val >> RSHIFT).clamp(-limit, limit - 1)
    }
}

/// Clamp an accumulator into the sample range `-32768..=32767` (`SSAT #16`).
#[inline(always)]
pub fn saturate16(val: i32) -> i16 {
    #[cfg(all(target_arch = "arm", target_feature = "dsp"))]
    {
        let out: i32;
        unsafe {
            core::arch::asm!(
                "ssat {out}, #16, {val}",
                out = out(reg) out,
                val = in(reg) val,
            );
        }
        out as i16
    }
    #[cfg(not(all(target_arch = "arm", target_feature = "dsp")))]
    {
        val.clamp(i16::MIN as i32, i16::MAX as i32) as i16
    }
}

/// Saturating 32-bit addition. Maps to ARM `QADD`.
#[inline(always)]
pub fn qadd(a: i32, b: i32) -> i32 {
    #[cfg(all(target_arch = "arm", target_feature = "dsp"))]
    {
        let out: i32;
        unsafe {
            core::arch::asm!(
                "qadd {out}, {a}, {b}",
                out = out(reg) out,
                a = in(reg) a,
                b = in(reg) b,
            );
        }
        out
    }
    #[cfg(not(all(target_arch = "arm", target_feature = "dsp")))]
    {
        a.saturating_add(b)
    }
}

/// Saturating doubling: `saturate(2 * a)`. Maps to ARM `QADD` of `a` with itself.
#[inline(always)]
pub fn qdouble(a: i32) -> i32 {
    #[cfg(all(target_arch = "arm", target_feature = "dsp"))]
    {
        let out: i32;
        unsafe {
            core::arch::asm!(
                "qadd {out}, {a}, {a}",
                out = out(reg) out,
                a = in(reg) a,
            );
        }
        out
    }
    #[cfg(not(all(target_arch = "arm", target_feature = "dsp")))]
    {
        a.saturating_add(a)
    }
}

/// High word of a 32 × 32 multiply, `(a * b) >> 32` (`SMMUL`).
#[inline(always)]
pub fn mul_32x32_rshift32(a: i32, b: i32) -> i32 {
    #[cfg(all(target_arch = "arm", target_feature = "dsp"))]
    {
        let out: i32;
        unsafe {
            core::arch::asm!(
                "smmul {out}, {a}, {b}",
                out = out(reg) out,
                a = in(reg) a,
                b = in(reg) b,
            );
        }
        out
    }
    #[cfg(not(all(target_arch = "arm", target_feature = "dsp")))]
    {
        ((a as i64 * b as i64) >> 32) as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saturate16_clamps_both_ends() {
        assert_eq!(saturate16(40_000), 32767);
        assert_eq!(saturate16(-40_000), -32768);
        assert_eq!(saturate16(1234), 1234);
        assert_eq!(saturate16(i32::MAX), 32767);
        assert_eq!(saturate16(i32::MIN), -32768);
    }

    #[test]
    fn signed_saturate_rshift_shifts_then_clamps() {
        // 4-way comb sum attenuation: >> 2 then 16-bit clamp
        assert_eq!(signed_saturate_rshift::<16, 2>(4 * 1000), 1000);
        assert_eq!(signed_saturate_rshift::<16, 2>(4 * 40_000), 32767);
        assert_eq!(signed_saturate_rshift::<16, 2>(-4 * 40_000), -32768);
    }

    #[test]
    fn qadd_saturates() {
        assert_eq!(qadd(i32::MAX, 1), i32::MAX);
        assert_eq!(qadd(i32::MIN, -1), i32::MIN);
        assert_eq!(qadd(100, -50), 50);
    }

    #[test]
    fn qdouble_saturates() {
        assert_eq!(qdouble(0x4000_0000), i32::MAX);
        assert_eq!(qdouble(-0x4000_0001), i32::MIN);
        assert_eq!(qdouble(21), 42);
    }

    #[test]
    fn mul_32x32_rshift32_basic() {
        // 0.5 * 0.5 in Q31 → 0.25 in Q30 (upper word)
        assert_eq!(mul_32x32_rshift32(0x4000_0000, 0x4000_0000), 0x1000_0000);
        assert_eq!(mul_32x32_rshift32(0, 12345), 0);
        assert_eq!(mul_32x32_rshift32(-0x4000_0000, 0x4000_0000), -0x1000_0000);
    }
}
