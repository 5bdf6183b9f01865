//! AVX2 4-way permutation.
//!
//! Each `__m256i` holds the same lane position of four states, so the shared
//! round function runs once over 25 vectors. AVX2 has no 64-bit rotate; it
//! is built from a left and a right shift.
//!
//! # Safety
//!
//! [`f1600_x4`] requires AVX2. Callers go through `Backend`, which checks
//! availability before dispatching here.

#![allow(unsafe_code)]
#![allow(clippy::undocumented_unsafe_blocks)]
#![allow(clippy::cast_possible_wrap)]

use core::arch::x86_64::{
    __m256i, _mm256_andnot_si256, _mm256_or_si256, _mm256_set1_epi64x, _mm256_set_epi64x,
    _mm256_setzero_si256, _mm256_sll_epi64, _mm256_srl_epi64, _mm256_storeu_si256,
    _mm256_xor_si256, _mm_cvtsi32_si128,
};

use crate::keccak::{keccak_p1600, Lanes, LANES};

#[derive(Clone, Copy)]
struct Avx2Lane(__m256i);

impl Lanes for Avx2Lane {
    #[inline(always)]
    fn xor(self, rhs: Self) -> Self {
        Self(unsafe { _mm256_xor_si256(self.0, rhs.0) })
    }

    #[inline(always)]
    fn andnot(self, rhs: Self) -> Self {
        Self(unsafe { _mm256_andnot_si256(self.0, rhs.0) })
    }

    #[inline(always)]
    fn rotl(self, n: u32) -> Self {
        unsafe {
            let left = _mm256_sll_epi64(self.0, _mm_cvtsi32_si128(n as i32));
            let right = _mm256_srl_epi64(self.0, _mm_cvtsi32_si128(64 - n as i32));
            Self(_mm256_or_si256(left, right))
        }
    }

    #[inline(always)]
    fn xor_const(self, rc: u64) -> Self {
        Self(unsafe { _mm256_xor_si256(self.0, _mm256_set1_epi64x(rc as i64)) })
    }
}

#[target_feature(enable = "avx2")]
unsafe fn f1600_x4_avx2(states: &mut [[u64; LANES]; 4]) {
    let mut lanes = [Avx2Lane(_mm256_setzero_si256()); LANES];
    for (i, lane) in lanes.iter_mut().enumerate() {
        lane.0 = _mm256_set_epi64x(
            states[3][i] as i64,
            states[2][i] as i64,
            states[1][i] as i64,
            states[0][i] as i64,
        );
    }

    keccak_p1600(&mut lanes);

    let mut out = [0u64; 4];
    for (i, lane) in lanes.iter().enumerate() {
        _mm256_storeu_si256(out.as_mut_ptr().cast::<__m256i>(), lane.0);
        states[0][i] = out[0];
        states[1][i] = out[1];
        states[2][i] = out[2];
        states[3][i] = out[3];
    }
}

/// Permute four independent states with AVX2.
///
/// # Safety
///
/// The running CPU must support AVX2.
#[inline]
pub(crate) unsafe fn f1600_x4(states: &mut [[u64; LANES]; 4]) {
    f1600_x4_avx2(states);
}

/// Whether AVX2 is usable on this CPU.
#[inline]
pub(crate) fn is_supported() -> bool {
    #[cfg(feature = "std")]
    {
        std::arch::is_x86_feature_detected!("avx2")
    }
    #[cfg(not(feature = "std"))]
    {
        cfg!(target_feature = "avx2")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::portable;

    #[test]
    fn test_avx2_matches_portable() {
        if !is_supported() {
            return;
        }

        for seed in 0..16u64 {
            let mut a: [[u64; LANES]; 4] = core::array::from_fn(|s| {
                core::array::from_fn(|i| {
                    (seed * 4 + s as u64 + 1).wrapping_mul(0xD6E8_FEB8_6659_FD93)
                        ^ (i as u64).rotate_left(29)
                })
            });
            let mut b = a;
            unsafe { f1600_x4(&mut a) };
            portable::f1600_x4_serial(&mut b);
            assert_eq!(a, b, "seed {seed}");
        }
    }
}
