//! NEON 4-way permutation.
//!
//! NEON registers are 128 bits wide, so one lane position of four states
//! spans two `uint64x2_t` halves. Rotation uses `vshlq_u64` with a negative
//! count for the right shift.

#![allow(unsafe_code)]
#![allow(clippy::undocumented_unsafe_blocks)]
#![allow(clippy::cast_possible_wrap)]

use core::arch::aarch64::{
    uint64x2_t, vbicq_u64, vdupq_n_s64, vdupq_n_u64, veorq_u64, vld1q_u64, vorrq_u64,
    vshlq_u64, vst1q_u64,
};

use crate::keccak::{keccak_p1600, Lanes, LANES};

#[derive(Clone, Copy)]
struct NeonLane(uint64x2_t, uint64x2_t);

#[inline(always)]
unsafe fn rotl_half(x: uint64x2_t, n: u32) -> uint64x2_t {
    let left = vshlq_u64(x, vdupq_n_s64(i64::from(n)));
    let right = vshlq_u64(x, vdupq_n_s64(i64::from(n) - 64));
    vorrq_u64(left, right)
}

impl Lanes for NeonLane {
    #[inline(always)]
    fn xor(self, rhs: Self) -> Self {
        unsafe { Self(veorq_u64(self.0, rhs.0), veorq_u64(self.1, rhs.1)) }
    }

    #[inline(always)]
    fn andnot(self, rhs: Self) -> Self {
        // vbic(a, b) = a & !b
        unsafe { Self(vbicq_u64(rhs.0, self.0), vbicq_u64(rhs.1, self.1)) }
    }

    #[inline(always)]
    fn rotl(self, n: u32) -> Self {
        unsafe { Self(rotl_half(self.0, n), rotl_half(self.1, n)) }
    }

    #[inline(always)]
    fn xor_const(self, rc: u64) -> Self {
        unsafe {
            let k = vdupq_n_u64(rc);
            Self(veorq_u64(self.0, k), veorq_u64(self.1, k))
        }
    }
}

#[target_feature(enable = "neon")]
unsafe fn f1600_x4_neon(states: &mut [[u64; LANES]; 4]) {
    let zero = vdupq_n_u64(0);
    let mut lanes = [NeonLane(zero, zero); LANES];
    for (i, lane) in lanes.iter_mut().enumerate() {
        let lo = [states[0][i], states[1][i]];
        let hi = [states[2][i], states[3][i]];
        *lane = NeonLane(vld1q_u64(lo.as_ptr()), vld1q_u64(hi.as_ptr()));
    }

    keccak_p1600(&mut lanes);

    let mut lo = [0u64; 2];
    let mut hi = [0u64; 2];
    for (i, lane) in lanes.iter().enumerate() {
        vst1q_u64(lo.as_mut_ptr(), lane.0);
        vst1q_u64(hi.as_mut_ptr(), lane.1);
        states[0][i] = lo[0];
        states[1][i] = lo[1];
        states[2][i] = hi[0];
        states[3][i] = hi[1];
    }
}

/// Permute four independent states with NEON.
///
/// # Safety
///
/// The running CPU must support NEON.
#[inline]
pub(crate) unsafe fn f1600_x4(states: &mut [[u64; LANES]; 4]) {
    f1600_x4_neon(states);
}

/// Whether NEON is usable on this CPU.
#[inline]
pub(crate) fn is_supported() -> bool {
    #[cfg(feature = "std")]
    {
        std::arch::is_aarch64_feature_detected!("neon")
    }
    #[cfg(not(feature = "std"))]
    {
        cfg!(target_feature = "neon")
    }
}
