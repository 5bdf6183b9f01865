//! Power2Round, Decompose, MakeHint and UseHint.
//!
//! Scalar functions take standard representatives in `[0, q)` unless noted.

use crate::params::{D, GAMMA2_32, GAMMA2_88};
use crate::poly::{Poly, N};
use crate::polyvec::PolyVec;
use crate::reduce::Q;

/// Split `a` into `(a1, a0)` with `a = a1·2^13 + a0` and
/// `-2^12 < a0 <= 2^12`.
#[inline]
pub fn power2round(a: i32) -> (i32, i32) {
    let a1 = (a + (1 << (D - 1)) - 1) >> D;
    (a1, a - (a1 << D))
}

/// Split `a` into high bits `a1` and centered low bits `a0` with
/// `a ≡ a1·2γ2 + a0 (mod q)`.
///
/// In the single wrap-around case `a > q - 1 - γ2` the high part is 0 and
/// `a0 = a - q`.
#[inline]
pub fn decompose(a: i32, gamma2: i32) -> (i32, i32) {
    let mut a1 = (a + 127) >> 7;
    if gamma2 == GAMMA2_32 {
        a1 = (a1 * 1025 + (1 << 21)) >> 22;
        a1 &= 15;
    } else {
        debug_assert_eq!(gamma2, GAMMA2_88);
        a1 = (a1 * 11_275 + (1 << 23)) >> 24;
        a1 ^= ((43 - a1) >> 31) & a1;
    }
    let mut a0 = a - a1 * 2 * gamma2;
    a0 -= (((Q - 1) / 2 - a0) >> 31) & Q;
    (a1, a0)
}

/// Whether adding the low part `a0` to high part `a1` carries into the
/// high bits.
#[inline]
pub fn make_hint(a0: i32, a1: i32, gamma2: i32) -> bool {
    a0 > gamma2 || a0 < -gamma2 || (a0 == -gamma2 && a1 != 0)
}

/// Recover the high bits of `a` corrected by `hint`.
#[inline]
pub fn use_hint(a: i32, hint: bool, gamma2: i32) -> i32 {
    let (a1, a0) = decompose(a, gamma2);
    if !hint {
        return a1;
    }
    if gamma2 == GAMMA2_32 {
        if a0 > 0 {
            (a1 + 1) & 15
        } else {
            (a1 - 1) & 15
        }
    } else if a0 > 0 {
        if a1 == 43 {
            0
        } else {
            a1 + 1
        }
    } else if a1 == 0 {
        43
    } else {
        a1 - 1
    }
}

/// Entrywise [`power2round`], returning `(t1, t0)`.
pub fn power2round_vec(t: &PolyVec) -> (PolyVec, PolyVec) {
    let mut t1 = t.clone();
    let mut t0 = t.clone();
    for (p1, p0) in t1.polys.iter_mut().zip(&mut t0.polys) {
        for j in 0..N {
            let (hi, lo) = power2round(p1.coeffs[j]);
            p1.coeffs[j] = hi;
            p0.coeffs[j] = lo;
        }
    }
    (t1, t0)
}

/// Entrywise [`decompose`], returning `(w1, w0)`.
pub fn decompose_vec(w: &PolyVec, gamma2: i32) -> (PolyVec, PolyVec) {
    let mut w1 = w.clone();
    let mut w0 = w.clone();
    for (p1, p0) in w1.polys.iter_mut().zip(&mut w0.polys) {
        for j in 0..N {
            let (hi, lo) = decompose(p1.coeffs[j], gamma2);
            p1.coeffs[j] = hi;
            p0.coeffs[j] = lo;
        }
    }
    (w1, w0)
}

/// Hint polynomials (coefficients 0/1) for `(w0, w1)` and their total
/// weight.
pub fn make_hint_vec(w0: &PolyVec, w1: &PolyVec, gamma2: i32) -> (PolyVec, usize) {
    let mut h = PolyVec::zero(w0.polys.len());
    let mut count = 0;
    for ((hp, p0), p1) in h.polys.iter_mut().zip(&w0.polys).zip(&w1.polys) {
        for j in 0..N {
            let bit = make_hint(p0.coeffs[j], p1.coeffs[j], gamma2);
            hp.coeffs[j] = i32::from(bit);
            count += usize::from(bit);
        }
    }
    (h, count)
}

/// Entrywise [`use_hint`] on a polynomial.
pub fn use_hint_poly(w: &Poly, h: &Poly, gamma2: i32) -> Poly {
    let mut r = Poly::zero();
    for j in 0..N {
        r.coeffs[j] = use_hint(w.coeffs[j], h.coeffs[j] != 0, gamma2);
    }
    r
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reduce::freeze;

    fn sample_points() -> impl Iterator<Item = i32> {
        (0..Q).step_by(1237).chain([0, 1, Q - 1, Q - 2, GAMMA2_32, GAMMA2_88])
    }

    #[test]
    fn test_power2round() {
        for a in sample_points() {
            let (a1, a0) = power2round(a);
            assert_eq!(a1 * (1 << D) + a0, a);
            assert!(a0 > -(1 << (D - 1)) && a0 <= 1 << (D - 1), "a={a}");
            assert!((0..1024).contains(&a1));
        }
    }

    #[test]
    fn test_decompose_reconstructs() {
        for gamma2 in [GAMMA2_32, GAMMA2_88] {
            let m = (Q - 1) / (2 * gamma2);
            for a in sample_points() {
                let (a1, a0) = decompose(a, gamma2);
                assert!((0..m).contains(&a1), "gamma2={gamma2} a={a} a1={a1}");
                assert!(a0.abs() <= gamma2, "gamma2={gamma2} a={a} a0={a0}");
                assert_eq!(freeze(a1 * 2 * gamma2 + a0), a, "gamma2={gamma2} a={a}");
            }
        }
    }

    #[test]
    fn test_decompose_wraps_top_interval() {
        let (a1, a0) = decompose(Q - 1, GAMMA2_88);
        assert_eq!((a1, a0), (0, -1));
        let (a1, a0) = decompose(Q - 1, GAMMA2_32);
        assert_eq!((a1, a0), (0, -1));
    }

    #[test]
    fn test_hint_recovers_high_bits() {
        // The signer sees w and a perturbation d = -cs2 + ct0; the verifier
        // sees w + d and must recover HighBits(w) from the hint.
        for (gamma2, beta) in [(GAMMA2_32, 196), (GAMMA2_88, 78)] {
            for w in (0..Q).step_by(7919) {
                let (w1, w0) = decompose(w, gamma2);
                for cs2 in [-beta, -1, 0, 1, beta] {
                    if (w0 - cs2).abs() >= gamma2 - beta {
                        continue;
                    }
                    for ct0 in [-(gamma2 - 1), -1000, 0, 999, gamma2 - 1] {
                        let low = w0 - cs2 + ct0;
                        let hint = make_hint(low, w1, gamma2);
                        let seen = freeze(w - cs2 + ct0);
                        assert_eq!(use_hint(seen, hint, gamma2), w1, "w={w} cs2={cs2} ct0={ct0}");
                    }
                }
            }
        }
    }

    #[test]
    fn test_use_hint_without_hint_is_high_bits() {
        for a in sample_points() {
            assert_eq!(use_hint(a, false, GAMMA2_88), decompose(a, GAMMA2_88).0);
        }
    }

    #[test]
    fn test_make_hint_vec_counts() {
        let mut w0 = PolyVec::zero(2);
        let w1 = PolyVec::zero(2);
        w0.polys[0].coeffs[3] = GAMMA2_32 + 1;
        w0.polys[1].coeffs[9] = -GAMMA2_32 - 1;
        w0.polys[1].coeffs[10] = -GAMMA2_32;
        let (h, count) = make_hint_vec(&w0, &w1, GAMMA2_32);
        assert_eq!(count, 2);
        assert_eq!(h.polys[0].coeffs[3], 1);
        assert_eq!(h.polys[1].coeffs[10], 0);
    }
}
