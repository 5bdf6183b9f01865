//! Polynomials in R_q = Z_q[X] / (X^256 + 1).

use crate::ntt::{inv_ntt, ntt};
use crate::reduce::{caddq, montgomery_mul, reduce32, Q};
use subtle::{Choice, ConstantTimeGreater};
use zeroize::Zeroize;

/// Ring dimension.
pub const N: usize = 256;

/// A polynomial with 256 signed coefficients.
#[derive(Clone, PartialEq, Eq, Debug, Zeroize)]
pub struct Poly {
    /// Coefficients, not necessarily reduced.
    pub coeffs: [i32; N],
}

impl Default for Poly {
    fn default() -> Self {
        Self::zero()
    }
}

impl Poly {
    /// The zero polynomial.
    #[inline]
    pub const fn zero() -> Self {
        Self { coeffs: [0; N] }
    }

    /// Apply [`reduce32`] to every coefficient.
    pub fn reduce(&mut self) {
        for c in &mut self.coeffs {
            *c = reduce32(*c);
        }
    }

    /// Apply [`caddq`] to every coefficient.
    pub fn caddq(&mut self) {
        for c in &mut self.coeffs {
            *c = caddq(*c);
        }
    }

    /// Forward NTT in place.
    pub fn ntt(&mut self) {
        ntt(&mut self.coeffs);
    }

    /// Inverse NTT in place (result carries a Montgomery factor).
    pub fn inv_ntt(&mut self) {
        inv_ntt(&mut self.coeffs);
    }

    /// `self += other` without reduction.
    pub fn add_assign(&mut self, other: &Self) {
        for (a, b) in self.coeffs.iter_mut().zip(&other.coeffs) {
            *a += b;
        }
    }

    /// `self -= other` without reduction.
    pub fn sub_assign(&mut self, other: &Self) {
        for (a, b) in self.coeffs.iter_mut().zip(&other.coeffs) {
            *a -= b;
        }
    }

    /// Pointwise Montgomery product of two NTT-domain polynomials.
    #[must_use]
    pub fn pointwise_mul(&self, other: &Self) -> Self {
        let mut r = Self::zero();
        for i in 0..N {
            r.coeffs[i] = montgomery_mul(self.coeffs[i], other.coeffs[i]);
        }
        r
    }

    /// `self += a ∘ b` in the NTT domain.
    pub fn pointwise_mul_acc(&mut self, a: &Self, b: &Self) {
        for i in 0..N {
            self.coeffs[i] += montgomery_mul(a.coeffs[i], b.coeffs[i]);
        }
    }

    /// Multiply every coefficient by `2^d`.
    pub fn shift_left(&mut self, d: u32) {
        for c in &mut self.coeffs {
            *c <<= d;
        }
    }

    /// Set if every coefficient satisfies `|c| < bound`.
    ///
    /// Coefficients must be centered (output of [`Poly::reduce`]). Bounds
    /// above `(q - 1) / 8` are rejected outright. The scan never exits early.
    pub fn check_norm(&self, bound: i32) -> Choice {
        if bound <= 0 || bound > (Q - 1) / 8 {
            return Choice::from(0u8);
        }
        let limit = (bound - 1) as u32;
        let mut fail = Choice::from(0u8);
        for &c in &self.coeffs {
            let abs = c - ((c >> 31) & (2 * c));
            fail |= (abs as u32).ct_gt(&limit);
        }
        !fail
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_sub() {
        let mut a = Poly::zero();
        let mut b = Poly::zero();
        a.coeffs[0] = 100;
        a.coeffs[1] = 200;
        b.coeffs[0] = 50;
        b.coeffs[1] = 300;

        let mut c = a.clone();
        c.add_assign(&b);
        assert_eq!(&c.coeffs[..2], &[150, 500]);
        c.sub_assign(&b);
        assert_eq!(c, a);
    }

    #[test]
    fn test_check_norm() {
        let mut p = Poly::zero();
        assert!(bool::from(p.check_norm(1)));

        p.coeffs[0] = 100;
        assert!(bool::from(p.check_norm(101)));
        assert!(!bool::from(p.check_norm(100)));

        p.coeffs[0] = -100;
        assert!(bool::from(p.check_norm(101)));
        assert!(!bool::from(p.check_norm(100)));

        let mut p2 = Poly::zero();
        p2.coeffs[200] = -1;
        assert!(bool::from(p2.check_norm(2)));
        assert!(!bool::from(p2.check_norm(1)));
    }

    #[test]
    fn test_check_norm_rejects_out_of_range_bounds() {
        let p = Poly::zero();
        assert!(!bool::from(p.check_norm(0)));
        assert!(!bool::from(p.check_norm(-1)));
        assert!(!bool::from(p.check_norm((Q - 1) / 8 + 1)));
        assert!(bool::from(p.check_norm((Q - 1) / 8)));
    }

    #[test]
    fn test_shift_and_reduce() {
        let mut p = Poly::zero();
        p.coeffs[3] = 1023;
        p.shift_left(13);
        assert_eq!(p.coeffs[3], 1023 << 13);
        p.coeffs[4] = Q + 3;
        p.reduce();
        assert_eq!(p.coeffs[4], 3);
        p.coeffs[5] = -3;
        p.caddq();
        assert_eq!(p.coeffs[5], Q - 3);
    }
}
