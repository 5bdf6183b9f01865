//! Vectors and matrices of polynomials.
//!
//! Lengths come from the parameter set at run time, so storage is a `Vec`.

#[cfg(not(feature = "std"))]
use alloc::{vec, vec::Vec};

use crate::poly::Poly;
use subtle::Choice;
use zeroize::Zeroize;

/// A vector of polynomials.
#[derive(Clone, PartialEq, Eq, Debug, Zeroize)]
pub struct PolyVec {
    /// Entries.
    pub polys: Vec<Poly>,
}

impl PolyVec {
    /// Zero vector of length `len`.
    pub fn zero(len: usize) -> Self {
        Self {
            polys: vec![Poly::zero(); len],
        }
    }

    /// Forward NTT on every entry.
    pub fn ntt(&mut self) {
        for p in &mut self.polys {
            p.ntt();
        }
    }

    /// Inverse NTT on every entry.
    pub fn inv_ntt(&mut self) {
        for p in &mut self.polys {
            p.inv_ntt();
        }
    }

    /// Entrywise `self += other`.
    pub fn add_assign(&mut self, other: &Self) {
        for (a, b) in self.polys.iter_mut().zip(&other.polys) {
            a.add_assign(b);
        }
    }

    /// Entrywise `self -= other`.
    pub fn sub_assign(&mut self, other: &Self) {
        for (a, b) in self.polys.iter_mut().zip(&other.polys) {
            a.sub_assign(b);
        }
    }

    /// Reduce every coefficient with `reduce32`.
    pub fn reduce(&mut self) {
        for p in &mut self.polys {
            p.reduce();
        }
    }

    /// Add q to every negative coefficient.
    pub fn caddq(&mut self) {
        for p in &mut self.polys {
            p.caddq();
        }
    }

    /// Multiply every coefficient by `2^d`.
    pub fn shift_left(&mut self, d: u32) {
        for p in &mut self.polys {
            p.shift_left(d);
        }
    }

    /// Multiply every entry pointwise by one NTT-domain polynomial.
    #[must_use]
    pub fn scale_ntt(&self, c: &Poly) -> Self {
        Self {
            polys: self.polys.iter().map(|p| c.pointwise_mul(p)).collect(),
        }
    }

    /// `true` if every coefficient of every entry satisfies `|c| < bound`.
    ///
    /// All entries are checked regardless of where a failure occurs.
    pub fn check_norm(&self, bound: i32) -> bool {
        let mut ok = Choice::from(1u8);
        for p in &self.polys {
            ok &= p.check_norm(bound);
        }
        bool::from(ok)
    }
}

/// The public matrix Â in the NTT domain, stored row by row.
#[derive(Clone, Debug)]
pub struct Matrix {
    /// K rows of L polynomials each.
    pub rows: Vec<PolyVec>,
}

impl Matrix {
    /// Zero `k × l` matrix.
    pub fn zero(k: usize, l: usize) -> Self {
        Self {
            rows: vec![PolyVec::zero(l); k],
        }
    }

    /// `Â · v` for an NTT-domain vector `v`; the result is unreduced.
    pub fn mul_vec(&self, v: &PolyVec) -> PolyVec {
        let mut out = PolyVec::zero(self.rows.len());
        for (row, acc) in self.rows.iter().zip(&mut out.polys) {
            for (a, b) in row.polys.iter().zip(&v.polys) {
                acc.pointwise_mul_acc(a, b);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reduce::{freeze, MONT};

    #[test]
    fn test_add_sub() {
        let mut a = PolyVec::zero(3);
        let mut b = PolyVec::zero(3);
        a.polys[0].coeffs[0] = 100;
        b.polys[2].coeffs[5] = 7;

        let original = a.clone();
        a.add_assign(&b);
        assert_eq!(a.polys[2].coeffs[5], 7);
        a.sub_assign(&b);
        assert_eq!(a, original);
    }

    #[test]
    fn test_check_norm_scans_every_entry() {
        let mut v = PolyVec::zero(4);
        assert!(v.check_norm(10));
        v.polys[3].coeffs[255] = -10;
        assert!(!v.check_norm(10));
        assert!(v.check_norm(11));
    }

    #[test]
    fn test_mul_vec_identity() {
        // A diagonal of constant polynomials MONT acts as the identity
        // under Montgomery pointwise products.
        let (k, l) = (2, 2);
        let mut a = Matrix::zero(k, l);
        for i in 0..k {
            a.rows[i].polys[i].coeffs = [MONT; crate::poly::N];
        }
        let mut v = PolyVec::zero(l);
        v.polys[0].coeffs[1] = 42;
        v.polys[1].coeffs[2] = -9;

        let w = a.mul_vec(&v);
        assert_eq!(freeze(w.polys[0].coeffs[1]), 42);
        assert_eq!(freeze(w.polys[1].coeffs[2]), freeze(-9));
        assert_eq!(w.polys[0].coeffs[0], 0);
    }
}
