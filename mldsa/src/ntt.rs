//! Number Theoretic Transform over Z_q[X]/(X^256 + 1).
//!
//! Eight Cooley-Tukey layers with the 512th root of unity ζ = 1753. The
//! forward transform leaves coefficients in bit-reversed evaluation order;
//! the inverse multiplies by the Montgomery factor so that a pointwise
//! Montgomery product followed by `inv_ntt` gives the plain ring product.

use crate::poly::N;
use crate::reduce::{montgomery_mul, MONT, Q};

/// Primitive 512th root of unity modulo q.
pub const ZETA: i32 = 1753;

/// `MONT^2 / 256 mod q`, applied at the end of the inverse transform.
const INV_N_MONT: i32 = 41_978;

/// `ζ^brv8(k) * 2^32 mod q`, centered around zero.
pub const ZETAS: [i32; N] = compute_zetas();

const fn bit_reverse8(x: usize) -> usize {
    let mut r = 0;
    let mut i = 0;
    while i < 8 {
        r |= ((x >> i) & 1) << (7 - i);
        i += 1;
    }
    r
}

const fn pow_mod(base: i64, mut exp: usize) -> i64 {
    let q = Q as i64;
    let mut acc = 1i64;
    let mut b = base % q;
    while exp > 0 {
        if exp & 1 == 1 {
            acc = acc * b % q;
        }
        b = b * b % q;
        exp >>= 1;
    }
    acc
}

const fn compute_zetas() -> [i32; N] {
    let q = Q as i64;
    let mut zetas = [0i32; N];
    let mut k = 0;
    while k < N {
        let z = pow_mod(ZETA as i64, bit_reverse8(k)) * (MONT as i64) % q;
        zetas[k] = if z > q / 2 { (z - q) as i32 } else { z as i32 };
        k += 1;
    }
    zetas
}

/// Forward NTT in place.
///
/// Inputs bounded by `q` in absolute value give outputs bounded by `9q`.
pub fn ntt(a: &mut [i32; N]) {
    let mut k = 0;
    let mut len = 128;
    while len > 0 {
        let mut start = 0;
        while start < N {
            k += 1;
            let zeta = ZETAS[k];
            for j in start..start + len {
                let t = montgomery_mul(zeta, a[j + len]);
                a[j + len] = a[j] - t;
                a[j] += t;
            }
            start += 2 * len;
        }
        len >>= 1;
    }
}

/// Inverse NTT in place, including the `2^32 / 256` scaling.
///
/// Inputs bounded by `q` in absolute value give outputs bounded by `q`.
pub fn inv_ntt(a: &mut [i32; N]) {
    let mut k = N;
    let mut len = 1;
    while len < N {
        let mut start = 0;
        while start < N {
            k -= 1;
            let zeta = -ZETAS[k];
            for j in start..start + len {
                let t = a[j];
                a[j] = t + a[j + len];
                a[j + len] = montgomery_mul(zeta, t - a[j + len]);
            }
            start += 2 * len;
        }
        len <<= 1;
    }
    for c in a.iter_mut() {
        *c = montgomery_mul(INV_N_MONT, *c);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reduce::{freeze, reduce32};

    /// Plain negacyclic product for checking the transform.
    fn schoolbook(a: &[i32; N], b: &[i32; N]) -> [i32; N] {
        let q = i64::from(Q);
        let mut acc = [0i64; N];
        for i in 0..N {
            for j in 0..N {
                let p = i64::from(a[i]) * i64::from(b[j]) % q;
                if i + j < N {
                    acc[i + j] += p;
                } else {
                    acc[i + j - N] -= p;
                }
            }
        }
        acc.map(|c| c.rem_euclid(q) as i32)
    }

    fn test_poly(seed: i32) -> [i32; N] {
        let mut a = [0i32; N];
        let mut x = seed;
        for c in &mut a {
            x = x.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            *c = (x >> 8).rem_euclid(Q) - Q / 2;
        }
        a
    }

    #[test]
    fn test_zetas_match_reference_values() {
        assert_eq!(ZETAS[1], 25_847);
        assert_eq!(ZETAS[2], -2_608_894);
        assert_eq!(ZETAS[3], -518_909);
        assert_eq!(ZETAS[128], 2_091_667);
        assert_eq!(ZETAS[255], 1_976_782);
        assert!(ZETAS.iter().all(|z| z.abs() <= Q / 2));
    }

    #[test]
    fn test_zeta_order() {
        let q = i64::from(Q);
        assert_eq!(pow_mod(i64::from(ZETA), 256), q - 1);
        assert_eq!(pow_mod(i64::from(ZETA), 512), 1);
    }

    #[test]
    fn test_ntt_inv_ntt_roundtrip() {
        let original = test_poly(7);
        let mut a = original;
        ntt(&mut a);
        for c in &mut a {
            *c = reduce32(*c);
        }
        inv_ntt(&mut a);
        // inv_ntt leaves one Montgomery factor behind.
        for i in 0..N {
            let got = freeze(montgomery_mul(a[i], 1));
            assert_eq!(got, freeze(original[i]), "index {i}");
        }
    }

    #[test]
    fn test_pointwise_product_matches_schoolbook() {
        let a = test_poly(1);
        let b = test_poly(2);
        let expected = schoolbook(&a, &b);

        let (mut ah, mut bh) = (a, b);
        ntt(&mut ah);
        ntt(&mut bh);
        let mut c = [0i32; N];
        for i in 0..N {
            c[i] = montgomery_mul(ah[i] % Q, bh[i] % Q);
        }
        inv_ntt(&mut c);

        for i in 0..N {
            assert_eq!(freeze(c[i]), expected[i], "index {i}");
        }
    }
}
