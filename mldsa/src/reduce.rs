//! Modular arithmetic modulo q = 8380417 = 2^23 - 2^13 + 1.

/// The prime modulus.
pub const Q: i32 = 8_380_417;

/// q^(-1) mod 2^32.
pub const QINV: i32 = 58_728_449;

/// 2^32 mod q, the Montgomery factor.
pub const MONT: i32 = 4_193_792;

/// Montgomery reduction: `a * 2^(-32) mod q`.
///
/// For `|a| < 2^31 * q` the result satisfies `-q < r < q`.
#[inline]
pub const fn montgomery_reduce(a: i64) -> i32 {
    let t = (a as i32).wrapping_mul(QINV);
    ((a - (t as i64) * (Q as i64)) >> 32) as i32
}

/// Montgomery product `a * b * 2^(-32) mod q`.
#[inline]
pub const fn montgomery_mul(a: i32, b: i32) -> i32 {
    montgomery_reduce((a as i64) * (b as i64))
}

/// Reduce `a <= 2^31 - 2^22 - 1` to `-6283008 <= r <= 6283008`, `r ≡ a`.
///
/// Values with `|a| < 2^22` pass through unchanged, so small centered
/// coefficients keep their sign.
#[inline]
pub const fn reduce32(a: i32) -> i32 {
    let t = (a + (1 << 22)) >> 23;
    a - t * Q
}

/// Add q if `a` is negative.
#[inline]
pub const fn caddq(a: i32) -> i32 {
    a + ((a >> 31) & Q)
}

/// Standard representative in `[0, q)`.
#[cfg(test)]
pub const fn freeze(a: i32) -> i32 {
    caddq(reduce32(a))
}
