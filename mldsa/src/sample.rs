//! ExpandA, ExpandS, ExpandMask and SampleInBall.
//!
//! The three expansions derive many independent polynomials from one seed
//! and a per-polynomial nonce, so they run four lanes at a time through the
//! suite's [`XofX4`]. A short final batch is padded with copies of its last
//! input whose outputs are discarded. Every lane reads its own stream in
//! order, so the result is identical to sampling each polynomial alone.

#[cfg(not(feature = "std"))]
use alloc::{vec, vec::Vec};

use crate::packing::unpack_z;
use crate::params::{ParameterSet, CRH_BYTES, SEED_BYTES};
use crate::poly::{Poly, N};
use crate::polyvec::{Matrix, PolyVec};
use crate::reduce::Q;
use mldsa_fips202::{Fips202, Xof, XofX4};

/// Bytes of SHAKE128 output that usually suffice for one uniform polynomial.
const UNIFORM_BYTES: usize = 840;

/// Accept 23-bit candidates below q, three bytes each.
fn rej_uniform(coeffs: &mut [i32; N], mut ctr: usize, buf: &[u8]) -> usize {
    for chunk in buf.chunks_exact(3) {
        if ctr == N {
            break;
        }
        let t = i32::from(chunk[0])
            | (i32::from(chunk[1]) << 8)
            | (i32::from(chunk[2] & 0x7F) << 16);
        if t < Q {
            coeffs[ctr] = t;
            ctr += 1;
        }
    }
    ctr
}

/// Accept half-bytes that map uniformly onto `[-η, η]`, low nibble first.
fn rej_eta(eta: i32, coeffs: &mut [i32; N], mut ctr: usize, buf: &[u8]) -> usize {
    for &b in buf {
        for t in [i32::from(b & 0x0F), i32::from(b >> 4)] {
            if ctr == N {
                return ctr;
            }
            if eta == 2 && t < 15 {
                coeffs[ctr] = 2 - (t - ((205 * t) >> 10) * 5);
                ctr += 1;
            } else if eta == 4 && t < 9 {
                coeffs[ctr] = 4 - t;
                ctr += 1;
            }
        }
    }
    ctr
}

/// Run one batch of up to four rejection samplers.
///
/// `first_blocks` blocks are squeezed up front, then one block at a time
/// until every live lane has all N coefficients.
fn rejection_x4<X: XofX4>(
    inputs: [&[u8]; 4],
    first_blocks: usize,
    out: &mut [Poly],
    accept: &impl Fn(&mut [i32; N], usize, &[u8]) -> usize,
) {
    debug_assert!(!out.is_empty() && out.len() <= 4);
    let mut xof = X::init();
    xof.absorb_once(inputs);

    let mut bufs: [Vec<u8>; 4] = core::array::from_fn(|_| vec![0u8; first_blocks * X::RATE]);
    let mut ctrs = [0usize; 4];
    let mut nblocks = first_blocks;
    loop {
        let len = nblocks * X::RATE;
        let [b0, b1, b2, b3] = &mut bufs;
        xof.squeeze_blocks(
            [&mut b0[..len], &mut b1[..len], &mut b2[..len], &mut b3[..len]],
            nblocks,
        );

        for (lane, poly) in out.iter_mut().enumerate() {
            if ctrs[lane] < N {
                ctrs[lane] = accept(&mut poly.coeffs, ctrs[lane], &bufs[lane][..len]);
            }
        }
        if ctrs[..out.len()].iter().all(|&c| c == N) {
            break;
        }
        nblocks = 1;
    }
    xof.release();
}

/// Four lane inputs from a batch of one to four, padding with the last one.
fn lane_inputs<const LEN: usize>(batch: &[[u8; LEN]]) -> [&[u8]; 4] {
    let last = batch.len() - 1;
    core::array::from_fn(|lane| &batch[lane.min(last)][..])
}

fn sample_batched<X: XofX4, const LEN: usize>(
    inputs: &[[u8; LEN]],
    first_blocks: usize,
    accept: impl Fn(&mut [i32; N], usize, &[u8]) -> usize,
) -> Vec<Poly> {
    let mut polys = vec![Poly::zero(); inputs.len()];
    for (batch, out) in inputs.chunks(4).zip(polys.chunks_mut(4)) {
        rejection_x4::<X>(lane_inputs(batch), first_blocks, out, &accept);
    }
    polys
}

/// Initial squeeze for one uniform polynomial on `X`.
///
/// [`rej_uniform`] consumes whole three-byte candidates per squeeze, so the
/// rate must be a multiple of 3 or trailing bytes would be lost.
fn uniform_first_blocks<X: XofX4>() -> usize {
    assert!(X::RATE % 3 == 0, "rate {} is not a multiple of 3", X::RATE);
    UNIFORM_BYTES.div_ceil(X::RATE)
}

/// Â = ExpandA(ρ): entry (i, j) is SHAKE128(ρ || j || i) rejection-sampled
/// into the NTT domain.
pub fn expand_a<P: ParameterSet, H: Fips202>(rho: &[u8; SEED_BYTES]) -> Matrix {
    let mut inputs = Vec::with_capacity(P::K * P::L);
    for i in 0..P::K {
        for j in 0..P::L {
            let mut input = [0u8; SEED_BYTES + 2];
            input[..SEED_BYTES].copy_from_slice(rho);
            input[SEED_BYTES] = j as u8;
            input[SEED_BYTES + 1] = i as u8;
            inputs.push(input);
        }
    }
    let first_blocks = uniform_first_blocks::<H::Shake128x4>();
    let mut entries =
        sample_batched::<H::Shake128x4, { SEED_BYTES + 2 }>(&inputs, first_blocks, rej_uniform)
            .into_iter();

    let mut a = Matrix::zero(P::K, P::L);
    for row in &mut a.rows {
        for (poly, entry) in row.polys.iter_mut().zip(entries.by_ref()) {
            *poly = entry;
        }
    }
    a
}

/// (s1, s2) = ExpandS(ρ'): nonces `0..L` give s1, `L..L+K` give s2.
pub fn expand_s<P: ParameterSet, H: Fips202>(
    rho_prime: &[u8; CRH_BYTES],
) -> (PolyVec, PolyVec) {
    let inputs: Vec<[u8; CRH_BYTES + 2]> = (0..P::L + P::K)
        .map(|nonce| seed_with_nonce(rho_prime, nonce as u16))
        .collect();
    let wanted: usize = if P::ETA == 2 { 136 } else { 227 };
    let first_blocks = wanted.div_ceil(H::Shake256x4::RATE);
    let mut polys = sample_batched::<H::Shake256x4, { CRH_BYTES + 2 }>(
        &inputs,
        first_blocks,
        |c, ctr, buf| rej_eta(P::ETA, c, ctr, buf),
    );
    let s2 = PolyVec {
        polys: polys.split_off(P::L),
    };
    (PolyVec { polys }, s2)
}

/// y = ExpandMask(ρ'', κ): entry i reads SHAKE256(ρ'' || u16le(κ + i)).
///
/// The caller guarantees `κ + L - 1` fits in 16 bits.
pub fn expand_mask<P: ParameterSet, H: Fips202>(
    rho_pp: &[u8; CRH_BYTES],
    kappa: u16,
) -> PolyVec {
    let inputs: Vec<[u8; CRH_BYTES + 2]> = (0..P::L)
        .map(|i| seed_with_nonce(rho_pp, kappa + i as u16))
        .collect();

    let nblocks = P::POLY_Z_PACKED_BYTES.div_ceil(H::Shake256x4::RATE);
    let len = nblocks * H::Shake256x4::RATE;
    let mut bufs: [Vec<u8>; 4] = core::array::from_fn(|_| vec![0u8; len]);
    let mut y = PolyVec::zero(P::L);

    for (batch, out) in inputs.chunks(4).zip(y.polys.chunks_mut(4)) {
        let mut xof = H::Shake256x4::init();
        xof.absorb_once(lane_inputs(batch));
        let [b0, b1, b2, b3] = &mut bufs;
        xof.squeeze_blocks([&mut b0[..], &mut b1[..], &mut b2[..], &mut b3[..]], nblocks);
        xof.release();
        for (poly, buf) in out.iter_mut().zip(&bufs) {
            *poly = unpack_z(&buf[..P::POLY_Z_PACKED_BYTES], P::GAMMA1_BITS);
        }
    }
    y
}

fn seed_with_nonce(seed: &[u8; CRH_BYTES], nonce: u16) -> [u8; CRH_BYTES + 2] {
    let mut input = [0u8; CRH_BYTES + 2];
    input[..CRH_BYTES].copy_from_slice(seed);
    input[CRH_BYTES..].copy_from_slice(&nonce.to_le_bytes());
    input
}

/// c = SampleInBall(c̃): exactly τ coefficients in {-1, +1}, the rest zero.
pub fn sample_in_ball<H: Fips202>(c_tilde: &[u8], tau: usize) -> Poly {
    let mut xof = H::Shake256::init();
    xof.absorb(c_tilde);
    xof.finalize();

    let mut signs = [0u8; 8];
    xof.squeeze(&mut signs);
    let mut signs = u64::from_le_bytes(signs);

    let mut c = Poly::zero();
    let mut buf = [0u8; 136];
    let mut pos = buf.len();
    for i in N - tau..N {
        let b = loop {
            if pos == buf.len() {
                xof.squeeze(&mut buf);
                pos = 0;
            }
            let b = usize::from(buf[pos]);
            pos += 1;
            if b <= i {
                break b;
            }
        };
        c.coeffs[i] = c.coeffs[b];
        c.coeffs[b] = 1 - 2 * (signs & 1) as i32;
        signs >>= 1;
    }
    xof.release();
    c
}

#[cfg(test)]
mod tests {
    use super::*;
    use mldsa_fips202::{shake128, shake256, Native, Serial};

    fn uniform_single(rho: &[u8; 32], i: u8, j: u8) -> Poly {
        let mut input = rho.to_vec();
        input.extend_from_slice(&[j, i]);
        let mut stream = vec![0u8; 168 * 12];
        shake128(&mut stream, &input);
        let mut p = Poly::zero();
        assert_eq!(rej_uniform(&mut p.coeffs, 0, &stream), N);
        p
    }

    #[test]
    fn test_uniform_first_blocks() {
        assert_eq!(uniform_first_blocks::<<Native as Fips202>::Shake128x4>(), 5);
        assert_eq!(uniform_first_blocks::<<Serial as Fips202>::Shake128x4>(), 5);
    }

    #[test]
    #[should_panic(expected = "not a multiple of 3")]
    fn test_uniform_sampling_rejects_rate_with_partial_triples() {
        // SHAKE256 rate 136 leaves one byte per block
        uniform_first_blocks::<<Native as Fips202>::Shake256x4>();
    }

    #[test]
    fn test_rej_eta_values() {
        let mut c = [0i32; N];
        // 0x0E -> 14 (accepted as 2 - 4), 0x0F -> 15 (rejected)
        let ctr = rej_eta(2, &mut c, 0, &[0xFE, 0xF0]);
        assert_eq!(ctr, 2);
        assert_eq!(&c[..2], &[-2, 2]);

        let ctr = rej_eta(4, &mut c, 0, &[0x98, 0xF3]);
        assert_eq!(ctr, 2);
        assert_eq!(&c[..2], &[-4, 1]);
    }

    #[cfg(feature = "ml-dsa-87")]
    #[test]
    fn test_expand_a_matches_single_lane() {
        use crate::params::Params87 as P;
        let rho = [0x5Au8; 32];
        let a = expand_a::<P, Native>(&rho);
        assert_eq!(a.rows.len(), P::K);
        for (i, row) in a.rows.iter().enumerate() {
            assert_eq!(row.polys.len(), P::L);
            for (j, poly) in row.polys.iter().enumerate() {
                assert_eq!(*poly, uniform_single(&rho, i as u8, j as u8), "entry ({i}, {j})");
            }
        }
    }

    #[cfg(feature = "ml-dsa-65")]
    #[test]
    fn test_expand_s_ranges_and_suites() {
        use crate::params::Params65 as P;
        let seed = [3u8; CRH_BYTES];
        let (s1, s2) = expand_s::<P, Native>(&seed);
        assert_eq!((s1.polys.len(), s2.polys.len()), (P::L, P::K));
        assert!(s1
            .polys
            .iter()
            .chain(&s2.polys)
            .all(|p| p.coeffs.iter().all(|c| c.abs() <= 4)));
        assert_eq!((s1, s2), expand_s::<P, Serial>(&seed));
    }

    #[cfg(feature = "ml-dsa-44")]
    #[test]
    fn test_expand_mask_matches_single_lane() {
        use crate::params::Params44 as P;
        let seed = [7u8; CRH_BYTES];
        let kappa = 2 * P::L as u16;
        let y = expand_mask::<P, Native>(&seed, kappa);
        for (i, poly) in y.polys.iter().enumerate() {
            let input = seed_with_nonce(&seed, kappa + i as u16);
            let mut stream = [0u8; 576];
            shake256(&mut stream, &input);
            assert_eq!(*poly, unpack_z(&stream, 17), "entry {i}");
            assert!(poly.coeffs.iter().all(|c| *c > -(1 << 17) && *c <= 1 << 17));
        }
    }

    #[test]
    fn test_sample_in_ball_weight() {
        for tau in [39, 49, 60] {
            let c = sample_in_ball::<Native>(&[tau as u8; 32], tau);
            assert_eq!(c.coeffs.iter().filter(|&&x| x != 0).count(), tau);
            assert!(c.coeffs.iter().all(|&x| (-1..=1).contains(&x)));
        }
    }

    #[test]
    fn test_sample_in_ball_deterministic() {
        let seed = [42u8; 48];
        assert_eq!(sample_in_ball::<Native>(&seed, 49), sample_in_ball::<Serial>(&seed, 49));
    }
}
