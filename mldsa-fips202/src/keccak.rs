//! Keccak-f[1600] permutation
//!
//! The state is 25 little-endian 64-bit lanes laid out row-major,
//! `state[x + 5 * y]`. A single round function is written against the
//! [`Lanes`] abstraction so the scalar permutation and every 4-way backend
//! run the exact same sequence of theta, rho, pi, chi and iota steps.

/// Number of 64-bit lanes in the Keccak state.
pub const LANES: usize = 25;

/// Size of the Keccak state in bytes.
pub const STATE_BYTES: usize = 200;

/// Number of rounds of Keccak-f[1600].
pub const ROUNDS: usize = 24;

/// Iota round constants.
pub const ROUND_CONSTANTS: [u64; ROUNDS] = [
    0x0000_0000_0000_0001,
    0x0000_0000_0000_8082,
    0x8000_0000_0000_808a,
    0x8000_0000_8000_8000,
    0x0000_0000_0000_808b,
    0x0000_0000_8000_0001,
    0x8000_0000_8000_8081,
    0x8000_0000_0000_8009,
    0x0000_0000_0000_008a,
    0x0000_0000_0000_0088,
    0x0000_0000_8000_8009,
    0x0000_0000_8000_000a,
    0x0000_0000_8000_808b,
    0x8000_0000_0000_008b,
    0x8000_0000_0000_8089,
    0x8000_0000_0000_8003,
    0x8000_0000_0000_8002,
    0x8000_0000_0000_0080,
    0x0000_0000_0000_800a,
    0x8000_0000_8000_000a,
    0x8000_0000_8000_8081,
    0x8000_0000_0000_8080,
    0x0000_0000_8000_0001,
    0x8000_0000_8000_8008,
];

/// Rho rotation offsets, indexed `[y][x]`.
pub const RHO_OFFSETS: [[u32; 5]; 5] = [
    [0, 1, 62, 28, 27],
    [36, 44, 6, 55, 20],
    [3, 10, 43, 25, 39],
    [41, 45, 15, 21, 8],
    [18, 2, 61, 56, 14],
];

/// One Keccak lane position, possibly holding several independent states.
///
/// Implementations apply every operation element-wise; no operation may mix
/// data between the states packed into one value.
pub(crate) trait Lanes: Copy {
    /// `self ^ rhs`
    fn xor(self, rhs: Self) -> Self;

    /// `!self & rhs`
    fn andnot(self, rhs: Self) -> Self;

    /// Rotate every 64-bit element left by `n`, `1 <= n <= 63`.
    fn rotl(self, n: u32) -> Self;

    /// XOR the same constant into every element.
    fn xor_const(self, rc: u64) -> Self;
}

impl Lanes for u64 {
    #[inline(always)]
    fn xor(self, rhs: Self) -> Self {
        self ^ rhs
    }

    #[inline(always)]
    fn andnot(self, rhs: Self) -> Self {
        !self & rhs
    }

    #[inline(always)]
    fn rotl(self, n: u32) -> Self {
        self.rotate_left(n)
    }

    #[inline(always)]
    fn xor_const(self, rc: u64) -> Self {
        self ^ rc
    }
}

/// Apply all 24 rounds to a state of any lane type.
#[inline(always)]
pub(crate) fn keccak_p1600<L: Lanes>(a: &mut [L; LANES]) {
    for &rc in &ROUND_CONSTANTS {
        round(a, rc);
    }
}

#[inline(always)]
fn round<L: Lanes>(a: &mut [L; LANES], rc: u64) {
    // θ
    let c0 = a[0].xor(a[5]).xor(a[10]).xor(a[15]).xor(a[20]);
    let c1 = a[1].xor(a[6]).xor(a[11]).xor(a[16]).xor(a[21]);
    let c2 = a[2].xor(a[7]).xor(a[12]).xor(a[17]).xor(a[22]);
    let c3 = a[3].xor(a[8]).xor(a[13]).xor(a[18]).xor(a[23]);
    let c4 = a[4].xor(a[9]).xor(a[14]).xor(a[19]).xor(a[24]);

    let d = [
        c4.xor(c1.rotl(1)),
        c0.xor(c2.rotl(1)),
        c1.xor(c3.rotl(1)),
        c2.xor(c4.rotl(1)),
        c3.xor(c0.rotl(1)),
    ];

    for y in 0..5 {
        for x in 0..5 {
            a[x + 5 * y] = a[x + 5 * y].xor(d[x]);
        }
    }

    // ρ + π: B[y, 2x + 3y] = ROT(A[x, y], r[x, y])
    let b = [
        a[0],
        a[6].rotl(44),
        a[12].rotl(43),
        a[18].rotl(21),
        a[24].rotl(14),
        a[3].rotl(28),
        a[9].rotl(20),
        a[10].rotl(3),
        a[16].rotl(45),
        a[22].rotl(61),
        a[1].rotl(1),
        a[7].rotl(6),
        a[13].rotl(25),
        a[19].rotl(8),
        a[20].rotl(18),
        a[4].rotl(27),
        a[5].rotl(36),
        a[11].rotl(10),
        a[17].rotl(15),
        a[23].rotl(56),
        a[2].rotl(62),
        a[8].rotl(55),
        a[14].rotl(39),
        a[15].rotl(41),
        a[21].rotl(2),
    ];

    // χ
    for y in 0..5 {
        let row = 5 * y;
        for x in 0..5 {
            a[row + x] = b[row + x].xor(b[row + (x + 1) % 5].andnot(b[row + (x + 2) % 5]));
        }
    }

    // ι
    a[0] = a[0].xor_const(rc);
}

/// Keccak-f[1600] on a single state, in place.
///
/// Total function: touches only the 200 bytes it is given and never fails.
#[inline]
pub fn f1600(state: &mut [u64; LANES]) {
    keccak_p1600(state);
}

/// XOR `data` into the byte view of `state`, starting at byte `offset`.
pub(crate) fn xor_bytes(state: &mut [u64; LANES], offset: usize, data: &[u8]) {
    debug_assert!(offset + data.len() <= STATE_BYTES);

    let mut pos = offset;
    let mut data = data;

    while pos % 8 != 0 {
        let Some((&byte, rest)) = data.split_first() else {
            return;
        };
        state[pos / 8] ^= u64::from(byte) << (8 * (pos % 8));
        pos += 1;
        data = rest;
    }

    let mut chunks = data.chunks_exact(8);
    for chunk in &mut chunks {
        let mut word = [0u8; 8];
        word.copy_from_slice(chunk);
        state[pos / 8] ^= u64::from_le_bytes(word);
        pos += 8;
    }

    for &byte in chunks.remainder() {
        state[pos / 8] ^= u64::from(byte) << (8 * (pos % 8));
        pos += 1;
    }
}

/// Copy bytes out of the byte view of `state`, starting at byte `offset`.
pub(crate) fn extract_bytes(state: &[u64; LANES], offset: usize, out: &mut [u8]) {
    debug_assert!(offset + out.len() <= STATE_BYTES);

    for (i, byte) in out.iter_mut().enumerate() {
        let pos = offset + i;
        *byte = (state[pos / 8] >> (8 * (pos % 8))) as u8;
    }
}
