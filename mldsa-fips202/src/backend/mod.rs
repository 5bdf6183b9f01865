//! Multi-lane Keccak-f[1600] backends.
//!
//! Every backend permutes four independent states and must agree bit for bit
//! with four calls to [`crate::f1600`]. Selection happens once at runtime
//! from CPU feature detection, and callers may also pin a backend per call.
//!
//! | Backend    | Target    | Requirement            |
//! |------------|-----------|------------------------|
//! | `Portable` | any       | none                   |
//! | `Avx2`     | `x86_64`  | `simd` feature + AVX2  |
//! | `Neon`     | `aarch64` | `simd` feature + NEON  |
//!
//! RISC-V targets use `Portable`; stable Rust has no vector intrinsics there.

use core::fmt;
use core::sync::atomic::{AtomicU8, Ordering};

use crate::keccak::LANES;

pub(crate) mod portable;

#[cfg(all(feature = "simd", target_arch = "x86_64"))]
mod avx2;

#[cfg(all(feature = "simd", target_arch = "aarch64"))]
mod neon;

/// A 4-way permutation implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Backend {
    /// Interleaved `u64` lanes, available everywhere.
    Portable,
    /// 256-bit AVX2 registers.
    Avx2,
    /// Pairs of 128-bit NEON registers.
    Neon,
}

static ACTIVE: AtomicU8 = AtomicU8::new(0);

impl Backend {
    /// Every backend this crate knows about, best first.
    pub const ALL: [Backend; 3] = [Backend::Avx2, Backend::Neon, Backend::Portable];

    /// Short lowercase name, stable across releases.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Backend::Portable => "portable",
            Backend::Avx2 => "avx2",
            Backend::Neon => "neon",
        }
    }

    /// Whether this backend was compiled in and the running CPU supports it.
    #[must_use]
    pub fn is_available(self) -> bool {
        match self {
            Backend::Portable => true,
            #[cfg(all(feature = "simd", target_arch = "x86_64"))]
            Backend::Avx2 => avx2::is_supported(),
            #[cfg(all(feature = "simd", target_arch = "aarch64"))]
            Backend::Neon => neon::is_supported(),
            #[allow(unreachable_patterns)]
            _ => false,
        }
    }

    /// All usable backends, best first. Always ends with `Portable`.
    pub fn available() -> impl Iterator<Item = Backend> {
        Self::ALL.into_iter().filter(|b| b.is_available())
    }

    /// Best usable backend, detected without caching.
    #[must_use]
    pub fn detect() -> Backend {
        Self::available().next().unwrap_or(Backend::Portable)
    }

    /// Backend used by [`f1600_x4`], detected on first use and cached.
    #[must_use]
    pub fn active() -> Backend {
        match Self::from_tag(ACTIVE.load(Ordering::Relaxed)) {
            Some(backend) => backend,
            None => {
                let backend = Self::detect();
                ACTIVE.store(backend.tag(), Ordering::Relaxed);
                #[cfg(feature = "log")]
                log::debug!("keccak x4 backend: {}", backend.name());
                backend
            }
        }
    }

    /// Permute four states with this backend.
    ///
    /// Falls back to `Portable` when this backend is unavailable, so the
    /// result never depends on which backend was asked for.
    #[allow(unsafe_code)]
    pub fn permute_x4(self, states: &mut [[u64; LANES]; 4]) {
        match self {
            // SAFETY: AVX2 support checked on this CPU.
            #[cfg(all(feature = "simd", target_arch = "x86_64"))]
            Backend::Avx2 if avx2::is_supported() => unsafe { avx2::f1600_x4(states) },
            // SAFETY: NEON support checked on this CPU.
            #[cfg(all(feature = "simd", target_arch = "aarch64"))]
            Backend::Neon if neon::is_supported() => unsafe { neon::f1600_x4(states) },
            _ => portable::f1600_x4(states),
        }
    }

    const fn tag(self) -> u8 {
        match self {
            Backend::Portable => 1,
            Backend::Avx2 => 2,
            Backend::Neon => 3,
        }
    }

    const fn from_tag(tag: u8) -> Option<Backend> {
        match tag {
            1 => Some(Backend::Portable),
            2 => Some(Backend::Avx2),
            3 => Some(Backend::Neon),
            _ => None,
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Keccak-f[1600] on four independent states using the active backend.
#[inline]
pub fn f1600_x4(states: &mut [[u64; LANES]; 4]) {
    Backend::active().permute_x4(states);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn states(seed: u64) -> [[u64; LANES]; 4] {
        let mut x = seed.wrapping_mul(0x2545_F491_4F6C_DD1D) | 1;
        core::array::from_fn(|_| {
            core::array::from_fn(|_| {
                x ^= x >> 12;
                x ^= x << 25;
                x ^= x >> 27;
                x.wrapping_mul(0x2545_F491_4F6C_DD1D)
            })
        })
    }

    #[test]
    fn test_portable_always_available() {
        assert!(Backend::Portable.is_available());
        assert_eq!(Backend::available().last(), Some(Backend::Portable));
    }

    #[test]
    fn test_active_is_cached_detection() {
        let first = Backend::active();
        assert_eq!(first, Backend::detect());
        assert_eq!(Backend::active(), first);
        assert!(first.is_available());
    }

    #[test]
    fn test_every_backend_matches_scalar() {
        for seed in 1..8 {
            let input = states(seed);
            let mut expected = input;
            for state in &mut expected {
                crate::f1600(state);
            }

            for backend in Backend::ALL {
                let mut got = input;
                backend.permute_x4(&mut got);
                assert_eq!(got, expected, "{backend} seed {seed}");
            }
        }
    }

    #[test]
    fn test_tag_round_trip() {
        for backend in Backend::ALL {
            assert_eq!(Backend::from_tag(backend.tag()), Some(backend));
        }
        assert_eq!(Backend::from_tag(0), None);
    }

    #[test]
    fn test_names() {
        assert_eq!(Backend::Portable.name(), "portable");
        assert_eq!(Backend::Avx2.name(), "avx2");
        assert_eq!(Backend::Neon.name(), "neon");
    }
}
