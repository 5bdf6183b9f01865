//! Benchmarks for the mldsa workspace. See `benches/`.
