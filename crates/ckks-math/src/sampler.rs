//! Randomized coefficient samplers used by key generation and encryption.
//!
//! Every function is generic over `rand::RngCore` so callers can inject a
//! deterministic seeded generator (tests, reproducible ciphertexts) or the
//! default OS-backed source.

use num_bigint::{BigInt, RandBigInt};
use rand::{Rng, RngCore};

/// Samples `count` integers uniformly from `[0, modulus)`.
pub fn sample_uniform<R: RngCore>(rng: &mut R, modulus: &BigInt, count: usize) -> Vec<BigInt> {
    (0..count).map(|_| rng.gen_bigint_range(&BigInt::from(0), modulus)).collect()
}

/// Samples `count` coefficients from `{-1, 0, 1}` with probabilities `{1/4,
/// 1/2, 1/4}`.
pub fn sample_ternary<R: RngCore>(rng: &mut R, count: usize) -> Vec<i8> {
    (0..count)
        .map(|_| match rng.gen_range(0..4) {
            0 => -1,
            1 | 2 => 0,
            _ => 1,
        })
        .collect()
}

/// Samples a length-`count` vector with exactly `hamming_weight` nonzero
/// entries, each `+1` or `-1` with equal probability, and the rest zero.
pub fn sample_hamming_weight<R: RngCore>(rng: &mut R, count: usize, hamming_weight: usize) -> Vec<i8> {
    let hamming_weight = hamming_weight.min(count);
    let mut result = vec![0i8; count];
    let mut positions: Vec<usize> = (0..count).collect();
    for i in 0..hamming_weight {
        let j = rng.gen_range(i..count);
        positions.swap(i, j);
        result[positions[i]] = if rng.gen_bool(0.5) { 1 } else { -1 };
    }
    result
}

/// Samples `count` discrete Gaussian-like error terms, approximated by a sum
/// of uniform draws centered at zero with the given standard deviation.
pub fn sample_discrete_gaussian<R: RngCore>(rng: &mut R, count: usize, std_dev: f64) -> Vec<i64> {
    (0..count)
        .map(|_| {
            let sum: f64 = (0..12).map(|_| rng.gen::<f64>()).sum();
            ((sum - 6.0) * std_dev).round() as i64
        })
        .collect()
}
