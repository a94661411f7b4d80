use thiserror::Error;

/// Errors raised by the number-theoretic and polynomial-ring layer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MathError {
    #[error("expected {expected} coefficients, found {found}")]
    ShapeMismatch { expected: usize, found: usize },

    #[error("polynomial degree {0} is not a power of two")]
    DegreeNotPowerOfTwo(usize),

    #[error("no root of unity of order {order} exists modulo {modulus}")]
    NoRootOfUnity { order: u64, modulus: u64 },

    #[error("could not find a prime of size {bits} bits congruent to 1 mod {modulus2n}")]
    PrimeSearchExhausted { bits: usize, modulus2n: u64 },

    #[error("modulus {0} is not invertible")]
    NotInvertible(u64),

    #[error("rotation index {0} has no valid automorphism")]
    InvalidRotation(i64),
}
