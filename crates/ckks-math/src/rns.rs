//! Residue Number System context: a chain of NTT-friendly primes used as an
//! implementation-level accelerator for big-integer polynomial
//! multiplication. The canonical coefficient representation stays a
//! monolithic arbitrary-precision integer ([`crate::rq::Polynomial`]); this
//! context decomposes coefficients into per-prime residues, multiplies each
//! residue stream with its own NTT, and reconstructs via CRT.

use crate::error::MathError;
use crate::ntt::NttOperator;
use crate::zq::generate_prime;
use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, Zero};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RnsContext {
    primes: Vec<u64>,
    ntts: Vec<NttOperator>,
    modulus: BigUint,
    // garner_basis[i] = (M / p_i) * ((M / p_i)^-1 mod p_i), as a BigUint.
    garner_basis: Vec<BigUint>,
}

impl RnsContext {
    /// Builds an RNS basis of `num_primes` distinct NTT-friendly primes of
    /// `prime_size` bits, suitable for negacyclic transforms of the given
    /// polynomial `degree`.
    pub fn new(num_primes: usize, prime_size: usize, degree: usize) -> Result<Self, MathError> {
        let mut primes = Vec::with_capacity(num_primes);
        for _ in 0..num_primes {
            let p = generate_prime(prime_size, 2 * degree as u64, &primes)?;
            primes.push(p);
        }
        Self::from_primes(primes, degree)
    }

    /// Builds an RNS basis from an explicit set of primes (used when
    /// extending a basis with the special modulus `P`, or in tests).
    pub fn from_primes(primes: Vec<u64>, degree: usize) -> Result<Self, MathError> {
        let ntts = primes
            .iter()
            .map(|&p| NttOperator::new(degree, p))
            .collect::<Result<Vec<_>, _>>()?;

        let modulus: BigUint = primes.iter().fold(BigUint::one(), |acc, &p| acc * p);

        let mut garner_basis = Vec::with_capacity(primes.len());
        for &p in &primes {
            let m_i = &modulus / p;
            let m_i_mod_p = (&m_i % p).to_u64_digits().first().copied().unwrap_or(0);
            let inv = crate::zq::mod_inv(m_i_mod_p, p)?;
            garner_basis.push(m_i * inv);
        }

        Ok(Self {
            primes,
            ntts,
            modulus,
            garner_basis,
        })
    }

    pub fn primes(&self) -> &[u64] {
        &self.primes
    }

    pub fn ntt(&self, index: usize) -> &NttOperator {
        &self.ntts[index]
    }

    pub fn degree(&self) -> usize {
        self.ntts[0].degree()
    }

    pub fn modulus(&self) -> BigUint {
        self.modulus.clone()
    }

    pub fn modulus_signed(&self) -> BigInt {
        BigInt::from(self.modulus.clone())
    }

    /// Reduces `x` into residues `x mod p_i` for each prime in the basis.
    pub fn decompose(&self, x: &BigInt) -> Vec<u64> {
        let reduced = x.mod_floor(&self.modulus_signed());
        let reduced = reduced.to_biguint().unwrap_or_else(BigUint::zero);
        self.primes
            .iter()
            .map(|&p| {
                let r = &reduced % p;
                r.to_u64_digits().first().copied().unwrap_or(0)
            })
            .collect()
    }

    /// Reconstructs the unique integer in `[0, modulus)` with the given
    /// residues, via Garner's CRT formula.
    pub fn reconstruct(&self, residues: &[u64]) -> BigUint {
        let mut acc = BigUint::zero();
        for (r, basis) in residues.iter().zip(self.garner_basis.iter()) {
            acc += basis * *r;
        }
        acc % &self.modulus
    }

    /// The `i`-th Garner basis element `(M / p_i) * ((M / p_i)^-1 mod p_i)`,
    /// used when key-switching a polynomial into the extended RNS basis.
    pub fn garner(&self, i: usize) -> &BigUint {
        &self.garner_basis[i]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decompose_reconstruct_roundtrip() {
        let ctx = RnsContext::new(3, 30, 8).unwrap();
        for value in [0i64, 1, 12345, 999999999] {
            let x = BigInt::from(value);
            let residues = ctx.decompose(&x);
            let back = ctx.reconstruct(&residues);
            assert_eq!(back, BigUint::from(value as u64));
        }
    }

    #[test]
    fn reconstruct_handles_negative_inputs_via_mod_floor() {
        let ctx = RnsContext::new(2, 25, 4).unwrap();
        let x = BigInt::from(-17);
        let residues = ctx.decompose(&x);
        let back = BigInt::from(ctx.reconstruct(&residues));
        let expected = (&x).mod_floor(&ctx.modulus_signed());
        assert_eq!(back, expected);
    }
}
