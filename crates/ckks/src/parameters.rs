//! Scheme parameters: ring degree, moduli chain, scaling factor and the
//! derived RNS context shared by every other module.

use crate::error::{Error, ParameterError};
use ckks_math::rns::RnsContext;
use derive_builder::Builder;
use num_bigint::BigInt;

/// Immutable scheme parameters, shared behind an `Arc` by every key,
/// plaintext and ciphertext created from them.
#[derive(Builder, Debug)]
#[builder(build_fn(validate = "Self::validate", error = "ParameterError"))]
pub struct Parameters {
    /// Ring degree `N`; the number of usable complex slots is `N / 2`.
    polynomial_degree: usize,

    /// Ciphertext modulus `q` at the top of the chain.
    ciphertext_modulus: BigInt,

    /// Special "raising" modulus `P`, used only transiently during
    /// key-switching.
    big_modulus: BigInt,

    /// Scaling factor `Delta` applied when encoding.
    scaling_factor: BigInt,

    /// Taylor-doubling iteration count `T` used when evaluating `exp`
    /// homomorphically during bootstrapping.
    #[builder(default = "6")]
    taylor_iterations: usize,

    /// Bit-size of each RNS limb prime.
    #[builder(default = "59")]
    prime_size: usize,

    /// Hamming weight of the sparse ternary secret key. Defaults to `N / 4`.
    #[builder(setter(strip_option), default = "None")]
    hamming_weight: Option<usize>,
}

impl PartialEq for Parameters {
    fn eq(&self, other: &Self) -> bool {
        self.polynomial_degree == other.polynomial_degree
            && self.ciphertext_modulus == other.ciphertext_modulus
            && self.big_modulus == other.big_modulus
            && self.scaling_factor == other.scaling_factor
    }
}
impl Eq for Parameters {}

impl ParametersBuilder {
    fn validate(&self) -> Result<(), ParameterError> {
        let degree = self.polynomial_degree.unwrap_or(0);
        if degree == 0 || !degree.is_power_of_two() {
            return Err(ParameterError::DegreeNotPowerOfTwo(degree));
        }

        if let (Some(q), Some(p)) = (&self.ciphertext_modulus, &self.big_modulus) {
            if q >= p {
                return Err(ParameterError::CiphertextModulusTooLarge);
            }
        }

        if let Some(delta) = &self.scaling_factor {
            if *delta <= BigInt::from(1) {
                return Err(ParameterError::ScalingFactorTooSmall);
            }
        }

        if let Some(Some(h)) = &self.hamming_weight {
            if *h > degree {
                return Err(ParameterError::HammingWeightTooLarge {
                    requested: *h,
                    degree,
                });
            }
        }

        if let Some(t) = &self.taylor_iterations {
            if *t == 0 {
                return Err(ParameterError::TaylorIterationsTooSmall);
            }
        }

        Ok(())
    }
}

impl Parameters {
    pub fn builder() -> ParametersBuilder {
        ParametersBuilder::default()
    }

    pub fn degree(&self) -> usize {
        self.polynomial_degree
    }

    pub fn num_slots(&self) -> usize {
        self.polynomial_degree / 2
    }

    pub fn ciphertext_modulus(&self) -> &BigInt {
        &self.ciphertext_modulus
    }

    pub fn big_modulus(&self) -> &BigInt {
        &self.big_modulus
    }

    /// The extended modulus `P * q`, used while a ciphertext is raised
    /// during key-switching.
    pub fn extended_modulus(&self) -> BigInt {
        &self.big_modulus * &self.ciphertext_modulus
    }

    pub fn scaling_factor(&self) -> &BigInt {
        &self.scaling_factor
    }

    pub fn taylor_iterations(&self) -> usize {
        self.taylor_iterations
    }

    pub fn prime_size(&self) -> usize {
        self.prime_size
    }

    pub fn hamming_weight(&self) -> usize {
        self.hamming_weight.unwrap_or(self.polynomial_degree / 4)
    }

    /// Builds an RNS context with enough NTT-friendly limbs to represent
    /// `extended_modulus` at `prime_size` bits each.
    pub fn build_rns_context(&self) -> Result<RnsContext, Error> {
        let bits_needed = self.extended_modulus().bits() as usize;
        let num_primes = bits_needed.div_ceil(self.prime_size) + 1;
        Ok(RnsContext::new(num_primes, self.prime_size, self.polynomial_degree)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(degree: usize) -> Result<Parameters, ParameterError> {
        Parameters::builder()
            .polynomial_degree(degree)
            .ciphertext_modulus(BigInt::from(1u64 << 40))
            .big_modulus(BigInt::from(1u64 << 60))
            .scaling_factor(BigInt::from(1u64 << 30))
            .build()
    }

    #[test]
    fn rejects_non_power_of_two_degree() {
        assert_eq!(build(6).unwrap_err(), ParameterError::DegreeNotPowerOfTwo(6));
    }

    #[test]
    fn rejects_ciphertext_modulus_larger_than_big_modulus() {
        let err = Parameters::builder()
            .polynomial_degree(8)
            .ciphertext_modulus(BigInt::from(1u64 << 60))
            .big_modulus(BigInt::from(1u64 << 40))
            .scaling_factor(BigInt::from(1u64 << 20))
            .build()
            .unwrap_err();
        assert_eq!(err, ParameterError::CiphertextModulusTooLarge);
    }

    #[test]
    fn defaults_hamming_weight_to_quarter_degree() {
        let params = build(16).unwrap();
        assert_eq!(params.hamming_weight(), 4);
    }

    #[test]
    fn accepts_sensible_parameters() {
        let params = build(16).unwrap();
        assert_eq!(params.num_slots(), 8);
        assert_eq!(params.taylor_iterations(), 7);
    }
}
