//! Ciphertexts: an encryption of a [`crate::plaintext::Plaintext`] under a
//! secret key, carried as a pair of ring elements plus the modulus and
//! scaling factor in force at the current level.

use crate::error::{ArithmeticError, Error};
use crate::parameters::Parameters;
use ckks_math::rq::Polynomial;
use num_bigint::BigInt;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use std::sync::Arc;

/// `c0 + c1 * s` decrypts an encryption of the underlying message. `c1` can
/// optionally be regenerated from `seed` rather than transmitted, the way a
/// freshly sampled public-key component can.
#[derive(Debug, Clone)]
pub struct Ciphertext {
    pub(crate) params: Arc<Parameters>,
    pub(crate) seed: Option<<ChaCha8Rng as SeedableRng>::Seed>,
    pub(crate) c0: Polynomial,
    pub(crate) c1: Polynomial,
    pub(crate) modulus: BigInt,
    pub(crate) scaling_factor: BigInt,
    pub(crate) level: usize,
}

impl PartialEq for Ciphertext {
    fn eq(&self, other: &Self) -> bool {
        self.params == other.params
            && self.c0 == other.c0
            && self.c1 == other.c1
            && self.modulus == other.modulus
            && self.scaling_factor == other.scaling_factor
    }
}
impl Eq for Ciphertext {}

impl Ciphertext {
    pub(crate) fn new(
        params: Arc<Parameters>,
        c0: Polynomial,
        c1: Polynomial,
        modulus: BigInt,
        scaling_factor: BigInt,
    ) -> Self {
        Self {
            params,
            seed: None,
            c0,
            c1,
            modulus,
            scaling_factor,
            level: 0,
        }
    }

    pub fn parameters(&self) -> &Arc<Parameters> {
        &self.params
    }

    pub fn c0(&self) -> &Polynomial {
        &self.c0
    }

    pub fn c1(&self) -> &Polynomial {
        &self.c1
    }

    pub fn modulus(&self) -> &BigInt {
        &self.modulus
    }

    pub fn scaling_factor(&self) -> &BigInt {
        &self.scaling_factor
    }

    pub fn level(&self) -> usize {
        self.level
    }

    pub(crate) fn check_compatible(&self, other: &Self) -> Result<(), Error> {
        if self.params != other.params {
            return Err(crate::error::KeyError::IncompatibleParameters.into());
        }
        if self.modulus != other.modulus || self.scaling_factor != other.scaling_factor {
            return Err(ArithmeticError::LevelMismatch(self.level, other.level).into());
        }
        Ok(())
    }
}

impl Add for &Ciphertext {
    type Output = Ciphertext;

    fn add(self, rhs: &Ciphertext) -> Ciphertext {
        self.check_compatible(rhs).expect("incompatible ciphertexts");
        Ciphertext {
            params: self.params.clone(),
            seed: None,
            c0: self.c0.add(&rhs.c0).mod_small(&self.modulus),
            c1: self.c1.add(&rhs.c1).mod_small(&self.modulus),
            modulus: self.modulus.clone(),
            scaling_factor: self.scaling_factor.clone(),
            level: self.level,
        }
    }
}

impl AddAssign<&Ciphertext> for Ciphertext {
    fn add_assign(&mut self, rhs: &Ciphertext) {
        *self = &*self + rhs;
    }
}

impl Sub for &Ciphertext {
    type Output = Ciphertext;

    fn sub(self, rhs: &Ciphertext) -> Ciphertext {
        self.check_compatible(rhs).expect("incompatible ciphertexts");
        Ciphertext {
            params: self.params.clone(),
            seed: None,
            c0: self.c0.sub(&rhs.c0).mod_small(&self.modulus),
            c1: self.c1.sub(&rhs.c1).mod_small(&self.modulus),
            modulus: self.modulus.clone(),
            scaling_factor: self.scaling_factor.clone(),
            level: self.level,
        }
    }
}

impl SubAssign<&Ciphertext> for Ciphertext {
    fn sub_assign(&mut self, rhs: &Ciphertext) {
        *self = &*self - rhs;
    }
}

impl Neg for &Ciphertext {
    type Output = Ciphertext;

    fn neg(self) -> Ciphertext {
        Ciphertext {
            params: self.params.clone(),
            seed: None,
            c0: self.c0.neg().mod_small(&self.modulus),
            c1: self.c1.neg().mod_small(&self.modulus),
            modulus: self.modulus.clone(),
            scaling_factor: self.scaling_factor.clone(),
            level: self.level,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::KeyGenerator;
    use crate::parameters::Parameters;
    use ckks_traits::{FheDecrypter, FheEncrypter};
    use num_complex::Complex64;
    use rand::thread_rng;

    fn test_params() -> Arc<Parameters> {
        Arc::new(
            Parameters::builder()
                .polynomial_degree(16)
                .ciphertext_modulus(BigInt::from(1u64) << 100)
                .big_modulus(BigInt::from(1u64) << 140)
                .scaling_factor(BigInt::from(1u64) << 30)
                .build()
                .unwrap(),
        )
    }

    #[test]
    fn add_is_homomorphic_over_encryption() {
        let params = test_params();
        let mut rng = thread_rng();
        let keygen = KeyGenerator::new(&params, &mut rng);
        let sk = keygen.secret_key();

        let pt1 = crate::encoder::encode(&params, &[Complex64::new(1.0, 0.0)]).unwrap();
        let pt2 = crate::encoder::encode(&params, &[Complex64::new(2.5, 0.0)]).unwrap();
        let ct1 = sk.try_encrypt(&pt1).unwrap();
        let ct2 = sk.try_encrypt(&pt2).unwrap();

        let sum_ct = &ct1 + &ct2;
        let pt_sum: crate::plaintext::Plaintext = sk.try_decrypt(&sum_ct).unwrap();
        let values = crate::encoder::decode(&pt_sum).unwrap();
        assert!((values[0].re - 3.5).abs() < 1e-4);
    }
}
