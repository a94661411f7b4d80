//! The secret key `s`, a sparse ternary ring element.

use crate::ciphertext::Ciphertext;
use crate::error::{Error, KeyError};
use crate::parameters::Parameters;
use crate::plaintext::Plaintext;
use ckks_math::rq::Polynomial;
use ckks_math::sampler::{sample_discrete_gaussian, sample_hamming_weight, sample_uniform};
use ckks_traits::{FheDecrypter, FheEncrypter};
use num_bigint::BigInt;
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::sync::Arc;
use zeroize::{Zeroize, ZeroizeOnDrop};

const ERROR_STD_DEV: f64 = 3.2;

#[derive(Debug)]
pub struct SecretKey {
    pub(crate) params: Arc<Parameters>,
    pub(crate) s: Polynomial,
}

impl PartialEq for SecretKey {
    fn eq(&self, other: &Self) -> bool {
        self.params == other.params && self.s == other.s
    }
}
impl Eq for SecretKey {}

impl Zeroize for SecretKey {
    fn zeroize(&mut self) {
        for c in self.s.coeffs_mut() {
            *c = BigInt::default();
        }
    }
}
impl ZeroizeOnDrop for SecretKey {}

impl SecretKey {
    /// Samples a secret key with hamming weight `params.hamming_weight()`.
    pub fn random<R: RngCore>(params: &Arc<Parameters>, rng: &mut R) -> Self {
        let weight = params.hamming_weight();
        let coeffs: Vec<BigInt> = sample_hamming_weight(rng, params.degree(), weight)
            .into_iter()
            .map(BigInt::from)
            .collect();
        let s = Polynomial::new(params.degree(), coeffs).expect("degree matches sampled length");
        Self { params: params.clone(), s }
    }

    pub fn parameters(&self) -> &Arc<Parameters> {
        &self.params
    }

    pub(crate) fn polynomial(&self) -> &Polynomial {
        &self.s
    }
}

/// Error term sampling, shared by public-key encryption and key-switching
/// key generation.
pub(crate) fn sample_error<R: RngCore>(rng: &mut R, degree: usize) -> Polynomial {
    let coeffs: Vec<BigInt> = sample_discrete_gaussian(rng, degree, ERROR_STD_DEV)
        .into_iter()
        .map(BigInt::from)
        .collect();
    Polynomial::new(degree, coeffs).expect("degree matches sampled length")
}

pub(crate) fn sample_uniform_poly<R: RngCore>(rng: &mut R, degree: usize, modulus: &BigInt) -> Polynomial {
    let coeffs = sample_uniform(rng, modulus, degree);
    Polynomial::new(degree, coeffs).expect("degree matches sampled length")
}

impl FheEncrypter<Plaintext, Ciphertext> for SecretKey {
    type Error = Error;

    /// Symmetric-key encryption: `c0 = -a*s + e + Delta*m`, `c1 = a`.
    fn try_encrypt(&self, plaintext: &Plaintext) -> Result<Ciphertext, Self::Error> {
        if &self.params != plaintext.parameters() {
            return Err(KeyError::IncompatibleParameters.into());
        }
        let modulus = self.params.ciphertext_modulus().clone();
        let degree = self.params.degree();

        let mut seed = <ChaCha8Rng as SeedableRng>::Seed::default();
        rand::thread_rng().fill(&mut seed);
        let mut rng = ChaCha8Rng::from_seed(seed);

        let a = sample_uniform_poly(&mut rng, degree, &modulus);
        let e = sample_error(&mut rng, degree);

        let a_s = a.multiply_schoolbook(&self.s, &modulus);
        let c0 = plaintext
            .polynomial()
            .add(&e)
            .sub(&a_s)
            .modulo(&modulus);

        let mut ct = Ciphertext::new(self.params.clone(), c0, a, modulus, plaintext.scaling_factor().clone());
        ct.seed = Some(seed);
        Ok(ct)
    }
}

impl FheDecrypter<Plaintext, Ciphertext> for SecretKey {
    type Error = Error;

    fn try_decrypt(&self, ciphertext: &Ciphertext) -> Result<Plaintext, Self::Error> {
        if &self.params != ciphertext.parameters() {
            return Err(KeyError::IncompatibleParameters.into());
        }
        let modulus = ciphertext.modulus().clone();
        let c1_s = ciphertext.c1().multiply_schoolbook(&self.s, &modulus);
        let m = ciphertext
            .c0()
            .add(&c1_s)
            .mod_small(&modulus);
        Ok(Plaintext::new(self.params.clone(), m, ciphertext.scaling_factor().clone()))
    }
}
