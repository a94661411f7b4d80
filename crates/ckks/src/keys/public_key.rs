//! The public key `(p0, p1)`, an encryption of zero under the secret key,
//! safe to share for asymmetric encryption.

use crate::ciphertext::Ciphertext;
use crate::error::{Error, KeyError};
use crate::keys::secret_key::{sample_error, sample_uniform_poly, SecretKey};
use crate::parameters::Parameters;
use crate::plaintext::Plaintext;
use ckks_math::rq::Polynomial;
use ckks_math::sampler::sample_ternary;
use ckks_traits::FheEncrypter;
use num_bigint::BigInt;
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKey {
    pub(crate) params: Arc<Parameters>,
    pub(crate) p0: Polynomial,
    pub(crate) p1: Polynomial,
}

impl PublicKey {
    /// `p1` uniform mod `q`, `p0 = -p1*s + e mod q`: a fresh encryption of
    /// zero under `s`.
    pub fn generate<R: RngCore>(secret_key: &SecretKey, rng: &mut R) -> Self {
        let params = &secret_key.params;
        let modulus = params.ciphertext_modulus().clone();
        let degree = params.degree();

        let p1 = sample_uniform_poly(rng, degree, &modulus);
        let e = sample_error(rng, degree);
        let p1_s = p1.multiply_schoolbook(secret_key.polynomial(), &modulus);
        let p0 = e.sub(&p1_s).modulo(&modulus);

        Self { params: params.clone(), p0, p1 }
    }

    pub fn parameters(&self) -> &Arc<Parameters> {
        &self.params
    }
}

impl FheEncrypter<Plaintext, Ciphertext> for PublicKey {
    type Error = Error;

    /// `c0 = p0*u + e1 + Delta*m`, `c1 = p1*u + e2`, for ephemeral ternary
    /// `u` and fresh error terms `e1, e2`.
    fn try_encrypt(&self, plaintext: &Plaintext) -> Result<Ciphertext, Self::Error> {
        if &self.params != plaintext.parameters() {
            return Err(KeyError::IncompatibleParameters.into());
        }
        let modulus = self.params.ciphertext_modulus().clone();
        let degree = self.params.degree();

        let mut seed = <ChaCha8Rng as SeedableRng>::Seed::default();
        rand::thread_rng().fill(&mut seed);
        let mut rng = ChaCha8Rng::from_seed(seed);

        let u: Vec<BigInt> = sample_ternary(&mut rng, degree).into_iter().map(BigInt::from).collect();
        let u = Polynomial::new(degree, u).expect("degree matches sampled length");
        let e1 = sample_error(&mut rng, degree);
        let e2 = sample_error(&mut rng, degree);

        let c0 = self
            .p0
            .multiply_schoolbook(&u, &modulus)
            .add(&e1)
            .add(plaintext.polynomial())
            .modulo(&modulus);
        let c1 = self
            .p1
            .multiply_schoolbook(&u, &modulus)
            .add(&e2)
            .modulo(&modulus);

        Ok(Ciphertext::new(self.params.clone(), c0, c1, modulus, plaintext.scaling_factor().clone()))
    }
}
