//! Ties secret-key sampling to the derived public, relinearization,
//! rotation and conjugation keys.

use crate::keys::public_key::PublicKey;
use crate::keys::rotation_key::RotationKey;
use crate::keys::secret_key::SecretKey;
use crate::keys::switching_key::SwitchingKey;
use crate::parameters::Parameters;
use rand::RngCore;
use std::sync::Arc;

pub struct KeyGenerator {
    params: Arc<Parameters>,
    secret_key: SecretKey,
}

impl KeyGenerator {
    pub fn new<R: RngCore>(params: &Arc<Parameters>, rng: &mut R) -> Self {
        Self {
            params: params.clone(),
            secret_key: SecretKey::random(params, rng),
        }
    }

    pub fn from_secret_key(secret_key: SecretKey) -> Self {
        Self {
            params: secret_key.parameters().clone(),
            secret_key,
        }
    }

    pub fn secret_key(&self) -> &SecretKey {
        &self.secret_key
    }

    pub fn generate_public_key<R: RngCore>(&self, rng: &mut R) -> PublicKey {
        PublicKey::generate(&self.secret_key, rng)
    }

    /// Key-switching key from `s^2` back to `s`, used to collapse the
    /// degree-3 result of a raw ciphertext multiplication.
    pub fn generate_relinearization_key<R: RngCore>(&self, rng: &mut R) -> SwitchingKey {
        let s = self.secret_key.polynomial();
        let modulus = self.params.ciphertext_modulus().clone();
        let s_squared = s.multiply_schoolbook(s, &modulus);
        SwitchingKey::generate(&self.params, &s_squared, s, rng)
    }

    /// Key-switching key from `s(X^(5^step))` back to `s(X)`.
    pub fn generate_rotation_key<R: RngCore>(&self, step: i64, rng: &mut R) -> RotationKey {
        let s = self.secret_key.polynomial();
        let rotated = s.rotate(step);
        RotationKey::new(step, SwitchingKey::generate(&self.params, &rotated, s, rng))
    }

    /// Key-switching key from `s(X^-1)` back to `s(X)`.
    pub fn generate_conjugation_key<R: RngCore>(&self, rng: &mut R) -> SwitchingKey {
        let s = self.secret_key.polynomial();
        let conjugated = s.conjugate();
        SwitchingKey::generate(&self.params, &conjugated, s, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigInt;
    use rand::thread_rng;

    fn test_params() -> Arc<Parameters> {
        Arc::new(
            Parameters::builder()
                .polynomial_degree(16)
                .ciphertext_modulus(BigInt::from(1u64) << 80)
                .big_modulus(BigInt::from(1u64) << 160)
                .scaling_factor(BigInt::from(1u64) << 30)
                .build()
                .unwrap(),
        )
    }

    #[test]
    fn generates_all_key_kinds() {
        let params = test_params();
        let mut rng = thread_rng();
        let keygen = KeyGenerator::new(&params, &mut rng);
        let _pk = keygen.generate_public_key(&mut rng);
        let _rlk = keygen.generate_relinearization_key(&mut rng);
        let _rotk = keygen.generate_rotation_key(1, &mut rng);
        let _conjk = keygen.generate_conjugation_key(&mut rng);
    }
}
