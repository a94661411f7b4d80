//! Key-switching via the special "raising" modulus `P`: the standard way to
//! turn an encryption under one secret into an encryption under another
//! (relinearization, rotation, conjugation) without a digit-decomposition
//! gadget.

use crate::keys::secret_key::{sample_error, sample_uniform_poly};
use crate::parameters::Parameters;
use ckks_math::rq::Polynomial;
use rand::RngCore;
use std::sync::Arc;

/// `b = -a*s_to + e + P*s_from (mod P*q)`, `a` uniform mod `P*q`.
///
/// Switching a ciphertext component `c1` encrypted under `s_from` produces
/// `(d0, d1) = round((c1*b, c1*a) / P) mod q`, an encryption of the same
/// value under `s_to`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitchingKey {
    pub(crate) params: Arc<Parameters>,
    pub(crate) b: Polynomial,
    pub(crate) a: Polynomial,
}

impl SwitchingKey {
    pub(crate) fn generate<R: RngCore>(
        params: &Arc<Parameters>,
        s_from: &Polynomial,
        s_to: &Polynomial,
        rng: &mut R,
    ) -> Self {
        let extended = params.extended_modulus();
        let degree = params.degree();

        let a = sample_uniform_poly(rng, degree, &extended);
        let e = sample_error(rng, degree);

        let a_s_to = a.multiply_schoolbook(s_to, &extended);
        let p_s_from = s_from.scalar_multiply(params.big_modulus());
        let b = e.add(&p_s_from).sub(&a_s_to).modulo(&extended);

        Self { params: params.clone(), b, a }
    }

    /// Switches `c1` (encrypted under the key this was generated `from`)
    /// into a pair of components encrypted under the key this was generated
    /// `to`, already scaled back down to the working ciphertext modulus.
    pub(crate) fn switch(&self, c1: &Polynomial) -> (Polynomial, Polynomial) {
        let extended = self.params.extended_modulus();
        let raw_d0 = c1.multiply_schoolbook(&self.b, &extended);
        let raw_d1 = c1.multiply_schoolbook(&self.a, &extended);

        let centered_d0 = raw_d0.mod_small(&extended);
        let centered_d1 = raw_d1.mod_small(&extended);

        let d0 = centered_d0.scalar_integer_divide(self.params.big_modulus());
        let d1 = centered_d1.scalar_integer_divide(self.params.big_modulus());

        (
            d0.modulo(self.params.ciphertext_modulus()),
            d1.modulo(self.params.ciphertext_modulus()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::secret_key::SecretKey;
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
    fn switching_preserves_the_underlying_message() {
        let params = test_params();
        let mut rng = thread_rng();
        let sk_from = SecretKey::random(&params, &mut rng);
        let sk_to = SecretKey::random(&params, &mut rng);

        let swk = SwitchingKey::generate(&params, sk_from.polynomial(), sk_to.polynomial(), &mut rng);

        // Build a fresh encryption of zero under s_from: c0 = -a*s_from + e, c1 = a.
        let modulus = params.ciphertext_modulus().clone();
        let a = sample_uniform_poly(&mut rng, params.degree(), &modulus);
        let e = sample_error(&mut rng, params.degree());
        let a_s_from = a.multiply_schoolbook(sk_from.polynomial(), &modulus);
        let c0 = e.sub(&a_s_from).modulo(&modulus);

        let (d0, d1) = swk.switch(&a);
        let new_c0 = c0.add(&d0).modulo(&modulus);

        // Decrypting under s_to should still recover (approximately) zero.
        let c1_s = d1.multiply_schoolbook(sk_to.polynomial(), &modulus);
        let recovered = new_c0.add(&c1_s).mod_small(&modulus);
        for c in recovered.coeffs() {
            // Noise should stay far below the modulus.
            assert!(c.bits() < 40);
        }
    }
}
