//! Slot rotation and conjugation: apply the Galois automorphism to both
//! ciphertext components, then key-switch back to the original secret.

use crate::ciphertext::Ciphertext;
use crate::error::Error;
use crate::keys::switching_key::SwitchingKey;
use ckks_math::zq::mod_exp;

fn automorphism_exponent(degree: usize, step: i64) -> u64 {
    let m = 2 * degree as u64;
    mod_exp(5, step.rem_euclid(m as i64) as u64, m)
}

/// Cyclically shifts the encoded slots left by `step` positions.
pub fn rotate(ct: &Ciphertext, step: i64, rotation_key: &SwitchingKey) -> Result<Ciphertext, Error> {
    let exponent = automorphism_exponent(ct.parameters().degree(), step);
    apply_and_switch(ct, exponent, rotation_key)
}

/// Complex-conjugates every encoded slot.
pub fn conjugate(ct: &Ciphertext, conjugation_key: &SwitchingKey) -> Result<Ciphertext, Error> {
    let m = 2 * ct.parameters().degree() as u64;
    apply_and_switch(ct, m - 1, conjugation_key)
}

fn apply_and_switch(ct: &Ciphertext, exponent: u64, switching_key: &SwitchingKey) -> Result<Ciphertext, Error> {
    let rotated_c0 = ct.c0().apply_automorphism(exponent).modulo(ct.modulus());
    let rotated_c1 = ct.c1().apply_automorphism(exponent);

    let (d0, d1) = switching_key.switch(&rotated_c1);
    let c0 = rotated_c0.add(&d0).modulo(ct.modulus());

    Ok(Ciphertext {
        params: ct.parameters().clone(),
        seed: None,
        c0,
        c1: d1,
        modulus: ct.modulus().clone(),
        scaling_factor: ct.scaling_factor().clone(),
        level: ct.level(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::{decode, encode};
    use crate::keys::KeyGenerator;
    use crate::parameters::Parameters;
    use ckks_traits::{FheDecrypter, FheEncrypter};
    use num_bigint::BigInt;
    use num_complex::Complex64;
    use rand::thread_rng;
    use std::sync::Arc;

    fn test_params() -> Arc<Parameters> {
        Arc::new(
            Parameters::builder()
                .polynomial_degree(16)
                .ciphertext_modulus(BigInt::from(1u64) << 90)
                .big_modulus(BigInt::from(1u64) << 170)
                .scaling_factor(BigInt::from(1u64) << 30)
                .build()
                .unwrap(),
        )
    }

    #[test]
    fn rotate_shifts_slots() {
        let params = test_params();
        let mut rng = thread_rng();
        let keygen = KeyGenerator::new(&params, &mut rng);
        let sk = keygen.secret_key();
        let rotk = keygen.generate_rotation_key(1, &mut rng);

        let values = vec![Complex64::new(1.0, 0.0), Complex64::new(2.0, 0.0), Complex64::new(3.0, 0.0)];
        let pt = encode(&params, &values).unwrap();
        let ct = sk.try_encrypt(&pt).unwrap();

        let rotated = rotate(&ct, 1, rotk.switching_key()).unwrap();
        let pt2 = sk.try_decrypt(&rotated).unwrap();
        let decoded = decode(&pt2).unwrap();

        assert!((decoded[0].re - 2.0).abs() < 1e-1);
        assert!((decoded[1].re - 3.0).abs() < 1e-1);
    }

    #[test]
    fn conjugate_negates_the_imaginary_part() {
        let params = test_params();
        let mut rng = thread_rng();
        let keygen = KeyGenerator::new(&params, &mut rng);
        let sk = keygen.secret_key();
        let conjk = keygen.generate_conjugation_key(&mut rng);

        let pt = encode(&params, &[Complex64::new(1.0, 2.0)]).unwrap();
        let ct = sk.try_encrypt(&pt).unwrap();

        let conjugated = conjugate(&ct, &conjk).unwrap();
        let pt2 = sk.try_decrypt(&conjugated).unwrap();
        let decoded = decode(&pt2).unwrap();

        assert!((decoded[0].re - 1.0).abs() < 1e-1);
        assert!((decoded[0].im + 2.0).abs() < 1e-1);
    }
}
