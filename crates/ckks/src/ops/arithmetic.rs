//! Ciphertext-ciphertext and ciphertext-plaintext arithmetic: addition,
//! multiplication with atomic relinearization, and rescaling.

use crate::ciphertext::Ciphertext;
use crate::error::{ArithmeticError, Error, KeyError};
use crate::keys::switching_key::SwitchingKey;
use crate::plaintext::Plaintext;
use num_bigint::BigInt;

/// `ct + pt`, requiring both operands to share a modulus and scale.
pub fn add_plain(ct: &Ciphertext, pt: &Plaintext) -> Result<Ciphertext, Error> {
    check_plaintext_alignment(ct, pt)?;
    let c0 = ct.c0().add(pt.polynomial()).mod_small(ct.modulus());
    Ok(Ciphertext {
        params: ct.params.clone(),
        seed: None,
        c0,
        c1: ct.c1.clone(),
        modulus: ct.modulus.clone(),
        scaling_factor: ct.scaling_factor.clone(),
        level: ct.level,
    })
}

/// `ct * pt`. The result's scale is `ct.scale * pt.scale`; the caller
/// typically follows with [`rescale`].
pub fn multiply_plain(ct: &Ciphertext, pt: &Plaintext) -> Result<Ciphertext, Error> {
    if &ct.params != pt.parameters() {
        return Err(KeyError::IncompatibleParameters.into());
    }
    let c0 = ct.c0().multiply_schoolbook(pt.polynomial(), ct.modulus()).mod_small(ct.modulus());
    let c1 = ct.c1().multiply_schoolbook(pt.polynomial(), ct.modulus()).mod_small(ct.modulus());
    Ok(Ciphertext {
        params: ct.params.clone(),
        seed: None,
        c0,
        c1,
        modulus: ct.modulus.clone(),
        scaling_factor: &ct.scaling_factor * pt.scaling_factor(),
        level: ct.level,
    })
}

/// Raw ciphertext multiplication followed by an atomic relinearization back
/// down to a degree-2 ciphertext: `(c0, c1, c2) -> (c0', c1')` via
/// `relin_key`, a switching key from `s^2` to `s`.
pub fn multiply(ct1: &Ciphertext, ct2: &Ciphertext, relin_key: &SwitchingKey) -> Result<Ciphertext, Error> {
    ct1.check_compatible(ct2)?;
    let modulus = ct1.modulus().clone();

    let d0 = ct1.c0().multiply_schoolbook(ct2.c0(), &modulus);
    let d1 = ct1
        .c0()
        .multiply_schoolbook(ct2.c1(), &modulus)
        .add(&ct1.c1().multiply_schoolbook(ct2.c0(), &modulus));
    let d2 = ct1.c1().multiply_schoolbook(ct2.c1(), &modulus);

    let (r0, r1) = relin_key.switch(&d2);
    let c0 = d0.add(&r0).mod_small(&modulus);
    let c1 = d1.add(&r1).mod_small(&modulus);

    Ok(Ciphertext {
        params: ct1.params.clone(),
        seed: None,
        c0,
        c1,
        modulus,
        scaling_factor: &ct1.scaling_factor * &ct2.scaling_factor,
        level: ct1.level,
    })
}

/// Drops the scaling factor back down by dividing `(c0, c1)` and the
/// modulus by `ct.scaling_factor`, rounding to the nearest integer.
pub fn rescale(ct: &Ciphertext) -> Result<Ciphertext, Error> {
    if ct.modulus() <= ct.scaling_factor() {
        return Err(ArithmeticError::ModulusChainExhausted.into());
    }
    let new_modulus = ct.modulus() / ct.scaling_factor();
    let c0 = ct.c0().mod_small(ct.modulus()).scalar_integer_divide(ct.scaling_factor()).mod_small(&new_modulus);
    let c1 = ct.c1().mod_small(ct.modulus()).scalar_integer_divide(ct.scaling_factor()).mod_small(&new_modulus);
    Ok(Ciphertext {
        params: ct.params.clone(),
        seed: None,
        c0,
        c1,
        modulus: new_modulus,
        scaling_factor: ct.scaling_factor.clone(),
        level: ct.level + 1,
    })
}

/// Reduces `ct` to a smaller target modulus without touching the scale,
/// used to align ciphertext levels before combining them (mod-switch).
pub fn mod_switch(ct: &Ciphertext, target_modulus: &BigInt) -> Result<Ciphertext, Error> {
    if target_modulus >= ct.modulus() {
        return Ok(ct.clone());
    }
    let c0 = ct.c0().mod_small(ct.modulus()).modulo(target_modulus);
    let c1 = ct.c1().mod_small(ct.modulus()).modulo(target_modulus);
    Ok(Ciphertext {
        params: ct.params.clone(),
        seed: None,
        c0,
        c1,
        modulus: target_modulus.clone(),
        scaling_factor: ct.scaling_factor.clone(),
        level: ct.level,
    })
}

fn check_plaintext_alignment(ct: &Ciphertext, pt: &Plaintext) -> Result<(), Error> {
    if &ct.params != pt.parameters() {
        return Err(KeyError::IncompatibleParameters.into());
    }
    if ct.scaling_factor() != pt.scaling_factor() {
        return Err(ArithmeticError::ScaleMismatch(
            ct.scaling_factor().to_string(),
            pt.scaling_factor().to_string(),
        )
        .into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::{decode, encode};
    use crate::keys::KeyGenerator;
    use crate::parameters::Parameters;
    use ckks_traits::{FheDecrypter, FheEncrypter};
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
    fn multiply_then_rescale_recovers_the_product() {
        let params = test_params();
        let mut rng = thread_rng();
        let keygen = KeyGenerator::new(&params, &mut rng);
        let sk = keygen.secret_key();
        let rlk = keygen.generate_relinearization_key(&mut rng);

        let pt1 = encode(&params, &[Complex64::new(2.0, 0.0)]).unwrap();
        let pt2 = encode(&params, &[Complex64::new(3.0, 0.0)]).unwrap();
        let ct1 = sk.try_encrypt(&pt1).unwrap();
        let ct2 = sk.try_encrypt(&pt2).unwrap();

        let product = multiply(&ct1, &ct2, &rlk).unwrap();
        let rescaled = rescale(&product).unwrap();

        let pt = sk.try_decrypt(&rescaled).unwrap();
        let values = decode(&pt).unwrap();
        assert!((values[0].re - 6.0).abs() < 1e-1);
    }

    #[test]
    fn rejects_mismatched_plaintext_scale() {
        let params = test_params();
        let mut rng = thread_rng();
        let keygen = KeyGenerator::new(&params, &mut rng);
        let sk = keygen.secret_key();
        let pt = encode(&params, &[Complex64::new(1.0, 0.0)]).unwrap();
        let ct = sk.try_encrypt(&pt).unwrap();
        let other_pt = crate::encoder::encode_at_scale(&params, &[Complex64::new(1.0, 0.0)], BigInt::from(7)).unwrap();
        assert!(add_plain(&ct, &other_pt).is_err());
    }
}
