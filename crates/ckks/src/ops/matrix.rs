//! Diagonal-method plaintext-matrix times ciphertext-vector multiplication
//! (Halevi-Shoup), with a naive `O(n)`-rotation version and a
//! baby-step/giant-step version that only needs `O(sqrt(n))` rotation keys.

use crate::ciphertext::Ciphertext;
use crate::encoder::encode_at_scale;
use crate::error::{Error, KeyError, ShapeError};
use crate::keys::rotation_key::RotationKey;
use crate::ops::arithmetic::{multiply_plain, rescale};
use crate::ops::rotation::rotate;
use num_complex::Complex64;
use std::collections::HashMap;

/// Cyclically shifts `values` left by `step` positions (wrapping).
fn rotate_vector(values: &[Complex64], step: i64) -> Vec<Complex64> {
    let n = values.len() as i64;
    if n == 0 {
        return values.to_vec();
    }
    let shift = step.rem_euclid(n) as usize;
    let mut result = values.to_vec();
    result.rotate_left(shift);
    result
}

fn lookup<'a>(keys: &'a HashMap<i64, RotationKey>, step: i64) -> Result<&'a RotationKey, Error> {
    keys.get(&step).ok_or_else(|| KeyError::MissingRotationKey(step).into())
}

fn validate_diagonals(ct: &Ciphertext, diagonals: &[Vec<Complex64>]) -> Result<usize, Error> {
    let num_slots = ct.parameters().num_slots();
    if diagonals.len() != num_slots {
        return Err(ShapeError::MatrixDimensionMismatch(diagonals.len(), num_slots).into());
    }
    for d in diagonals {
        if d.len() != num_slots {
            return Err(ShapeError::MatrixDimensionMismatch(d.len(), num_slots).into());
        }
    }
    Ok(num_slots)
}

/// `O(n)` rotations: multiplies `ct` by an `n x n` matrix given as its `n`
/// diagonals (`diagonals[i][j] = matrix[j][(j+i) mod n]`).
pub fn multiply_naive(
    ct: &Ciphertext,
    diagonals: &[Vec<Complex64>],
    rotation_keys: &HashMap<i64, RotationKey>,
) -> Result<Ciphertext, Error> {
    validate_diagonals(ct, diagonals)?;

    let mut acc: Option<Ciphertext> = None;
    for (i, diagonal) in diagonals.iter().enumerate() {
        if diagonal.iter().all(|v| v.norm() == 0.0) {
            continue;
        }
        let rotated = if i == 0 {
            ct.clone()
        } else {
            rotate(ct, i as i64, lookup(rotation_keys, i as i64)?.switching_key())?
        };
        let pt = encode_at_scale(ct.parameters(), diagonal, ct.scaling_factor().clone())?;
        let term = multiply_plain(&rotated, &pt)?;
        acc = Some(match acc {
            Some(existing) => (&existing + &term),
            None => term,
        });
    }

    let acc = acc.unwrap_or_else(|| ct.clone());
    rescale(&acc)
}

/// `n1 ~= sqrt(n)`: the exact square root when `n` is a perfect square,
/// otherwise `floor(sqrt(2n))`.
fn baby_step_count(n: usize) -> usize {
    let root = (n as f64).sqrt().round() as usize;
    if root * root == n {
        root
    } else {
        ((2 * n) as f64).sqrt().floor() as usize
    }
}

/// Baby-step/giant-step variant of [`multiply_naive`]: needs rotation keys
/// only for steps `0..n1` and `{0, n1, 2*n1, ...}`, where `n1` is picked by
/// [`baby_step_count`].
pub fn multiply_bsgs(
    ct: &Ciphertext,
    diagonals: &[Vec<Complex64>],
    rotation_keys: &HashMap<i64, RotationKey>,
) -> Result<Ciphertext, Error> {
    let num_slots = validate_diagonals(ct, diagonals)?;
    let n1 = baby_step_count(num_slots);
    let n2 = num_slots.div_ceil(n1);

    let mut baby_steps = Vec::with_capacity(n1);
    for b in 0..n1 {
        baby_steps.push(if b == 0 {
            ct.clone()
        } else {
            rotate(ct, b as i64, lookup(rotation_keys, b as i64)?.switching_key())?
        });
    }

    let mut acc: Option<Ciphertext> = None;
    for g in 0..n2 {
        let giant_step = (g * n1) as i64;
        let mut inner: Option<Ciphertext> = None;
        for b in 0..n1 {
            let k = g * n1 + b;
            if k >= num_slots {
                continue;
            }
            if diagonals[k].iter().all(|v| v.norm() == 0.0) {
                continue;
            }
            let rotated_diagonal = rotate_vector(&diagonals[k], -giant_step);
            let pt = encode_at_scale(ct.parameters(), &rotated_diagonal, ct.scaling_factor().clone())?;
            let term = multiply_plain(&baby_steps[b], &pt)?;
            inner = Some(match inner {
                Some(existing) => &existing + &term,
                None => term,
            });
        }
        let Some(inner) = inner else { continue };
        let inner = rescale(&inner)?;
        let rotated_outer = if giant_step == 0 {
            inner
        } else {
            rotate(&inner, giant_step, lookup(rotation_keys, giant_step)?.switching_key())?
        };
        acc = Some(match acc {
            Some(existing) => &existing + &rotated_outer,
            None => rotated_outer,
        });
    }

    acc.ok_or_else(|| ShapeError::MatrixDimensionMismatch(0, num_slots).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::{decode, encode};
    use crate::keys::KeyGenerator;
    use crate::parameters::Parameters;
    use ckks_traits::{FheDecrypter, FheEncrypter};
    use num_bigint::BigInt;
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

    fn identity_diagonals(n: usize) -> Vec<Vec<Complex64>> {
        let mut diagonals = vec![vec![Complex64::new(0.0, 0.0); n]; n];
        diagonals[0] = vec![Complex64::new(1.0, 0.0); n];
        diagonals
    }

    #[test]
    fn naive_identity_matrix_is_a_noop() {
        let params = test_params();
        let mut rng = thread_rng();
        let keygen = KeyGenerator::new(&params, &mut rng);
        let sk = keygen.secret_key();
        let num_slots = params.num_slots();
        let mut rotation_keys = HashMap::new();
        for step in 1..num_slots as i64 {
            rotation_keys.insert(step, keygen.generate_rotation_key(step, &mut rng));
        }

        let values: Vec<Complex64> = (0..num_slots).map(|i| Complex64::new(i as f64, 0.0)).collect();
        let pt = encode(&params, &values).unwrap();
        let ct = sk.try_encrypt(&pt).unwrap();

        let result = multiply_naive(&ct, &identity_diagonals(num_slots), &rotation_keys).unwrap();
        let pt2 = sk.try_decrypt(&result).unwrap();
        let decoded = decode(&pt2).unwrap();
        for (a, b) in values.iter().zip(decoded.iter()) {
            assert!((a.re - b.re).abs() < 1e-1);
        }
    }

    #[test]
    fn bsgs_matches_naive_for_identity() {
        let params = test_params();
        let mut rng = thread_rng();
        let keygen = KeyGenerator::new(&params, &mut rng);
        let sk = keygen.secret_key();
        let num_slots = params.num_slots();
        let n1 = (num_slots as f64).sqrt().ceil() as usize;

        let mut rotation_keys = HashMap::new();
        for step in 1..n1 as i64 {
            rotation_keys.insert(step, keygen.generate_rotation_key(step, &mut rng));
        }
        let mut g = n1;
        while g < num_slots {
            rotation_keys.insert(g as i64, keygen.generate_rotation_key(g as i64, &mut rng));
            g += n1;
        }

        let values: Vec<Complex64> = (0..num_slots).map(|i| Complex64::new(i as f64, 0.0)).collect();
        let pt = encode(&params, &values).unwrap();
        let ct = sk.try_encrypt(&pt).unwrap();

        let result = multiply_bsgs(&ct, &identity_diagonals(num_slots), &rotation_keys).unwrap();
        let pt2 = sk.try_decrypt(&result).unwrap();
        let decoded = decode(&pt2).unwrap();
        for (a, b) in values.iter().zip(decoded.iter()) {
            assert!((a.re - b.re).abs() < 1e-1);
        }
    }
}
