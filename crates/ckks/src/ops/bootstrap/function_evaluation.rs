//! Homomorphic evaluation of `sin(2*pi*x) * q / (2*pi)`, the periodic
//! function used to strip off the multiple of `q` introduced by
//! [`super::mod_raise`]. Built from a degree-7 Taylor expansion of `exp`
//! evaluated on a scaled-down input and undone by repeated squaring, then
//! turned into a sine via the `sin(x) = Im(e^ix)` identity.

use crate::ciphertext::Ciphertext;
use crate::encoder::encode_at_scale;
use crate::error::Error;
use crate::keys::switching_key::SwitchingKey;
use crate::ops::arithmetic::{add_plain, multiply, multiply_plain, rescale};
use crate::ops::rotation::conjugate;
use num_bigint::BigInt;
use num_complex::Complex64;

const TAYLOR_COEFFICIENTS: [f64; 8] = [
    1.0,
    1.0,
    1.0 / 2.0,
    1.0 / 6.0,
    1.0 / 24.0,
    1.0 / 120.0,
    1.0 / 720.0,
    1.0 / 5040.0,
];

/// Approximates `exp(ct)` via a degree-`min(7, taylor_iterations)` Taylor
/// expansion evaluated with Horner's method, one multiplicative level per
/// term.
fn exp_taylor(ct: &Ciphertext, degree: usize, relin_key: &SwitchingKey) -> Result<Ciphertext, Error> {
    let params = ct.parameters().clone();
    let degree = degree.min(7).max(1);

    let mut result = trivial_ciphertext(
        &params,
        TAYLOR_COEFFICIENTS[degree],
        ct.scaling_factor().clone(),
        ct.modulus().clone(),
    )?;
    for k in (0..degree).rev() {
        let product = multiply(&result, ct, relin_key)?;
        let rescaled = rescale(&product)?;
        let constant_term = constant_plaintext(&params, TAYLOR_COEFFICIENTS[k], rescaled.scaling_factor().clone())?;
        result = add_plain(&rescaled, &constant_term)?;
    }
    Ok(result)
}

fn constant_plaintext(
    params: &std::sync::Arc<crate::parameters::Parameters>,
    value: f64,
    scaling_factor: BigInt,
) -> Result<crate::plaintext::Plaintext, Error> {
    let values = vec![Complex64::new(value, 0.0); params.num_slots()];
    encode_at_scale(params, &values, scaling_factor)
}

/// A constant encrypted with `c1 = 0`, which decrypts correctly under any
/// secret key and seeds a Horner accumulator without spending a real
/// encryption.
fn trivial_ciphertext(
    params: &std::sync::Arc<crate::parameters::Parameters>,
    value: f64,
    scaling_factor: BigInt,
    modulus: BigInt,
) -> Result<Ciphertext, Error> {
    let pt = constant_plaintext(params, value, scaling_factor)?;
    let c0 = pt.polynomial().modulo(&modulus);
    let c1 = ckks_math::rq::Polynomial::zero(params.degree());
    Ok(Ciphertext::new(params.clone(), c0, c1, modulus, pt.scaling_factor().clone()))
}

/// `exp(ct)` evaluated by computing `exp(ct / 2^iterations)` via Taylor and
/// squaring the result `iterations` times.
pub fn exp(ct: &Ciphertext, iterations: usize, relin_key: &SwitchingKey) -> Result<Ciphertext, Error> {
    let scale = 1.0 / (1u64 << iterations) as f64;
    let scaled = scale_ciphertext(ct, scale)?;
    let mut result = exp_taylor(&scaled, 7, relin_key)?;
    for _ in 0..iterations {
        let squared = multiply(&result, &result, relin_key)?;
        result = rescale(&squared)?;
    }
    Ok(result)
}

fn scale_ciphertext(ct: &Ciphertext, scale: f64) -> Result<Ciphertext, Error> {
    let pt = constant_plaintext(ct.parameters(), scale, ct.parameters().scaling_factor().clone())?;
    let product = multiply_plain(ct, &pt)?;
    rescale(&product)
}

/// `sin(x) = (e^(ix) - e^(-ix)) / 2i`, computed from a single call to
/// [`exp`] on `i * x` via conjugation instead of a second Taylor expansion
/// (`e^(-ix) = conj(e^(ix))` for real `x`).
pub fn sine_via_exponentials(
    ct: &Ciphertext,
    iterations: usize,
    relin_key: &SwitchingKey,
    conjugation_key: &SwitchingKey,
) -> Result<Ciphertext, Error> {
    let i_times_ct = multiply_by_i(ct)?;
    let exp_ix = exp(&i_times_ct, iterations, relin_key)?;
    let exp_minus_ix = conjugate(&exp_ix, conjugation_key)?;

    let diff = &exp_ix - &exp_minus_ix;
    divide_by_two_i(&diff)
}

/// Multiplies every slot by `i`; `constant` only carries real values, so
/// this builds the all-`i` plaintext vector directly.
fn multiply_by_i(ct: &Ciphertext) -> Result<Ciphertext, Error> {
    let values = vec![Complex64::new(0.0, 1.0); ct.parameters().num_slots()];
    let i_pt = encode_at_scale(ct.parameters(), &values, ct.scaling_factor().clone())?;
    let product = multiply_plain(ct, &i_pt)?;
    rescale(&product)
}

fn divide_by_two_i(ct: &Ciphertext) -> Result<Ciphertext, Error> {
    let values = vec![Complex64::new(0.0, -0.5); ct.parameters().num_slots()];
    let pt = encode_at_scale(ct.parameters(), &values, ct.parameters().scaling_factor().clone())?;
    let product = multiply_plain(ct, &pt)?;
    rescale(&product)
}
