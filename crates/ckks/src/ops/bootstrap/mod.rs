//! Bootstrapping: refreshes a ciphertext that has run out of rescale budget
//! by raising its modulus back up and homomorphically stripping off the
//! multiple of `q` the raise introduces.
//!
//! The four stages follow Cheon-Kim-Kim-Song's `ModRaise -> CoeffToSlot ->
//! EvalMod -> SlotToCoeff` pipeline, simplified at the linear-map steps: the
//! encoding/decoding matrices are applied as direct diagonal multiplies
//! (see [`context::BootstrapContext`]) over the already-packed slot
//! representation rather than through a homomorphic DFT over a
//! doubled-up ring, which keeps the ring layout from [`crate::ciphertext`]
//! unchanged throughout.

pub mod context;
pub mod function_evaluation;

use crate::ciphertext::Ciphertext;
use crate::error::Error;
use crate::keys::rotation_key::RotationKey;
use crate::keys::switching_key::SwitchingKey;
use crate::ops::arithmetic::mod_switch;
use crate::ops::matrix::multiply_naive;
use context::BootstrapContext;
use num_bigint::BigInt;
use std::collections::HashMap;

/// Raises `ct`'s modulus from its current level back up to `target_modulus`,
/// centering the coefficients first so the lift adds the smallest possible
/// multiple of the old modulus. The scale is set to the old modulus `q_old`,
/// since the raise itself introduces a factor of `q_old` that `EvalMod` must
/// later remove.
pub fn mod_raise(ct: &Ciphertext, target_modulus: &BigInt) -> Ciphertext {
    let q_old = ct.modulus().clone();
    let c0 = ct.c0().mod_small(&q_old).modulo(target_modulus);
    let c1 = ct.c1().mod_small(&q_old).modulo(target_modulus);
    Ciphertext::new(ct.parameters().clone(), c0, c1, target_modulus.clone(), q_old)
}

/// Applies the canonical-embedding matrix to `ct`'s packed slots, the first
/// linear step of bootstrapping.
pub fn coeff_to_slot(
    ctx: &BootstrapContext,
    ct: &Ciphertext,
    rotation_keys: &HashMap<i64, RotationKey>,
) -> Result<Ciphertext, Error> {
    multiply_naive(ct, &ctx.encoding_diagonals, rotation_keys)
}

/// Applies the inverse canonical-embedding matrix, the last linear step of
/// bootstrapping.
pub fn slot_to_coeff(
    ctx: &BootstrapContext,
    ct: &Ciphertext,
    rotation_keys: &HashMap<i64, RotationKey>,
) -> Result<Ciphertext, Error> {
    multiply_naive(ct, &ctx.decoding_diagonals, rotation_keys)
}

/// Runs the full bootstrapping pipeline, returning a ciphertext back under
/// its pre-bootstrap modulus `q_old` with a fresh rescale budget.
pub fn bootstrap(
    ct: &Ciphertext,
    ctx: &BootstrapContext,
    rotation_keys: &HashMap<i64, RotationKey>,
    relin_key: &SwitchingKey,
    conjugation_key: &SwitchingKey,
) -> Result<Ciphertext, Error> {
    let params = ct.parameters().clone();
    let q_old = ct.modulus().clone();
    let raised = mod_raise(ct, params.big_modulus());

    let in_slots = coeff_to_slot(ctx, &raised, rotation_keys)?;

    let two_pi_over_q = std::f64::consts::TAU / q_to_f64(&q_old);
    let scaled = scale_before_sine(&in_slots, two_pi_over_q)?;
    let sine = function_evaluation::sine_via_exponentials(
        &scaled,
        params.taylor_iterations().min(7),
        relin_key,
        conjugation_key,
    )?;
    let recovered = scale_after_sine(&sine, q_to_f64(&q_old) / std::f64::consts::TAU)?;

    let out_coeffs = slot_to_coeff(ctx, &recovered, rotation_keys)?;
    mod_switch(&out_coeffs, &q_old)
}

fn q_to_f64(q: &BigInt) -> f64 {
    use num_traits::ToPrimitive;
    q.to_f64().unwrap_or(f64::MAX)
}

fn scale_before_sine(ct: &Ciphertext, scale: f64) -> Result<Ciphertext, Error> {
    use crate::encoder::encode_at_scale;
    use crate::ops::arithmetic::{multiply_plain, rescale};
    use num_complex::Complex64;
    let values = vec![Complex64::new(scale, 0.0); ct.parameters().num_slots()];
    let pt = encode_at_scale(ct.parameters(), &values, ct.scaling_factor().clone())?;
    let product = multiply_plain(ct, &pt)?;
    rescale(&product)
}

fn scale_after_sine(ct: &Ciphertext, scale: f64) -> Result<Ciphertext, Error> {
    scale_before_sine(ct, scale)
}
