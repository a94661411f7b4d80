//! Packs up to `N/2` complex numbers into a plaintext polynomial and back,
//! via the canonical-embedding transform in [`ckks_math::fft`].

use crate::error::{Error, ShapeError};
use crate::parameters::Parameters;
use crate::plaintext::Plaintext;
use ckks_math::fft::FftContext;
use ckks_math::rq::Polynomial;
use ckks_traits::{FheDecoder, FheEncoder};
use num_bigint::BigInt;
use num_complex::Complex64;
use num_traits::{FromPrimitive, ToPrimitive};
use std::sync::Arc;

/// Encodes `values` at the parameters' default scaling factor.
pub fn encode(params: &Arc<Parameters>, values: &[Complex64]) -> Result<Plaintext, Error> {
    encode_at_scale(params, values, params.scaling_factor().clone())
}

/// Encodes `values` at an explicit scaling factor, used when a computation
/// needs to match the scale of an existing ciphertext.
pub fn encode_at_scale(
    params: &Arc<Parameters>,
    values: &[Complex64],
    scaling_factor: BigInt,
) -> Result<Plaintext, Error> {
    let num_slots = params.num_slots();
    if values.len() > num_slots {
        return Err(ShapeError::TooManyValues {
            max: num_slots,
            found: values.len(),
        }
        .into());
    }

    let fft = FftContext::new(params.degree());
    let raw = fft.embedding_inv(values);
    let scale = scaling_factor.to_f64_lossy();
    let coeffs: Vec<BigInt> = raw
        .into_iter()
        .map(|c| BigInt::from_f64((c * scale).round()).unwrap_or_default())
        .collect();
    let poly = Polynomial::new(params.degree(), coeffs)?;
    Ok(Plaintext::new(params.clone(), poly, scaling_factor))
}

/// Recovers the complex slot values packed into `plaintext`.
pub fn decode(plaintext: &Plaintext) -> Result<Vec<Complex64>, Error> {
    let params = plaintext.parameters();
    let fft = FftContext::new(params.degree());
    let scale = plaintext.scaling_factor().to_f64_lossy();
    let raw: Vec<f64> = plaintext
        .polynomial()
        .coeffs()
        .iter()
        .map(|c| c.to_f64_lossy() / scale)
        .collect();
    Ok(fft.embedding(&raw))
}

trait ToF64Lossy {
    fn to_f64_lossy(&self) -> f64;
}
impl ToF64Lossy for BigInt {
    fn to_f64_lossy(&self) -> f64 {
        self.to_f64().unwrap_or(0.0)
    }
}

impl FheEncoder<&[Complex64]> for Plaintext {
    type Error = Error;
    type Params = Arc<Parameters>;

    fn try_encode(value: &[Complex64], scaling_factor: u64, params: &Self::Params) -> Result<Self, Self::Error> {
        encode_at_scale(params, value, BigInt::from(scaling_factor))
    }
}

impl FheDecoder<Vec<Complex64>> for Plaintext {
    type Error = Error;

    fn try_decode(&self) -> Result<Vec<Complex64>, Self::Error> {
        decode(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_params() -> Arc<Parameters> {
        Arc::new(
            Parameters::builder()
                .polynomial_degree(16)
                .ciphertext_modulus(BigInt::from(1u64) << 100)
                .big_modulus(BigInt::from(1u64) << 140)
                .scaling_factor(BigInt::from(1u64) << 40)
                .build()
                .unwrap(),
        )
    }

    #[test]
    fn encode_decode_roundtrips_within_tolerance() {
        let params = test_params();
        let values = vec![
            Complex64::new(1.0, 0.5),
            Complex64::new(-2.25, 3.0),
            Complex64::new(0.0, -1.0),
        ];
        let pt = encode(&params, &values).unwrap();
        let decoded = decode(&pt).unwrap();
        for (a, b) in values.iter().zip(decoded.iter()) {
            assert!((a - b).norm() < 1e-6);
        }
    }

    #[test]
    fn rejects_too_many_values() {
        let params = test_params();
        let values = vec![Complex64::new(0.0, 0.0); params.num_slots() + 1];
        assert!(encode(&params, &values).is_err());
    }
}
