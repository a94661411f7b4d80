//! Encoded messages: a polynomial carrying a scaling factor, prior to
//! encryption.

use crate::parameters::Parameters;
use ckks_math::rq::Polynomial;
use num_bigint::BigInt;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plaintext {
    pub(crate) params: Arc<Parameters>,
    pub(crate) poly: Polynomial,
    pub(crate) scaling_factor: BigInt,
}

impl Plaintext {
    pub(crate) fn new(params: Arc<Parameters>, poly: Polynomial, scaling_factor: BigInt) -> Self {
        Self { params, poly, scaling_factor }
    }

    pub fn parameters(&self) -> &Arc<Parameters> {
        &self.params
    }

    pub fn polynomial(&self) -> &Polynomial {
        &self.poly
    }

    pub fn scaling_factor(&self) -> &BigInt {
        &self.scaling_factor
    }
}
