//! Precomputed diagonals for the linear steps of bootstrapping:
//! `CoeffToSlot` packs the encoding matrix into a ciphertext-friendly set of
//! diagonals, `SlotToCoeff` does the same for its inverse.

use crate::parameters::Parameters;
use ckks_math::fft::FftContext;
use num_complex::Complex64;
use std::sync::Arc;

pub struct BootstrapContext {
    /// Diagonals of the canonical-embedding (encode) matrix, `U`.
    pub encoding_diagonals: Vec<Vec<Complex64>>,
    /// Diagonals of `U`'s conjugate transpose, used to invert it.
    pub decoding_diagonals: Vec<Vec<Complex64>>,
}

impl BootstrapContext {
    pub fn new(params: &Arc<Parameters>) -> Self {
        let num_slots = params.num_slots();
        let fft = FftContext::new(params.degree());

        // U[j][k] = root_{rot_group[j]}^k, the matrix embedding() applies.
        let mut encoding_matrix = vec![vec![Complex64::new(0.0, 0.0); num_slots]; num_slots];
        for k in 0..num_slots {
            let mut basis = vec![0.0f64; num_slots];
            basis[k] = 1.0;
            let column = fft.embedding(&basis);
            for j in 0..num_slots {
                encoding_matrix[j][k] = column[j];
            }
        }

        let encoding_diagonals = to_diagonals(&encoding_matrix);

        // The encoding matrix is (a scalar multiple of) unitary, so its
        // conjugate transpose divided by num_slots is its inverse.
        let mut decoding_matrix = vec![vec![Complex64::new(0.0, 0.0); num_slots]; num_slots];
        for j in 0..num_slots {
            for k in 0..num_slots {
                decoding_matrix[k][j] = encoding_matrix[j][k].conj() / num_slots as f64;
            }
        }
        let decoding_diagonals = to_diagonals(&decoding_matrix);

        Self { encoding_diagonals, decoding_diagonals }
    }
}

fn to_diagonals(matrix: &[Vec<Complex64>]) -> Vec<Vec<Complex64>> {
    let n = matrix.len();
    let mut diagonals = vec![vec![Complex64::new(0.0, 0.0); n]; n];
    for i in 0..n {
        for j in 0..n {
            diagonals[i][j] = matrix[j][(j + i) % n];
        }
    }
    diagonals
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decoding_matrix_inverts_encoding_matrix() {
        let params = Arc::new(
            Parameters::builder()
                .polynomial_degree(16)
                .ciphertext_modulus(num_bigint::BigInt::from(1u64) << 90)
                .big_modulus(num_bigint::BigInt::from(1u64) << 170)
                .scaling_factor(num_bigint::BigInt::from(1u64) << 30)
                .build()
                .unwrap(),
        );
        let ctx = BootstrapContext::new(&params);
        let n = params.num_slots();

        // Reconstruct both matrices from diagonals and multiply them; the
        // product should be the identity.
        let mut encoding = vec![vec![Complex64::new(0.0, 0.0); n]; n];
        let mut decoding = vec![vec![Complex64::new(0.0, 0.0); n]; n];
        for i in 0..n {
            for j in 0..n {
                encoding[j][(j + i) % n] = ctx.encoding_diagonals[i][j];
                decoding[j][(j + i) % n] = ctx.decoding_diagonals[i][j];
            }
        }

        for row in 0..n {
            for col in 0..n {
                let mut acc = Complex64::new(0.0, 0.0);
                for k in 0..n {
                    acc += decoding[row][k] * encoding[k][col];
                }
                let expected = if row == col { 1.0 } else { 0.0 };
                assert!((acc.re - expected).abs() < 1e-6, "row {row} col {col}");
            }
        }
    }
}
