//! Polynomials in `Z[X]/(X^N + 1)` with arbitrary-precision coefficients.
//!
//! Coefficients stay monolithic big integers at every step; RNS/NTT is
//! purely an accelerator invoked from inside [`Polynomial::multiply`] and
//! never a persistent representation, so there is no `change_representation`
//! dance here the way there is in a ring that keeps polynomials resident in
//! NTT form.

use crate::error::MathError;
use crate::fft::fft;
use crate::rns::RnsContext;
use crate::zq::mod_exp;
use num_bigint::{BigInt, Sign};
use num_complex::Complex64;
use num_traits::{ToPrimitive, Zero};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Polynomial {
    degree: usize,
    coeffs: Vec<BigInt>,
}

impl Polynomial {
    pub fn new(degree: usize, coeffs: Vec<BigInt>) -> Result<Self, MathError> {
        if coeffs.len() != degree {
            return Err(MathError::ShapeMismatch {
                expected: degree,
                found: coeffs.len(),
            });
        }
        if !degree.is_power_of_two() {
            return Err(MathError::DegreeNotPowerOfTwo(degree));
        }
        Ok(Self { degree, coeffs })
    }

    pub fn zero(degree: usize) -> Self {
        Self {
            degree,
            coeffs: vec![BigInt::zero(); degree],
        }
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    pub fn coeffs(&self) -> &[BigInt] {
        &self.coeffs
    }

    pub fn coeffs_mut(&mut self) -> &mut [BigInt] {
        &mut self.coeffs
    }

    pub fn into_coeffs(self) -> Vec<BigInt> {
        self.coeffs
    }

    pub fn add(&self, other: &Self) -> Self {
        let coeffs = self
            .coeffs
            .iter()
            .zip(other.coeffs.iter())
            .map(|(a, b)| a + b)
            .collect();
        Self { degree: self.degree, coeffs }
    }

    pub fn sub(&self, other: &Self) -> Self {
        let coeffs = self
            .coeffs
            .iter()
            .zip(other.coeffs.iter())
            .map(|(a, b)| a - b)
            .collect();
        Self { degree: self.degree, coeffs }
    }

    pub fn neg(&self) -> Self {
        let coeffs = self.coeffs.iter().map(|a| -a).collect();
        Self { degree: self.degree, coeffs }
    }

    pub fn scalar_multiply(&self, scalar: &BigInt) -> Self {
        let coeffs = self.coeffs.iter().map(|a| a * scalar).collect();
        Self { degree: self.degree, coeffs }
    }

    /// Rounded integer division of every coefficient by `scalar`, dividing
    /// exactly rather than through a floating-point intermediate.
    pub fn scalar_integer_divide(&self, scalar: &BigInt) -> Self {
        let half: BigInt = scalar / 2;
        let coeffs = self
            .coeffs
            .iter()
            .map(|a| {
                if a.sign() == Sign::Minus {
                    -((-a + &half) / scalar)
                } else {
                    (a + &half) / scalar
                }
            })
            .collect();
        Self { degree: self.degree, coeffs }
    }

    /// Reduces every coefficient into `[0, modulus)`.
    pub fn modulo(&self, modulus: &BigInt) -> Self {
        let coeffs = self
            .coeffs
            .iter()
            .map(|a| {
                let r = a % modulus;
                if r.sign() == Sign::Minus {
                    r + modulus
                } else {
                    r
                }
            })
            .collect();
        Self { degree: self.degree, coeffs }
    }

    /// Reduces every coefficient into the balanced range `(-modulus/2,
    /// modulus/2]`.
    pub fn mod_small(&self, modulus: &BigInt) -> Self {
        let reduced = self.modulo(modulus);
        let half = modulus / 2;
        let coeffs = reduced
            .coeffs
            .into_iter()
            .map(|c| if c > half { c - modulus } else { c })
            .collect();
        Self { degree: self.degree, coeffs }
    }

    /// Schoolbook negacyclic convolution, reduced modulo `modulus`. `O(N^2)`
    /// — used when no RNS/NTT context is supplied.
    pub fn multiply_schoolbook(&self, other: &Self, modulus: &BigInt) -> Self {
        let n = self.degree;
        let mut acc = vec![BigInt::zero(); n];
        for i in 0..n {
            if self.coeffs[i].is_zero() {
                continue;
            }
            for j in 0..n {
                if other.coeffs[j].is_zero() {
                    continue;
                }
                let prod = &self.coeffs[i] * &other.coeffs[j];
                let idx = i + j;
                if idx < n {
                    acc[idx] += prod;
                } else {
                    acc[idx - n] -= prod;
                }
            }
        }
        Self { degree: n, coeffs: acc }.modulo(modulus)
    }

    /// Negacyclic convolution via a single-prime NTT. `modulus` must equal
    /// the prime backing `ntt`.
    pub fn multiply_ntt(&self, other: &Self, ntt: &crate::ntt::NttOperator) -> Self {
        let p = ntt.modulus();
        let to_u64 = |c: &BigInt| -> u64 {
            let m = BigInt::from(p);
            let r = ((c % &m) + &m) % &m;
            r.to_u64().unwrap_or(0)
        };
        let mut a: Vec<u64> = self.coeffs.iter().map(to_u64).collect();
        let mut b: Vec<u64> = other.coeffs.iter().map(to_u64).collect();
        ntt.forward(&mut a);
        ntt.forward(&mut b);
        let mut c: Vec<u64> = a
            .iter()
            .zip(b.iter())
            .map(|(x, y)| crate::zq::mul_mod(*x, *y, p))
            .collect();
        ntt.inverse(&mut c);
        let coeffs = c.into_iter().map(BigInt::from).collect();
        Self { degree: self.degree, coeffs }
    }

    /// Negacyclic convolution through an RNS basis: decompose each
    /// coefficient into residues, multiply per-limb via NTT, reconstruct
    /// via CRT and reduce modulo `modulus`.
    pub fn multiply_rns(&self, other: &Self, rns: &RnsContext, modulus: &BigInt) -> Self {
        let n = self.degree;
        let num_primes = rns.primes().len();

        let mut residues_a = vec![vec![0u64; n]; num_primes];
        let mut residues_b = vec![vec![0u64; n]; num_primes];
        for k in 0..n {
            let ra = rns.decompose(&self.coeffs[k]);
            let rb = rns.decompose(&other.coeffs[k]);
            for i in 0..num_primes {
                residues_a[i][k] = ra[i];
                residues_b[i][k] = rb[i];
            }
        }

        let mut product_residues = vec![vec![0u64; n]; num_primes];
        for i in 0..num_primes {
            let ntt = rns.ntt(i);
            let p = ntt.modulus();
            ntt.forward(&mut residues_a[i]);
            ntt.forward(&mut residues_b[i]);
            for k in 0..n {
                product_residues[i][k] = crate::zq::mul_mod(residues_a[i][k], residues_b[i][k], p);
            }
            ntt.inverse(&mut product_residues[i]);
        }

        let mut coeffs = Vec::with_capacity(n);
        for k in 0..n {
            let residues: Vec<u64> = (0..num_primes).map(|i| product_residues[i][k]).collect();
            coeffs.push(BigInt::from(rns.reconstruct(&residues)));
        }
        Self { degree: n, coeffs }.modulo(modulus)
    }

    /// Floating-point convolution via zero-padded FFT, for debugging/cross
    /// checking the exact paths above. Coefficients are rounded to the
    /// nearest integer and reduced modulo `modulus`.
    pub fn multiply_fft(&self, other: &Self, modulus: &BigInt) -> Self {
        let n = self.degree;
        let fft_len = (2 * n).next_power_of_two() * 4;
        let to_complex = |p: &Polynomial| -> Vec<Complex64> {
            let mut v = vec![Complex64::new(0.0, 0.0); fft_len];
            for (i, c) in p.coeffs.iter().enumerate() {
                v[i] = Complex64::new(c.to_f64_lossy(), 0.0);
            }
            v
        };
        let mut a = to_complex(self);
        let mut b = to_complex(other);
        fft(&mut a, false);
        fft(&mut b, false);
        let mut c: Vec<Complex64> = a.iter().zip(b.iter()).map(|(x, y)| x * y).collect();
        fft(&mut c, true);

        let mut acc = vec![BigInt::zero(); n];
        for idx in 0..fft_len {
            let rounded = BigInt::from(c[idx].re.round() as i64);
            let fold = idx % n;
            if (idx / n) % 2 == 0 {
                acc[fold] += rounded;
            } else {
                acc[fold] -= rounded;
            }
        }
        Self { degree: n, coeffs: acc }.modulo(modulus)
    }

    /// Applies the Galois automorphism `X -> X^(5^r mod 2N)`, the
    /// rotate-by-`r` operator used for CKKS slot rotation.
    pub fn apply_automorphism(&self, exponent: u64) -> Self {
        let n = self.degree;
        let m = 2 * n as u64;
        let mut coeffs = vec![BigInt::zero(); n];
        for i in 0..n {
            let dest = ((i as u64 * exponent) % m) as usize;
            if dest < n {
                coeffs[dest] += &self.coeffs[i];
            } else {
                coeffs[dest - n] -= &self.coeffs[i];
            }
        }
        Self { degree: n, coeffs }
    }

    /// `X -> X^(5^r mod 2N)`.
    pub fn rotate(&self, r: i64) -> Self {
        let m = 2 * self.degree as u64;
        let exponent = mod_exp(5, r.rem_euclid(m as i64) as u64, m);
        self.apply_automorphism(exponent)
    }

    /// `X -> X^-1`, i.e. complex conjugation of the encoded slots.
    pub fn conjugate(&self) -> Self {
        let m = 2 * self.degree as u64;
        self.apply_automorphism(m - 1)
    }

    /// Splits every coefficient into `levels` digits in base `base`
    /// (balanced, most significant digit last), for digit
    /// decomposition/gadget based key switching.
    pub fn base_decompose(&self, base: &BigInt, levels: usize) -> Vec<Self> {
        let mut remainder = self.coeffs.clone();
        let half = base / 2;
        let mut digits = Vec::with_capacity(levels);
        for _ in 0..levels {
            let mut digit = Vec::with_capacity(self.degree);
            for r in remainder.iter_mut() {
                let mut d = &*r % base;
                if d.sign() == Sign::Minus {
                    d += base;
                }
                if d > half {
                    d -= base;
                }
                *r = (&*r - &d) / base;
                digit.push(d);
            }
            digits.push(Self { degree: self.degree, coeffs: digit });
        }
        digits
    }
}

trait ToF64Lossy {
    fn to_f64_lossy(&self) -> f64;
}

impl ToF64Lossy for BigInt {
    fn to_f64_lossy(&self) -> f64 {
        self.to_f64().unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ntt::NttOperator;
    use crate::zq::generate_prime;

    fn sample_poly(n: usize, values: &[i64]) -> Polynomial {
        Polynomial::new(n, values.iter().map(|&v| BigInt::from(v)).collect()).unwrap()
    }

    #[test]
    fn add_sub_are_inverse() {
        let a = sample_poly(4, &[1, 2, 3, 4]);
        let b = sample_poly(4, &[5, -1, 0, 2]);
        let sum = a.add(&b);
        let back = sum.sub(&b);
        assert_eq!(back, a);
    }

    #[test]
    fn schoolbook_and_ntt_multiplication_agree() {
        let n = 8;
        let p = generate_prime(40, 2 * n as u64, &[]).unwrap();
        let ntt = NttOperator::new(n, p).unwrap();
        let modulus = BigInt::from(p);

        let a = sample_poly(n, &[1, 2, 3, 4, 5, 6, 7, 8]);
        let b = sample_poly(n, &[8, 7, 6, 5, 4, 3, 2, 1]);

        let via_schoolbook = a.multiply_schoolbook(&b, &modulus);
        let via_ntt = a.multiply_ntt(&b, &ntt);
        assert_eq!(via_schoolbook, via_ntt);
    }

    #[test]
    fn rns_multiplication_matches_schoolbook() {
        let n = 8;
        let rns = RnsContext::new(3, 30, n).unwrap();
        let modulus = rns.modulus_signed();

        let a = sample_poly(n, &[1, -2, 3, -4, 5, -6, 7, -8]);
        let b = sample_poly(n, &[2, 2, 2, 2, 2, 2, 2, 2]);

        let via_schoolbook = a.multiply_schoolbook(&b, &modulus);
        let via_rns = a.multiply_rns(&b, &rns, &modulus);
        assert_eq!(via_schoolbook, via_rns);
    }

    #[test]
    fn conjugate_is_involution() {
        let a = sample_poly(8, &[1, 2, 3, 4, 5, 6, 7, 8]);
        let modulus = BigInt::from(1_000_003);
        let twice = a.conjugate().conjugate().modulo(&modulus);
        assert_eq!(twice, a.modulo(&modulus));
    }

    #[test]
    fn base_decompose_reconstructs() {
        let a = sample_poly(4, &[123, -456, 789, 0]);
        let base = BigInt::from(16);
        let digits = a.base_decompose(&base, 4);
        let mut acc = Polynomial::zero(4);
        let mut scale = BigInt::from(1);
        for digit in &digits {
            acc = acc.add(&digit.scalar_multiply(&scale));
            scale *= &base;
        }
        assert_eq!(acc, a);
    }

    #[test]
    fn mod_small_is_balanced() {
        let modulus = BigInt::from(17);
        let a = sample_poly(4, &[0, 8, 9, 16]);
        let reduced = a.mod_small(&modulus);
        for c in reduced.coeffs() {
            assert!(*c > -modulus.clone() / 2 && *c <= modulus.clone() / 2);
        }
    }
}
