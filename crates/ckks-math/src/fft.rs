//! Canonical-embedding encoder transform.
//!
//! A degree-`N` cyclotomic polynomial ring `R[X]/(X^N + 1)` embeds into
//! `C^N` by evaluating at the `N` primitive `2N`-th roots of unity. Taking
//! one representative from each conjugate pair gives `N/2` independent
//! complex slots, which is what [`FftContext::embedding_inv`] packs into a
//! real coefficient vector and [`FftContext::embedding`] unpacks again.

use num_complex::Complex64;
use std::f64::consts::PI;

#[derive(Debug, Clone, PartialEq)]
pub struct FftContext {
    degree: usize,
    fft_length: usize, // M = 2 * degree
    rot_group: Vec<usize>,
    roots_of_unity: Vec<Complex64>,
}

impl FftContext {
    /// `degree` is the ring degree `N`; the number of usable complex slots
    /// is `N / 2`.
    pub fn new(degree: usize) -> Self {
        let fft_length = 2 * degree;
        let num_slots = degree / 2;

        let mut rot_group = vec![1usize; num_slots];
        for i in 1..num_slots {
            rot_group[i] = (5 * rot_group[i - 1]) % fft_length;
        }

        let roots_of_unity = (0..fft_length)
            .map(|k| Complex64::new(0.0, 2.0 * PI * (k as f64) / (fft_length as f64)).exp())
            .collect();

        Self {
            degree,
            fft_length,
            rot_group,
            roots_of_unity,
        }
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    pub fn num_slots(&self) -> usize {
        self.degree / 2
    }

    fn root(&self, exponent: usize) -> Complex64 {
        self.roots_of_unity[exponent % self.fft_length]
    }

    /// Packs `N/2` complex slot values into `N` real polynomial
    /// coefficients (the encode direction). Values beyond `num_slots` are
    /// ignored; fewer than `num_slots` values are zero-padded.
    pub fn embedding_inv(&self, values: &[Complex64]) -> Vec<f64> {
        let n = self.degree;
        let slots = self.num_slots();
        let mut padded = vec![Complex64::new(0.0, 0.0); slots];
        for (dst, src) in padded.iter_mut().zip(values.iter()) {
            *dst = *src;
        }

        let mut coeffs = vec![0.0f64; n];
        for (i, coeff) in coeffs.iter_mut().enumerate() {
            let mut acc = 0.0f64;
            for (j, value) in padded.iter().enumerate() {
                let exponent = (self.rot_group[j] * i) % self.fft_length;
                let inv_root = self.root(self.fft_length - exponent);
                acc += (value * inv_root).re;
            }
            *coeff = 2.0 * acc / n as f64;
        }
        coeffs
    }

    /// Evaluates the `N`-coefficient real polynomial at the `N/2`
    /// conjugate-pair representatives (the decode direction).
    pub fn embedding(&self, coeffs: &[f64]) -> Vec<Complex64> {
        let slots = self.num_slots();
        let mut values = vec![Complex64::new(0.0, 0.0); slots];
        for (j, value) in values.iter_mut().enumerate() {
            let mut acc = Complex64::new(0.0, 0.0);
            for (i, &coeff) in coeffs.iter().enumerate() {
                let exponent = (self.rot_group[j] * i) % self.fft_length;
                acc += coeff * self.root(exponent);
            }
            *value = acc;
        }
        values
    }
}

/// Plain radix-2 FFT over `Complex64`, used by the schoolbook-avoiding
/// floating-point polynomial multiplication path (debug / cross-check use
/// only — production multiplication goes through the RNS/NTT path).
pub fn fft(a: &mut [Complex64], invert: bool) {
    let n = a.len();
    if n <= 1 {
        return;
    }
    debug_assert!(n.is_power_of_two());

    let mut j = 0usize;
    for i in 1..n {
        let mut bit = n >> 1;
        while j & bit != 0 {
            j ^= bit;
            bit >>= 1;
        }
        j |= bit;
        if i < j {
            a.swap(i, j);
        }
    }

    let mut len = 2usize;
    while len <= n {
        let angle = 2.0 * PI / len as f64 * if invert { -1.0 } else { 1.0 };
        let wlen = Complex64::new(0.0, angle).exp();
        let mut i = 0;
        while i < n {
            let mut w = Complex64::new(1.0, 0.0);
            for k in 0..len / 2 {
                let u = a[i + k];
                let v = a[i + k + len / 2] * w;
                a[i + k] = u + v;
                a[i + k + len / 2] = u - v;
                w *= wlen;
            }
            i += len;
        }
        len <<= 1;
    }

    if invert {
        for x in a.iter_mut() {
            *x /= n as f64;
        }
    }
}
