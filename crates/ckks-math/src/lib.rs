//! Number-theoretic and polynomial-ring primitives backing the CKKS engine:
//! modular arithmetic, negacyclic NTT, RNS/CRT, the canonical-embedding FFT,
//! the big-integer polynomial ring and the randomized coefficient samplers.

pub mod error;
pub mod fft;
pub mod ntt;
pub mod rns;
pub mod rq;
pub mod sampler;
pub mod zq;

pub use error::MathError;
pub use fft::FftContext;
pub use ntt::NttOperator;
pub use rns::RnsContext;
pub use rq::Polynomial;
