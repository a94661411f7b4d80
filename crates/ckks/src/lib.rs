//! An implementation of the CKKS approximate homomorphic encryption scheme:
//! parameter selection, the canonical-embedding encoder, key generation,
//! ciphertext arithmetic, slot rotation, plaintext-matrix multiplication and
//! bootstrapping.
//!
//! Ring arithmetic (NTT, RNS, the negacyclic polynomial ring) lives in
//! [`ckks_math`]; the narrow encode/decode/encrypt/decrypt trait surface
//! shared with other schemes lives in [`ckks_traits`].

pub mod ciphertext;
pub mod encoder;
pub mod error;
pub mod keys;
pub mod ops;
pub mod parameters;
pub mod plaintext;

pub use ciphertext::Ciphertext;
pub use error::{Error, Result};
pub use keys::{KeyGenerator, PublicKey, RotationKey, SecretKey, SwitchingKey};
pub use parameters::{Parameters, ParametersBuilder};
pub use plaintext::Plaintext;
