//! Narrow trait surface shared by the encoding and encryption layers.
//!
//! These traits carry no dependency on any concrete parameter, plaintext or
//! ciphertext type: the concrete crate implements them on its own types so
//! that call sites read as `Plaintext::try_encode(values, scale, &params)`
//! rather than a family of inherent methods with slightly different names.

/// Turns a batch of values into `Self` (typically a plaintext).
pub trait FheEncoder<T> {
    type Error;
    type Params;

    fn try_encode(value: T, scaling_factor: u64, params: &Self::Params) -> Result<Self, Self::Error>
    where
        Self: Sized;
}

/// Turns `Self` (typically a plaintext) back into a batch of values.
pub trait FheDecoder<T> {
    type Error;

    fn try_decode(&self) -> Result<T, Self::Error>;
}

/// Encrypts a plaintext `P` into a ciphertext `C`.
pub trait FheEncrypter<P, C> {
    type Error;

    fn try_encrypt(&self, plaintext: &P) -> Result<C, Self::Error>;
}

/// Decrypts a ciphertext `C` back into a plaintext `P`.
pub trait FheDecrypter<P, C> {
    type Error;

    fn try_decrypt(&self, ciphertext: &C) -> Result<P, Self::Error>;
}
