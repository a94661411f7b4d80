pub mod key_generator;
pub mod public_key;
pub mod rotation_key;
pub mod secret_key;
pub mod switching_key;

pub use key_generator::KeyGenerator;
pub use public_key::PublicKey;
pub use rotation_key::RotationKey;
pub use secret_key::SecretKey;
pub use switching_key::SwitchingKey;
