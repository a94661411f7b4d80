//! Rotation keys: a [`SwitchingKey`] from `s(X^(5^r))` back to `s(X)`, one
//! per rotation step the caller asked to support.

use crate::keys::switching_key::SwitchingKey;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotationKey {
    pub(crate) step: i64,
    pub(crate) key: SwitchingKey,
}

impl RotationKey {
    pub(crate) fn new(step: i64, key: SwitchingKey) -> Self {
        Self { step, key }
    }

    pub fn step(&self) -> i64 {
        self.step
    }

    pub(crate) fn switching_key(&self) -> &SwitchingKey {
        &self.key
    }
}
