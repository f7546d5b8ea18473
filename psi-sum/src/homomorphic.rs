//! Additively homomorphic encryption, consumed through a capability trait so
//! the protocol rounds never depend on a concrete scheme.

use num_bigint::BigUint;
use std::fmt::Debug;

/// Errors reported by an additively homomorphic cryptosystem.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CryptosystemError {
    #[error("invalid key size: {0} bits")]
    InvalidKeySize(u64),
    #[error("plaintext does not fit in the plaintext space")]
    PlaintextOutOfRange,
    #[error("malformed ciphertext")]
    MalformedCiphertext,
}

/// An additively homomorphic public-key encryption scheme.
///
/// `homomorphic_add(encrypt(a), encrypt(b))` must decrypt to `a + b` for
/// every pair of plaintexts whose sum stays inside the plaintext space.
pub trait AdditivelyHomomorphic: Clone + Debug {
    type PublicKey: Clone + Debug;
    type SecretKey;
    type Ciphertext: Clone + Debug;

    /// Generate a fresh keypair. Called once per protocol run.
    fn generate_keypair(&self) -> Result<(Self::PublicKey, Self::SecretKey), CryptosystemError>;

    fn encrypt(
        &self,
        public_key: &Self::PublicKey,
        plaintext: &BigUint,
    ) -> Result<Self::Ciphertext, CryptosystemError>;

    fn homomorphic_add(
        &self,
        public_key: &Self::PublicKey,
        lhs: &Self::Ciphertext,
        rhs: &Self::Ciphertext,
    ) -> Result<Self::Ciphertext, CryptosystemError>;

    fn decrypt(
        &self,
        secret_key: &Self::SecretKey,
        ciphertext: &Self::Ciphertext,
    ) -> Result<BigUint, CryptosystemError>;
}
