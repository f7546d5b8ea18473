//! Paillier encryption, backed by the `paillier` crate.
//!
//! The protocol works on `BigUint` plaintexts; the adapter converts to and
//! from curv's `BigInt` at the boundary and adds the range checks the
//! underlying scheme leaves to the caller.

use crate::homomorphic::{AdditivelyHomomorphic, CryptosystemError};
use curv::arithmetic::Converter;
use num_bigint::BigUint;
use paillier::{
    Add, BigInt, Decrypt, DecryptionKey, Encrypt, EncryptionKey, KeyGeneration,
    Paillier as PaillierScheme, RawCiphertext, RawPlaintext,
};
use std::fmt;

/// Default modulus size of a Paillier key.
pub const DEFAULT_KEY_BITS: u64 = 2048;

/// Smallest modulus size accepted by [`Paillier::new`].
pub const MIN_KEY_BITS: u64 = 128;

fn to_bigint(value: &BigUint) -> BigInt {
    BigInt::from_bytes(&value.to_bytes_be())
}

fn to_biguint(value: &BigInt) -> BigUint {
    BigUint::from_bytes_be(&value.to_bytes())
}

/// The Paillier cryptosystem, parameterised by its modulus size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paillier {
    key_bits: u64,
}

impl Paillier {
    /// # Errors
    /// Returns `CryptosystemError::InvalidKeySize` if `key_bits` is odd or
    /// below [`MIN_KEY_BITS`].
    pub fn new(key_bits: u64) -> Result<Self, CryptosystemError> {
        if key_bits < MIN_KEY_BITS || key_bits % 2 != 0 {
            return Err(CryptosystemError::InvalidKeySize(key_bits));
        }
        Ok(Self { key_bits })
    }

    pub fn key_bits(&self) -> u64 {
        self.key_bits
    }
}

impl Default for Paillier {
    fn default() -> Self {
        Self {
            key_bits: DEFAULT_KEY_BITS,
        }
    }
}

/// Paillier public key `n` (with `n^2` cached).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PaillierPublicKey(EncryptionKey);

impl PaillierPublicKey {
    pub fn new(n: &BigUint) -> Self {
        Self(EncryptionKey::from(&to_bigint(n)))
    }

    pub fn n(&self) -> BigUint {
        to_biguint(&self.0.n)
    }

    pub fn encryption_key(&self) -> &EncryptionKey {
        &self.0
    }

    /// Ciphertexts live in `[1, n^2)`.
    fn check_ciphertext(&self, ciphertext: &PaillierCiphertext) -> Result<(), CryptosystemError> {
        if ciphertext.0 <= BigInt::from(0u32) || ciphertext.0 >= self.0.nn {
            return Err(CryptosystemError::MalformedCiphertext);
        }
        Ok(())
    }
}

/// Paillier secret key: the prime factors of `n`.
#[derive(Clone)]
pub struct PaillierSecretKey {
    public_key: PaillierPublicKey,
    decryption_key: DecryptionKey,
}

impl PaillierSecretKey {
    pub fn public_key(&self) -> &PaillierPublicKey {
        &self.public_key
    }
}

impl fmt::Debug for PaillierSecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaillierSecretKey")
            .field("public_key", &self.public_key)
            .finish_non_exhaustive()
    }
}

/// A ciphertext in `Z*_{n^2}`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PaillierCiphertext(BigInt);

impl PaillierCiphertext {
    pub fn new(value: &BigUint) -> Self {
        Self(to_bigint(value))
    }

    pub fn value(&self) -> BigUint {
        to_biguint(&self.0)
    }
}

impl AdditivelyHomomorphic for Paillier {
    type PublicKey = PaillierPublicKey;
    type SecretKey = PaillierSecretKey;
    type Ciphertext = PaillierCiphertext;

    fn generate_keypair(&self) -> Result<(PaillierPublicKey, PaillierSecretKey), CryptosystemError> {
        let bit_length = usize::try_from(self.key_bits)
            .map_err(|_| CryptosystemError::InvalidKeySize(self.key_bits))?;
        loop {
            let keypair = PaillierScheme::keypair_with_modulus_size(bit_length);
            // Decryption inverts p modulo q
            if keypair.p == keypair.q {
                continue;
            }
            let (encryption_key, decryption_key) = keypair.keys();
            let public_key = PaillierPublicKey(encryption_key);
            let secret_key = PaillierSecretKey {
                public_key: public_key.clone(),
                decryption_key,
            };
            return Ok((public_key, secret_key));
        }
    }

    fn encrypt(
        &self,
        public_key: &PaillierPublicKey,
        plaintext: &BigUint,
    ) -> Result<PaillierCiphertext, CryptosystemError> {
        let plaintext = to_bigint(plaintext);
        if plaintext >= public_key.0.n {
            return Err(CryptosystemError::PlaintextOutOfRange);
        }
        let ciphertext: RawCiphertext =
            PaillierScheme::encrypt(&public_key.0, RawPlaintext::from(plaintext));
        Ok(PaillierCiphertext(ciphertext.into()))
    }

    fn homomorphic_add(
        &self,
        public_key: &PaillierPublicKey,
        lhs: &PaillierCiphertext,
        rhs: &PaillierCiphertext,
    ) -> Result<PaillierCiphertext, CryptosystemError> {
        public_key.check_ciphertext(lhs)?;
        public_key.check_ciphertext(rhs)?;
        let sum: RawCiphertext = PaillierScheme::add(
            &public_key.0,
            RawCiphertext::from(&lhs.0),
            RawCiphertext::from(&rhs.0),
        );
        Ok(PaillierCiphertext(sum.into()))
    }

    fn decrypt(
        &self,
        secret_key: &PaillierSecretKey,
        ciphertext: &PaillierCiphertext,
    ) -> Result<BigUint, CryptosystemError> {
        secret_key.public_key.check_ciphertext(ciphertext)?;
        let plaintext: RawPlaintext = PaillierScheme::decrypt(
            &secret_key.decryption_key,
            RawCiphertext::from(&ciphertext.0),
        );
        Ok(to_biguint(&BigInt::from(plaintext)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::{One, Zero};

    fn test_scheme() -> Paillier {
        Paillier::new(256).unwrap()
    }

    #[test]
    fn test_rejects_bad_key_size() {
        assert_eq!(
            Paillier::new(64).unwrap_err(),
            CryptosystemError::InvalidKeySize(64)
        );
        assert_eq!(
            Paillier::new(257).unwrap_err(),
            CryptosystemError::InvalidKeySize(257)
        );
        assert_eq!(Paillier::default().key_bits(), DEFAULT_KEY_BITS);
    }

    #[test]
    fn test_keypair_modulus_size() {
        let scheme = test_scheme();
        let (pk, sk) = scheme.generate_keypair().unwrap();
        // Two 128-bit primes with the top bit set
        assert!(pk.n().bits() >= 255);
        assert!(pk.n().bits() <= 256);
        assert_eq!(sk.public_key(), &pk);
        assert_eq!(PaillierPublicKey::new(&pk.n()), pk);
    }

    #[test]
    fn test_bigint_conversion() {
        for value in [
            BigUint::zero(),
            BigUint::one(),
            BigUint::from(u64::MAX) << 70u32,
        ] {
            assert_eq!(to_biguint(&to_bigint(&value)), value);
        }
    }

    #[test]
    fn test_encrypt_decrypt() {
        let scheme = test_scheme();
        let (pk, sk) = scheme.generate_keypair().unwrap();
        for m in [0u64, 1, 42, u64::MAX] {
            let ct = scheme.encrypt(&pk, &BigUint::from(m)).unwrap();
            assert_eq!(scheme.decrypt(&sk, &ct).unwrap(), BigUint::from(m));
        }
    }

    #[test]
    fn test_largest_plaintext_round_trips() {
        let scheme = test_scheme();
        let (pk, sk) = scheme.generate_keypair().unwrap();
        let m = pk.n() - 1u32;
        let ct = scheme.encrypt(&pk, &m).unwrap();
        assert_eq!(scheme.decrypt(&sk, &ct).unwrap(), m);
    }

    #[test]
    fn test_encryption_is_randomized() {
        let scheme = test_scheme();
        let (pk, _sk) = scheme.generate_keypair().unwrap();
        let m = BigUint::from(7u32);
        assert_ne!(
            scheme.encrypt(&pk, &m).unwrap(),
            scheme.encrypt(&pk, &m).unwrap()
        );
    }

    #[test]
    fn test_homomorphic_add() {
        let scheme = test_scheme();
        let (pk, sk) = scheme.generate_keypair().unwrap();
        let a = scheme.encrypt(&pk, &BigUint::from(20u32)).unwrap();
        let b = scheme.encrypt(&pk, &BigUint::from(30u32)).unwrap();
        let sum = scheme.homomorphic_add(&pk, &a, &b).unwrap();
        assert_eq!(scheme.decrypt(&sk, &sum).unwrap(), BigUint::from(50u32));
    }

    #[test]
    fn test_homomorphic_add_wraps_modulo_n() {
        let scheme = test_scheme();
        let (pk, sk) = scheme.generate_keypair().unwrap();
        let a = scheme.encrypt(&pk, &(pk.n() - 1u32)).unwrap();
        let b = scheme.encrypt(&pk, &BigUint::from(5u32)).unwrap();
        let sum = scheme.homomorphic_add(&pk, &a, &b).unwrap();
        assert_eq!(scheme.decrypt(&sk, &sum).unwrap(), BigUint::from(4u32));
    }

    #[test]
    fn test_plaintext_out_of_range() {
        let scheme = test_scheme();
        let (pk, _sk) = scheme.generate_keypair().unwrap();
        let result = scheme.encrypt(&pk, &pk.n());
        assert_eq!(result.unwrap_err(), CryptosystemError::PlaintextOutOfRange);
    }

    #[test]
    fn test_malformed_ciphertext() {
        let scheme = test_scheme();
        let (pk, sk) = scheme.generate_keypair().unwrap();
        let zero = PaillierCiphertext::new(&BigUint::zero());
        assert_eq!(
            scheme.decrypt(&sk, &zero).unwrap_err(),
            CryptosystemError::MalformedCiphertext
        );
        let too_big = PaillierCiphertext::new(&(pk.n() * pk.n()));
        let ok = scheme.encrypt(&pk, &BigUint::one()).unwrap();
        assert_eq!(
            scheme.homomorphic_add(&pk, &ok, &too_big).unwrap_err(),
            CryptosystemError::MalformedCiphertext
        );
    }

    #[test]
    fn test_ciphertext_value() {
        let ct = PaillierCiphertext::new(&BigUint::from(12345u32));
        assert_eq!(ct.value(), BigUint::from(12345u32));
    }

    #[test]
    fn test_secret_key_debug_is_redacted() {
        let scheme = test_scheme();
        let (_pk, sk) = scheme.generate_keypair().unwrap();
        let debug = format!("{:?}", sk);
        assert!(debug.starts_with("PaillierSecretKey"));
        assert!(!debug.contains("decryption_key"));
        assert!(!debug.contains("DecryptionKey"));
    }
}
