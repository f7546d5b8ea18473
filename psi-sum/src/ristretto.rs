//! Blinding over the Ristretto prime-order group (curve25519-dalek).

use crate::error::{PsiSumError, Result};
use crate::group::CommutativeGroup;
use curve25519_dalek::ristretto::{CompressedRistretto, RistrettoPoint};
use curve25519_dalek::Scalar;
use rand::rngs::OsRng;
use sha2::{Digest, Sha512};

/// Hash an identifier to 32 bytes (first half of its SHA-512 digest).
pub fn hash_bytes(input: &[u8]) -> [u8; 32] {
    let result = Sha512::digest(input);
    let mut hash = [0u8; 32];
    hash.copy_from_slice(&result[..32]);
    hash
}

/// Map a 32-byte hash to a Ristretto point using hash-to-curve.
pub fn hash_to_point(hash: &[u8; 32]) -> RistrettoPoint {
    RistrettoPoint::hash_from_bytes::<Sha512>(hash)
}

/// Decompress a compressed Ristretto point.
///
/// # Errors
/// Returns `PsiSumError::InvalidMaskedElement` if decompression fails.
pub fn decompress_point(compressed: &CompressedRistretto) -> Result<RistrettoPoint> {
    compressed.decompress().ok_or_else(|| {
        PsiSumError::InvalidMaskedElement("Failed to decompress Ristretto point".to_string())
    })
}

/// The Ristretto group; elements travel in compressed form.
#[derive(Debug, Clone, Copy, Default)]
pub struct RistrettoGroup;

impl CommutativeGroup for RistrettoGroup {
    type Element = CompressedRistretto;
    type Exponent = Scalar;

    fn hash_to_group(&self, identifier: &[u8]) -> CompressedRistretto {
        hash_to_point(&hash_bytes(identifier)).compress()
    }

    fn random_exponent(&self) -> Scalar {
        let mut rng = OsRng;
        loop {
            let scalar = Scalar::random(&mut rng);
            if scalar != Scalar::ZERO && scalar != Scalar::ONE {
                return scalar;
            }
        }
    }

    fn mask(&self, element: &CompressedRistretto, exponent: &Scalar) -> Result<CompressedRistretto> {
        let point = decompress_point(element)?;
        Ok((exponent * &point).compress())
    }

    fn order_bits(&self) -> u64 {
        252
    }
}
