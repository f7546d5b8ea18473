//! Commutative blinding groups.
//!
//! A [`CommutativeGroup`] is the algebraic context both parties share: it maps
//! identifiers into the group and raises elements to secret exponents. Masking
//! with `k1` then `k2` lands on the same element as masking with `k2` then
//! `k1`, which is what makes doubly-masked identifiers comparable.

use crate::arith::{
    mod_inverse, mod_pow, probably_prime, random_safe_prime, MIN_SAFE_PRIME_BITS,
};
use crate::error::{PsiSumError, Result};
use num_bigint::{BigUint, RandBigInt};
use num_traits::{One, Zero};
use rand::rngs::OsRng;
use sha2::{Digest, Sha256};
use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;

/// RFC 3526 group 14, a 2048-bit safe prime.
const RFC3526_2048_MODULUS: &str = concat!(
    "FFFFFFFFFFFFFFFFC90FDAA22168C234C4C6628B80DC1CD1",
    "29024E088A67CC74020BBEA63B139B22514A08798E3404DD",
    "EF9519B3CD3A431B302B0A6DF25F14374FE1356D6D51C245",
    "E485B576625E7EC6F44C42E9A637ED6B0BFF5CB6F406B7ED",
    "EE386BFB5A899FA5AE9F24117C4B1FE649286651ECE45B3D",
    "C2007CB8A163BF0598DA48361C55D39A69163FA8FD24CF5F",
    "83655D23DCA3AD961C62F356208552BB9ED529077096966D",
    "670C354E4ABC9804F1746C08CA18217C32905E462E36CE3B",
    "E39E772C180E86039B2783A2EC07A28FB5C55DF06F4C52C9",
    "DE2BCBF6955817183995497CEA956AE515D2261898FA0510",
    "15728E5A8AACAA68FFFFFFFFFFFFFFFF",
);

/// Smallest safe prime for which `[2, q - 1]` is non-empty.
const MIN_MODULUS: u32 = 7;

/// A group in which identifiers are blinded by exponentiation.
pub trait CommutativeGroup: Clone + fmt::Debug {
    /// Representation of a (possibly masked) identifier on the wire.
    type Element: Clone + fmt::Debug + Eq + Hash;
    /// A secret masking exponent.
    type Exponent;

    /// Deterministically map an identifier into the group.
    fn hash_to_group(&self, identifier: &[u8]) -> Self::Element;

    /// Draw a fresh masking exponent. Never returns 0 or 1.
    fn random_exponent(&self) -> Self::Exponent;

    /// Raise `element` to `exponent`.
    ///
    /// # Errors
    /// Returns `PsiSumError::InvalidMaskedElement` if `element` is not a
    /// member of the group.
    fn mask(&self, element: &Self::Element, exponent: &Self::Exponent) -> Result<Self::Element>;

    /// Bit size of the group, used to bound masking collisions.
    fn order_bits(&self) -> u64;
}

/// Maps an arbitrary identifier to an integer in `[0, modulus)`.
pub trait HashToGroup: Clone + fmt::Debug {
    fn hash(&self, value: &[u8], modulus: &BigUint) -> BigUint;
}

/// Hash-to-group by digesting the identifier and reducing modulo `p`.
pub struct DigestHashToGroup<D = Sha256> {
    _digest: PhantomData<D>,
}

impl<D> Default for DigestHashToGroup<D> {
    fn default() -> Self {
        Self {
            _digest: PhantomData,
        }
    }
}

impl<D> Clone for DigestHashToGroup<D> {
    fn clone(&self) -> Self {
        Self::default()
    }
}

impl<D> fmt::Debug for DigestHashToGroup<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DigestHashToGroup")
    }
}

impl<D: Digest> HashToGroup for DigestHashToGroup<D> {
    fn hash(&self, value: &[u8], modulus: &BigUint) -> BigUint {
        BigUint::from_bytes_be(&D::digest(value)) % modulus
    }
}

/// The subgroup of quadratic residues modulo a safe prime `p = 2q + 1`.
///
/// The subgroup has prime order `q`, so masked elements carry no
/// residuosity bit about the identifier they came from.
#[derive(Clone, Debug)]
pub struct ModPGroup<H = DigestHashToGroup> {
    modulus: BigUint,
    subgroup_order: BigUint,
    hasher: H,
}

impl ModPGroup {
    /// Create a group over `modulus` with SHA-256 hash-to-group.
    ///
    /// # Errors
    /// Returns `PsiSumError::ModulusTooSmall` if `modulus < 7`,
    /// `PsiSumError::ModulusNotPrime` if it fails the primality test and
    /// `PsiSumError::ModulusNotSafePrime` if `(modulus - 1) / 2` does.
    pub fn new(modulus: BigUint) -> Result<Self> {
        Self::with_hasher(modulus, DigestHashToGroup::default())
    }

    /// The fixed 2048-bit group from RFC 3526 (group 14).
    pub fn rfc3526_2048() -> Result<Self> {
        let modulus = BigUint::parse_bytes(RFC3526_2048_MODULUS.as_bytes(), 16)
            .ok_or(PsiSumError::ModulusNotPrime)?;
        Self::new(modulus)
    }

    /// Create a group over a freshly generated safe prime of `bits` bits.
    ///
    /// Prefer a fixed group such as [`ModPGroup::rfc3526_2048`]: safe prime
    /// generation is slow and a per-run modulus adds nothing to DDH security.
    pub fn random(bits: u64) -> Result<Self> {
        let modulus = random_safe_prime(bits).ok_or(PsiSumError::ModulusTooSmall {
            bits,
            required: MIN_SAFE_PRIME_BITS,
        })?;
        Self::new(modulus)
    }
}

impl<H: HashToGroup> ModPGroup<H> {
    /// Create a group over `modulus` with a custom hash-to-group function.
    pub fn with_hasher(modulus: BigUint, hasher: H) -> Result<Self> {
        if modulus < BigUint::from(MIN_MODULUS) {
            return Err(PsiSumError::ModulusTooSmall {
                bits: modulus.bits(),
                required: 3,
            });
        }
        if !probably_prime(&modulus) {
            return Err(PsiSumError::ModulusNotPrime);
        }
        let subgroup_order = &modulus >> 1u32;
        if !probably_prime(&subgroup_order) {
            return Err(PsiSumError::ModulusNotSafePrime);
        }
        Ok(Self {
            modulus,
            subgroup_order,
            hasher,
        })
    }

    pub fn modulus(&self) -> &BigUint {
        &self.modulus
    }

    /// The prime order `q = (p - 1) / 2` of the masking subgroup.
    pub fn subgroup_order(&self) -> &BigUint {
        &self.subgroup_order
    }

    /// Returns true if `element` is a non-zero quadratic residue modulo `p`.
    pub fn is_subgroup_element(&self, element: &BigUint) -> bool {
        !element.is_zero()
            && element < &self.modulus
            && self.mod_pow(element, &self.subgroup_order).is_one()
    }

    pub fn mod_pow(&self, base: &BigUint, exponent: &BigUint) -> BigUint {
        mod_pow(base, exponent, &self.modulus)
    }

    pub fn mod_inverse(&self, value: &BigUint) -> Option<BigUint> {
        mod_inverse(value, &self.modulus)
    }
}

impl<H: HashToGroup> CommutativeGroup for ModPGroup<H> {
    type Element = BigUint;
    type Exponent = BigUint;

    fn hash_to_group(&self, identifier: &[u8]) -> BigUint {
        // Squaring maps the digest into the quadratic residues
        let digest = self.hasher.hash(identifier, &self.modulus);
        (&digest * &digest) % &self.modulus
    }

    fn random_exponent(&self) -> BigUint {
        // [2, q - 1]
        OsRng.gen_biguint_range(&BigUint::from(2u32), &self.subgroup_order)
    }

    fn mask(&self, element: &BigUint, exponent: &BigUint) -> Result<BigUint> {
        if element.is_zero() || element >= &self.modulus {
            return Err(PsiSumError::InvalidMaskedElement(format!(
                "element is not a unit modulo the {}-bit modulus",
                self.modulus.bits()
            )));
        }
        Ok(self.mod_pow(element, exponent))
    }

    fn order_bits(&self) -> u64 {
        self.subgroup_order.bits()
    }
}
