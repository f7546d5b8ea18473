//! Protocol configuration shared by both parties.

use crate::error::{PsiSumError, Result};
use crate::homomorphic::CryptosystemError;
use crate::paillier::{Paillier, DEFAULT_KEY_BITS};

/// Default margin, in bits, between the group size and the birthday bound of
/// the masked set.
pub const DEFAULT_COLLISION_MARGIN_BITS: u64 = 40;

/// Tunable parameters of a protocol run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProtocolConfig {
    /// Required slack above `2 * log2(n)` bits of group size for `n` masked
    /// elements. Masking collisions occur with probability about
    /// `2^-collision_margin_bits`.
    pub collision_margin_bits: u64,
    /// Modulus size of the Paillier keys generated by P2.
    pub paillier_key_bits: u64,
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        Self {
            collision_margin_bits: DEFAULT_COLLISION_MARGIN_BITS,
            paillier_key_bits: DEFAULT_KEY_BITS,
        }
    }
}

impl ProtocolConfig {
    /// Check that a group of `order_bits` bits can hold `elements` masked
    /// values without a likely collision.
    ///
    /// # Errors
    /// Returns `PsiSumError::ModulusTooSmall` if the group is too small.
    pub fn check_capacity(&self, order_bits: u64, elements: usize) -> Result<()> {
        let element_bits = u64::from(usize::BITS - elements.leading_zeros());
        let required = 2 * element_bits + self.collision_margin_bits;
        if order_bits < required {
            return Err(PsiSumError::ModulusTooSmall {
                bits: order_bits,
                required,
            });
        }
        Ok(())
    }

    /// Build the Paillier cryptosystem with the configured key size.
    pub fn paillier(&self) -> std::result::Result<Paillier, CryptosystemError> {
        Paillier::new(self.paillier_key_bits)
    }
}
