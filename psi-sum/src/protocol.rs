//! Core round logic for PSI-Sum.

use crate::error::{PsiSumError, Result};
use crate::group::CommutativeGroup;
use crate::homomorphic::AdditivelyHomomorphic;
use crate::messages::{IntersectionSum, MaskedSetMessage, Round2Message};
use crate::state::{Party1AwaitingRound2, Party1Session, Party2AwaitingSum, Party2Session};
use log::debug;
use num_bigint::{BigUint, ToBigUint};
use num_traits::Zero;
use rand::rngs::OsRng;
use rand::seq::SliceRandom;
use std::collections::HashSet;

/// Round 2 reply as produced by a `Party2Session<G, C>`.
pub type Round2For<G, C> = Round2Message<
    <G as CommutativeGroup>::Element,
    <C as AdditivelyHomomorphic>::PublicKey,
    <C as AdditivelyHomomorphic>::Ciphertext,
>;

impl<G: CommutativeGroup, C: AdditivelyHomomorphic> Party1Session<G, C> {
    /// Round 1: mask and permute P1's identifiers.
    ///
    /// Draws a fresh exponent `k1`, computes `H(v)^k1` for every identifier
    /// (duplicates included) and shuffles the result.
    ///
    /// # Arguments
    /// * `identifiers` - P1's set `V`; may be empty
    ///
    /// # Returns
    /// The next session state and the message for P2
    ///
    /// # Errors
    /// Returns `PsiSumError::ModulusTooSmall` if the group cannot hold
    /// `identifiers.len()` masked values without a likely collision.
    pub fn round1<I: AsRef<[u8]>>(
        self,
        identifiers: &[I],
    ) -> Result<(Party1AwaitingRound2<G, C>, MaskedSetMessage<G::Element>)> {
        self.config
            .check_capacity(self.group.order_bits(), identifiers.len())?;

        let secret = self.group.random_exponent();
        let mut masked = identifiers
            .iter()
            .map(|id| {
                let hashed = self.group.hash_to_group(id.as_ref());
                self.group.mask(&hashed, &secret)
            })
            .collect::<Result<Vec<_>>>()?;
        masked.shuffle(&mut OsRng);

        debug!("round 1: masked {} identifiers", masked.len());

        let next = Party1AwaitingRound2 {
            group: self.group,
            cryptosystem: self.cryptosystem,
            secret,
            identifiers: identifiers.iter().map(|id| id.as_ref().to_vec()).collect(),
        };
        Ok((next, MaskedSetMessage::new(masked)))
    }
}

impl<G: CommutativeGroup, C: AdditivelyHomomorphic> Party2Session<G, C> {
    /// Round 2: double-mask P1's set and send P2's masked, encrypted weights.
    ///
    /// Draws a fresh exponent `k2` and a fresh keypair. `Z` is permuted; the
    /// weighted pairs keep the order of `weighted`.
    ///
    /// # Arguments
    /// * `masked_set` - P1's round 1 message
    /// * `weighted` - P2's `(identifier, weight)` pairs; may be empty. Any
    ///   integer type converts; weights need not fit in 64 bits.
    ///
    /// # Errors
    /// Returns `PsiSumError::InvalidMaskedElement` if P1 sent a value outside
    /// the group, `PsiSumError::ModulusTooSmall` if the group is too small
    /// for the combined set sizes, `PsiSumError::InvalidWeight` for a
    /// negative weight, and `PsiSumError::Cryptosystem` if key generation or
    /// encryption fails.
    pub fn round2<I: AsRef<[u8]>, W: ToBigUint>(
        self,
        masked_set: MaskedSetMessage<G::Element>,
        weighted: &[(I, W)],
    ) -> Result<(Party2AwaitingSum<G, C>, Round2For<G, C>)> {
        self.config.check_capacity(
            self.group.order_bits(),
            masked_set.len() + weighted.len(),
        )?;

        let secret = self.group.random_exponent();
        let mut double_masked = masked_set
            .elements
            .iter()
            .map(|element| self.group.mask(element, &secret))
            .collect::<Result<Vec<_>>>()?;
        double_masked.shuffle(&mut OsRng);

        let (public_key, secret_key) = self.cryptosystem.generate_keypair()?;

        let masked_pairs = weighted
            .iter()
            .enumerate()
            .map(|(index, (id, weight))| -> Result<_> {
                let weight = weight
                    .to_biguint()
                    .ok_or(PsiSumError::InvalidWeight { index })?;
                let hashed = self.group.hash_to_group(id.as_ref());
                let masked = self.group.mask(&hashed, &secret)?;
                let ciphertext = self.cryptosystem.encrypt(&public_key, &weight)?;
                Ok((masked, ciphertext))
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(
            "round 2: double-masked {} elements, encrypted {} weights",
            double_masked.len(),
            masked_pairs.len()
        );

        let message = Round2Message::new(double_masked, public_key.clone(), masked_pairs);
        let next = Party2AwaitingSum {
            cryptosystem: self.cryptosystem,
            public_key,
            secret_key,
            secret,
        };
        Ok((next, message))
    }
}

impl<G: CommutativeGroup, C: AdditivelyHomomorphic> Party1AwaitingRound2<G, C> {
    /// Round 3: find the intersection and sum its encrypted weights.
    ///
    /// Each `H(w)^k2` is raised to `k1` and tested for membership in `Z`.
    /// Every matching pair contributes its ciphertext once, so duplicate
    /// identifiers in P2's set are each counted.
    ///
    /// # Returns
    /// `IntersectionSum::Empty` if nothing matched, otherwise the homomorphic
    /// sum of the matching ciphertexts
    ///
    /// # Errors
    /// Returns `PsiSumError::InvalidMaskedElement` if a masked identifier is
    /// outside the group and `PsiSumError::Cryptosystem` if homomorphic
    /// addition fails.
    pub fn round3(self, message: Round2For<G, C>) -> Result<IntersectionSum<C::Ciphertext>> {
        let Round2Message {
            double_masked,
            public_key,
            masked_pairs,
        } = message;
        let z: HashSet<G::Element> = double_masked.into_iter().collect();

        let mut sum: Option<C::Ciphertext> = None;
        let mut matches = 0usize;
        for (masked, ciphertext) in masked_pairs {
            let double = self.group.mask(&masked, &self.secret)?;
            if !z.contains(&double) {
                continue;
            }
            matches += 1;
            sum = Some(match sum {
                None => ciphertext,
                Some(acc) => self
                    .cryptosystem
                    .homomorphic_add(&public_key, &acc, &ciphertext)?,
            });
        }

        debug!("round 3: {} weighted identifiers in the intersection", matches);

        Ok(match sum {
            Some(ciphertext) => IntersectionSum::Encrypted(ciphertext),
            None => IntersectionSum::Empty,
        })
    }
}

impl<G: CommutativeGroup, C: AdditivelyHomomorphic> Party2AwaitingSum<G, C> {
    /// Decrypt the intersection sum. `Empty` yields zero without touching the
    /// cryptosystem.
    pub fn decrypt(self, sum: IntersectionSum<C::Ciphertext>) -> Result<BigUint> {
        match sum {
            IntersectionSum::Empty => Ok(BigUint::zero()),
            IntersectionSum::Encrypted(ciphertext) => {
                Ok(self.cryptosystem.decrypt(&self.secret_key, &ciphertext)?)
            }
        }
    }
}
