//! Message types exchanged between the two PSI-Sum parties.
//!
//! Messages are plain structs, generic over the group element and the
//! cryptosystem's key and ciphertext types. With the `serde` feature enabled
//! they derive `Serialize` and `Deserialize`.

/// A randomly permuted set of masked identifiers.
///
/// Sent by P1 in round 1 (`H(v)^k1`). Wire order carries no information
/// about input order.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MaskedSetMessage<E> {
    pub elements: Vec<E>,
}

impl<E> MaskedSetMessage<E> {
    pub fn new(elements: Vec<E>) -> Self {
        Self { elements }
    }

    /// Returns the number of masked elements in this message.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns true if this message contains no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

/// P2's round 2 reply.
///
/// Carries the permuted doubly-masked set `Z = {H(v)^(k1*k2)}`, the fresh
/// public key, and one `(H(w)^k2, Enc(t))` pair per weighted identifier, in
/// input order.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Round2Message<E, PK, CT> {
    /// Doubly-masked identifiers of P1, randomly permuted.
    pub double_masked: Vec<E>,
    /// Public key under which the weights are encrypted.
    pub public_key: PK,
    /// `(masked identifier, encrypted weight)` pairs.
    pub masked_pairs: Vec<(E, CT)>,
}

impl<E, PK, CT> Round2Message<E, PK, CT> {
    pub fn new(double_masked: Vec<E>, public_key: PK, masked_pairs: Vec<(E, CT)>) -> Self {
        Self {
            double_masked,
            public_key,
            masked_pairs,
        }
    }
}

/// The round 3 result sent back to P2.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IntersectionSum<CT> {
    /// No weighted identifier matched; the sum is zero.
    Empty,
    /// Homomorphic sum of the matching encrypted weights.
    Encrypted(CT),
}

impl<CT> IntersectionSum<CT> {
    /// Returns true if the intersection is empty.
    pub fn is_empty(&self) -> bool {
        matches!(self, IntersectionSum::Empty)
    }

    pub fn ciphertext(&self) -> Option<&CT> {
        match self {
            IntersectionSum::Empty => None,
            IntersectionSum::Encrypted(ct) => Some(ct),
        }
    }
}
