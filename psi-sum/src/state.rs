//! Per-run session state for both parties (type-state pattern).
//!
//! Each round consumes the session value holding the secrets it needs and
//! returns the next state, so a masking exponent or keypair is used by
//! exactly one run and round 3 cannot precede round 1.

use crate::config::ProtocolConfig;
use crate::error::Result;
use crate::group::CommutativeGroup;
use crate::homomorphic::AdditivelyHomomorphic;
use crate::paillier::Paillier;
use std::fmt;

/// P1, the set holder, before round 1.
#[derive(Debug, Clone)]
pub struct Party1Session<G, C> {
    pub(crate) group: G,
    pub(crate) cryptosystem: C,
    pub(crate) config: ProtocolConfig,
}

impl<G: CommutativeGroup, C: AdditivelyHomomorphic> Party1Session<G, C> {
    /// Create a session with the default [`ProtocolConfig`].
    pub fn new(group: G, cryptosystem: C) -> Self {
        Self::with_config(group, cryptosystem, ProtocolConfig::default())
    }

    pub fn with_config(group: G, cryptosystem: C, config: ProtocolConfig) -> Self {
        Self {
            group,
            cryptosystem,
            config,
        }
    }
}

impl<G: CommutativeGroup> Party1Session<G, Paillier> {
    /// Create a session using Paillier with the configured key size.
    pub fn with_paillier(group: G, config: ProtocolConfig) -> Result<Self> {
        Ok(Self::with_config(group, config.paillier()?, config))
    }
}

/// P1 after round 1, holding `k1` and its own identifiers.
pub struct Party1AwaitingRound2<G: CommutativeGroup, C> {
    pub(crate) group: G,
    pub(crate) cryptosystem: C,
    pub(crate) secret: G::Exponent,
    pub(crate) identifiers: Vec<Vec<u8>>,
}

impl<G: CommutativeGroup, C> Party1AwaitingRound2<G, C> {
    /// The identifiers P1 entered in round 1.
    pub fn identifiers(&self) -> &[Vec<u8>] {
        &self.identifiers
    }
}

impl<G: CommutativeGroup, C> fmt::Debug for Party1AwaitingRound2<G, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Party1AwaitingRound2")
            .field("group", &self.group)
            .field("identifiers", &self.identifiers.len())
            .finish_non_exhaustive()
    }
}

/// P2, the weighted-set holder, before round 2.
#[derive(Debug, Clone)]
pub struct Party2Session<G, C> {
    pub(crate) group: G,
    pub(crate) cryptosystem: C,
    pub(crate) config: ProtocolConfig,
}

impl<G: CommutativeGroup, C: AdditivelyHomomorphic> Party2Session<G, C> {
    /// Create a session with the default [`ProtocolConfig`].
    pub fn new(group: G, cryptosystem: C) -> Self {
        Self::with_config(group, cryptosystem, ProtocolConfig::default())
    }

    pub fn with_config(group: G, cryptosystem: C, config: ProtocolConfig) -> Self {
        Self {
            group,
            cryptosystem,
            config,
        }
    }
}

impl<G: CommutativeGroup> Party2Session<G, Paillier> {
    /// Create a session using Paillier with the configured key size.
    pub fn with_paillier(group: G, config: ProtocolConfig) -> Result<Self> {
        Ok(Self::with_config(group, config.paillier()?, config))
    }
}

/// P2 after round 2, holding `k2` and the secret key.
pub struct Party2AwaitingSum<G: CommutativeGroup, C: AdditivelyHomomorphic> {
    pub(crate) cryptosystem: C,
    pub(crate) public_key: C::PublicKey,
    pub(crate) secret_key: C::SecretKey,
    #[allow(dead_code)]
    pub(crate) secret: G::Exponent,
}

impl<G: CommutativeGroup, C: AdditivelyHomomorphic> Party2AwaitingSum<G, C> {
    /// The public key sent to P1 in round 2.
    pub fn public_key(&self) -> &C::PublicKey {
        &self.public_key
    }
}

impl<G: CommutativeGroup, C: AdditivelyHomomorphic> fmt::Debug for Party2AwaitingSum<G, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Party2AwaitingSum")
            .field("public_key", &self.public_key)
            .finish_non_exhaustive()
    }
}
