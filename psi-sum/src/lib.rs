//! # Private Intersection-Sum (PSI-Sum) Protocol
//!
//! This library implements the two-party Diffie-Hellman based private
//! intersection-sum protocol. P1 holds a set of identifiers, P2 holds a set
//! of `(identifier, weight)` pairs. P2 learns the sum of the weights whose
//! identifiers P1 also holds, and nothing else about P1's set; P1 learns
//! nothing about P2's weights.
//!
//! ## Features
//!
//! - **Transport Agnostic**: The library handles the protocol logic but leaves
//!   message exchange to the user.
//! - **Pluggable Group**: Blinding runs in any [`CommutativeGroup`]; the
//!   quadratic residues modulo a safe prime ([`ModPGroup`]) and the Ristretto
//!   group ([`RistrettoGroup`]) are provided.
//! - **Pluggable Cryptosystem**: Weights are encrypted with any
//!   [`AdditivelyHomomorphic`] scheme; [`Paillier`] is provided. Weights may
//!   be any non-negative integer type, including `BigUint`.
//! - **Type-State Pattern**: Every round consumes the state holding its
//!   secrets, so exponents and keys are never reused across runs and rounds
//!   cannot run out of order.
//!
//! ## Protocol Overview
//!
//! 1. **Round 1 (P1)**: pick `k1`, send the shuffled set `{H(v)^k1}`.
//! 2. **Round 2 (P2)**: pick `k2` and a fresh keypair, send the shuffled set
//!    `Z = {H(v)^(k1*k2)}`, the public key, and `(H(w)^k2, Enc(t))` for every
//!    weighted identifier.
//! 3. **Round 3 (P1)**: raise each `H(w)^k2` to `k1`; the pairs whose result
//!    is in `Z` form the intersection. Homomorphically add their ciphertexts.
//! 4. **Output (P2)**: decrypt the sum.
//!
//! ## Example Usage
//!
//! ```ignore
//! use psi_sum::{ModPGroup, Paillier, Party1Session, Party2Session, PsiSumError};
//!
//! let group = ModPGroup::rfc3526_2048()?;
//! let p1 = Party1Session::new(group.clone(), Paillier::default());
//! let p2 = Party2Session::new(group, Paillier::default());
//!
//! let (p1, msg1) = p1.round1(&["alice", "bob", "carol", "dave"])?;
//! let (p2, msg2) = p2.round2(msg1, &[("bob", 20), ("carol", 30), ("eve", 50)])?;
//! let sum = p1.round3(msg2)?;
//! assert_eq!(p2.decrypt(sum)?, 50u32.into());
//! # Ok::<(), PsiSumError>(())
//! ```
//!
//! ## Security Considerations
//!
//! - The protocol is secure against semi-honest parties only. It offers no
//!   protection against a party that deviates from the protocol.
//! - The channel is not authenticated; use TLS in production.
//! - Exponentiation is not constant time.
//!
//! ## Modules
//!
//! - [`group`] - Blinding groups and hash-to-group
//! - [`ristretto`] - Ristretto blinding group
//! - [`homomorphic`] - Additively homomorphic encryption trait
//! - [`paillier`] - Paillier cryptosystem
//! - [`messages`] - Message types for protocol exchange
//! - [`config`] - Protocol configuration
//! - `protocol` - Round logic
//! - `state` - Session states (type-state pattern)
//! - `error` - Error types

pub use config::ProtocolConfig;
pub use error::{PsiSumError, Result};
pub use group::{CommutativeGroup, DigestHashToGroup, HashToGroup, ModPGroup};
pub use homomorphic::{AdditivelyHomomorphic, CryptosystemError};
pub use messages::{IntersectionSum, MaskedSetMessage, Round2Message};
pub use paillier::{Paillier, PaillierCiphertext, PaillierPublicKey, PaillierSecretKey};
pub use protocol::Round2For;
pub use ristretto::RistrettoGroup;
pub use state::{Party1AwaitingRound2, Party1Session, Party2AwaitingSum, Party2Session};

pub mod arith;
pub mod config;
mod error;
pub mod group;
pub mod homomorphic;
pub mod messages;
pub mod paillier;
mod protocol;
pub mod ristretto;
mod state;
