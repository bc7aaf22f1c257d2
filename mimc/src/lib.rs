//! Keyed MiMC sponge over the BN254 scalar field.
//!
//! This crate implements the hash used by the location circuits:
//! - A keyed MiMC Feistel permutation with 220 rounds and an `x^5` round function
//! - A rate-1 sponge that absorbs field elements and squeezes one or more outputs
//! - Round constants derived from the public seed `"mimcsponge"` by iterated Keccak-256
//!
//! The construction and its constants match the circom `MiMCSponge` template, so
//! hashes computed here agree with every other implementation of the protocol.
//!
//! # Example
//!
//! ```
//! use field::Fr;
//! use mimc::MimcSponge;
//!
//! let key = Fr::from_canonical_u64(7);
//! let sponge = MimcSponge::new(key);
//!
//! let ab = sponge.hash_one(&[Fr::from_canonical_u64(1), Fr::from_canonical_u64(2)]).unwrap();
//! let ba = sponge.hash_one(&[Fr::from_canonical_u64(2), Fr::from_canonical_u64(1)]).unwrap();
//! assert_ne!(ab, ba);
//! ```
//!
//! # Security Considerations
//!
//! - The permutation is special purpose; it is not a general-purpose hash.
//! - Round count, exponent, seed and modulus are protocol constants. Changing any
//!   of them produces hashes no other prover or verifier will accept.

mod constants;
mod errors;
mod params;
mod permutation;
mod sponge;


pub use constants::{
    MAX_ROUNDS, MIMC_EXPONENT, MIMC_ROUNDS, MIMC_SEED, SPONGE_RATE, STATE_WIDTH,
};
pub use errors::MimcError;
pub use params::{MimcParams, RoundConstants};
pub use permutation::{MimcFeistel, PermutationState};
pub use sponge::{MimcSponge, SpongeState};
