//! # Annulus Commitment Circuits
//!
//! Circuit definitions proving that a hidden integer coordinate lies inside a
//! public annulus and that a keyed MiMC commitment to it matches a public value,
//! over the BN254 scalar field.
//!
//! ## Overview
//!
//! Circuits are declared once against the [`CircuitApi`] surface and can then be
//! run two ways:
//!
//! - **Symbolically** through [`ConstraintBuilder`] (see [`compile`]), producing a
//!   [`ConstraintSystem`] graph of inputs, gates, assertions and named outputs that
//!   an external proof backend arithmetises.
//! - **Concretely** through [`WitnessEvaluator`] (see [`evaluate`]), computing the
//!   derived outputs of a witness [`Assignment`] and reporting every violated
//!   assertion as a [`Violation`].
//!
//! Both paths agree: [`ConstraintSystem::check`] replays the recorded graph and
//! returns the same [`Evaluation`] as the evaluator.
//!
//! ## Circuits
//!
//! ### [`InitCircuit`]
//!
//! | slot             | visibility | meaning                          |
//! |------------------|------------|----------------------------------|
//! | `r`              | public     | annulus radius                   |
//! | `PLANETHASH_KEY` | public     | MiMC key                         |
//! | `x`, `y`         | secret     | coordinate                       |
//! | `LocationId`     | output     | `MiMCSponge(key).hash([x])`      |
//!
//! Constraints, in declaration order:
//!
//! ```text
//! x + 2^31 <= 2^32 - 1,  y + 2^31 <= 2^32 - 1
//! cmp(x^2 + y^2, r^2) == -1
//! cmp(100 (x^2 + y^2), 98 r^2) == 1
//! LocationId = MiMCSponge(PLANETHASH_KEY).hash([x])
//! ```
//!
//! Only `x` enters the commitment.
//!
//! ### [`HashCircuit`]
//!
//! Public `key` and `x`, a `hash` slot whose visibility the caller chooses, and
//!
//! ```text
//! x <= 2^31 - 1
//! MiMCSponge(key).hash([x]) == hash
//! ```
//!
//! ## Comparison Semantics
//!
//! `cmp` and `assert_less_or_equal` act on the canonical representatives in
//! `[0, p)`. A negative coordinate `-k` is the field element `p - k`, so the
//! `+ 2^31` shift above is what admits negative coordinates.
//!
//! ## Quick Start
//!
//! ```rust
//! use circuit::{evaluate, find_location, Assignment, InitCircuit, LOCATION_ID};
//! use field::Fr;
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let location = find_location(1000, Fr::ZERO, &mut rng).unwrap();
//!
//! let assignment = Assignment::from(location.witness());
//! let evaluation = evaluate(&InitCircuit::default(), &assignment).unwrap();
//! assert!(evaluation.is_satisfied());
//! assert_eq!(evaluation.output(LOCATION_ID), Some(location.location_id));
//! ```
//!
//! ## Cost
//!
//! The MiMC sponge dominates: 220 rounds of three multiplications per absorbed
//! element. [`ConstraintSystem::stats`] reports exact gate counts.

mod api;
mod assignment;
mod builder;
mod error;
mod evaluator;
mod mimc_gadget;

pub mod hash;
pub mod init;
pub mod search;

#[cfg(test)]
mod tests;

pub use api::{Circuit, CircuitApi, Derived, Slot, Visibility};
pub use assignment::Assignment;
pub use builder::{
    compile, Assertion, ConstraintBuilder, ConstraintStats, ConstraintSystem, Gate, InputSlot,
    OutputSlot, Wire,
};
pub use error::{AssertionKind, CircuitError, Result, Violation};
pub use evaluator::{evaluate, Evaluation, WitnessEvaluator};
pub use hash::{HashCircuit, HashWitness};
pub use init::{InitCircuit, InitWitness, LOCATION_ID, PLANETHASH_KEY};
pub use mimc_gadget::MimcSpongeGadget;
pub use search::{find_location, location_ids, sample_candidate, Location};

// Re-export commonly used types
pub use field::Fr;
pub use mimc::{MimcParams, MimcSponge};
