//! Round-count configuration and round-constant derivation.

use std::ops::Deref;
use std::sync::Arc;

use field::Fr;
use num_bigint::BigUint;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use sha3::{Digest, Keccak256};

use crate::constants::{MAX_ROUNDS, MIMC_ROUNDS, MIMC_SEED, MIN_ROUNDS};
use crate::errors::MimcError;

static STANDARD_CONSTANTS: Lazy<RoundConstants> =
    Lazy::new(|| RoundConstants::derive_unchecked(MIMC_SEED, MIMC_ROUNDS));

/// Public parameters of a MiMC instance.
///
/// The defaults are the protocol values used by both location circuits.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MimcParams {
    /// Number of Feistel rounds.
    pub rounds: usize,
    /// Seed of the Keccak-256 constant chain.
    pub seed: String,
}

impl Default for MimcParams {
    fn default() -> Self {
        Self {
            rounds: MIMC_ROUNDS,
            seed: MIMC_SEED.to_string(),
        }
    }
}

impl MimcParams {
    pub fn new(rounds: usize, seed: impl Into<String>) -> Result<Self, MimcError> {
        let params = Self {
            rounds,
            seed: seed.into(),
        };
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<(), MimcError> {
        check_rounds(self.rounds)
    }

    /// True when these are the protocol parameters.
    pub fn is_standard(&self) -> bool {
        self.rounds == MIMC_ROUNDS && self.seed == MIMC_SEED
    }

    /// Round constants for these parameters.
    ///
    /// The protocol table is derived once per process and shared.
    pub fn round_constants(&self) -> Result<RoundConstants, MimcError> {
        if self.is_standard() {
            Ok(RoundConstants::standard())
        } else {
            RoundConstants::derive(&self.seed, self.rounds)
        }
    }
}

fn check_rounds(rounds: usize) -> Result<(), MimcError> {
    if rounds < MIN_ROUNDS {
        return Err(MimcError::TooFewRounds {
            rounds,
            min: MIN_ROUNDS,
        });
    }
    if rounds > MAX_ROUNDS {
        return Err(MimcError::TooManyRounds {
            rounds,
            max: MAX_ROUNDS,
        });
    }
    Ok(())
}

/// Ordered, immutable round constants `c_0 .. c_{R-1}`.
///
/// Cloning is cheap; all clones share the same table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoundConstants(Arc<[Fr]>);

impl RoundConstants {
    /// The protocol table (seed `"mimcsponge"`, 220 rounds).
    pub fn standard() -> Self {
        STANDARD_CONSTANTS.clone()
    }

    /// Derive a table from a seed:
    ///
    /// ```text
    /// h_0 = keccak256(seed), h_i = keccak256(h_{i-1}), c_i = h_i mod p
    /// c_0 = c_{R-1} = 0
    /// ```
    pub fn derive(seed: &str, rounds: usize) -> Result<Self, MimcError> {
        check_rounds(rounds)?;
        Ok(Self::derive_unchecked(seed, rounds))
    }

    /// Wrap an externally pinned table, checking it against the round count.
    pub fn from_values(values: Vec<Fr>, rounds: usize) -> Result<Self, MimcError> {
        check_rounds(rounds)?;
        if values.len() != rounds {
            return Err(MimcError::RoundCountMismatch {
                expected: rounds,
                actual: values.len(),
            });
        }
        Ok(Self(values.into()))
    }

    fn derive_unchecked(seed: &str, rounds: usize) -> Self {
        tracing::debug!(seed, rounds, "deriving MiMC round constants");
        let mut values = Vec::with_capacity(rounds);
        values.push(Fr::ZERO);

        let mut digest = Keccak256::digest(seed.as_bytes());
        for _ in 1..rounds {
            digest = Keccak256::digest(digest);
            values.push(Fr::from_biguint(&BigUint::from_bytes_be(&digest)));
        }
        values[rounds - 1] = Fr::ZERO;

        Self(values.into())
    }

    pub fn rounds(&self) -> usize {
        self.0.len()
    }
}

impl Deref for RoundConstants {
    type Target = [Fr];

    fn deref(&self) -> &[Fr] {
        &self.0
    }
}
