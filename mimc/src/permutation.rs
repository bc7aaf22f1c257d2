//! Keyed MiMC Feistel permutation over `Fr x Fr`.

use field::Fr;
use p3_field::PrimeCharacteristicRing;
use p3_symmetric::{CryptographicPermutation, Permutation};

use crate::constants::{MIMC_EXPONENT, STATE_WIDTH};
use crate::errors::MimcError;
use crate::params::{MimcParams, RoundConstants};

/// State of one permutation evaluation: `[xL, xR]`.
pub type PermutationState = [Fr; STATE_WIDTH];

/// MiMC-2n/n Feistel network keyed by a single field element.
///
/// Each round computes `t = xL + key + c_i` and replaces the pair by
/// `(xR + t^5, xL)`. The last round adds `t^5` to `xR` without swapping.
/// A Feistel network is a bijection whatever its round function, so the map
/// `state -> permute(state)` is invertible for a known key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MimcFeistel {
    key: Fr,
    constants: RoundConstants,
}

impl MimcFeistel {
    /// Permutation with the protocol round constants.
    pub fn new(key: Fr) -> Self {
        Self {
            key,
            constants: RoundConstants::standard(),
        }
    }

    /// Permutation with a validated constant table.
    pub fn with_constants(key: Fr, constants: RoundConstants) -> Self {
        Self { key, constants }
    }

    pub fn from_params(key: Fr, params: &MimcParams) -> Result<Self, MimcError> {
        Ok(Self::with_constants(key, params.round_constants()?))
    }

    pub fn key(&self) -> Fr {
        self.key
    }

    pub fn rounds(&self) -> usize {
        self.constants.rounds()
    }

    pub fn constants(&self) -> &RoundConstants {
        &self.constants
    }
}

impl Permutation<PermutationState> for MimcFeistel {
    fn permute_mut(&self, state: &mut PermutationState) {
        let [mut xl, mut xr] = *state;
        let last = self.constants.len() - 1;

        for (i, &c) in self.constants.iter().enumerate() {
            let t = xl + self.key + c;
            let t5 = t.exp_const_u64::<MIMC_EXPONENT>();
            if i < last {
                let next_l = xr + t5;
                xr = xl;
                xl = next_l;
            } else {
                xr += t5;
            }
        }

        *state = [xl, xr];
    }
}

impl CryptographicPermutation<PermutationState> for MimcFeistel {}
