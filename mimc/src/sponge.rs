//! Rate-1 sponge over the keyed Feistel permutation.

use field::Fr;
use p3_symmetric::Permutation;

use crate::errors::MimcError;
use crate::params::MimcParams;
use crate::permutation::{MimcFeistel, PermutationState};

/// Transient state of one sponge evaluation.
///
/// Tracks the permutation state and how many elements were absorbed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SpongeState {
    state: PermutationState,
    absorbed: usize,
}

impl SpongeState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `input` to the rate element and permute.
    pub fn absorb(&mut self, permutation: &MimcFeistel, input: Fr) {
        self.state[0] += input;
        permutation.permute_mut(&mut self.state);
        self.absorbed += 1;
    }

    /// Current rate element.
    pub fn squeeze(&self) -> Fr {
        self.state[0]
    }

    /// Permute without absorbing, used between successive squeezes.
    pub fn permute(&mut self, permutation: &MimcFeistel) {
        permutation.permute_mut(&mut self.state);
    }

    pub fn absorbed(&self) -> usize {
        self.absorbed
    }
}

/// Keyed MiMC sponge hashing field elements to `outputs` field elements.
///
/// # Example
///
/// ```
/// use field::Fr;
/// use mimc::MimcSponge;
///
/// let sponge = MimcSponge::new(Fr::ZERO);
/// let digest = sponge.hash_one(&[Fr::from_canonical_u64(1764)]).expect("non-empty input");
/// assert_eq!(
///     digest.to_string(),
///     "15893827533473716138720882070731822975159228540693753428689375377280130954696"
/// );
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MimcSponge {
    permutation: MimcFeistel,
    outputs: usize,
}

impl MimcSponge {
    /// Single-output sponge with the protocol parameters.
    pub fn new(key: Fr) -> Self {
        Self {
            permutation: MimcFeistel::new(key),
            outputs: 1,
        }
    }

    pub fn with_permutation(permutation: MimcFeistel, outputs: usize) -> Result<Self, MimcError> {
        if outputs == 0 {
            return Err(MimcError::ZeroOutputs);
        }
        Ok(Self {
            permutation,
            outputs,
        })
    }

    pub fn from_params(key: Fr, params: &MimcParams, outputs: usize) -> Result<Self, MimcError> {
        Self::with_permutation(MimcFeistel::from_params(key, params)?, outputs)
    }

    pub fn permutation(&self) -> &MimcFeistel {
        &self.permutation
    }

    pub fn outputs(&self) -> usize {
        self.outputs
    }

    /// Absorb `inputs` in order and squeeze `self.outputs()` elements.
    pub fn hash(&self, inputs: &[Fr]) -> Result<Vec<Fr>, MimcError> {
        if inputs.is_empty() {
            return Err(MimcError::EmptyInput);
        }

        let mut state = SpongeState::new();
        for &input in inputs {
            state.absorb(&self.permutation, input);
        }

        let mut outputs = Vec::with_capacity(self.outputs);
        outputs.push(state.squeeze());
        for _ in 1..self.outputs {
            state.permute(&self.permutation);
            outputs.push(state.squeeze());
        }
        Ok(outputs)
    }

    /// First squeezed element; the only one either location circuit consumes.
    pub fn hash_one(&self, inputs: &[Fr]) -> Result<Fr, MimcError> {
        self.hash(inputs).map(|outputs| outputs[0])
    }
}
