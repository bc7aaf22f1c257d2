//! The keyed MiMC sponge expressed as circuit operations.

use field::Fr;
use mimc::{MimcError, MimcParams, RoundConstants};

use crate::api::CircuitApi;
use crate::error::Result;

/// In-circuit counterpart of [`mimc::MimcSponge`].
///
/// Produces the same outputs for the same key and inputs; each round costs
/// three multiplications for `t^5`.
#[derive(Clone, Debug)]
pub struct MimcSpongeGadget<V> {
    key: V,
    constants: RoundConstants,
    outputs: usize,
}

impl<V: Copy> MimcSpongeGadget<V> {
    pub fn new(key: V, params: &MimcParams, outputs: usize) -> Result<Self> {
        if outputs == 0 {
            return Err(MimcError::ZeroOutputs.into());
        }
        Ok(Self {
            key,
            constants: params.round_constants()?,
            outputs,
        })
    }

    fn permute<A>(&self, api: &mut A, mut xl: V, mut xr: V) -> (V, V)
    where
        A: CircuitApi<Var = V>,
    {
        let last = self.constants.len() - 1;
        for (i, &c) in self.constants.iter().enumerate() {
            let mut t = api.add(xl, self.key);
            if !c.is_zero() {
                t = api.add_constant(t, c);
            }
            let t2 = api.mul(t, t);
            let t4 = api.mul(t2, t2);
            let t5 = api.mul(t4, t);

            if i < last {
                let next = api.add(xr, t5);
                xr = xl;
                xl = next;
            } else {
                xr = api.add(xr, t5);
            }
        }
        (xl, xr)
    }

    /// Absorb `inputs` in order and squeeze the configured number of outputs.
    pub fn hash<A>(&self, api: &mut A, inputs: &[V]) -> Result<Vec<V>>
    where
        A: CircuitApi<Var = V>,
    {
        if inputs.is_empty() {
            return Err(MimcError::EmptyInput.into());
        }

        let mut xl = api.constant(Fr::ZERO);
        let mut xr = xl;
        for &input in inputs {
            xl = api.add(xl, input);
            (xl, xr) = self.permute(api, xl, xr);
        }

        let mut outputs = Vec::with_capacity(self.outputs);
        outputs.push(xl);
        for _ in 1..self.outputs {
            (xl, xr) = self.permute(api, xl, xr);
            outputs.push(xl);
        }
        Ok(outputs)
    }

    pub fn hash_one<A>(&self, api: &mut A, inputs: &[V]) -> Result<V>
    where
        A: CircuitApi<Var = V>,
    {
        self.hash(api, inputs).map(|outputs| outputs[0])
    }
}
