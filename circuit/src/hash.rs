//! Knowledge of a MiMC preimage for a public coordinate.

use field::Fr;
use mimc::MimcParams;

use crate::api::{Circuit, CircuitApi, Derived, Slot, Visibility};
use crate::assignment::Assignment;
use crate::error::Result;
use crate::mimc_gadget::MimcSpongeGadget;

pub const KEY: &str = "key";
pub const X: &str = "x";
pub const HASH: &str = "hash";

/// Proves `hash == MiMCSponge(key).hash([x])` with `x <= 2^31 - 1`.
///
/// Only the upper bound of `x` is checked; a negative `x` wraps to a large
/// canonical value and fails it. `key` and `x` are public, the visibility of
/// `hash` is chosen by the caller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HashCircuit {
    pub params: MimcParams,
    pub hash_visibility: Visibility,
}

impl HashCircuit {
    pub fn new(hash_visibility: Visibility) -> Self {
        Self {
            params: MimcParams::default(),
            hash_visibility,
        }
    }

    pub fn with_params(params: MimcParams, hash_visibility: Visibility) -> Self {
        Self {
            params,
            hash_visibility,
        }
    }
}

impl Circuit for HashCircuit {
    fn slots(&self) -> Vec<Slot> {
        vec![
            Slot::public(KEY),
            Slot::public(X),
            Slot {
                name: HASH.to_string(),
                visibility: self.hash_visibility,
            },
        ]
    }

    fn define<A: CircuitApi>(&self, api: &mut A) -> Result<Vec<Derived<A::Var>>> {
        let key = api.input(KEY, Visibility::Public)?;
        let x = api.input(X, Visibility::Public)?;
        let hash = api.input(HASH, self.hash_visibility)?;

        api.section("coordinate range");
        let max = api.constant(Fr::from_canonical_u64(i32::MAX as u64));
        api.assert_less_or_equal(x, max);

        api.section("hash preimage");
        let sponge = MimcSpongeGadget::new(key, &self.params, 1)?;
        let digest = sponge.hash_one(api, &[x])?;
        api.assert_equal(digest, hash);

        Ok(Vec::new())
    }
}

/// Witness values of a [`HashCircuit`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct HashWitness {
    pub key: Fr,
    pub x: i64,
    pub hash: Fr,
}

impl From<HashWitness> for Assignment {
    fn from(witness: HashWitness) -> Self {
        Assignment::new()
            .with(KEY, witness.key)
            .with(X, Fr::from_i64(witness.x))
            .with(HASH, witness.hash)
    }
}
