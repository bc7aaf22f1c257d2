//! Annulus membership with a hash commitment to the hidden coordinate.

use field::Fr;
use mimc::MimcParams;
use p3_field::PrimeCharacteristicRing;

use crate::api::{Circuit, CircuitApi, Derived, Slot, Visibility};
use crate::assignment::Assignment;
use crate::error::Result;
use crate::mimc_gadget::MimcSpongeGadget;

pub const RADIUS: &str = "r";
pub const PLANETHASH_KEY: &str = "PLANETHASH_KEY";
pub const X: &str = "x";
pub const Y: &str = "y";
pub const LOCATION_ID: &str = "LocationId";

/// Offset moving a signed 32-bit coordinate into `[0, 2^32)`.
const COORDINATE_OFFSET: u64 = 1 << 31;

/// Proves that the secret point `(x, y)` satisfies
///
/// ```text
/// |x|, |y| <= 2^31
/// 0.98 * r^2 < x^2 + y^2 < r^2
/// LocationId = MiMCSponge(PLANETHASH_KEY).hash([x])
/// ```
///
/// without revealing it. `r` and `PLANETHASH_KEY` are public; `LocationId`
/// is a derived public output.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InitCircuit {
    pub params: MimcParams,
}

impl InitCircuit {
    pub fn new(params: MimcParams) -> Self {
        Self { params }
    }
}

impl Circuit for InitCircuit {
    fn slots(&self) -> Vec<Slot> {
        vec![
            Slot::public(RADIUS),
            Slot::public(PLANETHASH_KEY),
            Slot::secret(X),
            Slot::secret(Y),
        ]
    }

    fn define<A: CircuitApi>(&self, api: &mut A) -> Result<Vec<Derived<A::Var>>> {
        let r = api.input(RADIUS, Visibility::Public)?;
        let key = api.input(PLANETHASH_KEY, Visibility::Public)?;
        let x = api.input(X, Visibility::Secret)?;
        let y = api.input(Y, Visibility::Secret)?;

        api.section("coordinate range");
        let max = api.constant(Fr::from_canonical_u64(u32::MAX as u64));
        for coordinate in [x, y] {
            let shifted = api.add_constant(coordinate, Fr::from_canonical_u64(COORDINATE_OFFSET));
            api.assert_less_or_equal(shifted, max);
        }

        api.section("annulus upper bound");
        let x_sq = api.mul(x, x);
        let y_sq = api.mul(y, y);
        let r_sq = api.mul(r, r);
        let d_sq = api.add(x_sq, y_sq);
        let upper = api.cmp(d_sq, r_sq);
        let below = api.constant(Fr::NEG_ONE);
        api.assert_equal(upper, below);

        api.section("annulus lower bound");
        let scaled_d = api.mul_constant(d_sq, Fr::from_canonical_u64(100));
        let scaled_r = api.mul_constant(r_sq, Fr::from_canonical_u64(98));
        let lower = api.cmp(scaled_d, scaled_r);
        let above = api.constant(Fr::ONE);
        api.assert_equal(lower, above);

        api.section("location commitment");
        let sponge = MimcSpongeGadget::new(key, &self.params, 1)?;
        let location_id = sponge.hash_one(api, &[x])?;

        Ok(vec![Derived::new(LOCATION_ID, location_id)])
    }
}

/// Witness values of an [`InitCircuit`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct InitWitness {
    pub radius: u64,
    pub key: Fr,
    pub x: i64,
    pub y: i64,
}

impl From<InitWitness> for Assignment {
    fn from(witness: InitWitness) -> Self {
        Assignment::new()
            .with(RADIUS, Fr::from_canonical_u64(witness.radius))
            .with(PLANETHASH_KEY, witness.key)
            .with(X, Fr::from_i64(witness.x))
            .with(Y, Fr::from_i64(witness.y))
    }
}
