//! Constraint-system surface shared by the symbolic builder and the witness evaluator.
//!
//! Circuits are written once against [`CircuitApi`]. Running them through a
//! [`crate::ConstraintBuilder`] records the constraint graph a proof backend
//! compiles; running them through a [`crate::WitnessEvaluator`] computes the
//! derived values of a concrete witness and reports violated assertions.

use core::cmp::Ordering;
use core::fmt::Debug;

use field::Fr;
use p3_field::PrimeCharacteristicRing;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Whether a slot is disclosed to the verifier.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Secret,
}

/// Named input slot of a circuit descriptor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub name: String,
    pub visibility: Visibility,
}

impl Slot {
    pub fn public(name: &str) -> Self {
        Self {
            name: name.to_string(),
            visibility: Visibility::Public,
        }
    }

    pub fn secret(name: &str) -> Self {
        Self {
            name: name.to_string(),
            visibility: Visibility::Secret,
        }
    }
}

/// Value produced by a circuit declaration and exposed as a public output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Derived<V> {
    pub name: String,
    pub value: V,
}

impl<V> Derived<V> {
    pub fn new(name: &str, value: V) -> Self {
        Self {
            name: name.to_string(),
            value,
        }
    }
}

/// Operations a circuit may use to declare its relation.
///
/// Comparisons act on the canonical representatives in `[0, p)`, so a
/// negative coordinate `-k` compares as `p - k`.
pub trait CircuitApi {
    type Var: Copy + Debug;

    /// Declare a named input slot.
    fn input(&mut self, name: &str, visibility: Visibility) -> Result<Self::Var>;

    fn constant(&mut self, value: Fr) -> Self::Var;

    fn add(&mut self, a: Self::Var, b: Self::Var) -> Self::Var;

    fn mul(&mut self, a: Self::Var, b: Self::Var) -> Self::Var;

    /// `-1`, `0` or `1` as `a` is below, equal to or above `b`.
    fn cmp(&mut self, a: Self::Var, b: Self::Var) -> Self::Var;

    fn assert_equal(&mut self, a: Self::Var, b: Self::Var);

    fn assert_less_or_equal(&mut self, a: Self::Var, b: Self::Var);

    /// Label the assertions declared from now on.
    fn section(&mut self, _name: &'static str) {}

    fn add_constant(&mut self, a: Self::Var, value: Fr) -> Self::Var {
        let c = self.constant(value);
        self.add(a, c)
    }

    fn mul_constant(&mut self, a: Self::Var, value: Fr) -> Self::Var {
        let c = self.constant(value);
        self.mul(c, a)
    }
}

/// A relation declared against a [`CircuitApi`].
pub trait Circuit {
    /// Input slots, in declaration order.
    fn slots(&self) -> Vec<Slot>;

    /// Declare every constraint exactly once and return the derived values.
    fn define<A: CircuitApi>(&self, api: &mut A) -> Result<Vec<Derived<A::Var>>>;
}

pub(crate) fn compare(a: Fr, b: Fr) -> Fr {
    match a.cmp(&b) {
        Ordering::Less => Fr::NEG_ONE,
        Ordering::Equal => Fr::ZERO,
        Ordering::Greater => Fr::ONE,
    }
}
