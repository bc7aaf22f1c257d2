//! Scalar field of the BN254 curve.
//!
//! Every value handled by the MiMC sponge and by the location circuits lives
//! in this field. The modulus is fixed for the whole workspace:
//!
//! ```text
//! p = 21888242871839275222246405745257275088548364400416034343698204186575808495617
//! ```
//!
//! [`Fr`] stores elements in Montgomery form and implements the `p3-field`
//! trait family, so it composes with the rest of the Plonky3 tooling.

mod error;
mod fr;
mod random;

pub use error::FieldError;
pub use fr::Fr;
pub use random::RandomField;
