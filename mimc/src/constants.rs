//! Protocol constants of the MiMC sponge.
//!
//! Every prover and verifier of the location circuits must agree on these
//! values bit for bit.

/// Number of Feistel rounds.
///
/// 220 = 2 * ceil(log_5 p) for the BN254 scalar field.
pub const MIMC_ROUNDS: usize = 220;

/// Exponent of the round nonlinearity. gcd(5, p - 1) = 1, so x^5 is a bijection.
pub const MIMC_EXPONENT: u64 = 5;

/// Seed hashed with Keccak-256 to derive the round constants.
pub const MIMC_SEED: &str = "mimcsponge";

/// Number of field elements in the permutation state (xL, xR).
pub const STATE_WIDTH: usize = 2;

/// Number of field elements absorbed or squeezed per permutation call.
pub const SPONGE_RATE: usize = 1;

/// Smallest round count accepted; the first and last constants are pinned to zero.
pub(crate) const MIN_ROUNDS: usize = 2;

/// Largest round count accepted for a derived constant table.
pub const MAX_ROUNDS: usize = 1 << 16;
