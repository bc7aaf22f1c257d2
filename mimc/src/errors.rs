//! Error types for the MiMC sponge.

use thiserror::Error;

/// Errors raised while configuring or calling the sponge.
///
/// Configuration errors are reported when a permutation or sponge is built,
/// never while hashing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MimcError {
    /// The round schedule needs at least a first and a last round.
    #[error("MiMC needs at least {min} rounds, got {rounds}")]
    TooFewRounds { rounds: usize, min: usize },

    /// The round count exceeds what a constant table may hold.
    #[error("MiMC accepts at most {max} rounds, got {rounds}")]
    TooManyRounds { rounds: usize, max: usize },

    /// An explicit round-constant table does not match the round count.
    #[error("expected {expected} round constants, got {actual}")]
    RoundCountMismatch { expected: usize, actual: usize },

    /// Hashing an empty sequence is not a supported call.
    #[error("cannot hash an empty input sequence")]
    EmptyInput,

    /// A sponge must squeeze at least one output.
    #[error("sponge must produce at least one output")]
    ZeroOutputs,
}
