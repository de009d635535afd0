//! Crypto error types.

use thiserror::Error;

/// Errors surfaced by the signing engine.
///
/// Every failure is synchronous and atomic: an operation either returns a
/// complete result or one of these kinds, never a partial result. Signature
/// verification is the one exception: a well-formed but
/// mathematically false signature is a boolean `false`, not an error.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CryptoError {
    /// Input could not be parsed (bad hex, bad JSON, missing field)
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// A value exceeds the bit width its field declares, or is negative
    /// where unsigned is required
    #[error("value out of range: {0}")]
    OutOfRange(String),

    /// Supplied coordinates are not a point on the curve
    #[error("point is not on the curve")]
    InvalidPoint,

    /// Modular inverse of zero
    #[error("division by zero field element")]
    DivisionByZero,

    /// A bounded grind loop hit its retry cap
    #[error("grind loop exhausted after {0} iterations")]
    Exhausted(u32),
}
