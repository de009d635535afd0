//! Bounded scalar grinding.
//!
//! Both key derivation and nonce derivation draw scalars the same way:
//! hash, check, re-hash. A candidate digest is accepted only below the
//! uniform-rejection bound `2^256 - (2^256 mod n)` so that the reduced
//! scalar is unbiased; zero is rejected outright. The loop is capped and
//! fails with `Exhausted` rather than spinning.

use primitive_types::U256;
use sha2::{Digest, Sha256};
use stark_crypto::CryptoError;
use zeroize::Zeroize;

/// Largest multiple of `modulus` representable in 256 bits; candidates at
/// or above it would bias the reduction and are re-ground.
fn uniform_bound(modulus: U256) -> U256 {
    // 2^256 mod m, computed without leaving 256-bit arithmetic:
    // ((2^256 - 1) mod m + 1) mod m. The protocol moduli are ~2^251, so
    // the remainder is never zero and the subtraction below cannot wrap.
    let remainder = ((U256::MAX % modulus) + U256::one()) % modulus;
    (U256::MAX - remainder) + U256::one()
}

/// Grind a scalar in `[1, modulus - 1]` from an initial digest, re-hashing
/// up to `cap` times. Deterministic in `initial`.
pub(crate) fn grind_scalar(
    initial: [u8; 32],
    modulus: U256,
    cap: u32,
) -> Result<U256, CryptoError> {
    let bound = uniform_bound(modulus);
    let mut digest = initial;
    let mut result = Err(CryptoError::Exhausted(cap));
    for attempt in 0..cap {
        let candidate = U256::from_big_endian(&digest);
        if candidate < bound {
            let scalar = candidate % modulus;
            if !scalar.is_zero() {
                result = Ok(scalar);
                break;
            }
        }
        tracing::trace!(attempt, "grind candidate rejected");
        digest = Sha256::digest(digest).into();
    }
    digest.zeroize();
    result
}

/// One grind step: the next digest in the re-hash chain.
pub(crate) fn next_digest(digest: &[u8; 32]) -> [u8; 32] {
    Sha256::digest(digest).into()
}
