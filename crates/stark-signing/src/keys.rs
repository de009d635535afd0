//! # Key Management
//!
//! Seed-to-private-key derivation, public key derivation, on-curve
//! validation and x-only public-key recovery.

use primitive_types::U256;
use sha2::{Digest, Sha256};
use stark_crypto::constants::{CURVE_ORDER, GRIND_RETRY_CAP};
use stark_crypto::curve::curve_rhs;
use stark_crypto::{CryptoError, CurvePoint, FieldElement};
use zeroize::Zeroize;

use crate::grind::grind_scalar;

/// Seeds shorter than this carry too little entropy to grind a key from.
pub const MIN_SEED_LEN: usize = 32;

/// Check a private key against `[1, n - 1]`.
pub fn check_private_key(private_key: U256) -> Result<(), CryptoError> {
    if private_key.is_zero() || private_key >= *CURVE_ORDER {
        return Err(CryptoError::OutOfRange(
            "private key must be in [1, n-1]".into(),
        ));
    }
    Ok(())
}

/// Deterministically derive a private key from a seed string.
///
/// The seed is hashed once into an effective seed, then ground with the
/// bounded re-hash discipline until a scalar in `[1, n - 1]` falls out.
/// Reproducible for a given seed; `MalformedInput` below [`MIN_SEED_LEN`]
/// bytes, `Exhausted` past the retry cap.
pub fn private_key_from_seed(seed: &str) -> Result<U256, CryptoError> {
    if seed.len() < MIN_SEED_LEN {
        return Err(CryptoError::MalformedInput(format!(
            "seed must be at least {MIN_SEED_LEN} bytes, got {}",
            seed.len()
        )));
    }
    let mut effective: [u8; 32] = Sha256::digest(seed.as_bytes()).into();
    let first: [u8; 32] = Sha256::digest(effective).into();
    let key = grind_scalar(first, *CURVE_ORDER, GRIND_RETRY_CAP);
    effective.zeroize();
    key
}

/// Derive the public key `priv * G`. `OutOfRange` if the private key is
/// not in `[1, n - 1]`.
pub fn private_key_to_public_key(private_key: U256) -> Result<CurvePoint, CryptoError> {
    check_private_key(private_key)?;
    Ok(CurvePoint::generator().mul(private_key))
}

/// Whether `(x, y)` satisfies the curve equation.
pub fn is_on_curve(x: FieldElement, y: FieldElement) -> bool {
    CurvePoint::from_xy(x, y).is_ok()
}

/// Recover the full public key from an x-only form.
///
/// The curve equation yields two candidate roots; the canonical choice is
/// the even one (least significant bit zero), the other being its
/// negation. `InvalidPoint` when `x` is not on the curve.
pub fn public_key_to_xy(x: FieldElement) -> Result<(FieldElement, FieldElement), CryptoError> {
    let rhs = curve_rhs(x);
    let root = rhs.sqrt().ok_or(CryptoError::InvalidPoint)?;
    let y = if root.is_odd() { root.neg() } else { root };
    Ok((x, y))
}
