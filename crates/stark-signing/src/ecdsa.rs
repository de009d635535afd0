//! # Signature Engine
//!
//! Deterministic-nonce ECDSA over the STARK curve.
//!
//! The signing loop walks DeriveNonce → ComputeR → CheckR → ComputeS →
//! CheckS and retries on a rejected candidate, bounded by the shared grind
//! cap. Verification validates its inputs with typed errors, then answers
//! a plain boolean: a structurally valid but mathematically false
//! signature is `false`, never an error.

use primitive_types::U256;
use sha2::{Digest, Sha256};
use stark_crypto::constants::{CURVE_ORDER, GRIND_RETRY_CAP};
use stark_crypto::field::{add_mod, inv_mod, mul_mod};
use stark_crypto::{CryptoError, CurvePoint, FieldElement};
use zeroize::Zeroize;

use crate::grind::next_digest;
use crate::keys::{check_private_key, private_key_to_public_key};

/// An ECDSA signature: the ephemeral x-coordinate mod n and the proof
/// scalar, both in `[1, n - 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signature {
    /// `R.x mod n`.
    pub r: U256,
    /// `k^-1 (hash + r * priv) mod n`.
    pub s: U256,
}

/// The alternate ("eth") signature form: the full ephemeral point and the
/// signer's public key, for counterparts that verify against the point
/// rather than its x-coordinate alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EthSignature {
    /// The ephemeral point `k * G`.
    pub r_point: CurvePoint,
    /// The proof scalar.
    pub s: U256,
    /// The signer's public key.
    pub public_key: CurvePoint,
}

// The deterministic nonce seed: sha256 over the big-endian private key
// and message hash. Retries re-hash the digest, same as key grinding.
fn nonce_seed(private_key: U256, message_hash: FieldElement) -> [u8; 32] {
    let mut bytes = [0u8; 64];
    private_key.to_big_endian(&mut bytes[..32]);
    message_hash.to_u256().to_big_endian(&mut bytes[32..]);
    let digest = Sha256::digest(bytes).into();
    bytes.zeroize();
    digest
}

fn uniform_nonce_bound() -> U256 {
    let n = *CURVE_ORDER;
    let remainder = ((U256::MAX % n) + U256::one()) % n;
    (U256::MAX - remainder) + U256::one()
}

struct SignOutput {
    r: U256,
    r_point: CurvePoint,
    s: U256,
}

// One bounded loop covers nonce grinding and the r/s zero checks; every
// rejection advances the digest chain, so retries stay deterministic.
fn sign_inner(private_key: U256, message_hash: FieldElement) -> Result<SignOutput, CryptoError> {
    check_private_key(private_key)?;
    let n = *CURVE_ORDER;
    let bound = uniform_nonce_bound();
    let z = message_hash.to_u256() % n;

    let mut digest = nonce_seed(private_key, message_hash);
    let mut result = Err(CryptoError::Exhausted(GRIND_RETRY_CAP));
    for attempt in 0..GRIND_RETRY_CAP {
        // DeriveNonce
        let candidate = U256::from_big_endian(&digest);
        digest = next_digest(&digest);
        if candidate >= bound {
            continue;
        }
        let k = candidate % n;
        if k.is_zero() {
            continue;
        }

        // ComputeR / CheckR
        let r_point = CurvePoint::generator().mul(k);
        let r = r_point.x.to_u256() % n;
        if r.is_zero() {
            tracing::trace!(attempt, "r = 0, re-deriving nonce");
            continue;
        }

        // ComputeS / CheckS
        let k_inv = inv_mod(k, n)?;
        let s = mul_mod(k_inv, add_mod(z, mul_mod(r, private_key, n), n), n);
        if s.is_zero() {
            tracing::trace!(attempt, "s = 0, re-deriving nonce");
            continue;
        }

        result = Ok(SignOutput { r, r_point, s });
        break;
    }
    digest.zeroize();
    result
}

/// Sign a message hash. Deterministic: the same `(private key, hash)`
/// always yields the same signature.
pub fn sign(private_key: U256, message_hash: FieldElement) -> Result<Signature, CryptoError> {
    let out = sign_inner(private_key, message_hash)?;
    Ok(Signature { r: out.r, s: out.s })
}

/// Sign a message hash, returning the full ephemeral point and the
/// signer's public key.
pub fn eth_sign(private_key: U256, message_hash: FieldElement) -> Result<EthSignature, CryptoError> {
    let out = sign_inner(private_key, message_hash)?;
    let public_key = private_key_to_public_key(private_key)?;
    Ok(EthSignature {
        r_point: out.r_point,
        s: out.s,
        public_key,
    })
}

/// Verify a signature against a public key and message hash.
///
/// Malformed input (`r` or `s` outside `[1, n - 1]`, a public key off
/// the curve) is a typed error. A well-formed signature that simply does
/// not verify is `Ok(false)`.
pub fn verify(
    public_key: &CurvePoint,
    message_hash: FieldElement,
    signature: &Signature,
) -> Result<bool, CryptoError> {
    let n = *CURVE_ORDER;
    if signature.r.is_zero() || signature.r >= n {
        return Err(CryptoError::OutOfRange("signature r not in [1, n-1]".into()));
    }
    if signature.s.is_zero() || signature.s >= n {
        return Err(CryptoError::OutOfRange("signature s not in [1, n-1]".into()));
    }
    if !public_key.is_on_curve() {
        return Err(CryptoError::InvalidPoint);
    }

    let w = inv_mod(signature.s, n)?;
    let u1 = mul_mod(message_hash.to_u256() % n, w, n);
    let u2 = mul_mod(signature.r, w, n);
    let point = CurvePoint::generator()
        .mul(u1)
        .add(&public_key.mul(u2));
    if point.is_identity() {
        return Ok(false);
    }
    Ok(point.x.to_u256() % n == signature.r)
}
