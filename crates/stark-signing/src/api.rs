//! # Boundary API
//!
//! The surface the host-language bindings call. Contract:
//!
//! - keys, hashes, signature components, coordinates: `0x`-prefixed
//!   big-endian hex strings, one canonical field element each
//! - business objects: one JSON document per call, integer fields as
//!   decimal strings; unknown fields ignored, missing required fields a
//!   hard error
//! - trades return one hash/signature per counterparty
//!
//! Every function is synchronous, pure and safe for unrestricted
//! concurrent invocation.

use primitive_types::U256;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use stark_crypto::field::parse_u256_hex;
use stark_crypto::{CryptoError, CurvePoint, FieldElement};
use stark_messages::{perpetual, spot, unified};

use crate::ecdsa;
use crate::keys;

/// A signature at the hex boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HexSignature {
    /// `r`, canonical hex.
    pub r: String,
    /// `s`, canonical hex.
    pub s: String,
}

/// The full-point ("eth") signature at the hex boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EthSignatureHex {
    /// Ephemeral point x.
    pub x: String,
    /// Ephemeral point y.
    pub y: String,
    /// Proof scalar.
    pub s: String,
    /// Signer public key x.
    pub pk_x: String,
    /// Signer public key y.
    pub pk_y: String,
}

/// Public key coordinates at the hex boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicKeyXy {
    /// Affine x.
    pub x: String,
    /// Affine y.
    pub y: String,
}

fn u256_to_hex(value: U256) -> String {
    let mut be = [0u8; 32];
    value.to_big_endian(&mut be);
    format!("0x{}", hex::encode(be))
}

fn parse_json<T: DeserializeOwned>(json: &str) -> Result<T, CryptoError> {
    serde_json::from_str(json).map_err(|e| {
        tracing::debug!(error = %e, "rejecting malformed message payload");
        CryptoError::MalformedInput(e.to_string())
    })
}

fn sign_hash(private_key: &str, hash: FieldElement) -> Result<HexSignature, CryptoError> {
    let key = parse_u256_hex(private_key)?;
    let signature = ecdsa::sign(key, hash)?;
    Ok(HexSignature {
        r: u256_to_hex(signature.r),
        s: u256_to_hex(signature.s),
    })
}

// ============================================================================
// LEGACY PERPETUAL FAMILY
// ============================================================================

/// Hash a withdrawal message.
pub fn hash_withdraw(json: &str) -> Result<String, CryptoError> {
    Ok(parse_json::<perpetual::Withdraw>(json)?.hash()?.to_hex())
}

/// Sign a withdrawal message.
pub fn sign_withdraw(json: &str, private_key: &str) -> Result<HexSignature, CryptoError> {
    sign_hash(private_key, parse_json::<perpetual::Withdraw>(json)?.hash()?)
}

/// Hash a transfer message.
pub fn hash_transfer(json: &str) -> Result<String, CryptoError> {
    Ok(parse_json::<perpetual::Transfer>(json)?.hash()?.to_hex())
}

/// Sign a transfer message.
pub fn sign_transfer(json: &str, private_key: &str) -> Result<HexSignature, CryptoError> {
    sign_hash(private_key, parse_json::<perpetual::Transfer>(json)?.hash()?)
}

/// Hash a limit order.
pub fn hash_limit_order(json: &str) -> Result<String, CryptoError> {
    Ok(parse_json::<perpetual::LimitOrder>(json)?.hash()?.to_hex())
}

/// Sign a limit order.
pub fn sign_limit_order(json: &str, private_key: &str) -> Result<HexSignature, CryptoError> {
    sign_hash(private_key, parse_json::<perpetual::LimitOrder>(json)?.hash()?)
}

/// Hash a liquidation.
pub fn hash_liquidate(json: &str) -> Result<String, CryptoError> {
    Ok(parse_json::<perpetual::Liquidate>(json)?.hash()?.to_hex())
}

/// Sign a liquidation (the liquidator signs).
pub fn sign_liquidate(json: &str, private_key: &str) -> Result<HexSignature, CryptoError> {
    sign_hash(private_key, parse_json::<perpetual::Liquidate>(json)?.hash()?)
}

/// Hash an oracle price attestation.
pub fn hash_signed_oracle_price(json: &str) -> Result<String, CryptoError> {
    Ok(parse_json::<perpetual::SignedOraclePrice>(json)?
        .hash()?
        .to_hex())
}

/// Sign an oracle price attestation.
pub fn sign_signed_oracle_price(
    json: &str,
    private_key: &str,
) -> Result<HexSignature, CryptoError> {
    sign_hash(
        private_key,
        parse_json::<perpetual::SignedOraclePrice>(json)?.hash()?,
    )
}

/// Hash a perpetual trade: one message hash per counterparty.
pub fn hash_perpetual_trade(json: &str) -> Result<(String, String), CryptoError> {
    let (a, b) = parse_json::<perpetual::PerpetualTrade>(json)?.party_hashes()?;
    Ok((a.to_hex(), b.to_hex()))
}

/// Sign a perpetual trade: each counterparty signs its own hash.
pub fn sign_perpetual_trade(
    json: &str,
    private_key_a: &str,
    private_key_b: &str,
) -> Result<(HexSignature, HexSignature), CryptoError> {
    let (a, b) = parse_json::<perpetual::PerpetualTrade>(json)?.party_hashes()?;
    Ok((sign_hash(private_key_a, a)?, sign_hash(private_key_b, b)?))
}

// ============================================================================
// LEGACY SPOT FAMILY
// ============================================================================

/// Hash a spot withdrawal.
pub fn hash_spot_withdrawal(json: &str) -> Result<String, CryptoError> {
    Ok(parse_json::<spot::SpotWithdrawal>(json)?.hash()?.to_hex())
}

/// Sign a spot withdrawal.
pub fn sign_spot_withdrawal(json: &str, private_key: &str) -> Result<HexSignature, CryptoError> {
    sign_hash(private_key, parse_json::<spot::SpotWithdrawal>(json)?.hash()?)
}

/// Hash a spot transfer.
pub fn hash_spot_transfer(json: &str) -> Result<String, CryptoError> {
    Ok(parse_json::<spot::SpotTransfer>(json)?.hash()?.to_hex())
}

/// Sign a spot transfer.
pub fn sign_spot_transfer(json: &str, private_key: &str) -> Result<HexSignature, CryptoError> {
    sign_hash(private_key, parse_json::<spot::SpotTransfer>(json)?.hash()?)
}

/// Hash a spot limit order.
pub fn hash_spot_limit_order(json: &str) -> Result<String, CryptoError> {
    Ok(parse_json::<spot::SpotLimitOrder>(json)?.hash()?.to_hex())
}

/// Sign a spot limit order.
pub fn sign_spot_limit_order(json: &str, private_key: &str) -> Result<HexSignature, CryptoError> {
    sign_hash(private_key, parse_json::<spot::SpotLimitOrder>(json)?.hash()?)
}

/// Hash a spot trade: one message hash per counterparty.
pub fn hash_spot_trade(json: &str) -> Result<(String, String), CryptoError> {
    let (a, b) = parse_json::<spot::SpotTrade>(json)?.party_hashes()?;
    Ok((a.to_hex(), b.to_hex()))
}

/// Sign a spot trade: each counterparty signs its own hash.
pub fn sign_spot_trade(
    json: &str,
    private_key_a: &str,
    private_key_b: &str,
) -> Result<(HexSignature, HexSignature), CryptoError> {
    let (a, b) = parse_json::<spot::SpotTrade>(json)?.party_hashes()?;
    Ok((sign_hash(private_key_a, a)?, sign_hash(private_key_b, b)?))
}

// ============================================================================
// UNIFIED FAMILY (version 2 encodings, explicit entry points)
// ============================================================================

/// Hash a unified withdrawal.
pub fn unified_hash_withdrawal(json: &str) -> Result<String, CryptoError> {
    Ok(parse_json::<unified::UnifiedWithdrawal>(json)?
        .hash()?
        .to_hex())
}

/// Sign a unified withdrawal.
pub fn unified_sign_withdrawal(
    json: &str,
    private_key: &str,
) -> Result<HexSignature, CryptoError> {
    sign_hash(
        private_key,
        parse_json::<unified::UnifiedWithdrawal>(json)?.hash()?,
    )
}

/// Hash a unified transfer.
pub fn unified_hash_transfer(json: &str) -> Result<String, CryptoError> {
    Ok(parse_json::<unified::UnifiedTransfer>(json)?
        .hash()?
        .to_hex())
}

/// Sign a unified transfer.
pub fn unified_sign_transfer(json: &str, private_key: &str) -> Result<HexSignature, CryptoError> {
    sign_hash(
        private_key,
        parse_json::<unified::UnifiedTransfer>(json)?.hash()?,
    )
}

/// Hash a unified spot limit order.
pub fn unified_hash_spot_limit_order(json: &str) -> Result<String, CryptoError> {
    Ok(parse_json::<unified::UnifiedSpotLimitOrder>(json)?
        .hash()?
        .to_hex())
}

/// Sign a unified spot limit order.
pub fn unified_sign_spot_limit_order(
    json: &str,
    private_key: &str,
) -> Result<HexSignature, CryptoError> {
    sign_hash(
        private_key,
        parse_json::<unified::UnifiedSpotLimitOrder>(json)?.hash()?,
    )
}

/// Hash a unified perpetual limit order.
pub fn unified_hash_perpetual_limit_order(json: &str) -> Result<String, CryptoError> {
    Ok(parse_json::<unified::UnifiedPerpetualLimitOrder>(json)?
        .hash()?
        .to_hex())
}

/// Sign a unified perpetual limit order.
pub fn unified_sign_perpetual_limit_order(
    json: &str,
    private_key: &str,
) -> Result<HexSignature, CryptoError> {
    sign_hash(
        private_key,
        parse_json::<unified::UnifiedPerpetualLimitOrder>(json)?.hash()?,
    )
}

/// Hash a unified liquidation.
pub fn unified_hash_liquidate(json: &str) -> Result<String, CryptoError> {
    Ok(parse_json::<unified::UnifiedLiquidate>(json)?
        .hash()?
        .to_hex())
}

/// Sign a unified liquidation.
pub fn unified_sign_liquidate(
    json: &str,
    private_key: &str,
) -> Result<HexSignature, CryptoError> {
    sign_hash(
        private_key,
        parse_json::<unified::UnifiedLiquidate>(json)?.hash()?,
    )
}

/// Hash a unified oracle price attestation.
pub fn unified_hash_oracle_price(json: &str) -> Result<String, CryptoError> {
    Ok(parse_json::<unified::UnifiedSignedOraclePrice>(json)?
        .hash()?
        .to_hex())
}

/// Sign a unified oracle price attestation.
pub fn unified_sign_oracle_price(
    json: &str,
    private_key: &str,
) -> Result<HexSignature, CryptoError> {
    sign_hash(
        private_key,
        parse_json::<unified::UnifiedSignedOraclePrice>(json)?.hash()?,
    )
}

/// Hash a unified spot trade: one message hash per counterparty.
pub fn unified_hash_spot_trade(json: &str) -> Result<(String, String), CryptoError> {
    let (a, b) = parse_json::<unified::UnifiedSpotTrade>(json)?.party_hashes()?;
    Ok((a.to_hex(), b.to_hex()))
}

/// Sign a unified spot trade: each counterparty signs its own hash.
pub fn unified_sign_spot_trade(
    json: &str,
    private_key_a: &str,
    private_key_b: &str,
) -> Result<(HexSignature, HexSignature), CryptoError> {
    let (a, b) = parse_json::<unified::UnifiedSpotTrade>(json)?.party_hashes()?;
    Ok((sign_hash(private_key_a, a)?, sign_hash(private_key_b, b)?))
}

/// Hash a unified perpetual trade: one message hash per counterparty.
pub fn unified_hash_perpetual_trade(json: &str) -> Result<(String, String), CryptoError> {
    let (a, b) = parse_json::<unified::UnifiedPerpetualTrade>(json)?.party_hashes()?;
    Ok((a.to_hex(), b.to_hex()))
}

/// Sign a unified perpetual trade: each counterparty signs its own hash.
pub fn unified_sign_perpetual_trade(
    json: &str,
    private_key_a: &str,
    private_key_b: &str,
) -> Result<(HexSignature, HexSignature), CryptoError> {
    let (a, b) = parse_json::<unified::UnifiedPerpetualTrade>(json)?.party_hashes()?;
    Ok((sign_hash(private_key_a, a)?, sign_hash(private_key_b, b)?))
}

// ============================================================================
// KEYS AND RAW SIGNATURES
// ============================================================================

/// Sign a pre-computed message hash.
pub fn sign(private_key: &str, message_hash: &str) -> Result<HexSignature, CryptoError> {
    sign_hash(private_key, FieldElement::from_hex(message_hash)?)
}

/// Verify a signature against public key coordinates and a message hash.
///
/// Typed errors cover malformed input only; a well-formed signature that
/// fails the curve check is a plain `false`.
pub fn verify_signature(
    sig_r: &str,
    sig_s: &str,
    public_key_x: &str,
    public_key_y: &str,
    message_hash: &str,
) -> Result<bool, CryptoError> {
    let signature = ecdsa::Signature {
        r: parse_u256_hex(sig_r)?,
        s: parse_u256_hex(sig_s)?,
    };
    let x = FieldElement::from_hex(public_key_x)?;
    let y = FieldElement::from_hex(public_key_y)?;
    let public_key = CurvePoint::from_xy(x, y)?;
    let hash = FieldElement::from_hex(message_hash)?;
    ecdsa::verify(&public_key, hash, &signature)
}

/// Sign a pre-computed hash, returning the full ephemeral point and
/// signer key coordinates.
pub fn eth_sign(private_key: &str, message_hash: &str) -> Result<EthSignatureHex, CryptoError> {
    let key = parse_u256_hex(private_key)?;
    let hash = FieldElement::from_hex(message_hash)?;
    let signature = ecdsa::eth_sign(key, hash)?;
    Ok(EthSignatureHex {
        x: signature.r_point.x.to_hex(),
        y: signature.r_point.y.to_hex(),
        s: u256_to_hex(signature.s),
        pk_x: signature.public_key.x.to_hex(),
        pk_y: signature.public_key.y.to_hex(),
    })
}

/// Deterministically derive a private key from a seed string.
pub fn private_key_from_seed(seed: &str) -> Result<String, CryptoError> {
    Ok(u256_to_hex(keys::private_key_from_seed(seed)?))
}

/// Derive public key coordinates from a private key.
pub fn private_key_to_public_key_xy(private_key: &str) -> Result<PublicKeyXy, CryptoError> {
    let key = parse_u256_hex(private_key)?;
    let public_key = keys::private_key_to_public_key(key)?;
    Ok(PublicKeyXy {
        x: public_key.x.to_hex(),
        y: public_key.y.to_hex(),
    })
}

/// Recover full public key coordinates from an x-only public key.
pub fn public_key_to_xy(public_key: &str) -> Result<PublicKeyXy, CryptoError> {
    let x = FieldElement::from_hex(public_key)?;
    let (x, y) = keys::public_key_to_xy(x)?;
    Ok(PublicKeyXy {
        x: x.to_hex(),
        y: y.to_hex(),
    })
}

/// Whether the supplied coordinates form a point on the curve.
pub fn is_on_curve(x: &str, y: &str) -> Result<bool, CryptoError> {
    let x = FieldElement::from_hex(x)?;
    let y = FieldElement::from_hex(y)?;
    Ok(keys::is_on_curve(x, y))
}
