//! # Stark Signing - Keys, Signatures and the Boundary API
//!
//! The signing half of the engine:
//!
//! - `keys`: seed-to-key grinding, public key derivation, x-only
//!   public-key recovery
//! - `ecdsa`: deterministic-nonce signing, verification, and the
//!   full-point ("eth") signature form
//! - `api`: the string/JSON boundary the host-language bindings call;
//!   hex in, hex out, one JSON document per message
//!
//! ## Security Notes
//!
//! - Nonces are derived deterministically from `(private key, message
//!   hash)`; no RNG is involved anywhere in the crate
//! - Grind loops are bounded (`Exhausted` past the cap), never unbounded
//!   recursion
//! - Key-material intermediates are zeroized

pub mod api;
pub mod ecdsa;
pub mod keys;

mod grind;

pub use api::{
    eth_sign, hash_limit_order, hash_liquidate, hash_perpetual_trade, hash_signed_oracle_price,
    hash_spot_limit_order, hash_spot_trade, hash_spot_transfer, hash_spot_withdrawal,
    hash_transfer, hash_withdraw, is_on_curve, private_key_from_seed,
    private_key_to_public_key_xy, public_key_to_xy, sign, sign_limit_order, sign_liquidate,
    sign_perpetual_trade, sign_signed_oracle_price, sign_spot_limit_order, sign_spot_trade,
    sign_spot_transfer, sign_spot_withdrawal, sign_transfer, sign_withdraw,
    unified_hash_liquidate, unified_hash_oracle_price, unified_hash_perpetual_limit_order,
    unified_hash_perpetual_trade, unified_hash_spot_limit_order, unified_hash_spot_trade,
    unified_hash_transfer, unified_hash_withdrawal, unified_sign_liquidate,
    unified_sign_oracle_price, unified_sign_perpetual_limit_order, unified_sign_perpetual_trade,
    unified_sign_spot_limit_order, unified_sign_spot_trade, unified_sign_transfer,
    unified_sign_withdrawal, verify_signature, EthSignatureHex, HexSignature, PublicKeyXy,
};
pub use ecdsa::{EthSignature, Signature};
