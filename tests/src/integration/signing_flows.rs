//! # Signing Flows
//!
//! For every message type in the catalogue: hash it, sign it, verify the
//! signature against the signer's public key, and check the signature
//! fails against a foreign key. This is the engine's end-to-end contract.

#[cfg(test)]
mod tests {
    use crate::fixtures::{self, signer, FOREIGN_KEY};
    use stark_signing::api::*;

    fn roundtrip(
        hash_fn: impl Fn(&str) -> Result<String, stark_crypto::CryptoError>,
        sign_fn: impl Fn(&str, &str) -> Result<HexSignature, stark_crypto::CryptoError>,
        json: &str,
    ) {
        let (private_key, public_key) = signer();

        let hash = hash_fn(json).expect("fixture must hash");
        assert_eq!(hash.len(), 66, "canonical hex hash");
        assert_eq!(hash, hash_fn(json).unwrap(), "hash is deterministic");

        let sig = sign_fn(json, &private_key).expect("fixture must sign");
        assert!(
            verify_signature(&sig.r, &sig.s, &public_key.x, &public_key.y, &hash).unwrap(),
            "signature verifies against the signer"
        );

        let foreign_y = public_key_to_xy(FOREIGN_KEY).unwrap();
        assert!(
            !verify_signature(&sig.r, &sig.s, &foreign_y.x, &foreign_y.y, &hash).unwrap(),
            "signature must not verify against a foreign key"
        );
    }

    fn trade_roundtrip(
        hash_fn: impl Fn(&str) -> Result<(String, String), stark_crypto::CryptoError>,
        sign_fn: impl Fn(
            &str,
            &str,
            &str,
        )
            -> Result<(HexSignature, HexSignature), stark_crypto::CryptoError>,
        json: &str,
    ) {
        let (private_key, public_key) = signer();

        let (hash_a, hash_b) = hash_fn(json).expect("fixture must hash");
        assert_ne!(hash_a, hash_b, "party hashes are independent");

        let (sig_a, sig_b) = sign_fn(json, &private_key, &private_key).expect("must sign");
        assert!(
            verify_signature(&sig_a.r, &sig_a.s, &public_key.x, &public_key.y, &hash_a).unwrap()
        );
        assert!(
            verify_signature(&sig_b.r, &sig_b.s, &public_key.x, &public_key.y, &hash_b).unwrap()
        );
        // Cross-party: A's signature does not cover B's hash.
        assert!(
            !verify_signature(&sig_a.r, &sig_a.s, &public_key.x, &public_key.y, &hash_b).unwrap()
        );
    }

    // === Legacy perpetual family ===

    #[test]
    fn withdraw_flow() {
        roundtrip(hash_withdraw, sign_withdraw, fixtures::WITHDRAW);
    }

    #[test]
    fn transfer_flow() {
        roundtrip(hash_transfer, sign_transfer, fixtures::TRANSFER);
    }

    #[test]
    fn limit_order_flow() {
        roundtrip(hash_limit_order, sign_limit_order, fixtures::LIMIT_ORDER);
    }

    #[test]
    fn liquidate_flow() {
        roundtrip(hash_liquidate, sign_liquidate, fixtures::LIQUIDATE);
    }

    #[test]
    fn oracle_price_flow() {
        roundtrip(
            hash_signed_oracle_price,
            sign_signed_oracle_price,
            fixtures::ORACLE_PRICE,
        );
    }

    #[test]
    fn perpetual_trade_flow() {
        trade_roundtrip(
            hash_perpetual_trade,
            sign_perpetual_trade,
            fixtures::PERPETUAL_TRADE,
        );
    }

    // === Legacy spot family ===

    #[test]
    fn spot_withdrawal_flow() {
        roundtrip(
            hash_spot_withdrawal,
            sign_spot_withdrawal,
            fixtures::SPOT_WITHDRAWAL,
        );
    }

    #[test]
    fn spot_transfer_flow() {
        roundtrip(hash_spot_transfer, sign_spot_transfer, fixtures::SPOT_TRANSFER);
    }

    #[test]
    fn spot_limit_order_flow() {
        roundtrip(
            hash_spot_limit_order,
            sign_spot_limit_order,
            fixtures::SPOT_LIMIT_ORDER,
        );
    }

    #[test]
    fn spot_trade_flow() {
        trade_roundtrip(hash_spot_trade, sign_spot_trade, fixtures::SPOT_TRADE);
    }

    // === Unified family ===

    #[test]
    fn unified_withdrawal_flow() {
        roundtrip(
            unified_hash_withdrawal,
            unified_sign_withdrawal,
            fixtures::UNIFIED_WITHDRAWAL,
        );
    }

    #[test]
    fn unified_transfer_flow() {
        roundtrip(
            unified_hash_transfer,
            unified_sign_transfer,
            fixtures::UNIFIED_TRANSFER,
        );
    }

    #[test]
    fn unified_spot_limit_order_flow() {
        roundtrip(
            unified_hash_spot_limit_order,
            unified_sign_spot_limit_order,
            fixtures::UNIFIED_SPOT_LIMIT_ORDER,
        );
    }

    #[test]
    fn unified_perpetual_limit_order_flow() {
        roundtrip(
            unified_hash_perpetual_limit_order,
            unified_sign_perpetual_limit_order,
            fixtures::UNIFIED_PERPETUAL_LIMIT_ORDER,
        );
    }

    #[test]
    fn unified_liquidate_flow() {
        roundtrip(
            unified_hash_liquidate,
            unified_sign_liquidate,
            fixtures::UNIFIED_LIQUIDATE,
        );
    }

    #[test]
    fn unified_oracle_price_flow() {
        roundtrip(
            unified_hash_oracle_price,
            unified_sign_oracle_price,
            fixtures::UNIFIED_ORACLE_PRICE,
        );
    }

    #[test]
    fn unified_spot_trade_flow() {
        trade_roundtrip(
            unified_hash_spot_trade,
            unified_sign_spot_trade,
            fixtures::UNIFIED_SPOT_TRADE,
        );
    }

    #[test]
    fn unified_perpetual_trade_flow() {
        trade_roundtrip(
            unified_hash_perpetual_trade,
            unified_sign_perpetual_trade,
            fixtures::UNIFIED_PERPETUAL_TRADE,
        );
    }

    // === Cross-family separation ===

    #[test]
    fn legacy_and_unified_encodings_never_collide() {
        // Hash every single-hash fixture through its encoder; the results
        // must be pairwise distinct.
        let hashes = [
            hash_withdraw(fixtures::WITHDRAW).unwrap(),
            hash_transfer(fixtures::TRANSFER).unwrap(),
            hash_limit_order(fixtures::LIMIT_ORDER).unwrap(),
            hash_liquidate(fixtures::LIQUIDATE).unwrap(),
            hash_signed_oracle_price(fixtures::ORACLE_PRICE).unwrap(),
            hash_spot_withdrawal(fixtures::SPOT_WITHDRAWAL).unwrap(),
            hash_spot_transfer(fixtures::SPOT_TRANSFER).unwrap(),
            hash_spot_limit_order(fixtures::SPOT_LIMIT_ORDER).unwrap(),
            unified_hash_withdrawal(fixtures::UNIFIED_WITHDRAWAL).unwrap(),
            unified_hash_transfer(fixtures::UNIFIED_TRANSFER).unwrap(),
            unified_hash_spot_limit_order(fixtures::UNIFIED_SPOT_LIMIT_ORDER).unwrap(),
            unified_hash_perpetual_limit_order(fixtures::UNIFIED_PERPETUAL_LIMIT_ORDER).unwrap(),
            unified_hash_liquidate(fixtures::UNIFIED_LIQUIDATE).unwrap(),
            unified_hash_oracle_price(fixtures::UNIFIED_ORACLE_PRICE).unwrap(),
        ];
        let mut sorted = hashes.to_vec();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), hashes.len(), "all message hashes distinct");
    }
}
