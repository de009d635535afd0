//! # Boundary Contract
//!
//! The string/JSON boundary the host-language bindings depend on: hex
//! conventions, JSON field rules, and the typed-error contract.

#[cfg(test)]
mod tests {
    use crate::fixtures::{self, signer};
    use stark_crypto::CryptoError;
    use stark_signing::api::*;

    #[test]
    fn unknown_json_fields_are_ignored() {
        let patched = fixtures::WITHDRAW.replace(
            "\"nonce\": \"1\",",
            "\"nonce\": \"1\", \"gateway_request_id\": \"abc-123\",",
        );
        assert_eq!(
            hash_withdraw(&patched).unwrap(),
            hash_withdraw(fixtures::WITHDRAW).unwrap()
        );
    }

    #[test]
    fn missing_required_fields_are_hard_errors() {
        let truncated = fixtures::WITHDRAW.replace("\"asset_id\": \"0x1\"", "\"other\": \"0x1\"");
        assert!(matches!(
            hash_withdraw(&truncated),
            Err(CryptoError::MalformedInput(_))
        ));
    }

    #[test]
    fn bare_integers_are_rejected() {
        // The boundary convention is decimal strings, not JSON numbers.
        let patched = fixtures::TRANSFER.replace("\"amount\": \"0\"", "\"amount\": 0");
        assert!(matches!(
            hash_transfer(&patched),
            Err(CryptoError::MalformedInput(_))
        ));
    }

    #[test]
    fn oversized_public_key_is_rejected() {
        // 65 hex digits.
        let patched = fixtures::WITHDRAW.replace(
            "\"public_key\": \"0x01ef15c18599971b7beced415a40f0c7deacfd9b0d1819e03d723d8bc943cfca\"",
            "\"public_key\": \"0x01ef15c18599971b7beced415a40f0c7deacfd9b0d1819e03d723d8bc943cfcaa\"",
        );
        assert!(matches!(
            hash_withdraw(&patched),
            Err(CryptoError::MalformedInput(_))
        ));
    }

    #[test]
    fn bad_private_key_hex_is_malformed() {
        assert!(matches!(
            sign("0xnothex", "0x1"),
            Err(CryptoError::MalformedInput(_))
        ));
    }

    #[test]
    fn zero_private_key_is_out_of_range() {
        assert!(matches!(
            sign("0x0", "0x1"),
            Err(CryptoError::OutOfRange(_))
        ));
        assert!(matches!(
            private_key_to_public_key_xy("0x0"),
            Err(CryptoError::OutOfRange(_))
        ));
    }

    #[test]
    fn short_seed_is_malformed() {
        assert!(matches!(
            private_key_from_seed("short"),
            Err(CryptoError::MalformedInput(_))
        ));
    }

    #[test]
    fn seed_derivation_is_deterministic() {
        let a = private_key_from_seed(fixtures::SEED).unwrap();
        let b = private_key_from_seed(fixtures::SEED).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 66);
    }

    #[test]
    fn derived_keys_are_on_curve() {
        for seed in [
            "stark-tests deterministic signer seed",
            "another seed with enough entropy bytes",
            "third seed for the on-curve property..",
        ] {
            let private_key = private_key_from_seed(seed).unwrap();
            let public_key = private_key_to_public_key_xy(&private_key).unwrap();
            assert!(is_on_curve(&public_key.x, &public_key.y).unwrap());
        }
    }

    #[test]
    fn verify_rejects_off_curve_public_key() {
        let (private_key, _) = signer();
        let sig = sign(&private_key, "0x1").unwrap();
        assert_eq!(
            verify_signature(&sig.r, &sig.s, "0x1", "0x1", "0x1"),
            Err(CryptoError::InvalidPoint)
        );
    }

    #[test]
    fn tampered_signature_components_never_verify() {
        let (private_key, public_key) = signer();
        let hash = "0x0023456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef";
        let sig = sign(&private_key, hash).unwrap();
        assert!(verify_signature(&sig.r, &sig.s, &public_key.x, &public_key.y, hash).unwrap());

        // Flip one hex digit of r and of s. Out-of-range flips surface as
        // typed errors; in-range flips must verify false.
        let flip = |value: &str| -> String {
            let mut chars: Vec<char> = value.chars().collect();
            let last = chars.len() - 1;
            chars[last] = if chars[last] == '0' { '1' } else { '0' };
            chars.into_iter().collect()
        };

        let flipped_r = flip(&sig.r);
        assert!(
            !verify_signature(&flipped_r, &sig.s, &public_key.x, &public_key.y, hash)
                .unwrap_or(false)
        );
        let flipped_s = flip(&sig.s);
        assert!(
            !verify_signature(&sig.r, &flipped_s, &public_key.x, &public_key.y, hash)
                .unwrap_or(false)
        );
    }

    #[test]
    fn eth_sign_fields_are_consistent() {
        let (private_key, public_key) = signer();
        let hash = "0x0196cdf49e6d3f3614fdba8e3459fef498685b88627b80035c62beaa7ca056ee";
        let sig = eth_sign(&private_key, hash).unwrap();

        assert_eq!(sig.pk_x, public_key.x);
        assert_eq!(sig.pk_y, public_key.y);
        assert!(is_on_curve(&sig.x, &sig.y).unwrap());

        // Deterministic like the plain form.
        assert_eq!(eth_sign(&private_key, hash).unwrap(), sig);
    }

    #[test]
    fn x_only_recovery_is_canonical() {
        let (_, public_key) = signer();
        let a = public_key_to_xy(&public_key.x).unwrap();
        let b = public_key_to_xy(&public_key.x).unwrap();
        assert_eq!(a, b);
        assert!(is_on_curve(&a.x, &a.y).unwrap());
    }

    #[test]
    fn out_of_range_amounts_are_typed_errors() {
        let patched = fixtures::ORACLE_PRICE.replace(
            "\"external_price\": \"28409392522000000000000\"",
            // 2^120, one past the declared width.
            "\"external_price\": \"1329227995784915872903807060280344576\"",
        );
        assert!(matches!(
            hash_signed_oracle_price(&patched),
            Err(CryptoError::OutOfRange(_))
        ));
    }

    #[test]
    fn negative_fee_magnitude_is_bounded() {
        let patched = fixtures::UNIFIED_PERPETUAL_TRADE.replace(
            "\"actual_b_fee\": \"-9309\"",
            "\"actual_b_fee\": \"-9223372036854775808\"", // -2^63
        );
        assert!(matches!(
            unified_hash_perpetual_trade(&patched),
            Err(CryptoError::OutOfRange(_))
        ));
    }
}
