//! Shared value types and serde helpers for the message encoders.
//!
//! The JSON boundary convention is inherited from the gateway API:
//! integers travel as decimal strings, asset identifiers and keys as
//! `0x` hex strings.

use std::fmt;
use std::str::FromStr;

use primitive_types::U256;
use stark_crypto::errors::CryptoError;

/// A settled amount that may be negative (trade fee deltas).
///
/// Sign travels out-of-band in JSON (a leading `-`); on the wire the value
/// is packed into an unsigned 64-bit lane with the fixed bias `2^63 + v`,
/// so the packed word width never depends on the sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SignedAmount {
    /// Absolute value.
    pub magnitude: u64,
    /// True for negative amounts.
    pub is_negative: bool,
}

impl SignedAmount {
    /// Bias encoding `2^63 + v`. The representable range is
    /// `(-2^63, 2^63)`; anything else is `OutOfRange`.
    pub fn biased(self) -> Result<u64, CryptoError> {
        const BIAS: u64 = 1 << 63;
        if self.magnitude >= BIAS {
            return Err(CryptoError::OutOfRange(format!(
                "signed amount magnitude {} exceeds 2^63 - 1",
                self.magnitude
            )));
        }
        Ok(if self.is_negative {
            BIAS - self.magnitude
        } else {
            BIAS + self.magnitude
        })
    }
}

impl fmt::Display for SignedAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negative && self.magnitude != 0 {
            write!(f, "-{}", self.magnitude)
        } else {
            write!(f, "{}", self.magnitude)
        }
    }
}

impl FromStr for SignedAmount {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (is_negative, digits) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        let magnitude = digits
            .parse::<u64>()
            .map_err(|e| CryptoError::MalformedInput(format!("signed amount: {e}")))?;
        Ok(Self {
            magnitude,
            is_negative,
        })
    }
}

mod serde_impl {
    use super::*;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    impl Serialize for SignedAmount {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            String::serialize(&self.to_string(), serializer)
        }
    }

    impl<'de> Deserialize<'de> for SignedAmount {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let s = String::deserialize(deserializer)?;
            s.parse().map_err(D::Error::custom)
        }
    }
}

/// Serde for `U256` asset identifiers as `0x` hex strings.
pub mod u256_hex {
    use super::*;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use stark_crypto::field::parse_u256_hex;

    /// Serialize as minimal `0x` hex.
    pub fn serialize<S: Serializer>(value: &U256, serializer: S) -> Result<S::Ok, S::Error> {
        String::serialize(&format!("0x{value:x}"), serializer)
    }

    /// Deserialize from a `0x` hex string.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<U256, D::Error> {
        let s = String::deserialize(deserializer)?;
        parse_u256_hex(&s).map_err(D::Error::custom)
    }
}

/// Serde for `u32` asset identifiers as `0x` hex strings (spot and
/// unified families).
pub mod u32_hex {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    /// Serialize as minimal `0x` hex.
    pub fn serialize<S: Serializer>(value: &u32, serializer: S) -> Result<S::Ok, S::Error> {
        String::serialize(&format!("{value:#x}"), serializer)
    }

    /// Deserialize from a `0x` hex string.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
        let s = String::deserialize(deserializer)?;
        let digits = s.trim().trim_start_matches("0x").trim_start_matches("0X");
        if digits.is_empty() || digits.len() > 8 {
            return Err(D::Error::custom(format!(
                "asset id must be 1..=8 hex digits, got {}",
                digits.len()
            )));
        }
        u32::from_str_radix(digits, 16).map_err(D::Error::custom)
    }
}

/// Upper bound for wide (250-bit) asset identifiers.
pub fn check_asset_id_250(asset_id: U256) -> Result<(), CryptoError> {
    if asset_id >= (U256::one() << 250) {
        return Err(CryptoError::OutOfRange(
            "asset id exceeds 250 bits".into(),
        ));
    }
    Ok(())
}

/// Upper bound for external oracle prices (120 bits).
pub fn check_external_price(price: u128) -> Result<(), CryptoError> {
    if price >= (1u128 << 120) {
        return Err(CryptoError::OutOfRange(
            "external price exceeds 120 bits".into(),
        ));
    }
    Ok(())
}
