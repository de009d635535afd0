//! # Legacy Spot Encodings
//!
//! The version-1 spot engine layouts: 128-bit amounts, 32-bit asset and
//! position ids, and limb-oriented packing. Each message is a fixed word
//! sequence folded through the Pedersen hash, seeded with the family's
//! type tag.

use primitive_types::U256;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr};
use stark_crypto::pedersen::hash_elements;
use stark_crypto::{hash2, CryptoError, FieldElement};

use crate::base::OrderBase;
use crate::tags::spot as tag;
use crate::types::{u32_hex, SignedAmount};

fn word(value: U256) -> Result<FieldElement, CryptoError> {
    FieldElement::new(value)
}

fn amount_limbs(amount: u128) -> (u64, u64) {
    (amount as u64, (amount >> 64) as u64)
}

/// Withdrawal from a spot position.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpotWithdrawal {
    /// Common order fields.
    #[serde(flatten)]
    pub base: OrderBase,
    /// Amount in asset quanta (128 bits).
    #[serde_as(as = "DisplayFromStr")]
    pub amount: u128,
    /// Destination key. Equal to the order key for a plain withdrawal.
    #[serde(rename = "eth_address")]
    pub owner_key: FieldElement,
    /// Asset id (32 bits).
    #[serde(with = "u32_hex")]
    pub asset_id: u32,
    /// Position id (32 bits).
    #[serde_as(as = "DisplayFromStr")]
    pub position_id: u32,
    /// Withdrawal fee (128 bits); optional, defaults to zero.
    #[serde_as(as = "DisplayFromStr")]
    #[serde(default)]
    pub fee: u128,
    /// Destination chain id (32 bits).
    #[serde_as(as = "DisplayFromStr")]
    pub chain_id: u32,
}

impl SpotWithdrawal {
    /// Canonical message hash. Same two-form rule as the perpetual
    /// withdrawal: the owner key only joins the message when it differs
    /// from the order key.
    pub fn hash(&self) -> Result<FieldElement, CryptoError> {
        let has_address = self.owner_key != self.base.public_key;
        let type_id = if has_address {
            tag::WITHDRAWAL_TO_OWNER_KEY
        } else {
            tag::WITHDRAWAL
        };

        let (fee_lo, fee_hi) = amount_limbs(self.fee);
        let w0 = U256([self.chain_id as u64, fee_lo, fee_hi, 0]);

        let (amount_lo, amount_hi) = amount_limbs(self.amount);
        let w1 = U256([
            self.base.packed_timestamps(),
            amount_lo,
            amount_hi,
            (type_id << 32) | self.position_id as u64,
        ]) << 17;

        let mut words = vec![
            FieldElement::from_u64(type_id),
            FieldElement::from_u64(self.asset_id as u64),
        ];
        if has_address {
            words.push(self.owner_key);
        }
        words.push(word(w0)?);
        words.push(word(w1)?);
        Ok(hash_elements(&words))
    }
}

/// Transfer between two spot positions.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpotTransfer {
    /// Common order fields; `public_key` is the sender.
    #[serde(flatten)]
    pub base: OrderBase,
    /// Amount in asset quanta (128 bits).
    #[serde_as(as = "DisplayFromStr")]
    pub amount: u128,
    /// Asset id (32 bits).
    #[serde(with = "u32_hex")]
    pub asset_id: u32,
    /// Receiver position (32 bits).
    #[serde_as(as = "DisplayFromStr")]
    pub receiver_position_id: u32,
    /// Receiver public key.
    pub receiver_public_key: FieldElement,
    /// Sender position (32 bits); also the fee vault.
    #[serde_as(as = "DisplayFromStr")]
    pub sender_position_id: u32,
}

impl SpotTransfer {
    /// Canonical message hash.
    pub fn hash(&self) -> Result<FieldElement, CryptoError> {
        let w0 = (U256([
            self.sender_position_id as u64,
            self.receiver_position_id as u64,
            self.sender_position_id as u64,
            0,
        ]) << 32)
            + U256::from(self.base.nonce);

        let (amount_lo, amount_hi) = amount_limbs(self.amount);
        let w1 = ((U256([amount_lo, amount_hi, tag::TRANSFER, 0]) << 32)
            + U256::from(self.base.expiration_timestamp))
            << 81; // Padding.

        let words = [
            FieldElement::from_u64(tag::TRANSFER),
            FieldElement::from_u64(self.asset_id as u64),
            self.receiver_public_key,
            word(w0)?,
            word(w1)?,
        ];
        Ok(hash_elements(&words))
    }
}

/// Spot settlement limit order.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpotLimitOrder {
    /// Common order fields.
    #[serde(flatten)]
    pub base: OrderBase,
    /// Amount bought (128 bits).
    #[serde_as(as = "DisplayFromStr")]
    pub amount_buy: u128,
    /// Amount sold (128 bits).
    #[serde_as(as = "DisplayFromStr")]
    pub amount_sell: u128,
    /// Fee ceiling (128 bits).
    #[serde_as(as = "DisplayFromStr")]
    pub amount_fee: u128,
    /// Asset bought (32 bits).
    #[serde(with = "u32_hex")]
    pub asset_buy: u32,
    /// Asset sold (32 bits).
    #[serde(with = "u32_hex")]
    pub asset_sell: u32,
    /// Position id (32 bits).
    #[serde_as(as = "DisplayFromStr")]
    pub position_id: u32,
}

impl SpotLimitOrder {
    /// Canonical message hash. Sell side packs before buy side.
    pub fn hash(&self) -> Result<FieldElement, CryptoError> {
        let w = U256([
            self.base.packed_timestamps(),
            self.position_id as u64,
            0,
            tag::SETTLEMENT,
        ]) << 49; // Padding.

        let words = [
            FieldElement::from_u64(tag::SETTLEMENT),
            FieldElement::from_u64(self.asset_sell as u64),
            FieldElement::from_u64(self.asset_buy as u64),
            word(U256::from(self.amount_sell))?,
            word(U256::from(self.amount_buy))?,
            word(U256::from(self.amount_fee))?,
            word(w)?,
        ];
        Ok(hash_elements(&words))
    }
}

/// A matched trade between two spot limit orders.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpotTrade {
    /// Party A's order terms.
    pub party_a_order: SpotLimitOrder,
    /// Party B's order terms.
    pub party_b_order: SpotLimitOrder,
    /// Amount actually sold by A (128 bits).
    #[serde_as(as = "DisplayFromStr")]
    pub actual_a_sold: u128,
    /// Amount actually sold by B (128 bits).
    #[serde_as(as = "DisplayFromStr")]
    pub actual_b_sold: u128,
    /// Party A's settled fee delta; may be negative.
    pub actual_a_fee: SignedAmount,
    /// Party B's settled fee delta; may be negative.
    pub actual_b_fee: SignedAmount,
}

impl SpotTrade {
    /// Per-party message hashes `(party_a, party_b)`: each party's order
    /// hash chained with its own sold amount and bias-encoded fee.
    pub fn party_hashes(&self) -> Result<(FieldElement, FieldElement), CryptoError> {
        let a = Self::party_hash(&self.party_a_order, self.actual_a_sold, self.actual_a_fee)?;
        let b = Self::party_hash(&self.party_b_order, self.actual_b_sold, self.actual_b_fee)?;
        Ok((a, b))
    }

    fn party_hash(
        order: &SpotLimitOrder,
        sold: u128,
        fee: SignedAmount,
    ) -> Result<FieldElement, CryptoError> {
        let (sold_lo, sold_hi) = amount_limbs(sold);
        let deltas = U256([sold_lo, sold_hi, fee.biased()?, tag::TRADE]);
        Ok(hash2(&order.hash()?, &word(deltas)?))
    }
}
