//! # Unified Encodings (version 2)
//!
//! The unified transaction family: one encoding per business concept with
//! the wider field sets the multi-chain gateway needs (chain id,
//! withdrawal fee, margin type, synthetic id on transfers). Same business
//! semantics as the legacy families, different field widths and ordering,
//! and an independent type-tag table, selected explicitly by the
//! `unified_*` entry points, never auto-detected from payload shape.

use primitive_types::U256;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr};
use stark_crypto::{hash2, hash_elements, CryptoError, FieldElement};

use crate::base::OrderBase;
use crate::tags::unified as tag;
use crate::types::{check_asset_id_250, check_external_price, u256_hex, u32_hex, SignedAmount};

fn word(value: U256) -> Result<FieldElement, CryptoError> {
    FieldElement::new(value)
}

/// Margin account type of a perpetual order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MarginType {
    /// Cross-margined position.
    #[serde(rename = "PERP_CROSS")]
    #[default]
    Cross,
    /// Isolated-margin position.
    #[serde(rename = "PERP_ISO")]
    Isolated,
}

impl MarginType {
    fn lane(self) -> u64 {
        match self {
            MarginType::Cross => 0,
            MarginType::Isolated => 1,
        }
    }
}

/// Unified withdrawal: legacy withdrawal plus fee and chain id.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnifiedWithdrawal {
    /// Common order fields.
    #[serde(flatten)]
    pub base: OrderBase,
    /// Destination key.
    #[serde(rename = "eth_address")]
    pub owner_key: FieldElement,
    /// Amount in asset quanta (64 bits).
    #[serde_as(as = "DisplayFromStr")]
    pub amount: u64,
    /// Withdrawal fee (64 bits).
    #[serde_as(as = "DisplayFromStr")]
    pub fee: u64,
    /// Asset id (32 bits).
    #[serde(with = "u32_hex")]
    pub asset_id: u32,
    /// Position id (32 bits).
    #[serde_as(as = "DisplayFromStr")]
    pub position_id: u32,
    /// Destination chain id (32 bits).
    #[serde_as(as = "DisplayFromStr")]
    pub chain_id: u32,
}

impl UnifiedWithdrawal {
    /// Canonical message hash (two-form owner-key rule).
    pub fn hash(&self) -> Result<FieldElement, CryptoError> {
        let has_address = self.owner_key != self.base.public_key;
        let type_id = if has_address {
            tag::WITHDRAWAL_TO_OWNER_KEY
        } else {
            tag::WITHDRAWAL
        };

        let w0 = U256([self.chain_id as u64, self.fee, 0, 0]);
        let w1 = U256([
            self.base.packed_timestamps(),
            self.amount,
            0,
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

/// Unified transfer: adds the synthetic id alongside the collateral
/// asset.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnifiedTransfer {
    /// Replay-protection nonce (32 bits).
    #[serde_as(as = "DisplayFromStr")]
    pub nonce: u32,
    /// Sender public key (this family names the field explicitly).
    pub sender_public_key: FieldElement,
    /// Expiration, epoch seconds (32 bits).
    #[serde_as(as = "DisplayFromStr")]
    pub expiration_timestamp: u32,
    /// Amount in asset quanta (64 bits).
    #[serde_as(as = "DisplayFromStr")]
    pub amount: u64,
    /// Collateral asset id (32 bits).
    #[serde(with = "u32_hex")]
    pub asset_id: u32,
    /// Synthetic asset id (32 bits).
    #[serde(with = "u32_hex")]
    pub synthetic_id: u32,
    /// Sender position (32 bits).
    #[serde_as(as = "DisplayFromStr")]
    pub sender_position_id: u32,
    /// Receiver position (32 bits).
    #[serde_as(as = "DisplayFromStr")]
    pub receiver_position_id: u32,
    /// Receiver public key.
    pub receiver_public_key: FieldElement,
}

impl UnifiedTransfer {
    /// Canonical message hash.
    pub fn hash(&self) -> Result<FieldElement, CryptoError> {
        let w0 = U256([
            self.asset_id as u64,
            self.synthetic_id as u64,
            self.sender_position_id as u64,
            self.receiver_position_id as u64,
        ]);
        let w1 = U256([
            ((self.expiration_timestamp as u64) << 32) | self.nonce as u64,
            self.amount,
            0,
            0,
        ]);
        let words = [
            FieldElement::from_u64(tag::TRANSFER),
            word(w0)?,
            self.receiver_public_key,
            word(w1)?,
        ];
        Ok(hash_elements(&words))
    }
}

/// Unified spot limit order.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnifiedSpotLimitOrder {
    /// Common order fields.
    #[serde(flatten)]
    pub base: OrderBase,
    /// Amount bought (64 bits).
    #[serde_as(as = "DisplayFromStr")]
    pub amount_buy: u64,
    /// Amount sold (64 bits).
    #[serde_as(as = "DisplayFromStr")]
    pub amount_sell: u64,
    /// Fee ceiling (64 bits).
    #[serde_as(as = "DisplayFromStr")]
    pub amount_fee: u64,
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

impl UnifiedSpotLimitOrder {
    /// Canonical message hash.
    pub fn hash(&self) -> Result<FieldElement, CryptoError> {
        let assets = self.asset_buy as u64 | ((self.asset_sell as u64) << 32);
        let w = U256([
            self.base.packed_timestamps(),
            self.position_id as u64,
            0,
            0,
        ]);
        let words = [
            FieldElement::from_u64(tag::SPOT_LIMIT_ORDER),
            FieldElement::from_u64(assets),
            FieldElement::from_u64(self.amount_sell),
            FieldElement::from_u64(self.amount_buy),
            FieldElement::from_u64(self.amount_fee),
            word(w)?,
        ];
        Ok(hash_elements(&words))
    }
}

/// Unified perpetual limit order; carries the margin type.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnifiedPerpetualLimitOrder {
    /// Common order fields.
    #[serde(flatten)]
    pub base: OrderBase,
    /// Position id (32 bits).
    #[serde_as(as = "DisplayFromStr")]
    pub position_id: u32,
    /// Synthetic asset id (32 bits).
    #[serde(with = "u32_hex")]
    pub asset_id_synthetic: u32,
    /// Collateral asset id (32 bits).
    #[serde(with = "u32_hex")]
    pub asset_id_collateral: u32,
    /// Synthetic amount (64 bits).
    #[serde_as(as = "DisplayFromStr")]
    pub amount_synthetic: u64,
    /// Collateral amount (64 bits).
    #[serde_as(as = "DisplayFromStr")]
    pub amount_collateral: u64,
    /// Fee ceiling (64 bits).
    #[serde_as(as = "DisplayFromStr")]
    pub amount_fee: u64,
    /// Direction: buying or selling the synthetic.
    pub is_buying_synthetic: bool,
    /// Margin account type.
    #[serde(rename = "type", default)]
    pub margin_type: MarginType,
}

impl UnifiedPerpetualLimitOrder {
    /// Canonical message hash. Direction and margin type pack into one
    /// flag lane.
    pub fn hash(&self) -> Result<FieldElement, CryptoError> {
        let assets = self.asset_id_collateral as u64 | ((self.asset_id_synthetic as u64) << 32);
        let flags = self.margin_type.lane() | ((self.is_buying_synthetic as u64) << 32);
        let w = U256([
            self.base.packed_timestamps(),
            self.position_id as u64,
            flags,
            0,
        ]);
        let words = [
            FieldElement::from_u64(tag::PERPETUAL_LIMIT_ORDER),
            FieldElement::from_u64(assets),
            FieldElement::from_u64(self.amount_collateral),
            FieldElement::from_u64(self.amount_synthetic),
            FieldElement::from_u64(self.amount_fee),
            word(w)?,
        ];
        Ok(hash_elements(&words))
    }
}

/// Unified liquidation.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnifiedLiquidate {
    /// The liquidator's signed order terms.
    pub liquidator_order: UnifiedPerpetualLimitOrder,
    /// Position being liquidated (64 bits).
    #[serde_as(as = "DisplayFromStr")]
    pub liquidated_position_id: u64,
    /// Actual settled collateral (64 bits).
    #[serde_as(as = "DisplayFromStr")]
    pub actual_collateral: u64,
    /// Actual settled synthetic (64 bits).
    #[serde_as(as = "DisplayFromStr")]
    pub actual_synthetic: u64,
    /// Actual liquidator fee (64 bits).
    #[serde_as(as = "DisplayFromStr")]
    pub actual_liquidator_fee: u64,
}

impl UnifiedLiquidate {
    /// Canonical message hash: order hash, then the liquidated position,
    /// then the settled amounts.
    pub fn hash(&self) -> Result<FieldElement, CryptoError> {
        let mut h = self.liquidator_order.hash()?;
        h = hash2(&h, &FieldElement::from_u64(self.liquidated_position_id));
        let deltas = U256([
            self.actual_collateral,
            self.actual_synthetic,
            self.actual_liquidator_fee,
            0,
        ]);
        Ok(hash2(&h, &word(deltas)?))
    }
}

/// Unified oracle price attestation. The layout is shared with the legacy
/// family: oracle signatures are consumed across protocol versions, so no
/// version tag joins the message.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnifiedSignedOraclePrice {
    /// The oracle's public key.
    pub signer_key: FieldElement,
    /// External fixed-point price (120 bits).
    #[serde_as(as = "DisplayFromStr")]
    pub external_price: u128,
    /// Price timestamp, epoch seconds (32 bits).
    #[serde_as(as = "DisplayFromStr")]
    pub timestamp: u32,
    /// Signer-key-derived asset identifier (250 bits).
    #[serde(with = "u256_hex")]
    pub signed_asset_id: U256,
}

impl UnifiedSignedOraclePrice {
    /// Canonical message hash.
    pub fn hash(&self) -> Result<FieldElement, CryptoError> {
        check_asset_id_250(self.signed_asset_id)?;
        check_external_price(self.external_price)?;
        let packed =
            U256::from(self.external_price) * (U256::one() << 32) + U256::from(self.timestamp);
        Ok(hash2(&word(self.signed_asset_id)?, &word(packed)?))
    }
}

/// A matched unified spot trade.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnifiedSpotTrade {
    /// Party A's order terms.
    pub party_a_order: UnifiedSpotLimitOrder,
    /// Party B's order terms.
    pub party_b_order: UnifiedSpotLimitOrder,
    /// Amount actually sold by A (64 bits).
    #[serde_as(as = "DisplayFromStr")]
    pub actual_a_sold: u64,
    /// Amount actually sold by B (64 bits).
    #[serde_as(as = "DisplayFromStr")]
    pub actual_b_sold: u64,
    /// Party A's settled fee delta; may be negative.
    pub actual_a_fee: SignedAmount,
    /// Party B's settled fee delta; may be negative.
    pub actual_b_fee: SignedAmount,
}

impl UnifiedSpotTrade {
    /// Per-party message hashes `(party_a, party_b)`. A party's delta
    /// word carries its own sold amount, the counterparty's sold amount
    /// and its bias-encoded fee.
    pub fn party_hashes(&self) -> Result<(FieldElement, FieldElement), CryptoError> {
        let a = Self::party_hash(
            &self.party_a_order,
            self.actual_a_sold,
            self.actual_b_sold,
            self.actual_a_fee,
        )?;
        let b = Self::party_hash(
            &self.party_b_order,
            self.actual_b_sold,
            self.actual_a_sold,
            self.actual_b_fee,
        )?;
        Ok((a, b))
    }

    fn party_hash(
        order: &UnifiedSpotLimitOrder,
        own_sold: u64,
        counter_sold: u64,
        fee: SignedAmount,
    ) -> Result<FieldElement, CryptoError> {
        let deltas = U256([own_sold, counter_sold, fee.biased()?, tag::TRADE]);
        Ok(hash2(&order.hash()?, &word(deltas)?))
    }
}

/// A matched unified perpetual trade.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnifiedPerpetualTrade {
    /// Party A's order terms.
    pub party_a_order: UnifiedPerpetualLimitOrder,
    /// Party B's order terms.
    pub party_b_order: UnifiedPerpetualLimitOrder,
    /// Actual settled collateral (64 bits).
    #[serde_as(as = "DisplayFromStr")]
    pub actual_collateral: u64,
    /// Actual settled synthetic (64 bits).
    #[serde_as(as = "DisplayFromStr")]
    pub actual_synthetic: u64,
    /// Party A's settled fee delta; may be negative.
    pub actual_a_fee: SignedAmount,
    /// Party B's settled fee delta; may be negative.
    pub actual_b_fee: SignedAmount,
}

impl UnifiedPerpetualTrade {
    /// Per-party message hashes `(party_a, party_b)`.
    pub fn party_hashes(&self) -> Result<(FieldElement, FieldElement), CryptoError> {
        let a = self.party_hash(&self.party_a_order, self.actual_a_fee)?;
        let b = self.party_hash(&self.party_b_order, self.actual_b_fee)?;
        Ok((a, b))
    }

    fn party_hash(
        &self,
        order: &UnifiedPerpetualLimitOrder,
        fee: SignedAmount,
    ) -> Result<FieldElement, CryptoError> {
        let deltas = U256([
            self.actual_collateral,
            self.actual_synthetic,
            fee.biased()?,
            tag::TRADE,
        ]);
        Ok(hash2(&order.hash()?, &word(deltas)?))
    }
}
