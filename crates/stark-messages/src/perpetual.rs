//! # Legacy Perpetual Encodings
//!
//! The version-1 message layouts of the perpetual engine. Fields are
//! packed into fixed-width lanes by multiplicative shifting and folded
//! through the Pedersen hash in a fixed chain; every layout tops out
//! below 245 bits, comfortably inside the field.

use primitive_types::U256;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr};
use stark_crypto::{hash2, CryptoError, FieldElement};

use crate::base::OrderBase;
use crate::tags::perpetual as tag;
use crate::types::{check_asset_id_250, check_external_price, u256_hex, SignedAmount};

fn word(value: U256) -> Result<FieldElement, CryptoError> {
    FieldElement::new(value)
}

/// Withdrawal of collateral from a position.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Withdraw {
    /// Common order fields.
    #[serde(flatten)]
    pub base: OrderBase,
    /// Position to debit (64 bits).
    #[serde_as(as = "DisplayFromStr")]
    pub position_id: u64,
    /// Amount in collateral quanta (64 bits).
    #[serde_as(as = "DisplayFromStr")]
    pub amount: u64,
    /// Destination key. Equal to the order key for a plain withdrawal.
    #[serde(rename = "eth_address")]
    pub owner_key: FieldElement,
    /// Collateral asset id (250 bits).
    #[serde(with = "u256_hex")]
    pub asset_id: U256,
}

impl Withdraw {
    /// Canonical message hash.
    ///
    /// When the destination equals the order key this is the old-API
    /// withdrawal: the type id differs and the owner key is not part of
    /// the message.
    pub fn hash(&self) -> Result<FieldElement, CryptoError> {
        check_asset_id_250(self.asset_id)?;
        let asset = word(self.asset_id)?;

        let has_address = self.owner_key != self.base.public_key;
        let (w0, type_id) = if has_address {
            (hash2(&asset, &self.owner_key), tag::WITHDRAWAL_TO_OWNER_KEY)
        } else {
            (asset, tag::WITHDRAWAL)
        };

        let mut w1 = U256::from(type_id);
        w1 = (w1 << 64) + U256::from(self.position_id);
        w1 = (w1 << 32) + U256::from(self.base.nonce);
        w1 = (w1 << 64) + U256::from(self.amount);
        w1 = (w1 << 32) + U256::from(self.base.expiration_timestamp);
        w1 <<= 49; // Padding.

        Ok(hash2(&w0, &word(w1)?))
    }
}

/// Collateral transfer between two positions.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transfer {
    /// Common order fields; `public_key` is the sender.
    #[serde(flatten)]
    pub base: OrderBase,
    /// Sender position (64 bits).
    #[serde_as(as = "DisplayFromStr")]
    pub sender_position_id: u64,
    /// Receiver public key.
    pub receiver_public_key: FieldElement,
    /// Receiver position (64 bits).
    #[serde_as(as = "DisplayFromStr")]
    pub receiver_position_id: u64,
    /// Amount in collateral quanta (64 bits).
    #[serde_as(as = "DisplayFromStr")]
    pub amount: u64,
    /// Collateral asset id (250 bits).
    #[serde(with = "u256_hex")]
    pub asset_id: U256,
}

impl Transfer {
    /// Canonical message hash (plain transfer).
    pub fn hash(&self) -> Result<FieldElement, CryptoError> {
        self.hash_with_condition(0)
    }

    /// Hash with an optional condition word; a non-zero condition selects
    /// the conditional-transfer type id and joins the chain.
    pub fn hash_with_condition(&self, condition: u64) -> Result<FieldElement, CryptoError> {
        check_asset_id_250(self.asset_id)?;

        // The fee asset and fee amount of the legacy layout are fixed to
        // zero by the gateway API; the fee vault aliases the sender.
        let asset_id_fee = FieldElement::zero();
        let max_amount_fee = 0u64;
        let src_fee_vault = self.sender_position_id;

        let mut m = hash2(&word(self.asset_id)?, &asset_id_fee);
        m = hash2(&m, &self.receiver_public_key);
        if condition != 0 {
            m = hash2(&m, &FieldElement::from_u64(condition));
        }

        let mut w0 = U256::from(self.sender_position_id);
        w0 = (w0 << 64) + U256::from(self.receiver_position_id);
        w0 = (w0 << 64) + U256::from(src_fee_vault);
        w0 = (w0 << 32) + U256::from(self.base.nonce);
        m = hash2(&m, &word(w0)?);

        let type_id = if condition == 0 {
            tag::TRANSFER
        } else {
            tag::CONDITIONAL_TRANSFER
        };
        let mut w1 = U256::from(type_id);
        w1 = (w1 << 64) + U256::from(self.amount);
        w1 = (w1 << 64) + U256::from(max_amount_fee);
        w1 = (w1 << 32) + U256::from(self.base.expiration_timestamp);
        w1 <<= 81; // Padding.

        Ok(hash2(&m, &word(w1)?))
    }
}

/// Limit order against the synthetic/collateral pair.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LimitOrder {
    /// Common order fields.
    #[serde(flatten)]
    pub base: OrderBase,
    /// Synthetic amount (64 bits).
    #[serde_as(as = "DisplayFromStr")]
    pub amount_synthetic: u64,
    /// Collateral amount (64 bits).
    #[serde_as(as = "DisplayFromStr")]
    pub amount_collateral: u64,
    /// Fee ceiling (64 bits).
    #[serde_as(as = "DisplayFromStr")]
    pub amount_fee: u64,
    /// Synthetic asset id (250 bits).
    #[serde(with = "u256_hex")]
    pub asset_id_synthetic: U256,
    /// Collateral asset id (250 bits).
    #[serde(with = "u256_hex")]
    pub asset_id_collateral: U256,
    /// Margin position (64 bits); also the fee vault.
    #[serde_as(as = "DisplayFromStr")]
    pub position_id: u64,
    /// Direction: buying or selling the synthetic.
    pub is_buying_synthetic: bool,
}

impl LimitOrder {
    /// Canonical message hash. The direction flag decides which asset is
    /// sold and which is bought; fees are always paid in collateral.
    pub fn hash(&self) -> Result<FieldElement, CryptoError> {
        check_asset_id_250(self.asset_id_synthetic)?;
        check_asset_id_250(self.asset_id_collateral)?;

        let (asset_sell, asset_buy, amount_sell, amount_buy) = if self.is_buying_synthetic {
            (
                self.asset_id_collateral,
                self.asset_id_synthetic,
                self.amount_collateral,
                self.amount_synthetic,
            )
        } else {
            (
                self.asset_id_synthetic,
                self.asset_id_collateral,
                self.amount_synthetic,
                self.amount_collateral,
            )
        };
        let asset_fee = self.asset_id_collateral;
        let (vault_sell, vault_buy, vault_fee) =
            (self.position_id, self.position_id, self.position_id);

        let mut m = hash2(&word(asset_sell)?, &word(asset_buy)?);
        m = hash2(&m, &word(asset_fee)?);

        let mut w0 = U256::from(amount_sell);
        w0 = (w0 << 64) + U256::from(amount_buy);
        w0 = (w0 << 64) + U256::from(self.amount_fee);
        w0 = (w0 << 32) + U256::from(self.base.nonce);
        m = hash2(&m, &word(w0)?);

        let mut w1 = U256::from(tag::LIMIT_ORDER_WITH_FEES);
        w1 = (w1 << 64) + U256::from(vault_fee);
        w1 = (w1 << 64) + U256::from(vault_sell);
        w1 = (w1 << 64) + U256::from(vault_buy);
        w1 = (w1 << 32) + U256::from(self.base.expiration_timestamp);
        w1 <<= 17; // Padding.

        Ok(hash2(&m, &word(w1)?))
    }
}

/// Forced liquidation against a liquidator's limit order.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Liquidate {
    /// The liquidator's signed order terms.
    pub liquidator_order: LimitOrder,
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

impl Liquidate {
    /// Canonical message hash: the liquidator's order hash, then the
    /// liquidated position, then the settled amounts.
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

/// A single oracle signature over an external price and timestamp.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignedOraclePrice {
    /// The oracle's public key; informational, the signed asset id below
    /// is already derived from it.
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

impl SignedOraclePrice {
    /// Canonical message hash.
    pub fn hash(&self) -> Result<FieldElement, CryptoError> {
        check_asset_id_250(self.signed_asset_id)?;
        check_external_price(self.external_price)?;
        let packed = U256::from(self.external_price) * (U256::one() << 32)
            + U256::from(self.timestamp);
        Ok(hash2(&word(self.signed_asset_id)?, &word(packed)?))
    }
}

/// A matched trade between two perpetual limit orders.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerpetualTrade {
    /// Party A's order terms.
    pub party_a_order: LimitOrder,
    /// Party B's order terms.
    pub party_b_order: LimitOrder,
    /// Actual settled collateral (64 bits).
    #[serde_as(as = "DisplayFromStr")]
    pub actual_collateral: u64,
    /// Actual settled synthetic (64 bits).
    #[serde_as(as = "DisplayFromStr")]
    pub actual_synthetic: u64,
    /// Party A's settled fee delta; may be negative (rebate).
    pub actual_a_fee: SignedAmount,
    /// Party B's settled fee delta; may be negative.
    pub actual_b_fee: SignedAmount,
}

impl PerpetualTrade {
    /// Per-party message hashes `(party_a, party_b)`. Each party's hash
    /// chains its own order hash with the trade's settled deltas and that
    /// party's (bias-encoded) fee; each party signs only its own hash.
    pub fn party_hashes(&self) -> Result<(FieldElement, FieldElement), CryptoError> {
        let a = self.party_hash(&self.party_a_order, self.actual_a_fee)?;
        let b = self.party_hash(&self.party_b_order, self.actual_b_fee)?;
        Ok((a, b))
    }

    fn party_hash(
        &self,
        order: &LimitOrder,
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
