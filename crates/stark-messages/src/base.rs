//! Common base of every order-like message.

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr};
use stark_crypto::FieldElement;

/// Fields shared by all signable orders: a replay nonce, the signer's
/// public key (x-coordinate) and an expiration timestamp in epoch seconds.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OrderBase {
    /// Replay-protection nonce (32 bits).
    #[serde_as(as = "DisplayFromStr")]
    pub nonce: u32,
    /// Signer public key.
    pub public_key: FieldElement,
    /// Expiration, epoch seconds (32 bits).
    #[serde_as(as = "DisplayFromStr")]
    pub expiration_timestamp: u32,
}

impl OrderBase {
    /// `expiration << 32 | nonce`, the low limb shared by several packings.
    pub fn packed_timestamps(&self) -> u64 {
        ((self.expiration_timestamp as u64) << 32) | self.nonce as u64
    }
}
