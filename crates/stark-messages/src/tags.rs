//! Message type tags.
//!
//! One versioned table per encoding family. The values are part of the
//! wire layout: a tag change re-keys every hash in its family, so tables
//! are append-only.

/// Legacy perpetual engine (encoding version 1).
pub mod perpetual {
    /// Limit order carrying explicit fee fields.
    pub const LIMIT_ORDER_WITH_FEES: u64 = 3;
    /// Plain two-party transfer.
    pub const TRANSFER: u64 = 4;
    /// Transfer gated on an external condition word.
    pub const CONDITIONAL_TRANSFER: u64 = 5;
    /// Withdrawal back to the owning key.
    pub const WITHDRAWAL: u64 = 6;
    /// Withdrawal to a foreign address.
    pub const WITHDRAWAL_TO_OWNER_KEY: u64 = 7;
    /// Per-party settlement delta word of a trade.
    pub const TRADE: u64 = 8;
}

/// Legacy spot engine (encoding version 1).
pub mod spot {
    /// Settlement limit order.
    pub const SETTLEMENT: u64 = 1;
    /// Two-party transfer.
    pub const TRANSFER: u64 = 2;
    /// Withdrawal back to the owning key.
    pub const WITHDRAWAL: u64 = 6;
    /// Withdrawal to a foreign address.
    pub const WITHDRAWAL_TO_OWNER_KEY: u64 = 7;
    /// Per-party settlement delta word of a trade.
    pub const TRADE: u64 = 8;
}

/// Unified encodings (version 2). An independent table: unified hashes
/// must never collide with legacy hashes of the same business object.
pub mod unified {
    /// Withdrawal back to the owning key.
    pub const WITHDRAWAL: u64 = 1;
    /// Withdrawal to a foreign address.
    pub const WITHDRAWAL_TO_OWNER_KEY: u64 = 2;
    /// Two-party transfer.
    pub const TRANSFER: u64 = 3;
    /// Spot limit order.
    pub const SPOT_LIMIT_ORDER: u64 = 4;
    /// Perpetual limit order.
    pub const PERPETUAL_LIMIT_ORDER: u64 = 5;
    /// Per-party settlement delta word of a trade.
    pub const TRADE: u64 = 6;
}
