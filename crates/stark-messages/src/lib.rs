//! # Stark Messages - Canonical Business-Object Encodings
//!
//! Per-message-type canonical field ordering, bit packing and Pedersen
//! hash chaining for the exchange protocol. Three encoding families live
//! side by side behind the same per-type interface:
//!
//! - `perpetual`: the legacy perpetual engine messages
//! - `spot`: the legacy spot engine messages
//! - `unified`: the version-2 encodings (wider field sets: chain id,
//!   fee, margin type), selected only by explicit `unified_*` entry points
//!
//! Every encoder validates declared bit widths before packing and fails
//! with `OutOfRange` rather than truncating. Hashing is pure: the same
//! JSON document always produces the same message hash.

pub mod base;
pub mod perpetual;
pub mod spot;
pub mod tags;
pub mod types;
pub mod unified;

pub use base::OrderBase;
pub use types::SignedAmount;
