//! Cross-crate integration flows.

pub mod boundary;
pub mod signing_flows;
