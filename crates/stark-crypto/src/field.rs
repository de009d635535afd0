//! # Field Arithmetic
//!
//! `FieldElement` is an integer in `[0, p)` for the fixed 252-bit field
//! prime, plus the raw modular helpers (`add_mod`, `mul_mod`, ...) that the
//! signature engine reuses for arithmetic mod the curve order.
//!
//! Products are computed through 512-bit intermediates (`U256::full_mul`),
//! so no operation can silently overflow.

use crate::constants::{FIELD_GENERATOR, FIELD_PRIME};
use crate::errors::CryptoError;
use primitive_types::{U256, U512};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

fn to_u512(x: U256) -> U512 {
    U512([x.0[0], x.0[1], x.0[2], x.0[3], 0, 0, 0, 0])
}

fn low_u256(x: U512) -> U256 {
    U256([x.0[0], x.0[1], x.0[2], x.0[3]])
}

/// `(a + b) mod m`. Callers keep `a, b < m`; `m` is at most 252 bits so the
/// intermediate sum cannot overflow 256 bits.
pub fn add_mod(a: U256, b: U256, m: U256) -> U256 {
    let sum = a + b;
    if sum >= m {
        sum - m
    } else {
        sum
    }
}

/// `(a - b) mod m` for `a, b < m`.
pub fn sub_mod(a: U256, b: U256, m: U256) -> U256 {
    if a >= b {
        a - b
    } else {
        a + m - b
    }
}

/// `(a * b) mod m` through a 512-bit product.
pub fn mul_mod(a: U256, b: U256, m: U256) -> U256 {
    let product = a.full_mul(b);
    low_u256(product % to_u512(m))
}

/// `base^exp mod m`, square-and-multiply.
pub fn pow_mod(base: U256, exp: U256, m: U256) -> U256 {
    let mut result = U256::one();
    let mut acc = base % m;
    for i in 0..256 {
        if exp.bit(i) {
            result = mul_mod(result, acc, m);
        }
        acc = mul_mod(acc, acc, m);
    }
    result
}

/// Modular inverse for prime `m` (Fermat). `DivisionByZero` on zero.
pub fn inv_mod(a: U256, m: U256) -> Result<U256, CryptoError> {
    if a.is_zero() {
        return Err(CryptoError::DivisionByZero);
    }
    Ok(pow_mod(a, m - U256::from(2u64), m))
}

/// An element of the prime field, always reduced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct FieldElement(U256);

impl FieldElement {
    /// The additive identity.
    pub fn zero() -> Self {
        Self(U256::zero())
    }

    /// The multiplicative identity.
    pub fn one() -> Self {
        Self(U256::one())
    }

    /// Wrap a reduced integer; `OutOfRange` if `value >= p`.
    pub fn new(value: U256) -> Result<Self, CryptoError> {
        if value >= *FIELD_PRIME {
            return Err(CryptoError::OutOfRange(
                "value exceeds the field prime".into(),
            ));
        }
        Ok(Self(value))
    }

    /// Lift a small integer into the field.
    pub fn from_u64(value: u64) -> Self {
        Self(U256::from(value))
    }

    /// The underlying reduced integer.
    pub fn to_u256(self) -> U256 {
        self.0
    }

    /// True for the additive identity.
    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    /// Parity of the canonical representative.
    pub fn is_odd(self) -> bool {
        self.0.bit(0)
    }

    /// Field addition.
    pub fn add(self, rhs: Self) -> Self {
        Self(add_mod(self.0, rhs.0, *FIELD_PRIME))
    }

    /// Field subtraction.
    pub fn sub(self, rhs: Self) -> Self {
        Self(sub_mod(self.0, rhs.0, *FIELD_PRIME))
    }

    /// Field multiplication.
    pub fn mul(self, rhs: Self) -> Self {
        Self(mul_mod(self.0, rhs.0, *FIELD_PRIME))
    }

    /// Additive inverse.
    pub fn neg(self) -> Self {
        if self.is_zero() {
            self
        } else {
            Self(*FIELD_PRIME - self.0)
        }
    }

    /// `self^exp`.
    pub fn pow(self, exp: U256) -> Self {
        Self(pow_mod(self.0, exp, *FIELD_PRIME))
    }

    /// Multiplicative inverse; `DivisionByZero` on zero.
    pub fn inverse(self) -> Result<Self, CryptoError> {
        Ok(Self(inv_mod(self.0, *FIELD_PRIME)?))
    }

    /// A square root of `self`, if one exists (Tonelli–Shanks; the field
    /// prime has 2-adicity 192 and quadratic non-residue 3). The returned
    /// root is one of the pair `{r, p - r}`; callers wanting the canonical
    /// even root negate as needed.
    pub fn sqrt(self) -> Option<Self> {
        if self.is_zero() {
            return Some(self);
        }
        let p = *FIELD_PRIME;
        let one = Self::one();
        // Legendre symbol: a^((p-1)/2).
        if self.pow((p - U256::one()) >> 1) != one {
            return None;
        }

        // p - 1 = 2^192 * q with q = 2^59 + 17 odd.
        let q = U256::from((1u64 << 59) + 17);
        let q_plus_1_half = U256::from((1u64 << 58) + 9);

        let mut m: usize = 192;
        let mut c = Self(pow_mod(*FIELD_GENERATOR, q, p));
        let mut t = self.pow(q);
        let mut r = self.pow(q_plus_1_half);

        while t != one {
            // Least i with t^(2^i) = 1; i < m by the residue check above.
            let mut i = 0usize;
            let mut probe = t;
            while probe != one {
                probe = probe.mul(probe);
                i += 1;
            }
            let mut b = c;
            for _ in 0..(m - i - 1) {
                b = b.mul(b);
            }
            m = i;
            c = b.mul(b);
            t = t.mul(c);
            r = r.mul(b);
        }
        Some(r)
    }

    /// Decode from `0x`-prefixed big-endian hex. At most 64 digits;
    /// `MalformedInput` for bad hex, `OutOfRange` for values `>= p`.
    pub fn from_hex(hex_str: &str) -> Result<Self, CryptoError> {
        Self::new(parse_u256_hex(hex_str)?)
    }

    /// Canonical `0x`-prefixed 64-digit big-endian hex.
    pub fn to_hex(self) -> String {
        let mut be = [0u8; 32];
        self.0.to_big_endian(&mut be);
        format!("0x{}", hex::encode(be))
    }
}

/// Parse a `0x`-prefixed (or bare) big-endian hex integer of at most 64
/// digits into a `U256`.
pub fn parse_u256_hex(hex_str: &str) -> Result<U256, CryptoError> {
    let digits = hex_str
        .trim()
        .trim_start_matches("0x")
        .trim_start_matches("0X");
    if digits.is_empty() || digits.len() > 64 {
        return Err(CryptoError::MalformedInput(format!(
            "hex value must be 1..=64 digits, got {}",
            digits.len()
        )));
    }
    U256::from_str_radix(digits, 16)
        .map_err(|e| CryptoError::MalformedInput(format!("invalid hex: {e}")))
}

impl std::ops::Add for FieldElement {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        FieldElement::add(self, rhs)
    }
}

impl std::ops::Sub for FieldElement {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        FieldElement::sub(self, rhs)
    }
}

impl std::ops::Mul for FieldElement {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        FieldElement::mul(self, rhs)
    }
}

impl std::fmt::Display for FieldElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for FieldElement {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for FieldElement {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        FieldElement::from_hex(&s).map_err(D::Error::custom)
    }
}
