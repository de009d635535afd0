//! # Pedersen Hash
//!
//! Circuit-friendly hash built from fixed-generator point combinations.
//! `hash2(a, b)` starts from the protocol shift point, accumulates 4-bit
//! windowed multiples of one chain base for the low 248 bits of each input
//! and another for its top 4 bits, and returns the x-coordinate of the
//! resulting point.
//!
//! The five base points are the load-bearing constants; the per-window
//! multiple tables are derived from them once, lazily, by exact group
//! arithmetic.

use crate::constants::{PEDERSEN_POINTS, PEDERSEN_SHIFT_POINT};
use crate::curve::CurvePoint;
use crate::field::FieldElement;
use once_cell::sync::Lazy;
use primitive_types::U256;

const WINDOW_BITS: usize = 4;
const LOW_PART_BITS: usize = 248;
const LOW_WINDOWS: usize = LOW_PART_BITS / WINDOW_BITS;

/// Precomputed odd multiples `1..=15` of `16^w * base` for each window.
struct WindowTable {
    windows: Vec<[CurvePoint; 15]>,
}

impl WindowTable {
    fn build(base: CurvePoint, window_count: usize) -> Self {
        let mut windows = Vec::with_capacity(window_count);
        let mut window_base = base;
        for _ in 0..window_count {
            let mut entries = [CurvePoint::identity(); 15];
            let mut acc = window_base;
            for entry in entries.iter_mut() {
                *entry = acc;
                acc = acc.add(&window_base);
            }
            windows.push(entries);
            // acc is now 16 * window_base: the next window's base.
            window_base = acc;
        }
        Self { windows }
    }

    /// Add `value * base` to the accumulator, reading `value` in 4-bit
    /// digits from the least significant end.
    fn accumulate(&self, mut acc: CurvePoint, value: U256) -> CurvePoint {
        for (w, entries) in self.windows.iter().enumerate() {
            let digit = ((value >> (w * WINDOW_BITS)).low_u64() & 0xf) as usize;
            if digit != 0 {
                acc = acc.add(&entries[digit - 1]);
            }
        }
        acc
    }
}

struct PedersenTables {
    shift: CurvePoint,
    low_a: WindowTable,
    high_a: WindowTable,
    low_b: WindowTable,
    high_b: WindowTable,
}

static TABLES: Lazy<PedersenTables> = Lazy::new(|| {
    let (sx, sy) = *PEDERSEN_SHIFT_POINT;
    let points: Vec<CurvePoint> = PEDERSEN_POINTS
        .iter()
        .map(|(x, y)| CurvePoint::from_xy_unchecked(*x, *y))
        .collect();
    PedersenTables {
        shift: CurvePoint::from_xy_unchecked(sx, sy),
        low_a: WindowTable::build(points[0], LOW_WINDOWS),
        high_a: WindowTable::build(points[1], 1),
        low_b: WindowTable::build(points[2], LOW_WINDOWS),
        high_b: WindowTable::build(points[3], 1),
    }
});

/// Pedersen hash of two field elements.
pub fn hash2(a: &FieldElement, b: &FieldElement) -> FieldElement {
    let tables = &*TABLES;
    let low_mask = (U256::one() << LOW_PART_BITS) - U256::one();

    let mut acc = tables.shift;
    let a_raw = a.to_u256();
    acc = tables.low_a.accumulate(acc, a_raw & low_mask);
    acc = tables.high_a.accumulate(acc, a_raw >> LOW_PART_BITS);

    let b_raw = b.to_u256();
    acc = tables.low_b.accumulate(acc, b_raw & low_mask);
    acc = tables.high_b.accumulate(acc, b_raw >> LOW_PART_BITS);

    acc.x
}

/// Left-to-right `hash2` fold. Encoders seed the fold by passing the
/// message-type tag as the first element. A single element folds to
/// itself; the empty list folds to zero.
pub fn hash_elements(elements: &[FieldElement]) -> FieldElement {
    let mut iter = elements.iter();
    let Some(first) = iter.next() else {
        return FieldElement::zero();
    };
    let mut h = *first;
    for e in iter {
        h = hash2(&h, e);
    }
    h
}
