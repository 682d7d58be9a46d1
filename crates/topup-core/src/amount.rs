//! Exact token amounts.
//!
//! JSON integers stay integers so large balances survive arithmetic without
//! rounding; values written with a fraction or exponent are kept as floats.

use std::fmt;
use std::ops::Add;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A token balance or top-up as read from the input files.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Amount {
    /// Any JSON integer that fits in `i64` or `u64`.
    Int(i128),
    /// A JSON number with a fractional part or exponent.
    Float(f64),
}

impl Amount {
    /// Lossy float view, used when mixing with a fractional operand.
    pub fn as_f64(self) -> f64 {
        match self {
            Amount::Int(v) => v as f64,
            Amount::Float(v) => v,
        }
    }

    /// `self * count`, exact while both operands are integers.
    pub fn times(self, count: usize) -> Amount {
        match self {
            Amount::Int(v) => i128::try_from(count)
                .ok()
                .and_then(|c| v.checked_mul(c))
                .map(Amount::Int)
                .unwrap_or(Amount::Float(v as f64 * count as f64)),
            Amount::Float(v) => Amount::Float(v * count as f64),
        }
    }
}

impl Default for Amount {
    fn default() -> Self {
        Amount::Int(0)
    }
}

impl Add for Amount {
    type Output = Amount;

    fn add(self, rhs: Amount) -> Amount {
        match (self, rhs) {
            (Amount::Int(a), Amount::Int(b)) => match a.checked_add(b) {
                Some(sum) => Amount::Int(sum),
                None => Amount::Float(a as f64 + b as f64),
            },
            (a, b) => Amount::Float(a.as_f64() + b.as_f64()),
        }
    }
}

impl From<i64> for Amount {
    fn from(v: i64) -> Self {
        Amount::Int(v.into())
    }
}

impl From<f64> for Amount {
    fn from(v: f64) -> Self {
        Amount::Float(v)
    }
}

/// Integers print bare (`15`); floats always keep a fraction (`15.0`, `2.5`).
impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Amount::Int(v) => write!(f, "{v}"),
            Amount::Float(v) => write!(f, "{v:?}"),
        }
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let number = serde_json::Number::deserialize(deserializer)?;
        if let Some(v) = number.as_i64() {
            Ok(Amount::Int(v.into()))
        } else if let Some(v) = number.as_u64() {
            Ok(Amount::Int(v.into()))
        } else {
            number
                .as_f64()
                .map(Amount::Float)
                .ok_or_else(|| serde::de::Error::custom(format!("unsupported number {number}")))
        }
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match *self {
            Amount::Int(v) => serializer.serialize_i128(v),
            Amount::Float(v) => serializer.serialize_f64(v),
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
