// crates/contractgen-core/src/ast/number.rs
// ============================================================================
// Module: Numeric Literals
// Description: Integer or decimal literal values carried by the input AST.
// Purpose: Preserve the literal form so rendered shorthands stay exact.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Measurements, durations, and thresholds are numeric literals in the source
//! contract. The literal form matters: a duration of `24` hours must render as
//! `24h`, never `24.0h`. [`Number`] keeps integers and decimals apart so the
//! renderers never reformat what the author wrote.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

// ============================================================================
// SECTION: Number
// ============================================================================

/// Numeric literal from the input AST.
///
/// # Invariants
/// - Integers deserialize as [`Number::Integer`]; anything with a fraction or
///   exponent deserializes as [`Number::Decimal`].
/// - `Display` renders integers without a fractional part.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Number {
    /// Whole-number literal.
    Integer(i64),
    /// Decimal literal.
    Decimal(f64),
}

impl Number {
    /// Returns the literal as a floating point value.
    #[must_use]
    #[allow(
        clippy::cast_precision_loss,
        reason = "Range checks on measurements tolerate precision loss beyond 2^53."
    )]
    pub fn as_f64(self) -> f64 {
        match self {
            Self::Integer(value) => value as f64,
            Self::Decimal(value) => value,
        }
    }

    /// Converts the literal into a JSON document value.
    ///
    /// Non-finite decimals cannot come from a parsed contract; they map to the
    /// integer zero rather than a null placeholder.
    #[must_use]
    pub fn to_value(self) -> Value {
        match self {
            Self::Integer(value) => Value::from(value),
            Self::Decimal(value) => {
                serde_json::Number::from_f64(value).map_or_else(|| Value::from(0), Value::Number)
            }
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(value) => value.fmt(f),
            Self::Decimal(value) => value.fmt(f),
        }
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Self::Decimal(value)
    }
}
