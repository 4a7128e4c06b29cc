#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};

/// One raw listing row as delivered by the upstream collaborator (crawler or
/// CSV source). All fields are untyped strings; coercion happens at load.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawRow {
    pub address: String,
    pub area: String,
    pub price: String,
    pub buildarea: String,
}

impl RawRow {
    pub fn new(
        address: impl Into<String>,
        area: impl Into<String>,
        price: impl Into<String>,
        buildarea: impl Into<String>,
    ) -> Self {
        Self {
            address: address.into(),
            area: area.into(),
            price: price.into(),
            buildarea: buildarea.into(),
        }
    }
}

/// One rental listing after coercion: a fixed, validated shape with named
/// optional numeric fields. A `None` numeric field means the raw value was
/// absent or failed coercion; the row itself is always retained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub address: Option<String>,
    pub area: String,
    pub price: Option<i64>,
    pub buildarea: Option<i64>,
}

impl Record {
    /// Coerce a raw row into the canonical record shape.
    ///
    /// Numeric coercion is permissive: a malformed `price` or `buildarea`
    /// degrades to `None` on that field only, never an error.
    #[must_use]
    pub fn from_raw(raw: &RawRow) -> Self {
        let address = raw.address.trim();
        Self {
            address: if address.is_empty() {
                None
            } else {
                Some(address.to_owned())
            },
            area: raw.area.trim().to_owned(),
            price: coerce_int(&raw.price),
            buildarea: coerce_int(&raw.buildarea),
        }
    }
}

/// Coerce a string field to a non-negative integer.
///
/// Empty, non-numeric, or negative values yield `None`. Integral float
/// spellings ("850.0") coerce; fractional ones do not — they would silently
/// lose precision, and the upstream source never emits them for valid rows.
#[must_use]
pub fn coerce_int(field: &str) -> Option<i64> {
    let trimmed = field.trim();
    if trimmed.is_empty() {
        return None;
    }

    let value = if let Ok(v) = trimmed.parse::<i64>() {
        v
    } else {
        let f = trimmed.parse::<f64>().ok()?;
        if !f.is_finite() || f != f.trunc() {
            return None;
        }
        if f < i64::MIN as f64 || f > i64::MAX as f64 {
            return None;
        }
        f as i64
    };

    if value < 0 {
        return None;
    }
    Some(value)
}

/// Round to 2 decimal places, half-away-from-zero. All pipeline inputs are
/// non-negative, so this is plain half-up rounding.
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
