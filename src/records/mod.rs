//! Normalized equipment records and the stateless normalizers that produce
//! them from raw descriptor trees.
//!
//! Descriptors are modeled as `serde_json::Value` — an opaque tree of
//! string keys to scalars/maps/lists, per spec. Missing keys documented as
//! optional fall back to their stated default; missing required keys
//! surface as [`crate::error::Error::DescriptorMissingField`].

mod loadout;
mod shield;
mod ship;
mod weapon;

pub use loadout::{normalize_loadout, LoadoutRecord};
pub use shield::{normalize_shield, ShieldRecord};
pub use ship::{normalize_ship, ShieldFaces, ShipRecord};
pub use weapon::{normalize_weapon, WeaponRecord};

use crate::error::Error;
use serde_json::Value;

/// Looks up a dot-separated path (`"a.b.c"`) in a descriptor tree.
pub(crate) fn path<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(value, |node, key| node.get(key))
}

/// A required field: missing or wrong-typed yields `DescriptorMissingField`.
pub(crate) fn require_f64(value: &Value, field_path: &str) -> Result<f64, Error> {
    path(value, field_path)
        .and_then(Value::as_f64)
        .ok_or_else(|| Error::DescriptorMissingField {
            path: field_path.to_string(),
        })
}

pub(crate) fn require_str<'a>(value: &'a Value, field_path: &str) -> Result<&'a str, Error> {
    path(value, field_path)
        .and_then(Value::as_str)
        .ok_or_else(|| Error::DescriptorMissingField {
            path: field_path.to_string(),
        })
}

pub(crate) fn optional_f64(value: &Value, field_path: &str, default: f64) -> f64 {
    path(value, field_path).and_then(Value::as_f64).unwrap_or(default)
}

pub(crate) fn optional_i64(value: &Value, field_path: &str, default: i64) -> i64 {
    path(value, field_path).and_then(Value::as_i64).unwrap_or(default)
}

pub(crate) fn optional_str<'a>(value: &'a Value, field_path: &str, default: &'a str) -> &'a str {
    path(value, field_path).and_then(Value::as_str).unwrap_or(default)
}

pub(crate) fn optional_bool(value: &Value, field_path: &str, default: bool) -> bool {
    path(value, field_path).and_then(Value::as_bool).unwrap_or(default)
}
