//! A bounded interpolating scalar driven by a control percentage.
//!
//! Shared primitive used by shields and hulls to model resistance and
//! absorption curves that degrade smoothly as power or capacity falls.

use crate::damage::DamageChannel;
use crate::error::Error;
use serde::{Deserialize, Serialize};

/// `(kind, max, min, current)` with invariant `min <= current <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Modifier {
    pub kind: DamageChannel,
    pub max: f64,
    pub min: f64,
    pub current: f64,
}

impl Modifier {
    /// Constructs a modifier with distinct bounds. Rejects `min > max`.
    pub fn new(kind: DamageChannel, max: f64, min: f64) -> Result<Self, Error> {
        if min > max {
            return Err(Error::InvalidArithmetic {
                detail: format!("modifier min ({min}) exceeds max ({max})"),
            });
        }
        Ok(Self {
            kind,
            max,
            min,
            current: max,
        })
    }

    /// Constructs a modifier collapsed to a constant (`min := max`).
    pub fn constant(kind: DamageChannel, max: f64) -> Self {
        Self {
            kind,
            max,
            min: max,
            current: max,
        }
    }

    /// Interpolates `current` linearly from `min` (p=0) to `max` (p=1).
    /// `p` is assumed to be in `[0,1]`; out-of-range values are not clamped
    /// here — callers are responsible for that.
    pub fn decrement(&mut self, p: f64) {
        self.current = f64::max(self.min, self.max - (self.max - self.min) * (1.0 - p));
    }

    /// Pure; returns `max(0, v * current)`.
    pub fn apply(&self, v: f64) -> f64 {
        f64::max(0.0, v * self.current)
    }

    /// Resets `current` back to `max`.
    pub fn reset(&mut self) {
        self.current = self.max;
    }
}
