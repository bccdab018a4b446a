//! Damage channels and the value types carrying per-channel damage.

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Sub};

/// The three damage channels the combat model recognizes; no others exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DamageChannel {
    Ballistic,
    Energy,
    Distortion,
}

/// Per-channel damage. Arithmetic is pointwise and never clamps; callers
/// clamp where semantically required (e.g. a shield with no HP left).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Damage {
    pub ballistic: f64,
    pub energy: f64,
    pub distortion: f64,
}

impl Damage {
    pub fn new(ballistic: f64, energy: f64, distortion: f64) -> Self {
        Self {
            ballistic,
            energy,
            distortion,
        }
    }

    pub fn zero() -> Self {
        Self::default()
    }

    /// A single-channel damage value, with the other two channels zero.
    pub fn of(channel: DamageChannel, value: f64) -> Self {
        let mut damage = Self::zero();
        match channel {
            DamageChannel::Ballistic => damage.ballistic = value,
            DamageChannel::Energy => damage.energy = value,
            DamageChannel::Distortion => damage.distortion = value,
        }
        damage
    }

    pub fn total(&self) -> f64 {
        self.ballistic + self.energy + self.distortion
    }
}

impl Add for Damage {
    type Output = Damage;
    fn add(self, rhs: Damage) -> Damage {
        Damage {
            ballistic: self.ballistic + rhs.ballistic,
            energy: self.energy + rhs.energy,
            distortion: self.distortion + rhs.distortion,
        }
    }
}

impl AddAssign for Damage {
    fn add_assign(&mut self, rhs: Damage) {
        self.ballistic += rhs.ballistic;
        self.energy += rhs.energy;
        self.distortion += rhs.distortion;
    }
}

impl Sub for Damage {
    type Output = Damage;
    fn sub(self, rhs: Damage) -> Damage {
        Damage {
            ballistic: self.ballistic - rhs.ballistic,
            energy: self.energy - rhs.energy,
            distortion: self.distortion - rhs.distortion,
        }
    }
}

/// The bifurcation of incoming vs. passthrough damage at an armor layer.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DamageResult {
    /// What this layer actually absorbed/applied.
    pub incoming: Damage,
    /// What leaks to the next layer.
    pub passthrough: Damage,
}
