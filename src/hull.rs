//! Runtime hull state: armor/structure HP, resistances, distortion.

use crate::damage::{Damage, DamageResult};
use crate::damage::DamageChannel;
use crate::modifier::Modifier;
use crate::records::ShipRecord;

/// The distortion accumulation threshold past which a ship is considered
/// incapacitated.
pub const DISTORTION_LIMIT: f64 = 6000.0;

/// Runtime hull state for one ship's armor/structure.
#[derive(Debug, Clone)]
pub struct Hull {
    pub max_vital_hp: f64,
    pub max_nonvital_hp: f64,
    pub current_vital_hp: f64,
    pub current_nonvital_hp: f64,
    pub vital_hull_name: String,
    pub bal_resistance: Modifier,
    pub eng_resistance: Modifier,
    pub dis_resistance: Modifier,
    pub pitch_rate: f64,
    pub scm_speed: f64,
    pub visible_area: f64,
    pub visible_vital_area: f64,
    pub distortion_limit: f64,
    pub distortion_level: f64,
}

impl Hull {
    /// Builds runtime hull state from a normalized [`ShipRecord`].
    pub fn new(ship: &ShipRecord) -> Self {
        let max_vital_hp = ship.vital_hull_hp;
        let max_nonvital_hp = ship.total_hp - ship.vital_hull_hp;
        let visible_vital_area = ship.visible_hull_area * 0.3;

        Self {
            max_vital_hp,
            max_nonvital_hp,
            current_vital_hp: max_vital_hp,
            current_nonvital_hp: max_nonvital_hp,
            vital_hull_name: ship.vital_hull_name.clone(),
            bal_resistance: Modifier::constant(DamageChannel::Ballistic, 1.0 - ship.ballistic_resistance),
            eng_resistance: Modifier::constant(DamageChannel::Energy, 1.0 - ship.energy_resistance),
            dis_resistance: Modifier::constant(DamageChannel::Distortion, 1.0 - ship.distortion_resistance),
            pitch_rate: ship.pitch_rate,
            scm_speed: ship.scm_speed,
            visible_area: ship.visible_hull_area,
            visible_vital_area,
            distortion_limit: DISTORTION_LIMIT,
            distortion_level: 0.0,
        }
    }

    /// Applies incoming damage through resistance modifiers, splitting the
    /// absorbed total between vital and non-vital HP by visible area ratio.
    pub fn apply_damage(&mut self, damage: Damage) -> DamageResult {
        let absorbed = Damage::new(
            self.bal_resistance.apply(damage.ballistic),
            self.eng_resistance.apply(damage.energy),
            self.dis_resistance.apply(damage.distortion),
        );

        let passthrough = Damage::zero();

        if self.current_nonvital_hp <= 0.0 {
            self.current_vital_hp -= absorbed.total();
        } else {
            let vital_fraction = self.visible_vital_area / self.visible_area;
            self.current_vital_hp -= absorbed.total() * vital_fraction;
            self.current_nonvital_hp -= absorbed.total() * (1.0 - vital_fraction);
        }

        self.distortion_level += absorbed.distortion;

        DamageResult {
            incoming: absorbed,
            passthrough,
        }
    }

    /// Restores current HP to maxima and resistances to their maximum.
    pub fn reset(&mut self) {
        self.current_vital_hp = self.max_vital_hp;
        self.current_nonvital_hp = self.max_nonvital_hp;
        self.bal_resistance.reset();
        self.eng_resistance.reset();
        self.dis_resistance.reset();
        self.distortion_level = 0.0;
    }
}
