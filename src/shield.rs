//! Runtime shield state: a composite shield array with absorption and
//! resistance modifiers that scale with current capacity.

use crate::damage::{Damage, DamageChannel, DamageResult};
use crate::modifier::Modifier;
use crate::records::ShieldRecord;

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// Runtime state for a composite shield array spanning one or more shield
/// generators, aggregated across `faces` regions.
#[derive(Debug, Clone)]
pub struct Shield {
    pub max_hp: f64,
    pub current_hp: f64,
    pub max_power_slots: f64,
    pub power_percentage: f64,
    pub bal_resistance: Modifier,
    pub eng_resistance: Modifier,
    pub dis_resistance: Modifier,
    pub bal_absorption: Modifier,
    pub eng_absorption: Modifier,
    pub dis_absorption: Modifier,
}

impl Shield {
    /// Builds a composite shield from the fitted [`ShieldRecord`]s, divided
    /// across `faces` regions, with `power_assigned` slots allocated.
    pub fn new(shields: &[ShieldRecord], faces: u32, power_assigned: f64) -> Self {
        let max_hp = if faces == 0 {
            0.0
        } else {
            shields.iter().map(|s| s.total_hp).sum::<f64>() / faces as f64
        };
        let max_power_slots: f64 = shields.iter().map(|s| s.max_power_slots).sum();
        let power_percentage = if max_power_slots > 0.0 {
            power_assigned / max_power_slots
        } else {
            0.0
        };

        let bal_res_min: Vec<f64> = shields.iter().map(|s| s.resistance_ballistic.min).collect();
        let bal_res_max: Vec<f64> = shields.iter().map(|s| s.resistance_ballistic.max).collect();
        let eng_res_min: Vec<f64> = shields.iter().map(|s| s.resistance_energy.min).collect();
        let eng_res_max: Vec<f64> = shields.iter().map(|s| s.resistance_energy.max).collect();
        let dis_res_min: Vec<f64> = shields.iter().map(|s| s.resistance_distortion.min).collect();
        let dis_res_max: Vec<f64> = shields.iter().map(|s| s.resistance_distortion.max).collect();

        let bal_abs_min: Vec<f64> = shields.iter().map(|s| s.absorption_ballistic.min).collect();
        let bal_abs_max: Vec<f64> = shields.iter().map(|s| s.absorption_ballistic.max).collect();
        let eng_abs_min: Vec<f64> = shields.iter().map(|s| s.absorption_energy.min).collect();
        let eng_abs_max: Vec<f64> = shields.iter().map(|s| s.absorption_energy.max).collect();
        let dis_abs_min: Vec<f64> = shields.iter().map(|s| s.absorption_distortion.min).collect();
        let dis_abs_max: Vec<f64> = shields.iter().map(|s| s.absorption_distortion.max).collect();

        let modifier = |kind: DamageChannel, mins: &[f64], maxs: &[f64]| -> Modifier {
            let max = mean(maxs);
            let min = mean(mins);
            Modifier::new(kind, f64::max(max, min), f64::min(max, min)).expect("mean bounds are ordered")
        };

        Self {
            max_hp,
            current_hp: max_hp,
            max_power_slots,
            power_percentage,
            bal_resistance: modifier(DamageChannel::Ballistic, &bal_res_min, &bal_res_max),
            eng_resistance: modifier(DamageChannel::Energy, &eng_res_min, &eng_res_max),
            dis_resistance: modifier(DamageChannel::Distortion, &dis_res_min, &dis_res_max),
            bal_absorption: modifier(DamageChannel::Ballistic, &bal_abs_min, &bal_abs_max),
            eng_absorption: modifier(DamageChannel::Energy, &eng_abs_min, &eng_abs_max),
            dis_absorption: modifier(DamageChannel::Distortion, &dis_abs_min, &dis_abs_max),
        }
    }

    fn modifiers_mut(&mut self) -> [&mut Modifier; 6] {
        [
            &mut self.bal_resistance,
            &mut self.eng_resistance,
            &mut self.dis_resistance,
            &mut self.bal_absorption,
            &mut self.eng_absorption,
            &mut self.dis_absorption,
        ]
    }

    /// True iff power is available and the shield has capacity. As a side
    /// effect, scales all six modifiers by the current power allocation.
    pub fn is_ready(&mut self) -> bool {
        let mut ready = self.power_percentage > 0.0;
        if ready {
            let power_percentage = self.power_percentage;
            for modifier in self.modifiers_mut() {
                modifier.decrement(power_percentage);
            }
        }
        if self.current_hp <= 0.0 || self.max_hp <= 0.0 {
            ready = false;
        }
        ready
    }

    /// Absorbs, then applies resistance to, incoming damage. Whatever the
    /// shield doesn't absorb passes through unconditionally.
    pub fn apply_damage(&mut self, incoming: Damage) -> DamageResult {
        if self.current_hp <= 0.0 {
            return DamageResult {
                incoming: Damage::zero(),
                passthrough: incoming,
            };
        }

        let absorbed = Damage::new(
            self.bal_absorption.apply(incoming.ballistic),
            self.eng_absorption.apply(incoming.energy),
            self.dis_absorption.apply(incoming.distortion),
        );
        let applied = Damage::new(
            self.bal_resistance.apply(absorbed.ballistic),
            self.eng_resistance.apply(absorbed.energy),
            self.dis_resistance.apply(absorbed.distortion),
        );
        let passthrough = incoming - absorbed;

        self.current_hp -= applied.total();

        let p = self.current_hp / self.max_hp;
        for modifier in self.modifiers_mut() {
            modifier.decrement(p);
        }

        DamageResult {
            incoming: applied,
            passthrough,
        }
    }

    /// Restores `current_hp` and all modifiers, then re-applies the
    /// power-based decrement via [`Shield::is_ready`].
    pub fn reset(&mut self) {
        self.current_hp = self.max_hp;
        for modifier in self.modifiers_mut() {
            modifier.reset();
        }
        self.is_ready();
    }
}
