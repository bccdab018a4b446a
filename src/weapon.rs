//! Runtime weapon state machine: a tick-driven duty cycle of
//! firing/cooling/exhaustion, gated by power and mobility advantage.

use crate::damage::{Damage, DamageChannel};
use crate::records::WeaponRecord;

/// A derived, inspection-only view over the authoritative counter state.
/// Never consulted by [`Weapon::fire`] itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeaponState {
    Ready,
    Firing,
    Cooling,
    Exhausted,
}

/// Runtime state for a single mounted weapon.
#[derive(Debug, Clone)]
pub struct Weapon {
    /// `None` when the underlying record has no damage channel assigned —
    /// such a weapon can never become ready to fire.
    pub damage_type: Option<DamageChannel>,
    pub time_on_target: f64,
    pub burst_dps: f64,
    pub max_burst_length: f64,
    pub burst_length: f64,
    pub burst_cooldown: f64,
    pub runtime: f64,
    pub spread: f64,
    pub projectile_speed: f64,
    pub ready_to_fire: bool,
    pub burst_timer: u64,
    pub cooldown_timer: u64,
    pub firing_timer: u64,
    pub power_percent: f64,
    pub spread_radius: f64,
    pub target_saturation_percent: f64,
    pub target_vital_percent: f64,
}

impl Weapon {
    /// Builds runtime weapon state from a normalized [`WeaponRecord`].
    pub fn new(weapon: &WeaponRecord, time_on_target: f64) -> Self {
        let time_on_target = f64::max(0.0, f64::min(time_on_target, 1.0));
        let max_burst_length = weapon.burst_duration;

        Self {
            damage_type: weapon.damage_type,
            time_on_target,
            burst_dps: weapon.burst_dps,
            max_burst_length,
            burst_length: max_burst_length * time_on_target,
            burst_cooldown: weapon.burst_cooldown,
            runtime: weapon.total_runtime,
            spread: weapon.spread,
            projectile_speed: weapon.projectile_speed,
            ready_to_fire: false,
            burst_timer: 0,
            cooldown_timer: 0,
            firing_timer: 0,
            power_percent: 0.0,
            spread_radius: 0.0,
            target_saturation_percent: 0.0,
            target_vital_percent: 0.0,
        }
    }

    /// A derived view of the current counter state, for debugging/inspection.
    pub fn state(&self) -> WeaponState {
        if self.ready_to_fire {
            if self.burst_timer > 0 {
                WeaponState::Firing
            } else {
                WeaponState::Ready
            }
        } else if self.firing_timer >= self.runtime {
            WeaponState::Exhausted
        } else {
            WeaponState::Cooling
        }
    }

    /// Sets the fraction of available power assigned to this weapon,
    /// clamped to `[0,1]`, and recomputes `burst_length` accordingly. A
    /// non-positive `power_percent` falls back to full power.
    pub fn set_power_percent(&mut self, power_percent: f64) {
        self.power_percent = if power_percent > 0.0 {
            power_percent.clamp(0.0, 1.0)
        } else {
            1.0
        };
        self.burst_length = self.max_burst_length * self.power_percent;
    }

    /// Sets power allocation from a slot ratio instead of a direct
    /// percentage. The scalar ratio is clamped to `[0,1]`.
    pub fn set_power_percent_from_slots(&mut self, power_slots_available: f64, power_slots_assigned: f64) {
        let ratio = if power_slots_available > 0.0 {
            power_slots_assigned / power_slots_available
        } else {
            1.0
        };
        self.set_power_percent(ratio);
    }

    /// Gates firing readiness and updates `time_on_target` from the
    /// contestant's mobility advantage. `0` is treated as "unset" and falls
    /// back to `adv` alone rather than `time_on_target * adv`. A weapon with
    /// no damage channel can never be ready.
    pub fn is_ready(&mut self, adv: f64) -> bool {
        let mut ready = true;
        if self.damage_type.is_none() {
            ready = false;
        }

        if self.spread == 0.0 {
            self.spread = 0.0;
        }
        if self.power_percent == 0.0 {
            self.power_percent = 1.0;
        }

        self.time_on_target = if self.time_on_target == 0.0 {
            (1.0 * adv).clamp(0.0, 1.0)
        } else {
            (self.time_on_target * adv).clamp(0.0, 1.0)
        };

        self.ready_to_fire = ready;
        ready
    }

    /// Computes (but does not feed back into damage output) saturation
    /// metrics for a given engagement distance and target size.
    pub fn calculate_saturation(&mut self, distance: f64, target_size: f64) {
        self.spread_radius = (self.spread / 2.0).tan() * distance;
        self.target_saturation_percent = if self.spread_radius != 0.0 {
            (100.0 * target_size.powi(2) / self.spread_radius.powi(2)).clamp(0.0, 1.0)
        } else {
            1.0
        };
        self.target_vital_percent = 0.36;
    }

    /// Advances the weapon by one tick, emitting the damage fired this tick
    /// (zero when not firing) and transitioning the duty cycle.
    pub fn fire(&mut self) -> Damage {
        let mut output = Damage::zero();

        if self.ready_to_fire {
            self.firing_timer += 1;
            self.burst_timer += 1;

            if let Some(channel) = self.damage_type {
                output = Damage::of(channel, self.burst_dps * self.time_on_target);
            }

            if self.burst_timer as f64 >= self.burst_length {
                self.burst_timer = 0;
                self.cooldown_timer = 0;
                self.ready_to_fire = false;
            }

            if self.firing_timer as f64 >= self.runtime {
                self.ready_to_fire = false;
            }
        } else if (self.firing_timer as f64) < self.runtime {
            self.cooldown_timer += 1;
            if self.cooldown_timer as f64 >= self.burst_cooldown {
                self.burst_timer = 0;
                self.cooldown_timer = 0;
                self.ready_to_fire = true;
            } else {
                self.burst_timer = 0;
                self.ready_to_fire = false;
            }
        } else {
            self.ready_to_fire = false;
        }

        output
    }

    /// Re-arms the weapon and zeroes all counters.
    pub fn cooldown(&mut self) {
        self.ready_to_fire = true;
        self.burst_timer = 0;
        self.cooldown_timer = 0;
        self.firing_timer = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::normalize_weapon;
    use serde_json::json;

    fn energy_weapon() -> WeaponRecord {
        normalize_weapon(&json!({
            "localName": "behr_laser_s1",
            "data": {
                "size": 1,
                "weapon": {
                    "fireActions": { "fireRate": 60 },
                    "spread": { "max": 0.0 },
                    "regen": { "maxAmmoLoad": 20, "maxRegenPerSec": 10 }
                },
                "ammo": { "data": { "speed": 1100, "damage": { "damageEnergy": 10.0, "damageDistortion": 0 } } },
                "ammoContainer": { "maxAmmoCount": 0 },
            }
        }))
        .unwrap()
    }

    #[test]
    fn fires_emits_scaled_damage_each_tick() {
        let record = energy_weapon();
        let mut weapon = Weapon::new(&record, 1.0);
        weapon.set_power_percent(1.0);
        weapon.is_ready(1.0);

        let damage = weapon.fire();
        assert_eq!(damage.energy, record.burst_dps * weapon.time_on_target);
        assert_eq!(damage.ballistic, 0.0);
        assert_eq!(damage.distortion, 0.0);
    }

    #[test]
    fn burst_ends_and_enters_cooldown() {
        let record = energy_weapon();
        let mut weapon = Weapon::new(&record, 1.0);
        weapon.set_power_percent(1.0);
        weapon.is_ready(1.0);

        for _ in 0..(weapon.burst_length.ceil() as u64) {
            weapon.fire();
        }
        assert!(!weapon.ready_to_fire);
        assert_eq!(weapon.burst_timer, 0);
    }

    #[test]
    fn cooldown_completes_and_rearms() {
        let record = energy_weapon();
        let mut weapon = Weapon::new(&record, 1.0);
        weapon.set_power_percent(1.0);
        weapon.is_ready(1.0);

        for _ in 0..(weapon.burst_length.ceil() as u64) {
            weapon.fire();
        }
        assert!(!weapon.ready_to_fire);

        for _ in 0..(weapon.burst_cooldown.ceil() as u64) {
            weapon.fire();
        }
        assert!(weapon.ready_to_fire);
    }

    #[test]
    fn runtime_exhaustion_is_permanent_for_the_engagement() {
        let record = energy_weapon();
        let mut weapon = Weapon::new(&record, 1.0);
        weapon.runtime = 3.0;
        weapon.set_power_percent(1.0);
        weapon.is_ready(1.0);

        for _ in 0..10 {
            weapon.fire();
        }
        assert!(!weapon.ready_to_fire);
        assert_eq!(weapon.fire().total(), 0.0);
    }

    #[test]
    fn zero_time_on_target_falls_back_to_adv_alone() {
        let record = energy_weapon();
        let mut weapon = Weapon::new(&record, 0.0);
        assert_eq!(weapon.time_on_target, 0.0);
        weapon.is_ready(0.8);
        assert_eq!(weapon.time_on_target, 0.8);
    }

    #[test]
    fn cooldown_method_resets_all_counters() {
        let record = energy_weapon();
        let mut weapon = Weapon::new(&record, 1.0);
        weapon.is_ready(1.0);
        weapon.fire();
        weapon.cooldown();
        assert!(weapon.ready_to_fire);
        assert_eq!(weapon.burst_timer, 0);
        assert_eq!(weapon.cooldown_timer, 0);
        assert_eq!(weapon.firing_timer, 0);
    }

    #[test]
    fn no_damage_channel_is_never_ready() {
        // A degenerate descriptor (neither damageEnergy nor damageDistortion
        // positive) normalizes to `damage_type: None`.
        let record = WeaponRecord {
            damage_type: None,
            ..energy_weapon()
        };
        let mut weapon = Weapon::new(&record, 1.0);

        assert!(!weapon.is_ready(1.0));
        assert!(!weapon.ready_to_fire);
        assert_eq!(weapon.fire().total(), 0.0);
    }

    #[test]
    fn calculate_saturation_is_informational_only() {
        let record = energy_weapon();
        let mut weapon = Weapon::new(&record, 1.0);
        weapon.spread = 0.2;
        weapon.is_ready(1.0);
        weapon.calculate_saturation(400.0, 10.0);
        assert!(weapon.target_saturation_percent >= 0.0 && weapon.target_saturation_percent <= 1.0);
        assert_eq!(weapon.target_vital_percent, 0.36);
        // Saturation does not influence fire()'s output.
        let before = weapon.fire();
        assert_eq!(before.energy, record.burst_dps * weapon.time_on_target);
    }
}
