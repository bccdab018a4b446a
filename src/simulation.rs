//! Simulation driver: mobility-advantage calculation, the tick loop, and
//! aggregation over all ordered distinct contestant pairs.

use crate::contestant::Contestant;
use crate::damage::Damage;
use crate::error::Error;

/// A full engagement result: one attacker firing on one defender until a
/// stopping predicate trips.
#[derive(Debug, Clone)]
pub struct SimulationResult {
    pub attacker: String,
    pub defender: String,
    pub time_to_kill: u64,
    pub time_limit: u64,
    pub mobility_advantage: f64,
    pub distance: f64,
    pub estimation: bool,
    pub total_damage_fired: Damage,
    pub total_damage_applied_to_hull: Damage,
    pub total_damage_applied_to_shield: Damage,
    pub remaining_shield_hp: f64,
    pub remaining_vital_hull_hp: f64,
    pub remaining_total_hull_hp: f64,
    pub starting_total_hull_hp: f64,
    pub starting_vital_hull_hp: f64,
    pub starting_shield_hp: f64,
}

impl SimulationResult {
    /// Human-readable summary of the engagement.
    pub fn summary(&self) -> String {
        let ttk = if self.time_to_kill < 1000 {
            self.time_to_kill.to_string()
        } else {
            "No Kill (Out of Ammo)".to_string()
        };
        format!(
            "{} ATTACKING {}\n  Engagement Distance: {} | Mobility Advantage: {}% | Time to Kill - {}",
            self.attacker.to_uppercase(),
            self.defender.to_uppercase(),
            self.distance,
            ((self.mobility_advantage - 1.0) * 100.0) as i64,
            ttk,
        )
    }
}

/// Configuration and driver for running engagements between contestants.
#[derive(Debug, Clone)]
pub struct Simulation {
    pub contestants: Vec<Contestant>,
    pub estimation: bool,
    pub distance: f64,
    pub mobility_bonus: f64,
    pub max_simulation_time: u64,
}

impl Default for Simulation {
    fn default() -> Self {
        Self {
            contestants: Vec::new(),
            estimation: true,
            distance: 400.0,
            mobility_bonus: 4.0,
            max_simulation_time: 999,
        }
    }
}

impl Simulation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_contestant(&mut self, contestant: Contestant) {
        self.contestants.push(contestant);
    }

    /// Computes the time to complete one full circle at the given turn rate
    /// and speed. Always computed via the radius → circumference path, not
    /// the algebraically-simplified `2π/ω`, to preserve parity with
    /// reference results.
    pub fn calculate_circle_time(&self, pitch_deg_per_s: f64, speed_m_per_s: f64) -> f64 {
        if !self.estimation {
            return 10.0;
        }

        let pitch_rate_rads = pitch_deg_per_s.to_radians();
        if pitch_rate_rads == 0.0 || speed_m_per_s == 0.0 {
            return f64::INFINITY;
        }

        let radius = speed_m_per_s / pitch_rate_rads;
        let circumference = 2.0 * std::f64::consts::PI * radius;
        circumference / speed_m_per_s
    }

    /// Resets every contestant to its freshly-built state.
    pub fn reset(&mut self) {
        for contestant in &mut self.contestants {
            contestant.reset();
        }
    }

    /// Runs one attacker-vs-target engagement to completion.
    pub fn simulate(&self, target: &mut Contestant, attacker: &mut Contestant) -> Result<SimulationResult, Error> {
        let mut adv = 1.0;
        if self.estimation {
            adv = self.mobility_bonus
                * (self.calculate_circle_time(target.hull.pitch_rate, target.hull.scm_speed)
                    - self.calculate_circle_time(attacker.hull.pitch_rate, attacker.hull.scm_speed))
                / 100.0
                + 1.0;
            if adv.is_infinite() {
                adv = 1.0;
            }
        }
        attacker.mobility_advantage = adv;
        log::debug!("{} vs {}: mobility advantage {adv:.3}", attacker.name, target.name);

        if !attacker.is_ready(self.distance, target.hull.visible_area, adv) {
            log::warn!("{} failed readiness check", attacker.name);
            return Err(Error::NotReady {
                contestant: attacker.name.clone(),
            });
        }
        if !target.is_ready(self.distance, attacker.hull.visible_area, adv) {
            log::warn!("{} failed readiness check", target.name);
            return Err(Error::NotReady {
                contestant: target.name.clone(),
            });
        }

        let mut timer: u64 = 0;
        let mut total_damage_fired = Damage::zero();
        let mut total_damage_applied_to_shield = Damage::zero();
        let mut total_damage_applied_to_hull = Damage::zero();

        while timer <= self.max_simulation_time
            && target.hull.current_vital_hp >= 0.0
            && target.hull.distortion_level <= target.hull.distortion_limit
        {
            timer += 1;
            let damage_output = attacker.fire_weapons();
            let (shield_result, hull_result) = target.apply_damage(damage_output);

            total_damage_fired += damage_output;
            total_damage_applied_to_shield += shield_result.incoming;
            total_damage_applied_to_hull += hull_result.incoming;
        }

        log::trace!("{} vs {}: time to kill {timer}", attacker.name, target.name);

        Ok(SimulationResult {
            attacker: attacker.name.clone(),
            defender: target.name.clone(),
            time_to_kill: timer,
            time_limit: self.max_simulation_time,
            mobility_advantage: adv,
            distance: self.distance,
            estimation: self.estimation,
            total_damage_fired,
            total_damage_applied_to_hull,
            total_damage_applied_to_shield,
            remaining_shield_hp: target.shield.current_hp,
            remaining_vital_hull_hp: target.hull.current_vital_hp,
            remaining_total_hull_hp: target.hull.current_nonvital_hp + target.hull.current_vital_hp,
            starting_vital_hull_hp: target.hull.max_vital_hp,
            starting_total_hull_hp: target.hull.max_nonvital_hp + target.hull.max_vital_hp,
            starting_shield_hp: target.shield.max_hp,
        })
    }

    /// Resets every contestant, then runs one `simulate` for every ordered
    /// pair of distinct contestants (attacker, defender), resetting between
    /// runs. Iterates attackers and defenders in insertion order.
    pub fn simulate_all(&mut self) -> Result<Vec<SimulationResult>, Error> {
        self.reset();
        let mut results = Vec::new();

        // Taken out of `self` for the duration of the loop so that
        // `self.simulate` (an immutable borrow of the whole config) can be
        // called while two of its elements are mutably borrowed.
        let mut contestants = std::mem::take(&mut self.contestants);

        for attacker_idx in 0..contestants.len() {
            for defender_idx in 0..contestants.len() {
                if attacker_idx == defender_idx {
                    continue;
                }

                let (attacker, defender) = if attacker_idx < defender_idx {
                    let (left, right) = contestants.split_at_mut(defender_idx);
                    (&mut left[attacker_idx], &mut right[0])
                } else {
                    let (left, right) = contestants.split_at_mut(attacker_idx);
                    (&mut right[0], &mut left[defender_idx])
                };

                let result = self.simulate(defender, attacker)?;
                results.push(result);

                attacker.reset();
                defender.reset();
            }
        }

        self.contestants = contestants;
        Ok(results)
    }
}
