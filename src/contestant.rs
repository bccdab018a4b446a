//! Contestant aggregate: one ship's hull, composite shield, and
//! operator-indexed weapons, built from a normalized loadout.

use crate::catalog::Catalog;
use crate::damage::{Damage, DamageResult};
use crate::error::Error;
use crate::hull::Hull;
use crate::records::LoadoutRecord;
use crate::shield::Shield;
use crate::weapon::Weapon;
use indexmap::IndexMap;

/// Time-on-target assumed for the pilot's direct-fire weapons.
pub const PILOT_TOT: f64 = 0.75;
/// Time-on-target assumed for turret-operated weapons.
pub const TURRET_TOT: f64 = 0.95;

/// One side of an engagement: a hull, a shield, and every operator's
/// weapons, built from a [`LoadoutRecord`] resolved against a [`Catalog`].
#[derive(Debug, Clone)]
pub struct Contestant {
    pub name: String,
    pub hull: Hull,
    pub shield: Shield,
    /// Operator name (`"pilot"`, `"Turret N"`) → that operator's weapons, in
    /// loadout-declaration order.
    pub operators: IndexMap<String, Vec<Weapon>>,
    pub mobility_advantage: f64,
}

impl Contestant {
    /// Builds a Contestant by resolving every reference a [`LoadoutRecord`]
    /// carries against `catalog`.
    pub fn build(loadout: &LoadoutRecord, catalog: &Catalog) -> Result<Self, Error> {
        let ship = catalog.ship(&loadout.ship_name)?;
        let hull = Hull::new(ship);

        let mut shield_records = Vec::with_capacity(loadout.shields.len());
        for shield_name in &loadout.shields {
            shield_records.push(catalog.shield(shield_name)?.clone());
        }
        let faces = ship.shield_faces.face_count();
        let mut shield = Shield::new(&shield_records, faces, loadout.shields_power_percentage);
        shield.is_ready();

        let mut operators: IndexMap<String, Vec<Weapon>> = IndexMap::new();
        for (operator, weapon_names) in &loadout.weapons {
            let time_on_target = if operator == "pilot" { PILOT_TOT } else { TURRET_TOT };
            let mut weapons = Vec::with_capacity(weapon_names.len());
            for weapon_name in weapon_names {
                let record = catalog.weapon(weapon_name)?;
                let mut weapon = Weapon::new(record, time_on_target);
                weapon.set_power_percent(loadout.weapons_power_percentage);
                weapons.push(weapon);
            }
            operators.insert(operator.clone(), weapons);
        }

        Ok(Self {
            name: loadout.name.clone(),
            hull,
            shield,
            operators,
            mobility_advantage: 1.0,
        })
    }

    fn weapons_mut(&mut self) -> impl Iterator<Item = &mut Weapon> {
        self.operators.values_mut().flatten()
    }

    /// Gates readiness: false with no weapons at all. Side effects
    /// (`calculate_saturation`, `is_ready`) run on every weapon regardless
    /// of the outcome of earlier ones.
    pub fn is_ready(&mut self, distance: f64, target_size: f64, adv: f64) -> bool {
        let has_weapons = self.weapons_mut().next().is_some();
        if !has_weapons {
            return false;
        }

        let mut all_ready = true;
        for weapon in self.weapons_mut() {
            weapon.calculate_saturation(distance, target_size);
            let ready = weapon.is_ready(adv);
            all_ready = all_ready && ready;
        }

        let shield_ready = self.shield.is_ready();
        all_ready && shield_ready
    }

    /// Fires every weapon this tick and sums the channelwise output.
    pub fn fire_weapons(&mut self) -> Damage {
        let mut total = Damage::zero();
        for weapon in self.weapons_mut() {
            total += weapon.fire();
        }
        total
    }

    /// Applies incoming damage: the shield absorbs first, then the hull
    /// takes whatever passes through.
    pub fn apply_damage(&mut self, incoming: Damage) -> (DamageResult, DamageResult) {
        let shield_result = self.shield.apply_damage(incoming);
        let hull_result = self.hull.apply_damage(shield_result.passthrough);
        (shield_result, hull_result)
    }

    /// Restores hull, shield, and re-arms every weapon.
    pub fn reset(&mut self) {
        self.hull.reset();
        self.shield.reset();
        for weapon in self.weapons_mut() {
            weapon.cooldown();
        }
        self.mobility_advantage = 1.0;
    }
}
