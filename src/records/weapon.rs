//! Weapon normalizer: raw weapon/ammo descriptor → [`WeaponRecord`].

use super::{optional_f64, path, require_f64, require_str};
use crate::damage::DamageChannel;
use crate::error::Error;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Normalized weapon statistics, discriminated on whether the weapon draws
/// from a finite `ammo_count` (a ballistic gun) or is a capacitor/energy
/// weapon (`ammo_count == 0`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponRecord {
    pub name: String,
    pub size: i64,
    /// Shots per second (raw descriptor rate / 60).
    pub fire_rate: f64,
    pub ammo_count: i64,
    /// Max spread, in radians.
    pub spread: f64,
    pub alpha_damage: f64,
    /// `None` when the descriptor carries no positive damage on any channel
    /// (mirrors the original's `damage_type = None` for such a weapon — it
    /// has no channel to fire on, rather than a channel that deals zero).
    pub damage_type: Option<DamageChannel>,
    pub projectile_speed: f64,
    pub burst_duration: f64,
    pub burst_cooldown: f64,
    pub burst_dps: f64,
    pub total_runtime: f64,
}

/// Normalizes a raw weapon descriptor (`{ localName, data: {...} }`).
pub fn normalize_weapon(source: &Value) -> Result<WeaponRecord, Error> {
    let name = require_str(source, "localName")?.to_string();
    let data = source.get("data").ok_or_else(|| Error::DescriptorMissingField {
        path: "data".to_string(),
    })?;

    let size = require_f64(data, "size")? as i64;
    let fire_rate = optional_f64(data, "weapon.fireActions.fireRate", 10.0) / 60.0;
    let spread = optional_f64(data, "weapon.spread.max", 0.5);
    let projectile_speed = optional_f64(data, "ammo.data.speed", 0.0);
    let ammo_count = optional_f64(data, "ammoContainer.maxAmmoCount", 0.0) as i64;

    if ammo_count == 0 {
        normalize_energy_weapon(name, size, fire_rate, spread, projectile_speed, data)
    } else {
        normalize_ballistic_weapon(name, size, fire_rate, spread, projectile_speed, ammo_count, data)
    }
}

fn normalize_energy_weapon(
    name: String,
    size: i64,
    fire_rate: f64,
    spread: f64,
    projectile_speed: f64,
    data: &Value,
) -> Result<WeaponRecord, Error> {
    let damage_energy = optional_f64(data, "ammo.data.damage.damageEnergy", 0.0);
    let damage_distortion = optional_f64(data, "ammo.data.damage.damageDistortion", 0.0);

    let (damage_type, alpha_damage) = if damage_energy > 0.0 {
        (Some(DamageChannel::Energy), damage_energy)
    } else if damage_distortion > 0.0 {
        (Some(DamageChannel::Distortion), damage_distortion)
    } else {
        log::warn!("energy weapon `{name}` has no positive energy or distortion damage; no damage channel assigned");
        (None, 0.0)
    };

    let max_ammo_load = require_f64(data, "weapon.regen.maxAmmoLoad")?;
    let max_regen_per_sec = require_f64(data, "weapon.regen.maxRegenPerSec")?;

    let burst_duration = max_ammo_load / fire_rate;
    let burst_cooldown = max_ammo_load / max_regen_per_sec;
    let total_runtime = 1000.0;
    let burst_dps = alpha_damage * fire_rate;

    Ok(WeaponRecord {
        name,
        size,
        fire_rate,
        ammo_count: 0,
        spread,
        alpha_damage,
        damage_type,
        projectile_speed,
        burst_duration,
        burst_cooldown,
        burst_dps,
        total_runtime,
    })
}

fn normalize_ballistic_weapon(
    name: String,
    size: i64,
    fire_rate: f64,
    spread: f64,
    projectile_speed: f64,
    ammo_count: i64,
    data: &Value,
) -> Result<WeaponRecord, Error> {
    let alpha_damage = require_f64(data, "ammo.data.damage.damagePhysical")?;

    let overheat_temperature = optional_f64(data, "weapon.connection.simplifiedHeat.overheatTemperature", 1.0);
    let min_temperature = optional_f64(data, "weapon.connection.simplifiedHeat.minTemperature", 0.0);
    let time_till_cooling_starts = optional_f64(
        data,
        "weapon.connection.simplifiedHeat.timeTillCoolingStarts",
        0.0,
    );
    let overheat_fix_time = optional_f64(data, "weapon.connection.simplifiedHeat.overheatFixTime", 0.0);
    let heat_per_shot = optional_f64(data, "weapon.fireActions.heatPerShot", 0.0);

    let overheat_temp = overheat_temperature - min_temperature;
    let cooldown_time = time_till_cooling_starts + overheat_fix_time;
    let heat_gen_per_second = heat_per_shot * fire_rate;

    let burst_duration = if heat_gen_per_second == 0.0 {
        99999.0
    } else {
        overheat_temp / heat_gen_per_second
    };
    let burst_cooldown = cooldown_time;
    let total_runtime =
        ((ammo_count as f64 / fire_rate) / burst_duration) * burst_cooldown + (ammo_count as f64 / fire_rate);
    let burst_dps = alpha_damage * fire_rate;

    Ok(WeaponRecord {
        name,
        size,
        fire_rate,
        ammo_count,
        spread,
        alpha_damage,
        damage_type: Some(DamageChannel::Ballistic),
        projectile_speed,
        burst_duration,
        burst_cooldown,
        burst_dps,
        total_runtime,
    })
}
